// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Derived preview images for paged documents.
//!
//! A document at `key` whose extension is configured gets a rendered first
//! page stored at `{folder}/{key}`, readable by anyone.

use crate::config::PreviewConfig;
use crate::error::{Error, Result};
use crate::key;
use crate::store::BucketClient;
use async_trait::async_trait;
use bytes::Bytes;
use std::process::Stdio;
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Turns a document into its preview image
#[async_trait]
pub trait PreviewRenderer: Send + Sync {
    async fn render(&self, document: Bytes) -> Result<Bytes>;
}

/// Renders by piping the document through an external program
#[derive(Debug, Clone)]
pub struct CommandRenderer {
    program: String,
    args: Vec<String>,
}

impl CommandRenderer {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// `command[0]` is the program, the rest its arguments
    pub fn from_command(command: &[String]) -> Result<Self> {
        let (program, args) = command
            .split_first()
            .ok_or_else(|| Error::config("preview.command cannot be empty"))?;
        Ok(Self::new(program.clone(), args.to_vec()))
    }
}

#[async_trait]
impl PreviewRenderer for CommandRenderer {
    async fn render(&self, document: Bytes) -> Result<Bytes> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| Error::preview(format!("cannot start {}: {e}", self.program)))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| Error::preview("renderer stdin unavailable"))?;

        // Feed stdin while draining stdout, or a large document deadlocks the pipe.
        let feed = async move {
            let written = stdin.write_all(&document).await;
            drop(stdin);
            written
        };
        let (written, output) = tokio::join!(feed, child.wait_with_output());
        let output = output?;

        if !output.status.success() {
            return Err(Error::preview(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        written?;
        if output.stdout.is_empty() {
            return Err(Error::preview(format!("{} produced no output", self.program)));
        }
        Ok(Bytes::from(output.stdout))
    }
}

/// Decides which keys carry a preview and writes them
#[derive(Clone)]
pub struct Previewer {
    config: PreviewConfig,
    renderer: Arc<dyn PreviewRenderer>,
}

impl Previewer {
    pub fn new(config: PreviewConfig, renderer: Arc<dyn PreviewRenderer>) -> Self {
        Self { config, renderer }
    }

    /// Previewer that runs `config.command`
    pub fn from_config(config: &PreviewConfig) -> Result<Self> {
        let renderer = CommandRenderer::from_command(&config.command)?;
        Ok(Self::new(config.clone(), Arc::new(renderer)))
    }

    /// True when documents at `key` get a preview
    pub fn applies_to(&self, object_key: &str) -> bool {
        let ext = key::file_extension(key::basename(object_key));
        !ext.is_empty()
            && self
                .config
                .extensions
                .iter()
                .any(|e| e.eq_ignore_ascii_case(&ext))
    }

    pub fn preview_key(&self, object_key: &str) -> String {
        key::join(&self.config.folder, object_key)
    }

    /// Renders `document` and stores it as the preview of `object_key`.
    /// Returns the preview key.
    pub async fn generate(
        &self,
        client: &dyn BucketClient,
        object_key: &str,
        document: Bytes,
    ) -> Result<String> {
        let preview_key = self.preview_key(object_key);
        let image = self.renderer.render(document).await?;
        client
            .put_object(&preview_key, image, &self.config.content_type)
            .await?;
        client.set_public_read(&preview_key).await?;
        diagnostics::debug!("stored preview {preview_key}", preview_key: preview_key.as_str());
        Ok(preview_key)
    }

    /// Reads `object_key` back from the store and regenerates its preview
    pub async fn regenerate(&self, client: &dyn BucketClient, object_key: &str) -> Result<String> {
        let document = client.get_object(object_key).await?;
        self.generate(client, object_key, document).await
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use tokio::sync::Mutex;

    /// Renderer that prefixes the document and records each call
    #[derive(Default)]
    pub struct FakeRenderer {
        pub calls: Mutex<Vec<Bytes>>,
        pub fail: bool,
    }

    impl FakeRenderer {
        pub fn failing() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail: true,
            }
        }
    }

    #[async_trait]
    impl PreviewRenderer for FakeRenderer {
        async fn render(&self, document: Bytes) -> Result<Bytes> {
            self.calls.lock().await.push(document.clone());
            if self.fail {
                return Err(Error::preview("document could not be rendered"));
            }
            let mut image = b"PNG:".to_vec();
            image.extend_from_slice(&document);
            Ok(Bytes::from(image))
        }
    }
}
