// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! The operations a file browser front end calls.

use crate::config::StoreConfig;
use crate::error::{Error, Result};
use crate::key;
use crate::listing::Lister;
use crate::mover::{MoveError, MoveOutcome, Mover};
use crate::node::TreeNode;
use crate::factory::open_bucket;
use crate::preview::Previewer;
use crate::store::BucketClient;
use bytes::Bytes;
use futures::future::join_all;
use std::sync::Arc;

const DIRECTORY_CONTENT_TYPE: &str = "application/x-directory";

/// A file to upload
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub name: String,
    pub data: Bytes,
    pub content_type: String,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, data: impl Into<Bytes>, content_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
            content_type: content_type.into(),
        }
    }
}

/// A stored, public upload
#[derive(Debug)]
pub struct UploadOutcome {
    pub key: String,
    /// Preview key, when one was generated
    pub preview: Option<String>,
    /// Why the preview could not be generated
    pub warning: Option<Error>,
}

/// Tree browsing, search, move and upload over one bucket
#[derive(Clone)]
pub struct FileManager {
    client: Arc<dyn BucketClient>,
    lister: Lister,
    mover: Mover,
    previewer: Option<Previewer>,
}

impl FileManager {
    pub fn new(
        config: &StoreConfig,
        client: Arc<dyn BucketClient>,
        previewer: Option<Previewer>,
    ) -> Self {
        Self {
            lister: Lister::new(client.clone(), config.layout()),
            mover: Mover::new(client.clone(), previewer.clone()),
            client,
            previewer,
        }
    }

    /// Opens the bucket named in `config` with the command-line preview renderer
    pub fn from_config(config: &StoreConfig) -> Result<Self> {
        config.validate()?;
        let client = open_bucket(config)?;
        let previewer = if config.preview.extensions.is_empty() {
            None
        } else {
            Some(Previewer::from_config(&config.preview)?)
        };
        Ok(Self::new(config, client, previewer))
    }

    pub fn client(&self) -> &Arc<dyn BucketClient> {
        &self.client
    }

    /// Full tree of every object under `prefix`
    pub async fn build_tree(&self, prefix: &str) -> Result<TreeNode> {
        self.lister.list_all(prefix).await
    }

    /// Nodes under `prefix` whose name contains `query`, case-insensitively
    pub async fn search_tree(&self, prefix: &str, query: &str) -> Result<Vec<TreeNode>> {
        self.lister.search(prefix, query).await
    }

    /// Search results wrapped in a synthetic directory root.
    /// An empty query returns the whole tree.
    pub async fn search_root(&self, prefix: &str, query: &str) -> Result<TreeNode> {
        if query.is_empty() {
            return self.build_tree(prefix).await;
        }
        Ok(TreeNode::search_root(self.search_tree(prefix, query).await?))
    }

    pub async fn move_object(
        &self,
        current_key: &str,
        new_key: &str,
    ) -> std::result::Result<MoveOutcome, MoveError> {
        self.mover.move_object(current_key, new_key).await
    }

    /// Creates an empty directory marker, returning its key
    pub async fn create_directory(&self, path: &str) -> Result<String> {
        let marker = key::directory_key(path);
        self.client
            .put_object(&marker, Bytes::new(), DIRECTORY_CONTENT_TYPE)
            .await?;
        diagnostics::info!("created directory {marker}", marker: marker.as_str());
        Ok(marker)
    }

    /// Stores `file` in `dir` readable by anyone, with a preview for paged documents
    pub async fn upload(&self, dir: &str, file: UploadFile) -> Result<UploadOutcome> {
        let object_key = key::join(dir, &file.name);
        self.client
            .put_object(&object_key, file.data.clone(), &file.content_type)
            .await?;
        self.client.set_public_read(&object_key).await?;
        diagnostics::info!(
            "uploaded {key} ({size} bytes)",
            key: object_key.as_str(),
            size: file.data.len()
        );

        let mut outcome = UploadOutcome {
            key: object_key,
            preview: None,
            warning: None,
        };
        let Some(previewer) = self
            .previewer
            .as_ref()
            .filter(|p| p.applies_to(&outcome.key))
        else {
            return Ok(outcome);
        };

        let generated = previewer
            .generate(self.client.as_ref(), &outcome.key, file.data)
            .await;
        match generated {
            Ok(preview_key) => outcome.preview = Some(preview_key),
            Err(err) => {
                let message = err.to_string();
                diagnostics::warn!(
                    "preview for {key} not generated: {message}",
                    key: outcome.key.as_str(),
                    message: message.as_str()
                );
                outcome.warning = Some(err);
            }
        }
        Ok(outcome)
    }

    /// Uploads each file independently and concurrently, one result per file
    pub async fn upload_many(&self, dir: &str, files: Vec<UploadFile>) -> Vec<Result<UploadOutcome>> {
        join_all(files.into_iter().map(|file| self.upload(dir, file))).await
    }

    pub async fn delete(&self, object_key: &str) -> Result<()> {
        self.client.delete_object(object_key).await?;
        diagnostics::info!("deleted {key}", key: object_key);
        Ok(())
    }

    pub async fn download(&self, object_key: &str) -> Result<Bytes> {
        self.client.get_object(object_key).await
    }

    /// Parent of `object_key`, for breadcrumb navigation
    pub fn parent_key(object_key: &str) -> &str {
        key::parent_key(object_key)
    }
}
