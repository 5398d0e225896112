// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use bucketfs::{FileManager, UploadFile};
use diagnostics::log_error;

use crate::common::guess_content_type;

/// Uploads local files into `dir`, all at once.
/// Every file is attempted; the command fails if any upload did.
pub async fn put_command(
    fm: &FileManager,
    files: &[PathBuf],
    dir: &str,
    content_type: Option<&str>,
    out: &mut dyn Write,
) -> Result<()> {
    let mut uploads = Vec::with_capacity(files.len());
    for path in files {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| anyhow!("Invalid file name: {}", path.display()))?;
        let data = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let content_type = content_type.unwrap_or_else(|| guess_content_type(name));
        uploads.push(UploadFile::new(name, data, content_type));
    }

    let mut failed = 0;
    for result in fm.upload_many(dir, uploads).await {
        match result {
            Ok(outcome) => {
                writeln!(out, "{}", outcome.key)?;
                if let Some(preview) = &outcome.preview {
                    writeln!(out, "  preview {preview}")?;
                }
                if let Some(err) = &outcome.warning {
                    writeln!(out, "  warning: preview not generated: {err}")?;
                }
            }
            Err(err) => {
                let message = err.to_string();
                log_error!("Upload failed: {message}", message: message.as_str());
                writeln!(out, "error: {err}")?;
                failed += 1;
            }
        }
    }

    if failed > 0 {
        return Err(anyhow!("{failed} of {} uploads failed", files.len()));
    }
    Ok(())
}
