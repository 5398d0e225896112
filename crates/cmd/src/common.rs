// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use bucketfs::{FileManager, StoreConfig, TreeNode, tree_format};

/// Loads the store configuration named by `--config` or `BUCKETFS_CONFIG`
pub fn load_config(path: Option<&Path>) -> Result<StoreConfig> {
    let path = path.ok_or_else(|| {
        anyhow!("No store configuration: pass --config or set BUCKETFS_CONFIG")
    })?;
    StoreConfig::load(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))
}

pub fn open_manager(config: &StoreConfig) -> Result<FileManager> {
    FileManager::from_config(config)
        .with_context(|| format!("Failed to open bucket at {}", config.url))
}

/// Tree drawing, or pretty JSON when `json` is set
pub fn render_tree(node: &TreeNode, json: bool) -> Result<String> {
    if json {
        let mut text = serde_json::to_string_pretty(node)?;
        text.push('\n');
        Ok(text)
    } else {
        Ok(tree_format::format_tree(node))
    }
}

/// Content type for an uploaded file, from its extension
pub fn guess_content_type(name: &str) -> &'static str {
    let ext = bucketfs::key::file_extension(name).to_ascii_lowercase();
    match ext.as_str() {
        ".pdf" => "application/pdf",
        ".png" => "image/png",
        ".jpg" | ".jpeg" => "image/jpeg",
        ".gif" => "image/gif",
        ".svg" => "image/svg+xml",
        ".txt" | ".md" => "text/plain",
        ".html" | ".htm" => "text/html",
        ".css" => "text/css",
        ".csv" => "text/csv",
        ".json" => "application/json",
        ".zip" => "application/zip",
        _ => "application/octet-stream",
    }
}
