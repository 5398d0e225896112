// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Store configuration, passed explicitly to the orchestrators.

use crate::error::{Error, Result};
use crate::layout::Layout;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_PAGE_SIZE: usize = 1000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Bucket location: `s3://bucket`, `file:///path` or `memory://`
    pub url: String,

    /// AWS region (S3 only)
    #[serde(default)]
    pub region: String,

    #[serde(default)]
    pub access_key: String,

    #[serde(default)]
    pub secret_key: String,

    /// Custom S3 endpoint (MinIO, R2, ...)
    #[serde(default)]
    pub endpoint: String,

    /// When set, node paths are public URLs under this base instead of raw keys
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_base_url: Option<String>,

    /// Keys requested per listing page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    #[serde(default)]
    pub preview: PreviewConfig,
}

/// Where and how document previews are generated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewConfig {
    /// Preview key is `{folder}/{document key}`
    #[serde(default = "default_preview_folder")]
    pub folder: String,

    /// Extensions (with the dot) that get a preview
    #[serde(default = "default_preview_extensions")]
    pub extensions: Vec<String>,

    #[serde(default = "default_preview_content_type")]
    pub content_type: String,

    /// Renderer program and arguments; reads the document on stdin, writes the image to stdout
    #[serde(default = "default_preview_command")]
    pub command: Vec<String>,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_preview_folder() -> String {
    "thumbnails".to_string()
}

fn default_preview_extensions() -> Vec<String> {
    vec![".pdf".to_string()]
}

fn default_preview_content_type() -> String {
    "image/png".to_string()
}

fn default_preview_command() -> Vec<String> {
    ["pdftoppm", "-png", "-r", "96", "-f", "1", "-l", "1", "-singlefile", "-"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            folder: default_preview_folder(),
            extensions: default_preview_extensions(),
            content_type: default_preview_content_type(),
            command: default_preview_command(),
        }
    }
}

impl StoreConfig {
    /// Config for a bucket at `url` with every other setting defaulted
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            region: String::new(),
            access_key: String::new(),
            secret_key: String::new(),
            endpoint: String::new(),
            public_base_url: None,
            page_size: DEFAULT_PAGE_SIZE,
            preview: PreviewConfig::default(),
        }
    }

    /// Loads and validates a YAML config file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_yaml(&content).map_err(|e| {
            Error::config(format!("{}: {}", path.as_ref().display(), e))
        })
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: StoreConfig = serde_yaml_ng::from_str(content)
            .map_err(|e| Error::config(format!("invalid YAML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.is_empty() {
            return Err(Error::config("url is required"));
        }
        if self.page_size == 0 {
            return Err(Error::config("page_size must be greater than 0"));
        }
        if self.preview.folder.trim_matches('/').is_empty() {
            return Err(Error::config("preview.folder cannot be empty"));
        }
        if let Some(ext) = self.preview.extensions.iter().find(|e| !e.starts_with('.')) {
            return Err(Error::config(format!(
                "preview extension {ext:?} must start with '.'"
            )));
        }
        Ok(())
    }

    pub fn layout(&self) -> Layout {
        Layout::from_base_url(self.public_base_url.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_minimal_yaml_uses_defaults() {
        let config = StoreConfig::from_yaml("url: memory://\n").unwrap();
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.preview.folder, "thumbnails");
        assert_eq!(config.preview.extensions, vec![".pdf"]);
        assert_eq!(config.layout(), Layout::raw());
    }

    #[test]
    fn test_full_yaml() {
        let yaml = r#"
url: s3://files
region: sa-east-1
endpoint: http://localhost:9000
public_base_url: https://files.s3.sa-east-1.amazonaws.com
page_size: 50
preview:
  folder: previews
  extensions: [".pdf", ".PDF"]
  content_type: image/jpeg
  command: ["render-first-page"]
"#;
        let config = StoreConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.region, "sa-east-1");
        assert_eq!(config.page_size, 50);
        assert_eq!(config.preview.command, vec!["render-first-page"]);
        assert_eq!(
            config.layout(),
            Layout::public("https://files.s3.sa-east-1.amazonaws.com")
        );
    }

    #[test]
    fn test_validation() {
        assert!(StoreConfig::from_yaml("url: ''").is_err());
        assert!(StoreConfig::from_yaml("url: memory://\npage_size: 0").is_err());
        assert!(
            StoreConfig::from_yaml("url: memory://\npreview:\n  extensions: [pdf]").is_err()
        );
        assert!(StoreConfig::from_yaml("url: memory://\npreview:\n  folder: /").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "url: file:///tmp/bucket").unwrap();
        let config = StoreConfig::load(file.path()).unwrap();
        assert_eq!(config.url, "file:///tmp/bucket");

        let err = StoreConfig::load("/nonexistent/bucketfs.yaml").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
