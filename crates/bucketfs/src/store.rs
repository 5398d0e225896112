// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use crate::error::Result;
use async_trait::async_trait;
use bytes::Bytes;

/// One listed object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectEntry {
    pub key: String,
    pub size: u64,
}

/// One page of a prefix listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListPage {
    pub objects: Vec<ObjectEntry>,
    /// Cursor for the next page, when there is one
    pub next_continuation: Option<String>,
    pub is_truncated: bool,
}

impl ListPage {
    /// True when another page should be requested
    pub fn has_more(&self) -> bool {
        self.is_truncated && self.next_continuation.is_some()
    }
}

/// The object-store operations the tree and move logic depend on.
///
/// A client is bound to one bucket. Implementations surface failures as
/// they receive them and never retry.
#[async_trait]
pub trait BucketClient: Send + Sync {
    /// Lists objects under `prefix`, resuming at `continuation` when given
    async fn list_objects(&self, prefix: &str, continuation: Option<&str>) -> Result<ListPage>;

    /// Reads a whole object; `Error::NotFound` when it is absent
    async fn get_object(&self, key: &str) -> Result<Bytes>;

    async fn put_object(&self, key: &str, body: Bytes, content_type: &str) -> Result<()>;

    async fn delete_object(&self, key: &str) -> Result<()>;

    /// Server-side copy within the bucket
    async fn copy_object(&self, source_key: &str, dest_key: &str) -> Result<()>;

    /// Grants anonymous read access to `key`
    async fn set_public_read(&self, key: &str) -> Result<()>;
}
