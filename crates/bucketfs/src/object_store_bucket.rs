// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! [`BucketClient`] over the `object_store` crate (local files, memory).
//!
//! `object_store` paths cannot end in a separator, so a directory marker
//! `docs/` is stored as the empty object `docs/.bucketfs-directory` and
//! listed back under its marker key.

use crate::config::StoreConfig;
use crate::error::{Error, Operation, Result};
use crate::key;
use crate::store::{BucketClient, ListPage, ObjectEntry};
use async_trait::async_trait;
use bytes::Bytes;
use futures::TryStreamExt;
use object_store::local::LocalFileSystem;
use object_store::memory::InMemory;
use object_store::path::Path;
use object_store::{Attribute, AttributeValue, Attributes, ObjectStore, PutOptions, PutPayload};
use std::sync::Arc;
use url::Url;

/// File name that stands in for a directory marker
pub const MARKER_OBJECT: &str = ".bucketfs-directory";

/// Which store sits behind the adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Local,
    Memory,
}

impl Backend {
    /// The in-memory store lists in path order; local directories do not
    fn sorted_listing(self) -> bool {
        matches!(self, Backend::Memory)
    }

    /// Local files cannot carry a content type
    fn stores_attributes(self) -> bool {
        matches!(self, Backend::Memory)
    }
}

pub struct ObjectStoreBucket {
    store: Arc<dyn ObjectStore>,
    backend: Backend,
    page_size: usize,
}

impl ObjectStoreBucket {
    pub fn new(store: Arc<dyn ObjectStore>, backend: Backend, page_size: usize) -> Self {
        Self {
            store,
            backend,
            page_size: page_size.max(1),
        }
    }

    /// Builds the store named by a `file://` or `memory://` url
    pub fn from_config(config: &StoreConfig) -> Result<Self> {
        let url = Url::parse(&config.url)
            .map_err(|e| Error::config(format!("invalid url {}: {e}", config.url)))?;

        let (store, backend): (Arc<dyn ObjectStore>, Backend) = match url.scheme() {
            "file" => {
                let path = url
                    .to_file_path()
                    .map_err(|()| Error::config(format!("invalid file url {}", config.url)))?;
                let store = LocalFileSystem::new_with_prefix(&path).map_err(|e| {
                    Error::config(format!("cannot open {}: {e}", path.display()))
                })?;
                (Arc::new(store), Backend::Local)
            }
            "memory" => (Arc::new(InMemory::new()), Backend::Memory),
            other => {
                return Err(Error::config(format!("unsupported url scheme {other:?}")));
            }
        };

        let kind = format!("{backend:?}");
        diagnostics::debug!(
            "opened {kind} bucket at {url}",
            kind: kind.as_str(),
            url: config.url.as_str()
        );
        Ok(Self::new(store, backend, config.page_size))
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Pages are cut in stored-path order and the continuation token is the
    /// last stored path, so marker keys may arrive slightly out of key order.
    async fn list_page(&self, prefix: &str, continuation: Option<&str>) -> Result<ListPage> {
        let list_err = |e: object_store::Error| Error::store(Operation::List, prefix, e);

        // object_store prefixes match whole segments, so list the enclosing
        // directory and filter on the raw prefix.
        let directory = match prefix.rfind(key::SEPARATOR) {
            Some(pos) => Some(
                Path::parse(&prefix[..pos]).map_err(|_| Error::invalid_key(prefix, ""))?,
            ),
            None => None,
        };
        let offset = continuation
            .map(Path::parse)
            .transpose()
            .map_err(|_| Error::invalid_key(continuation.unwrap_or_default(), prefix))?;

        let mut stream = match &offset {
            Some(offset) => self.store.list_with_offset(directory.as_ref(), offset),
            None => self.store.list(directory.as_ref()),
        };

        // Local directories list unsorted, so every page reads the whole
        // directory and a full listing is quadratic in its page count.
        let sorted = self.backend.sorted_listing();
        let mut entries: Vec<(String, ObjectEntry)> = Vec::new();
        while let Some(meta) = stream.try_next().await.map_err(list_err)? {
            let location = String::from(meta.location);
            if continuation.is_some_and(|token| location.as_str() <= token) {
                continue;
            }
            let object_key = marker_key(&location);
            if !object_key.starts_with(prefix) {
                continue;
            }
            entries.push((
                location,
                ObjectEntry {
                    key: object_key,
                    size: meta.size,
                },
            ));
            if sorted && entries.len() > self.page_size {
                break;
            }
        }

        if !sorted {
            entries.sort_by(|a, b| a.0.cmp(&b.0));
        }
        let is_truncated = entries.len() > self.page_size;
        entries.truncate(self.page_size);
        let next_continuation = if is_truncated {
            entries.last().map(|(location, _)| location.clone())
        } else {
            None
        };

        Ok(ListPage {
            objects: entries.into_iter().map(|(_, entry)| entry).collect(),
            next_continuation,
            is_truncated,
        })
    }
}

/// Object path for a key, with markers mapped onto their stand-in object
fn object_path(object_key: &str) -> Result<Path> {
    let invalid = || Error::invalid_key(object_key, "");
    if object_key.is_empty() {
        return Err(invalid());
    }
    if key::is_directory_marker(object_key) {
        Path::parse(format!("{object_key}{MARKER_OBJECT}")).map_err(|_| invalid())
    } else {
        Path::parse(object_key).map_err(|_| invalid())
    }
}

/// Key for a listed path: the stand-in object reads back as its marker
fn marker_key(location: &str) -> String {
    match location.strip_suffix(MARKER_OBJECT) {
        Some(dir) if dir.is_empty() || key::is_directory_marker(dir) => key::directory_key(dir),
        _ => location.to_string(),
    }
}

fn store_error(operation: Operation, object_key: &str, err: object_store::Error) -> Error {
    match err {
        object_store::Error::NotFound { .. } => Error::not_found(object_key),
        other => Error::store(operation, object_key, other),
    }
}

#[async_trait]
impl BucketClient for ObjectStoreBucket {
    async fn list_objects(&self, prefix: &str, continuation: Option<&str>) -> Result<ListPage> {
        self.list_page(prefix, continuation).await
    }

    async fn get_object(&self, object_key: &str) -> Result<Bytes> {
        let path = object_path(object_key)?;
        let result = self
            .store
            .get(&path)
            .await
            .map_err(|e| store_error(Operation::Get, object_key, e))?;
        result
            .bytes()
            .await
            .map_err(|e| store_error(Operation::Get, object_key, e))
    }

    async fn put_object(&self, object_key: &str, body: Bytes, content_type: &str) -> Result<()> {
        let path = object_path(object_key)?;
        let mut options = PutOptions::default();
        if self.backend.stores_attributes() {
            let mut attributes = Attributes::new();
            _ = attributes.insert(
                Attribute::ContentType,
                AttributeValue::from(content_type.to_string()),
            );
            options.attributes = attributes;
        }
        _ = self
            .store
            .put_opts(&path, PutPayload::from(body), options)
            .await
            .map_err(|e| store_error(Operation::Put, object_key, e))?;
        Ok(())
    }

    async fn delete_object(&self, object_key: &str) -> Result<()> {
        let path = object_path(object_key)?;
        match self.store.delete(&path).await {
            Ok(()) | Err(object_store::Error::NotFound { .. }) => Ok(()),
            Err(e) => Err(Error::store(Operation::Delete, object_key, e)),
        }
    }

    async fn copy_object(&self, source_key: &str, dest_key: &str) -> Result<()> {
        let from = object_path(source_key)?;
        let to = object_path(dest_key)?;
        self.store
            .copy(&from, &to)
            .await
            .map_err(|e| store_error(Operation::Copy, source_key, e))
    }

    async fn set_public_read(&self, object_key: &str) -> Result<()> {
        // Local and in-memory objects have no ACL; confirm the object exists.
        let path = object_path(object_key)?;
        _ = self
            .store
            .head(&path)
            .await
            .map_err(|e| store_error(Operation::SetAcl, object_key, e))?;
        Ok(())
    }
}
