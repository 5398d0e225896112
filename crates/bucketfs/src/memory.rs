// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use crate::error::{Error, Operation, Result};
use crate::store::{BucketClient, ListPage, ObjectEntry};
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use tokio::sync::Mutex;

const TOKEN_PREFIX: &str = "mem:";

/// An object held by [`MemoryBucket`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub data: Bytes,
    pub content_type: String,
    pub public: bool,
}

/// In-memory bucket for tests and local experiments.
///
/// Keys are listed in lexicographic order, `page_size` at a time. Faults
/// can be injected per (operation, key) to exercise failure paths.
#[derive(Clone)]
pub struct MemoryBucket {
    objects: Arc<Mutex<BTreeMap<String, StoredObject>>>,
    faults: Arc<Mutex<HashSet<(Operation, String)>>>,
    list_calls: Arc<Mutex<Vec<Option<String>>>>,
    page_size: usize,
}

impl MemoryBucket {
    pub fn new() -> Self {
        Self::with_page_size(1000)
    }

    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            objects: Arc::new(Mutex::new(BTreeMap::new())),
            faults: Arc::new(Mutex::new(HashSet::new())),
            list_calls: Arc::new(Mutex::new(Vec::new())),
            page_size: page_size.max(1),
        }
    }

    /// Stores an object directly, bypassing fault injection
    pub async fn insert(&self, key: &str, data: impl Into<Bytes>) {
        let mut objects = self.objects.lock().await;
        _ = objects.insert(
            key.to_string(),
            StoredObject {
                data: data.into(),
                content_type: "application/octet-stream".to_string(),
                public: false,
            },
        );
    }

    /// Makes every later `operation` on `key` fail
    pub async fn fail(&self, operation: Operation, key: &str) {
        _ = self.faults.lock().await.insert((operation, key.to_string()));
    }

    pub async fn heal(&self, operation: Operation, key: &str) {
        _ = self.faults.lock().await.remove(&(operation, key.to_string()));
    }

    pub async fn object(&self, key: &str) -> Option<StoredObject> {
        self.objects.lock().await.get(key).cloned()
    }

    pub async fn contains(&self, key: &str) -> bool {
        self.objects.lock().await.contains_key(key)
    }

    pub async fn keys(&self) -> Vec<String> {
        self.objects.lock().await.keys().cloned().collect()
    }

    /// Continuation tokens received by `list_objects`, in call order
    pub async fn list_calls(&self) -> Vec<Option<String>> {
        self.list_calls.lock().await.clone()
    }

    async fn check(&self, operation: Operation, key: &str) -> Result<()> {
        if self
            .faults
            .lock()
            .await
            .contains(&(operation, key.to_string()))
        {
            return Err(Error::store(operation, key, "injected fault"));
        }
        Ok(())
    }
}

impl Default for MemoryBucket {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BucketClient for MemoryBucket {
    async fn list_objects(&self, prefix: &str, continuation: Option<&str>) -> Result<ListPage> {
        self.list_calls
            .lock()
            .await
            .push(continuation.map(str::to_string));
        self.check(Operation::List, prefix).await?;

        let start = match continuation {
            Some(token) => token
                .strip_prefix(TOKEN_PREFIX)
                .ok_or_else(|| {
                    Error::store(Operation::List, prefix, format!("invalid continuation token {token}"))
                })?
                .to_string(),
            None => prefix.to_string(),
        };

        let objects = self.objects.lock().await;
        let mut matching = objects
            .range(start..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, object)| ObjectEntry {
                key: key.clone(),
                size: object.data.len() as u64,
            });

        let page: Vec<ObjectEntry> = matching.by_ref().take(self.page_size).collect();
        let next = matching.next();

        Ok(ListPage {
            objects: page,
            is_truncated: next.is_some(),
            next_continuation: next.map(|entry| format!("{TOKEN_PREFIX}{}", entry.key)),
        })
    }

    async fn get_object(&self, key: &str) -> Result<Bytes> {
        self.check(Operation::Get, key).await?;
        self.objects
            .lock()
            .await
            .get(key)
            .map(|object| object.data.clone())
            .ok_or_else(|| Error::not_found(key))
    }

    async fn put_object(&self, key: &str, body: Bytes, content_type: &str) -> Result<()> {
        self.check(Operation::Put, key).await?;
        _ = self.objects.lock().await.insert(
            key.to_string(),
            StoredObject {
                data: body,
                content_type: content_type.to_string(),
                public: false,
            },
        );
        Ok(())
    }

    async fn delete_object(&self, key: &str) -> Result<()> {
        self.check(Operation::Delete, key).await?;
        _ = self.objects.lock().await.remove(key);
        Ok(())
    }

    async fn copy_object(&self, source_key: &str, dest_key: &str) -> Result<()> {
        self.check(Operation::Copy, source_key).await?;
        self.check(Operation::Copy, dest_key).await?;
        let mut objects = self.objects.lock().await;
        let source = objects
            .get(source_key)
            .cloned()
            .ok_or_else(|| Error::not_found(source_key))?;
        // ACLs are not carried over by a copy
        _ = objects.insert(
            dest_key.to_string(),
            StoredObject {
                public: false,
                ..source
            },
        );
        Ok(())
    }

    async fn set_public_read(&self, key: &str) -> Result<()> {
        self.check(Operation::SetAcl, key).await?;
        let mut objects = self.objects.lock().await;
        let object = objects.get_mut(key).ok_or_else(|| Error::not_found(key))?;
        object.public = true;
        Ok(())
    }
}
