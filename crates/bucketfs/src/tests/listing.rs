// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use super::child_names;
use crate::error::{Error, Operation, Result};
use crate::layout::Layout;
use crate::listing::Lister;
use crate::memory::MemoryBucket;
use crate::object_store_bucket::{Backend, ObjectStoreBucket};
use crate::store::{BucketClient, ListPage, ObjectEntry};
use async_trait::async_trait;
use bytes::Bytes;
use object_store::memory::InMemory;
use std::sync::Arc;

fn lister(bucket: &MemoryBucket) -> Lister {
    Lister::new(Arc::new(bucket.clone()), Layout::raw())
}

#[tokio::test]
async fn test_two_pages_merge_into_one_tree() {
    let bucket = MemoryBucket::with_page_size(1);
    bucket.insert("project/readme.md", "# hi").await;
    bucket.insert("project/src/main.go", "package main").await;
    bucket.insert("other/ignored.txt", "x").await;

    let root = lister(&bucket).list_all("project/").await.unwrap();

    assert!(root.child("project").is_none());
    assert_eq!(child_names(&root, &[]), vec!["readme.md", "src"]);
    assert_eq!(child_names(&root, &["src"]), vec!["main.go"]);
    assert_eq!(root.path, "project/");

    let src = root.child("src").unwrap();
    assert!(src.is_directory);
    assert_eq!(src.bread_crumbs, "project/src");

    // Second request carries the cursor from the first
    let calls = bucket.list_calls().await;
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0], None);
    assert!(calls[1].is_some());
}

#[tokio::test]
async fn test_many_small_pages() {
    let bucket = MemoryBucket::with_page_size(3);
    for i in 0..20 {
        bucket.insert(&format!("logs/{i:02}.txt"), "line").await;
    }

    let root = lister(&bucket).list_all("logs/").await.unwrap();
    assert_eq!(root.children.len(), 20);
    assert_eq!(root.children[0].name, "00.txt");
    assert_eq!(root.children[19].name, "19.txt");
    assert_eq!(bucket.list_calls().await.len(), 7);
}

#[tokio::test]
async fn test_empty_listing() {
    let bucket = MemoryBucket::new();
    let root = lister(&bucket).list_all("nothing/").await.unwrap();
    assert!(root.is_root());
    assert!(root.children.is_empty());
}

#[tokio::test]
async fn test_listing_failure_returns_no_tree() {
    let bucket = MemoryBucket::new();
    bucket.insert("p/a", "x").await;
    bucket.fail(Operation::List, "p/").await;

    let err = lister(&bucket).list_all("p/").await.unwrap_err();
    assert!(matches!(
        err,
        Error::Store {
            operation: Operation::List,
            ..
        }
    ));
}

/// Hands back the same cursor forever
struct StuckBucket;

#[async_trait]
impl BucketClient for StuckBucket {
    async fn list_objects(&self, prefix: &str, _continuation: Option<&str>) -> Result<ListPage> {
        Ok(ListPage {
            objects: vec![ObjectEntry {
                key: format!("{prefix}same.txt"),
                size: 1,
            }],
            next_continuation: Some("again".to_string()),
            is_truncated: true,
        })
    }

    async fn get_object(&self, key: &str) -> Result<Bytes> {
        Err(Error::not_found(key))
    }

    async fn put_object(&self, key: &str, _body: Bytes, _content_type: &str) -> Result<()> {
        Err(Error::store(Operation::Put, key, "read only"))
    }

    async fn delete_object(&self, key: &str) -> Result<()> {
        Err(Error::store(Operation::Delete, key, "read only"))
    }

    async fn copy_object(&self, source_key: &str, _dest_key: &str) -> Result<()> {
        Err(Error::store(Operation::Copy, source_key, "read only"))
    }

    async fn set_public_read(&self, key: &str) -> Result<()> {
        Err(Error::store(Operation::SetAcl, key, "read only"))
    }
}

#[tokio::test]
async fn test_repeated_cursor_is_an_error() {
    let lister = Lister::new(Arc::new(StuckBucket), Layout::raw());
    let err = lister.list_all("p/").await.unwrap_err();
    assert!(matches!(
        err,
        Error::Store {
            operation: Operation::List,
            ..
        }
    ));
}

#[tokio::test]
async fn test_public_layout_through_object_store() {
    let bucket = ObjectStoreBucket::new(Arc::new(InMemory::new()), Backend::Memory, 2);
    for key in ["site/index.html", "site/css/main.css", "site/css/print.css"] {
        bucket
            .put_object(key, Bytes::from("body"), "text/plain")
            .await
            .unwrap();
    }

    let lister = Lister::new(Arc::new(bucket), Layout::public("https://cdn.example.com/"));
    let root = lister.list_all("site/").await.unwrap();

    assert_eq!(root.path, "https://cdn.example.com/site/");
    let css = root.child("css").unwrap();
    assert_eq!(css.path, "https://cdn.example.com/site/css/");
    assert_eq!(css.bread_crumbs, "site/css");
    assert_eq!(
        css.child("main.css").map(|n| n.path.as_str()),
        Some("https://cdn.example.com/site/css/main.css")
    );
    assert_eq!(root.child("index.html").and_then(|n| n.size), Some(4));
}

#[tokio::test]
async fn test_search_after_listing() {
    let bucket = MemoryBucket::with_page_size(2);
    bucket.insert("Reports/", "").await;
    bucket.insert("Reports/report_final.pdf", "x").await;
    bucket.insert("Reports/budget.xlsx", "x").await;
    bucket.insert("notes.txt", "x").await;

    let found = lister(&bucket).search("", "report").await.unwrap();
    let names: Vec<&str> = found.iter().map(|n| n.name.as_str()).collect();
    assert_eq!(names, vec!["Reports", "report_final.pdf"]);
    assert!(found.iter().all(|n| n.children.is_empty()));
    assert!(found[0].is_directory);
    assert_eq!(found[1].file_extension, ".pdf");
}

#[tokio::test]
async fn test_object_store_marker_stays_directory() {
    let bucket = ObjectStoreBucket::new(Arc::new(InMemory::new()), Backend::Memory, 1);
    for key in ["Reports/", "Reports/2024/", "notes.txt"] {
        bucket
            .put_object(key, Bytes::new(), "application/x-directory")
            .await
            .unwrap();
    }

    let lister = Lister::new(Arc::new(bucket), Layout::raw());
    let root = lister.list_all("/").await.unwrap();
    assert_eq!(root, lister.list_all("").await.unwrap());
    assert_eq!(child_names(&root, &[]), vec!["Reports", "notes.txt"]);

    let reports = root.child("Reports").unwrap();
    assert!(reports.is_directory);
    let year = reports.child("2024").unwrap();
    assert!(year.is_directory);
    assert!(year.children.is_empty());
    assert_eq!(year.bread_crumbs, "Reports/2024");
    assert!(!root.child("notes.txt").unwrap().is_directory);
}
