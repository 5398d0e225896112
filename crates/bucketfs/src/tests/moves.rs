// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use super::child_names;
use crate::config::{PreviewConfig, StoreConfig};
use crate::error::Operation;
use crate::manager::{FileManager, UploadFile};
use crate::memory::MemoryBucket;
use crate::mover::{MoveError, MoveOutcome, MoveStage};
use crate::preview::Previewer;
use crate::preview::testing::FakeRenderer;
use bytes::Bytes;
use std::sync::Arc;

fn file_manager(bucket: &MemoryBucket, renderer: Arc<FakeRenderer>) -> FileManager {
    let config = StoreConfig::new("memory://");
    let previewer = Previewer::new(PreviewConfig::default(), renderer);
    FileManager::new(&config, Arc::new(bucket.clone()), Some(previewer))
}

#[tokio::test]
async fn test_upload_then_rename_pdf() {
    let bucket = MemoryBucket::new();
    let renderer = Arc::new(FakeRenderer::default());
    let fm = file_manager(&bucket, renderer.clone());

    _ = fm
        .upload("a", UploadFile::new("old.pdf", "%PDF-1.4", "application/pdf"))
        .await
        .unwrap();
    let outcome = fm.move_object("a/old.pdf", "a/new.pdf").await.unwrap();

    assert!(matches!(
        &outcome,
        MoveOutcome::Moved { preview: Some(key) } if key == "thumbnails/a/new.pdf"
    ));
    assert_eq!(outcome.reached(), MoveStage::PreviewRegenerated);

    // Rendered once on upload and once after the move
    assert_eq!(renderer.calls.lock().await.len(), 2);

    let tree = fm.build_tree("a/").await.unwrap();
    assert_eq!(child_names(&tree, &[]), vec!["new.pdf"]);
    assert!(bucket.object("a/new.pdf").await.unwrap().public);

    // The old preview is left where it was
    assert!(bucket.contains("thumbnails/a/old.pdf").await);
    assert!(bucket.object("thumbnails/a/new.pdf").await.unwrap().public);
}

#[tokio::test]
async fn test_failed_delete_shows_both_keys() {
    let bucket = MemoryBucket::new();
    bucket.insert("a/old.pdf", "%PDF").await;
    bucket.fail(Operation::Delete, "a/old.pdf").await;
    let fm = file_manager(&bucket, Arc::new(FakeRenderer::default()));

    let err = fm.move_object("a/old.pdf", "a/new.pdf").await.unwrap_err();
    assert!(matches!(err, MoveError::DeleteFailed { .. }));
    assert_eq!(err.reached(), Some(MoveStage::PermissionSet));
    assert!(err.to_string().contains("a/old.pdf"));

    let tree = fm.build_tree("a/").await.unwrap();
    assert_eq!(child_names(&tree, &[]), vec!["new.pdf", "old.pdf"]);
    assert_eq!(
        fm.download("a/new.pdf").await.unwrap(),
        fm.download("a/old.pdf").await.unwrap()
    );
}

#[tokio::test]
async fn test_move_across_directories() {
    let bucket = MemoryBucket::new();
    bucket.insert("inbox/notes.txt", "n").await;
    let fm = file_manager(&bucket, Arc::new(FakeRenderer::default()));

    let outcome = fm
        .move_object("inbox/notes.txt", "archive/2024/notes.txt")
        .await
        .unwrap();
    assert_eq!(outcome.reached(), MoveStage::Deleted);

    let tree = fm.build_tree("").await.unwrap();
    assert_eq!(child_names(&tree, &["archive", "2024"]), vec!["notes.txt"]);
    assert!(tree.child("inbox").is_none());
}

#[tokio::test]
async fn test_retry_after_healed_delete() {
    let bucket = MemoryBucket::new();
    bucket.insert("a/x.txt", "data").await;
    bucket.fail(Operation::Delete, "a/x.txt").await;
    let fm = file_manager(&bucket, Arc::new(FakeRenderer::default()));

    assert!(fm.move_object("a/x.txt", "b/x.txt").await.is_err());
    bucket.heal(Operation::Delete, "a/x.txt").await;

    // Copying onto an existing destination overwrites it
    let outcome = fm.move_object("a/x.txt", "b/x.txt").await.unwrap();
    assert!(outcome.warning().is_none());
    assert_eq!(bucket.keys().await, vec!["b/x.txt"]);
    assert_eq!(fm.download("b/x.txt").await.unwrap(), Bytes::from("data"));
}
