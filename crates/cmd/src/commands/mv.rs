// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use std::io::Write;

use anyhow::{Context, Result};
use bucketfs::{FileManager, MoveOutcome};

/// Moves `from` to `to`. A lost preview is reported but is not a failure.
pub async fn mv_command(fm: &FileManager, from: &str, to: &str, out: &mut dyn Write) -> Result<()> {
    let outcome = fm
        .move_object(from, to)
        .await
        .with_context(|| format!("Failed to move {from} to {to}"))?;

    match outcome {
        MoveOutcome::Moved { preview: Some(preview) } => {
            writeln!(out, "{from} -> {to} (preview {preview})")?;
        }
        MoveOutcome::Moved { preview: None } => writeln!(out, "{from} -> {to}")?,
        MoveOutcome::ThumbnailFailed(err) => {
            writeln!(out, "{from} -> {to}")?;
            writeln!(out, "warning: preview not regenerated: {err}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::testing::{manager, output};
    use bucketfs::{MemoryBucket, MoveError, Operation};

    #[tokio::test]
    async fn test_mv() {
        let bucket = MemoryBucket::new();
        bucket.insert("a/old.txt", "x").await;
        let fm = manager(&bucket);

        let mut out = Vec::new();
        mv_command(&fm, "a/old.txt", "a/new.txt", &mut out).await.unwrap();
        assert_eq!(output(out), "a/old.txt -> a/new.txt\n");
        assert_eq!(bucket.keys().await, vec!["a/new.txt"]);
    }

    #[tokio::test]
    async fn test_mv_delete_failure_keeps_stage() {
        let bucket = MemoryBucket::new();
        bucket.insert("a/old.txt", "x").await;
        bucket.fail(Operation::Delete, "a/old.txt").await;
        let fm = manager(&bucket);

        let mut out = Vec::new();
        let err = mv_command(&fm, "a/old.txt", "a/new.txt", &mut out)
            .await
            .unwrap_err();
        let cause = err.downcast_ref::<MoveError>().unwrap();
        assert!(matches!(cause, MoveError::DeleteFailed { .. }));
        assert!(out.is_empty());
    }
}
