// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use std::io::Write;

use anyhow::{Context, Result};
use bucketfs::FileManager;

pub async fn mkdir_command(fm: &FileManager, path: &str, out: &mut dyn Write) -> Result<()> {
    let marker = fm
        .create_directory(path)
        .await
        .with_context(|| format!("Failed to create directory {path}"))?;
    writeln!(out, "{marker}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::testing::{manager, output};
    use bucketfs::MemoryBucket;

    #[tokio::test]
    async fn test_mkdir_writes_marker() {
        let bucket = MemoryBucket::new();
        let fm = manager(&bucket);
        let mut out = Vec::new();
        mkdir_command(&fm, "projects/2025", &mut out).await.unwrap();
        assert_eq!(output(out), "projects/2025/\n");
        assert!(bucket.contains("projects/2025/").await);
    }
}
