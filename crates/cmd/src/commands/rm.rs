// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use anyhow::{Context, Result};
use bucketfs::FileManager;

pub async fn rm_command(fm: &FileManager, key: &str) -> Result<()> {
    fm.delete(key)
        .await
        .with_context(|| format!("Failed to delete {key}"))
}
