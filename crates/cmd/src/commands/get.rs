// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use bucketfs::FileManager;
use diagnostics::log_info;

/// Writes the object at `key` to `output`, or to `out` when no path is given
pub async fn get_command(
    fm: &FileManager,
    key: &str,
    output: Option<&Path>,
    out: &mut dyn Write,
) -> Result<()> {
    let data = fm
        .download(key)
        .await
        .with_context(|| format!("Failed to download {key}"))?;

    match output {
        Some(path) => {
            tokio::fs::write(path, &data)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            let target = path.display().to_string();
            log_info!(
                "Downloaded {key} to {target} ({size} bytes)",
                key: key,
                target: target.as_str(),
                size: data.len()
            );
        }
        None => out.write_all(&data)?,
    }
    Ok(())
}
