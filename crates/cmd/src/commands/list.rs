// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use std::io::Write;

use anyhow::{Context, Result};
use bucketfs::FileManager;
use diagnostics::log_debug;

use crate::common::render_tree;

pub async fn list_command(
    fm: &FileManager,
    prefix: &str,
    json: bool,
    out: &mut dyn Write,
) -> Result<()> {
    log_debug!("Listing bucket under {prefix}", prefix: prefix);
    let root = fm
        .build_tree(prefix)
        .await
        .with_context(|| format!("Failed to list {prefix:?}"))?;
    out.write_all(render_tree(&root, json)?.as_bytes())?;
    Ok(())
}

pub async fn search_command(
    fm: &FileManager,
    prefix: &str,
    query: &str,
    json: bool,
    out: &mut dyn Write,
) -> Result<()> {
    log_debug!("Searching {prefix} for {query}", prefix: prefix, query: query);
    let results = fm
        .search_root(prefix, query)
        .await
        .with_context(|| format!("Failed to search {prefix:?}"))?;
    out.write_all(render_tree(&results, json)?.as_bytes())?;
    Ok(())
}
