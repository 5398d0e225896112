// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use crate::builder::TreeBuilder;
use crate::error::{Error, Operation, Result};
use crate::key;
use crate::layout::Layout;
use crate::node::TreeNode;
use crate::search::search;
use crate::store::BucketClient;
use std::sync::Arc;

/// Drives a paginated listing into a [`TreeBuilder`].
///
/// Pages are fetched one after another, each with the cursor returned by the
/// previous one. Every call builds its own tree; a failure on any page fails
/// the whole listing.
#[derive(Clone)]
pub struct Lister {
    client: Arc<dyn BucketClient>,
    layout: Layout,
}

impl Lister {
    pub fn new(client: Arc<dyn BucketClient>, layout: Layout) -> Self {
        Self { client, layout }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Lists everything under `prefix` and returns the synthesized root.
    /// Keys never start with the separator, so `/docs/` lists `docs/`.
    pub async fn list_all(&self, prefix: &str) -> Result<TreeNode> {
        let prefix = key::normalize_prefix(prefix);
        let mut builder = TreeBuilder::new(self.layout.clone(), prefix);
        let mut continuation: Option<String> = None;
        let mut pages: usize = 0;
        let mut objects: usize = 0;

        loop {
            let page = self
                .client
                .list_objects(prefix, continuation.as_deref())
                .await?;
            pages += 1;
            objects += page.objects.len();

            diagnostics::debug!(
                "listing {prefix} page {pages}: {count} objects, truncated {truncated}",
                prefix: prefix,
                pages: pages,
                count: page.objects.len(),
                truncated: page.is_truncated
            );

            for object in &page.objects {
                builder.insert(&object.key, object.size)?;
            }

            if !page.has_more() {
                break;
            }
            if page.next_continuation == continuation {
                return Err(Error::store(
                    Operation::List,
                    prefix,
                    "continuation token did not advance",
                ));
            }
            continuation = page.next_continuation;
        }

        diagnostics::info!(
            "listed {objects} objects under {prefix} in {pages} pages",
            objects: objects,
            prefix: prefix,
            pages: pages
        );
        Ok(builder.finish())
    }

    /// Lists `prefix` and returns the nodes whose name contains `query`
    pub async fn search(&self, prefix: &str, query: &str) -> Result<Vec<TreeNode>> {
        let root = self.list_all(prefix).await?;
        Ok(search(&root, query))
    }
}
