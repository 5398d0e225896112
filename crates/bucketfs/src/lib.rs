// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! A directory tree view over a flat object-store bucket.
//!
//! Keys like `docs/sub/b.txt` are folded into a tree of [`TreeNode`]s with
//! breadcrumbs and extensions, searched by name, and moved with the
//! copy, re-publish, delete sequence the store allows.

mod builder;
mod config;
mod error;
mod factory;
pub mod key;
mod layout;
mod listing;
mod manager;
mod memory;
mod mover;
mod node;
mod object_store_bucket;
mod preview;
mod s3_bucket;
mod search;
mod store;
pub mod tree_format;

#[cfg(test)]
mod tests;

pub use builder::{TreeBuilder, build_tree};
pub use config::{DEFAULT_PAGE_SIZE, PreviewConfig, StoreConfig};
pub use error::{Error, Operation, Result};
pub use factory::open_bucket;
pub use layout::Layout;
pub use listing::Lister;
pub use manager::{FileManager, UploadFile, UploadOutcome};
pub use memory::{MemoryBucket, StoredObject};
pub use mover::{MoveError, MoveOutcome, MoveStage, Mover};
pub use node::{TreeNode, Walk};
pub use object_store_bucket::{Backend, MARKER_OBJECT, ObjectStoreBucket};
pub use preview::{CommandRenderer, PreviewRenderer, Previewer};
pub use s3_bucket::S3Bucket;
pub use search::search;
pub use store::{BucketClient, ListPage, ObjectEntry};
