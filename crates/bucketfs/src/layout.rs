// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Node locations and breadcrumbs.
//!
//! A node's `path` is either the raw object key or a public URL for it. The
//! part in front of the key is the store root; breadcrumbs are the path with
//! the store root removed and no trailing separator.

use crate::key::SEPARATOR;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layout {
    store_root: String,
}

impl Layout {
    /// Paths are raw keys
    pub fn raw() -> Self {
        Self::default()
    }

    /// Paths are `{base_url}/{key}`
    pub fn public(base_url: &str) -> Self {
        Self {
            store_root: format!("{}{SEPARATOR}", base_url.trim_end_matches(SEPARATOR)),
        }
    }

    pub fn from_base_url(base_url: Option<&str>) -> Self {
        match base_url {
            Some(base) if !base.is_empty() => Self::public(base),
            _ => Self::raw(),
        }
    }

    pub fn store_root(&self) -> &str {
        &self.store_root
    }

    /// Location of an object key
    pub fn location(&self, key: &str) -> String {
        format!("{}{}", self.store_root, key)
    }

    /// Location of the directory whose key (without marker) is `dir_key`
    pub fn directory_location(&self, dir_key: &str) -> String {
        format!("{}{}{SEPARATOR}", self.store_root, dir_key)
    }

    /// Breadcrumb trail for a directory at `path`
    pub fn bread_crumbs(&self, path: &str) -> String {
        path.strip_prefix(self.store_root.as_str())
            .unwrap_or(path)
            .trim_end_matches(SEPARATOR)
            .to_string()
    }
}
