// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Rename by copy, re-publish, delete.
//!
//! The store has no atomic rename. A move is a sequence of calls and can stop
//! part way; the result says how far it got. Nothing is rolled back: a failed
//! delete leaves the object under both keys.

use crate::error::Error;
use crate::preview::Previewer;
use crate::store::BucketClient;
use std::sync::Arc;

/// Stages of a move, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MoveStage {
    Copied,
    PermissionSet,
    Deleted,
    PreviewRegenerated,
}

/// A move whose copy, permission and delete stages all succeeded
#[derive(Debug)]
pub enum MoveOutcome {
    /// `preview` is the regenerated preview key, if the format has one
    Moved { preview: Option<String> },
    /// The object moved but its preview could not be regenerated
    ThumbnailFailed(Error),
}

impl MoveOutcome {
    pub fn reached(&self) -> MoveStage {
        match self {
            MoveOutcome::Moved { preview: Some(_) } => MoveStage::PreviewRegenerated,
            MoveOutcome::Moved { preview: None } | MoveOutcome::ThumbnailFailed(_) => {
                MoveStage::Deleted
            }
        }
    }

    /// Preview failure, if any
    pub fn warning(&self) -> Option<&Error> {
        match self {
            MoveOutcome::ThumbnailFailed(err) => Some(err),
            MoveOutcome::Moved { .. } => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MoveError {
    #[error("Cannot move {0} onto itself")]
    SameKey(String),

    #[error("Copy {from} to {to} failed: {source}")]
    CopyFailed {
        from: String,
        to: String,
        source: Error,
    },

    #[error("Set public-read on {to} failed after copy from {from}: {source}")]
    PermissionFailed {
        from: String,
        to: String,
        source: Error,
    },

    #[error("Delete {from} failed after copy to {to}, object exists under both keys: {source}")]
    DeleteFailed {
        from: String,
        to: String,
        source: Error,
    },
}

impl MoveError {
    /// Last stage that completed before the failure
    pub fn reached(&self) -> Option<MoveStage> {
        match self {
            MoveError::SameKey(_) | MoveError::CopyFailed { .. } => None,
            MoveError::PermissionFailed { .. } => Some(MoveStage::Copied),
            MoveError::DeleteFailed { .. } => Some(MoveStage::PermissionSet),
        }
    }

    /// The store failure behind this error
    pub fn store_error(&self) -> Option<&Error> {
        match self {
            MoveError::SameKey(_) => None,
            MoveError::CopyFailed { source, .. }
            | MoveError::PermissionFailed { source, .. }
            | MoveError::DeleteFailed { source, .. } => Some(source),
        }
    }
}

#[derive(Clone)]
pub struct Mover {
    client: Arc<dyn BucketClient>,
    previewer: Option<Previewer>,
}

impl Mover {
    pub fn new(client: Arc<dyn BucketClient>, previewer: Option<Previewer>) -> Self {
        Self { client, previewer }
    }

    /// Moves the object at `current_key` to `new_key`
    pub async fn move_object(
        &self,
        current_key: &str,
        new_key: &str,
    ) -> Result<MoveOutcome, MoveError> {
        if current_key == new_key {
            return Err(MoveError::SameKey(current_key.to_string()));
        }
        let from = || current_key.to_string();
        let to = || new_key.to_string();

        self.client
            .copy_object(current_key, new_key)
            .await
            .map_err(|source| {
                diagnostics::error!(
                    "copy {from} to {to} failed",
                    from: current_key,
                    to: new_key
                );
                MoveError::CopyFailed {
                    from: from(),
                    to: to(),
                    source,
                }
            })?;
        diagnostics::debug!("copied {from} to {to}", from: current_key, to: new_key);

        self.client
            .set_public_read(new_key)
            .await
            .map_err(|source| MoveError::PermissionFailed {
                from: from(),
                to: to(),
                source,
            })?;

        self.client
            .delete_object(current_key)
            .await
            .map_err(|source| {
                diagnostics::error!(
                    "delete {from} failed, object now stored under both keys, copy at {to}",
                    from: current_key,
                    to: new_key
                );
                MoveError::DeleteFailed {
                    from: from(),
                    to: to(),
                    source,
                }
            })?;
        diagnostics::info!("moved {from} to {to}", from: current_key, to: new_key);

        let previewer = match &self.previewer {
            Some(p) if p.applies_to(current_key) && p.applies_to(new_key) => p,
            _ => return Ok(MoveOutcome::Moved { preview: None }),
        };

        match previewer.regenerate(self.client.as_ref(), new_key).await {
            Ok(preview_key) => Ok(MoveOutcome::Moved {
                preview: Some(preview_key),
            }),
            Err(err) => {
                let message = err.to_string();
                diagnostics::warn!(
                    "preview for {to} not regenerated: {message}",
                    to: new_key,
                    message: message.as_str()
                );
                Ok(MoveOutcome::ThumbnailFailed(err))
            }
        }
    }
}
