// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

pub type Result<T> = std::result::Result<T, Error>;

/// Errors from tree synthesis and object-store operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid key {key:?} for prefix {prefix:?}")]
    InvalidKey { key: String, prefix: String },

    #[error("Object not found: {0}")]
    NotFound(String),

    /// A collaborator call failed; the message is the store's own
    #[error("{operation} {key} failed: {message}")]
    Store {
        operation: Operation,
        key: String,
        message: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Preview error: {0}")]
    Preview(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Object-store operations, used to tag failures and to inject faults in tests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    Get,
    Put,
    Delete,
    Copy,
    SetAcl,
}

impl Error {
    pub fn invalid_key<K: Into<String>, P: Into<String>>(key: K, prefix: P) -> Self {
        Error::InvalidKey {
            key: key.into(),
            prefix: prefix.into(),
        }
    }

    pub fn not_found<K: Into<String>>(key: K) -> Self {
        Error::NotFound(key.into())
    }

    pub fn store<K: Into<String>, M: ToString>(operation: Operation, key: K, message: M) -> Self {
        Error::Store {
            operation,
            key: key.into(),
            message: message.to_string(),
        }
    }

    pub fn config<M: Into<String>>(message: M) -> Self {
        Error::Config(message.into())
    }

    pub fn preview<M: Into<String>>(message: M) -> Self {
        Error::Preview(message.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Operation::List => "list",
            Operation::Get => "get",
            Operation::Put => "put",
            Operation::Delete => "delete",
            Operation::Copy => "copy",
            Operation::SetAcl => "set-acl",
        };
        write!(f, "{name}")
    }
}
