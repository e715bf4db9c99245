// Copyright 2025 The photon-client Authors
// SPDX-License-Identifier: Apache-2.0

//! Error types for table access

/// Result type alias using TableError
pub type Result<T> = std::result::Result<T, TableError>;

/// Errors surfaced by a table transport
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    /// The table service cannot be reached
    #[error("Table service is not reachable")]
    Disconnected,

    /// Key is empty or contains the path separator
    #[error("Invalid table key: {0:?}")]
    InvalidKey(String),

    /// Entry exists but holds a value of another type
    #[error("Entry {key} holds a {found} value, expected {expected}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: &'static str,
    },
}

impl TableError {
    /// Check if error is transient (the same call may succeed on a later cycle)
    pub fn is_transient(&self) -> bool {
        matches!(self, TableError::Disconnected)
    }
}
