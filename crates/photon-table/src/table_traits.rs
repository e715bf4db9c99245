// Copyright 2025 The photon-client Authors
// SPDX-License-Identifier: Apache-2.0

//! Transport traits consumed by the camera binding
//!
//! Implementations are expected to be non-blocking-with-defaults: a read returns
//! the last known value, or the given default if nothing has ever been published,
//! and never waits on the network.

use crate::error::{Result, TableError};

/// Separator between path components of a table or entry
pub const PATH_SEPARATOR: char = '/';

/// Entry point of a table transport
pub trait TableInstance {
    type Table: NetworkTable;

    /// Resolve a top level table (for example `"photonvision"`)
    fn get_table(&self, key: &str) -> Result<Self::Table>;
}

/// A namespace of entries and sub-tables
pub trait NetworkTable: Sized {
    type Entry: TableEntry;

    /// Full path of this table, e.g. `/photonvision/front`
    fn path(&self) -> &str;

    /// Resolve a child namespace
    fn get_sub_table(&self, key: &str) -> Result<Self>;

    /// Resolve a child entry. Does not fail if the entry was never published.
    fn get_entry(&self, key: &str) -> Result<Self::Entry>;
}

/// A single named value slot
pub trait TableEntry {
    /// Full path of this entry
    fn key(&self) -> &str;

    /// Whether a value has ever been published to this entry
    fn exists(&self) -> Result<bool>;

    /// Copy the raw bytes of the entry (or `default`) into `destination`.
    ///
    /// `destination` is cleared first. Implementations must not shrink its
    /// allocation so callers can reuse one buffer across reads.
    fn get_raw_into(&self, default: &[u8], destination: &mut Vec<u8>) -> Result<()>;

    fn get_boolean(&self, default: bool) -> Result<bool>;

    fn get_number(&self, default: f64) -> Result<f64>;

    fn set_raw(&self, value: &[u8]) -> Result<()>;

    fn set_boolean(&self, value: bool) -> Result<()>;

    fn set_number(&self, value: f64) -> Result<()>;
}

/// Verify a single path component is usable as a table or entry key
pub(crate) fn verify_key(key: &str) -> Result<()> {
    if key.is_empty() || key.contains(PATH_SEPARATOR) {
        return Err(TableError::InvalidKey(key.to_string()));
    }
    Ok(())
}
