// Copyright 2025 The photon-client Authors
// SPDX-License-Identifier: Apache-2.0

//! In-process table transport
//!
//! Every handle created from the same [`LocalTableInstance`] shares one entry map,
//! so a producer and a consumer bound to the same instance see each other's writes.

use crate::error::{Result, TableError};
use crate::table_traits::{verify_key, NetworkTable, TableEntry, TableInstance, PATH_SEPARATOR};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use tracing::{debug, trace};

/// Value stored in a local entry
#[derive(Debug, Clone, PartialEq)]
pub enum EntryValue {
    Boolean(bool),
    Double(f64),
    Raw(Vec<u8>),
}

impl EntryValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            EntryValue::Boolean(_) => "boolean",
            EntryValue::Double(_) => "double",
            EntryValue::Raw(_) => "raw",
        }
    }
}

#[derive(Debug, Default)]
struct LocalTableStore {
    entries: RwLock<HashMap<String, EntryValue>>,
    disconnected: AtomicBool,
}

impl LocalTableStore {
    fn verify_connected(&self) -> Result<()> {
        if self.disconnected.load(Ordering::Acquire) {
            return Err(TableError::Disconnected);
        }
        Ok(())
    }
}

/// Shared in-process table service
#[derive(Debug, Clone, Default)]
pub struct LocalTableInstance {
    store: Arc<LocalTableStore>,
}

impl LocalTableInstance {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide default instance
    pub fn get_default() -> Self {
        static DEFAULT_INSTANCE: OnceLock<LocalTableInstance> = OnceLock::new();
        DEFAULT_INSTANCE.get_or_init(LocalTableInstance::new).clone()
    }

    /// Simulate the service becoming (un)reachable. While disconnected every
    /// operation on every handle of this instance fails with [`TableError::Disconnected`].
    pub fn set_connected(&self, connected: bool) {
        debug!("[TABLE] Local table connected: {}", connected);
        self.store.disconnected.store(!connected, Ordering::Release);
    }

    pub fn is_connected(&self) -> bool {
        !self.store.disconnected.load(Ordering::Acquire)
    }

    /// Number of entries that have been published
    pub fn number_of_entries(&self) -> usize {
        self.store.entries.read().len()
    }

    /// Remove every published entry
    pub fn clear(&self) {
        self.store.entries.write().clear();
    }
}

impl TableInstance for LocalTableInstance {
    type Table = LocalTable;

    fn get_table(&self, key: &str) -> Result<LocalTable> {
        self.store.verify_connected()?;
        verify_key(key)?;
        Ok(LocalTable {
            store: Arc::clone(&self.store),
            path: format!("{}{}", PATH_SEPARATOR, key),
        })
    }
}

/// Namespace handle into a [`LocalTableInstance`]
#[derive(Debug, Clone)]
pub struct LocalTable {
    store: Arc<LocalTableStore>,
    path: String,
}

impl LocalTable {
    fn child_path(&self, key: &str) -> Result<String> {
        verify_key(key)?;
        Ok(format!("{}{}{}", self.path, PATH_SEPARATOR, key))
    }
}

impl NetworkTable for LocalTable {
    type Entry = LocalEntry;

    fn path(&self) -> &str {
        &self.path
    }

    fn get_sub_table(&self, key: &str) -> Result<LocalTable> {
        self.store.verify_connected()?;
        Ok(LocalTable {
            store: Arc::clone(&self.store),
            path: self.child_path(key)?,
        })
    }

    fn get_entry(&self, key: &str) -> Result<LocalEntry> {
        self.store.verify_connected()?;
        Ok(LocalEntry {
            store: Arc::clone(&self.store),
            key: self.child_path(key)?,
        })
    }
}

/// Entry handle into a [`LocalTableInstance`]
#[derive(Debug, Clone)]
pub struct LocalEntry {
    store: Arc<LocalTableStore>,
    key: String,
}

impl LocalEntry {
    fn mismatch(&self, expected: &'static str, found: &EntryValue) -> TableError {
        TableError::TypeMismatch {
            key: self.key.clone(),
            expected,
            found: found.type_name(),
        }
    }

    /// Last-write-wins store. Overwriting a value of a different type is refused,
    /// as the entry type is fixed by its first publisher.
    fn write_value(&self, expected: &'static str, value: EntryValue) -> Result<()> {
        self.store.verify_connected()?;
        let mut entries = self.store.entries.write();
        if let Some(existing) = entries.get(&self.key) {
            if existing.type_name() != expected {
                return Err(self.mismatch(expected, existing));
            }
        }
        trace!("[TABLE] {} <- {}", self.key, expected);
        entries.insert(self.key.clone(), value);
        Ok(())
    }
}

impl TableEntry for LocalEntry {
    fn key(&self) -> &str {
        &self.key
    }

    fn exists(&self) -> Result<bool> {
        self.store.verify_connected()?;
        Ok(self.store.entries.read().contains_key(&self.key))
    }

    fn get_raw_into(&self, default: &[u8], destination: &mut Vec<u8>) -> Result<()> {
        self.store.verify_connected()?;
        let entries = self.store.entries.read();
        let source: &[u8] = match entries.get(&self.key) {
            None => default,
            Some(EntryValue::Raw(bytes)) => bytes,
            Some(other) => return Err(self.mismatch("raw", other)),
        };
        destination.clear();
        destination.reserve_exact(source.len());
        destination.extend_from_slice(source);
        Ok(())
    }

    fn get_boolean(&self, default: bool) -> Result<bool> {
        self.store.verify_connected()?;
        match self.store.entries.read().get(&self.key) {
            None => Ok(default),
            Some(EntryValue::Boolean(value)) => Ok(*value),
            Some(other) => Err(self.mismatch("boolean", other)),
        }
    }

    fn get_number(&self, default: f64) -> Result<f64> {
        self.store.verify_connected()?;
        match self.store.entries.read().get(&self.key) {
            None => Ok(default),
            Some(EntryValue::Double(value)) => Ok(*value),
            Some(other) => Err(self.mismatch("double", other)),
        }
    }

    fn set_raw(&self, value: &[u8]) -> Result<()> {
        self.store.verify_connected()?;
        {
            // Reuse the stored allocation when the entry already holds bytes
            let mut entries = self.store.entries.write();
            if let Some(existing) = entries.get_mut(&self.key) {
                match existing {
                    EntryValue::Raw(bytes) => {
                        bytes.clear();
                        bytes.extend_from_slice(value);
                        trace!("[TABLE] {} <- raw ({} bytes)", self.key, value.len());
                        return Ok(());
                    }
                    other => return Err(self.mismatch("raw", other)),
                }
            }
        }
        self.write_value("raw", EntryValue::Raw(value.to_vec()))
    }

    fn set_boolean(&self, value: bool) -> Result<()> {
        self.write_value("boolean", EntryValue::Boolean(value))
    }

    fn set_number(&self, value: f64) -> Result<()> {
        self.write_value("double", EntryValue::Double(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera_table(instance: &LocalTableInstance) -> LocalTable {
        instance
            .get_table("photonvision")
            .unwrap()
            .get_sub_table("front")
            .unwrap()
    }

    #[test]
    fn test_paths() {
        let instance = LocalTableInstance::new();
        let table = camera_table(&instance);
        assert_eq!(table.path(), "/photonvision/front");
        let entry = table.get_entry("rawBytes").unwrap();
        assert_eq!(entry.key(), "/photonvision/front/rawBytes");
    }

    #[test]
    fn test_defaults_when_unpublished() {
        let instance = LocalTableInstance::new();
        let table = camera_table(&instance);

        let entry = table.get_entry("driverMode").unwrap();
        assert!(!entry.exists().unwrap());
        assert!(entry.get_boolean(true).unwrap());
        assert!(!entry.get_boolean(false).unwrap());

        let mut bytes = vec![1u8, 2, 3];
        table
            .get_entry("rawBytes")
            .unwrap()
            .get_raw_into(&[], &mut bytes)
            .unwrap();
        assert!(bytes.is_empty());
        assert_eq!(instance.number_of_entries(), 0);
    }

    #[test]
    fn test_last_write_wins_across_handles() {
        let instance = LocalTableInstance::new();
        let writer = camera_table(&instance).get_entry("pipelineIndex").unwrap();
        let reader = camera_table(&instance.clone())
            .get_entry("pipelineIndex")
            .unwrap();

        writer.set_number(1.0).unwrap();
        writer.set_number(4.0).unwrap();
        assert_eq!(reader.get_number(0.0).unwrap(), 4.0);
        assert!(reader.exists().unwrap());
    }

    #[test]
    fn test_type_mismatch() {
        let instance = LocalTableInstance::new();
        let entry = camera_table(&instance).get_entry("driverMode").unwrap();
        entry.set_boolean(true).unwrap();

        assert_eq!(
            entry.get_number(0.0),
            Err(TableError::TypeMismatch {
                key: "/photonvision/front/driverMode".to_string(),
                expected: "double",
                found: "boolean",
            })
        );
        assert!(entry.set_raw(&[1, 2]).is_err());
        assert!(entry.get_boolean(false).unwrap());
    }

    #[test]
    fn test_raw_reuses_destination_allocation() {
        let instance = LocalTableInstance::new();
        let entry = camera_table(&instance).get_entry("rawBytes").unwrap();
        entry.set_raw(&[7u8; 64]).unwrap();

        let mut destination = Vec::new();
        entry.get_raw_into(&[], &mut destination).unwrap();
        assert_eq!(destination, vec![7u8; 64]);
        let capacity = destination.capacity();

        entry.set_raw(&[9u8; 16]).unwrap();
        entry.get_raw_into(&[], &mut destination).unwrap();
        assert_eq!(destination, vec![9u8; 16]);
        assert_eq!(destination.capacity(), capacity);
    }

    #[test]
    fn test_disconnected() {
        let instance = LocalTableInstance::new();
        let table = camera_table(&instance);
        let entry = table.get_entry("rawBytes").unwrap();

        instance.set_connected(false);
        assert!(!instance.is_connected());
        assert_eq!(instance.get_table("photonvision").unwrap_err(), TableError::Disconnected);
        assert_eq!(table.get_sub_table("rear").unwrap_err(), TableError::Disconnected);
        assert_eq!(entry.set_raw(&[1]).unwrap_err(), TableError::Disconnected);
        assert!(TableError::Disconnected.is_transient());

        instance.set_connected(true);
        entry.set_raw(&[1]).unwrap();
    }

    #[test]
    fn test_invalid_keys() {
        let instance = LocalTableInstance::new();
        assert!(matches!(instance.get_table(""), Err(TableError::InvalidKey(_))));
        let table = camera_table(&instance);
        assert!(matches!(table.get_entry("a/b"), Err(TableError::InvalidKey(_))));
    }

    #[test]
    fn test_default_instance_is_shared() {
        let first = LocalTableInstance::get_default();
        let second = LocalTableInstance::get_default();
        first
            .get_table("default_instance_test")
            .unwrap()
            .get_entry("flag")
            .unwrap()
            .set_boolean(true)
            .unwrap();
        let read_back = second
            .get_table("default_instance_test")
            .unwrap()
            .get_entry("flag")
            .unwrap()
            .get_boolean(false)
            .unwrap();
        assert!(read_back);
    }
}
