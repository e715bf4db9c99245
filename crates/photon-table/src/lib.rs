// Copyright 2025 The photon-client Authors
// SPDX-License-Identifier: Apache-2.0

//! # photon-table
//!
//! Named-entry key-value table used to exchange state between a PhotonVision
//! coprocessor and the robot controller.
//!
//! The transport is consumed through three traits:
//! - **[`TableInstance`]** - entry point, resolves top level tables by name
//! - **[`NetworkTable`]** - a namespace, resolves sub-tables and entries
//! - **[`TableEntry`]** - a single independently updatable value slot
//!
//! Entries follow last-write-wins semantics and give no transactional guarantees
//! across entries. Reads of an entry that was never published return the
//! caller-supplied default.
//!
//! [`LocalTableInstance`] is an in-process implementation of the traits, used for
//! simulation and tests.
//!
//! ```rust
//! use photon_table::{LocalTableInstance, NetworkTable, TableEntry, TableInstance};
//!
//! let instance = LocalTableInstance::new();
//! let camera_table = instance.get_table("photonvision")?.get_sub_table("front")?;
//! let entry = camera_table.get_entry("pipelineIndex")?;
//!
//! assert_eq!(entry.get_number(0.0)?, 0.0);
//! entry.set_number(2.0)?;
//! assert_eq!(entry.get_number(0.0)?, 2.0);
//! # Ok::<(), photon_table::TableError>(())
//! ```

mod error;
mod local_table;
mod table_traits;

pub use error::{Result, TableError};
pub use local_table::{EntryValue, LocalEntry, LocalTable, LocalTableInstance};
pub use table_traits::{NetworkTable, TableEntry, TableInstance, PATH_SEPARATOR};
