//! Local caching module for offline data access.
//!
//! This module provides:
//! - `SnapshotStore`: one JSON file per designee category, replaced atomically
//! - `RegistryCache`: decides between the local snapshot and a registry fetch
//!
//! Snapshots hold the registry response verbatim, so a snapshot can be
//! validated exactly like a fresh response.

pub mod registry;
pub mod snapshot;

pub use registry::{RegistryCache, DEFAULT_COUNTRY_ID};
pub use snapshot::{Snapshot, SnapshotStore, StagedSnapshot};
