//! REST API client module for the FAA designee registry.
//!
//! This module provides the `RemoteSource` seam and its HTTP implementation,
//! `RegistryClient`, which performs the bulk designee search.

pub mod client;
pub mod error;

pub use client::{RegistryClient, RemoteSource, DEFAULT_BASE_URL, REQUEST_TIMEOUT_SECS};
pub use error::ApiError;
