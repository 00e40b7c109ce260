//! dpefinder core library.
//!
//! Fetches the FAA designated pilot examiner directory (or reuses the local
//! snapshot of it), resolves each examiner's zip code to a coordinate, and
//! ranks examiners by geodesic distance from an origin zip code.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod geo;
pub mod models;
pub mod utils;

pub use error::{Error, Result};
