//! Geocoding and distance ranking.
//!
//! - `ZipTable`: zip code to coordinate reference data, injected by the caller
//! - `GeoIndex`: designee key to coordinate, best effort
//! - `DistanceRanker`: Vincenty distances from an origin zip, nearest first

pub mod coord;
pub mod index;
pub mod rank;
pub mod vincenty;

pub use coord::{Coordinate, ZipTable};
pub use index::GeoIndex;
pub use rank::{DistanceRanker, RankedEntry};
pub use vincenty::Vincenty;
