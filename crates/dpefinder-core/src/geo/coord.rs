use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};

/// Latitude/longitude in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Read-only zip code to coordinate reference table.
///
/// The on-disk form is a JSON object keyed by zip code:
/// `{"94105": {"latitude": 37.789, "longitude": -122.395}, ...}`.
/// A `[latitude, longitude]` pair is accepted in place of the object.
#[derive(Debug, Clone, Default)]
pub struct ZipTable {
    coords: HashMap<String, Coordinate>,
}

impl ZipTable {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            let hint = if e.kind() == ErrorKind::NotFound {
                "zip code table not found"
            } else {
                "failed to read zip code table"
            };
            Error::storage(path, std::io::Error::new(e.kind(), format!("{}: {}", hint, e)))
        })?;
        let table = Self::from_json_str(&contents)?;
        debug!(path = %path.display(), zips = table.len(), "Loaded zip code table");
        Ok(table)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let coords = serde_json::from_str(json).map_err(|source| Error::Decode {
            origin: "zip code table",
            source,
        })?;
        Ok(Self { coords })
    }

    pub fn get(&self, zip: &str) -> Option<Coordinate> {
        self.coords.get(zip).copied()
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, Coordinate)> for ZipTable {
    fn from_iter<I: IntoIterator<Item = (S, Coordinate)>>(iter: I) -> Self {
        Self {
            coords: iter.into_iter().map(|(zip, c)| (zip.into(), c)).collect(),
        }
    }
}
