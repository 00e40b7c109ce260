use std::collections::BTreeMap;

use tracing::info;

use super::{Coordinate, ZipTable};
use crate::models::{RecordKey, RecordSet};

/// Coordinates for every designee whose zip code resolved.
#[derive(Debug, Clone, Default)]
pub struct GeoIndex {
    entries: BTreeMap<RecordKey, Coordinate>,
    unresolved: Vec<RecordKey>,
}

impl GeoIndex {
    /// Resolve each designee's zip code. Designees whose code is not in the
    /// table are left out of the index, logged, and listed in
    /// [`GeoIndex::unresolved`].
    pub fn build(records: &RecordSet, table: &ZipTable) -> Self {
        let mut entries = BTreeMap::new();
        let mut unresolved = Vec::new();

        for (key, designee) in records.iter() {
            let zip = designee.address.lookup_zip();
            match table.get(zip) {
                Some(coord) => {
                    entries.insert(*key, coord);
                }
                None => {
                    unresolved.push(*key);
                    info!(
                        designee = %key,
                        zip_code = %designee.address.zip_code,
                        lookup = %zip,
                        name = %designee.full_name,
                        "No location found for designee"
                    );
                }
            }
        }

        info!(
            found = entries.len(),
            missing = unresolved.len(),
            total = records.len(),
            "Finished zip code lookup"
        );

        Self {
            entries,
            unresolved,
        }
    }

    pub fn get(&self, key: &RecordKey) -> Option<Coordinate> {
        self.entries.get(key).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RecordKey, &Coordinate)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Designees left out because their zip code had no coordinates.
    pub fn unresolved(&self) -> &[RecordKey] {
        &self.unresolved
    }

    pub fn unresolved_count(&self) -> usize {
        self.unresolved.len()
    }
}
