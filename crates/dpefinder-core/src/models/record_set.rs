use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::designee::Designee;
use super::search::SearchResponse;
use crate::error::Result;

/// Identity of a designee within one loaded [`RecordSet`].
///
/// Keys are generated at ingestion time and carry no meaning across loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordKey(Uuid);

impl RecordKey {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Where a record set came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordSource {
    Remote,
    Snapshot { saved_at: Option<DateTime<Utc>> },
}

/// Validated, immutable set of designees keyed by freshly generated keys.
#[derive(Debug, Clone)]
pub struct RecordSet {
    records: BTreeMap<RecordKey, Designee>,
    source: RecordSource,
}

impl RecordSet {
    /// Validate a search response and key each of its designees.
    pub fn ingest(response: SearchResponse, source: RecordSource) -> Result<Self> {
        response.validate()?;
        let records = response
            .data
            .into_iter()
            .map(|designee| (RecordKey::generate(), designee))
            .collect();
        Ok(Self { records, source })
    }

    pub fn get(&self, key: &RecordKey) -> Option<&Designee> {
        self.records.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RecordKey, &Designee)> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn source(&self) -> &RecordSource {
        &self.source
    }
}
