use tracing::{debug, info};

use super::snapshot::SnapshotStore;
use crate::api::RemoteSource;
use crate::error::{Error, Result};
use crate::models::{RecordSet, RecordSource, SearchQuery, SearchResponse};
use crate::utils::format_age;

/// Country identifier the registry uses for the United States.
pub const DEFAULT_COUNTRY_ID: u32 = 184;

/// Produces designee record sets from the registry, reusing the local
/// snapshot unless a refresh is forced or no snapshot exists.
pub struct RegistryCache<R> {
    remote: R,
    store: SnapshotStore,
    country_id: u32,
}

impl<R: RemoteSource> RegistryCache<R> {
    pub fn new(remote: R, store: SnapshotStore) -> Self {
        Self {
            remote,
            store,
            country_id: DEFAULT_COUNTRY_ID,
        }
    }

    pub fn with_country(mut self, country_id: u32) -> Self {
        self.country_id = country_id;
        self
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    /// Obtain the designees for `category`.
    ///
    /// A forced refresh never falls back to the snapshot: if the fetch fails
    /// the error is returned as-is.
    pub async fn obtain(&self, category: u32, force_refresh: bool) -> Result<RecordSet> {
        if force_refresh {
            info!(category, "Refresh requested, fetching from registry");
            return self.fetch(category).await;
        }

        if let Some(records) = self.load(category)? {
            return Ok(records);
        }

        info!(category, "No local snapshot, fetching from registry");
        self.fetch(category).await
    }

    fn load(&self, category: u32) -> Result<Option<RecordSet>> {
        let Some(snapshot) = self.store.load(category)? else {
            return Ok(None);
        };

        let response: SearchResponse =
            serde_json::from_str(&snapshot.body).map_err(|source| Error::Decode {
                origin: "snapshot",
                source,
            })?;

        let records = RecordSet::ingest(
            response,
            RecordSource::Snapshot {
                saved_at: snapshot.saved_at,
            },
        )?;

        info!(
            category,
            path = %self.store.snapshot_path(category).display(),
            count = records.len(),
            age = %snapshot.saved_at.map(format_age).unwrap_or_else(|| "unknown".to_string()),
            "Loaded designees from local snapshot"
        );
        Ok(Some(records))
    }

    async fn fetch(&self, category: u32) -> Result<RecordSet> {
        let query = SearchQuery::bulk(category, self.country_id);
        let body = self.remote.search(&query).await?;

        let response: SearchResponse =
            serde_json::from_str(&body).map_err(|source| Error::Decode {
                origin: "registry",
                source,
            })?;
        let records = RecordSet::ingest(response, RecordSource::Remote)?;
        debug!(category, count = records.len(), "Registry response validated");

        let path = self.store.save(category, &body)?;
        info!(
            category,
            path = %path.display(),
            count = records.len(),
            "Saved registry response to local snapshot"
        );
        Ok(records)
    }
}
