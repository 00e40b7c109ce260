use serde::{Deserialize, Serialize};

use super::designee::{nullable, Designee};
use crate::error::{Error, Result};

/// Page size large enough to return an entire designee category in one response.
pub const BULK_PAGE_ROWS: u32 = 65_536;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageModel {
    pub first: u32,
    pub rows: u32,
}

/// Request body for the registry's bulk designee search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchQuery {
    #[serde(rename = "pageModel")]
    pub page_model: PageModel,
    #[serde(rename = "countryId")]
    pub country_id: u32,
    #[serde(rename = "designeeTypeId")]
    pub designee_type_id: u32,
    #[serde(rename = "isLocationSearch")]
    pub is_location_search: bool,
}

impl SearchQuery {
    /// Single-page query covering the whole category.
    pub fn bulk(designee_type_id: u32, country_id: u32) -> Self {
        Self {
            page_model: PageModel {
                first: 0,
                rows: BULK_PAGE_ROWS,
            },
            country_id,
            designee_type_id,
            is_location_search: true,
        }
    }
}

/// Registry search response. Snapshots on disk use the same schema.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(alias = "Total", default, deserialize_with = "nullable")]
    pub total: i64,
    #[serde(alias = "Data", default, deserialize_with = "nullable")]
    pub data: Vec<Designee>,
    #[serde(rename = "Status", alias = "status", default, deserialize_with = "nullable")]
    pub status: i64,
    #[serde(rename = "Title", alias = "title", default, deserialize_with = "nullable")]
    pub title: String,
}

impl SearchResponse {
    /// Reject error envelopes, empty results and truncated pages.
    pub fn validate(&self) -> Result<()> {
        if (self.status != 0 && self.status != 200) || !self.title.is_empty() {
            return Err(Error::Validation(format!(
                "registry reported an error (status {}, title {:?})",
                self.status, self.title
            )));
        }
        if self.data.is_empty() {
            return Err(Error::Validation("empty designee list".to_string()));
        }
        if self.data.len() as i64 != self.total {
            return Err(Error::Validation(format!(
                "declared total {} does not match {} received designees",
                self.total,
                self.data.len()
            )));
        }
        Ok(())
    }
}
