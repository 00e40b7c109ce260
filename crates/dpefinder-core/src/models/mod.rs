//! Data models for designee registry entities.
//!
//! - `Designee`, `Address`: one examiner entry and its mailing address
//! - `SearchQuery`, `SearchResponse`: the registry's bulk search wire format,
//!   also used verbatim for local snapshots
//! - `RecordSet`, `RecordKey`: a validated, keyed set of designees

pub mod designee;
pub mod record_set;
pub mod search;

pub use designee::{Address, Designee, NamedRef};
pub use record_set::{RecordKey, RecordSet, RecordSource};
pub use search::{PageModel, SearchQuery, SearchResponse, BULK_PAGE_ROWS};
