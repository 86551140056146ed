//! Harvester engine: HTTP page source, pagination cursor, record stores and the
//! harvest driver.
mod cursor;
mod driver;
mod fetch;
mod memory_store;
mod progress;
mod redb_store;
mod store;
mod types;

pub use cursor::HarvestCursor;
pub use driver::{DriverSettings, HarvestDriver};
pub use fetch::{FetchSettings, PageSource, ReqwestPageSource, DEFAULT_ENDPOINT};
pub use memory_store::MemoryRecordStore;
pub use progress::{LogProgressSink, NullProgressSink, ProgressSink};
pub use redb_store::RedbRecordStore;
pub use store::{RecordStore, StoreError};
pub use types::{FailureKind, HarvestError, HarvestEvent, SkipReason, TransportError};
