//! Harvester core: OAI-PMH page parsing, record normalization and the pure
//! pagination state machine. No IO happens in this crate.
mod allow_list;
mod cursor;
mod error;
mod normalize;
mod page;
mod raw;
mod record;
mod request;
mod stats;

pub use allow_list::{SubjectAllowList, DEFAULT_SUBJECTS};
pub use cursor::CursorState;
pub use error::{MalformedReason, MalformedRecord, ProtocolError};
pub use normalize::{normalize, GIVEN_NAME_TAGS};
pub use page::{parse_list_records, ListRecordsPage, ResumptionToken, ARXIV_NS, OAI_NS};
pub use raw::{RawAuthor, RawEntry};
pub use record::{revision_from_days, revision_to_days, CanonicalRecord, RecordLinks, SourceDate};
pub use request::{PageRequest, DEFAULT_METADATA_PREFIX};
pub use stats::{HarvestStats, PutOutcome};
