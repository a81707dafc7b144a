//! Record catalog for robostore
//!
//! Every persisted kind lives here, split by lifecycle: `automation` holds
//! the collection-stored kinds (dense ids, name-keyed), `capture` holds the
//! document-stored kinds (one file per UUID token) and the auxiliary records
//! that link captures to their sources.
//!
//! # Design Principles
//!
//! - Serialized form is the contract: field names and defaults match the
//!   files already on disk
//! - Absent fields take defaults on read; unknown fields are ignored
//! - `Option` fields serialize as explicit `null`, never as omitted keys
//! - Fresh UUIDs and timestamps are drawn per record, never shared

mod automation;
mod capture;

pub use automation::{Action, MousePosition, Schedule, Task, TaskRank};
pub use capture::{
    CapturedData, Document, Image, JsonData, ScreenData, ScreenObject, Source,
};
