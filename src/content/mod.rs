//! Content subsystem
//!
//! The content store holds the canonical persistent state of all editable
//! site content: a single JSON document mapping section names (hero, about,
//! portfolio, services, ...) to section values. Sections are either scalar
//! mappings or item lists (`{title, items: [...]}`).
//!
//! Persistence is deliberately simple for a single-admin site:
//!
//! - One pretty-printed JSON file, overwritten in full on every write
//! - Missing file reads as an empty document (lazy creation)
//! - Unparsable file also reads as an empty document, but is logged
//!   distinctly so corruption is visible in the logs
//! - No locking at this layer; callers serialize writes

mod document;
mod errors;
mod store;

pub use document::{next_item_id, shallow_merge, ContentDocument};
pub use errors::{ContentError, ContentResult, ErrorBody};
pub use store::ContentStore;
