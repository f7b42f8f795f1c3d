//! Faculty profile records and the heuristic profile extractor
//!
//! This module owns the record type harvested from a profile page and the
//! pure extraction function that produces it. Extraction never fails: every
//! field that cannot be recovered from the page falls back to the `"N/A"`
//! sentinel independently of the others.

mod extract;
mod record;

// Re-export main types
pub use extract::extract_profile;
pub use record::{ProfileRecord, ProfileSummary, NA};
