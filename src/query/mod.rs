//! Query engine over the harvested corpus
//!
//! Callers hand in one query string; a prefix selects the mode:
//! - `name:` prefix-matches against faculty names
//! - `vidwan:` matches the external Vidwan identifier exactly
//! - anything else is a comma-separated keyword search, scored against
//!   each record's expertise field and raw page body
//! - an empty query returns the whole corpus
//!
//! Results are public record shapes without the raw page body, optionally
//! filtered to a single institution.

mod engine;
mod expression;

pub use engine::search;
pub use expression::SearchQuery;
