//! URL handling for the harvester
//!
//! This module provides institution-code derivation from directory-site
//! domains and the href cleaning/resolution applied during link discovery.

mod institution;
mod resolve;

// Re-export main functions
pub use institution::institution_code;
pub use resolve::{clean_href, resolve_href};
