//! Endpoint extraction and read-only advisory analysis.

pub mod analyze;
pub mod extract;

pub use analyze::{advise, analyze_endpoint};
pub use extract::extract_endpoints;
