//! Read-only checks over raw plugin source text.
//!
//! Both passes scan the unmodified buffer and accumulate findings without
//! short-circuiting; validity is derived afterwards from the absence of
//! error-severity findings.

pub mod contract;
pub mod risks;

pub use contract::check_contract;
pub use risks::scan_risks;
