//! CLI command implementations

pub mod bundle;
pub mod completions;
pub mod resolve;
