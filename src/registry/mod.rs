//! npm registry access

pub mod client;
pub mod http;
pub mod types;

pub use client::RegistryClient;
pub use http::{HttpFetch, ReqwestFetcher};
