//! Core module for depbundle
//!
//! This module contains the engine, configuration, error types,
//! and the per-task session state.

pub mod config;
pub mod engine;
pub mod error;
pub mod session;

pub use config::Config;
pub use engine::Engine;
pub use error::{BundleError, BundleResult};
pub use session::{ResolvedPackage, Session, SessionState};
