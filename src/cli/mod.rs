//! CLI module for depbundle
//!
//! Provides command-line interface using clap.

pub mod commands;
pub mod output;

use std::path::PathBuf;
use clap::{Args, Parser, Subcommand};

use commands::*;
use crate::core::{BundleError, BundleResult, Config};
use crate::utils::{is_valid_package_name, parse_package_spec};

/// depbundle - Bundle an npm package with its direct dependencies
#[derive(Parser)]
#[command(name = "depbundle")]
#[command(author = "depbundle Contributors")]
#[command(version)]
#[command(about = "Download an npm package and its direct dependencies as one zip", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve a package and list what would be bundled
    #[command(visible_alias = "r")]
    Resolve(resolve::ResolveArgs),

    /// Resolve a package and save it with its dependencies as a zip
    #[command(visible_alias = "b")]
    Bundle(bundle::BundleArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Arguments shared by commands that talk to the registry
#[derive(Args)]
pub struct PackageArgs {
    /// Package to fetch (name or name@version)
    pub package: String,

    /// Registry URL
    #[arg(long, env = "DEPBUNDLE_REGISTRY")]
    pub registry: Option<String>,

    /// Maximum requests in flight (0 = unbounded)
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Directory to read depbundle.toml / .depbundlerc from
    #[arg(long, default_value = ".")]
    pub cwd: PathBuf,
}

impl PackageArgs {
    /// Split and validate the package spec
    pub fn spec(&self) -> BundleResult<(String, Option<String>)> {
        let (name, version) = parse_package_spec(self.package.trim());
        if !is_valid_package_name(&name) {
            return Err(BundleError::InvalidPackageName(name));
        }
        Ok((name, version))
    }

    /// Load configuration and apply command-line overrides
    pub fn config(&self) -> BundleResult<Config> {
        let mut config = Config::load(&self.cwd)?;

        if let Some(ref registry) = self.registry {
            config.registry.url = registry.clone();
        }
        if let Some(concurrency) = self.concurrency {
            config.network.concurrency = concurrency;
        }

        config.validate()?;
        Ok(config)
    }
}
