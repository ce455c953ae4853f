//! depbundle resolve - List a package and its direct dependencies

use std::time::Instant;
use clap::Args;

use crate::cli::output::{self, OutputMode};
use crate::cli::PackageArgs;
use crate::core::{BundleResult, Engine, ResolvedPackage, Session};

#[derive(Args)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub package: PackageArgs,
}

pub async fn execute(args: ResolveArgs, mode: OutputMode) -> BundleResult<()> {
    let start_time = Instant::now();

    let (name, version) = args.package.spec()?;
    let engine = Engine::from_config(args.package.config()?)?;
    let session = Session::new();

    let progress = mode.spinner(&format!("Resolving {}...", name));
    let result = engine.resolver().resolve(&session, &name, version.as_deref()).await;
    if let Some(pb) = progress {
        pb.finish_and_clear();
    }
    result?;

    let state = session.snapshot();
    let duration = start_time.elapsed();

    if mode.json {
        output::json(&serde_json::json!({
            "success": true,
            "session": state,
            "duration_ms": duration.as_millis()
        }))?;
    } else if mode.human() {
        print_packages(&state.dependencies);
        output::info(&format!(
            "Resolved {} package(s) in {}",
            state.dependencies.len(),
            output::format_duration(duration.as_millis())
        ));
    }

    Ok(())
}

/// Print the resolved list, main package first
pub fn print_packages(packages: &[ResolvedPackage]) {
    output::table_header(&["PACKAGE", "KIND"]);
    output::divider();

    let (main, deps): (Vec<_>, Vec<_>) = packages.iter().partition(|p| p.is_main_package);
    for pkg in main.iter().chain(deps.iter()) {
        let kind = if pkg.is_main_package { "main" } else { "dependency" };
        println!("  {}  {}", output::package_version(&pkg.name, &pkg.version), kind);
    }
}
