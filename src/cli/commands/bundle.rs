//! depbundle bundle - Save a package and its direct dependencies as a zip

use std::path::PathBuf;
use std::time::{Duration, Instant};
use clap::Args;

use crate::archiver::DirectorySink;
use crate::cli::commands::resolve::print_packages;
use crate::cli::output::{self, OutputMode};
use crate::cli::PackageArgs;
use crate::core::{BundleResult, Engine, Session};

/// How often the progress bar re-reads the session
const PROGRESS_POLL: Duration = Duration::from_millis(100);

#[derive(Args)]
pub struct BundleArgs {
    #[command(flatten)]
    pub package: PackageArgs,

    /// Directory to write the zip into
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,
}

pub async fn execute(args: BundleArgs, mode: OutputMode) -> BundleResult<()> {
    let start_time = Instant::now();

    let (name, version) = args.package.spec()?;
    let mut config = args.package.config()?;
    if let Some(dir) = args.out_dir {
        config.output.dir = dir;
    }

    let out_dir = config.output.dir.clone();
    let engine = Engine::from_config(config)?;
    let session = Session::new();

    if mode.human() {
        output::step(1, 2, &format!("Resolving {}", name));
    }

    let spinner = mode.spinner("Fetching manifests...");
    let resolved = engine.resolver().resolve(&session, &name, version.as_deref()).await;
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    resolved?;

    let packages = session.packages();
    if mode.human() {
        print_packages(&packages);
        output::step(2, 2, &format!("Downloading {} tarball(s)", packages.len()));
    }

    let archiver = engine.archiver();
    let sink = DirectorySink::new(&out_dir);
    let bar = mode.download_progress(100);

    let archive = archiver.archive_and_download(&session, &sink);
    tokio::pin!(archive);
    let mut ticker = tokio::time::interval(PROGRESS_POLL);

    let report = loop {
        tokio::select! {
            report = &mut archive => break report,
            _ = ticker.tick() => {
                if let Some(ref bar) = bar {
                    bar.set_position(session.download_progress() as u64);
                }
            }
        }
    };

    if let Some(bar) = bar {
        bar.finish_and_clear();
    }
    let report = report?;

    let duration = start_time.elapsed();

    if mode.json {
        output::json(&serde_json::json!({
            "success": true,
            "packages": packages,
            "bundle": report,
            "duration_ms": duration.as_millis()
        }))?;
    } else if mode.human() {
        for failed in &report.failed {
            output::warning(&format!("Could not download {}", failed));
        }
        output::success(&format!(
            "Saved {} ({} of {} packages) to {}",
            report.file_name,
            report.entries,
            packages.len(),
            report.saved_to.display()
        ));
        output::info(&format!(
            "Done in {}",
            output::format_duration(duration.as_millis())
        ));
    }

    Ok(())
}
