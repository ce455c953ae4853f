//! Output formatting for CLI

use console::style;
use serde::Serialize;

/// How a command should report to the terminal
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputMode {
    /// Machine-readable JSON on stdout
    pub json: bool,
    /// No human-readable output; errors are still printed
    pub quiet: bool,
}

impl OutputMode {
    /// Whether human-readable lines, spinners and bars should be shown
    pub fn human(&self) -> bool {
        !self.json && !self.quiet
    }

    /// Spinner, unless output is suppressed
    pub fn spinner(&self, message: &str) -> Option<indicatif::ProgressBar> {
        self.human().then(|| spinner(message))
    }

    /// Download progress bar, unless output is suppressed
    pub fn download_progress(&self, total: u64) -> Option<indicatif::ProgressBar> {
        self.human().then(|| download_progress(total))
    }
}

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Print an info message
pub fn info(message: &str) {
    println!("{} {}", style("ℹ").blue().bold(), message);
}

/// Print a warning message
pub fn warning(message: &str) {
    println!("{} {}", style("⚠").yellow().bold(), message);
}

/// Print a step in a process
pub fn step(number: usize, total: usize, message: &str) {
    println!(
        "{} {}",
        style(format!("[{}/{}]", number, total)).dim(),
        message
    );
}

/// Print JSON output
pub fn json<T: Serialize>(data: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

/// Print a table header
pub fn table_header(columns: &[&str]) {
    let header: Vec<String> = columns.iter().map(|c| style(*c).bold().to_string()).collect();
    println!("{}", header.join("  "));
}

/// Print a divider line
pub fn divider() {
    println!("{}", style("─".repeat(60)).dim());
}

/// Format a package name with version
pub fn package_version(name: &str, version: &str) -> String {
    format!("{}@{}", style(name).cyan(), style(version).green())
}

/// Format a duration in human-readable form
pub fn format_duration(millis: u128) -> String {
    if millis < 1000 {
        format!("{}ms", millis)
    } else if millis < 60000 {
        format!("{:.2}s", millis as f64 / 1000.0)
    } else {
        let seconds = millis / 1000;
        let minutes = seconds / 60;
        let remaining_seconds = seconds % 60;
        format!("{}m {}s", minutes, remaining_seconds)
    }
}

/// Create a progress spinner
pub fn spinner(message: &str) -> indicatif::ProgressBar {
    let spinner = indicatif::ProgressBar::new_spinner();
    spinner.set_style(
        indicatif::ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));
    spinner
}

/// Create a progress bar for tarball downloads, measured in percent
pub fn download_progress(total: u64) -> indicatif::ProgressBar {
    let bar = indicatif::ProgressBar::new(total);
    bar.set_style(
        indicatif::ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}% ({elapsed})")
            .unwrap()
            .progress_chars("█▓▒░"),
    );
    bar
}
