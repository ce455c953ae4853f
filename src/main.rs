use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use depbundle::cli::output::OutputMode;
use depbundle::cli::{commands, Cli, Commands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    let default_filter = if cli.verbose {
        "depbundle=debug,warn"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    let mode = OutputMode {
        json: cli.json,
        quiet: cli.quiet,
    };

    let result = match cli.command {
        Commands::Resolve(args) => commands::resolve::execute(args, mode).await,
        Commands::Bundle(args) => commands::bundle::execute(args, mode).await,
        Commands::Completions(args) => commands::completions::execute(args, mode).await,
    };

    if let Err(ref e) = result {
        if mode.json {
            let error_json = serde_json::json!({
                "error": true,
                "message": e.to_string()
            });
            match serde_json::to_string_pretty(&error_json) {
                Ok(text) => eprintln!("{}", text),
                Err(_) => eprintln!("{}", e),
            }
        } else {
            eprintln!("{} {}", console::style("error:").red().bold(), e);
        }
        std::process::exit(e.exit_code());
    }
}
