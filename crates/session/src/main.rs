//! `tabdb` entry point.

use std::process::ExitCode;

use clap::Parser;
use session::cli::{self, Cli};
use session::{Config, LogFormat};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() -> ExitCode {
    let config = Config::from_env();

    // 1. Initialize tracing; stdout is reserved for command output
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);
    match config.log_format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }

    // 2. Parse command-line arguments
    let cli = Cli::parse();

    // 3. Install Prometheus metrics recorder when asked for
    let metrics_handle = if cli.metrics || config.emit_metrics {
        match metrics_exporter_prometheus::PrometheusBuilder::new().install_recorder() {
            Ok(handle) => Some(handle),
            Err(error) => {
                tracing::warn!(%error, "failed to install Prometheus recorder");
                None
            }
        }
    } else {
        None
    };

    // 4. Load and run the command
    let result = cli::run(&cli, &config);

    if let Some(handle) = metrics_handle {
        eprintln!("{}", handle.render());
    }

    match result {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(error) => {
            tracing::error!(%error, "command failed");
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}
