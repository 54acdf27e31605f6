use std::io;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use zkbench_report::pipeline::{self, Config};
use zkbench_report::report::{self, BenchReport, RunMeta};

#[derive(Parser, Debug)]
#[command(name = "zkbench-report")]
#[command(about = "Parse ZKP benchmark logs and generate a report")]
struct Args {
    /// Path that contains the logs (it will search recursively).
    logs: PathBuf,

    /// Report file to save the results (consumed by the visualization layer).
    #[arg(short, long, default_value = "index.html")]
    output: PathBuf,
}

fn main() -> io::Result<()> {
    // Diagnostics go to stderr; only the report touches the output file.
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = Config {
        logs_dir: args.logs,
        output: args.output,
    };

    tracing::info!(path = %config.logs_dir.display(), "process");
    let analysis = pipeline::analyse(&config.logs_dir).map_err(io::Error::other)?;

    let report = BenchReport {
        run: RunMeta {
            schema_version: 1,
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp_utc: report::now_utc(),
            logs_root: config.logs_dir.display().to_string(),
            files_parsed: analysis.stats.files_parsed,
            files_skipped: analysis.stats.files_skipped,
        },
        circuits: analysis.circuits,
        arithmetics: analysis.arithmetics,
        ec: analysis.ec,
    };
    report.write_to(&config.output)?;
    tracing::info!(path = %config.output.display(), "report written");

    Ok(())
}
