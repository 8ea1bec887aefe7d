use std::io::IsTerminal;
use std::path::PathBuf;

use clap::Parser;
use gtl::config::{ColorChoice, Config, Format};
use gtl::render::{render, RenderOptions};

#[derive(Parser)]
#[command(name = "gtl", about = "Galera timeline: merge node logs into one ordered narrative")]
struct Cli {
    /// Node log files. The first file is node0, the second node1, and so on.
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Read settings from this file instead of ~/.config/gtl/config.toml.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum)]
    format: Option<Format>,

    /// Colour text output.
    #[arg(long, value_enum)]
    color: Option<ColorChoice>,

    /// Print the source lines under each event.
    #[arg(long)]
    raw: bool,

    /// Scan files concurrently (same-second tie-break order may vary).
    #[arg(long)]
    parallel: bool,

    /// Report progress on stderr.
    #[arg(short, long)]
    verbose: bool,

    /// Debug-level diagnostics on stderr.
    #[arg(long)]
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(format) = cli.format {
        config.output.format = format;
    }
    if let Some(color) = cli.color {
        config.output.color = color;
    }
    config.output.show_raw |= cli.raw;
    config.extract.parallel |= cli.parallel;

    let timeline = gtl::build_timeline(&cli.files, config.extract.parallel)?;
    tracing::info!(events = timeline.len(), nodes = cli.files.len(), "timeline built");

    let stdout = std::io::stdout();
    let opts = RenderOptions {
        format: config.output.format,
        color: config.output.color.enabled(stdout.is_terminal()),
        show_raw: config.output.show_raw,
    };
    let mut out = stdout.lock();
    render(&mut out, &timeline, &opts)?;
    Ok(())
}
