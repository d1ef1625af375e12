use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use burst_dp::config::{DEFAULT_PENALTY, DEFAULT_RATE};
use burst_dp::report::{write_report, ReportOptions};
use burst_dp::{detect, load_timestamps, Algorithm, BurstConfig, BurstError};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Detect bursts of activity in a sequence of event timestamps.
#[derive(Parser, Debug)]
#[command(name = "burst", version, about, long_about = None)]
struct Cli {
    /// Decoder to run: viterbi or trellis (Bellman-Ford shortest path)
    #[arg(value_parser = parse_algorithm)]
    algorithm: Algorithm,

    /// File whose first line holds whitespace-separated, increasing timestamps
    file: PathBuf,

    /// Rate growth factor between consecutive states
    #[arg(short = 's', long = "rate", default_value_t = DEFAULT_RATE, env = "BURST_RATE")]
    rate: f64,

    /// Weight of the upward transition penalty
    #[arg(
        short = 'g',
        long = "gamma",
        visible_alias = "penalty",
        default_value_t = DEFAULT_PENALTY,
        env = "BURST_GAMMA",
        allow_negative_numbers = true
    )]
    gamma: f64,

    /// Print the derived rates and the decoder's full table before the segments
    #[arg(short = 'd', long = "debug")]
    debug: bool,

    /// Decimal places used when printing tables
    #[arg(long, default_value_t = 2)]
    precision: usize,

    /// Run every Bellman-Ford round even after convergence (trellis only)
    #[arg(long)]
    exhaustive: bool,

    /// Increase log verbosity on stderr (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_algorithm(value: &str) -> Result<Algorithm, BurstError> {
    value.parse()
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("burst_dp={level},burst={level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<(), BurstError> {
    let series = load_timestamps(&cli.file)?;
    let config = BurstConfig {
        rate: cli.rate,
        penalty: cli.gamma,
        algorithm: cli.algorithm,
        exhaustive_relaxation: cli.exhaustive,
    };
    tracing::info!(
        algorithm = %config.algorithm,
        rate = config.rate,
        gamma = config.penalty,
        timestamps = series.len(),
        "starting detection"
    );

    let detection = detect(&series, &config)?;
    let options = ReportOptions {
        debug: cli.debug,
        precision: cli.precision,
    };
    let stdout = io::stdout();
    write_report(&mut stdout.lock(), &detection, &options).map_err(|source| BurstError::Io {
        path: PathBuf::from("<stdout>"),
        source,
    })
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = ?err, "detection failed");
            eprintln!("burst: {err}");
            ExitCode::FAILURE
        }
    }
}
