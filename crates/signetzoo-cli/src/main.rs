#![forbid(unsafe_code)]

mod cmd;
mod config;
mod load;
mod output;

use clap::{Parser, Subcommand};
use output::OutputMode;
use std::env;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "snz: signed graph analysis",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Output format (overrides the FORMAT env var).
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// TOML file with parameter defaults (default: ./snz.toml if present).
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Derive the output mode from flags and environment.
    fn output_mode(&self) -> OutputMode {
        OutputMode::detect(self.format, self.json)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Adjacency statistics of an edge list",
        after_help = "EXAMPLES:\n    snz stats edges.txt\n\n    # Machine-readable output\n    snz stats edges.txt --json"
    )]
    Stats(cmd::stats::StatsArgs),

    #[command(
        about = "Check structural balance",
        after_help = "EXAMPLES:\n    snz balance edges.txt\n\n    # Include clusters and the two-camp split\n    snz balance edges.txt --meta"
    )]
    Balance(cmd::balance::BalanceArgs),

    #[command(about = "Unsigned, signed and relative clustering coefficients")]
    Clustering(cmd::clustering::ClusteringArgs),

    #[command(
        about = "Rank nodes",
        after_help = "EXAMPLES:\n    snz rank edges.txt --algorithm signed-pagerank --top 10\n\n    snz rank edges.txt --algorithm exp-rank --mu 0.1"
    )]
    Rank(cmd::rank::RankArgs),

    #[command(
        about = "Predict link signs and report a confusion matrix",
        after_help = "EXAMPLES:\n    snz predict --train train.txt --test test.txt --algorithm reciprocity --default majority\n\n    # Hold out 20% of one file\n    snz predict --input edges.txt --split 0.8 --seed 7 --algorithm sym-adjacency --dim 5"
    )]
    Predict(cmd::predict::PredictArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("SNZ_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "signetzoo=debug,snz=debug,info"
        } else {
            "signetzoo=info,warn"
        })
    });

    let format = env::var("SNZ_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let output = cli.output_mode();
    let cwd = env::current_dir()?;

    let command_result = config::load_config(cli.config.as_deref(), &cwd).and_then(|config| {
        match cli.command {
            Commands::Stats(ref args) => cmd::stats::run_stats(args, output),
            Commands::Balance(ref args) => cmd::balance::run_balance(args, output),
            Commands::Clustering(ref args) => cmd::clustering::run_clustering(args, output),
            Commands::Rank(ref args) => cmd::rank::run_rank(args, &config, output),
            Commands::Predict(ref args) => cmd::predict::run_predict(args, &config, output),
        }
    });

    if let Err(err) = command_result {
        output::emit_error(output, &err)?;
        std::process::exit(1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_flag_parses_after_subcommand() {
        let cli = Cli::parse_from(["snz", "stats", "edges.txt", "--json"]);
        assert!(cli.json);
        assert!(matches!(cli.command, Commands::Stats(_)));
    }

    #[test]
    fn config_flag_is_global() {
        let cli = Cli::parse_from(["snz", "clustering", "edges.txt", "--config", "snz.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("snz.toml")));
    }
}
