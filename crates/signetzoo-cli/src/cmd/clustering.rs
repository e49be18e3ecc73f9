//! `snz clustering` — clustering coefficients.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;
use signetzoo::clustering::ClusteringCoefficients;

use crate::cmd::load_graph;
use crate::output::{OutputMode, Report, emit, fmt_score};

/// Arguments for `snz clustering`.
#[derive(Args, Debug)]
pub struct ClusteringArgs {
    /// Edge-list file (`source target weight` per line).
    #[arg(value_name = "FILE")]
    pub input: PathBuf,
}

impl Report for ClusteringCoefficients {
    fn write_human(&self, mode: OutputMode, w: &mut dyn Write) -> io::Result<()> {
        mode.heading(w, "Clustering coefficients")?;
        mode.field(w, "unsigned", fmt_score(self.unsigned))?;
        mode.field(w, "signed", fmt_score(self.signed))?;
        let relative = self.relative.map_or_else(|| "undefined".to_string(), fmt_score);
        mode.field(w, "relative", relative)
    }
}

/// Execute `snz clustering`.
pub fn run_clustering(args: &ClusteringArgs, output: OutputMode) -> anyhow::Result<()> {
    let graph = load_graph(&args.input)?;
    emit(output, &ClusteringCoefficients::compute(&graph))
}
