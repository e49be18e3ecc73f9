//! `snz stats` — adjacency statistics.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use signetzoo::matrix::{AdjacencyMeta, adjacency_matrix_with_meta};

use crate::cmd::load_graph;
use crate::output::{OutputMode, Report, emit, fmt_score};

/// Arguments for `snz stats`.
#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Edge-list file (`source target weight` per line).
    #[arg(value_name = "FILE")]
    pub input: PathBuf,
}

/// Report payload for `snz stats`.
#[derive(Debug, Serialize)]
pub struct StatsReport {
    pub nodes: usize,
    #[serde(flatten)]
    pub meta: AdjacencyMeta,
}

impl Report for StatsReport {
    fn write_human(&self, mode: OutputMode, w: &mut dyn Write) -> io::Result<()> {
        mode.heading(w, "Adjacency statistics")?;
        mode.field(w, "nodes", self.nodes)?;
        mode.field(w, "links", self.meta.links)?;
        mode.field(w, "positive", self.meta.positive)?;
        mode.field(w, "negative", self.meta.negative)?;
        mode.field(w, "density", fmt_score(self.meta.density))?;
        mode.field(w, "average_links", fmt_score(self.meta.average_links))
    }
}

/// Execute `snz stats`.
pub fn run_stats(args: &StatsArgs, output: OutputMode) -> anyhow::Result<()> {
    let graph = load_graph(&args.input)?;
    let (_, meta) = adjacency_matrix_with_meta(&graph);
    emit(
        output,
        &StatsReport {
            nodes: graph.node_count(),
            meta,
        },
    )
}
