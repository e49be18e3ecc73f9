//! `snz balance` — structural balance check.

use std::collections::BTreeSet;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;
use signetzoo::balance::{BalanceReport, is_balanced};

use crate::cmd::load_graph;
use crate::output::{OutputMode, Report, emit};

/// Arguments for `snz balance`.
#[derive(Args, Debug)]
pub struct BalanceArgs {
    /// Edge-list file (`source target weight` per line).
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Report clusters, balance strength and the two-camp split.
    #[arg(long)]
    pub meta: bool,
}

fn join(ids: &BTreeSet<String>) -> String {
    ids.iter().map(String::as_str).collect::<Vec<_>>().join(" ")
}

impl Report for BalanceReport {
    fn write_human(&self, mode: OutputMode, w: &mut dyn Write) -> io::Result<()> {
        mode.heading(w, "Structural balance")?;
        mode.field(w, "balanced", self.balanced)?;
        let Some(meta) = &self.metadata else {
            return Ok(());
        };
        mode.field(w, "strength", meta.strength.as_str())?;
        mode.field(w, "clusters", meta.cluster_count)?;
        for (i, members) in meta.clusters.iter().enumerate() {
            mode.field(w, &format!("cluster {i}"), join(members))?;
        }
        if let Some(split) = &meta.possible_split {
            mode.field(w, "left", join(&split.left))?;
            mode.field(w, "right", join(&split.right))?;
        }
        Ok(())
    }
}

/// Execute `snz balance`.
pub fn run_balance(args: &BalanceArgs, output: OutputMode) -> anyhow::Result<()> {
    let graph = load_graph(&args.input)?;
    emit(output, &is_balanced(&graph, args.meta)?)
}
