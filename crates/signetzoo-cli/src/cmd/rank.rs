//! `snz rank` — node ranking.

use std::collections::HashMap;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Args, ValueEnum};
use serde::Serialize;
use signetzoo::SignedGraph;
use signetzoo::ranking::{
    ExponentialRankConfig, PageRankConfig, exponential_rank, fans_minus_freaks, negative_rank,
    pagerank,
};
use tracing::debug;

use crate::cmd::load_graph;
use crate::config::SnzConfig;
use crate::output::{OutputMode, Report, emit, fmt_score};

/// Ranking algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RankAlgorithm {
    /// PageRank over edge magnitudes.
    Pagerank,
    /// PageRank over signed weights.
    SignedPagerank,
    /// PageRank over symmetrized edge magnitudes.
    SymPagerank,
    /// Signed PageRank minus beta times unsigned PageRank.
    NegativeRank,
    /// Exponential Rank.
    ExpRank,
    /// Positive minus negative out-edges.
    FansMinusFreaks,
}

impl RankAlgorithm {
    /// Command-line spelling.
    const fn name(self) -> &'static str {
        match self {
            Self::Pagerank => "pagerank",
            Self::SignedPagerank => "signed-pagerank",
            Self::SymPagerank => "sym-pagerank",
            Self::NegativeRank => "negative-rank",
            Self::ExpRank => "exp-rank",
            Self::FansMinusFreaks => "fans-minus-freaks",
        }
    }
}

/// Arguments for `snz rank`.
#[derive(Args, Debug)]
pub struct RankArgs {
    /// Edge-list file (`source target weight` per line).
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Algorithms to run, in order. Repeat the flag or separate with commas.
    #[arg(
        short,
        long = "algorithm",
        value_enum,
        value_delimiter = ',',
        default_value = "pagerank"
    )]
    pub algorithms: Vec<RankAlgorithm>,

    /// PageRank damping factor.
    #[arg(long)]
    pub alpha: Option<f64>,

    /// Iteration budget (PageRank variants and Exponential Rank).
    #[arg(long)]
    pub max_iter: Option<usize>,

    /// PageRank per-node convergence tolerance.
    #[arg(long)]
    pub tolerance: Option<f64>,

    /// Negative Rank penalty on unsigned PageRank.
    #[arg(long)]
    pub beta: Option<f64>,

    /// Exponential Rank softmax temperature.
    #[arg(long)]
    pub mu: Option<f64>,

    /// Only print the N highest-ranked nodes.
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct RankEntry {
    pub node: String,
    pub score: f64,
}

/// Scores from one algorithm.
#[derive(Debug, Serialize)]
pub struct Ranking {
    pub algorithm: RankAlgorithm,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iterations: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub converged: Option<bool>,
    pub scores: Vec<RankEntry>,
}

/// Report payload for `snz rank`: one [`Ranking`] per requested algorithm.
#[derive(Debug, Serialize)]
pub struct RankReport {
    pub rankings: Vec<Ranking>,
}

impl Report for RankReport {
    fn write_human(&self, mode: OutputMode, w: &mut dyn Write) -> io::Result<()> {
        for ranking in &self.rankings {
            if mode.is_pretty() {
                mode.heading(w, &format!("Ranking ({})", ranking.algorithm.name()))?;
                if let (Some(iterations), Some(converged)) = (ranking.iterations, ranking.converged)
                {
                    writeln!(w, "iterations: {iterations}  converged: {converged}")?;
                }
                for (i, entry) in ranking.scores.iter().enumerate() {
                    writeln!(w, "{:>4}  {:<24} {:>12}", i + 1, entry.node, fmt_score(entry.score))?;
                }
                writeln!(w)?;
            } else {
                for entry in &ranking.scores {
                    let name = ranking.algorithm.name();
                    writeln!(w, "{name}\t{}\t{}", entry.node, entry.score)?;
                }
            }
        }
        Ok(())
    }
}

impl RankArgs {
    /// File defaults with command-line overrides applied.
    fn pagerank_config(&self, algorithm: RankAlgorithm, config: &SnzConfig) -> PageRankConfig {
        let mut pr = config.pagerank;
        if let Some(alpha) = self.alpha {
            pr.alpha = alpha;
        }
        if let Some(max_iter) = self.max_iter {
            pr.max_iter = max_iter;
        }
        if let Some(tolerance) = self.tolerance {
            pr.tolerance = tolerance;
        }
        match algorithm {
            RankAlgorithm::Pagerank => PageRankConfig {
                signed: false,
                symmetric: false,
                ..pr
            },
            RankAlgorithm::SymPagerank => PageRankConfig {
                signed: false,
                symmetric: true,
                ..pr
            },
            _ => PageRankConfig {
                signed: true,
                symmetric: false,
                ..pr
            },
        }
    }

    fn exponential_config(&self, config: &SnzConfig) -> ExponentialRankConfig {
        ExponentialRankConfig {
            mu: self.mu.unwrap_or(config.exponential_rank.mu),
            max_iter: self.max_iter.unwrap_or(config.exponential_rank.max_iter),
        }
    }
}

/// Sort descending by score, ties by node id, and apply `top`.
fn ranked(scores: HashMap<String, f64>, top: Option<usize>) -> Vec<RankEntry> {
    let mut entries: Vec<RankEntry> = scores
        .into_iter()
        .map(|(node, score)| RankEntry { node, score })
        .collect();
    entries.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.node.cmp(&b.node)));
    if let Some(n) = top {
        entries.truncate(n);
    }
    entries
}

fn run_one(
    graph: &SignedGraph,
    algorithm: RankAlgorithm,
    args: &RankArgs,
    config: &SnzConfig,
) -> anyhow::Result<Ranking> {
    let mut iterations = None;
    let mut converged = None;
    let scores = match algorithm {
        RankAlgorithm::Pagerank | RankAlgorithm::SignedPagerank | RankAlgorithm::SymPagerank => {
            let result = pagerank(graph, &args.pagerank_config(algorithm, config))?;
            iterations = Some(result.iterations);
            converged = Some(result.converged);
            result.scores
        }
        RankAlgorithm::NegativeRank => negative_rank(
            graph,
            args.beta.unwrap_or(config.negative_rank.beta),
            &args.pagerank_config(algorithm, config),
        )?,
        RankAlgorithm::ExpRank => exponential_rank(graph, &args.exponential_config(config))?,
        #[allow(clippy::cast_precision_loss)]
        RankAlgorithm::FansMinusFreaks => fans_minus_freaks(graph)
            .into_iter()
            .map(|(id, s)| (id, s as f64))
            .collect(),
    };

    Ok(Ranking {
        algorithm,
        iterations,
        converged,
        scores: ranked(scores, args.top),
    })
}

/// Execute `snz rank`.
pub fn run_rank(args: &RankArgs, config: &SnzConfig, output: OutputMode) -> anyhow::Result<()> {
    let graph = load_graph(&args.input)?;
    let rankings = args
        .algorithms
        .iter()
        .map(|&algorithm| {
            debug!(?algorithm, "ranking");
            run_one(&graph, algorithm, args, config)
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    emit(output, &RankReport { rankings })
}
