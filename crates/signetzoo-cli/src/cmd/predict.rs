//! `snz predict` — link-sign prediction against held-out edges.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Args, ValueEnum};
use serde::Serialize;
use signetzoo::SignedGraph;
use signetzoo::prediction::{
    ConfusionMatrix, DefaultSign, Sign, SpectralConfig, SpectralMethod, majority_prediction,
    reciprocity_prediction, spectral_prediction, transitive_prediction,
};
use tracing::{debug, info};

use crate::cmd::load_graph;
use crate::config::SnzConfig;
use crate::load::{LabelledPairs, load_edge_list, resolve_test_pairs};
use crate::output::{OutputMode, Report, emit, fmt_score};

/// Prediction algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PredictAlgorithm {
    /// Training graph's dominant sign for every pair.
    Majority,
    /// Sign of the reverse edge, else the default.
    Reciprocity,
    /// Sign of the weighted 2-path count, else the default.
    Transitive,
    /// Truncated SVD of the adjacency matrix.
    Adjacency,
    /// Leading eigenpairs of the symmetric adjacency matrix.
    SymAdjacency,
    /// Truncated SVD of exp(A).
    ExpAdjacency,
    /// Truncated SVD of exp(A + Aᵗ).
    ExpSymAdjacency,
}

impl PredictAlgorithm {
    /// Command-line spelling.
    const fn name(self) -> &'static str {
        match self {
            Self::Majority => "majority",
            Self::Reciprocity => "reciprocity",
            Self::Transitive => "transitive",
            Self::Adjacency => "adjacency",
            Self::SymAdjacency => "sym-adjacency",
            Self::ExpAdjacency => "exp-adjacency",
            Self::ExpSymAdjacency => "exp-sym-adjacency",
        }
    }

    const fn spectral_method(self) -> Option<SpectralMethod> {
        match self {
            Self::Adjacency => Some(SpectralMethod::Adjacency),
            Self::SymAdjacency => Some(SpectralMethod::SymmetricAdjacency),
            Self::ExpAdjacency => Some(SpectralMethod::ExponentialAdjacency),
            Self::ExpSymAdjacency => Some(SpectralMethod::ExponentialSymmetricAdjacency),
            Self::Majority | Self::Reciprocity | Self::Transitive => None,
        }
    }
}

/// Arguments for `snz predict`.
#[derive(Args, Debug)]
pub struct PredictArgs {
    /// Training edge list.
    #[arg(long, value_name = "FILE", requires = "test", conflicts_with = "input")]
    pub train: Option<PathBuf>,

    /// Held-out edge list whose signs are predicted.
    #[arg(long, value_name = "FILE", requires = "train")]
    pub test: Option<PathBuf>,

    /// Single edge list split into training and held-out edges.
    #[arg(long, value_name = "FILE", requires = "split", required_unless_present = "train")]
    pub input: Option<PathBuf>,

    /// Fraction of `--input` edges used for training, in (0, 1).
    #[arg(long, value_name = "FRACTION", requires = "input")]
    pub split: Option<f64>,

    /// Shuffle seed for `--split`.
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Algorithms to run, in order. Repeat the flag or separate with commas.
    #[arg(
        short,
        long = "algorithm",
        value_enum,
        value_delimiter = ',',
        default_value = "majority"
    )]
    pub algorithms: Vec<PredictAlgorithm>,

    /// Leading components for spectral methods; each spectral algorithm runs
    /// once per value. Repeat the flag or separate with commas.
    #[arg(long = "dim", value_name = "N", value_delimiter = ',')]
    pub dims: Vec<usize>,

    /// Fallback sign: positive, negative or majority.
    #[arg(long, value_name = "SIGN")]
    pub default: Option<DefaultSign>,
}

/// Confusion matrix of one algorithm (and `dim`, for spectral methods).
#[derive(Debug, Serialize)]
pub struct PredictRun {
    pub algorithm: PredictAlgorithm,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dim: Option<usize>,
    pub confusion: ConfusionMatrix,
    pub accuracy: Option<f64>,
}

/// Report payload for `snz predict`.
#[derive(Debug, Serialize)]
pub struct PredictReport {
    pub train_edges: usize,
    pub test_pairs: usize,
    pub runs: Vec<PredictRun>,
}

impl Report for PredictReport {
    fn write_human(&self, mode: OutputMode, w: &mut dyn Write) -> io::Result<()> {
        mode.heading(w, "Link prediction")?;
        mode.field(w, "train_edges", self.train_edges)?;
        mode.field(w, "test_pairs", self.test_pairs)?;
        for run in &self.runs {
            let label = match run.dim {
                Some(dim) => format!("{} dim={dim}", run.algorithm.name()),
                None => run.algorithm.name().to_string(),
            };
            let c = &run.confusion;
            let accuracy = run.accuracy.map_or_else(|| "undefined".to_string(), fmt_score);
            if mode.is_pretty() {
                writeln!(w)?;
                writeln!(w, "{label}")?;
                writeln!(w, "  tp {:>8}  fn {:>8}", c.tp, c.fn_)?;
                writeln!(w, "  fp {:>8}  tn {:>8}", c.fp, c.tn)?;
                writeln!(w, "  accuracy {accuracy}")?;
            } else {
                writeln!(w, "{label}\t{}\t{}\t{}\t{}\t{accuracy}", c.tp, c.tn, c.fp, c.fn_)?;
            }
        }
        Ok(())
    }
}

/// Training graph and labelled held-out pairs.
fn prepare(args: &PredictArgs) -> anyhow::Result<(SignedGraph, LabelledPairs)> {
    match (&args.train, &args.test, &args.input, args.split) {
        (Some(train), Some(test), None, _) => {
            let graph = load_graph(train)?;
            let held_out = load_edge_list(test)?;
            let pairs = resolve_test_pairs(&graph, &held_out.edges);
            Ok((graph, pairs))
        }
        (None, None, Some(input), Some(fraction)) => {
            let list = load_edge_list(input)?;
            let (graph, held_out) = list
                .split(fraction, args.seed)
                .with_context(|| format!("Failed to split {}", input.display()))?;
            let pairs = resolve_test_pairs(&graph, &held_out);
            Ok((graph, pairs))
        }
        _ => bail!("use either --train FILE --test FILE, or --input FILE --split FRACTION"),
    }
}

/// Predicted signs of `pairs` under one algorithm.
fn predict_signs(
    graph: &SignedGraph,
    pairs: &LabelledPairs,
    algorithm: PredictAlgorithm,
    dim: usize,
    default: DefaultSign,
) -> anyhow::Result<Vec<Sign>> {
    let queries = &pairs.queries;
    let signs = match algorithm {
        PredictAlgorithm::Majority => majority_prediction(graph, queries)?,
        PredictAlgorithm::Reciprocity => reciprocity_prediction(graph, queries, default)?,
        PredictAlgorithm::Transitive => transitive_prediction(graph, queries, default)?
            .into_iter()
            .map(Sign::from_score)
            .collect(),
        spectral => {
            let Some(method) = spectral.spectral_method() else {
                bail!("{} is not a spectral method", spectral.name());
            };
            spectral_prediction(graph, queries, &SpectralConfig { dim, method })
                .with_context(|| format!("{} with dim = {dim}", spectral.name()))?
        }
    };
    Ok(signs)
}

/// Every `(algorithm, dim)` combination to evaluate, in flag order.
fn schedule(args: &PredictArgs, config: &SnzConfig) -> Vec<(PredictAlgorithm, Option<usize>)> {
    let dims = if args.dims.is_empty() {
        vec![config.prediction.dim]
    } else {
        args.dims.clone()
    };
    args.algorithms
        .iter()
        .flat_map(|&algorithm| match algorithm.spectral_method() {
            Some(_) => dims.iter().map(|&d| (algorithm, Some(d))).collect::<Vec<_>>(),
            None => vec![(algorithm, None)],
        })
        .collect()
}

/// Execute `snz predict`.
pub fn run_predict(
    args: &PredictArgs,
    config: &SnzConfig,
    output: OutputMode,
) -> anyhow::Result<()> {
    let (graph, pairs) = prepare(args)?;
    let default = args.default.unwrap_or(config.prediction.default);
    info!(
        train_edges = graph.edge_count(),
        test_pairs = pairs.queries.len(),
        "predicting"
    );

    let mut runs = Vec::new();
    for (algorithm, dim) in schedule(args, config) {
        debug!(algorithm = algorithm.name(), ?dim, "running predictor");
        let predicted = predict_signs(&graph, &pairs, algorithm, dim.unwrap_or(0), default)?;
        let confusion = ConfusionMatrix::from_signs(&pairs.truth, &predicted)?;
        runs.push(PredictRun {
            algorithm,
            dim,
            confusion,
            accuracy: confusion.accuracy(),
        });
    }

    emit(
        output,
        &PredictReport {
            train_edges: graph.edge_count(),
            test_pairs: pairs.queries.len(),
            runs,
        },
    )
}
