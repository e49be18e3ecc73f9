pub mod balance;
pub mod clustering;
pub mod predict;
pub mod rank;
pub mod stats;

use std::path::Path;

use anyhow::Result;
use signetzoo::SignedGraph;
use tracing::info;

use crate::load::load_edge_list;

/// Load an edge-list file into a graph.
pub fn load_graph(path: &Path) -> Result<SignedGraph> {
    let graph = load_edge_list(path)?.to_graph()?;
    info!(
        path = %path.display(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "loaded graph"
    );
    Ok(graph)
}
