use rand::Rng;
use serde::{Deserialize, Serialize};
use spannet_core::{EdgeKey, ErrorInfo, RngHandle, SpanError};
use spannet_graph::{is_bridge, GeoGraph};

/// Kind of move performed by the sampler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    /// Birth move: link one currently unconnected node pair.
    Addition,
    /// Death move: remove one non-bridge edge.
    Deletion,
}

impl MoveKind {
    /// Stable label used in descriptions and artefacts.
    pub fn as_str(&self) -> &'static str {
        match self {
            MoveKind::Addition => "edge-addition",
            MoveKind::Deletion => "edge-deletion",
        }
    }
}

/// Result of a birth/death proposal.
#[derive(Debug, Clone)]
pub struct GraphMoveProposal {
    /// Candidate graph produced by the move; an independent clone of the
    /// input with exactly one edge added or removed.
    pub candidate: GeoGraph,
    /// Move direction that produced the candidate.
    pub kind: MoveKind,
    /// The edge added or removed.
    pub edge: EdgeKey,
    /// Probability of having proposed this candidate from the input state.
    pub forward_prob: f64,
    /// Probability of proposing the input state back from the candidate.
    pub reverse_prob: f64,
    /// Human readable description for debugging.
    pub description: String,
}

/// All node pairs `(i, j), i < j` with no existing edge.
pub fn addable_pairs(graph: &GeoGraph) -> Vec<EdgeKey> {
    let nodes: Vec<_> = graph.nodes().collect();
    let mut pairs = Vec::new();
    for (index, &u) in nodes.iter().enumerate() {
        for &v in &nodes[index + 1..] {
            if !graph.has_edge(u, v) {
                pairs.push(EdgeKey::new(u, v));
            }
        }
    }
    pairs
}

/// Edges whose removal keeps the graph connected.
pub fn deletable_edges(graph: &GeoGraph) -> Result<Vec<EdgeKey>, SpanError> {
    let mut edges = Vec::new();
    for edge in graph.edges() {
        let (u, v) = edge.endpoints();
        if !is_bridge(graph, u, v)? {
            edges.push(edge);
        }
    }
    Ok(edges)
}

/// Uniform proposal probability of each specific addition. Undefined on a
/// complete graph; the move-kind guard keeps callers out of that state.
pub fn q_addition(graph: &GeoGraph) -> Result<f64, SpanError> {
    uniform_density(
        addable_pairs(graph).len(),
        "empty-addition-space",
        "graph is complete; no edge can be added",
    )
}

/// Uniform proposal probability of each specific deletion. Undefined on a
/// spanning tree, where every edge is a bridge.
pub fn q_deletion(graph: &GeoGraph) -> Result<f64, SpanError> {
    uniform_density(
        deletable_edges(graph)?.len(),
        "empty-deletion-space",
        "every edge is a bridge; no edge can be removed",
    )
}

fn uniform_density(count: usize, code: &str, message: &str) -> Result<f64, SpanError> {
    if count == 0 {
        return Err(SpanError::Numeric(ErrorInfo::new(code, message)));
    }
    Ok(1.0 / count as f64)
}

/// Decides between addition and deletion for the next transition.
///
/// Forced at the edge-count extremes: a complete graph can only lose an
/// edge and a spanning tree can only gain one. Without this guard the
/// proposal densities divide by zero.
pub fn choose_move_kind(graph: &GeoGraph, rng: &mut RngHandle) -> MoveKind {
    let edges = graph.edge_count();
    if edges == graph.complete_edge_count() {
        return MoveKind::Deletion;
    }
    if edges == graph.node_count() - 1 {
        return MoveKind::Addition;
    }
    if rng.gen::<f64>() > 0.5 {
        MoveKind::Addition
    } else {
        MoveKind::Deletion
    }
}

/// Clones the graph and links one uniformly chosen missing pair.
pub fn propose_addition(
    graph: &GeoGraph,
    rng: &mut RngHandle,
) -> Result<GraphMoveProposal, SpanError> {
    let pairs = addable_pairs(graph);
    let forward_prob = uniform_density(
        pairs.len(),
        "empty-addition-space",
        "graph is complete; no edge can be added",
    )?;
    let edge = pairs[rng.gen_range(0..pairs.len())];
    let (u, v) = edge.endpoints();

    let mut candidate = graph.clone();
    candidate.add_edge(u, v)?;
    let reverse_prob = q_deletion(&candidate)?;

    Ok(GraphMoveProposal {
        candidate,
        kind: MoveKind::Addition,
        edge,
        forward_prob,
        reverse_prob,
        description: format!(
            "{}:{}-{}",
            MoveKind::Addition.as_str(),
            u.as_raw(),
            v.as_raw()
        ),
    })
}

/// Clones the graph and removes one uniformly chosen non-bridge edge.
pub fn propose_deletion(
    graph: &GeoGraph,
    rng: &mut RngHandle,
) -> Result<GraphMoveProposal, SpanError> {
    let deletable = deletable_edges(graph)?;
    let forward_prob = uniform_density(
        deletable.len(),
        "empty-deletion-space",
        "every edge is a bridge; no edge can be removed",
    )?;
    let edge = deletable[rng.gen_range(0..deletable.len())];
    let (u, v) = edge.endpoints();

    let mut candidate = graph.clone();
    candidate.remove_edge(u, v)?;
    let reverse_prob = q_addition(&candidate)?;

    Ok(GraphMoveProposal {
        candidate,
        kind: MoveKind::Deletion,
        edge,
        forward_prob,
        reverse_prob,
        description: format!(
            "{}:{}-{}",
            MoveKind::Deletion.as_str(),
            u.as_raw(),
            v.as_raw()
        ),
    })
}

/// Probability that the sampler, positioned at `from`, would have proposed
/// `to`: the deletion density when `from` has strictly more edges, the
/// addition density otherwise.
pub fn proposal_density(from: &GeoGraph, to: &GeoGraph) -> Result<f64, SpanError> {
    if from.edge_count() > to.edge_count() {
        q_deletion(from)
    } else {
        q_addition(from)
    }
}
