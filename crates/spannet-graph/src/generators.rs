use spannet_core::{ErrorInfo, Point, SpanError};

use crate::graph::GeoGraph;
use crate::hash::EdgeSetKey;
use crate::ids::make_node;

/// Builds the initial chain state: a path graph linking node `i` to
/// `i - 1` for every `i > 0`, in coordinate input order.
pub fn path_graph(node_count: usize, coordinates: &[Point]) -> Result<GeoGraph, SpanError> {
    if node_count == 0 {
        return Err(SpanError::Input(ErrorInfo::new(
            "empty-graph",
            "a chain needs at least one node",
        )));
    }
    if coordinates.len() != node_count {
        return Err(SpanError::Input(
            ErrorInfo::new(
                "coordinate-count-mismatch",
                "coordinate list does not match the node count",
            )
            .with_context("nodes", node_count.to_string())
            .with_context("coordinates", coordinates.len().to_string()),
        ));
    }

    let mut graph = GeoGraph::new();
    for (index, point) in coordinates.iter().enumerate() {
        let node = graph.add_node(*point);
        if index > 0 {
            graph.add_edge(make_node(index - 1), node)?;
        }
    }
    Ok(graph)
}

/// Rebuilds a graph from a canonical edge set over the given coordinates.
pub fn from_edge_set(edges: &EdgeSetKey, coordinates: &[Point]) -> Result<GeoGraph, SpanError> {
    let mut graph = GeoGraph::new();
    for point in coordinates {
        graph.add_node(*point);
    }
    for edge in edges.edges() {
        let (u, v) = edge.endpoints();
        graph.add_edge(u, v)?;
    }
    Ok(graph)
}
