use spannet_core::{NodeId, SpanError};

use crate::graph::GeoGraph;

/// True when every node is reachable from the lowest node id.
///
/// Short-circuits on the first unreachable node. An empty graph is
/// vacuously connected.
pub fn is_connected(graph: &GeoGraph) -> Result<bool, SpanError> {
    let mut nodes = graph.nodes();
    let Some(root) = nodes.next() else {
        return Ok(true);
    };
    for node in nodes {
        if !graph.has_path(root, node)? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// True when removing the edge `(u, v)` disconnects the graph.
///
/// Runs against a discarded probe copy, so the caller's graph is never
/// touched and there is no edge to restore on any exit path.
pub fn is_bridge(graph: &GeoGraph, u: NodeId, v: NodeId) -> Result<bool, SpanError> {
    let mut probe = graph.clone();
    probe.remove_edge(u, v)?;
    Ok(!is_connected(&probe)?)
}
