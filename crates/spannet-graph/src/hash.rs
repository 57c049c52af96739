use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use spannet_core::EdgeKey;

use crate::graph::GeoGraph;

/// Canonical, order-independent representation of a graph's edge set.
///
/// Two graphs over the same node set share a key exactly when they share a
/// topology, which makes the key usable for visitation counting.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeSetKey(Vec<EdgeKey>);

impl EdgeSetKey {
    /// Extracts the canonical key for a graph's current topology.
    pub fn from_graph(graph: &GeoGraph) -> Self {
        let mut edges: Vec<EdgeKey> = graph.edges().collect();
        edges.sort();
        Self(edges)
    }

    /// Edges in canonical ascending order.
    pub fn edges(&self) -> &[EdgeKey] {
        &self.0
    }

    /// Number of edges in the set.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the set holds no edges.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Computes the canonical structural hash for the provided graph.
///
/// Stable under edge insertion order; used in run summaries and
/// determinism tests.
pub fn canonical_hash(graph: &GeoGraph) -> String {
    let mut hasher = Sha256::new();
    hasher.update((graph.node_count() as u64).to_le_bytes());
    let key = EdgeSetKey::from_graph(graph);
    hasher.update((key.len() as u64).to_le_bytes());
    for edge in key.edges() {
        let (u, v) = edge.endpoints();
        hasher.update(u.as_raw().to_le_bytes());
        hasher.update(v.as_raw().to_le_bytes());
    }
    format!("{:x}", hasher.finalize())
}
