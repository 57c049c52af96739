#![deny(missing_docs)]

//! Core contracts and shared infrastructure for the spannet sampler:
//! node/edge identifiers, the spatial network contract consumed by the
//! chain kernel, structured errors and the deterministic RNG policy.

use serde::{Deserialize, Serialize};

pub mod errors;
pub mod rng;

pub use errors::{ErrorInfo, SpanError};
pub use rng::{derive_substream_seed, RngHandle};

/// Identifier for a node within a [`SpatialNetwork`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(u64);

impl NodeId {
    /// Creates a new identifier from its raw integer representation.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw integer representation of the identifier.
    pub fn as_raw(&self) -> u64 {
        self.0
    }
}

/// Unordered node pair identifying an undirected edge.
///
/// The pair is canonicalized on construction so that `(u, v)` and `(v, u)`
/// compare equal, hash identically and sort deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeKey {
    lo: NodeId,
    hi: NodeId,
}

impl EdgeKey {
    /// Builds the canonical key for the edge between `u` and `v`.
    pub fn new(u: NodeId, v: NodeId) -> Self {
        if u <= v {
            Self { lo: u, hi: v }
        } else {
            Self { lo: v, hi: u }
        }
    }

    /// Returns the endpoints in canonical (ascending) order.
    pub fn endpoints(&self) -> (NodeId, NodeId) {
        (self.lo, self.hi)
    }
}

/// Immutable 2-D coordinate assigned to a node at chain initialization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Creates a point from its coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Structural contract for spatially embedded undirected networks.
///
/// The sampling kernel consumes graphs exclusively through this interface;
/// edge weights are always derived from the endpoint coordinates, never
/// stored independently.
pub trait SpatialNetwork: Send + Sync {
    /// Returns an iterator over all node identifiers.
    fn nodes(&self) -> Box<dyn ExactSizeIterator<Item = NodeId> + '_>;

    /// Returns an iterator over all edges in canonical order.
    fn edges(&self) -> Box<dyn Iterator<Item = EdgeKey> + '_>;

    /// Adds a node embedded at the given coordinate.
    fn add_node(&mut self, point: Point) -> NodeId;

    /// Adds the edge between `u` and `v`; its weight is the Euclidean
    /// distance between the endpoint coordinates.
    fn add_edge(&mut self, u: NodeId, v: NodeId) -> Result<EdgeKey, SpanError>;

    /// Removes the edge between `u` and `v`.
    fn remove_edge(&mut self, u: NodeId, v: NodeId) -> Result<(), SpanError>;

    /// Returns the neighbors of a node in ascending id order.
    fn neighbors(&self, node: NodeId) -> Result<Box<dyn Iterator<Item = NodeId> + '_>, SpanError>;

    /// Returns the Euclidean weight of an existing edge.
    fn edge_weight(&self, u: NodeId, v: NodeId) -> Result<f64, SpanError>;

    /// Returns the weighted shortest-path length from `source` to `target`.
    fn shortest_path_length(&self, source: NodeId, target: NodeId) -> Result<f64, SpanError>;

    /// True when some path connects `source` to `target`.
    fn has_path(&self, source: NodeId, target: NodeId) -> Result<bool, SpanError>;
}
