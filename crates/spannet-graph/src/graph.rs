use std::collections::{BTreeMap, BTreeSet, VecDeque};

use spannet_core::{EdgeKey, ErrorInfo, NodeId, Point, SpanError, SpatialNetwork};

use crate::geometry::distance;
use crate::ids::{make_node, node_index};

/// Undirected graph over a fixed set of spatially embedded nodes.
///
/// Edge weights are always recomputed from the endpoint coordinates, so no
/// cached weight can go stale. Adjacency is held in ordered containers to
/// keep every iteration order deterministic. A chain state is never mutated
/// once published: proposals operate on independent clones.
#[derive(Debug, Clone)]
pub struct GeoGraph {
    coordinates: Vec<Point>,
    adjacency: BTreeMap<NodeId, BTreeSet<NodeId>>,
    edge_count: usize,
}

impl GeoGraph {
    /// Creates an empty graph with no nodes.
    pub fn new() -> Self {
        Self {
            coordinates: Vec::new(),
            adjacency: BTreeMap::new(),
            edge_count: 0,
        }
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.coordinates.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Edge count of the complete graph on the same node set.
    pub fn complete_edge_count(&self) -> usize {
        let n = self.coordinates.len();
        n * (n - 1) / 2
    }

    /// Returns the coordinate of a node.
    pub fn point(&self, node: NodeId) -> Result<Point, SpanError> {
        self.require_node(node)?;
        Ok(self.coordinates[node_index(node)])
    }

    /// Euclidean distance between the coordinates of two nodes, whether or
    /// not an edge connects them.
    pub fn node_distance(&self, u: NodeId, v: NodeId) -> Result<f64, SpanError> {
        self.require_node(u)?;
        self.require_node(v)?;
        Ok(distance(
            self.coordinates[node_index(u)],
            self.coordinates[node_index(v)],
        ))
    }

    /// Adds a node embedded at the given coordinate.
    pub fn add_node(&mut self, point: Point) -> NodeId {
        let node = make_node(self.coordinates.len());
        self.coordinates.push(point);
        self.adjacency.insert(node, BTreeSet::new());
        node
    }

    /// True when the edge between `u` and `v` exists. Unknown nodes have no
    /// edges.
    pub fn has_edge(&self, u: NodeId, v: NodeId) -> bool {
        self.adjacency
            .get(&u)
            .map(|neighbors| neighbors.contains(&v))
            .unwrap_or(false)
    }

    /// Adds the edge between `u` and `v`. Self loops and duplicate edges are
    /// rejected.
    pub fn add_edge(&mut self, u: NodeId, v: NodeId) -> Result<EdgeKey, SpanError> {
        self.require_node(u)?;
        self.require_node(v)?;
        if u == v {
            return Err(SpanError::Graph(
                ErrorInfo::new("self-loop", "cannot link a node to itself")
                    .with_context("node", u.as_raw().to_string()),
            ));
        }
        if self.has_edge(u, v) {
            return Err(SpanError::Graph(
                ErrorInfo::new("duplicate-edge", "edge already present")
                    .with_context("u", u.as_raw().to_string())
                    .with_context("v", v.as_raw().to_string()),
            ));
        }
        self.adjacency.entry(u).or_default().insert(v);
        self.adjacency.entry(v).or_default().insert(u);
        self.edge_count += 1;
        Ok(EdgeKey::new(u, v))
    }

    /// Removes the edge between `u` and `v`.
    pub fn remove_edge(&mut self, u: NodeId, v: NodeId) -> Result<(), SpanError> {
        self.require_node(u)?;
        self.require_node(v)?;
        if !self.has_edge(u, v) {
            return Err(SpanError::Graph(
                ErrorInfo::new("missing-edge", "edge not present")
                    .with_context("u", u.as_raw().to_string())
                    .with_context("v", v.as_raw().to_string()),
            ));
        }
        self.adjacency.entry(u).or_default().remove(&v);
        self.adjacency.entry(v).or_default().remove(&u);
        self.edge_count -= 1;
        Ok(())
    }

    /// Iterates all node identifiers in ascending order.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = NodeId> {
        (0..self.coordinates.len()).map(make_node)
    }

    /// Iterates all edges in canonical ascending order.
    pub fn edges(&self) -> impl Iterator<Item = EdgeKey> + '_ {
        self.adjacency.iter().flat_map(|(&u, neighbors)| {
            neighbors
                .iter()
                .copied()
                .filter(move |&v| u < v)
                .map(move |v| EdgeKey::new(u, v))
        })
    }

    /// Neighbors of a node in ascending id order.
    pub fn neighbors(
        &self,
        node: NodeId,
    ) -> Result<impl Iterator<Item = NodeId> + '_, SpanError> {
        self.require_node(node)?;
        Ok(self
            .adjacency
            .get(&node)
            .into_iter()
            .flat_map(|neighbors| neighbors.iter().copied()))
    }

    /// Degree of a node.
    pub fn degree(&self, node: NodeId) -> Result<usize, SpanError> {
        self.require_node(node)?;
        Ok(self
            .adjacency
            .get(&node)
            .map(|neighbors| neighbors.len())
            .unwrap_or(0))
    }

    /// Euclidean weight of an existing edge.
    pub fn edge_weight(&self, u: NodeId, v: NodeId) -> Result<f64, SpanError> {
        self.require_node(u)?;
        self.require_node(v)?;
        if !self.has_edge(u, v) {
            return Err(SpanError::Graph(
                ErrorInfo::new("missing-edge", "edge not present")
                    .with_context("u", u.as_raw().to_string())
                    .with_context("v", v.as_raw().to_string()),
            ));
        }
        self.node_distance(u, v)
    }

    /// Breadth-first reachability between two nodes.
    pub fn has_path(&self, source: NodeId, target: NodeId) -> Result<bool, SpanError> {
        self.require_node(source)?;
        self.require_node(target)?;
        if source == target {
            return Ok(true);
        }
        let mut seen = BTreeSet::new();
        seen.insert(source);
        let mut queue = VecDeque::from([source]);
        while let Some(current) = queue.pop_front() {
            if let Some(neighbors) = self.adjacency.get(&current) {
                for &next in neighbors {
                    if next == target {
                        return Ok(true);
                    }
                    if seen.insert(next) {
                        queue.push_back(next);
                    }
                }
            }
        }
        Ok(false)
    }

    /// Weighted shortest-path length from `source` to `target` (Dijkstra
    /// over Euclidean edge weights). Fails when no path exists.
    pub fn shortest_path_length(
        &self,
        source: NodeId,
        target: NodeId,
    ) -> Result<f64, SpanError> {
        self.require_node(source)?;
        self.require_node(target)?;
        let n = self.coordinates.len();
        let target_index = node_index(target);
        let mut dist = vec![f64::INFINITY; n];
        let mut settled = vec![false; n];
        dist[node_index(source)] = 0.0;

        for _ in 0..n {
            let mut nearest: Option<usize> = None;
            for idx in 0..n {
                if settled[idx] || !dist[idx].is_finite() {
                    continue;
                }
                match nearest {
                    Some(best) if dist[best] <= dist[idx] => {}
                    _ => nearest = Some(idx),
                }
            }
            let Some(current) = nearest else {
                break;
            };
            if current == target_index {
                return Ok(dist[current]);
            }
            settled[current] = true;
            if let Some(neighbors) = self.adjacency.get(&make_node(current)) {
                for &next in neighbors {
                    let next_index = node_index(next);
                    let relaxed = dist[current]
                        + distance(self.coordinates[current], self.coordinates[next_index]);
                    if relaxed < dist[next_index] {
                        dist[next_index] = relaxed;
                    }
                }
            }
        }

        Err(SpanError::Graph(
            ErrorInfo::new("no-path", "target unreachable from source")
                .with_context("source", source.as_raw().to_string())
                .with_context("target", target.as_raw().to_string()),
        ))
    }

    fn require_node(&self, node: NodeId) -> Result<(), SpanError> {
        if node_index(node) >= self.coordinates.len() {
            return Err(SpanError::Graph(
                ErrorInfo::new("unknown-node", "node id out of range")
                    .with_context("node", node.as_raw().to_string())
                    .with_context("nodes", self.coordinates.len().to_string()),
            ));
        }
        Ok(())
    }
}

impl Default for GeoGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SpatialNetwork for GeoGraph {
    fn nodes(&self) -> Box<dyn ExactSizeIterator<Item = NodeId> + '_> {
        Box::new(GeoGraph::nodes(self))
    }

    fn edges(&self) -> Box<dyn Iterator<Item = EdgeKey> + '_> {
        Box::new(GeoGraph::edges(self))
    }

    fn add_node(&mut self, point: Point) -> NodeId {
        GeoGraph::add_node(self, point)
    }

    fn add_edge(&mut self, u: NodeId, v: NodeId) -> Result<EdgeKey, SpanError> {
        GeoGraph::add_edge(self, u, v)
    }

    fn remove_edge(&mut self, u: NodeId, v: NodeId) -> Result<(), SpanError> {
        GeoGraph::remove_edge(self, u, v)
    }

    fn neighbors(&self, node: NodeId) -> Result<Box<dyn Iterator<Item = NodeId> + '_>, SpanError> {
        Ok(Box::new(GeoGraph::neighbors(self, node)?))
    }

    fn edge_weight(&self, u: NodeId, v: NodeId) -> Result<f64, SpanError> {
        GeoGraph::edge_weight(self, u, v)
    }

    fn shortest_path_length(&self, source: NodeId, target: NodeId) -> Result<f64, SpanError> {
        GeoGraph::shortest_path_length(self, source, target)
    }

    fn has_path(&self, source: NodeId, target: NodeId) -> Result<bool, SpanError> {
        GeoGraph::has_path(self, source, target)
    }
}
