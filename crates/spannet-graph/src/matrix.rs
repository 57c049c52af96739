use spannet_core::{ErrorInfo, Point, SpanError};

use crate::geometry::distance;
use crate::hash::EdgeSetKey;
use crate::ids::node_index;

/// Renders an edge set as an `N×N` symmetric adjacency matrix with `0.0`
/// where no edge exists and the Euclidean weight elsewhere.
pub fn adjacency_matrix(
    edges: &EdgeSetKey,
    coordinates: &[Point],
) -> Result<Vec<Vec<f64>>, SpanError> {
    let n = coordinates.len();
    let mut matrix = vec![vec![0.0; n]; n];
    for edge in edges.edges() {
        let (u, v) = edge.endpoints();
        let (row, col) = (node_index(u), node_index(v));
        if row >= n || col >= n {
            return Err(SpanError::Input(
                ErrorInfo::new("edge-out-of-range", "edge references an unknown node")
                    .with_context("u", u.as_raw().to_string())
                    .with_context("v", v.as_raw().to_string())
                    .with_context("nodes", n.to_string()),
            ));
        }
        let weight = distance(coordinates[row], coordinates[col]);
        matrix[row][col] = weight;
        matrix[col][row] = weight;
    }
    Ok(matrix)
}
