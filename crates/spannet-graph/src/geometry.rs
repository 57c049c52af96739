use spannet_core::Point;

/// Euclidean distance between two embedded points.
///
/// Symmetric by construction: `distance(a, b) == distance(b, a)`.
pub fn distance(a: Point, b: Point) -> f64 {
    ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
}
