use serde::{Deserialize, Serialize};
use spannet_core::{ErrorInfo, NodeId, SpanError};
use spannet_graph::GeoGraph;

use crate::moves::proposal_density;

/// Breakdown of the two cost terms forming the chain energy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyBreakdown {
    /// Total Euclidean edge weight.
    pub edge_cost: f64,
    /// Sum of shortest-path lengths from the source to every node.
    pub path_cost: f64,
    /// Weighted total `cost_weight * edge_cost + path_cost`.
    pub total: f64,
}

/// Computes the energy of a graph. Lower totals are favored by the target
/// distribution.
pub fn score(
    graph: &GeoGraph,
    cost_weight: f64,
    source: NodeId,
) -> Result<EnergyBreakdown, SpanError> {
    let mut edge_cost = 0.0;
    for edge in graph.edges() {
        let (u, v) = edge.endpoints();
        edge_cost += graph.edge_weight(u, v)?;
    }
    let mut path_cost = 0.0;
    for node in graph.nodes() {
        path_cost += graph.shortest_path_length(source, node)?;
    }
    Ok(EnergyBreakdown {
        edge_cost,
        path_cost,
        total: cost_weight * edge_cost + path_cost,
    })
}

/// Target-density ratio `pi(to) / pi(from) = exp((theta_from - theta_to) / t)`.
///
/// Zero temperature is degenerate here; [`acceptance`] special-cases it
/// before this ratio is ever evaluated.
pub fn pi_ratio(
    from: &GeoGraph,
    to: &GeoGraph,
    cost_weight: f64,
    temperature: f64,
    source: NodeId,
) -> Result<f64, SpanError> {
    if temperature == 0.0 {
        return Err(SpanError::Numeric(ErrorInfo::new(
            "zero-temperature",
            "density ratio is undefined at zero temperature",
        )));
    }
    let theta_from = score(from, cost_weight, source)?.total;
    let theta_to = score(to, cost_weight, source)?.total;
    Ok(((theta_from - theta_to) / temperature).exp())
}

/// Metropolis–Hastings acceptance probability with the asymmetric-proposal
/// correction; always within `[0, 1]`.
///
/// `temperature == 0` runs deterministic descent: the candidate is accepted
/// exactly when its energy does not exceed the current energy.
pub fn acceptance(
    from: &GeoGraph,
    to: &GeoGraph,
    cost_weight: f64,
    temperature: f64,
    source: NodeId,
) -> Result<f64, SpanError> {
    if temperature < 0.0 {
        return Err(SpanError::Input(
            ErrorInfo::new("invalid-temperature", "temperature must be >= 0")
                .with_context("temperature", temperature.to_string()),
        ));
    }
    if temperature == 0.0 {
        let theta_from = score(from, cost_weight, source)?.total;
        let theta_to = score(to, cost_weight, source)?.total;
        return Ok(if theta_from >= theta_to { 1.0 } else { 0.0 });
    }
    let ratio = pi_ratio(from, to, cost_weight, temperature, source)?
        * proposal_density(from, to)?
        / proposal_density(to, from)?;
    Ok(ratio.min(1.0))
}
