use std::fs::File;
use std::io::Write;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use spannet_core::{ErrorInfo, NodeId, SpanError};
use spannet_graph::{EdgeSetKey, GeoGraph};

/// Per-iteration scalars recorded for whichever graph became current.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectorySample {
    /// Iteration index; `0` is the initial state.
    pub iteration: usize,
    /// Edge count of the current graph.
    pub edge_count: usize,
    /// Number of edges incident to the source node.
    pub source_degree: usize,
    /// Maximum shortest-path length from the source.
    pub eccentricity: f64,
    /// Energy total of the current graph.
    pub energy: f64,
    /// Whether this iteration's proposal was adopted.
    pub accepted: bool,
}

/// Number of edges incident to the source node.
pub fn source_degree(graph: &GeoGraph, source: NodeId) -> Result<usize, SpanError> {
    graph.degree(source)
}

/// Maximum shortest-path length from the source over all nodes.
pub fn eccentricity(graph: &GeoGraph, source: NodeId) -> Result<f64, SpanError> {
    let mut farthest = 0.0f64;
    for node in graph.nodes() {
        let length = graph.shortest_path_length(source, node)?;
        if length > farthest {
            farthest = length;
        }
    }
    Ok(farthest)
}

/// Arithmetic mean of a trajectory buffer. The mean of an empty sequence
/// is undefined.
pub fn expected_value(values: &[f64]) -> Result<f64, SpanError> {
    if values.is_empty() {
        return Err(SpanError::Analysis(ErrorInfo::new(
            "empty-trajectory",
            "expectation over an empty sequence is undefined",
        )));
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Collects per-iteration samples and topology visitation counts.
#[derive(Debug, Default)]
pub struct TrajectoryRecorder {
    samples: Vec<TrajectorySample>,
    visits: IndexMap<EdgeSetKey, usize>,
}

impl TrajectoryRecorder {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the state that became current at `iteration`.
    pub fn record(
        &mut self,
        iteration: usize,
        graph: &GeoGraph,
        source: NodeId,
        energy: f64,
        accepted: bool,
    ) -> Result<(), SpanError> {
        self.samples.push(TrajectorySample {
            iteration,
            edge_count: graph.edge_count(),
            source_degree: source_degree(graph, source)?,
            eccentricity: eccentricity(graph, source)?,
            energy,
            accepted,
        });
        *self.visits.entry(EdgeSetKey::from_graph(graph)).or_insert(0) += 1;
        Ok(())
    }

    /// Immutable view over the recorded samples.
    pub fn samples(&self) -> &[TrajectorySample] {
        &self.samples
    }

    /// Visitation counts keyed by canonical edge set, in first-seen order.
    pub fn visits(&self) -> &IndexMap<EdgeSetKey, usize> {
        &self.visits
    }

    /// Number of distinct topologies visited.
    pub fn unique_topologies(&self) -> usize {
        self.visits.len()
    }

    /// Most visited topology as an explicit max-by-count reduction over the
    /// `(edge set, count)` pairs. Ties break toward the first-seen entry.
    pub fn mode(&self) -> Result<(&EdgeSetKey, usize), SpanError> {
        let mut best: Option<(&EdgeSetKey, usize)> = None;
        for (key, &count) in &self.visits {
            match best {
                Some((_, best_count)) if best_count >= count => {}
                _ => best = Some((key, count)),
            }
        }
        best.ok_or_else(|| {
            SpanError::Analysis(ErrorInfo::new("empty-trajectory", "no states were recorded"))
        })
    }

    /// Writes the samples as CSV, one row per iteration.
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let mut file = File::create(path)?;
        writeln!(
            file,
            "iteration,edge_count,source_degree,eccentricity,energy,accepted"
        )?;
        for sample in &self.samples {
            writeln!(
                file,
                "{},{},{},{:.6},{:.6},{}",
                sample.iteration,
                sample.edge_count,
                sample.source_degree,
                sample.eccentricity,
                sample.energy,
                sample.accepted
            )?;
        }
        Ok(())
    }
}
