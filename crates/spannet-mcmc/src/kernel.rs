use std::fs;
use std::path::PathBuf;

use rand::Rng;
use serde::{Deserialize, Serialize};
use spannet_core::{ErrorInfo, RngHandle, SpanError};
use spannet_graph::{
    adjacency_matrix, canonical_hash, is_connected, path_graph, EdgeSetKey, GeoGraph,
};

use crate::config::RunConfig;
use crate::determinism;
use crate::energy;
use crate::moves::{self, MoveKind};
use crate::trajectory::{expected_value, TrajectoryRecorder, TrajectorySample};

/// Summary returned to callers after a chain completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Number of recorded iterations, counting the initial state.
    pub iterations: usize,
    /// Mean edge count over the trajectory.
    pub expected_edge_count: f64,
    /// Mean source-node degree over the trajectory.
    pub expected_source_degree: f64,
    /// Mean eccentricity from the source over the trajectory.
    pub expected_eccentricity: f64,
    /// Share of proposals that were adopted.
    pub acceptance_rate: f64,
    /// Number of distinct topologies visited.
    pub unique_topologies: usize,
    /// Canonical edge set of the most visited topology.
    pub mode_edges: EdgeSetKey,
    /// Visit count of the mode topology.
    pub mode_visits: usize,
    /// Adjacency matrix of the mode topology.
    pub mode_matrix: Vec<Vec<f64>>,
    /// Canonical hash of the final chain state.
    pub final_graph_hash: String,
    /// Trajectory CSV path, when artefact output was configured.
    pub trajectory_path: Option<PathBuf>,
    /// Summary JSON path, when artefact output was configured.
    pub summary_path: Option<PathBuf>,
    /// Per-iteration samples (useful for tests and diagnostics).
    pub samples: Vec<TrajectorySample>,
}

/// Runs the chain from scratch with the provided configuration and seed.
///
/// The initial path graph is recorded once; each of the remaining
/// `iterations - 1` transitions proposes one birth/death move, applies the
/// Metropolis acceptance test and records whichever state became current.
pub fn run(config: &RunConfig, seed: u64) -> Result<RunSummary, SpanError> {
    config.validate()?;
    let points = config.points()?;
    let source = config.source_node();

    let mut current = path_graph(config.nodes, &points)?;
    ensure_connected(&current, 0)?;

    let mut recorder = TrajectoryRecorder::new();
    let initial_energy = energy::score(&current, config.cost_weight, source)?.total;
    recorder.record(0, &current, source, initial_energy, false)?;

    let mut accepted_moves = 0usize;
    for iteration in 1..config.iterations {
        let mut move_rng = RngHandle::from_seed(determinism::move_seed(seed, iteration));
        let kind = moves::choose_move_kind(&current, &mut move_rng);
        let proposal = match kind {
            MoveKind::Addition => moves::propose_addition(&current, &mut move_rng)?,
            MoveKind::Deletion => moves::propose_deletion(&current, &mut move_rng)?,
        };

        let alpha = energy::acceptance(
            &current,
            &proposal.candidate,
            config.cost_weight,
            config.temperature,
            source,
        )?;
        let mut accept_rng =
            RngHandle::from_seed(determinism::acceptance_seed(seed, iteration));
        let draw: f64 = accept_rng.gen();
        let accepted = alpha > draw;
        if accepted {
            accepted_moves += 1;
            current = proposal.candidate;
        }

        ensure_connected(&current, iteration)?;
        let energy_total = energy::score(&current, config.cost_weight, source)?.total;
        recorder.record(iteration, &current, source, energy_total, accepted)?;
    }

    let samples = recorder.samples();
    let edge_counts: Vec<f64> = samples.iter().map(|s| s.edge_count as f64).collect();
    let source_degrees: Vec<f64> = samples.iter().map(|s| s.source_degree as f64).collect();
    let eccentricities: Vec<f64> = samples.iter().map(|s| s.eccentricity).collect();

    let (mode_key, mode_visits) = recorder.mode()?;
    let mode_edges = mode_key.clone();
    let mode_matrix = adjacency_matrix(&mode_edges, &points)?;

    let proposed_moves = config.iterations - 1;
    let acceptance_rate = if proposed_moves == 0 {
        0.0
    } else {
        accepted_moves as f64 / proposed_moves as f64
    };

    let mut summary = RunSummary {
        iterations: config.iterations,
        expected_edge_count: expected_value(&edge_counts)?,
        expected_source_degree: expected_value(&source_degrees)?,
        expected_eccentricity: expected_value(&eccentricities)?,
        acceptance_rate,
        unique_topologies: recorder.unique_topologies(),
        mode_edges,
        mode_visits,
        mode_matrix,
        final_graph_hash: canonical_hash(&current),
        trajectory_path: None,
        summary_path: None,
        samples: samples.to_vec(),
    };

    write_artefacts(config, &recorder, &mut summary)?;
    Ok(summary)
}

fn ensure_connected(graph: &GeoGraph, iteration: usize) -> Result<(), SpanError> {
    if !is_connected(graph)? {
        return Err(SpanError::Invariant(
            ErrorInfo::new("disconnected-state", "chain state lost connectivity")
                .with_context("iteration", iteration.to_string()),
        ));
    }
    Ok(())
}

fn write_artefacts(
    config: &RunConfig,
    recorder: &TrajectoryRecorder,
    summary: &mut RunSummary,
) -> Result<(), SpanError> {
    let Some(run_dir) = &config.output.run_directory else {
        return Ok(());
    };
    fs::create_dir_all(run_dir).map_err(|err| {
        SpanError::Serde(
            ErrorInfo::new("artefact-mkdir", err.to_string())
                .with_context("path", run_dir.display().to_string()),
        )
    })?;

    let trajectory_path = run_dir.join(&config.output.trajectory_file);
    let summary_path = run_dir.join(&config.output.summary_file);
    summary.trajectory_path = Some(trajectory_path.clone());
    summary.summary_path = Some(summary_path.clone());

    recorder.write_csv(&trajectory_path).map_err(|err| {
        SpanError::Serde(
            ErrorInfo::new("trajectory-write", err.to_string())
                .with_context("path", trajectory_path.display().to_string()),
        )
    })?;

    let json = serde_json::to_string_pretty(summary)
        .map_err(|err| SpanError::Serde(ErrorInfo::new("summary-encode", err.to_string())))?;
    fs::write(&summary_path, json).map_err(|err| {
        SpanError::Serde(
            ErrorInfo::new("summary-write", err.to_string())
                .with_context("path", summary_path.display().to_string()),
        )
    })?;
    Ok(())
}
