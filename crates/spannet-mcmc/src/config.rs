use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use spannet_core::{ErrorInfo, NodeId, Point, SpanError};

/// Parameters governing a single chain run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Number of nodes `N`.
    #[serde(default = "default_nodes")]
    pub nodes: usize,
    /// Flattened list of `N` `(x, y)` coordinate pairs.
    #[serde(default = "default_coordinates")]
    pub coordinates: Vec<f64>,
    /// Distinguished source node id.
    #[serde(default)]
    pub source: u64,
    /// Number of chain states to record, counting the initial one.
    #[serde(default = "default_iterations")]
    pub iterations: usize,
    /// Edge-cost weight `r` in the energy functional.
    #[serde(default = "default_cost_weight")]
    pub cost_weight: f64,
    /// Temperature `T`. Zero selects deterministic descent.
    #[serde(default)]
    pub temperature: f64,
    /// Master seed and substream policy.
    #[serde(default)]
    pub seed_policy: SeedPolicy,
    /// Output artefact configuration.
    #[serde(default)]
    pub output: OutputConfig,
}

fn default_nodes() -> usize {
    5
}

fn default_coordinates() -> Vec<f64> {
    vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, -1.0, 0.0, 0.0, -1.0]
}

fn default_iterations() -> usize {
    500
}

fn default_cost_weight() -> f64 {
    1.0
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            nodes: default_nodes(),
            coordinates: default_coordinates(),
            source: 0,
            iterations: default_iterations(),
            cost_weight: default_cost_weight(),
            temperature: 0.0,
            seed_policy: SeedPolicy::default(),
            output: OutputConfig::default(),
        }
    }
}

impl RunConfig {
    /// Checks the configuration before a run starts.
    pub fn validate(&self) -> Result<(), SpanError> {
        if self.nodes < 3 {
            return Err(SpanError::Input(
                ErrorInfo::new("too-few-nodes", "a chain needs at least three nodes")
                    .with_context("nodes", self.nodes.to_string())
                    .with_hint("with fewer nodes neither move direction stays available"),
            ));
        }
        if self.source as usize >= self.nodes {
            return Err(SpanError::Input(
                ErrorInfo::new("source-out-of-range", "source node id exceeds the node count")
                    .with_context("source", self.source.to_string())
                    .with_context("nodes", self.nodes.to_string()),
            ));
        }
        if self.iterations == 0 {
            return Err(SpanError::Input(ErrorInfo::new(
                "zero-iterations",
                "a run must record at least the initial state",
            )));
        }
        if !self.temperature.is_finite() || self.temperature < 0.0 {
            return Err(SpanError::Input(
                ErrorInfo::new("invalid-temperature", "temperature must be finite and >= 0")
                    .with_context("temperature", self.temperature.to_string()),
            ));
        }
        if !self.cost_weight.is_finite() {
            return Err(SpanError::Input(
                ErrorInfo::new("invalid-cost-weight", "edge-cost weight must be finite")
                    .with_context("cost_weight", self.cost_weight.to_string()),
            ));
        }
        if self.coordinates.len() != 2 * self.nodes {
            return Err(SpanError::Input(
                ErrorInfo::new(
                    "coordinate-count-mismatch",
                    "coordinate list does not match the node count",
                )
                .with_context("nodes", self.nodes.to_string())
                .with_context("values", self.coordinates.len().to_string()),
            ));
        }
        Ok(())
    }

    /// Resolves the flattened coordinate list into points.
    pub fn points(&self) -> Result<Vec<Point>, SpanError> {
        self.validate()?;
        Ok(self
            .coordinates
            .chunks_exact(2)
            .map(|pair| Point::new(pair[0], pair[1]))
            .collect())
    }

    /// The distinguished source node.
    pub fn source_node(&self) -> NodeId {
        NodeId::from_raw(self.source)
    }
}

/// Parses a flattened comma-separated coordinate list such as
/// `0,0,1,0,0,1`.
pub fn parse_coordinate_list(text: &str) -> Result<Vec<f64>, SpanError> {
    text.split(',')
        .map(|token| {
            let token = token.trim();
            token.parse::<f64>().map_err(|_| {
                SpanError::Input(
                    ErrorInfo::new("unparsable-coordinate", "coordinate value is not a number")
                        .with_context("value", token.to_string()),
                )
            })
        })
        .collect()
}

/// Deterministic seeding configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedPolicy {
    /// Master seed used for the run.
    #[serde(default = "default_master_seed")]
    pub master_seed: u64,
}

fn default_master_seed() -> u64 {
    0x5EED_C4A1_2026_5EED_u64
}

impl Default for SeedPolicy {
    fn default() -> Self {
        Self {
            master_seed: default_master_seed(),
        }
    }
}

/// Output artefact layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Root directory for run artefacts; nothing is written when unset.
    #[serde(default)]
    pub run_directory: Option<PathBuf>,
    /// Trajectory CSV filename relative to `run_directory`.
    #[serde(default = "default_trajectory_filename")]
    pub trajectory_file: PathBuf,
    /// Summary JSON filename relative to `run_directory`.
    #[serde(default = "default_summary_filename")]
    pub summary_file: PathBuf,
}

fn default_trajectory_filename() -> PathBuf {
    PathBuf::from("trajectory.csv")
}

fn default_summary_filename() -> PathBuf {
    PathBuf::from("summary.json")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            run_directory: None,
            trajectory_file: default_trajectory_filename(),
            summary_file: default_summary_filename(),
        }
    }
}
