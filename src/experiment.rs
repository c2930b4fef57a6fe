//! Accuracy of the estimator as a function of its memory size.
//!
//! Each memory size is run for several independent trials over the same
//! event sequence; trials run in parallel since each owns its estimator.

use rayon::prelude::*;
use serde::Serialize;
use crate::algorithms::ExactTriangleCount;
use crate::config::{ExperimentConfig, TriestConfig};
use crate::error::Result;
use crate::graph::NodeId;
use crate::streaming::{EdgeEvent, FullyDynamicTriest};

/// Estimates collected for one memory size
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepPoint {
    pub memory_size: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub estimates: Vec<f64>,
}

/// Result of a full sweep, with the exact count as reference
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepResult {
    pub events: usize,
    pub trials: usize,
    pub exact_triangles: u64,
    pub points: Vec<SweepPoint>,
}

impl SweepResult {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Run `trials` estimators with `memory_size` over `events`.
/// With a base seed, trial `i` is seeded with `seed + i`.
pub fn run_trials<N>(
    events: &[EdgeEvent<N>],
    memory_size: usize,
    trials: usize,
    seed: Option<u64>,
) -> Result<Vec<f64>>
where
    N: NodeId + Send + Sync,
{
    (0..trials)
        .into_par_iter()
        .map(|trial| -> Result<f64> {
            let config = TriestConfig {
                memory_size,
                seed: seed.map(|s| s.wrapping_add(trial as u64)),
            };
            let mut triest = FullyDynamicTriest::from_config(&config)?;
            triest.ingest_all(events.iter().copied());
            Ok(triest.estimate())
        })
        .collect()
}

pub fn run_memory_sweep<N>(events: &[EdgeEvent<N>], config: &ExperimentConfig) -> Result<SweepResult>
where
    N: NodeId + Send + Sync,
{
    config.validate()?;

    let exact = ExactTriangleCount::from_events(events.iter().copied());
    log::info!(
        "Exact count over {} events: {} triangles",
        events.len(),
        exact.triangles()
    );

    let mut points = Vec::with_capacity(config.memory_sizes.len());
    for &memory_size in &config.memory_sizes {
        let estimates = run_trials(events, memory_size, config.trials, config.seed)?;
        let (mean, std_dev) = mean_and_std_dev(&estimates);
        log::info!(
            "M = {}: mean estimate {:.1} (std {:.1}) over {} trials",
            memory_size,
            mean,
            std_dev,
            estimates.len()
        );

        points.push(SweepPoint {
            memory_size,
            mean,
            std_dev,
            estimates,
        });
    }

    Ok(SweepResult {
        events: events.len(),
        trials: config.trials,
        exact_triangles: exact.triangles(),
        points,
    })
}

/// Mean and population standard deviation; zeros for an empty slice.
pub fn mean_and_std_dev(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, variance.sqrt())
}
