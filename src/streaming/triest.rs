use std::fmt;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use serde::Serialize;
use crate::config::TriestConfig;
use crate::error::Result;
use crate::graph::{Edge, NodeId, SampleGraph};
use crate::streaming::correction::{sample_correction, triple_ratio};
use crate::streaming::events::{EdgeEvent, EdgeSign};
use crate::streaming::local::LocalTriangleCounts;

/// Fully-dynamic streaming triangle estimator (TRIÈST-FD).
///
/// Keeps at most `memory_size` edges of an insertion/deletion stream and
/// counts the triangles among them incrementally. Deletions are compensated
/// with random pairing: `di` counts sampled edges deleted and `do` counts
/// unsampled edges deleted since the last time the two were balanced, and
/// later insertions pay those credits back before reservoir sampling resumes.
///
/// Events must be ingested one at a time in stream order.
#[derive(Debug, Clone)]
pub struct FullyDynamicTriest<N = u64> {
    memory_size: usize,
    sample: SampleGraph<N>,
    local: LocalTriangleCounts<N>,
    time: u64,              // t: events processed
    net_insertions: i64,    // s: insertions minus deletions
    deleted_sampled: i64,   // di
    deleted_unsampled: i64, // do
    tau: i64,               // triangles in the sample
    rng: Pcg64,
}

/// What a single `ingest` call did to the sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestOutcome<N = u64> {
    /// Insertion added to a sample with room to spare or paid by a deletion credit
    Admitted,
    /// Insertion added after evicting a random sampled edge
    Replaced { evicted: Edge<N> },
    /// Insertion not sampled
    Rejected,
    /// Deletion of a sampled edge
    Removed,
    /// Deletion of an edge that was never sampled
    DeletionNotSampled,
    /// Insertion of an edge that is already in the sample
    AlreadySampled,
    /// Event with identical endpoints
    IgnoredSelfLoop,
}

impl<N> IngestOutcome<N> {
    /// Whether the sample changed
    pub fn mutated_sample(&self) -> bool {
        matches!(
            self,
            IngestOutcome::Admitted | IngestOutcome::Replaced { .. } | IngestOutcome::Removed
        )
    }
}

/// Read-only snapshot of the estimator's scalars
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TriestStats {
    pub memory_size: usize,
    pub nb_edges: usize,
    pub t: u64,
    pub s: i64,
    pub di: i64,
    #[serde(rename = "do")]
    pub do_: i64,
    pub tau: i64,
    pub estimate: f64,
}

impl fmt::Display for TriestStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "M = {}", self.memory_size)?;
        writeln!(f, "Nb edges = {}", self.nb_edges)?;
        writeln!(f, "di = {}", self.di)?;
        writeln!(f, "do = {}", self.do_)?;
        writeln!(f, "t = {}", self.t)?;
        writeln!(f, "s = {}", self.s)?;
        writeln!(f, "tau = {}", self.tau)?;
        writeln!(f, "estimation = {}", self.estimate)
    }
}

impl<N: NodeId> FullyDynamicTriest<N> {
    /// Create an estimator with an entropy-seeded RNG.
    pub fn new(memory_size: usize) -> Result<Self> {
        Self::from_config(&TriestConfig::new(memory_size))
    }

    /// Create an estimator whose random choices are reproducible.
    pub fn with_seed(memory_size: usize, seed: u64) -> Result<Self> {
        Self::from_config(&TriestConfig::new(memory_size).with_seed(seed))
    }

    /// Create an estimator from a validated configuration.
    pub fn from_config(config: &TriestConfig) -> Result<Self> {
        config.validate()?;

        let rng = if let Some(seed) = config.seed {
            Pcg64::seed_from_u64(seed)
        } else {
            Pcg64::from_entropy()
        };

        Ok(Self {
            memory_size: config.memory_size,
            sample: SampleGraph::with_capacity(config.memory_size),
            local: LocalTriangleCounts::new(),
            time: 0,
            net_insertions: 0,
            deleted_sampled: 0,
            deleted_unsampled: 0,
            tau: 0,
            rng,
        })
    }

    /// Process one stream event.
    pub fn ingest(&mut self, event: EdgeEvent<N>) -> IngestOutcome<N> {
        self.time += 1;

        let Some(edge) = Edge::new(event.u, event.v) else {
            log::debug!("Ignoring self-loop on {:?} at t={}", event.u, self.time);
            return IngestOutcome::IgnoredSelfLoop;
        };

        let outcome = match event.sign {
            EdgeSign::Insert => {
                if self.sample.contains(&edge) {
                    log::debug!("Ignoring insertion of sampled edge {:?} at t={}", edge, self.time);
                    return IngestOutcome::AlreadySampled;
                }
                self.net_insertions += 1;
                self.admit(edge)
            }
            EdgeSign::Delete => {
                self.net_insertions -= 1;
                if self.sample.contains(&edge) {
                    self.remove_from_sample(&edge);
                    self.deleted_sampled += 1;
                    IngestOutcome::Removed
                } else {
                    self.deleted_unsampled += 1;
                    IngestOutcome::DeletionNotSampled
                }
            }
        };

        debug_assert!(self.sample.len() <= self.memory_size);
        outcome
    }

    /// Ingest the insertion of `(u, v)`.
    pub fn insert(&mut self, u: N, v: N) -> IngestOutcome<N> {
        self.ingest(EdgeEvent::insert(u, v))
    }

    /// Ingest the deletion of `(u, v)`.
    pub fn delete(&mut self, u: N, v: N) -> IngestOutcome<N> {
        self.ingest(EdgeEvent::delete(u, v))
    }

    /// Feed every event of `events` in order.
    pub fn ingest_all<I>(&mut self, events: I)
    where
        I: IntoIterator<Item = EdgeEvent<N>>,
    {
        for event in events {
            self.ingest(event);
        }
    }

    /// Estimated number of triangles in the graph defined by the stream so far.
    /// Zero when fewer than three edges are sampled or the correction is undefined.
    pub fn estimate(&self) -> f64 {
        self.scale_factor()
            .map_or(0.0, |scale| non_negative(self.tau as f64 * scale))
    }

    /// Estimated number of triangles touching `node`, scaled like `estimate`.
    pub fn local_estimate(&self, node: &N) -> f64 {
        self.scale_factor()
            .map_or(0.0, |scale| non_negative(self.local.get(node) as f64 * scale))
    }

    /// Triangles touching `node` within the sample
    pub fn local_triangles(&self, node: &N) -> i64 {
        self.local.get(node)
    }

    /// Per-node triangle counts within the sample
    pub fn local_counts(&self) -> &LocalTriangleCounts<N> {
        &self.local
    }

    /// Snapshot of the counters and the current estimate
    pub fn stats(&self) -> TriestStats {
        TriestStats {
            memory_size: self.memory_size,
            nb_edges: self.sample.len(),
            t: self.time,
            s: self.net_insertions,
            di: self.deleted_sampled,
            do_: self.deleted_unsampled,
            tau: self.tau,
            estimate: self.estimate(),
        }
    }

    /// Get the sample capacity `M`
    pub fn memory_size(&self) -> usize {
        self.memory_size
    }

    /// Get the sampled edges
    pub fn sample(&self) -> &SampleGraph<N> {
        &self.sample
    }

    /// Get the sample size
    pub fn nb_edges(&self) -> usize {
        self.sample.len()
    }

    /// Get the number of events processed (`t`)
    pub fn time(&self) -> u64 {
        self.time
    }

    /// Get insertions minus deletions (`s`)
    pub fn net_insertions(&self) -> i64 {
        self.net_insertions
    }

    /// Get uncompensated deletions of sampled edges (`di`)
    pub fn deleted_sampled(&self) -> i64 {
        self.deleted_sampled
    }

    /// Get uncompensated deletions of unsampled edges (`do`)
    pub fn deleted_unsampled(&self) -> i64 {
        self.deleted_unsampled
    }

    /// Get the number of triangles in the sample
    pub fn tau(&self) -> i64 {
        self.tau
    }

    /// Admission policy for an inserted edge not currently sampled.
    fn admit(&mut self, edge: Edge<N>) -> IngestOutcome<N> {
        if self.deleted_unsampled == -self.deleted_sampled {
            if self.sample.len() < self.memory_size {
                self.add_to_sample(edge);
                return IngestOutcome::Admitted;
            }

            let probability = self.memory_size as f64 / self.time as f64;
            if self.flip_biased_coin(probability) {
                if let Some(evicted) = self.sample.random_edge(&mut self.rng) {
                    self.remove_from_sample(&evicted);
                    self.add_to_sample(edge);
                    return IngestOutcome::Replaced { evicted };
                }
            }

            // Full sample and the coin failed: no credit changes.
            return IngestOutcome::Rejected;
        }

        let credits = self.deleted_sampled + self.deleted_unsampled;
        debug_assert!(credits > 0, "unbalanced deletion credits must be positive");
        let probability = if credits > 0 {
            self.deleted_sampled as f64 / credits as f64
        } else {
            0.0
        };

        if self.flip_biased_coin(probability) {
            self.add_to_sample(edge);
            self.deleted_sampled -= 1;
            IngestOutcome::Admitted
        } else {
            self.deleted_unsampled -= 1;
            IngestOutcome::Rejected
        }
    }

    fn add_to_sample(&mut self, edge: Edge<N>) {
        self.update_counters(EdgeSign::Insert, &edge);
        let inserted = self.sample.insert(edge);
        debug_assert!(inserted);
    }

    fn remove_from_sample(&mut self, edge: &Edge<N>) {
        self.update_counters(EdgeSign::Delete, edge);
        let removed = self.sample.remove(edge);
        debug_assert!(removed);
    }

    /// Apply the triangle deltas of `edge` entering or leaving the sample.
    /// Must run while the sample still reflects the state before the change.
    fn update_counters(&mut self, sign: EdgeSign, edge: &Edge<N>) {
        let delta = sign.delta();
        let (u, v) = edge.endpoints();

        for c in self.sample.common_neighbors(edge) {
            self.tau += delta;
            self.local.apply(u, delta);
            self.local.apply(v, delta);
            self.local.apply(c, delta);
        }
    }

    fn flip_biased_coin(&mut self, probability: f64) -> bool {
        self.rng.gen::<f64>() < probability
    }

    fn scale_factor(&self) -> Option<f64> {
        let sampled = self.sample.len() as i64;
        if sampled < 3 {
            return None;
        }
        let credits = self.deleted_sampled + self.deleted_unsampled;
        let kappa = sample_correction(self.net_insertions, credits, self.memory_size)?;
        let ratio = triple_ratio(self.net_insertions, sampled)?;
        Some(ratio / kappa)
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TriestError;

    #[test]
    fn test_zero_memory_fails_fast() {
        let result = FullyDynamicTriest::<u64>::new(0);
        assert!(matches!(result, Err(TriestError::InvalidParameter(_))));
    }

    #[test]
    fn test_outcomes() {
        let mut triest = FullyDynamicTriest::with_seed(2, 1).unwrap();

        assert_eq!(triest.insert(1, 2), IngestOutcome::Admitted);
        assert_eq!(triest.insert(2, 1), IngestOutcome::AlreadySampled);
        assert_eq!(triest.insert(4, 4), IngestOutcome::IgnoredSelfLoop);
        assert_eq!(triest.delete(7, 8), IngestOutcome::DeletionNotSampled);
        assert_eq!(triest.delete(2, 1), IngestOutcome::Removed);
        assert_eq!(triest.time(), 5);
    }

    #[test]
    fn test_outcome_mutation_flag() {
        assert!(IngestOutcome::<u64>::Admitted.mutated_sample());
        assert!(IngestOutcome::Replaced { evicted: Edge::new(1u64, 2).unwrap() }.mutated_sample());
        assert!(IngestOutcome::<u64>::Removed.mutated_sample());
        assert!(!IngestOutcome::<u64>::Rejected.mutated_sample());
        assert!(!IngestOutcome::<u64>::DeletionNotSampled.mutated_sample());
    }

    #[test]
    fn test_stats_display() {
        let mut triest = FullyDynamicTriest::with_seed(10, 3).unwrap();
        triest.ingest_all([
            EdgeEvent::insert(1, 2),
            EdgeEvent::insert(2, 3),
            EdgeEvent::insert(3, 1),
        ]);

        let rendered = triest.stats().to_string();
        assert!(rendered.contains("M = 10\n"));
        assert!(rendered.contains("Nb edges = 3\n"));
        assert!(rendered.contains("tau = 1\n"));
        assert!(rendered.contains("estimation = 1\n"));
    }

    #[test]
    fn test_stats_serialize_uses_do_key() {
        let triest = FullyDynamicTriest::<u64>::with_seed(4, 3).unwrap();
        let json = serde_json::to_value(triest.stats()).unwrap();
        assert_eq!(json["do"], 0);
        assert_eq!(json["memory_size"], 4);
    }
}
