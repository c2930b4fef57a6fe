use hashbrown::HashMap;
use crate::graph::NodeId;

/// Sparse per-node triangle counts over the sample.
///
/// Every update is followed by compaction: entries that fall to zero or
/// below are dropped, so the key set only holds nodes that currently sit in
/// at least one sampled triangle. Absent nodes read as zero.
#[derive(Debug, Clone)]
pub struct LocalTriangleCounts<N = u64> {
    counts: HashMap<N, i64>,
}

impl<N: NodeId> Default for LocalTriangleCounts<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: NodeId> LocalTriangleCounts<N> {
    pub fn new() -> Self {
        Self {
            counts: HashMap::new(),
        }
    }

    /// Apply `delta` to `node` and compact the entry if it is no longer positive.
    pub fn apply(&mut self, node: N, delta: i64) {
        let value = self.counts.entry(node).or_insert(0);
        *value += delta;
        if *value <= 0 {
            self.counts.remove(&node);
        }
    }

    pub fn get(&self, node: &N) -> i64 {
        self.counts.get(node).copied().unwrap_or(0)
    }

    /// Number of nodes with a positive count
    pub fn active_nodes(&self) -> usize {
        self.counts.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&N, &i64)> {
        self.counts.iter()
    }
}
