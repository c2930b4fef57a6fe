use std::fmt;
use std::hash::Hash;
use serde::Serialize;
use crate::error::{TriestError, Result};

/// Node identifiers accepted by the sample graph and the estimator.
/// Any small copyable, hashable, ordered key works; `u64` is the default.
pub trait NodeId: Copy + Eq + Hash + Ord + fmt::Debug {}

impl<T> NodeId for T where T: Copy + Eq + Hash + Ord + fmt::Debug {}

/// Undirected edge stored with its endpoints in ascending order,
/// so `(u, v)` and `(v, u)` compare and hash equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Edge<N = u64> {
    low: N,
    high: N,
}

impl<N: NodeId> Edge<N> {
    /// Canonical edge between `u` and `v`, or `None` for a self-loop.
    pub fn new(u: N, v: N) -> Option<Self> {
        match u.cmp(&v) {
            std::cmp::Ordering::Less => Some(Self { low: u, high: v }),
            std::cmp::Ordering::Greater => Some(Self { low: v, high: u }),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn try_new(u: N, v: N) -> Result<Self> {
        Self::new(u, v)
            .ok_or_else(|| TriestError::invalid_edge(format!("self-loop on node {:?}", u)))
    }

    pub fn endpoints(&self) -> (N, N) {
        (self.low, self.high)
    }

    pub fn low(&self) -> N {
        self.low
    }

    pub fn high(&self) -> N {
        self.high
    }
}

impl<N: fmt::Display> fmt::Display for Edge<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.low, self.high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_is_canonical() {
        assert_eq!(Edge::new(3u64, 1), Edge::new(1u64, 3));
        assert_eq!(Edge::new(3u64, 1).unwrap().endpoints(), (1, 3));
    }

    #[test]
    fn test_self_loop_rejected() {
        assert!(Edge::new(7u64, 7).is_none());
        assert!(matches!(Edge::try_new(7u64, 7), Err(TriestError::InvalidEdge(_))));
    }

    #[test]
    fn test_edge_display() {
        let edge = Edge::new(9u64, 2).unwrap();
        assert_eq!(edge.to_string(), "2-9");
        assert_eq!((edge.low(), edge.high()), (2, 9));
    }
}
