use hashbrown::{HashMap, HashSet};
use indexmap::IndexSet;
use rand::Rng;
use crate::graph::edge::{Edge, NodeId};

/// Edge sample kept as an index-addressable edge set and an adjacency map.
///
/// The two views are only mutated through `insert` and `remove`, which update
/// both together, so membership in one always implies membership in the other.
/// The edge set supports O(1) uniform random picks via swap-remove indexing.
#[derive(Debug, Clone)]
pub struct SampleGraph<N = u64> {
    edges: IndexSet<Edge<N>>,
    adjacency: HashMap<N, HashSet<N>>,
}

impl<N: NodeId> Default for SampleGraph<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: NodeId> SampleGraph<N> {
    pub fn new() -> Self {
        Self {
            edges: IndexSet::new(),
            adjacency: HashMap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            edges: IndexSet::with_capacity(capacity),
            adjacency: HashMap::with_capacity(capacity),
        }
    }

    /// Number of sampled edges
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Number of nodes with at least one sampled edge
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn contains(&self, edge: &Edge<N>) -> bool {
        self.edges.contains(edge)
    }

    pub fn neighbors(&self, node: &N) -> Option<&HashSet<N>> {
        self.adjacency.get(node)
    }

    pub fn degree(&self, node: &N) -> usize {
        self.adjacency.get(node).map_or(0, HashSet::len)
    }

    /// Nodes adjacent to both endpoints of `edge`, found by scanning the
    /// smaller of the two neighbor sets.
    pub fn common_neighbors<'a>(&'a self, edge: &Edge<N>) -> impl Iterator<Item = N> + 'a {
        let (u, v) = edge.endpoints();
        let pair = match (self.adjacency.get(&u), self.adjacency.get(&v)) {
            (Some(nu), Some(nv)) if nu.len() <= nv.len() => Some((nu, nv)),
            (Some(nu), Some(nv)) => Some((nv, nu)),
            _ => None,
        };

        pair.into_iter().flat_map(|(smaller, larger)| {
            smaller.iter().filter(move |c| larger.contains(*c)).copied()
        })
    }

    /// Add an edge. Returns `false` if it was already sampled.
    pub fn insert(&mut self, edge: Edge<N>) -> bool {
        if !self.edges.insert(edge) {
            return false;
        }

        let (u, v) = edge.endpoints();
        self.adjacency.entry(u).or_default().insert(v);
        self.adjacency.entry(v).or_default().insert(u);

        debug_assert!(self.is_consistent_for(&edge));
        true
    }

    /// Remove an edge. Returns `false` if it was not sampled.
    pub fn remove(&mut self, edge: &Edge<N>) -> bool {
        if !self.edges.swap_remove(edge) {
            return false;
        }

        let (u, v) = edge.endpoints();
        self.unlink(u, v);
        self.unlink(v, u);

        debug_assert!(!self.adjacency.get(&u).is_some_and(|n| n.contains(&v)));
        true
    }

    /// Uniformly random sampled edge, or `None` when the sample is empty.
    pub fn random_edge<R: Rng>(&self, rng: &mut R) -> Option<Edge<N>> {
        if self.edges.is_empty() {
            return None;
        }
        let index = rng.gen_range(0..self.edges.len());
        self.edges.get_index(index).copied()
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge<N>> {
        self.edges.iter()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.adjacency.keys()
    }

    /// Full cross-check of the edge set against the adjacency map.
    /// Linear in the sample size; intended for tests and debug assertions.
    pub fn is_consistent(&self) -> bool {
        let degree_sum: usize = self.adjacency.values().map(HashSet::len).sum();
        if degree_sum != 2 * self.edges.len() {
            return false;
        }
        if self.adjacency.values().any(HashSet::is_empty) {
            return false;
        }
        self.edges.iter().all(|edge| self.is_consistent_for(edge))
    }

    fn is_consistent_for(&self, edge: &Edge<N>) -> bool {
        let (u, v) = edge.endpoints();
        let linked = |a: &N, b: &N| self.adjacency.get(a).is_some_and(|n| n.contains(b));
        self.edges.contains(edge) == (linked(&u, &v) && linked(&v, &u))
    }

    fn unlink(&mut self, from: N, to: N) {
        if let Some(neighbors) = self.adjacency.get_mut(&from) {
            neighbors.remove(&to);
            if neighbors.is_empty() {
                self.adjacency.remove(&from);
            }
        }
    }
}
