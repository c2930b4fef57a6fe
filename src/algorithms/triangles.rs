use crate::algorithms::TriangleCounter;
use crate::graph::{Edge, NodeId, SampleGraph};
use crate::streaming::{EdgeEvent, EdgeSign};

/// Exact triangle count of the graph defined by an edge stream.
///
/// Keeps every live edge, so memory grows with the graph. Used as the
/// reference count the fixed-memory estimator is compared against.
#[derive(Debug, Clone)]
pub struct ExactTriangleCount<N = u64> {
    graph: SampleGraph<N>,
    triangles: u64,
}

impl<N: NodeId> Default for ExactTriangleCount<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: NodeId> ExactTriangleCount<N> {
    pub fn new() -> Self {
        Self {
            graph: SampleGraph::new(),
            triangles: 0,
        }
    }

    /// Count triangles of a whole stream
    pub fn from_events<I>(events: I) -> Self
    where
        I: IntoIterator<Item = EdgeEvent<N>>,
    {
        let mut counter = Self::new();
        counter.process_all(events);
        counter
    }

    /// Apply one event. Duplicate insertions, deletions of missing edges and
    /// self-loops leave the graph unchanged.
    pub fn apply(&mut self, event: EdgeEvent<N>) {
        let Some(edge) = Edge::new(event.u, event.v) else {
            return;
        };

        match event.sign {
            EdgeSign::Insert if !self.graph.contains(&edge) => {
                self.triangles += self.graph.common_neighbors(&edge).count() as u64;
                self.graph.insert(edge);
            }
            EdgeSign::Delete if self.graph.contains(&edge) => {
                self.graph.remove(&edge);
                self.triangles -= self.graph.common_neighbors(&edge).count() as u64;
            }
            _ => {}
        }
    }

    pub fn triangles(&self) -> u64 {
        self.triangles
    }

    pub fn edge_count(&self) -> usize {
        self.graph.len()
    }

    pub fn graph(&self) -> &SampleGraph<N> {
        &self.graph
    }

    /// Recount from scratch with the ordered node-iterator method: every
    /// triangle `a < b < c` is found once from its lowest edge `(a, b)`.
    pub fn recount(&self) -> u64 {
        self.graph
            .edges()
            .map(|edge| {
                let high = edge.high();
                self.graph
                    .common_neighbors(edge)
                    .filter(|c| *c > high)
                    .count() as u64
            })
            .sum()
    }
}

impl<N: NodeId> TriangleCounter<N> for ExactTriangleCount<N> {
    fn process(&mut self, event: EdgeEvent<N>) {
        self.apply(event);
    }

    fn triangle_count(&self) -> f64 {
        self.triangles as f64
    }

    fn name(&self) -> &'static str {
        "exact_triangle_count"
    }

    fn description(&self) -> &'static str {
        "Count the total number of triangles in the graph"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_triangle() {
        let exact = ExactTriangleCount::from_events([
            EdgeEvent::insert(1u64, 2),
            EdgeEvent::insert(2, 3),
            EdgeEvent::insert(3, 1),
        ]);
        assert_eq!(exact.triangles(), 1);
        assert_eq!(exact.recount(), 1);
        assert_eq!(exact.triangle_count(), 1.0);
    }

    #[test]
    fn test_complete_graph() {
        // K5 has C(5, 3) = 10 triangles
        let mut events = Vec::new();
        for u in 0u64..5 {
            for v in (u + 1)..5 {
                events.push(EdgeEvent::insert(u, v));
            }
        }
        let exact = ExactTriangleCount::from_events(events);
        assert_eq!(exact.triangles(), 10);
        assert_eq!(exact.recount(), 10);
        assert_eq!(exact.edge_count(), 10);
    }

    #[test]
    fn test_deletion_and_noise() {
        let mut exact = ExactTriangleCount::new();
        exact.process_all([
            EdgeEvent::insert(1u64, 2),
            EdgeEvent::insert(2, 3),
            EdgeEvent::insert(1, 3),
            EdgeEvent::insert(3, 4),
            EdgeEvent::insert(2, 4),
            EdgeEvent::insert(2, 1), // duplicate
            EdgeEvent::insert(5, 5), // self-loop
            EdgeEvent::delete(8, 9), // never inserted
        ]);
        assert_eq!(exact.triangles(), 2);

        exact.apply(EdgeEvent::delete(3, 2));
        assert_eq!(exact.triangles(), 0);
        assert_eq!(exact.recount(), 0);
        assert_eq!(exact.edge_count(), 4);
    }
}
