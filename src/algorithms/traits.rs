use crate::graph::NodeId;
use crate::streaming::{EdgeEvent, FullyDynamicTriest};

/// Anything that consumes an edge stream and reports a global triangle count
pub trait TriangleCounter<N: NodeId> {
    fn process(&mut self, event: EdgeEvent<N>);

    fn triangle_count(&self) -> f64;

    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str {
        "Streaming triangle counter"
    }

    fn process_all<I>(&mut self, events: I)
    where
        I: IntoIterator<Item = EdgeEvent<N>>,
        Self: Sized,
    {
        for event in events {
            self.process(event);
        }
    }
}

impl<N: NodeId> TriangleCounter<N> for FullyDynamicTriest<N> {
    fn process(&mut self, event: EdgeEvent<N>) {
        self.ingest(event);
    }

    fn triangle_count(&self) -> f64 {
        self.estimate()
    }

    fn name(&self) -> &'static str {
        "triest_fd"
    }

    fn description(&self) -> &'static str {
        "Fixed-memory unbiased estimate over a fully-dynamic stream"
    }
}
