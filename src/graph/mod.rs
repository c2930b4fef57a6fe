pub mod edge;
pub mod sample;

pub use edge::{Edge, NodeId};
pub use sample::SampleGraph;
