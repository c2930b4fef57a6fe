//! Fixed-memory triangle counting over fully-dynamic graph edge streams.
//!
//! The core is [`FullyDynamicTriest`], an implementation of TRIÈST-FD
//! (De Stefani, Epasto, Riondato, Upfal, KDD'16): it keeps a bounded random
//! sample of the live edges of an insertion/deletion stream, tracks the
//! triangles inside that sample incrementally and rescales them into an
//! unbiased estimate of the global triangle count.
//!
//! ```rust
//! use triest_graph::prelude::*;
//!
//! let mut triest = FullyDynamicTriest::with_seed(100, 7)?;
//! triest.ingest(EdgeEvent::insert(1u64, 2));
//! triest.ingest(EdgeEvent::insert(2, 3));
//! triest.ingest(EdgeEvent::insert(3, 1));
//! assert_eq!(triest.estimate(), 1.0);
//! # Ok::<(), TriestError>(())
//! ```

pub mod graph;
pub mod algorithms;
pub mod error;
pub mod config;
pub mod streaming;
pub mod experiment;

pub use graph::{Edge, NodeId, SampleGraph};
pub use algorithms::{TriangleCounter, ExactTriangleCount};
pub use config::{TriestConfig, ExperimentConfig};
pub use streaming::{FullyDynamicTriest, SharedTriest, IngestOutcome, TriestStats, EdgeEvent, EdgeSign, EdgeStreamReader, LocalTriangleCounts};
pub use experiment::{run_memory_sweep, SweepPoint, SweepResult};
pub use error::{TriestError, Result};

pub mod prelude {
    pub use crate::graph::{Edge, NodeId, SampleGraph};
    pub use crate::algorithms::{TriangleCounter, ExactTriangleCount};
    pub use crate::config::{TriestConfig, ExperimentConfig};
    pub use crate::streaming::{FullyDynamicTriest, SharedTriest, IngestOutcome, TriestStats, EdgeEvent, EdgeSign, EdgeStreamReader, LocalTriangleCounts};
    pub use crate::experiment::{run_memory_sweep, SweepPoint, SweepResult};
    pub use crate::error::{TriestError, Result};
}
