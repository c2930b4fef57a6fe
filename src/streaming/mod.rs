pub mod events;
pub mod correction;
pub mod local;
pub mod triest;
pub mod shared;
pub mod source;

pub use events::{EdgeEvent, EdgeSign};
pub use local::LocalTriangleCounts;
pub use triest::{FullyDynamicTriest, IngestOutcome, TriestStats};
pub use shared::SharedTriest;
pub use source::{EdgeStreamReader, parse_edge_line, read_edge_stream};
