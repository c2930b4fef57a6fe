pub mod traits;
pub mod triangles;

pub use traits::TriangleCounter;
pub use triangles::ExactTriangleCount;
