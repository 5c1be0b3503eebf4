pub mod color;
pub mod geo;
pub mod math;
pub mod time;

// Foundation crate: small, well-tested primitives only.
pub use color::*;
pub use geo::*;
pub use time::*;
