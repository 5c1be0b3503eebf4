pub mod choropleth;
pub mod markers;

pub use choropleth::*;
pub use markers::*;
