pub mod country_features;
pub mod dataset;
pub mod stat_table;

pub use country_features::*;
pub use dataset::*;
pub use stat_table::*;
