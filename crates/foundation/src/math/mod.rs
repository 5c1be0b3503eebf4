pub mod ease;
pub mod sphere;
pub mod vec;

pub use ease::*;
pub use sphere::*;
pub use vec::*;
