pub mod camera;
pub mod config;
pub mod frame;
pub mod interaction;
pub mod session;
pub mod surface;

pub use camera::*;
pub use config::*;
pub use frame::*;
pub use interaction::*;
pub use session::*;
pub use surface::*;
