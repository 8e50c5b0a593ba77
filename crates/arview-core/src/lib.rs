pub mod camera;
pub mod capability;
pub mod config;
pub mod constants;
pub mod error;
pub mod normalize;
pub mod presentation;

pub use camera::*;
pub use capability::*;
pub use config::*;
pub use constants::*;
pub use error::*;
pub use normalize::*;
pub use presentation::*;
