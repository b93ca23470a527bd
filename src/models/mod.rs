pub mod config;
pub mod exposure;
pub mod strategy;

pub use config::*;
pub use exposure::*;
pub use strategy::*;
