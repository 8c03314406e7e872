pub mod config;
pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod svg;
pub mod tessellation;
pub mod topology;

pub use error::{GeolisError, Result};
