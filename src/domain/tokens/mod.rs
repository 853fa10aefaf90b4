//! Token metadata and chart instrument resolution.

pub mod entities;
pub mod resolver;

pub use entities::*;
pub use resolver::*;
