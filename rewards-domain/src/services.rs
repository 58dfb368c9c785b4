// Pure domain services
pub mod aggregation;

pub use aggregation::*;
