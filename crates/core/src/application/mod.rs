// Application Layer - Use Cases

pub mod distribution;

// Re-exports
pub use distribution::DistributionEngine;
