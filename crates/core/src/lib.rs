// Relay Core - Domain Logic, Ports & Distribution Engine
// NO infrastructure dependencies: adapters live in the infra crates

pub mod application;
pub mod domain;
pub mod error;
pub mod port;

pub use error::{AppError, Disposition, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
