// Relay Infrastructure - Graph API Adapter
// Implements: DistributionApi over a Graph-style REST API

mod client;
mod config;
mod response;
mod signing;
mod upload;

pub use client::GraphDistributionApi;
pub use config::GraphConfig;
pub use signing::appsecret_proof;
