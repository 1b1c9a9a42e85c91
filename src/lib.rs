//! Shipxy maritime data API as typed operations and MCP tools

pub mod client;
pub mod config;
pub mod endpoint;
pub mod errors;
pub mod models;
pub mod query;
pub mod server;
pub mod ship_type;
pub mod tools;
pub mod transport;

pub use client::ShipxyClient;
pub use errors::{ErrorKind, Result, ShipxyError};
