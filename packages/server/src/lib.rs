// Newsdesk API core
//
// HTTP surface over the classification and verification pipeline in the
// `newsdesk` crate. Configuration is read once at startup and handed to the
// pipeline components through `kernel::ServerDeps`.

pub mod config;
pub mod kernel;
pub mod server;

pub use config::*;
