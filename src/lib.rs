// Library interface for quicknotes-tools
// Exposes internal modules for testing and potential library usage

pub mod cli;
pub mod clock;
pub mod config;
pub mod docker;
pub mod errors;
pub mod release;
pub mod server;
