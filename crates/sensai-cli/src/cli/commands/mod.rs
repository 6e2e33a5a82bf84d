//! CLI command handlers.

pub mod assessment;
pub mod config;
pub mod generate;
pub mod login;
pub mod wizard;
