// ABOUTME: Library root for rollout - exposes the release pipeline for testing.
// ABOUTME: The main binary is in main.rs.

pub mod build;
pub mod config;
pub mod deploy;
pub mod error;
pub mod output;
pub mod process;
pub mod transcript;
pub mod types;
