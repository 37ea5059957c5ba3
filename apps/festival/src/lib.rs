//! # Festival application library
//!
//! CLI, configuration and logging for the `festival` binary. The scheduling
//! itself lives in `festival-core`.

pub mod cli;
pub mod config;
pub mod logging;
