//! Core configuration and constants for rotadb
//!
//! This crate contains the pieces shared between the schema applier and the
//! CLI binary.

mod config;
mod constants;

pub use config::*;
pub use constants::*;
