//! Common utilities for the Strata workspace.
//!
//! This crate provides shared infrastructure used by all components:
//! - **Warning System** - colored terminal output for unsupported features
//! - **Logger** - the observational logging seam handed to the tree walker

pub mod log;
pub mod warning;

pub use log::{ConsoleLogger, Logger, MemoryLogger, NullLogger};
