//! Infrastructure layer for filesystem and environment interactions.
//!
//! Resolves where dexview keeps its data (favorites store, trace file) and its
//! optional configuration file.

pub mod paths;

pub use paths::{config_dir, data_dir, expand_tilde};
