//! Releaseforge - canonical release names for media files
//!
//! This library crate exposes the CLI's building blocks for integration testing.

pub mod apply;
pub mod catalog;
pub mod config;
pub mod namer;
pub mod paths;
pub mod prompt;
