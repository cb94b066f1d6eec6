//! Helpers for the command line front end.
//!
//! ## Modules
//!
//! - [`config`] - JSON loader for [`TreeConfig`](crate::tree::TreeConfig)
//! - [`input`] - Splits input files into one sequence per line
//! - [`progress`] - Progress bar that compiles away without the `progress` feature

pub mod config;
pub mod input;
pub mod progress;

pub use config::*;
pub use input::*;
