//! Embeddable core library for quickfix.
//!
//! Provides a clap-free, I/O-abstracted entry point around the resolution
//! engine, suitable for linking into an IDE host or other process.
//!
//! # Port traits
//!
//! All I/O is abstracted behind port traits in [`ports`]:
//! - [`PassSource`](ports::PassSource) loads analysis passes
//! - [`WritePort`](ports::WritePort) writes files and creates directories
//!
//! The [`adapters`] module provides default filesystem-backed implementations.
//!
//! # Entry points
//!
//! - [`run_resolve`](pipeline::run_resolve) resolves every diagnostic into a report
//! - [`run_apply`](pipeline::run_apply) applies one resolved fix to its source

pub mod adapters;
pub mod load;
pub mod pipeline;
pub mod policy;
pub mod ports;
pub mod settings;

pub use load::{LoadedPass, PassLoadError, load_pass_file, load_passes};
