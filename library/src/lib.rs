//! # OmegaSL - Shader Library
//!
//! Reflection data for compiled shaders and the binary `*.omegasllib` container that links them.
//!
//! The container is written little-endian with fixed field widths so that a library produced on one
//! machine can be loaded on any other.

mod error;
pub use error::*;

mod reflection;
pub use reflection::*;

mod reader;
mod writer;

/// File extension used for linked shader libraries
pub const LIBRARY_EXTENSION: &str = "omegasllib";
