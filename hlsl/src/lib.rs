//! # OmegaSL - HLSL Backend
//!
//! This library contains the [Backend] contract that turns validated declarations into library
//! entries, and the [HlslBackend] which implements it by generating HLSL source.
//!
//! The generated source targets shader model 5.0. When a `dxc` executable is configured the source
//! is compiled and the resulting object becomes the entry bytecode, otherwise the HLSL text itself
//! is stored.

mod backend;
pub use backend::*;

mod hlsl;
pub use hlsl::{HlslBackend, HlslOptions};

pub use dxc_invoker::DxcCompiler;
