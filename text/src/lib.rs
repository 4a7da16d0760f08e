//! # OmegaSL - Source Processing Types
//!
//! The text library contains tools for managing shader source files.
//! * The [SourceLocation] struct is used to identify any location in a source file.
//! * The [SourceManager] owns all files given to the compiler and gives meaning to [SourceLocation].
//! * The [CompileError] trait is implemented by the error type of every compilation step.
//! * The [tokens] module contains the definitions for tokens that have been generated from the raw text.

mod location;
pub use location::*;

mod errors;
pub use errors::*;

pub mod tokens;
