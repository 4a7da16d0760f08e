//! # OmegaSL
//!
//! This is a meta crate that re-exports all the sub libraries and drives them to turn one OmegaSL
//! source file into a shader library

pub use omegasl_ast as ast;
pub use omegasl_hlsl as hlsl;
pub use omegasl_lexer as lexer;
pub use omegasl_library as library;
pub use omegasl_parser as parser;
pub use omegasl_sem as sem;
pub use omegasl_text as text;

pub use dxc_invoker;

mod compile;
pub use compile::*;
