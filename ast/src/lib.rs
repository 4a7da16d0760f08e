//! # OmegaSL - Abstract Syntax Tree
//!
//! The AST library contains the declaration, statement and expression nodes produced by the parser,
//! the [TypeExpr] references between them and the [Builtins] catalogue of types and functions that
//! every compilation unit starts with.

mod ast_declarations;
mod ast_expressions;
mod ast_statements;
mod ast_types;
mod builtins;

pub use ast_declarations::*;
pub use ast_expressions::*;
pub use ast_statements::*;
pub use ast_types::*;
pub use builtins::*;

pub use omegasl_library::{
    AddressMode, IoMode, SamplerFilter, ShaderStage, StaticSamplerDesc, ThreadgroupDesc,
};
pub use omegasl_text::tokens::TypeKeyword;
