//! # OmegaSL - Semantic Analysis
//!
//! The sem library checks each global declaration against the declarations before it. Types are
//! resolved against the shared [Builtins][omegasl_ast::Builtins] catalogue first and then against
//! the structs of the current unit, which live in a [SemContext].

mod sem;

pub use sem::analyze;
pub use sem::AttributeContext;
pub use sem::ResourceDef;
pub use sem::Sem;
pub use sem::SemContext;
pub use sem::SemError;
pub use sem::StructDef;
