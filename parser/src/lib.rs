//! # OmegaSL - Parser
//!
//! The parser converts from a stream of lex tokens into declarations. Declarations are read one at
//! a time with [Parser::next_decl] so each can be checked and emitted before the next is parsed.

mod parser;

pub use parser::parse;
pub use parser::ParseError;
pub use parser::ParseErrorReason;

pub use parser::Parser;
