//! # OmegaSL - Lexer
//!
//! The lexer converts source text into a sequence of [LexToken][omegasl_text::tokens::LexToken]s.
//! Whitespace and comments are dropped and the stream always ends with a single end of file token.

mod lexer;

pub use lexer::lex;
pub use lexer::LexerError;
pub use lexer::LexerErrorReason;
pub use lexer::TokenStream;
