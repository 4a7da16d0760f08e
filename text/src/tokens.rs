//! Tokens
//!
//! The tokens module contains all the definitions for tokens used by the OmegaSL lexer.

use crate::*;

/// An arbitrary identifier token string
#[derive(PartialEq, Eq, Hash, PartialOrd, Ord, Clone)]
pub struct Identifier(pub String);

impl std::fmt::Debug for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "\"{}\"", self.0)
    }
}

/// Reserved words that are not type names
#[derive(PartialEq, Eq, Debug, Copy, Clone, Hash)]
pub enum Keyword {
    Vertex,
    Fragment,
    Compute,
    If,
    Else,
    For,
    While,
    Struct,
    Internal,
    In,
    Out,
    Inout,
    Return,
    Static,
}

impl Keyword {
    pub const ALL: [Keyword; 14] = [
        Keyword::Vertex,
        Keyword::Fragment,
        Keyword::Compute,
        Keyword::If,
        Keyword::Else,
        Keyword::For,
        Keyword::While,
        Keyword::Struct,
        Keyword::Internal,
        Keyword::In,
        Keyword::Out,
        Keyword::Inout,
        Keyword::Return,
        Keyword::Static,
    ];

    /// Source spelling of the keyword
    pub fn name(&self) -> &'static str {
        match self {
            Keyword::Vertex => "vertex",
            Keyword::Fragment => "fragment",
            Keyword::Compute => "compute",
            Keyword::If => "if",
            Keyword::Else => "else",
            Keyword::For => "for",
            Keyword::While => "while",
            Keyword::Struct => "struct",
            Keyword::Internal => "internal",
            Keyword::In => "in",
            Keyword::Out => "out",
            Keyword::Inout => "inout",
            Keyword::Return => "return",
            Keyword::Static => "static",
        }
    }

    /// Find the keyword with the given spelling
    pub fn from_name(name: &str) -> Option<Keyword> {
        Keyword::ALL.iter().copied().find(|k| k.name() == name)
    }
}

/// Reserved words that name a builtin type
#[derive(PartialEq, Eq, Debug, Copy, Clone, Hash)]
pub enum TypeKeyword {
    Void,
    Int,
    Uint,
    Uint2,
    Uint3,
    Float,
    Float2,
    Float3,
    Float4,
    Buffer,
    Texture1d,
    Texture2d,
    Texture3d,
    Sampler2d,
    Sampler3d,
}

impl TypeKeyword {
    pub const ALL: [TypeKeyword; 15] = [
        TypeKeyword::Void,
        TypeKeyword::Int,
        TypeKeyword::Uint,
        TypeKeyword::Uint2,
        TypeKeyword::Uint3,
        TypeKeyword::Float,
        TypeKeyword::Float2,
        TypeKeyword::Float3,
        TypeKeyword::Float4,
        TypeKeyword::Buffer,
        TypeKeyword::Texture1d,
        TypeKeyword::Texture2d,
        TypeKeyword::Texture3d,
        TypeKeyword::Sampler2d,
        TypeKeyword::Sampler3d,
    ];

    /// Source spelling of the type name
    pub fn name(&self) -> &'static str {
        match self {
            TypeKeyword::Void => "void",
            TypeKeyword::Int => "int",
            TypeKeyword::Uint => "uint",
            TypeKeyword::Uint2 => "uint2",
            TypeKeyword::Uint3 => "uint3",
            TypeKeyword::Float => "float",
            TypeKeyword::Float2 => "float2",
            TypeKeyword::Float3 => "float3",
            TypeKeyword::Float4 => "float4",
            TypeKeyword::Buffer => "buffer",
            TypeKeyword::Texture1d => "texture1d",
            TypeKeyword::Texture2d => "texture2d",
            TypeKeyword::Texture3d => "texture3d",
            TypeKeyword::Sampler2d => "sampler2d",
            TypeKeyword::Sampler3d => "sampler3d",
        }
    }

    /// Find the type keyword with the given spelling
    pub fn from_name(name: &str) -> Option<TypeKeyword> {
        TypeKeyword::ALL.iter().copied().find(|k| k.name() == name)
    }
}

/// Any token that may appear in an OmegaSL file
#[derive(PartialEq, Debug, Clone)]
pub enum Token {
    Eof, // Marks the end of a stream

    Id(Identifier),
    Keyword(Keyword),
    TypeKeyword(TypeKeyword),

    /// Numeric literal kept as written, including any `f` or `u` suffix
    LiteralNumber(String),
    LiteralString(String),

    LeftBrace,
    RightBrace,
    LeftParen,
    RightParen,
    LeftSquareBracket,
    RightSquareBracket,
    Semicolon,
    Comma,
    Colon,
    Period,
    Asterisk,
    Ampersand,

    Equals,
    EqualsEquals,
    Plus,
    PlusPlus,
    PlusEquals,
    Minus,
    MinusMinus,
    MinusEquals,
    Less,
    LessEquals,
    Greater,
    GreaterEquals,
    ExclamationPoint,
    ExclamationPointEquals,
    ForwardSlash,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let text = match self {
            Token::Eof => "<eof>",
            Token::Id(id) => return write!(f, "{}", id.0),
            Token::Keyword(k) => k.name(),
            Token::TypeKeyword(k) => k.name(),
            Token::LiteralNumber(s) => return write!(f, "{}", s),
            Token::LiteralString(s) => return write!(f, "\"{}\"", s),
            Token::LeftBrace => "{",
            Token::RightBrace => "}",
            Token::LeftParen => "(",
            Token::RightParen => ")",
            Token::LeftSquareBracket => "[",
            Token::RightSquareBracket => "]",
            Token::Semicolon => ";",
            Token::Comma => ",",
            Token::Colon => ":",
            Token::Period => ".",
            Token::Asterisk => "*",
            Token::Ampersand => "&",
            Token::Equals => "=",
            Token::EqualsEquals => "==",
            Token::Plus => "+",
            Token::PlusPlus => "++",
            Token::PlusEquals => "+=",
            Token::Minus => "-",
            Token::MinusMinus => "--",
            Token::MinusEquals => "-=",
            Token::Less => "<",
            Token::LessEquals => "<=",
            Token::Greater => ">",
            Token::GreaterEquals => ">=",
            Token::ExclamationPoint => "!",
            Token::ExclamationPointEquals => "!=",
            Token::ForwardSlash => "/",
        };
        write!(f, "{}", text)
    }
}

/// A token paired with the location it starts at
#[derive(PartialEq, Clone)]
pub struct LexToken(pub Token, pub SourceLocation);

impl LexToken {
    pub fn to_loc(self) -> SourceLocation {
        self.1
    }

    pub fn with_no_loc(token: Token) -> LexToken {
        LexToken(token, SourceLocation::UNKNOWN)
    }
}

impl std::fmt::Debug for LexToken {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:?} @ {}", self.0, self.1.get_raw())
    }
}

#[test]
fn test_keyword_spelling() {
    for k in Keyword::ALL {
        assert_eq!(Keyword::from_name(k.name()), Some(k));
    }
    for k in TypeKeyword::ALL {
        assert_eq!(TypeKeyword::from_name(k.name()), Some(k));
    }
    assert_eq!(Keyword::from_name("float"), None);
    assert_eq!(TypeKeyword::from_name("sampler1d"), None);
}
