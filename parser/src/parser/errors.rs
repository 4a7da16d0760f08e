use super::*;

/// Provides details on why a parse operation failed
#[derive(PartialEq, Clone)]
pub struct ParseError(pub ParseErrorReason, pub Option<Vec<LexToken>>);

impl ParseError {
    /// Make an error for when there were unused tokens after parsing
    pub fn from_tokens_remaining(remaining: &[LexToken]) -> Self {
        ParseError(ParseErrorReason::TokensUnconsumed, Some(remaining.to_vec()))
    }

    /// The token the parser failed on
    pub fn failing_token(&self) -> Option<&LexToken> {
        self.1.as_ref().and_then(|tokens| tokens.first())
    }
}

impl<'a> From<ParseErrorContext<'a>> for ParseError {
    fn from(internal_error: ParseErrorContext<'a>) -> ParseError {
        ParseError(internal_error.1, Some(internal_error.0.to_vec()))
    }
}

impl std::fmt::Debug for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ParseError({:?}, {:?})",
            self.0,
            self.1
                .as_ref()
                .map(|vec| if vec.len() > 12 { &vec[..12] } else { vec })
        )
    }
}

impl CompileError for ParseError {
    fn print(&self, w: &mut MessagePrinter) -> std::fmt::Result {
        let token = self.failing_token();
        let loc = token.map(|t| t.1).unwrap_or(SourceLocation::UNKNOWN);
        w.write_message(
            &|f| match (&self.0, token) {
                (ParseErrorReason::WrongToken, Some(LexToken(Token::Eof, _))) => {
                    write!(f, "unexpected end of stream")
                }
                (ParseErrorReason::WrongToken, Some(LexToken(tok, _))) => {
                    write!(f, "unexpected token '{}'", tok)
                }
                (reason, _) => write!(f, "{}", reason),
            },
            loc,
            Severity::Error,
        )
    }
}

/// The basic reason for a parse failure
#[derive(PartialEq, Debug, Clone)]
pub enum ParseErrorReason {
    UnexpectedEndOfStream,
    TokensUnconsumed,
    WrongToken,
    StructWithResourceMap,
    ResourceMapWithoutShader,
    UnsupportedKeyword(Keyword),
    UnknownSamplerProperty(String),
    UnknownSamplerValue(String, String),
    InvalidThreadgroupSize,
    InvalidNumericLiteral(String),
}

impl std::fmt::Display for ParseErrorReason {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ParseErrorReason::UnexpectedEndOfStream => write!(f, "unexpected end of stream"),
            ParseErrorReason::TokensUnconsumed => write!(f, "failed to parse all tokens"),
            ParseErrorReason::WrongToken => write!(f, "unexpected token"),
            ParseErrorReason::StructWithResourceMap => {
                write!(f, "struct declarations cannot take a resource map")
            }
            ParseErrorReason::ResourceMapWithoutShader => {
                write!(f, "resource map requires a shader stage")
            }
            ParseErrorReason::UnsupportedKeyword(keyword) => {
                write!(f, "'{}' is not supported here", keyword.name())
            }
            ParseErrorReason::UnknownSamplerProperty(name) => {
                write!(f, "unknown sampler property '{}'", name)
            }
            ParseErrorReason::UnknownSamplerValue(property, value) => {
                write!(f, "unknown value '{}' for sampler property '{}'", value, property)
            }
            ParseErrorReason::InvalidThreadgroupSize => write!(f, "invalid threadgroup size"),
            ParseErrorReason::InvalidNumericLiteral(text) => {
                write!(f, "invalid numeric literal '{}'", text)
            }
        }
    }
}

impl ParseErrorReason {
    pub fn into_result<T>(self, remaining: &[LexToken]) -> ParseResult<T> {
        Err(ParseErrorContext(remaining, self))
    }

    /// Fail on the next token, which may be the end of the stream
    pub fn wrong_token<T>(remaining: &[LexToken]) -> ParseResult<T> {
        match remaining {
            [] => ParseErrorReason::end_of_stream(),
            _ => Err(ParseErrorContext(remaining, ParseErrorReason::WrongToken)),
        }
    }

    pub fn end_of_stream<'t, T>() -> ParseResult<'t, T> {
        Err(ParseErrorContext(
            &[],
            ParseErrorReason::UnexpectedEndOfStream,
        ))
    }
}

/// Result type for internal parse functions
pub type ParseResult<'t, T> = Result<(&'t [LexToken], T), ParseErrorContext<'t>>;

/// Internal error type for propagating error information
#[derive(PartialEq, Debug, Clone)]
pub struct ParseErrorContext<'a>(pub &'a [LexToken], pub ParseErrorReason);
