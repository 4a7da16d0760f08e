use log::trace;
use omegasl_ast::*;
use omegasl_text::tokens::*;
use omegasl_text::*;

/// Failure cases
mod errors;
pub use errors::{ParseError, ParseErrorReason};
use errors::{ParseErrorContext, ParseResult};

/// Parse an exact token from the start of the stream
fn parse_token<'t>(token: Token) -> impl Fn(&'t [LexToken]) -> ParseResult<'t, LexToken> {
    move |input: &'t [LexToken]| match input {
        [first @ LexToken(t, _), rest @ ..] if *t == token => Ok((rest, first.clone())),
        _ => ParseErrorReason::wrong_token(input),
    }
}

/// Parse a reserved keyword
fn parse_keyword<'t>(keyword: Keyword) -> impl Fn(&'t [LexToken]) -> ParseResult<'t, LexToken> {
    parse_token(Token::Keyword(keyword))
}

/// Check if the next token is the given token without consuming it
fn peek_token(input: &[LexToken], token: Token) -> bool {
    matches!(input.first(), Some(LexToken(t, _)) if *t == token)
}

/// Match a single identifier token
fn match_identifier(input: &[LexToken]) -> ParseResult<Located<String>> {
    match input {
        [LexToken(Token::Id(Identifier(name)), loc), rest @ ..] => {
            Ok((rest, Located::new(name.clone(), *loc)))
        }
        _ => ParseErrorReason::wrong_token(input),
    }
}

/// Match an identifier with an exact spelling
///
/// Used for contextual words such as sampler property names which are not reserved.
fn match_word<'t>(input: &'t [LexToken], word: &str) -> ParseResult<'t, LexToken> {
    match input {
        [first @ LexToken(Token::Id(Identifier(name)), _), rest @ ..] if name == word => {
            Ok((rest, first.clone()))
        }
        _ => ParseErrorReason::wrong_token(input),
    }
}

/// Match a numeric literal and return the literal text
fn match_number(input: &[LexToken]) -> ParseResult<Located<String>> {
    match input {
        [LexToken(Token::LiteralNumber(text), loc), rest @ ..] => {
            Ok((rest, Located::new(text.clone(), *loc)))
        }
        _ => ParseErrorReason::wrong_token(input),
    }
}

/// Parse an unsigned integer literal such as a register number
fn parse_unsigned<'t>(input: &'t [LexToken]) -> ParseResult<'t, u32> {
    let (rest, text) = match_number(input)?;
    let digits = text.strip_suffix('u').unwrap_or(text.as_str());
    match digits.parse::<u32>() {
        Ok(value) => Ok((rest, value)),
        Err(_) => ParseErrorReason::InvalidNumericLiteral(text.to_node()).into_result(input),
    }
}

/// Parse an optional `: name` attribute after a field or parameter
fn parse_attribute(input: &[LexToken]) -> ParseResult<Option<Located<String>>> {
    match parse_token(Token::Colon)(input) {
        Ok((rest, _)) => {
            let (rest, attribute) = match_identifier(rest)?;
            Ok((rest, Some(attribute)))
        }
        Err(_) => Ok((input, None)),
    }
}

/// Parse a comma separated list of items between the given open and close tokens
///
/// An empty list is allowed.
fn parse_list<'t, T>(
    input: &'t [LexToken],
    open: Token,
    close: Token,
    item: impl Fn(&'t [LexToken]) -> ParseResult<'t, T>,
) -> ParseResult<'t, Vec<T>> {
    let (mut input, _) = parse_token(open)(input)?;
    let mut items = Vec::new();
    if let Ok((rest, _)) = parse_token(close.clone())(input) {
        return Ok((rest, items));
    }
    loop {
        let (rest, value) = item(input)?;
        items.push(value);
        if let Ok((rest, _)) = parse_token(Token::Comma)(rest) {
            input = rest;
            continue;
        }
        let (rest, _) = parse_token(close)(rest)?;
        return Ok((rest, items));
    }
}

// Implement parsing for type references
mod types;
use types::parse_type_expr;

// Implement parsing for expressions
mod expressions;
use expressions::parse_expr;

// Implement parsing for statements and blocks
mod statements;
use statements::parse_block;

// Implement parsing for struct declarations
mod structs;
use structs::parse_struct;

// Implement parsing for resources and resource maps
mod globals;
use globals::{parse_resource_map, parse_resource_or_function, parse_static_resource};

// Implement parsing for shader entry points
mod functions;
use functions::{parse_function, parse_shader};

/// Parse a single global declaration
fn parse_global_decl(input: &[LexToken]) -> ParseResult<Decl> {
    let (input, resource_map) = match input {
        [LexToken(Token::LeftSquareBracket, _), ..] => {
            let (rest, map) = parse_resource_map(input)?;
            (rest, Some(map))
        }
        _ => (input, None),
    };

    match (input.first(), resource_map) {
        (Some(LexToken(Token::Keyword(Keyword::Struct), _)), Some(_)) => {
            ParseErrorReason::StructWithResourceMap.into_result(input)
        }
        (Some(LexToken(Token::Keyword(Keyword::Struct), _)), None) => {
            let (rest, sd) = parse_struct(input)?;
            Ok((rest, Decl::Struct(sd)))
        }
        (
            Some(LexToken(
                Token::Keyword(Keyword::Vertex | Keyword::Fragment | Keyword::Compute),
                _,
            )),
            map,
        ) => {
            let (rest, sd) = parse_shader(input, map.unwrap_or_default())?;
            Ok((rest, Decl::Shader(sd)))
        }
        (_, Some(_)) => ParseErrorReason::ResourceMapWithoutShader.into_result(input),
        (Some(LexToken(Token::Keyword(Keyword::Static), _)), None) => {
            let (rest, rd) = parse_static_resource(input)?;
            Ok((rest, Decl::Resource(rd)))
        }
        (_, None) => parse_resource_or_function(input),
    }
}

/// Streaming parser that produces one global declaration per call
pub struct Parser<'t> {
    remaining: &'t [LexToken],
}

impl<'t> Parser<'t> {
    /// Create a parser over a token stream produced by the lexer
    pub fn new(tokens: &'t [LexToken]) -> Self {
        Parser { remaining: tokens }
    }

    /// Parse the next global declaration
    ///
    /// Returns `None` once the end of the stream is reached. After an error the parser should not be
    /// used further as there is no recovery.
    pub fn next_decl(&mut self) -> Result<Option<Decl>, ParseError> {
        // Stray semicolons between declarations are allowed
        while let [LexToken(Token::Semicolon, _), rest @ ..] = self.remaining {
            self.remaining = rest;
        }

        match self.remaining {
            [] | [LexToken(Token::Eof, _), ..] => return Ok(None),
            _ => {}
        }

        let (rest, decl) = parse_global_decl(self.remaining)?;
        trace!("parsed declaration {:?}", decl.name());
        self.remaining = rest;
        Ok(Some(decl))
    }

    /// Tokens that have not been parsed yet
    pub fn remaining(&self) -> &'t [LexToken] {
        self.remaining
    }
}

/// Parse a whole token stream into its global declarations
pub fn parse(tokens: &[LexToken]) -> Result<Vec<Decl>, ParseError> {
    let mut parser = Parser::new(tokens);
    let mut decls = Vec::new();
    while let Some(decl) = parser.next_decl()? {
        decls.push(decl);
    }
    Ok(decls)
}

#[cfg(test)]
mod test_support;

#[test]
fn test_parser_stream() {
    use test_support::*;

    let (tokens, _) = lex_from_str(
        "struct S { float a; }; ; buffer<S> data : 1; [in data] compute(x=1,y=1,z=1) void main(){}",
    );
    let mut parser = Parser::new(&tokens);

    match parser.next_decl() {
        Ok(Some(Decl::Struct(sd))) => assert_eq!(sd.name.node, "S"),
        other => panic!("{:?}", other),
    }
    match parser.next_decl() {
        Ok(Some(Decl::Resource(rd))) => assert_eq!((rd.name.node.as_str(), rd.register), ("data", 1)),
        other => panic!("{:?}", other),
    }
    match parser.next_decl() {
        Ok(Some(Decl::Shader(sd))) => {
            assert_eq!(sd.stage, ShaderStage::Compute);
            assert_eq!(sd.resource_map.len(), 1);
        }
        other => panic!("{:?}", other),
    }
    assert_eq!(parser.next_decl(), Ok(None));
    assert_eq!(parser.next_decl(), Ok(None));
}

#[test]
fn test_global_decl_errors() {
    use test_support::*;
    let global = ParserTester::new(parse_global_decl);

    global.expect_fail(
        "[in a] struct S { float a; };",
        ParseErrorReason::StructWithResourceMap,
        7,
    );
    global.expect_fail(
        "[in a] buffer<float> a : 0;",
        ParseErrorReason::ResourceMapWithoutShader,
        7,
    );
    global.expect_fail(
        "[in a] static sampler2d s;",
        ParseErrorReason::ResourceMapWithoutShader,
        7,
    );
    global.expect_fail("buffer<float> b 0;", ParseErrorReason::WrongToken, 16);
}

#[test]
fn test_parse_errors_report_location() {
    use test_support::*;

    let (tokens, source_manager) = lex_from_str("struct S {\n  float a\n};");
    let err = match parse(&tokens) {
        Ok(decls) => panic!("{:?}", decls),
        Err(err) => err,
    };
    assert_eq!(err.0, ParseErrorReason::WrongToken);
    assert_eq!(
        err.to_text(&source_manager),
        "parser_test.omegasl:3:1: error: unexpected token '}'\n};\n^\n"
    );
}
