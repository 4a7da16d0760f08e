use log::trace;
use omegasl_text::tokens::*;
use omegasl_text::*;

/// Lexer over a single source buffer that produces one token per call
pub struct TokenStream<'bytes> {
    input_bytes: &'bytes [u8],
    base_location: SourceLocation,
    current_offset: usize,
    finished: bool,
}

impl<'bytes> TokenStream<'bytes> {
    /// Create a new token stream
    pub fn new(input: &'bytes str, base_location: SourceLocation) -> Self {
        TokenStream {
            input_bytes: input.as_bytes(),
            base_location,
            current_offset: 0,
            finished: false,
        }
    }

    /// Check if the end of file token has already been returned
    pub fn end_of_stream(&self) -> bool {
        self.finished
    }

    fn location_of(&self, rest: &[u8]) -> SourceLocation {
        let offset = self.input_bytes.len() - rest.len();
        self.base_location.offset(offset as u32)
    }

    /// Read the next token from the stream
    ///
    /// Once the input is exhausted this keeps returning [Token::Eof].
    pub fn next(&mut self) -> Result<LexToken, LexerError> {
        let input = &self.input_bytes[self.current_offset..];

        let input = match skip_trivia(input) {
            Ok(rest) => rest,
            Err(LexErrorContext(rest, reason)) => {
                return Err(LexerError::new(reason, self.location_of(rest)))
            }
        };
        self.current_offset = self.input_bytes.len() - input.len();

        if input.is_empty() {
            self.finished = true;
            return Ok(LexToken(Token::Eof, self.location_of(input)));
        }

        match token_intermediate(input) {
            Ok((remaining, next_token)) => {
                let tok = LexToken(next_token, self.location_of(input));
                self.current_offset = self.input_bytes.len() - remaining.len();
                Ok(tok)
            }
            Err(LexErrorContext(rest, reason)) => {
                Err(LexerError::new(reason, self.location_of(rest)))
            }
        }
    }

    /// Read all tokens up to and including the end of file token
    pub fn read_to_end(&mut self) -> Result<Vec<LexToken>, LexerError> {
        let mut tokens = Vec::new();
        while !self.end_of_stream() {
            tokens.push(self.next()?);
        }
        Ok(tokens)
    }
}

/// Run the lexer over a file owned by a source manager
pub fn lex(file_id: FileId, source_manager: &SourceManager) -> Result<Vec<LexToken>, LexerError> {
    let contents = source_manager.get_contents(file_id);
    let base = source_manager.get_source_location_from_file_offset(file_id, StreamLocation(0));
    let tokens = TokenStream::new(contents, base).read_to_end()?;
    trace!(
        "lexed {} tokens from {}",
        tokens.len(),
        source_manager.get_file_name(file_id).0
    );
    Ok(tokens)
}

/// Provides details on why a lex operation failed
#[derive(PartialEq, Clone, Debug)]
pub struct LexerError {
    pub reason: LexerErrorReason,
    pub location: SourceLocation,
}

/// The reason for a lex failure
#[derive(PartialEq, Eq, Clone, Debug)]
pub enum LexerErrorReason {
    /// Generic wrong characters expected for a certain token
    UnexpectedBytes,

    /// Internal error code for failing to select a token type
    OtherTokenBytes,

    /// Reached end of the input stream
    EndOfStream,

    /// A number is followed by characters that are not a valid suffix
    NumberInvalidSuffix,

    /// A block comment is never closed
    BlockCommentWrapsFile,

    /// A string literal wraps the end of a line
    StringWrapsLine,

    /// A string literal never ends in the stream
    StringWrapsFile,

    /// A string literal contains invalid characters
    StringContainsInvalidCharacters,
}

impl LexerError {
    /// Create a new lexer error
    pub fn new(reason: LexerErrorReason, location: SourceLocation) -> Self {
        LexerError { reason, location }
    }
}

impl CompileError for LexerError {
    fn print(&self, w: &mut MessagePrinter) -> std::fmt::Result {
        let text = match &self.reason {
            LexerErrorReason::UnexpectedBytes => "unexpected characters",
            LexerErrorReason::OtherTokenBytes => "internal lexer error",
            LexerErrorReason::EndOfStream => "unexpected end of stream",
            LexerErrorReason::NumberInvalidSuffix => "invalid suffix on numeric literal",
            LexerErrorReason::BlockCommentWrapsFile => "block comment never terminates",
            LexerErrorReason::StringWrapsLine => "string literal not terminated at end of line",
            LexerErrorReason::StringWrapsFile => "string literal never terminates",
            LexerErrorReason::StringContainsInvalidCharacters => {
                "string literal contains invalid characters"
            }
        };
        w.write_message(&|f| write!(f, "{}", text), self.location, Severity::Error)
    }
}

/// Internal error data when a lexer fails to lex
#[derive(PartialEq, Debug, Clone)]
struct LexErrorContext<'b>(&'b [u8], LexerErrorReason);

/// Internal error result type
type LexResult<'b, O> = Result<(&'b [u8], O), LexErrorContext<'b>>;

/// Make an error for when the wrong characters were encountered to parse a certain token
fn wrong_chars<T>(input: &[u8]) -> LexResult<T> {
    Err(LexErrorContext(input, LexerErrorReason::UnexpectedBytes))
}

/// Make an error for when the characters are encountered which indicate we are another token
fn other_token_chars<T>(input: &[u8]) -> LexResult<T> {
    Err(LexErrorContext(input, LexerErrorReason::OtherTokenBytes))
}

/// Make an error when the end of stream was encountered while trying to lex a certain token
fn end_of_stream<T>() -> LexResult<'static, T> {
    Err(LexErrorContext(&[], LexerErrorReason::EndOfStream))
}

type DynLexFn<'f, T> = &'f dyn Fn(&[u8]) -> LexResult<T>;

/// Lex a token from a set of lexers
fn choose<'b, T>(lex_fns: &[DynLexFn<T>], input: &'b [u8]) -> LexResult<'b, T> {
    for lex_fn in lex_fns {
        match lex_fn(input) {
            Ok(ok) => return Ok(ok),
            // Lex function did not recognise the start of its token
            Err(LexErrorContext(_, LexerErrorReason::OtherTokenBytes)) => {}
            // Lex function accepted the token type but the token was malformed
            err => return err,
        }
    }
    wrong_chars(input)
}

/// Parse a single decimal digit
fn digit(input: &[u8]) -> LexResult<u8> {
    match input.first() {
        None => end_of_stream(),
        Some(c @ b'0'..=b'9') => Ok((&input[1..], *c)),
        Some(_) => wrong_chars(input),
    }
}

/// Parse a run of decimal digits
fn digits(input: &[u8]) -> LexResult<&[u8]> {
    let (mut rest, _) = digit(input)?;
    while let Ok((next, _)) = digit(rest) {
        rest = next;
    }
    let used = input.len() - rest.len();
    Ok((rest, &input[..used]))
}

#[test]
fn test_digits() {
    let p = digits;
    assert_eq!(p(b"086"), Ok((&b""[..], &b"086"[..])));
    assert_eq!(p(b"086;"), Ok((&b";"[..], &b"086"[..])));
    assert_eq!(p(b"x"), wrong_chars(b"x"));
    assert_eq!(p(b""), end_of_stream());
}

fn is_identifier_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_'
}

/// Parse a numeric literal: digits with an optional fraction and an optional `f` or `u` suffix
///
/// The literal text is kept as written so the parser can decide how to interpret it.
fn literal_number(input: &[u8]) -> LexResult<Token> {
    let (mut rest, _) = digits(input)?;

    let mut has_fraction = false;
    if let [b'.', after_dot @ ..] = rest {
        has_fraction = true;
        rest = match digits(after_dot) {
            Ok((after_digits, _)) => after_digits,
            Err(_) => after_dot,
        };
    }

    rest = match rest {
        [b'f', after @ ..] => after,
        [b'u', ..] if has_fraction => {
            return Err(LexErrorContext(rest, LexerErrorReason::NumberInvalidSuffix))
        }
        [b'u', after @ ..] => after,
        _ => rest,
    };

    if let Some(c) = rest.first() {
        if is_identifier_char(*c) {
            return Err(LexErrorContext(rest, LexerErrorReason::NumberInvalidSuffix));
        }
    }

    let used = input.len() - rest.len();
    let text = input[..used].iter().map(|b| *b as char).collect();
    Ok((rest, Token::LiteralNumber(text)))
}

#[test]
fn test_literal_number() {
    let p = literal_number;
    let num = |s: &str| Token::LiteralNumber(s.to_string());
    assert_eq!(p(b"0"), Ok((&b""[..], num("0"))));
    assert_eq!(p(b"12;"), Ok((&b";"[..], num("12"))));
    assert_eq!(p(b"12u)"), Ok((&b")"[..], num("12u"))));
    assert_eq!(p(b"1.0"), Ok((&b""[..], num("1.0"))));
    assert_eq!(p(b"1.5f,"), Ok((&b","[..], num("1.5f"))));
    assert_eq!(p(b"3f"), Ok((&b""[..], num("3f"))));
    assert_eq!(p(b"2."), Ok((&b""[..], num("2."))));
    assert_eq!(
        p(b"1.0u"),
        Err(LexErrorContext(&b"u"[..], LexerErrorReason::NumberInvalidSuffix))
    );
    assert_eq!(
        p(b"12abc"),
        Err(LexErrorContext(&b"abc"[..], LexerErrorReason::NumberInvalidSuffix))
    );
}

/// Parse a literal string
///
/// Strings have no escape sequences and must close on the line they start on.
fn literal_string(input: &[u8]) -> LexResult<Token> {
    let rest = match input.split_first() {
        Some((b'"', rest)) => rest,
        _ => return other_token_chars(input),
    };

    match rest.iter().position(|c| *c == b'"' || *c == b'\n') {
        Some(pos) if rest[pos] == b'"' => match std::str::from_utf8(&rest[..pos]) {
            Ok(s) => Ok((&rest[pos + 1..], Token::LiteralString(s.to_string()))),
            Err(_) => Err(LexErrorContext(
                input,
                LexerErrorReason::StringContainsInvalidCharacters,
            )),
        },
        Some(_) => Err(LexErrorContext(input, LexerErrorReason::StringWrapsLine)),
        None => Err(LexErrorContext(input, LexerErrorReason::StringWrapsFile)),
    }
}

#[test]
fn test_literal_string() {
    let p = literal_string;
    assert_eq!(
        p(b"\"\""),
        Ok((&b""[..], Token::LiteralString(String::new())))
    );
    assert_eq!(
        p(b"\"hello world\";"),
        Ok((&b";"[..], Token::LiteralString("hello world".to_string())))
    );
    assert_eq!(p(b"abc"), other_token_chars(b"abc"));
    assert_eq!(
        p(b"\"abc\n\""),
        Err(LexErrorContext(&b"\"abc\n\""[..], LexerErrorReason::StringWrapsLine))
    );
    assert_eq!(
        p(b"\"abc"),
        Err(LexErrorContext(&b"\"abc"[..], LexerErrorReason::StringWrapsFile))
    );
}

/// Parse an identifier or a keyword as an identifier
fn identifier(input: &[u8]) -> LexResult<Identifier> {
    match input.first() {
        None => return end_of_stream(),
        Some(b'A'..=b'Z' | b'a'..=b'z' | b'_') => {}
        Some(_) => return other_token_chars(input),
    }

    let len = input
        .iter()
        .position(|c| !is_identifier_char(*c))
        .unwrap_or(input.len());
    let name = input[..len].iter().map(|b| *b as char).collect();
    Ok((&input[len..], Identifier(name)))
}

/// Parse an identifier, keyword or builtin type name
///
/// Reserved keywords win over type keywords which win over plain identifiers.
fn any_word(input: &[u8]) -> LexResult<Token> {
    let (stream, id) = identifier(input)?;

    let tok = if let Some(keyword) = Keyword::from_name(&id.0) {
        Token::Keyword(keyword)
    } else if let Some(type_keyword) = TypeKeyword::from_name(&id.0) {
        Token::TypeKeyword(type_keyword)
    } else {
        Token::Id(id)
    };
    Ok((stream, tok))
}

#[test]
fn test_any_word() {
    let p = any_word;
    assert_eq!(
        p(b"return;"),
        Ok((&b";"[..], Token::Keyword(Keyword::Return)))
    );
    assert_eq!(
        p(b"float4 "),
        Ok((&b" "[..], Token::TypeKeyword(TypeKeyword::Float4)))
    );
    assert_eq!(
        p(b"float5"),
        Ok((&b""[..], Token::Id(Identifier("float5".to_string()))))
    );
    assert_eq!(
        p(b"_in1"),
        Ok((&b""[..], Token::Id(Identifier("_in1".to_string()))))
    );
    assert_eq!(p(b"9a"), other_token_chars(b"9a"));
}

/// Parse whitespace characters
fn whitespace(input: &[u8]) -> LexResult<()> {
    let len = input
        .iter()
        .position(|c| !matches!(c, b' ' | b'\t' | b'\r' | b'\n'))
        .unwrap_or(input.len());
    if len == 0 {
        other_token_chars(input)
    } else {
        Ok((&input[len..], ()))
    }
}

/// Parse a line comment
fn line_comment(input: &[u8]) -> LexResult<()> {
    if input.starts_with(b"//") {
        match input.iter().position(|c| *c == b'\n') {
            Some(pos) => Ok((&input[pos..], ())),
            None => Ok((&[], ())),
        }
    } else {
        other_token_chars(input)
    }
}

/// Parse a block comment
fn block_comment(input: &[u8]) -> LexResult<()> {
    if input.starts_with(b"/*") {
        // Nested blocks are not supported
        let mut search = &input[2..];
        while search.len() >= 2 {
            if search.starts_with(b"*/") {
                return Ok((&search[2..], ()));
            }
            search = &search[1..];
        }
        Err(LexErrorContext(input, LexerErrorReason::BlockCommentWrapsFile))
    } else {
        other_token_chars(input)
    }
}

/// Skip over any amount of whitespace and comments
fn skip_trivia(mut input: &[u8]) -> Result<&[u8], LexErrorContext> {
    loop {
        match choose(&[&whitespace, &line_comment, &block_comment], input) {
            Ok((rest, ())) => input = rest,
            Err(LexErrorContext(_, LexerErrorReason::UnexpectedBytes)) => return Ok(input),
            Err(err) => return Err(err),
        }
    }
}

#[test]
fn test_trivia() {
    assert!(whitespace(b"").is_err());
    assert!(line_comment(b"").is_err());
    assert!(block_comment(b"").is_err());
    assert_eq!(whitespace(b" \t\r\nx"), Ok((&b"x"[..], ())));
    assert_eq!(line_comment(b"// abc\nx"), Ok((&b"\nx"[..], ())));
    assert_eq!(line_comment(b"// abc"), Ok((&b""[..], ())));
    assert_eq!(block_comment(b"/* a\n b */x"), Ok((&b"x"[..], ())));
    assert_eq!(block_comment(b"/**/"), Ok((&b""[..], ())));
    assert_eq!(
        block_comment(b"/* a"),
        Err(LexErrorContext(&b"/* a"[..], LexerErrorReason::BlockCommentWrapsFile))
    );
    assert_eq!(
        skip_trivia(b"  // c\n /* d */ x"),
        Ok(&b"x"[..])
    );
    assert_eq!(skip_trivia(b"x"), Ok(&b"x"[..]));
    assert_eq!(skip_trivia(b""), Ok(&b""[..]));
}

/// Parse a single character symbol into a token
fn symbol_single(op_char: u8, op_token: Token) -> impl Fn(&[u8]) -> LexResult<Token> {
    move |input: &[u8]| match input {
        [c, ..] if *c == op_char => Ok((&input[1..], op_token.clone())),
        _ => other_token_chars(input),
    }
}

/// Parse an operator that may also be followed by `=` or doubled to form a second operator
///
/// [Token::Eof] marks a form that does not exist for the operator.
fn symbol_op_or_op_equals(
    op_char: u8,
    op_token: Token,
    op_equals_token: Token,
    op_op_token: Token,
) -> impl Fn(&[u8]) -> LexResult<Token> {
    move |input: &[u8]| match input {
        [c, b'=', ..] if *c == op_char && op_equals_token != Token::Eof => {
            Ok((&input[2..], op_equals_token.clone()))
        }
        [c1, c2, ..] if *c1 == op_char && *c2 == op_char && op_op_token != Token::Eof => {
            Ok((&input[2..], op_op_token.clone()))
        }
        [c, ..] if *c == op_char => Ok((&input[1..], op_token.clone())),
        _ => other_token_chars(input),
    }
}

/// Parse a = or == token
fn symbol_equals(input: &[u8]) -> LexResult<Token> {
    symbol_op_or_op_equals(b'=', Token::Equals, Token::EqualsEquals, Token::Eof)(input)
}

/// Parse a +, += or ++ token
fn symbol_plus(input: &[u8]) -> LexResult<Token> {
    symbol_op_or_op_equals(b'+', Token::Plus, Token::PlusEquals, Token::PlusPlus)(input)
}

/// Parse a -, -= or -- token
fn symbol_minus(input: &[u8]) -> LexResult<Token> {
    symbol_op_or_op_equals(b'-', Token::Minus, Token::MinusEquals, Token::MinusMinus)(input)
}

/// Parse a < or <= token
fn symbol_less(input: &[u8]) -> LexResult<Token> {
    symbol_op_or_op_equals(b'<', Token::Less, Token::LessEquals, Token::Eof)(input)
}

/// Parse a > or >= token
fn symbol_greater(input: &[u8]) -> LexResult<Token> {
    symbol_op_or_op_equals(b'>', Token::Greater, Token::GreaterEquals, Token::Eof)(input)
}

/// Parse a ! or != token
fn symbol_exclamation(input: &[u8]) -> LexResult<Token> {
    symbol_op_or_op_equals(
        b'!',
        Token::ExclamationPoint,
        Token::ExclamationPointEquals,
        Token::Eof,
    )(input)
}

#[test]
fn test_symbol_equals() {
    let p = symbol_equals;
    assert_eq!(p(b"="), Ok((&b""[..], Token::Equals)));
    assert_eq!(p(b"= "), Ok((&b" "[..], Token::Equals)));
    assert_eq!(p(b"=="), Ok((&b""[..], Token::EqualsEquals)));
    assert_eq!(p(b"==="), Ok((&b"="[..], Token::EqualsEquals)));
    assert_eq!(p(b""), other_token_chars(b""));
    assert_eq!(p(b" "), other_token_chars(b" "));
}

#[test]
fn test_symbol_plus() {
    // Covers the form shared by + and -
    let p = symbol_plus;
    assert_eq!(p(b"+"), Ok((&b""[..], Token::Plus)));
    assert_eq!(p(b"+="), Ok((&b""[..], Token::PlusEquals)));
    assert_eq!(p(b"++"), Ok((&b""[..], Token::PlusPlus)));
    assert_eq!(p(b"+++"), Ok((&b"+"[..], Token::PlusPlus)));
    assert_eq!(p(b"+ +"), Ok((&b" +"[..], Token::Plus)));
}

#[test]
fn test_symbol_less() {
    let p = symbol_less;
    assert_eq!(p(b"<"), Ok((&b""[..], Token::Less)));
    assert_eq!(p(b"<="), Ok((&b""[..], Token::LessEquals)));
    assert_eq!(p(b"<<"), Ok((&b"<"[..], Token::Less)));
}

/// Parse a symbol into a token
fn symbol(input: &[u8]) -> LexResult<Token> {
    choose(
        &[
            &symbol_single(b'{', Token::LeftBrace),
            &symbol_single(b'}', Token::RightBrace),
            &symbol_single(b'(', Token::LeftParen),
            &symbol_single(b')', Token::RightParen),
            &symbol_single(b'[', Token::LeftSquareBracket),
            &symbol_single(b']', Token::RightSquareBracket),
            &symbol_single(b';', Token::Semicolon),
            &symbol_single(b',', Token::Comma),
            &symbol_single(b':', Token::Colon),
            &symbol_single(b'.', Token::Period),
            &symbol_single(b'*', Token::Asterisk),
            &symbol_single(b'&', Token::Ampersand),
            &symbol_single(b'/', Token::ForwardSlash),
            &symbol_equals,
            &symbol_plus,
            &symbol_minus,
            &symbol_less,
            &symbol_greater,
            &symbol_exclamation,
        ],
        input,
    )
}

/// Parse a single token - without a location
fn token_intermediate(input: &[u8]) -> LexResult<Token> {
    match input.first() {
        Some(b'0'..=b'9') => literal_number(input),
        Some(b'A'..=b'Z' | b'a'..=b'z' | b'_') => any_word(input),
        Some(_) => choose(&[&literal_string, &symbol], input),
        None => end_of_stream(),
    }
}

#[test]
fn test_token() {
    macro_rules! assert_token {
        ( $source:expr, $token:expr ) => {
            assert_eq!(token_intermediate($source), Ok((&b""[..], $token)));
        };
    }

    assert_token!(b"struct", Token::Keyword(Keyword::Struct));
    assert_token!(b"inout", Token::Keyword(Keyword::Inout));
    assert_token!(b"sampler2d", Token::TypeKeyword(TypeKeyword::Sampler2d));
    assert_token!(b"x", Token::Id(Identifier("x".to_string())));
    assert_token!(b"1.0f", Token::LiteralNumber("1.0f".to_string()));
    assert_token!(b"\"s\"", Token::LiteralString("s".to_string()));
    assert_token!(b"{", Token::LeftBrace);
    assert_token!(b"]", Token::RightSquareBracket);
    assert_token!(b"*", Token::Asterisk);
    assert_token!(b"&", Token::Ampersand);
    assert_token!(b"/", Token::ForwardSlash);
    assert_token!(b"-=", Token::MinusEquals);
    assert_token!(b"--", Token::MinusMinus);
    assert_token!(b">=", Token::GreaterEquals);
    assert_token!(b"!=", Token::ExclamationPointEquals);
    assert_eq!(token_intermediate(b"#"), wrong_chars(b"#"));
    assert_eq!(token_intermediate(b"@x"), wrong_chars(b"@x"));
}

#[test]
fn test_token_stream() {
    fn token_stream(input: &str) -> Result<Vec<LexToken>, LexerError> {
        TokenStream::new(input, SourceLocation::first()).read_to_end()
    }
    fn loc(tok: Token, offset: u32) -> LexToken {
        LexToken(tok, SourceLocation::first().offset(offset))
    }
    fn id(name: &str, offset: u32) -> LexToken {
        loc(Token::Id(Identifier(name.to_string())), offset)
    }

    assert_eq!(token_stream(""), Ok(vec![loc(Token::Eof, 0)]));
    assert_eq!(
        token_stream("// Comment only source!\n"),
        Ok(vec![loc(Token::Eof, 24)])
    );
    assert_eq!(
        token_stream("a b"),
        Ok(vec![id("a", 0), id("b", 2), loc(Token::Eof, 3)])
    );
    assert_eq!(
        token_stream("a/*c*/b"),
        Ok(vec![id("a", 0), id("b", 6), loc(Token::Eof, 7)])
    );
    assert_eq!(
        token_stream("buffer<float4> data : 0;"),
        Ok(vec![
            loc(Token::TypeKeyword(TypeKeyword::Buffer), 0),
            loc(Token::Less, 6),
            loc(Token::TypeKeyword(TypeKeyword::Float4), 7),
            loc(Token::Greater, 13),
            id("data", 15),
            loc(Token::Colon, 20),
            loc(Token::LiteralNumber("0".to_string()), 22),
            loc(Token::Semicolon, 23),
            loc(Token::Eof, 24),
        ])
    );
    assert_eq!(
        token_stream("i++;"),
        Ok(vec![
            id("i", 0),
            loc(Token::PlusPlus, 1),
            loc(Token::Semicolon, 3),
            loc(Token::Eof, 4),
        ])
    );
}

#[test]
fn test_comments_are_ignored() {
    fn kinds(input: &str) -> Vec<Token> {
        TokenStream::new(input, SourceLocation::first())
            .read_to_end()
            .expect("lex failed")
            .into_iter()
            .map(|t| t.0)
            .collect()
    }

    assert_eq!(kinds("a/*c*/b"), kinds("a b"));
    assert_eq!(kinds("a // c\nb"), kinds("a b"));
}

#[test]
fn test_token_stream_errors() {
    fn first_error(input: &str) -> LexerError {
        match TokenStream::new(input, SourceLocation::first()).read_to_end() {
            Ok(tokens) => panic!("expected failure, got {:?}", tokens),
            Err(err) => err,
        }
    }

    assert_eq!(
        first_error("a /* never closed"),
        LexerError::new(
            LexerErrorReason::BlockCommentWrapsFile,
            SourceLocation::first().offset(2)
        )
    );
    assert_eq!(
        first_error("x = \"abc"),
        LexerError::new(
            LexerErrorReason::StringWrapsFile,
            SourceLocation::first().offset(4)
        )
    );
    assert_eq!(
        first_error("x = \"abc\n\";"),
        LexerError::new(
            LexerErrorReason::StringWrapsLine,
            SourceLocation::first().offset(4)
        )
    );
    assert_eq!(
        first_error("a # b"),
        LexerError::new(
            LexerErrorReason::UnexpectedBytes,
            SourceLocation::first().offset(2)
        )
    );
}

#[test]
fn test_eof_repeats() {
    let mut stream = TokenStream::new("a", SourceLocation::first());
    assert!(!stream.end_of_stream());
    assert_eq!(
        stream.next().map(|t| t.0),
        Ok(Token::Id(Identifier("a".to_string())))
    );
    assert_eq!(stream.next().map(|t| t.0), Ok(Token::Eof));
    assert!(stream.end_of_stream());
    assert_eq!(stream.next().map(|t| t.0), Ok(Token::Eof));
}
