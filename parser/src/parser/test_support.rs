use super::*;

pub trait TestTokenExt {
    fn loc(self, offset: u32) -> LexToken;
}

impl TestTokenExt for Token {
    fn loc(self, offset: u32) -> LexToken {
        LexToken(self, SourceLocation::first().offset(offset))
    }
}

pub trait TestLocationExt
where
    Self: Sized,
{
    fn loc(self, offset: u32) -> Located<Self> {
        Located::new(self, SourceLocation::first().offset(offset))
    }

    fn bloc(self, offset: u32) -> Box<Located<Self>> {
        Box::new(Located::new(self, SourceLocation::first().offset(offset)))
    }
}

impl TestLocationExt for Expr {}
impl TestLocationExt for TypeExpr {}
impl TestLocationExt for String {}

pub trait TestVariableExt {
    fn as_var(self, offset: u32) -> Located<Expr>;
    fn as_bvar(self, offset: u32) -> Box<Located<Expr>>;
}

impl TestVariableExt for &str {
    fn as_var(self, offset: u32) -> Located<Expr> {
        Expr::Id(self.to_string()).loc(offset)
    }

    fn as_bvar(self, offset: u32) -> Box<Located<Expr>> {
        Box::new(self.as_var(offset))
    }
}

/// Turn a string into lex tokens for a test
#[track_caller]
pub fn lex_from_str(source: &str) -> (Vec<LexToken>, SourceManager) {
    let mut source_manager = SourceManager::new();

    // Add a newline to the end of every test string so errors at the end have a line to print
    let file_id = source_manager.add_file(
        FileName("parser_test.omegasl".to_string()),
        source.to_string() + "\n",
    );

    match omegasl_lexer::lex(file_id, &source_manager) {
        Ok(tokens) => (tokens, source_manager),
        Err(err) => panic!("{}{:?}", err.display(&source_manager), err),
    }
}

/// Helper type to invoke parsing on fragments of text
pub struct ParserTester<F, T>(F, std::marker::PhantomData<T>);

impl<
        T: std::cmp::PartialEq + std::fmt::Debug,
        F: for<'t> Fn(&'t [LexToken]) -> ParseResult<'t, T>,
    > ParserTester<F, T>
{
    /// Create a new tester object from a parse function
    pub fn new(parse_fn: F) -> Self {
        ParserTester(parse_fn, std::marker::PhantomData)
    }

    /// Check that a source string parses into the given value
    #[track_caller]
    pub fn check(&self, input: &str, value: T) {
        let (tokens, source_manager) = lex_from_str(input);
        match (self.0)(&tokens) {
            Ok((rem, exp)) => {
                if rem.len() == 1 && rem[0].0 == Token::Eof {
                    assert_eq!(exp, value);
                } else {
                    panic!(
                        "{}",
                        ParseError::from_tokens_remaining(rem).display(&source_manager)
                    );
                }
            }
            Err(err) => panic!("{}", ParseError::from(err).display(&source_manager)),
        }
    }

    /// Check that a list of tokens parses into the given value
    #[track_caller]
    pub fn check_from_tokens(&self, input: &[LexToken], used_tokens: usize, value: T) {
        match (self.0)(input) {
            Ok((rem, exp)) if rem == &input[used_tokens..] => {
                assert_eq!(exp, value);
            }
            Ok((rem, _)) => panic!("{:?}", ParseError::from_tokens_remaining(rem)),

            Err(err) => panic!("{:?}", ParseError::from(err)),
        }
    }

    /// Check that parsing will fail for the given string
    #[track_caller]
    pub fn expect_fail(&self, input: &str, error_reason: ParseErrorReason, offset: u32) {
        let (tokens, _) = lex_from_str(input);
        match (self.0)(&tokens) {
            Ok((rem, exp)) => {
                if rem.len() == 1 && rem[0].0 == Token::Eof {
                    panic!("{:?}", exp);
                } else {
                    assert_eq!(
                        (ParseErrorReason::TokensUnconsumed, rem[0].1),
                        (error_reason, SourceLocation::first().offset(offset))
                    );
                }
            }
            Err(ParseErrorContext(_, ParseErrorReason::UnexpectedEndOfStream)) => {
                panic!("Unexpected end of stream")
            }
            Err(err) => {
                assert_eq!(
                    (err.1, err.0[0].1),
                    (error_reason, SourceLocation::first().offset(offset))
                );
            }
        }
    }
}
