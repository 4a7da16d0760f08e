use super::*;

/// Check if a statement declares a variable
///
/// A type name or identifier followed by `*` or another identifier starts a declaration, so `a * b;`
/// declares `b` as a pointer to `a`.
fn is_var_decl(line: &[LexToken]) -> bool {
    matches!(
        line,
        [
            LexToken(Token::TypeKeyword(_), _),
            LexToken(Token::Asterisk | Token::Id(_) | Token::Less, _),
            ..
        ] | [
            LexToken(Token::Id(_), _),
            LexToken(Token::Asterisk | Token::Id(_), _),
            ..
        ]
    )
}

fn parse_var_decl(input: &[LexToken]) -> ParseResult<VarDecl> {
    let (input, type_expr) = parse_type_expr(input)?;
    let (input, name) = match_identifier(input)?;
    let (input, initializer) = match parse_token(Token::Equals)(input) {
        Ok((rest, _)) => {
            let (rest, expr) = parse_expr(rest)?;
            (rest, Some(expr))
        }
        Err(_) => (input, None),
    };
    let vd = VarDecl {
        type_expr,
        name,
        initializer,
    };
    Ok((input, vd))
}

fn parse_return(input: &[LexToken]) -> ParseResult<ReturnDecl> {
    let (input, keyword) = parse_keyword(Keyword::Return)(input)?;
    let (input, expr) = parse_expr(input)?;
    let rd = ReturnDecl {
        expr,
        location: keyword.1,
    };
    Ok((input, rd))
}

/// Parse a single statement
///
/// The tokens up to the next semicolon are split off first and the statement must use all of them.
pub fn parse_statement(input: &[LexToken]) -> ParseResult<Stmt> {
    let line = match input.iter().position(|tok| tok.0 == Token::Semicolon) {
        Some(end) => &input[..=end],
        None => input,
    };

    let (rest, stmt) = match line {
        [LexToken(Token::Keyword(Keyword::Return), _), ..] => {
            let (rest, rd) = parse_return(line)?;
            (rest, Stmt::Decl(Decl::Return(rd)))
        }
        [LexToken(Token::Keyword(keyword), _), ..] => {
            return ParseErrorReason::UnsupportedKeyword(*keyword).into_result(line)
        }
        _ if is_var_decl(line) => {
            let (rest, vd) = parse_var_decl(line)?;
            (rest, Stmt::Decl(Decl::Var(vd)))
        }
        _ => {
            let (rest, expr) = parse_expr(line)?;
            (rest, Stmt::Expr(expr))
        }
    };
    parse_token(Token::Semicolon)(rest)?;

    Ok((&input[line.len()..], stmt))
}

/// Parse a brace delimited list of statements
pub fn parse_block(input: &[LexToken]) -> ParseResult<Vec<Stmt>> {
    let (mut input, _) = parse_token(Token::LeftBrace)(input)?;
    let mut stmts = Vec::new();
    loop {
        match input {
            [LexToken(Token::RightBrace, _), rest @ ..] => return Ok((rest, stmts)),
            [LexToken(Token::Semicolon, _), rest @ ..] => input = rest,
            _ => {
                let (rest, stmt) = parse_statement(input)?;
                stmts.push(stmt);
                input = rest;
            }
        }
    }
}

#[test]
fn test_statement() {
    use test_support::*;
    let statement = ParserTester::new(parse_statement);

    statement.check(
        "float4 c;",
        Stmt::Decl(Decl::Var(VarDecl {
            type_expr: TypeExpr::builtin(TypeKeyword::Float4).loc(0),
            name: "c".to_string().loc(7),
            initializer: None,
        })),
    );
    statement.check(
        "P * p = &q;",
        Stmt::Decl(Decl::Var(VarDecl {
            type_expr: TypeExpr::new("P").into_pointer().loc(0),
            name: "p".to_string().loc(4),
            initializer: Some(Expr::Pointer(PointerOp::AddressOf, "q".as_bvar(9)).loc(8)),
        })),
    );
    statement.check(
        "buffer<float> b = data;",
        Stmt::Decl(Decl::Var(VarDecl {
            type_expr: TypeExpr::builtin(TypeKeyword::Buffer)
                .with_args(vec![TypeExpr::builtin(TypeKeyword::Float)])
                .loc(0),
            name: "b".to_string().loc(14),
            initializer: Some("data".as_var(18)),
        })),
    );
    statement.check(
        "return p;",
        Stmt::Decl(Decl::Return(ReturnDecl {
            expr: "p".as_var(7),
            location: SourceLocation::first(),
        })),
    );
    statement.check(
        "x = 1;",
        Stmt::Expr(
            Expr::BinaryOp(
                BinOp::Assignment,
                "x".as_bvar(0),
                Expr::Literal(Literal::Int(1)).bloc(4),
            )
            .loc(0),
        ),
    );
    statement.check(
        "write(t, c, d);",
        Stmt::Expr(
            Expr::Call(
                "write".as_bvar(0),
                vec!["t".as_var(6), "c".as_var(9), "d".as_var(12)],
            )
            .loc(0),
        ),
    );

    statement.expect_fail("x y z;", ParseErrorReason::WrongToken, 4);
    statement.expect_fail("a b", ParseErrorReason::WrongToken, 4);
    statement.expect_fail(
        "if x;",
        ParseErrorReason::UnsupportedKeyword(Keyword::If),
        0,
    );
}

#[test]
fn test_block() {
    use test_support::*;
    let block = ParserTester::new(parse_block);

    block.check("{}", vec![]);
    block.check(
        "{ ; i++; ; }",
        vec![Stmt::Expr(
            Expr::UnaryOp(UnaryOp::PostfixIncrement, "i".as_bvar(4)).loc(4),
        )],
    );
    block.check(
        "{ float a = b; return a; }",
        vec![
            Stmt::Decl(Decl::Var(VarDecl {
                type_expr: TypeExpr::builtin(TypeKeyword::Float).loc(2),
                name: "a".to_string().loc(8),
                initializer: Some("b".as_var(12)),
            })),
            Stmt::Decl(Decl::Return(ReturnDecl {
                expr: "a".as_var(22),
                location: SourceLocation::first().offset(15),
            })),
        ],
    );
    block.expect_fail("{ return a }", ParseErrorReason::WrongToken, 11);
}
