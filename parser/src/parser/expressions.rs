use super::*;

/// Classify a numeric literal
///
/// A literal with a fractional part or an `f` suffix is a float, a `u` suffix makes an unsigned
/// integer and anything else is a signed integer.
fn parse_literal_number(text: &str) -> Option<Literal> {
    if text.contains('.') || text.ends_with('f') {
        let digits = text.strip_suffix('f').unwrap_or(text);
        digits.parse::<f32>().ok().map(Literal::Float)
    } else if let Some(digits) = text.strip_suffix('u') {
        digits.parse::<u32>().ok().map(Literal::UInt)
    } else {
        text.parse::<i32>().ok().map(Literal::Int)
    }
}

/// Parse an identifier, a literal or an array literal
fn parse_object(input: &[LexToken]) -> ParseResult<Located<Expr>> {
    match input {
        [LexToken(Token::Id(Identifier(name)), loc), rest @ ..] => {
            Ok((rest, Located::new(Expr::Id(name.clone()), *loc)))
        }
        [LexToken(Token::LiteralString(s), loc), rest @ ..] => Ok((
            rest,
            Located::new(Expr::Literal(Literal::String(s.clone())), *loc),
        )),
        [LexToken(Token::LiteralNumber(text), loc), rest @ ..] => match parse_literal_number(text)
        {
            Some(literal) => Ok((rest, Located::new(Expr::Literal(literal), *loc))),
            None => ParseErrorReason::InvalidNumericLiteral(text.clone()).into_result(input),
        },
        [LexToken(Token::LeftBrace, loc), ..] => {
            let (rest, elements) =
                parse_list(input, Token::LeftBrace, Token::RightBrace, parse_expr)?;
            Ok((rest, Located::new(Expr::Array(elements), *loc)))
        }
        _ => ParseErrorReason::wrong_token(input),
    }
}

/// Parse an object followed by any chain of calls, member accesses and indexing
fn parse_postfix(input: &[LexToken]) -> ParseResult<Located<Expr>> {
    let (mut input, mut expr) = parse_object(input)?;
    loop {
        let location = expr.location;
        let (rest, node) = match input {
            [LexToken(Token::LeftParen, _), ..] => {
                let (rest, args) =
                    parse_list(input, Token::LeftParen, Token::RightParen, parse_expr)?;
                (rest, Expr::Call(Box::new(expr), args))
            }
            [LexToken(Token::Period, _), rest @ ..] => {
                let (rest, member) = match_identifier(rest)?;
                (rest, Expr::Member(Box::new(expr), member.to_node()))
            }
            [LexToken(Token::LeftSquareBracket, _), rest @ ..] => {
                let (rest, index) = parse_expr(rest)?;
                let (rest, _) = parse_token(Token::RightSquareBracket)(rest)?;
                (rest, Expr::Index(Box::new(expr), Box::new(index)))
            }
            _ => return Ok((input, expr)),
        };
        input = rest;
        expr = Located::new(node, location);
    }
}

fn binary_op(token: &Token) -> Option<BinOp> {
    Some(match token {
        Token::Equals => BinOp::Assignment,
        Token::PlusEquals => BinOp::SumAssignment,
        Token::MinusEquals => BinOp::DifferenceAssignment,
        Token::Plus => BinOp::Add,
        Token::Minus => BinOp::Subtract,
        Token::Asterisk => BinOp::Multiply,
        Token::ForwardSlash => BinOp::Divide,
        Token::EqualsEquals => BinOp::Equality,
        Token::ExclamationPointEquals => BinOp::Inequality,
        Token::Less => BinOp::LessThan,
        Token::LessEquals => BinOp::LessEqual,
        Token::Greater => BinOp::GreaterThan,
        Token::GreaterEquals => BinOp::GreaterEqual,
        _ => return None,
    })
}

/// Parse an expression
///
/// There is no operator precedence. A prefix operator applies to the whole expression after it and
/// a binary operator takes the whole expression after it as its right hand side, so chains nest to
/// the right: `a - b - c` is `a - (b - c)`.
pub fn parse_expr(input: &[LexToken]) -> ParseResult<Located<Expr>> {
    let (first, after_first) = match input.split_first() {
        Some(split) => split,
        None => return ParseErrorReason::end_of_stream(),
    };
    let location = first.1;

    match first.0 {
        Token::Asterisk | Token::Ampersand => {
            let op = match first.0 {
                Token::Asterisk => PointerOp::Dereference,
                _ => PointerOp::AddressOf,
            };
            let (rest, operand) = parse_expr(after_first)?;
            let expr = Expr::Pointer(op, Box::new(operand));
            return Ok((rest, Located::new(expr, location)));
        }
        Token::ExclamationPoint | Token::PlusPlus | Token::MinusMinus => {
            let op = match first.0 {
                Token::ExclamationPoint => UnaryOp::LogicalNot,
                Token::PlusPlus => UnaryOp::PrefixIncrement,
                _ => UnaryOp::PrefixDecrement,
            };
            let (rest, operand) = parse_expr(after_first)?;
            let expr = Expr::UnaryOp(op, Box::new(operand));
            return Ok((rest, Located::new(expr, location)));
        }
        _ => {}
    }

    let (input, lhs) = match first.0 {
        Token::LeftParen => {
            let (rest, inner) = parse_expr(after_first)?;
            let (rest, _) = parse_token(Token::RightParen)(rest)?;
            (rest, inner)
        }
        _ => parse_postfix(input)?,
    };

    match input.split_first() {
        Some((LexToken(Token::PlusPlus, _), rest)) => {
            let expr = Expr::UnaryOp(UnaryOp::PostfixIncrement, Box::new(lhs));
            Ok((rest, Located::new(expr, location)))
        }
        Some((LexToken(Token::MinusMinus, _), rest)) => {
            let expr = Expr::UnaryOp(UnaryOp::PostfixDecrement, Box::new(lhs));
            Ok((rest, Located::new(expr, location)))
        }
        Some((LexToken(token, _), rest)) => match binary_op(token) {
            Some(op) => {
                let (rest, rhs) = parse_expr(rest)?;
                let expr = Expr::BinaryOp(op, Box::new(lhs), Box::new(rhs));
                Ok((rest, Located::new(expr, location)))
            }
            None => Ok((input, lhs)),
        },
        None => Ok((input, lhs)),
    }
}

#[test]
fn test_literals() {
    use test_support::*;
    let expr = ParserTester::new(parse_expr);

    expr.check("7", Expr::Literal(Literal::Int(7)).loc(0));
    expr.check("7u", Expr::Literal(Literal::UInt(7)).loc(0));
    expr.check("0.5", Expr::Literal(Literal::Float(0.5)).loc(0));
    expr.check("2f", Expr::Literal(Literal::Float(2.0)).loc(0));
    expr.check("1.5f", Expr::Literal(Literal::Float(1.5)).loc(0));
    expr.check(
        "\"text\"",
        Expr::Literal(Literal::String("text".to_string())).loc(0),
    );
    expr.expect_fail(
        "4294967296",
        ParseErrorReason::InvalidNumericLiteral("4294967296".to_string()),
        0,
    );
    expr.check(
        "{1, 2}",
        Expr::Array(vec![
            Expr::Literal(Literal::Int(1)).loc(1),
            Expr::Literal(Literal::Int(2)).loc(4),
        ])
        .loc(0),
    );
}

#[test]
fn test_postfix_chains() {
    use test_support::*;
    let expr = ParserTester::new(parse_expr);

    expr.check("a", "a".as_var(0));
    expr.check(
        "p.pos.xy",
        Expr::Member(
            Expr::Member("p".as_bvar(0), "pos".to_string()).bloc(0),
            "xy".to_string(),
        )
        .loc(0),
    );
    expr.check(
        "data[i]",
        Expr::Index("data".as_bvar(0), "i".as_bvar(5)).loc(0),
    );
    expr.check(
        "make_float4(1.0, c)",
        Expr::Call(
            "make_float4".as_bvar(0),
            vec![
                Expr::Literal(Literal::Float(1.0)).loc(12),
                "c".as_var(17),
            ],
        )
        .loc(0),
    );
    expr.check(
        "f()[0].x",
        Expr::Member(
            Expr::Index(
                Expr::Call("f".as_bvar(0), vec![]).bloc(0),
                Expr::Literal(Literal::Int(0)).bloc(4),
            )
            .bloc(0),
            "x".to_string(),
        )
        .loc(0),
    );
    expr.expect_fail("a.", ParseErrorReason::WrongToken, 3);
    expr.expect_fail("f(a b)", ParseErrorReason::WrongToken, 4);
}

#[test]
fn test_operators() {
    use test_support::*;
    let expr = ParserTester::new(parse_expr);

    expr.check(
        "a + b * c",
        Expr::BinaryOp(
            BinOp::Add,
            "a".as_bvar(0),
            Expr::BinaryOp(BinOp::Multiply, "b".as_bvar(4), "c".as_bvar(8)).bloc(4),
        )
        .loc(0),
    );
    expr.check(
        "a - b - c",
        Expr::BinaryOp(
            BinOp::Subtract,
            "a".as_bvar(0),
            Expr::BinaryOp(BinOp::Subtract, "b".as_bvar(4), "c".as_bvar(8)).bloc(4),
        )
        .loc(0),
    );
    expr.check(
        "(a + b) * c",
        Expr::BinaryOp(
            BinOp::Multiply,
            Expr::BinaryOp(BinOp::Add, "a".as_bvar(1), "b".as_bvar(5)).bloc(1),
            "c".as_bvar(10),
        )
        .loc(0),
    );
    expr.check(
        "x = y",
        Expr::BinaryOp(BinOp::Assignment, "x".as_bvar(0), "y".as_bvar(4)).loc(0),
    );
    expr.check(
        "i += 1",
        Expr::BinaryOp(
            BinOp::SumAssignment,
            "i".as_bvar(0),
            Expr::Literal(Literal::Int(1)).bloc(5),
        )
        .loc(0),
    );
    expr.check(
        "a != b",
        Expr::BinaryOp(BinOp::Inequality, "a".as_bvar(0), "b".as_bvar(5)).loc(0),
    );
    expr.check(
        "*p",
        Expr::Pointer(PointerOp::Dereference, "p".as_bvar(1)).loc(0),
    );
    expr.check(
        "&v",
        Expr::Pointer(PointerOp::AddressOf, "v".as_bvar(1)).loc(0),
    );
    expr.check(
        "!a",
        Expr::UnaryOp(UnaryOp::LogicalNot, "a".as_bvar(1)).loc(0),
    );
    expr.check(
        "++i",
        Expr::UnaryOp(UnaryOp::PrefixIncrement, "i".as_bvar(2)).loc(0),
    );
    expr.check(
        "i--",
        Expr::UnaryOp(UnaryOp::PostfixDecrement, "i".as_bvar(0)).loc(0),
    );
    expr.expect_fail("+ a", ParseErrorReason::WrongToken, 0);
    expr.expect_fail("(a", ParseErrorReason::WrongToken, 3);
}
