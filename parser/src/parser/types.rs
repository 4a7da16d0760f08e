use super::*;

/// Parse the name part of a type reference
fn parse_type_name(input: &[LexToken]) -> ParseResult<Located<String>> {
    match input {
        [LexToken(Token::TypeKeyword(ty), loc), rest @ ..] => {
            Ok((rest, Located::new(ty.name().to_string(), *loc)))
        }
        [LexToken(Token::Id(Identifier(name)), loc), rest @ ..] => {
            Ok((rest, Located::new(name.clone(), *loc)))
        }
        _ => ParseErrorReason::wrong_token(input),
    }
}

/// Parse a type reference: a type name, optional generic arguments and an optional pointer marker
pub fn parse_type_expr(input: &[LexToken]) -> ParseResult<Located<TypeExpr>> {
    let (input, name) = parse_type_name(input)?;
    let (input, args) = if peek_token(input, Token::Less) {
        parse_list(input, Token::Less, Token::Greater, |input| {
            parse_type_expr(input).map(|(rest, ty)| (rest, ty.to_node()))
        })?
    } else {
        (input, Vec::new())
    };
    let (input, pointer) = match parse_token(Token::Asterisk)(input) {
        Ok((rest, _)) => (rest, true),
        Err(_) => (input, false),
    };

    let location = name.location;
    let mut ty = TypeExpr::new(name.to_node()).with_args(args);
    ty.pointer = pointer;
    Ok((input, Located::new(ty, location)))
}

#[test]
fn test_type_expr() {
    use test_support::*;
    let ty = ParserTester::new(parse_type_expr);

    ty.check("float4", TypeExpr::builtin(TypeKeyword::Float4).loc(0));
    ty.check("P", TypeExpr::new("P").loc(0));
    ty.check("P *", TypeExpr::new("P").into_pointer().loc(0));
    ty.check(
        "buffer<float4>",
        TypeExpr::builtin(TypeKeyword::Buffer)
            .with_args(vec![TypeExpr::builtin(TypeKeyword::Float4)])
            .loc(0),
    );
    ty.check(
        "buffer<P*>*",
        TypeExpr::builtin(TypeKeyword::Buffer)
            .with_args(vec![TypeExpr::new("P").into_pointer()])
            .into_pointer()
            .loc(0),
    );

    ty.expect_fail("struct", ParseErrorReason::WrongToken, 0);
    ty.expect_fail("buffer<float4", ParseErrorReason::WrongToken, 14);
}
