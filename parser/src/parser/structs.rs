use super::*;

/// Parse a struct member: `Type [*] name [: attribute];`
fn parse_struct_field(input: &[LexToken]) -> ParseResult<StructField> {
    let (input, type_expr) = parse_type_expr(input)?;
    let (input, name) = match_identifier(input)?;
    let (input, attribute) = parse_attribute(input)?;
    let (input, _) = parse_token(Token::Semicolon)(input)?;
    let field = StructField {
        type_expr,
        name,
        attribute,
    };
    Ok((input, field))
}

/// Parse an optional `internal` modifier
fn parse_internal(input: &[LexToken]) -> (&[LexToken], bool) {
    match parse_keyword(Keyword::Internal)(input) {
        Ok((rest, _)) => (rest, true),
        Err(_) => (input, false),
    }
}

/// Parse a full struct definition
///
/// The `internal` modifier may be written either before or after the struct name.
pub fn parse_struct(input: &[LexToken]) -> ParseResult<StructDecl> {
    let (input, _) = parse_keyword(Keyword::Struct)(input)?;
    let (input, internal_before) = parse_internal(input);
    let (input, name) = match_identifier(input)?;
    let (input, internal_after) = if internal_before {
        (input, false)
    } else {
        parse_internal(input)
    };

    let (mut input, _) = parse_token(Token::LeftBrace)(input)?;
    let mut fields = Vec::new();
    loop {
        match input {
            [LexToken(Token::RightBrace, _), rest @ ..] => {
                input = rest;
                break;
            }
            _ => {
                let (rest, field) = parse_struct_field(input)?;
                fields.push(field);
                input = rest;
            }
        }
    }
    let (input, _) = parse_token(Token::Semicolon)(input)?;

    let sd = StructDecl {
        name,
        internal: internal_before || internal_after,
        fields,
    };
    Ok((input, sd))
}

#[test]
fn test_struct() {
    use test_support::*;
    let structdefinition = ParserTester::new(parse_struct);

    let internal_p = StructDecl {
        name: "P".to_string().loc(16),
        internal: true,
        fields: vec![StructField {
            type_expr: TypeExpr::builtin(TypeKeyword::Float4).loc(20),
            name: "pos".to_string().loc(27),
            attribute: Some("position".to_string().loc(33)),
        }],
    };
    structdefinition.check(
        "struct internal P { float4 pos : position; };",
        internal_p.clone(),
    );

    let mut internal_after = internal_p;
    internal_after.name = "P".to_string().loc(7);
    structdefinition.check(
        "struct P internal { float4 pos : position; };",
        internal_after,
    );

    structdefinition.check(
        "struct Pair { float a; Pair * next; };",
        StructDecl {
            name: "Pair".to_string().loc(7),
            internal: false,
            fields: vec![
                StructField {
                    type_expr: TypeExpr::builtin(TypeKeyword::Float).loc(14),
                    name: "a".to_string().loc(20),
                    attribute: None,
                },
                StructField {
                    type_expr: TypeExpr::new("Pair").into_pointer().loc(23),
                    name: "next".to_string().loc(30),
                    attribute: None,
                },
            ],
        },
    );

    structdefinition.check(
        "struct Empty {};",
        StructDecl {
            name: "Empty".to_string().loc(7),
            internal: false,
            fields: vec![],
        },
    );

    structdefinition.expect_fail("struct S { float a; }", ParseErrorReason::WrongToken, 22);
    structdefinition.expect_fail("struct S { float a }", ParseErrorReason::WrongToken, 19);
    structdefinition.expect_fail(
        "struct internal S internal {};",
        ParseErrorReason::WrongToken,
        18,
    );
}
