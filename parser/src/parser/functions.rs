use super::*;

/// Parse a parameter for a function: `Type [*] name [: attribute]`
fn parse_param(input: &[LexToken]) -> ParseResult<ParamDecl> {
    let (input, type_expr) = parse_type_expr(input)?;
    let (input, name) = match_identifier(input)?;
    let (input, attribute) = parse_attribute(input)?;
    let param = ParamDecl {
        type_expr,
        name,
        attribute,
    };
    Ok((input, param))
}

/// Parse a function signature and body
pub fn parse_function(input: &[LexToken]) -> ParseResult<FuncDecl> {
    let (input, return_type) = parse_type_expr(input)?;
    let (input, name) = match_identifier(input)?;
    let (input, params) = parse_list(input, Token::LeftParen, Token::RightParen, parse_param)?;
    let (input, body) = parse_block(input)?;
    let fd = FuncDecl {
        name,
        params,
        return_type,
        body,
    };
    Ok((input, fd))
}

/// Parse one `axis=N` entry of a threadgroup size
fn parse_threadgroup_dim<'t>(input: &'t [LexToken], axis: &str) -> ParseResult<'t, u32> {
    let (input, _) = match_word(input, axis)?;
    let (input, _) = parse_token(Token::Equals)(input)?;
    let (rest, value) = parse_unsigned(input)?;
    if value == 0 {
        return ParseErrorReason::InvalidThreadgroupSize.into_result(input);
    }
    Ok((rest, value))
}

/// Parse the `(x=N,y=N,z=N)` threadgroup size of a compute shader
fn parse_threadgroup(input: &[LexToken]) -> ParseResult<ThreadgroupDesc> {
    let (input, _) = parse_token(Token::LeftParen)(input)?;
    let (input, x) = parse_threadgroup_dim(input, "x")?;
    let (input, _) = parse_token(Token::Comma)(input)?;
    let (input, y) = parse_threadgroup_dim(input, "y")?;
    let (input, _) = parse_token(Token::Comma)(input)?;
    let (input, z) = parse_threadgroup_dim(input, "z")?;
    let (input, _) = parse_token(Token::RightParen)(input)?;
    Ok((input, ThreadgroupDesc { x, y, z }))
}

/// Parse a shader entry point after its resource map
pub fn parse_shader(
    input: &[LexToken],
    resource_map: Vec<ResourceMapEntry>,
) -> ParseResult<ShaderDecl> {
    let (input, stage) = match input {
        [LexToken(Token::Keyword(Keyword::Vertex), _), rest @ ..] => (rest, ShaderStage::Vertex),
        [LexToken(Token::Keyword(Keyword::Fragment), _), rest @ ..] => {
            (rest, ShaderStage::Fragment)
        }
        [LexToken(Token::Keyword(Keyword::Compute), _), rest @ ..] => (rest, ShaderStage::Compute),
        _ => return ParseErrorReason::wrong_token(input),
    };

    let (input, threadgroup) = match stage {
        ShaderStage::Compute => parse_threadgroup(input)?,
        _ => (input, ThreadgroupDesc::default()),
    };

    let (input, func) = parse_function(input)?;
    let sd = ShaderDecl {
        stage,
        resource_map,
        threadgroup,
        func,
    };
    Ok((input, sd))
}

#[test]
fn test_function() {
    use test_support::*;
    let function = ParserTester::new(parse_function);

    function.check(
        "float4 tint(float4 c, P * p : color) { return c; }",
        FuncDecl {
            name: "tint".to_string().loc(7),
            params: vec![
                ParamDecl {
                    type_expr: TypeExpr::builtin(TypeKeyword::Float4).loc(12),
                    name: "c".to_string().loc(19),
                    attribute: None,
                },
                ParamDecl {
                    type_expr: TypeExpr::new("P").into_pointer().loc(22),
                    name: "p".to_string().loc(26),
                    attribute: Some("color".to_string().loc(30)),
                },
            ],
            return_type: TypeExpr::builtin(TypeKeyword::Float4).loc(0),
            body: vec![Stmt::Decl(Decl::Return(ReturnDecl {
                expr: "c".as_var(46),
                location: SourceLocation::first().offset(39),
            }))],
        },
    );
    function.expect_fail("void f(float a,) {}", ParseErrorReason::WrongToken, 15);
    function.expect_fail("void f() return;", ParseErrorReason::WrongToken, 9);
}

#[test]
fn test_shader() {
    use test_support::*;
    fn parse_shader_without_map(input: &[LexToken]) -> ParseResult<ShaderDecl> {
        parse_shader(input, Vec::new())
    }
    let shader = ParserTester::new(parse_shader_without_map);

    shader.check(
        "fragment float4 main(P p){ return p.pos; }",
        ShaderDecl {
            stage: ShaderStage::Fragment,
            resource_map: vec![],
            threadgroup: ThreadgroupDesc::default(),
            func: FuncDecl {
                name: "main".to_string().loc(16),
                params: vec![ParamDecl {
                    type_expr: TypeExpr::new("P").loc(21),
                    name: "p".to_string().loc(23),
                    attribute: None,
                }],
                return_type: TypeExpr::builtin(TypeKeyword::Float4).loc(9),
                body: vec![Stmt::Decl(Decl::Return(ReturnDecl {
                    expr: Expr::Member("p".as_bvar(34), "pos".to_string()).loc(34),
                    location: SourceLocation::first().offset(27),
                }))],
            },
        },
    );

    shader.check(
        "compute(x=8,y=4,z=1) void cs(uint3 id : global_thread_id){}",
        ShaderDecl {
            stage: ShaderStage::Compute,
            resource_map: vec![],
            threadgroup: ThreadgroupDesc { x: 8, y: 4, z: 1 },
            func: FuncDecl {
                name: "cs".to_string().loc(26),
                params: vec![ParamDecl {
                    type_expr: TypeExpr::builtin(TypeKeyword::Uint3).loc(29),
                    name: "id".to_string().loc(35),
                    attribute: Some("global_thread_id".to_string().loc(40)),
                }],
                return_type: TypeExpr::builtin(TypeKeyword::Void).loc(21),
                body: vec![],
            },
        },
    );

    shader.expect_fail(
        "compute(x=0,y=1,z=1) void cs(){}",
        ParseErrorReason::InvalidThreadgroupSize,
        10,
    );
    shader.expect_fail(
        "compute(y=1,x=1,z=1) void cs(){}",
        ParseErrorReason::WrongToken,
        8,
    );
    shader.expect_fail("compute void cs(){}", ParseErrorReason::WrongToken, 8);
}
