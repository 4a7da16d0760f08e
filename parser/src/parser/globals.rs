use super::*;

/// Parse a single `in name` / `out name` / `inout name` entry in a resource map
fn parse_resource_map_entry(input: &[LexToken]) -> ParseResult<ResourceMapEntry> {
    let (input, access) = match input {
        [LexToken(Token::Keyword(Keyword::In), _), rest @ ..] => (rest, IoMode::In),
        [LexToken(Token::Keyword(Keyword::Out), _), rest @ ..] => (rest, IoMode::Out),
        [LexToken(Token::Keyword(Keyword::Inout), _), rest @ ..] => (rest, IoMode::Inout),
        _ => return ParseErrorReason::wrong_token(input),
    };
    let (input, name) = match_identifier(input)?;
    Ok((input, ResourceMapEntry { access, name }))
}

/// Parse the `[in a, out b]` list that grants a shader access to resources
pub fn parse_resource_map(input: &[LexToken]) -> ParseResult<Vec<ResourceMapEntry>> {
    parse_list(
        input,
        Token::LeftSquareBracket,
        Token::RightSquareBracket,
        parse_resource_map_entry,
    )
}

/// One `key=value` pair in a static sampler description
#[derive(PartialEq, Debug, Clone)]
enum SamplerProperty {
    Filter(SamplerFilter),
    AddressMode(AddressMode),
    MaxAnisotropy(u32),
}

fn parse_sampler_property(input: &[LexToken]) -> ParseResult<SamplerProperty> {
    let (rest, name) = match_identifier(input)?;
    let (rest, _) = parse_token(Token::Equals)(rest)?;

    let unknown_value = |value: &str| {
        ParseErrorReason::UnknownSamplerValue(name.node.clone(), value.to_string())
    };

    match name.as_str() {
        "filter" => {
            let (after, value) = match_identifier(rest)?;
            let filter = match value.as_str() {
                "linear" => SamplerFilter::Linear,
                "point" => SamplerFilter::Point,
                "anisotropic" => SamplerFilter::MaxAnisotropy,
                _ => return unknown_value(value.as_str()).into_result(rest),
            };
            Ok((after, SamplerProperty::Filter(filter)))
        }
        "address_mode" => {
            let (after, value) = match_identifier(rest)?;
            let mode = match value.as_str() {
                "wrap" => AddressMode::Wrap,
                "mirror" => AddressMode::Mirror,
                "mirrorwrap" => AddressMode::MirrorWrap,
                "clamptoedge" => AddressMode::ClampToEdge,
                _ => return unknown_value(value.as_str()).into_result(rest),
            };
            Ok((after, SamplerProperty::AddressMode(mode)))
        }
        "max_anisotropy" => {
            let (after, value) = parse_unsigned(rest)?;
            Ok((after, SamplerProperty::MaxAnisotropy(value)))
        }
        _ => ParseErrorReason::UnknownSamplerProperty(name.node.clone()).into_result(input),
    }
}

/// Parse the parenthesized property list of a static sampler
fn parse_sampler_desc(input: &[LexToken]) -> ParseResult<StaticSamplerDesc> {
    let (input, properties) = parse_list(
        input,
        Token::LeftParen,
        Token::RightParen,
        parse_sampler_property,
    )?;

    let mut desc = StaticSamplerDesc::default();
    for property in properties {
        match property {
            SamplerProperty::Filter(filter) => desc.filter = filter,
            SamplerProperty::AddressMode(mode) => {
                desc.u_address_mode = mode;
                desc.v_address_mode = mode;
                desc.w_address_mode = mode;
            }
            SamplerProperty::MaxAnisotropy(value) => desc.max_anisotropy = value,
        }
    }
    Ok((input, desc))
}

/// Parse a `static` resource: `static sampler2d name(prop=value, ...) [: register];`
pub fn parse_static_resource(input: &[LexToken]) -> ParseResult<ResourceDecl> {
    let (input, _) = parse_keyword(Keyword::Static)(input)?;
    let (input, type_expr) = parse_type_expr(input)?;
    let (input, name) = match_identifier(input)?;
    let (input, sampler_desc) = if peek_token(input, Token::LeftParen) {
        parse_sampler_desc(input)?
    } else {
        (input, StaticSamplerDesc::default())
    };
    let (input, register) = match parse_token(Token::Colon)(input) {
        Ok((rest, _)) => parse_unsigned(rest)?,
        Err(_) => (input, 0),
    };
    let (input, _) = parse_token(Token::Semicolon)(input)?;

    let rd = ResourceDecl {
        type_expr,
        name,
        register,
        is_static: true,
        sampler_desc: Some(sampler_desc),
    };
    Ok((input, rd))
}

/// Parse a declaration that starts with a type: a resource bound to a register or a plain function
pub fn parse_resource_or_function(input: &[LexToken]) -> ParseResult<Decl> {
    let (rest, type_expr) = parse_type_expr(input)?;
    let (rest, name) = match_identifier(rest)?;
    match rest {
        [LexToken(Token::Colon, _), after @ ..] => {
            let (after, register) = parse_unsigned(after)?;
            let (after, _) = parse_token(Token::Semicolon)(after)?;
            let rd = ResourceDecl {
                type_expr,
                name,
                register,
                is_static: false,
                sampler_desc: None,
            };
            Ok((after, Decl::Resource(rd)))
        }
        [LexToken(Token::LeftParen, _), ..] => {
            let (after, fd) = parse_function(input)?;
            Ok((after, Decl::Func(fd)))
        }
        _ => ParseErrorReason::wrong_token(rest),
    }
}

#[test]
fn test_resource_map() {
    use test_support::*;
    let map = ParserTester::new(parse_resource_map);

    map.check("[]", vec![]);
    map.check(
        "[in a, out b, inout c]",
        vec![
            ResourceMapEntry {
                access: IoMode::In,
                name: "a".to_string().loc(4),
            },
            ResourceMapEntry {
                access: IoMode::Out,
                name: "b".to_string().loc(11),
            },
            ResourceMapEntry {
                access: IoMode::Inout,
                name: "c".to_string().loc(20),
            },
        ],
    );
    map.expect_fail("[read a]", ParseErrorReason::WrongToken, 1);
    map.expect_fail("[in a out b]", ParseErrorReason::WrongToken, 6);
}

#[test]
fn test_resource() {
    use test_support::*;
    let resource = ParserTester::new(parse_resource_or_function);

    resource.check(
        "buffer<float4> data : 2;",
        Decl::Resource(ResourceDecl {
            type_expr: TypeExpr::builtin(TypeKeyword::Buffer)
                .with_args(vec![TypeExpr::builtin(TypeKeyword::Float4)])
                .loc(0),
            name: "data".to_string().loc(15),
            register: 2,
            is_static: false,
            sampler_desc: None,
        }),
    );
    resource.check(
        "texture2d tex : 0u;",
        Decl::Resource(ResourceDecl {
            type_expr: TypeExpr::builtin(TypeKeyword::Texture2d).loc(0),
            name: "tex".to_string().loc(10),
            register: 0,
            is_static: false,
            sampler_desc: None,
        }),
    );
    resource.expect_fail(
        "texture2d tex : 1.5;",
        ParseErrorReason::InvalidNumericLiteral("1.5".to_string()),
        16,
    );
    resource.expect_fail("texture2d tex : 1", ParseErrorReason::WrongToken, 18);
}

#[test]
fn test_static_sampler() {
    use test_support::*;
    let sampler = ParserTester::new(parse_static_resource);

    sampler.check(
        "static sampler2d s;",
        ResourceDecl {
            type_expr: TypeExpr::builtin(TypeKeyword::Sampler2d).loc(7),
            name: "s".to_string().loc(17),
            register: 0,
            is_static: true,
            sampler_desc: Some(StaticSamplerDesc::default()),
        },
    );
    sampler.check(
        "static sampler2d s(filter=point, address_mode=mirror, max_anisotropy=4) : 3;",
        ResourceDecl {
            type_expr: TypeExpr::builtin(TypeKeyword::Sampler2d).loc(7),
            name: "s".to_string().loc(17),
            register: 3,
            is_static: true,
            sampler_desc: Some(StaticSamplerDesc {
                filter: SamplerFilter::Point,
                u_address_mode: AddressMode::Mirror,
                v_address_mode: AddressMode::Mirror,
                w_address_mode: AddressMode::Mirror,
                max_anisotropy: 4,
            }),
        },
    );
    sampler.check(
        "static sampler3d s(filter=anisotropic, address_mode=clamptoedge);",
        ResourceDecl {
            type_expr: TypeExpr::builtin(TypeKeyword::Sampler3d).loc(7),
            name: "s".to_string().loc(17),
            register: 0,
            is_static: true,
            sampler_desc: Some(StaticSamplerDesc {
                filter: SamplerFilter::MaxAnisotropy,
                u_address_mode: AddressMode::ClampToEdge,
                v_address_mode: AddressMode::ClampToEdge,
                w_address_mode: AddressMode::ClampToEdge,
                max_anisotropy: 16,
            }),
        },
    );

    sampler.expect_fail(
        "static sampler2d s(blend=linear);",
        ParseErrorReason::UnknownSamplerProperty("blend".to_string()),
        19,
    );
    sampler.expect_fail(
        "static sampler2d s(filter=cubic);",
        ParseErrorReason::UnknownSamplerValue("filter".to_string(), "cubic".to_string()),
        26,
    );
}
