use omegasl_ast::*;
use omegasl_text::Located;
use std::collections::HashMap;

/// Indentation state and texture index types while writing a block of HLSL
pub(crate) struct FormatContext {
    indent: u32,
    texture_coords: HashMap<String, &'static str>,
}

impl FormatContext {
    pub(crate) fn new() -> Self {
        FormatContext {
            indent: 0,
            texture_coords: HashMap::new(),
        }
    }

    /// Record a texture so that writes to it index with unsigned coordinates
    pub(crate) fn add_texture(&mut self, name: &str, kind: TypeKeyword) {
        let coord = match kind {
            TypeKeyword::Texture1d => "uint",
            TypeKeyword::Texture2d => "uint2",
            TypeKeyword::Texture3d => "uint3",
            _ => return,
        };
        self.texture_coords.insert(name.to_string(), coord);
    }

    fn texture_coord(&self, texture: &Expr) -> Option<&'static str> {
        match texture {
            Expr::Id(name) => self.texture_coords.get(name).copied(),
            _ => None,
        }
    }

    /// Increase indentation
    pub(crate) fn push_indent(&mut self) {
        self.indent += 1;
    }

    /// Decrease indentation
    pub(crate) fn pop_indent(&mut self) {
        self.indent -= 1;
    }

    /// Begin a new line and indent up to the current level of indentation
    pub(crate) fn new_line(&self, output: &mut String) {
        if output.is_empty() {
            return;
        }

        // Remove trailing whitespace
        let trimmed = output.trim_end_matches(|c| c == ' ');
        if output.len() != trimmed.len() {
            output.truncate(trimmed.len());
        }

        output.push('\n');

        for _ in 0..self.indent {
            output.push_str("    ");
        }
    }
}

/// Get the HLSL semantic for an attribute
pub(crate) fn semantic(attribute: &str) -> Option<&'static str> {
    Some(match attribute {
        "vertex_id" => "SV_VertexID",
        "position" => "SV_Position",
        "color" => "COLOR",
        "texcoord" => "TEXCOORD",
        "global_thread_id" => "SV_DispatchThreadID",
        "local_thread_id" => "SV_GroupThreadID",
        "threadgroup_id" => "SV_GroupID",
        _ => return None,
    })
}

pub(crate) fn format_type(ty: &TypeExpr, output: &mut String) {
    output.push_str(&ty.name);
    if !ty.args.is_empty() {
        output.push('<');
        for (i, arg) in ty.args.iter().enumerate() {
            if i != 0 {
                output.push_str(", ");
            }
            format_type(arg, output);
        }
        output.push('>');
    }
    if ty.pointer {
        output.push('*');
    }
}

/// Write a name with its type and optional semantic: `float4 pos : SV_Position`
pub(crate) fn format_typed_name(
    ty: &TypeExpr,
    name: &str,
    attribute: &Option<Located<String>>,
    output: &mut String,
) {
    format_type(ty, output);
    output.push(' ');
    output.push_str(name);
    if let Some(semantic) = attribute.as_ref().and_then(|a| semantic(a)) {
        output.push_str(" : ");
        output.push_str(semantic);
    }
}

/// Write a struct definition terminated by a new line
pub(crate) fn format_struct(sd: &StructDecl) -> String {
    let mut output = String::new();
    let mut context = FormatContext::new();

    output.push_str("struct ");
    output.push_str(&sd.name);
    context.new_line(&mut output);
    output.push('{');
    context.push_indent();
    for field in &sd.fields {
        context.new_line(&mut output);
        format_typed_name(&field.type_expr, &field.name, &field.attribute, &mut output);
        output.push(';');
    }
    context.pop_indent();
    context.new_line(&mut output);
    output.push_str("};\n");
    output
}

/// Write a braced block of statements
pub(crate) fn format_block(body: &[Stmt], output: &mut String, context: &mut FormatContext) {
    context.new_line(output);
    output.push('{');
    context.push_indent();
    for stmt in body {
        format_statement(stmt, output, context);
    }
    context.pop_indent();
    context.new_line(output);
    output.push('}');
}

fn format_statement(stmt: &Stmt, output: &mut String, context: &mut FormatContext) {
    match stmt {
        Stmt::Decl(Decl::Var(vd)) => {
            context.new_line(output);
            format_type(&vd.type_expr, output);
            output.push(' ');
            output.push_str(&vd.name);
            if let Some(init) = &vd.initializer {
                output.push_str(" = ");
                format_expression(init, output, context);
            }
            output.push(';');
        }
        Stmt::Decl(Decl::Return(rd)) => {
            context.new_line(output);
            output.push_str("return ");
            format_expression(&rd.expr, output, context);
            output.push(';');
        }
        // Rejected by semantic analysis
        Stmt::Decl(_) => {}
        Stmt::Expr(expr) => {
            context.new_line(output);
            format_expression(expr, output, context);
            output.push(';');
        }
    }
}

fn format_literal(literal: &Literal, output: &mut String) {
    match literal {
        Literal::Int(i) => output.push_str(&i.to_string()),
        Literal::UInt(u) => output.push_str(&format!("{}u", u)),
        Literal::Float(f) => output.push_str(&format!("{:?}", f)),
        Literal::String(s) => output.push_str(&format!("\"{}\"", s)),
    }
}

fn format_list(exprs: &[Located<Expr>], output: &mut String, context: &FormatContext) {
    for (i, expr) in exprs.iter().enumerate() {
        if i != 0 {
            output.push_str(", ");
        }
        format_expression(expr, output, context);
    }
}

/// Write an expression that is an operand of another operator
///
/// Binary chains are right-deep so nested binary operations are always bracketed.
fn format_operand(expr: &Expr, output: &mut String, context: &FormatContext) {
    if let Expr::BinaryOp(..) = expr {
        output.push('(');
        format_expression(expr, output, context);
        output.push(')');
    } else {
        format_expression(expr, output, context);
    }
}

fn is_assignment(op: BinOp) -> bool {
    matches!(
        op,
        BinOp::Assignment | BinOp::SumAssignment | BinOp::DifferenceAssignment
    )
}

fn find_builtin(callee: &Expr) -> Option<BuiltinFunction> {
    match callee {
        Expr::Id(name) => BuiltinFunction::ALL
            .iter()
            .copied()
            .find(|f| f.name() == name),
        _ => None,
    }
}

fn format_call(
    callee: &Located<Expr>,
    args: &[Located<Expr>],
    output: &mut String,
    context: &FormatContext,
) {
    match (find_builtin(callee), args) {
        (Some(BuiltinFunction::MakeFloat2), _) => output.push_str("float2("),
        (Some(BuiltinFunction::MakeFloat3), _) => output.push_str("float3("),
        (Some(BuiltinFunction::MakeFloat4), _) => output.push_str("float4("),
        (Some(BuiltinFunction::Sample), [sampler, texture, coord]) => {
            format_operand(texture, output, context);
            output.push_str(".Sample(");
            format_expression(sampler, output, context);
            output.push_str(", ");
            format_expression(coord, output, context);
            output.push(')');
            return;
        }
        (Some(BuiltinFunction::Write), [texture, coord, data]) => {
            format_operand(texture, output, context);
            output.push('[');
            match context.texture_coord(texture) {
                Some(coord_type) => {
                    output.push_str(coord_type);
                    output.push('(');
                    format_expression(coord, output, context);
                    output.push(')');
                }
                None => format_expression(coord, output, context),
            }
            output.push_str("] = ");
            format_expression(data, output, context);
            return;
        }
        _ => {
            format_operand(callee, output, context);
            output.push('(');
        }
    }
    format_list(args, output, context);
    output.push(')');
}

pub(crate) fn format_expression(expr: &Expr, output: &mut String, context: &FormatContext) {
    match expr {
        Expr::Id(name) => output.push_str(name),
        Expr::Literal(literal) => format_literal(literal, output),
        Expr::Member(object, member) => {
            format_operand(object, output, context);
            output.push('.');
            output.push_str(member);
        }
        Expr::Array(elements) => {
            output.push('{');
            format_list(elements, output, context);
            output.push('}');
        }
        Expr::Call(callee, args) => format_call(callee, args, output, context),
        Expr::UnaryOp(op, operand) => {
            if op.is_prefix() {
                output.push_str(op.symbol());
                format_operand(operand, output, context);
            } else {
                format_operand(operand, output, context);
                output.push_str(op.symbol());
            }
        }
        Expr::BinaryOp(op, lhs, rhs) => {
            format_operand(lhs, output, context);
            output.push(' ');
            output.push_str(op.symbol());
            output.push(' ');
            if is_assignment(*op) {
                format_expression(rhs, output, context);
            } else {
                format_operand(rhs, output, context);
            }
        }
        Expr::Pointer(op, operand) => {
            output.push(match op {
                PointerOp::AddressOf => '&',
                PointerOp::Dereference => '*',
            });
            format_operand(operand, output, context);
        }
        Expr::Index(object, index) => {
            format_operand(object, output, context);
            output.push('[');
            format_expression(index, output, context);
            output.push(']');
        }
    }
}

#[test]
fn test_format_expression() {
    let var = |name: &str| Located::none(Expr::Id(name.to_string()));
    let float = |f: f32| Located::none(Expr::Literal(Literal::Float(f)));
    let binary = |op, lhs, rhs| Located::none(Expr::BinaryOp(op, Box::new(lhs), Box::new(rhs)));
    let call = |name: &str, args| Located::none(Expr::Call(Box::new(var(name)), args));
    let mut context = FormatContext::new();
    context.add_texture("img", TypeKeyword::Texture2d);
    context.add_texture("vol", TypeKeyword::Texture3d);
    let format = |expr: Located<Expr>| {
        let mut output = String::new();
        format_expression(&expr, &mut output, &context);
        output
    };

    assert_eq!(
        format(binary(
            BinOp::Subtract,
            var("a"),
            binary(BinOp::Subtract, var("b"), var("c"))
        )),
        "a - (b - c)"
    );
    assert_eq!(
        format(binary(
            BinOp::Assignment,
            var("a"),
            binary(BinOp::Add, var("b"), var("c"))
        )),
        "a = b + c"
    );
    assert_eq!(
        format(call("make_float2", vec![float(1.0), float(0.5)])),
        "float2(1.0, 0.5)"
    );
    assert_eq!(
        format(call("sample", vec![var("s"), var("t"), var("uv")])),
        "t.Sample(s, uv)"
    );
    assert_eq!(
        format(call("write", vec![var("img"), var("c"), var("d")])),
        "img[uint2(c)] = d"
    );
    assert_eq!(
        format(call(
            "write",
            vec![
                var("vol"),
                call("make_float3", vec![float(1.0), float(2.0), float(0.0)]),
                var("d")
            ]
        )),
        "vol[uint3(float3(1.0, 2.0, 0.0))] = d"
    );
    assert_eq!(format(call("dot", vec![var("a"), var("b")])), "dot(a, b)");
    assert_eq!(
        format(Located::none(Expr::UnaryOp(
            UnaryOp::PostfixIncrement,
            Box::new(var("i"))
        ))),
        "i++"
    );
    assert_eq!(format(Located::none(Expr::Literal(Literal::UInt(3)))), "3u");
}

#[test]
fn test_format_struct() {
    let sd = StructDecl {
        name: Located::none("V".to_string()),
        internal: true,
        fields: vec![
            StructField {
                type_expr: Located::none(TypeExpr::builtin(TypeKeyword::Float4)),
                name: Located::none("pos".to_string()),
                attribute: Some(Located::none("position".to_string())),
            },
            StructField {
                type_expr: Located::none(TypeExpr::builtin(TypeKeyword::Float2)),
                name: Located::none("uv".to_string()),
                attribute: None,
            },
        ],
    };
    assert_eq!(
        format_struct(&sd),
        "struct V\n{\n    float4 pos : SV_Position;\n    float2 uv;\n};\n"
    );
}
