use super::*;

/// Find the type of an expression inside a shader body
pub fn type_of(expr: &Located<Expr>, sem: &Sem) -> SemResult<TypeExpr> {
    match &expr.node {
        Expr::Id(name) => match sem.context.find_variable(name) {
            Some(ty) => Ok(ty.clone()),
            None => Err(SemError::UnknownIdentifier(name.clone(), expr.location)),
        },
        Expr::Literal(literal) => type_of_literal(literal, expr.location),
        Expr::Member(object, member) => type_of_member(object, member, expr.location, sem),
        Expr::Array(elements) => type_of_array(elements, expr.location, sem),
        Expr::Call(callee, args) => intrinsics::type_of_call(callee, args, expr.location, sem),
        Expr::UnaryOp(_, operand) => type_of(operand, sem),
        Expr::BinaryOp(op, lhs, rhs) => {
            let right = type_of(rhs, sem)?;
            let left = type_of(lhs, sem)?;
            if left.compare(&right) {
                Ok(left)
            } else {
                Err(SemError::BinaryOperationWrongTypes(
                    *op,
                    left,
                    right,
                    expr.location,
                ))
            }
        }
        Expr::Pointer(PointerOp::AddressOf, operand) => {
            let ty = type_of(operand, sem)?;
            if ty.pointer {
                Err(SemError::AddressOfPointer(ty, expr.location))
            } else {
                Ok(ty.into_pointer())
            }
        }
        Expr::Pointer(PointerOp::Dereference, operand) => {
            let ty = type_of(operand, sem)?;
            match ty.pointee() {
                Some(pointee) => Ok(pointee),
                None => Err(SemError::DereferenceNonPointer(ty, expr.location)),
            }
        }
        Expr::Index(object, index) => {
            let ty = type_of(object, sem)?;
            if !ty.is(TypeKeyword::Buffer) {
                return Err(SemError::IndexOnNonBuffer(ty, object.location));
            }
            let index_type = type_of(index, sem)?;
            if !index_type.is(TypeKeyword::Uint) {
                return Err(SemError::IndexNotUint(index_type, index.location));
            }
            match ty.args.first() {
                Some(element) => Ok(element.clone()),
                None => Err(SemError::IndexOnNonBuffer(ty.clone(), object.location)),
            }
        }
    }
}

fn type_of_literal(literal: &Literal, location: SourceLocation) -> SemResult<TypeExpr> {
    let ty = match literal {
        Literal::Int(_) => TypeKeyword::Int,
        Literal::UInt(_) => TypeKeyword::Uint,
        Literal::Float(_) => TypeKeyword::Float,
        Literal::String(_) => return Err(SemError::StringNotSupported(location)),
    };
    Ok(TypeExpr::builtin(ty))
}

/// Swizzles each vector type supports
fn swizzles(vector: TypeKeyword) -> &'static [&'static str] {
    match vector {
        TypeKeyword::Float2 => &["x", "y", "xy"],
        TypeKeyword::Float3 => &["x", "y", "z", "xy", "yz", "xyz"],
        TypeKeyword::Float4 => &["x", "y", "z", "w", "xy", "yz", "zw", "xyz", "yzw", "xyzw"],
        _ => &[],
    }
}

/// Get the result type of a swizzle on a float vector
fn swizzle_type(vector: TypeKeyword, swizzle: &str) -> Option<TypeExpr> {
    if !swizzles(vector).contains(&swizzle) {
        return None;
    }
    let result = match swizzle.len() {
        1 => TypeKeyword::Float,
        2 => TypeKeyword::Float2,
        3 => TypeKeyword::Float3,
        _ => TypeKeyword::Float4,
    };
    Some(TypeExpr::builtin(result))
}

fn type_of_member(
    object: &Located<Expr>,
    member: &str,
    location: SourceLocation,
    sem: &Sem,
) -> SemResult<TypeExpr> {
    let ty = type_of(object, sem)?;
    if ty.pointer {
        return Err(SemError::TypeDoesNotHaveMembers(ty, location));
    }

    let resolved = match sem.resolve_type(&ty) {
        Some(resolved) => resolved,
        None => return Err(SemError::UnknownType(ty, location)),
    };

    match resolved.builtin {
        Some(
            vector @ (TypeKeyword::Float2 | TypeKeyword::Float3 | TypeKeyword::Float4),
        ) => match swizzle_type(vector, member) {
            Some(result) => Ok(result),
            None => Err(SemError::InvalidSwizzle(ty, member.to_string(), location)),
        },
        Some(_) => Err(SemError::TypeDoesNotHaveMembers(ty, location)),
        None => match resolved.field(member) {
            Some(field_type) => Ok(field_type.clone()),
            None => Err(SemError::MemberDoesNotExist(
                ty,
                member.to_string(),
                location,
            )),
        },
    }
}

/// Array literals take the type of their elements
fn type_of_array(
    elements: &[Located<Expr>],
    location: SourceLocation,
    sem: &Sem,
) -> SemResult<TypeExpr> {
    let (first, rest) = match elements.split_first() {
        Some(split) => split,
        None => return Err(SemError::EmptyArray(location)),
    };
    let element_type = type_of(first, sem)?;
    for element in rest {
        let ty = type_of(element, sem)?;
        if !element_type.compare(&ty) {
            return Err(SemError::ArrayElementMismatch(
                element_type,
                ty,
                element.location,
            ));
        }
    }
    Ok(element_type)
}

#[test]
fn test_swizzle_type() {
    let float = Some(TypeExpr::builtin(TypeKeyword::Float));
    let float2 = Some(TypeExpr::builtin(TypeKeyword::Float2));
    let float3 = Some(TypeExpr::builtin(TypeKeyword::Float3));
    let float4 = Some(TypeExpr::builtin(TypeKeyword::Float4));

    assert_eq!(swizzle_type(TypeKeyword::Float4, "xyzw"), float4);
    assert_eq!(swizzle_type(TypeKeyword::Float4, "zw"), float2);
    assert_eq!(swizzle_type(TypeKeyword::Float3, "yz"), float2);
    assert_eq!(swizzle_type(TypeKeyword::Float3, "xyz"), float3);
    assert_eq!(swizzle_type(TypeKeyword::Float2, "y"), float);

    assert_eq!(swizzle_type(TypeKeyword::Float4, "q"), None);
    assert_eq!(swizzle_type(TypeKeyword::Float3, "w"), None);
    assert_eq!(swizzle_type(TypeKeyword::Float2, "xyz"), None);
    assert_eq!(swizzle_type(TypeKeyword::Float4, "xz"), None);
    assert_eq!(swizzle_type(TypeKeyword::Uint3, "x"), None);
}

#[test]
fn test_literal_types() {
    let loc = SourceLocation::first();
    assert_eq!(
        type_of_literal(&Literal::UInt(3), loc),
        Ok(TypeExpr::builtin(TypeKeyword::Uint))
    );
    assert_eq!(
        type_of_literal(&Literal::Float(0.5), loc),
        Ok(TypeExpr::builtin(TypeKeyword::Float))
    );
    assert_eq!(
        type_of_literal(&Literal::String("s".to_string()), loc),
        Err(SemError::StringNotSupported(loc))
    );
}
