use super::*;

/// Number of float components in a float scalar or vector type
fn float_width(ty: &TypeExpr) -> Option<u32> {
    if ty.is(TypeKeyword::Float) {
        Some(1)
    } else if ty.is(TypeKeyword::Float2) {
        Some(2)
    } else if ty.is(TypeKeyword::Float3) {
        Some(3)
    } else if ty.is(TypeKeyword::Float4) {
        Some(4)
    } else {
        None
    }
}

/// Type check a call expression
///
/// Only builtin functions can be called.
pub fn type_of_call(
    callee: &Located<Expr>,
    args: &[Located<Expr>],
    location: SourceLocation,
    sem: &Sem,
) -> SemResult<TypeExpr> {
    let name = match &callee.node {
        Expr::Id(name) => name,
        _ => return Err(SemError::CallOnNonFunction(callee.location)),
    };

    let builtin = match sem.resolve_function(name) {
        Some(FuncType {
            builtin: Some(builtin),
            ..
        }) => *builtin,
        Some(_) => return Err(SemError::ShaderCalled(name.clone(), callee.location)),
        None => return Err(SemError::UnknownFunction(name.clone(), callee.location)),
    };

    let arg_types = args
        .iter()
        .map(|arg| expressions::type_of(arg, sem))
        .collect::<SemResult<Vec<_>>>()?;

    check_builtin_call(builtin, args, &arg_types, location)
}

/// Check the arguments to a builtin function and get the result type
fn check_builtin_call(
    func: BuiltinFunction,
    args: &[Located<Expr>],
    types: &[TypeExpr],
    location: SourceLocation,
) -> SemResult<TypeExpr> {
    let wrong_type = |index: usize| {
        SemError::WrongArgumentType(func, index, types[index].clone(), args[index].location)
    };
    let expect_count = |count: usize| {
        if types.len() == count {
            Ok(())
        } else {
            Err(SemError::WrongArgumentCount(func, types.len(), location))
        }
    };

    match func {
        BuiltinFunction::MakeFloat2 | BuiltinFunction::MakeFloat3 | BuiltinFunction::MakeFloat4 => {
            let (width, result) = match func {
                BuiltinFunction::MakeFloat2 => (2, TypeKeyword::Float2),
                BuiltinFunction::MakeFloat3 => (3, TypeKeyword::Float3),
                _ => (4, TypeKeyword::Float4),
            };
            if types.len() < 2 || types.len() > width as usize {
                return Err(SemError::WrongArgumentCount(func, types.len(), location));
            }

            let mut components = 0;
            for (index, ty) in types.iter().enumerate() {
                match float_width(ty) {
                    Some(n) if n < 4 => components += n,
                    _ => return Err(wrong_type(index)),
                }
            }
            if components != width {
                return Err(SemError::VectorComponentMismatch(func, components, location));
            }
            Ok(TypeExpr::builtin(result))
        }
        BuiltinFunction::Dot => {
            expect_count(2)?;
            match float_width(&types[0]) {
                Some(n) if n >= 2 => {}
                _ => return Err(wrong_type(0)),
            }
            if !types[1].compare(&types[0]) {
                return Err(wrong_type(1));
            }
            Ok(TypeExpr::builtin(TypeKeyword::Float))
        }
        BuiltinFunction::Cross => {
            expect_count(2)?;
            for (index, ty) in types.iter().enumerate() {
                if !ty.is(TypeKeyword::Float3) {
                    return Err(wrong_type(index));
                }
            }
            Ok(TypeExpr::builtin(TypeKeyword::Float3))
        }
        BuiltinFunction::Sample => {
            expect_count(3)?;
            let (texture, coord) = if types[0].is(TypeKeyword::Sampler2d) {
                (TypeKeyword::Texture2d, TypeKeyword::Float2)
            } else if types[0].is(TypeKeyword::Sampler3d) {
                (TypeKeyword::Texture3d, TypeKeyword::Float3)
            } else {
                return Err(wrong_type(0));
            };
            if !types[1].is(texture) {
                return Err(wrong_type(1));
            }
            if !types[2].is(coord) {
                return Err(wrong_type(2));
            }
            Ok(TypeExpr::builtin(TypeKeyword::Float4))
        }
        BuiltinFunction::Write => {
            expect_count(3)?;
            let coord = if types[0].is(TypeKeyword::Texture1d) {
                TypeKeyword::Float
            } else if types[0].is(TypeKeyword::Texture2d) {
                TypeKeyword::Float2
            } else if types[0].is(TypeKeyword::Texture3d) {
                TypeKeyword::Float3
            } else {
                return Err(wrong_type(0));
            };
            if !types[1].is(coord) {
                return Err(wrong_type(1));
            }
            if !types[2].is(TypeKeyword::Float4) {
                return Err(wrong_type(2));
            }
            Ok(TypeExpr::builtin(TypeKeyword::Void))
        }
    }
}

#[test]
fn test_make_float() {
    let float = TypeExpr::builtin(TypeKeyword::Float);
    let float2 = TypeExpr::builtin(TypeKeyword::Float2);
    let float3 = TypeExpr::builtin(TypeKeyword::Float3);
    let args = vec![Located::none(Expr::Id("a".to_string())); 4];
    let loc = SourceLocation::first();
    let check = |func, types: &[TypeExpr]| check_builtin_call(func, &args, types, loc);

    assert_eq!(
        check(BuiltinFunction::MakeFloat2, &[float.clone(), float.clone()]),
        Ok(float2.clone())
    );
    assert_eq!(
        check(BuiltinFunction::MakeFloat4, &[float2.clone(), float2.clone()]),
        Ok(TypeExpr::builtin(TypeKeyword::Float4))
    );
    assert_eq!(
        check(BuiltinFunction::MakeFloat4, &[float.clone(), float3.clone()]),
        Ok(TypeExpr::builtin(TypeKeyword::Float4))
    );
    assert_eq!(
        check(BuiltinFunction::MakeFloat3, &[float.clone()]),
        Err(SemError::WrongArgumentCount(BuiltinFunction::MakeFloat3, 1, loc))
    );
    assert_eq!(
        check(BuiltinFunction::MakeFloat3, &[float2.clone(), float2.clone()]),
        Err(SemError::VectorComponentMismatch(BuiltinFunction::MakeFloat3, 4, loc))
    );
    assert_eq!(
        check(
            BuiltinFunction::MakeFloat2,
            &[float.clone(), TypeExpr::builtin(TypeKeyword::Int)]
        ),
        Err(SemError::WrongArgumentType(
            BuiltinFunction::MakeFloat2,
            1,
            TypeExpr::builtin(TypeKeyword::Int),
            loc
        ))
    );
}

#[test]
fn test_vector_builtins() {
    let float2 = TypeExpr::builtin(TypeKeyword::Float2);
    let float3 = TypeExpr::builtin(TypeKeyword::Float3);
    let args = vec![Located::none(Expr::Id("a".to_string())); 3];
    let loc = SourceLocation::first();
    let check = |func, types: &[TypeExpr]| check_builtin_call(func, &args, types, loc);

    assert_eq!(
        check(BuiltinFunction::Dot, &[float2.clone(), float2.clone()]),
        Ok(TypeExpr::builtin(TypeKeyword::Float))
    );
    assert_eq!(
        check(BuiltinFunction::Dot, &[float2.clone(), float3.clone()]),
        Err(SemError::WrongArgumentType(
            BuiltinFunction::Dot,
            1,
            float3.clone(),
            loc
        ))
    );
    assert_eq!(
        check(BuiltinFunction::Cross, &[float3.clone(), float3.clone()]),
        Ok(float3.clone())
    );
    assert_eq!(
        check(BuiltinFunction::Cross, &[float3.clone()]),
        Err(SemError::WrongArgumentCount(BuiltinFunction::Cross, 1, loc))
    );
}

#[test]
fn test_texture_builtins() {
    let ty = TypeExpr::builtin;
    let args = vec![Located::none(Expr::Id("a".to_string())); 3];
    let loc = SourceLocation::first();
    let check = |func, types: &[TypeExpr]| check_builtin_call(func, &args, types, loc);

    assert_eq!(
        check(
            BuiltinFunction::Sample,
            &[
                ty(TypeKeyword::Sampler2d),
                ty(TypeKeyword::Texture2d),
                ty(TypeKeyword::Float2)
            ]
        ),
        Ok(ty(TypeKeyword::Float4))
    );
    assert_eq!(
        check(
            BuiltinFunction::Sample,
            &[
                ty(TypeKeyword::Sampler3d),
                ty(TypeKeyword::Texture2d),
                ty(TypeKeyword::Float3)
            ]
        ),
        Err(SemError::WrongArgumentType(
            BuiltinFunction::Sample,
            1,
            ty(TypeKeyword::Texture2d),
            loc
        ))
    );
    assert_eq!(
        check(
            BuiltinFunction::Write,
            &[
                ty(TypeKeyword::Texture1d),
                ty(TypeKeyword::Float),
                ty(TypeKeyword::Float4)
            ]
        ),
        Ok(ty(TypeKeyword::Void))
    );
    assert_eq!(
        check(
            BuiltinFunction::Write,
            &[
                ty(TypeKeyword::Texture2d),
                ty(TypeKeyword::Float2),
                ty(TypeKeyword::Float3)
            ]
        ),
        Err(SemError::WrongArgumentType(
            BuiltinFunction::Write,
            2,
            ty(TypeKeyword::Float3),
            loc
        ))
    );
}
