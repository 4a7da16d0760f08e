use super::*;

/// Check the statements of a shader body
///
/// Returns the type of the body's return statements along with the location of the first one, or
/// `None` if the body never returns.
pub fn check_block(
    body: &[Stmt],
    sem: &mut Sem,
    structs: &mut Vec<String>,
) -> SemResult<Option<Located<TypeExpr>>> {
    let mut returned: Option<Located<TypeExpr>> = None;
    for stmt in body {
        match stmt {
            Stmt::Decl(Decl::Var(vd)) => check_var(vd, sem, structs)?,
            Stmt::Decl(Decl::Return(rd)) => {
                let ty = expressions::type_of(&rd.expr, sem)?;
                match &returned {
                    Some(first) if !first.compare(&ty) => {
                        return Err(SemError::MismatchedReturnTypes(
                            first.node.clone(),
                            ty,
                            rd.location,
                        ))
                    }
                    Some(_) => {}
                    None => returned = Some(Located::new(ty, rd.location)),
                }
            }
            Stmt::Decl(decl) => return Err(SemError::DeclarationInBlock(decl.location())),
            Stmt::Expr(expr) => {
                expressions::type_of(expr, sem)?;
            }
        }
    }
    Ok(returned)
}

fn check_var(vd: &VarDecl, sem: &mut Sem, structs: &mut Vec<String>) -> SemResult<()> {
    sem.require_type(&vd.type_expr)?;

    if let Some(initializer) = &vd.initializer {
        let ty = expressions::type_of(initializer, sem)?;
        if !vd.type_expr.compare(&ty) {
            return Err(SemError::InitializerWrongType(
                vd.type_expr.node.clone(),
                ty,
                initializer.location,
            ));
        }
    }

    sem.record_structs(&vd.type_expr, structs);
    sem.declare_variable(&vd.name, vd.type_expr.node.clone())
}
