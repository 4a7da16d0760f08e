use super::*;

/// Check a resource declaration and add it to the resource set
pub fn check_resource(rd: &ResourceDecl, sem: &mut Sem) -> SemResult<()> {
    if let Some(previous) = sem.context.find_resource(&rd.name) {
        return Err(SemError::ResourceAlreadyDefined(
            rd.name.clone(),
            previous.decl.name.location,
        ));
    }

    let builtin = sem.require_type(&rd.type_expr)?.builtin;
    let kind = match builtin {
        Some(
            kind @ (TypeKeyword::Buffer
            | TypeKeyword::Texture1d
            | TypeKeyword::Texture2d
            | TypeKeyword::Texture3d
            | TypeKeyword::Sampler2d
            | TypeKeyword::Sampler3d),
        ) if !rd.type_expr.pointer => kind,
        _ => {
            return Err(SemError::InvalidResourceType(
                rd.type_expr.node.clone(),
                rd.type_expr.location,
            ))
        }
    };

    match kind {
        TypeKeyword::Buffer if rd.type_expr.args.len() != 1 => {
            return Err(SemError::BufferRequiresElementType(rd.name.clone()))
        }
        TypeKeyword::Buffer => {}
        _ if !rd.type_expr.args.is_empty() => {
            return Err(SemError::InvalidResourceType(
                rd.type_expr.node.clone(),
                rd.type_expr.location,
            ))
        }
        _ => {}
    }

    let def = ResourceDef {
        decl: rd.clone(),
        kind,
    };
    if rd.is_static && !def.is_sampler() {
        return Err(SemError::StaticResourceNotSampler(rd.name.clone()));
    }

    sem.context.add_resource(def);
    Ok(())
}
