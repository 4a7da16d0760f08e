use super::*;

/// Attributes an internal struct field may carry
const FIELD_ATTRIBUTES: [&str; 3] = ["color", "position", "texcoord"];

/// Check a struct definition and add it to the type table
pub fn check_struct(sd: &StructDecl, sem: &mut Sem) -> SemResult<()> {
    if sem.resolve_type(&TypeExpr::new(sd.name.as_str())).is_some() {
        let previous = sem
            .context
            .find_struct(&sd.name)
            .map_or(SourceLocation::UNKNOWN, |s| s.decl.name.location);
        return Err(SemError::TypeAlreadyDefined(sd.name.clone(), previous));
    }

    let mut fields: Vec<(String, TypeExpr)> = Vec::with_capacity(sd.fields.len());
    for (index, field) in sd.fields.iter().enumerate() {
        sem.require_type(&field.type_expr)?;

        if let Some(previous) = sd.fields[..index]
            .iter()
            .find(|f| f.name.node == field.name.node)
        {
            return Err(SemError::DuplicateField(
                field.name.clone(),
                previous.name.location,
            ));
        }

        if let Some(attribute) = &field.attribute {
            if !sd.internal {
                return Err(SemError::AttributeOnPublicStruct(attribute.clone()));
            }
            if !FIELD_ATTRIBUTES.contains(&attribute.as_str()) {
                return Err(SemError::InvalidAttribute(
                    attribute.clone(),
                    AttributeContext::StructField,
                ));
            }
        }

        fields.push((field.name.node.clone(), field.type_expr.node.clone()));
    }

    sem.context.add_struct(StructDef {
        ty: Type::new_struct(sd.name.node.clone(), fields),
        decl: sd.clone(),
    });
    Ok(())
}
