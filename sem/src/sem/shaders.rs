use super::*;
use log::warn;

/// Check a shader entry point and register it
///
/// Shader local variables are dropped afterwards whether or not the shader was valid.
pub fn check_shader(sd: &ShaderDecl, sem: &mut Sem) -> SemResult<()> {
    sem.context.clear_variables();
    let result = check_shader_internal(sd, sem);
    sem.context.clear_variables();
    result
}

fn check_shader_internal(sd: &ShaderDecl, sem: &mut Sem) -> SemResult<()> {
    let name = &sd.func.name;
    if let Some(previous) = sem.context.shader_location(name) {
        return Err(SemError::ShaderAlreadyDefined(name.clone(), previous));
    }

    let mut structs = Vec::new();

    // Mapped resources are visible by name inside the body
    for entry in &sd.resource_map {
        let resource = match sem.context.find_resource(&entry.name) {
            Some(resource) => resource,
            None => {
                warn!(
                    "resource '{}' mapped into shader '{}' was never declared",
                    entry.name.node, name.node
                );
                continue;
            }
        };
        if resource.is_sampler() && entry.access != IoMode::In {
            return Err(SemError::SamplerAccessMustBeIn(
                entry.name.clone(),
                entry.access,
            ));
        }
        let ty = resource.decl.type_expr.node.clone();
        sem.record_structs(&ty, &mut structs);
        sem.declare_variable(&entry.name, ty)?;
    }

    for (position, param) in sd.func.params.iter().enumerate() {
        sem.require_type(&param.type_expr)?;
        if let Some(attribute) = &param.attribute {
            check_param_attribute(sd.stage, attribute, position)?;
        }
        sem.record_structs(&param.type_expr, &mut structs);
        sem.declare_variable(&param.name, param.type_expr.node.clone())?;
    }

    let declared = &sd.func.return_type;
    sem.require_type(declared)?;

    let (returned, return_location) =
        match statements::check_block(&sd.func.body, sem, &mut structs)? {
            Some(returned) => (returned.node, returned.location),
            None => (TypeExpr::builtin(TypeKeyword::Void), declared.location),
        };

    match sd.stage {
        ShaderStage::Fragment if !returned.is(TypeKeyword::Float4) => {
            return Err(SemError::WrongShaderReturnType(
                sd.stage,
                returned,
                return_location,
            ))
        }
        ShaderStage::Compute if !returned.is(TypeKeyword::Void) => {
            return Err(SemError::WrongShaderReturnType(
                sd.stage,
                returned,
                return_location,
            ))
        }
        _ => {}
    }

    if !declared.compare(&returned) {
        return Err(SemError::ReturnTypeMismatch(
            declared.node.clone(),
            returned,
            return_location,
        ));
    }
    sem.record_structs(declared, &mut structs);

    let signature = FuncType {
        name: name.node.clone(),
        scope: &GLOBAL_SCOPE,
        builtin: None,
        params: sd
            .func
            .params
            .iter()
            .map(|p| (p.name.node.clone(), p.type_expr.node.clone()))
            .collect(),
        return_type: declared.node.clone(),
    };
    sem.context.add_shader(name.clone(), signature, structs);
    Ok(())
}

/// Check an attribute on a shader parameter is valid for the stage
///
/// Compute attributes each have a fixed parameter position.
fn check_param_attribute(
    stage: ShaderStage,
    attribute: &Located<String>,
    position: usize,
) -> SemResult<()> {
    let required_position = match (stage, attribute.as_str()) {
        (ShaderStage::Vertex, "vertex_id") => None,
        (ShaderStage::Compute, "global_thread_id") => Some(0),
        (ShaderStage::Compute, "local_thread_id") => Some(1),
        (ShaderStage::Compute, "threadgroup_id") => Some(2),
        _ => {
            return Err(SemError::InvalidAttribute(
                attribute.clone(),
                AttributeContext::Param(stage),
            ))
        }
    };
    match required_position {
        Some(required) if required != position => Err(SemError::ComputeAttributeOrder(
            attribute.clone(),
            required,
            position,
        )),
        _ => Ok(()),
    }
}

#[test]
fn test_param_attribute() {
    let attr = |name: &str| Located::none(name.to_string());

    assert_eq!(
        check_param_attribute(ShaderStage::Vertex, &attr("vertex_id"), 3),
        Ok(())
    );
    assert_eq!(
        check_param_attribute(ShaderStage::Compute, &attr("threadgroup_id"), 2),
        Ok(())
    );
    assert_eq!(
        check_param_attribute(ShaderStage::Compute, &attr("local_thread_id"), 0),
        Err(SemError::ComputeAttributeOrder(attr("local_thread_id"), 1, 0))
    );
    assert_eq!(
        check_param_attribute(ShaderStage::Fragment, &attr("vertex_id"), 0),
        Err(SemError::InvalidAttribute(
            attr("vertex_id"),
            AttributeContext::Param(ShaderStage::Fragment)
        ))
    );
    assert_eq!(
        check_param_attribute(ShaderStage::Vertex, &attr("global_thread_id"), 0),
        Err(SemError::InvalidAttribute(
            attr("global_thread_id"),
            AttributeContext::Param(ShaderStage::Vertex)
        ))
    );
}
