use crate::BackendError;
use omegasl_ast::*;
use omegasl_library::{DataType, VertexInputDesc, VertexParam};
use omegasl_sem::SemContext;

fn data_type(ty: &TypeExpr) -> Option<DataType> {
    if ty.pointer {
        return None;
    }
    Some(match TypeKeyword::from_name(&ty.name)? {
        TypeKeyword::Int => DataType::Int,
        TypeKeyword::Uint => DataType::Uint,
        TypeKeyword::Uint2 => DataType::Uint2,
        TypeKeyword::Uint3 => DataType::Uint3,
        TypeKeyword::Float => DataType::Float,
        TypeKeyword::Float2 => DataType::Float2,
        TypeKeyword::Float3 => DataType::Float3,
        TypeKeyword::Float4 => DataType::Float4,
        _ => return None,
    })
}

/// Builds the tightly packed vertex attribute list of a vertex shader
#[derive(Default)]
struct VertexInputBuilder {
    desc: VertexInputDesc,
    offset: u64,
}

impl VertexInputBuilder {
    fn push(&mut self, name: &str, ty: &TypeExpr) -> Result<(), BackendError> {
        let data_type = match data_type(ty) {
            Some(data_type) => data_type,
            None => {
                return Err(BackendError::UnsupportedVertexInput {
                    name: name.to_string(),
                    type_name: ty.to_string(),
                })
            }
        };
        self.desc.params.push(VertexParam {
            name: name.to_string(),
            data_type,
            offset: self.offset,
        });
        self.offset += data_type.size_in_bytes();
        Ok(())
    }

    /// Add a value, flattening struct values into their fields
    ///
    /// Fields of nested structs are named by their path, as in `light.color`.
    fn push_value(
        &mut self,
        name: &str,
        ty: &TypeExpr,
        ctx: &SemContext,
    ) -> Result<(), BackendError> {
        match ctx.find_struct(&ty.name) {
            Some(sd) if !ty.pointer => {
                for field in &sd.decl.fields {
                    let field_name = format!("{}.{}", name, field.name.node);
                    self.push_value(&field_name, &field.type_expr, ctx)?;
                }
                Ok(())
            }
            _ => self.push(name, ty),
        }
    }
}

/// Describe the vertex attributes a vertex shader reads
///
/// Struct parameters contribute each of their fields, recursing into nested structs. Attributed
/// parameters are system values and take no space in the vertex.
pub(crate) fn vertex_input(
    func: &FuncDecl,
    ctx: &SemContext,
) -> Result<VertexInputDesc, BackendError> {
    let mut builder = VertexInputBuilder::default();
    for param in &func.params {
        match &param.attribute {
            Some(attribute) => {
                if attribute.node == "vertex_id" {
                    builder.desc.uses_vertex_id = true;
                }
            }
            None => match ctx.find_struct(&param.type_expr.name) {
                Some(sd) if !param.type_expr.pointer => {
                    for field in &sd.decl.fields {
                        builder.push_value(&field.name, &field.type_expr, ctx)?;
                    }
                }
                _ => builder.push(&param.name, &param.type_expr)?,
            },
        }
    }
    Ok(builder.desc)
}
