use super::format::format_type;
use crate::BackendError;
use log::trace;
use omegasl_ast::*;
use omegasl_library::{LayoutEntry, LayoutKind};
use omegasl_sem::{ResourceDef, SemContext};

/// HLSL register class a resource binds to
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
enum RegisterClass {
    /// Read only views
    T,
    /// Unordered access views
    U,
    /// Samplers
    S,
}

impl RegisterClass {
    fn prefix(self) -> char {
        match self {
            RegisterClass::T => 't',
            RegisterClass::U => 'u',
            RegisterClass::S => 's',
        }
    }
}

/// Next free slot in each register class
#[derive(Default)]
struct SlotCounters {
    t: u32,
    u: u32,
    s: u32,
}

impl SlotCounters {
    fn next(&mut self, class: RegisterClass) -> u32 {
        let counter = match class {
            RegisterClass::T => &mut self.t,
            RegisterClass::U => &mut self.u,
            RegisterClass::S => &mut self.s,
        };
        let slot = *counter;
        *counter += 1;
        slot
    }
}

fn register_class(def: &ResourceDef, access: IoMode) -> RegisterClass {
    if def.is_sampler() {
        RegisterClass::S
    } else if access == IoMode::In {
        RegisterClass::T
    } else {
        RegisterClass::U
    }
}

fn layout_kind(def: &ResourceDef) -> Option<LayoutKind> {
    Some(match (def.kind, def.decl.is_static) {
        (TypeKeyword::Buffer, _) => LayoutKind::Buffer,
        (TypeKeyword::Texture1d, _) => LayoutKind::Texture1d,
        (TypeKeyword::Texture2d, _) => LayoutKind::Texture2d,
        (TypeKeyword::Texture3d, _) => LayoutKind::Texture3d,
        (TypeKeyword::Sampler2d, false) => LayoutKind::Sampler2d,
        (TypeKeyword::Sampler2d, true) => LayoutKind::StaticSampler2d,
        (TypeKeyword::Sampler3d, false) => LayoutKind::Sampler3d,
        (TypeKeyword::Sampler3d, true) => LayoutKind::StaticSampler3d,
        _ => return None,
    })
}

/// Get the HLSL object type for a resource seen through the given access
fn resource_type_name(def: &ResourceDef, access: IoMode) -> Option<String> {
    let read_only = access == IoMode::In;
    let name = match def.kind {
        TypeKeyword::Buffer => {
            let mut element = String::new();
            format_type(def.decl.type_expr.args.first()?, &mut element);
            return Some(match read_only {
                true => format!("StructuredBuffer<{}>", element),
                false => format!("RWStructuredBuffer<{}>", element),
            });
        }
        TypeKeyword::Texture1d if read_only => "Texture1D",
        TypeKeyword::Texture1d => "RWTexture1D<float4>",
        TypeKeyword::Texture2d if read_only => "Texture2D",
        TypeKeyword::Texture2d => "RWTexture2D<float4>",
        TypeKeyword::Texture3d if read_only => "Texture3D",
        TypeKeyword::Texture3d => "RWTexture3D<float4>",
        TypeKeyword::Sampler2d | TypeKeyword::Sampler3d => "SamplerState",
        _ => return None,
    };
    Some(name.to_string())
}

/// Declare every resource a shader maps and build its layout
///
/// Map entries that name no declared resource bind nothing.
pub(crate) fn bind_resources(
    sd: &ShaderDecl,
    ctx: &SemContext,
    output: &mut String,
) -> Result<Vec<LayoutEntry>, BackendError> {
    let space = match sd.stage {
        ShaderStage::Fragment => 1,
        _ => 0,
    };

    let mut counters = SlotCounters::default();
    let mut layout = Vec::with_capacity(sd.resource_map.len());
    for entry in &sd.resource_map {
        let def = match ctx.find_resource(&entry.name) {
            Some(def) => def,
            None => {
                trace!("skipping unbound resource '{}'", entry.name.node);
                continue;
            }
        };

        let invalid = || BackendError::InvalidResource(entry.name.node.clone());
        let kind = layout_kind(def).ok_or_else(invalid)?;
        let type_name = resource_type_name(def, entry.access).ok_or_else(invalid)?;

        let class = register_class(def, entry.access);
        let slot = counters.next(class);
        output.push_str(&format!(
            "{} {} : register({}{}, space{});\n",
            type_name,
            entry.name.node,
            class.prefix(),
            slot,
            space
        ));

        layout.push(LayoutEntry {
            kind,
            io_mode: entry.access,
            backend_slot: slot,
            register: def.decl.register as u64,
            offset: 0,
            sampler: match def.decl.is_static {
                true => def.decl.sampler_desc,
                false => None,
            },
            constant: None,
        });
    }

    if !layout.is_empty() {
        output.push('\n');
    }
    Ok(layout)
}
