use crate::{Backend, BackendError};
use dxc_invoker::DxcCompiler;
use log::{debug, trace};
use omegasl_ast::*;
use omegasl_library::{ShaderEntry, StageDesc};
use omegasl_sem::SemContext;
use std::collections::HashMap;
use std::path::PathBuf;

mod format;
use format::*;

mod layout;
mod vertex_input;

/// Settings for the HLSL backend
#[derive(Debug, Default, Clone)]
pub struct HlslOptions {
    /// Directory generated sources and objects are written into
    pub temp_dir: Option<PathBuf>,

    /// Compiler used to turn generated sources into bytecode
    pub dxc: Option<DxcCompiler>,
}

/// Backend that generates HLSL for each shader
pub struct HlslBackend {
    options: HlslOptions,

    /// Generated definition of each struct seen so far
    structs: HashMap<String, String>,
}

fn profile(stage: ShaderStage) -> &'static str {
    match stage {
        ShaderStage::Vertex => "vs_5_0",
        ShaderStage::Fragment => "ps_5_0",
        ShaderStage::Compute => "cs_5_0",
    }
}

impl HlslBackend {
    pub fn new(options: HlslOptions) -> Self {
        HlslBackend {
            options,
            structs: HashMap::new(),
        }
    }

    /// Generate the full source of a shader along with its reflection data
    fn generate_shader(
        &self,
        sd: &ShaderDecl,
        ctx: &SemContext,
    ) -> Result<(String, ShaderEntry), BackendError> {
        let name = sd.func.name.node.clone();
        if ctx.find_shader(&name).is_none() {
            return Err(BackendError::UnknownShader(name));
        }

        let mut output = String::new();
        for struct_name in ctx.shader_structs(&name) {
            match self.structs.get(struct_name) {
                Some(definition) => output.push_str(definition),
                None => return Err(BackendError::MissingStruct(struct_name.clone())),
            }
            output.push('\n');
        }

        let layout = layout::bind_resources(sd, ctx, &mut output)?;

        let stage = match sd.stage {
            ShaderStage::Vertex => StageDesc::Vertex(vertex_input::vertex_input(&sd.func, ctx)?),
            ShaderStage::Fragment => StageDesc::Fragment,
            ShaderStage::Compute => {
                let tg = sd.threadgroup;
                output.push_str(&format!("[numthreads({}, {}, {})]\n", tg.x, tg.y, tg.z));
                StageDesc::Compute(tg)
            }
        };

        format_type(&sd.func.return_type, &mut output);
        output.push(' ');
        output.push_str(&name);
        output.push('(');
        for (i, param) in sd.func.params.iter().enumerate() {
            if i != 0 {
                output.push_str(", ");
            }
            format_typed_name(&param.type_expr, &param.name, &param.attribute, &mut output);
        }
        output.push(')');
        if sd.stage == ShaderStage::Fragment {
            output.push_str(" : SV_TARGET");
        }

        let mut context = FormatContext::new();
        for resource in ctx.resources() {
            context.add_texture(&resource.decl.name, resource.kind);
        }
        format_block(&sd.func.body, &mut output, &mut context);
        output.push('\n');

        let entry = ShaderEntry {
            name,
            stage,
            bytecode: Vec::new(),
            layout,
        };
        Ok((output, entry))
    }

    /// Write out the generated source and produce the bytecode for it
    fn build(
        &self,
        name: &str,
        stage: ShaderStage,
        source: String,
    ) -> Result<Vec<u8>, BackendError> {
        let temp_dir = match (&self.options.temp_dir, &self.options.dxc) {
            (Some(temp_dir), _) => temp_dir,
            (None, None) => return Ok(source.into_bytes()),
            (None, Some(_)) => return Err(BackendError::DxcRequiresTempDir(name.to_string())),
        };

        let io_error = |path: &PathBuf| {
            let path = path.clone();
            move |source| BackendError::Io { path, source }
        };

        std::fs::create_dir_all(temp_dir).map_err(io_error(temp_dir))?;
        let source_path = temp_dir.join(format!("{}.hlsl", name));
        std::fs::write(&source_path, &source).map_err(io_error(&source_path))?;
        trace!("wrote {}", source_path.display());

        match &self.options.dxc {
            Some(dxc) => {
                let object_path = temp_dir.join(format!("{}.cso", name));
                dxc.execute(&source_path, name, profile(stage), &object_path)
                    .map_err(|source| BackendError::Dxc {
                        shader: name.to_string(),
                        source,
                    })
            }
            None => Ok(source.into_bytes()),
        }
    }
}

impl Backend for HlslBackend {
    fn generate_decl(
        &mut self,
        decl: &Decl,
        ctx: &SemContext,
    ) -> Result<Option<ShaderEntry>, BackendError> {
        match decl {
            Decl::Struct(sd) => {
                trace!("recording struct '{}'", sd.name.node);
                self.structs.insert(sd.name.node.clone(), format_struct(sd));
                Ok(None)
            }
            Decl::Shader(sd) => {
                let (source, mut entry) = self.generate_shader(sd, ctx)?;
                entry.bytecode = self.build(&entry.name, sd.stage, source)?;
                debug!(
                    "generated {:?} shader '{}' with {} layout entries",
                    sd.stage,
                    entry.name,
                    entry.layout.len()
                );
                Ok(Some(entry))
            }
            // Resources are read from the context when a shader maps them
            Decl::Resource(_) | Decl::Var(_) | Decl::Return(_) | Decl::Func(_) => Ok(None),
        }
    }
}

#[cfg(test)]
fn generate(source: &str, options: HlslOptions) -> Result<Vec<ShaderEntry>, BackendError> {
    use omegasl_text::*;

    let mut source_manager = SourceManager::new();
    let file_id = source_manager.add_file(
        FileName("hlsl_test.omegasl".to_string()),
        source.to_string() + "\n",
    );
    let tokens = match omegasl_lexer::lex(file_id, &source_manager) {
        Ok(tokens) => tokens,
        Err(err) => panic!("{}", err.display(&source_manager)),
    };
    let decls = match omegasl_parser::parse(&tokens) {
        Ok(decls) => decls,
        Err(err) => panic!("{}", err.display(&source_manager)),
    };

    let mut sem = omegasl_sem::Sem::new(Builtins::global());
    let mut backend = HlslBackend::new(options);
    let mut entries = Vec::new();
    for decl in &decls {
        if let Err(err) = sem.check_decl(decl) {
            panic!("{}", err.display(&source_manager));
        }
        if let Some(entry) = backend.generate_decl(decl, sem.context())? {
            entries.push(entry);
        }
    }
    Ok(entries)
}

#[cfg(test)]
fn generate_one(source: &str) -> (String, ShaderEntry) {
    let mut entries = generate(source, HlslOptions::default()).expect("generation failed");
    assert_eq!(entries.len(), 1);
    let entry = entries.remove(0);
    let text = String::from_utf8(entry.bytecode.clone()).expect("bytecode is not HLSL text");
    (text, entry)
}

#[test]
fn test_fragment() {
    let (text, entry) = generate_one(
        "struct internal P { float4 pos : position; };
[out col] fragment float4 main(P p){ return make_float4(1.0,0.0,0.0,1.0); }",
    );
    assert_eq!(
        text,
        "struct P
{
    float4 pos : SV_Position;
};

float4 main(P p) : SV_TARGET
{
    return float4(1.0, 0.0, 0.0, 1.0);
}
"
    );
    assert_eq!(entry.name, "main");
    assert_eq!(entry.stage, StageDesc::Fragment);
    assert!(entry.layout.is_empty());
}

#[test]
fn test_sampling() {
    use omegasl_library::{LayoutEntry, LayoutKind, SamplerFilter, StaticSamplerDesc};

    let (text, entry) = generate_one(
        "struct internal V { float4 pos : position; float2 uv : texcoord; };
texture2d tex : 2;
static sampler2d samp(filter=point) : 1;
sampler2d unused : 0;
[in tex, in samp] fragment float4 shade(V v) { return sample(samp, tex, v.uv); }",
    );
    assert_eq!(
        text,
        "struct V
{
    float4 pos : SV_Position;
    float2 uv : TEXCOORD;
};

Texture2D tex : register(t0, space1);
SamplerState samp : register(s0, space1);

float4 shade(V v) : SV_TARGET
{
    return tex.Sample(samp, v.uv);
}
"
    );
    assert_eq!(
        entry.layout,
        vec![
            LayoutEntry {
                kind: LayoutKind::Texture2d,
                io_mode: IoMode::In,
                backend_slot: 0,
                register: 2,
                offset: 0,
                sampler: None,
                constant: None,
            },
            LayoutEntry {
                kind: LayoutKind::StaticSampler2d,
                io_mode: IoMode::In,
                backend_slot: 0,
                register: 1,
                offset: 0,
                sampler: Some(StaticSamplerDesc {
                    filter: SamplerFilter::Point,
                    ..StaticSamplerDesc::default()
                }),
                constant: None,
            },
        ]
    );
}

#[test]
fn test_compute() {
    use omegasl_library::{LayoutKind, ThreadgroupDesc};

    let (text, entry) = generate_one(
        "buffer<float4> data : 3;
buffer<float4> results : 4;
texture2d img : 0;
[in data, out img, inout results]
compute(x=8,y=4,z=1) void main(uint3 id : global_thread_id) {
    uint i = 0u;
    write(img, make_float2(1.0, 1.0), data[i]);
}",
    );
    assert_eq!(
        text,
        "StructuredBuffer<float4> data : register(t0, space0);
RWTexture2D<float4> img : register(u0, space0);
RWStructuredBuffer<float4> results : register(u1, space0);

[numthreads(8, 4, 1)]
void main(uint3 id : SV_DispatchThreadID)
{
    uint i = 0u;
    img[uint2(float2(1.0, 1.0))] = data[i];
}
"
    );
    assert_eq!(
        entry.stage,
        StageDesc::Compute(ThreadgroupDesc { x: 8, y: 4, z: 1 })
    );

    let slots = entry
        .layout
        .iter()
        .map(|e| (e.kind, e.io_mode, e.backend_slot, e.register))
        .collect::<Vec<_>>();
    assert_eq!(
        slots,
        vec![
            (LayoutKind::Buffer, IoMode::In, 0, 3),
            (LayoutKind::Texture2d, IoMode::Out, 0, 0),
            (LayoutKind::Buffer, IoMode::Inout, 1, 4),
        ]
    );
}

#[test]
fn test_vertex_input() {
    use omegasl_library::{DataType, VertexInputDesc, VertexParam};

    let (text, entry) = generate_one(
        "struct internal V { float4 pos : position; float2 uv : texcoord; };
vertex V vmain(V v, uint id : vertex_id, float3 n) { return v; }",
    );
    assert!(text.contains("V vmain(V v, uint id : SV_VertexID, float3 n)\n{\n    return v;\n}\n"));

    let param = |name: &str, data_type, offset| VertexParam {
        name: name.to_string(),
        data_type,
        offset,
    };
    assert_eq!(
        entry.stage,
        StageDesc::Vertex(VertexInputDesc {
            uses_vertex_id: true,
            params: vec![
                param("pos", DataType::Float4, 0),
                param("uv", DataType::Float2, 16),
                param("n", DataType::Float3, 24),
            ],
        })
    );
}

#[test]
fn test_nested_vertex_input() {
    use omegasl_library::{DataType, VertexInputDesc, VertexParam};

    let (text, entry) = generate_one(
        "struct internal L { float3 dir; float intensity; };
struct internal V { float4 pos : position; L light; float2 uv : texcoord; };
vertex V vmain(V v) { return v; }",
    );
    assert!(text.starts_with("struct L\n{\n    float3 dir;\n    float intensity;\n};\n"));

    let param = |name: &str, data_type, offset| VertexParam {
        name: name.to_string(),
        data_type,
        offset,
    };
    assert_eq!(
        entry.stage,
        StageDesc::Vertex(VertexInputDesc {
            uses_vertex_id: false,
            params: vec![
                param("pos", DataType::Float4, 0),
                param("light.dir", DataType::Float3, 16),
                param("light.intensity", DataType::Float, 28),
                param("uv", DataType::Float2, 32),
            ],
        })
    );
}

#[test]
fn test_shared_structs() {
    let entries = generate(
        "struct internal V { float4 pos : position; };
vertex V a(V v) { return v; }
vertex V b(V v) { return v; }",
        HlslOptions::default(),
    )
    .expect("generation failed");
    assert_eq!(entries.len(), 2);
    for entry in &entries {
        let text = String::from_utf8_lossy(&entry.bytecode);
        assert!(text.starts_with("struct V\n{\n    float4 pos : SV_Position;\n};\n\n"));
    }
}

#[test]
fn test_temp_dir() {
    let temp_dir = std::env::temp_dir().join(format!("omegasl_hlsl_test_{}", std::process::id()));
    let options = HlslOptions {
        temp_dir: Some(temp_dir.clone()),
        dxc: None,
    };
    let entries = generate(
        "fragment float4 main() { return make_float4(1.0, 1.0, 1.0, 1.0); }",
        options,
    )
    .expect("generation failed");

    let written = std::fs::read(temp_dir.join("main.hlsl")).expect("source was not written");
    assert_eq!(written, entries[0].bytecode);
    std::fs::remove_dir_all(&temp_dir).expect("failed to clean up test directory");

    let options = HlslOptions {
        temp_dir: None,
        dxc: Some(DxcCompiler::new("dxc").expect("bare program name rejected")),
    };
    let result = generate("compute(x=1,y=1,z=1) void main() {}", options);
    assert!(matches!(result, Err(BackendError::DxcRequiresTempDir(name)) if name == "main"));
}
