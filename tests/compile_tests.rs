mod shared;
use shared::*;

use omegasl::ast::Decl;
use omegasl::library::{IoMode, LayoutKind, ShaderLibrary, ShaderStage, StageDesc};
use omegasl::text::tokens::Token;
use omegasl::{CompileArgs, CompileError, Target};

#[test]
fn check_end_to_end() {
    let unit = compile_str(
        "struct internal P { float4 pos : position; };
[out col] fragment float4 main(P p){ return make_float4(1.0,0.0,0.0,1.0); }",
    );

    assert_eq!(unit.library.name, "test");
    assert_eq!(unit.library.entries.len(), 1);
    let entry = &unit.library.entries[0];
    assert_eq!(entry.name, "main");
    assert_eq!(entry.stage, StageDesc::Fragment);
    assert!(entry.layout.is_empty());
    assert_eq!(unit.structs_for("main"), Some(&["P".to_string()][..]));

    let hlsl = String::from_utf8(entry.bytecode.clone()).expect("bytecode is not HLSL text");
    assert!(hlsl.contains("float4 main(P p) : SV_TARGET"));
}

#[test]
fn check_declarations_in_order() {
    let unit = compile_str(
        "struct internal V { float4 pos : position; };
texture2d tex : 0;
vertex V vs(V v) { return v; }
[in tex] fragment float4 ps(V v) { return v.pos; }",
    );

    let names = unit
        .decls
        .iter()
        .map(|decl| decl.name().unwrap_or_default().to_string())
        .collect::<Vec<_>>();
    assert_eq!(names, ["V", "tex", "vs", "ps"]);
    assert!(matches!(unit.decls[1], Decl::Resource(_)));

    let entries = unit
        .library
        .entries
        .iter()
        .map(|e| (e.name.as_str(), e.stage.stage()))
        .collect::<Vec<_>>();
    assert_eq!(
        entries,
        [("vs", ShaderStage::Vertex), ("ps", ShaderStage::Fragment)]
    );
}

#[test]
fn check_duplicate_declarations() {
    check_fail_message(
        "struct P { float4 a; };\nstruct P { float4 b; };",
        "test.omegasl:2:8: error: redefinition of 'P'",
    );
    check_fail_message(
        "texture2d t : 0;\ntexture2d t : 1;",
        "redefinition of 't'",
    );
    check_fail_message(
        "compute(x=1,y=1,z=1) void main() {}\ncompute(x=1,y=1,z=1) void main() {}",
        "redefinition of 'main'",
    );
}

#[test]
fn check_stage_return_types() {
    check_fail_message(
        "fragment float3 main() { return make_float3(1.0, 1.0, 1.0); }",
        "fragment shader must return 'float4'",
    );
    check_fail_message(
        "compute(x=1,y=1,z=1) float4 main() { return make_float4(1.0, 1.0, 1.0, 1.0); }",
        "compute shader must return 'void'",
    );
}

#[test]
fn check_swizzles() {
    compile_str(
        "struct internal P { float4 pos : position; };
fragment float4 main(P p) { return make_float4(p.pos.xy, p.pos.zw); }",
    );
    check_fail_message(
        "struct internal P { float4 pos : position; };
fragment float4 main(P p) { return make_float4(p.pos.xw, p.pos.zw); }",
        "invalid swizzle 'xw' on type 'float4'",
    );
}

#[test]
fn check_sampler_access() {
    check_fail_message(
        "sampler2d s : 0;\n[out s] fragment float4 main() { return make_float4(1.0, 1.0, 1.0, 1.0); }",
        "sampler 's' can only be mapped with 'in' access, not 'out'",
    );
}

#[test]
fn check_compute_attribute_order() {
    compile_str(
        "compute(x=1,y=1,z=1) void main(uint3 g : global_thread_id, uint3 l : local_thread_id) {}",
    );
    check_fail_message(
        "compute(x=1,y=1,z=1) void main(uint3 l : local_thread_id) {}",
        "attribute 'local_thread_id' must be on parameter",
    );
}

#[test]
fn check_first_failure_stops() {
    // The failing struct comes after a valid shader
    let message = compile_fail(
        "compute(x=1,y=1,z=1) void main() {}
struct Q { unknown a; };",
    );
    assert!(message.contains("test.omegasl:2:12: error: unknown type name 'unknown'"));
}

#[test]
fn check_backend_selection() {
    let source = "compute(x=1,y=1,z=1) void main() {}";

    match omegasl::compile(CompileArgs::new("test.omegasl", source).target(Target::Metal)) {
        Err(err @ CompileError::BackendNotAvailable(Target::Metal)) => {
            assert_eq!(err.to_string(), "metal backend not available")
        }
        other => panic!("unexpected result {:?}", other),
    }

    let unit = omegasl::compile(
        CompileArgs::new("test.omegasl", source)
            .target(Target::Glsl)
            .interface_only(),
    )
    .expect("interface only compile failed");
    assert!(unit.library.entries.is_empty());
    assert_eq!(unit.decls.len(), 1);
    assert_eq!(unit.structs_for("main"), Some(&[][..]));
}

#[test]
fn check_library_round_trip() {
    let unit = compile_str(
        "struct internal V { float4 pos : position; float2 uv : texcoord; };
buffer<float4> data : 1;
texture2d tex : 0;
static sampler2d samp(filter=linear, address_mode=wrap) : 0;
vertex V vs(V v, uint id : vertex_id) { return v; }
[in tex, in samp] fragment float4 ps(V v) { return sample(samp, tex, v.uv); }
[in data, out tex] compute(x=64,y=1,z=1) void cs(uint3 id : global_thread_id) {
    uint i = 0u;
    write(tex, make_float2(1.0, 1.0), data[i]);
}",
    );

    let library = &unit.library;
    assert_eq!(library.entries.len(), 3);

    let ps = library.find("ps").expect("missing fragment shader");
    let kinds = ps.layout.iter().map(|e| e.kind).collect::<Vec<_>>();
    assert_eq!(kinds, [LayoutKind::Texture2d, LayoutKind::StaticSampler2d]);

    let cs = library.find("cs").expect("missing compute shader");
    let access = cs
        .layout
        .iter()
        .map(|e| (e.io_mode, e.backend_slot))
        .collect::<Vec<_>>();
    assert_eq!(access, [(IoMode::In, 0), (IoMode::Out, 0)]);

    let bytes = library.to_bytes().expect("failed to write library");
    let loaded = ShaderLibrary::from_bytes(&bytes).expect("failed to read library");
    assert_eq!(&loaded, library);

    let dir = std::env::temp_dir().join(format!("omegasl_round_trip_{}", std::process::id()));
    let path = dir.join("out").join("test.omegasllib");
    unit.save(&path).expect("failed to save library");
    let loaded = ShaderLibrary::load(&path).expect("failed to load library");
    assert_eq!(&loaded, library);
    std::fs::remove_dir_all(&dir).expect("failed to clean up test directory");
}

#[test]
fn check_temp_dir_sources() {
    let dir = std::env::temp_dir().join(format!("omegasl_temp_dir_{}", std::process::id()));
    let source = "compute(x=4,y=4,z=1) void main(uint3 id : global_thread_id) {}";
    let unit = omegasl::compile(CompileArgs::new("shaders.omegasl", source).temp_dir(&dir))
        .expect("compile failed");

    assert_eq!(unit.library.name, "shaders");
    let written = std::fs::read(dir.join("main.hlsl")).expect("generated source was not written");
    assert_eq!(written, unit.library.entries[0].bytecode);
    std::fs::remove_dir_all(&dir).expect("failed to clean up test directory");
}

#[test]
fn check_tokenize() {
    let source = "struct P { float4 a; };";
    let tokens = omegasl::tokenize("test.omegasl", source).expect("tokenize failed");
    assert_eq!(tokens.len(), 9);
    assert_eq!(tokens.last().map(|t| &t.0), Some(&Token::Eof));

    let again = omegasl::tokenize("test.omegasl", source).expect("tokenize failed");
    assert_eq!(tokens, again);

    match omegasl::tokenize("test.omegasl", "struct P /* never closed\n") {
        Err(err) => assert!(err.to_string().contains("block comment never terminates")),
        Ok(tokens) => panic!("expected lexing to fail but got {:?}", tokens),
    }
}
