mod shared;
use shared::*;

const RED: &str = "make_float4(1.0, 0.0, 0.0, 1.0)";

/// Wrap a body in a fragment shader that returns red
fn fragment(params: &str, body: &str) -> String {
    format!("fragment float4 main({}) {{ {} return {}; }}", params, body, RED)
}

#[test]
fn check_structs() {
    check_types("struct S { float a; float4 b; };");
    check_types("struct internal P { float4 pos : position; float4 c : color; float2 uv : texcoord; };");
    check_types("struct A { float a; }; struct B { A a; A * next; };");

    check_fail("struct S { float a; }; struct S { float b; };");
    check_fail("struct S { float a; float a; };");
    check_fail("struct S { Missing a; };");
    check_fail("struct S { S * next; };");
    check_fail("struct S { float4 pos : position; };");
    check_fail("struct internal S { float4 pos : vertex_id; };");
}

#[test]
fn check_resources() {
    check_types("buffer<float4> data : 0; texture2d tex : 1; texture3d vol : 2;");
    check_types("static sampler2d s; static sampler3d t(filter=point) : 1; sampler2d u : 2;");
    check_types("struct P { float a; }; buffer<P> points : 0;");

    check_fail("buffer<float4> data : 0; buffer<float> data : 1;");
    check_fail("float data : 0;");
    check_fail("buffer data : 0;");
    check_fail("buffer<Missing> data : 0;");
    check_fail("texture2d<float> tex : 0;");
    check_fail("static texture2d tex;");
}

#[test]
fn check_duplicate_shaders() {
    let shader = fragment("", "");
    check_types(&shader);
    check_fail(&format!("{} {}", shader, shader));
}

#[test]
fn check_free_function_rejected() {
    check_fail("float f() { return 1.0; }");
}

#[test]
fn check_stage_return_types() {
    check_types(&fragment("", ""));
    check_types("compute(x=1,y=1,z=1) void main() {}");
    check_types("compute(x=1,y=1,z=1) void main() { float a = 1.0; }");
    check_types("struct internal V { float4 pos : position; }; vertex V main(V v) { return v; }");
    check_types("vertex float4 main(float4 p) { return p; }");

    check_fail("fragment float main(float a) { return a; }");
    check_fail("fragment float4 main() {}");
    check_fail("fragment void main() {}");
    check_fail("compute(x=1,y=1,z=1) float main(float a) { return a; }");
    check_fail("compute(x=1,y=1,z=1) void main(float a) { return a; }");
    check_fail("vertex float4 main(float4 a, float b) { return a; return b; }");
    check_fail("vertex float4 main(float2 a) { return a; }");
    check_fail("vertex Missing main(float4 a) { return a; }");
}

#[test]
fn check_swizzles() {
    check_types(&fragment("float4 v", "float4 a = v.xyzw; float2 b = v.xy; float c = v.w;"));
    check_types(&fragment("float3 v", "float2 a = v.yz; float3 b = v.xyz;"));
    check_types(&fragment("float2 v", "float a = v.y;"));

    check_fail(&fragment("float4 v", "float a = v.q;"));
    check_fail(&fragment("float3 v", "float a = v.w;"));
    check_fail(&fragment("float4 v", "float4 a = v.xy;"));
    check_fail(&fragment("uint3 v", "uint a = v.x;"));
}

#[test]
fn check_struct_members() {
    let v = "struct internal V { float4 pos : position; float2 uv : texcoord; }; ";
    check_types(&format!("{}vertex V main(V v) {{ float2 uv = v.uv; return v; }}", v));
    check_types(&format!("{}vertex V main(V v) {{ float2 uv = v.pos.xy; return v; }}", v));
    check_fail(&format!("{}vertex V main(V v) {{ float2 uv = v.missing; return v; }}", v));
    check_fail(&format!("{}vertex V main(V * v) {{ float2 uv = v.uv; return *v; }}", v));
    check_types(&format!("{}vertex V main(V * v) {{ return *v; }}", v));
}

#[test]
fn check_resource_access() {
    let sampler = "static sampler2d s; ";
    check_types(&format!("{}[in s] {}", sampler, fragment("", "")));
    check_fail(&format!("{}[out s] {}", sampler, fragment("", "")));
    check_fail(&format!("{}[inout s] {}", sampler, fragment("", "")));

    check_types(&format!("texture2d t : 0; [inout t] {}", fragment("", "")));
    check_types(&format!("[in t] {}", fragment("", "")));
    check_fail(&format!("[in t] {}", fragment("", "texture2d u = t;")));
    check_fail(&format!("texture2d t : 0; [in t, out t] {}", fragment("", "")));
}

#[test]
fn check_compute_attribute_order() {
    check_types("compute(x=1,y=1,z=1) void main(uint3 g : global_thread_id, uint3 l : local_thread_id, uint3 t : threadgroup_id) {}");
    check_types("compute(x=8,y=8,z=1) void main(uint3 g : global_thread_id) {}");

    check_fail("compute(x=1,y=1,z=1) void main(uint3 l : local_thread_id) {}");
    check_fail("compute(x=1,y=1,z=1) void main(uint3 g : global_thread_id, uint3 t : threadgroup_id) {}");
    check_fail("compute(x=1,y=1,z=1) void main(uint v : vertex_id) {}");
    check_fail(&fragment("uint v : vertex_id", ""));
    check_types("vertex float4 main(uint v : vertex_id, float4 p) { return p; }");
}

#[test]
fn check_buffer_indexing() {
    let data = "buffer<float4> data : 0; [inout data] ";
    check_types(&format!(
        "{}compute(x=1,y=1,z=1) void main() {{ uint i = 0u; float4 v = data[i]; data[i] = v; }}",
        data
    ));
    check_fail(&format!(
        "{}compute(x=1,y=1,z=1) void main() {{ float4 v = data[1]; }}",
        data
    ));
    check_fail(&format!(
        "{}compute(x=1,y=1,z=1) void main(float4 v) {{ float a = v[0u]; }}",
        data
    ));
}

#[test]
fn check_variables() {
    check_types(&fragment("float a", "float b = a; float c = a + b; c += b;"));
    check_types(&fragment("float a", "float * p = &a; float b = *p;"));
    check_types(&fragment("", "float a = {1.0, 2.0};"));

    check_fail(&fragment("float4 a", "float4 a;"));
    check_fail(&fragment("", "float a = 1;"));
    check_fail(&fragment("", "float a = b;"));
    check_fail(&fragment("float a", "float b = a + 1;"));
    check_fail(&fragment("float a", "float b = *a;"));
    check_fail(&fragment("", "float a = {};"));
    check_fail(&fragment("", "float a = {1.0, 2};"));
    check_fail(&fragment("", "uint a = \"text\";"));
}

#[test]
fn check_variables_are_shader_local() {
    check_types("vertex float4 a(float4 p) { return p; } vertex float4 b(float4 p) { return p; }");
    check_fail("vertex float4 a(float4 p) { return p; } vertex float4 b() { return p; }");
}

#[test]
fn check_builtin_calls() {
    check_types(&fragment("", "float4 c = make_float4(1.0, 0.0, 0.0, 1.0);"));
    check_types(&fragment("float2 a, float b", "float3 c = make_float3(a, b); float4 d = make_float4(a, a);"));
    check_types(&fragment("float3 a, float3 b", "float d = dot(a, b); float3 c = cross(a, b);"));

    check_fail(&fragment("", "float4 c = make_float4(1.0);"));
    check_fail(&fragment("float2 a", "float4 c = make_float4(a, 1.0);"));
    check_fail(&fragment("float2 a, float3 b", "float d = dot(a, b);"));
    check_fail(&fragment("float2 a", "float2 c = cross(a, a);"));
    check_fail(&fragment("", "float4 c = blend(1.0);"));
    check_fail(&fragment("float a", "float4 c = a(1.0);"));
    check_fail(&format!(
        "{} vertex float4 other() {{ return main(); }}",
        fragment("", "")
    ));
}

#[test]
fn check_texture_calls() {
    let resources = "texture2d tex : 0; texture3d vol : 1; static sampler2d samp; ";
    check_types(&format!(
        "{}[in tex, in samp] fragment float4 main(float2 uv) {{ return sample(samp, tex, uv); }}",
        resources
    ));
    check_fail(&format!(
        "{}[in vol, in samp] fragment float4 main(float3 uv) {{ return sample(samp, vol, uv); }}",
        resources
    ));
    check_fail(&format!(
        "{}[in tex, in samp] fragment float4 main(float3 uv) {{ return sample(samp, tex, uv); }}",
        resources
    ));

    check_types(&format!(
        "{}[out tex] compute(x=8,y=8,z=1) void main(float2 id) {{ write(tex, id, {}); }}",
        resources, RED
    ));
    check_fail(&format!(
        "{}[out tex] compute(x=8,y=8,z=1) void main(float3 id) {{ write(tex, id, {}); }}",
        resources, RED
    ));
    check_fail(&format!(
        "{}[out tex] compute(x=8,y=8,z=1) void main(float2 id) {{ write(tex, id, 1.0); }}",
        resources
    ));
}

#[test]
fn check_struct_dependencies() {
    let context = check_context(
        "struct internal P { float4 pos : position; }; \
         [out col] fragment float4 main(P p) { return make_float4(1.0, 0.0, 0.0, 1.0); }",
    );
    assert_eq!(context.shader_structs("main"), ["P".to_string()]);
    assert!(context.find_resource("col").is_none());

    let context = check_context(
        "struct internal P { float4 pos : position; }; \
         texture2d col : 0; \
         [out col] fragment float4 main(P p) { return make_float4(1.0, 0.0, 0.0, 1.0); }",
    );
    assert_eq!(context.shader_structs("main"), ["P".to_string()]);
    assert!(context.find_shader("main").is_some());
    assert!(context.find_resource("col").is_some());

    let context = check_context(
        "struct A { float a; }; struct B { A a; }; struct internal V { float4 pos : position; }; \
         buffer<B> items : 0; \
         [in items] vertex V main(uint id : vertex_id) { V v; uint i = 0u; B b = items[i]; return v; }",
    );
    assert_eq!(
        context.shader_structs("main"),
        ["A".to_string(), "B".to_string(), "V".to_string()]
    );
    assert!(context.shader_structs("missing").is_empty());
}

#[test]
fn check_error_messages() {
    check_fail_message(
        "struct S { float a; };\nstruct S { float b; };",
        "sem_test.omegasl:2:8: error: redefinition of 'S'\n\
         struct S { float b; };\n       ^\n\
         sem_test.omegasl:1:8: note: previous definition is here\n\
         struct S { float a; };\n       ^\n",
    );

    check_fail_message(
        "fragment float4 main() { return c; }",
        &format!(
            "sem_test.omegasl:1:33: error: 'c' was not declared in this scope\n\
             fragment float4 main() {{ return c; }}\n{}^\n",
            " ".repeat(32)
        ),
    );

    check_fail_message(
        "static sampler2d s;\n[out s] fragment float4 main() {}",
        "sem_test.omegasl:2:6: error: sampler 's' can only be mapped with 'in' access, not 'out'\n\
         [out s] fragment float4 main() {}\n     ^\n",
    );
}
