use crate::*;
use std::sync::OnceLock;

/// Functions every compilation unit can call
#[derive(PartialEq, Eq, Debug, Copy, Clone, Hash)]
pub enum BuiltinFunction {
    MakeFloat2,
    MakeFloat3,
    MakeFloat4,
    Dot,
    Cross,
    Sample,
    Write,
}

impl BuiltinFunction {
    pub const ALL: [BuiltinFunction; 7] = [
        BuiltinFunction::MakeFloat2,
        BuiltinFunction::MakeFloat3,
        BuiltinFunction::MakeFloat4,
        BuiltinFunction::Dot,
        BuiltinFunction::Cross,
        BuiltinFunction::Sample,
        BuiltinFunction::Write,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            BuiltinFunction::MakeFloat2 => "make_float2",
            BuiltinFunction::MakeFloat3 => "make_float3",
            BuiltinFunction::MakeFloat4 => "make_float4",
            BuiltinFunction::Dot => "dot",
            BuiltinFunction::Cross => "cross",
            BuiltinFunction::Sample => "sample",
            BuiltinFunction::Write => "write",
        }
    }
}

/// The fixed set of builtin types and functions
///
/// The catalogue is immutable once built. Analysis borrows it, so any number of compilation units may
/// share one catalogue.
#[derive(Debug)]
pub struct Builtins {
    types: Vec<Type>,
    functions: Vec<FuncType>,
}

impl Builtins {
    /// Build the catalogue
    pub fn new() -> Self {
        let types = TypeKeyword::ALL
            .iter()
            .map(|ty| Type {
                name: ty.name().to_string(),
                scope: &GLOBAL_SCOPE,
                builtin: Some(*ty),
                type_args: match ty {
                    TypeKeyword::Buffer => vec!["type".to_string()],
                    _ => Vec::new(),
                },
                fields: Vec::new(),
            })
            .collect();

        let param = |name: &str, ty: &str| (name.to_string(), TypeExpr::new(ty));
        let functions = BuiltinFunction::ALL
            .iter()
            .map(|f| {
                let (params, return_type) = match f {
                    BuiltinFunction::MakeFloat2 => (vec![], TypeKeyword::Float2),
                    BuiltinFunction::MakeFloat3 => (vec![], TypeKeyword::Float3),
                    BuiltinFunction::MakeFloat4 => (vec![], TypeKeyword::Float4),
                    BuiltinFunction::Dot => (
                        vec![param("a", "VECTOR_TYPE"), param("b", "VECTOR_TYPE")],
                        TypeKeyword::Float,
                    ),
                    BuiltinFunction::Cross => (
                        vec![param("a", "VECTOR_TYPE"), param("b", "VECTOR_TYPE")],
                        TypeKeyword::Float3,
                    ),
                    BuiltinFunction::Sample => (
                        vec![
                            param("sampler", "SAMPLER_TYPE"),
                            param("texture", "TEXTURE_TYPE"),
                            param("coord", "VECTOR_TYPE"),
                        ],
                        TypeKeyword::Float4,
                    ),
                    BuiltinFunction::Write => (
                        vec![
                            param("dest", "TEXTURE_TYPE"),
                            param("coord", "VECTOR_TYPE"),
                            param("data", "VECTOR_TYPE"),
                        ],
                        TypeKeyword::Void,
                    ),
                };
                FuncType {
                    name: f.name().to_string(),
                    scope: &GLOBAL_SCOPE,
                    builtin: Some(*f),
                    params,
                    return_type: TypeExpr::builtin(return_type),
                }
            })
            .collect();

        Builtins { types, functions }
    }

    /// Shared process wide catalogue
    pub fn global() -> &'static Builtins {
        static BUILTINS: OnceLock<Builtins> = OnceLock::new();
        BUILTINS.get_or_init(Builtins::new)
    }

    /// Find a builtin type by exact name
    pub fn find_type(&self, name: &str) -> Option<&Type> {
        self.types.iter().find(|t| t.name == name)
    }

    /// Find a builtin function by exact name
    pub fn find_function(&self, name: &str) -> Option<&FuncType> {
        self.functions.iter().find(|f| f.name == name)
    }

    pub fn types(&self) -> &[Type] {
        &self.types
    }

    pub fn functions(&self) -> &[FuncType] {
        &self.functions
    }
}

impl Default for Builtins {
    fn default() -> Self {
        Self::new()
    }
}

#[test]
fn test_catalogue() {
    let builtins = Builtins::new();
    assert_eq!(builtins.types().len(), 15);
    assert_eq!(builtins.functions().len(), 7);

    let buffer = builtins.find_type("buffer").expect("missing buffer");
    assert_eq!(buffer.builtin, Some(TypeKeyword::Buffer));
    assert_eq!(buffer.type_args, vec!["type".to_string()]);
    assert!(builtins.find_type("float5").is_none());

    let sample = builtins.find_function("sample").expect("missing sample");
    assert_eq!(sample.return_type, TypeExpr::builtin(TypeKeyword::Float4));
    assert_eq!(sample.params.len(), 3);

    assert!(std::ptr::eq(Builtins::global(), Builtins::global()));
}
