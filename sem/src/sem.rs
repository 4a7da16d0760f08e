use log::debug;
use omegasl_ast::*;
use omegasl_text::*;

mod errors;
pub use errors::{AttributeContext, SemError};
use errors::SemResult;

mod context;
pub use context::{ResourceDef, SemContext, StructDef};

mod expressions;
mod intrinsics;
mod resources;
mod shaders;
mod statements;
mod structs;

/// Semantic analyzer for one compilation unit
///
/// Declarations must be given in source order. Each one may only refer to names declared before it.
pub struct Sem<'b> {
    builtins: &'b Builtins,
    context: SemContext,
}

impl<'b> Sem<'b> {
    /// Start analysing a new unit against a builtin catalogue
    pub fn new(builtins: &'b Builtins) -> Self {
        Sem {
            builtins,
            context: SemContext::new(),
        }
    }

    /// Check a single global declaration and record what it declares
    ///
    /// A failed declaration leaves nothing behind in the context.
    pub fn check_decl(&mut self, decl: &Decl) -> Result<(), SemError> {
        debug_assert!(!self.context.has_variables());
        match decl {
            Decl::Struct(sd) => structs::check_struct(sd, self)?,
            Decl::Resource(rd) => resources::check_resource(rd, self)?,
            Decl::Shader(sd) => shaders::check_shader(sd, self)?,
            Decl::Func(fd) => return Err(SemError::FreeFunctionNotSupported(fd.name.clone())),
            Decl::Var(_) | Decl::Return(_) => {
                return Err(SemError::StatementOutsideShader(decl.location()))
            }
        }
        debug!("validated declaration '{}'", decl.name().unwrap_or_default());
        Ok(())
    }

    /// Find a type by name: builtins first, then structs of this unit
    pub fn resolve_type(&self, ty: &TypeExpr) -> Option<&Type> {
        match self.builtins.find_type(&ty.name) {
            Some(builtin) => Some(builtin),
            None => self.context.find_struct(&ty.name).map(|s| &s.ty),
        }
    }

    /// Find a function by name: builtins first, then shaders of this unit
    pub fn resolve_function(&self, name: &str) -> Option<&FuncType> {
        match self.builtins.find_function(name) {
            Some(builtin) => Some(builtin),
            None => self.context.find_shader(name),
        }
    }

    pub fn context(&self) -> &SemContext {
        &self.context
    }

    pub fn into_context(self) -> SemContext {
        self.context
    }

    /// Resolve a type and all of its generic arguments
    fn require_type(&self, ty: &Located<TypeExpr>) -> SemResult<&Type> {
        for arg in &ty.args {
            if self.resolve_type(arg).is_none() {
                return Err(SemError::UnknownType(arg.clone(), ty.location));
            }
        }
        match self.resolve_type(ty) {
            Some(resolved) => Ok(resolved),
            None => Err(SemError::UnknownType(ty.node.clone(), ty.location)),
        }
    }

    /// Add the structs a type refers to into a shader's struct list
    ///
    /// Structs used by the fields of a struct are added before it. Each struct is listed once.
    fn record_structs(&self, ty: &TypeExpr, structs: &mut Vec<String>) {
        for arg in &ty.args {
            self.record_structs(arg, structs);
        }
        if structs.iter().any(|s| *s == ty.name) {
            return;
        }
        if let Some(sd) = self.context.find_struct(&ty.name) {
            for (_, field_type) in &sd.ty.fields {
                self.record_structs(field_type, structs);
            }
            structs.push(ty.name.clone());
        }
    }

    /// Declare a shader local variable
    fn declare_variable(&mut self, name: &Located<String>, ty: TypeExpr) -> SemResult<()> {
        self.context
            .insert_variable(name, ty)
            .map_err(|previous| SemError::VariableAlreadyDefined(name.clone(), previous))
    }
}

/// Check every declaration of a unit in order
///
/// Stops at the first declaration that fails.
pub fn analyze(decls: &[Decl], builtins: &Builtins) -> Result<SemContext, SemError> {
    let mut sem = Sem::new(builtins);
    for decl in decls {
        sem.check_decl(decl)?;
    }
    Ok(sem.into_context())
}

#[test]
fn test_resolve_type() {
    let builtins = Builtins::new();
    let mut sem = Sem::new(&builtins);

    let float4 = TypeExpr::builtin(TypeKeyword::Float4);
    assert_eq!(
        sem.resolve_type(&float4).map(|t| t.builtin),
        Some(Some(TypeKeyword::Float4))
    );
    assert!(sem.resolve_type(&TypeExpr::new("P")).is_none());

    let p = StructDecl {
        name: Located::none("P".to_string()),
        internal: false,
        fields: vec![StructField {
            type_expr: Located::none(float4.clone()),
            name: Located::none("pos".to_string()),
            attribute: None,
        }],
    };
    assert_eq!(sem.check_decl(&Decl::Struct(p)), Ok(()));

    let resolved = sem.resolve_type(&TypeExpr::new("P").into_pointer());
    assert_eq!(resolved.and_then(|t| t.field("pos")), Some(&float4));
    assert!(sem.resolve_function("make_float4").is_some());
    assert!(sem.resolve_function("main").is_none());
}

#[test]
fn test_record_structs() {
    let builtins = Builtins::new();
    let mut sem = Sem::new(&builtins);

    let field = |ty: TypeExpr, name: &str| StructField {
        type_expr: Located::none(ty),
        name: Located::none(name.to_string()),
        attribute: None,
    };
    let inner = StructDecl {
        name: Located::none("Inner".to_string()),
        internal: false,
        fields: vec![field(TypeExpr::builtin(TypeKeyword::Float), "a")],
    };
    let outer = StructDecl {
        name: Located::none("Outer".to_string()),
        internal: false,
        fields: vec![
            field(TypeExpr::new("Inner"), "first"),
            field(TypeExpr::new("Inner").into_pointer(), "second"),
        ],
    };
    assert_eq!(sem.check_decl(&Decl::Struct(inner)), Ok(()));
    assert_eq!(sem.check_decl(&Decl::Struct(outer)), Ok(()));

    let mut structs = Vec::new();
    sem.record_structs(
        &TypeExpr::builtin(TypeKeyword::Buffer).with_args(vec![TypeExpr::new("Outer")]),
        &mut structs,
    );
    sem.record_structs(&TypeExpr::new("Inner"), &mut structs);
    assert_eq!(structs, vec!["Inner".to_string(), "Outer".to_string()]);
}
