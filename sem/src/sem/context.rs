use omegasl_ast::*;
use omegasl_text::*;
use std::collections::HashMap;

/// A struct declared in the current unit
#[derive(PartialEq, Debug, Clone)]
pub struct StructDef {
    /// Resolved type with its field map
    pub ty: Type,

    /// Declaration the type came from, kept for field attributes and locations
    pub decl: StructDecl,
}

/// A resource declared in the current unit
#[derive(PartialEq, Debug, Clone)]
pub struct ResourceDef {
    pub decl: ResourceDecl,

    /// Builtin type the resource resolved to
    pub kind: TypeKeyword,
}

impl ResourceDef {
    pub fn is_sampler(&self) -> bool {
        matches!(self.kind, TypeKeyword::Sampler2d | TypeKeyword::Sampler3d)
    }
}

/// A shader that has passed checking
#[derive(PartialEq, Debug, Clone)]
struct ShaderDef {
    name: Located<String>,
    signature: FuncType,

    /// Structs the shader refers to, dependencies before dependents
    structs: Vec<String>,
}

/// Everything declared so far in one compilation unit
///
/// A context belongs to a single unit. Concurrent compilations each need their own context.
#[derive(Debug, Default)]
pub struct SemContext {
    structs: Vec<StructDef>,
    resources: Vec<ResourceDef>,
    shaders: Vec<ShaderDef>,

    /// Variables visible inside the shader currently being checked
    variables: HashMap<String, Located<TypeExpr>>,
}

impl SemContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find a struct declared in this unit
    pub fn find_struct(&self, name: &str) -> Option<&StructDef> {
        self.structs.iter().find(|s| s.ty.name == name)
    }

    /// Structs in declaration order
    pub fn structs(&self) -> &[StructDef] {
        &self.structs
    }

    /// Find a resource declared in this unit
    pub fn find_resource(&self, name: &str) -> Option<&ResourceDef> {
        self.resources.iter().find(|r| r.decl.name.node == name)
    }

    /// Resources in declaration order
    pub fn resources(&self) -> &[ResourceDef] {
        &self.resources
    }

    /// Names of the shaders validated so far in source order
    pub fn shader_names(&self) -> impl Iterator<Item = &str> {
        self.shaders.iter().map(|s| s.name.as_str())
    }

    /// Get the signature of a validated shader
    pub fn find_shader(&self, name: &str) -> Option<&FuncType> {
        self.find_shader_def(name).map(|s| &s.signature)
    }

    /// Structs a validated shader depends on, dependencies first
    pub fn shader_structs(&self, name: &str) -> &[String] {
        match self.find_shader_def(name) {
            Some(shader) => &shader.structs,
            None => &[],
        }
    }

    fn find_shader_def(&self, name: &str) -> Option<&ShaderDef> {
        self.shaders.iter().find(|s| s.name.node == name)
    }

    pub(crate) fn shader_location(&self, name: &str) -> Option<SourceLocation> {
        self.find_shader_def(name).map(|s| s.name.location)
    }

    pub(crate) fn add_struct(&mut self, def: StructDef) {
        self.structs.push(def);
    }

    pub(crate) fn add_resource(&mut self, def: ResourceDef) {
        self.resources.push(def);
    }

    pub(crate) fn add_shader(
        &mut self,
        name: Located<String>,
        signature: FuncType,
        structs: Vec<String>,
    ) {
        self.shaders.push(ShaderDef {
            name,
            signature,
            structs,
        });
    }

    /// Look up the type of a shader local variable
    pub(crate) fn find_variable(&self, name: &str) -> Option<&TypeExpr> {
        self.variables.get(name).map(|v| &v.node)
    }

    /// Declare a shader local variable
    ///
    /// Fails with the location of the previous declaration if the name is taken.
    pub(crate) fn insert_variable(
        &mut self,
        name: &Located<String>,
        ty: TypeExpr,
    ) -> Result<(), SourceLocation> {
        if let Some(previous) = self.variables.get(&name.node) {
            return Err(previous.location);
        }
        self.variables
            .insert(name.node.clone(), Located::new(ty, name.location));
        Ok(())
    }

    /// Drop every shader local variable
    pub(crate) fn clear_variables(&mut self) {
        self.variables.clear();
    }

    pub(crate) fn has_variables(&self) -> bool {
        !self.variables.is_empty()
    }
}

#[test]
fn test_variables() {
    let mut context = SemContext::new();
    let a = Located::new("a".to_string(), SourceLocation::first().offset(4));
    let float = TypeExpr::builtin(TypeKeyword::Float);

    assert_eq!(context.insert_variable(&a, float.clone()), Ok(()));
    assert_eq!(context.find_variable("a"), Some(&float));
    assert_eq!(
        context.insert_variable(&Located::none("a".to_string()), float),
        Err(SourceLocation::first().offset(4))
    );

    context.clear_variables();
    assert!(!context.has_variables());
    assert_eq!(context.find_variable("a"), None);
}
