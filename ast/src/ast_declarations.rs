use crate::*;
use omegasl_text::{Located, SourceLocation};

/// A declaration at global scope or inside a shader body
#[derive(PartialEq, Debug, Clone)]
pub enum Decl {
    Struct(StructDecl),
    Resource(ResourceDecl),
    Var(VarDecl),
    Return(ReturnDecl),
    Func(FuncDecl),
    Shader(ShaderDecl),
}

impl Decl {
    /// Name introduced by the declaration
    pub fn name(&self) -> Option<&str> {
        match self {
            Decl::Struct(sd) => Some(sd.name.as_str()),
            Decl::Resource(rd) => Some(rd.name.as_str()),
            Decl::Var(vd) => Some(vd.name.as_str()),
            Decl::Return(_) => None,
            Decl::Func(fd) => Some(fd.name.as_str()),
            Decl::Shader(sd) => Some(sd.func.name.as_str()),
        }
    }

    /// Location to report problems with the declaration at
    pub fn location(&self) -> SourceLocation {
        match self {
            Decl::Struct(sd) => sd.name.location,
            Decl::Resource(rd) => rd.name.location,
            Decl::Var(vd) => vd.name.location,
            Decl::Return(rd) => rd.location,
            Decl::Func(fd) => fd.name.location,
            Decl::Shader(sd) => sd.func.name.location,
        }
    }
}

/// A member of a struct
#[derive(PartialEq, Debug, Clone)]
pub struct StructField {
    pub type_expr: Located<TypeExpr>,
    pub name: Located<String>,
    pub attribute: Option<Located<String>>,
}

#[derive(PartialEq, Debug, Clone)]
pub struct StructDecl {
    pub name: Located<String>,

    /// Internal structs only pass data between stages and may carry attributes
    pub internal: bool,

    pub fields: Vec<StructField>,
}

/// A GPU binding declared at global scope
#[derive(PartialEq, Debug, Clone)]
pub struct ResourceDecl {
    pub type_expr: Located<TypeExpr>,
    pub name: Located<String>,

    /// Register number from the source, 0 for static samplers without one
    pub register: u32,

    pub is_static: bool,

    /// Sampler state for static samplers
    pub sampler_desc: Option<StaticSamplerDesc>,
}

#[derive(PartialEq, Debug, Clone)]
pub struct VarDecl {
    pub type_expr: Located<TypeExpr>,
    pub name: Located<String>,
    pub initializer: Option<Located<Expr>>,
}

#[derive(PartialEq, Debug, Clone)]
pub struct ReturnDecl {
    pub expr: Located<Expr>,

    /// Location of the return keyword
    pub location: SourceLocation,
}

/// A parameter to a function or shader
#[derive(PartialEq, Debug, Clone)]
pub struct ParamDecl {
    pub type_expr: Located<TypeExpr>,
    pub name: Located<String>,
    pub attribute: Option<Located<String>>,
}

#[derive(PartialEq, Debug, Clone)]
pub struct FuncDecl {
    pub name: Located<String>,
    pub params: Vec<ParamDecl>,
    pub return_type: Located<TypeExpr>,
    pub body: Vec<Stmt>,
}

/// Resource granted to a shader along with the access it is granted
#[derive(PartialEq, Debug, Clone)]
pub struct ResourceMapEntry {
    pub access: IoMode,
    pub name: Located<String>,
}

/// A shader entry point
#[derive(PartialEq, Debug, Clone)]
pub struct ShaderDecl {
    pub stage: ShaderStage,
    pub resource_map: Vec<ResourceMapEntry>,

    /// Only meaningful for compute shaders
    pub threadgroup: ThreadgroupDesc,

    pub func: FuncDecl,
}
