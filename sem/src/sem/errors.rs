use omegasl_ast::*;
use omegasl_text::*;

pub type SemResult<T> = Result<T, SemError>;

/// An error that occurred when checking a declaration
#[derive(PartialEq, Debug, Clone)]
pub enum SemError {
    /// New name, then the location of the existing type which is unknown for builtins
    TypeAlreadyDefined(Located<String>, SourceLocation),
    UnknownType(TypeExpr, SourceLocation),
    DuplicateField(Located<String>, SourceLocation),
    AttributeOnPublicStruct(Located<String>),
    InvalidAttribute(Located<String>, AttributeContext),

    ResourceAlreadyDefined(Located<String>, SourceLocation),
    InvalidResourceType(TypeExpr, SourceLocation),
    StaticResourceNotSampler(Located<String>),
    BufferRequiresElementType(Located<String>),

    ShaderAlreadyDefined(Located<String>, SourceLocation),
    SamplerAccessMustBeIn(Located<String>, IoMode),
    /// Attribute, the parameter position it should be at, the position it was found at
    ComputeAttributeOrder(Located<String>, usize, usize),
    MismatchedReturnTypes(TypeExpr, TypeExpr, SourceLocation),
    WrongShaderReturnType(ShaderStage, TypeExpr, SourceLocation),
    /// Declared return type, then the type the body returns
    ReturnTypeMismatch(TypeExpr, TypeExpr, SourceLocation),
    FreeFunctionNotSupported(Located<String>),
    StatementOutsideShader(SourceLocation),
    DeclarationInBlock(SourceLocation),

    UnknownIdentifier(String, SourceLocation),
    VariableAlreadyDefined(Located<String>, SourceLocation),
    InitializerWrongType(TypeExpr, TypeExpr, SourceLocation),

    InvalidSwizzle(TypeExpr, String, SourceLocation),
    MemberDoesNotExist(TypeExpr, String, SourceLocation),
    TypeDoesNotHaveMembers(TypeExpr, SourceLocation),
    IndexOnNonBuffer(TypeExpr, SourceLocation),
    IndexNotUint(TypeExpr, SourceLocation),

    CallOnNonFunction(SourceLocation),
    UnknownFunction(String, SourceLocation),
    ShaderCalled(String, SourceLocation),
    WrongArgumentCount(BuiltinFunction, usize, SourceLocation),
    /// Function, argument index, argument type
    WrongArgumentType(BuiltinFunction, usize, TypeExpr, SourceLocation),
    /// Function, total number of components passed
    VectorComponentMismatch(BuiltinFunction, u32, SourceLocation),

    BinaryOperationWrongTypes(BinOp, TypeExpr, TypeExpr, SourceLocation),
    DereferenceNonPointer(TypeExpr, SourceLocation),
    AddressOfPointer(TypeExpr, SourceLocation),
    EmptyArray(SourceLocation),
    ArrayElementMismatch(TypeExpr, TypeExpr, SourceLocation),
    StringNotSupported(SourceLocation),
}

/// Place an attribute was written in
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub enum AttributeContext {
    StructField,
    Param(ShaderStage),
}

impl std::fmt::Display for AttributeContext {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            AttributeContext::StructField => write!(f, "struct field"),
            AttributeContext::Param(ShaderStage::Vertex) => write!(f, "vertex shader parameter"),
            AttributeContext::Param(ShaderStage::Fragment) => {
                write!(f, "fragment shader parameter")
            }
            AttributeContext::Param(ShaderStage::Compute) => write!(f, "compute shader parameter"),
        }
    }
}

fn stage_name(stage: ShaderStage) -> &'static str {
    match stage {
        ShaderStage::Vertex => "vertex",
        ShaderStage::Fragment => "fragment",
        ShaderStage::Compute => "compute",
    }
}

fn access_name(access: IoMode) -> &'static str {
    match access {
        IoMode::In => "in",
        IoMode::Out => "out",
        IoMode::Inout => "inout",
    }
}

/// Write a redefinition error along with the location of the first definition
fn write_redefinition(
    w: &mut MessagePrinter,
    name: &Located<String>,
    previous: SourceLocation,
) -> std::fmt::Result {
    w.write_message(
        &|f| write!(f, "redefinition of '{}'", name.node),
        name.location,
        Severity::Error,
    )?;
    if previous != SourceLocation::UNKNOWN {
        w.write_message(
            &|f| write!(f, "previous definition is here"),
            previous,
            Severity::Note,
        )?;
    }
    Ok(())
}

impl SemError {
    /// Location the error is reported at
    pub fn location(&self) -> SourceLocation {
        match self {
            SemError::TypeAlreadyDefined(name, _)
            | SemError::DuplicateField(name, _)
            | SemError::AttributeOnPublicStruct(name)
            | SemError::InvalidAttribute(name, _)
            | SemError::ResourceAlreadyDefined(name, _)
            | SemError::StaticResourceNotSampler(name)
            | SemError::BufferRequiresElementType(name)
            | SemError::ShaderAlreadyDefined(name, _)
            | SemError::SamplerAccessMustBeIn(name, _)
            | SemError::ComputeAttributeOrder(name, _, _)
            | SemError::FreeFunctionNotSupported(name)
            | SemError::VariableAlreadyDefined(name, _) => name.location,
            SemError::UnknownType(_, loc)
            | SemError::InvalidResourceType(_, loc)
            | SemError::MismatchedReturnTypes(_, _, loc)
            | SemError::WrongShaderReturnType(_, _, loc)
            | SemError::ReturnTypeMismatch(_, _, loc)
            | SemError::StatementOutsideShader(loc)
            | SemError::DeclarationInBlock(loc)
            | SemError::UnknownIdentifier(_, loc)
            | SemError::InitializerWrongType(_, _, loc)
            | SemError::InvalidSwizzle(_, _, loc)
            | SemError::MemberDoesNotExist(_, _, loc)
            | SemError::TypeDoesNotHaveMembers(_, loc)
            | SemError::IndexOnNonBuffer(_, loc)
            | SemError::IndexNotUint(_, loc)
            | SemError::CallOnNonFunction(loc)
            | SemError::UnknownFunction(_, loc)
            | SemError::ShaderCalled(_, loc)
            | SemError::WrongArgumentCount(_, _, loc)
            | SemError::WrongArgumentType(_, _, _, loc)
            | SemError::VectorComponentMismatch(_, _, loc)
            | SemError::BinaryOperationWrongTypes(_, _, _, loc)
            | SemError::DereferenceNonPointer(_, loc)
            | SemError::AddressOfPointer(_, loc)
            | SemError::EmptyArray(loc)
            | SemError::ArrayElementMismatch(_, _, loc)
            | SemError::StringNotSupported(loc) => *loc,
        }
    }
}

impl CompileError for SemError {
    fn print(&self, w: &mut MessagePrinter) -> std::fmt::Result {
        match self {
            SemError::TypeAlreadyDefined(name, previous)
            | SemError::DuplicateField(name, previous)
            | SemError::ResourceAlreadyDefined(name, previous)
            | SemError::ShaderAlreadyDefined(name, previous)
            | SemError::VariableAlreadyDefined(name, previous) => {
                write_redefinition(w, name, *previous)
            }
            SemError::UnknownType(ty, loc) => w.write_message(
                &|f| write!(f, "unknown type name '{}'", ty),
                *loc,
                Severity::Error,
            ),
            SemError::AttributeOnPublicStruct(attribute) => w.write_message(
                &|f| {
                    write!(
                        f,
                        "attribute '{}' is only allowed in internal structs",
                        attribute.node
                    )
                },
                attribute.location,
                Severity::Error,
            ),
            SemError::InvalidAttribute(attribute, context) => w.write_message(
                &|f| {
                    write!(
                        f,
                        "attribute '{}' is not valid on a {}",
                        attribute.node, context
                    )
                },
                attribute.location,
                Severity::Error,
            ),
            SemError::InvalidResourceType(ty, loc) => w.write_message(
                &|f| write!(f, "'{}' cannot be used as a resource type", ty),
                *loc,
                Severity::Error,
            ),
            SemError::StaticResourceNotSampler(name) => w.write_message(
                &|f| write!(f, "static resource '{}' must be a sampler", name.node),
                name.location,
                Severity::Error,
            ),
            SemError::BufferRequiresElementType(name) => w.write_message(
                &|f| {
                    write!(
                        f,
                        "buffer '{}' requires exactly one element type",
                        name.node
                    )
                },
                name.location,
                Severity::Error,
            ),
            SemError::SamplerAccessMustBeIn(name, access) => w.write_message(
                &|f| {
                    write!(
                        f,
                        "sampler '{}' can only be mapped with 'in' access, not '{}'",
                        name.node,
                        access_name(*access)
                    )
                },
                name.location,
                Severity::Error,
            ),
            SemError::ComputeAttributeOrder(attribute, expected, found) => w.write_message(
                &|f| {
                    write!(
                        f,
                        "attribute '{}' must be on parameter {} but was found on parameter {}",
                        attribute.node, expected, found
                    )
                },
                attribute.location,
                Severity::Error,
            ),
            SemError::MismatchedReturnTypes(first, other, loc) => w.write_message(
                &|f| {
                    write!(
                        f,
                        "return type '{}' does not match earlier return type '{}'",
                        other, first
                    )
                },
                *loc,
                Severity::Error,
            ),
            SemError::WrongShaderReturnType(stage, ty, loc) => {
                let expected = match stage {
                    ShaderStage::Fragment => "float4",
                    _ => "void",
                };
                w.write_message(
                    &|f| {
                        write!(
                            f,
                            "{} shader must return '{}' but returns '{}'",
                            stage_name(*stage),
                            expected,
                            ty
                        )
                    },
                    *loc,
                    Severity::Error,
                )
            }
            SemError::ReturnTypeMismatch(declared, actual, loc) => w.write_message(
                &|f| {
                    write!(
                        f,
                        "function declared to return '{}' returns '{}'",
                        declared, actual
                    )
                },
                *loc,
                Severity::Error,
            ),
            SemError::FreeFunctionNotSupported(name) => w.write_message(
                &|f| {
                    write!(
                        f,
                        "function '{}' needs a shader stage: free functions are not supported",
                        name.node
                    )
                },
                name.location,
                Severity::Error,
            ),
            SemError::StatementOutsideShader(loc) => w.write_message(
                &|f| write!(f, "statement is not inside a shader"),
                *loc,
                Severity::Error,
            ),
            SemError::DeclarationInBlock(loc) => w.write_message(
                &|f| write!(f, "only variables can be declared inside a shader body"),
                *loc,
                Severity::Error,
            ),
            SemError::UnknownIdentifier(name, loc) => w.write_message(
                &|f| write!(f, "'{}' was not declared in this scope", name),
                *loc,
                Severity::Error,
            ),
            SemError::InitializerWrongType(declared, actual, loc) => w.write_message(
                &|f| {
                    write!(
                        f,
                        "cannot initialize variable of type '{}' with '{}'",
                        declared, actual
                    )
                },
                *loc,
                Severity::Error,
            ),
            SemError::InvalidSwizzle(ty, swizzle, loc) => w.write_message(
                &|f| write!(f, "invalid swizzle '{}' on type '{}'", swizzle, ty),
                *loc,
                Severity::Error,
            ),
            SemError::MemberDoesNotExist(ty, member, loc) => w.write_message(
                &|f| write!(f, "no member named '{}' in '{}'", member, ty),
                *loc,
                Severity::Error,
            ),
            SemError::TypeDoesNotHaveMembers(ty, loc) => w.write_message(
                &|f| write!(f, "type '{}' does not have members", ty),
                *loc,
                Severity::Error,
            ),
            SemError::IndexOnNonBuffer(ty, loc) => w.write_message(
                &|f| write!(f, "cannot index type '{}': only buffers can be indexed", ty),
                *loc,
                Severity::Error,
            ),
            SemError::IndexNotUint(ty, loc) => w.write_message(
                &|f| write!(f, "buffer index must be 'uint' but is '{}'", ty),
                *loc,
                Severity::Error,
            ),
            SemError::CallOnNonFunction(loc) => w.write_message(
                &|f| write!(f, "called object is not a function"),
                *loc,
                Severity::Error,
            ),
            SemError::UnknownFunction(name, loc) => w.write_message(
                &|f| write!(f, "unknown function '{}'", name),
                *loc,
                Severity::Error,
            ),
            SemError::ShaderCalled(name, loc) => w.write_message(
                &|f| write!(f, "shader '{}' cannot be called", name),
                *loc,
                Severity::Error,
            ),
            SemError::WrongArgumentCount(func, count, loc) => w.write_message(
                &|f| {
                    write!(
                        f,
                        "wrong number of arguments to '{}': {} given",
                        func.name(),
                        count
                    )
                },
                *loc,
                Severity::Error,
            ),
            SemError::WrongArgumentType(func, index, ty, loc) => w.write_message(
                &|f| {
                    write!(
                        f,
                        "argument {} to '{}' has unexpected type '{}'",
                        index + 1,
                        func.name(),
                        ty
                    )
                },
                *loc,
                Severity::Error,
            ),
            SemError::VectorComponentMismatch(func, components, loc) => w.write_message(
                &|f| {
                    write!(
                        f,
                        "arguments to '{}' provide {} components",
                        func.name(),
                        components
                    )
                },
                *loc,
                Severity::Error,
            ),
            SemError::BinaryOperationWrongTypes(op, left, right, loc) => w.write_message(
                &|f| {
                    write!(
                        f,
                        "operation '{}' is not implemented for types '{}' and '{}'",
                        op.symbol(),
                        left,
                        right
                    )
                },
                *loc,
                Severity::Error,
            ),
            SemError::DereferenceNonPointer(ty, loc) => w.write_message(
                &|f| write!(f, "cannot dereference non-pointer type '{}'", ty),
                *loc,
                Severity::Error,
            ),
            SemError::AddressOfPointer(ty, loc) => w.write_message(
                &|f| write!(f, "cannot take the address of pointer type '{}'", ty),
                *loc,
                Severity::Error,
            ),
            SemError::EmptyArray(loc) => w.write_message(
                &|f| write!(f, "array literal must have at least one element"),
                *loc,
                Severity::Error,
            ),
            SemError::ArrayElementMismatch(first, other, loc) => w.write_message(
                &|f| {
                    write!(
                        f,
                        "array element of type '{}' does not match first element type '{}'",
                        other, first
                    )
                },
                *loc,
                Severity::Error,
            ),
            SemError::StringNotSupported(loc) => w.write_message(
                &|f| write!(f, "string literals cannot be used in expressions"),
                *loc,
                Severity::Error,
            ),
        }
    }
}
