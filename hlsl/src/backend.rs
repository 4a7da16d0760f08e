use omegasl_ast::Decl;
use omegasl_library::ShaderEntry;
use omegasl_sem::SemContext;
use std::path::PathBuf;

/// Code generator for one target shading language
///
/// A backend is fed every declaration of a unit in source order, each one only after it has passed
/// semantic analysis. `ctx` holds everything validated so far, including the declaration itself.
pub trait Backend {
    /// Generate code for a declaration
    ///
    /// Structs and resources are recorded for later shaders and produce nothing. Shaders produce a
    /// complete library entry.
    fn generate_decl(
        &mut self,
        decl: &Decl,
        ctx: &SemContext,
    ) -> Result<Option<ShaderEntry>, BackendError>;
}

/// Error result when generating code for a declaration fails
#[derive(thiserror::Error, Debug)]
pub enum BackendError {
    #[error("shader '{0}' has not been validated")]
    UnknownShader(String),

    #[error("struct '{0}' was used before it was generated")]
    MissingStruct(String),

    #[error("resource '{0}' has a type that can not be bound")]
    InvalidResource(String),

    #[error("'{name}' of type '{type_name}' can not be used as a vertex input")]
    UnsupportedVertexInput { name: String, type_name: String },

    #[error("dxc needs a temporary directory to write shader '{0}' into")]
    DxcRequiresTempDir(String),

    #[error("failed to write '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("dxc failed to compile shader '{shader}': {source}")]
    Dxc {
        shader: String,
        #[source]
        source: dxc_invoker::ExecuteError,
    },
}
