use crate::*;
use ast::Decl;
use hlsl::{Backend, HlslBackend, HlslOptions};
use log::{debug, warn};
use std::path::Path;
use text::tokens::LexToken;
use text::CompileErrorExt;

/// Invoke the compiler to build OmegaSL source into a shader library
///
/// Declarations are handled one at a time: each is parsed, validated and handed to the backend
/// before the next one is read. The first failure stops the compilation.
pub fn compile(args: CompileArgs) -> Result<CompiledUnit, CompileError> {
    let mut backend = if args.interface_only {
        if args.target != Target::Hlsl {
            warn!(
                "ignoring {} target as only the interface is checked",
                args.target
            );
        }
        None
    } else {
        Some(create_backend(&args)?)
    };

    // Make a source manager to own the input and resolve error locations
    let mut source_manager = text::SourceManager::new();
    let file_id = source_manager.add_file(
        text::FileName(args.file_name.to_string()),
        args.source.to_string(),
    );

    let tokens = match lexer::lex(file_id, &source_manager) {
        Ok(tokens) => tokens,
        Err(err) => return Err(CompileError::Text(err.display(&source_manager).to_string())),
    };

    let mut parser = parser::Parser::new(&tokens);
    let mut sem = sem::Sem::new(ast::Builtins::global());
    let mut library = library::ShaderLibrary::new(args.resolved_library_name());
    let mut decls = Vec::new();

    loop {
        let decl = match parser.next_decl() {
            Ok(Some(decl)) => decl,
            Ok(None) => break,
            Err(err) => return Err(CompileError::Text(err.display(&source_manager).to_string())),
        };

        if let Err(err) = sem.check_decl(&decl) {
            return Err(CompileError::Text(err.display(&source_manager).to_string()));
        }

        if let Some(backend) = backend.as_mut() {
            if let Some(entry) = backend.generate_decl(&decl, sem.context())? {
                library.entries.push(entry);
            }
        }

        decls.push(decl);
    }

    let context = sem.into_context();
    let shader_structs = context
        .shader_names()
        .map(|name| (name.to_string(), context.shader_structs(name).to_vec()))
        .collect();

    debug!(
        "compiled {} declarations into {} shader entries",
        decls.len(),
        library.entries.len()
    );

    Ok(CompiledUnit {
        library,
        decls,
        shader_structs,
    })
}

/// Split OmegaSL source into tokens
pub fn tokenize(file_name: &str, source: &str) -> Result<Vec<LexToken>, CompileError> {
    let mut source_manager = text::SourceManager::new();
    let file_id =
        source_manager.add_file(text::FileName(file_name.to_string()), source.to_string());
    match lexer::lex(file_id, &source_manager) {
        Ok(tokens) => Ok(tokens),
        Err(err) => Err(CompileError::Text(err.display(&source_manager).to_string())),
    }
}

fn create_backend(args: &CompileArgs) -> Result<Box<dyn Backend>, CompileError> {
    match args.target {
        Target::Hlsl => {
            let dxc = match args.dxc_path {
                Some(path) => Some(dxc_invoker::DxcCompiler::new(path)?),
                None => None,
            };
            let options = HlslOptions {
                temp_dir: args.temp_dir.map(Path::to_path_buf),
                dxc,
            };
            Ok(Box::new(HlslBackend::new(options)))
        }
        Target::Metal | Target::Glsl => Err(CompileError::BackendNotAvailable(args.target)),
    }
}

/// Output of compiling one source file
#[derive(Debug)]
pub struct CompiledUnit {
    /// One entry per shader in source order
    pub library: library::ShaderLibrary,

    /// Every validated declaration in source order
    pub decls: Vec<Decl>,

    /// Structs each shader depends on, dependencies first
    pub shader_structs: Vec<(String, Vec<String>)>,
}

impl CompiledUnit {
    /// Get the struct dependency list of a shader
    pub fn structs_for(&self, shader: &str) -> Option<&[String]> {
        self.shader_structs
            .iter()
            .find(|(name, _)| name == shader)
            .map(|(_, structs)| structs.as_slice())
    }

    /// Write the library to a file, creating the parent directory if needed
    pub fn save(&self, path: &Path) -> Result<(), CompileError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        self.library.save(path)?;
        Ok(())
    }
}

/// Error for [compile()]
#[derive(thiserror::Error, Debug)]
pub enum CompileError {
    /// Rendered diagnostic from the front end
    #[error("{0}")]
    Text(String),

    #[error("{0} backend not available")]
    BackendNotAvailable(Target),

    #[error(transparent)]
    DxcNotFound(#[from] dxc_invoker::FindError),

    #[error(transparent)]
    Backend(#[from] hlsl::BackendError),

    #[error(transparent)]
    Library(#[from] library::LibraryError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Arguments for [compile()]
pub struct CompileArgs<'a> {
    file_name: &'a str,
    source: &'a str,
    target: Target,
    temp_dir: Option<&'a Path>,
    dxc_path: Option<&'a Path>,
    library_name: Option<&'a str>,
    interface_only: bool,
}

impl<'a> CompileArgs<'a> {
    /// Create new args with required arguments
    pub fn new(file_name: &'a str, source: &'a str) -> Self {
        CompileArgs {
            file_name,
            source,
            target: Target::default(),
            temp_dir: None,
            dxc_path: None,
            library_name: None,
            interface_only: false,
        }
    }

    pub fn target(mut self, target: Target) -> Self {
        self.target = target;
        self
    }

    /// Set the directory generated sources are written into
    pub fn temp_dir(mut self, temp_dir: &'a Path) -> Self {
        self.temp_dir = Some(temp_dir);
        self
    }

    /// Compile generated HLSL to bytecode with the given dxc executable
    pub fn dxc_path(mut self, dxc_path: &'a Path) -> Self {
        self.dxc_path = Some(dxc_path);
        self
    }

    /// Set the name written into the library header
    ///
    /// Defaults to the stem of the file name.
    pub fn library_name(mut self, name: &'a str) -> Self {
        self.library_name = Some(name);
        self
    }

    /// Only validate the declarations without generating any shaders
    pub fn interface_only(mut self) -> Self {
        self.interface_only = true;
        self
    }

    fn resolved_library_name(&self) -> String {
        match self.library_name {
            Some(name) => name.to_string(),
            None => Path::new(self.file_name)
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default(),
        }
    }
}

#[derive(PartialEq, Eq, Debug, Copy, Clone, Default)]
pub enum Target {
    /// Generate HLSL to be compiled with dxc
    #[default]
    Hlsl,

    /// Metal shading language
    Metal,

    /// GLSL for Vulkan
    Glsl,
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Target::Hlsl => write!(f, "hlsl"),
            Target::Metal => write!(f, "metal"),
            Target::Glsl => write!(f, "glsl"),
        }
    }
}
