//! # DirectX shader compiler invoker
//!
//! Finds and invokes an instance of `dxc` to turn HLSL source files into shader objects

use log::debug;
use std::path::{Path, PathBuf};

/// Describes the location of a dxc program
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct DxcCompiler {
    program_path: PathBuf,
}

/// Error for [DxcCompiler::find] and [DxcCompiler::new]
#[derive(thiserror::Error, PartialEq, Eq, Debug)]
pub enum FindError {
    #[error("dxc was not found on the PATH")]
    ProgramNotFound,

    #[error("dxc does not exist at '{0}'")]
    PathDoesNotExist(PathBuf),
}

/// Error for [DxcCompiler::execute]
#[derive(thiserror::Error, Debug)]
pub enum ExecuteError {
    #[error("failed to start dxc: {0}")]
    ProcessSpawnFailed(#[source] std::io::Error),

    #[error("{0}")]
    CompileError(String),

    #[error("failed to read dxc output '{path}': {source}")]
    ReadOutputFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Executable names dxc is installed under
const PROGRAM_NAMES: [&str; 2] = ["dxc", "dxc.exe"];

impl DxcCompiler {
    /// Use the dxc at an explicit path
    ///
    /// A bare program name is accepted as is and resolved by the OS when executed.
    pub fn new(path: impl Into<PathBuf>) -> Result<DxcCompiler, FindError> {
        let program_path = path.into();
        let is_bare_name = program_path.components().count() == 1;
        if !is_bare_name && !program_path.exists() {
            return Err(FindError::PathDoesNotExist(program_path));
        }
        Ok(DxcCompiler { program_path })
    }

    /// Attempt to find dxc on the PATH
    pub fn find() -> Result<DxcCompiler, FindError> {
        match std::env::var_os("PATH") {
            Some(paths) => Self::find_in(std::env::split_paths(&paths)),
            None => Err(FindError::ProgramNotFound),
        }
    }

    /// Attempt to find dxc in a list of directories
    pub fn find_in(dirs: impl IntoIterator<Item = PathBuf>) -> Result<DxcCompiler, FindError> {
        for dir in dirs {
            for name in PROGRAM_NAMES {
                let candidate = dir.join(name);
                if candidate.is_file() {
                    return Ok(DxcCompiler {
                        program_path: candidate,
                    });
                }
            }
        }
        Err(FindError::ProgramNotFound)
    }

    pub fn program_path(&self) -> &Path {
        &self.program_path
    }

    /// Compile an HLSL file to a shader object and return the object's contents
    ///
    /// `profile` is a dxc target profile such as `ps_5_0`.
    pub fn execute(
        &self,
        source_path: &Path,
        entry_point: &str,
        profile: &str,
        output_path: &Path,
    ) -> Result<Vec<u8>, ExecuteError> {
        debug!(
            "running {} on {} for entry point '{}'",
            self.program_path.display(),
            source_path.display(),
            entry_point
        );

        let result = std::process::Command::new(&self.program_path)
            .arg("-nologo")
            .arg("-T")
            .arg(profile)
            .arg("-E")
            .arg(entry_point)
            .arg("-Fo")
            .arg(output_path)
            .arg(source_path)
            .stdin(std::process::Stdio::null())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::piped())
            .output();

        let result = match result {
            Ok(result) => result,
            Err(err) => return Err(ExecuteError::ProcessSpawnFailed(err)),
        };

        if !result.status.success() {
            return Err(ExecuteError::CompileError(
                String::from_utf8(result.stderr).unwrap_or(String::from("Invalid UTF-8")),
            ));
        }

        match std::fs::read(output_path) {
            Ok(bytes) => Ok(bytes),
            Err(source) => Err(ExecuteError::ReadOutputFailed {
                path: output_path.to_path_buf(),
                source,
            }),
        }
    }
}

#[test]
fn test_find() {
    let dir = std::env::temp_dir().join(format!("dxc_invoker_find_{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("failed to create test directory");
    std::fs::write(dir.join("dxc"), b"").expect("failed to create fake dxc");

    let missing = dir.join("missing");
    assert_eq!(
        DxcCompiler::find_in([missing.clone()]),
        Err(FindError::ProgramNotFound)
    );

    let found = DxcCompiler::find_in([missing.clone(), dir.clone()]).expect("dxc not found");
    assert_eq!(found.program_path(), dir.join("dxc"));

    assert_eq!(
        DxcCompiler::new(missing.join("dxc")),
        Err(FindError::PathDoesNotExist(missing.join("dxc")))
    );
    assert!(DxcCompiler::new("dxc").is_ok());

    std::fs::remove_dir_all(&dir).expect("failed to clean up test directory");
}

#[test]
fn test_find_on_path() {
    let dirs = std::env::var_os("PATH")
        .map(|paths| std::env::split_paths(&paths).collect::<Vec<_>>())
        .unwrap_or_default();
    assert_eq!(DxcCompiler::find(), DxcCompiler::find_in(dirs));
}
