use clap::Parser;
use log::{info, warn};
use omegasl::ast::Decl;
use omegasl::{CompileArgs, Target};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Parser)]
#[command(name = "omegaslc")]
#[command(about = "Compiles OmegaSL shaders into a shader library", long_about = None)]
struct Cli {
    /// Input OmegaSL source file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output shader library
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,

    /// Directory for generated sources and intermediate objects
    #[arg(short, long, value_name = "DIR")]
    temp_dir: PathBuf,

    /// Print the token stream and exit
    #[arg(long)]
    tokens_only: bool,

    /// Only check the source and print the declarations it contains
    #[arg(long)]
    interface_only: bool,

    /// Generate HLSL (default)
    #[arg(long, group = "target")]
    hlsl: bool,

    /// Generate Metal shading language
    #[arg(long, group = "target")]
    metal: bool,

    /// Generate GLSL
    #[arg(long, group = "target")]
    glsl: bool,

    /// dxc executable used to compile generated HLSL
    #[arg(long, value_name = "PATH")]
    dxc: Option<PathBuf>,

    /// glslc executable used to compile generated GLSL
    #[arg(long, value_name = "PATH")]
    glslc: Option<PathBuf>,

    /// Print debug output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn target(&self) -> Target {
        if self.metal {
            Target::Metal
        } else if self.glsl {
            Target::Glsl
        } else {
            Target::Hlsl
        }
    }
}

#[derive(Error)]
enum DriverError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("{0}")]
    CompilationError(#[from] omegasl::CompileError),
}

// Errors returned from main are printed with Debug
impl std::fmt::Debug for DriverError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

fn main() -> Result<(), DriverError> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();

    let source = fs::read_to_string(&cli.input)?;
    let file_name = cli.input.display().to_string();

    if cli.tokens_only {
        for token in omegasl::tokenize(&file_name, &source)? {
            println!("{:?}", token.0);
        }
        return Ok(());
    }

    if cli.glslc.is_some() {
        warn!("ignoring --glslc as there is no GLSL backend");
    }

    fs::create_dir_all(&cli.temp_dir)?;

    let library_name = cli
        .output
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    let dxc = find_dxc(&cli);
    let mut args = CompileArgs::new(&file_name, &source)
        .target(cli.target())
        .temp_dir(&cli.temp_dir)
        .library_name(&library_name);
    if let Some(dxc) = &dxc {
        args = args.dxc_path(dxc);
    }
    if cli.interface_only {
        args = args.interface_only();
    }

    let unit = omegasl::compile(args)?;

    if cli.interface_only {
        for decl in &unit.decls {
            print_interface(decl, &unit);
        }
        return Ok(());
    }

    unit.save(&cli.output)?;
    info!(
        "wrote {} shader entries to {}",
        unit.library.entries.len(),
        cli.output.display()
    );

    Ok(())
}

/// Pick the dxc to run, searching the PATH when none was given
fn find_dxc(cli: &Cli) -> Option<PathBuf> {
    if let Some(dxc) = &cli.dxc {
        return Some(dxc.clone());
    }
    if cli.interface_only || cli.target() != Target::Hlsl {
        return None;
    }
    match omegasl::dxc_invoker::DxcCompiler::find() {
        Ok(dxc) => {
            info!("using dxc at {}", dxc.program_path().display());
            Some(dxc.program_path().to_path_buf())
        }
        Err(err) => {
            info!("{}, storing HLSL source in the library", err);
            None
        }
    }
}

/// Print one line describing a validated declaration
fn print_interface(decl: &Decl, unit: &omegasl::CompiledUnit) {
    match decl {
        Decl::Struct(sd) => println!("struct {}", sd.name.node),
        Decl::Resource(rd) => println!(
            "resource {} {} : {}",
            rd.type_expr.node, rd.name.node, rd.register
        ),
        Decl::Shader(sd) => {
            let structs = unit.structs_for(&sd.func.name).unwrap_or_default();
            println!(
                "{:?} shader {} uses [{}]",
                sd.stage,
                sd.func.name.node,
                structs.join(", ")
            );
        }
        Decl::Var(_) | Decl::Return(_) | Decl::Func(_) => {}
    }
}
