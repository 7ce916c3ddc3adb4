//! WCC Compiler Driver
//!
//! Command-line entry point. `compile` runs the full pipeline and writes
//! WAT, or a JSON dump of an earlier stage; `check` stops after validation.
//! Set `RUST_LOG=debug` to trace the stages.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};
use wcc_common::CompilerError;
use wcc_frontend::Frontend;

#[derive(Parser)]
#[command(name = "wcc")]
#[command(about = "Compiles a small typed imperative language to WebAssembly text")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a source file
    Compile {
        /// Input source file
        input: PathBuf,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// What to emit
        #[arg(long, value_enum, default_value_t = Emit::Wat)]
        emit: Emit,
    },

    /// Lex, parse and validate a source file without generating code
    Check {
        /// Input source file
        input: PathBuf,
    },
}

/// Pipeline stage to stop at
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Emit {
    Tokens,
    Ast,
    TypedAst,
    Wat,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Compile { input, output, emit } => compile_file(&input, output.as_deref(), emit),
        Commands::Check { input } => check_file(&input),
    };

    if let Err(e) = result {
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}

fn compile_file(input: &Path, output: Option<&Path>, emit: Emit) -> Result<()> {
    let source = read_source(input)?;
    let text = emit_stage(&source, emit).map_err(|err| diagnostic(&err, &source, input))?;

    match output {
        Some(path) => {
            fs::write(path, &text).with_context(|| format!("failed to write {}", path.display()))?;
            info!("wrote {}", path.display());
        }
        None => print!("{text}"),
    }
    Ok(())
}

fn check_file(input: &Path) -> Result<()> {
    let source = read_source(input)?;
    let module = Frontend::validate_source(&source).map_err(|err| diagnostic(&err, &source, input))?;
    println!(
        "{}: ok ({} functions, {} memories)",
        input.display(),
        module.funcs.len(),
        module.memories.len()
    );
    Ok(())
}

fn read_source(input: &Path) -> Result<String> {
    fs::read_to_string(input).with_context(|| format!("failed to read {}", input.display()))
}

/// Run the pipeline up to `emit` and render that stage's output
fn emit_stage(source: &str, emit: Emit) -> Result<String, CompilerError> {
    let json = |result: serde_json::Result<String>| {
        result
            .map(|mut text| {
                text.push('\n');
                text
            })
            .map_err(|err| CompilerError::internal_error(format!("JSON serialization failed: {err}")))
    };

    match emit {
        Emit::Tokens => json(serde_json::to_string_pretty(&Frontend::tokenize_source(source)?)),
        Emit::Ast => json(serde_json::to_string_pretty(&Frontend::parse_source(source)?)),
        Emit::TypedAst => json(serde_json::to_string_pretty(&Frontend::validate_source(source)?)),
        Emit::Wat => wcc_codegen::compile(source),
    }
}

fn diagnostic(err: &CompilerError, source: &str, input: &Path) -> anyhow::Error {
    anyhow!(err.render(source, &input.display().to_string()))
}
