use std::{fs, path::PathBuf};

use clap::Parser;
use miette::{IntoDiagnostic, Result};
use protolite::{Compiler, UnknownContent};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Args {
    /// The source file(s) to parse.
    #[arg(value_name = "PROTO_FILES", required = true)]
    files: Vec<String>,
    /// The directory in which to search for source files.
    #[arg(
        short = 'I',
        long = "include",
        visible_alias = "proto_path",
        value_name = "PATH",
        default_value = "."
    )]
    include: PathBuf,
    /// The output path to write a file descriptor set to.
    #[arg(
        short = 'o',
        long = "output",
        visible_alias = "descriptor_set_out",
        value_name = "PATH"
    )]
    output: Option<PathBuf>,
    /// If set, unrecognized content inside message bodies is an error instead of being skipped.
    #[arg(long)]
    strict: bool,
}

pub fn main() -> Result<()> {
    miette::set_panic_hook();
    init_logging();

    let args = Args::parse();
    let mut compiler = Compiler::new(&args.include);
    if args.strict {
        compiler.unknown_content(UnknownContent::Reject);
    }
    for file in &args.files {
        compiler.add_file(file)?;
    }
    if let Some(output) = args.output {
        fs::write(output, compiler.encode_file_descriptor_set()).into_diagnostic()?;
    }
    Ok(())
}

/// Logs to stderr, filtered by `RUST_LOG` and defaulting to warnings only.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
