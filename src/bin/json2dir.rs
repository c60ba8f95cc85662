//! CLI entry point for json2dir: materializes a project document as files

use std::error::Error;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use dirjson::cli::{ColorMode, LogLevel, setup_tracing, should_use_color};
use dirjson::{ConsoleProgress, ProjectDocument, TreeWriter, WriterConfig};
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "json2dir")]
#[command(about = "Create files and directories from a {\"project_files\": [...]} document")]
#[command(version)]
struct Args {
    /// JSON document to read
    input: PathBuf,

    /// Directory to create the files in (default: generated-project)
    output: Option<PathBuf>,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,

    /// Diagnostics written to stderr
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "warn")]
    log_level: LogLevel,
}

fn main() {
    let args = Args::parse();
    setup_tracing(args.log_level);
    debug!(?args, "parsed arguments");

    let mut config = WriterConfig::default();
    if let Some(output) = args.output.clone() {
        config.output_dir = output;
    }

    let document = match ProjectDocument::from_path(&args.input, &config) {
        Ok(doc) => doc,
        Err(e) => fail(&e),
    };

    let mut progress = ConsoleProgress::stdout(should_use_color(args.color));
    if let Err(e) = TreeWriter::new(config).write(&document, &mut progress) {
        fail(&e);
    }
}

/// Print an error with its immediate cause and exit.
fn fail(e: &dyn Error) -> ! {
    match e.source() {
        Some(cause) => eprintln!("json2dir: {}: {}", e, cause),
        None => eprintln!("json2dir: {}", e),
    }
    process::exit(1);
}
