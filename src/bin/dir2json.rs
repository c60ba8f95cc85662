//! CLI entry point for dir2json: prints a directory tree as JSON

use std::path::PathBuf;
use std::process;

use clap::Parser;
use dirjson::cli::{LogLevel, setup_tracing};
use dirjson::{ReaderConfig, TreeNode, TreeReader, print_json, save_json};
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "dir2json")]
#[command(about = "Print a directory tree, file contents included, as JSON")]
#[command(version)]
struct Args {
    /// Directory to read
    path: PathBuf,

    /// Where to save the JSON (default: project-structure.json next to this executable)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    output: Option<PathBuf>,

    /// Only print to stdout, do not save a file
    #[arg(long = "no-save", conflicts_with = "output")]
    no_save: bool,

    /// Ignore entries matching pattern (can be used multiple times)
    #[arg(short = 'I', long = "ignore")]
    ignore: Vec<String>,

    /// Follow symbolic links (cycles are reported, not descended into)
    #[arg(long = "follow-symlinks")]
    follow_symlinks: bool,

    /// Diagnostics written to stderr
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "warn")]
    log_level: LogLevel,
}

fn main() {
    let args = Args::parse();
    setup_tracing(args.log_level);
    debug!(?args, "parsed arguments");

    let config = ReaderConfig {
        follow_symlinks: args.follow_symlinks,
        ignore_patterns: args.ignore.clone(),
        ..Default::default()
    };
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| config.structure_file_path());

    let tree = TreeReader::new(config).read(&args.path);
    if let TreeNode::Unreadable(reason) = &tree {
        eprintln!("dir2json: cannot read '{}': {}", args.path.display(), reason);
        process::exit(1);
    }

    if !args.no_save {
        if let Err(e) = save_json(&tree, &output) {
            eprintln!("dir2json: cannot write '{}': {}", output.display(), e);
            process::exit(1);
        }
        debug!(path = %output.display(), "saved structure");
    }

    if let Err(e) = print_json(&tree) {
        eprintln!("dir2json: error writing output: {}", e);
        process::exit(1);
    }
}
