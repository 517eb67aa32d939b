//! Pleat CLI
//!
//! Re-indents or minifies markup files (HTML, XML and friends) without
//! changing how whitespace-sensitive content renders.
//!
//! Usage:
//!   pleat page.html                 Print the formatted page to stdout
//!   pleat -n page.html              Format the file in place
//!   pleat -e .min -m page.html      Write a minified copy to page.html.min
//!   pleat --dump-tree page.html     Show the parsed node tree

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use pleat_common::report::report_all;
use pleat_format::{FormatConfig, format_with_diagnostics};
use pleat_markup::{dump_tree, parse};

/// Pleat - lenient markup pretty-printer and minifier
#[derive(Parser, Debug)]
#[command(name = "pleat")]
#[command(author, version, about, long_about = None)]
#[allow(clippy::struct_excessive_bools)]
struct Cli {
    /// Input files, processed in order
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Indent text used when prettifying (default: 3 spaces)
    #[arg(short, long, value_name = "TEXT")]
    indent: Option<String>,

    /// Replace the content of the input files
    #[arg(short = 'n', long)]
    inplace: bool,

    /// Write results to new files with this extension appended
    #[arg(short, long, value_name = "EXT")]
    ext: Option<String>,

    /// Minify instead of prettify
    #[arg(short, long)]
    minify: bool,

    /// Strip markup comments from the result
    #[arg(long)]
    no_comments: bool,

    /// Put each attribute on its own line
    #[arg(long, alias = "indent-attrib")]
    indent_attributes: bool,

    /// Also print the result when writing files
    #[arg(short, long)]
    print: bool,

    /// Keep going after a file cannot be read or written
    #[arg(short, long)]
    keep_going: bool,

    /// JSON format configuration; command-line flags take precedence
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the parsed node tree instead of formatting
    #[arg(long)]
    dump_tree: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Load the configuration file (if any) and apply command-line overrides.
    fn format_config(&self) -> Result<FormatConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let json = fs::read_to_string(path)
                    .with_context(|| format!("failed to read config {}", path.display()))?;
                FormatConfig::from_json(&json)
                    .with_context(|| format!("failed to load config {}", path.display()))?
            }
            None => FormatConfig::default(),
        };
        if let Some(indent) = &self.indent {
            config.indent_unit.clone_from(indent);
        }
        config.minify |= self.minify;
        config.indent_attributes |= self.indent_attributes;
        config.include_comments &= !self.no_comments;
        Ok(config)
    }

    /// The extension to append to output files, with a leading `.`; empty
    /// for in-place formatting.
    fn extension(&self) -> Option<String> {
        match &self.ext {
            Some(ext) if ext.starts_with('.') => Some(ext.clone()),
            Some(ext) => Some(format!(".{ext}")),
            None if self.inplace => Some(String::new()),
            None => None,
        }
    }
}

/// `path` with `extension` appended to the whole file name.
fn output_path(path: &Path, extension: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(extension);
    PathBuf::from(name)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = match cli.format_config() {
        Ok(config) => config,
        Err(e) => {
            error!("{e:?}");
            return ExitCode::from(2);
        }
    };

    if run(&cli, &config) {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}

/// Process every file in order. Returns false if any file failed.
fn run(cli: &Cli, config: &FormatConfig) -> bool {
    let extension = cli.extension();
    let mut ok = true;
    for path in &cli.files {
        if let Err(e) = process_file(cli, config, path, extension.as_deref()) {
            error!("{e:?}");
            ok = false;
            if !cli.keep_going {
                break;
            }
        }
    }
    ok
}

fn process_file(
    cli: &Cli,
    config: &FormatConfig,
    path: &Path,
    extension: Option<&str>,
) -> Result<()> {
    debug!(path = %path.display(), "processing");
    let markup =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let origin = path.display().to_string();

    if cli.dump_tree {
        let output = parse(&markup);
        let _ = report_all(&origin, &output.diagnostics);
        print!("{}", dump_tree(&output.tree));
        return Ok(());
    }

    let (mut formatted, diagnostics) = format_with_diagnostics(&markup, config);
    let errors = report_all(&origin, &diagnostics);
    if errors > 0 {
        info!(path = %origin, errors, "formatted with errors");
    }
    if !config.minify {
        formatted.push('\n');
    }

    match extension {
        Some(extension) => {
            let target = output_path(path, extension);
            fs::write(&target, &formatted)
                .with_context(|| format!("failed to write {}", target.display()))?;
            debug!(path = %target.display(), "written");
            if cli.print {
                print!("{formatted}");
            }
        }
        None => print!("{formatted}"),
    }
    Ok(())
}
