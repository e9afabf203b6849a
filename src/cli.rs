//! CLI module - Command-line interface definitions and handlers

use anyhow::Result;
use clap::Parser;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::backends::discover::{SuffixFilter, WalkOptions};
use crate::core::file_reader::EncodingStrategy;
use crate::core::render::SummaryFormat;
use crate::flows::excerpt::DEFAULT_WINDOW;
use crate::flows::material::{run_list, run_material, MaterialConfig, ReportSink};
use crate::flows::report::{DEFAULT_OUTPUT, DEFAULT_TITLE};

/// codemat - excerpt a source tree into software-copyright code material.
#[derive(Parser, Debug)]
#[command(name = "codemat")]
#[command(
    author,
    version,
    about,
    long_about = r#"codemat walks a source directory, concatenates every matching file behind a
banner naming its path, and writes the first and last N lines of the result
plus statistics to a single report file.

With no flags it reads ./src, collects .ts and .tsx files (skipping .d.ts),
and writes ./软著代码材料.txt with 1500-line windows.

Examples:
    codemat
    codemat --src app --ext .js,.jsx --exclude .min.js
    codemat --window 3000 --output material.txt
    codemat --list
    codemat --stdout --quiet > material.txt
"#
)]
pub struct Cli {
    /// Working directory for banner paths and relative paths.
    #[arg(
        long,
        env = "CODEMAT_ROOT",
        default_value = ".",
        value_name = "ROOT",
        long_help = "Working directory (defaults to the current directory).\n\n\
Banner paths are shown relative to this root, and relative --src/--output paths\n\
are resolved against it."
    )]
    pub root: PathBuf,

    /// Source directory to traverse.
    #[arg(long, env = "CODEMAT_SRC", default_value = "src", value_name = "DIR")]
    pub src: PathBuf,

    /// Accepted file name suffixes (comma-separated).
    #[arg(
        long,
        env = "CODEMAT_EXT",
        value_delimiter = ',',
        default_values = [".ts", ".tsx"],
        value_name = "SUFFIXES"
    )]
    pub ext: Vec<String>,

    /// Excluded file name suffixes (comma-separated).
    #[arg(
        long,
        env = "CODEMAT_EXCLUDE",
        value_delimiter = ',',
        default_values = [".d.ts"],
        value_name = "SUFFIXES",
        long_help = "File name suffixes to exclude even when an accepted suffix matches.\n\n\
The default drops declaration-only files (.d.ts)."
    )]
    pub exclude: Vec<String>,

    /// Report file to write.
    #[arg(
        short,
        long,
        env = "CODEMAT_OUTPUT",
        default_value = DEFAULT_OUTPUT,
        value_name = "FILE",
        long_help = "Report file to write. An existing file is overwritten."
    )]
    pub output: PathBuf,

    /// Lines in each of the head and tail excerpts.
    #[arg(
        short,
        long,
        env = "CODEMAT_WINDOW",
        default_value_t = DEFAULT_WINDOW,
        value_parser = parse_window,
        value_name = "N"
    )]
    pub window: usize,

    /// Title line of the report header.
    #[arg(long, env = "CODEMAT_TITLE", default_value = DEFAULT_TITLE, value_name = "TEXT")]
    pub title: String,

    /// Honor .gitignore and .ignore files during traversal.
    #[arg(
        long,
        long_help = "Skip files excluded by .gitignore/.ignore files under the source directory.\n\n\
By default every file is visited, including hidden and ignored ones."
    )]
    pub respect_ignore: bool,

    /// Replace invalid UTF-8 instead of skipping the file.
    #[arg(long)]
    pub lossy: bool,

    /// List the files that would be included and exit.
    #[arg(long, conflicts_with_all = ["stdout", "json"])]
    pub list: bool,

    /// Write the report to stdout instead of the output file.
    #[arg(
        long,
        long_help = "Write the report to stdout instead of the output file.\n\n\
The run summary is printed to stderr in this mode."
    )]
    pub stdout: bool,

    /// Print the run summary as JSON.
    #[arg(long)]
    pub json: bool,

    /// Disable colored output.
    #[arg(long)]
    pub no_color: bool,

    /// Quiet mode (no summary, errors only).
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (debug diagnostics on stderr).
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Build the run configuration from parsed arguments
    pub fn material_config(&self) -> Result<MaterialConfig> {
        let root = self.root.canonicalize().unwrap_or_else(|_| self.root.clone());

        Ok(MaterialConfig {
            root,
            src_dir: self.src.clone(),
            filter: SuffixFilter::new(self.ext.as_slice(), self.exclude.as_slice())?,
            walk: WalkOptions {
                respect_ignore: self.respect_ignore,
            },
            encoding: if self.lossy {
                EncodingStrategy::Lossy
            } else {
                EncodingStrategy::Strict
            },
            output: self.output.clone(),
            window: self.window,
            title: self.title.clone(),
        })
    }
}

fn parse_window(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("window must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(format!("invalid window {:?}: {}", s, e)),
    }
}

/// Initialize the stderr diagnostics subscriber
///
/// `RUST_LOG` takes precedence over the verbosity flags.
pub fn init_tracing(quiet: bool, verbose: bool) {
    let level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal())
                .with_target(false),
        )
        .with(filter)
        .try_init();
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    if cli.no_color {
        colored::control::set_override(false);
    }

    let config = cli.material_config()?;

    if cli.list {
        return run_list(&config);
    }

    let sink = if cli.stdout {
        ReportSink::Stdout
    } else {
        ReportSink::File
    };
    let format = if cli.json {
        SummaryFormat::Json
    } else {
        SummaryFormat::Text
    };

    run_material(&config, sink, format, cli.quiet)
}
