//! Code material flow - discover, build, excerpt, report
//!
//! Ties the pipeline stages together and decides where the report and the
//! console summary go.

use anyhow::Result;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

use crate::backends::discover::{discover_files, SuffixFilter, WalkOptions};
use crate::core::file_reader::EncodingStrategy;
use crate::core::model::{DiscoveredFile, MaterialSummary};
use crate::core::paths::{display_path, resolve};
use crate::core::render::{render_summary, SummaryFormat};
use crate::core::util::hash_bytes;
use crate::flows::corpus::build_corpus;
use crate::flows::excerpt::{select_excerpt, DEFAULT_WINDOW};
use crate::flows::report::{
    render_report, report_stats, write_report, DEFAULT_OUTPUT, DEFAULT_TITLE,
};

/// Where the rendered report goes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportSink {
    /// The configured output file
    #[default]
    File,
    /// Standard output (the summary moves to stderr)
    Stdout,
}

/// Everything a run needs to know
#[derive(Debug, Clone)]
pub struct MaterialConfig {
    /// Working directory: banner paths are relative to it, relative paths resolve against it
    pub root: PathBuf,
    /// Directory to traverse
    pub src_dir: PathBuf,
    pub filter: SuffixFilter,
    pub walk: WalkOptions,
    pub encoding: EncodingStrategy,
    pub output: PathBuf,
    pub window: usize,
    pub title: String,
}

impl Default for MaterialConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            src_dir: PathBuf::from("src"),
            filter: SuffixFilter::default(),
            walk: WalkOptions::default(),
            encoding: EncodingStrategy::default(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            window: DEFAULT_WINDOW,
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

impl MaterialConfig {
    pub fn src_path(&self) -> PathBuf {
        resolve(&self.root, &self.src_dir)
    }

    pub fn output_path(&self) -> PathBuf {
        resolve(&self.root, &self.output)
    }
}

/// A rendered report and its summary
#[derive(Debug, Clone)]
pub struct Material {
    pub report: String,
    pub summary: MaterialSummary,
}

/// Discover the configured source files
pub fn discover(config: &MaterialConfig) -> Result<Vec<DiscoveredFile>> {
    let files = discover_files(&config.root, &config.src_path(), &config.filter, config.walk)?;
    Ok(files)
}

/// Run the pipeline up to the rendered report, without writing anything
pub fn generate(config: &MaterialConfig) -> Result<Material> {
    let files = discover(config)?;
    info!(files = files.len(), "discovered source files");

    let corpus = build_corpus(&files, config.encoding);
    let excerpt = select_excerpt(&corpus.lines, config.window);
    let stats = report_stats(&excerpt, corpus.lines.len(), corpus.discovered_files);
    let report = render_report(&config.title, config.window, &excerpt, &stats);

    let summary = MaterialSummary {
        output: None,
        window: config.window,
        stats,
        read_files: corpus.read_files(),
        skipped_files: corpus.skipped,
        digest: hash_bytes(report.as_bytes()),
    };

    Ok(Material { report, summary })
}

/// Generate the report, deliver it to `sink`, and print the summary
pub fn run_material(
    config: &MaterialConfig,
    sink: ReportSink,
    format: SummaryFormat,
    quiet: bool,
) -> Result<()> {
    let mut material = generate(config)?;

    match sink {
        ReportSink::File => {
            let output = config.output_path();
            write_report(&output, &material.report)?;
            material.summary.output = Some(display_path(&output, &config.root));
            info!(output = %output.display(), "report written");
        }
        ReportSink::Stdout => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(material.report.as_bytes())?;
            stdout.flush()?;
        }
    }

    if !quiet {
        let rendered = render_summary(&material.summary, format)?;
        match sink {
            ReportSink::File => println!("{}", rendered),
            ReportSink::Stdout => eprintln!("{}", rendered),
        }
    }

    Ok(())
}

/// Print the discovered files, one display path per line
pub fn run_list(config: &MaterialConfig) -> Result<()> {
    let files = discover(config)?;
    for file in &files {
        println!("{}", file.display);
    }
    Ok(())
}
