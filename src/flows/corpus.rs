//! Corpus building flow - Concatenate discovered files behind banners
//!
//! Each readable file contributes a banner block, its lines, and two blank
//! separator lines. An unreadable file contributes nothing.

use tracing::warn;

use crate::core::file_reader::{read_lines, EncodingStrategy};
use crate::core::model::{CodematError, DiscoveredFile, SkippedFile};

/// Separator line framing every file banner
pub const BANNER_RULE: &str = "// ============================================";

/// Concatenated lines of every readable discovered file
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    pub lines: Vec<String>,
    /// Files found by discovery, whether or not they were read
    pub discovered_files: usize,
    pub skipped: Vec<SkippedFile>,
}

impl Corpus {
    /// Files whose content is part of the corpus
    pub fn read_files(&self) -> usize {
        self.discovered_files - self.skipped.len()
    }
}

/// Banner block preceding a file's content
pub fn banner(display: &str) -> [String; 4] {
    [
        BANNER_RULE.to_string(),
        format!("// 文件: {}", display),
        BANNER_RULE.to_string(),
        String::new(),
    ]
}

/// Build the corpus from files in the given (already sorted) order
pub fn build_corpus(files: &[DiscoveredFile], encoding: EncodingStrategy) -> Corpus {
    let mut corpus = Corpus {
        discovered_files: files.len(),
        ..Default::default()
    };

    for file in files {
        match read_lines(&file.path, encoding) {
            Ok(content) => append_file(&mut corpus.lines, &file.display, content),
            Err(err) => {
                warn!(path = %file.display, error = %err, "skipping unreadable file");
                corpus.skipped.push(SkippedFile {
                    path: file.display.clone(),
                    reason: skip_reason(&err),
                });
            }
        }
    }

    corpus
}

fn append_file(lines: &mut Vec<String>, display: &str, content: Vec<String>) {
    lines.extend(banner(display));
    lines.extend(content);
    lines.push(String::new());
    lines.push(String::new());
}

fn skip_reason(err: &CodematError) -> String {
    match err {
        CodematError::FileRead { source, .. } => source.to_string(),
        other => other.to_string(),
    }
}
