//! Report writing - serialize the excerpt and statistics
//!
//! Layout: header block, head excerpt, tail excerpt, statistics. Lines are
//! joined with `\n` and the report carries no trailing newline.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::core::model::{CodematError, ReportStats};
use crate::flows::excerpt::Excerpt;

/// Default report title
pub const DEFAULT_TITLE: &str = "软著程序鉴别材料 V1.0";

/// Default output file name
pub const DEFAULT_OUTPUT: &str = "软著代码材料.txt";

const RULE_WIDTH: usize = 50;

/// Compute the statistics block for an excerpt
pub fn report_stats(excerpt: &Excerpt<'_>, total_lines: usize, file_count: usize) -> ReportStats {
    ReportStats {
        total_lines,
        head_lines: excerpt.head.len(),
        tail_lines: excerpt.tail.len(),
        file_count,
    }
}

/// Render the full report text
pub fn render_report(
    title: &str,
    window: usize,
    excerpt: &Excerpt<'_>,
    stats: &ReportStats,
) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out: Vec<&str> = Vec::with_capacity(excerpt.head.len() + excerpt.tail.len() + 24);

    let head_title = format!("源代码首{}行", window);
    let tail_title = format!("源代码尾{}行", window);
    let stat_lines = [
        format!("总代码行数: {}", stats.total_lines),
        format!("首{}行行数: {}", window, stats.head_lines),
        format!("尾{}行行数: {}", window, stats.tail_lines),
        format!("文件总数: {}", stats.file_count),
    ];

    out.extend([rule.as_str(), title, head_title.as_str(), rule.as_str(), ""]);
    out.extend(excerpt.head.iter().map(String::as_str));
    out.extend(["", ""]);

    out.extend([rule.as_str(), tail_title.as_str(), rule.as_str(), ""]);
    out.extend(excerpt.tail.iter().map(String::as_str));
    out.extend(["", ""]);

    out.extend([rule.as_str(), "统计信息", rule.as_str()]);
    out.extend(stat_lines.iter().map(String::as_str));

    out.join("\n")
}

/// Write the report to `path`, replacing any existing file
pub fn write_report(path: &Path, report: &str) -> Result<(), CodematError> {
    let write_error = |source: std::io::Error| CodematError::OutputWrite {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(write_error)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(report.as_bytes()).map_err(write_error)?;
    writer.flush().map_err(write_error)?;
    Ok(())
}
