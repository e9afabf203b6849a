//! Renderer module
//!
//! Renders the run summary for the console: a human-readable text block or a
//! single JSON object.

use colored::Colorize;

use crate::core::model::MaterialSummary;

/// Summary output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SummaryFormat {
    #[default]
    Text,
    Json,
}

/// Render a run summary in the requested format
pub fn render_summary(
    summary: &MaterialSummary,
    format: SummaryFormat,
) -> serde_json::Result<String> {
    match format {
        SummaryFormat::Text => Ok(render_text(summary)),
        SummaryFormat::Json => serde_json::to_string(summary),
    }
}

fn render_text(summary: &MaterialSummary) -> String {
    let window = summary.window;
    let stats = &summary.stats;
    let mut lines = vec![format!("{}", "代码提取完成！".green().bold())];

    if let Some(output) = &summary.output {
        lines.push(format!("输出文件: {}", output.cyan()));
    }
    lines.push(format!("总行数: {}", stats.total_lines));
    lines.push(format!("首{}行: {}", window, stats.head_lines));
    lines.push(format!("尾{}行: {}", window, stats.tail_lines));
    lines.push(format!("文件总数: {}", stats.file_count));

    if !summary.skipped_files.is_empty() {
        lines.push(format!(
            "{}",
            format!("跳过文件: {}", summary.skipped_files.len()).yellow()
        ));
        for skipped in &summary.skipped_files {
            lines.push(format!("  - {} ({})", skipped.path, skipped.reason));
        }
    }
    lines.push(format!("摘要(xxh3): {}", summary.digest.dimmed()));

    lines.join("\n")
}
