use anyhow::Result;
use std::time::Instant;
use tracing::info;

use crate::counter::count_downloads;
use crate::extensions::ExtensionSet;
use crate::loader;
use crate::patterns::LogPatterns;
use crate::range::scan_timestamp_range;
use crate::stats::AnalysisResult;
use crate::timestamp::{detect_format, TimestampFormat};
use crate::Args;

/// Analyzes one log's full text.
///
/// Deterministic in its inputs; counts and timestamps come from independent
/// passes over the same text.
pub fn analyze(text: &str, extensions: &ExtensionSet) -> Result<AnalysisResult> {
    let patterns = LogPatterns::compile(extensions)?;

    let downloads = count_downloads(text, &patterns.downloads);
    let format = detect_format(text, &patterns.bracketed);
    let range = scan_timestamp_range(text, &patterns, format);

    Ok(AnalysisResult {
        extensions: extensions.clone(),
        downloads,
        format,
        format_index: format.map_or(-1, |f| TimestampFormat::index(f) as i32),
        range,
    })
}

pub fn analyze_log_file(args: &Args) -> Result<AnalysisResult> {
    let total_start_time = Instant::now();
    info!(
        action = "start",
        component = "analysis",
        log_file = ?args.log_file,
        "Starting log analysis"
    );

    let text = loader::load_log_text(&args.log_file)?;
    let extensions = loader::load_extensions(&args.endings)?;
    let result = analyze(&text, &extensions)?;

    info!(
        action = "complete",
        component = "analysis",
        total_downloads = result.downloads.total,
        distinct_files = result.downloads.counts.len(),
        duration_ms = total_start_time.elapsed().as_millis(),
        "Analysis completed successfully"
    );
    Ok(result)
}
