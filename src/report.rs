use anyhow::Result;
use std::io::{self, Write};

use crate::stats::AnalysisResult;
use crate::utils::format_number;
use crate::Args;

pub fn write_report<W: Write>(
    result: &AnalysisResult,
    top: Option<usize>,
    out: &mut W,
) -> io::Result<()> {
    writeln!(out, "Total downloads: {}", format_number(result.downloads.total))?;

    let range = &result.range;
    if let (Some(min), Some(max)) = (range.global_min, range.global_max) {
        writeln!(out)?;
        writeln!(out, "Date format with index {} used.", result.format_index)?;

        write!(out, "From: {}", result.format_timestamp(&min))?;
        if let Some(first) = range.first_match {
            write!(out, ". First download: {}", result.format_timestamp(&first))?;
        }
        writeln!(out)?;

        if min != max {
            write!(out, "To: {}", result.format_timestamp(&max))?;
            if let Some(last) = range.last_match {
                write!(out, ". Last download: {}", result.format_timestamp(&last))?;
            }
            writeln!(out)?;
        }
        writeln!(out)?;
    }

    for (key, count) in &result.downloads.counts {
        writeln!(out, "{} => {}", key, format_number(*count))?;
    }

    if let Some(top_count) = top {
        let sorted = result.downloads.by_count();
        writeln!(
            out,
            "\nTop {} downloads:",
            std::cmp::min(top_count, sorted.len())
        )?;
        for (key, count) in sorted.iter().take(top_count) {
            writeln!(out, "- {}: {}", key, format_number(*count))?;
        }
    }

    Ok(())
}

pub fn print_analysis_results(result: &AnalysisResult, args: &Args) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.json {
        serde_json::to_writer_pretty(&mut out, result)?;
        writeln!(out)?;
    } else {
        write_report(result, args.top, &mut out)?;
    }
    Ok(())
}
