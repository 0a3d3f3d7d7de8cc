use std::time::Instant;
use tracing::{info, warn};

use crate::patterns::LogPatterns;
use crate::stats::{Timestamp, TimestampRange};
use crate::timestamp::TimestampFormat;

/// Running min/max that only moves on strict improvement, so the first of equal
/// extremes is kept.
#[derive(Debug, Default, Clone, Copy)]
struct Extremes {
    min: Option<Timestamp>,
    max: Option<Timestamp>,
}

impl Extremes {
    fn observe(&mut self, ts: Timestamp) {
        if self.min.map_or(true, |min| ts < min) {
            self.min = Some(ts);
        }
        if self.max.map_or(true, |max| ts > max) {
            self.max = Some(ts);
        }
    }
}

/// Computes the global and download-restricted timestamp ranges.
///
/// Returns an empty range when no format was detected.
pub fn scan_timestamp_range(
    text: &str,
    patterns: &LogPatterns,
    format: Option<TimestampFormat>,
) -> TimestampRange {
    let Some(format) = format else {
        return TimestampRange::default();
    };
    let start_time = Instant::now();

    // Brackets also appear for non-timestamp reasons; those are skipped.
    let mut global = Extremes::default();
    for caps in patterns.bracketed.captures_iter(text) {
        if let Some(ts) = caps.get(1).and_then(|m| format.parse(m.as_str())) {
            global.observe(ts);
        }
    }

    let mut downloads = Extremes::default();
    let mut unparsed = 0usize;
    for found in patterns.timed_download.find_iter(text) {
        let token = patterns
            .bracketed
            .captures(found.as_str())
            .and_then(|caps| caps.get(1))
            .map_or("", |m| m.as_str());

        match format.parse(token) {
            Some(ts) => downloads.observe(ts),
            None => {
                unparsed += 1;
                warn!(
                    action = "parse",
                    component = "download_timestamp",
                    token = token,
                    format = ?format,
                    "Timestamp of matched download line could not be parsed"
                );
            }
        }
    }

    info!(
        action = "complete",
        component = "timestamp_range",
        unparsed_download_timestamps = unparsed,
        duration_ms = start_time.elapsed().as_millis(),
        "Timestamp range scan completed"
    );

    TimestampRange {
        global_min: global.min,
        global_max: global.max,
        first_match: downloads.min,
        last_match: downloads.max,
    }
}
