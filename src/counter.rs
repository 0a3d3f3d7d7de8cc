use std::collections::BTreeMap;
use std::time::Instant;
use tracing::info;

use crate::patterns::DownloadPattern;
use crate::stats::DownloadStats;

pub const NOT_FOUND_ANNOTATION: &str = " [404 file/page not found]";

/// Characters of the captured `GET ` text kept in front of a spliced referrer.
pub const REFERRER_SPLICE_OFFSET: usize = 4;

/// Inserts `referrer` after the first [`REFERRER_SPLICE_OFFSET`] characters of `request`,
/// turning `GET /f.zip` plus `example.com` into `GET example.com/f.zip`.
pub fn splice_referrer(request: &str, referrer: &str) -> String {
    let split_at = request
        .char_indices()
        .nth(REFERRER_SPLICE_OFFSET)
        .map_or(request.len(), |(idx, _)| idx);

    let mut key = String::with_capacity(request.len() + referrer.len());
    key.push_str(&request[..split_at]);
    key.push_str(referrer);
    key.push_str(&request[split_at..]);
    key
}

/// Builds the count-table key for one download match.
pub fn match_key(request: &str, status: &str, referrer: Option<&str>) -> String {
    let mut key = match referrer {
        Some(referrer) => splice_referrer(request, referrer),
        None => request.to_string(),
    };
    if status == "404" {
        key.push_str(NOT_FOUND_ANNOTATION);
    }
    key
}

fn tally(text: &str, pattern: &DownloadPattern) -> DownloadStats {
    let mut counts: BTreeMap<String, u32> = BTreeMap::new();
    let mut total = 0u32;

    for caps in pattern.regex.captures_iter(text) {
        let (Some(request), Some(status)) = (caps.get(1), caps.get(2)) else {
            continue;
        };
        total += 1;
        let key = match_key(
            request.as_str(),
            status.as_str(),
            caps.get(3).map(|m| m.as_str()),
        );
        *counts.entry(key).or_insert(0) += 1;
    }

    DownloadStats {
        counts,
        total,
        pattern: (total > 0).then_some(pattern.kind),
    }
}

/// Counts downloads with the first pattern variant that matches at all.
///
/// Later variants are only consulted when every earlier one found nothing, so the
/// result always reflects exactly one pass.
pub fn count_downloads(text: &str, patterns: &[DownloadPattern]) -> DownloadStats {
    let start_time = Instant::now();

    for pattern in patterns {
        let stats = tally(text, pattern);
        info!(
            action = "scan",
            component = "download_counter",
            pattern = ?pattern.kind,
            matches = stats.total,
            "Download pattern pass finished"
        );
        if stats.total > 0 {
            info!(
                action = "complete",
                component = "download_counter",
                total = stats.total,
                distinct = stats.counts.len(),
                duration_ms = start_time.elapsed().as_millis(),
                "Download counting completed"
            );
            return stats;
        }
    }

    info!(
        action = "complete",
        component = "download_counter",
        duration_ms = start_time.elapsed().as_millis(),
        "No downloads matched"
    );
    DownloadStats::default()
}
