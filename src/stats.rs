use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::extensions::ExtensionSet;
use crate::patterns::PatternKind;
use crate::timestamp::TimestampFormat;

pub type Timestamp = DateTime<FixedOffset>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DownloadStats {
    /// Match key to occurrence count, ascending by key.
    pub counts: BTreeMap<String, u32>,
    /// Sum of all increments in the pass that was used.
    pub total: u32,
    /// Pattern variant that produced the counts, `None` when nothing matched.
    pub pattern: Option<PatternKind>,
}

impl DownloadStats {
    /// Entries by descending count, ties broken by ascending key.
    pub fn by_count(&self) -> Vec<(&str, u32)> {
        let mut sorted: Vec<(&str, u32)> = self
            .counts
            .iter()
            .map(|(key, count)| (key.as_str(), *count))
            .collect();
        sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        sorted
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TimestampRange {
    pub global_min: Option<Timestamp>,
    pub global_max: Option<Timestamp>,
    pub first_match: Option<Timestamp>,
    pub last_match: Option<Timestamp>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub extensions: ExtensionSet,
    pub downloads: DownloadStats,
    pub format: Option<TimestampFormat>,
    pub format_index: i32,
    pub range: TimestampRange,
}

impl AnalysisResult {
    pub fn format_timestamp(&self, timestamp: &Timestamp) -> String {
        match self.format {
            Some(format) => format.format(timestamp),
            None => timestamp.to_rfc3339(),
        }
    }
}
