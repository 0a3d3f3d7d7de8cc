use anyhow::{Context, Result};
use regex::Regex;
use std::time::Instant;
use tracing::info;

use crate::extensions::ExtensionSet;

/// Which download pattern variant produced a count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    /// Requires the quoted token after the byte count (domain-logging variant).
    Primary,
    /// Plain `"<status> <bytes>` tail.
    Fallback,
}

#[derive(Debug, Clone)]
pub struct DownloadPattern {
    pub kind: PatternKind,
    pub regex: Regex,
}

/// Every regex one analysis run needs, compiled once from the extension set.
#[derive(Debug, Clone)]
pub struct LogPatterns {
    /// Tried in order until one yields at least one match.
    pub downloads: Vec<DownloadPattern>,
    /// Any `[...]` token, contents in group 1.
    pub bracketed: Regex,
    /// A bracketed token directly followed by a tracked GET request line.
    pub timed_download: Regex,
}

impl LogPatterns {
    pub fn compile(extensions: &ExtensionSet) -> Result<Self> {
        let start_time = Instant::now();
        let alternation = extensions.alternation();

        // Captures: 1 = `GET ...ext`, 2 = status, 3 = token after the byte count.
        // The token is bounded by spaces or tabs so a match never spans into the next line.
        let primary = format!(
            r#"(GET\s.*?\.(?i:{alternation}))\s.+?"\s(\d+)\s\d+[ \t](.+?)[ \t]""#
        );
        let fallback = format!(r#"(GET\s.*?\.(?i:{alternation}))\s.+?"\s(\d+)\s\d+"#);
        let timed_download =
            format!(r#"\[.+?\]\s"GET\s.*?\.(?i:{alternation})\s.+?"\s\d+\s\d+"#);

        let patterns = Self {
            downloads: vec![
                DownloadPattern {
                    kind: PatternKind::Primary,
                    regex: Regex::new(&primary).context("Failed to compile primary download pattern")?,
                },
                DownloadPattern {
                    kind: PatternKind::Fallback,
                    regex: Regex::new(&fallback)
                        .context("Failed to compile fallback download pattern")?,
                },
            ],
            bracketed: Regex::new(r"\[(.+?)\]").context("Failed to compile bracket pattern")?,
            timed_download: Regex::new(&timed_download)
                .context("Failed to compile timed download pattern")?,
        };

        info!(
            action = "complete",
            component = "pattern_compile",
            extensions = %extensions,
            duration_ms = start_time.elapsed().as_millis(),
            "Compiled log patterns"
        );
        Ok(patterns)
    }
}
