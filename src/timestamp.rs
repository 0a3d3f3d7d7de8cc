//! Timestamp formats a log may use and detection of the one in effect.
//!
//! A log is assumed to use a single format throughout. The format is chosen by
//! trial-parsing the first bracketed token of the text against the candidates in
//! [`CANDIDATE_FORMATS`] order; the first one that parses wins and is reused for
//! every later parse in the same run.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use regex::Regex;
use serde::Serialize;
use tracing::info;

use crate::stats::Timestamp;

const CLF_PARSE: &str = "%d/%b/%Y:%H:%M:%S %z";
const CLF_DISPLAY: &str = "%-d/%b/%Y:%H:%M:%S %z";
const ISO_LOCAL: &str = "%Y-%m-%dT%H:%M:%S%.f";
const ISO_OFFSET: &str = "%Y-%m-%dT%H:%M:%S%.f%:z";
const RFC_1123_DISPLAY: &str = "%a, %-d %b %Y %H:%M:%S %z";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampFormat {
    /// `10/Oct/2000:13:55:36 -0700`
    Clf,
    /// `2000-10-10T13:55:36-07:00`
    IsoDateTime,
    /// `2000-10-10T20:55:36Z`
    IsoInstant,
    /// `2000-10-10T20:55:36`, read as UTC
    IsoLocalDateTime,
    /// `2000-10-10T13:55:36.250-07:00`
    IsoOffsetDateTime,
    /// `2000-10-10T13:55:36-07:00[America/Denver]`
    IsoZonedDateTime,
    /// `Tue, 10 Oct 2000 20:55:36 GMT`
    Rfc1123,
}

/// Priority order for detection. CLF comes first; several ISO layouts overlap.
pub const CANDIDATE_FORMATS: [TimestampFormat; 7] = [
    TimestampFormat::Clf,
    TimestampFormat::IsoDateTime,
    TimestampFormat::IsoInstant,
    TimestampFormat::IsoLocalDateTime,
    TimestampFormat::IsoOffsetDateTime,
    TimestampFormat::IsoZonedDateTime,
    TimestampFormat::Rfc1123,
];

impl TimestampFormat {
    pub fn index(self) -> usize {
        CANDIDATE_FORMATS
            .iter()
            .position(|f| *f == self)
            .unwrap_or_default()
    }

    pub fn parse(self, s: &str) -> Option<Timestamp> {
        let s = s.trim();
        match self {
            Self::Clf => DateTime::parse_from_str(s, CLF_PARSE).ok(),
            Self::IsoDateTime => DateTime::parse_from_rfc3339(s).ok(),
            Self::IsoInstant => {
                let local = s.strip_suffix(|c: char| c == 'Z' || c == 'z')?;
                parse_as_utc(local)
            }
            Self::IsoLocalDateTime => parse_as_utc(s),
            Self::IsoOffsetDateTime => DateTime::parse_from_str(s, ISO_OFFSET).ok(),
            Self::IsoZonedDateTime => {
                // The zone id only names the region; the offset already fixes the instant.
                let base = s.split_once('[').map_or(s, |(base, _)| base);
                DateTime::parse_from_str(base, ISO_OFFSET).ok()
            }
            Self::Rfc1123 => DateTime::parse_from_rfc2822(s).ok(),
        }
    }

    pub fn format(self, timestamp: &Timestamp) -> String {
        match self {
            Self::Clf => timestamp.format(CLF_DISPLAY).to_string(),
            Self::IsoDateTime | Self::IsoZonedDateTime => {
                timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true)
            }
            Self::IsoInstant => timestamp
                .with_timezone(&Utc)
                .to_rfc3339_opts(SecondsFormat::AutoSi, true),
            Self::IsoLocalDateTime => timestamp.naive_local().format(ISO_LOCAL).to_string(),
            Self::IsoOffsetDateTime => timestamp.format(ISO_OFFSET).to_string(),
            Self::Rfc1123 => timestamp.format(RFC_1123_DISPLAY).to_string(),
        }
    }
}

fn parse_as_utc(s: &str) -> Option<Timestamp> {
    let naive = NaiveDateTime::parse_from_str(s, ISO_LOCAL).ok()?;
    Some(naive.and_utc().fixed_offset())
}

/// First candidate format that parses `token`.
pub fn first_parsing_format(token: &str) -> Option<TimestampFormat> {
    CANDIDATE_FORMATS
        .iter()
        .copied()
        .find(|format| format.parse(token).is_some())
}

/// Detects the log's timestamp format from its first bracketed token only.
///
/// Later brackets are never consulted, even if the probe token is not a timestamp.
pub fn detect_format(text: &str, bracketed: &Regex) -> Option<TimestampFormat> {
    let Some(caps) = bracketed.captures(text) else {
        info!(
            action = "detect",
            component = "timestamp_format",
            "No bracketed token found"
        );
        return None;
    };
    let probe = caps.get(1).map_or("", |m| m.as_str());

    let format = first_parsing_format(probe);
    info!(
        action = "detect",
        component = "timestamp_format",
        probe = probe,
        format = ?format,
        index = format.map(TimestampFormat::index),
        "Timestamp format detection finished"
    );
    format
}
