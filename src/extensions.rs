use serde::Serialize;
use std::fmt;

pub const DEFAULT_EXTENSIONS: [&str; 2] = ["zip", "exe"];

/// Ordered, deduplicated set of lowercase file extensions to count downloads for.
///
/// Never empty: building from no usable entries yields [`DEFAULT_EXTENSIONS`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ExtensionSet {
    extensions: Vec<String>,
}

impl ExtensionSet {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut extensions: Vec<String> = Vec::new();
        for entry in entries {
            let ext = entry.as_ref().trim().trim_start_matches('.').to_lowercase();
            if !ext.is_empty() && !extensions.contains(&ext) {
                extensions.push(ext);
            }
        }

        if extensions.is_empty() {
            return Self::default();
        }
        Self { extensions }
    }

    /// One extension per line, blank lines ignored.
    pub fn parse(content: &str) -> Self {
        Self::new(content.lines())
    }

    pub fn is_default(&self) -> bool {
        self.extensions == DEFAULT_EXTENSIONS
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.extensions.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    /// Regex alternation of the escaped extensions, e.g. `zip|exe`.
    pub fn alternation(&self) -> String {
        self.extensions
            .iter()
            .map(|ext| regex::escape(ext))
            .collect::<Vec<_>>()
            .join("|")
    }

    /// Whether `path` ends with `.<ext>` for one of the extensions, ignoring case.
    pub fn matches_path(&self, path: &str) -> bool {
        let path = path.to_lowercase();
        self.extensions
            .iter()
            .any(|ext| path.ends_with(&format!(".{ext}")))
    }
}

impl Default for ExtensionSet {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl fmt::Display for ExtensionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.extensions.join("|"))
    }
}
