use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use std::time::Instant;
use tracing::info;

use crate::extensions::{ExtensionSet, DEFAULT_EXTENSIONS};

const UTF8_BOM: char = '\u{feff}';

/// Decodes raw log bytes, tolerating invalid UTF-8 and dropping a leading BOM.
pub fn decode_log_bytes(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    match text.strip_prefix(UTF8_BOM) {
        Some(rest) => rest.to_string(),
        None => text.into_owned(),
    }
}

pub fn load_log_text(path: &Path) -> Result<String> {
    let start_time = Instant::now();
    if !path.exists() {
        anyhow::bail!("Log file not found: {:?}", path);
    }

    let bytes = fs::read(path).with_context(|| format!("Failed to read log file {:?}", path))?;
    let text = decode_log_bytes(&bytes);

    info!(
        action = "load",
        component = "log_file",
        file_path = ?path,
        bytes = bytes.len(),
        duration_ms = start_time.elapsed().as_millis(),
        "Loaded log file"
    );
    Ok(text)
}

/// Reads one extension per line; a missing or blank file yields the defaults.
pub fn load_extensions(path: &Path) -> Result<ExtensionSet> {
    if !path.exists() {
        info!(
            action = "load",
            component = "endings_file",
            file_path = ?path,
            defaults = %DEFAULT_EXTENSIONS.join("|"),
            "Endings file not found, default endings assumed"
        );
        return Ok(ExtensionSet::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read endings file {:?}", path))?;
    let content = content.strip_prefix(UTF8_BOM).unwrap_or(&content);

    if content.lines().all(|line| line.trim().is_empty()) {
        info!(
            action = "load",
            component = "endings_file",
            file_path = ?path,
            defaults = %DEFAULT_EXTENSIONS.join("|"),
            "Endings file empty, default endings assumed"
        );
        return Ok(ExtensionSet::default());
    }

    let extensions = ExtensionSet::parse(content);
    info!(
        action = "loaded",
        component = "endings_file",
        file_path = ?path,
        extensions = %extensions,
        "Loaded endings file"
    );
    Ok(extensions)
}

/// Writes the default endings file, refusing to overwrite an existing one.
pub fn init_default_endings(path: &Path) -> Result<()> {
    if path.exists() {
        anyhow::bail!(
            "{} already exists. Remove it first if you want to reinitialize.",
            path.display()
        );
    }

    let mut content = DEFAULT_EXTENSIONS.join("\n");
    content.push('\n');
    fs::write(path, content).with_context(|| format!("Failed to write {:?}", path))?;
    println!("Created {} with default endings", path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bom_is_stripped() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice(b"line");
        assert_eq!(decode_log_bytes(&bytes), "line");
    }

    #[test]
    fn invalid_utf8_is_replaced_not_rejected() {
        let text = decode_log_bytes(b"GET /f.zip \xFF\xFE end");
        assert!(text.starts_with("GET /f.zip "));
        assert!(text.ends_with(" end"));
    }

    #[test]
    fn missing_endings_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let set = load_extensions(&dir.path().join("nope.txt")).unwrap();
        assert!(set.is_default());
    }

    #[test]
    fn endings_file_is_read_line_by_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config-endings.txt");
        fs::write(&path, "HTM\r\nhtml\r\n\r\n").unwrap();
        let set = load_extensions(&path).unwrap();
        assert_eq!(set.to_string(), "htm|html");
    }

    #[test]
    fn missing_log_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_log_text(&dir.path().join("traffic.txt")).unwrap_err();
        assert!(err.to_string().contains("Log file not found"));
    }

    #[test]
    fn init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config-endings.txt");
        init_default_endings(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "zip\nexe\n");
        assert!(init_default_endings(&path).is_err());
    }
}
