//! Library-level properties of a full analysis run.

use logtally::{analyze, ExtensionSet, TimestampFormat};

const MIXED_LOG: &str = concat!(
    "[server started]\n",
    "10.0.0.1 - - [10/Oct/2000:13:55:36 -0700] \"GET /files/f.zip HTTP/1.0\" 200 1234\n",
    "10.0.0.2 - - [10/Oct/2000:12:00:00 -0700] \"GET /index.html HTTP/1.0\" 200 512\n",
    "10.0.0.3 - - [11/Oct/2000:08:30:00 -0700] \"GET /files/F.ZIP HTTP/1.1\" 404 0\n",
    "10.0.0.4 - - [11/Oct/2000:09:15:00 -0700] \"GET /tools/setup.exe HTTP/1.1\" 200 99\n",
    "10.0.0.5 - - [12/Oct/2000:00:00:00 -0700] \"GET /about.html HTTP/1.1\" 200 10\n",
);

const CLF_LOG: &str = concat!(
    "10.0.0.1 - - [10/Oct/2000:13:55:36 -0700] \"GET /files/f.zip HTTP/1.0\" 200 1234\n",
    "10.0.0.2 - - [10/Oct/2000:12:00:00 -0700] \"GET /index.html HTTP/1.0\" 200 512\n",
    "10.0.0.3 - - [11/Oct/2000:08:30:00 -0700] \"GET /files/f.zip HTTP/1.1\" 200 1234\n",
    "10.0.0.4 - - [11/Oct/2000:09:15:00 -0700] \"GET /tools/setup.exe HTTP/1.1\" 200 99\n",
    "10.0.0.5 - - [12/Oct/2000:00:00:00 -0700] \"GET /about.html HTTP/1.1\" 200 10\n",
);

fn strip_annotation(key: &str) -> &str {
    key.strip_suffix(" [404 file/page not found]").unwrap_or(key)
}

#[test]
fn table_sum_matches_total() {
    for text in [MIXED_LOG, CLF_LOG] {
        let result = analyze(text, &ExtensionSet::default()).unwrap();
        let sum: u32 = result.downloads.counts.values().sum();
        assert_eq!(sum, result.downloads.total);
        assert!(result.downloads.counts.values().all(|count| *count >= 1));
    }
}

#[test]
fn keys_end_with_tracked_extension() {
    let extensions = ExtensionSet::new(["zip", "exe", "html"]);
    let result = analyze(MIXED_LOG, &extensions).unwrap();
    assert!(!result.downloads.counts.is_empty());
    for key in result.downloads.counts.keys() {
        assert!(extensions.matches_path(strip_annotation(key)), "{key}");
    }
}

#[test]
fn counts_per_path() {
    let result = analyze(CLF_LOG, &ExtensionSet::default()).unwrap();
    let entries: Vec<(&str, u32)> = result
        .downloads
        .counts
        .iter()
        .map(|(k, v)| (k.as_str(), *v))
        .collect();
    assert_eq!(
        entries,
        vec![("GET /files/f.zip", 2), ("GET /tools/setup.exe", 1)]
    );
    assert_eq!(result.downloads.total, 3);
}

#[test]
fn annotated_404_is_a_separate_key() {
    let result = analyze(MIXED_LOG, &ExtensionSet::default()).unwrap();
    assert_eq!(result.downloads.counts.get("GET /files/f.zip"), Some(&1));
    assert_eq!(
        result
            .downloads
            .counts
            .get("GET /files/F.ZIP [404 file/page not found]"),
        Some(&1)
    );
}

#[test]
fn non_timestamp_probe_disables_all_timestamps() {
    let result = analyze(MIXED_LOG, &ExtensionSet::default()).unwrap();
    assert_eq!(result.format, None);
    assert_eq!(result.format_index, -1);
    assert!(result.range.global_min.is_none());
    assert!(result.range.global_max.is_none());
    assert!(result.range.first_match.is_none());
    assert!(result.range.last_match.is_none());
    assert_eq!(result.downloads.total, 3);
}

#[test]
fn download_range_nests_inside_global_range() {
    let result = analyze(CLF_LOG, &ExtensionSet::default()).unwrap();
    assert_eq!(result.format, Some(TimestampFormat::Clf));

    let range = result.range;
    let (min, max) = (range.global_min.unwrap(), range.global_max.unwrap());
    let (first, last) = (range.first_match.unwrap(), range.last_match.unwrap());
    assert!(min <= max);
    assert!(first <= last);
    assert!(min <= first);
    assert!(last <= max);

    assert_eq!(Some(min), TimestampFormat::Clf.parse("10/Oct/2000:12:00:00 -0700"));
    assert_eq!(Some(max), TimestampFormat::Clf.parse("12/Oct/2000:00:00:00 -0700"));
    assert_eq!(Some(first), TimestampFormat::Clf.parse("10/Oct/2000:13:55:36 -0700"));
    assert_eq!(Some(last), TimestampFormat::Clf.parse("11/Oct/2000:09:15:00 -0700"));
}

#[test]
fn repeated_runs_are_identical() {
    let extensions = ExtensionSet::default();
    let first = analyze(CLF_LOG, &extensions).unwrap();
    let second = analyze(CLF_LOG, &extensions).unwrap();
    assert_eq!(first, second);
}

#[test]
fn empty_extension_list_uses_zip_and_exe() {
    let extensions = ExtensionSet::new(Vec::<&str>::new());
    assert_eq!(extensions.iter().collect::<Vec<_>>(), vec!["zip", "exe"]);
    let result = analyze(CLF_LOG, &extensions).unwrap();
    assert_eq!(result.downloads.total, 3);
}

#[test]
fn iso_timestamps_are_detected() {
    let text = concat!(
        "h - - [2021-12-08T10:00:00+01:00] \"GET /a.zip HTTP/1.1\" 200 5\n",
        "h - - [2021-12-08T11:00:00+01:00] \"GET /b.exe HTTP/1.1\" 200 5\n",
    );
    let result = analyze(text, &ExtensionSet::default()).unwrap();
    assert_eq!(result.format, Some(TimestampFormat::IsoDateTime));
    assert_eq!(result.format_index, 1);
    let last = result.range.last_match.unwrap();
    assert_eq!(result.format_timestamp(&last), "2021-12-08T11:00:00+01:00");
}
