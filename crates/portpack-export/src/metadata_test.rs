use chrono::TimeZone;

use super::*;

fn record(title: &str, url: &str, files: &[&str]) -> AssetRecord {
    AssetRecord {
        project: "JPG Couture".to_string(),
        year: "2025".to_string(),
        location: "Paris".to_string(),
        photographer: String::new(),
        title: title.to_string(),
        source_url: url.to_string(),
        page_url: url.to_string(),
        downloaded_files: files.iter().map(ToString::to_string).collect(),
        notes: if files.is_empty() {
            "No downloadable images found (or skipped by rules).".to_string()
        } else {
            String::new()
        },
        credit_line: "Hair: Holli Smith".to_string(),
        tags: "backstage, runway".to_string(),
        created_at: "2025-01-28T09:05:07+00:00".to_string(),
    }
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 28, 9, 5, 7).unwrap()
}

#[test]
fn writes_all_four_files() {
    let dir = tempfile::tempdir().unwrap();
    let records = vec![
        record("Look", " https://vogue.com/a ", &["/out/a_1.jpg", "/out/a_2.jpg"]),
        record("(instagram)", "https://instagram.com/p/x", &[]),
    ];
    export_metadata(&records, dir.path(), now()).unwrap();

    for name in [ASSETS_JSON, ASSETS_CSV, LINKS_TXT, POST_PLAN_MD] {
        assert!(dir.path().join(name).is_file(), "{name} missing");
    }
}

#[test]
fn json_round_trips_records() {
    let dir = tempfile::tempdir().unwrap();
    let records = vec![record("Look", "https://vogue.com/a", &["/out/a.jpg"])];
    export_metadata(&records, dir.path(), now()).unwrap();

    let raw = std::fs::read_to_string(dir.path().join(ASSETS_JSON)).unwrap();
    assert!(raw.contains("\n  {"), "expected pretty JSON: {raw}");
    let back: Vec<AssetRecord> = serde_json::from_str(&raw).unwrap();
    assert_eq!(back, records);
}

#[test]
fn csv_has_header_and_joined_files() {
    let dir = tempfile::tempdir().unwrap();
    let records = vec![
        record("Look, with comma", "https://vogue.com/a", &["/out/a.jpg", "/out/b.jpg"]),
        record("Empty", "https://vogue.com/b", &[]),
    ];
    export_metadata(&records, dir.path(), now()).unwrap();

    let mut reader = csv::Reader::from_path(dir.path().join(ASSETS_CSV)).unwrap();
    let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(headers, CSV_HEADER);

    let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(&rows[0][4], "Look, with comma");
    assert_eq!(&rows[0][7], "/out/a.jpg;/out/b.jpg");
    assert_eq!(&rows[1][7], "");
}

#[test]
fn empty_export_still_writes_csv_header() {
    let dir = tempfile::tempdir().unwrap();
    export_metadata(&[], dir.path(), now()).unwrap();

    let csv_text = std::fs::read_to_string(dir.path().join(ASSETS_CSV)).unwrap();
    assert!(csv_text.starts_with("project,year,location"));
    let json = std::fs::read_to_string(dir.path().join(ASSETS_JSON)).unwrap();
    assert_eq!(json.trim(), "[]");
    assert_eq!(std::fs::read_to_string(dir.path().join(LINKS_TXT)).unwrap(), "");
}

#[test]
fn links_are_trimmed_in_record_order() {
    let dir = tempfile::tempdir().unwrap();
    let records = vec![
        record("B", "  https://b.test  ", &[]),
        record("A", "https://a.test", &[]),
    ];
    export_metadata(&records, dir.path(), now()).unwrap();

    let links = std::fs::read_to_string(dir.path().join(LINKS_TXT)).unwrap();
    assert_eq!(links, "https://b.test\nhttps://a.test\n");
}

#[test]
fn post_plan_has_timestamp_and_checklist() {
    let plan = post_plan(now());
    assert!(plan.starts_with("# Post Plan\n\nGenerated: 2025-01-28T09:05:07Z\n"));
    assert!(plan.contains("- 1) Strong hero image"));
    assert!(plan.contains("- Confirm usage/rights for each file"));
    assert!(plan.ends_with("- Keep originals backed up\n"));
}

#[test]
fn missing_directory_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope");
    let err = export_metadata(&[], &missing, now()).unwrap_err();
    assert!(matches!(err, ExportError::Io { .. }), "got: {err:?}");
}
