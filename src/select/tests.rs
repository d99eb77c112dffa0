//! Storage selection tests

use super::*;
use crate::types::StorageTarget;
use serde_json::json;
use test_case::test_case;

#[test_case("photo.JPG", "jpg"; "uppercase")]
#[test_case("archive.tar.gz", "gz"; "last dot wins")]
#[test_case("README", ""; "no dot")]
#[test_case(".bashrc", ""; "leading dot only")]
#[test_case("trailing.", ""; "trailing dot")]
fn test_file_extension(name: &str, expected: &str) {
    assert_eq!(file_extension(name), expected);
}

#[test_case("jpeg", FileCategory::Images)]
#[test_case("mkv", FileCategory::Videos)]
#[test_case("odt", FileCategory::Documents)]
#[test_case("csv", FileCategory::Spreadsheets)]
#[test_case("7z", FileCategory::Archives)]
#[test_case("go", FileCategory::Code)]
#[test_case("yml", FileCategory::Data)]
#[test_case("flac", FileCategory::Audio)]
#[test_case("exe", FileCategory::Other)]
#[test_case("", FileCategory::Other)]
fn test_category_lookup(ext: &str, expected: FileCategory) {
    assert_eq!(FileCategory::from_extension(ext), expected);
}

#[test_case(0, "0 Bytes")]
#[test_case(512, "512 Bytes")]
#[test_case(1024, "1 KB")]
#[test_case(1536, "1.5 KB")]
#[test_case(500_000, "488.28 KB")]
#[test_case(5 * 1024 * 1024, "5 MB")]
fn test_format_file_size(bytes: u64, expected: &str) {
    assert_eq!(format_file_size(bytes), expected);
}

#[test]
fn test_image_without_content_is_relational() {
    let file = FileDescriptor::new("photo.jpg", 500_000, "image/jpeg");
    assert_eq!(
        select_store(&file, SelectOptions::default()),
        StorageTarget::Relational
    );
}

#[test]
fn test_xml_is_document() {
    let file = FileDescriptor::new("data.xml", 100, "application/xml");
    assert_eq!(
        select_store(&file, SelectOptions::default()),
        StorageTarget::Document
    );
}

#[test]
fn test_json_content_uses_analysis() {
    let uniform = FileDescriptor::new("users.json", 120, "application/json")
        .with_content(json!([{"id": 1, "name": "a"}, {"id": 2, "name": "b"}]));
    assert_eq!(
        select_store(&uniform, SelectOptions { log_analysis: true }),
        StorageTarget::Relational
    );

    let divergent = FileDescriptor::new("events.json", 120, "application/json")
        .with_content(json!([{"a": 1}, {"b": 2}, {"c": 3}]));
    assert_eq!(
        select_store(&divergent, SelectOptions::default()),
        StorageTarget::Document
    );
}

#[test]
fn test_selection_returns_the_deciding_analysis() {
    let divergent = FileDescriptor::new("events.json", 120, "application/json")
        .with_content(json!([{"a": 1}, {"b": 2}, {"c": 3}]));
    let (target, analysis) = select_store_with_analysis(&divergent, SelectOptions::default());
    let analysis = analysis.unwrap();

    assert_eq!(target, StorageTarget::Document);
    assert_eq!(analysis.recommended_storage, target);
    assert_eq!(analysis.metrics.tabular_rows, 3);

    let image = FileDescriptor::new("photo.png", 10, "image/png");
    let (target, analysis) = select_store_with_analysis(&image, SelectOptions::default());
    assert_eq!(target, StorageTarget::Relational);
    assert!(analysis.is_none());
}

#[test]
fn test_json_without_content_falls_back_to_category() {
    let file = FileDescriptor::new("small.json", 10, "application/json");
    assert_eq!(
        select_store(&file, SelectOptions::default()),
        StorageTarget::Document
    );

    let null_content = FileDescriptor::new("small.json", 10, "application/json")
        .with_content(serde_json::Value::Null);
    assert_eq!(
        select_store(&null_content, SelectOptions::default()),
        StorageTarget::Document
    );
}

#[test]
fn test_large_json_mime_is_document() {
    let file = FileDescriptor::new("dump.bin", LARGE_JSON_BYTES + 1, "application/json");
    assert_eq!(
        select_store(&file, SelectOptions::default()),
        StorageTarget::Document
    );

    let at_limit = FileDescriptor::new("dump.bin", LARGE_JSON_BYTES, "application/json");
    assert_eq!(
        select_store(&at_limit, SelectOptions::default()),
        StorageTarget::Relational
    );
}

#[test]
fn test_deep_content_on_non_json_file_is_document() {
    let deep = FileDescriptor::new("notes.txt", 10, "text/plain")
        .with_content(json!({"a": {"b": {"c": {"d": 1}}}}));
    assert_eq!(
        select_store(&deep, SelectOptions::default()),
        StorageTarget::Document
    );

    let shallow = FileDescriptor::new("notes.txt", 10, "text/plain")
        .with_content(json!({"a": {"b": {"c": 1}}}));
    assert_eq!(
        select_store(&shallow, SelectOptions::default()),
        StorageTarget::Relational
    );
}

#[test]
fn test_other_files_default_to_relational() {
    for name in ["report.pdf", "main.rs", "backup.zip", "song.mp3"] {
        let file = FileDescriptor::new(name, 1000, "application/octet-stream");
        assert_eq!(
            select_store(&file, SelectOptions::default()),
            StorageTarget::Relational,
            "{name}"
        );
    }
}

fn batch(names: &[&str]) -> Vec<FileDescriptor> {
    names
        .iter()
        .map(|name| FileDescriptor::new(*name, 100, "application/octet-stream"))
        .collect()
}

#[test]
fn test_batch_data_majority_is_document() {
    let files = batch(&["a.json", "b.xml", "c.yaml", "d.sql", "e.png", "f.pdf"]);
    assert_eq!(select_store_for_batch(&files), StorageTarget::Document);
}

#[test]
fn test_batch_data_half_is_not_majority() {
    let files = batch(&["a.json", "b.xml", "c.png", "d.pdf"]);
    assert_eq!(select_store_for_batch(&files), StorageTarget::Relational);
}

#[test]
fn test_batch_all_images_is_relational() {
    let files = batch(&["a.png", "b.jpg", "c.gif"]);
    assert_eq!(select_store_for_batch(&files), StorageTarget::Relational);
}

#[test]
fn test_batch_mixed_and_empty_default_to_relational() {
    assert_eq!(
        select_store_for_batch(&batch(&["a.zip", "b.py"])),
        StorageTarget::Relational
    );
    assert_eq!(select_store_for_batch(&[]), StorageTarget::Relational);
}
