mod common;

use common::{gzip, notification, parse_records, zip_archive};
use s3_log_hook::PipelineConfig;
use s3_log_hook::app::{BatchSummary, EventHandler, HandlerError};
use s3_log_hook::collector::LocalDirSource;
use s3_log_hook::sender::NdjsonSink;
use std::path::Path;
use tempfile::TempDir;

fn put_object(root: &Path, bucket: &str, key: &str, body: &[u8]) {
    let path = root.join(bucket).join(key);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, body).unwrap();
}

fn output_lines(sink: NdjsonSink<Vec<u8>>) -> Vec<Vec<u8>> {
    String::from_utf8(sink.into_inner())
        .unwrap()
        .lines()
        .map(|line| line.as_bytes().to_vec())
        .collect()
}

#[tokio::test]
async fn test_batch_from_local_directory() {
    let dir = TempDir::new().unwrap();
    put_object(dir.path(), "logs", "app/one.log.gz", &gzip(b"first\nsecond\n"));
    put_object(
        dir.path(),
        "logs",
        "app/two.zip",
        &zip_archive(&[("a.log", "third"), ("b.log", "fourth\n")]),
    );
    put_object(dir.path(), "logs", "tmp/ignored.log", b"skip me\n");

    let config = PipelineConfig {
        exclude_patterns: vec!["^tmp/".to_string()],
        ..PipelineConfig::default()
    };
    let handler = EventHandler::new(
        &config,
        LocalDirSource::new(dir.path()),
        NdjsonSink::new(Vec::new()),
    );

    let payload = notification(
        "logs",
        "ap-northeast-1",
        &["app/one.log.gz", "app/two.zip", "tmp/ignored.log", "app/missing.log"],
    );
    let summary = handler.handle_payload(payload.as_bytes()).await.unwrap();

    assert_eq!(
        summary,
        BatchSummary {
            objects_seen: 4,
            objects_skipped: 1,
            objects_failed: 1,
            records_emitted: 4,
            records_dropped: 0,
        }
    );

    let records = parse_records(&output_lines(handler.into_sink()));
    let messages: Vec<_> = records.iter().map(|r| r["message"].as_str().unwrap()).collect();
    assert_eq!(messages, ["first", "second", "third", "fourth"]);
    assert_eq!(records[0]["s3_object_key"], "logs/app/one.log.gz");
    assert_eq!(records[2]["s3_object_key"], "logs/app/two.zip");
    assert!(records.iter().all(|r| r["aws_region"] == "ap-northeast-1"));
}

#[tokio::test]
async fn test_include_filter_only_fetches_matches() {
    let dir = TempDir::new().unwrap();
    put_object(dir.path(), "b", "keep/a.log", b"kept\n");
    put_object(dir.path(), "b", "other/a.log", b"not kept\n");

    let config = PipelineConfig {
        include_patterns: vec!["^keep/".to_string()],
        ..PipelineConfig::default()
    };
    let handler = EventHandler::new(&config, LocalDirSource::new(dir.path()), NdjsonSink::new(Vec::new()));

    let payload = notification("b", "r", &["keep/a.log", "other/a.log"]);
    let summary = handler.handle_payload(payload.as_bytes()).await.unwrap();
    assert_eq!(summary.objects_skipped, 1);
    assert_eq!(summary.records_emitted, 1);

    let records = parse_records(&output_lines(handler.into_sink()));
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["message"], "kept");
}

#[tokio::test]
async fn test_conflicting_filters_abort_whole_batch() {
    let dir = TempDir::new().unwrap();
    put_object(dir.path(), "b", "a.log", b"line\n");

    let config = PipelineConfig {
        include_patterns: vec!["a".to_string()],
        exclude_patterns: vec!["b".to_string()],
        ..PipelineConfig::default()
    };
    let handler = EventHandler::new(&config, LocalDirSource::new(dir.path()), NdjsonSink::new(Vec::new()));

    let payload = notification("b", "r", &["a.log"]);
    let result = handler.handle_payload(payload.as_bytes()).await;
    assert!(matches!(result, Err(HandlerError::Config(_))));
    assert!(handler.into_sink().into_inner().is_empty());
}

#[tokio::test]
async fn test_encoded_key_with_template() {
    let dir = TempDir::new().unwrap();
    put_object(dir.path(), "b", "acme/prod/app log.txt", b"hello\n");

    let config = PipelineConfig {
        path_field_template: Some("org/env".to_string()),
        ..PipelineConfig::default()
    };
    let handler = EventHandler::new(&config, LocalDirSource::new(dir.path()), NdjsonSink::new(Vec::new()));

    let payload = notification("b", "r", &["acme/prod/app+log.txt"]);
    handler.handle_payload(payload.as_bytes()).await.unwrap();

    let records = parse_records(&output_lines(handler.into_sink()));
    assert_eq!(records[0]["org"], "acme");
    assert_eq!(records[0]["env"], "prod");
    assert_eq!(records[0]["s3_object_key"], "b/acme/prod/app log.txt");
}
