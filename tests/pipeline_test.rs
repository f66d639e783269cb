mod common;

use common::{gzip, parse_records, zip_archive};
use s3_log_hook::decode::Encoding;
use s3_log_hook::domain::RawObject;
use s3_log_hook::parser::LogFormat;
use s3_log_hook::{LogPipeline, PipelineConfig};
use serde_json::json;

fn pipeline(config: PipelineConfig) -> LogPipeline {
    LogPipeline::new(&config).unwrap()
}

#[test]
fn test_gzip_text_object() {
    let object = RawObject::new("bkt", "x/y.log", "us-east-1", gzip(b"a\nb\n"));
    let processed = pipeline(PipelineConfig::default()).process(&object);

    assert_eq!(processed.encoding, Encoding::Gzip);
    let records = parse_records(&processed.records);
    assert_eq!(records.len(), 2);
    assert_eq!(
        serde_json::Value::Object(records[0].clone()),
        json!({
            "message": "a",
            "type": "s3_hook",
            "s3_object_key": "bkt/x/y.log",
            "aws_region": "us-east-1"
        })
    );
    assert_eq!(records[1]["message"], "b");
}

#[test]
fn test_multi_member_zip_keeps_member_order() {
    let body = zip_archive(&[("first.log", "1\n2"), ("second.log", "3\n")]);
    let object = RawObject::new("bkt", "bundle.zip", "r", body);
    let processed = pipeline(PipelineConfig::default()).process(&object);

    assert_eq!(processed.encoding, Encoding::Zip);
    let messages: Vec<_> = parse_records(&processed.records)
        .into_iter()
        .map(|r| r["message"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(messages, ["1", "2", "3"]);
}

#[test]
fn test_cloudtrail_records_with_provenance_override() {
    let body = r#"{"Records":[{"eventName":"PutObject","aws_region":"spoofed"},{"eventName":"GetObject"}]}"#;
    let object = RawObject::new("trail", "AWSLogs/CloudTrail/2024/01.json.gz", "eu-west-1", gzip(body.as_bytes()))
        .with_content_type("application/gzip");

    let config = PipelineConfig {
        log_type: "cloudtrail".to_string(),
        ..PipelineConfig::default()
    };
    let processed = pipeline(config).process(&object);

    assert_eq!(processed.format, LogFormat::CloudTrail);
    let records = parse_records(&processed.records);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["eventName"], "PutObject");
    assert_eq!(records[0]["aws_region"], "eu-west-1");
    assert_eq!(records[0]["type"], "cloudtrail");
    assert!(!records[0].contains_key("message"));
    assert_eq!(records[1]["eventName"], "GetObject");
}

#[test]
fn test_malformed_cloudtrail_degrades_to_message() {
    let object = RawObject::new("b", "cloudtrail/bad.json", "r", "{not json");
    let processed = pipeline(PipelineConfig::default()).process(&object);

    assert_eq!(processed.stats.degraded_units, 1);
    let records = parse_records(&processed.records);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["message"], "{not json");
}

#[test]
fn test_json_array_lines() {
    let body = "[{\"a\":1},{\"a\":2}]\nplain line\n[]\n";
    let object = RawObject::new("b", "events/batch.json", "r", body);
    let processed = pipeline(PipelineConfig::default()).process(&object);

    assert_eq!(processed.format, LogFormat::Json);
    let records = parse_records(&processed.records);
    assert_eq!(records.len(), 3);
    assert_eq!(records[0]["a"], 1);
    assert_eq!(records[1]["a"], 2);
    assert_eq!(records[2]["message"], "plain line");
}

#[test]
fn test_path_template_fields() {
    let config = PipelineConfig {
        path_field_template: Some("org-id/aws-type/account-id".to_string()),
        ..PipelineConfig::default()
    };
    let object = RawObject::new("b", "org/awstype/acct/f.txt", "r", "hello\n");
    let processed = pipeline(config).process(&object);

    assert_eq!(processed.stats.template_mismatches, 0);
    let records = parse_records(&processed.records);
    assert_eq!(records[0]["org-id"], "org");
    assert_eq!(records[0]["aws-type"], "awstype");
    assert_eq!(records[0]["account-id"], "acct");
    assert_eq!(records[0]["message"], "hello");
}

#[test]
fn test_path_template_mismatch_skips_fields() {
    let config = PipelineConfig {
        path_field_template: Some("a/b/c".to_string()),
        ..PipelineConfig::default()
    };
    let object = RawObject::new("b", "only-one-segment.log", "r", "hello\n");
    let processed = pipeline(config).process(&object);

    assert_eq!(processed.stats.template_mismatches, 1);
    let records = parse_records(&processed.records);
    assert_eq!(records.len(), 1);
    assert!(!records[0].contains_key("a"));
    assert_eq!(records[0]["s3_object_key"], "b/only-one-segment.log");
}

#[test]
fn test_hint_does_not_block_fallback() {
    let object = RawObject::new("b", "mislabelled.log", "r", "plain text\n")
        .with_content_type("application/gzip");
    let processed = pipeline(PipelineConfig::default()).process(&object);

    assert_eq!(processed.encoding, Encoding::Plain);
    assert_eq!(parse_records(&processed.records)[0]["message"], "plain text");
}

#[test]
fn test_empty_object_yields_no_records() {
    let object = RawObject::new("b", "empty.log", "r", Vec::new());
    let processed = pipeline(PipelineConfig::default()).process(&object);
    assert!(processed.records.is_empty());
    assert_eq!(processed.stats.units_extracted, 0);
}
