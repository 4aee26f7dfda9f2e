//! End-to-end tests for the dataset preparation tools.
//!
//! These tests verify:
//! - Chat logs become one message per line, newest last, across files
//! - Unreadable log files are reported without losing the others
//! - Dictionaries built from a converted dataset rank words by frequency
//! - Converted datasets encode like any other text file

use byteseq::data::dictionary::{Dictionary, UNKNOWN_TOKEN};
use byteseq::data::logs::{convert_logs, write_dataset};
use byteseq::{Config, Dataset, SeqError};
use std::fs;
use tempfile::tempdir;

const LOG_A: &str = concat!(
    r#"{"event":"message","id":"3","text":"see you tomorrow"}"#,
    "\n",
    r#"{"event":"service","id":"2","text":"chat renamed"}"#,
    "\n",
    r#"{"event":"message","id":"1","text":"hello,\nhow are you"}"#,
    "\n",
);

const LOG_B: &str = concat!(
    r#"{"event":"message","id":"9","text":"hello again"}"#,
    "\n",
    "garbage line that is not json\n",
);

#[test]
fn test_convert_logs_across_files() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a.jsonl");
    let b = dir.path().join("b.jsonl");
    fs::write(&a, LOG_A).unwrap();
    fs::write(&b, LOG_B).unwrap();

    let report = convert_logs(&[a, b]);
    assert!(report.failed.is_empty());
    assert_eq!(
        report.messages,
        vec!["hello,\\nhow are you", "see you tomorrow", "hello again"]
    );
}

#[test]
fn test_convert_logs_reports_missing_files() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a.jsonl");
    let missing = dir.path().join("missing.jsonl");
    fs::write(&a, LOG_A).unwrap();

    let report = convert_logs(&[missing.clone(), a]);
    assert_eq!(report.messages.len(), 2);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, missing);
    assert!(matches!(report.failed[0].1, SeqError::NotFound { .. }));
}

#[test]
fn test_convert_logs_survives_invalid_utf8() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a.jsonl");
    let mut contents = br#"{"event":"message","text":"first"}"#.to_vec();
    contents.push(b'\n');
    contents.extend_from_slice(br#"{"event":"message","text":"bad "#);
    contents.push(0xFF);
    contents.extend_from_slice(b"\"}\n");
    fs::write(&a, contents).unwrap();

    let report = convert_logs(&[a]);
    assert!(report.failed.is_empty());
    assert_eq!(report.messages, vec!["bad \u{FFFD}", "first"]);
}

#[test]
fn test_dictionary_from_latin1_dataset() {
    let dir = tempdir().unwrap();
    let dataset_path = dir.path().join("latin1.txt");
    // "café café thé" with é as the single byte 0xE9
    let mut contents: Vec<u8> = Vec::new();
    let words: [&[u8]; 3] = [b"caf", b" caf", b" th"];
    for word in words {
        contents.extend_from_slice(word);
        contents.push(0xE9);
    }
    contents.push(b'\n');
    fs::write(&dataset_path, contents).unwrap();

    let dictionary = Dictionary::from_file(&dataset_path, 10).unwrap();
    assert_eq!(dictionary.word(0), Some(UNKNOWN_TOKEN));
    assert_eq!(dictionary.word(1), Some("caf\u{FFFD}"));
    assert!(dictionary.index_of("th\u{FFFD}").is_some());
}

#[test]
fn test_dataset_then_dictionary() {
    let dir = tempdir().unwrap();
    let log = dir.path().join("log.jsonl");
    let dataset_path = dir.path().join("dataset.txt");
    let dict_path = dir.path().join("dict.txt");
    fs::write(&log, LOG_A).unwrap();
    fs::write(dir.path().join("b.jsonl"), LOG_B).unwrap();

    let report = convert_logs(&[log, dir.path().join("b.jsonl")]);
    write_dataset(&dataset_path, &report.messages).unwrap();

    let written = fs::read_to_string(&dataset_path).unwrap();
    assert_eq!(written.lines().count(), 3);

    let dictionary = Dictionary::build(&written, 100);
    dictionary.save(&dict_path).unwrap();

    assert_eq!(dictionary.word(0), Some(UNKNOWN_TOKEN));
    // "hello" and "you" both appear twice; ties sort alphabetically
    assert_eq!(dictionary.word(1), Some("hello"));
    assert!(dictionary.index_of("tomorrow").is_some());
    assert!(dictionary.index_of("how").is_some());

    let saved = fs::read_to_string(&dict_path).unwrap();
    assert!(saved.starts_with("0 <UNK>\n1 hello\n"));
    assert_eq!(saved.lines().count(), dictionary.len());
}

#[test]
fn test_converted_dataset_encodes() {
    let dir = tempdir().unwrap();
    let log = dir.path().join("log.jsonl");
    let dataset_path = dir.path().join("dataset.txt");
    fs::write(&log, LOG_A).unwrap();

    let report = convert_logs(&[log]);
    write_dataset(&dataset_path, &report.messages).unwrap();

    let dataset = Dataset::load([&dataset_path], Config::default()).unwrap();
    assert_eq!(dataset.len(), 2);
    assert_eq!(dataset.decode(1), Some(b"see you tomorrow".to_vec()));
}
