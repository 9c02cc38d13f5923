use super::*;
use std::io::{Cursor, Write};
use tempfile::NamedTempFile;

#[test]
fn parses_both_key_styles() {
    let input = concat!(
        r#"{"instruction": "x", "input": "I have a fever", "output": "Rest and fluids."}"#,
        "\n\n",
        r#"{"question": "Is a headache serious?", "answer": "Usually not."}"#,
        "\n"
    );
    let pairs = parse_jsonl(Cursor::new(input), 10).expect("valid corpus");

    assert_eq!(
        pairs,
        vec![
            QaPair {
                question: "I have a fever".to_string(),
                answer: "Rest and fluids.".to_string(),
            },
            QaPair {
                question: "Is a headache serious?".to_string(),
                answer: "Usually not.".to_string(),
            },
        ]
    );
}

#[test]
fn respects_limit() {
    let input = (0..5)
        .map(|i| format!(r#"{{"question": "q{}", "answer": "a{}"}}"#, i, i))
        .collect::<Vec<_>>()
        .join("\n");
    let pairs = parse_jsonl(Cursor::new(input), 3).expect("valid corpus");

    assert_eq!(pairs.len(), 3);
    assert_eq!(pairs[2].question, "q2");
}

#[test]
fn reports_line_of_bad_record() {
    let input = "{\"question\": \"q\", \"answer\": \"a\"}\n{\"question\": \"missing answer\"}\n";
    let err = parse_jsonl(Cursor::new(input), 10).expect_err("second record is invalid");

    assert!(err.to_string().contains("line 2"));
}

#[test]
fn loads_corpus_from_file() {
    let mut file = NamedTempFile::new().expect("temp file");
    writeln!(file, r#"{{"input": "Why am I tired?", "output": "Sleep more."}}"#)
        .expect("write corpus");

    let config = DatasetConfig {
        path: Some(file.path().to_path_buf()),
        ..DatasetConfig::default()
    };
    let documents = load_corpus(&config).expect("corpus should load");

    assert_eq!(documents.len(), 1);
    assert_eq!(
        documents[0].content(),
        "Question: Why am I tired?\nAnswer: Sleep more."
    );
    assert!(documents[0].url.is_none());
}

#[test]
fn missing_file_is_a_dataset_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = DatasetConfig {
        path: Some(dir.path().join("missing.jsonl")),
        ..DatasetConfig::default()
    };
    let err = load_corpus(&config).expect_err("missing file should fail");

    assert!(matches!(err, RagError::DatasetLoad(_)));
}
