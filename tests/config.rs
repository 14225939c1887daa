mod common;

use std::fs;

use assert_matches::assert_matches;

use annotated_samples::config::{ImportConfig, OutputPolicy};
use annotated_samples::error::SampleError;

use common::utf8_root;

#[test]
fn resolve_sets_policy() {
    let temp = tempfile::tempdir().unwrap();
    let root = utf8_root(&temp);
    let output = root.join("out");

    let config = ImportConfig::resolve(&root, &output, true, false).unwrap();
    assert_eq!(config.policy, OutputPolicy::MissingOnly);
    assert_eq!(config.input_dir, root);
    assert_eq!(config.output_dir, output);
    assert!(!output.exists());
}

#[test]
fn missing_and_clear_conflict() {
    let temp = tempfile::tempdir().unwrap();
    let root = utf8_root(&temp);
    let output = root.join("out");
    fs::create_dir_all(&output).unwrap();
    fs::write(output.join("keep.sample.gz"), b"x").unwrap();

    let err = ImportConfig::resolve(&root, &output, true, true).unwrap_err();
    assert_matches!(err, SampleError::Validation(message) if message.contains("mutually exclusive"));
    assert!(output.join("keep.sample.gz").exists());
}

#[test]
fn input_must_be_directory() {
    let temp = tempfile::tempdir().unwrap();
    let root = utf8_root(&temp);
    let err = ImportConfig::resolve(&root.join("absent"), &root.join("out"), false, false)
        .unwrap_err();
    assert_matches!(err, SampleError::Validation(_));

    let file = root.join("file.txt");
    fs::write(&file, b"x").unwrap();
    let err = ImportConfig::resolve(&root, &file, false, false).unwrap_err();
    assert_matches!(err, SampleError::Validation(_));
}
