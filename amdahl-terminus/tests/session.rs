// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

use std::io::Write;

use amdahl_engine::analysis::{Comparator, Comparison};
use amdahl_engine::evaluator::Evaluator;
use amdahl_engine::types::{AmdahlError, InvalidParameter};
use amdahl_terminus::explorer::app::{AppLogger, MessageLevel};
use amdahl_terminus::session::{EntryError, Session, load_entries, parse_component};
use tempfile::NamedTempFile;

fn component_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn parse_from_text_fields() {
    let component = parse_component(" Shader cores ", "40", " 6 ").unwrap();
    assert_eq!(component.name(), "Shader cores");
    assert_eq!(component.improvable_fraction(), 0.4);
    assert_eq!(component.improvement_factor(), 6.0);
}

#[test]
fn parse_rejects_text() {
    assert_eq!(
        parse_component("L2", "forty", "6"),
        Err(EntryError::NotANumber {
            field: "percent",
            value: "forty".to_string()
        })
    );
    assert_eq!(
        parse_component("L2", "40", "").unwrap_err().to_string(),
        "Error: factor '' is not a number"
    );
}

#[test]
fn parse_rejects_invalid_values() {
    assert_eq!(
        parse_component("L2", "140", "6"),
        Err(EntryError::Invalid(AmdahlError::InvalidParameter(
            InvalidParameter::FractionOutOfRange(1.4)
        )))
    );
    assert_eq!(
        parse_component("", "40", "6"),
        Err(EntryError::Invalid(AmdahlError::InvalidParameter(
            InvalidParameter::EmptyName
        )))
    );
    assert!(parse_component("L2", "40", "1").is_err());
}

#[test]
fn entering_appends() {
    let mut session = Session::new();
    session.enter("a", "10", "2").unwrap();
    assert!(session.enter("bad", "10", "0.5").is_err());
    session.enter("b", "20", "2").unwrap();

    let names: Vec<&str> = session.components().iter().map(|c| c.name()).collect();
    assert_eq!(names, vec!["a", "b"]);
    assert_eq!(session.len(), 2);

    session.clear();
    assert!(session.is_empty());
}

#[test]
fn compare_last_entries() {
    let mut session = Session::new();
    for (name, percent) in [("a", "90"), ("b", "10"), ("c", "30"), ("d", "20")] {
        session.enter(name, percent, "2").unwrap();
    }
    let comparator = Comparator::new(Evaluator);
    let comparison = session.compare_last_n(&comparator, 3);
    let analysis = comparison.analysis().unwrap();
    assert_eq!(analysis.results().len(), 3);
    assert_eq!(analysis.best_component().unwrap().name(), "c");
}

#[test]
fn compare_empty_session() {
    let comparator = Comparator::new(Evaluator);
    assert!(matches!(
        Session::new().compare_last_n(&comparator, 3),
        Comparison::NoData
    ));
}

#[test]
fn load_component_file() {
    let file = component_file(
        "
- name: Shader cores
  percent: 40
  factor: 6
- name: L2 cache
  percent: 15.5
  factor: 3
",
    );
    let session = Session::from_file(file.path(), &mut AppLogger::default()).unwrap();
    assert_eq!(session.len(), 2);
    assert_eq!(session.components()[1].name(), "L2 cache");
    assert_eq!(session.components()[1].improvable_fraction(), 0.155);
}

#[test]
fn load_empty_file() {
    let file = component_file("");
    assert!(load_entries(file.path()).unwrap().is_empty());
    assert!(Session::from_file(file.path(), &mut AppLogger::default()).unwrap().is_empty());

    let file = component_file("[]");
    assert!(Session::from_file(file.path(), &mut AppLogger::default()).unwrap().is_empty());
}

#[test]
fn load_keeps_valid_entries() {
    let file = component_file(
        "
- name: a
  percent: 40
  factor: 6
- name: b
  percent: 150
  factor: 3
- name: c
  percent: 20
  factor: 4
",
    );
    let mut logger = AppLogger::default();
    let session = Session::from_file(file.path(), &mut logger).unwrap();

    let names: Vec<&str> = session.components().iter().map(|c| c.name()).collect();
    assert_eq!(names, vec!["a", "c"]);

    let messages = logger.messages.rows();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].level, MessageLevel::Error);
    assert!(messages[0].text.starts_with("Invalid entry 2 ('b') in"));
    assert!(messages[0].text.ends_with(
        "Error: invalid parameter: improvable fraction 1.5 is not within [0, 1]"
    ));
}

#[test]
fn load_malformed_file() {
    let file = component_file("- name: missing fields\n");
    let error = Session::from_file(file.path(), &mut AppLogger::default()).unwrap_err();
    assert!(error.to_string().starts_with("Failed to parse contents of"));
}

#[test]
fn load_missing_file() {
    let error = Session::from_file(
        std::path::Path::new("/does/not/exist.yaml"),
        &mut AppLogger::default(),
    )
    .unwrap_err();
    assert!(error.to_string().starts_with("Failed to read"));
}
