//! End-to-end pipeline tests: build a paper, answer it, mark it.
//!
//! These drive the binary the way a host would: paper spec in, paper
//! document out, responses JSON in, mark summary out. Correct answers
//! are reconstructed from the document's own expected values.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn examsmith() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("examsmith").unwrap()
}

const PAPER_SPEC: &str = r#"
[paper]
name = "Mock paper"
mode = "noncalc"
seed = "4242"

[[questions]]
topic = "N7"
marks = 1
id = "warmup"

[[questions]]
topic = "N8"
marks = 2

[[questions]]
topic = "N9"
marks = 3
mode = "calc"
"#;

fn build_paper(dir: &Path) -> (PathBuf, serde_json::Value) {
    let spec_path = dir.join("paper.toml");
    let doc_path = dir.join("paper.json");
    std::fs::write(&spec_path, PAPER_SPEC).unwrap();

    examsmith()
        .arg("paper")
        .arg("--spec")
        .arg(&spec_path)
        .arg("--out")
        .arg(&doc_path)
        .assert()
        .success();

    let doc = serde_json::from_str(&std::fs::read_to_string(&doc_path).unwrap()).unwrap();
    (doc_path, doc)
}

fn fmt_num(v: &serde_json::Value) -> String {
    let f = v.as_f64().unwrap();
    if f.fract() == 0.0 {
        format!("{}", f as i64)
    } else {
        f.to_string()
    }
}

/// Fill a responses map with the document's own expected answers.
fn respond_correctly(doc: &serde_json::Value) -> serde_json::Map<String, serde_json::Value> {
    let mut responses = serde_json::Map::new();
    for question in doc["questions"].as_array().unwrap() {
        for part in question["parts"].as_array().unwrap() {
            let (Some(input), Some(answer)) = (part["input"].as_object(), part["answer"].as_object())
            else {
                continue;
            };
            let id = input["id"].as_str().unwrap();
            match answer["type"].as_str().unwrap() {
                "number" | "standardForm" => {
                    responses.insert(id.to_string(), fmt_num(&answer["value"]).into());
                }
                "rounded" => {
                    let dp = answer["dp"].as_u64().unwrap() as usize;
                    let value = answer["value"].as_f64().unwrap();
                    responses.insert(id.to_string(), format!("{value:.dp$}").into());
                }
                "pair" => {
                    let value = answer["value"].as_array().unwrap();
                    responses.insert(format!("{id}A"), fmt_num(&value[0]).into());
                    responses.insert(format!("{id}B"), fmt_num(&value[1]).into());
                }
                "fraction" => {
                    responses.insert(format!("{id}N"), answer["n"].to_string().into());
                    responses.insert(format!("{id}D"), answer["d"].to_string().into());
                }
                other => panic!("unhandled answer type {other}"),
            }
        }
    }
    responses
}

fn write_responses(dir: &Path, responses: &serde_json::Map<String, serde_json::Value>) -> PathBuf {
    let path = dir.join("responses.json");
    std::fs::write(&path, serde_json::to_string_pretty(responses).unwrap()).unwrap();
    path
}

#[test]
fn e2e_correct_responses_score_full() {
    let dir = TempDir::new().unwrap();
    let (doc_path, doc) = build_paper(dir.path());
    let responses = respond_correctly(&doc);
    let responses_path = write_responses(dir.path(), &responses);

    examsmith()
        .arg("mark")
        .arg("--paper")
        .arg(&doc_path)
        .arg("--responses")
        .arg(&responses_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Total: 6 / 6"))
        .stderr(predicate::str::contains("(warmup)"));
}

#[test]
fn e2e_blank_responses_score_zero() {
    let dir = TempDir::new().unwrap();
    let (doc_path, _doc) = build_paper(dir.path());
    let responses_path = dir.path().join("responses.json");
    std::fs::write(&responses_path, "{}").unwrap();

    examsmith()
        .arg("mark")
        .arg("--paper")
        .arg(&doc_path)
        .arg("--responses")
        .arg(&responses_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Total: 0 / 6"));
}

#[test]
fn e2e_wrong_answer_loses_only_its_marks() {
    let dir = TempDir::new().unwrap();
    let (doc_path, doc) = build_paper(dir.path());
    let mut responses = respond_correctly(&doc);
    for (key, value) in responses.iter_mut() {
        if key.starts_with("warmup__") {
            *value = "999999".into();
        }
    }
    let responses_path = write_responses(dir.path(), &responses);

    examsmith()
        .arg("mark")
        .arg("--paper")
        .arg(&doc_path)
        .arg("--responses")
        .arg(&responses_path)
        .arg("--show-answers")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total: 5 / 6"))
        .stderr(predicate::str::contains("Expected answers where marks were lost"))
        .stderr(predicate::str::contains("warmup__"));
}

#[test]
fn e2e_input_ids_are_prefixed_by_instance() {
    let dir = TempDir::new().unwrap();
    let (_doc_path, doc) = build_paper(dir.path());

    let questions = doc["questions"].as_array().unwrap();
    assert_eq!(questions[0]["instanceId"], "warmup");
    for question in questions {
        let instance_id = question["instanceId"].as_str().unwrap();
        let prefix = format!("{instance_id}__");
        for part in question["parts"].as_array().unwrap() {
            if let Some(input) = part["input"].as_object() {
                let id = input["id"].as_str().unwrap();
                assert!(id.starts_with(&prefix), "{id} not under {prefix}");
            }
        }
    }
}

#[test]
fn e2e_seeded_paper_replays_identically() {
    let dir = TempDir::new().unwrap();
    let (_path_a, doc_a) = build_paper(dir.path());

    let dir_b = TempDir::new().unwrap();
    let (_path_b, doc_b) = build_paper(dir_b.path());

    // document ids and timestamps differ; the questions must not
    assert_eq!(doc_a["questions"], doc_b["questions"]);
    assert_ne!(doc_a["id"], doc_b["id"]);
}
