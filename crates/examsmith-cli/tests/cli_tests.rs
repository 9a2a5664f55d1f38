//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn examsmith() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("examsmith").unwrap()
}

const SAMPLE_SPEC: &str = r#"
[paper]
name = "Practice paper"
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

#[test]
fn generate_text_question() {
    examsmith()
        .args(["generate", "--topic", "N7", "--marks", "1"])
        .args(["--mode", "noncalc", "--seed", "123"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[1]"));
}

#[test]
fn generate_json_question() {
    examsmith()
        .args(["generate", "--topic", "N9", "--marks", "4"])
        .args(["--seed", "77", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"topicCode\": \"N9\""))
        .stdout(predicate::str::contains("\"seed\": 77"))
        .stdout(predicate::str::contains("\"instanceId\""));
}

#[test]
fn generate_same_seed_prints_same_question() {
    let args = [
        "generate", "--topic", "N8", "--marks", "5", "--seed", "31337", "--format", "json",
    ];
    let first = examsmith().args(args).output().unwrap();
    let second = examsmith().args(args).output().unwrap();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn generate_defaults_apply() {
    examsmith()
        .args(["generate", "--topic", "N8"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[").and(predicate::str::contains("]")));
}

#[test]
fn generate_show_answers() {
    examsmith()
        .args(["generate", "--topic", "N7", "--marks", "2"])
        .args(["--seed", "9", "--show-answers"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Answers:"));
}

#[test]
fn generate_rejects_unknown_topic() {
    examsmith()
        .args(["generate", "--topic", "N99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown topic code"));
}

#[test]
fn generate_rejects_unknown_mode() {
    examsmith()
        .args(["generate", "--topic", "N7", "--mode", "mental"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown paper mode"));
}

#[test]
fn paper_prints_text_rendering() {
    let dir = TempDir::new().unwrap();
    let spec_path = dir.path().join("paper.toml");
    std::fs::write(&spec_path, SAMPLE_SPEC).unwrap();

    examsmith()
        .arg("paper")
        .arg("--spec")
        .arg(&spec_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Question 1 (1 marks)"))
        .stdout(predicate::str::contains("Question 3 (3 marks)"))
        .stderr(predicate::str::contains("Practice paper: 3 questions, 6 marks"));
}

#[test]
fn paper_writes_document_json() {
    let dir = TempDir::new().unwrap();
    let spec_path = dir.path().join("paper.toml");
    let out_path = dir.path().join("out/paper.json");
    std::fs::write(&spec_path, SAMPLE_SPEC).unwrap();

    examsmith()
        .arg("paper")
        .arg("--spec")
        .arg(&spec_path)
        .arg("--out")
        .arg(&out_path)
        .assert()
        .success()
        .stderr(predicate::str::contains("Paper document saved to"));

    let doc: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out_path).unwrap()).unwrap();
    assert_eq!(doc["name"], "Practice paper");
    assert_eq!(doc["questions"].as_array().unwrap().len(), 3);
    assert_eq!(doc["questions"][0]["instanceId"], "warmup");
    assert_eq!(doc["questions"][1]["instanceId"], "q2");
}

#[test]
fn paper_missing_spec_fails() {
    examsmith()
        .args(["paper", "--spec", "no_such_spec.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn paper_empty_spec_fails() {
    let dir = TempDir::new().unwrap();
    let spec_path = dir.path().join("empty.toml");
    std::fs::write(&spec_path, "[paper]\nname = \"Empty\"\nmode = \"calc\"\n").unwrap();

    examsmith()
        .arg("paper")
        .arg("--spec")
        .arg(&spec_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no [[questions]]"));
}

#[test]
fn mark_missing_paper_fails() {
    examsmith()
        .args(["mark", "--paper", "no_paper.json", "--responses", "no_responses.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn topics_table() {
    examsmith()
        .arg("topics")
        .assert()
        .success()
        .stdout(predicate::str::contains("N7"))
        .stdout(predicate::str::contains("Multiplication"))
        .stdout(predicate::str::contains("Negative numbers"));
}

#[test]
fn help_output() {
    examsmith()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "GCSE-style maths question generator and marker",
        ));
}

#[test]
fn version_output() {
    examsmith()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("examsmith"));
}
