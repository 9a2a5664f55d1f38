//! The `examsmith mark` command.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use examsmith_core::marking::{mark_question, ResponseMap};

use crate::paper::PaperDocument;

pub fn execute(paper_path: PathBuf, responses_path: PathBuf, show_answers: bool) -> Result<()> {
    let document = PaperDocument::load_json(&paper_path)?;
    let content = std::fs::read_to_string(&responses_path)
        .with_context(|| format!("failed to read responses from {}", responses_path.display()))?;
    let values: HashMap<String, String> =
        serde_json::from_str(&content).context("failed to parse responses JSON")?;
    let mut container = ResponseMap::from(values);

    let mut table = Table::new();
    table.set_header(vec!["Question", "Topic", "Mode", "Score"]);

    let mut total_score = 0;
    let mut total_max = 0;
    let mut reveals: Vec<String> = Vec::new();

    for (i, question) in document.questions.iter().enumerate() {
        let report = mark_question(&mut container, question);
        total_score += report.score;
        total_max += report.max;

        table.add_row(vec![
            Cell::new(format!("{} ({})", i + 1, question.instance_id)),
            Cell::new(question.topic_code),
            Cell::new(question.paper_mode),
            Cell::new(format!("{} / {}", report.score, report.max)),
        ]);

        if show_answers {
            for (part, &awarded) in question.parts.iter().zip(&report.part_scores) {
                let Some(input) = part.input.as_ref() else {
                    continue;
                };
                if part.is_scorable() && awarded < part.marks {
                    reveals.push(format!("  {}: {}", input.id, part.display_answer()));
                }
            }
        }
    }

    eprintln!("{table}");
    if !reveals.is_empty() {
        eprintln!();
        eprintln!("Expected answers where marks were lost:");
        for line in &reveals {
            eprintln!("{line}");
        }
    }
    println!("Total: {total_score} / {total_max}");

    Ok(())
}
