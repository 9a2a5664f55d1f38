//! The `examsmith paper` command.

use std::path::PathBuf;

use anyhow::Result;

use examsmith_core::engine::generate_batch;

use crate::paper::{load_spec, PaperDocument};
use crate::render::render_text;

pub fn execute(spec_path: PathBuf, out: Option<PathBuf>, show_answers: bool) -> Result<()> {
    let spec = load_spec(&spec_path)?;
    let questions = generate_batch(spec.requests());
    let document = PaperDocument::build(&spec.paper.name, questions);

    eprintln!(
        "{}: {} questions, {} marks",
        document.name,
        document.questions.len(),
        document.marks_total()
    );

    if let Some(path) = &out {
        document.save_json(path)?;
        eprintln!("Paper document saved to: {}", path.display());
        return Ok(());
    }

    for (i, question) in document.questions.iter().enumerate() {
        println!("Question {} ({} marks)", i + 1, question.marks_total);
        for part in &question.parts {
            let text = render_text(&part.text_html);
            if !text.is_empty() {
                println!("{text}");
            }
        }
        if show_answers {
            for answer in question.answer_list() {
                println!("  answer: {answer}");
            }
        }
        println!();
    }

    Ok(())
}
