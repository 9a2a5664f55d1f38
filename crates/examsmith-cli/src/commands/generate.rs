//! The `examsmith generate` command.

use anyhow::Result;

use examsmith_core::engine::{generate_question, QuestionRequest};
use examsmith_core::model::{PaperMode, TopicCode};

use crate::paper::parse_seed;
use crate::render::render_text;

pub fn execute(
    topic: String,
    marks: u32,
    mode: String,
    seed: Option<String>,
    format: String,
    show_answers: bool,
) -> Result<()> {
    let topic: TopicCode = topic.parse().map_err(anyhow::Error::msg)?;
    let mode: PaperMode = mode.parse().map_err(anyhow::Error::msg)?;

    let request =
        QuestionRequest::new(topic, marks, mode).with_seed(parse_seed(seed.as_deref()));
    let question = generate_question(&request);

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&question)?);
        return Ok(());
    }

    eprintln!(
        "{} | {} marks | {} paper | seed {}",
        question.topic_code, question.marks_total, question.paper_mode, question.seed
    );
    for part in &question.parts {
        let text = render_text(&part.text_html);
        if !text.is_empty() {
            println!("{text}");
        }
    }
    if show_answers {
        println!();
        println!("Answers:");
        for answer in question.answer_list() {
            println!("  {answer}");
        }
    }

    Ok(())
}
