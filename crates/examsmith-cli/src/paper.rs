//! Paper specifications (TOML in) and paper documents (JSON out).
//!
//! A spec lists the questions to generate; the document is the saved
//! result, addressable later by the `mark` command. Question input ids
//! in a document are fully prefixed, so one responses file can cover a
//! whole paper without collisions.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use examsmith_core::engine::QuestionRequest;
use examsmith_core::model::{PaperMode, Question, TopicCode};
use examsmith_core::rng::Seed;

// ---------------------------------------------------------------------------
// Spec (TOML)
// ---------------------------------------------------------------------------

/// On-disk description of a paper to generate.
#[derive(Debug, Deserialize)]
pub struct PaperSpec {
    pub paper: PaperMeta,
    #[serde(default)]
    pub questions: Vec<QuestionSpec>,
}

#[derive(Debug, Deserialize)]
pub struct PaperMeta {
    pub name: String,
    /// Default paper mode; individual questions may override.
    pub mode: PaperMode,
    /// Paper-level seed. When present, unseeded questions derive their
    /// seed from it by position so the whole paper replays.
    pub seed: Option<SeedSpec>,
}

#[derive(Debug, Deserialize)]
pub struct QuestionSpec {
    pub topic: TopicCode,
    pub marks: u32,
    pub mode: Option<PaperMode>,
    pub seed: Option<SeedSpec>,
    /// Instance id override; defaults to `q1`, `q2`, ... by position.
    pub id: Option<String>,
}

/// Seed field in a spec: bare numbers replay exactly, any other text is
/// hashed.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SeedSpec {
    Number(u32),
    Text(String),
}

impl SeedSpec {
    fn to_seed(&self) -> Seed {
        match self {
            SeedSpec::Number(v) => Seed::Value(*v),
            SeedSpec::Text(t) => parse_seed(Some(t)),
        }
    }
}

/// Interpret a seed string: digit strings replay exactly, any other
/// text is hashed, blank or absent means fresh entropy.
pub fn parse_seed(text: Option<&str>) -> Seed {
    let Some(text) = text.map(str::trim) else {
        return Seed::Auto;
    };
    if text.is_empty() {
        return Seed::Auto;
    }
    match text.parse::<u32>() {
        Ok(v) => Seed::Value(v),
        Err(_) => Seed::Phrase(text.to_string()),
    }
}

pub fn load_spec(path: &Path) -> Result<PaperSpec> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read paper spec from {}", path.display()))?;
    let spec: PaperSpec = toml::from_str(&content)
        .with_context(|| format!("failed to parse paper spec {}", path.display()))?;
    anyhow::ensure!(
        !spec.questions.is_empty(),
        "paper spec {} has no [[questions]]",
        path.display()
    );
    debug!(
        paper = %spec.paper.name,
        questions = spec.questions.len(),
        "paper spec loaded"
    );
    Ok(spec)
}

impl PaperSpec {
    /// One request per question. Question-level mode and seed override
    /// the paper-level values; under a paper seed, unseeded questions
    /// get `paper seed + position` so they replay too.
    pub fn requests(&self) -> Vec<QuestionRequest> {
        let paper_seed = self.paper.seed.as_ref().map(|s| s.to_seed().resolve());
        self.questions
            .iter()
            .enumerate()
            .map(|(i, q)| {
                let mode = q.mode.unwrap_or(self.paper.mode);
                let seed = match (&q.seed, paper_seed) {
                    (Some(s), _) => s.to_seed(),
                    (None, Some(base)) => Seed::Value(base.wrapping_add(i as u32)),
                    (None, None) => Seed::Auto,
                };
                let mut request = QuestionRequest::new(q.topic, q.marks, mode).with_seed(seed);
                if let Some(id) = &q.id {
                    request = request.with_instance_id(id.clone());
                }
                request
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Document (JSON)
// ---------------------------------------------------------------------------

/// Saved output of `paper --out`: enough to render the paper and mark
/// responses against it later.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperDocument {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub questions: Vec<Question>,
}

impl PaperDocument {
    pub fn build(name: &str, questions: Vec<Question>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            created_at: Utc::now(),
            questions,
        }
    }

    /// Total marks across the paper.
    pub fn marks_total(&self) -> u32 {
        self.questions.iter().map(|q| q.marks_total).sum()
    }

    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize paper")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write paper to {}", path.display()))?;
        Ok(())
    }

    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read paper from {}", path.display()))?;
        let document: PaperDocument =
            serde_json::from_str(&content).context("failed to parse paper JSON")?;
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(toml_text: &str) -> PaperSpec {
        toml::from_str(toml_text).unwrap()
    }

    #[test]
    fn seed_strings_parse_by_shape() {
        assert_eq!(parse_seed(None), Seed::Auto);
        assert_eq!(parse_seed(Some("   ")), Seed::Auto);
        assert_eq!(parse_seed(Some("123")), Seed::Value(123));
        assert_eq!(
            parse_seed(Some("bonfire night")),
            Seed::Phrase("bonfire night".into())
        );
        // too large for u32, falls back to a phrase
        assert_eq!(
            parse_seed(Some("99999999999")),
            Seed::Phrase("99999999999".into())
        );
    }

    #[test]
    fn paper_seed_drives_unseeded_questions_by_position() {
        let spec = spec(
            r#"
[paper]
name = "Mock"
mode = "noncalc"
seed = 100

[[questions]]
topic = "N7"
marks = 1

[[questions]]
topic = "N8"
marks = 2
seed = "777"

[[questions]]
topic = "N9"
marks = 3
"#,
        );
        let requests = spec.requests();
        assert_eq!(requests[0].seed, Seed::Value(100));
        assert_eq!(requests[1].seed, Seed::Value(777));
        assert_eq!(requests[2].seed, Seed::Value(102));
    }

    #[test]
    fn question_mode_overrides_paper_mode() {
        let spec = spec(
            r#"
[paper]
name = "Mock"
mode = "noncalc"

[[questions]]
topic = "N7"
marks = 2

[[questions]]
topic = "N7"
marks = 2
mode = "calc"
"#,
        );
        let requests = spec.requests();
        assert_eq!(requests[0].paper_mode, PaperMode::NonCalc);
        assert_eq!(requests[1].paper_mode, PaperMode::Calc);
    }

    #[test]
    fn unseeded_paper_leaves_questions_on_entropy() {
        let spec = spec(
            r#"
[paper]
name = "Mock"
mode = "calc"

[[questions]]
topic = "N9"
marks = 4
id = "starter"
"#,
        );
        let requests = spec.requests();
        assert_eq!(requests[0].seed, Seed::Auto);
        assert_eq!(requests[0].instance_id.as_deref(), Some("starter"));
    }

    #[test]
    fn document_roundtrips_through_json() {
        use examsmith_core::engine::{generate_batch, QuestionRequest};

        let questions = generate_batch(vec![
            QuestionRequest::new(TopicCode::N7, 1, PaperMode::NonCalc).with_seed(5u32),
            QuestionRequest::new(TopicCode::N9, 3, PaperMode::Calc).with_seed(6u32),
        ]);
        let document = PaperDocument::build("Mock paper", questions);
        assert_eq!(document.marks_total(), 4);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("paper.json");
        document.save_json(&path).unwrap();
        let loaded = PaperDocument::load_json(&path).unwrap();

        assert_eq!(loaded.name, "Mock paper");
        assert_eq!(loaded.questions.len(), 2);
        assert_eq!(loaded.questions[0].instance_id, "q1");
        assert_eq!(loaded.questions[1].seed, 6);
    }
}
