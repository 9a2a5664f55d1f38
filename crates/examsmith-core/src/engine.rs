//! Question assembly: seed resolution, topic dispatch, context
//! injection, mark balancing and instance-id namespacing.

use tracing::{debug, warn};

use crate::context;
use crate::model::{AnswerPart, PaperMode, Question, TopicCode};
use crate::rng::{Seed, SeededRng};
use crate::topics;

/// Everything needed to produce one question.
#[derive(Debug, Clone)]
pub struct QuestionRequest {
    pub topic: TopicCode,
    pub marks_total: u32,
    pub paper_mode: PaperMode,
    pub seed: Seed,
    /// Namespace prefix for input ids. Derived from the request when
    /// absent.
    pub instance_id: Option<String>,
}

impl QuestionRequest {
    pub fn new(topic: TopicCode, marks_total: u32, paper_mode: PaperMode) -> Self {
        Self {
            topic,
            marks_total,
            paper_mode,
            seed: Seed::Auto,
            instance_id: None,
        }
    }

    pub fn with_seed(mut self, seed: impl Into<Seed>) -> Self {
        self.seed = seed.into();
        self
    }

    pub fn with_instance_id(mut self, instance_id: impl Into<String>) -> Self {
        self.instance_id = Some(instance_id.into());
        self
    }
}

/// Generate the question described by `request`. Never fails: branches
/// whose constraints cannot be met fall back to a fixed question, and
/// mark totals are rebalanced if a generator misreports them.
pub fn generate_question(request: &QuestionRequest) -> Question {
    let seed = request.seed.resolve();
    let mut rng = SeededRng::new(seed);

    let mut parts = topics::build(request.topic, request.marks_total, request.paper_mode, &mut rng);
    context::inject_lead(request.topic, request.marks_total, &mut parts, &mut rng);
    ensure_marks_sum(&mut parts, request.marks_total, request.topic);

    let instance_id = request.instance_id.clone().unwrap_or_else(|| {
        format!(
            "{}_{}_{}_{seed}",
            request.topic, request.marks_total, request.paper_mode
        )
    });
    for part in &mut parts {
        if let Some(input) = part.input.as_mut() {
            input.id = format!("{instance_id}__{}", input.id);
        }
    }

    debug!(
        topic = %request.topic,
        marks = request.marks_total,
        mode = %request.paper_mode,
        seed,
        parts = parts.len(),
        "question generated"
    );

    Question {
        topic_code: request.topic,
        marks_total: request.marks_total,
        paper_mode: request.paper_mode,
        parts,
        seed,
        instance_id,
    }
}

/// Generate one question per request. Requests without an explicit
/// instance id get `q1`, `q2`, ... so the questions can share a
/// container without input-id collisions.
pub fn generate_batch(requests: Vec<QuestionRequest>) -> Vec<Question> {
    requests
        .into_iter()
        .enumerate()
        .map(|(i, mut request)| {
            if request.instance_id.is_none() {
                request.instance_id = Some(format!("q{}", i + 1));
            }
            generate_question(&request)
        })
        .collect()
}

/// Rebalance part marks when a generator's parts do not sum to the
/// requested total: every input-bearing part drops to 1 mark, decorative
/// parts to 0, and the last input-bearing part absorbs the difference.
fn ensure_marks_sum(parts: &mut [AnswerPart], marks_total: u32, topic: TopicCode) {
    let sum: u32 = parts.iter().map(|p| p.marks).sum();
    if sum == marks_total {
        return;
    }
    warn!(%topic, marks_total, sum, "part marks do not sum to the requested total; rebalancing");

    for part in parts.iter_mut() {
        part.marks = u32::from(part.input.is_some());
    }
    let rebased: i64 = parts.iter().map(|p| i64::from(p.marks)).sum();
    let diff = i64::from(marks_total) - rebased;
    if diff != 0 {
        if let Some(part) = parts.iter_mut().rev().find(|p| p.input.is_some()) {
            part.marks = (i64::from(part.marks) + diff).max(0) as u32;
        }
    }
}
