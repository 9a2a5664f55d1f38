//! Core library for examsmith: deterministic generation and self-marking of
//! GCSE Foundation number questions (topics N7–N9).
//!
//! Everything here is pure computation. A host — the bundled CLI, or a web
//! UI — renders the [`model::Question`] data contract and feeds typed
//! answers back through the [`marking::AnswerContainer`] boundary. A
//! question is fully determined by `(topic, marks, paper mode, seed)`, and
//! the seed actually used is recorded on the question so it can be
//! regenerated exactly.

mod context;
mod topics;

pub mod engine;
pub mod error;
pub mod marking;
pub mod model;
pub mod numeric;
pub mod rng;

pub use engine::{generate_batch, generate_question, QuestionRequest};
pub use error::AnswerParseError;
pub use marking::{mark_question, AnswerContainer, MarkReport, ResponseMap};
pub use model::{
    AnswerPart, ExpectedAnswer, InputKind, InputSpec, PaperMode, Question, TopicCode, TOPICS,
};
pub use rng::{Seed, SeededRng};
