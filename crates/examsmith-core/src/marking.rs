//! Marking: reads a student's entries out of an answer container and
//! scores them against a question's expected answers.
//!
//! The comparison rules live here; everything host-specific (where the
//! text comes from, how ticks and crosses are shown) sits behind the
//! [`AnswerContainer`] trait. Unanswered or unparseable entries score
//! zero, they are never an error.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{AnswerPart, ExpectedAnswer, InputKind, InputSpec, Question};
use crate::numeric::{
    close, decimal_places_entered, fractions_equal, parse_number, parse_standard_form, round_to,
};

/// Host surface the marker reads answers from and writes feedback to.
///
/// `value` is the only required method; the feedback hooks default to
/// no-ops so non-visual hosts can ignore them.
pub trait AnswerContainer {
    /// Current text of the element `id`, or `None` when no such element
    /// exists.
    fn value(&self, id: &str) -> Option<String>;

    /// Remove correct/incorrect flags left by a previous pass.
    fn clear_marks(&mut self) {}

    /// Flag one element as correct or incorrect.
    fn mark(&mut self, _id: &str, _correct: bool) {}

    /// Record the question's score line.
    fn set_score_line(&mut self, _score: u32, _max: u32) {}
}

/// In-memory [`AnswerContainer`]: a map of input id to entered text that
/// remembers the feedback it receives. Used by the tests and the
/// command line in place of a live page.
#[derive(Debug, Clone, Default)]
pub struct ResponseMap {
    values: HashMap<String, String>,
    marks: HashMap<String, bool>,
    score_line: Option<(u32, u32)>,
}

impl ResponseMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text held by the element `id`.
    pub fn insert(&mut self, id: impl Into<String>, value: impl Into<String>) {
        self.values.insert(id.into(), value.into());
    }

    /// The verdict recorded for `id`, if the last pass touched it.
    pub fn mark_for(&self, id: &str) -> Option<bool> {
        self.marks.get(id).copied()
    }

    /// The `(score, max)` recorded by the last pass.
    pub fn score_line(&self) -> Option<(u32, u32)> {
        self.score_line
    }
}

impl From<HashMap<String, String>> for ResponseMap {
    fn from(values: HashMap<String, String>) -> Self {
        Self {
            values,
            ..Self::default()
        }
    }
}

impl AnswerContainer for ResponseMap {
    fn value(&self, id: &str) -> Option<String> {
        self.values.get(id).cloned()
    }

    fn clear_marks(&mut self) {
        self.marks.clear();
        self.score_line = None;
    }

    fn mark(&mut self, id: &str, correct: bool) {
        self.marks.insert(id.to_string(), correct);
    }

    fn set_score_line(&mut self, score: u32, max: u32) {
        self.score_line = Some((score, max));
    }
}

/// Outcome of marking one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkReport {
    pub score: u32,
    /// The question's mark total, not the sum of reachable part marks.
    pub max: u32,
    /// One entry per part, zero for display-only parts.
    pub part_scores: Vec<u32>,
}

/// Score every part of `question` against the entries in `container`.
pub fn mark_question<C: AnswerContainer>(container: &mut C, question: &Question) -> MarkReport {
    container.clear_marks();

    let max = question.marks_total;
    let mut score = 0;
    let mut part_scores = Vec::with_capacity(question.parts.len());

    for part in &question.parts {
        let part_score = score_part(container, part);
        score += part_score;
        part_scores.push(part_score);
    }

    container.set_score_line(score, max);
    MarkReport {
        score,
        max,
        part_scores,
    }
}

fn score_part<C: AnswerContainer>(container: &mut C, part: &AnswerPart) -> u32 {
    let (Some(input), Some(expected)) = (part.input.as_ref(), part.answer.as_ref()) else {
        return 0;
    };
    let pm = part.marks;
    if pm == 0 {
        return 0;
    }

    match expected {
        // Three-tier credit: full marks for the correct value rounded as
        // asked; one mark off for the correct value left unrounded, or
        // for a near miss within one unit of the last required place.
        ExpectedAnswer::Rounded { value, dp, .. } => {
            let (read, touched) = read_single(container, input);
            let awarded = match read {
                Some((got, raw)) => {
                    let dp = *dp as i32;
                    let unit = 10f64.powi(-dp);
                    let rounds_to_correct =
                        close(round_to(got, dp), *value, (unit / 1000.0).max(1e-9));
                    let within_one_unit = (got - *value).abs() <= unit + 1e-9;
                    if rounds_to_correct {
                        if decimal_places_entered(&raw) <= dp as usize {
                            pm
                        } else {
                            pm.saturating_sub(1)
                        }
                    } else if within_one_unit {
                        pm.saturating_sub(1)
                    } else {
                        0
                    }
                }
                None => 0,
            };
            for id in &touched {
                container.mark(id, awarded == pm);
            }
            awarded
        }

        // Both entries right earns everything; one right earns a single
        // mark when the part is worth at least two.
        ExpectedAnswer::Pair { value } => {
            let (read, touched) = read_pair(container, input);
            match read {
                Some((a, b)) => {
                    let ok_a = close(a, value[0], 1e-6);
                    let ok_b = close(b, value[1], 1e-6);
                    container.mark(&touched[0], ok_a);
                    container.mark(&touched[1], ok_b);
                    match (ok_a, ok_b) {
                        (true, true) => pm,
                        (true, false) | (false, true) if pm >= 2 => 1,
                        _ => 0,
                    }
                }
                None => {
                    for id in &touched {
                        container.mark(id, false);
                    }
                    0
                }
            }
        }

        ExpectedAnswer::Fraction { n, d } => {
            let (read, touched) = read_fraction(container, input);
            let ok = read.is_some_and(|(got_n, got_d)| fractions_equal((got_n, got_d), (*n, *d)));
            for id in &touched {
                container.mark(id, ok);
            }
            if ok { pm } else { 0 }
        }

        ExpectedAnswer::Number { value } | ExpectedAnswer::StandardForm { value } => {
            let (read, touched) = read_single(container, input);
            let ok =
                read.is_some_and(|(got, _)| close(got, *value, (value.abs() * 1e-8).max(1e-9)));
            for id in &touched {
                container.mark(id, ok);
            }
            if ok { pm } else { 0 }
        }

        ExpectedAnswer::PrimeFactors { factors } => {
            let (raw, touched) = read_text(container, &input.id);
            let ok = raw
                .as_deref()
                .and_then(parse_prime_factors)
                .is_some_and(|got| got == *factors);
            for id in &touched {
                container.mark(id, ok);
            }
            if ok { pm } else { 0 }
        }

        ExpectedAnswer::Order { tokens } => {
            let (raw, touched) = read_text(container, &input.id);
            let ok = raw.as_deref().is_some_and(|r| {
                let got: Vec<&str> = r.split(',').map(str::trim).collect();
                got.len() == tokens.len() && got.iter().zip(tokens).all(|(g, t)| g == t)
            });
            for id in &touched {
                container.mark(id, ok);
            }
            if ok { pm } else { 0 }
        }

        ExpectedAnswer::Symbol { value } => {
            let (raw, touched) = read_text(container, &input.id);
            let ok = raw.as_deref().is_some_and(|r| r.trim() == value);
            for id in &touched {
                container.mark(id, ok);
            }
            if ok { pm } else { 0 }
        }
    }
}

// --------------------------- read layer ---------------------------

/// A single numeric field, with the cleaned raw text kept for the
/// rounding tier. Money and free-number fields forgive one leading `£`;
/// integer fields reject anything with a fractional part; standard-form
/// fields additionally accept `a x 10^n` text.
fn read_single<C: AnswerContainer>(
    container: &C,
    input: &InputSpec,
) -> (Option<(f64, String)>, Vec<String>) {
    let Some(raw0) = container.value(&input.id) else {
        return (None, Vec::new());
    };
    let touched = vec![input.id.clone()];

    if input.kind == InputKind::Integer {
        let raw = raw0.trim().to_string();
        let value = match parse_number(&raw) {
            Ok(v) if v.fract() == 0.0 => Some((v, raw)),
            _ => None,
        };
        if value.is_none() {
            debug!(id = %input.id, raw = %raw0.trim(), "integer answer rejected");
        }
        return (value, touched);
    }

    let trimmed = raw0.trim();
    let raw = match trimmed.strip_prefix('£') {
        Some(rest) => rest.trim_start().to_string(),
        None => trimmed.to_string(),
    };
    let value = parse_number(&raw).ok().or_else(|| {
        if input.kind == InputKind::StandardForm {
            parse_standard_form(&raw).ok().map(|sf| sf.value())
        } else {
            None
        }
    });
    if value.is_none() {
        debug!(id = %input.id, raw = %raw, "answer text did not parse");
    }
    (value.map(|v| (v, raw)), touched)
}

fn read_pair<C: AnswerContainer>(
    container: &C,
    input: &InputSpec,
) -> (Option<(f64, f64)>, Vec<String>) {
    let a_id = format!("{}A", input.id);
    let b_id = format!("{}B", input.id);
    let a_raw = container.value(&a_id);
    let b_raw = container.value(&b_id);

    let mut touched = Vec::new();
    if a_raw.is_some() {
        touched.push(a_id);
    }
    if b_raw.is_some() {
        touched.push(b_id);
    }

    let values = match (a_raw, b_raw) {
        (Some(a), Some(b)) => parse_number(&a).ok().zip(parse_number(&b).ok()),
        _ => None,
    };
    (values, touched)
}

fn read_fraction<C: AnswerContainer>(
    container: &C,
    input: &InputSpec,
) -> (Option<(i64, i64)>, Vec<String>) {
    let n_id = format!("{}N", input.id);
    let d_id = format!("{}D", input.id);
    let n_raw = container.value(&n_id);
    let d_raw = container.value(&d_id);

    let mut touched = Vec::new();
    if n_raw.is_some() {
        touched.push(n_id);
    }
    if d_raw.is_some() {
        touched.push(d_id);
    }

    let values = match (n_raw, d_raw) {
        (Some(n), Some(d)) => {
            match (parse_fraction_box(&n), parse_fraction_box(&d)) {
                (Some(n), Some(d)) if d != 0 => Some((n, d)),
                _ => None,
            }
        }
        _ => None,
    };
    (values, touched)
}

/// One box of a fraction widget: a plain integer, with an empty box
/// reading as zero like an untouched numeric field.
fn parse_fraction_box(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(0);
    }
    let v: f64 = trimmed.parse().ok()?;
    (v.is_finite() && v.fract() == 0.0 && v.abs() < i64::MAX as f64).then_some(v as i64)
}

fn read_text<C: AnswerContainer>(container: &C, id: &str) -> (Option<String>, Vec<String>) {
    match container.value(id) {
        Some(raw) => (Some(raw), vec![id.to_string()]),
        None => (None, Vec::new()),
    }
}

/// Prime-factor text like `2^3 x 5` into a prime-to-exponent map.
/// Factors may be joined by `x`, `×` or `*`; an omitted exponent is 1;
/// repeated primes accumulate.
fn parse_prime_factors(text: &str) -> Option<BTreeMap<u64, u32>> {
    let cleaned = text.trim();
    if cleaned.is_empty() {
        return None;
    }
    let mut factors = BTreeMap::new();
    for token in cleaned.split(['x', 'X', '×', '*']) {
        let token = token.trim();
        let (base, exp) = match token.split_once('^') {
            Some((base, exp)) => (base.trim(), exp.trim().parse::<u32>().ok()?),
            None => (token, 1),
        };
        let prime: u64 = base.parse().ok()?;
        *factors.entry(prime).or_insert(0) += exp;
    }
    Some(factors)
}
