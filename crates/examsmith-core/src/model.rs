//! Core data model types for examsmith.
//!
//! These are the fundamental types the topic generators, the assembly
//! stage, and the marking engine all share to represent questions,
//! answer parts, and expected answers. A host renderer consumes the
//! serialized form; field names follow the established camelCase wire
//! contract.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::numeric::{fmt_dp, fmt_plain, round_to};

/// Which exam paper a question is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaperMode {
    Calc,
    NonCalc,
}

impl PaperMode {
    /// True on the calculator paper, where awkward decimals are fair game.
    pub fn is_calc(self) -> bool {
        matches!(self, PaperMode::Calc)
    }
}

impl fmt::Display for PaperMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaperMode::Calc => write!(f, "calc"),
            PaperMode::NonCalc => write!(f, "noncalc"),
        }
    }
}

impl FromStr for PaperMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "calc" | "calculator" => Ok(PaperMode::Calc),
            "noncalc" | "non-calc" | "noncalculator" | "non-calculator" => Ok(PaperMode::NonCalc),
            other => Err(format!("unknown paper mode: {other}")),
        }
    }
}

/// Topic codes wired into the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TopicCode {
    N7,
    N8,
    N9,
}

impl fmt::Display for TopicCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TopicCode::N7 => write!(f, "N7"),
            TopicCode::N8 => write!(f, "N8"),
            TopicCode::N9 => write!(f, "N9"),
        }
    }
}

impl FromStr for TopicCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "N7" => Ok(TopicCode::N7),
            "N8" => Ok(TopicCode::N8),
            "N9" => Ok(TopicCode::N9),
            other => Err(format!("unknown topic code: {other}")),
        }
    }
}

/// An entry in the topic registry.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TopicInfo {
    /// Code used to request the topic.
    pub code: TopicCode,
    /// Human-readable syllabus name.
    pub name: &'static str,
}

/// Registry of every topic the generator can produce. Codes here and
/// codes handled by the generator dispatch must stay in one-to-one
/// correspondence.
pub const TOPICS: &[TopicInfo] = &[
    TopicInfo {
        code: TopicCode::N7,
        name: "Multiplication (integers & decimals)",
    },
    TopicInfo {
        code: TopicCode::N8,
        name: "Division (integers & decimals)",
    },
    TopicInfo {
        code: TopicCode::N9,
        name: "Negative numbers (mixed operations)",
    },
];

/// Widget family the renderer should present for a part's answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InputKind {
    Number,
    Integer,
    Fraction,
    Pair,
    Triple,
    Money,
    StandardForm,
    PrimeFactors,
    Order,
    Symbol,
}

/// Where and how a part collects its answer.
///
/// Composite kinds derive sibling element ids from `id`: `fraction`
/// reads `{id}N` and `{id}D`, `pair` reads `{id}A` and `{id}B`,
/// `triple` adds `{id}C`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputSpec {
    /// Unique within a rendered question instance.
    pub id: String,
    /// Widget family.
    pub kind: InputKind,
    /// Placeholder text for multi-box kinds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholders: Option<[String; 2]>,
    /// Bold labels shown before each box of a multi-box kind.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<[String; 2]>,
}

/// The answer the marking engine compares a student's entry against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ExpectedAnswer {
    /// Plain numeric target, compared with a relative tolerance.
    Number { value: f64 },
    /// Compared after reduction to lowest terms.
    Fraction { n: i64, d: i64 },
    /// Two numeric targets with their own partial-credit rule.
    Pair { value: [f64; 2] },
    /// Rounded target with the unrounded value kept for chained parts.
    Rounded { value: f64, raw: f64, dp: u32 },
    /// Expected as mantissa-times-power-of-ten text, compared by value.
    StandardForm { value: f64 },
    /// Compared by exact prime-to-exponent map equality.
    PrimeFactors { factors: BTreeMap<u64, u32> },
    /// Compared by exact token sequence equality.
    Order { tokens: Vec<String> },
    /// Compared by exact text equality.
    Symbol { value: String },
}

/// One prompt fragment of a question. Scorable parts carry an input
/// spec and an expected answer; display-only parts carry neither.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerPart {
    /// Marks awardable for this part.
    pub marks: u32,
    /// Rich-text prompt fragment; may embed a data table.
    pub text_html: String,
    /// Input contract for the renderer, absent on display-only parts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<InputSpec>,
    /// Marking target, absent on display-only parts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<ExpectedAnswer>,
}

impl AnswerPart {
    fn with_input(
        id: &str,
        text_html: impl Into<String>,
        marks: u32,
        kind: InputKind,
        answer: ExpectedAnswer,
    ) -> Self {
        Self {
            marks,
            text_html: text_html.into(),
            input: Some(InputSpec {
                id: id.to_string(),
                kind,
                placeholders: None,
                labels: None,
            }),
            answer: Some(answer),
        }
    }

    /// Free-decimal answer box.
    pub fn number(id: &str, text_html: impl Into<String>, marks: u32, value: f64) -> Self {
        Self::with_input(
            id,
            text_html,
            marks,
            InputKind::Number,
            ExpectedAnswer::Number { value },
        )
    }

    /// Whole-number answer box; non-integer entries score zero.
    pub fn integer(id: &str, text_html: impl Into<String>, marks: u32, value: i64) -> Self {
        Self::with_input(
            id,
            text_html,
            marks,
            InputKind::Integer,
            ExpectedAnswer::Number {
                value: value as f64,
            },
        )
    }

    /// Money answer box; a leading currency symbol is forgiven at marking.
    pub fn money(id: &str, text_html: impl Into<String>, marks: u32, value: f64) -> Self {
        Self::with_input(
            id,
            text_html,
            marks,
            InputKind::Money,
            ExpectedAnswer::Number { value },
        )
    }

    /// Numerator/denominator boxes.
    pub fn fraction(id: &str, text_html: impl Into<String>, marks: u32, n: i64, d: i64) -> Self {
        Self::with_input(
            id,
            text_html,
            marks,
            InputKind::Fraction,
            ExpectedAnswer::Fraction { n, d },
        )
    }

    /// Two answer boxes marked together, with placeholder text per box.
    pub fn pair(
        id: &str,
        text_html: impl Into<String>,
        marks: u32,
        value: [f64; 2],
        placeholders: [&str; 2],
    ) -> Self {
        let mut part = Self::with_input(
            id,
            text_html,
            marks,
            InputKind::Pair,
            ExpectedAnswer::Pair { value },
        );
        if let Some(input) = part.input.as_mut() {
            input.placeholders = Some(placeholders.map(str::to_string));
        }
        part
    }

    /// Answer requiring rounding to `dp` places, with three-tier credit.
    /// `kind` is [`InputKind::Number`] or [`InputKind::Money`].
    pub fn rounded(
        id: &str,
        text_html: impl Into<String>,
        marks: u32,
        raw: f64,
        dp: u32,
        kind: InputKind,
    ) -> Self {
        Self::with_input(
            id,
            text_html,
            marks,
            kind,
            ExpectedAnswer::Rounded {
                value: round_to(raw, dp as i32),
                raw,
                dp,
            },
        )
    }

    /// Standard-form entry box for an already-resolved value.
    pub fn standard_form(id: &str, text_html: impl Into<String>, marks: u32, value: f64) -> Self {
        Self::with_input(
            id,
            text_html,
            marks,
            InputKind::StandardForm,
            ExpectedAnswer::StandardForm { value },
        )
    }

    /// Standard-form entry box given as mantissa and power of ten.
    pub fn standard_form_scaled(
        id: &str,
        text_html: impl Into<String>,
        marks: u32,
        mantissa: f64,
        exponent: i32,
    ) -> Self {
        Self::standard_form(id, text_html, marks, mantissa * 10f64.powi(exponent))
    }

    /// Drag-to-order sequence.
    pub fn order(id: &str, text_html: impl Into<String>, marks: u32, tokens: Vec<String>) -> Self {
        Self::with_input(
            id,
            text_html,
            marks,
            InputKind::Order,
            ExpectedAnswer::Order { tokens },
        )
    }

    /// Prime-factorisation keypad entry.
    pub fn prime_factors(
        id: &str,
        text_html: impl Into<String>,
        marks: u32,
        factors: BTreeMap<u64, u32>,
    ) -> Self {
        Self::with_input(
            id,
            text_html,
            marks,
            InputKind::PrimeFactors,
            ExpectedAnswer::PrimeFactors { factors },
        )
    }

    /// Single comparison-symbol box.
    pub fn symbol(id: &str, text_html: impl Into<String>, marks: u32, value: &str) -> Self {
        Self::with_input(
            id,
            text_html,
            marks,
            InputKind::Symbol,
            ExpectedAnswer::Symbol {
                value: value.to_string(),
            },
        )
    }

    /// Display-only block with no input and no marks. Useful for putting
    /// tables above part (a)/(b) so the answer boxes align with their
    /// question lines.
    pub fn display(text_html: impl Into<String>) -> Self {
        Self {
            marks: 0,
            text_html: text_html.into(),
            input: None,
            answer: None,
        }
    }

    /// True when this part collects and scores an answer.
    pub fn is_scorable(&self) -> bool {
        self.input.is_some() && self.answer.is_some() && self.marks > 0
    }

    /// Human-readable expected answer for an optional reveal, empty for
    /// display-only parts. Rounded answers print at their required
    /// precision; plain money answers carry the currency symbol.
    pub fn display_answer(&self) -> String {
        let Some(answer) = &self.answer else {
            return String::new();
        };
        match answer {
            ExpectedAnswer::Fraction { n, d } => format!("{n}/{d}"),
            ExpectedAnswer::Pair { value } => {
                format!("({}, {})", fmt_plain(value[0]), fmt_plain(value[1]))
            }
            ExpectedAnswer::Rounded { value, dp, .. } => fmt_dp(*value, *dp as usize),
            ExpectedAnswer::Number { value }
                if self.input.as_ref().is_some_and(|i| i.kind == InputKind::Money) =>
            {
                format!("£{}", fmt_dp(*value, 2))
            }
            ExpectedAnswer::Number { value } | ExpectedAnswer::StandardForm { value } => {
                fmt_plain(*value)
            }
            ExpectedAnswer::PrimeFactors { factors } => factors
                .iter()
                .map(|(p, e)| {
                    if *e == 1 {
                        p.to_string()
                    } else {
                        format!("{p}^{e}")
                    }
                })
                .collect::<Vec<_>>()
                .join(" × "),
            ExpectedAnswer::Order { tokens } => tokens.join(", "),
            ExpectedAnswer::Symbol { value } => value.clone(),
        }
    }
}

/// A fully assembled question.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Topic this question was generated for.
    pub topic_code: TopicCode,
    /// Total marks; scorable part marks always sum to this.
    pub marks_total: u32,
    /// Paper the question targets.
    pub paper_mode: PaperMode,
    /// Prompt fragments in display order.
    pub parts: Vec<AnswerPart>,
    /// Resolved RNG seed, recorded so the question can be replayed.
    pub seed: u32,
    /// Prefix namespacing every input id in this question.
    pub instance_id: String,
}

impl Question {
    /// Human-readable expected answers, one per scorable part.
    pub fn answer_list(&self) -> Vec<String> {
        self.parts
            .iter()
            .filter(|p| p.answer.is_some() && p.marks > 0)
            .map(AnswerPart::display_answer)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paper_mode_display_and_parse() {
        assert_eq!(PaperMode::Calc.to_string(), "calc");
        assert_eq!(PaperMode::NonCalc.to_string(), "noncalc");
        assert_eq!("calc".parse::<PaperMode>().unwrap(), PaperMode::Calc);
        assert_eq!("NonCalc".parse::<PaperMode>().unwrap(), PaperMode::NonCalc);
        assert_eq!(
            "non-calculator".parse::<PaperMode>().unwrap(),
            PaperMode::NonCalc
        );
        assert!("mental".parse::<PaperMode>().is_err());
    }

    #[test]
    fn topic_code_display_and_parse() {
        assert_eq!(TopicCode::N7.to_string(), "N7");
        assert_eq!("n9".parse::<TopicCode>().unwrap(), TopicCode::N9);
        assert!("N10".parse::<TopicCode>().is_err());
    }

    #[test]
    fn registry_covers_every_code() {
        for code in [TopicCode::N7, TopicCode::N8, TopicCode::N9] {
            assert!(TOPICS.iter().any(|t| t.code == code));
        }
        assert_eq!(TOPICS.len(), 3);
    }

    #[test]
    fn constructors_fill_the_contract() {
        let part = AnswerPart::money("q1", "Work out the cost.", 2, 12.5);
        assert_eq!(part.marks, 2);
        let input = part.input.as_ref().unwrap();
        assert_eq!(input.id, "q1");
        assert_eq!(input.kind, InputKind::Money);
        assert_eq!(part.answer, Some(ExpectedAnswer::Number { value: 12.5 }));
        assert!(part.is_scorable());

        let display = AnswerPart::display("<p>A table.</p>");
        assert!(display.input.is_none());
        assert!(!display.is_scorable());
    }

    #[test]
    fn rounded_constructor_prerounds_the_target() {
        let part = AnswerPart::rounded("q2", "Round it.", 3, 7.8351, 2, InputKind::Number);
        match part.answer.unwrap() {
            ExpectedAnswer::Rounded { value, raw, dp } => {
                assert_eq!(value, 7.84);
                assert_eq!(raw, 7.8351);
                assert_eq!(dp, 2);
            }
            other => panic!("unexpected answer: {other:?}"),
        }
    }

    #[test]
    fn pair_constructor_carries_placeholders() {
        let part = AnswerPart::pair(
            "q3",
            "How many, with how much left?",
            2,
            [4.0, 7.0],
            ["containers", "litres left over"],
        );
        let input = part.input.unwrap();
        assert_eq!(input.kind, InputKind::Pair);
        assert_eq!(
            input.placeholders,
            Some(["containers".to_string(), "litres left over".to_string()])
        );
    }

    #[test]
    fn display_answers_follow_reveal_formats() {
        assert_eq!(
            AnswerPart::fraction("f", "", 1, 3, 4).display_answer(),
            "3/4"
        );
        assert_eq!(
            AnswerPart::pair("p", "", 2, [4.0, 7.5], ["a", "b"]).display_answer(),
            "(4, 7.5)"
        );
        assert_eq!(
            AnswerPart::rounded("r", "", 3, 7.8351, 2, InputKind::Number).display_answer(),
            "7.84"
        );
        assert_eq!(
            AnswerPart::money("m", "", 1, 12.5).display_answer(),
            "£12.50"
        );
        assert_eq!(AnswerPart::integer("i", "", 1, 72).display_answer(), "72");
        assert_eq!(AnswerPart::display("table").display_answer(), "");
    }

    #[test]
    fn rounded_money_reveals_at_required_precision_without_symbol() {
        let part = AnswerPart::rounded("rm", "", 3, 118.7447, 2, InputKind::Money);
        assert_eq!(part.display_answer(), "118.74");
    }

    #[test]
    fn answer_list_skips_display_parts() {
        let q = Question {
            topic_code: TopicCode::N7,
            marks_total: 4,
            paper_mode: PaperMode::Calc,
            parts: vec![
                AnswerPart::display("<p>A table.</p>"),
                AnswerPart::money("a", "(a)", 1, 30.0),
                AnswerPart::money("b", "(b)", 3, 52.5),
            ],
            seed: 42,
            instance_id: "q1".into(),
        };
        assert_eq!(q.answer_list(), vec!["£30.00", "£52.50"]);
    }

    #[test]
    fn question_serde_uses_wire_names() {
        let q = Question {
            topic_code: TopicCode::N8,
            marks_total: 1,
            paper_mode: PaperMode::NonCalc,
            parts: vec![AnswerPart::integer("p", "Share equally.", 1, 12)],
            seed: 7,
            instance_id: "N8_1_noncalc_7".into(),
        };
        let json = serde_json::to_string(&q).unwrap();
        assert!(json.contains("\"topicCode\":\"N8\""));
        assert!(json.contains("\"paperMode\":\"noncalc\""));
        assert!(json.contains("\"marksTotal\":1"));
        assert!(json.contains("\"textHtml\""));
        assert!(json.contains("\"type\":\"number\""));
        let back: Question = serde_json::from_str(&json).unwrap();
        assert_eq!(back.instance_id, "N8_1_noncalc_7");
    }
}
