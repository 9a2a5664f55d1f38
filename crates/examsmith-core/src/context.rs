//! Narrative lead-in sentences for higher-mark questions.
//!
//! Questions worth 3 or more marks open with one of three scenario
//! sentences chosen at random, spliced into the first prompt fragment.
//! The maths is unchanged; only the framing varies. The two scenario
//! topics whose prompts already open with their own setting (N7 and N8)
//! are left alone.

use crate::model::{AnswerPart, TopicCode};
use crate::rng::SeededRng;

const LEADS: [&str; 3] = [
    "A student is using numbers from an everyday situation.",
    "Someone is using numbers to complete a practical task.",
    "A real-life problem requires interpreting numbers accurately.",
];

/// Insert `lead` into `fragment`. When the fragment opens with a `<p>`
/// tag the lead goes just inside it so the paragraph stays intact;
/// otherwise the lead is prepended.
fn splice_lead(lead: &str, fragment: &str) -> String {
    let trimmed = fragment.trim_start();
    let opens_paragraph = trimmed
        .get(..2)
        .is_some_and(|head| head.eq_ignore_ascii_case("<p"));
    if opens_paragraph {
        let bytes = fragment.as_bytes();
        let tag_start = bytes
            .windows(2)
            .position(|w| w[0] == b'<' && (w[1] == b'p' || w[1] == b'P'));
        if let Some(idx) = tag_start {
            if let Some(close) = fragment[idx..].find('>') {
                let end = idx + close;
                return format!("{}{} {}", &fragment[..=end], lead, &fragment[end + 1..]);
            }
        }
    }
    format!("{lead} {fragment}")
}

/// Splice a randomly chosen lead sentence into the first non-empty
/// prompt fragment of a 3+ mark question. Consumes exactly one draw
/// when it applies and none otherwise.
pub(crate) fn inject_lead(
    topic: TopicCode,
    marks_total: u32,
    parts: &mut [AnswerPart],
    rng: &mut SeededRng,
) {
    if marks_total < 3 || matches!(topic, TopicCode::N7 | TopicCode::N8) {
        return;
    }
    let lead = *rng.choice(&LEADS);
    for part in parts.iter_mut() {
        if !part.text_html.trim().is_empty() {
            part.text_html = splice_lead(lead, &part.text_html);
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splice_goes_inside_a_leading_paragraph_tag() {
        let out = splice_lead("Lead here.", "<p>The bank balance is low.</p>");
        assert_eq!(out, "<p>Lead here. The bank balance is low.</p>");
    }

    #[test]
    fn splice_keeps_tag_attributes() {
        let out = splice_lead("Lead here.", r#"<p class="stem">Body.</p>"#);
        assert_eq!(out, r#"<p class="stem">Lead here. Body.</p>"#);
    }

    #[test]
    fn splice_prepends_when_fragment_is_not_a_paragraph() {
        let out = splice_lead("Lead here.", "Body only.");
        assert_eq!(out, "Lead here. Body only.");
    }

    #[test]
    fn splice_handles_leading_whitespace_before_the_tag() {
        let out = splice_lead("Lead.", "  <p>Body.</p>");
        assert_eq!(out, "  <p>Lead. Body.</p>");
    }

    #[test]
    fn low_mark_questions_are_untouched_and_draw_nothing() {
        let mut rng = SeededRng::new(99);
        let before = rng.float();
        let mut rng = SeededRng::new(99);
        let mut parts = vec![AnswerPart::integer("a", "<p>Count.</p>", 1, 3)];
        inject_lead(TopicCode::N9, 2, &mut parts, &mut rng);
        assert_eq!(parts[0].text_html, "<p>Count.</p>");
        assert_eq!(rng.float(), before);
    }

    #[test]
    fn scenario_topics_are_excluded() {
        for topic in [TopicCode::N7, TopicCode::N8] {
            let mut rng = SeededRng::new(1);
            let mut parts = vec![AnswerPart::integer("a", "<p>Count.</p>", 5, 3)];
            inject_lead(topic, 5, &mut parts, &mut rng);
            assert_eq!(parts[0].text_html, "<p>Count.</p>");
        }
    }

    #[test]
    fn lead_lands_in_first_non_empty_fragment_only() {
        let mut rng = SeededRng::new(7);
        let mut parts = vec![
            AnswerPart::display(""),
            AnswerPart::integer("a", "<p>First real text.</p>", 2, 1),
            AnswerPart::integer("b", "<p>Second.</p>", 1, 2),
        ];
        inject_lead(TopicCode::N9, 3, &mut parts, &mut rng);
        assert!(parts[0].text_html.is_empty());
        assert!(LEADS.iter().any(|l| parts[1].text_html.contains(l)));
        assert_eq!(parts[2].text_html, "<p>Second.</p>");
    }

    #[test]
    fn injection_consumes_exactly_one_draw() {
        let mut probe = SeededRng::new(123);
        probe.float();
        let after_one = probe.float();

        let mut rng = SeededRng::new(123);
        let mut parts = vec![AnswerPart::integer("a", "<p>Text.</p>", 3, 1)];
        inject_lead(TopicCode::N9, 3, &mut parts, &mut rng);
        assert_eq!(rng.float(), after_one);
    }
}
