//! Topic question builders.
//!
//! Each topic module turns (marks, paper mode, rng) into the ordered
//! prompt parts for one question. Mark totals outside 1..=5 fall back
//! to a fixed one-mark drill so the builders stay total.
//!
//! Builders draw from the rng in a fixed documented order, so a seed
//! replays to an identical question. Rejection loops that re-roll
//! awkward values (whole-pound prices, multiples of ten) are bounded
//! and fall back to the nearest acceptable value rather than spinning.

use tracing::warn;

use crate::model::{AnswerPart, PaperMode, TopicCode};
use crate::rng::SeededRng;

mod division;
mod multiplication;
mod negatives;

/// Re-roll bound for the value-shape rejection loops below. The odds of
/// hitting it are negligible; it exists so every builder terminates.
const REROLL_CAP: u32 = 100;

/// Build the prompt parts for one question. The scenario pick is the
/// first draw for every topic.
pub(crate) fn build(
    topic: TopicCode,
    marks_total: u32,
    mode: PaperMode,
    rng: &mut SeededRng,
) -> Vec<AnswerPart> {
    match topic {
        TopicCode::N7 => multiplication::build(marks_total, mode, rng),
        TopicCode::N8 => division::build(marks_total, mode, rng),
        TopicCode::N9 => negatives::build(marks_total, mode, rng),
    }
}

// ------------------------- shared samplers -------------------------

/// Integer in `[min_p, max_p]` that is not a whole multiple of 100.
/// Used for prices in hundredths (pence) so amounts read like money
/// rather than whole pounds.
pub(super) fn pick_hundredths(rng: &mut SeededRng, min_p: i64, max_p: i64) -> i64 {
    for _ in 0..REROLL_CAP {
        let p = rng.int(min_p, max_p);
        if p % 100 != 0 {
            return p;
        }
    }
    warn!(min_p, max_p, "pick_hundredths exhausted its re-rolls");
    if min_p % 100 != 0 {
        min_p
    } else {
        min_p + 1
    }
}

/// Integer in `[min_t, max_t]` that is not a whole multiple of 10.
/// Used for quantities in tenths.
pub(super) fn pick_tenths(rng: &mut SeededRng, min_t: i64, max_t: i64) -> i64 {
    for _ in 0..REROLL_CAP {
        let t = rng.int(min_t, max_t);
        if t % 10 != 0 {
            return t;
        }
    }
    warn!(min_t, max_t, "pick_tenths exhausted its re-rolls");
    if min_t % 10 != 0 {
        min_t
    } else {
        min_t + 1
    }
}

/// Price in pounds with a non-zero pence component, drawn between
/// `min_p` and `max_p` hundredths.
pub(super) fn money_2dp(rng: &mut SeededRng, min_p: i64, max_p: i64) -> f64 {
    pick_hundredths(rng, min_p, max_p) as f64 / 100.0
}

/// Decimal in `[min, max]` with up to `dp` places that is not a whole
/// number.
pub(super) fn dec_dp(rng: &mut SeededRng, min: f64, max: f64, dp: u32) -> f64 {
    let scale = 10i64.pow(dp);
    let lo = (min * scale as f64).ceil() as i64;
    let hi = (max * scale as f64).floor() as i64;
    for _ in 0..500 {
        let k = rng.int(lo, hi);
        if k % scale != 0 {
            return k as f64 / scale as f64;
        }
    }
    warn!(min, max, dp, "dec_dp exhausted its re-rolls");
    (lo + 1) as f64 / scale as f64
}

/// Integer in `[min, max]` different from `not` where possible.
pub(super) fn pick_diff_int(rng: &mut SeededRng, min: i64, max: i64, not: i64) -> i64 {
    let mut v = rng.int(min, max);
    let mut guard = 0;
    while v == not && guard < 25 {
        v = rng.int(min, max);
        guard += 1;
    }
    if v == not {
        if not != min {
            min
        } else {
            max
        }
    } else {
        v
    }
}

/// Integer in `[min, max]` that is not a multiple of 10, so written
/// methods cannot collapse to a place-value shift.
pub(super) fn pick_not_mult10(rng: &mut SeededRng, min: i64, max: i64) -> i64 {
    for _ in 0..REROLL_CAP {
        let v = rng.int(min, max);
        if v % 10 != 0 {
            return v;
        }
    }
    warn!(min, max, "pick_not_mult10 exhausted its re-rolls");
    if min % 10 != 0 {
        min
    } else {
        min + 1
    }
}

/// "decimal place" with the right plural.
pub(super) fn dp_word(dp: u32) -> &'static str {
    if dp == 1 {
        "decimal place"
    } else {
        "decimal places"
    }
}

// --------------------------- prompt markup ---------------------------

/// Two-column data table in the renderer's `qtable` markup.
pub(super) fn qtable2(head: [&str; 2], rows: &[(&str, String)]) -> String {
    let mut html = format!(
        "<table class=\"qtable\"><tr><th>{}</th><th class=\"num\">{}</th></tr>",
        head[0], head[1]
    );
    for (label, value) in rows {
        html.push_str(&format!(
            "<tr><td>{label}</td><td class=\"num\">{value}</td></tr>"
        ));
    }
    html.push_str("</table>");
    html
}

/// Three-column table with two numeric columns.
pub(super) fn qtable3(head: [&str; 3], rows: &[(&str, String, String)]) -> String {
    let mut html = format!(
        "<table class=\"qtable\"><tr><th>{}</th><th class=\"num\">{}</th><th class=\"num\">{}</th></tr>",
        head[0], head[1], head[2]
    );
    for (label, first, second) in rows {
        html.push_str(&format!(
            "<tr><td>{label}</td><td class=\"num\">{first}</td><td class=\"num\">{second}</td></tr>"
        ));
    }
    html.push_str("</table>");
    html
}
