//! Numeric helpers shared by the generators and the marking engine:
//! decimal rounding, tolerant comparison, display formatting, fractions,
//! and the forgiving parsers for student-typed answers.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::AnswerParseError;

/// Default absolute tolerance for [`close`].
pub const DEFAULT_TOL: f64 = 1e-8;

/// `|a - b| <= tol`.
pub fn close(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}

/// Round to `dp` decimal places, half away from zero.
///
/// A one-ulp nudge is applied before scaling so values stored just below a
/// decimal boundary round the way their printed form suggests:
/// `round_to(2.675, 2)` is `2.68`, not the `2.67` that raw binary
/// representation (2.674999…) would give.
pub fn round_to(x: f64, dp: i32) -> f64 {
    let factor = 10f64.powi(dp);
    let nudged = x + x * f64::EPSILON;
    (nudged * factor).round() / factor
}

/// Treat negative zero as zero before formatting.
fn normal(x: f64) -> f64 {
    if x == 0.0 {
        0.0
    } else {
        x
    }
}

/// Fixed-point with up to `max_dp` places, trailing zeros (and a bare
/// trailing point) stripped: `fmt(3.14, 6)` is `"3.14"`, `fmt(5.0, 2)` is
/// `"5"`.
pub fn fmt(x: f64, max_dp: usize) -> String {
    let s = format!("{:.*}", max_dp, normal(x));
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

/// Plain fixed-point with exactly `dp` places.
pub fn fmt_dp(x: f64, dp: usize) -> String {
    format!("{:.*}", dp, normal(x))
}

/// Fixed-point that drops an exact `.00` tail and nothing else:
/// `fmt_no00(100.0, 2)` is `"100"`, but `fmt_no00(3.5, 2)` keeps `"3.50"`.
pub fn fmt_no00(x: f64, dp: usize) -> String {
    let s = fmt_dp(x, dp);
    match s.strip_suffix(".00") {
        Some(head) => head.to_string(),
        None => s,
    }
}

/// Shortest plain decimal form: `"72"`, `"3.5"`. Negative zero prints
/// `"0"`.
pub fn fmt_plain(x: f64) -> String {
    format!("{}", normal(x))
}

/// Greatest common divisor of `|a|` and `|b|`; returns 1 when both are
/// zero so callers can divide by it unconditionally.
pub fn gcd(a: i64, b: i64) -> i64 {
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0 {
        (a, b) = (b, a % b);
    }
    if a == 0 {
        1
    } else {
        a
    }
}

/// `n/d` in lowest terms with a positive denominator, or `None` when the
/// denominator is zero.
pub fn simplify_fraction(n: i64, d: i64) -> Option<(i64, i64)> {
    if d == 0 {
        return None;
    }
    let (n, d) = if d < 0 { (-n, -d) } else { (n, d) };
    let g = gcd(n, d);
    Some((n / g, d / g))
}

/// Equality of fractions by their simplified forms, so `2/4 == 1/2` and
/// `-1/-2 == 1/2`. Zero denominators are equal to nothing.
pub fn fractions_equal(a: (i64, i64), b: (i64, i64)) -> bool {
    match (simplify_fraction(a.0, a.1), simplify_fraction(b.0, b.1)) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

static FRACTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(-?\d+)\s*/\s*(-?\d+)$").unwrap());

/// Parse student-typed numeric text.
///
/// Tolerates surrounding whitespace, thousands-separator commas, a leading
/// sign, and `a/b` fraction syntax (evaluated as a quotient). Non-finite
/// results are rejected.
pub fn parse_number(text: &str) -> Result<f64, AnswerParseError> {
    let cleaned = text.trim().replace(',', "");
    if cleaned.is_empty() {
        return Err(AnswerParseError::Empty);
    }
    if cleaned.contains('/') {
        let caps = FRACTION_RE
            .captures(&cleaned)
            .ok_or_else(|| AnswerParseError::BadFraction(cleaned.clone()))?;
        let n: f64 = caps[1]
            .parse()
            .map_err(|_| AnswerParseError::BadFraction(cleaned.clone()))?;
        let d: f64 = caps[2]
            .parse()
            .map_err(|_| AnswerParseError::BadFraction(cleaned.clone()))?;
        if d == 0.0 {
            return Err(AnswerParseError::ZeroDenominator);
        }
        return Ok(n / d);
    }
    let value: f64 = cleaned
        .parse()
        .map_err(|_| AnswerParseError::NotNumeric(cleaned.clone()))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(AnswerParseError::NotNumeric(cleaned))
    }
}

/// A value recognised in scientific notation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StandardForm {
    pub mantissa: f64,
    pub exponent: i32,
}

impl StandardForm {
    /// The resolved numeric value, `mantissa * 10^exponent`.
    pub fn value(&self) -> f64 {
        self.mantissa * 10f64.powi(self.exponent)
    }
}

// Pattern A: mantissa E exponent. Pattern B: mantissa × 10 ^ exponent,
// caret optional so superscript input ("3×10⁵" normalised to "3x105")
// still matches.
static SF_E_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^([+-]?\d*\.?\d+)E([+-]?\d+)$").unwrap());
static SF_TIMES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^([+-]?\d*\.?\d+)(?:x|\*)10\^?([+-]?\d+)$").unwrap());
static SF_EXP_WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new("(?i)exp").unwrap());

/// Parse scientific notation as students actually type it: `3.2E5`,
/// `3.2x10^5`, `3.2×10⁵`, `3.2 EXP 5`, Unicode minus signs and all.
pub fn parse_standard_form(text: &str) -> Result<StandardForm, AnswerParseError> {
    let s = normalise_standard_form(text);
    if s.is_empty() {
        return Err(AnswerParseError::Empty);
    }
    for re in [&SF_E_RE, &SF_TIMES_RE] {
        if let Some(caps) = re.captures(&s) {
            let mantissa: f64 = caps[1]
                .parse()
                .map_err(|_| AnswerParseError::NotStandardForm(s.clone()))?;
            let exponent: i32 = caps[2]
                .parse()
                .map_err(|_| AnswerParseError::NotStandardForm(s.clone()))?;
            return Ok(StandardForm { mantissa, exponent });
        }
    }
    Err(AnswerParseError::NotStandardForm(s))
}

/// Collapse the notations keyboards and copy-paste produce down to the two
/// canonical patterns: strip whitespace, fold multiply signs to `x`,
/// Unicode minus/dashes to `-`, superscript digits to ASCII, `EXP` to `E`.
fn normalise_standard_form(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            c if c.is_whitespace() => {}
            '×' | '⋅' | '·' => out.push('x'),
            '−' | '–' | '—' => out.push('-'),
            '⁰' => out.push('0'),
            '¹' => out.push('1'),
            '²' => out.push('2'),
            '³' => out.push('3'),
            '⁴' => out.push('4'),
            '⁵' => out.push('5'),
            '⁶' => out.push('6'),
            '⁷' => out.push('7'),
            '⁸' => out.push('8'),
            '⁹' => out.push('9'),
            '⁻' => out.push('-'),
            '⁺' => out.push('+'),
            'X' => out.push('x'),
            _ => out.push(ch),
        }
    }
    SF_EXP_WORD_RE.replace_all(&out, "E").into_owned()
}

/// Decimal places the student actually typed, ignoring trailing zeros:
/// `"7.8350"` counts 3, `"120"` counts 0. Drives the rounding credit tier.
pub fn decimal_places_entered(text: &str) -> usize {
    let cleaned = text.trim().replace(',', "");
    match cleaned.find('.') {
        None => 0,
        Some(idx) => cleaned[idx + 1..].trim_end_matches('0').len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_to_half_away_from_zero() {
        assert_eq!(round_to(2.5, 0), 3.0);
        assert_eq!(round_to(-2.5, 0), -3.0);
        assert_eq!(round_to(3.14159, 2), 3.14);
        assert_eq!(round_to(3.14159, 4), 3.1416);
    }

    #[test]
    fn round_to_compensates_for_representation_error() {
        // 2.675 is stored as 2.674999…; the nudge keeps the printed-form
        // expectation
        assert_eq!(round_to(2.675, 2), 2.68);
        assert_eq!(round_to(-2.675, 2), -2.68);
        assert_eq!(round_to(1.005, 2), 1.01);
    }

    #[test]
    fn round_to_is_stable_on_already_rounded_values() {
        for x in [0.1, 12.34, -7.89, 100.0, 0.05] {
            assert_eq!(round_to(round_to(x, 2), 2), round_to(x, 2));
        }
    }

    #[test]
    fn fmt_strips_trailing_zeros() {
        assert_eq!(fmt(3.14, 6), "3.14");
        assert_eq!(fmt(5.0, 2), "5");
        assert_eq!(fmt(0.5, 2), "0.5");
        assert_eq!(fmt(12.30, 1), "12.3");
    }

    #[test]
    fn fmt_no00_drops_only_exact_double_zero() {
        assert_eq!(fmt_no00(100.0, 2), "100");
        assert_eq!(fmt_no00(3.5, 2), "3.50");
        assert_eq!(fmt_no00(3.55, 2), "3.55");
        assert_eq!(fmt_no00(0.0, 2), "0");
    }

    #[test]
    fn fmt_no00_is_idempotent_after_rounding() {
        for x in [3.5, 100.0, 12.345, 0.004, 99.999] {
            let rounded = round_to(x, 2);
            let once = fmt_no00(rounded, 2);
            let twice = fmt_no00(round_to(rounded, 2), 2);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn fmt_plain_normalises_negative_zero() {
        assert_eq!(fmt_plain(-0.0), "0");
        assert_eq!(fmt_plain(72.0), "72");
        assert_eq!(fmt_plain(3.5), "3.5");
        assert_eq!(fmt_plain(-0.35), "-0.35");
    }

    #[test]
    fn gcd_basics() {
        assert_eq!(gcd(12, 18), 6);
        assert_eq!(gcd(-12, 18), 6);
        assert_eq!(gcd(7, 0), 7);
        assert_eq!(gcd(0, 0), 1);
    }

    #[test]
    fn fractions_simplify_canonically() {
        assert_eq!(simplify_fraction(2, 4), Some((1, 2)));
        assert_eq!(simplify_fraction(-1, -2), Some((1, 2)));
        assert_eq!(simplify_fraction(3, -6), Some((-1, 2)));
        assert_eq!(simplify_fraction(5, 0), None);
        assert_eq!(simplify_fraction(0, 8), Some((0, 1)));
    }

    #[test]
    fn equivalent_fractions_compare_equal() {
        assert!(fractions_equal((2, 4), (1, 2)));
        assert!(fractions_equal((-1, -2), (1, 2)));
        assert!(!fractions_equal((1, 3), (1, 2)));
        assert!(!fractions_equal((1, 0), (1, 0)));
    }

    #[test]
    fn parse_number_accepts_plain_and_signed() {
        assert_eq!(parse_number("42"), Ok(42.0));
        assert_eq!(parse_number("  -3.5 "), Ok(-3.5));
        assert_eq!(parse_number("+0.25"), Ok(0.25));
        assert_eq!(parse_number("1,200"), Ok(1200.0));
        assert_eq!(parse_number("1,2,00"), Ok(1200.0));
    }

    #[test]
    fn parse_number_accepts_fraction_syntax() {
        assert_eq!(parse_number("7/2"), Ok(3.5));
        assert_eq!(parse_number("-3 / 4"), Ok(-0.75));
        assert_eq!(
            parse_number("1/0"),
            Err(AnswerParseError::ZeroDenominator)
        );
        assert_eq!(
            parse_number("1/2/3"),
            Err(AnswerParseError::BadFraction("1/2/3".into()))
        );
    }

    #[test]
    fn parse_number_rejects_junk() {
        assert_eq!(parse_number(""), Err(AnswerParseError::Empty));
        assert_eq!(parse_number("   "), Err(AnswerParseError::Empty));
        assert!(parse_number("abc").is_err());
        assert!(parse_number("inf").is_err());
        assert!(parse_number("NaN").is_err());
    }

    #[test]
    fn standard_form_e_notation() {
        let sf = parse_standard_form("3.2E5").unwrap();
        assert_eq!(sf.mantissa, 3.2);
        assert_eq!(sf.exponent, 5);
        assert_eq!(sf.value(), 320000.0);
        assert!(parse_standard_form("3.2e-4").is_ok());
        assert!(parse_standard_form("3.2 EXP 5").is_ok());
    }

    #[test]
    fn standard_form_times_ten_notation() {
        for text in ["3.2x10^5", "3.2×10^5", "3.2*10^5", "3.2 X 10 ^ 5"] {
            let sf = parse_standard_form(text).unwrap();
            assert_eq!(sf.mantissa, 3.2);
            assert_eq!(sf.exponent, 5);
        }
    }

    #[test]
    fn standard_form_unicode_superscripts() {
        let sf = parse_standard_form("3.2×10⁵").unwrap();
        assert_eq!(sf.exponent, 5);
        let neg = parse_standard_form("4.1×10⁻³").unwrap();
        assert_eq!(neg.exponent, -3);
        assert!(close(neg.value(), 0.0041, 1e-12));
    }

    #[test]
    fn standard_form_unicode_minus() {
        let sf = parse_standard_form("2.5×10−2").unwrap();
        assert_eq!(sf.exponent, -2);
    }

    #[test]
    fn standard_form_rejects_junk() {
        assert!(parse_standard_form("").is_err());
        assert!(parse_standard_form("ten to the five").is_err());
        assert!(parse_standard_form("3.2x9^5").is_err());
    }

    #[test]
    fn decimal_places_ignore_trailing_zeros() {
        assert_eq!(decimal_places_entered("7.84"), 2);
        assert_eq!(decimal_places_entered("7.8350"), 3);
        assert_eq!(decimal_places_entered("5.00"), 0);
        assert_eq!(decimal_places_entered("120"), 0);
        assert_eq!(decimal_places_entered(" 1,234.560 "), 2);
    }
}
