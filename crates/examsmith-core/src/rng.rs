//! Deterministic random number generation for question parameterisation.
//!
//! The generator is mulberry32: one u32 of state, one update per draw.
//! Whole questions are sampled from it, so the same seed always yields the
//! same question and a question can be regenerated byte-for-byte from the
//! seed recorded on it.

use rand::RngCore;

/// How a question seed is supplied.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Seed {
    /// Draw 32 fresh bits from the OS entropy source.
    #[default]
    Auto,
    /// Use this exact value.
    Value(u32),
    /// Hash this phrase down to 32 bits (FNV-1a).
    Phrase(String),
}

impl Seed {
    /// The concrete 32-bit seed; draws entropy for [`Seed::Auto`].
    pub fn resolve(&self) -> u32 {
        match self {
            Seed::Auto => entropy_seed(),
            Seed::Value(v) => *v,
            Seed::Phrase(s) => fnv1a_utf16(s),
        }
    }
}

impl From<u32> for Seed {
    fn from(v: u32) -> Self {
        Seed::Value(v)
    }
}

impl From<&str> for Seed {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            Seed::Auto
        } else {
            Seed::Phrase(s.to_string())
        }
    }
}

/// FNV-1a over the UTF-16 code units of `text`.
pub fn fnv1a_utf16(text: &str) -> u32 {
    let mut h: u32 = 2166136261;
    for unit in text.encode_utf16() {
        h ^= u32::from(unit);
        h = h.wrapping_mul(16777619);
    }
    h
}

fn entropy_seed() -> u32 {
    let mut buf = [0u8; 4];
    match rand::rngs::OsRng.try_fill_bytes(&mut buf) {
        Ok(()) => u32::from_le_bytes(buf),
        Err(_) => clock_seed(),
    }
}

/// Last-resort seed when the OS entropy source is unavailable.
fn clock_seed() -> u32 {
    use std::time::{SystemTime, UNIX_EPOCH};
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(0);
    nanos ^ std::process::id()
}

/// mulberry32 PRNG. Every derived method consumes exactly one draw, so
/// callers can reason about how many draws a code path takes.
#[derive(Debug, Clone)]
pub struct SeededRng {
    state: u32,
}

impl SeededRng {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Next draw, uniform in `[0, 1)`.
    pub fn float(&mut self) -> f64 {
        self.state = self.state.wrapping_add(0x6D2B79F5);
        let mut x = self.state;
        x = (x ^ (x >> 15)).wrapping_mul(x | 1);
        x ^= x.wrapping_add((x ^ (x >> 7)).wrapping_mul(x | 61));
        f64::from(x ^ (x >> 14)) / 4294967296.0
    }

    /// Uniform integer in `min..=max`.
    pub fn int(&mut self, min: i64, max: i64) -> i64 {
        debug_assert!(min <= max, "int({min}, {max}) has an empty range");
        let span = (max - min + 1) as f64;
        min + (self.float() * span).floor() as i64
    }

    /// Uniform element of `items`, which must be non-empty.
    pub fn choice<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        debug_assert!(!items.is_empty());
        let idx = (self.float() * items.len() as f64) as usize;
        &items[idx]
    }

    /// A new vector with the elements of `items` in shuffled order.
    /// Fisher–Yates from the back, one draw per step.
    pub fn shuffle<T: Clone>(&mut self, items: &[T]) -> Vec<T> {
        let mut out = items.to_vec();
        for i in (1..out.len()).rev() {
            let j = (self.float() * (i as f64 + 1.0)) as usize;
            out.swap(i, j);
        }
        out
    }
}
