//! Heuristic confidence scoring for extracted claims.
//!
//! Starts from a neutral base and adjusts for certainty language, hedging,
//! quantification and claim type. The result is clamped to `[0, 1]`.

use lazy_static::lazy_static;
use regex::Regex;

use super::ClaimType;

/// Score adjustments.
pub mod adjust {
    pub const BASE: f64 = 0.5;
    pub const CERTAINTY: f64 = 0.2;
    pub const HEDGING: f64 = -0.2;
    pub const QUANTIFIED: f64 = 0.1;
    pub const API: f64 = 0.1;
    pub const PERFORMANCE: f64 = 0.05;
}

/// Claims at or above this confidence count as high confidence by default.
pub const HIGH_CONFIDENCE: f64 = 0.7;

/// Fixed confidence for claims synthesized from code examples.
pub const CODE_EXAMPLE_CONFIDENCE: f64 = 0.8;

const CERTAINTY_WORDS: &[&str] = &["always", "never", "guaranteed", "must"];
const HEDGING_WORDS: &[&str] = &["may", "might", "possibly", "sometimes"];

lazy_static! {
    static ref DIGITS: Regex = Regex::new(r"\d+").unwrap();
}

/// Score a claim's text. Always returns a value in `[0, 1]`.
pub fn score(text: &str, claim_type: ClaimType) -> f64 {
    let lower = text.to_lowercase();
    let mut confidence = adjust::BASE;

    if CERTAINTY_WORDS.iter().any(|w| lower.contains(w)) {
        confidence += adjust::CERTAINTY;
    }

    if HEDGING_WORDS.iter().any(|w| lower.contains(w)) {
        confidence += adjust::HEDGING;
    }

    if DIGITS.is_match(text) {
        confidence += adjust::QUANTIFIED;
    }

    confidence += match claim_type {
        ClaimType::Api => adjust::API,
        ClaimType::Performance => adjust::PERFORMANCE,
        ClaimType::Feature | ClaimType::Security | ClaimType::Behavior => 0.0,
    };

    confidence.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_base_score() {
        assert!(approx(score("returns a list", ClaimType::Feature), 0.5));
    }

    #[test]
    fn test_certainty_and_hedging() {
        assert!(approx(score("always returns a list", ClaimType::Behavior), 0.7));
        assert!(approx(score("might return a list", ClaimType::Behavior), 0.3));
        // Both cancel out
        assert!(approx(score("must possibly work", ClaimType::Behavior), 0.5));
    }

    #[test]
    fn test_quantified_and_type_bonus() {
        assert!(approx(score("1000 operations per second", ClaimType::Performance), 0.65));
        assert!(approx(score("a list of 3 items", ClaimType::Api), 0.7));
    }

    #[test]
    fn test_score_is_clamped() {
        let s = score("always never guaranteed must 42", ClaimType::Api);
        assert!(approx(s, 0.9));
        let inputs = [
            "",
            "may might possibly sometimes",
            "always 99 guaranteed",
            "MUST handle 10000 requests",
        ];
        for text in inputs {
            for t in ClaimType::ALL {
                let s = score(text, t);
                assert!((0.0..=1.0).contains(&s), "{} scored {} for {}", text, s, t);
            }
        }
    }

    #[test]
    fn test_certain_beats_hedged() {
        let certain = score("This always returns the sum", ClaimType::Behavior);
        let hedged = score("This sometimes returns the sum", ClaimType::Behavior);
        assert!(certain > hedged);
    }
}
