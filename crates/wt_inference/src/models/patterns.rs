use lazy_static::lazy_static;
use regex::{Regex, RegexBuilder};
use wt_core::Result;

use super::ContentRiskModel;

const PHRASE_WEIGHT: f64 = 0.25;
const PENALTY_MIN_CHARS: usize = 200;
const PENALTY_CHARS_PER_POINT: f64 = 5000.0;
const MAX_LENGTH_PENALTY: f64 = 0.3;

lazy_static! {
    static ref PHRASES: Vec<Regex> = [
        "As an AI language model",
        "In conclusion,",
        "This article aims to",
        "It is important to note that",
    ]
    .iter()
    .map(|phrase| {
        RegexBuilder::new(&regex::escape(phrase))
            .case_insensitive(true)
            .build()
            .expect("escaped phrase is a valid regex")
    })
    .collect();
}

/// Scores text by stock LLM phrases plus a small penalty for long text.
#[derive(Debug, Clone, Default)]
pub struct PatternModel;

impl PatternModel {
    pub fn new() -> Self {
        Self
    }

    pub fn score(text: &str) -> f64 {
        if text.is_empty() {
            return 0.0;
        }
        let hits = PHRASES.iter().filter(|p| p.is_match(text)).count();
        let chars = text.chars().count();
        let length_penalty = if chars < PENALTY_MIN_CHARS {
            0.0
        } else {
            (chars as f64 / PENALTY_CHARS_PER_POINT).min(MAX_LENGTH_PENALTY)
        };
        let score = (hits as f64 * PHRASE_WEIGHT + length_penalty).min(1.0);
        // Formatting rounds the exact binary value, ties to even.
        format!("{:.2}", score).parse().unwrap_or(score)
    }
}

#[async_trait::async_trait]
impl ContentRiskModel for PatternModel {
    fn name(&self) -> &str {
        "patterns"
    }

    async fn estimate_risk(&self, text: &str) -> Result<f64> {
        let score = Self::score(text);
        tracing::debug!("Pattern risk {:.2} for {} chars", score, text.chars().count());
        Ok(score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text() {
        assert_eq!(PatternModel::score(""), 0.0);
    }

    #[test]
    fn test_phrase_hits() {
        assert_eq!(PatternModel::score("Nairobi ni mji mkuu wa Kenya."), 0.0);
        assert_eq!(PatternModel::score("AS AN AI LANGUAGE MODEL I cannot say."), 0.25);
        assert_eq!(
            PatternModel::score(
                "As an AI language model, this article aims to help. In conclusion, \
                 it is important to note that..."
            ),
            1.0
        );
    }

    #[test]
    fn test_length_penalty() {
        let short = "a".repeat(199);
        assert_eq!(PatternModel::score(&short), 0.0);

        let medium = "a".repeat(1000);
        assert_eq!(PatternModel::score(&medium), 0.2);

        let uneven = "a".repeat(1234);
        assert_eq!(PatternModel::score(&uneven), 0.25);

        let long = "a".repeat(20_000);
        assert_eq!(PatternModel::score(&long), 0.3);
    }

    #[test]
    fn test_rounds_ties_to_even() {
        // 625 / 5000 = 0.125
        assert_eq!(PatternModel::score(&"a".repeat(625)), 0.12);
        // 875 / 5000 is stored just below 0.175
        assert_eq!(PatternModel::score(&"a".repeat(875)), 0.17);
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        // 250 two-byte characters
        let text = "é".repeat(250);
        assert_eq!(PatternModel::score(&text), 0.05);
    }

    #[test]
    fn test_capped_at_one() {
        let mut text = "As an AI language model. In conclusion, This article aims to. \
                        It is important to note that "
            .to_string();
        text.push_str(&"x".repeat(2000));
        assert_eq!(PatternModel::score(&text), 1.0);
    }

    #[tokio::test]
    async fn test_estimate_risk() {
        let model = PatternModel::new();
        let risk = model.estimate_risk("This article aims to inform.").await.unwrap();
        assert_eq!(risk, 0.25);
    }
}
