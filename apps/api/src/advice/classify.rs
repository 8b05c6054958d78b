//! Turns purchase advice text into approve / wait / reject.
//!
//! Default: `KeywordClassifier`, a placeholder heuristic with no correctness
//! contract. `AppState` holds it as an `Arc<dyn PurchaseClassifier>`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    Approve,
    Wait,
    Reject,
}

impl Recommendation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::Approve => "approve",
            Recommendation::Wait => "wait",
            Recommendation::Reject => "reject",
        }
    }
}

pub trait PurchaseClassifier: Send + Sync {
    fn classify(&self, advice: &str) -> Recommendation;
}

const WAIT_CUES: &[&str] = &["wait", "waiting", "hold off", "postpone", "delay", "not yet"];

const REJECT_CUES: &[&str] = &[
    "can't afford",
    "cannot afford",
    "can not afford",
    "not afford",
    "don't buy",
    "do not buy",
    "shouldn't buy",
    "should not buy",
    "not recommended",
];

const APPROVE_CUES: &[&str] = &["yes", "afford", "go ahead", "affordable"];

/// Phrase matching on whole words. Checked in order: wait, reject, approve;
/// anything unrecognised is a reject.
pub struct KeywordClassifier;

impl PurchaseClassifier for KeywordClassifier {
    fn classify(&self, advice: &str) -> Recommendation {
        let normalized = normalize(advice);
        let has = |cues: &[&str]| cues.iter().any(|c| normalized.contains(&format!(" {c} ")));

        if has(WAIT_CUES) {
            Recommendation::Wait
        } else if has(REJECT_CUES) {
            Recommendation::Reject
        } else if has(APPROVE_CUES) {
            Recommendation::Approve
        } else {
            Recommendation::Reject
        }
    }
}

/// Lowercases, keeps apostrophes, and pads every word with single spaces.
fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase().replace('’', "'");
    let words: Vec<&str> = lowered
        .split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .filter(|w| !w.is_empty())
        .collect();
    format!(" {} ", words.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(text: &str) -> Recommendation {
        KeywordClassifier.classify(text)
    }

    #[test]
    fn test_affordable_purchase_is_approved() {
        assert_eq!(
            classify("Yes! With ₹1.2L in savings you can comfortably afford this."),
            Recommendation::Approve
        );
    }

    #[test]
    fn test_wait_beats_afford() {
        assert_eq!(
            classify("You can afford it, but I'd wait until your emergency fund is full."),
            Recommendation::Wait
        );
    }

    #[test]
    fn test_negated_afford_is_rejected() {
        assert_eq!(
            classify("Right now you can't afford this without new debt."),
            Recommendation::Reject
        );
    }

    #[test]
    fn test_yes_requires_whole_word() {
        // "eyes" must not count as "yes"
        assert_eq!(
            classify("Keep your eyes on the high-interest card first."),
            Recommendation::Reject
        );
    }

    #[test]
    fn test_unrecognised_text_defaults_to_reject() {
        assert_eq!(classify("Consider your goals."), Recommendation::Reject);
    }

    #[test]
    fn test_curly_apostrophe_normalized() {
        assert_eq!(
            classify("You can’t afford it this month."),
            Recommendation::Reject
        );
    }
}
