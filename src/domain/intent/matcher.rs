//! Classified intents and the rules that match them.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// An intent name with the classifier's confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentMatch {
    pub name: String,
    pub score: f64,
}

impl IntentMatch {
    /// Creates a classified intent.
    pub fn new(name: impl Into<String>, score: f64) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}

/// Full classification of one utterance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageResult {
    /// The text that was classified.
    pub query: String,
    pub top_scoring_intent: IntentMatch,
    /// Every intent the classifier scored, when it reports them.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub intents: Vec<IntentMatch>,
}

impl LanguageResult {
    /// Creates a result holding only the top intent.
    pub fn new(query: impl Into<String>, top_scoring_intent: IntentMatch) -> Self {
        Self {
            query: query.into(),
            top_scoring_intent,
            intents: Vec::new(),
        }
    }
}

/// Rule that lets a flow react to a classified intent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentMatcher {
    pub intent_name: String,
    /// Score the intent must exceed. Unset accepts any score.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_score: Option<f64>,
    /// Question the caller must answer "yes" to before the flow acts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirm_prompt: Option<String>,
}

impl IntentMatcher {
    /// Creates a matcher for the named intent.
    pub fn new(intent_name: impl Into<String>) -> Result<Self, ValidationError> {
        let intent_name = intent_name.into();
        if intent_name.trim().is_empty() {
            return Err(ValidationError::empty_field("intent_name"));
        }
        Ok(Self {
            intent_name,
            min_score: None,
            confirm_prompt: None,
        })
    }

    /// Requires the classifier's score to exceed `min_score`.
    pub fn with_min_score(mut self, min_score: f64) -> Result<Self, ValidationError> {
        if !(0.0..=1.0).contains(&min_score) {
            return Err(ValidationError::out_of_range("min_score", 0.0, 1.0, min_score));
        }
        self.min_score = Some(min_score);
        Ok(self)
    }

    /// Asks the caller to confirm before acting.
    pub fn with_confirm_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.confirm_prompt = Some(prompt.into());
        self
    }

    /// Returns true if the intent has this matcher's name and beats its score.
    pub fn matches(&self, intent: &IntentMatch) -> bool {
        self.intent_name == intent.name && self.min_score.map_or(true, |min| intent.score > min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod construction {
        use super::*;

        #[test]
        fn rejects_empty_intent_name() {
            assert!(IntentMatcher::new("").is_err());
        }

        #[test]
        fn rejects_min_score_outside_unit_range() {
            let err = IntentMatcher::new("order").unwrap().with_min_score(1.5).unwrap_err();
            assert!(matches!(err, ValidationError::OutOfRange { .. }));
        }
    }

    mod matches {
        use super::*;

        #[test]
        fn same_name_without_threshold_matches_any_score() {
            let matcher = IntentMatcher::new("help").unwrap();
            assert!(matcher.matches(&IntentMatch::new("help", 0.01)));
        }

        #[test]
        fn different_name_never_matches() {
            let matcher = IntentMatcher::new("help").unwrap();
            assert!(!matcher.matches(&IntentMatch::new("Help", 0.99)));
        }

        #[test]
        fn score_must_strictly_exceed_threshold() {
            let matcher = IntentMatcher::new("cancel_order").unwrap().with_min_score(0.5).unwrap();
            assert!(matcher.matches(&IntentMatch::new("cancel_order", 0.9)));
            assert!(!matcher.matches(&IntentMatch::new("cancel_order", 0.5)));
            assert!(!matcher.matches(&IntentMatch::new("cancel_order", 0.2)));
        }
    }

    mod serialization {
        use super::*;

        #[test]
        fn language_result_uses_camel_case() {
            let result = LanguageResult::new("stop", IntentMatch::new("cancel", 0.8));
            let value = serde_json::to_value(&result).unwrap();
            assert_eq!(value["topScoringIntent"]["name"], "cancel");
            assert!(value.get("intents").is_none());
        }
    }
}
