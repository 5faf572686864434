//! Natural-language understanding
//!
//! This module defines the classifier contract the rest of the bot relies
//! on, plus the pieces that implement it:
//!
//! - `language`: language detection and selection of a configured language
//! - `model`: the bundled keyword/gazetteer classifier loaded from disk
//! - `pipeline`: detection, selection and classification in one call
//!
//! A classifier is treated as a black box: given cleaned text it returns an
//! intent (if any), its confidence, and the entity spans it found.

use serde::{Deserialize, Serialize};

pub mod language;
pub mod model;
pub mod pipeline;

pub use language::{select_language, DetectedLanguage, LanguageDetector, WhatlangDetector};
pub use model::KeywordModel;
pub use pipeline::{Classification, ClassificationPipeline};

/// An intent name with the classifier's confidence in it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentMatch {
    /// Intent name, e.g. `history`
    pub name: String,
    /// Confidence between 0.0 and 1.0
    pub confidence: f64,
}

/// A tagged substring of the classified text
///
/// Offsets count characters, not bytes, and `end` is exclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySpan {
    /// First character of the span
    pub start: usize,
    /// One past the last character of the span
    pub end: usize,
    /// Entity label, e.g. `event`
    pub entity: String,
    /// Text covered by the span
    pub value: String,
    /// Name of the component that produced the span
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extractor: Option<String>,
}

/// Result of classifying one piece of text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierResult {
    /// The text that was classified
    pub text: String,
    /// Best intent, `None` when nothing matched at all
    pub intent: Option<IntentMatch>,
    /// Entity spans, ordered by start offset and non-overlapping
    pub entities: Vec<EntitySpan>,
    /// All scored intents, best first
    #[serde(default)]
    pub intent_ranking: Vec<IntentMatch>,
}

impl ClassifierResult {
    /// Result for text that matched no intent and no entity
    pub fn no_match(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            intent: None,
            entities: Vec::new(),
            intent_ranking: Vec::new(),
        }
    }

    /// Name of the best intent, if any
    pub fn intent_name(&self) -> Option<&str> {
        self.intent.as_ref().map(|i| i.name.as_str())
    }

    /// Confidence of the best intent, 0.0 when there is none
    pub fn confidence(&self) -> f64 {
        self.intent.as_ref().map(|i| i.confidence).unwrap_or(0.0)
    }
}

/// A trained classifier for a single language
pub trait IntentClassifier: Send + Sync {
    /// Language code this classifier was trained for
    fn language(&self) -> &str;

    /// Classify cleaned input text
    fn parse(&self, text: &str) -> ClassifierResult;
}
