//! Language detection, selection and classification in one step

use crate::config::Config;
use crate::error::{LingobotError, Result};
use crate::nlu::language::{select_language, DetectedLanguage, LanguageDetector};
use crate::nlu::model::KeywordModel;
use crate::nlu::{ClassifierResult, IntentClassifier};
use std::collections::BTreeMap;

/// Outcome of classifying one cleaned input
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// Languages reported by the detector, most likely first
    pub candidates: Vec<DetectedLanguage>,
    /// Language whose classifier produced `result`
    pub language: String,
    /// The classifier's answer, unchanged
    pub result: ClassifierResult,
}

/// One classifier per supported language plus a detector to choose between
/// them
pub struct ClassificationPipeline {
    detector: Box<dyn LanguageDetector>,
    classifiers: BTreeMap<String, Box<dyn IntentClassifier>>,
    default_language: String,
}

impl ClassificationPipeline {
    /// Assemble a pipeline
    ///
    /// # Errors
    ///
    /// Returns `LingobotError::Config` if no classifier serves
    /// `default_language`.
    pub fn new(
        detector: Box<dyn LanguageDetector>,
        classifiers: Vec<Box<dyn IntentClassifier>>,
        default_language: impl Into<String>,
    ) -> Result<Self> {
        let default_language = default_language.into();
        let classifiers: BTreeMap<String, Box<dyn IntentClassifier>> = classifiers
            .into_iter()
            .map(|c| (c.language().to_string(), c))
            .collect();

        if !classifiers.contains_key(&default_language) {
            return Err(LingobotError::Config(format!(
                "No classifier for default language {}",
                default_language
            ))
            .into());
        }

        Ok(Self {
            detector,
            classifiers,
            default_language,
        })
    }

    /// Load a `KeywordModel` for every configured language
    ///
    /// # Errors
    ///
    /// Fails on the first language whose model cannot be loaded; the bot
    /// requires every declared language.
    pub fn from_config(config: &Config, detector: Box<dyn LanguageDetector>) -> Result<Self> {
        let mut classifiers: Vec<Box<dyn IntentClassifier>> = Vec::new();
        for (code, name) in &config.languages.supported {
            tracing::info!("Configuring classifier for {}", name);
            let model = KeywordModel::load(
                code,
                &config.models.model_dir(code),
                &config.models.config_file(code),
            )
            .map_err(|e| {
                tracing::error!("Error with creating classifier for {} (lang: {})", name, code);
                tracing::info!(
                    "Maybe the model is missing? Expected {} and {}",
                    config.models.model_dir(code).join("model.json").display(),
                    config.models.config_file(code).display()
                );
                e
            })?;
            classifiers.push(Box::new(model));
        }
        Self::new(detector, classifiers, config.languages.default.clone())
    }

    /// Language codes with a loaded classifier, in sorted order
    pub fn languages(&self) -> Vec<&str> {
        self.classifiers.keys().map(String::as_str).collect()
    }

    /// Fallback language
    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    /// Classify cleaned text
    ///
    /// # Returns
    ///
    /// `None` for empty text; otherwise the detected candidates, the
    /// language used, and the classifier's result.
    pub fn classify(&self, clean_text: &str) -> Option<Classification> {
        if clean_text.is_empty() {
            return None;
        }

        let candidates = self.detector.detect(clean_text);
        let language = select_language(
            &candidates,
            |code| self.classifiers.contains_key(code),
            &self.default_language,
        )
        .to_string();
        let classifier = self.classifiers.get(&language)?;
        let result = classifier.parse(clean_text);

        tracing::debug!(
            language = %language,
            intent = result.intent_name().unwrap_or("<none>"),
            confidence = result.confidence(),
            "Classified input"
        );

        Some(Classification {
            candidates,
            language,
            result,
        })
    }

    /// Classify cleaned text in a known language, skipping detection
    ///
    /// Used for text whose language is already known, such as quick-reply
    /// choices the bot offered itself. Falls back to [`Self::classify`] when
    /// `language` has no classifier.
    pub fn classify_in(&self, clean_text: &str, language: &str) -> Option<Classification> {
        if clean_text.is_empty() {
            return None;
        }
        let Some(classifier) = self.classifiers.get(language) else {
            tracing::debug!("No classifier for pinned language {}, detecting instead", language);
            return self.classify(clean_text);
        };

        Some(Classification {
            candidates: vec![DetectedLanguage::new(language, 1.0)],
            language: language.to_string(),
            result: classifier.parse(clean_text),
        })
    }
}

impl std::fmt::Debug for ClassificationPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassificationPipeline")
            .field("languages", &self.languages())
            .field("default_language", &self.default_language)
            .finish()
    }
}
