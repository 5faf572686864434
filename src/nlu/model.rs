//! Keyword and gazetteer classifier loaded from a trained model directory
//!
//! Each supported language has a pair of files:
//!
//! - `<project_dir>/current_<code>/model.json`: intent keywords and entity
//!   gazetteers
//! - `<config_dir>/<prefix>_<code>.json`: classifier settings
//!
//! ```json
//! {
//!   "intents": { "history": ["history", "war", "empire"] },
//!   "entities": { "event": ["World War II", "French Revolution"] }
//! }
//! ```
//!
//! Intent confidence is the share of keyword hits that went to the best
//! intent. Entities are whole-word phrase matches.

use crate::error::{LingobotError, Result};
use crate::nlu::{ClassifierResult, EntitySpan, IntentClassifier, IntentMatch};
use regex::{Regex, RegexBuilder};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Name of the model file inside a model directory
pub const MODEL_FILE: &str = "model.json";

const EXTRACTOR: &str = "keyword_gazetteer";

/// Trained model contents as stored in `model.json`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModelSpec {
    /// Intent name to trigger keywords or phrases
    #[serde(default)]
    pub intents: BTreeMap<String, Vec<String>>,
    /// Entity label to known values
    #[serde(default)]
    pub entities: BTreeMap<String, Vec<String>>,
}

/// Per-language classifier settings
#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierConfig {
    /// Language the model was trained for; must match the requested one
    pub language: String,
    /// Match keywords with their exact case
    #[serde(default)]
    pub case_sensitive: bool,
}

#[derive(Debug, Clone)]
struct Matcher {
    label: String,
    pattern: Regex,
}

/// Compiled keyword classifier for one language
#[derive(Debug, Clone)]
pub struct KeywordModel {
    language: String,
    intents: Vec<Matcher>,
    entities: Vec<Matcher>,
}

impl KeywordModel {
    /// Load a model directory and its config file
    ///
    /// # Arguments
    ///
    /// * `language` - Language code the model is expected to serve
    /// * `model_dir` - Directory containing `model.json`
    /// * `config_file` - Classifier config file
    ///
    /// # Errors
    ///
    /// Returns `LingobotError::ModelLoad` if either file is missing or
    /// invalid, the config is for another language, or the model has no
    /// intents.
    pub fn load(language: &str, model_dir: &Path, config_file: &Path) -> Result<Self> {
        let load_error = |message: String| LingobotError::ModelLoad {
            language: language.to_string(),
            message,
        };

        let config_text = std::fs::read_to_string(config_file)
            .map_err(|e| load_error(format!("cannot read {}: {}", config_file.display(), e)))?;
        let config: ClassifierConfig = serde_json::from_str(&config_text)
            .map_err(|e| load_error(format!("invalid {}: {}", config_file.display(), e)))?;

        if config.language != language {
            return Err(load_error(format!(
                "{} is configured for language {}",
                config_file.display(),
                config.language
            ))
            .into());
        }

        let model_path = model_dir.join(MODEL_FILE);
        let model_text = std::fs::read_to_string(&model_path)
            .map_err(|e| load_error(format!("cannot read {}: {}", model_path.display(), e)))?;
        let spec: ModelSpec = serde_json::from_str(&model_text)
            .map_err(|e| load_error(format!("invalid {}: {}", model_path.display(), e)))?;

        Self::from_spec(&config, &spec).map_err(|e| load_error(e.to_string()).into())
    }

    /// Compile a model from in-memory settings
    ///
    /// # Errors
    ///
    /// Returns `LingobotError::Config` if the model defines no intents or a
    /// pattern fails to compile.
    pub fn from_spec(
        config: &ClassifierConfig,
        spec: &ModelSpec,
    ) -> std::result::Result<Self, LingobotError> {
        if spec.intents.is_empty() {
            return Err(LingobotError::Config("model defines no intents".to_string()));
        }

        let intents = compile(&spec.intents, config.case_sensitive)?;
        let entities = compile(&spec.entities, config.case_sensitive)?;

        tracing::debug!(
            "Compiled {} model: {} intents, {} entity types",
            config.language,
            intents.len(),
            entities.len()
        );

        Ok(Self {
            language: config.language.clone(),
            intents,
            entities,
        })
    }

    fn rank_intents(&self, text: &str) -> Vec<IntentMatch> {
        let hits: Vec<(&str, usize)> = self
            .intents
            .iter()
            .map(|m| (m.label.as_str(), m.pattern.find_iter(text).count()))
            .filter(|(_, count)| *count > 0)
            .collect();
        let total: usize = hits.iter().map(|(_, count)| count).sum();
        if total == 0 {
            return Vec::new();
        }

        let mut ranking: Vec<IntentMatch> = hits
            .into_iter()
            .map(|(name, count)| IntentMatch {
                name: name.to_string(),
                confidence: count as f64 / total as f64,
            })
            .collect();
        ranking.sort_by(|a, b| {
            b.confidence
                .total_cmp(&a.confidence)
                .then_with(|| a.name.cmp(&b.name))
        });
        ranking
    }

    fn extract_entities(&self, text: &str) -> Vec<EntitySpan> {
        let mut spans: Vec<EntitySpan> = self
            .entities
            .iter()
            .flat_map(|m| {
                m.pattern.find_iter(text).map(move |found| EntitySpan {
                    start: text[..found.start()].chars().count(),
                    end: text[..found.end()].chars().count(),
                    entity: m.label.clone(),
                    value: found.as_str().to_string(),
                    extractor: Some(EXTRACTOR.to_string()),
                })
            })
            .collect();

        // Longest span wins where entity matches overlap.
        spans.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| b.end.cmp(&a.end)));
        let mut kept: Vec<EntitySpan> = Vec::with_capacity(spans.len());
        for span in spans {
            if kept.last().map_or(true, |last| span.start >= last.end) {
                kept.push(span);
            }
        }
        kept
    }
}

impl IntentClassifier for KeywordModel {
    fn language(&self) -> &str {
        &self.language
    }

    fn parse(&self, text: &str) -> ClassifierResult {
        let intent_ranking = self.rank_intents(text);
        ClassifierResult {
            text: text.to_string(),
            intent: intent_ranking.first().cloned(),
            entities: self.extract_entities(text),
            intent_ranking,
        }
    }
}

fn compile(
    table: &BTreeMap<String, Vec<String>>,
    case_sensitive: bool,
) -> std::result::Result<Vec<Matcher>, LingobotError> {
    let mut matchers = Vec::with_capacity(table.len());
    for (label, phrases) in table {
        let alternatives: Vec<String> = phrases
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .map(regex::escape)
            .collect();
        if alternatives.is_empty() {
            continue;
        }
        let pattern = RegexBuilder::new(&format!(r"\b(?:{})\b", alternatives.join("|")))
            .case_insensitive(!case_sensitive)
            .build()
            .map_err(|e| LingobotError::Config(format!("bad patterns for {}: {}", label, e)))?;
        matchers.push(Matcher {
            label: label.clone(),
            pattern,
        });
    }
    Ok(matchers)
}
