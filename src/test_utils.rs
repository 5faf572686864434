//! Test utilities for Lingobot
//!
//! This module provides common test utilities including temporary directory
//! management, test file creation, model fixtures, and assertion helpers.

use crate::config::ModelsConfig;
use crate::error::LingobotError;
use crate::nlu::{DetectedLanguage, LanguageDetector};
use std::path::PathBuf;
use tempfile::TempDir;

/// Small English keyword model covering the default subjects
pub const SAMPLE_MODEL: &str = r#"{
  "intents": {
    "history": ["history", "war", "empire", "revolution", "ancient", "king", "queen", "battle"],
    "physics": ["physics", "gravity", "energy", "quantum", "light", "force"],
    "biology": ["biology", "cell", "cells", "gene", "evolution", "animal", "plant"],
    "computing": ["computing", "computer", "software", "algorithm", "programming"]
  },
  "entities": {
    "event": ["World War II", "World War", "French Revolution", "Roman Empire"],
    "conflict": ["War"]
  }
}"#;

/// Create a temporary directory for testing
///
/// # Returns
///
/// Returns a TempDir that will be cleaned up when dropped
pub fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Create a test file with the given content
///
/// # Arguments
///
/// * `dir` - Directory to create the file in
/// * `name` - Name of the file
/// * `content` - Content to write to the file
///
/// # Panics
///
/// Panics if file creation or writing fails
pub fn create_test_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write test file");
    path
}

/// Assert that an error contains the expected message
///
/// # Panics
///
/// Panics if the result is Ok or if the error doesn't contain the expected message
pub fn assert_error_contains<T>(result: Result<T, LingobotError>, expected: &str) {
    match result {
        Ok(_) => panic!("Expected error containing '{}' but got Ok", expected),
        Err(e) => {
            let error_msg = e.to_string();
            assert!(
                error_msg.contains(expected),
                "Error message '{}' does not contain '{}'",
                error_msg,
                expected
            );
        }
    }
}

/// Write a model directory and classifier config for one language
///
/// Files land in `<dir>/projects/current_<code>/model.json` and
/// `<dir>/config/lingobot_<code>.json`.
///
/// # Returns
///
/// A `ModelsConfig` pointing at the written files
pub fn write_language_model(dir: &TempDir, code: &str, model_json: &str) -> ModelsConfig {
    let models = ModelsConfig {
        project_dir: dir.path().join("projects"),
        config_dir: dir.path().join("config"),
        config_prefix: "lingobot".to_string(),
    };

    let model_dir = models.model_dir(code);
    std::fs::create_dir_all(&model_dir).expect("Failed to create model directory");
    std::fs::write(model_dir.join("model.json"), model_json).expect("Failed to write model");

    std::fs::create_dir_all(&models.config_dir).expect("Failed to create config directory");
    std::fs::write(
        models.config_file(code),
        format!(r#"{{"language": "{}"}}"#, code),
    )
    .expect("Failed to write classifier config");

    models
}

/// Detector that always reports the same candidates
///
/// Confidence decreases with position so the list reads as a ranking.
#[derive(Debug, Clone)]
pub struct FixedDetector {
    codes: Vec<String>,
}

impl FixedDetector {
    /// Detector reporting `codes` in order
    pub fn new(codes: &[&str]) -> Self {
        Self {
            codes: codes.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl LanguageDetector for FixedDetector {
    fn detect(&self, _text: &str) -> Vec<DetectedLanguage> {
        self.codes
            .iter()
            .enumerate()
            .map(|(idx, code)| DetectedLanguage::new(code.clone(), 0.9 / (idx as f64 + 1.0)))
            .collect()
    }
}
