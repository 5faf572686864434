use lingobot::config::{Config, ModelsConfig};
use lingobot::nlu::{DetectedLanguage, LanguageDetector};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[allow(dead_code)]
pub const ENGLISH_MODEL: &str = r#"{
  "intents": {
    "history": ["history", "war", "empire", "ancient"],
    "physics": ["physics", "gravity", "energy"],
    "biology": ["biology", "cell", "cells"],
    "computing": ["computing", "computer", "software"]
  },
  "entities": {
    "event": ["World War II", "Roman Empire"]
  }
}"#;

#[allow(dead_code)]
pub const FRENCH_MODEL: &str = r#"{
  "intents": {
    "history": ["histoire", "guerre", "empire"],
    "physics": ["physique", "gravité", "énergie"],
    "biology": ["biologie", "cellule", "cellules"],
    "computing": ["informatique", "ordinateur", "logiciel"]
  },
  "entities": {
    "event": ["Seconde Guerre mondiale", "Révolution française"]
  }
}"#;

/// Write English and French models under `dir` and return their locations
#[allow(dead_code)]
pub fn write_models(dir: &Path) -> ModelsConfig {
    let models = ModelsConfig {
        project_dir: dir.join("projects"),
        config_dir: dir.join("config"),
        config_prefix: "lingobot".to_string(),
    };
    for (code, model) in [("en", ENGLISH_MODEL), ("fr", FRENCH_MODEL)] {
        let model_dir = models.model_dir(code);
        fs::create_dir_all(&model_dir).expect("failed to create model dir");
        fs::write(model_dir.join("model.json"), model).expect("failed to write model");
        fs::create_dir_all(&models.config_dir).expect("failed to create config dir");
        fs::write(
            models.config_file(code),
            format!(r#"{{"language": "{}"}}"#, code),
        )
        .expect("failed to write classifier config");
    }
    models
}

/// Config whose files and models all live inside `dir`
#[allow(dead_code)]
pub fn temp_config(dir: &TempDir) -> Config {
    let mut config = Config::default();
    config.files.history_file = dir.path().join("data").join("history.txt");
    config.files.profile_file = dir.path().join("data").join("profiles.json");
    config.models = write_models(dir.path());
    config
}

/// Write a TOML config file pointing at models inside `dir`
#[allow(dead_code)]
pub fn temp_config_file(dir: &TempDir) -> PathBuf {
    let models = write_models(dir.path());
    let contents = format!(
        r#"
[bot]
name = "Lingobot"
subject = "academic subjects"

[files]
history_file = "{history}"
profile_file = "{profiles}"

[session]
timeout_minutes = 10
user_id = "1234"

[languages]
default = "en"

[languages.supported]
en = "English"
fr = "French"

[models]
project_dir = "{project}"
config_dir = "{config}"
config_prefix = "lingobot"
"#,
        history = toml_path(&dir.path().join("data").join("history.txt")),
        profiles = toml_path(&dir.path().join("data").join("profiles.json")),
        project = toml_path(&models.project_dir),
        config = toml_path(&models.config_dir),
    );
    let path = dir.path().join("lingobot.toml");
    fs::write(&path, contents).expect("failed to write config file");
    path
}

fn toml_path(path: &Path) -> String {
    path.display().to_string().replace('\\', "/")
}

/// Detector that always reports the same candidates
#[allow(dead_code)]
pub struct FixedDetector(pub Vec<&'static str>);

impl LanguageDetector for FixedDetector {
    fn detect(&self, _text: &str) -> Vec<DetectedLanguage> {
        self.0
            .iter()
            .map(|code| DetectedLanguage::new(*code, 0.9))
            .collect()
    }
}
