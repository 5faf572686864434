//! Language detection and selection
//!
//! Detection yields a ranked list of candidate languages; selection picks
//! the first candidate that has a configured classifier.

use std::fmt;
use whatlang::{Detector, Lang};

/// How many candidates [`WhatlangDetector`] reports at most
pub const MAX_CANDIDATES: usize = 3;

/// A candidate language with detection confidence
#[derive(Debug, Clone, PartialEq)]
pub struct DetectedLanguage {
    /// ISO 639-1 code where one exists, e.g. `en`
    pub code: String,
    /// Detector confidence between 0.0 and 1.0
    pub confidence: f64,
}

impl DetectedLanguage {
    /// Convenience constructor
    pub fn new(code: impl Into<String>, confidence: f64) -> Self {
        Self {
            code: code.into(),
            confidence,
        }
    }
}

impl fmt::Display for DetectedLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:.4}", self.code, self.confidence)
    }
}

/// Source of ranked language candidates for a piece of text
pub trait LanguageDetector: Send + Sync {
    /// Candidate languages, most likely first; may be empty
    fn detect(&self, text: &str) -> Vec<DetectedLanguage>;
}

/// Pick the language to classify in
///
/// Returns the first candidate accepted by `is_configured`, or `default`
/// when none is.
///
/// # Examples
///
/// ```
/// use lingobot::nlu::{select_language, DetectedLanguage};
///
/// let candidates = vec![DetectedLanguage::new("de", 0.6), DetectedLanguage::new("fr", 0.3)];
/// assert_eq!(select_language(&candidates, |c| c == "fr" || c == "en", "en"), "fr");
/// assert_eq!(select_language(&candidates, |c| c == "en", "en"), "en");
/// ```
pub fn select_language<'a>(
    candidates: &'a [DetectedLanguage],
    is_configured: impl Fn(&str) -> bool,
    default: &'a str,
) -> &'a str {
    candidates
        .iter()
        .map(|c| c.code.as_str())
        .find(|code| is_configured(code))
        .unwrap_or(default)
}

/// Detector backed by the `whatlang` crate
///
/// `whatlang` reports a single best guess, so the ranking is built by
/// detecting again with every language found so far on the deny list.
#[derive(Debug, Clone)]
pub struct WhatlangDetector {
    max_candidates: usize,
}

impl Default for WhatlangDetector {
    fn default() -> Self {
        Self {
            max_candidates: MAX_CANDIDATES,
        }
    }
}

impl WhatlangDetector {
    /// Detector reporting up to `max_candidates` languages
    pub fn new(max_candidates: usize) -> Self {
        Self {
            max_candidates: max_candidates.max(1),
        }
    }
}

impl LanguageDetector for WhatlangDetector {
    fn detect(&self, text: &str) -> Vec<DetectedLanguage> {
        let mut found: Vec<Lang> = Vec::new();
        let mut candidates = Vec::new();

        while candidates.len() < self.max_candidates {
            let detector = Detector::with_denylist(found.clone());
            let Some(info) = detector.detect(text) else {
                break;
            };
            // Later guesses are made with the better ones excluded, so their
            // raw confidence is scaled down to keep the list descending.
            let confidence = candidates
                .last()
                .map(|prev: &DetectedLanguage| info.confidence().min(prev.confidence))
                .unwrap_or_else(|| info.confidence());
            candidates.push(DetectedLanguage::new(iso_code(info.lang()), confidence));
            found.push(info.lang());
        }

        tracing::debug!(
            "Detected languages: {}",
            candidates
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );
        candidates
    }
}

/// Map a `whatlang` language to its ISO 639-1 code, falling back to the
/// ISO 639-3 code for languages without a two-letter form in this table
fn iso_code(lang: Lang) -> String {
    let code = match lang {
        Lang::Eng => "en",
        Lang::Fra => "fr",
        Lang::Deu => "de",
        Lang::Spa => "es",
        Lang::Ita => "it",
        Lang::Por => "pt",
        Lang::Nld => "nl",
        Lang::Rus => "ru",
        Lang::Pol => "pl",
        Lang::Swe => "sv",
        Lang::Dan => "da",
        Lang::Nob => "no",
        Lang::Fin => "fi",
        Lang::Tur => "tr",
        Lang::Cmn => "zh",
        Lang::Jpn => "ja",
        Lang::Kor => "ko",
        Lang::Ara => "ar",
        other => other.code(),
    };
    code.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_first_configured_candidate() {
        let candidates = vec![
            DetectedLanguage::new("it", 0.7),
            DetectedLanguage::new("fr", 0.2),
            DetectedLanguage::new("en", 0.1),
        ];
        let chosen = select_language(&candidates, |c| ["en", "fr"].contains(&c), "en");
        assert_eq!(chosen, "fr");
    }

    #[test]
    fn test_select_falls_back_to_default() {
        let candidates = vec![DetectedLanguage::new("it", 0.9)];
        assert_eq!(select_language(&candidates, |c| c == "fr", "en"), "en");
    }

    #[test]
    fn test_select_with_no_candidates() {
        assert_eq!(select_language(&[], |_| true, "fr"), "fr");
    }

    #[test]
    fn test_detected_language_display() {
        assert_eq!(DetectedLanguage::new("en", 0.5).to_string(), "en:0.5000");
    }

    #[test]
    fn test_iso_codes() {
        assert_eq!(iso_code(Lang::Eng), "en");
        assert_eq!(iso_code(Lang::Fra), "fr");
        assert_eq!(iso_code(Lang::Epo), "epo");
    }

    #[test]
    fn test_whatlang_detects_english_first() {
        let detector = WhatlangDetector::default();
        let candidates =
            detector.detect("The history of the Roman Empire is long and full of wars and emperors");
        assert!(!candidates.is_empty());
        assert_eq!(candidates[0].code, "en");
        assert!(candidates.len() <= MAX_CANDIDATES);
    }

    #[test]
    fn test_whatlang_ranking_is_descending() {
        let detector = WhatlangDetector::new(3);
        let candidates = detector.detect("La révolution française a commencé en mille sept cent");
        for pair in candidates.windows(2) {
            assert!(pair[0].confidence >= pair[1].confidence);
        }
    }

    #[test]
    fn test_whatlang_candidates_are_distinct() {
        let detector = WhatlangDetector::default();
        let candidates = detector.detect("Quelle est la vitesse de la lumière dans le vide");
        let mut codes: Vec<_> = candidates.iter().map(|c| c.code.clone()).collect();
        codes.dedup();
        assert_eq!(codes.len(), candidates.len());
    }
}
