//! Query classifier
//!
//! Maps a raw query string to exactly one `QueryType` using a deterministic,
//! case-insensitive lexical heuristic. No external calls, no suspension.

use super::QueryType;
use actuaria_common::config::ClassifierConfig;

/// Lower-cased trigger-word sets, built once from configuration
#[derive(Debug, Clone)]
pub struct TriggerLexicon {
    /// Lexicon revision, echoed in logs
    pub version: u32,

    computational: Vec<String>,
    explanatory: Vec<String>,
    conceptual: Vec<String>,
}

impl TriggerLexicon {
    pub fn from_config(config: &ClassifierConfig) -> Self {
        let lower = |set: &[String]| set.iter().map(|t| t.to_lowercase()).collect();
        Self {
            version: config.version,
            computational: lower(&config.computational_triggers),
            explanatory: lower(&config.explanatory_triggers),
            conceptual: lower(&config.conceptual_triggers),
        }
    }
}

impl Default for TriggerLexicon {
    fn default() -> Self {
        Self::from_config(&ClassifierConfig::default())
    }
}

/// Deterministic lexical classifier
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    lexicon: TriggerLexicon,
}

impl Classifier {
    pub fn new(lexicon: TriggerLexicon) -> Self {
        Self { lexicon }
    }

    pub fn from_config(config: &ClassifierConfig) -> Self {
        Self::new(TriggerLexicon::from_config(config))
    }

    /// Classify a query. Total: any string (including empty) maps to exactly
    /// one `QueryType`; unrecognized phrasing degrades to `Hybrid` so
    /// dispatch always has a defined path.
    pub fn classify(&self, query: &str) -> QueryType {
        let q = query.to_lowercase();

        if contains_any(&q, &self.lexicon.computational) {
            if contains_any(&q, &self.lexicon.explanatory) {
                return QueryType::Hybrid;
            }
            return QueryType::Computational;
        }

        if contains_any(&q, &self.lexicon.conceptual) {
            return QueryType::Conceptual;
        }

        QueryType::Hybrid
    }
}

fn contains_any(text: &str, triggers: &[String]) -> bool {
    triggers.iter().any(|t| text.contains(t.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_computational() {
        let classifier = Classifier::default();
        assert_eq!(
            classifier.classify("Calculate the variance of X"),
            QueryType::Computational
        );
        assert_eq!(
            classifier.classify("What is the value of an annuity?"),
            QueryType::Computational
        );
    }

    #[test]
    fn test_hybrid_when_explanation_requested() {
        let classifier = Classifier::default();
        assert_eq!(
            classifier.classify("Calculate and explain the variance of X"),
            QueryType::Hybrid
        );
        assert_eq!(
            classifier.classify("Solve this and tell me why"),
            QueryType::Hybrid
        );
    }

    #[test]
    fn test_conceptual() {
        let classifier = Classifier::default();
        assert_eq!(
            classifier.classify("What is the force of mortality?"),
            QueryType::Conceptual
        );
        assert_eq!(
            classifier.classify("Describe the collective risk model"),
            QueryType::Conceptual
        );
    }

    #[test]
    fn test_default_fallback() {
        let classifier = Classifier::default();
        assert_eq!(classifier.classify("Tell me a joke"), QueryType::Hybrid);
        assert_eq!(classifier.classify(""), QueryType::Hybrid);
    }

    #[test]
    fn test_case_insensitive() {
        let classifier = Classifier::default();
        assert_eq!(
            classifier.classify("CALCULATE THE PREMIUM"),
            QueryType::Computational
        );
    }

    #[test]
    fn test_custom_lexicon() {
        let config = ClassifierConfig {
            version: 2,
            computational_triggers: vec!["compute".into()],
            explanatory_triggers: vec!["justify".into()],
            conceptual_triggers: vec!["define".into()],
        };
        let classifier = Classifier::from_config(&config);

        assert_eq!(classifier.classify("Compute d from i"), QueryType::Computational);
        assert_eq!(
            classifier.classify("Compute and justify d"),
            QueryType::Hybrid
        );
        assert_eq!(classifier.classify("Define duration"), QueryType::Conceptual);
        // Old lexicon's triggers no longer match
        assert_eq!(classifier.classify("Calculate d"), QueryType::Hybrid);
    }
}
