use super::{whole_word_pattern, Finding, HeuristicRule, Level, RuleContext, RuleResult};
use crate::config::{ConfigError, HeuristicConfig};
use regex::RegexSet;
use std::collections::HashSet;

const POINTS_PER_HIT: u32 = 2;
const MAX_POINTS: u32 = 10;
const MAX_LISTED_TERMS: usize = 10;

/// Urgency and pressure vocabulary, Spanish and English.
pub struct UrgencyAnalyzer {
    terms: Vec<String>,
    matcher: RegexSet,
}

impl UrgencyAnalyzer {
    pub fn new(terms: Vec<String>) -> Result<Self, ConfigError> {
        let matcher = RegexSet::new(terms.iter().map(|t| whole_word_pattern(t)))?;
        Ok(Self { terms, matcher })
    }

    pub fn from_config(config: &HeuristicConfig) -> Result<Self, ConfigError> {
        Self::new(config.urgency_terms().cloned().collect())
    }

    /// Every lexicon entry present in `text`, in lexicon order
    pub fn hits<'a>(&'a self, text: &str) -> Vec<&'a str> {
        self.matcher
            .matches(text)
            .into_iter()
            .map(|i| self.terms[i].as_str())
            .collect()
    }
}

impl HeuristicRule for UrgencyAnalyzer {
    fn evaluate(&self, context: &RuleContext) -> RuleResult {
        let hits = self.hits(context.text);
        if hits.is_empty() {
            return RuleResult::none();
        }

        let weight = (hits.len() as u32 * POINTS_PER_HIT).min(MAX_POINTS);

        let mut seen = HashSet::new();
        let listed: Vec<&str> = hits
            .iter()
            .copied()
            .filter(|h| seen.insert(*h))
            .take(MAX_LISTED_TERMS)
            .collect();
        let ellipsis = if hits.len() > MAX_LISTED_TERMS { "…" } else { "" };

        let mut result = RuleResult::none();
        result.add(
            weight,
            Finding::new(
                Level::Warn,
                format!(
                    "Urgency/manipulation language detected: {}{}",
                    listed.join(", "),
                    ellipsis
                ),
            ),
        );
        result
    }

    fn name(&self) -> &str {
        "urgency_language"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::ExtractedEntities;

    fn run(text: &str) -> RuleResult {
        let analyzer = UrgencyAnalyzer::from_config(&HeuristicConfig::default()).unwrap();
        let entities = ExtractedEntities::default();
        analyzer.evaluate(&RuleContext {
            text,
            entities: &entities,
        })
    }

    #[test]
    fn test_no_hits() {
        assert!(run("reunión confirmada para el jueves a las 10.").is_empty());
    }

    #[test]
    fn test_weight_per_hit() {
        let result = run("hola, verifique su cuenta urgente");
        assert_eq!(result.weight_delta, 4);
        assert_eq!(result.findings[0].level, Level::Warn);
        assert!(result.findings[0].message.contains("urgente, verifique"));
    }

    #[test]
    fn test_term_in_both_lists_counts_twice() {
        let result = run("your token");
        assert_eq!(result.weight_delta, 4);
        assert!(result.findings[0].message.ends_with(": token"));
    }

    #[test]
    fn test_weight_capped() {
        let text = "urgent immediately suspend blocked verify confirm reset password prize winner tax customs";
        let result = run(text);
        assert_eq!(result.weight_delta, MAX_POINTS);
        assert!(result.findings[0].message.ends_with('…'));
    }

    #[test]
    fn test_phrase_terms() {
        let result = run("último aviso: actualice sus datos");
        assert_eq!(result.weight_delta, 4);
    }

    #[test]
    fn test_custom_lexicon() {
        let analyzer = UrgencyAnalyzer::new(vec!["act now".to_string()]).unwrap();
        assert_eq!(analyzer.hits("please act now!"), vec!["act now"]);
        assert!(analyzer.hits("react nowhere").is_empty());
    }
}
