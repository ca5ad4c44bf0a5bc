use super::{whole_word_pattern, Finding, HeuristicRule, Level, RuleContext, RuleResult};
use crate::config::{ConfigError, HeuristicConfig};
use regex::Regex;

const SENSITIVE_WEIGHT: u32 = 6;

/// Requests for credentials, card data, identity numbers or payments.
pub struct SensitiveDataAnalyzer {
    pattern: Option<Regex>,
}

impl SensitiveDataAnalyzer {
    pub fn new(terms: &[String]) -> Result<Self, ConfigError> {
        if terms.is_empty() {
            return Ok(Self { pattern: None });
        }

        let alternation = terms
            .iter()
            .map(|t| whole_word_pattern(t))
            .collect::<Vec<_>>()
            .join("|");

        Ok(Self {
            pattern: Some(Regex::new(&format!("(?i)(?:{})", alternation))?),
        })
    }

    pub fn from_config(config: &HeuristicConfig) -> Result<Self, ConfigError> {
        Self::new(&config.sensitive_terms)
    }

    pub fn is_request(&self, text: &str) -> bool {
        self.pattern.as_ref().is_some_and(|re| re.is_match(text))
    }
}

impl HeuristicRule for SensitiveDataAnalyzer {
    fn evaluate(&self, context: &RuleContext) -> RuleResult {
        let mut result = RuleResult::none();
        if self.is_request(context.text) {
            result.add(
                SENSITIVE_WEIGHT,
                Finding::new(
                    Level::Bad,
                    "Request for sensitive data (e.g. card number, password or OTP).",
                ),
            );
        }
        result
    }

    fn name(&self) -> &str {
        "sensitive_data"
    }
}
