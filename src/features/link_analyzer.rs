use super::{Finding, HeuristicRule, Level, RuleContext, RuleResult};
use crate::config::HeuristicConfig;
use crate::domain_utils::DomainUtils;
use url::Url;

const SHORTENER_WEIGHT: u32 = 8;

/// Checks the extracted URLs: flags documents with none at all (links may
/// be hidden in images) and links routed through redirection services.
pub struct LinkAnalyzer {
    shorteners: Vec<String>,
}

impl LinkAnalyzer {
    pub fn new(shorteners: Vec<String>) -> Self {
        Self { shorteners }
    }

    pub fn from_config(config: &HeuristicConfig) -> Self {
        Self::new(config.shorteners.clone())
    }

    /// Check if a URL goes through a known shortener
    pub fn is_shortener(&self, url: &str) -> bool {
        match Url::parse(url) {
            Ok(parsed) => parsed
                .host_str()
                .is_some_and(|host| DomainUtils::matches_domain_list(host, &self.shorteners)),
            Err(_) => self.shorteners.iter().any(|s| url.contains(s.as_str())),
        }
    }
}

impl HeuristicRule for LinkAnalyzer {
    fn evaluate(&self, context: &RuleContext) -> RuleResult {
        let mut result = RuleResult::none();
        let urls = &context.entities.urls;

        if urls.is_empty() {
            result.add(
                0,
                Finding::new(
                    Level::Warn,
                    "No explicit URLs detected. Phishing sometimes hides links inside images.",
                ),
            );
        }

        let shortened: Vec<&str> = urls
            .iter()
            .filter(|u| self.is_shortener(u))
            .map(String::as_str)
            .collect();

        if !shortened.is_empty() {
            log::debug!("Shortened URLs: {:?}", shortened);
            result.add(
                SHORTENER_WEIGHT,
                Finding::new(
                    Level::Bad,
                    format!("URL shorteners in use: {}", shortened.join(", ")),
                ),
            );
        }

        result
    }

    fn name(&self) -> &str {
        "link_analysis"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::extract;

    fn run(text: &str) -> RuleResult {
        let analyzer = LinkAnalyzer::from_config(&HeuristicConfig::default());
        let entities = extract(text);
        analyzer.evaluate(&RuleContext {
            text,
            entities: &entities,
        })
    }

    #[test]
    fn test_no_urls_is_informational() {
        let result = run("nothing to click here");
        assert_eq!(result.weight_delta, 0);
        assert_eq!(result.findings.len(), 1);
        assert_eq!(result.findings[0].level, Level::Warn);
    }

    #[test]
    fn test_shortener_flagged_once() {
        let result = run("http://bit.ly/abc123 and https://tinyurl.com/x");
        assert_eq!(result.weight_delta, SHORTENER_WEIGHT);
        assert_eq!(result.findings.len(), 1);
        assert_eq!(result.findings[0].level, Level::Bad);
        assert!(result.findings[0].message.contains("http://bit.ly/abc123"));
        assert!(result.findings[0].message.contains("https://tinyurl.com/x"));
    }

    #[test]
    fn test_regular_url_clean() {
        assert!(run("https://www.example.com/login").is_empty());
    }

    #[test]
    fn test_host_match_not_substring() {
        let analyzer = LinkAnalyzer::from_config(&HeuristicConfig::default());
        assert!(!analyzer.is_shortener("https://microsoft.com/account"));
        assert!(analyzer.is_shortener("https://t.co/xyz"));
        assert!(analyzer.is_shortener("https://www.bit.ly/xyz"));
    }
}
