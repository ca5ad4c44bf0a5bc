use crate::config::{ConfigError, HeuristicConfig};
use crate::entities::{self, IdnInfo};
use crate::features::{Finding, RuleContext, RuleSet};
use crate::scoring::{self, Verdict};
use lazy_static::lazy_static;
use serde::Serialize;

lazy_static! {
    static ref DEFAULT_ANALYZER: Analyzer = Analyzer::default();
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    pub score: u32,
    pub verdict: Verdict,
    pub total_weight: u32,
    pub urls: Vec<String>,
    pub emails: Vec<String>,
    pub domains: Vec<String>,
    pub idn_info: Vec<IdnInfo>,
    pub findings: Vec<Finding>,
}

/// Runs extraction, the rule set and score normalization over a document.
///
/// Stateless between calls and safe to share across threads.
pub struct Analyzer {
    rules: RuleSet,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(&HeuristicConfig::default()).expect("bundled heuristic tables are valid")
    }
}

impl Analyzer {
    pub fn new(config: &HeuristicConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            rules: RuleSet::from_config(config)?,
        })
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn analyze(&self, text: &str) -> AnalysisResult {
        let lower = text.to_lowercase();
        let extracted = entities::extract(&lower);

        let context = RuleContext {
            text: &lower,
            entities: &extracted,
        };

        let mut total_weight: u32 = 0;
        let mut findings = Vec::new();

        for rule in self.rules.rules() {
            let result = rule.evaluate(&context);
            if result.weight_delta > 0 {
                log::debug!("Rule {} added {} points", rule.name(), result.weight_delta);
            }
            total_weight = total_weight.saturating_add(result.weight_delta);
            findings.extend(result.findings);
        }

        let score = scoring::normalize(total_weight);
        let verdict = Verdict::from_score(score);
        log::debug!(
            "Analysis complete: weight={} score={} verdict={}",
            total_weight,
            score,
            verdict.label
        );

        AnalysisResult {
            score,
            verdict,
            total_weight,
            urls: extracted.urls,
            emails: extracted.emails,
            domains: extracted.domains,
            idn_info: extracted.idn_info,
            findings,
        }
    }
}

/// Analyze `text` with the bundled heuristic tables
pub fn analyze(text: &str) -> AnalysisResult {
    DEFAULT_ANALYZER.analyze(text)
}
