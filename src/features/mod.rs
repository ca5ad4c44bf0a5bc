pub mod brand_impersonation;
pub mod context_analyzer;
pub mod idn_homograph;
pub mod link_analyzer;
pub mod noise_ratio;
pub mod sender_alignment;
pub mod sensitive_data;
pub mod tld_risk;

use crate::config::{ConfigError, HeuristicConfig};
use crate::entities::ExtractedEntities;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Ok,
    Warn,
    Bad,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Ok => "ok",
            Level::Warn => "warn",
            Level::Bad => "bad",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub level: Level,
    pub message: String,
}

impl Finding {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

/// What a single rule adds to the analysis
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleResult {
    pub weight_delta: u32,
    pub findings: Vec<Finding>,
}

impl RuleResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn add(&mut self, weight: u32, finding: Finding) {
        self.weight_delta += weight;
        self.findings.push(finding);
    }

    pub fn is_empty(&self) -> bool {
        self.weight_delta == 0 && self.findings.is_empty()
    }
}

/// Shared read-only input every rule sees. `text` is already lowercased
/// and `entities` were extracted from that lowercased text.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub text: &'a str,
    pub entities: &'a ExtractedEntities,
}

pub trait HeuristicRule: Send + Sync {
    fn evaluate(&self, context: &RuleContext) -> RuleResult;
    fn name(&self) -> &str;
}

/// The fixed, ordered collection of rules. Order decides finding order.
pub struct RuleSet {
    rules: Vec<Box<dyn HeuristicRule>>,
}

impl RuleSet {
    pub fn from_config(config: &HeuristicConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            rules: vec![
                Box::new(context_analyzer::UrgencyAnalyzer::from_config(config)?),
                Box::new(link_analyzer::LinkAnalyzer::from_config(config)),
                Box::new(tld_risk::DomainShapeAnalyzer::from_config(config)),
                Box::new(idn_homograph::IdnHomographAnalyzer),
                Box::new(brand_impersonation::BrandSimilarityAnalyzer::from_config(
                    config,
                )),
                Box::new(sensitive_data::SensitiveDataAnalyzer::from_config(config)?),
                Box::new(sender_alignment::DisplayNameAnalyzer),
                Box::new(sender_alignment::ReplyToAnalyzer),
                Box::new(noise_ratio::NoiseRatioAnalyzer),
            ],
        })
    }

    pub fn rules(&self) -> impl Iterator<Item = &dyn HeuristicRule> {
        self.rules.iter().map(|r| r.as_ref())
    }

    pub fn names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }
}

/// Plural and verb endings accepted after a lexicon term
const INFLECTION_SUFFIX: &str = "(?:s|es|r|ción)?";

/// Regex source matching `term` as a whole word or phrase, optionally
/// followed by a common inflection (`contraseñas`, `verificar`, `passwords`).
/// Longer derivations such as `confirmada` do not match `confirma`.
pub(crate) fn whole_word_pattern(term: &str) -> String {
    let escaped = regex::escape(term);
    let starts_word = term.chars().next().is_some_and(is_word_char);
    let ends_word = term.chars().last().is_some_and(is_word_char);

    let mut pattern = String::new();
    if starts_word {
        pattern.push_str(r"\b");
    }
    pattern.push_str(&escaped);
    if ends_word {
        pattern.push_str(INFLECTION_SUFFIX);
        pattern.push_str(r"\b");
    }
    pattern
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
