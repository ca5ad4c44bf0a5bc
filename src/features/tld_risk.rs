use super::{Finding, HeuristicRule, Level, RuleContext, RuleResult};
use crate::config::HeuristicConfig;
use crate::domain_utils::DomainUtils;

const SUSPICIOUS_TLD_WEIGHT: u32 = 8;
const MULTI_HYPHEN_WEIGHT: u32 = 4;
const DEEP_SUBDOMAIN_WEIGHT: u32 = 3;

const MIN_HYPHENS: usize = 2;
const MIN_LABELS: usize = 4;

/// Per-domain structural checks: abused TLDs, hyphen-stuffed names and
/// deep subdomain chains. Each domain is scored on its own.
pub struct DomainShapeAnalyzer {
    suspicious_tlds: Vec<String>,
}

impl DomainShapeAnalyzer {
    pub fn new(suspicious_tlds: Vec<String>) -> Self {
        Self { suspicious_tlds }
    }

    pub fn from_config(config: &HeuristicConfig) -> Self {
        Self::new(config.suspicious_tlds.clone())
    }

    pub fn has_suspicious_tld(&self, domain: &str) -> bool {
        DomainUtils::tld(domain).is_some_and(|tld| self.suspicious_tlds.iter().any(|s| s == tld))
    }
}

impl HeuristicRule for DomainShapeAnalyzer {
    fn evaluate(&self, context: &RuleContext) -> RuleResult {
        let mut result = RuleResult::none();

        for domain in &context.entities.domains {
            if self.has_suspicious_tld(domain) {
                result.add(
                    SUSPICIOUS_TLD_WEIGHT,
                    Finding::new(Level::Bad, format!("Untrusted TLD: {}", domain)),
                );
            }

            if domain.matches('-').count() >= MIN_HYPHENS {
                result.add(
                    MULTI_HYPHEN_WEIGHT,
                    Finding::new(
                        Level::Warn,
                        format!("Domain with multiple hyphens: {}", domain),
                    ),
                );
            }

            if DomainUtils::label_count(domain) >= MIN_LABELS {
                result.add(
                    DEEP_SUBDOMAIN_WEIGHT,
                    Finding::new(
                        Level::Warn,
                        format!("Deep subdomain that may be impersonating a brand: {}", domain),
                    ),
                );
            }
        }

        result
    }

    fn name(&self) -> &str {
        "domain_shape"
    }
}
