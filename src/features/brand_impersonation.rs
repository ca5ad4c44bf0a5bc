use super::{Finding, HeuristicRule, Level, RuleContext, RuleResult};
use crate::config::HeuristicConfig;
use crate::domain_utils::DomainUtils;
use crate::similarity::similar;

const BRAND_MATCH_WEIGHT: u32 = 6;

/// Domains whose second-level label looks like a well-known brand without
/// belonging to it.
pub struct BrandSimilarityAnalyzer {
    brands: Vec<String>,
}

impl BrandSimilarityAnalyzer {
    pub fn new(brands: Vec<String>) -> Self {
        Self { brands }
    }

    pub fn from_config(config: &HeuristicConfig) -> Self {
        Self::new(config.brands.clone())
    }

    /// `brand.com`, any subdomain of it, or anything under a `.brand` TLD
    pub fn is_brand_owned(domain: &str, brand: &str) -> bool {
        DomainUtils::matches_domain(domain, &format!("{}.com", brand))
            || domain.ends_with(&format!(".{}", brand))
    }

    /// Brands `domain` imitates, in configured order
    pub fn lookalikes<'a>(&'a self, domain: &str) -> Vec<&'a str> {
        self.brands
            .iter()
            .filter(|brand| similar(domain, brand) && !Self::is_brand_owned(domain, brand))
            .map(String::as_str)
            .collect()
    }
}

impl HeuristicRule for BrandSimilarityAnalyzer {
    fn evaluate(&self, context: &RuleContext) -> RuleResult {
        let mut result = RuleResult::none();

        for domain in &context.entities.domains {
            for brand in self.lookalikes(domain) {
                result.add(
                    BRAND_MATCH_WEIGHT,
                    Finding::new(
                        Level::Bad,
                        format!("Domain resembles a known brand: {} ≈ {}", domain, brand),
                    ),
                );
            }
        }

        result
    }

    fn name(&self) -> &str {
        "brand_similarity"
    }
}
