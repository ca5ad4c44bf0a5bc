use super::{Finding, HeuristicRule, Level, RuleContext, RuleResult};

const IDN_WEIGHT: u32 = 8;

/// Internationalized or punycode domains, the usual vehicle for homograph
/// lookalikes. Scored once no matter how many domains qualify.
pub struct IdnHomographAnalyzer;

impl HeuristicRule for IdnHomographAnalyzer {
    fn evaluate(&self, context: &RuleContext) -> RuleResult {
        let listed: Vec<String> = context
            .entities
            .idn_info
            .iter()
            .filter(|info| info.is_idn)
            .map(|info| {
                if info.has_distinct_unicode() {
                    format!("{} → {}", info.domain, info.unicode_form)
                } else {
                    info.domain.clone()
                }
            })
            .collect();

        if listed.is_empty() {
            return RuleResult::none();
        }

        let mut result = RuleResult::none();
        result.add(
            IDN_WEIGHT,
            Finding::new(
                Level::Bad,
                format!(
                    "IDN/punycode domains (possible homograph): {}",
                    listed.join(", ")
                ),
            ),
        );
        result
    }

    fn name(&self) -> &str {
        "idn_homograph"
    }
}
