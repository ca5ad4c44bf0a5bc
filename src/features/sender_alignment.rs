//! `From:` / `Reply-To:` consistency checks.
//!
//! Only single-line, loosely formatted headers are recognized; this is a
//! heuristic over pasted text, not an RFC 5322 parser.

use super::{Finding, HeuristicRule, Level, RuleContext, RuleResult};
use crate::domain_utils::DomainUtils;
use lazy_static::lazy_static;
use regex::Regex;

const DISPLAY_NAME_WEIGHT: u32 = 3;
const REPLY_TO_WEIGHT: u32 = 5;

lazy_static! {
    static ref FROM_REGEX: Regex = Regex::new(r"(?i)from:\s*([^\r\n]*)").unwrap();
    static ref REPLY_TO_REGEX: Regex = Regex::new(r"(?i)reply-to:\s*([^\r\n]*)").unwrap();
    static ref ADDRESS_REGEX: Regex = Regex::new(r"[A-Za-z0-9_.+-]+@[A-Za-z0-9_.-]+").unwrap();
    static ref QUOTE_REGEX: Regex = Regex::new(r#"[<>"']"#).unwrap();
}

fn header_value<'a>(regex: &Regex, text: &'a str) -> Option<&'a str> {
    regex
        .captures(text)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str())
}

fn first_address(value: &str) -> Option<&str> {
    ADDRESS_REGEX.find(value).map(|m| m.as_str())
}

/// Header value with every address and quoting character removed
fn display_name(value: &str) -> String {
    let without_addresses = ADDRESS_REGEX.replace_all(value, "");
    QUOTE_REGEX
        .replace_all(&without_addresses, "")
        .trim()
        .to_string()
}

/// Reports the sender line and checks the display name against the
/// sending domain.
pub struct DisplayNameAnalyzer;

impl HeuristicRule for DisplayNameAnalyzer {
    fn evaluate(&self, context: &RuleContext) -> RuleResult {
        let mut result = RuleResult::none();

        let Some(from) = header_value(&FROM_REGEX, context.text) else {
            return result;
        };

        result.add(
            0,
            Finding::new(Level::Ok, format!("Sender detected: {}", from.trim())),
        );

        let name = display_name(from);
        let host = first_address(from).and_then(DomainUtils::extract_domain);

        if let Some(host) = host {
            if !name.is_empty() {
                let label = DomainUtils::first_label(&host);
                if !name.to_lowercase().contains(label) {
                    log::debug!("Display name '{}' does not mention '{}'", name, label);
                    result.add(
                        DISPLAY_NAME_WEIGHT,
                        Finding::new(
                            Level::Warn,
                            format!(
                                "Display name does not match the sender domain ({} vs {})",
                                name, host
                            ),
                        ),
                    );
                }
            }
        }

        result
    }

    fn name(&self) -> &str {
        "sender_display_name"
    }
}

/// Replies routed to a different domain than the apparent sender.
pub struct ReplyToAnalyzer;

impl HeuristicRule for ReplyToAnalyzer {
    fn evaluate(&self, context: &RuleContext) -> RuleResult {
        let mut result = RuleResult::none();

        let reply_to = header_value(&REPLY_TO_REGEX, context.text).and_then(first_address);
        let from = header_value(&FROM_REGEX, context.text).and_then(first_address);

        if let (Some(reply_to), Some(from)) = (reply_to, from) {
            let reply_domain = DomainUtils::extract_domain(reply_to);
            let from_domain = DomainUtils::extract_domain(from);

            if reply_domain != from_domain {
                result.add(
                    REPLY_TO_WEIGHT,
                    Finding::new(
                        Level::Bad,
                        format!("Reply-To differs from From: {} ≠ {}", reply_to, from),
                    ),
                );
            }
        }

        result
    }

    fn name(&self) -> &str {
        "reply_to_mismatch"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::ExtractedEntities;

    fn run(rule: &dyn HeuristicRule, text: &str) -> RuleResult {
        let entities = ExtractedEntities::default();
        rule.evaluate(&RuleContext {
            text,
            entities: &entities,
        })
    }

    #[test]
    fn test_display_name_mismatch() {
        let result = run(
            &DisplayNameAnalyzer,
            "from: paypal support <no-reply@paypa1-secure.xyz>\nbody",
        );
        assert_eq!(result.weight_delta, DISPLAY_NAME_WEIGHT);
        assert_eq!(result.findings.len(), 2);
        assert_eq!(result.findings[0].level, Level::Ok);
        assert_eq!(
            result.findings[0].message,
            "Sender detected: paypal support <no-reply@paypa1-secure.xyz>"
        );
        assert_eq!(result.findings[1].level, Level::Warn);
        assert!(result.findings[1]
            .message
            .contains("(paypal support vs paypa1-secure.xyz)"));
    }

    #[test]
    fn test_display_name_matches_domain() {
        let result = run(&DisplayNameAnalyzer, "from: \"acme billing\" <billing@acme.com>");
        assert_eq!(result.weight_delta, 0);
        assert_eq!(result.findings.len(), 1);
    }

    #[test]
    fn test_bare_address_only_reports_sender() {
        let result = run(&DisplayNameAnalyzer, "from: support@real-bank.net");
        assert_eq!(result.weight_delta, 0);
        assert_eq!(result.findings.len(), 1);
        assert_eq!(result.findings[0].level, Level::Ok);
    }

    #[test]
    fn test_no_from_header() {
        assert!(run(&DisplayNameAnalyzer, "hello there").is_empty());
    }

    #[test]
    fn test_reply_to_domain_mismatch() {
        let result = run(
            &ReplyToAnalyzer,
            "reply-to: billing@real-bank.com\nfrom: support@real-bank.net",
        );
        assert_eq!(result.weight_delta, REPLY_TO_WEIGHT);
        assert_eq!(result.findings[0].level, Level::Bad);
        assert!(result.findings[0]
            .message
            .contains("billing@real-bank.com ≠ support@real-bank.net"));
    }

    #[test]
    fn test_reply_to_same_domain() {
        let result = run(
            &ReplyToAnalyzer,
            "from: alice@example.com\nreply-to: bob@example.com",
        );
        assert!(result.is_empty());
    }

    #[test]
    fn test_reply_to_without_from() {
        assert!(run(&ReplyToAnalyzer, "reply-to: bob@example.com").is_empty());
    }
}
