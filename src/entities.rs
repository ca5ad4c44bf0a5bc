use crate::domain_utils::DomainUtils;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;
use url::Url;

lazy_static! {
    static ref URL_REGEX: Regex = Regex::new(r"(?i)https?://[^\s)]+").unwrap();
    static ref EMAIL_REGEX: Regex =
        Regex::new(r"(?i)[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}").unwrap();
}

const ACE_PREFIX: &str = "xn--";

/// Unicode view of a single extracted domain
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdnInfo {
    pub domain: String,
    pub is_idn: bool,
    pub unicode_form: String,
}

impl IdnInfo {
    pub fn for_domain(domain: &str) -> Self {
        let is_idn = !domain.is_ascii() || domain.contains(ACE_PREFIX);
        let unicode_form = if domain.contains(ACE_PREFIX) {
            let (decoded, result) = idna::domain_to_unicode(domain);
            if let Err(e) = result {
                log::debug!("Partial IDN decode for {}: {:?}", domain, e);
            }
            decoded
        } else {
            domain.to_string()
        };

        Self {
            domain: domain.to_string(),
            is_idn,
            unicode_form,
        }
    }

    /// True when decoding produced something other than the raw domain
    pub fn has_distinct_unicode(&self) -> bool {
        !self.unicode_form.is_empty() && self.unicode_form != self.domain
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractedEntities {
    pub urls: Vec<String>,
    pub emails: Vec<String>,
    pub domains: Vec<String>,
    pub idn_info: Vec<IdnInfo>,
}

/// Pull URLs, email addresses and their hostnames out of free text.
///
/// Every list keeps first-seen order and holds no duplicates. A URL that
/// fails to parse is still listed but contributes no domain.
pub fn extract(text: &str) -> ExtractedEntities {
    let urls = unique(URL_REGEX.find_iter(text).map(|m| strip_trailing(m.as_str())));
    let emails = unique(EMAIL_REGEX.find_iter(text).map(|m| m.as_str()));

    let mut domains = Vec::new();
    let mut seen = HashSet::new();

    for url in &urls {
        match Url::parse(url) {
            Ok(parsed) => {
                if let Some(host) = parsed.host_str() {
                    push_unique(&mut domains, &mut seen, host.to_lowercase());
                }
            }
            Err(e) => log::debug!("Skipping domain for unparseable URL {}: {}", url, e),
        }
    }

    for email in &emails {
        if let Some(domain) = DomainUtils::extract_domain(email) {
            push_unique(&mut domains, &mut seen, domain);
        }
    }

    let idn_info = domains.iter().map(|d| IdnInfo::for_domain(d)).collect();

    ExtractedEntities {
        urls,
        emails,
        domains,
        idn_info,
    }
}

fn strip_trailing(url: &str) -> &str {
    url.trim_end_matches([')', ']', '.', ','])
}

fn unique<'a>(items: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .filter(|item| !item.is_empty() && seen.insert(*item))
        .map(str::to_string)
        .collect()
}

fn push_unique(domains: &mut Vec<String>, seen: &mut HashSet<String>, domain: String) {
    if seen.insert(domain.clone()) {
        domains.push(domain);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_trailing_punctuation_stripped() {
        let e = extract("see (http://example.com/path). and https://foo.org/x],");
        assert_eq!(e.urls, vec!["http://example.com/path", "https://foo.org/x"]);
    }

    #[test]
    fn test_urls_deduplicated_in_order() {
        let e = extract("http://b.com http://a.com http://b.com http://a.com.");
        assert_eq!(e.urls, vec!["http://b.com", "http://a.com"]);
    }

    #[test]
    fn test_domain_dedup_across_urls() {
        let e = extract(
            "https://login.example.com/a https://login.example.com/b http://LOGIN.example.com/c",
        );
        assert_eq!(e.urls.len(), 3);
        assert_eq!(e.domains, vec!["login.example.com"]);
    }

    #[test]
    fn test_emails_and_domains() {
        let e = extract("write to Support@Mail.Example.org or sales@shop.io, support@mail.example.org");
        assert_eq!(
            e.emails,
            vec!["Support@Mail.Example.org", "sales@shop.io", "support@mail.example.org"]
        );
        assert_eq!(e.domains, vec!["mail.example.org", "shop.io"]);
    }

    #[test]
    fn test_url_domains_precede_email_domains() {
        let e = extract("contact a@first.com then visit http://second.net");
        assert_eq!(e.domains, vec!["second.net", "first.com"]);
    }

    #[test]
    fn test_malformed_url_kept_without_domain() {
        let e = extract("broken http://[::zz]/x link");
        assert_eq!(e.urls, vec!["http://[::zz]/x"]);
        assert!(e.domains.is_empty());
    }

    #[test]
    fn test_idn_punycode_decoded() {
        let e = extract("http://xn--80ak6aa92e.com/login");
        assert_eq!(e.domains, vec!["xn--80ak6aa92e.com"]);
        let info = &e.idn_info[0];
        assert!(info.is_idn);
        assert!(info.has_distinct_unicode());
        assert!(!info.unicode_form.contains("xn--"));
        // Cyrillic а р р ӏ е
        assert_eq!(info.unicode_form, "\u{430}\u{440}\u{440}\u{4cf}\u{435}.com");
        assert!(info.unicode_form.ends_with(".com"));
    }

    #[test]
    fn test_unicode_host_becomes_ace() {
        let e = extract("https://bücher.de/");
        assert_eq!(e.domains, vec!["xn--bcher-kva.de"]);
        assert!(e.idn_info[0].is_idn);
        assert_eq!(e.idn_info[0].unicode_form, "bücher.de");
    }

    #[test]
    fn test_plain_domain_not_idn() {
        let info = IdnInfo::for_domain("example.com");
        assert!(!info.is_idn);
        assert_eq!(info.unicode_form, "example.com");
        assert!(!info.has_distinct_unicode());
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(extract(""), ExtractedEntities::default());
    }
}
