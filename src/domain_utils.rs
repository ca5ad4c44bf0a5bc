/// Minimal domain hierarchy utilities
pub struct DomainUtils;

impl DomainUtils {
    /// Extract domain from email address
    pub fn extract_domain(email: &str) -> Option<String> {
        email
            .split('@')
            .nth(1)
            .filter(|d| !d.is_empty())
            .map(|s| s.to_lowercase())
    }

    /// Check if domain matches any in list (with hierarchy support)
    pub fn matches_domain_list<S: AsRef<str>>(domain: &str, domain_list: &[S]) -> bool {
        domain_list
            .iter()
            .any(|pattern| Self::matches_domain(domain, pattern.as_ref()))
    }

    /// Exact match or subdomain of `pattern`
    pub fn matches_domain(domain: &str, pattern: &str) -> bool {
        let domain_lower = domain.to_lowercase();
        let pattern_lower = pattern.to_lowercase();

        domain_lower == pattern_lower || domain_lower.ends_with(&format!(".{}", pattern_lower))
    }

    /// Final dot-separated label, if the domain has more than one label
    pub fn tld(domain: &str) -> Option<&str> {
        match domain.rsplit_once('.') {
            Some((_, tld)) if !tld.is_empty() => Some(tld),
            _ => None,
        }
    }

    /// Label immediately left of the final one. Falls back to the whole
    /// domain when there is no such label or it is empty.
    pub fn second_level_label(domain: &str) -> &str {
        let labels: Vec<&str> = domain.split('.').collect();
        if labels.len() >= 2 {
            let sld = labels[labels.len() - 2];
            if !sld.is_empty() {
                return sld;
            }
        }
        domain
    }

    /// First dot-separated label (`mail` for `mail.example.com`)
    pub fn first_label(domain: &str) -> &str {
        domain.split('.').next().unwrap_or(domain)
    }

    pub fn label_count(domain: &str) -> usize {
        domain.split('.').count()
    }
}
