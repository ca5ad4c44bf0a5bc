use crate::analyzer::AnalysisResult;

const TEXT_EXCERPT_CHARS: usize = 4000;
const MAX_LISTED_URLS: usize = 20;

fn plural(count: usize, singular: &str, plural: &str) -> String {
    format!("{} {}", count, if count == 1 { singular } else { plural })
}

fn bullet_list(items: &[String], empty: &str) -> String {
    if items.is_empty() {
        format!("- {}", empty)
    } else {
        items
            .iter()
            .map(|i| format!("- {}", i))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// One-line summary: verdict, score and entity counts
pub fn summary_line(result: &AnalysisResult) -> String {
    format!(
        "{} risk | Score: {}/100 | {} | {} | {}",
        result.verdict.label,
        result.score,
        plural(result.urls.len(), "URL", "URLs"),
        plural(result.emails.len(), "email", "emails"),
        plural(result.domains.len(), "domain", "domains"),
    )
}

/// Human-readable report of `result` for the document `text`
pub fn render_text(result: &AnalysisResult, text: &str) -> String {
    let mut lines = vec![
        summary_line(result),
        String::new(),
        "--- FINDINGS ---".to_string(),
    ];
    lines.extend(result.findings.iter().map(|finding| {
        format!(
            "[{}] {}",
            finding.level.as_str().to_uppercase(),
            finding.message
        )
    }));

    let excerpt: String = text.chars().take(TEXT_EXCERPT_CHARS).collect();
    let urls: Vec<String> = result.urls.iter().take(MAX_LISTED_URLS).cloned().collect();
    lines.extend([
        String::new(),
        format!("--- ANALYZED TEXT (first {} characters) ---", TEXT_EXCERPT_CHARS),
        excerpt,
        String::new(),
        "--- ENTITIES ---".to_string(),
        format!("URLs (up to {}):\n{}", MAX_LISTED_URLS, bullet_list(&urls, "(none)")),
        format!("\nEmails:\n{}", bullet_list(&result.emails, "(none)")),
        format!("\nDomains:\n{}", bullet_list(&result.domains, "(none)")),
        "\nIDN/Punycode:".to_string(),
    ]);
    lines.extend(result.idn_info.iter().map(|info| {
        if info.has_distinct_unicode() {
            format!("- {} → {}", info.domain, info.unicode_form)
        } else {
            format!("- {}", info.domain)
        }
    }));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::analyze;

    #[test]
    fn test_summary_line() {
        let result = analyze("http://a.com http://b.com x@a.com");
        assert_eq!(
            summary_line(&result),
            "Low risk | Score: 10/100 | 2 URLs | 1 email | 2 domains"
        );
    }

    #[test]
    fn test_render_lists_findings_and_entities() {
        let text = "Hola, verifique su cuenta urgente en http://bit.ly/abc123";
        let result = analyze(text);
        let report = render_text(&result, text);

        assert!(report.contains("[WARN] Urgency/manipulation language detected"));
        assert!(report.contains("[BAD] URL shorteners in use"));
        assert!(report.contains("- http://bit.ly/abc123"));
        assert!(report.contains("Emails:\n- (none)"));
        assert!(report.contains(text));
    }

    #[test]
    fn test_render_shows_unicode_form() {
        let text = "http://xn--bcher-kva.de";
        let report = render_text(&analyze(text), text);
        assert!(report.contains("- xn--bcher-kva.de → bücher.de"));
    }

    #[test]
    fn test_excerpt_truncated() {
        let text = "a".repeat(TEXT_EXCERPT_CHARS + 100);
        let report = render_text(&analyze(&text), &text);
        assert!(!report.contains(&text));
        assert!(report.contains(&"a".repeat(TEXT_EXCERPT_CHARS)));
    }

    #[test]
    fn test_report_layout() {
        let text = "write to x@a.com";
        let report = render_text(&analyze(text), text);
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines[0], "Low risk | Score: 10/100 | 0 URLs | 1 email | 1 domain");
        assert_eq!(lines[1], "");
        assert_eq!(lines[2], "--- FINDINGS ---");
        assert!(report.contains("URLs (up to 20):\n- (none)\n\nEmails:\n- x@a.com"));
        assert!(report.ends_with("IDN/Punycode:\n- a.com\n"));
    }
}
