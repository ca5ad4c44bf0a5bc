use super::{Finding, HeuristicRule, Level, RuleContext, RuleResult};

const NOISE_WEIGHT: u32 = 2;
const MAX_NOISE_RATIO: f64 = 0.6;

/// Symbol-heavy text, typical of OCR output from images stuffed with links.
pub struct NoiseRatioAnalyzer;

fn is_letter(c: char) -> bool {
    matches!(c,
        'a'..='z' | 'A'..='Z' |
        'á' | 'é' | 'í' | 'ó' | 'ú' | 'ü' | 'ñ' |
        'Á' | 'É' | 'Í' | 'Ó' | 'Ú' | 'Ü' | 'Ñ'
    )
}

/// `(letters, non_letters)`; whitespace counts as neither
pub fn letter_counts(text: &str) -> (usize, usize) {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .fold((0, 0), |(letters, other), c| {
            if is_letter(c) {
                (letters + 1, other)
            } else {
                (letters, other + 1)
            }
        })
}

impl HeuristicRule for NoiseRatioAnalyzer {
    fn evaluate(&self, context: &RuleContext) -> RuleResult {
        let mut result = RuleResult::none();
        let (letters, non_letters) = letter_counts(context.text);

        if letters > 0 && non_letters as f64 / letters as f64 > MAX_NOISE_RATIO {
            result.add(
                NOISE_WEIGHT,
                Finding::new(
                    Level::Warn,
                    "Cluttered text with excess symbols/noise (possibly an image with links).",
                ),
            );
        }

        result
    }

    fn name(&self) -> &str {
        "noise_ratio"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::ExtractedEntities;

    fn run(text: &str) -> RuleResult {
        let entities = ExtractedEntities::default();
        NoiseRatioAnalyzer.evaluate(&RuleContext {
            text,
            entities: &entities,
        })
    }

    #[test]
    fn test_letter_counts() {
        assert_eq!(letter_counts("añb 1!"), (3, 2));
        assert_eq!(letter_counts("   "), (0, 0));
    }

    #[test]
    fn test_diaeresis_counts_as_letter() {
        assert_eq!(letter_counts("pingÜino ü"), (9, 0));
        // 4 letters, 2 symbols; would be 2 letters, 4 symbols without ü
        assert!(run("ab üü 12").is_empty());
    }

    #[test]
    fn test_noisy_text_flagged() {
        let result = run("a1$ b2% c3&");
        assert_eq!(result.weight_delta, NOISE_WEIGHT);
        assert_eq!(result.findings[0].level, Level::Warn);
    }

    #[test]
    fn test_prose_clean() {
        assert!(run("reunión confirmada para el jueves a las 10.").is_empty());
    }

    #[test]
    fn test_no_letters_never_flagged() {
        assert!(run("1234 %%%% ////").is_empty());
    }

    #[test]
    fn test_ratio_boundary_not_flagged() {
        // 5 letters, 3 symbols: exactly 0.6
        assert!(run("abcde 123").is_empty());
    }
}
