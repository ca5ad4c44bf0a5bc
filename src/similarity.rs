use crate::domain_utils::DomainUtils;

/// Maximum edit distance at which a label still counts as a lookalike
pub const MAX_EDIT_DISTANCE: usize = 2;

/// Does the second-level label of `candidate` look like `reference`?
///
/// Callers lowercase both sides beforehand; comparison is exact on what
/// is passed in.
pub fn similar(candidate: &str, reference: &str) -> bool {
    let sld = DomainUtils::second_level_label(candidate);

    if sld.contains(reference) {
        return true;
    }

    // paypa1 / g00gle style digit substitutions
    if fold_digit_homoglyphs(sld).contains(reference) {
        return true;
    }

    levenshtein(sld, reference) <= MAX_EDIT_DISTANCE
}

fn fold_digit_homoglyphs(label: &str) -> String {
    label
        .chars()
        .map(|c| match c {
            '0' => 'o',
            '1' => 'l',
            '3' => 'e',
            '4' => 'a',
            '5' => 's',
            '7' => 't',
            other => other,
        })
        .collect()
}

/// Edit distance over chars with unit insert/delete/substitute costs
pub fn levenshtein(a: &str, b: &str) -> usize {
    strsim::levenshtein(a, b)
}
