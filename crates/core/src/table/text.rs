//! Text normalization for header matching and cell output.

/// Uppercase and strip spaces, slashes and periods.
///
/// `"Petitioner / Respondent"` and `"PETITIONER/RESPONDENT."` both become
/// `"PETITIONERRESPONDENT"`.
pub fn normalize_for_match(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, ' ' | '/' | '.'))
        .flat_map(char::to_uppercase)
        .collect()
}

/// Collapse whitespace runs to one space and trim.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
