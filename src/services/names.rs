use regex::Regex;
use std::sync::LazyLock;

/// Introduction patterns tried in order; the first capture wins. The
/// capture class allows accented Latin letters, apostrophes, hyphens and
/// spaces so multi-word and Spanish names come through intact. The
/// "soy" / "i am" pattern is anchored to the start of the message so a
/// mid-sentence "i am tired" never counts as an introduction.
static NAME_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)\bmy name is\s+([A-Za-zÁÉÍÓÚÑáéíóúñ' -]{2,40})\b",
        r"(?i)\bme llamo\s+([A-Za-zÁÉÍÓÚÑáéíóúñ' -]{2,40})\b",
        r"(?i)^\s*(?:soy|i am)\s+([A-Za-zÁÉÍÓÚÑáéíóúñ' -]{2,40})\b",
    ]
    .iter()
    .filter_map(|pattern| Regex::new(pattern).ok())
    .collect()
});

/// Scans a message for a self-introduction and returns the title-cased
/// name, or `None` when no pattern matches.
pub fn extract_name(text: &str) -> Option<String> {
    for pattern in NAME_PATTERNS.iter() {
        if let Some(captures) = pattern.captures(text)
            && let Some(matched) = captures.get(1)
        {
            let name = title_case(matched.as_str().trim());
            if !name.is_empty() {
                return Some(name);
            }
        }
    }
    None
}

/// Uppercases the first letter of each whitespace-separated token and
/// lowercases the rest, so "josé" becomes "José" and "ANA MARIE"
/// becomes "Ana Marie".
fn title_case(name: &str) -> String {
    name.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_english_introduction() {
        assert_eq!(extract_name("my name is Ana"), Some("Ana".to_string()));
    }

    #[test]
    fn test_extracts_spanish_introduction_with_accent() {
        assert_eq!(extract_name("me llamo josé"), Some("José".to_string()));
    }

    #[test]
    fn test_unrelated_text_yields_none() {
        assert_eq!(extract_name("Tell me about vitamin C serums"), None);
    }

    #[test]
    fn test_soy_matches_at_start_only() {
        assert_eq!(extract_name("soy Lucía"), Some("Lucía".to_string()));
        assert_eq!(extract_name("creo que soy impaciente hoy dime algo"), None);
    }

    #[test]
    fn test_i_am_matches_at_start_only() {
        assert_eq!(extract_name("I am Ana"), Some("Ana".to_string()));
        assert_eq!(extract_name("some days I am tired of serums"), None);
    }

    #[test]
    fn test_case_insensitive_and_title_cased() {
        assert_eq!(
            extract_name("MY NAME IS ANA MARIE"),
            Some("Ana Marie".to_string())
        );
    }

    #[test]
    fn test_first_pattern_wins() {
        // Both the English pattern and the Spanish one could match here;
        // the English capture comes first in the table.
        assert_eq!(
            extract_name("my name is Ana y me llamo Lucía"),
            Some("Ana Y Me Llamo Lucía".to_string())
        );
    }

    #[test]
    fn test_single_letter_is_too_short() {
        assert_eq!(extract_name("my name is A"), None);
    }

    #[test]
    fn test_trailing_punctuation_bounds_the_capture() {
        assert_eq!(extract_name("my name is Ana."), Some("Ana".to_string()));
    }

    #[test]
    fn test_digits_break_the_word_boundary() {
        // No letter/digit junction is a word boundary, so nothing matches.
        assert_eq!(extract_name("my name is Ana42"), None);
    }
}
