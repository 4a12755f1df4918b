use std::sync::LazyLock;

use regex::Regex;

static PAGE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:p|pg|page)\s*\d+\b").unwrap());

static NO_LETTERS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[\d\W_]+$").unwrap());

static FRONT_MATTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)guideline|table of contents|references|appendix").unwrap()
});

/// True when a line carries no lab content and should be skipped before
/// parameter search: blanks, page numbers, bare numbers/punctuation and
/// document front/back matter.
pub fn is_noise(line: &str) -> bool {
    let s = line.trim();
    if s.chars().count() <= 2 {
        return true;
    }
    PAGE_NUMBER.is_match(s) || NO_LETTERS.is_match(s) || FRONT_MATTER.is_match(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_markers_are_noise() {
        assert!(is_noise("Page 3"));
        assert!(is_noise("pg12"));
        assert!(is_noise("  p 4 of 9"));
    }

    #[test]
    fn lab_lines_are_kept() {
        assert!(!is_noise("Hemoglobin: 13.5 g/dL"));
        assert!(!is_noise("Platelets 250000 /uL"));
        assert!(!is_noise("Patient name: Jane Doe"));
    }

    #[test]
    fn short_and_blank_lines_are_noise() {
        assert!(is_noise(""));
        assert!(is_noise("   "));
        assert!(is_noise("Hb"));
    }

    #[test]
    fn letterless_lines_are_noise() {
        assert!(is_noise("12.5 / 13.0 - 17.0"));
        assert!(is_noise("----- ***** -----"));
        assert!(is_noise("2024-01-15"));
    }

    #[test]
    fn front_matter_is_noise() {
        assert!(is_noise("Clinical Guidelines for Anemia"));
        assert!(is_noise("TABLE OF CONTENTS"));
        assert!(is_noise("References: WHO 2011"));
        assert!(is_noise("Appendix B - glucose 5.5"));
    }

    #[test]
    fn words_starting_with_p_are_not_page_markers() {
        assert!(!is_noise("Platelet count 250000"));
        assert!(!is_noise("Pg: patient glucose 90"));
    }
}
