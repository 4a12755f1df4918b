//! Post-OCR correction of lab parameter names.
//!
//! OCR commonly reads `l` as `1` and `o` as `0`, which hides a parameter
//! mention from the value patterns ("G1ucose 98"). A word is replaced by a
//! vocabulary term only when the match is close (edit distance <= 2), the
//! word is long enough to make that meaningful (>= 5 chars) and exactly one
//! term is closest.

/// Lowercase lab vocabulary, sorted for binary search.
const LAB_TERMS: &[&str] = &[
    "cholesterol",
    "erythrocytes",
    "glucose",
    "haemoglobin",
    "hematocrit",
    "hemoglobin",
    "leukocytes",
    "platelet",
    "platelets",
    "thrombocytes",
    "triglycerides",
];

const MIN_WORD_CHARS: usize = 5;
const MAX_EDIT_DISTANCE: usize = 2;

/// Correct near-miss lab terms in `text`, leaving everything else untouched.
pub fn correct_lab_terms(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut word_start: Option<usize> = None;

    for (idx, ch) in text.char_indices() {
        if ch.is_alphanumeric() {
            word_start.get_or_insert(idx);
            continue;
        }
        if let Some(start) = word_start.take() {
            out.push_str(&correct_word(&text[start..idx]));
        }
        out.push(ch);
    }
    if let Some(start) = word_start {
        out.push_str(&correct_word(&text[start..]));
    }

    out
}

fn correct_word(word: &str) -> String {
    let len = word.chars().count();
    if len < MIN_WORD_CHARS || !word.chars().any(char::is_alphabetic) {
        return word.to_string();
    }

    let lower = word.to_lowercase();
    if LAB_TERMS.binary_search(&lower.as_str()).is_ok() {
        return word.to_string();
    }

    let mut best: Option<(&str, usize)> = None;
    let mut tied = false;
    for &term in LAB_TERMS {
        if term.chars().count().abs_diff(len) > MAX_EDIT_DISTANCE {
            continue;
        }
        let distance = levenshtein(&lower, term);
        if distance > MAX_EDIT_DISTANCE {
            continue;
        }
        match best {
            Some((_, d)) if distance == d => tied = true,
            Some((_, d)) if distance > d => {}
            _ => {
                best = Some((term, distance));
                tied = false;
            }
        }
    }

    match best {
        Some((term, _)) if !tied => {
            tracing::trace!(from = word, to = term, "Corrected OCR lab term");
            match_case(word, term)
        }
        _ => word.to_string(),
    }
}

/// Apply the capitalisation pattern of `original` (UPPER, Title or lower).
fn match_case(original: &str, term: &str) -> String {
    let letters = || original.chars().filter(|c| c.is_alphabetic());
    if letters().all(char::is_uppercase) {
        return term.to_uppercase();
    }
    if letters().next().is_some_and(char::is_uppercase) {
        let mut chars = term.chars();
        return chars
            .next()
            .map(|first| first.to_uppercase().chain(chars).collect())
            .unwrap_or_default();
    }
    term.to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != *cb);
            curr[j + 1] = substitution.min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}
