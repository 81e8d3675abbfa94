//! Suffix-stripping stemmer for definition tokens.
//!
//! Reduces inflected forms to a base that matches dictionary headwords
//! ("running" → "run", "cats" → "cat"). Deliberately conservative: a wrong
//! stem only costs one graph edge, so ambiguous suffixes are left alone.

/// Stem a word by removing common English inflection suffixes.
///
/// Words of length <= 3 are returned unchanged. The same input always
/// produces the same output, which is all the graph builder needs.
pub fn stem(word: &str) -> String {
    if word.len() <= 3 {
        return word.to_string();
    }

    if let Some(s) = strip_participle(word, "ing") {
        return s;
    }
    if let Some(s) = strip_participle(word, "ed") {
        return s;
    }
    if let Some(s) = strip_plural(word) {
        return s;
    }
    if let Some(s) = strip_derivation(word) {
        return s;
    }

    word.to_string()
}

/// Strip -ing/-ed, undoing consonant doubling ("stopping" → "stop") and
/// restoring a dropped final e where the stem would otherwise end in a
/// non-syllabic cluster ("having" → "have").
fn strip_participle(word: &str, suffix: &str) -> Option<String> {
    if !word.ends_with(suffix) || word.len() < suffix.len() + 3 {
        return None;
    }
    let stem = &word[..word.len() - suffix.len()];
    let bytes = stem.as_bytes();
    let last = bytes[bytes.len() - 1];

    // "ied" → "y" ("studied" → "study")
    if suffix == "ed" && last == b'i' {
        return Some(format!("{}y", &stem[..stem.len() - 1]));
    }
    // Doubled final consonant: "running" → "run", "stopped" → "stop"
    if bytes.len() >= 2 && last == bytes[bytes.len() - 2] && !is_vowel(last) && last != b's' && last != b'l' {
        return Some(stem[..stem.len() - 1].to_string());
    }
    // Consonant + "v"/"s"/"z" endings usually dropped an e: "having" → "have"
    if matches!(last, b'v' | b'z' | b'u') {
        return Some(format!("{}e", stem));
    }
    Some(stem.to_string())
}

/// Strip plural endings: "cities" → "city", "boxes" → "box", "cats" → "cat".
fn strip_plural(word: &str) -> Option<String> {
    if let Some(stem) = word.strip_suffix("ies") {
        if stem.len() >= 2 {
            return Some(format!("{}y", stem));
        }
    }
    for es_base in ["ches", "shes", "xes", "zes", "sses"] {
        if let Some(stem) = word.strip_suffix("es") {
            if word.ends_with(es_base) {
                return Some(stem.to_string());
            }
        }
    }
    if word.ends_with('s') && !word.ends_with("ss") && !word.ends_with("us") && !word.ends_with("is") {
        return Some(word[..word.len() - 1].to_string());
    }
    None
}

/// Strip a small set of derivational suffixes where the remainder is still a
/// plausible headword: "quickly" → "quick", "creation" → "create".
fn strip_derivation(word: &str) -> Option<String> {
    if let Some(stem) = word.strip_suffix("ation") {
        if stem.len() >= 3 {
            return Some(format!("{}ate", stem));
        }
    }
    for suffix in ["ness", "ment", "ly"] {
        if let Some(stem) = word.strip_suffix(suffix) {
            if stem.len() >= 4 {
                return Some(stem.to_string());
            }
        }
    }
    None
}

fn is_vowel(b: u8) -> bool {
    matches!(b, b'a' | b'e' | b'i' | b'o' | b'u')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_words_unchanged() {
        assert_eq!(stem("cat"), "cat");
        assert_eq!(stem("run"), "run");
        assert_eq!(stem("a"), "a");
    }

    #[test]
    fn test_ing_forms() {
        assert_eq!(stem("running"), "run");
        assert_eq!(stem("stopping"), "stop");
        assert_eq!(stem("having"), "have");
        assert_eq!(stem("walking"), "walk");
    }

    #[test]
    fn test_ed_forms() {
        assert_eq!(stem("studied"), "study");
        assert_eq!(stem("stopped"), "stop");
        assert_eq!(stem("walked"), "walk");
    }

    #[test]
    fn test_plurals() {
        assert_eq!(stem("cats"), "cat");
        assert_eq!(stem("cities"), "city");
        assert_eq!(stem("boxes"), "box");
        assert_eq!(stem("churches"), "church");
        // -ss / -us / -is words are not plurals
        assert_eq!(stem("glass"), "glass");
        assert_eq!(stem("status"), "status");
    }

    #[test]
    fn test_derivational() {
        assert_eq!(stem("quickly"), "quick");
        assert_eq!(stem("creation"), "create");
        assert_eq!(stem("darkness"), "dark");
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(stem("relationships"), stem("relationships"));
    }
}
