//! Name normalization.
//!
//! Directory names on disk use `-` as the word separator and carry a
//! three-digit ordinal prefix (`003-Arrays-and-Lists`). Human-facing names use
//! spaces and title case (`Arrays and Lists`). Every comparison between the
//! two goes through the canonical key: the title-cased, filesystem-form name
//! with any numeric prefix removed.

use std::collections::HashSet;

use syllabus_common_config::types::DEFAULT_LOWERCASE_WORDS;

/// Replace `-` and `_` with spaces.
pub fn to_human_readable(name: &str) -> String {
    name.chars()
        .map(|c| if c == '-' || c == '_' { ' ' } else { c })
        .collect()
}

/// Replace spaces with `-`.
pub fn to_filesystem_name(name: &str) -> String {
    name.replace(' ', "-")
}

/// True when the name starts with an ASCII digit.
pub fn is_numbered(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_ascii_digit())
}

/// Split a name into its leading digit run and the remainder.
fn split_digits(name: &str) -> (&str, &str) {
    let end = name
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(name.len());
    name.split_at(end)
}

/// Numeric value of the leading digit run, if any.
///
/// Digit runs too long for a `u64` saturate rather than fail, so they still
/// sort after every realistic prefix.
pub fn number_prefix(name: &str) -> Option<u64> {
    let (digits, _) = split_digits(name);
    if digits.is_empty() {
        return None;
    }
    Some(digits.parse().unwrap_or(u64::MAX))
}

/// Split off an ordinal prefix: a leading digit run that ends the name or is
/// followed by a separator. `3D-Graphics` has no prefix.
fn split_prefix(name: &str) -> Option<(&str, &str)> {
    let (digits, rest) = split_digits(name);
    if digits.is_empty() {
        return None;
    }
    match rest.chars().next() {
        None | Some('-' | '_' | ' ') => Some((digits, rest)),
        Some(_) => None,
    }
}

/// Give `name` a three-digit ordinal prefix.
///
/// Names that already carry a prefix keep their number, zero-padded to three
/// places (`7-Intro` becomes `007-Intro`). Other names get `n`.
pub fn ensure_number_prefix(name: &str, n: usize) -> String {
    match split_prefix(name) {
        Some((digits, rest)) => format!("{digits:0>3}{rest}"),
        None => format!("{n:03}-{name}"),
    }
}

/// Remove an ordinal prefix and the single separator that follows it.
pub fn strip_number_prefix(name: &str) -> String {
    match split_prefix(name) {
        Some((_, rest)) => rest.strip_prefix(['-', '_', ' ']).unwrap_or(rest).to_string(),
        None => name.to_string(),
    }
}

/// Directory name for the entry at `ordinal` with canonical key `key`.
pub fn numbered_name(ordinal: usize, key: &str) -> String {
    if key.is_empty() {
        format!("{ordinal:03}")
    } else {
        format!("{ordinal:03}-{key}")
    }
}

/// An all-caps word such as `API` or `2D`.
fn is_abbreviation(word: &str) -> bool {
    word.chars().any(char::is_alphabetic) && !word.chars().any(char::is_lowercase)
}

fn capitalize(word: &str) -> String {
    if is_abbreviation(word) {
        return word.to_string();
    }
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Title-casing and canonical-key derivation.
#[derive(Debug, Clone)]
pub struct NameNormalizer {
    lowercase_words: HashSet<String>,
}

impl Default for NameNormalizer {
    fn default() -> Self {
        Self::new(DEFAULT_LOWERCASE_WORDS.iter().copied())
    }
}

impl NameNormalizer {
    /// Build a normalizer with its own list of words kept lowercase.
    pub fn new<I, S>(lowercase_words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            lowercase_words: lowercase_words
                .into_iter()
                .map(|w| w.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Title-case a space-separated phrase.
    ///
    /// The first word, the last word and any word following one that ends
    /// with `:` are always capitalized. Other words on the lowercase list are
    /// lowercased; the rest are capitalized. All-caps words keep their case
    /// unless they are forced lowercase.
    pub fn title_case(&self, phrase: &str) -> String {
        let words: Vec<&str> = phrase.split(' ').collect();
        let last = words.len().saturating_sub(1);

        words
            .iter()
            .enumerate()
            .map(|(i, word)| {
                let forced = i == 0 || i == last || words[i - 1].ends_with(':');
                if forced {
                    capitalize(word)
                } else if self.lowercase_words.contains(&word.to_lowercase()) {
                    word.to_lowercase()
                } else {
                    capitalize(word)
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Human-facing form of any input: separators become spaces, then title case.
    pub fn human_title(&self, name: &str) -> String {
        self.title_case(&to_human_readable(name))
    }

    /// Identity of a module or topic: the title-cased filesystem form of the
    /// name with its numeric prefix removed.
    pub fn canonical_key(&self, name: &str) -> String {
        to_filesystem_name(&self.human_title(&strip_number_prefix(name)))
    }

    /// Human-facing name of a directory: prefix dropped, separators as spaces.
    pub fn display_name(&self, dir_name: &str) -> String {
        to_human_readable(&self.canonical_key(dir_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use test_case::test_case;

    #[test_case("arrays-and-lists", "arrays and lists")]
    #[test_case("snake_case_name", "snake case name")]
    #[test_case("plain", "plain")]
    fn test_to_human_readable(input: &str, expected: &str) {
        assert_eq!(to_human_readable(input), expected);
    }

    #[test]
    fn test_to_filesystem_name() {
        assert_eq!(to_filesystem_name("Arrays and Lists"), "Arrays-and-Lists");
    }

    #[test]
    fn test_title_case_keeps_minor_words_lowercase() {
        let naming = NameNormalizer::default();
        assert_eq!(
            naming.title_case("introduction to the art of war"),
            "Introduction to The Art of War"
        );
    }

    #[test_case("of mice and men", "Of Mice and Men" ; "first word forced")]
    #[test_case("what to look for", "What to Look For" ; "last word forced")]
    #[test_case("part one: an overview of it", "Part One: An Overview of It" ; "after colon forced")]
    #[test_case("using the API in go", "Using The API in Go" ; "abbreviation preserved")]
    #[test_case("HTTP", "HTTP" ; "single abbreviation")]
    #[test_case("building A tree", "Building a Tree" ; "list word lowercased")]
    #[test_case("mIxEd cAsE", "Mixed Case" ; "mixed case normalized")]
    fn test_title_case_rules(input: &str, expected: &str) {
        assert_eq!(NameNormalizer::default().title_case(input), expected);
    }

    #[test]
    fn test_title_case_first_and_last_always_capitalized() {
        let naming = NameNormalizer::new(["of", "the"]);
        assert_eq!(
            naming.title_case("the lord of the rings"),
            "The Lord of the Rings"
        );
    }

    #[test]
    fn test_title_case_custom_word_list() {
        let naming = NameNormalizer::new(["the", "vs"]);
        assert_eq!(naming.title_case("rust vs the world"), "Rust vs the World");
        assert_eq!(naming.title_case("one of two"), "One Of Two");
    }

    #[test_case("7-Intro", 1, "007-Intro")]
    #[test_case("Intro", 7, "007-Intro")]
    #[test_case("12_Lists", 1, "012_Lists")]
    #[test_case("0042-Deep", 1, "0042-Deep")]
    #[test_case("Intro", 3, "003-Intro")]
    #[test_case("Intro", 120, "120-Intro")]
    #[test_case("3D Graphics", 2, "002-3D Graphics")]
    fn test_ensure_number_prefix(input: &str, n: usize, expected: &str) {
        assert_eq!(ensure_number_prefix(input, n), expected);
    }

    #[test_case("003-Arrays", "Arrays")]
    #[test_case("3_Arrays", "Arrays")]
    #[test_case("3 Arrays", "Arrays")]
    #[test_case("003", "")]
    #[test_case("Arrays", "Arrays")]
    #[test_case("003-7-Wonders", "7-Wonders")]
    #[test_case("3D-Graphics", "3D-Graphics")]
    #[test_case("001-3D-Graphics", "3D-Graphics")]
    fn test_strip_number_prefix(input: &str, expected: &str) {
        assert_eq!(strip_number_prefix(input), expected);
    }

    #[test]
    fn test_number_prefix() {
        assert_eq!(number_prefix("003-Arrays"), Some(3));
        assert_eq!(number_prefix("10"), Some(10));
        assert_eq!(number_prefix("Arrays"), None);
        assert_eq!(number_prefix("99999999999999999999999-Big"), Some(u64::MAX));
    }

    #[test]
    fn test_numbered_name() {
        assert_eq!(numbered_name(1, "Arrays"), "001-Arrays");
        assert_eq!(numbered_name(1000, "Big"), "1000-Big");
        assert_eq!(numbered_name(4, ""), "004");
    }

    #[test]
    fn test_canonical_key_equates_spellings() {
        let naming = NameNormalizer::default();
        let key = naming.canonical_key("arrays and lists");
        assert_eq!(key, "Arrays-and-Lists");
        assert_eq!(naming.canonical_key("002-arrays-and-lists"), key);
        assert_eq!(naming.canonical_key("Arrays_And_Lists"), key);
        assert_eq!(naming.canonical_key("007-Arrays-and-Lists"), key);
    }

    #[test]
    fn test_canonical_key_keeps_leading_digits_of_name() {
        let naming = NameNormalizer::default();
        let key = naming.canonical_key("3D Graphics");
        assert_eq!(key, "3D-Graphics");
        assert_eq!(naming.canonical_key("001-3D-Graphics"), key);
        assert_eq!(naming.canonical_key(&key), key);
        assert_eq!(naming.display_name("004-2D-Sprites"), "2D Sprites");
    }

    #[test]
    fn test_canonical_key_ignores_prefix_for_casing() {
        let naming = NameNormalizer::default();
        assert_eq!(naming.canonical_key("001-of-mice-and-men"), "Of-Mice-and-Men");
        assert_eq!(naming.canonical_key("of mice and men"), "Of-Mice-and-Men");
    }

    #[test]
    fn test_display_name() {
        let naming = NameNormalizer::default();
        assert_eq!(naming.display_name("002-Arrays-and-Lists"), "Arrays and Lists");
    }

    proptest! {
        #[test]
        fn prop_strip_undoes_ensure(name in "[0-9]{0,2}[A-Za-z][A-Za-z0-9 -]{0,20}", n in 1usize..999) {
            prop_assert_eq!(strip_number_prefix(&ensure_number_prefix(&name, n)), name);
        }

        #[test]
        fn prop_prefix_is_three_digits(name in "[A-Za-z][A-Za-z-]{0,12}", n in 1usize..999) {
            let prefixed = ensure_number_prefix(&name, n);
            prop_assert_eq!(number_prefix(&prefixed), Some(n as u64));
            prop_assert_eq!(&prefixed[3..4], "-");
        }

        #[test]
        fn prop_title_case_idempotent(phrase in "[a-zA-Z:]{1,8}( [a-zA-Z:]{1,8}){0,6}") {
            let naming = NameNormalizer::default();
            let once = naming.title_case(&phrase);
            prop_assert_eq!(naming.title_case(&once), once);
        }

        #[test]
        fn prop_human_filesystem_round_trip(phrase in "[A-Za-z]{1,8}( [A-Za-z]{1,8}){0,5}") {
            prop_assert_eq!(to_human_readable(&to_filesystem_name(&phrase)), phrase);
        }

        #[test]
        fn prop_canonical_key_idempotent(name in "([0-9]{1,3}[-_ ])?[0-9]{0,2}[A-Za-z][A-Za-z0-9_ -]{0,20}") {
            let naming = NameNormalizer::default();
            let key = naming.canonical_key(&name);
            prop_assert_eq!(naming.canonical_key(&key), key);
        }
    }
}
