//! Diacritic folding for orthographic comparison.
//!
//! Each base letter owns a class of accented variants. Uppercase variants fold to the
//! uppercase base letter, except where the uppercase form is already listed in a
//! lowercase class (the lowercase class wins).

use ahash::AHashMap;
use std::sync::OnceLock;

/// Base letter -> diacritic variants that fold onto it.
const DIACRITIC_CLASSES: &[(char, &str)] = &[
    ('a', "ăāąȁäãâáà"),
    ('e', "ēĕěęëêéè"),
    ('i', "ῑĩĭïîíī"),
    ('o', "őǒŏōǫǪöôòóÔ"),
    ('u', "űüúûùŭūÚ"),
    ('t', "țţþ"),
    ('s', "șšśşº"),
    ('g', "ğ"),
    ('n', "ńñ"),
    ('c', "ćčç"),
    ('r', "ṝ"),
    ('z', "ž"),
    ('y', "ý"),
];

static FOLD_TABLE: OnceLock<AHashMap<char, char>> = OnceLock::new();

fn single_uppercase(c: char) -> Option<char> {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) if u != c => Some(u),
        _ => None,
    }
}

fn fold_table() -> &'static AHashMap<char, char> {
    FOLD_TABLE.get_or_init(|| {
        let mut table = AHashMap::new();

        for &(base, variants) in DIACRITIC_CLASSES {
            for variant in variants.chars() {
                table.insert(variant, base);
            }
        }

        for &(base, variants) in DIACRITIC_CLASSES {
            let upper_base = base.to_ascii_uppercase();
            for variant in variants.chars() {
                if let Some(upper) = single_uppercase(variant) {
                    table.entry(upper).or_insert(upper_base);
                }
            }
        }

        table
    })
}

/// Fold a single character onto its base letter (identity for unlisted characters).
pub fn fold_char(c: char) -> char {
    fold_table().get(&c).copied().unwrap_or(c)
}

/// Remove the known diacritics from a string.
pub fn remove_diacritics(word: &str) -> String {
    word.chars().map(fold_char).collect()
}

/// True if both characters fold onto the same letter.
pub fn are_equivalent(c1: char, c2: char) -> bool {
    c1 == c2 || fold_char(c1) == fold_char(c2)
}
