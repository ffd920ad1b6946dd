//! Accent- and case-insensitive text keys for sorting and search.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// NFD-decompose, drop combining marks, lowercase.
///
/// `"Émile"` and `"e\u{301}mile"` both fold to `"emile"`, so accented names
/// sort next to their unaccented neighbours rather than after `"z"`.
pub fn fold_text(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}
