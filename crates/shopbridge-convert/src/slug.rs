/// Maximum slug length, in characters.
pub const MAX_SLUG_LEN: usize = 100;

/// Derives a URL-safe handle from arbitrary text.
///
/// Lowercases, drops anything that is not a letter, digit, whitespace,
/// underscore or hyphen, and collapses separator runs into one `-`. The
/// result never starts or ends with `-` and is at most [`MAX_SLUG_LEN`]
/// characters. Empty input yields an empty string; callers supply their own
/// positional fallback.
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_separator = false;

    for c in text.to_lowercase().chars() {
        if c.is_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(c);
        } else if c.is_whitespace() || c == '_' || c == '-' {
            pending_separator = true;
        }
    }

    if slug.chars().count() > MAX_SLUG_LEN {
        slug = slug.chars().take(MAX_SLUG_LEN).collect();
    }
    slug.trim_end_matches('-').to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_basic_title() {
        assert_eq!(slugify("Baby Romper - Organic Cotton"), "baby-romper-organic-cotton");
    }

    #[test]
    fn slugify_strips_punctuation_without_splitting_words() {
        assert_eq!(slugify("Rock'n'Roll Tee!"), "rocknroll-tee");
        assert_eq!(slugify("8 x 12\" Print (Framed)"), "8-x-12-print-framed");
    }

    #[test]
    fn slugify_collapses_underscores_and_hyphens() {
        assert_eq!(slugify("__Hello___World--again__"), "hello-world-again");
    }

    #[test]
    fn slugify_empty_and_symbol_only_input() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("$$$ !!!"), "");
    }

    #[test]
    fn slugify_keeps_unicode_letters() {
        assert_eq!(slugify("Áo Thun Đẹp"), "áo-thun-đẹp");
    }

    #[test]
    fn slugify_truncates_without_trailing_hyphen() {
        let title = format!("{} tail", "a".repeat(99));
        let slug = slugify(&title);
        assert_eq!(slug, "a".repeat(99));

        let long = "word ".repeat(60);
        let slug = slugify(&long);
        assert!(slug.chars().count() <= MAX_SLUG_LEN);
        assert!(!slug.starts_with('-') && !slug.ends_with('-'));
        assert!(slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
    }
}
