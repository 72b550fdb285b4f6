//! Canonical tokens for correlating option labels with SKUs.
//!
//! A label like `"Size 2T (Toddler)"` and a SKU like `"ROMPER_2T"` both reduce
//! to `"2T"`. Patterns are tried in priority order; the first pattern found
//! anywhere in the text wins.

use std::sync::LazyLock;

use regex::Regex;

static TOKEN_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        // Age / month codes: 2T, 12M, "18 M".
        Regex::new(r"\b\d{1,2}\s*[TM]\b").expect("valid age code regex"),
        // Garment sizes.
        Regex::new(r"\b(?:XS|S|M|L|XL|XXL|3XL|4XL)\b").expect("valid garment size regex"),
        // Dimensions: 8x12, "11 × 14".
        Regex::new(r"\b\d{1,2}\s*[X×]\s*\d{1,2}\b").expect("valid dimension regex"),
    ]
});

static ALNUM_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z0-9]+").expect("valid alnum run regex"));

/// Reduces an option label to its canonical token.
///
/// Falls back to the last ASCII alphanumeric run, then to the uppercased
/// input itself.
#[must_use]
pub fn canonical_token(text: &str) -> String {
    let upper = text.trim().to_uppercase();
    pattern_token(&upper).unwrap_or_else(|| {
        ALNUM_RUN
            .find_iter(&upper)
            .last()
            .map_or_else(|| upper.clone(), |m| m.as_str().to_owned())
    })
}

/// Reduces a SKU to its canonical token.
///
/// SKUs following the `PRODUCT_SIZE` convention are matched on the part after
/// the last underscore first; otherwise the whole SKU goes through
/// [`canonical_token`].
#[must_use]
pub fn sku_token(sku: &str) -> String {
    let upper = sku.trim().to_uppercase();
    if let Some((_, tail)) = upper.rsplit_once('_') {
        if let Some(token) = pattern_token(tail) {
            return token;
        }
    }
    canonical_token(&upper)
}

/// First priority pattern match in already-uppercased `upper`, normalized.
fn pattern_token(upper: &str) -> Option<String> {
    TOKEN_PATTERNS.iter().find_map(|re| {
        re.find(upper).map(|m| {
            m.as_str()
                .chars()
                .filter(|c| !c.is_whitespace())
                .map(|c| if c == '×' { 'X' } else { c })
                .collect()
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_token_age_codes() {
        assert_eq!(canonical_token("2T"), "2T");
        assert_eq!(canonical_token("Baby 12 m"), "12M");
        assert_eq!(canonical_token("6-12M (infant)"), "12M");
    }

    #[test]
    fn canonical_token_garment_sizes() {
        assert_eq!(canonical_token("Small / S"), "S");
        assert_eq!(canonical_token("xl"), "XL");
        assert_eq!(canonical_token("Unisex 3XL"), "3XL");
    }

    #[test]
    fn canonical_token_dimensions_normalize_separator() {
        assert_eq!(canonical_token("8 x 12 inch"), "8X12");
        assert_eq!(canonical_token("11×14"), "11X14");
    }

    #[test]
    fn canonical_token_age_code_outranks_size_anywhere_in_text() {
        assert_eq!(canonical_token("S - 2T"), "2T");
    }

    #[test]
    fn canonical_token_falls_back_to_last_alnum_run() {
        assert_eq!(canonical_token("Forest Green"), "GREEN");
        assert_eq!(canonical_token("Pack of 3!"), "3");
    }

    #[test]
    fn canonical_token_without_alnum_returns_uppercased_input() {
        assert_eq!(canonical_token("★★"), "★★");
    }

    #[test]
    fn sku_token_prefers_tail_after_last_underscore() {
        assert_eq!(sku_token("X_S"), "S");
        assert_eq!(sku_token("romper_green_12m"), "12M");
        assert_eq!(sku_token("POSTER_8x12"), "8X12");
    }

    #[test]
    fn sku_token_tail_without_pattern_uses_whole_string() {
        assert_eq!(sku_token("TEE_BLUE/NAVY"), "NAVY");
        assert_eq!(sku_token("ROMPER_RED"), "RED");
    }

    #[test]
    fn sku_token_without_underscore() {
        assert_eq!(sku_token("TEE-XL-BLK"), "XL");
        assert_eq!(sku_token("A1002"), "A1002");
    }
}
