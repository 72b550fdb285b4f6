//! Label→price tables pasted by the operator as free text.
//!
//! One entry per line. The price is taken from, in order: a trailing
//! parenthesized amount (`Poster 8x12 (US$28.99)`), a trailing amount after a
//! colon or hyphen (`Small: 15`), or a trailing whitespace-separated amount
//! (`Small $15`). The label is what remains with separator punctuation
//! trimmed from both ends.

use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;

use crate::numeric::parse_number;
use crate::token::canonical_token;

const CURRENCY: &str = r"(?:US\$|USD|EUR|GBP|VND|\$|€|£|₫)";

static PRICE_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    let amount = r"([+-]?[0-9][0-9.,]*)";
    [
        Regex::new(&format!(
            r"(?i)\(\s*{CURRENCY}?\s*{amount}\s*{CURRENCY}?\s*\)\s*$"
        ))
        .expect("valid parenthesized price regex"),
        Regex::new(&format!(
            r"(?i)[:\-–]\s*{CURRENCY}?\s*{amount}\s*{CURRENCY}?\s*$"
        ))
        .expect("valid separated price regex"),
        Regex::new(&format!(r"(?i)\s{CURRENCY}?\s*{amount}\s*{CURRENCY}?\s*$"))
            .expect("valid trailing price regex"),
    ]
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceEntry {
    pub label: String,
    pub amount: Decimal,
}

/// How an option value was matched against the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelMatch {
    Exact,
    Token,
}

/// Ordered label→price mapping; the first entry for a label wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceTable {
    entries: Vec<PriceEntry>,
}

impl PriceTable {
    /// Parses pasted text. Lines without an extractable price or label are
    /// skipped.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut table = Self::default();
        for line in text.lines() {
            match parse_line(line) {
                Some(entry) => table.push(entry),
                None if !line.trim().is_empty() => {
                    tracing::debug!(line, "price table line has no recognizable price, skipping");
                }
                None => {}
            }
        }
        table
    }

    fn push(&mut self, entry: PriceEntry) {
        if self.entries.iter().any(|e| e.label == entry.label) {
            tracing::debug!(label = %entry.label, "duplicate price label, keeping first");
            return;
        }
        self.entries.push(entry);
    }

    #[must_use]
    pub fn entries(&self) -> &[PriceEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up `value` by exact label, then by canonical token.
    #[must_use]
    pub fn lookup(&self, value: &str) -> Option<(Decimal, LabelMatch)> {
        let value = value.trim();
        if let Some(entry) = self.entries.iter().find(|e| e.label == value) {
            return Some((entry.amount, LabelMatch::Exact));
        }
        let token = canonical_token(value);
        self.entries
            .iter()
            .find(|e| canonical_token(&e.label) == token)
            .map(|e| (e.amount, LabelMatch::Token))
    }
}

fn parse_line(line: &str) -> Option<PriceEntry> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let caps = PRICE_PATTERNS.iter().find_map(|re| re.captures(line))?;
    let whole = caps.get(0)?;
    let amount = parse_number(caps.get(1)?.as_str())?;
    let label = line[..whole.start()]
        .trim_matches(|c: char| c.is_whitespace() || matches!(c, ':' | '-' | '–' | '|'));
    if label.is_empty() {
        return None;
    }
    Some(PriceEntry {
        label: label.to_owned(),
        amount,
    })
}
