//! Variant reconciliation: pairing option values with SKUs and prices.
//!
//! Source exports list a product's option values and its SKUs as parallel
//! delimited lists whose positions do not reliably line up. Each kept option
//! value is resolved to a SKU through four tiers, in this order:
//!
//! 1. exact canonical-token match against the SKU tokens,
//! 2. relaxed match where either token contains the other,
//! 3. the next unused SKU from a position-aligned candidate list,
//! 4. a synthesized `<PREFIX>-<slug>-<NN>` SKU.
//!
//! A SKU consumed by any tier is never handed out again within the product.
//! SKU candidates are always scanned in their original list order so ties are
//! deterministic.

use std::collections::HashSet;

use rust_decimal::Decimal;
use shopbridge_core::Price;

use crate::numeric::{mark_up, round_cents};
use crate::price_table::{LabelMatch, PriceTable};
use crate::slug::slugify;
use crate::token::{canonical_token, sku_token};

/// Option values that never become variants (compared case-insensitively).
pub const EXCLUDED_OPTIONS: [&str; 1] = ["digital download"];

/// Placeholder used when every axis-1 value was excluded or none was given.
pub const DEFAULT_OPTION_VALUE: &str = "Default";

#[must_use]
pub fn is_excluded(value: &str) -> bool {
    let value = value.trim();
    EXCLUDED_OPTIONS
        .iter()
        .any(|excluded| value.eq_ignore_ascii_case(excluded))
}

/// Which tier produced a variant's SKU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkuMatch {
    ExactToken,
    RelaxedToken,
    Positional,
    Synthesized,
}

/// Where a variant's price came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceSource {
    ExactLabel,
    TokenLabel,
    Base,
}

/// Inputs for reconciling one product's first option axis.
#[derive(Debug, Clone)]
pub struct ReconcileRequest<'a> {
    /// Product title; its slug seeds synthesized SKUs.
    pub title: &'a str,
    /// Prefix for synthesized SKUs, e.g. `"ETSY"`.
    pub sku_prefix: &'a str,
    /// Axis-1 values as listed by the source, before exclusion filtering.
    pub option_values: &'a [String],
    /// SKUs as listed by the source, before any filtering.
    pub skus: &'a [String],
    /// Product price, already marked up.
    pub base_price: Price,
    pub price_table: Option<&'a PriceTable>,
    /// Apply `markup_pct` to prices found in `price_table` as well.
    pub markup_on_mapped: bool,
    pub markup_pct: Decimal,
}

/// One resolved axis-1 value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconciledOption {
    pub value: String,
    pub sku: String,
    pub sku_match: SkuMatch,
    pub price: Price,
    pub price_source: PriceSource,
}

/// Drops excluded values, preserving order. Returns the kept values and the
/// keep-mask over the input.
#[must_use]
pub fn filter_excluded(values: &[String]) -> (Vec<String>, Vec<bool>) {
    let mask: Vec<bool> = values.iter().map(|v| !is_excluded(v)).collect();
    let kept = values
        .iter()
        .zip(&mask)
        .filter(|(_, keep)| **keep)
        .map(|(v, _)| v.clone())
        .collect();
    (kept, mask)
}

/// Resolves a SKU and price for every kept axis-1 value, in order.
///
/// When filtering leaves nothing, a single [`DEFAULT_OPTION_VALUE`] entry is
/// reconciled instead, so the result is never empty.
#[must_use]
pub fn reconcile(request: &ReconcileRequest<'_>) -> Vec<ReconciledOption> {
    let (mut kept, mask) = filter_excluded(request.option_values);
    if kept.is_empty() {
        if !request.option_values.is_empty() {
            tracing::warn!(
                title = request.title,
                "every option value was excluded, using placeholder variant"
            );
        }
        kept.push(DEFAULT_OPTION_VALUE.to_owned());
    }

    let mut pool = SkuPool::new(request.skus, &mask, kept.len());

    kept.into_iter()
        .enumerate()
        .map(|(idx, value)| {
            let token = canonical_token(&value);
            let (sku, sku_match) = pool.take(&token).unwrap_or_else(|| {
                let sku = synthesize_sku(request.sku_prefix, request.title, idx + 1);
                tracing::warn!(
                    title = request.title,
                    option = %value,
                    %sku,
                    "no SKU matched, synthesized one"
                );
                (sku, SkuMatch::Synthesized)
            });
            let (price, price_source) = resolve_price(request, &value);
            ReconciledOption {
                value,
                sku,
                sku_match,
                price,
                price_source,
            }
        })
        .collect()
}

/// Builds the fallback SKU `<PREFIX>-<slug(title)>-<NN>` for a 1-based ordinal.
#[must_use]
pub fn synthesize_sku(prefix: &str, title: &str, ordinal: usize) -> String {
    format!("{prefix}-{}-{ordinal:02}", slugify(title))
}

fn resolve_price(request: &ReconcileRequest<'_>, value: &str) -> (Price, PriceSource) {
    let Some((amount, matched)) = request.price_table.and_then(|t| t.lookup(value)) else {
        return (request.base_price, PriceSource::Base);
    };
    let price = if request.markup_on_mapped {
        mark_up(amount, request.markup_pct)
    } else {
        Price::Amount(round_cents(amount))
    };
    let source = match matched {
        LabelMatch::Exact => PriceSource::ExactLabel,
        LabelMatch::Token => PriceSource::TokenLabel,
    };
    (price, source)
}

/// SKU candidates for one product, with the set of SKUs already handed out.
struct SkuPool<'a> {
    tokens: Vec<(String, &'a str)>,
    positional: Vec<&'a str>,
    used: HashSet<&'a str>,
}

impl<'a> SkuPool<'a> {
    fn new(skus: &'a [String], keep_mask: &[bool], kept_len: usize) -> Self {
        let tokens = skus
            .iter()
            .map(String::as_str)
            .filter(|s| !s.trim().is_empty())
            .map(|s| (sku_token(s), s))
            .collect();

        // SKUs line up with the raw option list only when the counts match;
        // otherwise the first `kept_len` SKUs are the best positional guess.
        let positional = if !keep_mask.is_empty() && skus.len() == keep_mask.len() {
            skus.iter()
                .zip(keep_mask)
                .filter(|(_, keep)| **keep)
                .map(|(s, _)| s.as_str())
                .collect()
        } else {
            skus.iter().take(kept_len).map(String::as_str).collect()
        };

        Self {
            tokens,
            positional,
            used: HashSet::new(),
        }
    }

    fn take(&mut self, token: &str) -> Option<(String, SkuMatch)> {
        let found = self
            .find_exact(token)
            .map(|s| (s, SkuMatch::ExactToken))
            .or_else(|| self.find_relaxed(token).map(|s| (s, SkuMatch::RelaxedToken)))
            .or_else(|| self.find_positional().map(|s| (s, SkuMatch::Positional)))?;
        self.used.insert(found.0);
        Some((found.0.to_owned(), found.1))
    }

    fn is_free(&self, sku: &str) -> bool {
        !sku.trim().is_empty() && !self.used.contains(sku)
    }

    fn find_exact(&self, token: &str) -> Option<&'a str> {
        self.tokens
            .iter()
            .find(|(tk, sku)| tk == token && self.is_free(sku))
            .map(|(_, sku)| *sku)
    }

    fn find_relaxed(&self, token: &str) -> Option<&'a str> {
        if token.is_empty() {
            return None;
        }
        self.tokens
            .iter()
            .find(|(tk, sku)| {
                !tk.is_empty()
                    && (tk.contains(token) || token.contains(tk.as_str()))
                    && self.is_free(sku)
            })
            .map(|(_, sku)| *sku)
    }

    fn find_positional(&self) -> Option<&'a str> {
        self.positional.iter().copied().find(|s| self.is_free(s))
    }
}

#[cfg(test)]
#[path = "reconcile_test.rs"]
mod tests;
