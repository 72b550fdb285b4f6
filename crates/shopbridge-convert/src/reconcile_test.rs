use std::collections::HashSet;
use std::str::FromStr;

use super::*;
use crate::price_table::PriceTable;

fn list(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn request<'a>(title: &'a str, options: &'a [String], skus: &'a [String]) -> ReconcileRequest<'a> {
    ReconcileRequest {
        title,
        sku_prefix: "ETSY",
        option_values: options,
        skus,
        base_price: Price::Amount(dec("22.00")),
        price_table: None,
        markup_on_mapped: false,
        markup_pct: Decimal::from(10),
    }
}

// -----------------------------------------------------------------------
// exclusion
// -----------------------------------------------------------------------

#[test]
fn is_excluded_ignores_case_and_padding() {
    assert!(is_excluded("Digital Download"));
    assert!(is_excluded("  DIGITAL DOWNLOAD "));
    assert!(!is_excluded("Digital Print"));
}

#[test]
fn filter_excluded_preserves_order_and_mask() {
    let (kept, mask) = filter_excluded(&list(&["S", "Digital Download", "M"]));
    assert_eq!(kept, list(&["S", "M"]));
    assert_eq!(mask, vec![true, false, true]);
}

// -----------------------------------------------------------------------
// SKU tiers
// -----------------------------------------------------------------------

#[test]
fn excluded_value_with_underscore_skus_matches_exactly() {
    let options = list(&["Digital Download", "S", "M"]);
    let skus = list(&["X_S", "X_M"]);
    let resolved = reconcile(&request("Tee", &options, &skus));

    let pairs: Vec<(&str, &str)> = resolved
        .iter()
        .map(|r| (r.value.as_str(), r.sku.as_str()))
        .collect();
    assert_eq!(pairs, vec![("S", "X_S"), ("M", "X_M")]);
    assert!(resolved.iter().all(|r| r.sku_match == SkuMatch::ExactToken));
}

#[test]
fn exact_tokens_fix_misaligned_positions() {
    let options = list(&["2T", "3T", "4T"]);
    let skus = list(&["ROMPER_4T", "ROMPER_2T", "ROMPER_3T"]);
    let resolved = reconcile(&request("Romper", &options, &skus));
    let got: Vec<&str> = resolved.iter().map(|r| r.sku.as_str()).collect();
    assert_eq!(got, vec!["ROMPER_2T", "ROMPER_3T", "ROMPER_4T"]);
}

#[test]
fn exact_tier_skips_consumed_duplicates() {
    let options = list(&["S", "S"]);
    let skus = list(&["TEE_S", "TEE_S_ALT"]);
    // "TEE_S_ALT" tail has no pattern, whole-string fallback gives "ALT".
    let resolved = reconcile(&request("Tee", &options, &skus));
    assert_eq!(resolved[0].sku, "TEE_S");
    assert_eq!(resolved[0].sku_match, SkuMatch::ExactToken);
    assert_eq!(resolved[1].sku, "TEE_S_ALT");
    assert_ne!(resolved[1].sku_match, SkuMatch::ExactToken);
}

#[test]
fn relaxed_tier_matches_substring_tokens_in_list_order() {
    let options = list(&["Green"]);
    let skus = list(&["TEE-EVERGREEN", "TEE-GREENISH"]);
    let resolved = reconcile(&request("Tee", &options, &skus));
    assert_eq!(resolved[0].sku, "TEE-EVERGREEN");
    assert_eq!(resolved[0].sku_match, SkuMatch::RelaxedToken);
}

#[test]
fn positional_tier_uses_keep_mask_when_counts_match() {
    let options = list(&["Red", "Digital Download", "Blue"]);
    let skus = list(&["A1", "A2", "A3"]);
    let resolved = reconcile(&request("Mug", &options, &skus));
    let got: Vec<(&str, SkuMatch)> = resolved.iter().map(|r| (r.sku.as_str(), r.sku_match)).collect();
    assert_eq!(got, vec![("A1", SkuMatch::Positional), ("A3", SkuMatch::Positional)]);
}

#[test]
fn positional_tier_takes_first_n_when_counts_differ() {
    let options = list(&["Red", "Blue", "Gold"]);
    let skus = list(&["A1", "A2"]);
    let resolved = reconcile(&request("Mug", &options, &skus));
    assert_eq!(resolved[0].sku, "A1");
    assert_eq!(resolved[1].sku, "A2");
    assert_eq!(resolved[2].sku, "ETSY-mug-03");
    assert_eq!(resolved[2].sku_match, SkuMatch::Synthesized);
}

#[test]
fn synthesizes_when_no_skus_exist() {
    let options = list(&["S", "M"]);
    let resolved = reconcile(&request("Baby Romper!", &options, &[]));
    let got: Vec<&str> = resolved.iter().map(|r| r.sku.as_str()).collect();
    assert_eq!(got, vec!["ETSY-baby-romper-01", "ETSY-baby-romper-02"]);
}

#[test]
fn blank_skus_are_never_assigned() {
    let options = list(&["Red", "Blue"]);
    let skus = list(&["", "B2"]);
    let resolved = reconcile(&request("Mug", &options, &skus));
    assert_eq!(resolved[0].sku, "B2");
    assert_eq!(resolved[1].sku, "ETSY-mug-02");
}

#[test]
fn no_sku_is_assigned_twice() {
    let options = list(&["S", "M", "L", "XL", "Green", "8x10"]);
    let skus = list(&["P_S", "P_S", "P-M", "GREEN", "P_L", "8X10-PRINT"]);
    let resolved = reconcile(&request("Mixed", &options, &skus));
    let mut seen = HashSet::new();
    for r in &resolved {
        assert!(!r.sku.is_empty());
        assert!(seen.insert(r.sku.clone()), "duplicate SKU {}", r.sku);
    }
    assert_eq!(resolved.len(), options.len());
}

// -----------------------------------------------------------------------
// placeholder
// -----------------------------------------------------------------------

#[test]
fn all_excluded_values_fall_back_to_default_placeholder() {
    let options = list(&["Digital Download"]);
    let skus = list(&["DL-1"]);
    let resolved = reconcile(&request("Print", &options, &skus));
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].value, DEFAULT_OPTION_VALUE);
    // Counts match but the only SKU belongs to the excluded value.
    assert_eq!(resolved[0].sku, "ETSY-print-01");
}

#[test]
fn empty_option_list_yields_default_placeholder() {
    let skus = list(&["PRINT-001"]);
    let resolved = reconcile(&request("Print", &[], &skus));
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].value, "Default");
    assert_eq!(resolved[0].sku, "PRINT-001");
}

// -----------------------------------------------------------------------
// prices
// -----------------------------------------------------------------------

#[test]
fn base_price_used_without_price_table() {
    let options = list(&["S", "M"]);
    let resolved = reconcile(&request("Tee", &options, &[]));
    assert!(resolved
        .iter()
        .all(|r| r.price == Price::Amount(dec("22.00")) && r.price_source == PriceSource::Base));
}

#[test]
fn price_table_exact_then_token_then_base() {
    let table = PriceTable::parse("Small: 15\nSize M (US$18.505)");
    let options = list(&["Small", "M", "L"]);
    let mut req = request("Tee", &options, &[]);
    req.price_table = Some(&table);
    let resolved = reconcile(&req);

    assert_eq!(resolved[0].price, Price::Amount(dec("15.00")));
    assert_eq!(resolved[0].price_source, PriceSource::ExactLabel);
    assert_eq!(resolved[1].price, Price::Amount(dec("18.51")));
    assert_eq!(resolved[1].price_source, PriceSource::TokenLabel);
    assert_eq!(resolved[2].price, Price::Amount(dec("22.00")));
    assert_eq!(resolved[2].price_source, PriceSource::Base);
}

#[test]
fn mapped_prices_receive_markup_when_requested() {
    let table = PriceTable::parse("8x12: 20");
    let options = list(&["8 x 12"]);
    let mut req = request("Poster", &options, &[]);
    req.price_table = Some(&table);
    req.markup_on_mapped = true;
    let resolved = reconcile(&req);
    assert_eq!(resolved[0].price, Price::Amount(dec("22.00")));
    assert_eq!(resolved[0].price_source, PriceSource::TokenLabel);
}
