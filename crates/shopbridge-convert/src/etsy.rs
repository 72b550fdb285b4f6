//! Etsy listings export → Shopify rows.
//!
//! One input row is one listing. Variation values and SKUs arrive as
//! comma-separated lists; SKUs are paired with the first variation axis by
//! the reconciler and replicated across every value of the second axis. A
//! listing with no variation values becomes a single `Default Title` variant.

use shopbridge_core::{Price, Record, ResolvedVariant, RowRecord, SourceTable, TargetTable};

use crate::assemble::assemble;
use crate::columns::FieldAliases;
use crate::error::ConvertError;
use crate::images::ImageCollector;
use crate::listing::{push_product_rows, ProductHeader};
use crate::numeric::apply_markup;
use crate::reconcile::{filter_excluded, reconcile, synthesize_sku, ReconcileRequest, SkuMatch};
use crate::slug::slugify;
use crate::{ConvertOptions, SourcePlatform};

const TITLE: FieldAliases = FieldAliases::new("title", &["TITLE", "LISTING TITLE", "NAME"]);
const DESCRIPTION: FieldAliases = FieldAliases::new("description", &["DESCRIPTION"]);
const PRICE: FieldAliases = FieldAliases::new("price", &["PRICE"]);
const SKU: FieldAliases = FieldAliases::new("SKU", &["SKU", "SKUS"]);
const VENDOR: FieldAliases = FieldAliases::new("vendor", &["VENDOR", "SHOP NAME"]);
const TAGS: FieldAliases = FieldAliases::new("tags", &["TAGS"]);
const OPTION1_NAME: FieldAliases =
    FieldAliases::new("variation 1 name", &["VARIATION 1 NAME", "VARIATION 1 TYPE"]);
const OPTION1_VALUES: FieldAliases =
    FieldAliases::new("variation 1 values", &["VARIATION 1 VALUES"]);
const OPTION2_NAME: FieldAliases =
    FieldAliases::new("variation 2 name", &["VARIATION 2 NAME", "VARIATION 2 TYPE"]);
const OPTION2_VALUES: FieldAliases =
    FieldAliases::new("variation 2 values", &["VARIATION 2 VALUES"]);

const DEFAULT_OPTION1_NAME: &str = "Option1";
const SINGLE_OPTION_NAME: &str = "Title";
const SINGLE_OPTION_VALUE: &str = "Default Title";

/// Field→column mapping for one Etsy table.
#[derive(Debug)]
struct EtsyColumns {
    title: usize,
    description: Option<usize>,
    price: Option<usize>,
    sku: Option<usize>,
    vendor: Option<usize>,
    tags: Option<usize>,
    option1_name: Vec<usize>,
    option1_values: Option<usize>,
    option2_name: Vec<usize>,
    option2_values: Option<usize>,
    images: Vec<usize>,
}

impl EtsyColumns {
    fn resolve(table: &SourceTable) -> Result<Self, ConvertError> {
        Ok(Self {
            title: TITLE.require(table, SourcePlatform::Etsy)?,
            description: DESCRIPTION.find(table),
            price: PRICE.find(table),
            sku: SKU.find(table),
            vendor: VENDOR.find(table),
            tags: TAGS.find(table),
            option1_name: OPTION1_NAME.find_all(table),
            option1_values: OPTION1_VALUES.find(table),
            option2_name: OPTION2_NAME.find_all(table),
            option2_values: OPTION2_VALUES.find(table),
            images: image_columns(table),
        })
    }
}

/// `IMAGE1`..`IMAGE99` when present, otherwise any header mentioning "image".
fn image_columns(table: &SourceTable) -> Vec<usize> {
    let numbered: Vec<usize> = table
        .headers()
        .iter()
        .enumerate()
        .filter(|(_, h)| is_numbered_image_header(h))
        .map(|(idx, _)| idx)
        .collect();
    if !numbered.is_empty() {
        return numbered;
    }
    table
        .headers()
        .iter()
        .enumerate()
        .filter(|(_, h)| h.to_uppercase().contains("IMAGE"))
        .map(|(idx, _)| idx)
        .collect()
}

fn is_numbered_image_header(header: &str) -> bool {
    let upper = header.to_uppercase();
    upper.strip_prefix("IMAGE").is_some_and(|digits| {
        (1..=2).contains(&digits.len()) && digits.bytes().all(|b| b.is_ascii_digit())
    })
}

/// Splits a comma-delimited cell into trimmed, non-empty entries.
fn split_list(cell: &str) -> Vec<String> {
    cell.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

fn first_non_blank<'a>(record: &Record<'a>, columns: &[usize]) -> Option<&'a str> {
    columns.iter().find_map(|&c| record.non_blank(Some(c)))
}

/// Converts an Etsy listings export into Shopify import rows.
///
/// An empty table converts to an empty result with the canonical columns.
///
/// # Errors
///
/// Returns [`ConvertError::MissingColumn`] when the table has no title column.
pub fn convert_etsy_to_shopify(
    table: &SourceTable,
    options: &ConvertOptions,
) -> Result<TargetTable, ConvertError> {
    if table.is_empty() {
        return Ok(TargetTable::empty());
    }
    let columns = EtsyColumns::resolve(table)?;

    let mut rows: Vec<RowRecord> = Vec::new();
    for record in table.records() {
        convert_listing(&record, &columns, options, &mut rows);
    }

    let output = assemble(&rows);
    tracing::info!(
        platform = %SourcePlatform::Etsy,
        listings = table.row_count(),
        rows = output.len(),
        "conversion finished"
    );
    Ok(output)
}

fn convert_listing(
    record: &Record<'_>,
    columns: &EtsyColumns,
    options: &ConvertOptions,
    out: &mut Vec<RowRecord>,
) {
    let title = record.get(Some(columns.title));
    let handle = Some(slugify(title))
        .filter(|h| !h.is_empty())
        .unwrap_or_else(|| {
            format!("{}-{}", SourcePlatform::Etsy.handle_prefix(), record.index() + 1)
        });

    let mut images = ImageCollector::new();
    for &col in &columns.images {
        images.push_cell(record.get(Some(col)));
    }

    let vendor = if options.vendor.trim().is_empty() {
        record.get(columns.vendor)
    } else {
        options.vendor.trim()
    };

    let option1_values = split_list(record.get(columns.option1_values));
    let raw_option2_values = split_list(record.get(columns.option2_values));
    let skus = split_list(record.get(columns.sku));
    let base_price = apply_markup(record.get(columns.price), options.markup_pct);

    let variants = if option1_values.is_empty() && raw_option2_values.is_empty() {
        vec![single_variant(title, &skus, base_price)]
    } else {
        let (option2_values, _) = filter_excluded(&raw_option2_values);
        listing_variants(
            record,
            columns,
            options,
            title,
            &option1_values,
            &option2_values,
            &skus,
            base_price,
        )
    };
    tracing::debug!(%handle, variants = variants.len(), "listing converted");

    let header = ProductHeader {
        handle,
        title: title.to_owned(),
        body_html: record.get(columns.description).to_owned(),
        vendor: vendor.to_owned(),
        images: images.finish(),
        tags: record.non_blank(columns.tags).map(ToOwned::to_owned),
    };
    push_product_rows(out, &header, &variants);
}

/// A listing without variations: one `Title`/`Default Title` variant carrying
/// the listing's first SKU, or a synthesized one.
fn single_variant(title: &str, skus: &[String], price: Price) -> ResolvedVariant {
    let sku = skus.first().cloned().unwrap_or_else(|| {
        let sku = synthesize_sku(SourcePlatform::Etsy.sku_prefix(), title, 1);
        tracing::warn!(title, %sku, "listing has no SKU, synthesized one");
        sku
    });
    ResolvedVariant {
        option1_name: SINGLE_OPTION_NAME.to_owned(),
        option1_value: SINGLE_OPTION_VALUE.to_owned(),
        option2_name: None,
        option2_value: None,
        sku,
        price,
    }
}

/// Reconciles axis 1 and expands each resolved value across axis 2.
#[allow(clippy::too_many_arguments)]
fn listing_variants(
    record: &Record<'_>,
    columns: &EtsyColumns,
    options: &ConvertOptions,
    title: &str,
    option1_values: &[String],
    option2_values: &[String],
    skus: &[String],
    base_price: Price,
) -> Vec<ResolvedVariant> {
    let option1_name =
        first_non_blank(record, &columns.option1_name).unwrap_or(DEFAULT_OPTION1_NAME);
    let option2_name = first_non_blank(record, &columns.option2_name);

    let resolved = reconcile(&ReconcileRequest {
        title,
        sku_prefix: SourcePlatform::Etsy.sku_prefix(),
        option_values: option1_values,
        skus,
        base_price,
        price_table: options.price_table.as_ref(),
        markup_on_mapped: options.markup_on_mapped,
        markup_pct: options.markup_pct,
    });

    let mut variants = Vec::with_capacity(resolved.len() * option2_values.len().max(1));
    for option in &resolved {
        let base = ResolvedVariant {
            option1_name: option1_name.to_owned(),
            option1_value: option.value.clone(),
            option2_name: None,
            option2_value: None,
            sku: option.sku.clone(),
            price: option.price,
        };
        if option2_values.is_empty() {
            variants.push(base);
            continue;
        }
        // Axis 2 never takes part in matching; each value repeats the axis-1 triple.
        for value in option2_values {
            variants.push(ResolvedVariant {
                option2_name: option2_name.map(ToOwned::to_owned),
                option2_value: option2_name.map(|_| value.clone()),
                ..base.clone()
            });
        }
    }

    let synthesized = resolved
        .iter()
        .filter(|o| o.sku_match == SkuMatch::Synthesized)
        .count();
    tracing::debug!(
        title,
        options = resolved.len(),
        variants = variants.len(),
        synthesized,
        "listing reconciled"
    );
    variants
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str]) -> SourceTable {
        SourceTable::new(headers.iter().map(ToString::to_string).collect(), Vec::new()).unwrap()
    }

    #[test]
    fn numbered_image_headers_win_over_loose_matches() {
        let t = table(&["TITLE", "IMAGE1", "IMAGE_ALT", "image12", "IMAGE123"]);
        assert_eq!(image_columns(&t), vec![1, 3]);
    }

    #[test]
    fn loose_image_headers_used_when_no_numbered_ones() {
        let t = table(&["TITLE", "Main Image URL", "Images"]);
        assert_eq!(image_columns(&t), vec![1, 2]);
    }

    #[test]
    fn split_list_drops_blank_entries() {
        assert_eq!(split_list(" S, ,M ,"), vec!["S".to_owned(), "M".to_owned()]);
        assert!(split_list("").is_empty());
    }
}
