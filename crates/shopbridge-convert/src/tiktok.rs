//! TikTok Shop product export → Shopify rows.
//!
//! TikTok exports one row per SKU. Rows are grouped into products by product
//! ID, falling back to the title where the ID is missing, keeping the order in
//! which each product first appears. Each row keeps its own SKU and price.

use std::collections::HashMap;

use rust_decimal::Decimal;
use shopbridge_core::{Record, ResolvedVariant, RowRecord, SourceTable, TargetTable};

use crate::assemble::assemble;
use crate::columns::{find_containing, FieldAliases};
use crate::error::ConvertError;
use crate::images::ImageCollector;
use crate::listing::{push_product_rows, ProductHeader};
use crate::numeric::apply_markup;
use crate::reconcile::{is_excluded, synthesize_sku, DEFAULT_OPTION_VALUE};
use crate::slug::slugify;
use crate::SourcePlatform;

const TITLE: FieldAliases =
    FieldAliases::new("title", &["Product Name", "Title", "Name", "Product Title"]);
const DESCRIPTION: FieldAliases =
    FieldAliases::new("description", &["Product description", "Description"]);
const PRICE: FieldAliases = FieldAliases::new(
    "price",
    &["Price", "Sale Price", "Selling Price", "SKU Price", "Unit Price"],
);
const SKU: FieldAliases = FieldAliases::new(
    "SKU",
    &["SKU ID", "Seller SKU", "SKU", "Merchant SKU", "Model Number"],
);
const OPTION1_NAME: FieldAliases = FieldAliases::new(
    "variant 1 name",
    &["Variant 1 Name", "Option1 Name", "Attribute 1 Name", "Spec 1 Name"],
);
const OPTION1_VALUE: FieldAliases = FieldAliases::new(
    "variant 1 value",
    &["Variant 1 Value", "Option1 Value", "Attribute 1 Value", "Spec 1 Value"],
);
const OPTION2_NAME: FieldAliases = FieldAliases::new(
    "variant 2 name",
    &["Variant 2 Name", "Option2 Name", "Attribute 2 Name", "Spec 2 Name"],
);
const OPTION2_VALUE: FieldAliases = FieldAliases::new(
    "variant 2 value",
    &["Variant 2 Value", "Option2 Value", "Attribute 2 Value", "Spec 2 Value"],
);
const PRODUCT_KEY: FieldAliases =
    FieldAliases::new("product ID", &["Product ID", "SPU ID", "Parent ID", "Item ID"]);

const SINGLE_OPTION_NAME: &str = "Title";
const SINGLE_OPTION_VALUE: &str = "Default Title";
const DEFAULT_OPTION1_NAME: &str = "Option1";

/// Field→column mapping for one TikTok table.
#[derive(Debug)]
struct TikTokColumns {
    title: Option<usize>,
    description: Option<usize>,
    price: Option<usize>,
    sku: Option<usize>,
    option1_name: Option<usize>,
    option1_value: Option<usize>,
    option2_name: Option<usize>,
    option2_value: Option<usize>,
    product_key: Option<usize>,
    images: Vec<usize>,
}

impl TikTokColumns {
    fn resolve(table: &SourceTable) -> Result<Self, ConvertError> {
        let title = TITLE.find(table);
        let product_key = PRODUCT_KEY.find(table);
        if title.is_none() && product_key.is_none() {
            return Err(ConvertError::MissingColumn {
                platform: SourcePlatform::TikTok,
                field: "title or product ID",
                expected: TITLE
                    .aliases
                    .iter()
                    .chain(PRODUCT_KEY.aliases)
                    .copied()
                    .collect::<Vec<_>>()
                    .join(", "),
            });
        }

        Ok(Self {
            title,
            description: DESCRIPTION.find(table),
            price: PRICE.find(table).or_else(|| find_containing(table, "price")),
            sku: SKU.find(table),
            option1_name: OPTION1_NAME.find(table),
            option1_value: OPTION1_VALUE.find(table),
            option2_name: OPTION2_NAME.find(table),
            option2_value: OPTION2_VALUE.find(table),
            product_key,
            images: image_columns(table),
        })
    }

    /// Grouping key: the product ID, or the title when the ID column is
    /// missing or the row's ID cell is blank.
    fn group_key<'a>(&self, record: &Record<'a>) -> &'a str {
        record
            .non_blank(self.product_key)
            .unwrap_or_else(|| record.get(self.title))
    }

    fn has_options(&self, record: &Record<'_>) -> bool {
        record.non_blank(self.option1_value).is_some()
            || record.non_blank(self.option2_value).is_some()
    }
}

fn image_columns(table: &SourceTable) -> Vec<usize> {
    table
        .headers()
        .iter()
        .enumerate()
        .filter(|(_, h)| {
            let lower = h.to_lowercase();
            lower.starts_with("image") || lower.contains("main image") || lower.contains("images")
        })
        .map(|(idx, _)| idx)
        .collect()
}

/// Rows sharing a grouping key, in first-seen order.
fn group_records<'a>(
    table: &'a SourceTable,
    columns: &TikTokColumns,
) -> Vec<(&'a str, Vec<Record<'a>>)> {
    let mut groups: Vec<(&'a str, Vec<Record<'a>>)> = Vec::new();
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    for record in table.records() {
        let key = columns.group_key(&record);
        match index.get(key) {
            Some(&slot) => groups[slot].1.push(record),
            None => {
                index.insert(key, groups.len());
                groups.push((key, vec![record]));
            }
        }
    }
    groups
}

/// Converts a TikTok Shop product export into Shopify import rows.
///
/// An empty table converts to an empty result with the canonical columns.
///
/// # Errors
///
/// Returns [`ConvertError::MissingColumn`] when the table has neither a title
/// nor a product ID column.
pub fn convert_tiktok_to_shopify(
    table: &SourceTable,
    vendor: &str,
    markup_pct: Decimal,
) -> Result<TargetTable, ConvertError> {
    if table.is_empty() {
        return Ok(TargetTable::empty());
    }
    let columns = TikTokColumns::resolve(table)?;
    let groups = group_records(table, &columns);

    let context = GroupContext {
        columns: &columns,
        vendor: vendor.trim(),
        markup_pct,
    };
    let mut rows: Vec<RowRecord> = Vec::new();
    for (ordinal, (key, records)) in groups.iter().enumerate() {
        context.convert_group(ordinal, key, records, &mut rows);
    }

    let output = assemble(&rows);
    tracing::info!(
        platform = %SourcePlatform::TikTok,
        products = groups.len(),
        rows = output.len(),
        "conversion finished"
    );
    Ok(output)
}

struct GroupContext<'c> {
    columns: &'c TikTokColumns,
    vendor: &'c str,
    markup_pct: Decimal,
}

impl GroupContext<'_> {
    fn convert_group(
        &self,
        ordinal: usize,
        key: &str,
        records: &[Record<'_>],
        out: &mut Vec<RowRecord>,
    ) {
        let Some(first) = records.first() else {
            return;
        };
        let columns = self.columns;
        let title = first.get(columns.title);

        let handle = Some(slugify(title))
            .filter(|h| !h.is_empty())
            .or_else(|| {
                Some(slugify(key))
                    .filter(|k| !k.is_empty())
                    .map(|k| format!("{}-{k}", SourcePlatform::TikTok.handle_prefix()))
            })
            .unwrap_or_else(|| {
                format!("{}-{}", SourcePlatform::TikTok.handle_prefix(), ordinal + 1)
            });
        // Untitled products seed synthesized SKUs from their key instead.
        let sku_seed = if title.is_empty() {
            tracing::warn!(%handle, key, "product has no title");
            key
        } else {
            title
        };

        let mut images = ImageCollector::new();
        for record in records {
            for &col in &columns.images {
                images.push_cell(record.get(Some(col)));
            }
        }

        let variants = records
            .iter()
            .any(|r| columns.has_options(r))
            .then(|| self.multi_variant(sku_seed, records))
            .flatten()
            .unwrap_or_else(|| vec![self.single_variant(sku_seed, first)]);

        tracing::debug!(
            %handle,
            rows = records.len(),
            variants = variants.len(),
            "product grouped"
        );

        let header = ProductHeader {
            handle,
            title: title.to_owned(),
            body_html: first.get(columns.description).to_owned(),
            vendor: self.vendor.to_owned(),
            images: images.finish(),
            tags: None,
        };
        push_product_rows(out, &header, &variants);
    }

    fn single_variant(&self, title: &str, first: &Record<'_>) -> ResolvedVariant {
        let sku = first.non_blank(self.columns.sku).map_or_else(
            || synthesize_sku(SourcePlatform::TikTok.sku_prefix(), title, 1),
            ToOwned::to_owned,
        );
        ResolvedVariant {
            option1_name: SINGLE_OPTION_NAME.to_owned(),
            option1_value: SINGLE_OPTION_VALUE.to_owned(),
            option2_name: None,
            option2_value: None,
            sku,
            price: apply_markup(first.get(self.columns.price), self.markup_pct),
        }
    }

    /// One variant per kept row. `None` when every row was excluded.
    ///
    /// A TikTok row is already a concrete combination carrying its own SKU and
    /// price, so a non-blank SKU cell stays on its row. Rows without one get a
    /// synthesized SKU numbered by their position among the kept rows.
    fn multi_variant(
        &self,
        sku_seed: &str,
        records: &[Record<'_>],
    ) -> Option<Vec<ResolvedVariant>> {
        let columns = self.columns;
        let kept: Vec<&Record<'_>> = records
            .iter()
            .filter(|r| {
                !is_excluded(r.get(columns.option1_value))
                    && !is_excluded(r.get(columns.option2_value))
            })
            .collect();
        if kept.is_empty() {
            tracing::warn!(
                title = sku_seed,
                "every variant row was excluded, using a single default variant"
            );
            return None;
        }

        let variants = kept
            .iter()
            .enumerate()
            .map(|(idx, record)| {
                let sku = record.non_blank(columns.sku).map_or_else(
                    || {
                        let sku =
                            synthesize_sku(SourcePlatform::TikTok.sku_prefix(), sku_seed, idx + 1);
                        tracing::warn!(
                            title = sku_seed,
                            %sku,
                            "variant row has no SKU, synthesized one"
                        );
                        sku
                    },
                    ToOwned::to_owned,
                );
                let option2_name = record.non_blank(columns.option2_name);
                ResolvedVariant {
                    option1_name: record
                        .non_blank(columns.option1_name)
                        .unwrap_or(DEFAULT_OPTION1_NAME)
                        .to_owned(),
                    option1_value: record
                        .non_blank(columns.option1_value)
                        .unwrap_or(DEFAULT_OPTION_VALUE)
                        .to_owned(),
                    option2_name: option2_name.map(ToOwned::to_owned),
                    option2_value: option2_name
                        .map(|_| record.get(columns.option2_value).to_owned()),
                    sku,
                    price: apply_markup(record.get(columns.price), self.markup_pct),
                }
            })
            .collect();
        Some(variants)
    }
}
