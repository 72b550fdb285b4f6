//! Turning one resolved product into its block of output rows.
//!
//! The importer groups rows by `Handle`. Only the first variant row carries
//! the title, body and first image; every later variant row leaves them
//! blank, and images 2..n follow as image-only rows.

use shopbridge_core::shopify::column;
use shopbridge_core::{Cell, ResolvedVariant, RowRecord};

/// Product-level fields shared by all rows of one handle.
#[derive(Debug, Clone, Default)]
pub struct ProductHeader {
    pub handle: String,
    pub title: String,
    pub body_html: String,
    pub vendor: String,
    pub images: Vec<String>,
    /// Comma-separated tags; written to an extra `Tags` column when present.
    pub tags: Option<String>,
}

/// Appends the variant rows and trailing image rows for one product.
pub fn push_product_rows(
    out: &mut Vec<RowRecord>,
    header: &ProductHeader,
    variants: &[ResolvedVariant],
) {
    for (idx, variant) in variants.iter().enumerate() {
        let mut row = RowRecord::variant(&header.handle, &header.vendor);
        if idx == 0 {
            row.set(column::TITLE, header.title.as_str());
            row.set(column::BODY_HTML, header.body_html.as_str());
            if let Some(first) = header.images.first() {
                row.set(column::IMAGE_SRC, first.as_str());
                row.set(column::IMAGE_POSITION, Cell::Position(1));
            }
            if let Some(tags) = header.tags.as_deref() {
                row.set(column::TAGS, tags);
            }
        }
        row.set(column::OPTION1_NAME, variant.option1_name.as_str());
        row.set(column::OPTION1_VALUE, variant.option1_value.as_str());
        if let Some(name) = variant.option2_name.as_deref() {
            row.set(column::OPTION2_NAME, name);
            row.set(
                column::OPTION2_VALUE,
                variant.option2_value.as_deref().unwrap_or_default(),
            );
        }
        row.set(column::VARIANT_SKU, variant.sku.as_str());
        row.set(column::VARIANT_PRICE, variant.price);
        out.push(row);
    }

    for (position, url) in (2u32..).zip(header.images.iter().skip(1)) {
        out.push(RowRecord::image(&header.handle, url, position));
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use shopbridge_core::Price;

    use super::*;

    fn variant(value: &str, sku: &str) -> ResolvedVariant {
        ResolvedVariant {
            option1_name: "Size".into(),
            option1_value: value.into(),
            option2_name: None,
            option2_value: None,
            sku: sku.into(),
            price: Price::Amount(Decimal::from(10)),
        }
    }

    fn header() -> ProductHeader {
        ProductHeader {
            handle: "romper".into(),
            title: "Romper".into(),
            body_html: "<p>Soft</p>".into(),
            vendor: "Lullaby".into(),
            images: vec!["https://i/1.jpg".into(), "https://i/2.jpg".into(), "https://i/3.jpg".into()],
            tags: Some("baby, cotton".into()),
        }
    }

    #[test]
    fn only_first_variant_row_carries_title_body_and_image() {
        let mut rows = Vec::new();
        push_product_rows(&mut rows, &header(), &[variant("S", "R_S"), variant("M", "R_M")]);

        assert_eq!(rows[0].get(column::TITLE), Some(&Cell::Text("Romper".into())));
        assert_eq!(rows[0].get(column::IMAGE_POSITION), Some(&Cell::Position(1)));
        assert_eq!(rows[0].get(column::TAGS), Some(&Cell::Text("baby, cotton".into())));
        assert!(rows[1].get(column::TITLE).is_none());
        assert!(rows[1].get(column::IMAGE_SRC).is_none());
        assert_eq!(rows[1].get(column::VARIANT_SKU), Some(&Cell::Text("R_M".into())));
    }

    #[test]
    fn extra_images_follow_as_image_rows() {
        let mut rows = Vec::new();
        push_product_rows(&mut rows, &header(), &[variant("S", "R_S")]);
        assert_eq!(rows.len(), 3);
        assert!(!rows[1].is_variant());
        assert_eq!(rows[1].get(column::IMAGE_POSITION), Some(&Cell::Position(2)));
        assert_eq!(rows[2].get(column::IMAGE_SRC), Some(&Cell::Text("https://i/3.jpg".into())));
        assert_eq!(rows[2].get(column::HANDLE), Some(&Cell::Text("romper".into())));
    }

    #[test]
    fn option2_columns_written_only_with_a_name() {
        let mut v = variant("S", "R_S");
        v.option2_name = Some("Color".into());
        v.option2_value = Some("Red".into());
        let mut rows = Vec::new();
        push_product_rows(&mut rows, &header(), &[v, variant("M", "R_M")]);
        assert_eq!(rows[0].get(column::OPTION2_VALUE), Some(&Cell::Text("Red".into())));
        assert!(rows[1].get(column::OPTION2_NAME).is_none());
    }
}
