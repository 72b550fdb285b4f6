/// Images kept per product.
pub const MAX_IMAGES: usize = 20;

/// Gathers image URLs across cells, de-duplicated in first-seen order.
///
/// Cells may hold several URLs separated by commas or whitespace; anything
/// that does not start with an `http://` or `https://` scheme is dropped.
#[derive(Debug, Default)]
pub struct ImageCollector {
    urls: Vec<String>,
}

impl ImageCollector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_cell(&mut self, cell: &str) {
        for part in cell.split(|c: char| c == ',' || c.is_whitespace()) {
            if is_url(part) && !self.urls.iter().any(|u| u == part) {
                self.urls.push(part.to_owned());
            }
        }
    }

    /// The collected URLs, capped at [`MAX_IMAGES`].
    #[must_use]
    pub fn finish(mut self) -> Vec<String> {
        self.urls.truncate(MAX_IMAGES);
        self.urls
    }
}

fn is_url(s: &str) -> bool {
    let lower = s.get(..8).unwrap_or(s).to_ascii_lowercase();
    lower.starts_with("https://") || lower.starts_with("http://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_cells_and_keeps_first_seen_order() {
        let mut images = ImageCollector::new();
        images.push_cell("https://cdn.example/a.jpg, https://cdn.example/b.jpg");
        images.push_cell("https://cdn.example/a.jpg\nhttps://cdn.example/c.jpg");
        assert_eq!(
            images.finish(),
            vec![
                "https://cdn.example/a.jpg",
                "https://cdn.example/b.jpg",
                "https://cdn.example/c.jpg",
            ]
        );
    }

    #[test]
    fn drops_non_url_entries() {
        let mut images = ImageCollector::new();
        images.push_cell("main.jpg ftp://x/y.jpg HTTP://cdn.example/up.jpg");
        assert_eq!(images.finish(), vec!["HTTP://cdn.example/up.jpg"]);
    }

    #[test]
    fn caps_at_twenty() {
        let mut images = ImageCollector::new();
        for i in 0..25 {
            images.push_cell(&format!("https://cdn.example/{i}.jpg"));
        }
        let urls = images.finish();
        assert_eq!(urls.len(), MAX_IMAGES);
        assert_eq!(urls[19], "https://cdn.example/19.jpg");
    }
}
