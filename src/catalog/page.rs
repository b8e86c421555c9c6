//! Scraping of Gutenberg e-book metadata pages

use scraper::{Html, Selector};

/// Label of the download link for the plain-text edition
pub const PLAIN_TEXT_LABEL: &str = "Plain Text UTF-8";

/// Parsed view of a metadata page
pub struct MetadataPage {
    document: Html,
}

impl MetadataPage {
    pub fn parse(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
        }
    }

    /// Find the href of the first link whose label contains "Plain Text UTF-8"
    pub fn plain_text_href(&self) -> Option<String> {
        let selector = Selector::parse("a[href]").ok()?;

        self.document
            .select(&selector)
            .find(|link| link.text().collect::<String>().contains(PLAIN_TEXT_LABEL))
            .and_then(|link| link.value().attr("href"))
            .map(String::from)
    }

    /// Text of the `<title>` element, if present and non-empty
    pub fn title(&self) -> Option<String> {
        let selector = Selector::parse("title").ok()?;
        let title = self
            .document
            .select(&selector)
            .next()?
            .text()
            .collect::<String>()
            .trim()
            .to_string();

        if title.is_empty() {
            None
        } else {
            Some(title)
        }
    }
}

/// Title used when the metadata page has none
pub fn placeholder_title(book_id: &str) -> String {
    format!("Book {} (Title Unavailable)", book_id)
}

/// Resolve a download href against the catalog base URL
pub fn resolve_href(base_url: &str, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        href.to_string()
    } else {
        format!("{}{}", base_url.trim_end_matches('/'), href)
    }
}
