//! HTTP client for the Project Gutenberg catalog

use crate::catalog::page::{placeholder_title, resolve_href, MetadataPage};
use crate::catalog::{BookSource, FetchedBook};
use crate::error::FetchError;
use tracing::{debug, info};

pub const DEFAULT_BASE_URL: &str = "https://www.gutenberg.org";

const USER_AGENT: &str = concat!("gutenbergctl/", env!("CARGO_PKG_VERSION"));

/// Book source backed by gutenberg.org (or a mirror with the same layout)
pub struct GutenbergCatalog {
    client: reqwest::Client,
    base_url: String,
}

/// What the metadata page told us about a book
struct PageInfo {
    title: String,
    content_url: String,
}

impl GutenbergCatalog {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn metadata_url(&self, book_id: &str) -> String {
        format!("{}/ebooks/{}", self.base_url, urlencoding::encode(book_id))
    }

    async fn get_text(&self, url: &str) -> reqwest::Result<String> {
        debug!("GET {}", url);
        self.client
            .get(url)
            .header("User-Agent", USER_AGENT)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await
    }

    /// Pull the title and plain-text URL out of the metadata page
    fn read_page(&self, book_id: &str, html: &str) -> Result<PageInfo, FetchError> {
        let page = MetadataPage::parse(html);

        let href = page
            .plain_text_href()
            .ok_or_else(|| FetchError::MissingPlainText(book_id.to_string()))?;

        Ok(PageInfo {
            title: page.title().unwrap_or_else(|| placeholder_title(book_id)),
            content_url: resolve_href(&self.base_url, &href),
        })
    }
}

impl Default for GutenbergCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl BookSource for GutenbergCatalog {
    async fn fetch(&self, book_id: &str) -> Result<FetchedBook, FetchError> {
        let metadata_html = self
            .get_text(&self.metadata_url(book_id))
            .await
            .map_err(FetchError::Metadata)?;

        let info = self.read_page(book_id, &metadata_html)?;

        let content = self
            .get_text(&info.content_url)
            .await
            .map_err(FetchError::Content)?;

        info!(
            "Fetched book {} ({} chars) from {}",
            book_id,
            content.chars().count(),
            info.content_url
        );

        Ok(FetchedBook {
            title: info.title,
            content,
        })
    }
}
