use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A response handed to the response callback after a successful fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchedResponse {
    pub url: String,
    pub status_code: u16,
    pub content_type: Option<String>,
    pub content_length: Option<u64>,
    pub headers: Vec<(String, String)>,
    pub body: String,
    /// Length of the raw body before lossy UTF-8 decoding.
    pub body_bytes: usize,
    pub response_time: Duration,
    pub from_cache: bool,
}

impl FetchedResponse {
    pub fn new(url: String) -> Self {
        Self {
            url,
            status_code: 0,
            content_type: None,
            content_length: None,
            headers: Vec::new(),
            body: String::new(),
            body_bytes: 0,
            response_time: Duration::from_secs(0),
            from_cache: false,
        }
    }

    pub fn is_html(&self) -> bool {
        self.content_type
            .as_ref()
            .map(|ct| ct.contains("html"))
            .unwrap_or(false)
    }

    /// Sitemaps and feeds. A `.xml` path counts even when the server sends no content type.
    pub fn is_xml(&self) -> bool {
        if self.is_html() {
            return false;
        }
        let by_type = self
            .content_type
            .as_ref()
            .map(|ct| ct.contains("xml") || ct.contains("rss"))
            .unwrap_or(false);
        by_type || path_of(&self.url).to_ascii_lowercase().ends_with(".xml")
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

fn path_of(url: &str) -> &str {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    &url[..end]
}

/// Where a discovered link came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkSource {
    /// `selector` is the CSS selector that matched, e.g. `a[href]`.
    Html { selector: &'static str },
    /// `element` is the XML element whose text held the link, e.g. `loc`.
    Feed { element: &'static str },
}

/// A raw link found on a fetched page, before any scope decision.
#[derive(Debug, Clone)]
pub struct DiscoveredLink {
    pub raw: String,
    pub page_url: String,
    pub source: LinkSource,
}

impl DiscoveredLink {
    /// Resolves the raw link against the page it was found on and drops the fragment.
    pub fn absolute_url(&self) -> Option<String> {
        let base = url::Url::parse(&self.page_url).ok()?;
        let mut resolved = base.join(self.raw.trim()).ok()?;
        resolved.set_fragment(None);
        Some(resolved.to_string())
    }
}
