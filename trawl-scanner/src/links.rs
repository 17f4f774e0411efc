// Link extraction from fetched HTML pages and XML feeds/sitemaps

use crate::result::{DiscoveredLink, LinkSource};
use quick_xml::Reader;
use quick_xml::events::Event;
use scraper::{Html, Selector};
use tracing::debug;

/// (selector, attribute) pairs for link-bearing HTML elements.
pub const HTML_LINK_SELECTORS: &[(&str, &str)] = &[
    ("a[href]", "href"),
    ("script[src]", "src"),
    ("link[href]", "href"),
    ("iframe[src]", "src"),
    ("svg[src]", "src"),
    ("img[src]", "src"),
    ("form[action]", "action"),
];

/// XML elements whose text content is a URL.
pub const FEED_LINK_ELEMENTS: &[&str] = &["url", "link", "href", "loc", "fileurl"];

pub fn extract_html_links(html: &str, page_url: &str) -> Vec<DiscoveredLink> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();

    for &(selector_str, attribute) in HTML_LINK_SELECTORS {
        let selector = match Selector::parse(selector_str) {
            Ok(selector) => selector,
            Err(e) => {
                debug!("Skipping selector {}: {:?}", selector_str, e);
                continue;
            }
        };

        for element in document.select(&selector) {
            if let Some(value) = element.value().attr(attribute) {
                links.push(DiscoveredLink {
                    raw: value.to_string(),
                    page_url: page_url.to_string(),
                    source: LinkSource::Html {
                        selector: selector_str,
                    },
                });
            }
        }
    }

    links
}

pub fn extract_feed_links(xml: &str, page_url: &str) -> Vec<DiscoveredLink> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut links = Vec::new();
    let mut capturing: Option<&'static str> = None;
    let mut text = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).to_ascii_lowercase();
                capturing = FEED_LINK_ELEMENTS.iter().copied().find(|el| *el == name);
                text.clear();
            }
            Ok(Event::Text(t)) => {
                if capturing.is_some() {
                    match t.unescape() {
                        Ok(unescaped) => text.push_str(&unescaped),
                        Err(_) => text.push_str(&String::from_utf8_lossy(&t)),
                    }
                }
            }
            Ok(Event::CData(c)) => {
                if capturing.is_some() {
                    text.push_str(&String::from_utf8_lossy(&c));
                }
            }
            Ok(Event::End(_)) => {
                if let Some(element) = capturing.take() {
                    let link = text.trim();
                    if !link.is_empty() {
                        links.push(DiscoveredLink {
                            raw: link.to_string(),
                            page_url: page_url.to_string(),
                            source: LinkSource::Feed { element },
                        });
                    }
                }
                text.clear();
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                debug!(
                    "XML parse error in {} at {}: {}",
                    page_url,
                    reader.buffer_position(),
                    e
                );
                break;
            }
            _ => {}
        }
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_links_from_every_selector() {
        let html = r#"<html><head>
            <link href="/style.css" rel="stylesheet">
            <script src="/app.js"></script>
            </head><body>
            <a href="/about">About</a>
            <iframe src="/frame"></iframe>
            <img src="/logo.png">
            <form action="/login"></form>
            </body></html>"#;

        let links = extract_html_links(html, "http://example.com/");
        let raws: Vec<&str> = links.iter().map(|l| l.raw.as_str()).collect();

        for expected in ["/about", "/app.js", "/style.css", "/frame", "/logo.png", "/login"] {
            assert!(raws.contains(&expected), "missing {} in {:?}", expected, raws);
        }
        assert!(links.iter().all(|l| l.page_url == "http://example.com/"));
    }

    #[test]
    fn test_html_anchor_without_href_is_ignored() {
        let links = extract_html_links("<a name='x'>x</a>", "http://example.com/");
        assert!(links.is_empty());
    }

    #[test]
    fn test_sitemap_loc_elements() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
            <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
              <url><loc>http://example.com/a</loc></url>
              <url><loc>http://example.com/b?x=1&amp;y=2</loc></url>
            </urlset>"#;

        let links = extract_feed_links(xml, "http://example.com/sitemap.xml");
        let raws: Vec<&str> = links.iter().map(|l| l.raw.as_str()).collect();
        assert_eq!(raws, vec!["http://example.com/a", "http://example.com/b?x=1&y=2"]);
        assert_eq!(links[0].source, LinkSource::Feed { element: "loc" });
    }

    #[test]
    fn test_rss_link_elements() {
        let xml = r#"<rss><channel><title>t</title>
            <item><link>http://example.com/post/1</link></item>
            <item><link><![CDATA[http://example.com/post/2]]></link></item>
            </channel></rss>"#;

        let links = extract_feed_links(xml, "http://example.com/feed.xml");
        let raws: Vec<&str> = links.iter().map(|l| l.raw.as_str()).collect();
        assert_eq!(raws, vec!["http://example.com/post/1", "http://example.com/post/2"]);
    }

    #[test]
    fn test_broken_xml_keeps_links_seen_so_far() {
        let xml = "<urlset><url><loc>http://example.com/a</loc></url><url><loc>";
        let links = extract_feed_links(xml, "http://example.com/sitemap.xml");
        assert_eq!(links.len(), 1);
    }
}
