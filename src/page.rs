use anyhow::{Context, Result};
use url::Url;

use crate::dom::Element;

/// The page being decorated: its URL and `<meta>` entries.
#[derive(Debug, Clone)]
pub struct Page {
    pub url: Url,
    /// `(attribute, key, content)` for every `<meta name|property>` tag.
    metas: Vec<(String, String, String)>,
}

impl Page {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            metas: Vec::new(),
        }
    }

    pub fn parse(url: &str) -> Result<Self> {
        let url = Url::parse(url).with_context(|| format!("invalid page url: {url}"))?;
        Ok(Self::new(url))
    }

    /// Collect `<meta>` tags from the page's head markup.
    pub fn from_head_html(url: Url, head: &str) -> Self {
        let root = Element::from_html("head", head);
        let mut page = Self::new(url);
        for meta in root.find_all(|e| e.tag == "meta") {
            let content = meta.attr("content").unwrap_or_default();
            for attr in ["name", "property"] {
                if let Some(key) = meta.attr(attr) {
                    page.metas
                        .push((attr.to_string(), key.to_string(), content.to_string()));
                }
            }
        }
        page
    }

    pub fn with_metadata(mut self, name: &str, content: &str) -> Self {
        let attr = if name.contains(':') { "property" } else { "name" };
        self.metas
            .push((attr.to_string(), name.to_string(), content.to_string()));
        self
    }

    /// Content of the named meta tag(s), joined with ", " when repeated.
    /// Names containing `:` match `property`, everything else matches `name`.
    pub fn metadata(&self, name: &str) -> Option<String> {
        let attr = if name.contains(':') { "property" } else { "name" };
        let joined = self
            .metas
            .iter()
            .filter(|(a, k, _)| a == attr && k == name)
            .map(|(_, _, v)| v.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        (!joined.is_empty()).then_some(joined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url() -> Url {
        Url::parse("https://example.com/videos/index").unwrap()
    }

    #[test]
    fn reads_name_and_property_metadata() {
        let page = Page::from_head_html(
            url(),
            r#"<meta name="nav" content="/custom/nav"><meta property="og:title" content="Home">
               <meta name="keywords" content="a"><meta name="keywords" content="b">"#,
        );
        assert_eq!(page.metadata("nav").as_deref(), Some("/custom/nav"));
        assert_eq!(page.metadata("og:title").as_deref(), Some("Home"));
        assert_eq!(page.metadata("keywords").as_deref(), Some("a, b"));
        assert_eq!(page.metadata("missing"), None);
    }

    #[test]
    fn builder_metadata_is_visible() {
        let page = Page::new(url()).with_metadata("nav", "/n");
        assert_eq!(page.metadata("nav").as_deref(), Some("/n"));
    }
}
