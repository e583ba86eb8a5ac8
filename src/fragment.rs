//! Loading nav fragments (`<path>.plain.html`) into a markup tree.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use tracing::{debug, warn};
use url::Url;

use crate::config::SiteConfig;
use crate::dom::{Element, Node, FRAGMENT_ROOT};

const DEFAULT_CONTENT_CLASS: &str = "default-content-wrapper";

/// Fetches a fragment by site path and returns it wrapped in a `main` element.
#[async_trait]
pub trait FragmentLoader: Send + Sync {
    async fn load(&self, path: &str) -> Result<Element>;
}

/// Fetches `<origin><path><suffix>` over HTTP.
pub struct HttpFragmentLoader {
    client: reqwest::Client,
    origin: Url,
    suffix: String,
}

impl HttpFragmentLoader {
    pub fn new(origin: Url, config: &SiteConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.fetch_timeout())
            .build()?;
        Ok(Self {
            client,
            origin,
            suffix: config.fragment_suffix.clone(),
        })
    }
}

#[async_trait]
impl FragmentLoader for HttpFragmentLoader {
    async fn load(&self, path: &str) -> Result<Element> {
        let path = fragment_path(path)?;
        let url = self
            .origin
            .join(&format!("{path}{}", self.suffix))
            .with_context(|| format!("building fragment url for {path}"))?;
        debug!(%url, "fetching fragment");
        let resp = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("fetching {url}"))?;
        if !resp.status().is_success() {
            bail!("fragment {url} returned {}", resp.status());
        }
        let body = resp
            .text()
            .await
            .with_context(|| format!("reading body of {url}"))?;
        Ok(fragment_from_html(&body))
    }
}

/// Reads `<root><path><suffix>` from disk.
pub struct DirFragmentLoader {
    root: PathBuf,
    suffix: String,
}

impl DirFragmentLoader {
    pub fn new(root: impl Into<PathBuf>, suffix: &str) -> Self {
        Self {
            root: root.into(),
            suffix: suffix.to_string(),
        }
    }
}

#[async_trait]
impl FragmentLoader for DirFragmentLoader {
    async fn load(&self, path: &str) -> Result<Element> {
        let path = fragment_path(path)?;
        let file = self
            .root
            .join(format!("{}{}", path.trim_start_matches('/'), self.suffix));
        debug!(file = %file.display(), "reading fragment");
        let body = tokio::fs::read_to_string(&file)
            .await
            .with_context(|| format!("reading fragment: {}", file.display()))?;
        Ok(fragment_from_html(&body))
    }
}

/// Fixed path → markup map.
#[derive(Default)]
pub struct StaticFragmentLoader {
    fragments: HashMap<String, String>,
}

impl StaticFragmentLoader {
    pub fn with(mut self, path: &str, html: &str) -> Self {
        self.fragments.insert(path.to_string(), html.to_string());
        self
    }
}

#[async_trait]
impl FragmentLoader for StaticFragmentLoader {
    async fn load(&self, path: &str) -> Result<Element> {
        let path = fragment_path(path)?;
        let html = self
            .fragments
            .get(&path)
            .ok_or_else(|| anyhow!("no fragment at {path}"))?;
        Ok(fragment_from_html(html))
    }
}

/// Normalize a fragment path: must be site-absolute, `.plain.html`/`.html` is dropped.
fn fragment_path(path: &str) -> Result<String> {
    if !path.starts_with('/') {
        bail!("fragment path must start with '/': {path}");
    }
    let path = path.strip_suffix(".html").unwrap_or(path);
    let path = path.strip_suffix(".plain").unwrap_or(path);
    Ok(path.to_string())
}

/// Parse fragment markup into `main` and group each section's loose content.
pub fn fragment_from_html(html: &str) -> Element {
    let mut main = Element::from_html(FRAGMENT_ROOT, html);
    decorate_sections(&mut main);
    main
}

/// Each top-level `div` is a section. Runs of non-block children are wrapped in
/// `div.default-content-wrapper`; blocks (classed divs) in `div.<name>-wrapper`.
pub fn decorate_sections(main: &mut Element) {
    for section in main.element_children_mut().filter(|e| e.tag == "div") {
        section.add_class("section");
        let children = std::mem::take(&mut section.children);
        let mut grouped: Vec<Node> = Vec::new();
        let mut loose: Vec<Node> = Vec::new();

        for child in children {
            match block_name(&child) {
                Some(name) => {
                    flush_loose(&mut loose, &mut grouped);
                    let wrapper = Element::new("div")
                        .with_class(&format!("{name}-wrapper"))
                        .with_child(child);
                    grouped.push(wrapper.into());
                }
                None => loose.push(child),
            }
        }
        flush_loose(&mut loose, &mut grouped);
        section.children = grouped;
    }
}

/// First class of a child `div`, which names the block it holds.
fn block_name(node: &Node) -> Option<String> {
    match node {
        Node::Element(e) if e.tag == "div" => e
            .attr("class")
            .and_then(|c| c.split_whitespace().next())
            .map(str::to_string),
        _ => None,
    }
}

fn flush_loose(loose: &mut Vec<Node>, out: &mut Vec<Node>) {
    let has_content = loose.iter().any(|n| match n {
        Node::Element(_) => true,
        Node::Text(t) => !t.trim().is_empty(),
    });
    let nodes = std::mem::take(loose);
    if has_content {
        let wrapper = Element::new("div")
            .with_class(DEFAULT_CONTENT_CLASS)
            .with_children(nodes);
        out.push(wrapper.into());
    }
}

/// Nav path for a page: the `nav` metadata resolved against the page URL, or
/// `default` when absent or unresolvable.
pub fn resolve_nav_path(meta: Option<&str>, page_url: &Url, default: &str) -> String {
    match meta.map(str::trim).filter(|m| !m.is_empty()) {
        Some(meta) => match page_url.join(meta) {
            Ok(url) => url.path().to_string(),
            Err(e) => {
                warn!(meta, error = %e, "unresolvable nav metadata; using default");
                default.to_string()
            }
        },
        None => default.to_string(),
    }
}
