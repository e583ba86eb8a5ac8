//! Owned, mutable markup tree.
//!
//! Authored blocks and nav fragments are parsed with `scraper` (html5ever) and
//! converted into this tree so decorators can inspect and rewrite them freely,
//! then serialize them back to HTML.

use std::fmt::Write;

use scraper::{ElementRef, Html, Node as HtmlNode};

/// Elements serialized without a closing tag.
const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Tag of the element wrapping a loaded nav fragment.
pub const FRAGMENT_ROOT: &str = "main";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        }
    }

    fn write_text(&self, out: &mut String) {
        match self {
            Node::Element(e) => e.write_text(out),
            Node::Text(t) => out.push_str(t),
        }
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Element(e) => e.write_html(out),
            Node::Text(t) => out.push_str(&escape_text(t)),
        }
    }
}

impl From<Element> for Node {
    fn from(e: Element) -> Self {
        Node::Element(e)
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::Text(s.to_string())
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Node::Text(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    pub tag: String,
    attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Parse `html` as body content and wrap the result in a `tag` element.
    pub fn from_html(tag: &str, html: &str) -> Self {
        let mut root = Self::new(tag);
        root.children = parse_nodes(html);
        root
    }

    // --- builder helpers ---

    pub fn with_attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn with_class(self, class: &str) -> Self {
        self.with_attr("class", class)
    }

    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn with_children<I, N>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    pub fn with_text(self, text: &str) -> Self {
        self.with_child(text)
    }

    // --- attributes ---

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attrs.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value,
            None => self.attrs.push((name.to_string(), value)),
        }
    }

    pub fn remove_attr(&mut self, name: &str) {
        self.attrs.retain(|(k, _)| k != name);
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|c| c.split_whitespace().any(|c| c == class))
    }

    pub fn add_class(&mut self, class: &str) {
        if self.has_class(class) {
            return;
        }
        let joined = match self.attr("class") {
            Some(existing) if !existing.trim().is_empty() => {
                format!("{} {}", existing.trim(), class)
            }
            _ => class.to_string(),
        };
        self.set_attr("class", joined);
    }

    pub fn remove_class(&mut self, class: &str) {
        let Some(existing) = self.attr("class") else {
            return;
        };
        let kept: Vec<&str> = existing
            .split_whitespace()
            .filter(|c| *c != class)
            .collect();
        let kept = kept.join(" ");
        self.set_attr("class", kept);
    }

    /// Read one property from the inline `style` attribute.
    pub fn style(&self, prop: &str) -> Option<String> {
        parse_style(self.attr("style")?)
            .into_iter()
            .find(|(k, _)| k == prop)
            .map(|(_, v)| v)
    }

    /// Set (or, with an empty value, remove) one inline style property.
    pub fn set_style(&mut self, prop: &str, value: &str) {
        let mut decls = self.attr("style").map(parse_style).unwrap_or_default();
        decls.retain(|(k, _)| k != prop);
        if !value.is_empty() {
            decls.push((prop.to_string(), value.to_string()));
        }
        if decls.is_empty() {
            self.remove_attr("style");
        } else {
            let css = decls
                .iter()
                .map(|(k, v)| format!("{k}: {v}"))
                .collect::<Vec<_>>()
                .join("; ");
            self.set_attr("style", css);
        }
    }

    // --- content ---

    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.write_text(&mut out);
        out
    }

    pub fn element_children(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    pub fn element_children_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut().filter_map(Node::as_element_mut)
    }

    pub fn replace_children(&mut self, children: Vec<Node>) {
        self.children = children;
    }

    // --- queries (descendants only, document order) ---

    pub fn descendants(&self) -> Vec<&Element> {
        let mut out = Vec::new();
        self.collect_descendants(&mut out);
        out
    }

    fn collect_descendants<'a>(&'a self, out: &mut Vec<&'a Element>) {
        for child in self.element_children() {
            out.push(child);
            child.collect_descendants(out);
        }
    }

    pub fn find(&self, pred: impl Fn(&Element) -> bool + Copy) -> Option<&Element> {
        for child in self.element_children() {
            if pred(child) {
                return Some(child);
            }
            if let Some(found) = child.find(pred) {
                return Some(found);
            }
        }
        None
    }

    pub fn find_mut(&mut self, pred: impl Fn(&Element) -> bool + Copy) -> Option<&mut Element> {
        for child in self.element_children_mut() {
            if pred(child) {
                return Some(child);
            }
            if let Some(found) = child.find_mut(pred) {
                return Some(found);
            }
        }
        None
    }

    pub fn find_all(&self, pred: impl Fn(&Element) -> bool) -> Vec<&Element> {
        self.descendants().into_iter().filter(|e| pred(e)).collect()
    }

    pub fn find_tag(&self, tag: &str) -> Option<&Element> {
        self.find(|e| e.tag == tag)
    }

    /// First descendant whose tag is any of `tags` (like `querySelector('a, b')`).
    pub fn find_any_tag(&self, tags: &[&str]) -> Option<&Element> {
        self.descendants()
            .into_iter()
            .find(|e| tags.contains(&e.tag.as_str()))
    }

    pub fn find_class(&self, class: &str) -> Option<&Element> {
        self.descendants().into_iter().find(|e| e.has_class(class))
    }

    pub fn find_class_mut(&mut self, class: &str) -> Option<&mut Element> {
        for child in self.element_children_mut() {
            if child.has_class(class) {
                return Some(child);
            }
            if let Some(found) = child.find_class_mut(class) {
                return Some(found);
            }
        }
        None
    }

    pub fn contains_tag(&self, tags: &[&str]) -> bool {
        self.find_any_tag(tags).is_some()
    }

    // --- index paths (positions in `children`, root = empty path) ---

    /// Every descendant element with its path from `self`, in document order.
    pub fn descendant_paths(&self) -> Vec<(Vec<usize>, &Element)> {
        let mut out = Vec::new();
        self.collect_paths(&mut Vec::new(), &mut out);
        out
    }

    fn collect_paths<'a>(
        &'a self,
        prefix: &mut Vec<usize>,
        out: &mut Vec<(Vec<usize>, &'a Element)>,
    ) {
        for (i, node) in self.children.iter().enumerate() {
            if let Node::Element(child) = node {
                prefix.push(i);
                out.push((prefix.clone(), child));
                child.collect_paths(prefix, out);
                prefix.pop();
            }
        }
    }

    pub fn at_path(&self, path: &[usize]) -> Option<&Element> {
        let mut cur = self;
        for &i in path {
            cur = cur.children.get(i)?.as_element()?;
        }
        Some(cur)
    }

    /// Nearest strict ancestor of the element at `path` matching `pred`,
    /// with its path. `self` counts as an ancestor.
    pub fn closest_ancestor(
        &self,
        path: &[usize],
        pred: impl Fn(&Element) -> bool,
    ) -> Option<(Vec<usize>, &Element)> {
        (0..path.len()).rev().find_map(|len| {
            let prefix = &path[..len];
            self.at_path(prefix)
                .filter(|e| pred(e))
                .map(|e| (prefix.to_vec(), e))
        })
    }

    /// Element siblings following the element at `path`, nearest first.
    pub fn next_element_siblings(&self, path: &[usize]) -> Vec<&Element> {
        let Some((&last, parent_path)) = path.split_last() else {
            return Vec::new();
        };
        let Some(parent) = self.at_path(parent_path) else {
            return Vec::new();
        };
        parent
            .children
            .iter()
            .skip(last + 1)
            .filter_map(Node::as_element)
            .collect()
    }

    // --- serialization ---

    pub fn outer_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    pub fn inner_html(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.write_html(&mut out);
        }
        out
    }

    fn write_text(&self, out: &mut String) {
        for child in &self.children {
            child.write_text(out);
        }
    }

    fn write_html(&self, out: &mut String) {
        let _ = write!(out, "<{}", self.tag);
        for (k, v) in &self.attrs {
            let _ = write!(out, " {}=\"{}\"", k, escape_attr(v));
        }
        out.push('>');
        if VOID_TAGS.contains(&self.tag.as_str()) {
            return;
        }
        for child in &self.children {
            child.write_html(out);
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

/// Parse an HTML snippet as body content. Comments are dropped.
pub fn parse_nodes(html: &str) -> Vec<Node> {
    let doc = Html::parse_fragment(html);
    convert_children(doc.root_element())
}

fn convert_children(parent: ElementRef<'_>) -> Vec<Node> {
    let mut out = Vec::new();
    for child in parent.children() {
        match child.value() {
            HtmlNode::Text(text) => out.push(Node::Text(String::from(&**text))),
            HtmlNode::Element(_) => {
                if let Some(el) = ElementRef::wrap(child) {
                    out.push(Node::Element(convert_element(el)));
                }
            }
            _ => {}
        }
    }
    out
}

fn convert_element(el: ElementRef<'_>) -> Element {
    let value = el.value();
    let mut out = Element::new(value.name());
    for (k, v) in value.attrs() {
        out.attrs.push((k.to_string(), v.to_string()));
    }
    out.children = convert_children(el);
    out
}

fn parse_style(css: &str) -> Vec<(String, String)> {
    css.split(';')
        .filter_map(|decl| {
            let (k, v) = decl.split_once(':')?;
            let k = k.trim();
            if k.is_empty() {
                return None;
            }
            Some((k.to_ascii_lowercase(), v.trim().to_string()))
        })
        .collect()
}

pub fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

pub fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;").replace('"', "&quot;")
}
