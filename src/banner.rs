//! Hero banner: one image, a heading and a call-to-action button.

use tracing::debug;

use crate::block::Block;
use crate::diagnostics::Report;
use crate::dom::{Element, Node};

pub const DEFAULT_HEADING: &str = "Learn To Make Easy Websites On Easy Tutorial";
pub const DEFAULT_BUTTON: &str = "Subscribe now";
pub const BANNER_ALT: &str = "Channel Banner";

const IMAGE_TAGS: &[&str] = &["picture", "img"];

/// Rewrite `block` into the banner layout.
pub fn decorate(block: &mut Block) -> Report {
    let mut report = Report::default();

    if let Some(section) = block.section.as_mut() {
        section.set_style("padding", "0");
        section.set_style("max-width", "unset");
        section.set_style("margin", "0 auto");
    }

    let image = take_image(&block.element).unwrap_or_else(|| {
        report.defaulted("image", "banner-placeholder");
        Element::new("div").with_class("banner-placeholder")
    });

    let texts = text_divs(&block.element);
    let heading = texts.first().cloned().unwrap_or_else(|| {
        report.defaulted("heading", DEFAULT_HEADING);
        DEFAULT_HEADING.to_string()
    });
    let button = texts.get(1).cloned().unwrap_or_else(|| {
        report.defaulted("button", DEFAULT_BUTTON);
        DEFAULT_BUTTON.to_string()
    });
    debug!(%heading, %button, image = %image.tag, "banner content resolved");

    let content = Element::new("div")
        .with_class("banner-content")
        .with_child(
            Element::new("h1")
                .with_class("banner-heading")
                .with_text(&heading),
        )
        .with_child(
            Element::new("button")
                .with_class("banner-button")
                .with_text(&button),
        );
    let wrapper = Element::new("div")
        .with_class("banner-wrapper")
        .with_child(image)
        .with_child(content);
    let inner = Element::new("div")
        .with_class("banner-inner")
        .with_child(wrapper);
    let outer = Element::new("div")
        .with_class("banner-outer")
        .with_child(inner);
    block.replace_content(vec![Node::Element(outer)]);
    report
}

/// The `<picture>` (preferred) or bare `<img>`, marked for eager loading.
fn take_image(root: &Element) -> Option<Element> {
    let mut image = root
        .find_tag("picture")
        .or_else(|| root.find_tag("img"))?
        .clone();
    if image.tag == "img" {
        mark_eager(&mut image);
    } else if let Some(img) = image.find_mut(|e| e.tag == "img") {
        mark_eager(img);
    }
    Some(image)
}

fn mark_eager(img: &mut Element) {
    img.set_attr("loading", "eager");
    img.set_attr("alt", BANNER_ALT);
}

/// Trimmed texts of the divs that carry text but no image, in document order.
///
/// A wrapper div whose text comes entirely from nested text divs is not
/// counted again, so a `row > cell` pair yields its text once. A div with text
/// of its own always counts.
fn text_divs(root: &Element) -> Vec<String> {
    root.descendants()
        .into_iter()
        .filter(|div| div.tag == "div" && qualifies(div))
        .filter(|div| has_own_text(div) || !has_text_div(div))
        .map(|div| div.text_content().trim().to_string())
        .collect()
}

fn has_own_text(div: &Element) -> bool {
    div.children
        .iter()
        .any(|node| matches!(node, Node::Text(text) if !text.trim().is_empty()))
}

fn has_text_div(div: &Element) -> bool {
    div.find(|inner| inner.tag == "div" && qualifies(inner))
        .is_some()
}

fn qualifies(div: &Element) -> bool {
    !div.contains_tag(IMAGE_TAGS) && !div.text_content().trim().is_empty()
}
