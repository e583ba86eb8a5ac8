use crate::dom::{Element, Node};

/// A decorated region of the page: the block element plus, when known, the
/// layout section that encloses it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub element: Element,
    pub section: Option<Element>,
}

impl Block {
    pub fn new(element: Element) -> Self {
        Self {
            element,
            section: None,
        }
    }

    /// Build a `<div class="{name} block">` holding the authored `inner_html`.
    pub fn from_html(name: &str, inner_html: &str) -> Self {
        let mut element = Element::from_html("div", inner_html);
        element.set_attr("class", format!("{name} block"));
        Self::new(element)
    }

    pub fn in_section(mut self, section: Element) -> Self {
        self.section = Some(section);
        self
    }

    /// Block name (its first class).
    pub fn name(&self) -> Option<&str> {
        self.element
            .attr("class")
            .and_then(|c| c.split_whitespace().next())
    }

    /// Authored rows: the block's direct element children.
    pub fn rows(&self) -> Vec<&Element> {
        self.element.element_children().collect()
    }

    pub fn replace_content(&mut self, nodes: Vec<Node>) {
        self.element.replace_children(nodes);
    }

    pub fn to_html(&self) -> String {
        self.element.outer_html()
    }
}
