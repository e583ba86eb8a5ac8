use crate::block::Block;
use crate::dom::{Element, Node};
use crate::search::{no_results_panel, CardText, SearchableCardSet};

use super::entry::VideoEntry;
use super::render::{self, GRID_CLASS};

#[derive(Debug, Clone)]
struct Card {
    title: String,
    channel: String,
    element: Element,
    hidden: bool,
}

/// Rendered, searchable video grid.
#[derive(Debug, Clone)]
pub struct ThumbnailGrid {
    cards: Vec<Card>,
    no_results: Option<String>,
}

impl ThumbnailGrid {
    pub fn new(entries: &[VideoEntry]) -> Self {
        let cards = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| Card {
                title: entry.title.to_lowercase(),
                channel: entry.channel.to_lowercase(),
                element: render::card(i, entry),
                hidden: false,
            })
            .collect();
        Self {
            cards,
            no_results: None,
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn visible_count(&self) -> usize {
        self.cards.iter().filter(|c| !c.hidden).count()
    }

    pub fn is_visible(&self, index: usize) -> bool {
        self.cards.get(index).is_some_and(|c| !c.hidden)
    }

    /// Query shown in the current "no results" panel, if any.
    pub fn no_results_query(&self) -> Option<&str> {
        self.no_results.as_deref()
    }

    /// Block content: the optional "no results" panel followed by the grid.
    pub fn render(&self) -> Vec<Node> {
        let cards = self.cards.iter().map(|card| {
            let mut el = card.element.clone();
            if card.hidden {
                el.set_style("display", "none");
            }
            el
        });
        let grid = Element::new("div")
            .with_class(GRID_CLASS)
            .with_children(cards);
        let mut nodes = Vec::with_capacity(2);
        if let Some(query) = &self.no_results {
            nodes.push(Node::Element(no_results_panel(query)));
        }
        nodes.push(Node::Element(grid));
        nodes
    }

    pub fn render_into(&self, block: &mut Block) {
        block.replace_content(self.render());
    }
}

impl SearchableCardSet for ThumbnailGrid {
    fn filter(&mut self, keep: &dyn Fn(CardText<'_>) -> bool) -> usize {
        for card in &mut self.cards {
            card.hidden = !keep(CardText {
                title: &card.title,
                channel: &card.channel,
            });
        }
        self.visible_count()
    }

    fn reset(&mut self) {
        for card in &mut self.cards {
            card.hidden = false;
        }
    }

    fn show_no_results(&mut self, query: &str) {
        self.no_results = Some(query.to_string());
    }

    fn clear_no_results(&mut self) {
        self.no_results = None;
    }
}
