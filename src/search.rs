//! Client-side card filtering shared by the header's search inputs and the
//! thumbnail grid.

use crate::dom::Element;

pub const NO_RESULTS_CLASS: &str = "no-results-message";

const NO_RESULTS_ICON: &str = concat!(
    r#"<svg xmlns="http://www.w3.org/2000/svg" width="120" height="120" viewBox="0 0 24 24" "#,
    r#"fill="none" stroke="currentColor" stroke-width="1" stroke-linecap="round" "#,
    r#"stroke-linejoin="round"><circle cx="11" cy="11" r="8"></circle>"#,
    r#"<path d="m21 21-4.35-4.35"></path><line x1="11" y1="8" x2="11" y2="14"></line>"#,
    r#"<line x1="11" y1="16" x2="11.01" y2="16"></line></svg>"#,
);

/// Searchable text of one card, already lowercased.
#[derive(Debug, Clone, Copy)]
pub struct CardText<'a> {
    pub title: &'a str,
    pub channel: &'a str,
}

/// A set of rendered cards that a search box can narrow down.
pub trait SearchableCardSet {
    /// Show the cards `keep` accepts, hide the others. Returns the visible count.
    fn filter(&mut self, keep: &dyn Fn(CardText<'_>) -> bool) -> usize;
    /// Show every card.
    fn reset(&mut self);
    /// Put a "no results" panel for `query` in front of the cards, replacing
    /// any earlier one.
    fn show_no_results(&mut self, query: &str);
    fn clear_no_results(&mut self);
}

/// Several grids on one page search together; the first one hosts the panel.
impl<T: SearchableCardSet> SearchableCardSet for Vec<T> {
    fn filter(&mut self, keep: &dyn Fn(CardText<'_>) -> bool) -> usize {
        self.iter_mut().map(|set| set.filter(keep)).sum()
    }

    fn reset(&mut self) {
        self.iter_mut().for_each(|set| set.reset());
    }

    fn show_no_results(&mut self, query: &str) {
        if let Some(first) = self.first_mut() {
            first.show_no_results(query);
        }
    }

    fn clear_no_results(&mut self) {
        self.iter_mut().for_each(|set| set.clear_no_results());
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Empty query: everything visible again.
    Cleared,
    Filtered { query: String, visible: usize },
}

pub fn normalize_query(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Run one search pass over `cards`.
pub fn apply_search(cards: &mut dyn SearchableCardSet, raw: &str) -> SearchOutcome {
    let query = normalize_query(raw);
    if query.is_empty() {
        cards.reset();
        cards.clear_no_results();
        return SearchOutcome::Cleared;
    }
    let needle = query.as_str();
    let visible = cards.filter(&|card| {
        card.title.contains(needle) || card.channel.contains(needle)
    });
    if visible == 0 {
        cards.show_no_results(&query);
    } else {
        cards.clear_no_results();
    }
    SearchOutcome::Filtered { query, visible }
}

/// The panel shown in front of a grid when a search matches nothing.
pub fn no_results_panel(query: &str) -> Element {
    let content = Element::new("div")
        .with_class("no-results-content")
        .with_children(crate::dom::parse_nodes(NO_RESULTS_ICON))
        .with_child(Element::new("h2").with_text("No videos found"))
        .with_child(Element::new("p").with_text("Try different keywords or check your spelling"))
        .with_child(
            Element::new("p")
                .with_class("search-query")
                .with_text("Searched for: \"")
                .with_child(Element::new("strong").with_text(query))
                .with_text("\""),
        );
    Element::new("div").with_class(NO_RESULTS_CLASS).with_child(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Cards {
        items: Vec<(String, String, bool)>,
        panel: Option<String>,
    }

    impl Cards {
        fn with(items: &[(&str, &str)]) -> Self {
            Self {
                items: items
                    .iter()
                    .map(|(t, c)| (t.to_lowercase(), c.to_lowercase(), true))
                    .collect(),
                panel: None,
            }
        }
    }

    impl SearchableCardSet for Cards {
        fn filter(&mut self, keep: &dyn Fn(CardText<'_>) -> bool) -> usize {
            for (title, channel, visible) in &mut self.items {
                *visible = keep(CardText {
                    title: title.as_str(),
                    channel: channel.as_str(),
                });
            }
            self.items.iter().filter(|(_, _, v)| *v).count()
        }

        fn reset(&mut self) {
            self.items.iter_mut().for_each(|i| i.2 = true);
        }

        fn show_no_results(&mut self, query: &str) {
            self.panel = Some(query.to_string());
        }

        fn clear_no_results(&mut self) {
            self.panel = None;
        }
    }

    #[test]
    fn matches_title_or_channel_case_insensitively() {
        let mut cards = Cards::with(&[("ABC Tutorial", "X"), ("Other", "Y")]);
        let outcome = apply_search(&mut cards, "  abc ");
        assert_eq!(
            outcome,
            SearchOutcome::Filtered {
                query: "abc".into(),
                visible: 1
            }
        );
        assert!(cards.items[0].2);
        assert!(!cards.items[1].2);
        assert!(cards.panel.is_none());

        apply_search(&mut cards, "y");
        assert!(!cards.items[0].2);
        assert!(cards.items[1].2);
    }

    #[test]
    fn no_match_shows_panel_and_clear_restores_everything() {
        let mut cards = Cards::with(&[("One", "A"), ("Two", "B")]);
        apply_search(&mut cards, "Zebra");
        assert_eq!(cards.panel.as_deref(), Some("zebra"));
        assert!(cards.items.iter().all(|i| !i.2));

        assert_eq!(apply_search(&mut cards, "   "), SearchOutcome::Cleared);
        assert!(cards.panel.is_none());
        assert!(cards.items.iter().all(|i| i.2));
    }

    #[test]
    fn grouped_sets_share_one_panel() {
        let mut sets = vec![Cards::with(&[("One", "A")]), Cards::with(&[("Two", "B")])];
        assert_eq!(
            apply_search(&mut sets, "two"),
            SearchOutcome::Filtered {
                query: "two".into(),
                visible: 1
            }
        );
        apply_search(&mut sets, "nothing");
        assert_eq!(sets[0].panel.as_deref(), Some("nothing"));
        assert!(sets[1].panel.is_none());
    }

    #[test]
    fn panel_quotes_the_query() {
        let panel = no_results_panel("cats <3");
        assert!(panel.has_class(NO_RESULTS_CLASS));
        assert_eq!(panel.find_tag("strong").unwrap().text_content(), "cats <3");
        assert!(panel.outer_html().contains("cats &lt;3"));
    }
}
