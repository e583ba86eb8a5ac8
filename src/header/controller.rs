//! Interactive behaviour of a rendered header, as a state machine over
//! explicit events.

use tracing::debug;

use crate::block::Block;
use crate::search::{apply_search, SearchOutcome, SearchableCardSet};
use crate::session::UiSession;

use super::render::{
    DARK_TOGGLE_CLASS, HAMBURGER_CLASS, MOBILE_SEARCH_INPUT_CLASS, OVERLAY_CLASS, POPUP_CLASS,
    SEARCH_INPUT_CLASS,
};

const ACTIVE_CLASS: &str = "active";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expansion {
    Collapsed,
    Expanded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupState {
    Closed,
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchSurface {
    Desktop,
    Mobile,
}

impl SearchSurface {
    fn input_class(&self) -> &'static str {
        match self {
            SearchSurface::Desktop => SEARCH_INPUT_CLASS,
            SearchSurface::Mobile => MOBILE_SEARCH_INPUT_CLASS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    HamburgerClick,
    OverlayClick,
    KeyDown(String),
    Resize(u32),
    DarkModeToggle,
    /// The text of a search box changed.
    SearchInput { surface: SearchSurface, value: String },
    SearchSubmit(SearchSurface),
    MobileSearchOpen,
    MobileSearchBack,
}

#[derive(Debug, Clone)]
pub struct HeaderController {
    expansion: Expansion,
    popup: PopupState,
    focused: Option<SearchSurface>,
    desktop_breakpoint: u32,
}

impl HeaderController {
    pub fn new(desktop_breakpoint: u32) -> Self {
        Self {
            expansion: Expansion::Collapsed,
            popup: PopupState::Closed,
            focused: None,
            desktop_breakpoint,
        }
    }

    pub fn expansion(&self) -> Expansion {
        self.expansion
    }

    pub fn popup(&self) -> PopupState {
        self.popup
    }

    pub fn focused(&self) -> Option<SearchSurface> {
        self.focused
    }

    fn is_desktop(&self, width: u32) -> bool {
        width >= self.desktop_breakpoint
    }

    /// Apply one event to the header markup, the session and the searchable
    /// cards. Returns the search outcome when the event ran or reset a search.
    pub fn handle(
        &mut self,
        event: UiEvent,
        block: &mut Block,
        session: &mut UiSession,
        cards: &mut dyn SearchableCardSet,
    ) -> Option<SearchOutcome> {
        debug!(?event, "header event");
        match event {
            UiEvent::HamburgerClick => {
                let expanded = self.expansion == Expansion::Collapsed;
                self.set_expansion(block, expanded);
                if !self.is_desktop(session.viewport_width) {
                    session.set_scroll_locked(expanded);
                }
                None
            }
            UiEvent::OverlayClick => {
                self.set_expansion(block, false);
                session.set_scroll_locked(false);
                None
            }
            UiEvent::KeyDown(key) if key == "Escape" => {
                let outcome = match self.popup {
                    PopupState::Open => Some(self.close_popup(block, cards)),
                    PopupState::Closed => None,
                };
                if self.expansion == Expansion::Expanded {
                    self.set_expansion(block, false);
                    if !self.is_desktop(session.viewport_width) {
                        session.set_scroll_locked(false);
                    }
                }
                outcome
            }
            UiEvent::KeyDown(_) => None,
            UiEvent::Resize(width) => {
                session.viewport_width = width;
                let desktop = self.is_desktop(width);
                if let Some(overlay) = block.element.find_class_mut(OVERLAY_CLASS) {
                    overlay.set_style("display", if desktop { "none" } else { "" });
                }
                if !desktop {
                    return None;
                }
                session.set_scroll_locked(false);
                match self.popup {
                    PopupState::Open => Some(self.close_popup(block, cards)),
                    PopupState::Closed => None,
                }
            }
            UiEvent::DarkModeToggle => {
                let theme = session.toggle_theme();
                if let Some(toggle) = block.element.find_class_mut(DARK_TOGGLE_CLASS) {
                    let label = if theme.is_dark() {
                        "Switch to light mode"
                    } else {
                        "Switch to dark mode"
                    };
                    toggle.set_attr("aria-label", label);
                }
                None
            }
            UiEvent::SearchInput { surface, value } => {
                if let Some(input) = block.element.find_class_mut(surface.input_class()) {
                    input.set_attr("value", value.as_str());
                }
                Some(apply_search(cards, &value))
            }
            UiEvent::SearchSubmit(surface) => {
                let value = block
                    .element
                    .find_class(surface.input_class())
                    .and_then(|input| input.attr("value"))
                    .unwrap_or_default()
                    .to_string();
                Some(apply_search(cards, &value))
            }
            UiEvent::MobileSearchOpen => {
                self.popup = PopupState::Open;
                self.focused = Some(SearchSurface::Mobile);
                if let Some(popup) = block.element.find_class_mut(POPUP_CLASS) {
                    popup.add_class(ACTIVE_CLASS);
                }
                None
            }
            UiEvent::MobileSearchBack => Some(self.close_popup(block, cards)),
        }
    }

    fn set_expansion(&mut self, block: &mut Block, expanded: bool) {
        self.expansion = if expanded {
            Expansion::Expanded
        } else {
            Expansion::Collapsed
        };
        let value = if expanded { "true" } else { "false" };
        block.element.set_attr("aria-expanded", value);
        if let Some(hamburger) = block.element.find_class_mut(HAMBURGER_CLASS) {
            hamburger.set_attr("aria-expanded", value);
        }
    }

    /// Close the popup, empty its input and show every card again.
    fn close_popup(
        &mut self,
        block: &mut Block,
        cards: &mut dyn SearchableCardSet,
    ) -> SearchOutcome {
        self.popup = PopupState::Closed;
        if self.focused == Some(SearchSurface::Mobile) {
            self.focused = None;
        }
        if let Some(popup) = block.element.find_class_mut(POPUP_CLASS) {
            popup.remove_class(ACTIVE_CLASS);
        }
        if let Some(input) = block.element.find_class_mut(MOBILE_SEARCH_INPUT_CLASS) {
            input.remove_attr("value");
        }
        cards.reset();
        cards.clear_no_results();
        SearchOutcome::Cleared
    }
}
