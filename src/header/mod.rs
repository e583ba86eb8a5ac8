//! Site header: branding and menu pulled from the nav fragment, a responsive
//! top bar with search and dark mode, and the sidebar menu.

pub mod controller;
pub mod menu;
pub mod render;

pub use controller::{Expansion, HeaderController, PopupState, SearchSurface, UiEvent};
pub use menu::{Branding, MenuItem, MenuSource};

use tracing::{debug, info, warn};

use crate::block::Block;
use crate::config::SiteConfig;
use crate::diagnostics::Report;
use crate::dom::{Element, FRAGMENT_ROOT};
use crate::fragment::{resolve_nav_path, FragmentLoader};
use crate::page::Page;
use crate::session::UiSession;

#[derive(Debug, Clone)]
pub struct HeaderDecoration {
    pub controller: HeaderController,
    pub branding: Branding,
    pub menu: Vec<MenuItem>,
    pub menu_source: MenuSource,
    pub nav_path: String,
    pub report: Report,
}

/// Load the nav fragment, render the header into `block` and return the
/// controller that drives it.
///
/// A fragment that fails to load is treated as empty: the header still
/// renders, with placeholder branding and the fallback menu.
pub async fn decorate(
    block: &mut Block,
    session: &mut UiSession,
    page: &Page,
    loader: &dyn FragmentLoader,
    config: &SiteConfig,
) -> HeaderDecoration {
    let mut report = Report::default();
    let theme = session.init_theme();
    debug!(%theme, "theme initialized");

    let nav_meta = page.metadata("nav");
    let nav_path = resolve_nav_path(nav_meta.as_deref(), &page.url, &config.default_nav_path);
    let fragment = match loader.load(&nav_path).await {
        Ok(fragment) => fragment,
        Err(e) => {
            warn!(path = %nav_path, error = %e, "failed to load nav fragment");
            report.degraded("nav fragment", format!("{nav_path}: {e:#}"));
            Element::new(FRAGMENT_ROOT)
        }
    };
    debug!(html = %fragment.inner_html(), "nav fragment");

    let branding = Branding::from_fragment(&fragment);
    if branding.logo.is_none() {
        report.defaulted("logo", "VidTube");
    }
    if branding.avatar.is_none() {
        report.defaulted("avatar", "U");
    }
    let (menu, menu_source) = menu::extract_menu(&fragment, &branding, &mut report);
    info!(items = menu.len(), source = ?menu_source, "header menu");

    render::render(block, &branding, &menu);
    HeaderDecoration {
        controller: HeaderController::new(config.desktop_breakpoint),
        branding,
        menu,
        menu_source,
        nav_path,
        report,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use url::Url;

    use super::*;
    use crate::fragment::StaticFragmentLoader;
    use crate::search::{SearchOutcome, NO_RESULTS_CLASS};
    use crate::session::ThemePreference;
    use crate::storage::{MemoryStore, PreferenceStore};
    use crate::thumbnails::{self, ThumbnailGrid};

    const NAV: &str = r#"<div>
        <p><img src="/logo.png"></p><p><img src="/me.png"></p>
        <table>
          <tr><td><img src="/home.svg"></td><td>Home</td><td>/</td></tr>
          <tr><td><img src="/shorts.svg"></td><td>Shorts</td>
              <td><a href="/shorts">Shorts</a></td></tr>
        </table>
      </div>"#;

    fn page() -> Page {
        Page::new(Url::parse("https://example.com/").unwrap())
    }

    fn session(store: Arc<MemoryStore>, width: u32, prefers_dark: bool) -> UiSession {
        UiSession::new(store, "theme", width, prefers_dark)
    }

    fn grid(items: &[(&str, &str)]) -> ThumbnailGrid {
        let rows: String = items
            .iter()
            .map(|(t, c)| {
                format!(r#"<div><div><img src="t.jpg"></div><div>{t}</div><div>{c}</div></div>"#)
            })
            .collect();
        let mut block = Block::from_html("thumbnails", &rows);
        thumbnails::decorate(&mut block).grid.expect("grid")
    }

    /// Header decorated from `NAV` on the default page.
    async fn header(block: &mut Block, s: &mut UiSession) -> HeaderDecoration {
        let loader = StaticFragmentLoader::default().with("/nav", NAV);
        decorate(block, s, &page(), &loader, &SiteConfig::default()).await
    }

    fn mobile_input(value: &str) -> UiEvent {
        UiEvent::SearchInput {
            surface: SearchSurface::Mobile,
            value: value.into(),
        }
    }

    fn filtered(query: &str, visible: usize) -> Option<SearchOutcome> {
        Some(SearchOutcome::Filtered {
            query: query.into(),
            visible,
        })
    }

    fn class_attr<'a>(block: &'a Block, class: &str, attr: &str) -> Option<&'a str> {
        block.element.find_class(class).and_then(|e| e.attr(attr))
    }

    #[tokio::test]
    async fn decorates_from_table_fragment() {
        let mut block = Block::from_html("header", "");
        let mut s = session(Arc::new(MemoryStore::default()), 1280, false);
        let out = header(&mut block, &mut s).await;

        assert_eq!(out.nav_path, "/nav");
        assert_eq!(out.menu_source, MenuSource::Table);
        let labels: Vec<_> = out.menu.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(labels, vec!["Home", "Shorts"]);
        assert_eq!(out.menu[1].href, "/shorts");
        assert_eq!(out.branding.logo.as_deref(), Some("/logo.png"));
        assert!(out.report.is_clean());
        assert!(block.element.has_class("header-wrapper"));
    }

    #[tokio::test]
    async fn nav_metadata_selects_fragment() {
        let loader = StaticFragmentLoader::default().with("/alt/nav", NAV);
        let page = page().with_metadata("nav", "/alt/nav");
        let mut block = Block::from_html("header", "");
        let mut s = session(Arc::new(MemoryStore::default()), 1280, false);
        let out = decorate(&mut block, &mut s, &page, &loader, &SiteConfig::default()).await;
        assert_eq!(out.nav_path, "/alt/nav");
        assert_eq!(out.menu_source, MenuSource::Table);
    }

    #[tokio::test]
    async fn failed_fragment_load_renders_fallback_header() {
        let loader = StaticFragmentLoader::default();
        let mut block = Block::from_html("header", "");
        let mut s = session(Arc::new(MemoryStore::default()), 1280, false);
        let out = decorate(&mut block, &mut s, &page(), &loader, &SiteConfig::default()).await;

        assert_eq!(out.menu_source, MenuSource::Fallback);
        assert_eq!(out.branding, Branding::default());
        assert!(out.report.was_defaulted("logo"));
        let logo = block.element.find_class("nav-logo").unwrap();
        assert_eq!(logo.text_content(), "VidTube");
        assert_eq!(block.element.find_all(|e| e.has_class("menu-item")).len(), 2);
    }

    #[tokio::test]
    async fn hamburger_overlay_and_escape_drive_expansion() {
        let mut block = Block::from_html("header", "");
        let mut s = session(Arc::new(MemoryStore::default()), 600, false);
        let mut out = header(&mut block, &mut s).await;
        let mut cards = grid(&[("One", "A")]);
        let ctl = &mut out.controller;

        ctl.handle(UiEvent::HamburgerClick, &mut block, &mut s, &mut cards);
        assert_eq!(ctl.expansion(), Expansion::Expanded);
        assert_eq!(block.element.attr("aria-expanded"), Some("true"));
        assert_eq!(class_attr(&block, "hamburger-menu", "aria-expanded"), Some("true"));
        assert!(s.scroll_locked());

        ctl.handle(UiEvent::OverlayClick, &mut block, &mut s, &mut cards);
        assert_eq!(ctl.expansion(), Expansion::Collapsed);
        assert!(!s.scroll_locked());

        ctl.handle(UiEvent::HamburgerClick, &mut block, &mut s, &mut cards);
        ctl.handle(UiEvent::KeyDown("Enter".into()), &mut block, &mut s, &mut cards);
        assert_eq!(ctl.expansion(), Expansion::Expanded);
        ctl.handle(UiEvent::KeyDown("Escape".into()), &mut block, &mut s, &mut cards);
        assert_eq!(ctl.expansion(), Expansion::Collapsed);
        assert_eq!(block.element.attr("aria-expanded"), Some("false"));
        assert!(!s.scroll_locked());
    }

    #[tokio::test]
    async fn scroll_lock_only_below_breakpoint_and_cleared_on_resize() {
        let mut block = Block::from_html("header", "");
        let mut s = session(Arc::new(MemoryStore::default()), 1280, false);
        let mut out = header(&mut block, &mut s).await;
        let mut cards = grid(&[("One", "A")]);
        let ctl = &mut out.controller;

        ctl.handle(UiEvent::HamburgerClick, &mut block, &mut s, &mut cards);
        assert!(!s.scroll_locked());

        ctl.handle(UiEvent::Resize(500), &mut block, &mut s, &mut cards);
        ctl.handle(UiEvent::HamburgerClick, &mut block, &mut s, &mut cards);
        ctl.handle(UiEvent::HamburgerClick, &mut block, &mut s, &mut cards);
        assert!(s.scroll_locked());
        assert_eq!(class_attr(&block, "sidebar-overlay", "style"), None);

        ctl.handle(UiEvent::Resize(1000), &mut block, &mut s, &mut cards);
        assert!(!s.scroll_locked());
        assert_eq!(ctl.expansion(), Expansion::Expanded);
        let overlay = block.element.find_class("sidebar-overlay").unwrap();
        assert_eq!(overlay.style("display").as_deref(), Some("none"));
    }

    #[tokio::test]
    async fn breakpoint_width_counts_as_desktop() {
        let store = Arc::new(MemoryStore::default());
        let mut cards = grid(&[("One", "A")]);

        let mut block = Block::from_html("header", "");
        let mut s = session(store.clone(), 900, false);
        let mut out = header(&mut block, &mut s).await;
        out.controller
            .handle(UiEvent::HamburgerClick, &mut block, &mut s, &mut cards);
        assert_eq!(out.controller.expansion(), Expansion::Expanded);
        assert!(!s.scroll_locked());

        let mut block = Block::from_html("header", "");
        let mut s = session(store, 899, false);
        let mut out = header(&mut block, &mut s).await;
        out.controller
            .handle(UiEvent::HamburgerClick, &mut block, &mut s, &mut cards);
        assert!(s.scroll_locked());
    }

    #[tokio::test]
    async fn header_search_filters_grid() {
        let mut block = Block::from_html("header", "");
        let mut s = session(Arc::new(MemoryStore::default()), 1280, false);
        let mut out = header(&mut block, &mut s).await;
        let mut cards = grid(&[("ABC Tutorial", "X"), ("Other", "Y")]);
        let ctl = &mut out.controller;

        let event = UiEvent::SearchInput {
            surface: SearchSurface::Desktop,
            value: "  abc ".into(),
        };
        let outcome = ctl.handle(event, &mut block, &mut s, &mut cards);
        assert_eq!(outcome, filtered("abc", 1));
        assert!(cards.is_visible(0));
        assert!(!cards.is_visible(1));
        assert!(cards.no_results_query().is_none());
        assert_eq!(class_attr(&block, "search-input", "value"), Some("  abc "));

        let submit = UiEvent::SearchSubmit(SearchSurface::Desktop);
        let outcome = ctl.handle(submit, &mut block, &mut s, &mut cards);
        assert_eq!(outcome, filtered("abc", 1));
    }

    #[tokio::test]
    async fn closing_mobile_search_resets_filter() {
        let mut block = Block::from_html("header", "");
        let mut s = session(Arc::new(MemoryStore::default()), 400, false);
        let mut out = header(&mut block, &mut s).await;
        let mut cards = grid(&[("One", "A"), ("Two", "B")]);
        let ctl = &mut out.controller;

        ctl.handle(UiEvent::MobileSearchOpen, &mut block, &mut s, &mut cards);
        assert_eq!(ctl.popup(), PopupState::Open);
        assert_eq!(ctl.focused(), Some(SearchSurface::Mobile));
        let popup = block.element.find_class("mobile-search-popup").unwrap();
        assert!(popup.has_class("active"));

        ctl.handle(mobile_input("zzz"), &mut block, &mut s, &mut cards);
        assert_eq!(cards.visible_count(), 0);
        assert_eq!(cards.no_results_query(), Some("zzz"));

        let outcome = ctl.handle(UiEvent::Resize(1200), &mut block, &mut s, &mut cards);
        assert_eq!(outcome, Some(SearchOutcome::Cleared));
        assert_popup_reset(ctl, &block, &cards);

        let mut grid_block = Block::from_html("thumbnails", "");
        cards.render_into(&mut grid_block);
        assert!(grid_block.element.find_class(NO_RESULTS_CLASS).is_none());
    }

    async fn open_popup_with_miss(
        block: &mut Block,
        s: &mut UiSession,
        cards: &mut ThumbnailGrid,
    ) -> HeaderController {
        let mut ctl = header(block, s).await.controller;
        ctl.handle(UiEvent::MobileSearchOpen, block, s, cards);
        ctl.handle(mobile_input("zzz"), block, s, cards);
        assert_eq!(cards.visible_count(), 0);
        assert_eq!(cards.no_results_query(), Some("zzz"));
        ctl
    }

    fn assert_popup_reset(ctl: &HeaderController, block: &Block, cards: &ThumbnailGrid) {
        assert_eq!(ctl.popup(), PopupState::Closed);
        let popup = block.element.find_class("mobile-search-popup").unwrap();
        assert!(!popup.has_class("active"));
        assert_eq!(class_attr(block, "mobile-search-input", "value"), None);
        assert_eq!(cards.visible_count(), cards.len());
        assert!(cards.no_results_query().is_none());
    }

    #[tokio::test]
    async fn back_button_closes_mobile_search() {
        let mut block = Block::from_html("header", "");
        let mut s = session(Arc::new(MemoryStore::default()), 400, false);
        let mut cards = grid(&[("One", "A"), ("Two", "B")]);
        let mut ctl = open_popup_with_miss(&mut block, &mut s, &mut cards).await;

        let outcome = ctl.handle(UiEvent::MobileSearchBack, &mut block, &mut s, &mut cards);
        assert_eq!(outcome, Some(SearchOutcome::Cleared));
        assert_popup_reset(&ctl, &block, &cards);
    }

    #[tokio::test]
    async fn escape_closes_mobile_search() {
        let mut block = Block::from_html("header", "");
        let mut s = session(Arc::new(MemoryStore::default()), 400, false);
        let mut cards = grid(&[("One", "A")]);
        let mut ctl = open_popup_with_miss(&mut block, &mut s, &mut cards).await;

        let escape = UiEvent::KeyDown("Escape".into());
        let outcome = ctl.handle(escape, &mut block, &mut s, &mut cards);
        assert_eq!(outcome, Some(SearchOutcome::Cleared));
        assert_popup_reset(&ctl, &block, &cards);
        assert_eq!(ctl.expansion(), Expansion::Collapsed);
    }

    #[tokio::test]
    async fn dark_mode_follows_os_then_persists_toggle() {
        let store = Arc::new(MemoryStore::default());
        let mut block = Block::from_html("header", "");
        let mut s = session(store.clone(), 1280, true);
        let mut out = header(&mut block, &mut s).await;
        assert!(s.is_dark());

        let mut cards = grid(&[("One", "A")]);
        out.controller
            .handle(UiEvent::DarkModeToggle, &mut block, &mut s, &mut cards);
        assert_eq!(s.theme(), ThemePreference::Light);
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("light"));
        assert_eq!(
            class_attr(&block, "dark-mode-toggle", "aria-label"),
            Some("Switch to dark mode")
        );
    }
}
