use crate::block::Block;
use crate::dom::{parse_nodes, Element, Node};

use super::menu::{Branding, MenuItem};

pub const WRAPPER_CLASS: &str = "header-wrapper";
pub const HAMBURGER_CLASS: &str = "hamburger-menu";
pub const OVERLAY_CLASS: &str = "sidebar-overlay";
pub const POPUP_CLASS: &str = "mobile-search-popup";
pub const SEARCH_INPUT_CLASS: &str = "search-input";
pub const MOBILE_SEARCH_INPUT_CLASS: &str = "mobile-search-input";
pub const DARK_TOGGLE_CLASS: &str = "dark-mode-toggle";

const SEARCH_ICON: &str = concat!(
    "<svg ",
    r#"xmlns="http://www.w3.org/2000/svg" width="24" height="24" viewBox="0 0 24 24" "#,
    r#"fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" "#,
    r#"stroke-linejoin="round">"#,
    r#"<circle cx="11" cy="11" r="8"></circle><path d="m21 21-4.35-4.35"></path></svg>"#,
);
const SUN_ICON: &str = concat!(
    r#"<svg class="icon-light" "#,
    r#"xmlns="http://www.w3.org/2000/svg" width="24" height="24" viewBox="0 0 24 24" "#,
    r#"fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" "#,
    r#"stroke-linejoin="round">"#,
    r#"<circle cx="12" cy="12" r="5"></circle>"#,
    r#"<line x1="12" y1="1" x2="12" y2="3"></line>"#,
    r#"<line x1="12" y1="21" x2="12" y2="23"></line>"#,
    r#"<line x1="4.22" y1="4.22" x2="5.64" y2="5.64"></line>"#,
    r#"<line x1="18.36" y1="18.36" x2="19.78" y2="19.78"></line>"#,
    r#"<line x1="1" y1="12" x2="3" y2="12"></line>"#,
    r#"<line x1="21" y1="12" x2="23" y2="12"></line>"#,
    r#"<line x1="4.22" y1="19.78" x2="5.64" y2="18.36"></line>"#,
    r#"<line x1="18.36" y1="5.64" x2="19.78" y2="4.22"></line></svg>"#,
);
const MOON_ICON: &str = concat!(
    r#"<svg class="icon-dark" "#,
    r#"xmlns="http://www.w3.org/2000/svg" width="24" height="24" viewBox="0 0 24 24" "#,
    r#"fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" "#,
    r#"stroke-linejoin="round">"#,
    r#"<path d="M21 12.79A9 9 0 1 1 11.21 3 7 7 0 0 0 21 12.79z"></path></svg>"#,
);
const BACK_ICON: &str = concat!(
    "<svg ",
    r#"xmlns="http://www.w3.org/2000/svg" width="24" height="24" viewBox="0 0 24 24" "#,
    r#"fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" "#,
    r#"stroke-linejoin="round">"#,
    r#"<path d="M19 12H5M12 19l-7-7 7-7"></path></svg>"#,
);

const LOGO_TEXT_STYLE: &str = "font-size: 24px; font-weight: bold; color: #ff0000;";

/// Replace the block with the full header: top nav, mobile search popup,
/// sidebar menu and its overlay.
pub fn render(block: &mut Block, branding: &Branding, menu: &[MenuItem]) {
    block.element.set_attr("class", WRAPPER_CLASS);
    block.element.set_attr("aria-expanded", "false");
    block.replace_content(vec![
        top_nav(branding).into(),
        mobile_search_popup().into(),
        sidebar(menu).into(),
        Element::new("div").with_class(OVERLAY_CLASS).into(),
    ]);
}

fn top_nav(branding: &Branding) -> Element {
    let logo: Node = match &branding.logo {
        Some(src) => Element::new("img")
            .with_attr("src", src.as_str())
            .with_attr("alt", "VidTube Logo")
            .into(),
        None => Element::new("span")
            .with_attr("style", LOGO_TEXT_STYLE)
            .with_text("VidTube")
            .into(),
    };
    let avatar: Node = match &branding.avatar {
        Some(src) => Element::new("img")
            .with_attr("src", src.as_str())
            .with_attr("alt", "Profile")
            .into(),
        None => Element::new("span")
            .with_class("avatar-letter")
            .with_text("U")
            .into(),
    };

    let left = Element::new("div")
        .with_class("nav-left")
        .with_child(
            Element::new("button")
                .with_class(HAMBURGER_CLASS)
                .with_attr("aria-label", "Toggle menu")
                .with_attr("aria-expanded", "false")
                .with_child(Element::new("span").with_class("hamburger-icon")),
        )
        .with_child(
            Element::new("a")
                .with_attr("href", "/")
                .with_class("nav-logo")
                .with_child(logo),
        );

    let center = Element::new("div")
        .with_class("nav-center")
        .with_child(search_form(
            "search-form",
            SEARCH_INPUT_CLASS,
            Element::new("button")
                .with_attr("type", "submit")
                .with_class("search-button")
                .with_attr("aria-label", "Search"),
        ));

    let right = Element::new("div")
        .with_class("nav-right")
        .with_child(
            Element::new("button")
                .with_class("mobile-search-icon")
                .with_attr("aria-label", "Search")
                .with_children(parse_nodes(SEARCH_ICON)),
        )
        .with_child(
            Element::new("button")
                .with_class(DARK_TOGGLE_CLASS)
                .with_attr("aria-label", "Toggle dark mode")
                .with_children(parse_nodes(SUN_ICON))
                .with_children(parse_nodes(MOON_ICON)),
        )
        .with_child(
            Element::new("a")
                .with_attr("href", "/profile")
                .with_class("profile-avatar")
                .with_attr("aria-label", "Profile")
                .with_child(avatar),
        );

    Element::new("nav")
        .with_class("header-nav")
        .with_child(left)
        .with_child(center)
        .with_child(right)
}

fn search_form(form_class: &str, input_class: &str, submit: Element) -> Element {
    let mut icon = parse_nodes(SEARCH_ICON);
    if form_class == "search-form" {
        if let Some(svg) = icon.iter_mut().find_map(Node::as_element_mut) {
            svg.add_class("search-icon");
        }
    }
    Element::new("form")
        .with_class(form_class)
        .with_attr("role", "search")
        .with_child(
            Element::new("input")
                .with_attr("type", "search")
                .with_class(input_class)
                .with_attr("placeholder", "Search...")
                .with_attr("aria-label", "Search")
                .with_attr("autocomplete", "off"),
        )
        .with_child(submit.with_children(icon))
}

fn mobile_search_popup() -> Element {
    Element::new("div")
        .with_class(POPUP_CLASS)
        .with_child(
            Element::new("button")
                .with_class("mobile-search-back")
                .with_attr("aria-label", "Close search")
                .with_children(parse_nodes(BACK_ICON)),
        )
        .with_child(search_form(
            "mobile-search-form",
            MOBILE_SEARCH_INPUT_CLASS,
            Element::new("button")
                .with_attr("type", "submit")
                .with_class("mobile-search-submit")
                .with_attr("aria-label", "Search"),
        ))
}

fn sidebar(menu: &[MenuItem]) -> Element {
    let nav = Element::new("nav")
        .with_class("sidebar-nav")
        .with_children(menu.iter().map(menu_item));
    Element::new("aside")
        .with_class("sidebar-menu")
        .with_child(nav)
}

fn menu_item(item: &MenuItem) -> Element {
    let mut link = Element::new("a")
        .with_attr("href", item.href.as_str())
        .with_class("menu-item");
    if let Some(icon) = &item.icon {
        link = link.with_child(
            Element::new("img")
                .with_attr("src", icon.as_str())
                .with_attr("alt", item.label.as_str())
                .with_class("menu-icon"),
        );
    }
    link.with_child(
        Element::new("span")
            .with_class("menu-label")
            .with_text(&item.label),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::menu::fallback_menu;

    #[test]
    fn renders_branding_images_and_menu() {
        let mut block = Block::from_html("header", "<div>authored</div>");
        let branding = Branding {
            logo: Some("/logo.png".into()),
            avatar: Some("/me.png".into()),
        };
        render(&mut block, &branding, &[MenuItem::new("/home.svg", "Home", "/")]);

        let el = &block.element;
        assert_eq!(el.attr("class"), Some(WRAPPER_CLASS));
        assert_eq!(el.attr("aria-expanded"), Some("false"));
        assert_eq!(el.element_children().count(), 4);
        let logo = el.find_class("nav-logo").unwrap().find_tag("img").unwrap();
        assert_eq!(logo.attr("alt"), Some("VidTube Logo"));
        let avatar = el.find_class("profile-avatar").unwrap().find_tag("img").unwrap();
        assert_eq!(avatar.attr("src"), Some("/me.png"));
        let item = el.find_class("menu-item").unwrap();
        assert_eq!(item.find_class("menu-icon").unwrap().attr("alt"), Some("Home"));
        assert!(el.find_class("search-icon").is_some());
        assert!(el.find_class(MOBILE_SEARCH_INPUT_CLASS).is_some());
        assert!(!el.text_content().contains("authored"));
    }

    #[test]
    fn missing_branding_uses_text_placeholders() {
        let mut block = Block::from_html("header", "");
        render(&mut block, &Branding::default(), &fallback_menu());
        let el = &block.element;
        assert_eq!(el.find_class("nav-logo").unwrap().text_content(), "VidTube");
        assert_eq!(el.find_class("avatar-letter").unwrap().text_content(), "U");
        let labels: Vec<_> = el
            .find_all(|e| e.has_class("menu-label"))
            .iter()
            .map(|e| e.text_content())
            .collect();
        assert_eq!(labels, vec!["Home", "Shorts"]);
        assert!(el.find_class("menu-icon").is_none());
    }
}
