use crate::dom::Element;

use super::entry::{ImageRef, VideoEntry};

pub const GRID_CLASS: &str = "thumbnails-grid";
pub const CARD_CLASS: &str = "thumbnail-card";
pub const EMPTY_CLASS: &str = "thumbnails-empty";

const EMPTY_STYLE: &str =
    "padding: 40px; text-align: center; color: #ff0000; background: #fff3f3; border-radius: 8px;";

/// One `a.thumbnail-card` for `entry` at position `index`.
pub fn card(index: usize, entry: &VideoEntry) -> Element {
    let details = Element::new("div")
        .with_class("thumbnail-details")
        .with_child(
            Element::new("h3")
                .with_class("thumbnail-title")
                .with_text(&entry.title),
        )
        .with_child(
            Element::new("p")
                .with_class("thumbnail-channel")
                .with_text(&entry.channel),
        );
    let avatar_slot = Element::new("div")
        .with_class("thumbnail-avatar")
        .with_child(avatar(entry));
    let info = Element::new("div")
        .with_class("thumbnail-info")
        .with_child(avatar_slot)
        .with_child(details);
    let image_slot = Element::new("div")
        .with_class("thumbnail-image-wrapper")
        .with_child(thumbnail(entry));

    Element::new("a")
        .with_attr("href", entry.link.as_str())
        .with_class(CARD_CLASS)
        .with_attr("data-index", index.to_string())
        .with_attr("data-title", entry.title.to_lowercase())
        .with_attr("data-channel", entry.channel.to_lowercase())
        .with_child(image_slot)
        .with_child(info)
}

fn thumbnail(entry: &VideoEntry) -> Element {
    match &entry.thumbnail {
        ImageRef::Picture(p) => p.clone(),
        ImageRef::Image { src } => Element::new("img")
            .with_attr("src", src.as_str())
            .with_attr("alt", entry.title.as_str())
            .with_attr("loading", "lazy"),
    }
}

fn avatar(entry: &VideoEntry) -> Element {
    match &entry.avatar {
        Some(ImageRef::Picture(p)) => p.clone(),
        Some(ImageRef::Image { src }) => Element::new("img")
            .with_attr("src", src.as_str())
            .with_attr("alt", entry.channel.as_str())
            .with_class("avatar-image"),
        None => Element::new("span")
            .with_class("avatar-circle")
            .with_text(&avatar_letter(&entry.channel)),
    }
}

/// Uppercased first character of the channel name.
pub fn avatar_letter(channel: &str) -> String {
    channel
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default()
}

/// Static panel shown instead of a grid when no video could be parsed.
pub fn empty_panel() -> Element {
    Element::new("div")
        .with_class(EMPTY_CLASS)
        .with_attr("style", EMPTY_STYLE)
        .with_child(Element::new("h3").with_text("⚠️ No videos found"))
        .with_child(Element::new("p").with_text(
            "Expected structure: Thumbnail | Avatar | Title | Channel (4 columns)",
        ))
        .with_child(Element::new("p").with_text("Or: Thumbnail | Title | Channel (3 columns)"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(avatar: Option<ImageRef>) -> VideoEntry {
        VideoEntry {
            thumbnail: ImageRef::Image { src: "t.jpg".into() },
            title: "Rust In Ten Minutes".into(),
            channel: "ferris".into(),
            link: "/watch/1".into(),
            avatar,
        }
    }

    #[test]
    fn card_carries_lowercased_search_attributes() {
        let card = card(3, &entry(None));
        assert!(card.has_class(CARD_CLASS));
        assert_eq!(card.attr("href"), Some("/watch/1"));
        assert_eq!(card.attr("data-index"), Some("3"));
        assert_eq!(card.attr("data-title"), Some("rust in ten minutes"));
        assert_eq!(card.attr("data-channel"), Some("ferris"));
        let img = card.find_tag("img").unwrap();
        assert_eq!(img.attr("alt"), Some("Rust In Ten Minutes"));
        assert_eq!(img.attr("loading"), Some("lazy"));
    }

    #[test]
    fn missing_avatar_becomes_letter_badge() {
        let card = card(0, &entry(None));
        assert_eq!(card.find_class("avatar-circle").unwrap().text_content(), "F");
    }

    #[test]
    fn image_avatar_uses_channel_alt() {
        let card = card(0, &entry(Some(ImageRef::Image { src: "a.png".into() })));
        let avatar = card.find_class("avatar-image").unwrap();
        assert_eq!(avatar.attr("src"), Some("a.png"));
        assert_eq!(avatar.attr("alt"), Some("ferris"));
        assert!(card.find_class("avatar-circle").is_none());
    }

    #[test]
    fn avatar_letter_handles_multibyte() {
        assert_eq!(avatar_letter("ärger"), "Ä");
        assert_eq!(avatar_letter(""), "");
    }
}
