//! Branding and sidebar menu extraction from a nav fragment.

use serde::Serialize;
use tracing::debug;

use crate::diagnostics::Report;
use crate::dom::Element;

const CONTAINER_TAGS: &[&str] = &["p", "div", "td", "tr"];
const SIBLING_LOOKAHEAD: usize = 2;

/// Logo and profile avatar image URLs. Both are set only when the fragment
/// has at least two images.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Branding {
    pub logo: Option<String>,
    pub avatar: Option<String>,
}

impl Branding {
    pub fn from_fragment(fragment: &Element) -> Self {
        let images = fragment.find_all(|e| e.tag == "img");
        if images.len() < 2 {
            return Self::default();
        }
        Self {
            logo: image_src(images[0]),
            avatar: image_src(images[1]),
        }
    }

    fn is_branding(&self, src: &str) -> bool {
        self.logo.as_deref() == Some(src) || self.avatar.as_deref() == Some(src)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    /// Icon URL; the built-in fallback entries have none.
    pub icon: Option<String>,
    pub label: String,
    pub href: String,
}

impl MenuItem {
    pub fn new(icon: &str, label: &str, href: &str) -> Self {
        Self {
            icon: Some(icon.to_string()),
            label: label.to_string(),
            href: href.to_string(),
        }
    }
}

/// Where the menu came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuSource {
    Table,
    DefaultContent,
    Fallback,
}

/// Build the sidebar menu: table rows first, then loose default content when
/// the fragment has no table at all, then the fixed Home/Shorts pair.
pub fn extract_menu(
    fragment: &Element,
    branding: &Branding,
    report: &mut Report,
) -> (Vec<MenuItem>, MenuSource) {
    let tables = fragment.find_all(|e| e.tag == "table");
    let (items, source) = if !tables.is_empty() {
        (from_tables(&tables, branding, report), MenuSource::Table)
    } else {
        (from_default_content(fragment, report), MenuSource::DefaultContent)
    };

    if items.is_empty() {
        report.degraded("menu", "no menu items found; using fallback menu");
        return (fallback_menu(), MenuSource::Fallback);
    }
    (items, source)
}

pub fn fallback_menu() -> Vec<MenuItem> {
    vec![
        MenuItem {
            icon: None,
            label: "Home".into(),
            href: "/".into(),
        },
        MenuItem {
            icon: None,
            label: "Shorts".into(),
            href: "/shorts".into(),
        },
    ]
}

fn from_tables(tables: &[&Element], branding: &Branding, report: &mut Report) -> Vec<MenuItem> {
    let mut items = Vec::new();
    for (t, table) in tables.iter().enumerate() {
        for (r, row) in table.find_all(|e| e.tag == "tr").into_iter().enumerate() {
            let cells = row.find_all(|e| e.tag == "td" || e.tag == "th");
            debug!(table = t, row = r, cells = cells.len(), "menu row");
            if cells.len() < 2 {
                continue;
            }
            let icon = cells[0].find_tag("img").and_then(image_src);
            let label = cells[1].text_content().trim().to_string();
            let href = cells
                .get(2)
                .map(|c| cell_href(c))
                .unwrap_or_else(|| "/".to_string());

            let item = format!("table {t} row {r}");
            match icon {
                None => report.skipped(item, "no icon"),
                Some(_) if label.is_empty() => report.skipped(item, "no label"),
                Some(icon) if branding.is_branding(&icon) => {
                    report.skipped(item, "icon is the logo or avatar")
                }
                Some(icon) => items.push(MenuItem {
                    icon: Some(icon),
                    label,
                    href,
                }),
            }
        }
    }
    items
}

/// Link target from the third cell: an anchor's href, else the cell text when
/// it looks like a path or an absolute URL, else `/`.
fn cell_href(cell: &Element) -> String {
    if let Some(a) = cell.find_tag("a") {
        return a.attr("href").unwrap_or("/").to_string();
    }
    let text = cell.text_content();
    let text = text.trim();
    if text.starts_with('/') || text.starts_with("http") {
        text.to_string()
    } else {
        "/".to_string()
    }
}

fn from_default_content(fragment: &Element, report: &mut Report) -> Vec<MenuItem> {
    if fragment.find_class("default-content-wrapper").is_none() {
        debug!("fragment has neither tables nor default content");
        return Vec::new();
    }

    let images: Vec<_> = fragment
        .descendant_paths()
        .into_iter()
        .filter(|(_, e)| e.tag == "img")
        .collect();
    let mut items = Vec::new();
    for (i, (path, img)) in images.iter().enumerate().skip(2) {
        let Some(icon) = image_src(img) else {
            report.skipped(format!("image {i}"), "no src");
            continue;
        };
        let container =
            fragment.closest_ancestor(path, |e| CONTAINER_TAGS.contains(&e.tag.as_str()));
        let (container_path, container) = match container {
            Some(found) => found,
            None => {
                let parent_path = &path[..path.len() - 1];
                match fragment.at_path(parent_path) {
                    Some(parent) => (parent_path.to_vec(), parent),
                    None => continue,
                }
            }
        };

        let alt = img.attr("alt").unwrap_or_default();
        let text = container.text_content();
        let mut label = if alt.is_empty() {
            text.trim().to_string()
        } else {
            text.trim().replacen(alt, "", 1).trim().to_string()
        };
        let mut href = "/".to_string();

        if let Some(a) = container.find_tag("a") {
            href = a.attr("href").unwrap_or("/").to_string();
            if label.is_empty() {
                label = a.text_content().trim().to_string();
            }
        }

        if label.is_empty() {
            let siblings = fragment.next_element_siblings(&container_path);
            for sibling in siblings.into_iter().take(SIBLING_LOOKAHEAD) {
                let text = sibling.text_content();
                if text.trim().is_empty() {
                    continue;
                }
                label = text.trim().to_string();
                if let Some(a) = sibling.find_tag("a") {
                    href = a.attr("href").unwrap_or("/").to_string();
                }
                break;
            }
        }

        if label.is_empty() {
            report.skipped(format!("image {i}"), "no label near icon");
            continue;
        }
        items.push(MenuItem {
            icon: Some(icon),
            label,
            href,
        });
    }
    items
}

fn image_src(img: &Element) -> Option<String> {
    img.attr("src")
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
