//! Normalization of authored rows into [`VideoEntry`] records.

use tracing::debug;

use crate::diagnostics::Report;
use crate::dom::Element;

use super::layout::Layout;

pub const DEFAULT_TITLE: &str = "Untitled Video";
pub const DEFAULT_CHANNEL: &str = "Channel";
pub const DEFAULT_LINK: &str = "#";

pub(crate) const IMAGE_TAGS: &[&str] = &["picture", "img"];

/// An authored image: a responsive `<picture>` kept as-is, or a bare `<img>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageRef {
    Picture(Element),
    Image { src: String },
}

impl ImageRef {
    /// First `<picture>` or `<img>` inside `cell`, in document order.
    pub fn find_in(cell: &Element) -> Option<Self> {
        let found = cell.find_any_tag(IMAGE_TAGS)?;
        Some(match found.tag.as_str() {
            "picture" => ImageRef::Picture(found.clone()),
            _ => ImageRef::Image {
                src: found.attr("src").unwrap_or_default().to_string(),
            },
        })
    }

    pub fn src(&self) -> Option<&str> {
        match self {
            ImageRef::Picture(p) => p.find_tag("img").and_then(|img| img.attr("src")),
            ImageRef::Image { src } => Some(src),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoEntry {
    pub thumbnail: ImageRef,
    pub title: String,
    pub channel: String,
    pub link: String,
    pub avatar: Option<ImageRef>,
}

/// Turn `rows` into videos according to `layout`. Rows without a thumbnail
/// are dropped.
pub fn normalize(rows: &[&Element], layout: Layout, report: &mut Report) -> Vec<VideoEntry> {
    match layout {
        Layout::Horizontal4 | Layout::Horizontal3 => rows
            .iter()
            .enumerate()
            .filter_map(|(i, row)| from_row(row, layout, i + 1, report))
            .collect(),
        Layout::Stacked { has_avatar } => (0..rows.len())
            .step_by(layout.stride())
            .filter_map(|start| from_stack(rows, start, has_avatar, report))
            .collect(),
    }
}

fn from_row(row: &Element, layout: Layout, n: usize, report: &mut Report) -> Option<VideoEntry> {
    let cells: Vec<&Element> = row.element_children().collect();
    let (avatar_cell, title_cell, channel_cell) = match layout {
        Layout::Horizontal4 => (cells.get(1), cells.get(2), cells.get(3)),
        _ => (None, cells.get(1), cells.get(2)),
    };

    let Some(thumbnail) = cells.first().and_then(|c| ImageRef::find_in(c)) else {
        debug!(row = n, "no thumbnail found, skipping");
        report.skipped(format!("row {n}"), "no thumbnail image");
        return None;
    };
    let avatar = avatar_cell.and_then(|c| ImageRef::find_in(c));

    let mut link: Option<String> = None;
    let title = match title_cell {
        Some(cell) => {
            let (text, href) = cell_text_and_link(cell);
            link = href;
            text
        }
        None => None,
    };
    let channel = match channel_cell {
        Some(cell) => {
            let (text, href) = cell_text_and_link(cell);
            if link.is_none() {
                link = href;
            }
            text
        }
        None => None,
    };

    let entry = VideoEntry {
        thumbnail,
        title: or_default(title, &format!("row {n} title"), DEFAULT_TITLE, report),
        channel: or_default(channel, &format!("row {n} channel"), DEFAULT_CHANNEL, report),
        link: link.unwrap_or_else(|| DEFAULT_LINK.to_string()),
        avatar,
    };
    debug!(
        row = n,
        title = %entry.title,
        channel = %entry.channel,
        avatar = entry.avatar.is_some(),
        "video parsed"
    );
    Some(entry)
}

fn from_stack(
    rows: &[&Element],
    start: usize,
    has_avatar: bool,
    report: &mut Report,
) -> Option<VideoEntry> {
    let row = |offset: usize| rows.get(start + offset).copied();
    let n = start + 1;

    let Some(thumbnail) = row(0).and_then(ImageRef::find_in) else {
        debug!(row = n, "no thumbnail found, skipping");
        report.skipped(format!("rows from {n}"), "no thumbnail image");
        return None;
    };
    let (title_row, channel_row, link_row) = (row(1), row(2), row(3));

    let title = title_row.and_then(trimmed_text);
    let channel = channel_row.and_then(trimmed_text);
    let link = [link_row, title_row, channel_row]
        .into_iter()
        .flatten()
        .find_map(|r| r.find_tag("a"))
        .and_then(|a| non_empty(a.attr("href").unwrap_or_default()));
    let avatar = if has_avatar {
        row(4).and_then(ImageRef::find_in)
    } else {
        None
    };

    Some(VideoEntry {
        thumbnail,
        title: or_default(title, &format!("rows from {n} title"), DEFAULT_TITLE, report),
        channel: or_default(
            channel,
            &format!("rows from {n} channel"),
            DEFAULT_CHANNEL,
            report,
        ),
        link: link.unwrap_or_else(|| DEFAULT_LINK.to_string()),
        avatar,
    })
}

/// Anchor text and target when the cell holds a link, else the cell's own text.
fn cell_text_and_link(cell: &Element) -> (Option<String>, Option<String>) {
    match cell.find_tag("a") {
        Some(a) => (trimmed_text(a), a.attr("href").and_then(non_empty)),
        None => (trimmed_text(cell), None),
    }
}

fn trimmed_text(el: &Element) -> Option<String> {
    non_empty(el.text_content().trim())
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

fn or_default(value: Option<String>, field: &str, default: &str, report: &mut Report) -> String {
    value.unwrap_or_else(|| {
        report.defaulted(field, default);
        default.to_string()
    })
}
