use crate::dom::Element;

use super::entry::IMAGE_TAGS;

/// Row that holds the avatar in a stacked block, when avatars are authored.
pub const AVATAR_ROW: usize = 4;

/// How the authored rows encode videos.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// One row per video: thumbnail | avatar | title | channel.
    Horizontal4,
    /// One row per video: thumbnail | title | channel.
    Horizontal3,
    /// One video per run of rows: thumbnail, title, channel, link[, avatar].
    Stacked { has_avatar: bool },
}

impl Layout {
    /// Decide the layout from the first row's cell count. `None` for a block
    /// without rows.
    pub fn classify(rows: &[&Element]) -> Option<Self> {
        let first = rows.first()?;
        let layout = match first.element_children().count() {
            4 => Layout::Horizontal4,
            n if n >= 3 => Layout::Horizontal3,
            _ => Layout::Stacked {
                has_avatar: rows
                    .get(AVATAR_ROW)
                    .is_some_and(|row| row.contains_tag(IMAGE_TAGS)),
            },
        };
        Some(layout)
    }

    /// Rows consumed per video.
    pub fn stride(&self) -> usize {
        match self {
            Layout::Horizontal4 | Layout::Horizontal3 => 1,
            Layout::Stacked { has_avatar: true } => 5,
            Layout::Stacked { has_avatar: false } => 4,
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Layout::Horizontal4 => "thumbnail | avatar | title | channel",
            Layout::Horizontal3 => "thumbnail | title | channel",
            Layout::Stacked { has_avatar: true } => "stacked, 5 rows per video",
            Layout::Stacked { has_avatar: false } => "stacked, 4 rows per video",
        }
    }
}
