//! Video thumbnail grid.
//!
//! Authored rows come in one of the shapes described by [`Layout`]; each is
//! normalized into a [`VideoEntry`] and rendered as a searchable card grid.

pub mod entry;
pub mod grid;
pub mod layout;
pub mod render;

pub use entry::{ImageRef, VideoEntry};
pub use grid::ThumbnailGrid;
pub use layout::Layout;

use tracing::{info, warn};

use crate::block::Block;
use crate::diagnostics::Report;
use crate::dom::Node;

/// Result of decorating a thumbnails block.
#[derive(Debug, Clone)]
pub struct ThumbnailsDecoration {
    pub layout: Option<Layout>,
    /// `None` when no video survived and the block shows the empty panel.
    pub grid: Option<ThumbnailGrid>,
    pub report: Report,
}

pub fn decorate(block: &mut Block) -> ThumbnailsDecoration {
    let mut report = Report::default();
    let rows = block.rows();
    let layout = Layout::classify(&rows);
    info!(
        rows = rows.len(),
        layout = layout.map(|l| l.describe()).unwrap_or("none"),
        "thumbnails block"
    );

    let videos = match layout {
        Some(layout) => entry::normalize(&rows, layout, &mut report),
        None => Vec::new(),
    };

    if videos.is_empty() {
        warn!("no videos found; check the block structure");
        report.degraded("videos", "no row produced a video");
        block.replace_content(vec![Node::Element(render::empty_panel())]);
        return ThumbnailsDecoration {
            layout,
            grid: None,
            report,
        };
    }

    info!(videos = videos.len(), "thumbnails parsed");
    let grid = ThumbnailGrid::new(&videos);
    grid.render_into(block);
    ThumbnailsDecoration {
        layout,
        grid: Some(grid),
        report,
    }
}
