pub mod banner;
pub mod block;
pub mod config;
pub mod diagnostics;
pub mod dom;
pub mod fragment;
pub mod header;
pub mod page;
pub mod search;
pub mod session;
pub mod storage;
pub mod thumbnails;

// --- Library API for embedding ---

/// Convenience re-exports for embedders.
pub mod prelude {
    pub use crate::block::Block;
    pub use crate::config::SiteConfig;
    pub use crate::diagnostics::{Diagnostic, Report};
    pub use crate::dom::{Element, Node};
    pub use crate::fragment::{
        DirFragmentLoader, FragmentLoader, HttpFragmentLoader, StaticFragmentLoader,
    };
    pub use crate::header::{HeaderController, HeaderDecoration, SearchSurface, UiEvent};
    pub use crate::page::Page;
    pub use crate::search::{apply_search, SearchOutcome, SearchableCardSet};
    pub use crate::session::{ThemePreference, UiSession};
    pub use crate::storage::{FileStore, MemoryStore, PreferenceStore};
    pub use crate::thumbnails::{Layout, ThumbnailGrid, ThumbnailsDecoration};
    pub use crate::Site;
}

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::block::Block;
use crate::config::SiteConfig;
use crate::diagnostics::Report;
use crate::fragment::{FragmentLoader, HttpFragmentLoader};
use crate::header::HeaderDecoration;
use crate::page::Page;
use crate::session::UiSession;
use crate::storage::{FileStore, PreferenceStore};
use crate::thumbnails::ThumbnailsDecoration;

/// One page's worth of decoration: configuration, the page itself, where nav
/// fragments come from and where preferences are kept.
pub struct Site {
    config: SiteConfig,
    page: Page,
    fragments: Arc<dyn FragmentLoader>,
    preferences: Arc<dyn PreferenceStore>,
}

impl Site {
    pub fn new(
        config: SiteConfig,
        page: Page,
        fragments: Arc<dyn FragmentLoader>,
        preferences: Arc<dyn PreferenceStore>,
    ) -> Self {
        Self {
            config,
            page,
            fragments,
            preferences,
        }
    }

    /// Fragments fetched over HTTP from the page's own origin, preferences in
    /// the user's data directory.
    pub fn connect(config: SiteConfig, page: Page) -> Result<Self> {
        let origin = page
            .url
            .join("/")
            .with_context(|| format!("no origin for {}", page.url))?;
        let fragments = HttpFragmentLoader::new(origin, &config)?;
        let preferences = FileStore::open_default()?;
        Ok(Self::new(config, page, Arc::new(fragments), Arc::new(preferences)))
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Fresh UI state for a viewer with the given viewport and OS theme.
    pub fn new_session(&self, viewport_width: u32, prefers_dark: bool) -> UiSession {
        UiSession::new(
            self.preferences.clone(),
            &self.config.theme_key,
            viewport_width,
            prefers_dark,
        )
    }

    pub fn decorate_banner(&self, block: &mut Block) -> Report {
        banner::decorate(block)
    }

    pub fn decorate_thumbnails(&self, block: &mut Block) -> ThumbnailsDecoration {
        thumbnails::decorate(block)
    }

    pub async fn decorate_header(
        &self,
        block: &mut Block,
        session: &mut UiSession,
    ) -> HeaderDecoration {
        let fragments = self.fragments.as_ref();
        header::decorate(block, session, &self.page, fragments, &self.config).await
    }
}
