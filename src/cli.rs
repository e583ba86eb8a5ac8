use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use vidtube_blocks::block::Block;
use vidtube_blocks::config::SiteConfig;
use vidtube_blocks::diagnostics::Report;
use vidtube_blocks::fragment::{DirFragmentLoader, FragmentLoader};
use vidtube_blocks::page::Page;
use vidtube_blocks::search::apply_search;
use vidtube_blocks::storage::{FileStore, PreferenceStore};
use vidtube_blocks::Site;

/// Decorate authored block markup and print the result
#[derive(Parser)]
#[command(name = "vidtube-blocks")]
#[command(about = "Render banner, header and thumbnail blocks from CMS markup", long_about = None)]
pub struct Cli {
    /// Site configuration (TOML)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Decorate a banner block
    Banner {
        /// File holding the block's authored rows
        file: PathBuf,
    },
    /// Decorate a thumbnails block
    Thumbnails {
        file: PathBuf,
        /// Filter the rendered grid as the header search would
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Decorate the header from a directory of `.plain.html` nav fragments
    Header {
        #[arg(long, value_name = "DIR")]
        fragments: PathBuf,
        #[arg(long, default_value = "https://localhost/")]
        page_url: String,
        /// Nav fragment path, as the page's `nav` metadata would give it
        #[arg(long)]
        nav: Option<String>,
        #[arg(long)]
        prefers_dark: bool,
        #[arg(long, default_value_t = 1280)]
        width: u32,
        /// Preferences file (defaults to the user data directory)
        #[arg(long, value_name = "FILE")]
        prefs: Option<PathBuf>,
    },
}

pub async fn run(cli: Cli) -> Result<()> {
    let config = SiteConfig::load(cli.config.as_deref())?;
    match cli.command {
        Commands::Banner { file } => {
            let mut block = read_block("banner", &file).await?;
            let report = vidtube_blocks::banner::decorate(&mut block);
            emit(&block, &report)
        }
        Commands::Thumbnails { file, search } => {
            let mut block = read_block("thumbnails", &file).await?;
            let mut out = vidtube_blocks::thumbnails::decorate(&mut block);
            if let (Some(grid), Some(query)) = (out.grid.as_mut(), search) {
                let outcome = apply_search(grid, &query);
                info!(?outcome, "search applied");
                grid.render_into(&mut block);
            }
            emit(&block, &out.report)
        }
        Commands::Header {
            fragments,
            page_url,
            nav,
            prefers_dark,
            width,
            prefs,
        } => {
            let mut page = Page::parse(&page_url)?;
            if let Some(nav) = nav {
                page = page.with_metadata("nav", &nav);
            }
            let loader: Arc<dyn FragmentLoader> = Arc::new(DirFragmentLoader::new(
                fragments,
                &config.fragment_suffix,
            ));
            let store: Arc<dyn PreferenceStore> = match prefs {
                Some(path) => Arc::new(FileStore::open(&path)?),
                None => Arc::new(FileStore::open_default()?),
            };
            let site = Site::new(config, page, loader, store);
            info!(
                page = %site.page().url,
                breakpoint = site.config().desktop_breakpoint,
                "decorating header"
            );
            let mut session = site.new_session(width, prefers_dark);
            let mut block = Block::from_html("header", "");
            let out = site.decorate_header(&mut block, &mut session).await;
            info!(nav = %out.nav_path, theme = %session.theme(), "header decorated");
            emit(&block, &out.report)
        }
    }
}

async fn read_block(name: &str, file: &Path) -> Result<Block> {
    let html = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("reading block markup: {}", file.display()))?;
    Ok(Block::from_html(name, &html))
}

/// Decorated HTML on stdout, diagnostics as JSON on stderr.
fn emit(block: &Block, report: &Report) -> Result<()> {
    println!("{}", block.to_html());
    if !report.is_clean() {
        eprintln!("{}", serde_json::to_string_pretty(report)?);
    }
    Ok(())
}
