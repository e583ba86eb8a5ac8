use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Site-wide knobs for the block decorators.
///
/// Loaded from an optional TOML file; every field has a default and a few can
/// be overridden with `VIDTUBE_*` environment variables.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SiteConfig {
    /// Viewport width (px) at or above which the layout counts as desktop.
    pub desktop_breakpoint: u32,
    /// Nav fragment path used when the page has no `nav` metadata.
    pub default_nav_path: String,
    /// Preference key for the saved theme.
    pub theme_key: String,
    /// Appended to a fragment path to form the plain-markup resource.
    pub fragment_suffix: String,
    pub user_agent: String,
    pub fetch_timeout_ms: u64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            desktop_breakpoint: 900,
            default_nav_path: "/nav".to_string(),
            theme_key: "theme".to_string(),
            fragment_suffix: ".plain.html".to_string(),
            user_agent: format!("vidtube-blocks/{}", env!("CARGO_PKG_VERSION")),
            fetch_timeout_ms: 10_000,
        }
    }
}

impl SiteConfig {
    /// Read `path` when given (defaults otherwise), then apply env overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let base = match path {
            Some(p) => {
                let raw = std::fs::read_to_string(p)
                    .with_context(|| format!("reading config: {}", p.display()))?;
                Self::from_toml(&raw)
                    .with_context(|| format!("parsing config: {}", p.display()))?
            }
            None => Self::default(),
        };
        Ok(base.with_overrides(|k| std::env::var(k).ok()))
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Apply `VIDTUBE_*` overrides; values that don't parse are ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(v) = lookup("VIDTUBE_DESKTOP_BREAKPOINT").and_then(|s| s.parse().ok()) {
            self.desktop_breakpoint = v;
        }
        if let Some(v) = lookup("VIDTUBE_NAV_PATH").filter(|s| !s.trim().is_empty()) {
            self.default_nav_path = v;
        }
        if let Some(v) = lookup("VIDTUBE_FETCH_TIMEOUT_MS").and_then(|s| s.parse().ok()) {
            self.fetch_timeout_ms = v;
        }
        self
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg = SiteConfig::from_toml("desktop_breakpoint = 1024\n").unwrap();
        assert_eq!(cfg.desktop_breakpoint, 1024);
        assert_eq!(cfg.default_nav_path, "/nav");
        assert_eq!(cfg.fragment_suffix, ".plain.html");
    }

    #[test]
    fn env_overrides_win_and_garbage_is_ignored() {
        let cfg = SiteConfig::default().with_overrides(|k| match k {
            "VIDTUBE_NAV_PATH" => Some("/custom-nav".into()),
            "VIDTUBE_DESKTOP_BREAKPOINT" => Some("wide".into()),
            "VIDTUBE_FETCH_TIMEOUT_MS" => Some("250".into()),
            _ => None,
        });
        assert_eq!(cfg.default_nav_path, "/custom-nav");
        assert_eq!(cfg.desktop_breakpoint, 900);
        assert_eq!(cfg.fetch_timeout(), Duration::from_millis(250));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.toml");
        std::fs::write(&path, "theme_key = \"vt-theme\"\n").unwrap();
        let cfg = SiteConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.theme_key, "vt-theme");
    }
}
