// src/generator.rs
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::ExportConfig;
use crate::core::FsOps;
use crate::render::assets::{
    self, INDEX_HTML, PORTFOLIO_DATA_JSON, SCRIPT_JS, STYLES_CSS, TAILWIND_CONFIG_JS,
};
use crate::render::{render_portfolio_document, RenderContext};
use crate::types::portfolio_data::PortfolioData;

/// One file of a generated site, path relative to the site root
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteFile {
    pub path: String,
    pub content: String,
}

impl SiteFile {
    fn new(path: &str, content: String) -> Self {
        Self {
            path: path.to_string(),
            content,
        }
    }
}

/// The file set every call site works from: code view, download, GitHub and Netlify
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedSite {
    pub files: Vec<SiteFile>,
}

impl GeneratedSite {
    pub const FILE_NAMES: [&'static str; 5] = [
        INDEX_HTML,
        STYLES_CSS,
        SCRIPT_JS,
        TAILWIND_CONFIG_JS,
        PORTFOLIO_DATA_JSON,
    ];

    pub fn build(data: &PortfolioData, ctx: &RenderContext) -> Self {
        let mode = ctx.theme_mode(data);
        let json = serde_json::to_string_pretty(data).unwrap_or_else(|_| "{}".to_string());

        Self {
            files: vec![
                SiteFile::new(INDEX_HTML, render_portfolio_document(data, ctx)),
                SiteFile::new(STYLES_CSS, assets::render_stylesheet(data, mode)),
                SiteFile::new(SCRIPT_JS, assets::CLIENT_SCRIPT.to_string()),
                SiteFile::new(TAILWIND_CONFIG_JS, assets::render_tailwind_config(data)),
                SiteFile::new(PORTFOLIO_DATA_JSON, json),
            ],
        }
    }

    pub fn file(&self, path: &str) -> Option<&SiteFile> {
        self.files.iter().find(|f| f.path == path)
    }

    pub fn index_html(&self) -> &str {
        self.file(INDEX_HTML).map(|f| f.content.as_str()).unwrap_or("")
    }

    pub fn paths(&self) -> Vec<&str> {
        self.files.iter().map(|f| f.path.as_str()).collect()
    }

    pub fn total_bytes(&self) -> usize {
        self.files.iter().map(|f| f.content.len()).sum()
    }
}

/// Writes generated sites to disk
pub struct PortfolioGenerator {
    pub config: ExportConfig,
}

impl PortfolioGenerator {
    pub fn new(config: ExportConfig) -> Result<Self> {
        if config.site_name.is_empty() {
            anyhow::bail!("Site name cannot be empty");
        }
        Ok(Self { config })
    }

    /// Write the full file set into `<output_dir>/<site name>/`
    pub async fn generate(&self, data: &PortfolioData) -> Result<PathBuf> {
        let site_dir = self.config.site_dir();
        FsOps::ensure_dir_exists(&site_dir).await?;

        let site = GeneratedSite::build(data, &self.config.context);
        for file in &site.files {
            FsOps::write_file_safe(&site_dir.join(&file.path), &file.content)
                .await
                .with_context(|| format!("Failed to export {}", file.path))?;
        }

        info!(
            "Exported {} files ({} bytes) for {} to {}",
            site.files.len(),
            site.total_bytes(),
            self.config.site_name,
            site_dir.display()
        );

        Ok(site_dir)
    }

    /// Write the single self-contained preview document
    pub async fn write_preview(&self, data: &PortfolioData, path: &Path) -> Result<PathBuf> {
        let ctx = RenderContext::preview();
        let html = render_portfolio_document(data, &ctx);
        FsOps::write_file_safe(path, &html).await?;

        info!("Rendered preview for {} to {}", self.config.site_name, path.display());
        Ok(path.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_order_is_fixed() {
        let site = GeneratedSite::build(&PortfolioData::sample(), &RenderContext::published());
        assert_eq!(site.paths(), GeneratedSite::FILE_NAMES.to_vec());
    }

    #[test]
    fn test_json_file_round_trips() {
        let data = PortfolioData::sample();
        let site = GeneratedSite::build(&data, &RenderContext::download());
        let json = &site.file(PORTFOLIO_DATA_JSON).unwrap().content;
        assert_eq!(PortfolioData::from_json(json).unwrap(), data);
    }

    #[test]
    fn test_index_matches_renderer() {
        let data = PortfolioData::sample();
        let ctx = RenderContext::published();
        let site = GeneratedSite::build(&data, &ctx);
        assert_eq!(site.index_html(), render_portfolio_document(&data, &ctx));
    }

    #[test]
    fn test_empty_site_name_rejected() {
        let mut config = ExportConfig::new("x");
        config.site_name.clear();
        assert!(PortfolioGenerator::new(config).is_err());
    }
}
