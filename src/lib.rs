use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub mod config;
pub mod core;
pub mod deploy;
pub mod environment;
pub mod generator;
pub mod logging;
pub mod render;
pub mod session;
pub mod types;
pub mod upload_validator;
pub mod utils;
pub mod web;

pub use config::ExportConfig;
pub use generator::{GeneratedSite, PortfolioGenerator, SiteFile};
pub use render::{render_portfolio_document, RenderContext};
pub use types::PortfolioData;
pub use web::start_web_server;

/// Read a portfolio document from a JSON file
pub async fn load_portfolio(path: &Path) -> Result<PortfolioData> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read portfolio data from {}", path.display()))?;
    PortfolioData::from_json(&content)
        .with_context(|| format!("Invalid portfolio data in {}", path.display()))
}

/// Write the downloadable site for `data` under `output_dir/<site name>`
pub async fn export_site(
    data: &PortfolioData,
    output_dir: Option<PathBuf>,
    context: RenderContext,
) -> Result<PathBuf> {
    let mut config = ExportConfig::new(&data.settings.name).with_context(context);
    if let Some(dir) = output_dir {
        config = config.with_output_dir(dir);
    }

    let generator = PortfolioGenerator::new(config)?;
    generator.generate(data).await
}
