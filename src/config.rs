// src/config.rs
use std::path::PathBuf;

use crate::render::RenderContext;
use crate::utils::normalize_site_name;

pub struct ExportConfig {
    pub site_name: String,
    pub output_dir: PathBuf,
    pub context: RenderContext,
    pub root_dir: PathBuf,
}

impl ExportConfig {
    pub fn new(site_name: &str) -> Self {
        // Capture the current directory at creation time
        let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

        Self {
            site_name: normalize_site_name(site_name),
            output_dir: PathBuf::from("output"),
            context: RenderContext::download(),
            root_dir: current_dir,
        }
    }

    pub fn with_output_dir(mut self, dir: PathBuf) -> Self {
        self.output_dir = dir;
        self
    }

    pub fn with_context(mut self, context: RenderContext) -> Self {
        self.context = context;
        self
    }

    fn absolute_path(&self, relative_path: &PathBuf) -> PathBuf {
        if relative_path.is_absolute() {
            relative_path.clone()
        } else {
            self.root_dir.join(relative_path)
        }
    }

    pub fn output_dir_absolute(&self) -> PathBuf {
        self.absolute_path(&self.output_dir)
    }

    /// `<output_dir>/<normalized site name>/`
    pub fn site_dir(&self) -> PathBuf {
        self.output_dir_absolute().join(&self.site_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_dir_uses_normalized_name() {
        let config = ExportConfig::new("Alex Morgan").with_output_dir(PathBuf::from("/tmp/out"));
        assert_eq!(config.site_dir(), PathBuf::from("/tmp/out/alex-morgan"));
    }

    #[test]
    fn test_relative_output_is_resolved_from_root() {
        let mut config = ExportConfig::new("site");
        config.root_dir = PathBuf::from("/srv/folio");
        assert_eq!(config.site_dir(), PathBuf::from("/srv/folio/output/site"));
    }
}
