// src/render/mod.rs
//! Portfolio renderer - one deterministic document for preview, code view, download and deploy

pub mod assets;
pub mod icons;
pub mod sections;
pub mod theme;

pub use icons::{get_icon_svg, Icon};
pub use sections::*;
pub use theme::{hex_to_rgb, hex_to_rgba, ThemeVars};

use crate::types::portfolio_data::{PortfolioData, ThemeMode};

pub const TAILWIND_CDN_URL: &str = "https://cdn.tailwindcss.com";

/// Where styles, the client script and the tailwind config live
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetMode {
    Inline,
    Linked,
}

/// How the client script obtains the portfolio JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Embedded,
    Fetched,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderContext {
    pub assets: AssetMode,
    pub data_source: DataSource,
    /// Overrides `settings.theme` when set
    pub theme: Option<ThemeMode>,
}

impl RenderContext {
    /// Single self-contained document for the editor iframe
    pub fn preview() -> Self {
        Self {
            assets: AssetMode::Inline,
            data_source: DataSource::Embedded,
            theme: None,
        }
    }

    /// File set opened straight from disk, where fetch() is unavailable
    pub fn download() -> Self {
        Self {
            assets: AssetMode::Linked,
            data_source: DataSource::Embedded,
            theme: None,
        }
    }

    /// File set served over HTTP by GitHub Pages or Netlify
    pub fn published() -> Self {
        Self {
            assets: AssetMode::Linked,
            data_source: DataSource::Fetched,
            theme: None,
        }
    }

    pub fn with_theme(mut self, theme: ThemeMode) -> Self {
        self.theme = Some(theme);
        self
    }

    pub fn theme_mode(&self, data: &PortfolioData) -> ThemeMode {
        self.theme.unwrap_or(data.settings.theme)
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::preview()
    }
}

/// Render the complete HTML document. Total and byte-for-byte deterministic.
pub fn render_portfolio_document(data: &PortfolioData, ctx: &RenderContext) -> String {
    let theme = ThemeVars::from_data(data);
    let mode = ctx.theme_mode(data);

    let (styles, tailwind_config, script) = match ctx.assets {
        AssetMode::Inline => (
            format!("<style>\n{}</style>", assets::render_stylesheet(data, mode)),
            format!("<script>\n{}</script>", assets::render_tailwind_config(data)),
            format!("<script>\n{}</script>", assets::CLIENT_SCRIPT),
        ),
        AssetMode::Linked => (
            format!(r#"<link rel="stylesheet" href="{}">"#, assets::STYLES_CSS),
            format!(r#"<script src="{}"></script>"#, assets::TAILWIND_CONFIG_JS),
            format!(r#"<script src="{}" defer></script>"#, assets::SCRIPT_JS),
        ),
    };

    let (body_attrs, data_script) = match ctx.data_source {
        DataSource::Embedded => (
            String::new(),
            format!(
                "<script id=\"portfolio-data\" type=\"application/json\">{}</script>\n",
                embed_json(data)
            ),
        ),
        DataSource::Fetched => (
            format!(r#" data-source="{}""#, assets::PORTFOLIO_DATA_JSON),
            String::new(),
        ),
    };

    format!(
        r##"<!DOCTYPE html>
<html lang="en" data-theme="{mode}"{dark_class}>
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title}</title>
<meta name="description" content="{description}">
<meta name="theme-color" content="{primary}">
<link rel="preconnect" href="https://fonts.googleapis.com">
<link rel="preconnect" href="https://fonts.gstatic.com" crossorigin>
<link rel="stylesheet" href="{fonts_url}">
<script src="{tailwind_cdn}"></script>
{tailwind_config}
{styles}
</head>
<body{body_attrs}>
{body}
{data_script}{script}
</body>
</html>
"##,
        mode = mode.as_str(),
        dark_class = if mode == ThemeMode::Dark {
            r#" class="dark""#
        } else {
            ""
        },
        title = escape_html(&document_title(data)),
        description = escape_html(data.settings.summary.trim()),
        primary = theme.primary,
        fonts_url = escape_html(&theme.google_fonts_url()),
        tailwind_cdn = TAILWIND_CDN_URL,
        tailwind_config = tailwind_config,
        styles = styles,
        body_attrs = body_attrs,
        body = render_body(data),
        data_script = data_script,
        script = script,
    )
}

/// Every section in its fixed order; disabled sections contribute nothing
pub fn render_body(data: &PortfolioData) -> String {
    let fragments = [
        render_navigation(data),
        render_hero(data),
        render_about(data),
        render_projects(data),
        render_experience(data),
        render_education(data),
        render_achievements(data),
        render_contact(data),
        render_social(data),
        render_footer(data),
    ];

    let mut body = String::from("<main class=\"portfolio\">\n");
    for fragment in fragments.iter().filter(|f| !f.is_empty()) {
        body.push_str(fragment);
        body.push('\n');
    }
    body.push_str("</main>");
    body
}

fn document_title(data: &PortfolioData) -> String {
    let name = data.settings.name.trim();
    let title = data.settings.title.trim();
    match (name.is_empty(), title.is_empty()) {
        (false, false) => format!("{} | {}", name, title),
        (false, true) => name.to_string(),
        (true, false) => title.to_string(),
        (true, true) => "Portfolio".to_string(),
    }
}

// ===== Markup Helpers =====

pub fn escape_html(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Attribute-safe URL; script-capable schemes collapse to `#`
pub fn safe_url(url: &str) -> String {
    let trimmed = url.trim();
    let scheme = trimmed
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect::<String>()
        .to_lowercase();

    if scheme.starts_with("javascript:") || scheme.starts_with("vbscript:") || scheme.starts_with("data:") {
        return "#".to_string();
    }
    if trimmed.is_empty() {
        return "#".to_string();
    }
    escape_html(trimmed)
}

/// Portfolio JSON that is safe inside a `<script>` element
pub fn embed_json(data: &PortfolioData) -> String {
    serde_json::to_string(data)
        .unwrap_or_else(|_| "{}".to_string())
        .replace("</", "<\\/")
        .replace("<!--", "<\\!--")
}

pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
