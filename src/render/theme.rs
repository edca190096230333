// src/render/theme.rs
//! Primary color conversions and the CSS custom properties derived from them

use crate::types::portfolio_data::{PortfolioData, ThemeMode};

pub const DEFAULT_PRIMARY_COLOR: &str = "#0067C7";

/// Opacity of the subtle background tint
pub const TINT_ALPHA: f64 = 0.08;
/// Opacity of the light accent used for badges and hover states
pub const LIGHT_ALPHA: f64 = 0.1;

/// Parse `#RRGGBB` (or `RRGGBB`, or the `#RGB` shorthand) into its channels
pub fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let trimmed = hex.trim();
    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let expanded: String = match digits.len() {
        6 => digits.to_string(),
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        _ => return None,
    };

    let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

/// Strict `#RRGGBB`, the form the editor stores
pub fn is_hex_color(hex: &str) -> bool {
    hex.strip_prefix('#')
        .map(|digits| digits.len() == 6 && digits.chars().all(|c| c.is_ascii_hexdigit()))
        .unwrap_or(false)
}

fn channels_or_default(hex: &str) -> (u8, u8, u8) {
    parse_hex_color(hex).unwrap_or((0x00, 0x67, 0xC7))
}

/// "0, 103, 199" for `#0067C7`
pub fn hex_to_rgb(hex: &str) -> String {
    let (r, g, b) = channels_or_default(hex);
    format!("{}, {}, {}", r, g, b)
}

/// "rgba(0,103,199,0.08)" for `#0067C7` at 8%
pub fn hex_to_rgba(hex: &str, alpha: f64) -> String {
    let (r, g, b) = channels_or_default(hex);
    format!("rgba({},{},{},{})", r, g, b, alpha)
}

/// Canonical uppercase `#RRGGBB`; invalid input resolves to the default color
pub fn normalize_hex(hex: &str) -> String {
    let (r, g, b) = channels_or_default(hex);
    format!("#{:02X}{:02X}{:02X}", r, g, b)
}

/// Theme tokens computed once per render
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeVars {
    pub primary: String,
    pub primary_rgb: String,
    pub primary_tint: String,
    pub primary_light: String,
    pub body_font: String,
    pub heading_font: String,
}

impl ThemeVars {
    pub fn from_data(data: &PortfolioData) -> Self {
        let settings = &data.settings;
        let body_font = non_empty_or(&settings.font_family, "Inter");
        let heading_font = settings
            .heading_font
            .as_deref()
            .map(|f| non_empty_or(f, &body_font))
            .unwrap_or_else(|| body_font.clone());

        Self {
            primary: normalize_hex(&settings.primary_color),
            primary_rgb: hex_to_rgb(&settings.primary_color),
            primary_tint: hex_to_rgba(&settings.primary_color, TINT_ALPHA),
            primary_light: hex_to_rgba(&settings.primary_color, LIGHT_ALPHA),
            body_font,
            heading_font,
        }
    }

    /// Distinct font families in declaration order
    pub fn font_families(&self) -> Vec<&str> {
        let mut families = vec![self.body_font.as_str()];
        if self.heading_font != self.body_font {
            families.push(self.heading_font.as_str());
        }
        families
    }

    /// Google Fonts stylesheet URL for the configured families
    pub fn google_fonts_url(&self) -> String {
        let families = self
            .font_families()
            .iter()
            .map(|f| format!("family={}:wght@300;400;500;600;700", font_query_name(f)))
            .collect::<Vec<_>>()
            .join("&");
        format!("https://fonts.googleapis.com/css2?{}&display=swap", families)
    }

    /// `:root` block consumed by the static stylesheet
    pub fn css_variables(&self, mode: ThemeMode) -> String {
        let (background, surface, text, muted, border) = match mode {
            ThemeMode::Light => ("#ffffff", "#f8fafc", "#0f172a", "#475569", "#e2e8f0"),
            ThemeMode::Dark => ("#0b1120", "#111827", "#f1f5f9", "#94a3b8", "#1e293b"),
        };

        format!(
            r#":root {{
  --primary-color: {primary};
  --primary-rgb: {rgb};
  --primary-tint: {tint};
  --primary-light: {light};
  --font-body: '{body}', system-ui, sans-serif;
  --font-heading: '{heading}', system-ui, sans-serif;
  --color-bg: {background};
  --color-surface: {surface};
  --color-text: {text};
  --color-muted: {muted};
  --color-border: {border};
}}
[data-theme="dark"] {{
  --color-bg: #0b1120;
  --color-surface: #111827;
  --color-text: #f1f5f9;
  --color-muted: #94a3b8;
  --color-border: #1e293b;
}}
[data-theme="light"] {{
  --color-bg: #ffffff;
  --color-surface: #f8fafc;
  --color-text: #0f172a;
  --color-muted: #475569;
  --color-border: #e2e8f0;
}}
"#,
            primary = self.primary,
            rgb = self.primary_rgb,
            tint = self.primary_tint,
            light = self.primary_light,
            body = css_font_name(&self.body_font),
            heading = css_font_name(&self.heading_font),
            background = background,
            surface = surface,
            text = text,
            muted = muted,
            border = border,
        )
    }
}

fn non_empty_or(value: &str, fallback: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

// Font names end up inside CSS strings and URLs
pub(crate) fn css_font_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric() || *c == ' ' || *c == '-')
        .collect()
}

fn font_query_name(name: &str) -> String {
    css_font_name(name).replace(' ', "+")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_to_rgb() {
        assert_eq!(hex_to_rgb("#0067C7"), "0, 103, 199");
        assert_eq!(hex_to_rgb("ffffff"), "255, 255, 255");
        assert_eq!(hex_to_rgb("#abc"), "170, 187, 204");
    }

    #[test]
    fn test_hex_to_rgba() {
        assert_eq!(hex_to_rgba("#0067C7", 0.08), "rgba(0,103,199,0.08)");
        assert_eq!(hex_to_rgba("#0067C7", 0.1), "rgba(0,103,199,0.1)");
    }

    #[test]
    fn test_invalid_hex_uses_default() {
        assert_eq!(parse_hex_color("#12345"), None);
        assert_eq!(parse_hex_color("#zzzzzz"), None);
        assert_eq!(parse_hex_color("##0067C7"), None);
        assert_eq!(hex_to_rgb("not-a-color"), "0, 103, 199");
        assert_eq!(normalize_hex(""), DEFAULT_PRIMARY_COLOR);
        assert_eq!(normalize_hex("#ff8800"), "#FF8800");
    }

    #[test]
    fn test_strict_hex_color() {
        assert!(is_hex_color("#0067C7"));
        assert!(is_hex_color("#ff8800"));
        assert!(!is_hex_color("#abc"));
        assert!(!is_hex_color("0067C7"));
        assert!(!is_hex_color("##0067C7"));
        assert!(!is_hex_color("#0067C7 "));
    }

    #[test]
    fn test_theme_vars_fonts() {
        let mut data = PortfolioData::sample();
        data.settings.font_family = "Open Sans".to_string();
        data.settings.heading_font = Some("Open Sans".to_string());

        let vars = ThemeVars::from_data(&data);
        assert_eq!(vars.font_families(), vec!["Open Sans"]);
        assert_eq!(
            vars.google_fonts_url(),
            "https://fonts.googleapis.com/css2?family=Open+Sans:wght@300;400;500;600;700&display=swap"
        );
    }

    #[test]
    fn test_css_variables_contain_tints() {
        let vars = ThemeVars::from_data(&PortfolioData::sample());
        let css = vars.css_variables(ThemeMode::Light);
        assert!(css.contains("--primary-rgb: 0, 103, 199;"));
        assert!(css.contains("--primary-tint: rgba(0,103,199,0.08);"));
        assert!(css.contains("--primary-light: rgba(0,103,199,0.1);"));
    }
}
