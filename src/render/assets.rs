// src/render/assets.rs
//! Static companions of index.html: stylesheet, client script, tailwind config

use super::theme::{css_font_name, ThemeVars};
use crate::types::portfolio_data::{PortfolioData, ThemeMode};

pub const INDEX_HTML: &str = "index.html";
pub const STYLES_CSS: &str = "styles.css";
pub const SCRIPT_JS: &str = "script.js";
pub const TAILWIND_CONFIG_JS: &str = "tailwind.config.js";
pub const PORTFOLIO_DATA_JSON: &str = "portfolio-data.json";

/// localStorage key remembering the visitor's theme choice
pub const THEME_STORAGE_KEY: &str = "portfolio-theme";

/// Theme variables followed by the static rules
pub fn render_stylesheet(data: &PortfolioData, mode: ThemeMode) -> String {
    let vars = ThemeVars::from_data(data);
    format!("{}\n{}", vars.css_variables(mode), BASE_CSS)
}

pub fn render_tailwind_config(data: &PortfolioData) -> String {
    let vars = ThemeVars::from_data(data);
    format!(
        r#"tailwind.config = {{
  darkMode: 'class',
  theme: {{
    extend: {{
      colors: {{
        primary: {{
          DEFAULT: '{primary}',
          light: '{light}',
          tint: '{tint}'
        }}
      }},
      fontFamily: {{
        sans: ['{body}', 'system-ui', 'sans-serif'],
        heading: ['{heading}', 'system-ui', 'sans-serif']
      }}
    }}
  }}
}};
"#,
        primary = vars.primary,
        light = vars.primary_light,
        tint = vars.primary_tint,
        body = css_font_name(&vars.body_font),
        heading = css_font_name(&vars.heading_font),
    )
}

pub const BASE_CSS: &str = r#"*, *::before, *::after { box-sizing: border-box; }
html { scroll-behavior: smooth; }
body {
  margin: 0;
  font-family: var(--font-body);
  background: var(--color-bg);
  color: var(--color-text);
  line-height: 1.6;
  transition: background-color 0.2s ease, color 0.2s ease;
}
h1, h2, h3 { font-family: var(--font-heading); line-height: 1.2; margin: 0; }
a { color: var(--primary-color); text-decoration: none; }
a:hover { text-decoration: underline; }
img { max-width: 100%; display: block; }
.container { width: 100%; max-width: 1100px; margin: 0 auto; padding: 0 1.5rem; }
.icon { width: 1.1em; height: 1.1em; flex-shrink: 0; }

.site-nav {
  position: sticky;
  top: 0;
  z-index: 50;
  background: var(--color-bg);
  border-bottom: 1px solid var(--color-border);
}
.nav-inner { display: flex; align-items: center; gap: 1rem; height: 4rem; }
.nav-logo { font-family: var(--font-heading); font-weight: 700; font-size: 1.25rem; color: var(--color-text); margin-right: auto; }
.nav-links { display: flex; gap: 1.5rem; list-style: none; margin: 0; padding: 0; }
.nav-link { color: var(--color-muted); font-weight: 500; }
.nav-link:hover, .nav-link.active { color: var(--primary-color); text-decoration: none; }
.nav-toggle { display: none; background: none; border: 0; padding: 0.5rem; cursor: pointer; }
.nav-toggle span { display: block; width: 1.4rem; height: 2px; margin: 4px 0; background: var(--color-text); }
.theme-toggle { background: var(--primary-light); color: var(--primary-color); border: 0; border-radius: 999px; width: 2.25rem; height: 2.25rem; cursor: pointer; font-size: 1.1rem; }
[data-theme="dark"] .theme-toggle-light, [data-theme="light"] .theme-toggle-dark { display: none; }

.section { padding: 5rem 0; }
.section-alt { background: var(--color-surface); }
.section-title { font-size: 2rem; margin-bottom: 2rem; position: relative; }
.section-title::after { content: ""; display: block; width: 3rem; height: 4px; margin-top: 0.75rem; border-radius: 2px; background: var(--primary-color); }

.hero { background: linear-gradient(135deg, var(--primary-tint), transparent 60%); }
.hero-inner { display: flex; align-items: center; gap: 3rem; min-height: 70vh; }
.hero-avatar { width: 11rem; height: 11rem; border-radius: 50%; object-fit: cover; border: 4px solid var(--primary-light); }
.hero-initials { display: flex; align-items: center; justify-content: center; font-size: 3rem; font-weight: 700; color: var(--primary-color); background: var(--primary-light); }
.hero-greeting { color: var(--primary-color); font-weight: 600; margin: 0 0 0.5rem; }
.hero-name { font-size: 3rem; }
.hero-subtitle { font-size: 1.35rem; color: var(--color-muted); font-weight: 500; margin-top: 0.75rem; }
.hero-summary { max-width: 40rem; color: var(--color-muted); margin: 1.25rem 0 0; }
.hero-actions { display: flex; flex-wrap: wrap; gap: 0.75rem; margin-top: 2rem; }

.btn { display: inline-flex; align-items: center; gap: 0.5rem; padding: 0.7rem 1.4rem; border-radius: 0.5rem; font-weight: 600; border: 2px solid var(--primary-color); transition: transform 0.15s ease; }
.btn:hover { text-decoration: none; transform: translateY(-1px); }
.btn-primary { background: var(--primary-color); color: #ffffff; }
.btn-secondary { background: transparent; color: var(--primary-color); }

.about-text { margin: 0 0 1rem; max-width: 48rem; }
.skills { margin-top: 2rem; }
.skills-title { font-size: 1.15rem; margin-bottom: 1rem; }
.skill-list { display: flex; flex-wrap: wrap; gap: 0.5rem; list-style: none; margin: 0; padding: 0; }
.skill-tag, .tag { background: var(--primary-light); color: var(--primary-color); border-radius: 999px; padding: 0.3rem 0.85rem; font-size: 0.875rem; font-weight: 500; }

.project-grid, .achievement-grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(18rem, 1fr)); gap: 1.5rem; }
.project-card, .achievement-card { background: var(--color-bg); border: 1px solid var(--color-border); border-radius: 0.75rem; overflow: hidden; }
.project-image { width: 100%; height: 11rem; object-fit: cover; }
.project-body { padding: 1.25rem; }
.project-title { font-size: 1.2rem; }
.project-description { color: var(--color-muted); }
.project-tags { display: flex; flex-wrap: wrap; gap: 0.4rem; margin: 1rem 0; }
.project-links { display: flex; gap: 1rem; }
.project-link { display: inline-flex; align-items: center; gap: 0.35rem; font-weight: 500; }

.timeline { border-left: 2px solid var(--primary-light); padding-left: 1.5rem; display: grid; gap: 2rem; }
.timeline-item { position: relative; }
.timeline-item::before { content: ""; position: absolute; left: calc(-1.5rem - 7px); top: 0.45rem; width: 12px; height: 12px; border-radius: 50%; background: var(--primary-color); }
.timeline-header { display: flex; flex-wrap: wrap; justify-content: space-between; gap: 0.5rem; }
.timeline-title { font-size: 1.2rem; }
.timeline-period { color: var(--primary-color); font-weight: 500; font-size: 0.9rem; }
.timeline-subtitle { color: var(--color-muted); margin: 0.25rem 0 0.5rem; font-weight: 500; }
.timeline-description { margin: 0.5rem 0; }
.timeline-points { margin: 0.5rem 0 0; padding-left: 1.2rem; }

.achievement-card { padding: 1.25rem; }
.achievement-header { display: flex; justify-content: space-between; gap: 1rem; }
.achievement-title { font-size: 1.1rem; }
.achievement-date { color: var(--primary-color); font-size: 0.875rem; font-weight: 600; }
.achievement-description { color: var(--color-muted); margin: 0.5rem 0 0; }

.contact-inner { text-align: center; }
.contact-inner .section-title::after { margin-left: auto; margin-right: auto; }
.contact-message { color: var(--color-muted); max-width: 36rem; margin: 0 auto 2rem; }
.contact-list { display: flex; flex-wrap: wrap; justify-content: center; gap: 1rem; }
.contact-item { display: inline-flex; align-items: center; gap: 0.5rem; padding: 0.75rem 1.25rem; border-radius: 0.5rem; background: var(--primary-tint); color: var(--color-text); }

.social-links { display: flex; flex-wrap: wrap; gap: 1rem; }
.social-link { display: inline-flex; align-items: center; gap: 0.5rem; padding: 0.6rem 1.1rem; border: 1px solid var(--color-border); border-radius: 0.5rem; color: var(--color-text); }
.social-link:hover { border-color: var(--primary-color); color: var(--primary-color); text-decoration: none; }

.site-footer { border-top: 1px solid var(--color-border); padding: 2rem 0; color: var(--color-muted); font-size: 0.9rem; }
.footer-inner { display: flex; flex-wrap: wrap; justify-content: space-between; align-items: center; gap: 1rem; }
.footer-links { display: flex; gap: 1rem; list-style: none; margin: 0; padding: 0; }
.footer-links a { color: var(--color-muted); }
.footer-copyright { margin: 0; }

@media (max-width: 768px) {
  .nav-toggle { display: block; }
  .nav-links { display: none; position: absolute; top: 4rem; left: 0; right: 0; flex-direction: column; gap: 0; background: var(--color-bg); border-bottom: 1px solid var(--color-border); }
  .nav-links.open { display: flex; }
  .nav-links li { padding: 0.75rem 1.5rem; }
  .hero-inner { flex-direction: column; text-align: center; padding: 3rem 0; }
  .hero-actions { justify-content: center; }
  .hero-name { font-size: 2.25rem; }
  .section { padding: 3.5rem 0; }
}
"#;

/// Theme toggle, mobile menu, smooth scrolling and live data binding
pub const CLIENT_SCRIPT: &str = r##"(function () {
  'use strict';

  var THEME_KEY = 'portfolio-theme';
  var root = document.documentElement;

  function applyTheme(mode) {
    root.setAttribute('data-theme', mode);
    root.classList.toggle('dark', mode === 'dark');
  }

  try {
    var stored = window.localStorage.getItem(THEME_KEY);
    if (stored === 'light' || stored === 'dark') {
      applyTheme(stored);
    }
  } catch (e) {}

  function lookup(data, path) {
    return path.split('.').reduce(function (value, key) {
      return value == null ? undefined : value[key];
    }, data);
  }

  function hydrate(data) {
    if (!data) {
      return;
    }
    document.querySelectorAll('[data-bind]').forEach(function (node) {
      var value = lookup(data, node.getAttribute('data-bind'));
      if (typeof value === 'string' && value.length > 0) {
        node.textContent = value;
      }
    });
    if (data.settings && data.settings.primaryColor) {
      root.style.setProperty('--primary-color', data.settings.primaryColor);
    }
  }

  function loadData() {
    var embedded = document.getElementById('portfolio-data');
    if (embedded) {
      try {
        hydrate(JSON.parse(embedded.textContent));
      } catch (e) {}
      return;
    }
    var source = document.body.getAttribute('data-source');
    if (source && window.fetch) {
      fetch(source)
        .then(function (response) { return response.ok ? response.json() : null; })
        .then(hydrate)
        .catch(function () {});
    }
  }

  document.addEventListener('DOMContentLoaded', function () {
    var themeToggle = document.getElementById('theme-toggle');
    if (themeToggle) {
      themeToggle.addEventListener('click', function () {
        var next = root.getAttribute('data-theme') === 'dark' ? 'light' : 'dark';
        applyTheme(next);
        try {
          window.localStorage.setItem(THEME_KEY, next);
        } catch (e) {}
      });
    }

    var navToggle = document.getElementById('nav-toggle');
    var navMenu = document.getElementById('nav-menu');
    if (navToggle && navMenu) {
      navToggle.addEventListener('click', function () {
        var open = navMenu.classList.toggle('open');
        navToggle.setAttribute('aria-expanded', open ? 'true' : 'false');
      });
    }

    document.querySelectorAll('a[href^="#"]').forEach(function (link) {
      link.addEventListener('click', function (event) {
        var id = link.getAttribute('href').slice(1);
        var target = id ? document.getElementById(id) : null;
        if (!target) {
          return;
        }
        event.preventDefault();
        target.scrollIntoView({ behavior: 'smooth' });
        if (navMenu) {
          navMenu.classList.remove('open');
        }
      });
    });

    loadData();
  });

  window.addEventListener('message', function (event) {
    if (event.data && event.data.type === 'portfolio:update') {
      hydrate(event.data.data);
    }
  });
})();
"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stylesheet_starts_with_theme_variables() {
        let mut data = PortfolioData::sample();
        data.settings.primary_color = "#ff8800".to_string();
        let css = render_stylesheet(&data, ThemeMode::Light);
        assert!(css.starts_with(":root {"));
        assert!(css.contains("--primary-color: #FF8800;"));
        assert!(css.contains(".btn-primary"));
    }

    #[test]
    fn test_tailwind_config_uses_theme() {
        let config = render_tailwind_config(&PortfolioData::sample());
        assert!(config.starts_with("tailwind.config = {"));
        assert!(config.contains("DEFAULT: '#0067C7'"));
        assert!(config.contains("sans: ['Inter'"));
        assert!(config.contains("heading: ['Poppins'"));
    }

    #[test]
    fn test_client_script_uses_storage_key() {
        assert!(CLIENT_SCRIPT.contains(&format!("'{}'", THEME_STORAGE_KEY)));
        assert!(CLIENT_SCRIPT.contains("portfolio:update"));
    }
}
