// src/render/icons.rs
//! Inline SVG icon table

use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Icon {
    Mail,
    Phone,
    Map,
    Globe,
    Linkedin,
    Github,
    Twitter,
    Instagram,
    Download,
    Document,
}

impl Icon {
    pub const ALL: [Icon; 10] = [
        Icon::Mail,
        Icon::Phone,
        Icon::Map,
        Icon::Globe,
        Icon::Linkedin,
        Icon::Github,
        Icon::Twitter,
        Icon::Instagram,
        Icon::Download,
        Icon::Document,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Mail => "mail",
            Self::Phone => "phone",
            Self::Map => "map",
            Self::Globe => "globe",
            Self::Linkedin => "linkedin",
            Self::Github => "github",
            Self::Twitter => "twitter",
            Self::Instagram => "instagram",
            Self::Download => "download",
            Self::Document => "document",
        }
    }

    /// Case-insensitive lookup, accepting the aliases extraction output tends to use
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "mail" | "email" | "envelope" => Some(Self::Mail),
            "phone" | "telephone" => Some(Self::Phone),
            "map" | "location" | "map-pin" => Some(Self::Map),
            "globe" | "website" | "web" => Some(Self::Globe),
            "linkedin" => Some(Self::Linkedin),
            "github" => Some(Self::Github),
            "twitter" | "x" => Some(Self::Twitter),
            "instagram" => Some(Self::Instagram),
            "download" => Some(Self::Download),
            "document" | "file" | "resume" | "cv" => Some(Self::Document),
            _ => None,
        }
    }

    pub fn svg(&self) -> &'static str {
        match self {
            Self::Mail => MAIL_SVG,
            Self::Phone => PHONE_SVG,
            Self::Map => MAP_SVG,
            Self::Globe => GLOBE_SVG,
            Self::Linkedin => LINKEDIN_SVG,
            Self::Github => GITHUB_SVG,
            Self::Twitter => TWITTER_SVG,
            Self::Instagram => INSTAGRAM_SVG,
            Self::Download => DOWNLOAD_SVG,
            Self::Document => DOCUMENT_SVG,
        }
    }
}

impl Serialize for Icon {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Markup for a named icon; unknown names give an empty string
pub fn get_icon_svg(name: &str) -> &'static str {
    Icon::from_name(name).map(|icon| icon.svg()).unwrap_or("")
}

const MAIL_SVG: &str = r#"<svg class="icon" xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" aria-hidden="true"><path d="M4 4h16c1.1 0 2 .9 2 2v12c0 1.1-.9 2-2 2H4c-1.1 0-2-.9-2-2V6c0-1.1.9-2 2-2z"/><polyline points="22,6 12,13 2,6"/></svg>"#;

const PHONE_SVG: &str = r#"<svg class="icon" xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" aria-hidden="true"><path d="M22 16.92v3a2 2 0 0 1-2.18 2 19.79 19.79 0 0 1-8.63-3.07 19.5 19.5 0 0 1-6-6 19.79 19.79 0 0 1-3.07-8.67A2 2 0 0 1 4.11 2h3a2 2 0 0 1 2 1.72 12.84 12.84 0 0 0 .7 2.81 2 2 0 0 1-.45 2.11L8.09 9.91a16 16 0 0 0 6 6l1.27-1.27a2 2 0 0 1 2.11-.45 12.84 12.84 0 0 0 2.81.7A2 2 0 0 1 22 16.92z"/></svg>"#;

const MAP_SVG: &str = r#"<svg class="icon" xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" aria-hidden="true"><path d="M21 10c0 7-9 13-9 13s-9-6-9-13a9 9 0 0 1 18 0z"/><circle cx="12" cy="10" r="3"/></svg>"#;

const GLOBE_SVG: &str = r#"<svg class="icon" xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" aria-hidden="true"><circle cx="12" cy="12" r="10"/><line x1="2" y1="12" x2="22" y2="12"/><path d="M12 2a15.3 15.3 0 0 1 4 10 15.3 15.3 0 0 1-4 10 15.3 15.3 0 0 1-4-10 15.3 15.3 0 0 1 4-10z"/></svg>"#;

const LINKEDIN_SVG: &str = r#"<svg class="icon" xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" aria-hidden="true"><path d="M16 8a6 6 0 0 1 6 6v7h-4v-7a2 2 0 0 0-2-2 2 2 0 0 0-2 2v7h-4v-7a6 6 0 0 1 6-6z"/><rect x="2" y="9" width="4" height="12"/><circle cx="4" cy="4" r="2"/></svg>"#;

const GITHUB_SVG: &str = r#"<svg class="icon" xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" aria-hidden="true"><path d="M9 19c-5 1.5-5-2.5-7-3m14 6v-3.87a3.37 3.37 0 0 0-.94-2.61c3.14-.35 6.44-1.54 6.44-7A5.44 5.44 0 0 0 20 4.77 5.07 5.07 0 0 0 19.91 1S18.73.65 16 2.48a13.38 13.38 0 0 0-7 0C6.27.65 5.09 1 5.09 1A5.07 5.07 0 0 0 5 4.77a5.44 5.44 0 0 0-1.5 3.78c0 5.42 3.3 6.61 6.44 7A3.37 3.37 0 0 0 9 18.13V22"/></svg>"#;

const TWITTER_SVG: &str = r#"<svg class="icon" xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" aria-hidden="true"><path d="M23 3a10.9 10.9 0 0 1-3.14 1.53 4.48 4.48 0 0 0-7.86 3v1A10.66 10.66 0 0 1 3 4s-4 9 5 13a11.64 11.64 0 0 1-7 2c9 5 20 0 20-11.5a4.5 4.5 0 0 0-.08-.83A7.72 7.72 0 0 0 23 3z"/></svg>"#;

const INSTAGRAM_SVG: &str = r#"<svg class="icon" xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" aria-hidden="true"><rect x="2" y="2" width="20" height="20" rx="5" ry="5"/><path d="M16 11.37A4 4 0 1 1 12.63 8 4 4 0 0 1 16 11.37z"/><line x1="17.5" y1="6.5" x2="17.51" y2="6.5"/></svg>"#;

const DOWNLOAD_SVG: &str = r#"<svg class="icon" xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" aria-hidden="true"><path d="M21 15v4a2 2 0 0 1-2 2H5a2 2 0 0 1-2-2v-4"/><polyline points="7 10 12 15 17 10"/><line x1="12" y1="15" x2="12" y2="3"/></svg>"#;

const DOCUMENT_SVG: &str = r#"<svg class="icon" xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" aria-hidden="true"><path d="M14 2H6a2 2 0 0 0-2 2v16a2 2 0 0 0 2 2h12a2 2 0 0 0 2-2V8z"/><polyline points="14 2 14 8 20 8"/><line x1="16" y1="13" x2="8" y2="13"/><line x1="16" y1="17" x2="8" y2="17"/></svg>"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_icon_is_empty() {
        assert_eq!(get_icon_svg("unknown-name"), "");
        assert_eq!(get_icon_svg(""), "");
    }

    #[test]
    fn test_every_icon_has_markup() {
        for icon in Icon::ALL {
            assert!(icon.svg().starts_with("<svg"), "{} has no svg", icon.name());
            assert_eq!(Icon::from_name(icon.name()), Some(icon));
            assert_eq!(get_icon_svg(icon.name()), icon.svg());
        }
    }

    #[test]
    fn test_aliases() {
        assert_eq!(Icon::from_name("Email"), Some(Icon::Mail));
        assert_eq!(Icon::from_name(" LinkedIn "), Some(Icon::Linkedin));
        assert_eq!(Icon::from_name("x"), Some(Icon::Twitter));
    }
}
