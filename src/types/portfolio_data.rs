// src/types/portfolio_data.rs
//! Portfolio document shared by the renderer, the extraction client and the deploy adapters

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

use crate::render::icons::Icon;
use crate::render::theme::{is_hex_color, DEFAULT_PRIMARY_COLOR};

// ===== Root Document =====

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PortfolioData {
    #[serde(deserialize_with = "null_as_default")]
    pub settings: Settings,
    #[serde(deserialize_with = "null_as_default")]
    pub sections: Sections,
    #[serde(deserialize_with = "null_as_default")]
    pub navigation: Navigation,
    #[serde(deserialize_with = "null_as_default")]
    pub footer: Footer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(deserialize_with = "null_as_default")]
    pub profile_image: String,
    #[serde(deserialize_with = "null_as_primary_color")]
    pub primary_color: String,
    #[serde(deserialize_with = "null_as_default")]
    pub font_family: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading_font: Option<String>,
    #[serde(deserialize_with = "lenient_or_default")]
    pub theme: ThemeMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            name: String::new(),
            title: String::new(),
            location: String::new(),
            summary: String::new(),
            profile_image: String::new(),
            primary_color: DEFAULT_PRIMARY_COLOR.to_string(),
            font_family: "Inter".to_string(),
            heading_font: None,
            theme: ThemeMode::Light,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl FromStr for ThemeMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(format!("Unknown theme: {}", other)),
        }
    }
}

// ===== Sections =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Sections {
    #[serde(deserialize_with = "null_as_default")]
    pub hero: HeroSection,
    #[serde(deserialize_with = "null_as_default")]
    pub about: AboutSection,
    #[serde(deserialize_with = "null_as_default")]
    pub experience: ListSection<ExperienceItem>,
    #[serde(deserialize_with = "null_as_default")]
    pub projects: ListSection<ProjectItem>,
    #[serde(deserialize_with = "null_as_default")]
    pub education: ListSection<EducationItem>,
    #[serde(deserialize_with = "null_as_default")]
    pub achievements: ListSection<AchievementItem>,
    #[serde(deserialize_with = "null_as_default")]
    pub contact: ContactSection,
    #[serde(deserialize_with = "null_as_default")]
    pub social: ListSection<SocialLink>,
}

impl Default for Sections {
    fn default() -> Self {
        Self {
            hero: HeroSection::default(),
            about: AboutSection::default(),
            experience: ListSection::titled("Experience"),
            projects: ListSection::titled("Projects"),
            education: ListSection::titled("Education"),
            achievements: ListSection::titled("Achievements"),
            contact: ContactSection::default(),
            social: ListSection::titled("Connect"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeroSection {
    #[serde(deserialize_with = "null_as_enabled")]
    pub enabled: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub greeting: String,
    #[serde(deserialize_with = "null_as_default")]
    pub buttons: Vec<HeroButton>,
}

impl Default for HeroSection {
    fn default() -> Self {
        Self {
            enabled: true,
            title: "Home".to_string(),
            greeting: "Hi, I'm".to_string(),
            buttons: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeroButton {
    #[serde(deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(
        deserialize_with = "lenient_icon",
        skip_serializing_if = "Option::is_none"
    )]
    pub icon: Option<Icon>,
    #[serde(deserialize_with = "lenient_or_default")]
    pub style: ButtonStyle,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonStyle {
    #[default]
    Primary,
    Secondary,
}

impl FromStr for ButtonStyle {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "primary" => Ok(Self::Primary),
            "secondary" => Ok(Self::Secondary),
            other => Err(format!("Unknown button style: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AboutSection {
    #[serde(deserialize_with = "null_as_enabled")]
    pub enabled: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(deserialize_with = "null_as_default")]
    pub skills: SkillsBlock,
}

impl Default for AboutSection {
    fn default() -> Self {
        Self {
            enabled: true,
            title: "About Me".to_string(),
            content: String::new(),
            skills: SkillsBlock::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SkillsBlock {
    #[serde(deserialize_with = "null_as_enabled")]
    pub enabled: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub items: Vec<String>,
}

impl Default for SkillsBlock {
    fn default() -> Self {
        Self {
            enabled: true,
            title: "Skills".to_string(),
            items: Vec::new(),
        }
    }
}

/// A toggleable section holding an ordered list of entries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    rename_all = "camelCase",
    default,
    bound(deserialize = "T: Deserialize<'de>")
)]
pub struct ListSection<T> {
    #[serde(deserialize_with = "null_as_enabled")]
    pub enabled: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub items: Vec<T>,
}

impl<T> ListSection<T> {
    pub fn titled(title: &str) -> Self {
        Self {
            enabled: true,
            title: title.to_string(),
            items: Vec::new(),
        }
    }
}

impl<T> Default for ListSection<T> {
    fn default() -> Self {
        Self::titled("")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceItem {
    #[serde(deserialize_with = "null_as_default")]
    pub position: String,
    #[serde(deserialize_with = "null_as_default")]
    pub company: String,
    #[serde(deserialize_with = "null_as_default")]
    pub period: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectItem {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationItem {
    #[serde(deserialize_with = "null_as_default")]
    pub institution: String,
    #[serde(deserialize_with = "null_as_default")]
    pub degree: String,
    #[serde(deserialize_with = "null_as_default")]
    pub period: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AchievementItem {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactSection {
    #[serde(deserialize_with = "null_as_enabled")]
    pub enabled: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Default for ContactSection {
    fn default() -> Self {
        Self {
            enabled: true,
            title: "Get In Touch".to_string(),
            email: None,
            phone: None,
            location: None,
            message: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SocialLink {
    #[serde(deserialize_with = "null_as_default")]
    pub platform: String,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(
        deserialize_with = "lenient_icon",
        skip_serializing_if = "Option::is_none"
    )]
    pub icon: Option<Icon>,
}

impl SocialLink {
    /// Explicit icon, or the one matching the platform name
    pub fn resolved_icon(&self) -> Icon {
        self.icon
            .or_else(|| Icon::from_name(&self.platform))
            .unwrap_or(Icon::Globe)
    }
}

// ===== Navigation & Footer =====

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Navigation {
    #[serde(deserialize_with = "null_as_default")]
    pub items: Vec<NavItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NavItem {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
}

impl NavItem {
    pub fn new(name: &str, url: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Footer {
    #[serde(deserialize_with = "null_as_enabled")]
    pub enabled: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub copyright: String,
}

impl Default for Footer {
    fn default() -> Self {
        Self {
            enabled: true,
            copyright: String::new(),
        }
    }
}

// ===== Lenient Field Parsing =====

// Extraction output uses `null` for anything it could not find
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_enabled<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(true))
}

fn null_as_primary_color<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .unwrap_or_else(|| DEFAULT_PRIMARY_COLOR.to_string()))
}

fn lenient_or_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + Default,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.parse().ok()).unwrap_or_default())
}

fn lenient_icon<'de, D>(deserializer: D) -> std::result::Result<Option<Icon>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(Icon::from_name))
}

// ===== Validation =====

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub field: String,
    pub message: String,
}

impl ValidationIssue {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl PortfolioData {
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Failed to parse portfolio data JSON")
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize portfolio data")
    }

    /// Report editor-facing problems; rendering still works on an invalid document
    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        if self.settings.name.trim().is_empty() {
            issues.push(ValidationIssue::new("settings.name", "Name is required"));
        }

        if !is_hex_color(&self.settings.primary_color) {
            issues.push(ValidationIssue::new(
                "settings.primaryColor",
                format!(
                    "'{}' is not a 6-digit hex color",
                    self.settings.primary_color
                ),
            ));
        }

        for (index, item) in self.navigation.items.iter().enumerate() {
            if item.name.trim().is_empty() {
                issues.push(ValidationIssue::new(
                    format!("navigation.items[{}].name", index),
                    "Navigation label is empty",
                ));
            }
            if item.url.trim().is_empty() {
                issues.push(ValidationIssue::new(
                    format!("navigation.items[{}].url", index),
                    "Navigation link has no URL",
                ));
            }
        }

        if let Some(email) = self.sections.contact.email.as_deref() {
            if !email.trim().is_empty() && !email.contains('@') {
                issues.push(ValidationIssue::new(
                    "sections.contact.email",
                    format!("'{}' is not an email address", email),
                ));
            }
        }

        for (index, link) in self.sections.social.items.iter().enumerate() {
            if link.url.trim().is_empty() {
                issues.push(ValidationIssue::new(
                    format!("sections.social.items[{}].url", index),
                    format!("{} link has no URL", link.platform),
                ));
            }
        }

        issues
    }

    /// Default document offered when extraction fails or the user starts from scratch
    pub fn sample() -> Self {
        Self {
            settings: Settings {
                name: "Alex Morgan".to_string(),
                title: "Full-Stack Developer".to_string(),
                location: "San Francisco, CA".to_string(),
                summary: "I build fast, accessible web applications and enjoy turning complex problems into simple, elegant interfaces.".to_string(),
                profile_image: String::new(),
                primary_color: DEFAULT_PRIMARY_COLOR.to_string(),
                font_family: "Inter".to_string(),
                heading_font: Some("Poppins".to_string()),
                theme: ThemeMode::Light,
            },
            sections: Sections {
                hero: HeroSection {
                    enabled: true,
                    title: "Home".to_string(),
                    greeting: "Hi, I'm".to_string(),
                    buttons: vec![
                        HeroButton {
                            text: "Contact Me".to_string(),
                            url: "#contact".to_string(),
                            icon: Some(Icon::Mail),
                            style: ButtonStyle::Primary,
                        },
                        HeroButton {
                            text: "Download Resume".to_string(),
                            url: "resume.pdf".to_string(),
                            icon: Some(Icon::Download),
                            style: ButtonStyle::Secondary,
                        },
                    ],
                },
                about: AboutSection {
                    enabled: true,
                    title: "About Me".to_string(),
                    content: "I'm a developer with six years of experience shipping products across startups and larger teams.\n\nOutside of work I contribute to open source and mentor new engineers.".to_string(),
                    skills: SkillsBlock {
                        enabled: true,
                        title: "Skills".to_string(),
                        items: ["TypeScript", "React", "Rust", "PostgreSQL", "AWS"]
                            .iter()
                            .map(|s| s.to_string())
                            .collect(),
                    },
                },
                experience: ListSection {
                    enabled: true,
                    title: "Experience".to_string(),
                    items: vec![
                        ExperienceItem {
                            position: "Senior Software Engineer".to_string(),
                            company: "Brightline Labs".to_string(),
                            period: "2021 - Present".to_string(),
                            location: Some("Remote".to_string()),
                            description: Some("Lead engineer on the customer analytics platform.".to_string()),
                            achievements: vec![
                                "Cut dashboard load time by 60%".to_string(),
                                "Mentored a team of four engineers".to_string(),
                            ],
                        },
                        ExperienceItem {
                            position: "Software Engineer".to_string(),
                            company: "Northwind Traders".to_string(),
                            period: "2018 - 2021".to_string(),
                            location: Some("Seattle, WA".to_string()),
                            description: Some("Built internal tooling for order fulfilment.".to_string()),
                            achievements: Vec::new(),
                        },
                    ],
                },
                projects: ListSection {
                    enabled: true,
                    title: "Projects".to_string(),
                    items: vec![ProjectItem {
                        title: "Trailmark".to_string(),
                        description: "Offline-first hiking journal with map sync.".to_string(),
                        image: None,
                        tags: vec!["Rust".to_string(), "WebAssembly".to_string()],
                        link: Some("https://trailmark.example.com".to_string()),
                        repository: Some("https://github.com/alexmorgan/trailmark".to_string()),
                    }],
                },
                education: ListSection {
                    enabled: true,
                    title: "Education".to_string(),
                    items: vec![EducationItem {
                        institution: "University of Washington".to_string(),
                        degree: "B.S. Computer Science".to_string(),
                        period: "2014 - 2018".to_string(),
                        description: None,
                    }],
                },
                achievements: ListSection {
                    enabled: true,
                    title: "Achievements".to_string(),
                    items: vec![AchievementItem {
                        title: "Hackathon Winner".to_string(),
                        description: Some("First place, Cascadia Hack 2022".to_string()),
                        date: Some("2022".to_string()),
                    }],
                },
                contact: ContactSection {
                    enabled: true,
                    title: "Get In Touch".to_string(),
                    email: Some("alex@example.com".to_string()),
                    phone: Some("+1 (555) 010-2030".to_string()),
                    location: Some("San Francisco, CA".to_string()),
                    message: Some("I'm open to new opportunities and collaborations.".to_string()),
                },
                social: ListSection {
                    enabled: true,
                    title: "Connect".to_string(),
                    items: vec![
                        SocialLink {
                            platform: "GitHub".to_string(),
                            url: "https://github.com/alexmorgan".to_string(),
                            icon: None,
                        },
                        SocialLink {
                            platform: "LinkedIn".to_string(),
                            url: "https://linkedin.com/in/alexmorgan".to_string(),
                            icon: None,
                        },
                    ],
                },
            },
            navigation: Navigation {
                items: vec![
                    NavItem::new("Home", "#hero"),
                    NavItem::new("About", "#about"),
                    NavItem::new("Projects", "#projects"),
                    NavItem::new("Experience", "#experience"),
                    NavItem::new("Contact", "#contact"),
                ],
            },
            footer: Footer {
                enabled: true,
                copyright: "© Alex Morgan. All rights reserved.".to_string(),
            },
        }
    }
}
