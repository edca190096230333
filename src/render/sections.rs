// src/render/sections.rs
//! One pure function per portfolio section

use super::icons::Icon;
use super::{escape_html, non_blank, safe_url};
use crate::types::portfolio_data::{ButtonStyle, HeroButton, PortfolioData};

pub const MAX_HERO_BUTTONS: usize = 3;

const EXTERNAL_LINK_ATTRS: &str = r#"target="_blank" rel="noopener noreferrer""#;

/// Short nav label: last word of the name, the whole name if single-word
pub fn logo_label(name: &str) -> String {
    name.split_whitespace()
        .last()
        .map(|word| word.to_string())
        .unwrap_or_else(|| "Portfolio".to_string())
}

fn initials(name: &str) -> String {
    let words: Vec<&str> = name.split_whitespace().collect();
    let first = words.first().and_then(|w| w.chars().next());
    let last = if words.len() > 1 {
        words.last().and_then(|w| w.chars().next())
    } else {
        None
    };

    let letters: String = first
        .into_iter()
        .chain(last)
        .flat_map(|c| c.to_uppercase())
        .collect();

    if letters.is_empty() {
        "?".to_string()
    } else {
        letters
    }
}

fn join_lines(parts: impl Iterator<Item = String>) -> String {
    parts.collect::<Vec<_>>().join("\n")
}

fn section_heading(title: &str) -> String {
    format!(
        r#"<h2 class="section-title">{}</h2>"#,
        escape_html(title.trim())
    )
}

fn paragraphs(text: &str, class: &str) -> String {
    join_lines(
        text.split("\n\n")
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(|p| {
                let lines = p
                    .lines()
                    .map(|line| escape_html(line.trim()))
                    .collect::<Vec<_>>()
                    .join("<br>");
                format!(r#"<p class="{}">{}</p>"#, class, lines)
            }),
    )
}

fn is_external(url: &str) -> bool {
    let lower = url.trim().to_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

fn link_target(url: &str) -> &'static str {
    if is_external(url) {
        EXTERNAL_LINK_ATTRS
    } else {
        ""
    }
}

// ===== Navigation =====

pub fn render_navigation(data: &PortfolioData) -> String {
    let items = join_lines(data.navigation.items.iter().map(|item| {
        format!(
            r#"        <li><a href="{}" class="nav-link">{}</a></li>"#,
            safe_url(&item.url),
            escape_html(item.name.trim())
        )
    }));

    format!(
        r##"<nav class="site-nav" id="site-nav">
  <div class="container nav-inner">
    <a href="#hero" class="nav-logo">{logo}</a>
    <button type="button" class="nav-toggle" id="nav-toggle" aria-label="Toggle menu" aria-expanded="false" aria-controls="nav-menu"><span></span><span></span><span></span></button>
    <ul class="nav-links" id="nav-menu">
{items}
    </ul>
    <button type="button" class="theme-toggle" id="theme-toggle" aria-label="Toggle dark mode"><span class="theme-toggle-light">&#9788;</span><span class="theme-toggle-dark">&#9790;</span></button>
  </div>
</nav>"##,
        logo = escape_html(&logo_label(&data.settings.name)),
        items = items,
    )
}

// ===== Hero =====

fn render_hero_button(button: &HeroButton) -> String {
    let class = match button.style {
        ButtonStyle::Primary => "btn btn-primary",
        ButtonStyle::Secondary => "btn btn-secondary",
    };
    let icon = button.icon.map(|i| i.svg()).unwrap_or("");
    let target = link_target(&button.url);
    let spacer = if target.is_empty() { "" } else { " " };

    format!(
        r#"<a href="{url}" class="{class}"{spacer}{target}>{icon}<span>{text}</span></a>"#,
        url = safe_url(&button.url),
        class = class,
        spacer = spacer,
        target = target,
        icon = icon,
        text = escape_html(button.text.trim()),
    )
}

pub fn render_hero(data: &PortfolioData) -> String {
    let hero = &data.sections.hero;
    if !hero.enabled {
        return String::new();
    }
    let settings = &data.settings;

    let avatar = match non_blank(Some(settings.profile_image.as_str())) {
        Some(src) => format!(
            r#"<img src="{}" alt="{}" class="hero-avatar">"#,
            safe_url(src),
            escape_html(settings.name.trim())
        ),
        None => format!(
            r#"<div class="hero-avatar hero-initials" aria-hidden="true">{}</div>"#,
            escape_html(&initials(&settings.name))
        ),
    };

    let greeting = non_blank(Some(hero.greeting.as_str()))
        .map(|g| format!(r#"<p class="hero-greeting">{}</p>"#, escape_html(g)))
        .unwrap_or_default();

    let subtitle_parts: Vec<String> = [settings.title.as_str(), settings.location.as_str()]
        .iter()
        .filter_map(|part| non_blank(Some(*part)))
        .map(escape_html)
        .collect();
    let subtitle = if subtitle_parts.is_empty() {
        String::new()
    } else {
        format!(
            r#"<h2 class="hero-subtitle">{}</h2>"#,
            subtitle_parts.join(r#" <span class="hero-separator">&middot;</span> "#)
        )
    };

    let summary = non_blank(Some(settings.summary.as_str()))
        .map(|s| {
            format!(
                r#"<p class="hero-summary" data-bind="settings.summary">{}</p>"#,
                escape_html(s)
            )
        })
        .unwrap_or_default();

    let buttons: Vec<String> = hero
        .buttons
        .iter()
        .filter(|b| !b.text.trim().is_empty())
        .take(MAX_HERO_BUTTONS)
        .map(render_hero_button)
        .collect();
    let actions = if buttons.is_empty() {
        String::new()
    } else {
        format!(r#"<div class="hero-actions">{}</div>"#, buttons.join(""))
    };

    format!(
        r#"<section id="hero" class="section hero">
  <div class="container hero-inner">
    {avatar}
    <div class="hero-text">
      {greeting}
      <h1 class="hero-name" data-bind="settings.name">{name}</h1>
      {subtitle}
      {summary}
      {actions}
    </div>
  </div>
</section>"#,
        avatar = avatar,
        greeting = greeting,
        name = escape_html(settings.name.trim()),
        subtitle = subtitle,
        summary = summary,
        actions = actions,
    )
}

// ===== About =====

pub fn render_about(data: &PortfolioData) -> String {
    let about = &data.sections.about;
    if !about.enabled {
        return String::new();
    }

    let skills = if about.skills.enabled && !about.skills.items.is_empty() {
        let tags = join_lines(
            about
                .skills
                .items
                .iter()
                .filter_map(|skill| non_blank(Some(skill.as_str())))
                .map(|skill| format!(r#"        <li class="skill-tag">{}</li>"#, escape_html(skill))),
        );
        format!(
            r#"<div class="skills">
      <h3 class="skills-title">{}</h3>
      <ul class="skill-list">
{}
      </ul>
    </div>"#,
            escape_html(about.skills.title.trim()),
            tags
        )
    } else {
        String::new()
    };

    format!(
        r#"<section id="about" class="section">
  <div class="container">
    {heading}
    <div class="about-content">
{content}
    </div>
    {skills}
  </div>
</section>"#,
        heading = section_heading(&about.title),
        content = paragraphs(&about.content, "about-text"),
        skills = skills,
    )
}

// ===== Projects =====

pub fn render_projects(data: &PortfolioData) -> String {
    let projects = &data.sections.projects;
    if !projects.enabled || projects.items.is_empty() {
        return String::new();
    }

    let cards = join_lines(projects.items.iter().map(|project| {
        let image = non_blank(project.image.as_deref())
            .map(|src| {
                format!(
                    r#"<img src="{}" alt="{}" class="project-image" loading="lazy">"#,
                    safe_url(src),
                    escape_html(project.title.trim())
                )
            })
            .unwrap_or_default();

        let tags = if project.tags.is_empty() {
            String::new()
        } else {
            format!(
                r#"<div class="project-tags">{}</div>"#,
                project
                    .tags
                    .iter()
                    .filter_map(|tag| non_blank(Some(tag.as_str())))
                    .map(|tag| format!(r#"<span class="tag">{}</span>"#, escape_html(tag)))
                    .collect::<Vec<_>>()
                    .join("")
            )
        };

        let mut links = Vec::new();
        if let Some(link) = non_blank(project.link.as_deref()) {
            links.push(format!(
                r#"<a href="{}" class="project-link" {}>{}<span>Live</span></a>"#,
                safe_url(link),
                EXTERNAL_LINK_ATTRS,
                Icon::Globe.svg()
            ));
        }
        if let Some(repo) = non_blank(project.repository.as_deref()) {
            links.push(format!(
                r#"<a href="{}" class="project-link" {}>{}<span>Source</span></a>"#,
                safe_url(repo),
                EXTERNAL_LINK_ATTRS,
                Icon::Github.svg()
            ));
        }
        let links = if links.is_empty() {
            String::new()
        } else {
            format!(r#"<div class="project-links">{}</div>"#, links.join(""))
        };

        format!(
            r#"      <article class="project-card">
        {image}
        <div class="project-body">
          <h3 class="project-title">{title}</h3>
          <p class="project-description">{description}</p>
          {tags}
          {links}
        </div>
      </article>"#,
            image = image,
            title = escape_html(project.title.trim()),
            description = escape_html(project.description.trim()),
            tags = tags,
            links = links,
        )
    }));

    format!(
        r#"<section id="projects" class="section section-alt">
  <div class="container">
    {heading}
    <div class="project-grid">
{cards}
    </div>
  </div>
</section>"#,
        heading = section_heading(&projects.title),
        cards = cards,
    )
}

// ===== Experience =====

pub fn render_experience(data: &PortfolioData) -> String {
    let experience = &data.sections.experience;
    if !experience.enabled || experience.items.is_empty() {
        return String::new();
    }

    let entries = join_lines(experience.items.iter().map(|job| {
        let mut subtitle = escape_html(job.company.trim());
        if let Some(location) = non_blank(job.location.as_deref()) {
            subtitle.push_str(&format!(
                r#" <span class="timeline-separator">&middot;</span> {}"#,
                escape_html(location)
            ));
        }

        let description = non_blank(job.description.as_deref())
            .map(|d| format!(r#"<p class="timeline-description">{}</p>"#, escape_html(d)))
            .unwrap_or_default();

        let points: Vec<String> = job
            .achievements
            .iter()
            .filter_map(|a| non_blank(Some(a.as_str())))
            .map(|a| format!("<li>{}</li>", escape_html(a)))
            .collect();
        let points = if points.is_empty() {
            String::new()
        } else {
            format!(r#"<ul class="timeline-points">{}</ul>"#, points.join(""))
        };

        format!(
            r#"      <article class="timeline-item">
        <div class="timeline-header">
          <h3 class="timeline-title">{position}</h3>
          <span class="timeline-period">{period}</span>
        </div>
        <p class="timeline-subtitle">{subtitle}</p>
        {description}
        {points}
      </article>"#,
            position = escape_html(job.position.trim()),
            period = escape_html(job.period.trim()),
            subtitle = subtitle,
            description = description,
            points = points,
        )
    }));

    format!(
        r#"<section id="experience" class="section">
  <div class="container">
    {heading}
    <div class="timeline">
{entries}
    </div>
  </div>
</section>"#,
        heading = section_heading(&experience.title),
        entries = entries,
    )
}

// ===== Education =====

pub fn render_education(data: &PortfolioData) -> String {
    let education = &data.sections.education;
    if !education.enabled || education.items.is_empty() {
        return String::new();
    }

    let entries = join_lines(education.items.iter().map(|entry| {
        let description = non_blank(entry.description.as_deref())
            .map(|d| format!(r#"<p class="timeline-description">{}</p>"#, escape_html(d)))
            .unwrap_or_default();

        format!(
            r#"      <article class="timeline-item">
        <div class="timeline-header">
          <h3 class="timeline-title">{degree}</h3>
          <span class="timeline-period">{period}</span>
        </div>
        <p class="timeline-subtitle">{institution}</p>
        {description}
      </article>"#,
            degree = escape_html(entry.degree.trim()),
            period = escape_html(entry.period.trim()),
            institution = escape_html(entry.institution.trim()),
            description = description,
        )
    }));

    format!(
        r#"<section id="education" class="section section-alt">
  <div class="container">
    {heading}
    <div class="timeline">
{entries}
    </div>
  </div>
</section>"#,
        heading = section_heading(&education.title),
        entries = entries,
    )
}

// ===== Achievements =====

pub fn render_achievements(data: &PortfolioData) -> String {
    let achievements = &data.sections.achievements;
    if !achievements.enabled || achievements.items.is_empty() {
        return String::new();
    }

    let cards = join_lines(achievements.items.iter().map(|item| {
        let date = non_blank(item.date.as_deref())
            .map(|d| format!(r#"<span class="achievement-date">{}</span>"#, escape_html(d)))
            .unwrap_or_default();
        let description = non_blank(item.description.as_deref())
            .map(|d| format!(r#"<p class="achievement-description">{}</p>"#, escape_html(d)))
            .unwrap_or_default();

        format!(
            r#"      <article class="achievement-card">
        <div class="achievement-header"><h3 class="achievement-title">{}</h3>{}</div>
        {}
      </article>"#,
            escape_html(item.title.trim()),
            date,
            description
        )
    }));

    format!(
        r#"<section id="achievements" class="section">
  <div class="container">
    {heading}
    <div class="achievement-grid">
{cards}
    </div>
  </div>
</section>"#,
        heading = section_heading(&achievements.title),
        cards = cards,
    )
}

// ===== Contact =====

fn tel_href(phone: &str) -> String {
    let digits: String = phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect();
    format!("tel:{}", digits)
}

pub fn render_contact(data: &PortfolioData) -> String {
    let contact = &data.sections.contact;
    if !contact.enabled {
        return String::new();
    }

    let message = non_blank(contact.message.as_deref())
        .map(|m| format!(r#"<p class="contact-message">{}</p>"#, escape_html(m)))
        .unwrap_or_default();

    let mut items = Vec::new();
    if let Some(email) = non_blank(contact.email.as_deref()) {
        items.push(format!(
            r#"      <a href="mailto:{}" class="contact-item contact-email">{}<span>{}</span></a>"#,
            escape_html(email),
            Icon::Mail.svg(),
            escape_html(email)
        ));
    }
    if let Some(phone) = non_blank(contact.phone.as_deref()) {
        items.push(format!(
            r#"      <a href="{}" class="contact-item contact-phone">{}<span>{}</span></a>"#,
            escape_html(&tel_href(phone)),
            Icon::Phone.svg(),
            escape_html(phone)
        ));
    }
    if let Some(location) = non_blank(contact.location.as_deref()) {
        items.push(format!(
            r#"      <div class="contact-item contact-location">{}<span>{}</span></div>"#,
            Icon::Map.svg(),
            escape_html(location)
        ));
    }

    format!(
        r#"<section id="contact" class="section section-alt">
  <div class="container contact-inner">
    {heading}
    {message}
    <div class="contact-list">
{items}
    </div>
  </div>
</section>"#,
        heading = section_heading(&contact.title),
        message = message,
        items = items.join("\n"),
    )
}

// ===== Social =====

pub fn render_social(data: &PortfolioData) -> String {
    let social = &data.sections.social;
    if !social.enabled {
        return String::new();
    }

    let links: Vec<String> = social
        .items
        .iter()
        .filter(|link| !link.url.trim().is_empty())
        .map(|link| {
            format!(
                r#"      <a href="{url}" class="social-link" aria-label="{label}" {attrs}>{icon}<span>{label}</span></a>"#,
                url = safe_url(&link.url),
                label = escape_html(link.platform.trim()),
                attrs = EXTERNAL_LINK_ATTRS,
                icon = link.resolved_icon().svg(),
            )
        })
        .collect();

    if links.is_empty() {
        return String::new();
    }

    format!(
        r#"<section id="social" class="section">
  <div class="container">
    {heading}
    <div class="social-links">
{links}
    </div>
  </div>
</section>"#,
        heading = section_heading(&social.title),
        links = links.join("\n"),
    )
}

// ===== Footer =====

pub fn render_footer(data: &PortfolioData) -> String {
    let footer = &data.footer;
    if !footer.enabled {
        return String::new();
    }

    let links = if data.navigation.items.is_empty() {
        String::new()
    } else {
        format!(
            r#"<ul class="footer-links">{}</ul>"#,
            data.navigation
                .items
                .iter()
                .map(|item| format!(
                    r#"<li><a href="{}">{}</a></li>"#,
                    safe_url(&item.url),
                    escape_html(item.name.trim())
                ))
                .collect::<Vec<_>>()
                .join("")
        )
    };

    let copyright = match non_blank(Some(footer.copyright.as_str())) {
        Some(text) => escape_html(text),
        None => match non_blank(Some(data.settings.name.as_str())) {
            Some(name) => format!("&copy; {}", escape_html(name)),
            None => String::new(),
        },
    };

    format!(
        r#"<footer id="footer" class="site-footer">
  <div class="container footer-inner">
    {links}
    <p class="footer-copyright" data-bind="footer.copyright">{copyright}</p>
  </div>
</footer>"#,
        links = links,
        copyright = copyright,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::portfolio_data::NavItem;

    #[test]
    fn test_logo_label() {
        assert_eq!(logo_label("Alex Morgan"), "Morgan");
        assert_eq!(logo_label("Prince"), "Prince");
        assert_eq!(logo_label("  Mary Ann  Smith "), "Smith");
        assert_eq!(logo_label(""), "Portfolio");
    }

    #[test]
    fn test_initials() {
        assert_eq!(initials("Alex Morgan"), "AM");
        assert_eq!(initials("Prince"), "P");
        assert_eq!(initials("jean claude van damme"), "JD");
        assert_eq!(initials(""), "?");
    }

    #[test]
    fn test_navigation_items_in_order() {
        let mut data = PortfolioData::sample();
        data.navigation.items = vec![NavItem::new("Home", "/"), NavItem::new("About", "#about")];
        let nav = render_navigation(&data);
        let home = nav.find(r#"<li><a href="/" class="nav-link">Home</a></li>"#).unwrap();
        let about = nav
            .find(r##"<li><a href="#about" class="nav-link">About</a></li>"##)
            .unwrap();
        assert!(home < about);
        assert_eq!(nav.matches("<li>").count(), 2);
    }

    #[test]
    fn test_disabled_sections_render_nothing() {
        let mut data = PortfolioData::sample();
        data.sections.hero.enabled = false;
        data.sections.about.enabled = false;
        data.sections.projects.enabled = false;
        data.sections.experience.enabled = false;
        data.sections.education.enabled = false;
        data.sections.achievements.enabled = false;
        data.sections.contact.enabled = false;
        data.sections.social.enabled = false;
        data.footer.enabled = false;

        assert_eq!(render_hero(&data), "");
        assert_eq!(render_about(&data), "");
        assert_eq!(render_projects(&data), "");
        assert_eq!(render_experience(&data), "");
        assert_eq!(render_education(&data), "");
        assert_eq!(render_achievements(&data), "");
        assert_eq!(render_contact(&data), "");
        assert_eq!(render_social(&data), "");
        assert_eq!(render_footer(&data), "");
    }

    #[test]
    fn test_hero_button_limit_and_styles() {
        let mut data = PortfolioData::sample();
        let template = data.sections.hero.buttons[1].clone();
        data.sections.hero.buttons.extend(vec![template.clone(), template]);

        let hero = render_hero(&data);
        assert_eq!(hero.matches(r#"class="btn "#).count(), MAX_HERO_BUTTONS);
        assert!(hero.contains(r##"<a href="#contact" class="btn btn-primary">"##));
        assert!(hero.contains("btn-secondary"));
        assert!(hero.contains(Icon::Mail.svg()));
    }

    #[test]
    fn test_hero_without_image_uses_initials() {
        let data = PortfolioData::sample();
        let hero = render_hero(&data);
        assert!(hero.contains(r#"<div class="hero-avatar hero-initials" aria-hidden="true">AM</div>"#));

        let mut with_image = data.clone();
        with_image.settings.profile_image = "https://cdn.example.com/me.png".to_string();
        assert!(render_hero(&with_image).contains(r#"<img src="https://cdn.example.com/me.png""#));
    }

    #[test]
    fn test_hero_subtitle_skips_missing_location() {
        let mut data = PortfolioData::sample();
        data.settings.location.clear();
        let hero = render_hero(&data);
        assert!(hero.contains(r#"<h2 class="hero-subtitle">Full-Stack Developer</h2>"#));
    }

    #[test]
    fn test_contact_omits_missing_phone() {
        let mut data = PortfolioData::sample();
        data.sections.contact.phone = None;
        let contact = render_contact(&data);
        assert!(contact.contains("contact-email"));
        assert!(contact.contains("contact-location"));
        assert!(!contact.contains("contact-phone"));
        assert!(!contact.contains("tel:"));
    }

    #[test]
    fn test_contact_phone_href() {
        let contact = render_contact(&PortfolioData::sample());
        assert!(contact.contains(r#"href="tel:+15550102030""#));
    }

    #[test]
    fn test_skills_keep_order() {
        let about = render_about(&PortfolioData::sample());
        let positions: Vec<usize> = ["TypeScript", "React", "Rust", "PostgreSQL", "AWS"]
            .iter()
            .map(|skill| about.find(&format!(">{}</li>", skill)).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_about_paragraphs() {
        let about = render_about(&PortfolioData::sample());
        assert_eq!(about.matches(r#"<p class="about-text">"#).count(), 2);
    }

    #[test]
    fn test_empty_list_sections_are_omitted() {
        let mut data = PortfolioData::sample();
        data.sections.projects.items.clear();
        data.sections.social.items.clear();
        assert_eq!(render_projects(&data), "");
        assert_eq!(render_social(&data), "");
    }

    #[test]
    fn test_user_text_is_escaped() {
        let mut data = PortfolioData::sample();
        data.sections.projects.items[0].title = "<img src=x onerror=alert(1)>".to_string();
        data.sections.projects.items[0].link = Some("javascript:alert(1)".to_string());
        let projects = render_projects(&data);
        assert!(projects.contains("&lt;img src=x onerror=alert(1)&gt;"));
        assert!(!projects.contains("javascript:"));
    }

    #[test]
    fn test_footer_falls_back_to_name() {
        let mut data = PortfolioData::sample();
        data.footer.copyright.clear();
        let footer = render_footer(&data);
        assert!(footer.contains("&copy; Alex Morgan"));
        assert_eq!(footer.matches("<li>").count(), data.navigation.items.len());
    }

    #[test]
    fn test_social_icons_follow_platform() {
        let social = render_social(&PortfolioData::sample());
        assert!(social.contains(Icon::Github.svg()));
        assert!(social.contains(Icon::Linkedin.svg()));
        assert!(social.find("GitHub").unwrap() < social.find("LinkedIn").unwrap());
    }
}
