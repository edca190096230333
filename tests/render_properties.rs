use portfolio_generator::render::{get_icon_svg, hex_to_rgb, hex_to_rgba, render_portfolio_document, RenderContext};
use portfolio_generator::types::portfolio_data::{NavItem, PortfolioData};
use scraper::{Html, Selector};

fn select_count(html: &str, selector: &str) -> usize {
    let document = Html::parse_document(html);
    let selector = Selector::parse(selector).unwrap();
    document.select(&selector).count()
}

fn select_texts(html: &str, selector: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(selector).unwrap();
    document
        .select(&selector)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .collect()
}

#[test]
fn rendering_is_deterministic() {
    let data = PortfolioData::sample();
    for ctx in [RenderContext::preview(), RenderContext::download(), RenderContext::published()] {
        assert_eq!(
            render_portfolio_document(&data, &ctx),
            render_portfolio_document(&data, &ctx)
        );
    }
}

#[test]
fn disabled_sections_are_absent() {
    let mut data = PortfolioData::sample();
    let html = render_portfolio_document(&data, &RenderContext::preview());
    assert_eq!(select_count(&html, "section#projects"), 1);
    assert_eq!(select_count(&html, "section#about"), 1);

    data.sections.projects.enabled = false;
    data.sections.about.enabled = false;
    let html = render_portfolio_document(&data, &RenderContext::preview());
    assert_eq!(select_count(&html, "section#projects"), 0);
    assert_eq!(select_count(&html, "section#about"), 0);
    assert_eq!(select_count(&html, "section#experience"), 1);
}

const SECTION_ORDER: [&str; 10] = [
    "site-nav",
    "hero",
    "about",
    "projects",
    "experience",
    "education",
    "achievements",
    "contact",
    "social",
    "footer",
];

fn top_level_ids(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let selector =
        Selector::parse("main.portfolio > nav, main.portfolio > section, main.portfolio > footer").unwrap();
    document
        .select(&selector)
        .filter_map(|el| el.value().id().map(str::to_string))
        .collect()
}

fn set_enabled(data: &mut PortfolioData, id: &str, enabled: bool) {
    match id {
        "hero" => data.sections.hero.enabled = enabled,
        "about" => data.sections.about.enabled = enabled,
        "projects" => data.sections.projects.enabled = enabled,
        "experience" => data.sections.experience.enabled = enabled,
        "education" => data.sections.education.enabled = enabled,
        "achievements" => data.sections.achievements.enabled = enabled,
        "contact" => data.sections.contact.enabled = enabled,
        "social" => data.sections.social.enabled = enabled,
        "footer" => data.footer.enabled = enabled,
        other => panic!("no toggle for {other}"),
    }
}

#[test]
fn sections_keep_fixed_order_for_every_toggle_combination() {
    let toggles = &SECTION_ORDER[1..];
    for mask in 0u32..(1 << toggles.len()) {
        let mut data = PortfolioData::sample();
        for (bit, id) in toggles.iter().enumerate() {
            set_enabled(&mut data, id, mask & (1 << bit) != 0);
        }

        let expected: Vec<String> = SECTION_ORDER
            .iter()
            .enumerate()
            .filter(|(i, _)| *i == 0 || mask & (1 << (i - 1)) != 0)
            .map(|(_, id)| id.to_string())
            .collect();

        let html = render_portfolio_document(&data, &RenderContext::published());
        assert_eq!(top_level_ids(&html), expected, "toggle mask {mask:#011b}");
    }
}

#[test]
fn disabled_footer_is_absent() {
    let mut data = PortfolioData::sample();
    data.footer.enabled = false;
    let html = render_portfolio_document(&data, &RenderContext::preview());
    assert_eq!(select_count(&html, "footer#footer"), 0);
}

#[test]
fn primary_color_conversions() {
    assert_eq!(hex_to_rgb("#0067C7"), "0, 103, 199");
    assert_eq!(hex_to_rgba("#0067C7", 0.08), "rgba(0,103,199,0.08)");

    let mut data = PortfolioData::sample();
    data.settings.primary_color = "#0067C7".to_string();
    let html = render_portfolio_document(&data, &RenderContext::preview());
    assert!(html.contains("--primary-rgb: 0, 103, 199;"));
    assert!(html.contains("rgba(0,103,199,0.08)"));
}

#[test]
fn unknown_icon_is_empty() {
    assert_eq!(get_icon_svg("unknown-name"), "");
    assert!(get_icon_svg("github").starts_with("<svg"));
}

#[test]
fn navigation_items_render_in_order() {
    let mut data = PortfolioData::sample();
    data.navigation.items = vec![NavItem::new("Work", "#projects"), NavItem::new("Say hi", "#contact")];

    let html = render_portfolio_document(&data, &RenderContext::preview());
    assert_eq!(select_count(&html, "nav ul.nav-links > li"), 2);
    assert_eq!(select_texts(&html, "nav ul.nav-links > li > a"), vec!["Work", "Say hi"]);
}

#[test]
fn missing_phone_is_omitted() {
    let mut data = PortfolioData::sample();
    data.sections.contact.phone = None;

    let html = render_portfolio_document(&data, &RenderContext::preview());
    assert_eq!(select_count(&html, "#contact .contact-email"), 1);
    assert_eq!(select_count(&html, "#contact .contact-location"), 1);
    assert_eq!(select_count(&html, "#contact .contact-phone"), 0);
    assert!(!html.contains("tel:"));
}

#[test]
fn json_round_trip_renders_identically() {
    let data = PortfolioData::sample();
    let json = serde_json::to_string(&data).unwrap();
    let restored = PortfolioData::from_json(&json).unwrap();

    let ctx = RenderContext::download();
    assert_eq!(
        render_portfolio_document(&data, &ctx),
        render_portfolio_document(&restored, &ctx)
    );
}

#[test]
fn user_text_is_escaped() {
    let mut data = PortfolioData::sample();
    data.settings.name = "<script>alert(1)</script>".to_string();
    let html = render_portfolio_document(&data, &RenderContext::preview());
    assert_eq!(select_count(&html, "body script:not([src]):not([id])"), 1);
    assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
}
