//! Builders for each block of the page. They only create elements; motion is
//! applied by `site` once everything is mounted.

use web_sys::{Element, HtmlCanvasElement, HtmlElement};
use wasm_bindgen::JsCast;

use super::dom::{append, as_html, set_attr, Dom};
use crate::content::{self, Project, WordStyle};
use crate::error::{SiteError, SiteResult};
use crate::layers::Layer;

const GRAIN_URL: &str = "https://grainy-gradients.vercel.app/noise.svg";
const CAMO_URL: &str = "https://www.transparenttextures.com/patterns/army-camo.png";
const CUBES_URL: &str = "https://www.transparenttextures.com/patterns/cubes.png";

// Stripped-down line icons, 24x24 viewBox.
const ICON_DISC: &str = r#"<svg viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2"><circle cx="12" cy="12" r="10"/><circle cx="12" cy="12" r="2"/></svg>"#;
const ICON_APERTURE: &str = r#"<svg viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2"><circle cx="12" cy="12" r="10"/><path d="m14.31 8 5.74 9.94M9.69 8h11.48M7.38 12l5.74-9.94M9.69 16 3.95 6.06M14.31 16H2.83M16.62 12l-5.74 9.94"/></svg>"#;
const ICON_INSTAGRAM: &str = r#"<svg viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2"><rect x="2" y="2" width="20" height="20" rx="5"/><circle cx="12" cy="12" r="4"/><path d="M17.5 6.5h.01"/></svg>"#;
const ICON_TWITTER: &str = r#"<svg viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2"><path d="M22 4s-.7 2.1-2 3.4c1.6 10-9.4 17.3-18 11.6 2.2.1 4.4-.6 6-2C3 15.5.5 9.6 3 5c2.2 2.6 5.6 4.1 9 4-.9-4.2 4-6.6 7-3.8 1.1 0 3-1.2 3-1.2z"/></svg>"#;
const ICON_MAIL: &str = r#"<svg viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2"><rect x="2" y="4" width="20" height="16" rx="2"/><path d="m22 7-10 6L2 7"/></svg>"#;

fn icon(dom: &Dom, class: &str, markup: &str) -> SiteResult<Element> {
    let holder = dom.el("span", &format!("icon {class}"))?;
    holder.set_inner_html(markup);
    Ok(holder)
}

fn social_icon(name: &str) -> &'static str {
    match name {
        "Instagram" => ICON_INSTAGRAM,
        "Twitter" => ICON_TWITTER,
        _ => ICON_MAIL,
    }
}

pub(crate) fn particle_canvas(dom: &Dom) -> SiteResult<HtmlCanvasElement> {
    let canvas = dom.layer(Layer::Particles, "canvas", "")?;
    canvas
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| SiteError::dom("canvas element is not an HtmlCanvasElement"))
}

pub(crate) fn camo(dom: &Dom) -> SiteResult<Element> {
    let el = dom.layer(Layer::Camo, "div", "")?;
    let html = as_html(&el)?;
    super::dom::set_style(&html, "background-image", &format!("url('{CAMO_URL}')"))?;
    Ok(el)
}

pub(crate) fn grain(dom: &Dom) -> SiteResult<Element> {
    let el = dom.layer(Layer::Grain, "div", "")?;
    let html = as_html(&el)?;
    super::dom::set_style(&html, "background-image", &format!("url('{GRAIN_URL}')"))?;
    Ok(el)
}

pub(crate) fn viewfinder(dom: &Dom) -> SiteResult<Element> {
    let root = dom.layer(Layer::Viewfinder, "div", "")?;

    let top = dom.el("div", "vf-bar vf-top")?;
    let readouts = dom.el("div", "vf-readouts")?;
    for (i, text) in content::viewfinder_readouts().iter().enumerate() {
        let class = if i == 0 { "vf-rec" } else { "" };
        append(&readouts, &[&dom.text("span", class, text)?])?;
    }
    append(
        &top,
        &[&dom.el("div", "vf-corner vf-tl")?, &readouts, &dom.el("div", "vf-corner vf-tr")?],
    )?;

    let crosshair = dom.text("div", "vf-crosshair", "+")?;

    let bottom = dom.el("div", "vf-bar vf-bottom")?;
    let battery = dom.el("div", "vf-battery")?;
    let meter = dom.el("div", "vf-meter")?;
    let fill = dom.el("div", "vf-meter-fill")?;
    set_attr(&fill, "style", &format!("width:{}%;", content::BATTERY_PERCENT))?;
    append(&meter, &[&fill])?;
    append(
        &battery,
        &[&meter, &dom.text("span", "", &format!("BATTERY {}%", content::BATTERY_PERCENT))?],
    )?;
    append(
        &bottom,
        &[&dom.el("div", "vf-corner vf-bl")?, &battery, &dom.el("div", "vf-corner vf-br")?],
    )?;

    append(&root, &[&top, &crosshair, &bottom])?;
    Ok(root)
}

pub(crate) fn navbar(dom: &Dom) -> SiteResult<Element> {
    let nav = dom.layer(Layer::Navbar, "nav", "")?;
    let brand = dom.text("span", "nav-brand font-impact", content::BRAND_MARK)?;
    let links = dom.el("div", "nav-links")?;
    for item in content::nav_links() {
        let a = dom.text("a", "nav-link", item)?;
        set_attr(&a, "href", "#")?;
        append(&links, &[&a])?;
    }
    let contact = dom.text("button", "nav-contact", content::CONTACT_LABEL)?;
    append(&nav, &[&brand, &links, &contact])?;
    Ok(nav)
}

pub(crate) struct Hero {
    pub(crate) root: Element,
    /// Receives the scroll parallax offset.
    pub(crate) parallax: HtmlElement,
    pub(crate) title: HtmlElement,
    pub(crate) glitch: HtmlElement,
    pub(crate) tagline: HtmlElement,
}

pub(crate) fn hero(dom: &Dom) -> SiteResult<Hero> {
    let root = dom.el("section", "hero")?;

    let backdrop = dom.el("div", "hero-backdrop")?;
    let shade = dom.el("div", "hero-shade")?;
    let video = dom.el("video", "hero-video")?;
    for flag in ["autoplay", "loop", "muted", "playsinline"] {
        set_attr(&video, flag, "")?;
    }
    let source = dom.el("source", "")?;
    set_attr(&source, "src", content::HERO_VIDEO)?;
    set_attr(&source, "type", "video/mp4")?;
    append(&video, &[&source])?;
    append(&backdrop, &[&shade, &video])?;

    let inner = dom.el("div", "hero-inner")?;
    let logo = dom.el("div", "hero-logo")?;
    let title = dom.text("h1", "hero-title font-impact", content::BRAND)?;
    let glitch = dom.text("h1", "hero-title hero-glitch font-impact", content::BRAND)?;
    set_attr(&glitch, "aria-hidden", "true")?;
    let badge = dom.text("div", "hero-badge", content::HERO_BADGE)?;
    append(&logo, &[&title, &glitch, &badge])?;

    let tagline = dom.el("div", "hero-tagline")?;
    let line = dom.el("p", "")?;
    line.set_inner_html("Ingeniería Visual <span class=\"accent-green\">///</span> Street Culture");
    append(&tagline, &[&line])?;

    append(&inner, &[&logo, &tagline])?;
    append(&root, &[&backdrop, &inner])?;

    Ok(Hero {
        parallax: as_html(&logo)?,
        title: as_html(&title)?,
        glitch: as_html(&glitch)?,
        tagline: as_html(&tagline)?,
        root,
    })
}

/// Returns the strip and the track that scrolls.
pub(crate) fn marquee(dom: &Dom) -> SiteResult<(Element, HtmlElement)> {
    let strip = dom.el("div", "marquee")?;
    let track = dom.el("div", "marquee-track")?;
    for _ in 0..content::MARQUEE_REPEAT {
        for word in content::marquee_words() {
            let el = match word.style {
                WordStyle::Disc => icon(dom, "marquee-disc spin", ICON_DISC)?,
                WordStyle::Outline => dom.text("span", "word-outline", word.text)?,
                WordStyle::Solid => dom.text("span", "word-solid", word.text)?,
                WordStyle::Accent => dom.text("span", "word-accent", word.text)?,
            };
            append(&track, &[&el])?;
        }
    }
    append(&strip, &[&track])?;
    Ok((strip, as_html(&track)?))
}

pub(crate) fn philosophy(dom: &Dom) -> SiteResult<Element> {
    let section = dom.el("section", "philosophy")?;
    let grid = dom.el("div", "philosophy-grid")?;

    let copy = dom.el("div", "philosophy-copy")?;
    let tag = dom.text("div", "tag-green", "MANIFIESTO.md")?;
    let heading = dom.el("h2", "font-impact")?;
    heading.set_inner_html("Caos <span class=\"gradient-text\">Controlado</span>");
    let prompt = dom.el("p", "philosophy-prompt")?;
    prompt.set_inner_html("&gt; Ejecutando visión creativa...<br>&gt; Renderizando realidad...");
    let claim = dom.el("p", "philosophy-claim")?;
    claim.set_inner_html("No seguimos tendencias. <br>Las atropellamos.");
    append(&copy, &[&tag, &heading, &prompt, &claim])?;

    let figure = dom.el("div", "philosophy-figure")?;
    let glow = dom.el("div", "figure-glow")?;
    let frame = dom.el("div", "figure-frame")?;
    let img = dom.el("img", "grayscale")?;
    set_attr(&img, "src", content::MANIFESTO_IMAGE)?;
    set_attr(&img, "alt", "Philosophy")?;
    set_attr(&img, "loading", "lazy")?;
    let raw = dom.text("div", "figure-raw font-impact", "RAW")?;
    append(&frame, &[&img, &raw])?;
    append(&figure, &[&glow, &frame])?;

    append(&grid, &[&copy, &figure])?;
    append(&section, &[&grid])?;
    Ok(section)
}

fn project_card(dom: &Dom, project: &Project, index: usize) -> SiteResult<Element> {
    let card = dom.el("article", "project-card")?;

    let media = dom.el("div", "project-media")?;
    let tint = dom.el("div", "project-tint")?;
    let img = dom.el("img", "grayscale")?;
    set_attr(&img, "src", project.image)?;
    set_attr(&img, "alt", project.title)?;
    set_attr(&img, "loading", "lazy")?;
    let view = dom.text("div", "project-view", "VIEW PROJECT_")?;
    append(&media, &[&tint, &img, &view])?;

    let meta = dom.el("div", "project-meta")?;
    let title = dom.text("h3", "project-title font-impact", project.title)?;
    let category = dom.text("span", "project-category", project.category)?;
    let index = dom.text("span", "project-index", &Project::index_label(index))?;
    append(&meta, &[&title, &category, &index])?;

    append(&card, &[&media, &meta])?;
    Ok(card)
}

/// Returns the section and its cards, which reveal as they scroll in.
pub(crate) fn gallery(dom: &Dom) -> SiteResult<(Element, Vec<Element>)> {
    let section = dom.el("section", "gallery")?;
    let header = dom.el("div", "gallery-header")?;
    let heading = dom.text("h2", "font-impact", "OBRA")?;
    let dots = dom.el("div", "gallery-dots")?;
    append(
        &dots,
        &[&dom.el("div", "dot dot-green bounce")?, &dom.el("div", "dot dot-purple bounce delayed")?],
    )?;
    append(&header, &[&heading, &dots])?;

    let grid = dom.el("div", "gallery-grid")?;
    let cards = content::projects()
        .iter()
        .enumerate()
        .map(|(i, project)| project_card(dom, project, i))
        .collect::<SiteResult<Vec<_>>>()?;
    for card in &cards {
        append(&grid, &[card])?;
    }

    append(&section, &[&header, &grid])?;
    Ok((section, cards))
}

/// Returns the section and the ticker track that scrolls.
pub(crate) fn tech_specs(dom: &Dom) -> SiteResult<(Element, HtmlElement)> {
    let section = dom.el("section", "tech")?;
    let header = dom.el("div", "tech-header")?;
    append(
        &header,
        &[&icon(dom, "tech-aperture spin-slow", ICON_APERTURE)?, &dom.text("h2", "", "TECH_STACK")?],
    )?;

    let window = dom.el("div", "tech-window")?;
    let track = dom.el("div", "tech-track")?;
    for spec in content::tech_ticker() {
        let cell = dom.el("div", "tech-cell")?;
        append(
            &cell,
            &[&dom.text("div", "tech-label", spec.label)?, &dom.text("div", "tech-value font-impact", spec.value)?],
        )?;
        append(&track, &[&cell])?;
    }
    append(&window, &[&track])?;

    append(&section, &[&header, &window])?;
    Ok((section, as_html(&track)?))
}

pub(crate) fn footer(dom: &Dom) -> SiteResult<Element> {
    let footer = dom.el("footer", "footer")?;
    let texture = dom.el("div", "footer-texture")?;
    set_attr(&texture, "style", &format!("background-image:url('{CUBES_URL}');"))?;

    let cta = dom.el("a", "footer-cta")?;
    set_attr(&cta, "href", "#")?;
    append(&cta, &[&dom.text("div", "footer-cta-box font-impact", content::FOOTER_CTA)?])?;

    let socials = dom.el("div", "footer-socials")?;
    for link in content::social_links() {
        let a = dom.el("a", "social")?;
        set_attr(&a, "href", link.href)?;
        set_attr(&a, "aria-label", link.name)?;
        append(&a, &[&icon(dom, "social-icon", social_icon(link.name))?])?;
        append(&socials, &[&a])?;
    }

    let line = dom.text("div", "footer-line", content::FOOTER_LINE)?;
    append(&footer, &[&texture, &cta, &socials, &line])?;
    Ok(footer)
}
