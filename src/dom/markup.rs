/// Page markup
///
/// A site page is described by a small JSON document instead of HTML. The
/// builder below turns it into a `Document` with the same element ids and
/// classes a hand-written gallery page would carry, and lays the sections
/// out top to bottom so scroll-spy has real geometry to work with.
use serde::{Deserialize, Serialize};

use super::{Document, NodeId};
use crate::config::SiteConfig;
use crate::error::Result;

/// Height of the section generated for gallery content when the page has no
/// `gallery` section of its own
const GALLERY_HOST_HEIGHT: f32 = 980.0;

fn default_true() -> bool {
    true
}

/// Root of a page markup file
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SiteMarkup {
    pub title: String,
    #[serde(default)]
    pub config: SiteConfig,
    #[serde(default)]
    pub navbar: Option<NavbarMarkup>,
    #[serde(default)]
    pub sections: Vec<SectionMarkup>,
    #[serde(default)]
    pub gallery: Vec<GalleryItemMarkup>,
    #[serde(default)]
    pub carousel: Option<CarouselMarkup>,
    /// Emit the lightbox overlay elements
    #[serde(default = "default_true")]
    pub lightbox: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NavbarMarkup {
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub links: Vec<LinkMarkup>,
}

/// A navigation entry; a non-empty `dropdown` turns it into a submenu toggle
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LinkMarkup {
    pub label: String,
    pub href: String,
    #[serde(default)]
    pub dropdown: Vec<LinkMarkup>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SectionMarkup {
    pub id: String,
    pub heading: String,
    #[serde(default)]
    pub body: String,
    pub height: f32,
}

/// One tile of the gallery grid. Tiles without `src` render as placeholders
/// and are not part of the lightbox collection.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GalleryItemMarkup {
    #[serde(default)]
    pub src: Option<String>,
    #[serde(default)]
    pub alt: String,
    #[serde(default)]
    pub caption: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CarouselMarkup {
    pub images: Vec<ImageMarkup>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ImageMarkup {
    pub src: String,
    #[serde(default)]
    pub alt: String,
}

impl SiteMarkup {
    /// Parse from a JSON string (from disk)
    pub fn from_json(json: &str) -> Result<Self> {
        let markup: Self = serde_json::from_str(json)?;
        if let Some(count) = markup.carousel_count_mismatch() {
            log::warn!(
                "⚠️  Carousel has {} images but pages through {}; some slides will be empty",
                count,
                markup.config.carousel_total
            );
        }
        Ok(markup)
    }

    /// Number of carousel images when it differs from `carousel_total`
    pub fn carousel_count_mismatch(&self) -> Option<usize> {
        let count = self.carousel.as_ref()?.images.len();
        (count != self.config.carousel_total).then_some(count)
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The page shown when no site file exists yet
    pub fn demo() -> Self {
        let link = |label: &str, href: &str| LinkMarkup {
            label: label.to_string(),
            href: href.to_string(),
            dropdown: Vec::new(),
        };
        let section = |id: &str, heading: &str, body: &str, height: f32| SectionMarkup {
            id: id.to_string(),
            heading: heading.to_string(),
            body: body.to_string(),
            height,
        };
        let captions = [
            "Harbour at dawn",
            "Old town rooftops",
            "Fog over the ridge",
            "Market day",
            "Night tram",
            "First snow",
        ];

        SiteMarkup {
            title: "Lumière Photo Club".to_string(),
            config: SiteConfig::default(),
            navbar: Some(NavbarMarkup {
                brand: "Lumière".to_string(),
                links: vec![
                    link("Home", "#home"),
                    link("About", "#about"),
                    LinkMarkup {
                        label: "Gallery".to_string(),
                        href: "gallery.html".to_string(),
                        dropdown: vec![
                            link("Highlights", "#gallery"),
                            link("Archive", "archive.html#home"),
                        ],
                    },
                    link("Schedule", "#schedule"),
                ],
            }),
            sections: vec![
                section(
                    "home",
                    "Lumière Photo Club",
                    "Photo walks, critiques and exhibitions since 2009.",
                    640.0,
                ),
                section(
                    "about",
                    "About us",
                    "We are a group of amateur photographers meeting every other week.",
                    520.0,
                ),
                section("gallery", "Gallery", "Selected work from our members.", 980.0),
                section(
                    "schedule",
                    "Schedule",
                    "Walks start at 9:00 from the central station.",
                    560.0,
                ),
            ],
            gallery: captions
                .iter()
                .enumerate()
                .map(|(i, caption)| GalleryItemMarkup {
                    src: Some(format!("assets/gallery-{}.jpg", i + 1)),
                    alt: caption.to_string(),
                    caption: Some(caption.to_string()),
                })
                .collect(),
            carousel: Some(CarouselMarkup {
                images: (1..=5)
                    .map(|i| ImageMarkup {
                        src: format!("assets/carousel-{}.jpg", i),
                        alt: format!("Carousel image {}", i),
                    })
                    .collect(),
            }),
            lightbox: true,
        }
    }

    /// Build the element tree for this page at the given viewport width
    pub fn build_document(&self, inner_width: f32) -> Document {
        let mut doc = Document::new(inner_width);
        let body = doc.body();

        if let Some(navbar) = &self.navbar {
            build_navbar(&mut doc, body, navbar, self.config.navbar_height);
        }

        let mut top = 0.0;
        let mut gallery_host = None;
        for section in &self.sections {
            let node = doc.append(body, "section");
            doc.set_id(node, &section.id);
            doc.add_class(node, "section");
            let heading = doc.append(node, "h2");
            doc.set_text(heading, section.heading.as_str());
            if !section.body.is_empty() {
                let paragraph = doc.append(node, "p");
                doc.set_text(paragraph, section.body.as_str());
            }

            let element = doc.element_mut(node);
            element.offset_top = top;
            element.offset_height = section.height;
            top += section.height;

            if section.id == "gallery" {
                gallery_host = Some(node);
            }
        }

        // Gallery content lives in the #gallery section, or in a section of
        // its own after the others
        let has_gallery_content = !self.gallery.is_empty() || self.carousel.is_some();
        let host = match gallery_host {
            Some(host) => host,
            None if has_gallery_content => {
                let node = doc.append(body, "section");
                doc.add_class(node, "section");
                let element = doc.element_mut(node);
                element.offset_top = top;
                element.offset_height = GALLERY_HOST_HEIGHT;
                node
            }
            None => body,
        };
        if !self.gallery.is_empty() {
            build_gallery_grid(&mut doc, host, &self.gallery);
        }
        if let Some(carousel) = &self.carousel {
            build_carousel(&mut doc, host, carousel);
        }

        if self.lightbox {
            build_lightbox(&mut doc, body);
        }

        doc
    }
}

fn build_navbar(doc: &mut Document, body: NodeId, navbar: &NavbarMarkup, height: f32) {
    let nav = doc.append(body, "nav");
    doc.set_id(nav, "navbar");
    doc.add_class(nav, "navbar");
    doc.element_mut(nav).offset_height = height;

    let brand = doc.append(nav, "a");
    doc.add_class(brand, "nav-brand");
    doc.set_attribute(brand, "href", "#home");
    doc.set_text(brand, navbar.brand.as_str());

    let toggle = doc.append(nav, "div");
    doc.set_id(toggle, "mobile-menu");
    doc.add_class(toggle, "menu-toggle");

    let menu = doc.append(nav, "ul");
    doc.add_class(menu, "nav-menu");

    for link in &navbar.links {
        let item = doc.append(menu, "li");
        doc.add_class(item, "nav-item");

        if link.dropdown.is_empty() {
            let anchor = doc.append(item, "a");
            doc.add_class(anchor, "nav-link");
            doc.set_attribute(anchor, "href", link.href.as_str());
            doc.set_text(anchor, link.label.as_str());
            continue;
        }

        doc.add_class(item, "dropdown");
        let anchor = doc.append(item, "a");
        doc.add_class(anchor, "dropdown-toggle");
        doc.set_attribute(anchor, "href", link.href.as_str());
        doc.set_text(anchor, link.label.as_str());

        let submenu = doc.append(item, "ul");
        doc.add_class(submenu, "dropdown-menu");
        for entry in &link.dropdown {
            let li = doc.append(submenu, "li");
            let anchor = doc.append(li, "a");
            doc.add_class(anchor, "nav-link");
            doc.add_class(anchor, "dropdown-link");
            doc.set_attribute(anchor, "href", entry.href.as_str());
            doc.set_text(anchor, entry.label.as_str());
        }
    }
}

fn build_gallery_grid(doc: &mut Document, host: NodeId, items: &[GalleryItemMarkup]) {
    let grid = doc.append(host, "div");
    doc.add_class(grid, "gallery-grid");

    for item in items {
        let tile = doc.append(grid, "div");
        doc.add_class(tile, "gallery-item");

        if let Some(src) = &item.src {
            let img = doc.append(tile, "img");
            doc.set_attribute(img, "src", src.as_str());
            doc.set_attribute(img, "alt", item.alt.as_str());
        }
        if let Some(caption) = &item.caption {
            let node = doc.append(tile, "div");
            doc.add_class(node, "gallery-caption");
            doc.set_text(node, caption.as_str());
        }
    }
}

fn build_carousel(doc: &mut Document, host: NodeId, carousel: &CarouselMarkup) {
    let root = doc.append(host, "div");
    doc.add_class(root, "gallery-carousel");

    let prev = doc.append(root, "button");
    doc.set_id(prev, "prevBtn");
    doc.add_class(prev, "carousel-btn");
    doc.set_text(prev, "‹");

    let viewport = doc.append(root, "div");
    doc.add_class(viewport, "gallery-container");
    let track = doc.append(viewport, "div");
    doc.add_class(track, "gallery-track");
    for image in &carousel.images {
        let img = doc.append(track, "img");
        doc.set_attribute(img, "src", image.src.as_str());
        doc.set_attribute(img, "alt", image.alt.as_str());
    }

    let next = doc.append(root, "button");
    doc.set_id(next, "nextBtn");
    doc.add_class(next, "carousel-btn");
    doc.set_text(next, "›");
}

fn build_lightbox(doc: &mut Document, body: NodeId) {
    let root = doc.append(body, "div");
    doc.set_id(root, "lightbox");
    doc.add_class(root, "lightbox");

    let close = doc.append(root, "span");
    doc.set_id(close, "lightbox-close");
    doc.set_text(close, "×");

    let prev = doc.append(root, "button");
    doc.set_id(prev, "lightbox-prev");
    doc.set_text(prev, "‹");

    let content = doc.append(root, "div");
    doc.add_class(content, "lightbox-content");
    let image = doc.append(content, "img");
    doc.set_id(image, "lightbox-image");
    let caption = doc.append(content, "div");
    doc.set_id(caption, "lightbox-caption");

    let next = doc.append(root, "button");
    doc.set_id(next, "lightbox-next");
    doc.set_text(next, "›");
}
