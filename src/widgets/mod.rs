/// Page widgets
///
/// This module wires the three independent controllers to a page:
/// - Image lightbox (lightbox.rs)
/// - Navigation bar with scroll-spy (navbar.rs)
/// - Image carousel (carousel.rs)
/// - The body scroll lock the lightbox holds while open (scroll_lock.rs)
///
/// `Page::init` is the "content loaded" step: each controller is created
/// only when its root element exists, and registers its listeners.
/// `Page::dispatch` then routes every event to the listeners of its target
/// and of each ancestor (clicks bubble up to `body` and the document).

pub mod carousel;
pub mod lightbox;
pub mod navbar;
pub mod scroll_lock;

use crate::config::SiteConfig;
use crate::dom::{
    Document, EventKind, EventOutcome, Key, Listeners, PageEvent, ScrollBehavior, ScrollRequest,
    Target,
};
use carousel::{CarouselController, CarouselHandler};
use lightbox::{LightboxController, LightboxHandler};
use navbar::{NavbarController, NavbarHandler};

/// A registered listener, routed to the controller that owns it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    Lightbox(LightboxHandler),
    Navbar(NavbarHandler),
    Carousel(CarouselHandler),
}

/// What a handler sees of the event being dispatched
#[derive(Debug, Clone, Copy)]
pub struct EventContext<'a> {
    pub event: &'a PageEvent,
    /// Where the running listener is attached (differs from `event.target`
    /// while bubbling)
    pub current_target: Target,
}

impl EventContext<'_> {
    pub fn key(&self) -> Option<&Key> {
        match &self.event.kind {
            EventKind::KeyDown(key) => Some(key),
            _ => None,
        }
    }
}

#[derive(Default)]
pub struct Page {
    lightbox: Option<LightboxController>,
    navbar: Option<NavbarController>,
    carousel: Option<CarouselController>,
    listeners: Listeners<Handler>,
}

impl Page {
    /// Create the controllers whose root elements are present and bind them
    pub fn init(doc: &mut Document, config: &SiteConfig) -> Self {
        let mut page = Page::default();

        if doc.query_selector(".gallery-item").is_some() {
            page.lightbox = LightboxController::new(doc);
        }
        if doc.query_selector(".navbar").is_some() {
            page.navbar = NavbarController::new(doc, config);
        }
        if doc.query_selector(".gallery-carousel").is_some() {
            page.carousel = Some(CarouselController::new(doc, config));
        }

        if let Some(lightbox) = &page.lightbox {
            log::info!("🖼️  Lightbox bound to {} gallery images", lightbox.images().len());
            for (target, event_type, handler) in lightbox.listeners() {
                page.listeners.add(target, event_type, Handler::Lightbox(handler));
            }
        }
        if let Some(navbar) = &page.navbar {
            log::info!("🧭 Navbar bound");
            for (target, event_type, handler) in navbar.listeners() {
                page.listeners.add(target, event_type, Handler::Navbar(handler));
            }
        }
        if let Some(carousel) = &page.carousel {
            log::info!(
                "🎠 Carousel bound ({} visible, {} pages)",
                carousel.visible_count(),
                carousel.max_slide() + 1
            );
            for (target, event_type, handler) in carousel.listeners() {
                page.listeners.add(target, event_type, Handler::Carousel(handler));
            }
        }

        log::debug!("📎 {} listeners registered", page.listeners.len());
        page
    }

    /// Run every listener for this event, then apply the default action
    pub fn dispatch(&mut self, doc: &mut Document, event: PageEvent) -> EventOutcome {
        let mut outcome = EventOutcome::default();
        let event_type = event.kind.event_type();

        for current_target in propagation_path(doc, event.target) {
            let ctx = EventContext {
                event: &event,
                current_target,
            };
            for handler in self.listeners.matching(current_target, event_type) {
                self.route(doc, handler, &ctx, &mut outcome);
            }
        }

        if !outcome.default_prevented {
            apply_link_default(doc, &event, &mut outcome);
        }

        outcome
    }

    fn route(
        &mut self,
        doc: &mut Document,
        handler: Handler,
        ctx: &EventContext<'_>,
        outcome: &mut EventOutcome,
    ) {
        match handler {
            Handler::Lightbox(h) => {
                if let Some(lightbox) = self.lightbox.as_mut() {
                    lightbox.handle(doc, h, ctx, outcome);
                }
            }
            Handler::Navbar(h) => {
                if let Some(navbar) = self.navbar.as_mut() {
                    navbar.handle(doc, h, ctx, outcome);
                }
            }
            Handler::Carousel(h) => {
                if let Some(carousel) = self.carousel.as_mut() {
                    carousel.handle(doc, h, ctx, outcome);
                }
            }
        }
    }

    pub fn lightbox(&self) -> Option<&LightboxController> {
        self.lightbox.as_ref()
    }

    pub fn navbar(&self) -> Option<&NavbarController> {
        self.navbar.as_ref()
    }

    pub fn carousel(&self) -> Option<&CarouselController> {
        self.carousel.as_ref()
    }
}

/// Targets visited while dispatching: element events bubble through their
/// ancestors to the document
fn propagation_path(doc: &Document, target: Target) -> Vec<Target> {
    match target {
        Target::Element(node) => doc
            .ancestors_inclusive(node)
            .into_iter()
            .map(Target::Element)
            .chain(std::iter::once(Target::Document))
            .collect(),
        other => vec![other],
    }
}

/// Unprevented clicks on links follow them: in-page anchors jump, anything
/// else is handed to the shell as a navigation
fn apply_link_default(doc: &Document, event: &PageEvent, outcome: &mut EventOutcome) {
    let (Target::Element(node), EventKind::Click) = (event.target, &event.kind) else {
        return;
    };
    let Some(link) = doc.closest_with_attribute(node, "href") else {
        return;
    };
    let href = doc.attribute(link, "href").unwrap_or_default();

    match href.strip_prefix('#') {
        Some(anchor) => {
            if let Some(section) = doc.get_element_by_id(anchor) {
                outcome.scroll = Some(ScrollRequest {
                    top: doc.element(section).offset_top,
                    behavior: ScrollBehavior::Instant,
                });
            }
        }
        None if !href.is_empty() => outcome.navigate = Some(href.to_string()),
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::markup::SiteMarkup;
    use crate::widgets::scroll_lock::is_locked;

    fn demo(width: f32) -> (Document, Page) {
        let markup = SiteMarkup::demo();
        let mut doc = markup.build_document(width);
        let page = Page::init(&mut doc, &markup.config);
        (doc, page)
    }

    fn by_id(doc: &Document, id: &str) -> crate::dom::NodeId {
        doc.get_element_by_id(id).unwrap()
    }

    #[test]
    fn test_demo_binds_all_controllers() {
        let (_, page) = demo(1280.0);
        assert!(page.lightbox().is_some());
        assert!(page.navbar().is_some());
        assert!(page.carousel().is_some());
    }

    #[test]
    fn test_missing_roots_skip_controllers() {
        let mut markup = SiteMarkup::demo();
        markup.gallery.clear();
        markup.carousel = None;
        markup.navbar = None;
        let mut doc = markup.build_document(1280.0);
        let mut page = Page::init(&mut doc, &markup.config);

        assert!(page.lightbox().is_none());
        assert!(page.navbar().is_none());
        assert!(page.carousel().is_none());

        // Events with nobody listening are harmless
        let outcome = page.dispatch(&mut doc, PageEvent::key_down(Key::Escape));
        assert_eq!(outcome, EventOutcome::default());
        page.dispatch(&mut doc, PageEvent::scroll());
        page.dispatch(&mut doc, PageEvent::resize());
    }

    #[test]
    fn test_gallery_without_lightbox_container() {
        let mut markup = SiteMarkup::demo();
        markup.lightbox = false;
        let mut doc = markup.build_document(1280.0);
        let mut page = Page::init(&mut doc, &markup.config);
        assert!(page.lightbox().is_none());

        let tile = doc.query_selector(".gallery-item").unwrap();
        page.dispatch(&mut doc, PageEvent::click(tile));
        assert!(!is_locked(&doc));
    }

    #[test]
    fn test_click_on_tile_image_bubbles_to_tile() {
        let (mut doc, mut page) = demo(1280.0);
        let tiles = doc.query_selector_all(".gallery-item");
        let img = doc.query_within(tiles[3], "img").unwrap();

        page.dispatch(&mut doc, PageEvent::click(img));
        let lightbox = page.lightbox().unwrap();
        assert!(lightbox.is_open());
        assert_eq!(lightbox.current_index(), 3);
        assert!(is_locked(&doc));
    }

    #[test]
    fn test_every_close_path_restores_scroll() {
        let (mut doc, mut page) = demo(1280.0);
        let body = doc.body();
        let tile = doc.query_selector(".gallery-item").unwrap();

        let close_paths = [
            PageEvent::click(by_id(&doc, "lightbox-close")),
            PageEvent::key_down(Key::Escape),
            PageEvent::click(by_id(&doc, "lightbox")),
        ];
        for close in close_paths {
            page.dispatch(&mut doc, PageEvent::click(tile));
            assert!(is_locked(&doc));
            page.dispatch(&mut doc, close);
            assert!(!page.lightbox().unwrap().is_open());
            assert_eq!(doc.style(body).get("overflow"), None);
        }
    }

    #[test]
    fn test_click_inside_overlay_does_not_close() {
        let (mut doc, mut page) = demo(1280.0);
        let tile = doc.query_selector(".gallery-item").unwrap();
        page.dispatch(&mut doc, PageEvent::click(tile));

        let ev = PageEvent::click(by_id(&doc, "lightbox-image"));
        page.dispatch(&mut doc, ev);
        assert!(page.lightbox().unwrap().is_open());

        let ev = PageEvent::click(by_id(&doc, "lightbox-next"));
        page.dispatch(&mut doc, ev);
        let lightbox = page.lightbox().unwrap();
        assert!(lightbox.is_open());
        assert_eq!(lightbox.current_index(), 1);
    }

    #[test]
    fn test_keys_only_act_while_open() {
        let (mut doc, mut page) = demo(1280.0);
        page.dispatch(&mut doc, PageEvent::key_down(Key::ArrowRight));
        assert_eq!(page.lightbox().unwrap().current_index(), 0);

        let tile = doc.query_selector(".gallery-item").unwrap();
        page.dispatch(&mut doc, PageEvent::click(tile));
        page.dispatch(&mut doc, PageEvent::key_down(Key::ArrowLeft));
        assert_eq!(page.lightbox().unwrap().current_index(), 5);
        page.dispatch(&mut doc, PageEvent::key_down(Key::ArrowRight));
        page.dispatch(&mut doc, PageEvent::key_down(Key::ArrowRight));
        assert_eq!(page.lightbox().unwrap().current_index(), 1);
        page.dispatch(&mut doc, PageEvent::key_down(Key::Other("a".to_string())));
        assert!(page.lightbox().unwrap().is_open());
    }

    #[test]
    fn test_anchor_link_click_requests_smooth_scroll_and_closes_menu() {
        let (mut doc, mut page) = demo(375.0);
        let toggle = by_id(&doc, "mobile-menu");
        page.dispatch(&mut doc, PageEvent::click(toggle));
        assert!(doc.class_list(toggle).contains("active"));

        let link = doc
            .query_selector_all(".nav-link")
            .into_iter()
            .find(|l| doc.attribute(*l, "href") == Some("#schedule"))
            .unwrap();
        let outcome = page.dispatch(&mut doc, PageEvent::click(link));

        assert!(outcome.default_prevented);
        assert_eq!(outcome.navigate, None);
        assert_eq!(
            outcome.scroll,
            Some(ScrollRequest {
                top: 2140.0 - 70.0 - 20.0,
                behavior: ScrollBehavior::Smooth
            })
        );
        assert!(!doc.class_list(toggle).contains("active"));
    }

    #[test]
    fn test_cross_page_link_navigates() {
        let (mut doc, mut page) = demo(1280.0);
        let link = doc
            .query_selector_all(".nav-link")
            .into_iter()
            .find(|l| doc.attribute(*l, "href") == Some("archive.html#home"))
            .unwrap();

        let outcome = page.dispatch(&mut doc, PageEvent::click(link));
        assert!(!outcome.default_prevented);
        assert_eq!(outcome.navigate.as_deref(), Some("archive.html#home"));
    }

    #[test]
    fn test_dropdown_toggle_navigates_only_when_wide() {
        let (mut doc, mut page) = demo(1280.0);
        let toggle = doc.query_selector(".dropdown-toggle").unwrap();
        let outcome = page.dispatch(&mut doc, PageEvent::click(toggle));
        assert_eq!(outcome.navigate.as_deref(), Some("gallery.html"));

        doc.window.inner_width = 500.0;
        let outcome = page.dispatch(&mut doc, PageEvent::click(toggle));
        assert!(outcome.default_prevented);
        assert_eq!(outcome.navigate, None);
        let dropdown = doc.query_selector(".dropdown").unwrap();
        assert!(doc.class_list(dropdown).contains("active"));
    }

    #[test]
    fn test_scroll_and_resize_reach_their_controllers() {
        let (mut doc, mut page) = demo(1280.0);

        doc.window.scroll_y = 600.0;
        page.dispatch(&mut doc, PageEvent::scroll());
        assert_eq!(page.navbar().unwrap().active_section(), "about");

        let ev = PageEvent::click(by_id(&doc, "nextBtn"));
        page.dispatch(&mut doc, ev);
        let ev = PageEvent::click(by_id(&doc, "nextBtn"));
        page.dispatch(&mut doc, ev);
        assert_eq!(page.carousel().unwrap().current_slide(), 2);

        doc.window.inner_width = 700.0;
        page.dispatch(&mut doc, PageEvent::resize());
        let carousel = page.carousel().unwrap();
        assert_eq!(carousel.visible_count(), 1);
        assert_eq!(carousel.current_slide(), 2);

        let ev = PageEvent::click(by_id(&doc, "prevBtn"));
        page.dispatch(&mut doc, ev);
        assert_eq!(page.carousel().unwrap().current_slide(), 1);
    }
}
