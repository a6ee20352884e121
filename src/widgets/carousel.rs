/// Gallery carousel
///
/// Pages a fixed strip of images by translating the `.gallery-track`
/// element. Narrow viewports show one image per page, wide ones three.
/// See `SiteConfig::carousel_step_percent` for the slide step.
use super::EventContext;
use crate::config::SiteConfig;
use crate::dom::style::translate_x;
use crate::dom::{Document, EventOutcome, EventType, NodeId, Target};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselHandler {
    Retreat,
    Advance,
    Resize,
}

pub struct CarouselController {
    track: Option<NodeId>,
    prev_btn: Option<NodeId>,
    next_btn: Option<NodeId>,
    config: SiteConfig,
    current_slide: usize,
    total_images: usize,
    visible_count: usize,
    max_slide: usize,
}

impl CarouselController {
    /// Set up paging state for the current viewport and place the track
    pub fn new(doc: &mut Document, config: &SiteConfig) -> Self {
        let total_images = config.carousel_total;
        let visible_count = config.visible_for_width(doc.window.inner_width);

        let carousel = Self {
            track: doc.query_selector(".gallery-track"),
            prev_btn: doc.get_element_by_id("prevBtn"),
            next_btn: doc.get_element_by_id("nextBtn"),
            config: config.clone(),
            current_slide: 0,
            total_images,
            visible_count,
            max_slide: total_images.saturating_sub(visible_count),
        };
        carousel.render(doc);
        carousel
    }

    /// Without a track there is nothing to page, so nothing is bound
    pub fn listeners(&self) -> Vec<(Target, EventType, CarouselHandler)> {
        if self.track.is_none() {
            return Vec::new();
        }

        let mut listeners = Vec::new();
        if let Some(prev) = self.prev_btn {
            listeners.push((Target::Element(prev), EventType::Click, CarouselHandler::Retreat));
        }
        if let Some(next) = self.next_btn {
            listeners.push((Target::Element(next), EventType::Click, CarouselHandler::Advance));
        }
        listeners.push((Target::Window, EventType::Resize, CarouselHandler::Resize));
        listeners
    }

    pub fn handle(
        &mut self,
        doc: &mut Document,
        handler: CarouselHandler,
        _ctx: &EventContext<'_>,
        _outcome: &mut EventOutcome,
    ) {
        match handler {
            CarouselHandler::Retreat => self.retreat(doc),
            CarouselHandler::Advance => self.advance(doc),
            CarouselHandler::Resize => self.on_resize(doc),
        }
    }

    pub fn advance(&mut self, doc: &mut Document) {
        if self.current_slide >= self.max_slide {
            self.current_slide = 0;
        } else {
            self.current_slide += 1;
        }
        self.render(doc);
    }

    pub fn retreat(&mut self, doc: &mut Document) {
        if self.current_slide == 0 {
            self.current_slide = self.max_slide;
        } else {
            self.current_slide -= 1;
        }
        self.render(doc);
    }

    /// Recompute paging for the new viewport width
    pub fn on_resize(&mut self, doc: &mut Document) {
        self.visible_count = self.config.visible_for_width(doc.window.inner_width);
        self.max_slide = self.total_images.saturating_sub(self.visible_count);
        if self.current_slide > self.max_slide {
            self.current_slide = self.max_slide;
        }
        self.render(doc);
    }

    /// Track offset for the current slide, as a percentage of the track width
    pub fn offset_percent(&self, inner_width: f32) -> f32 {
        -(self.current_slide as f32) * self.config.carousel_step_percent(inner_width)
    }

    fn render(&self, doc: &mut Document) {
        let Some(track) = self.track else {
            return;
        };
        let offset = self.offset_percent(doc.window.inner_width);
        doc.style_mut(track).set("transform", translate_x(offset));
    }

    pub fn current_slide(&self) -> usize {
        self.current_slide
    }

    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    pub fn max_slide(&self) -> usize {
        self.max_slide
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::markup::SiteMarkup;

    fn demo(width: f32) -> (Document, CarouselController) {
        let markup = SiteMarkup::demo();
        let mut doc = markup.build_document(width);
        let carousel = CarouselController::new(&mut doc, &markup.config);
        (doc, carousel)
    }

    fn transform(doc: &Document) -> String {
        let track = doc.query_selector(".gallery-track").unwrap();
        doc.style(track).get("transform").unwrap_or_default().to_string()
    }

    #[test]
    fn test_wide_viewport_pages_three_at_a_time() {
        let (mut doc, mut carousel) = demo(1024.0);
        assert_eq!(carousel.visible_count(), 3);
        assert_eq!(carousel.max_slide(), 2);
        assert_eq!(transform(&doc), "translateX(0%)");

        carousel.advance(&mut doc);
        assert_eq!(transform(&doc), "translateX(-20%)");
        carousel.advance(&mut doc);
        assert_eq!(transform(&doc), "translateX(-40%)");
        carousel.advance(&mut doc);
        assert_eq!(carousel.current_slide(), 0);
        assert_eq!(transform(&doc), "translateX(0%)");
    }

    #[test]
    fn test_wraps_in_both_directions() {
        let (mut doc, mut carousel) = demo(375.0);
        assert_eq!(carousel.max_slide(), 4);

        carousel.retreat(&mut doc);
        assert_eq!(carousel.current_slide(), 4);
        assert_eq!(transform(&doc), "translateX(-400%)");

        carousel.advance(&mut doc);
        assert_eq!(carousel.current_slide(), 0);
    }

    #[test]
    fn test_resize_to_narrow_then_wide_clamps() {
        let (mut doc, mut carousel) = demo(375.0);
        for _ in 0..4 {
            carousel.advance(&mut doc);
        }
        assert_eq!(carousel.current_slide(), 4);

        doc.window.inner_width = 1280.0;
        carousel.on_resize(&mut doc);
        assert_eq!(carousel.visible_count(), 3);
        assert_eq!(carousel.max_slide(), 2);
        assert_eq!(carousel.current_slide(), 2);
        assert_eq!(transform(&doc), "translateX(-40%)");
    }

    #[test]
    fn test_resize_wide_to_narrow_recomputes_max() {
        let (mut doc, mut carousel) = demo(1280.0);
        carousel.advance(&mut doc);

        doc.window.inner_width = 600.0;
        carousel.on_resize(&mut doc);
        assert_eq!(carousel.visible_count(), 1);
        assert_eq!(carousel.max_slide(), 4);
        assert_eq!(carousel.current_slide(), 1);
        assert_eq!(transform(&doc), "translateX(-100%)");
    }

    #[test]
    fn test_missing_track_binds_nothing() {
        let mut markup = SiteMarkup::demo();
        markup.carousel = None;
        let mut doc = markup.build_document(1280.0);
        let mut carousel = CarouselController::new(&mut doc, &markup.config);

        assert!(carousel.listeners().is_empty());
        carousel.advance(&mut doc);
        assert_eq!(carousel.current_slide(), 1);
    }

    #[test]
    fn test_fewer_images_than_visible() {
        let mut config = SiteConfig::default();
        config.carousel_total = 2;
        let mut doc = SiteMarkup::demo().build_document(1280.0);
        let mut carousel = CarouselController::new(&mut doc, &config);

        assert_eq!(carousel.max_slide(), 0);
        carousel.advance(&mut doc);
        carousel.retreat(&mut doc);
        assert_eq!(carousel.current_slide(), 0);
    }
}
