/// Gallery lightbox
///
/// Full-screen overlay showing one image of the gallery at a time, with
/// previous/next arrows, a close button, a background click to dismiss and
/// keyboard navigation while open.
use super::scroll_lock::ScrollLock;
use super::EventContext;
use crate::dom::{Document, EventOutcome, EventType, Key, NodeId, Target};

const ACTIVE: &str = "active";

/// An image collected from the gallery markup
#[derive(Debug, Clone, PartialEq)]
pub struct GalleryImage {
    pub src: String,
    pub alt: String,
    pub caption: String,
}

/// Events the lightbox listens for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightboxHandler {
    /// A gallery tile was clicked; opens at this image index
    Open(usize),
    Close,
    Prev,
    Next,
    /// Any click inside the overlay; closes only when the overlay itself was hit
    Background,
    Key,
}

pub struct LightboxController {
    root: NodeId,
    image: Option<NodeId>,
    caption: Option<NodeId>,
    close_btn: Option<NodeId>,
    prev_btn: Option<NodeId>,
    next_btn: Option<NodeId>,
    /// Gallery tile each image was collected from
    tiles: Vec<NodeId>,
    images: Vec<GalleryImage>,
    current_index: usize,
    is_open: bool,
    scroll_lock: Option<ScrollLock>,
}

impl LightboxController {
    /// Bind to the page's lightbox overlay. `None` when the page has no
    /// `#lightbox` container.
    pub fn new(doc: &Document) -> Option<Self> {
        let root = doc.get_element_by_id("lightbox")?;

        let (tiles, images): (Vec<NodeId>, Vec<GalleryImage>) =
            collect_images(doc).into_iter().unzip();

        Some(Self {
            root,
            image: doc.get_element_by_id("lightbox-image"),
            caption: doc.get_element_by_id("lightbox-caption"),
            close_btn: doc.get_element_by_id("lightbox-close"),
            prev_btn: doc.get_element_by_id("lightbox-prev"),
            next_btn: doc.get_element_by_id("lightbox-next"),
            tiles,
            images,
            current_index: 0,
            is_open: false,
            scroll_lock: None,
        })
    }

    /// Listener table entries for this controller
    pub fn listeners(&self) -> Vec<(Target, EventType, LightboxHandler)> {
        let mut listeners: Vec<_> = self
            .tiles
            .iter()
            .enumerate()
            .map(|(index, tile)| {
                (Target::Element(*tile), EventType::Click, LightboxHandler::Open(index))
            })
            .collect();

        let buttons = [
            (self.close_btn, LightboxHandler::Close),
            (self.prev_btn, LightboxHandler::Prev),
            (self.next_btn, LightboxHandler::Next),
        ];
        for (button, handler) in buttons {
            if let Some(button) = button {
                listeners.push((Target::Element(button), EventType::Click, handler));
            }
        }

        listeners.push((Target::Element(self.root), EventType::Click, LightboxHandler::Background));
        listeners.push((Target::Document, EventType::KeyDown, LightboxHandler::Key));
        listeners
    }

    pub fn handle(
        &mut self,
        doc: &mut Document,
        handler: LightboxHandler,
        ctx: &EventContext<'_>,
        _outcome: &mut EventOutcome,
    ) {
        match handler {
            LightboxHandler::Open(index) => self.open(doc, index),
            LightboxHandler::Close => self.close(doc),
            LightboxHandler::Prev => self.prev(doc),
            LightboxHandler::Next => self.next(doc),
            LightboxHandler::Background => {
                if ctx.event.target == Target::Element(self.root) {
                    self.close(doc);
                }
            }
            LightboxHandler::Key => {
                if !self.is_open {
                    return;
                }
                match ctx.key() {
                    Some(Key::Escape) => self.close(doc),
                    Some(Key::ArrowLeft) => self.prev(doc),
                    Some(Key::ArrowRight) => self.next(doc),
                    _ => {}
                }
            }
        }
    }

    /// Show the image at `index` and lock page scrolling
    pub fn open(&mut self, doc: &mut Document, index: usize) {
        if index >= self.images.len() {
            return;
        }

        self.current_index = index;
        self.render(doc);
        doc.class_list_mut(self.root).add(ACTIVE);
        if self.scroll_lock.is_none() {
            self.scroll_lock = Some(ScrollLock::acquire(doc));
        }
        self.is_open = true;

        log::debug!("🖼️  Lightbox opened at image {}", index);
    }

    /// Hide the overlay and give page scrolling back
    pub fn close(&mut self, doc: &mut Document) {
        doc.class_list_mut(self.root).remove(ACTIVE);
        if let Some(lock) = self.scroll_lock.take() {
            lock.release(doc);
        }
        self.is_open = false;
    }

    pub fn prev(&mut self, doc: &mut Document) {
        let len = self.images.len();
        if len == 0 {
            return;
        }
        self.current_index = (self.current_index + len - 1) % len;
        self.render(doc);
    }

    pub fn next(&mut self, doc: &mut Document) {
        let len = self.images.len();
        if len == 0 {
            return;
        }
        self.current_index = (self.current_index + 1) % len;
        self.render(doc);
    }

    /// Write the current image into the overlay
    fn render(&self, doc: &mut Document) {
        let Some(current) = self.images.get(self.current_index) else {
            return;
        };

        if let Some(image) = self.image {
            doc.set_attribute(image, "src", current.src.as_str());
            doc.set_attribute(image, "alt", current.alt.as_str());
        }
        if let Some(caption) = self.caption {
            doc.set_text(caption, current.caption.as_str());
        }

        let display = if self.images.len() <= 1 { "none" } else { "flex" };
        for arrow in [self.prev_btn, self.next_btn].into_iter().flatten() {
            doc.style_mut(arrow).set("display", display);
        }
    }

    pub fn images(&self) -> &[GalleryImage] {
        &self.images
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }
}

/// Gather `(tile, image)` pairs from the `.gallery-item` tiles
///
/// Tiles without an `img` are skipped, so image indices stay contiguous.
pub fn collect_images(doc: &Document) -> Vec<(NodeId, GalleryImage)> {
    doc.query_selector_all(".gallery-item")
        .into_iter()
        .filter_map(|tile| {
            let img = doc.query_within(tile, "img")?;
            let caption = doc
                .query_within(tile, ".gallery-caption")
                .map(|node| doc.text(node).to_string())
                .unwrap_or_default();

            Some((
                tile,
                GalleryImage {
                    src: doc.attribute(img, "src").unwrap_or_default().to_string(),
                    alt: doc.attribute(img, "alt").unwrap_or_default().to_string(),
                    caption,
                },
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::markup::{GalleryItemMarkup, SiteMarkup};
    use crate::widgets::scroll_lock::is_locked;

    fn page_with(count: usize) -> (Document, LightboxController) {
        let mut markup = SiteMarkup::demo();
        markup.gallery = (0..count)
            .map(|i| GalleryItemMarkup {
                src: Some(format!("img-{}.jpg", i)),
                alt: format!("alt {}", i),
                caption: Some(format!("caption {}", i)),
            })
            .collect();
        let doc = markup.build_document(1280.0);
        let lightbox = LightboxController::new(&doc).unwrap();
        (doc, lightbox)
    }

    fn shown_src(doc: &Document) -> String {
        let image = doc.get_element_by_id("lightbox-image").unwrap();
        doc.attribute(image, "src").unwrap_or_default().to_string()
    }

    fn arrow_display(doc: &Document) -> Option<String> {
        let prev = doc.get_element_by_id("lightbox-prev").unwrap();
        doc.style(prev).get("display").map(str::to_string)
    }

    #[test]
    fn test_open_renders_and_locks() {
        let (mut doc, mut lightbox) = page_with(4);
        lightbox.open(&mut doc, 2);

        assert!(lightbox.is_open());
        assert_eq!(lightbox.current_index(), 2);
        assert_eq!(shown_src(&doc), "img-2.jpg");
        let caption = doc.get_element_by_id("lightbox-caption").unwrap();
        assert_eq!(doc.text(caption), "caption 2");
        let root = doc.get_element_by_id("lightbox").unwrap();
        assert!(doc.class_list(root).contains("active"));
        assert!(is_locked(&doc));
    }

    #[test]
    fn test_open_close_restores_scroll_state() {
        let (mut doc, mut lightbox) = page_with(3);
        let body = doc.body();
        doc.style_mut(body).set("overflow", "auto");

        for i in 0..3 {
            lightbox.open(&mut doc, i);
            lightbox.close(&mut doc);
            assert_eq!(doc.style(body).get("overflow"), Some("auto"));
        }

        // Double open still restores the original value
        lightbox.open(&mut doc, 0);
        lightbox.open(&mut doc, 1);
        lightbox.close(&mut doc);
        assert_eq!(doc.style(body).get("overflow"), Some("auto"));
    }

    #[test]
    fn test_next_cycles_back_to_start() {
        let (mut doc, mut lightbox) = page_with(5);
        for start in 0..5 {
            lightbox.open(&mut doc, start);
            for _ in 0..5 {
                lightbox.next(&mut doc);
            }
            assert_eq!(lightbox.current_index(), start);
        }
    }

    #[test]
    fn test_prev_inverts_next() {
        let (mut doc, mut lightbox) = page_with(4);
        for i in 0..4 {
            lightbox.open(&mut doc, i);
            lightbox.next(&mut doc);
            lightbox.prev(&mut doc);
            assert_eq!(lightbox.current_index(), i);
        }

        lightbox.open(&mut doc, 0);
        lightbox.prev(&mut doc);
        assert_eq!(lightbox.current_index(), 3);
        assert_eq!(shown_src(&doc), "img-3.jpg");
    }

    #[test]
    fn test_arrows_hidden_for_single_image() {
        let (mut doc, mut lightbox) = page_with(1);
        lightbox.open(&mut doc, 0);
        assert_eq!(arrow_display(&doc).as_deref(), Some("none"));

        let (mut doc, mut lightbox) = page_with(2);
        lightbox.open(&mut doc, 0);
        assert_eq!(arrow_display(&doc).as_deref(), Some("flex"));
    }

    #[test]
    fn test_empty_gallery_is_a_no_op() {
        let (mut doc, mut lightbox) = page_with(0);
        lightbox.open(&mut doc, 0);
        lightbox.next(&mut doc);
        lightbox.prev(&mut doc);

        assert!(!lightbox.is_open());
        assert_eq!(lightbox.current_index(), 0);
        assert!(!is_locked(&doc));
        assert_eq!(shown_src(&doc), "");
    }

    #[test]
    fn test_out_of_range_open_is_ignored() {
        let (mut doc, mut lightbox) = page_with(2);
        lightbox.open(&mut doc, 7);
        assert!(!lightbox.is_open());
    }

    #[test]
    fn test_tiles_without_image_are_skipped() {
        let mut markup = SiteMarkup::demo();
        markup.gallery = vec![
            GalleryItemMarkup {
                src: None,
                alt: String::new(),
                caption: Some("coming soon".to_string()),
            },
            GalleryItemMarkup {
                src: Some("a.jpg".to_string()),
                alt: "a".to_string(),
                caption: None,
            },
        ];
        let doc = markup.build_document(1280.0);

        let images = collect_images(&doc);
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].1.src, "a.jpg");
        assert_eq!(images[0].1.caption, "");
        assert_eq!(images[0].0, doc.query_selector_all(".gallery-item")[1]);
    }
}
