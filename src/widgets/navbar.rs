/// Navigation bar
///
/// Handles the mobile menu button, smooth scrolling to in-page anchors,
/// scroll-spy highlighting of the current section's link, and the
/// submenu toggle on narrow viewports.
use super::EventContext;
use crate::config::SiteConfig;
use crate::dom::{
    Document, EventOutcome, EventType, NodeId, ScrollBehavior, ScrollRequest, Target,
};

const ACTIVE: &str = "active";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavbarHandler {
    ToggleMobileMenu,
    NavClick,
    CloseMobileMenu,
    Scroll,
    DropdownToggle,
}

pub struct NavbarController {
    navbar: NodeId,
    mobile_menu: Option<NodeId>,
    nav_menu: Option<NodeId>,
    links: Vec<NodeId>,
    /// (toggle link, dropdown container), bound only when both exist
    dropdown: Option<(NodeId, NodeId)>,
    config: SiteConfig,
    active_section: String,
}

impl NavbarController {
    /// Bind to the page's navbar. `None` when there is no `.navbar`.
    pub fn new(doc: &Document, config: &SiteConfig) -> Option<Self> {
        let navbar = doc
            .get_element_by_id("navbar")
            .or_else(|| doc.query_selector(".navbar"))?;

        let dropdown = match (
            doc.query_selector(".dropdown-toggle"),
            doc.query_selector(".dropdown"),
        ) {
            (Some(toggle), Some(dropdown)) => Some((toggle, dropdown)),
            _ => None,
        };

        Some(Self {
            navbar,
            mobile_menu: doc.get_element_by_id("mobile-menu"),
            nav_menu: doc.query_selector(".nav-menu"),
            links: doc.query_selector_all(".nav-link"),
            dropdown,
            config: config.clone(),
            active_section: String::new(),
        })
    }

    pub fn listeners(&self) -> Vec<(Target, EventType, NavbarHandler)> {
        let mut listeners = Vec::new();

        if let Some(button) = self.mobile_menu {
            listeners.push((Target::Element(button), EventType::Click, NavbarHandler::ToggleMobileMenu));
        }
        for link in &self.links {
            listeners.push((Target::Element(*link), EventType::Click, NavbarHandler::NavClick));
        }
        listeners.push((Target::Window, EventType::Scroll, NavbarHandler::Scroll));
        for link in &self.links {
            listeners.push((Target::Element(*link), EventType::Click, NavbarHandler::CloseMobileMenu));
        }
        if let Some((toggle, _)) = self.dropdown {
            listeners.push((Target::Element(toggle), EventType::Click, NavbarHandler::DropdownToggle));
        }

        listeners
    }

    pub fn handle(
        &mut self,
        doc: &mut Document,
        handler: NavbarHandler,
        ctx: &EventContext<'_>,
        outcome: &mut EventOutcome,
    ) {
        match handler {
            NavbarHandler::ToggleMobileMenu => self.toggle_mobile_menu(doc),
            NavbarHandler::CloseMobileMenu => self.close_mobile_menu(doc),
            NavbarHandler::NavClick => {
                if let Target::Element(link) = ctx.current_target {
                    self.handle_nav_click(doc, link, outcome);
                }
            }
            NavbarHandler::Scroll => self.update_active_link(doc),
            NavbarHandler::DropdownToggle => self.toggle_dropdown(doc, outcome),
        }
    }

    pub fn toggle_mobile_menu(&self, doc: &mut Document) {
        for node in [self.mobile_menu, self.nav_menu].into_iter().flatten() {
            doc.class_list_mut(node).toggle(ACTIVE);
        }
    }

    pub fn close_mobile_menu(&self, doc: &mut Document) {
        for node in [self.mobile_menu, self.nav_menu].into_iter().flatten() {
            doc.class_list_mut(node).remove(ACTIVE);
        }
    }

    /// Same-page anchors scroll smoothly below the fixed bar; anything else
    /// is left for normal navigation.
    pub fn handle_nav_click(&self, doc: &Document, link: NodeId, outcome: &mut EventOutcome) {
        let Some(href) = doc.attribute(link, "href") else {
            return;
        };
        let Some(target_id) = href.strip_prefix('#') else {
            return;
        };

        outcome.prevent_default();

        if let Some(section) = doc.get_element_by_id(target_id) {
            let top = doc.element(section).offset_top
                - self.navbar_height(doc)
                - self.config.anchor_gap;
            outcome.scroll = Some(ScrollRequest {
                top,
                behavior: ScrollBehavior::Smooth,
            });
        }
    }

    /// Highlight the link of the section under the current scroll position
    pub fn update_active_link(&mut self, doc: &mut Document) {
        let current = self.section_at(doc, doc.window.scroll_y);
        let wanted = format!("#{}", current);

        for link in &self.links {
            let is_current = !current.is_empty() && doc.attribute(*link, "href") == Some(wanted.as_str());
            let classes = doc.class_list_mut(*link);
            classes.remove(ACTIVE);
            if is_current {
                classes.add(ACTIVE);
            }
        }

        if current != self.active_section {
            log::debug!("🧭 Active section: {:?}", current);
            self.active_section = current;
        }
    }

    /// Section whose band contains `scroll_y`; later sections win on overlap.
    /// Empty when no band matches.
    pub fn section_at(&self, doc: &Document, scroll_y: f32) -> String {
        let navbar_height = self.navbar_height(doc);
        let mut current = String::new();

        for id in &self.config.sections {
            let Some(section) = doc.get_element_by_id(id) else {
                continue;
            };
            let element = doc.element(section);
            let band_top = element.offset_top - navbar_height - self.config.spy_offset;
            if scroll_y >= band_top && scroll_y < band_top + element.offset_height {
                current = id.clone();
            }
        }

        current
    }

    /// On narrow viewports the toggle opens its submenu instead of navigating
    pub fn toggle_dropdown(&self, doc: &mut Document, outcome: &mut EventOutcome) {
        let Some((_, dropdown)) = self.dropdown else {
            return;
        };
        if self.config.is_narrow(doc.window.inner_width) {
            outcome.prevent_default();
            doc.class_list_mut(dropdown).toggle(ACTIVE);
        }
    }

    fn navbar_height(&self, doc: &Document) -> f32 {
        doc.element(self.navbar).offset_height
    }

    pub fn active_section(&self) -> &str {
        &self.active_section
    }
}
