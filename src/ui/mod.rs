/// User interface module
///
/// Renders the page's document tree with iced widgets:
/// - Page layout, sections and status bar (this file)
/// - Fixed navigation bar (navbar.rs)
/// - Gallery grid and carousel strip (gallery.rs)
/// - Lightbox overlay (lightbox.rs)
///
/// Views only read the document. Every click is reported back as
/// `Message::Clicked` with the element that was hit.
use iced::widget::{button, column, container, horizontal_space, row, scrollable, stack, text};
use iced::{Color, Element, Length};

use crate::dom::{Document, NodeId};
use crate::state::site::Site;
use crate::Message;

pub mod gallery;
pub mod lightbox;
pub mod navbar;

pub fn page_scroll_id() -> scrollable::Id {
    scrollable::Id::new("page")
}

/// Build the whole window: scrolling page, fixed navbar, overlay, status bar
pub fn page<'a>(doc: &'a Document, site: &'a Site, status: &'a str) -> Element<'a, Message> {
    let config = &site.markup.config;
    let body = doc.body();

    let sections: Vec<Element<'a, Message>> = doc
        .children(body)
        .iter()
        .filter(|node| doc.element(**node).tag == "section")
        .enumerate()
        .map(|(i, node)| {
            // The first section sits under the fixed navbar
            let top_padding = if i == 0 { config.navbar_height } else { 0.0 };
            section(doc, site, *node, top_padding)
        })
        .collect();

    let content = scrollable(column(sections).width(Length::Fill))
        .id(page_scroll_id())
        .on_scroll(|viewport| Message::Scrolled(viewport.absolute_offset().y))
        .width(Length::Fill)
        .height(Length::Fill);

    let mut layers: Vec<Element<'a, Message>> = vec![content.into()];
    if let Some(nav) = navbar::view(doc, config) {
        layers.push(nav);
    }
    if let Some(overlay) = lightbox::view(doc, site) {
        layers.push(overlay);
    }

    column![stack(layers).height(Length::Fill), status_bar(status)].into()
}

fn section<'a>(doc: &'a Document, site: &'a Site, node: NodeId, top_padding: f32) -> Element<'a, Message> {
    let element = doc.element(node);

    let children: Vec<Element<'a, Message>> = element
        .children
        .iter()
        .filter_map(|child| section_child(doc, site, *child))
        .collect();

    container(column(children).spacing(16).max_width(1100.0))
        .padding(iced::Padding {
            top: top_padding + 32.0,
            right: 32.0,
            bottom: 32.0,
            left: 32.0,
        })
        .width(Length::Fill)
        .height(Length::Fixed(element.offset_height))
        .center_x(Length::Fill)
        .into()
}

fn section_child<'a>(doc: &'a Document, site: &'a Site, node: NodeId) -> Option<Element<'a, Message>> {
    let element = doc.element(node);
    let classes = &element.classes;

    if classes.contains("gallery-grid") {
        return Some(gallery::grid(doc, site, node));
    }
    if classes.contains("gallery-carousel") {
        return Some(gallery::carousel(doc, site, node));
    }

    match element.tag.as_str() {
        "h2" => Some(text(&element.text).size(36).into()),
        "p" => Some(
            text(&element.text)
                .size(17)
                .color(Color::from_rgb(0.75, 0.75, 0.78))
                .into(),
        ),
        _ => None,
    }
}

fn status_bar(status: &str) -> Element<'_, Message> {
    container(
        row![
            text(status).size(14),
            horizontal_space(),
            button(text("Open Site…").size(14))
                .on_press(Message::OpenSite)
                .padding([4, 12]),
        ]
        .align_y(iced::alignment::Vertical::Center),
    )
    .padding([6, 12])
    .width(Length::Fill)
    .into()
}
