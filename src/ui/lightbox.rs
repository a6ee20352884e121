/// Lightbox overlay
///
/// Drawn over the page while `#lightbox` is active. Clicks that land on
/// the dark background report the overlay itself; the image, caption and
/// controls each report their own element.
use iced::widget::{
    button, center, column, container, horizontal_space, image, mouse_area, opaque, row, text,
};
use iced::{Background, Color, ContentFit, Element, Length, Theme};

use crate::dom::{Document, NodeId};
use crate::state::site::Site;
use crate::Message;

pub fn view<'a>(doc: &'a Document, site: &'a Site) -> Option<Element<'a, Message>> {
    let root = doc.get_element_by_id("lightbox")?;
    if !doc.class_list(root).contains("active") {
        return None;
    }

    let close = control(doc, "lightbox-close", 30);
    let prev = control(doc, "lightbox-prev", 40);
    let next = control(doc, "lightbox-next", 40);

    let mut stage = column![].spacing(12).align_x(iced::alignment::Horizontal::Center);
    if let Some(image_node) = doc.get_element_by_id("lightbox-image") {
        stage = stage.push(mouse_area(picture(doc, site, image_node)).on_press(Message::Clicked(image_node)));
    }
    if let Some(caption) = doc.get_element_by_id("lightbox-caption") {
        stage = stage.push(
            mouse_area(text(doc.text(caption)).size(18).color(Color::WHITE))
                .on_press(Message::Clicked(caption)),
        );
    }

    let content = column![
        row![horizontal_space(), close].padding(16),
        center(
            row![prev, stage, next]
                .spacing(24)
                .align_y(iced::alignment::Vertical::Center)
        ),
    ];

    let backdrop = container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(|_theme: &Theme| container::Style {
            background: Some(Background::Color(Color::from_rgba(0.0, 0.0, 0.0, 0.92))),
            ..Default::default()
        });

    // The overlay swallows all mouse input so the page underneath stays put
    Some(opaque(mouse_area(backdrop).on_press(Message::Clicked(root))))
}

/// A control button, hidden when its element is missing or styled `display: none`
fn control<'a>(doc: &'a Document, id: &str, size: u16) -> Element<'a, Message> {
    let Some(node) = doc.get_element_by_id(id) else {
        return horizontal_space().width(Length::Shrink).into();
    };
    if doc.style(node).get("display") == Some("none") {
        return horizontal_space().width(Length::Shrink).into();
    }

    button(text(doc.text(node)).size(size).color(Color::WHITE))
        .style(button::text)
        .on_press(Message::Clicked(node))
        .into()
}

fn picture<'a>(doc: &'a Document, site: &Site, node: NodeId) -> Element<'a, Message> {
    let src = doc.attribute(node, "src").unwrap_or_default();
    let path = site.resolve_asset(src);

    if src.is_empty() || !path.exists() {
        let alt = doc.attribute(node, "alt").unwrap_or_default();
        return container(text(alt).size(20).color(Color::from_rgb(0.7, 0.7, 0.75)))
            .width(Length::Fixed(640.0))
            .height(Length::Fixed(420.0))
            .center_x(Length::Fixed(640.0))
            .center_y(Length::Fixed(420.0))
            .style(container::rounded_box)
            .into();
    }

    image(image::Handle::from_path(path))
        .width(Length::Fixed(960.0))
        .height(Length::Fixed(640.0))
        .content_fit(ContentFit::Contain)
        .into()
}
