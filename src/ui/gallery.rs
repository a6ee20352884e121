/// Gallery grid and carousel strip
use iced::widget::{button, column, container, image, mouse_area, row, text, Row};
use iced::{Color, ContentFit, Element, Length, Pixels};
use iced_aw::Wrap;

use crate::dom::style::parse_translate_x;
use crate::dom::{Document, NodeId};
use crate::state::site::Site;
use crate::Message;

const TILE_WIDTH: f32 = 240.0;
const TILE_HEIGHT: f32 = 160.0;

/// Thumbnail grid of `.gallery-item` tiles, wrapped to the window width
pub fn grid<'a>(doc: &'a Document, site: &'a Site, grid: NodeId) -> Element<'a, Message> {
    let tiles: Vec<Element<'a, Message>> = doc
        .children(grid)
        .iter()
        .map(|tile| gallery_tile(doc, site, *tile))
        .collect();

    Wrap::with_elements(tiles)
        .spacing(Pixels(12.0))
        .line_spacing(Pixels(12.0))
        .into()
}

fn gallery_tile<'a>(doc: &'a Document, site: &'a Site, tile: NodeId) -> Element<'a, Message> {
    let picture = match doc.query_within(tile, "img") {
        Some(img) => picture(doc, site, img, TILE_WIDTH, TILE_HEIGHT),
        None => placeholder("No image", TILE_WIDTH, TILE_HEIGHT),
    };

    let mut content = column![picture].spacing(6).width(Length::Fixed(TILE_WIDTH));
    if let Some(caption) = doc.query_within(tile, ".gallery-caption") {
        content = content.push(
            text(doc.text(caption))
                .size(14)
                .color(Color::from_rgb(0.7, 0.7, 0.72)),
        );
    }

    mouse_area(content)
        .on_press(Message::Clicked(tile))
        .interaction(iced::mouse::Interaction::Pointer)
        .into()
}

/// The `.gallery-carousel`: arrows around the slice of the track the
/// current translation brings into view
pub fn carousel<'a>(doc: &'a Document, site: &'a Site, root: NodeId) -> Element<'a, Message> {
    let config = &site.markup.config;
    let width = doc.window.inner_width;
    let visible = config.visible_for_width(width).max(1);

    let mut strip = Row::new().spacing(12).align_y(iced::alignment::Vertical::Center);

    if let Some(track) = doc.query_within(root, ".gallery-track") {
        let images = doc.children(track);
        let step = config.carousel_step_percent(width);
        let offset = doc
            .style(track)
            .get("transform")
            .and_then(parse_translate_x)
            .unwrap_or(0.0);
        let first = (-offset / step).round().max(0.0) as usize;

        let slide_width = (width - 200.0).max(200.0) / visible as f32 - 12.0;
        for img in images.iter().skip(first).take(visible) {
            strip = strip.push(picture(doc, site, *img, slide_width, slide_width * 0.66));
        }
    }

    let arrow = |id: &str| -> Element<'a, Message> {
        match doc.get_element_by_id(id) {
            Some(node) => button(text(doc.text(node)).size(28))
                .style(button::secondary)
                .padding([8, 16])
                .on_press(Message::Clicked(node))
                .into(),
            None => row![].into(),
        }
    };

    row![arrow("prevBtn"), strip, arrow("nextBtn")]
        .spacing(12)
        .align_y(iced::alignment::Vertical::Center)
        .into()
}

/// An `img` element: the file when it exists, else its alt text
fn picture<'a>(doc: &'a Document, site: &Site, img: NodeId, width: f32, height: f32) -> Element<'a, Message> {
    let src = doc.attribute(img, "src").unwrap_or_default();
    let path = site.resolve_asset(src);

    if src.is_empty() || !path.exists() {
        return placeholder(doc.attribute(img, "alt").unwrap_or_default(), width, height);
    }

    image(image::Handle::from_path(path))
        .width(Length::Fixed(width))
        .height(Length::Fixed(height))
        .content_fit(ContentFit::Cover)
        .into()
}

fn placeholder<'a>(label: &'a str, width: f32, height: f32) -> Element<'a, Message> {
    container(text(label).size(14).color(Color::from_rgb(0.55, 0.55, 0.6)))
        .width(Length::Fixed(width))
        .height(Length::Fixed(height))
        .center_x(Length::Fixed(width))
        .center_y(Length::Fixed(height))
        .style(container::rounded_box)
        .into()
}
