/// Fixed navigation bar
///
/// Wide viewports show every link in one row. Narrow viewports collapse the
/// links behind the `#mobile-menu` button; the menu panel is shown while
/// `.nav-menu` carries `active`, and a dropdown's entries only while the
/// `.dropdown` itself is active.
use iced::widget::{button, column, container, horizontal_space, row, text, Column, Row};
use iced::{Background, Color, Element, Length, Theme};

use crate::config::SiteConfig;
use crate::dom::{Document, NodeId};
use crate::Message;

const ACTIVE: &str = "active";

pub fn view<'a>(doc: &'a Document, config: &SiteConfig) -> Option<Element<'a, Message>> {
    let navbar = doc.query_selector(".navbar")?;
    let narrow = config.is_narrow(doc.window.inner_width);

    let brand: Element<'a, Message> = match doc.query_within(navbar, ".nav-brand") {
        Some(node) => button(text(doc.text(node)).size(22))
            .style(button::text)
            .on_press(Message::Clicked(node))
            .into(),
        None => horizontal_space().width(Length::Shrink).into(),
    };

    let mut bar = row![brand, horizontal_space()]
        .spacing(8)
        .align_y(iced::alignment::Vertical::Center)
        .height(Length::Fixed(config.navbar_height))
        .padding([0, 24]);

    let menu = doc.query_within(navbar, ".nav-menu");
    let mut panel = None;

    if narrow {
        if let Some(toggle) = doc.get_element_by_id("mobile-menu") {
            let open = doc.class_list(toggle).contains(ACTIVE);
            bar = bar.push(
                button(text(if open { "✕" } else { "☰" }).size(22))
                    .style(button::text)
                    .on_press(Message::Clicked(toggle)),
            );
        }
        if let Some(menu) = menu.filter(|m| doc.class_list(*m).contains(ACTIVE)) {
            panel = Some(menu_column(doc, menu));
        }
    } else if let Some(menu) = menu {
        bar = bar.push(menu_row(doc, menu));
    }

    let mut content = column![bar];
    if let Some(panel) = panel {
        content = content.push(container(panel).padding([8, 24]).width(Length::Fill));
    }

    Some(
        container(content)
            .width(Length::Fill)
            .style(|_theme: &Theme| container::Style {
                background: Some(Background::Color(Color::from_rgba(0.07, 0.07, 0.09, 0.95))),
                ..Default::default()
            })
            .into(),
    )
}

/// Wide layout: links side by side, dropdown entries right after their toggle
fn menu_row<'a>(doc: &'a Document, menu: NodeId) -> Row<'a, Message> {
    let mut links = Row::new().spacing(4).align_y(iced::alignment::Vertical::Center);
    for item in doc.children(menu) {
        for link in item_links(doc, *item, true) {
            links = links.push(link);
        }
    }
    links
}

/// Narrow layout: one link per line
fn menu_column<'a>(doc: &'a Document, menu: NodeId) -> Column<'a, Message> {
    let mut links = Column::new().spacing(2);
    for item in doc.children(menu) {
        for link in item_links(doc, *item, false) {
            links = links.push(link);
        }
    }
    links
}

/// The links of one `li`: a plain nav link, or a dropdown toggle plus the
/// entries that are currently visible
fn item_links<'a>(doc: &'a Document, item: NodeId, wide: bool) -> Vec<Element<'a, Message>> {
    let mut links = Vec::new();

    if let Some(toggle) = doc.query_within(item, ".dropdown-toggle") {
        links.push(link_button(doc, toggle, format!("{} ▾", doc.text(toggle))));

        if wide || doc.class_list(item).contains(ACTIVE) {
            for entry in doc.query_selector_all_within(item, ".dropdown-link") {
                let label = if wide {
                    doc.text(entry).to_string()
                } else {
                    format!("    {}", doc.text(entry))
                };
                links.push(link_button(doc, entry, label));
            }
        }
        return links;
    }

    if let Some(link) = doc.query_within(item, ".nav-link") {
        links.push(link_button(doc, link, doc.text(link).to_string()));
    }
    links
}

fn link_button<'a>(doc: &'a Document, link: NodeId, label: String) -> Element<'a, Message> {
    let active = doc.class_list(link).contains(ACTIVE);

    button(text(label).size(16))
        .style(if active { button::primary } else { button::text })
        .padding([6, 12])
        .on_press(Message::Clicked(link))
        .into()
}
