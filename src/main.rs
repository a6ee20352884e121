use iced::widget::scrollable;
use iced::{keyboard, time, window};
use iced::{Element, Size, Subscription, Task, Theme};
use rfd::FileDialog;
use std::path::PathBuf;
use std::time::{Duration, Instant};

mod config;
mod dom;
mod error;
mod state;
mod ui;
mod widgets;

use dom::{Document, EventOutcome, Key, NodeId, PageEvent, ScrollBehavior};
use state::scroll::ScrollAnimation;
use state::site::{load_site, load_startup_site, Site};
use widgets::Page;

/// Initial window size; also the first viewport width the page sees
const WINDOW_SIZE: Size = Size::new(1280.0, 820.0);

/// Main application state
struct GallerySite {
    /// The page being shown
    site: Site,
    /// Its element tree, mutated by the widgets
    document: Document,
    /// Widget controllers and their listeners
    page: Page,
    /// Status message to display to the user
    status: String,
    /// Smooth scroll in progress, if any
    scroll: Option<ScrollAnimation>,
    /// Section to jump to once a cross-page link finishes loading
    pending_fragment: Option<String>,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// User clicked the "Open Site…" button
    OpenSite,
    /// Background load of a site markup file finished
    SiteLoaded(Result<Site, String>),
    /// An element of the page was clicked
    Clicked(NodeId),
    /// A key was pressed anywhere in the window
    KeyPressed(Key),
    /// The page viewport scrolled to this offset
    Scrolled(f32),
    /// The window was resized to this width
    Resized(f32),
    /// Animation frame for smooth scrolling
    Tick(Instant),
}

impl GallerySite {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let explicit = std::env::args_os().nth(1).map(PathBuf::from);

        // Show the demo page until the real one is loaded
        let site = Site::demo();
        let (document, page) = mount(&site, WINDOW_SIZE.width);

        (
            GallerySite {
                site,
                document,
                page,
                status: "Loading site...".to_string(),
                scroll: None,
                pending_fragment: None,
            },
            Task::perform(load_startup_site(explicit), |result| {
                Message::SiteLoaded(result.map_err(|e| e.to_string()))
            }),
        )
    }

    fn title(&self) -> String {
        self.site.markup.title.clone()
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::OpenSite => {
                // Show the native file picker dialog
                let file = FileDialog::new()
                    .set_title("Open Site")
                    .add_filter("Site markup", &["json"])
                    .pick_file();

                if let Some(path) = file {
                    self.status = format!("Opening {}...", path.display());
                    self.pending_fragment = None;
                    return load(path);
                }

                Task::none()
            }
            Message::SiteLoaded(Ok(site)) => {
                let (document, page) = mount(&site, self.document.window.inner_width);
                self.document = document;
                self.page = page;
                self.site = site;
                self.scroll = None;
                self.status = format!("✅ Showing \"{}\"", self.site.markup.title);

                let top = self
                    .pending_fragment
                    .take()
                    .and_then(|id| self.document.get_element_by_id(&id))
                    .map(|section| self.document.element(section).offset_top)
                    .unwrap_or(0.0);
                scroll_to(top)
            }
            Message::SiteLoaded(Err(error)) => {
                log::error!("⚠️  Failed to load site: {}", error);
                self.status = format!("⚠️  {}", error);
                self.pending_fragment = None;
                Task::none()
            }
            Message::Clicked(node) => {
                let outcome = self.page.dispatch(&mut self.document, PageEvent::click(node));
                self.apply(outcome)
            }
            Message::KeyPressed(key) => {
                let outcome = self.page.dispatch(&mut self.document, PageEvent::key_down(key));
                self.apply(outcome)
            }
            Message::Scrolled(y) => {
                self.document.window.scroll_y = y;
                let outcome = self.page.dispatch(&mut self.document, PageEvent::scroll());
                self.apply(outcome)
            }
            Message::Resized(width) => {
                self.document.window.inner_width = width;
                let outcome = self.page.dispatch(&mut self.document, PageEvent::resize());
                self.apply(outcome)
            }
            Message::Tick(now) => {
                let Some(animation) = self.scroll else {
                    return Task::none();
                };
                let (y, done) = animation.sample(now);
                if done {
                    self.scroll = None;
                }
                scroll_to(y)
            }
        }
    }

    /// Carry out whatever the page asked for after an event
    fn apply(&mut self, outcome: EventOutcome) -> Task<Message> {
        if let Some(request) = outcome.scroll {
            let top = request.top.max(0.0);
            match request.behavior {
                ScrollBehavior::Smooth => {
                    self.scroll = Some(ScrollAnimation::new(
                        self.document.window.scroll_y,
                        top,
                        Instant::now(),
                    ));
                }
                ScrollBehavior::Instant => {
                    self.scroll = None;
                    return scroll_to(top);
                }
            }
        }

        if let Some(href) = outcome.navigate {
            match self.site.resolve_link(&href) {
                Some(link) if link.path.exists() => {
                    self.status = format!("Opening {}...", link.path.display());
                    self.pending_fragment = link.fragment;
                    return load(link.path);
                }
                Some(link) => {
                    log::warn!("🔗 No page for {} at {}", href, link.path.display());
                    self.status = format!("⚠️  No page for {}", href);
                }
                None => {
                    log::info!("🔗 Not following external link {}", href);
                    self.status = format!("External link: {}", href);
                }
            }
        }

        Task::none()
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        ui::page(&self.document, &self.site, &self.status)
    }

    fn subscription(&self) -> Subscription<Message> {
        let mut subscriptions = vec![
            keyboard::on_key_press(key_message),
            window::resize_events().map(|(_id, size)| Message::Resized(size.width)),
        ];
        if self.scroll.is_some() {
            subscriptions.push(time::every(Duration::from_millis(16)).map(Message::Tick));
        }
        Subscription::batch(subscriptions)
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

/// Build a page's document and bind its widgets
fn mount(site: &Site, inner_width: f32) -> (Document, Page) {
    let mut document = site.markup.build_document(inner_width);
    let mut page = Page::init(&mut document, &site.markup.config);

    // A freshly mounted page sits at the top; let scroll-spy see that
    page.dispatch(&mut document, PageEvent::scroll());

    (document, page)
}

fn load(path: PathBuf) -> Task<Message> {
    Task::perform(load_site(path), |result| {
        Message::SiteLoaded(result.map_err(|e| e.to_string()))
    })
}

fn scroll_to(y: f32) -> Task<Message> {
    scrollable::scroll_to(ui::page_scroll_id(), scrollable::AbsoluteOffset { x: 0.0, y })
}

fn key_message(key: keyboard::Key, _modifiers: keyboard::Modifiers) -> Option<Message> {
    use keyboard::key::Named;

    let key = match key {
        keyboard::Key::Named(Named::Escape) => Key::Escape,
        keyboard::Key::Named(Named::ArrowLeft) => Key::ArrowLeft,
        keyboard::Key::Named(Named::ArrowRight) => Key::ArrowRight,
        keyboard::Key::Character(c) => Key::Other(c.to_string()),
        _ => return None,
    };
    Some(Message::KeyPressed(key))
}

fn main() -> iced::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    iced::application(GallerySite::title, GallerySite::update, GallerySite::view)
        .subscription(GallerySite::subscription)
        .theme(GallerySite::theme)
        .window_size(WINDOW_SIZE)
        .centered()
        .run_with(GallerySite::new)
}
