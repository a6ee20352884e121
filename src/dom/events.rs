/// Events, listener registration and dispatch results
///
/// Listeners are registered once when a page loads and never removed.
/// A listener pairs a target and an event type with a handler value; the
/// handler type is chosen by whoever owns the registry (the page routes
/// its handlers to the controller that registered them).
use super::NodeId;

/// Where a listener is attached / where an event was fired
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Element(NodeId),
    Document,
    Window,
}

/// The kind of event a listener subscribes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventType {
    Click,
    KeyDown,
    Scroll,
    Resize,
}

/// Keys the widgets care about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Escape,
    ArrowLeft,
    ArrowRight,
    Other(String),
}

/// Event payload
#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    Click,
    KeyDown(Key),
    Scroll,
    Resize,
}

impl EventKind {
    pub fn event_type(&self) -> EventType {
        match self {
            EventKind::Click => EventType::Click,
            EventKind::KeyDown(_) => EventType::KeyDown,
            EventKind::Scroll => EventType::Scroll,
            EventKind::Resize => EventType::Resize,
        }
    }
}

/// A single user interaction delivered to the page
#[derive(Debug, Clone, PartialEq)]
pub struct PageEvent {
    pub target: Target,
    pub kind: EventKind,
}

impl PageEvent {
    pub fn click(node: NodeId) -> Self {
        Self {
            target: Target::Element(node),
            kind: EventKind::Click,
        }
    }

    pub fn key_down(key: Key) -> Self {
        Self {
            target: Target::Document,
            kind: EventKind::KeyDown(key),
        }
    }

    pub fn scroll() -> Self {
        Self {
            target: Target::Window,
            kind: EventKind::Scroll,
        }
    }

    pub fn resize() -> Self {
        Self {
            target: Target::Window,
            kind: EventKind::Resize,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Smooth,
    Instant,
}

/// A request to move the page's vertical scroll position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRequest {
    pub top: f32,
    pub behavior: ScrollBehavior,
}

/// What the shell should do after an event has been handled
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventOutcome {
    /// Some handler suppressed the default action (link navigation)
    pub default_prevented: bool,
    pub scroll: Option<ScrollRequest>,
    /// Link target to follow, set when a link click was not prevented
    pub navigate: Option<String>,
}

impl EventOutcome {
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }
}

/// Registration-ordered listener table
#[derive(Debug, Clone)]
pub struct Listeners<H> {
    entries: Vec<(Target, EventType, H)>,
}

impl<H> Default for Listeners<H> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<H: Copy> Listeners<H> {
    pub fn add(&mut self, target: Target, event_type: EventType, handler: H) {
        self.entries.push((target, event_type, handler));
    }

    /// Handlers attached to `target` for `event_type`, in registration order
    pub fn matching(&self, target: Target, event_type: EventType) -> Vec<H> {
        self.entries
            .iter()
            .filter(|(t, e, _)| *t == target && *e == event_type)
            .map(|(_, _, h)| *h)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_keeps_registration_order() {
        let mut listeners = Listeners::default();
        listeners.add(Target::Window, EventType::Scroll, 1);
        listeners.add(Target::Document, EventType::KeyDown, 2);
        listeners.add(Target::Window, EventType::Scroll, 3);
        listeners.add(Target::Window, EventType::Resize, 4);

        assert_eq!(listeners.matching(Target::Window, EventType::Scroll), vec![1, 3]);
        assert_eq!(listeners.matching(Target::Document, EventType::Click), Vec::<i32>::new());
        assert_eq!(listeners.len(), 4);
    }

    #[test]
    fn test_event_types() {
        assert_eq!(PageEvent::key_down(Key::Escape).kind.event_type(), EventType::KeyDown);
        assert_eq!(PageEvent::resize().target, Target::Window);
        assert_eq!(PageEvent::scroll().kind.event_type(), EventType::Scroll);
    }
}
