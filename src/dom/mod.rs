/// Document tree module
///
/// This module models the page the widgets operate on:
/// - Elements with ids, classes, attributes, inline style and text (this file)
/// - Inline style helpers (style.rs)
/// - Events, listeners and dispatch outcomes (events.rs)
/// - The JSON page markup and the builder that lays it out (markup.rs)
///
/// Controllers never own elements. They hold `NodeId`s handed out by the
/// `Document` and read/write through it.

pub mod events;
pub mod markup;
pub mod style;

pub use events::{
    EventKind, EventOutcome, EventType, Key, Listeners, PageEvent, ScrollBehavior,
    ScrollRequest, Target,
};
pub use style::Style;

use std::collections::BTreeMap;

/// Handle to an element inside a `Document`
///
/// Ids are only ever issued by the document that owns the element, so
/// indexing with one never goes out of bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Ordered set of class names
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassList(Vec<String>);

impl ClassList {
    pub fn contains(&self, class: &str) -> bool {
        self.0.iter().any(|c| c == class)
    }

    pub fn add(&mut self, class: &str) {
        if !self.contains(class) {
            self.0.push(class.to_string());
        }
    }

    pub fn remove(&mut self, class: &str) {
        self.0.retain(|c| c != class);
    }

    /// Flip a class, returning whether it is now present
    pub fn toggle(&mut self, class: &str) -> bool {
        if self.contains(class) {
            self.remove(class);
            false
        } else {
            self.add(class);
            true
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// A single node of the page
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: String,
    pub id: Option<String>,
    pub classes: ClassList,
    pub attributes: BTreeMap<String, String>,
    pub style: Style,
    pub text: String,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// Distance from the top of the page, in layout units
    pub offset_top: f32,
    /// Rendered height, in layout units
    pub offset_height: f32,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            id: None,
            classes: ClassList::default(),
            attributes: BTreeMap::new(),
            style: Style::new(),
            text: String::new(),
            parent: None,
            children: Vec::new(),
            offset_top: 0.0,
            offset_height: 0.0,
        }
    }
}

/// Viewport state the widgets read from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Window {
    pub inner_width: f32,
    pub scroll_y: f32,
}

/// A selector understood by `query_selector`: `#id`, `.class` or a tag name
#[derive(Debug, Clone, Copy, PartialEq)]
enum Selector<'a> {
    Id(&'a str),
    Class(&'a str),
    Tag(&'a str),
}

impl<'a> Selector<'a> {
    fn parse(selector: &'a str) -> Self {
        let selector = selector.trim();
        if let Some(id) = selector.strip_prefix('#') {
            Selector::Id(id)
        } else if let Some(class) = selector.strip_prefix('.') {
            Selector::Class(class)
        } else {
            Selector::Tag(selector)
        }
    }

    fn matches(&self, element: &Element) -> bool {
        match *self {
            Selector::Id(id) => element.id.as_deref() == Some(id),
            Selector::Class(class) => element.classes.contains(class),
            Selector::Tag(tag) => element.tag.eq_ignore_ascii_case(tag),
        }
    }
}

/// The page: an element arena rooted at `body`, plus the window
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Element>,
    body: NodeId,
    pub window: Window,
}

impl Document {
    /// Create an empty page with a bare `body`
    pub fn new(inner_width: f32) -> Self {
        Self {
            nodes: vec![Element::new("body")],
            body: NodeId(0),
            window: Window {
                inner_width,
                scroll_y: 0.0,
            },
        }
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Create an element and append it as the last child of `parent`
    pub fn append(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        let mut element = Element::new(tag);
        element.parent = Some(parent);
        self.nodes.push(element);
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn element(&self, id: NodeId) -> &Element {
        &self.nodes[id.0]
    }

    pub fn element_mut(&mut self, id: NodeId) -> &mut Element {
        &mut self.nodes[id.0]
    }

    /// Builder-style helpers used while constructing a page
    pub fn set_id(&mut self, node: NodeId, id: &str) -> NodeId {
        self.nodes[node.0].id = Some(id.to_string());
        node
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) -> NodeId {
        self.nodes[node.0].classes.add(class);
        node
    }

    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: impl Into<String>) {
        self.nodes[node.0]
            .attributes
            .insert(name.to_string(), value.into());
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.nodes[node.0].attributes.get(name).map(String::as_str)
    }

    pub fn set_text(&mut self, node: NodeId, text: impl Into<String>) {
        self.nodes[node.0].text = text.into();
    }

    pub fn text(&self, node: NodeId) -> &str {
        &self.nodes[node.0].text
    }

    pub fn class_list(&self, node: NodeId) -> &ClassList {
        &self.nodes[node.0].classes
    }

    pub fn class_list_mut(&mut self, node: NodeId) -> &mut ClassList {
        &mut self.nodes[node.0].classes
    }

    pub fn style(&self, node: NodeId) -> &Style {
        &self.nodes[node.0].style
    }

    pub fn style_mut(&mut self, node: NodeId) -> &mut Style {
        &mut self.nodes[node.0].style
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    /// Every element in tree order (depth-first, starting at `body`)
    pub fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            order.push(node);
            stack.extend(self.nodes[node.0].children.iter().rev().copied());
        }
        order
    }

    /// The node itself followed by each of its ancestors up to `body`
    pub fn ancestors_inclusive(&self, node: NodeId) -> Vec<NodeId> {
        let mut chain = vec![node];
        let mut current = node;
        while let Some(parent) = self.nodes[current.0].parent {
            chain.push(parent);
            current = parent;
        }
        chain
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        if id.is_empty() {
            return None;
        }
        self.query_selector_within(self.body, &Selector::Id(id))
    }

    pub fn query_selector(&self, selector: &str) -> Option<NodeId> {
        self.query_selector_within(self.body, &Selector::parse(selector))
    }

    pub fn query_selector_all(&self, selector: &str) -> Vec<NodeId> {
        self.query_selector_all_within(self.body, selector)
    }

    /// First match strictly below `root`
    pub fn query_within(&self, root: NodeId, selector: &str) -> Option<NodeId> {
        self.query_selector_within(root, &Selector::parse(selector))
    }

    /// Every match strictly below `root`, in tree order
    pub fn query_selector_all_within(&self, root: NodeId, selector: &str) -> Vec<NodeId> {
        let selector = Selector::parse(selector);
        self.descendants(root)
            .into_iter()
            .skip(1)
            .filter(|node| selector.matches(self.element(*node)))
            .collect()
    }

    fn query_selector_within(&self, root: NodeId, selector: &Selector<'_>) -> Option<NodeId> {
        self.descendants(root)
            .into_iter()
            .skip(1)
            .find(|node| selector.matches(self.element(*node)))
    }

    /// Nearest element (self or ancestor) carrying the attribute
    pub fn closest_with_attribute(&self, node: NodeId, name: &str) -> Option<NodeId> {
        self.ancestors_inclusive(node)
            .into_iter()
            .find(|n| self.nodes[n.0].attributes.contains_key(name))
    }
}
