//! Presentation helpers: tier badge, status bar, analytics forwarding and
//! referral links.
//!
//! Nothing here is authoritative. The helpers read state through
//! [`crate::service::AgentCore`] and hand their output to injected
//! capabilities ([`Renderer`], [`analytics::EventSink`]) instead of touching
//! a global document or analytics hook.

pub mod analytics;
pub mod badge;
pub mod referral;
pub mod status_bar;

use std::fmt::Write as _;

pub use analytics::{Analytics, AnalyticsEvent, EventSink, TracingSink};
pub use badge::create_tier_badge;
pub use referral::{Location, referral_code, referral_link};
pub use status_bar::show_token_bar;

/// A node in a rendered fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Nested element.
    Element(Element),
    /// Text content. Escaped on serialization.
    Text(String),
}

/// A minimal HTML element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Tag name (e.g. `span`).
    pub tag: &'static str,
    /// Attributes in insertion order.
    pub attrs: Vec<(&'static str, String)>,
    /// Child nodes.
    pub children: Vec<Node>,
}

impl Element {
    /// Creates an empty element.
    #[must_use]
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Adds an attribute.
    #[must_use]
    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    /// Appends a text child.
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    /// Appends an element child.
    #[must_use]
    pub fn child(mut self, child: Self) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    /// Returns the value of an attribute.
    #[must_use]
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the concatenated text of this element and its descendants.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            match child {
                Node::Text(t) => out.push_str(t),
                Node::Element(e) => out.push_str(&e.text_content()),
            }
        }
        out
    }

    /// Serializes the element to HTML.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        let _ = write!(out, "<{}", self.tag);
        for (name, value) in &self.attrs {
            let _ = write!(out, " {name}=\"{}\"", escape(value));
        }
        out.push('>');
        for child in &self.children {
            match child {
                Node::Text(t) => out.push_str(&escape(t)),
                Node::Element(e) => e.write_html(out),
            }
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

/// Escapes text for use in HTML content and double-quoted attributes.
#[must_use]
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Document capability the helpers render into.
pub trait Renderer {
    /// Appends `element` to the end of the document body.
    fn append_to_body(&mut self, element: Element);

    /// Sets the body's bottom padding in pixels.
    fn set_body_padding_bottom(&mut self, px: u32);
}

/// In-memory document that collects appended elements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlDocument {
    body: Vec<Element>,
    padding_bottom: Option<u32>,
}

impl HtmlDocument {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the appended elements in order.
    #[must_use]
    pub fn body(&self) -> &[Element] {
        &self.body
    }

    /// Returns the body's bottom padding, if one was set.
    #[must_use]
    pub fn padding_bottom(&self) -> Option<u32> {
        self.padding_bottom
    }

    /// Finds an appended element by its `id` attribute.
    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        self.body.iter().find(|e| e.get_attr("id") == Some(id))
    }

    /// Serializes the body to HTML.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut body = Element::new("body");
        if let Some(px) = self.padding_bottom {
            body = body.attr("style", format!("padding-bottom:{px}px"));
        }
        for element in &self.body {
            body = body.child(element.clone());
        }
        body.to_html()
    }
}

impl Renderer for HtmlDocument {
    fn append_to_body(&mut self, element: Element) {
        self.body.push(element);
    }

    fn set_body_padding_bottom(&mut self, px: u32) {
        self.padding_bottom = Some(px);
    }
}
