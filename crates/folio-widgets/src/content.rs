#![forbid(unsafe_code)]

//! Plain content widgets used as reveal payloads.

use crate::{Frame, Widget};

/// Escaped text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text(String);

impl Text {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }
}

impl Widget for Text {
    fn render(&self, frame: &mut Frame) {
        frame.text(&self.0);
    }
}

/// Trusted, pre-rendered markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawHtml(String);

impl RawHtml {
    pub fn new(html: impl Into<String>) -> Self {
        Self(html.into())
    }
}

impl Widget for RawHtml {
    fn render(&self, frame: &mut Frame) {
        frame.raw(&self.0);
    }
}

/// An anchorable `<section>` with child widgets.
pub struct Section {
    id: String,
    class: Option<String>,
    children: Vec<Box<dyn Widget>>,
}

impl Section {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            class: None,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    #[must_use]
    pub fn child(mut self, widget: impl Widget + 'static) -> Self {
        self.children.push(Box::new(widget));
        self
    }

    /// Anchor id, usable as a navigation target (`#id`).
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl Widget for Section {
    fn render(&self, frame: &mut Frame) {
        match &self.class {
            Some(class) => frame.open(
                "section",
                &[("id", self.id.as_str()), ("class", class.as_str())],
            ),
            None => frame.open("section", &[("id", self.id.as_str())]),
        }
        for child in &self.children {
            child.render(frame);
        }
        frame.close("section");
    }
}

impl std::fmt::Debug for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Section")
            .field("id", &self.id)
            .field("class", &self.class)
            .field("children", &self.children.len())
            .finish()
    }
}
