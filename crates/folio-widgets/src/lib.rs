#![forbid(unsafe_code)]

//! Widgets for Folio.
//!
//! Widgets render themselves as HTML into a [`Frame`]. The frame carries the
//! instant being rendered so time-based presentation (reveal transitions)
//! stays a pure function of widget state and `frame.now()`.

pub mod content;
pub mod nav;
pub mod reveal;

pub use content::{RawHtml, Section, Text};
pub use nav::{NavAction, NavLink, NavMenu, NavOutcome, NavState};
pub use reveal::{MountedReveal, Reveal, RevealMachine, RevealState};

use web_time::Instant;

/// A `Widget` is a renderable component.
pub trait Widget {
    /// Render the widget into the frame.
    fn render(&self, frame: &mut Frame);
}

/// A `StatefulWidget` renders based on externally owned state.
pub trait StatefulWidget {
    type State;

    fn render(&self, frame: &mut Frame, state: &Self::State);
}

impl<W: Widget + ?Sized> Widget for &W {
    fn render(&self, frame: &mut Frame) {
        (**self).render(frame);
    }
}

impl<W: Widget + ?Sized> Widget for Box<W> {
    fn render(&self, frame: &mut Frame) {
        (**self).render(frame);
    }
}

/// HTML output for one render pass.
#[derive(Debug, Clone)]
pub struct Frame {
    now: Instant,
    html: String,
}

impl Frame {
    /// Start an empty frame rendered at `now`.
    #[must_use]
    pub fn new(now: Instant) -> Self {
        Self {
            now,
            html: String::new(),
        }
    }

    /// The instant this frame represents.
    #[must_use]
    pub fn now(&self) -> Instant {
        self.now
    }

    /// Open `tag` with escaped attribute values.
    pub fn open(&mut self, tag: &str, attrs: &[(&str, &str)]) {
        self.html.push('<');
        self.html.push_str(tag);
        for (name, value) in attrs {
            self.html.push(' ');
            self.html.push_str(name);
            self.html.push_str("=\"");
            push_escaped(&mut self.html, value);
            self.html.push('"');
        }
        self.html.push('>');
    }

    pub fn close(&mut self, tag: &str) {
        self.html.push_str("</");
        self.html.push_str(tag);
        self.html.push('>');
    }

    /// Escaped text content.
    pub fn text(&mut self, text: &str) {
        push_escaped(&mut self.html, text);
    }

    /// Trusted markup, written verbatim.
    pub fn raw(&mut self, html: &str) {
        self.html.push_str(html);
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.html
    }

    #[must_use]
    pub fn into_html(self) -> String {
        self.html
    }
}

pub(crate) fn push_escaped(out: &mut String, raw: &str) {
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
}

/// Render a widget into a fresh frame and return the markup.
#[must_use]
pub fn render_to_string(widget: &impl Widget, now: Instant) -> String {
    let mut frame = Frame::new(now);
    widget.render(&mut frame);
    frame.into_html()
}
