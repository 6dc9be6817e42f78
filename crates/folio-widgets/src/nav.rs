#![forbid(unsafe_code)]

//! Site navigation with a collapsible mobile menu.
//!
//! [`NavMenu`] is the static description (brand plus anchor links);
//! [`NavState`] is the open/closed toggle. The desktop link row is always
//! rendered; the mobile column only while the menu is open.

use crate::{Frame, StatefulWidget};

/// One anchor link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub href: String,
    pub label: String,
}

impl NavLink {
    pub fn new(href: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            label: label.into(),
        }
    }
}

/// Input to [`NavState::handle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    /// Hamburger button pressed.
    Toggle,
    /// Link at this index (in [`NavMenu::links`] order) activated.
    LinkActivated(usize),
    /// Brand link activated.
    BrandActivated,
    /// Escape pressed or focus left the menu.
    Dismiss,
}

/// What an action did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavOutcome {
    Opened,
    Closed,
    /// Follow this href. The menu is closed.
    Navigate(String),
}

/// Open/closed state of the mobile menu. Starts closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavState {
    open: bool,
}

impl NavState {
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Value for the button's `aria-expanded` attribute.
    #[must_use]
    pub fn aria_expanded(&self) -> &'static str {
        if self.open { "true" } else { "false" }
    }

    /// Apply `action` and report what happened.
    ///
    /// Returns `None` when the action changes nothing: dismissing a closed
    /// menu, or activating a link index that does not exist.
    pub fn handle(&mut self, action: NavAction, menu: &NavMenu) -> Option<NavOutcome> {
        match action {
            NavAction::Toggle => {
                self.toggle();
                Some(if self.open {
                    NavOutcome::Opened
                } else {
                    NavOutcome::Closed
                })
            }
            NavAction::LinkActivated(index) => {
                let link = menu.links.get(index)?;
                self.close();
                Some(NavOutcome::Navigate(link.href.clone()))
            }
            NavAction::BrandActivated => {
                self.close();
                Some(NavOutcome::Navigate(menu.brand.href.clone()))
            }
            NavAction::Dismiss => {
                if !self.open {
                    return None;
                }
                self.close();
                Some(NavOutcome::Closed)
            }
        }
    }
}

/// Id of the mobile menu, referenced by the button's `aria-controls`.
pub const MOBILE_MENU_ID: &str = "folio-nav-menu";

/// Sticky top navigation bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavMenu {
    pub brand: NavLink,
    pub links: Vec<NavLink>,
}

impl NavMenu {
    pub fn new(brand: NavLink) -> Self {
        Self {
            brand,
            links: Vec::new(),
        }
    }

    #[must_use]
    pub fn link(mut self, href: impl Into<String>, label: impl Into<String>) -> Self {
        self.links.push(NavLink::new(href, label));
        self
    }

    fn render_links(&self, frame: &mut Frame, class: &str) {
        for (index, link) in self.links.iter().enumerate() {
            let index = index.to_string();
            frame.open(
                "a",
                &[
                    ("href", link.href.as_str()),
                    ("class", class),
                    ("data-nav-index", index.as_str()),
                ],
            );
            frame.text(&link.label);
            frame.close("a");
        }
    }
}

impl StatefulWidget for NavMenu {
    type State = NavState;

    fn render(&self, frame: &mut Frame, state: &NavState) {
        let modifier = if state.is_open() { " is-open" } else { "" };

        frame.open("nav", &[("class", "folio-nav")]);
        frame.open(
            "a",
            &[
                ("href", self.brand.href.as_str()),
                ("class", "folio-nav__brand"),
            ],
        );
        frame.text(&self.brand.label);
        frame.close("a");

        frame.open("div", &[("class", "folio-nav__links")]);
        self.render_links(frame, "folio-nav__link");
        frame.close("div");

        frame.open(
            "button",
            &[
                ("class", "folio-nav__toggle"),
                ("aria-label", "Toggle navigation menu"),
                ("aria-controls", MOBILE_MENU_ID),
                ("aria-expanded", state.aria_expanded()),
            ],
        );
        for bar in ["top", "middle", "bottom"] {
            let class = format!("folio-nav__bar folio-nav__bar--{bar}{modifier}");
            frame.open("span", &[("class", class.as_str())]);
            frame.close("span");
        }
        frame.close("button");

        if state.is_open() {
            frame.open(
                "div",
                &[("id", MOBILE_MENU_ID), ("class", "folio-nav__mobile")],
            );
            self.render_links(frame, "folio-nav__mobile-link");
            frame.close("div");
        }
        frame.close("nav");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use web_time::Instant;

    fn menu() -> NavMenu {
        NavMenu::new(NavLink::new("#hero", "Home"))
            .link("#about", "About")
            .link("#projects", "Projects")
    }

    fn render(menu: &NavMenu, state: &NavState) -> String {
        let mut frame = Frame::new(Instant::now());
        menu.render(&mut frame, state);
        frame.into_html()
    }

    #[test]
    fn starts_closed() {
        let state = NavState::default();
        assert!(!state.is_open());
        assert_eq!(state.aria_expanded(), "false");
    }

    #[test]
    fn toggle_flips() {
        let menu = menu();
        let mut state = NavState::default();
        assert_eq!(state.handle(NavAction::Toggle, &menu), Some(NavOutcome::Opened));
        assert_eq!(state.aria_expanded(), "true");
        assert_eq!(state.handle(NavAction::Toggle, &menu), Some(NavOutcome::Closed));
        assert!(!state.is_open());
    }

    #[test]
    fn link_activation_closes_and_navigates() {
        let menu = menu();
        let mut state = NavState::default();
        state.open();
        assert_eq!(
            state.handle(NavAction::LinkActivated(1), &menu),
            Some(NavOutcome::Navigate("#projects".into()))
        );
        assert!(!state.is_open());

        state.open();
        assert_eq!(
            state.handle(NavAction::BrandActivated, &menu),
            Some(NavOutcome::Navigate("#hero".into()))
        );
        assert!(!state.is_open());
    }

    #[test]
    fn out_of_range_link_is_ignored() {
        let menu = menu();
        let mut state = NavState::default();
        state.open();
        assert_eq!(state.handle(NavAction::LinkActivated(9), &menu), None);
        assert!(state.is_open());
    }

    #[test]
    fn dismiss_only_reports_when_open() {
        let menu = menu();
        let mut state = NavState::default();
        assert_eq!(state.handle(NavAction::Dismiss, &menu), None);
        state.open();
        assert_eq!(state.handle(NavAction::Dismiss, &menu), Some(NavOutcome::Closed));
    }

    #[test]
    fn mobile_menu_rendered_only_when_open() {
        let menu = menu();
        let mut state = NavState::default();
        let closed = render(&menu, &state);
        assert!(!closed.contains("class=\"folio-nav__mobile\""));
        assert!(closed.contains("aria-expanded=\"false\""));
        assert_eq!(closed.matches("folio-nav__link\"").count(), 2);

        state.open();
        let open = render(&menu, &state);
        assert!(open.contains("class=\"folio-nav__mobile\""));
        assert!(open.contains("aria-expanded=\"true\""));
        assert_eq!(open.matches("folio-nav__mobile-link\"").count(), 2);
        assert_eq!(open.matches(" is-open\"").count(), 3);
    }
}
