#![forbid(unsafe_code)]

//! Integration tests: navigation toggle markup and actions.

use folio_widgets::{Frame, NavAction, NavLink, NavMenu, NavOutcome, NavState, StatefulWidget};
use pretty_assertions::assert_eq;
use web_time::Instant;

fn site_nav() -> NavMenu {
    NavMenu::new(NavLink::new("#hero", "Ada Lovelace"))
        .link("#about", "About")
        .link("#projects", "Projects")
        .link("#resume", "Resume")
        .link("#contact", "Contact")
}

fn render(menu: &NavMenu, state: &NavState) -> String {
    let mut frame = Frame::new(Instant::now());
    menu.render(&mut frame, state);
    frame.into_html()
}

#[test]
fn closed_markup() {
    let menu = NavMenu::new(NavLink::new("#hero", "Home")).link("#about", "About");
    assert_eq!(
        render(&menu, &NavState::default()),
        concat!(
            "<nav class=\"folio-nav\">",
            "<a href=\"#hero\" class=\"folio-nav__brand\">Home</a>",
            "<div class=\"folio-nav__links\">",
            "<a href=\"#about\" class=\"folio-nav__link\" data-nav-index=\"0\">About</a>",
            "</div>",
            "<button class=\"folio-nav__toggle\" aria-label=\"Toggle navigation menu\" ",
            "aria-controls=\"folio-nav-menu\" aria-expanded=\"false\">",
            "<span class=\"folio-nav__bar folio-nav__bar--top\"></span>",
            "<span class=\"folio-nav__bar folio-nav__bar--middle\"></span>",
            "<span class=\"folio-nav__bar folio-nav__bar--bottom\"></span>",
            "</button>",
            "</nav>",
        )
    );
}

#[test]
fn open_markup_adds_mobile_column() {
    let menu = NavMenu::new(NavLink::new("#hero", "Home")).link("#about", "About");
    let mut state = NavState::default();
    state.handle(NavAction::Toggle, &menu);
    assert_eq!(
        render(&menu, &state),
        concat!(
            "<nav class=\"folio-nav\">",
            "<a href=\"#hero\" class=\"folio-nav__brand\">Home</a>",
            "<div class=\"folio-nav__links\">",
            "<a href=\"#about\" class=\"folio-nav__link\" data-nav-index=\"0\">About</a>",
            "</div>",
            "<button class=\"folio-nav__toggle\" aria-label=\"Toggle navigation menu\" ",
            "aria-controls=\"folio-nav-menu\" aria-expanded=\"true\">",
            "<span class=\"folio-nav__bar folio-nav__bar--top is-open\"></span>",
            "<span class=\"folio-nav__bar folio-nav__bar--middle is-open\"></span>",
            "<span class=\"folio-nav__bar folio-nav__bar--bottom is-open\"></span>",
            "</button>",
            "<div id=\"folio-nav-menu\" class=\"folio-nav__mobile\">",
            "<a href=\"#about\" class=\"folio-nav__mobile-link\" data-nav-index=\"0\">About</a>",
            "</div>",
            "</nav>",
        )
    );
}

#[test]
fn following_a_mobile_link_closes_the_menu() {
    let menu = site_nav();
    let mut state = NavState::default();
    let mut hrefs = Vec::new();

    for index in 0..menu.links.len() {
        assert_eq!(state.handle(NavAction::Toggle, &menu), Some(NavOutcome::Opened));
        assert!(render(&menu, &state).contains("aria-expanded=\"true\""));
        match state.handle(NavAction::LinkActivated(index), &menu) {
            Some(NavOutcome::Navigate(href)) => hrefs.push(href),
            other => panic!("expected navigation, got {other:?}"),
        }
        assert!(!state.is_open());
        assert!(render(&menu, &state).contains("aria-expanded=\"false\""));
    }
    assert_eq!(hrefs, vec!["#about", "#projects", "#resume", "#contact"]);
}

#[test]
fn brand_link_navigates_even_when_closed() {
    let menu = site_nav();
    let mut state = NavState::default();
    assert_eq!(
        state.handle(NavAction::BrandActivated, &menu),
        Some(NavOutcome::Navigate("#hero".to_string()))
    );
    assert!(!state.is_open());
}

#[test]
fn labels_are_escaped() {
    let menu = NavMenu::new(NavLink::new("#top", "R&D <lab>"));
    let html = render(&menu, &NavState::default());
    assert!(html.contains(">R&amp;D &lt;lab&gt;</a>"));
}
