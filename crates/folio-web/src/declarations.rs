#![forbid(unsafe_code)]

//! Inline style declarations written to a revealed element.
//!
//! The browser interpolates between declarations on its own, so each state
//! change writes only the destination style and the `transition` timing.

use folio_core::RevealConfig;
use folio_style::{REVEAL_PROPERTIES, RevealStyle, Transition};
use folio_widgets::RevealState;

/// `(property, value)` pairs for `element.style.setProperty`.
pub type Declarations = [(&'static str, String); 3];

/// Declarations for the resting style of `state`, with no transition.
///
/// Applied once at mount so the first paint already matches the state.
#[must_use]
pub fn initial(state: RevealState, config: &RevealConfig) -> Declarations {
    declare(rest_style(state, config), "none".to_string())
}

/// Declarations that transition the element into `state`.
///
/// Reveals honor the configured delay; hides start immediately.
#[must_use]
pub fn transition_to(state: RevealState, config: &RevealConfig) -> Declarations {
    let timing = Transition::from_config(config);
    let timing = match state {
        RevealState::Visible => timing,
        RevealState::Hidden => timing.without_delay(),
    };
    declare(rest_style(state, config), timing.to_css(&REVEAL_PROPERTIES))
}

fn rest_style(state: RevealState, config: &RevealConfig) -> RevealStyle {
    match state {
        RevealState::Visible => RevealStyle::SHOWN,
        RevealState::Hidden => RevealStyle::hidden_for(config),
    }
}

fn declare(style: RevealStyle, transition: String) -> Declarations {
    [
        ("opacity", style.opacity.to_string()),
        ("transform", style.transform_css()),
        ("transition", transition),
    ]
}
