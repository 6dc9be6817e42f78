//! Reveals bound to live DOM elements.

use folio_core::RevealConfig;
use folio_widgets::{MountedReveal, Reveal, RevealState};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlElement};

use crate::declarations::{self, Declarations};
use crate::host::DomIntersectionHost;

/// Attribute read by [`RevealGroup::attach`] for a per-element delay.
pub const DELAY_ATTRIBUTE: &str = "data-reveal-delay";

fn apply(element: &HtmlElement, declarations: &Declarations) {
    let style = element.style();
    for (property, value) in declarations {
        if let Err(err) = style.set_property(property, value) {
            #[cfg(feature = "tracing")]
            tracing::warn!(property, error = ?err, "failed to set reveal style");
            #[cfg(not(feature = "tracing"))]
            let _ = err;
        }
    }
}

/// A reveal that writes its target style onto `element` on every change.
///
/// The element keeps its own children; only inline `opacity`, `transform`,
/// and `transition` are touched.
#[derive(Debug)]
pub struct DomReveal {
    reveal: MountedReveal<()>,
    element: HtmlElement,
}

impl DomReveal {
    /// Style `element` as hidden and start observing it.
    pub fn mount(host: &DomIntersectionHost, element: HtmlElement, config: RevealConfig) -> Self {
        apply(&element, &declarations::initial(RevealState::Hidden, &config));

        let target: &Element = &element;
        let mut reveal = Reveal::new(()).config(config.clone()).mount(host, target);

        if reveal.is_visible() {
            // Failed open during mount; no transition to run.
            apply(&element, &declarations::initial(RevealState::Visible, &config));
        }

        let target = element.clone();
        reveal.watch(move |state| {
            apply(&target, &declarations::transition_to(state, &config));
        });

        Self { reveal, element }
    }

    #[must_use]
    pub fn state(&self) -> RevealState {
        self.reveal.state()
    }

    #[must_use]
    pub fn is_observing(&self) -> bool {
        self.reveal.is_observing()
    }

    #[must_use]
    pub fn element(&self) -> &HtmlElement {
        &self.element
    }

    /// Stop observing. Inline styles stay as they are.
    pub fn unmount(self) -> HtmlElement {
        self.reveal.unmount();
        self.element
    }
}

/// Reveals for every element matching a selector, exported to JS.
///
/// ```js
/// const group = RevealGroup.attach("[data-reveal]");
/// // later, e.g. on route change:
/// group.free();
/// ```
#[wasm_bindgen]
#[derive(Debug)]
pub struct RevealGroup {
    reveals: Vec<DomReveal>,
}

#[wasm_bindgen]
impl RevealGroup {
    /// Mount a reveal on each element matching `selector`.
    ///
    /// Each element's `data-reveal-delay` (milliseconds) sets its delay.
    pub fn attach(selector: &str) -> Result<RevealGroup, JsValue> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let nodes = document.query_selector_all(selector)?;
        let host = DomIntersectionHost::new();

        let mut reveals = Vec::with_capacity(nodes.length() as usize);
        for index in 0..nodes.length() {
            let Some(element) = nodes
                .item(index)
                .and_then(|node| node.dyn_into::<HtmlElement>().ok())
            else {
                continue;
            };
            let delay_ms = element
                .get_attribute(DELAY_ATTRIBUTE)
                .and_then(|raw| raw.trim().parse::<u64>().ok())
                .unwrap_or(0);
            let config = RevealConfig::default().delay_ms(delay_ms);
            reveals.push(DomReveal::mount(&host, element, config));
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(selector, count = reveals.len(), "attached reveals");
        Ok(Self { reveals })
    }

    /// Number of elements under management.
    #[must_use]
    pub fn len(&self) -> usize {
        self.reveals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reveals.is_empty()
    }

    /// Number of elements already revealed.
    #[wasm_bindgen(js_name = visibleCount)]
    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.reveals
            .iter()
            .filter(|reveal| reveal.state().is_visible())
            .count()
    }
}
