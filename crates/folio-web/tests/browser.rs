//! Browser tests; run with `wasm-pack test --headless --firefox crates/folio-web`.

#![cfg(target_arch = "wasm32")]

use folio_core::RevealConfig;
use folio_web::{DomIntersectionHost, DomReveal, RevealGroup};
use folio_widgets::RevealState;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlElement;

wasm_bindgen_test_configure!(run_in_browser);

fn offscreen_element() -> HtmlElement {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .expect("document");
    let element = document
        .create_element("div")
        .expect("create div")
        .dyn_into::<HtmlElement>()
        .expect("html element");
    element.set_attribute("data-reveal", "").expect("attribute");
    element
        .set_attribute("style", "position: absolute; top: 100000px; height: 10px")
        .expect("attribute");
    document
        .body()
        .expect("body")
        .append_child(&element)
        .expect("append");
    element
}

#[wasm_bindgen_test]
fn browsers_support_intersection_observer() {
    assert!(DomIntersectionHost::is_supported());
}

#[wasm_bindgen_test]
fn mount_hides_and_observes() {
    let element = offscreen_element();
    let reveal = DomReveal::mount(&DomIntersectionHost::new(), element, RevealConfig::default());
    assert_eq!(reveal.state(), RevealState::Hidden);
    assert!(reveal.is_observing());
    let style = reveal.element().style();
    assert_eq!(style.get_property_value("opacity").expect("opacity"), "0");

    let element = reveal.unmount();
    element.remove();
}

#[wasm_bindgen_test]
fn group_attaches_to_matching_elements() {
    let element = offscreen_element();
    let group = RevealGroup::attach("[data-reveal]").expect("attach");
    assert!(group.len() >= 1);
    drop(group);
    element.remove();
}
