use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{window, Element, Event, HtmlElement};

use crate::motion::Pose;
use crate::reveal::Geometry;

pub fn viewport_size() -> (f64, f64) {
    let Some(win) = window() else {
        return (1280.0, 720.0);
    };

    let width = win
        .inner_width()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(1280.0);
    let height = win
        .inner_height()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(720.0);

    (width, height)
}

pub fn prefers_reduced_motion() -> bool {
    window()
        .and_then(|w| {
            w.match_media("(prefers-reduced-motion: reduce)")
                .ok()
                .flatten()
        })
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

pub fn enable_smooth_scroll() {
    let root = window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
        .and_then(|root| root.dyn_into::<HtmlElement>().ok());

    if let Some(root) = root {
        let _ = root.style().set_property("scroll-behavior", "smooth");
    }
}

pub fn element_text(id: &str) -> Option<String> {
    window()?
        .document()?
        .get_element_by_id(id)?
        .text_content()
}

pub fn geometry_of(element: &Element) -> Geometry {
    let rect = element.get_bounding_client_rect();
    let (_, viewport_height) = viewport_size();

    Geometry {
        top: rect.top(),
        bottom: rect.bottom(),
        viewport_height,
    }
}

pub fn child_elements(container: &Element) -> Vec<HtmlElement> {
    let children = container.children();
    (0..children.length())
        .filter_map(|index| children.item(index))
        .filter_map(|child| child.dyn_into::<HtmlElement>().ok())
        .collect()
}

pub fn set_style(element: &HtmlElement, property: &str, value: &str) {
    let _ = element.style().set_property(property, value);
}

pub fn apply_pose(element: &HtmlElement, pose: &Pose) {
    for (property, value) in pose.css_properties() {
        set_style(element, property, &value);
    }
}

/// A `window` event listener that unregisters itself when dropped.
pub struct WindowListener {
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl WindowListener {
    pub fn new(event: &'static str, callback: impl FnMut(Event) + 'static) -> Option<Self> {
        let callback = Closure::<dyn FnMut(Event)>::new(callback);
        window()?
            .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
            .ok()?;

        Some(Self { event, callback })
    }
}

impl Drop for WindowListener {
    fn drop(&mut self) {
        if let Some(win) = window() {
            let _ = win.remove_event_listener_with_callback(
                self.event,
                self.callback.as_ref().unchecked_ref(),
            );
        }
    }
}
