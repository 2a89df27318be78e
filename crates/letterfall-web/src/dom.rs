//! Thin helpers over `web_sys` for the DOM calls the bridge repeats.

use letterfall::{AnchorRect, Viewport};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, Window};

pub fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))
}

pub fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("window has no document"))
}

pub fn body() -> Result<HtmlElement, JsValue> {
    document()?
        .body()
        .ok_or_else(|| JsValue::from_str("document has no body"))
}

/// Monotonic milliseconds, on the same clock as `requestAnimationFrame`.
pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map_or_else(js_sys::Date::now, |p| p.now())
}

/// Client-area size of the window.
pub fn viewport() -> Result<Viewport, JsValue> {
    let w = window()?;
    let width = w.inner_width()?.as_f64().unwrap_or(0.0);
    let height = w.inner_height()?.as_f64().unwrap_or(0.0);
    Ok(Viewport::new(width as f32, height as f32))
}

pub fn rect_of(el: &Element) -> AnchorRect {
    let r = el.get_bounding_client_rect();
    AnchorRect::new(r.left() as f32, r.top() as f32, r.width() as f32, r.height() as f32)
}

/// Client rect of the first element matching `selector`, if any.
pub fn anchor_rect(selector: &str) -> Option<AnchorRect> {
    let el = document().ok()?.query_selector(selector).ok()??;
    Some(rect_of(&el))
}

/// All elements matching `selector` that are `HtmlElement`s, in document order.
pub fn query_all(root: &Document, selector: &str) -> Result<Vec<HtmlElement>, JsValue> {
    let list = root.query_selector_all(selector)?;
    Ok((0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect())
}

pub fn create(tag: &str, class: &str) -> Result<HtmlElement, JsValue> {
    let el = document()?.create_element(tag)?.dyn_into::<HtmlElement>()?;
    if !class.is_empty() {
        el.set_class_name(class);
    }
    Ok(el)
}

pub fn set_style(el: &HtmlElement, property: &str, value: &str) -> Result<(), JsValue> {
    el.style().set_property(property, value)
}

/// Attach a listener for the lifetime of the page.
pub fn listen(target: &EventTarget, event: &str, handler: impl FnMut(Event) + 'static) -> Result<(), JsValue> {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Run `f` once after `ms` milliseconds.
pub fn set_timeout(ms: i32, f: impl FnOnce() + 'static) -> Result<(), JsValue> {
    let cb = Closure::once(f);
    window()?.set_timeout_with_callback_and_timeout_and_arguments_0(cb.as_ref().unchecked_ref(), ms)?;
    cb.forget();
    Ok(())
}

/// CSS transform for a floater whose `left/top` is its centre.
pub fn floater_transform(rotation_deg: f32, scale: f32) -> String {
    format!("translate(-50%, -50%) rotate({:.2}deg) scale({:.3})", rotation_deg, scale)
}

/// CSS transform for the zoomed lightbox image.
pub fn zoom_transform(offset_x: f32, offset_y: f32, scale: f32) -> String {
    format!("translate({:.1}px, {:.1}px) scale({:.3})", offset_x, offset_y, scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floater_transform_centres_the_glyph() {
        assert_eq!(
            floater_transform(372.5, 1.0),
            "translate(-50%, -50%) rotate(372.50deg) scale(1.000)"
        );
    }

    #[test]
    fn zoom_transform_formats_offsets() {
        assert_eq!(zoom_transform(-12.0, 3.0, 2.5), "translate(-12.0px, 3.0px) scale(2.500)");
    }
}
