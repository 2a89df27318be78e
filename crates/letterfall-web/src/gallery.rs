//! Gallery page wiring: thumbnails, the lightbox overlay and its gestures.
//! All navigation decisions come from `letterfall::Lightbox`; this module
//! only renders the `LightboxView` it returns.

use std::cell::RefCell;

use glam::Vec2;
use letterfall::{Direction, Gallery, Lightbox, LightboxConfig, LightboxView};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, HtmlImageElement, KeyboardEvent, TouchEvent, TouchList};

use crate::dom;

struct LightboxElements {
    root: HtmlElement,
    image: HtmlImageElement,
    caption: HtmlElement,
    card: HtmlElement,
}

struct GalleryUi {
    lightbox: Lightbox,
    base_url: String,
    els: LightboxElements,
    /// Where a single-finger touch began, for swipe detection.
    swipe_start: Option<Vec2>,
}

thread_local! {
    static GALLERY: RefCell<Option<GalleryUi>> = RefCell::new(None);
}

fn with_gallery<R>(f: impl FnOnce(&mut GalleryUi) -> R) -> Option<R> {
    GALLERY.with(|cell| cell.borrow_mut().as_mut().map(f))
}

/// Build the thumbnail rows in `#gallery-container` and the lightbox.
#[wasm_bindgen]
pub fn init_gallery(series_json: &str, base_url: &str) -> Result<(), JsValue> {
    let gallery = Gallery::from_json(series_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let document = dom::document()?;
    let Some(container) = document.get_element_by_id("gallery-container") else {
        log::info!("gallery: no #gallery-container on this page");
        return Ok(());
    };

    for (s, series) in gallery.series().iter().enumerate() {
        let section = dom::create("div", "gallery-series")?;
        let header = dom::create("div", "series-header")?;
        let title = dom::create("h2", "series-title")?;
        title.set_text_content(Some(&series.title));
        header.append_child(&title)?;
        if let Some(subtitle) = &series.subtitle {
            let p = dom::create("p", "series-subtitle")?;
            p.set_text_content(Some(subtitle));
            header.append_child(&p)?;
        }
        section.append_child(&header)?;

        let row = dom::create("div", "series-scroll-row")?;
        for (i, art) in series.images.iter().enumerate() {
            let thumb_box = dom::create("div", "gallery-thumb-container")?;
            let thumb = dom::create("img", "gallery-thumb")?.dyn_into::<HtmlImageElement>()?;
            thumb.set_src(&format!("{}{}", base_url, art.filename));
            thumb.set_alt(art.alt_text());
            thumb.set_attribute("loading", "lazy")?;
            let label = dom::create("div", "museum-label")?;
            label.set_text_content(Some(&art.museum_label()));
            thumb_box.append_child(&thumb)?;
            thumb_box.append_child(&label)?;
            dom::listen(&thumb_box, "click", move |_| {
                update(|ui| Some(ui.lightbox.open(s, i)));
            })?;
            row.append_child(&thumb_box)?;
        }
        section.append_child(&row)?;
        container.append_child(&section)?;
    }

    protect_images(&document)?;
    init_list_view(&document, &container)?;

    let els = build_lightbox()?;
    wire_lightbox(&els)?;
    let series_count = gallery.len();
    GALLERY.with(|cell| {
        *cell.borrow_mut() = Some(GalleryUi {
            lightbox: Lightbox::new(gallery, LightboxConfig::default()),
            base_url: base_url.to_string(),
            els,
            swipe_start: None,
        })
    });

    log::info!("gallery: {} series", series_count);
    Ok(())
}

/// No context menu or drag-out on any page image.
fn protect_images(document: &Document) -> Result<(), JsValue> {
    for event in ["contextmenu", "dragstart"] {
        dom::listen(document, event, |evt: Event| {
            let on_image = evt
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .is_some_and(|el| el.tag_name() == "IMG");
            if on_image {
                evt.prevent_default();
            }
        })?;
    }
    Ok(())
}

/// Label for `#list-view-toggle`: it names the view a click switches to.
fn list_view_label(list_view: bool) -> &'static str {
    if list_view {
        "Gallery View"
    } else {
        "List View"
    }
}

/// `#list-view-toggle` flips the container between grid and list layouts.
fn init_list_view(document: &Document, container: &Element) -> Result<(), JsValue> {
    let Some(toggle) = document.get_element_by_id("list-view-toggle") else {
        return Ok(());
    };
    let container = container.clone();
    let label = toggle.clone();
    dom::listen(&toggle, "click", move |_| match container.class_list().toggle("list-view") {
        Ok(list_view) => label.set_text_content(Some(list_view_label(list_view))),
        Err(err) => log::warn!("gallery: list view toggle: {:?}", err),
    })?;
    Ok(())
}

fn build_lightbox() -> Result<LightboxElements, JsValue> {
    let root = dom::create("div", "lightbox")?;
    root.set_id("lightbox");
    let content = dom::create("div", "lightbox-content")?;

    let button = |class: &str, label: &str, text: &str| -> Result<HtmlElement, JsValue> {
        let b = dom::create("button", class)?;
        b.set_attribute("aria-label", label)?;
        b.set_text_content(Some(text));
        Ok(b)
    };
    let close = button("lightbox-close", "Close", "\u{00d7}")?;
    let prev = button("lightbox-prev", "Previous", "\u{2039}")?;
    let next = button("lightbox-next", "Next", "\u{203a}")?;
    let zoom = button("lightbox-zoom", "Toggle zoom", "+")?;

    let frame = dom::create("div", "lightbox-image-container")?;
    let image = dom::create("img", "")?.dyn_into::<HtmlImageElement>()?;
    image.set_id("lightbox-image");
    frame.append_child(&image)?;
    frame.append_child(&zoom)?;

    let caption = dom::create("div", "lightbox-caption")?;
    let card = dom::create("div", "lightbox-series-card")?;
    dom::set_style(&card, "display", "none")?;

    for child in [&close, &prev, &frame, &next, &caption, &card] {
        content.append_child(child)?;
    }
    root.append_child(&content)?;
    dom::body()?.append_child(&root)?;

    dom::listen(&close, "click", |_| update(|ui| Some(ui.lightbox.close())))?;
    dom::listen(&prev, "click", |_| update(|ui| Some(ui.lightbox.prev_image(dom::now_ms()))))?;
    dom::listen(&next, "click", |_| update(|ui| Some(ui.lightbox.next_image(dom::now_ms()))))?;
    dom::listen(&zoom, "click", |evt: Event| {
        evt.stop_propagation();
        with_gallery(|ui| {
            ui.lightbox.zoom_mut().toggle();
            log_err(apply_zoom(ui));
        });
    })?;

    Ok(LightboxElements {
        root,
        image,
        caption,
        card,
    })
}

fn wire_lightbox(els: &LightboxElements) -> Result<(), JsValue> {
    // Clicking the dimmed backdrop closes.
    let root = els.root.clone();
    dom::listen(&els.root, "click", move |evt: Event| {
        let on_backdrop = evt
            .target()
            .and_then(|t| t.dyn_into::<HtmlElement>().ok())
            .is_some_and(|t| t == root);
        if on_backdrop {
            update(|ui| Some(ui.lightbox.close()));
        }
    })?;

    dom::listen(dom::document()?.as_ref(), "keydown", |evt: Event| {
        let Some(key) = evt.dyn_ref::<KeyboardEvent>().map(|k| k.key()) else {
            return;
        };
        update(|ui| ui.lightbox.handle_key(&key, dom::now_ms()));
    })?;

    dom::listen(&els.root, "touchstart", |evt: Event| {
        let Some(touch) = evt.dyn_ref::<TouchEvent>() else {
            return;
        };
        let points = touch_points(&touch.touches());
        with_gallery(|ui| {
            ui.swipe_start = match points.as_slice() {
                [p] => Some(*p),
                _ => None,
            };
            ui.lightbox.zoom_mut().touch_start(&points);
        });
    })?;

    dom::listen(&els.root, "touchmove", |evt: Event| {
        let Some(touch) = evt.dyn_ref::<TouchEvent>() else {
            return;
        };
        let points = touch_points(&touch.touches());
        with_gallery(|ui| {
            if !ui.lightbox.zoom().is_gesturing() {
                return;
            }
            if points.len() > 1 {
                ui.swipe_start = None;
            }
            let frame = image_frame(&ui.els.image, ui.lightbox.zoom().scale());
            ui.lightbox.zoom_mut().touch_move(&points, frame);
            log_err(apply_zoom(ui));
        });
    })?;

    dom::listen(&els.root, "touchend", |evt: Event| {
        let Some(touch) = evt.dyn_ref::<TouchEvent>() else {
            return;
        };
        let remaining = touch_points(&touch.touches());
        let end = touch_points(&touch.changed_touches()).first().copied();
        update(|ui| {
            let was_zoomed = ui.lightbox.zoom().is_zoomed();
            ui.lightbox.zoom_mut().touch_end(&remaining);
            log_err(apply_zoom(ui));
            match (ui.swipe_start.take(), end) {
                (Some(start), Some(end)) if !was_zoomed && remaining.is_empty() => ui.lightbox.swipe(start, end),
                _ => None,
            }
        });
    })?;

    Ok(())
}

fn touch_points(list: &TouchList) -> Vec<Vec2> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .map(|t| Vec2::new(t.client_x() as f32, t.client_y() as f32))
        .collect()
}

/// Unscaled rendered size of the lightbox image.
fn image_frame(image: &HtmlImageElement, scale: f32) -> Vec2 {
    let r = image.get_bounding_client_rect();
    Vec2::new(r.width() as f32, r.height() as f32) / scale.max(1.0)
}

fn apply_zoom(ui: &GalleryUi) -> Result<(), JsValue> {
    let zoom = ui.lightbox.zoom();
    let image = &ui.els.image;
    if zoom.is_zoomed() {
        image.class_list().add_1("zoomed")?;
        let offset = zoom.offset();
        image
            .style()
            .set_property("transform", &dom::zoom_transform(offset.x, offset.y, zoom.scale()))?;
    } else {
        image.class_list().remove_1("zoomed")?;
        image.style().remove_property("transform")?;
    }
    Ok(())
}

/// Apply a lightbox transition and render whatever view it produced.
fn update(f: impl FnOnce(&mut GalleryUi) -> Option<LightboxView>) {
    let result = with_gallery(|ui| match f(ui) {
        Some(view) => render(ui, view),
        None => Ok(()),
    });
    if let Some(result) = result {
        log_err(result);
    }
}

fn render(ui: &GalleryUi, view: LightboxView) -> Result<(), JsValue> {
    let els = &ui.els;
    log_err(apply_zoom(ui));
    let body = dom::body()?;
    if view.is_open() {
        dom::set_style(&body, "overflow", "hidden")?;
    } else {
        body.style().remove_property("overflow")?;
    }
    match view {
        LightboxView::Closed => {
            els.root.class_list().remove_1("active")?;
        }
        LightboxView::Image { series, image } => {
            els.root.class_list().add_1("active")?;
            dom::set_style(&els.card, "display", "none")?;
            dom::set_style(&els.image, "display", "block")?;
            if let Some(art) = ui.lightbox.gallery().artwork(series, image) {
                els.image.set_src(&format!("{}{}", ui.base_url, art.filename));
                els.image.set_alt(art.alt_text());
                let caption = art.caption();
                let display = if caption.is_empty() { "none" } else { "block" };
                els.caption.set_text_content(Some(&caption));
                dom::set_style(&els.caption, "display", display)?;
            }
            preload(ui);
        }
        LightboxView::SeriesCard { series, direction } => {
            dom::set_style(&els.image, "display", "none")?;
            dom::set_style(&els.caption, "display", "none")?;
            dom::set_style(&els.card, "display", "flex")?;
            fill_card(&els.card, ui.lightbox.gallery(), series, direction)?;
            // A little past the hold so the poll lands on the far side of it.
            let wait = LightboxConfig::default().transition_ms as i32 + 16;
            dom::set_timeout(wait, || update(|ui| ui.lightbox.poll(dom::now_ms())))?;
        }
    }
    Ok(())
}

fn fill_card(card: &HtmlElement, gallery: &Gallery, series: usize, direction: Direction) -> Result<(), JsValue> {
    card.set_text_content(None);
    let Some(target) = gallery.get(series) else {
        return Ok(());
    };
    let title = dom::create("h2", "")?;
    title.set_text_content(Some(&target.title));
    card.append_child(&title)?;
    if let Some(subtitle) = &target.subtitle {
        let p = dom::create("p", "")?;
        p.set_text_content(Some(subtitle));
        card.append_child(&p)?;
    }
    let arrow = dom::create("div", "series-arrow")?;
    arrow.set_text_content(Some(match direction {
        Direction::Next => "\u{2192}",
        Direction::Prev => "\u{2190}",
    }));
    card.append_child(&arrow)?;
    Ok(())
}

/// Warm the browser cache for the neighbours of the current image.
fn preload(ui: &GalleryUi) {
    let Some(series) = ui.lightbox.current_series() else {
        return;
    };
    for i in ui.lightbox.preload_indices() {
        if let (Some(art), Ok(img)) = (series.images.get(i), HtmlImageElement::new()) {
            img.set_src(&format!("{}{}", ui.base_url, art.filename));
        }
    }
}

fn log_err(result: Result<(), JsValue>) {
    if let Err(err) = result {
        log::warn!("gallery: {:?}", err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_toggle_names_the_other_view() {
        assert_eq!(list_view_label(true), "Gallery View");
        assert_eq!(list_view_label(false), "List View");
    }
}
