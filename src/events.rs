use crate::core::{stage_from_scroll, SceneState, MAX_SCROLL_Y, MIN_SCROLL_Y, TOTAL_STAGES};
use crate::dom;
use crate::input;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// Map the window scroll offset onto a stage and retarget the scene.
pub fn wire_scroll(window: &web::Window, scene: Rc<RefCell<SceneState>>) {
    let win = window.clone();
    let closure = Closure::wrap(Box::new(move || {
        let y = win.scroll_y().unwrap_or(0.0);
        let stage = stage_from_scroll(y, MIN_SCROLL_Y, MAX_SCROLL_Y, TOTAL_STAGES);
        scene.borrow_mut().apply_stage(stage);
    }) as Box<dyn FnMut()>);
    let _ = window.add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Track pointer movement in canvas pixel space; the frame loop projects it
/// into world space once per tick (inputs between ticks coalesce).
pub fn wire_pointer(
    window: &web::Window,
    canvas: &web::HtmlCanvasElement,
    mouse: Rc<RefCell<input::MouseState>>,
) {
    let canvas = canvas.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let px = input::pointer_canvas_px(&ev, &canvas);
        let mut m = mouse.borrow_mut();
        m.x = px.x;
        m.y = px.y;
        m.active = true;
    }) as Box<dyn FnMut(web::PointerEvent)>);
    let _ =
        window.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Keep the canvas backing size in sync with its CSS layout size.
pub fn wire_resize(window: &web::Window, canvas: &web::HtmlCanvasElement) {
    let canvas = canvas.clone();
    let closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas);
    }) as Box<dyn FnMut()>);
    let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    closure.forget();
}

#[inline]
fn field(obj: &JsValue, key: &str) -> Option<JsValue> {
    js_sys::Reflect::get(obj, &JsValue::from_str(key))
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
}

#[inline]
fn field_f64(obj: &JsValue, key: &str) -> Option<f64> {
    field(obj, key).and_then(|v| v.as_f64())
}

/// Host messages: `{type, payload}` with `setStage`, `resize` and `init`.
pub fn wire_messages(
    window: &web::Window,
    canvas: &web::HtmlCanvasElement,
    scene: Rc<RefCell<SceneState>>,
) {
    let canvas = canvas.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::MessageEvent| {
        let data = ev.data();
        let Some(ty) = field(&data, "type").and_then(|v| v.as_string()) else {
            return;
        };
        let Some(payload) = field(&data, "payload") else {
            return;
        };
        match ty.as_str() {
            "setStage" => {
                if let Some(stage) = field_f64(&payload, "stage") {
                    log::info!("setStage {}", stage);
                    scene.borrow_mut().apply_stage(stage as u32);
                }
            }
            "resize" => {
                if let (Some(w), Some(h)) = (
                    field_f64(&payload, "width"),
                    field_f64(&payload, "height"),
                ) {
                    dom::set_canvas_size(&canvas, w, h);
                }
            }
            "init" => {
                if let (Some(w), Some(h)) = (
                    field_f64(&payload, "width"),
                    field_f64(&payload, "height"),
                ) {
                    dom::set_canvas_size(&canvas, w, h);
                }
                let y = field_f64(&payload, "scrollY").unwrap_or(0.0);
                let stage = stage_from_scroll(y, MIN_SCROLL_Y, MAX_SCROLL_Y, TOTAL_STAGES);
                scene.borrow_mut().apply_stage(stage);
            }
            other => log::warn!("unknown message type: {}", other),
        }
    }) as Box<dyn FnMut(web::MessageEvent)>);
    let _ = window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref());
    closure.forget();
}
