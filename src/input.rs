use glam::Vec2;
use web_sys as web;

#[derive(Default, Clone, Copy)]
pub struct MouseState {
    pub x: f32,
    pub y: f32,
    /// False until the first pointer event arrives.
    pub active: bool,
}

/// Pointer position in the canvas' backing store pixel space.
#[inline]
pub fn pointer_canvas_px(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    let x_css = ev.client_x() as f32 - rect.left() as f32;
    let y_css = ev.client_y() as f32 - rect.top() as f32;
    let w = rect.width() as f32;
    let h = rect.height() as f32;
    if w > 0.0 && h > 0.0 {
        Vec2::new(
            (x_css / w) * canvas.width() as f32,
            (y_css / h) * canvas.height() as f32,
        )
    } else {
        Vec2::ZERO
    }
}
