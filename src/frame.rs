use crate::camera;
use crate::core::SceneState;
use crate::input;
use crate::render;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// Everything the per-frame callback touches. The frame loop is the only
/// writer of scene state; event handlers only retarget through the shared
/// `RefCell`s.
pub struct FrameContext {
    pub scene: Rc<RefCell<SceneState>>,
    pub canvas: web::HtmlCanvasElement,
    pub mouse: Rc<RefCell<input::MouseState>>,
    pub gpu: render::GpuState,
    pub last_instant: Instant,
}

impl FrameContext {
    /// One full update + render. Cluster updates always complete before the
    /// render call; there is no partial-frame rendering.
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;

        let width = self.canvas.width().max(1);
        let height = self.canvas.height().max(1);
        let aspect = width as f32 / height as f32;

        let mut scene = self.scene.borrow_mut();
        let cam = scene.camera(aspect);

        let ms = *self.mouse.borrow();
        let pointer = if ms.active {
            camera::pointer_world_on_plane(&cam, width as f32, height as f32, ms.x, ms.y)
        } else {
            None
        };

        scene.tick(dt, pointer);

        self.gpu.resize_if_needed(width, height);
        let cam = scene.camera(aspect);
        if let Err(e) = self.gpu.render(
            scene.instances(),
            cam.view_proj(),
            cam.eye,
            scene.ring_model(),
        ) {
            log::warn!("surface error: {:?}", e);
        }
    }
}
