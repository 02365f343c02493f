#![cfg(target_arch = "wasm32")]
use crate::core::{stage_from_scroll, SceneConfig, SceneState, MAX_SCROLL_Y, MIN_SCROLL_Y, TOTAL_STAGES};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod camera;
mod constants;
mod core;
mod dom;
mod events;
mod frame;
mod input;
mod render;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("ring-scene starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas = dom::canvas_by_id(&document, constants::CANVAS_ID)?;
    dom::sync_canvas_backing_size(&canvas);

    let scene = Rc::new(RefCell::new(SceneState::new(
        SceneConfig::default(),
        constants::SCENE_SEED,
    )));
    {
        let s = scene.borrow();
        log::info!(
            "[scene] static={} large={} dynamic_cap={}",
            s.small.len(),
            s.large.len(),
            s.dynamic.params.max_dots
        );
    }

    // Apply the stage the page is already scrolled to before the first frame
    let scroll_y = window.scroll_y().unwrap_or(0.0);
    let stage = stage_from_scroll(scroll_y, MIN_SCROLL_Y, MAX_SCROLL_Y, TOTAL_STAGES);
    scene.borrow_mut().apply_stage(stage);

    let mouse = Rc::new(RefCell::new(input::MouseState::default()));
    events::wire_scroll(&window, scene.clone());
    events::wire_pointer(&window, &canvas, mouse.clone());
    events::wire_resize(&window, &canvas);
    events::wire_messages(&window, &canvas, scene.clone());

    let gpu = render::GpuState::new(&canvas).await?;

    let mut ctx = frame::FrameContext {
        scene,
        canvas,
        mouse,
        gpu,
        last_instant: Instant::now(),
    };

    // Self-rescheduling requestAnimationFrame loop
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        ctx.frame();
        if let Some(w) = web::window() {
            let _ = w.request_animation_frame(
                tick_clone
                    .borrow()
                    .as_ref()
                    .unwrap()
                    .as_ref()
                    .unchecked_ref(),
            );
        }
    }) as Box<dyn FnMut()>));
    if let Some(w) = web::window() {
        let _ = w.request_animation_frame(tick.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }

    Ok(())
}
