// Host/render tuning constants. Simulation tuning lives in `core::constants`.

// Canvas element the scene attaches to
pub const CANVAS_ID: &str = "scene-canvas";

// Seed for the per-dot randomization; fixed so reloads look identical
pub const SCENE_SEED: u64 = 42;

// Fog band fading dots toward the white background (world units from eye)
pub const FOG_START: f32 = 5.5;
pub const FOG_END: f32 = 16.0;

// Post chain
// Fraction of last frame's darkening kept by the afterimage pass
pub const AFTERIMAGE_DAMP: f32 = 0.2;
// UV offset for the r/b channel split
pub const CHROMA_AMOUNT: f32 = 0.0003;
