use glam::Vec3;

// Shared tuning constants for the ring scene. Everything hand-tuned lives
// here so the simulation modules stay free of magic numbers.

// Ring layout
pub const RING_RADIUS: f32 = 2.0;
pub const RING_EXPANDED_RADIUS: f32 = 10.0;
// Axis perpendicular to the ring plane; orbit planes are derived against it.
pub const RING_AXIS: Vec3 = Vec3::Z;

// Static clusters (small + large dots)
pub const SMALL_DOT_COUNT: usize = 100;
pub const LARGE_DOT_COUNT: usize = 60;
pub const SMALL_ORBIT_RADIUS: f32 = 0.25;
pub const LARGE_ORBIT_RADIUS: f32 = 0.1;
pub const SMALL_ORBIT_VARIANCE: f32 = 5.0;
pub const LARGE_ORBIT_VARIANCE: f32 = 1.5;
pub const SMALL_BASE_SPEED: f32 = 1.5;
pub const LARGE_BASE_SPEED: f32 = 0.8;
pub const SPEED_VARIANCE: f32 = 1.5;
pub const SMALL_DOT_SCALE: f32 = 0.5;
pub const LARGE_DOT_SCALE: f32 = 2.0;
pub const DOT_SCALE_MIN: f32 = 0.4;
// World half-size of a unit-scale dot quad
pub const DOT_BASE_SIZE: f32 = 0.1;

// Damping
// Per-particle speed/orbit-size smoothing rate (exponential, per second)
pub const DAMP_RATE: f32 = 5.0;
// Camera/ring stage transition smoothing; settles in a couple of seconds
pub const STAGE_DAMP_RATE: f32 = 2.0;

// Stage mapping
pub const TOTAL_STAGES: u32 = 10;
pub const MIN_ORBIT_MULTIPLIER: f32 = 1.0;
pub const MAX_ORBIT_MULTIPLIER: f32 = 3.0;
pub const MIN_SPEED_FACTOR: f32 = 1.0;
pub const MAX_SPEED_FACTOR: f32 = 4.0;
pub const SPEED_BOOST: f32 = 2.5;
pub const RING_END_ROTATION_DEG: f32 = 72.0;
pub const RING_END_OFFSET_X: f32 = -4.5;
pub const RING_END_OFFSET_Y: f32 = 4.5;

// Camera travel endpoints
pub const CAMERA_START_EYE: Vec3 = Vec3::new(0.0, 0.0, 15.0);
pub const CAMERA_END_EYE: Vec3 = Vec3::new(0.0, 0.0, 2.0);
pub const CAMERA_START_ROLL: f32 = 0.0;
pub const CAMERA_END_ROLL: f32 = 3.0;

// Dynamic cluster
pub const MAX_DYNAMIC_DOTS: usize = 500;
pub const FIRST_SPAWN_INTERVAL: f32 = 0.1;
pub const SPAWN_INTERVAL_MIN: f32 = 0.01;
pub const SPAWN_INTERVAL_SPAN: f32 = 0.05;
pub const DYNAMIC_LIFE_MIN: f32 = 15.0;
pub const DYNAMIC_LIFE_SPAN: f32 = 5.0;
pub const FADE_DURATION: f32 = 1.5;
// Grace window after full fade-out before a slot is reclaimed
pub const FADE_BUFFER: f32 = 0.2;
pub const DYNAMIC_SPEED_MIN: f32 = 0.5;
pub const DYNAMIC_SPEED_SPAN: f32 = 1.0;
pub const DYNAMIC_ORBIT_MIN: f32 = 0.1;
pub const DYNAMIC_ORBIT_SPAN: f32 = 0.2;
pub const GLOBAL_SPEED_MIN: f32 = 0.02;
pub const GLOBAL_SPEED_SPAN: f32 = 0.08;
pub const DYNAMIC_SCALE_MIN: f32 = 0.2;
pub const DYNAMIC_SCALE_SPAN: f32 = 0.8;
pub const DYNAMIC_MIN_SPEED_FACTOR: f32 = 1.0;
pub const DYNAMIC_MAX_SPEED_FACTOR: f32 = 3.0;

// Pointer repulsion
pub const REPULSION_RADIUS: f32 = 1.5;
// Radius grows with stage progress: radius * (1 + progress * this)
pub const REPULSION_RADIUS_PROGRESS_SCALE: f32 = 1.0;
pub const REPULSION_STRENGTH: f32 = 6.0;
pub const REPULSION_DECAY_RATE: f32 = 3.0;

// Frame loop
// Clamp per-frame delta so a backgrounded tab doesn't fast-forward the scene
pub const MAX_FRAME_DT: f32 = 0.1;

// Host scroll-to-stage mapping
pub const MIN_SCROLL_Y: f64 = 0.0;
pub const MAX_SCROLL_Y: f64 = 500.0;
