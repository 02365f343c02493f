use crate::core::constants::*;
use crate::core::damper::{lerp, Damping};
use glam::{Mat4, Quat, Vec3};

/// Endpoints and timing of the scroll-driven narrative transitions.
#[derive(Clone, Copy, Debug)]
pub struct StageConfig {
    pub total_stages: u32,
    pub base_radius: f32,
    pub expanded_radius: f32,
    pub end_rotation_rad: f32,
    pub end_offset: Vec3,
    pub camera_start_eye: Vec3,
    pub camera_end_eye: Vec3,
    pub camera_start_roll: f32,
    pub camera_end_roll: f32,
    pub damping: Damping,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            total_stages: TOTAL_STAGES,
            base_radius: RING_RADIUS,
            expanded_radius: RING_EXPANDED_RADIUS,
            end_rotation_rad: RING_END_ROTATION_DEG.to_radians(),
            end_offset: Vec3::new(RING_END_OFFSET_X, RING_END_OFFSET_Y, 0.0),
            camera_start_eye: CAMERA_START_EYE,
            camera_end_eye: CAMERA_END_EYE,
            camera_start_roll: CAMERA_START_ROLL,
            camera_end_roll: CAMERA_END_ROLL,
            damping: Damping::Exponential {
                rate: STAGE_DAMP_RATE,
            },
        }
    }
}

/// Maps the external progress signal to target camera/ring parameters and
/// owns the smoothed "current" values the rest of the scene reads.
///
/// Re-applying a stage mid-transition simply overwrites the targets
/// (last-write-wins); nothing is queued.
pub struct StageController {
    pub cfg: StageConfig,
    progress: f32,
    ring_radius: f32,
    target_ring_radius: f32,
    ring_rotation: f32,
    target_ring_rotation: f32,
    ring_offset: Vec3,
    target_ring_offset: Vec3,
    camera_eye: Vec3,
    target_camera_eye: Vec3,
    camera_roll: f32,
    target_camera_roll: f32,
}

impl StageController {
    pub fn new(cfg: StageConfig) -> Self {
        Self {
            cfg,
            progress: 0.0,
            ring_radius: cfg.base_radius,
            target_ring_radius: cfg.base_radius,
            ring_rotation: 0.0,
            target_ring_rotation: 0.0,
            ring_offset: Vec3::ZERO,
            target_ring_offset: Vec3::ZERO,
            camera_eye: cfg.camera_start_eye,
            target_camera_eye: cfg.camera_start_eye,
            camera_roll: cfg.camera_start_roll,
            target_camera_roll: cfg.camera_start_roll,
        }
    }

    /// Retarget every smoothed parameter from a progress value in [0, 1].
    pub fn apply_progress(&mut self, t: f32) {
        let t = t.clamp(0.0, 1.0);
        self.progress = t;
        self.target_ring_radius = lerp(self.cfg.base_radius, self.cfg.expanded_radius, t);
        self.target_ring_rotation = t * self.cfg.end_rotation_rad;
        self.target_ring_offset = self.cfg.end_offset * t;
        self.target_camera_eye = self.cfg.camera_start_eye.lerp(self.cfg.camera_end_eye, t);
        self.target_camera_roll = lerp(self.cfg.camera_start_roll, self.cfg.camera_end_roll, t);
    }

    /// Discrete stage index (1-based, as delivered by the host) mapped onto
    /// the continuous progress range.
    pub fn apply_stage(&mut self, stage: u32) {
        let total = self.cfg.total_stages.max(2);
        let t = stage.saturating_sub(1) as f32 / (total - 1) as f32;
        self.apply_progress(t);
    }

    /// Advance every current value toward its target.
    pub fn tick(&mut self, dt: f32) {
        let d = self.cfg.damping;
        self.ring_radius = d.step(self.ring_radius, self.target_ring_radius, dt);
        self.ring_rotation = d.step(self.ring_rotation, self.target_ring_rotation, dt);
        self.ring_offset = d.step_vec3(self.ring_offset, self.target_ring_offset, dt);
        self.camera_eye = d.step_vec3(self.camera_eye, self.target_camera_eye, dt);
        self.camera_roll = d.step(self.camera_roll, self.target_camera_roll, dt);
    }

    #[inline]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Smoothed ring radius the clusters re-anchor against.
    #[inline]
    pub fn ring_radius(&self) -> f32 {
        self.ring_radius
    }

    #[inline]
    pub fn camera_eye(&self) -> Vec3 {
        self.camera_eye
    }

    #[inline]
    pub fn camera_roll(&self) -> f32 {
        self.camera_roll
    }

    /// Ring-local to world transform (pan + roll of the whole ring group).
    pub fn ring_model(&self) -> Mat4 {
        Mat4::from_translation(self.ring_offset)
            * Mat4::from_quat(Quat::from_rotation_z(self.ring_rotation))
    }

    /// Multiplier applied to every dot's base orbit size at current progress.
    #[inline]
    pub fn orbit_scale(&self) -> f32 {
        lerp(MIN_ORBIT_MULTIPLIER, MAX_ORBIT_MULTIPLIER, self.progress)
    }

    /// Multiplier applied to every static dot's base speed. The boost pushes
    /// the upper stages well past the nominal maximum on purpose.
    #[inline]
    pub fn speed_factor(&self) -> f32 {
        lerp(MIN_SPEED_FACTOR, MAX_SPEED_FACTOR, self.progress * SPEED_BOOST)
    }
}

/// Host scroll mapping: 1-based stage index from a scroll offset.
pub fn stage_from_scroll(scroll_y: f64, min_scroll: f64, max_scroll: f64, total_stages: u32) -> u32 {
    let span = (max_scroll - min_scroll).max(f64::EPSILON);
    let t = ((scroll_y - min_scroll) / span).clamp(0.0, 0.9999);
    (t * total_stages as f64).floor() as u32 + 1
}
