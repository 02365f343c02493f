use crate::core::cluster::{create_ring_cluster, update_cluster, ClusterParams};
use crate::core::constants::*;
use crate::core::damper::Damping;
use crate::core::dynamic::{DynamicCluster, DynamicParams};
use crate::core::particle::Particle;
use crate::core::stage::{StageConfig, StageController};
use glam::{Mat4, Vec3};
use rand::prelude::*;

/// Simple right-handed camera on the ring axis: position plus a roll about
/// the view direction, matching the stage-interpolated camera pose.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub roll: f32,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// Inverse of translate-then-roll, i.e. world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_z(-self.roll) * Mat4::from_translation(-self.eye)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// Per-dot render payload consumed by the instanced draw.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DotInstance {
    pub pos: [f32; 3],
    /// World half-size of the dot quad.
    pub scale: f32,
    pub color: [f32; 4],
}

/// Full scene configuration; defaults mirror the tuned constants.
#[derive(Clone, Copy, Debug)]
pub struct SceneConfig {
    pub small: ClusterParams,
    pub large: ClusterParams,
    pub dynamic: DynamicParams,
    pub stage: StageConfig,
    pub damping: Damping,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            small: ClusterParams {
                count: SMALL_DOT_COUNT,
                base_speed: SMALL_BASE_SPEED,
                speed_variance: SPEED_VARIANCE,
                base_orbit_size: SMALL_ORBIT_RADIUS,
                orbit_variance: SMALL_ORBIT_VARIANCE,
                dot_scale: SMALL_DOT_SCALE,
            },
            large: ClusterParams {
                count: LARGE_DOT_COUNT,
                base_speed: LARGE_BASE_SPEED,
                speed_variance: SPEED_VARIANCE,
                base_orbit_size: LARGE_ORBIT_RADIUS,
                orbit_variance: LARGE_ORBIT_VARIANCE,
                dot_scale: LARGE_DOT_SCALE,
            },
            dynamic: DynamicParams::default(),
            stage: StageConfig::default(),
            damping: Damping::Exponential { rate: DAMP_RATE },
        }
    }
}

const STATIC_DOT_COLOR: [f32; 4] = [0.04, 0.05, 0.08, 1.0];
const DYNAMIC_DOT_COLOR: [f32; 3] = [0.10, 0.12, 0.22];

/// The whole simulation: both static clusters, the dynamic cluster and the
/// stage controller. Mutated only from the host frame loop; one `tick` fully
/// updates every dot before the caller renders.
pub struct SceneState {
    pub stage: StageController,
    pub small: Vec<Particle>,
    pub large: Vec<Particle>,
    pub dynamic: DynamicCluster,
    damping: Damping,
    instances: Vec<DotInstance>,
}

impl SceneState {
    pub fn new(cfg: SceneConfig, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let small = create_ring_cluster(&cfg.small, cfg.stage.base_radius, &mut rng);
        let large = create_ring_cluster(&cfg.large, cfg.stage.base_radius, &mut rng);
        // Independent stream for the dynamic cluster so static layout stays
        // stable when spawn tuning changes.
        let dynamic_seed = seed ^ 0x9E37_79B9_7F4A_7C15;
        Self {
            stage: StageController::new(cfg.stage),
            small,
            large,
            dynamic: DynamicCluster::new(cfg.dynamic, cfg.damping, dynamic_seed),
            damping: cfg.damping,
            instances: Vec::new(),
        }
    }

    /// Retarget everything from a continuous progress value.
    pub fn apply_progress(&mut self, t: f32) {
        self.stage.apply_progress(t);
        self.retarget_clusters();
    }

    /// Retarget from a discrete 1-based stage index.
    pub fn apply_stage(&mut self, stage: u32) {
        self.stage.apply_stage(stage);
        self.retarget_clusters();
    }

    fn retarget_clusters(&mut self) {
        let speed_factor = self.stage.speed_factor();
        let orbit_scale = self.stage.orbit_scale();
        for dot in self.small.iter_mut().chain(self.large.iter_mut()) {
            dot.target_speed = dot.base_speed * speed_factor;
            dot.target_orbit_size = dot.base_orbit_size * orbit_scale;
        }
        self.dynamic.set_orbit_scale(orbit_scale);
        self.dynamic.set_speed_multiplier(self.stage.progress());
    }

    /// Advance the whole scene by one frame. `pointer_world` is the pointer
    /// projected onto the scene's working plane, in world space.
    pub fn tick(&mut self, dt: f32, pointer_world: Option<Vec3>) {
        let dt = dt.clamp(0.0, MAX_FRAME_DT);
        self.stage.tick(dt);
        let ring_radius = self.stage.ring_radius();

        update_cluster(&mut self.small, ring_radius, self.damping, dt);
        update_cluster(&mut self.large, ring_radius, self.damping, dt);

        // Repulsion compares against ring-local positions, so bring the
        // pointer into ring space first.
        let local_pointer =
            pointer_world.map(|p| self.stage.ring_model().inverse().transform_point3(p));
        self.dynamic.update(dt, ring_radius, local_pointer);

        self.rebuild_instances();
    }

    fn rebuild_instances(&mut self) {
        self.instances.clear();
        for dot in self.small.iter().chain(self.large.iter()) {
            self.instances.push(DotInstance {
                pos: dot.position().to_array(),
                scale: dot.scale * DOT_BASE_SIZE,
                color: STATIC_DOT_COLOR,
            });
        }
        for p in self.dynamic.iter_alive() {
            self.instances.push(DotInstance {
                pos: p.position().to_array(),
                scale: p.dot.scale * DOT_BASE_SIZE,
                color: [
                    DYNAMIC_DOT_COLOR[0],
                    DYNAMIC_DOT_COLOR[1],
                    DYNAMIC_DOT_COLOR[2],
                    p.alpha,
                ],
            });
        }
    }

    /// Instance list for the current frame, static clusters first.
    #[inline]
    pub fn instances(&self) -> &[DotInstance] {
        &self.instances
    }

    #[inline]
    pub fn ring_model(&self) -> Mat4 {
        self.stage.ring_model()
    }

    /// Camera at the current smoothed pose, for the given aspect ratio.
    pub fn camera(&self, aspect: f32) -> Camera {
        Camera {
            eye: self.stage.camera_eye(),
            roll: self.stage.camera_roll(),
            aspect,
            fovy_radians: 60f32.to_radians(),
            znear: 0.1,
            zfar: 1000.0,
        }
    }
}
