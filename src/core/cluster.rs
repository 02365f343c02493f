use crate::core::constants::DOT_SCALE_MIN;
use crate::core::damper::Damping;
use crate::core::particle::Particle;
use rand::prelude::*;
use std::f32::consts::TAU;

/// Creation parameters for one static ring cluster.
#[derive(Clone, Copy, Debug)]
pub struct ClusterParams {
    pub count: usize,
    pub base_speed: f32,
    pub speed_variance: f32,
    pub base_orbit_size: f32,
    pub orbit_variance: f32,
    pub dot_scale: f32,
}

/// Build a cluster of `count` dots with evenly spaced anchors and
/// individually randomized motion. Evenly spaced anchors plus per-dot
/// variance give the "organic but uniform" distribution.
pub fn create_ring_cluster(
    params: &ClusterParams,
    ring_radius: f32,
    rng: &mut StdRng,
) -> Vec<Particle> {
    (0..params.count)
        .map(|i| {
            let theta = (i as f32 / params.count as f32) * TAU;
            let speed = params.base_speed + (rng.gen::<f32>() - 0.5) * params.speed_variance;
            let orbit_size =
                params.base_orbit_size + (rng.gen::<f32>() - 0.5) * params.orbit_variance;
            let offset = rng.gen::<f32>() * TAU;
            let scale = rng.gen::<f32>() * params.dot_scale + DOT_SCALE_MIN;
            Particle::at_ring_angle(theta, ring_radius, speed, orbit_size, offset, scale)
        })
        .collect()
}

/// Per-frame update: re-anchor to the current ring radius, damp speed and
/// orbit size toward their targets, advance the orbit phase.
pub fn update_cluster(dots: &mut [Particle], ring_radius: f32, damping: Damping, dt: f32) {
    for dot in dots {
        dot.set_ring_radius(ring_radius);
        dot.step(damping, dt);
    }
}
