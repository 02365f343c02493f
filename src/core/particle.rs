use crate::core::constants::RING_AXIS;
use crate::core::damper::Damping;
use glam::{Quat, Vec3};

/// Normalize `v`, falling back to `fallback` when the input has no length.
/// A zero-length cross product here would otherwise turn into NaN positions
/// that corrupt every later frame, since position derives from accumulated
/// state.
#[inline]
pub fn safe_normalize(v: Vec3, fallback: Vec3) -> Vec3 {
    v.try_normalize().unwrap_or(fallback)
}

/// Orbit plane normal for an anchor point on the ring: the radial direction
/// crossed with the ring axis. Fixed for the lifetime of a particle.
#[inline]
pub fn orbit_normal_at(anchor: Vec3) -> Vec3 {
    let radial = safe_normalize(anchor, Vec3::X);
    safe_normalize(radial.cross(RING_AXIS), Vec3::X)
}

/// Position of a dot on its tilted circular orbit around `base`.
///
/// The un-rotated offset is `-tangent * orbit_size` with
/// `tangent = normalize(orbit_normal x ring_axis)`; the offset is then spun
/// about `orbit_normal` by `phase`, pivoting at `base`.
pub fn orbit_position(base: Vec3, orbit_normal: Vec3, orbit_size: f32, phase: f32) -> Vec3 {
    let tangent = safe_normalize(orbit_normal.cross(RING_AXIS), Vec3::X);
    let offset = -tangent * orbit_size;
    base + Quat::from_axis_angle(orbit_normal, phase) * offset
}

/// One dot of the scene. Static and dynamic dots share this record; the
/// dynamic cluster wraps it with lifecycle state.
///
/// Speed and orbit size are damped triples: `base_*` is the per-dot
/// randomized reference, `target_*` is set externally on stage changes and
/// `current`/plain values converge toward the target each tick.
#[derive(Clone, Debug)]
pub struct Particle {
    pub base_theta: f32,
    pub base_position: Vec3,
    pub orbit_normal: Vec3,
    pub orbit_angle_offset: f32,
    /// Monotone orbit angle; advanced by `current_speed * dt`, never reset.
    pub accumulated_phase: f32,
    pub current_speed: f32,
    pub target_speed: f32,
    pub base_speed: f32,
    pub orbit_size: f32,
    pub target_orbit_size: f32,
    pub base_orbit_size: f32,
    /// Render scale factor for the dot quad.
    pub scale: f32,
}

impl Particle {
    /// Create a dot anchored at ring angle `theta`.
    pub fn at_ring_angle(
        theta: f32,
        ring_radius: f32,
        base_speed: f32,
        base_orbit_size: f32,
        orbit_angle_offset: f32,
        scale: f32,
    ) -> Self {
        let anchor = Vec3::new(ring_radius * theta.cos(), ring_radius * theta.sin(), 0.0);
        Self {
            base_theta: theta,
            base_position: anchor,
            orbit_normal: orbit_normal_at(anchor),
            orbit_angle_offset,
            accumulated_phase: 0.0,
            current_speed: base_speed,
            target_speed: base_speed,
            base_speed,
            orbit_size: base_orbit_size,
            target_orbit_size: base_orbit_size,
            base_orbit_size,
            scale,
        }
    }

    /// Re-anchor on the (possibly resized) ring, keeping the ring angle.
    #[inline]
    pub fn set_ring_radius(&mut self, ring_radius: f32) {
        self.base_position = Vec3::new(
            ring_radius * self.base_theta.cos(),
            ring_radius * self.base_theta.sin(),
            0.0,
        );
    }

    /// Advance damped parameters and the orbit phase by one tick.
    pub fn step(&mut self, damping: Damping, dt: f32) {
        self.current_speed = damping.step(self.current_speed, self.target_speed, dt);
        self.orbit_size = damping.step(self.orbit_size, self.target_orbit_size, dt);
        self.accumulated_phase += self.current_speed * dt;
    }

    /// Current ring-local position of the dot.
    #[inline]
    pub fn position(&self) -> Vec3 {
        orbit_position(
            self.base_position,
            self.orbit_normal,
            self.orbit_size,
            self.accumulated_phase + self.orbit_angle_offset,
        )
    }
}
