use crate::core::constants::*;
use crate::core::damper::{lerp, Damping};
use crate::core::particle::{safe_normalize, Particle};
use glam::Vec3;
use rand::prelude::*;
use std::f32::consts::TAU;

/// Knobs for the dynamic cluster that tests shrink to small values.
#[derive(Clone, Copy, Debug)]
pub struct DynamicParams {
    pub max_dots: usize,
    pub fade_duration: f32,
    pub fade_buffer: f32,
    pub repulsion_enabled: bool,
}

impl Default for DynamicParams {
    fn default() -> Self {
        Self {
            max_dots: MAX_DYNAMIC_DOTS,
            fade_duration: FADE_DURATION,
            fade_buffer: FADE_BUFFER,
            repulsion_enabled: true,
        }
    }
}

/// A spawned dot: the shared particle record plus lifecycle state.
#[derive(Clone, Debug)]
pub struct DynamicParticle {
    pub dot: Particle,
    /// Remaining lifespan in seconds; fade alpha derives from it.
    pub life: f32,
    pub max_life: f32,
    /// Slow independent drift of the anchor around the ring.
    pub global_angle: f32,
    pub global_speed: f32,
    pub base_global_speed: f32,
    /// Accumulated pointer displacement, decayed toward zero every tick.
    pub repulsion: Vec3,
    pub alpha: f32,
}

impl DynamicParticle {
    /// Ring-local render position including the repulsion displacement.
    #[inline]
    pub fn position(&self) -> Vec3 {
        self.dot.position() + self.repulsion
    }
}

struct Slot {
    particle: DynamicParticle,
    alive: bool,
}

/// Continuously spawning, expiring cluster of drifting dots.
///
/// Slots are stored contiguously and reused through a free list, so
/// spawn/despawn churn does not reallocate. Mutation happens only from the
/// frame loop's `update`.
pub struct DynamicCluster {
    pub params: DynamicParams,
    slots: Vec<Slot>,
    free: Vec<usize>,
    alive_count: usize,
    spawn_timer: f32,
    next_spawn_interval: f32,
    progress: f32,
    speed_multiplier: f32,
    orbit_multiplier: f32,
    damping: Damping,
    rng: StdRng,
}

impl DynamicCluster {
    pub fn new(params: DynamicParams, damping: Damping, seed: u64) -> Self {
        Self {
            params,
            slots: Vec::new(),
            free: Vec::new(),
            alive_count: 0,
            spawn_timer: 0.0,
            next_spawn_interval: FIRST_SPAWN_INTERVAL,
            progress: 0.0,
            speed_multiplier: DYNAMIC_MIN_SPEED_FACTOR,
            orbit_multiplier: 1.0,
            damping,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    #[inline]
    pub fn alive(&self) -> usize {
        self.alive_count
    }

    /// Spawn one dot at a random ring angle. Does nothing at the population
    /// cap, regardless of how often the spawn timer fires.
    pub fn spawn_one(&mut self, ring_radius: f32) {
        if self.alive_count >= self.params.max_dots {
            return;
        }
        let theta = self.rng.gen::<f32>() * TAU;
        let speed = DYNAMIC_SPEED_MIN + self.rng.gen::<f32>() * DYNAMIC_SPEED_SPAN;
        let orbit_size = DYNAMIC_ORBIT_MIN + self.rng.gen::<f32>() * DYNAMIC_ORBIT_SPAN;
        let offset = self.rng.gen::<f32>() * TAU;
        let scale = DYNAMIC_SCALE_MIN + self.rng.gen::<f32>() * DYNAMIC_SCALE_SPAN;
        let life = DYNAMIC_LIFE_MIN + self.rng.gen::<f32>() * DYNAMIC_LIFE_SPAN;
        let sign = if self.rng.gen::<bool>() { 1.0 } else { -1.0 };
        let base_global_speed =
            sign * (GLOBAL_SPEED_MIN + self.rng.gen::<f32>() * GLOBAL_SPEED_SPAN);

        // New dots pick up the stage's current multipliers immediately, the
        // same way retargeting applies them to dots already alive.
        let mut dot = Particle::at_ring_angle(theta, ring_radius, speed, orbit_size, offset, scale);
        dot.target_speed = dot.base_speed * self.speed_multiplier;
        dot.target_orbit_size = dot.base_orbit_size * self.orbit_multiplier;
        let particle = DynamicParticle {
            dot,
            life,
            max_life: life,
            global_angle: theta,
            global_speed: base_global_speed * self.speed_multiplier,
            base_global_speed,
            repulsion: Vec3::ZERO,
            alpha: 0.0,
        };

        match self.free.pop() {
            Some(i) => {
                self.slots[i] = Slot {
                    particle,
                    alive: true,
                };
            }
            None => self.slots.push(Slot {
                particle,
                alive: true,
            }),
        }
        self.alive_count += 1;
    }

    /// Advance the whole cluster by one tick. `pointer` is the pointer
    /// position in ring-local space, when repulsion should apply.
    pub fn update(&mut self, dt: f32, ring_radius: f32, pointer: Option<Vec3>) {
        self.spawn_timer += dt;
        if self.spawn_timer > self.next_spawn_interval && self.alive_count < self.params.max_dots {
            self.spawn_one(ring_radius);
            self.spawn_timer = 0.0;
            self.next_spawn_interval =
                SPAWN_INTERVAL_MIN + self.rng.gen::<f32>() * SPAWN_INTERVAL_SPAN;
        }

        let repulsion_radius =
            REPULSION_RADIUS * (1.0 + self.progress * REPULSION_RADIUS_PROGRESS_SCALE);
        let damping = self.damping;
        let repulse = self.params.repulsion_enabled;
        let fade_duration = self.params.fade_duration;
        let fade_buffer = self.params.fade_buffer;

        for i in 0..self.slots.len() {
            if !self.slots[i].alive {
                continue;
            }
            let p = &mut self.slots[i].particle;

            p.life -= dt;
            let fade_in = ((p.max_life - p.life) / fade_duration).min(1.0);
            let fade_out = (p.life / fade_duration).min(1.0);
            p.alpha = fade_in.min(fade_out).clamp(0.0, 1.0);

            if p.life <= -fade_buffer {
                self.slots[i].alive = false;
                self.free.push(i);
                self.alive_count -= 1;
                continue;
            }

            p.dot.step(damping, dt);
            p.global_angle += p.global_speed * dt;
            p.dot.base_position = Vec3::new(
                ring_radius * p.global_angle.cos(),
                ring_radius * p.global_angle.sin(),
                0.0,
            );

            if repulse {
                if let Some(pointer) = pointer {
                    let away = p.position() - pointer;
                    let dist = away.length();
                    if dist < repulsion_radius {
                        let falloff = 1.0 - dist / repulsion_radius;
                        let dir = safe_normalize(away, Vec3::X);
                        p.repulsion += dir * falloff.powi(3) * REPULSION_STRENGTH * dt;
                    }
                }
            }
            // Spring-like return to rest, not simulated mass: the same
            // damper with a zero target.
            p.repulsion = Damping::Exponential {
                rate: REPULSION_DECAY_RATE,
            }
            .decay_vec3(p.repulsion, dt);
        }
    }

    /// Rescale every live dot's target orbit size from its fixed base. The
    /// multiplier sticks and applies to dots spawned later as well.
    pub fn set_orbit_scale(&mut self, multiplier: f32) {
        self.orbit_multiplier = multiplier;
        for slot in self.slots.iter_mut().filter(|s| s.alive) {
            let dot = &mut slot.particle.dot;
            dot.target_orbit_size = dot.base_orbit_size * multiplier;
        }
    }

    /// Rescale target local and global speeds from their bases, interpolating
    /// the multiplier between the configured bounds by stage progress.
    pub fn set_speed_multiplier(&mut self, progress: f32) {
        let t = progress.clamp(0.0, 1.0);
        self.progress = t;
        let m = lerp(DYNAMIC_MIN_SPEED_FACTOR, DYNAMIC_MAX_SPEED_FACTOR, t);
        self.speed_multiplier = m;
        for slot in self.slots.iter_mut().filter(|s| s.alive) {
            let p = &mut slot.particle;
            p.dot.target_speed = p.dot.base_speed * m;
            p.global_speed = p.base_global_speed * m;
        }
    }

    pub fn iter_alive(&self) -> impl Iterator<Item = &DynamicParticle> {
        self.slots
            .iter()
            .filter(|s| s.alive)
            .map(|s| &s.particle)
    }
}
