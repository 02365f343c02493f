use glam::Vec3;

/// Smoothing policy for moving a current value toward a target.
///
/// `FixedFraction` is the classic per-tick lerp and is only framerate
/// independent when the delta time is roughly constant. `Exponential` folds
/// the delta time into the decay and is the policy the scene actually uses.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Damping {
    FixedFraction { k: f32 },
    Exponential { rate: f32 },
}

impl Damping {
    /// Move `current` toward `target` by one tick. Never overshoots.
    #[inline]
    pub fn step(self, current: f32, target: f32, dt: f32) -> f32 {
        match self {
            Damping::FixedFraction { k } => current + (target - current) * k,
            Damping::Exponential { rate } => target + (current - target) * (-rate * dt).exp(),
        }
    }

    /// Component-wise vector form of [`Damping::step`].
    #[inline]
    pub fn step_vec3(self, current: Vec3, target: Vec3, dt: f32) -> Vec3 {
        match self {
            Damping::FixedFraction { k } => current + (target - current) * k,
            Damping::Exponential { rate } => target + (current - target) * (-rate * dt).exp(),
        }
    }

    /// Decay a vector toward zero; same damper with a zero target.
    #[inline]
    pub fn decay_vec3(self, current: Vec3, dt: f32) -> Vec3 {
        self.step_vec3(current, Vec3::ZERO, dt)
    }
}

/// Unclamped linear interpolation.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
