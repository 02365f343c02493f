// Host-side tests for the dynamic spawn/expire cluster.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod core {
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod damper {
        include!("../src/core/damper.rs");
    }
    pub mod particle {
        include!("../src/core/particle.rs");
    }
    pub mod dynamic {
        include!("../src/core/dynamic.rs");
    }
}

use crate::core::damper::Damping;
use crate::core::dynamic::{DynamicCluster, DynamicParams};
use glam::Vec3;

const DT: f32 = 1.0 / 60.0;
const DAMPING: Damping = Damping::Exponential { rate: 5.0 };

fn small_params(max_dots: usize) -> DynamicParams {
    DynamicParams {
        max_dots,
        fade_duration: 0.5,
        fade_buffer: 0.2,
        repulsion_enabled: true,
    }
}

#[test]
fn spawn_one_respects_the_population_cap() {
    let mut cluster = DynamicCluster::new(small_params(10), DAMPING, 1);
    for _ in 0..50 {
        cluster.spawn_one(2.0);
    }
    assert_eq!(cluster.alive(), 10);
}

#[test]
fn update_fills_to_the_cap_and_never_exceeds_it() {
    let mut cluster = DynamicCluster::new(small_params(10), DAMPING, 2);
    // 700 ticks is ~11.7 s, well inside the shortest lifespan, so nothing
    // expires while the spawner is filling up.
    for _ in 0..700 {
        cluster.update(DT, 2.0, None);
        assert!(cluster.alive() <= 10);
    }
    assert_eq!(cluster.alive(), 10);
}

#[test]
fn alpha_stays_in_range_and_hits_zero_before_removal() {
    let mut cluster = DynamicCluster::new(small_params(4), DAMPING, 3);
    let mut saw_faded_out = false;
    // Long enough for several full lifecycles at a coarse dt
    for _ in 0..3000 {
        cluster.update(0.1, 2.0, None);
        for p in cluster.iter_alive() {
            assert!((0.0..=1.0).contains(&p.alpha));
            // A dot past its lifespan is invisible but still occupies its
            // slot until the grace window ends.
            assert!(p.life > -0.2);
            if p.life <= 0.0 {
                assert_eq!(p.alpha, 0.0);
                saw_faded_out = true;
            }
        }
    }
    assert!(saw_faded_out);
}

#[test]
fn expired_slots_are_reused() {
    let mut cluster = DynamicCluster::new(small_params(3), DAMPING, 4);
    // Run through several generations of dots; the cap bounds the population
    // no matter how many die and respawn.
    let mut max_alive = 0;
    let mut saw_death = false;
    let mut prev_alive = 0;
    for _ in 0..5000 {
        cluster.update(0.1, 2.0, None);
        let alive = cluster.alive();
        assert!(alive <= 3);
        max_alive = max_alive.max(alive);
        saw_death |= alive < prev_alive;
        prev_alive = alive;
    }
    assert_eq!(max_alive, 3);
    assert!(saw_death);
}

#[test]
fn new_dots_fade_in_gradually() {
    let mut cluster = DynamicCluster::new(small_params(1), DAMPING, 5);
    cluster.spawn_one(2.0);
    cluster.update(DT, 2.0, None);
    let p = cluster.iter_alive().next().unwrap();
    assert!(p.alpha > 0.0);
    assert!(p.alpha < 0.1);
}

#[test]
fn pointer_repulsion_displaces_then_decays_to_rest() {
    let mut cluster = DynamicCluster::new(small_params(1), DAMPING, 6);
    cluster.spawn_one(2.0);

    let pos = cluster.iter_alive().next().unwrap().position();
    let pointer = pos + Vec3::new(0.1, 0.0, 0.0);
    cluster.update(DT, 2.0, Some(pointer));
    let displaced = cluster.iter_alive().next().unwrap().repulsion.length();
    assert!(displaced > 0.0);

    let mut prev = displaced;
    for _ in 0..600 {
        cluster.update(DT, 2.0, None);
        let len = cluster.iter_alive().next().unwrap().repulsion.length();
        assert!(len < prev);
        prev = len;
    }
    assert!(prev < 1e-4);
}

#[test]
fn pointer_outside_radius_leaves_dots_alone() {
    let mut cluster = DynamicCluster::new(small_params(1), DAMPING, 7);
    cluster.spawn_one(2.0);
    let pos = cluster.iter_alive().next().unwrap().position();
    cluster.update(DT, 2.0, Some(pos + Vec3::new(100.0, 0.0, 0.0)));
    assert_eq!(cluster.iter_alive().next().unwrap().repulsion, Vec3::ZERO);
}

#[test]
fn repulsion_can_be_disabled() {
    let mut params = small_params(1);
    params.repulsion_enabled = false;
    let mut cluster = DynamicCluster::new(params, DAMPING, 8);
    cluster.spawn_one(2.0);
    let pos = cluster.iter_alive().next().unwrap().position();
    cluster.update(DT, 2.0, Some(pos));
    assert_eq!(cluster.iter_alive().next().unwrap().repulsion, Vec3::ZERO);
}

#[test]
fn speed_multiplier_retargets_alive_dots() {
    let mut cluster = DynamicCluster::new(small_params(5), DAMPING, 9);
    for _ in 0..5 {
        cluster.spawn_one(2.0);
    }
    cluster.set_speed_multiplier(1.0);
    for _ in 0..600 {
        cluster.update(DT, 2.0, None);
    }
    for p in cluster.iter_alive() {
        let ratio = p.dot.current_speed / p.dot.base_speed;
        assert!((ratio - 3.0).abs() < 1e-2);
        let global_ratio = p.global_speed / p.base_global_speed;
        assert!((global_ratio - 3.0).abs() < 1e-5);
    }
}

#[test]
fn orbit_scale_retargets_alive_dots() {
    let mut cluster = DynamicCluster::new(small_params(5), DAMPING, 10);
    for _ in 0..5 {
        cluster.spawn_one(2.0);
    }
    cluster.set_orbit_scale(3.0);
    for _ in 0..600 {
        cluster.update(DT, 2.0, None);
    }
    for p in cluster.iter_alive() {
        let ratio = p.dot.orbit_size / p.dot.base_orbit_size;
        assert!((ratio - 3.0).abs() < 1e-2);
    }
}

#[test]
fn dots_spawned_after_retargeting_carry_both_multipliers() {
    let mut cluster = DynamicCluster::new(small_params(8), DAMPING, 11);
    cluster.set_orbit_scale(3.0);
    cluster.set_speed_multiplier(1.0);
    // Everything alive here was spawned after the retarget
    for _ in 0..200 {
        cluster.update(DT, 2.0, None);
    }
    assert!(cluster.alive() > 0);
    for p in cluster.iter_alive() {
        let orbit_ratio = p.dot.target_orbit_size / p.dot.base_orbit_size;
        assert!((orbit_ratio - 3.0).abs() < 1e-5);
        let speed_ratio = p.dot.target_speed / p.dot.base_speed;
        assert!((speed_ratio - 3.0).abs() < 1e-5);
    }
}

#[test]
fn same_seed_gives_identical_trajectories() {
    let mut a = DynamicCluster::new(small_params(8), DAMPING, 42);
    let mut b = DynamicCluster::new(small_params(8), DAMPING, 42);
    for _ in 0..400 {
        a.update(DT, 2.0, None);
        b.update(DT, 2.0, None);
    }
    assert_eq!(a.alive(), b.alive());
    for (pa, pb) in a.iter_alive().zip(b.iter_alive()) {
        assert!(pa.position().distance(pb.position()) < 1e-7);
        assert_eq!(pa.life, pb.life);
    }
}
