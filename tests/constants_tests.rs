// Host-side tests for constants and their mathematical relationships.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod core_constants {
    include!("../src/core/constants.rs");
}

use constants::*;
use core_constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn ring_geometry_is_positive_and_ordered() {
    assert!(RING_RADIUS > 0.0);
    assert!(RING_EXPANDED_RADIUS > RING_RADIUS);
    assert!((RING_AXIS.length() - 1.0).abs() < 1e-6);

    assert!(SMALL_ORBIT_RADIUS > 0.0);
    assert!(LARGE_ORBIT_RADIUS > 0.0);
    assert!(DOT_BASE_SIZE > 0.0);
    assert!(DOT_SCALE_MIN > 0.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn cluster_populations_are_sane() {
    assert!(SMALL_DOT_COUNT > 0);
    assert!(LARGE_DOT_COUNT > 0);
    assert!(MAX_DYNAMIC_DOTS > 0);

    // Static speeds stay positive under the configured variance
    assert!(SMALL_BASE_SPEED - SPEED_VARIANCE * 0.5 > 0.0);
    assert!(LARGE_BASE_SPEED - SPEED_VARIANCE * 0.5 > 0.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn stage_ranges_are_ordered() {
    assert!(TOTAL_STAGES >= 2);
    assert!(MAX_SCROLL_Y > MIN_SCROLL_Y);

    assert!(MAX_ORBIT_MULTIPLIER > MIN_ORBIT_MULTIPLIER);
    assert!(MAX_SPEED_FACTOR > MIN_SPEED_FACTOR);
    assert!(MIN_ORBIT_MULTIPLIER >= 1.0);
    assert!(MIN_SPEED_FACTOR >= 1.0);
    assert!(SPEED_BOOST >= 1.0);

    // The final camera sits closer than the opening camera
    assert!(CAMERA_END_EYE.z < CAMERA_START_EYE.z);
    assert!(CAMERA_END_EYE.z > 0.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn lifecycle_timing_is_consistent() {
    assert!(FADE_DURATION > 0.0);
    assert!(FADE_BUFFER > 0.0);
    // A dot must outlive both of its fade ramps
    assert!(DYNAMIC_LIFE_MIN > 2.0 * FADE_DURATION);

    assert!(FIRST_SPAWN_INTERVAL > 0.0);
    assert!(SPAWN_INTERVAL_MIN > 0.0);
    assert!(SPAWN_INTERVAL_SPAN >= 0.0);

    assert!(DYNAMIC_SPEED_MIN > 0.0);
    assert!(DYNAMIC_ORBIT_MIN > 0.0);
    assert!(GLOBAL_SPEED_MIN > 0.0);
    assert!(DYNAMIC_MAX_SPEED_FACTOR > DYNAMIC_MIN_SPEED_FACTOR);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn damping_and_frame_limits_are_positive() {
    assert!(DAMP_RATE > 0.0);
    assert!(STAGE_DAMP_RATE > 0.0);
    assert!(MAX_FRAME_DT > 0.0);
    assert!(MAX_FRAME_DT < 1.0);

    assert!(REPULSION_RADIUS > 0.0);
    assert!(REPULSION_STRENGTH > 0.0);
    assert!(REPULSION_DECAY_RATE > 0.0);
    assert!(REPULSION_RADIUS_PROGRESS_SCALE >= 0.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn render_constants_are_in_range() {
    assert!(!CANVAS_ID.is_empty());
    assert!(FOG_END > FOG_START);
    assert!(FOG_START > 0.0);
    assert!(AFTERIMAGE_DAMP >= 0.0 && AFTERIMAGE_DAMP < 1.0);
    assert!(CHROMA_AMOUNT >= 0.0);
}
