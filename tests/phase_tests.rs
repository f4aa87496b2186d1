// Host-side tests for reel arithmetic and phase evaluation.
// The web crate is wasm-only; the timing logic lives in flapboard-core.

use flapboard_core::*;

const EPS: f64 = 1e-9;

#[test]
fn delta_is_forward_distance_mod_n() {
    assert_eq!(reel_delta(3, 5, 10), 2);
    assert_eq!(reel_delta(5, 3, 10), 8);
    assert_eq!(reel_delta(7, 7, 10), 0);
    assert_eq!(reel_delta(99, 0, 100), 1);
    for p in 0..10 {
        for c in 0..10 {
            assert!(reel_delta(p, c, 10) < 10);
        }
    }
}

#[test]
fn degenerate_reels_never_move() {
    assert_eq!(reel_delta(3, 5, 0), 0);
    assert_eq!(reel_delta(0, 0, 1), 0);
    let p = phase(0, 0, 0.0, 1.0, 10.0, 1);
    assert!(p.complete);
    assert_eq!(p.index, 0.0);
}

#[test]
fn duration_scales_with_speed() {
    assert!((transition_duration(0, 5, 100, 10.0) - 0.5).abs() < EPS);
    assert!((transition_duration(0, 5, 100, 20.0) - 0.25).abs() < EPS);
    assert_eq!(transition_duration(4, 4, 100, 10.0), 0.0);
    assert_eq!(transition_duration(0, 5, 100, 0.0), 0.0);
}

#[test]
fn phase_before_start_shows_previous() {
    let p = phase(0, 5, 1.0, 1.0, 10.0, 100);
    assert!(!p.complete);
    assert_eq!(p.index, 0.0);
    let p = phase(0, 5, 1.0, 0.5, 10.0, 100);
    assert!(!p.complete);
    assert_eq!(p.index, 0.0);
}

#[test]
fn phase_moves_linearly_then_lands() {
    let p = phase(0, 5, 1.0, 1.25, 10.0, 100);
    assert!(!p.complete);
    assert!((p.index - 2.5).abs() < EPS);

    let p = phase(0, 5, 1.0, 1.5, 10.0, 100);
    assert!(p.complete);
    assert_eq!(p.index, 5.0);

    let p = phase(0, 5, 1.0, 9.0, 10.0, 100);
    assert!(p.complete);
    assert_eq!(p.index, 5.0);
}

#[test]
fn phase_wraps_past_the_last_glyph() {
    let p = phase(98, 2, 0.0, 0.25, 10.0, 100);
    assert!(!p.complete);
    assert!((p.index - 0.5).abs() < EPS);
}

#[test]
fn resting_cell_is_complete_even_before_its_stamp() {
    let p = phase(7, 7, 5.0, 1.0, 10.0, 100);
    assert!(p.complete);
    assert_eq!(p.index, 7.0);
}

#[test]
fn non_positive_speed_is_instantaneous() {
    let p = phase(0, 5, 1.0, 1.001, 0.0, 100);
    assert!(p.complete);
    assert_eq!(p.index, 5.0);
}

#[test]
fn max_remaining_tracks_slowest_moving_cell() {
    let cells = [
        Cell { current: 5, previous: 0, start: 0.0 },
        Cell { current: 20, previous: 0, start: 0.0 },
        Cell::at_rest(3),
    ];
    assert!((max_remaining(&cells, 0.0, 10.0, 100) - 2.0).abs() < EPS);
    assert!((max_remaining(&cells, 1.0, 10.0, 100) - 1.0).abs() < EPS);
    assert!(max_remaining(&cells, 3.0, 10.0, 100) <= 0.0);
    assert_eq!(
        max_remaining(&[Cell::at_rest(1)], 0.0, 10.0, 100),
        f64::NEG_INFINITY
    );
}
