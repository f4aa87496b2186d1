// Host-side tests for flap geometry and per-instance GPU records.

use flapboard_core::*;
use glam::Vec2;

#[test]
fn instance_record_is_tightly_packed() {
    assert_eq!(std::mem::size_of::<FlapInstance>(), 40);
    let inst = FlapInstance {
        translate: [0.0; 2],
        scale: [1.0; 2],
        leaving: [3.0, 0.0],
        entering: [4.0, 0.0],
        angle: 0.5,
        _pad: 0.0,
    };
    assert_eq!(bytemuck::bytes_of(&inst).len(), 40);
}

#[test]
fn flip_angle_eases_from_upright_to_flat() {
    assert_eq!(flip_angle(0.0), 0.0);
    assert!((flip_angle(1.0) - 1.0).abs() < 1e-12);
    assert!((flip_angle(0.5) - 0.15625).abs() < 1e-12);
    let mut last = 0.0;
    for i in 1..=20 {
        let a = flip_angle(i as f64 / 20.0);
        assert!(a >= last);
        last = a;
    }
    assert_eq!(flip_angle(-1.0), 0.0);
}

#[test]
fn cells_tile_clip_space() {
    let (t, s) = cell_transform(0, 2, 2);
    assert_eq!(t, Vec2::new(-0.5, 0.5));
    assert_eq!(s, Vec2::new(0.5, 0.5));
    let (t, _) = cell_transform(3, 2, 2);
    assert_eq!(t, Vec2::new(0.5, -0.5));
}

#[test]
fn instance_splits_phase_into_atlas_cells_and_angle() {
    let glyphs = GlyphSet::printable_ascii();
    let phase = Phase {
        index: 99.5,
        complete: false,
    };
    let inst = instance(phase, &glyphs, Vec2::ZERO, Vec2::ONE);
    assert_eq!(inst.leaving, [9.0, 9.0]);
    assert_eq!(inst.entering, [0.0, 0.0]);
    assert!((inst.angle - 0.15625).abs() < 1e-6);

    let rest = instance(
        Phase {
            index: 17.0,
            complete: true,
        },
        &glyphs,
        Vec2::ZERO,
        Vec2::ONE,
    );
    assert_eq!(rest.leaving, [7.0, 1.0]);
    assert_eq!(rest.entering, [8.0, 1.0]);
    assert_eq!(rest.angle, 0.0);
}

#[test]
fn instance_cells_match_glyph_set_addressing() {
    let glyphs = GlyphSet::new("abcde".chars());
    let inst = instance(
        Phase {
            index: 4.25,
            complete: false,
        },
        &glyphs,
        Vec2::ZERO,
        Vec2::ONE,
    );
    let (c0, r0) = glyphs.atlas_cell(4);
    let (c1, r1) = glyphs.atlas_cell(5);
    assert_eq!(inst.leaving, [c0 as f32, r0 as f32]);
    assert_eq!(inst.entering, [c1 as f32, r1 as f32]);
}

#[test]
fn mesh_has_four_quads() {
    assert_eq!(FLAP_VERTICES.len(), 24);
    let hinged = FLAP_VERTICES.iter().filter(|v| v[2] == 1.0).count();
    assert_eq!(hinged, 6);
}

#[test]
fn session_clock_is_monotonic() {
    let clock = SessionClock::start();
    let a = clock.now();
    let b = clock.now();
    assert!(a >= 0.0 && b >= a);
}
