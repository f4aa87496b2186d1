// Host-side tests for the board: updates, text layout and redraw bookkeeping.

use flapboard_core::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn small_board() -> Board {
    Board::new(BoardConfig {
        rows: 2,
        cols: 4,
        speed: 10.0,
        glyphs: GlyphSet::default(),
    })
}

#[test]
fn new_board_rests_on_blank() {
    let board = Board::new(BoardConfig::default());
    assert_eq!(board.cells().len(), DEFAULT_ROWS * DEFAULT_COLS);
    let blank = board.config().glyphs.blank_index();
    assert!(board.cells().iter().all(|c| c.current == blank && c.is_resting()));
    assert!(!board.is_animating(0.0));
}

#[test]
fn long_updates_are_truncated() {
    let mut board = small_board();
    let summary = board.set_text("ABCDEFGHIJKL", 1.0);
    assert_eq!(summary.applied, 8);
    assert_eq!(summary.truncated, 4);
    assert_eq!(board.cells().len(), 8);
    assert_eq!(board.text(), "ABCDEFGH");
}

#[test]
fn short_updates_share_one_stamp_and_leave_the_tail() {
    let mut board = small_board();
    board.set_text("ABCDEFGH", 1.0);
    board.set_text("xy", 2.5);
    let cells = board.cells();
    assert!(cells[..2].iter().all(|c| c.start == 2.5));
    assert!(cells[2..].iter().all(|c| c.start == 1.0));
    assert_eq!(board.store().last_modified(), 2.5);
    assert_eq!(board.text(), "xyCDEFGH");
}

#[test]
fn values_wrap_into_the_glyph_set() {
    let mut board = small_board();
    let n = board.config().glyph_count();
    board.set_values(&[n + 3], 0.0);
    assert_eq!(board.cells()[0].current, 3);
}

#[test]
fn unknown_characters_become_blank() {
    let board = small_board();
    let blank = board.config().glyphs.blank_index();
    assert_eq!(board.resolve_text("é"), vec![blank]);
}

#[test]
fn layout_pads_rows_on_newline() {
    let chars: String = layout_text("ab\ncd", 4).into_iter().collect();
    assert_eq!(chars, "ab  cd");
    let chars: String = layout_text("\nx", 3).into_iter().collect();
    assert_eq!(chars, "   x");
    let chars: String = layout_text("abcd\nef", 4).into_iter().collect();
    assert_eq!(chars, "abcdef");
    let chars: String = layout_text("a\r\nb", 2).into_iter().collect();
    assert_eq!(chars, "a b");
}

#[test]
fn identity_update_requests_no_frames() {
    let mut board = small_board();
    let values = board.store().current_values();
    board.set_values(&values, 5.0);
    assert!(!board.settle(5.0));
    assert_eq!(board.redraw().requested(), 0);
    assert!(board.histogram().iter().all(|&h| h == 0));
}

#[test]
fn redraw_requests_coalesce_until_rest() {
    let mut board = small_board();
    board.set_text("AB", 0.0);
    assert!(board.settle(0.0));
    assert!(!board.settle(0.01));
    assert!(!board.invalidate());
    assert_eq!(board.redraw().requested(), 1);

    board.begin_frame();
    assert!(board.settle(0.5));
    board.begin_frame();
    assert!(!board.settle(60.0));
    assert!(!board.redraw().is_pending());
    assert_eq!(board.redraw().requested(), 2);

    assert!(board.invalidate());
}

#[test]
fn rotate_moves_every_value_one_left() {
    let mut board = small_board();
    board.set_text("ABCDEFGH", 0.0);
    let rotated = board.rotated_values();
    board.set_values(&rotated, 1.0);
    assert_eq!(board.text(), "BCDEFGHA");
}

#[test]
fn scramble_respects_probability() {
    let mut board = small_board();
    board.set_text("ABCDEFGH", 0.0);
    let mut rng = StdRng::seed_from_u64(7);
    assert_eq!(
        board.scrambled_values(0.0, &mut rng),
        board.store().current_values()
    );
    assert_eq!(
        board.scrambled_values(f64::NAN, &mut rng),
        board.store().current_values()
    );
    let n = board.config().glyph_count();
    let all = board.scrambled_values(1.0, &mut rng);
    assert_eq!(all.len(), 8);
    assert!(all.iter().all(|&v| v < n));
}

#[test]
fn instances_follow_cell_phase() {
    let mut board = small_board();
    board.set_values(&[5], 0.0);
    let frame = board.instances(0.25);
    assert_eq!(frame.len(), 8);
    assert_eq!(frame[0].leaving, [2.0, 0.0]);
    assert_eq!(frame[0].entering, [3.0, 0.0]);
    assert!(frame[0].angle > 0.0 && frame[0].angle < 1.0);
    assert_eq!(frame[1].leaving, [0.0, 0.0]);
    assert_eq!(frame[1].angle, 0.0);
    assert!(board.phase(8, 0.0).is_none());
}

#[test]
fn frame_in_motion_always_asks_for_a_successor() {
    let mut board = small_board();
    board.set_values(&[5], 0.0);
    assert!(board.settle(0.0));

    // drawn just before the reel lands, checked just after
    let (drawn, more) = board.frame(0.499);
    assert!(drawn[0].angle > 0.9);
    assert_eq!(drawn[0].leaving, [4.0, 0.0]);
    assert!(more);
    assert!(!board.settle(0.501));

    let (rest, more) = board.frame(0.501);
    assert_eq!(rest[0].leaving, [5.0, 0.0]);
    assert_eq!(rest[0].angle, 0.0);
    assert!(!more);
    assert!(!board.redraw().is_pending());
    assert_eq!(board.redraw().requested(), 2);
}

#[test]
fn frame_at_rest_stops_the_loop() {
    let mut board = small_board();
    assert!(board.invalidate());
    let (drawn, more) = board.frame(1.0);
    assert_eq!(drawn.len(), 8);
    assert!(!more);
    assert!(!board.redraw().is_pending());
}

#[test]
fn frame_does_not_double_request_after_an_update() {
    let mut board = small_board();
    board.set_values(&[5], 0.0);
    assert!(board.settle(0.0));
    let (_, more) = board.frame(0.1);
    assert!(more);
    board.set_values(&[9], 0.15);
    assert!(!board.settle(0.15));
    assert_eq!(board.redraw().requested(), 2);
}

#[test]
fn reconfigure_rebuilds_cells_at_rest() {
    let mut board = small_board();
    board.set_text("ABCD", 0.0);
    board.reconfigure(BoardConfig {
        rows: 3,
        cols: 3,
        speed: 5.0,
        glyphs: GlyphSet::new("ab".chars()),
    });
    assert_eq!(board.cells().len(), 9);
    assert_eq!(board.config().glyph_count(), 4);
    assert!(board.cells().iter().all(|c| c.is_resting()));
    assert_eq!(board.resolve_text("ba?"), vec![1, 0, 2]);
}
