use replay_scope::config::PLAYBACK;
use replay_scope::engine::{NavigateOp, ViewportWindow};

#[test]
fn playback_slice_trails_the_cursor() {
    let vp = ViewportWindow::new(50);

    // Early on the window grows from the left edge.
    assert_eq!(vp.playback_slice(1000, 0), 0..1);
    assert_eq!(vp.playback_slice(1000, 30), 0..31);

    // Once full it slides: width pinned to the replay window.
    let w = PLAYBACK.replay_window;
    let slice = vp.playback_slice(1000, 500);
    assert_eq!(slice, 500 + 1 - w..501);
    assert_eq!(slice.len(), w);
}

#[test]
fn playback_slice_handles_cursor_past_end() {
    let vp = ViewportWindow::new(50);
    let slice = vp.playback_slice(10, 25);
    assert_eq!(slice.end, 10);
    assert!(slice.start <= slice.end);
}

#[test]
fn manual_slice_never_exceeds_len() {
    let mut vp = ViewportWindow::new(60);
    vp.scroll_to(0, 40);
    assert_eq!(vp.manual_slice(40), 0..40);

    vp.scroll_to(100, 40);
    assert_eq!(vp.manual_slice(40), 0..40, "start clamps to max_start");
}

#[test]
fn empty_store_yields_empty_slices() {
    let vp = ViewportWindow::new(60);
    assert_eq!(vp.manual_slice(0), 0..0);
    assert_eq!(vp.playback_slice(0, 5), 0..0);
    assert_eq!(vp.full_slice(0), 0..0);
}

#[test]
fn window_size_clamps_to_dataset() {
    let mut vp = ViewportWindow::new(60);
    vp.set_window_size(500, 100);
    assert_eq!(vp.window_size(), 100);

    vp.set_window_size(0, 100);
    assert_eq!(vp.window_size(), 1);

    // While the store is empty any positive size is accepted as-is.
    vp.set_window_size(240, 0);
    assert_eq!(vp.window_size(), 240);
}

#[test]
fn navigation_steps_and_jumps() {
    let mut vp = ViewportWindow::new(10);
    let len = 100;

    vp.navigate(NavigateOp::ToStart, len);
    assert_eq!(vp.manual_slice(len), 0..10);

    vp.navigate(NavigateOp::StepRight, len);
    assert_eq!(vp.manual_slice(len), 1..11);

    vp.navigate(NavigateOp::JumpRight, len);
    assert_eq!(vp.manual_slice(len), 11..21);

    vp.navigate(NavigateOp::StepLeft, len);
    assert_eq!(vp.manual_slice(len), 10..20);

    vp.navigate(NavigateOp::JumpLeft, len);
    assert_eq!(vp.manual_slice(len), 0..10);

    vp.navigate(NavigateOp::ToEnd, len);
    assert_eq!(vp.manual_slice(len), 90..100);
}

#[test]
fn navigation_clamps_silently_at_edges() {
    let mut vp = ViewportWindow::new(10);
    let len = 100;

    vp.navigate(NavigateOp::ToStart, len);
    vp.navigate(NavigateOp::StepLeft, len);
    vp.navigate(NavigateOp::JumpLeft, len);
    assert_eq!(vp.manual_slice(len), 0..10);

    vp.navigate(NavigateOp::ToEnd, len);
    vp.navigate(NavigateOp::StepRight, len);
    vp.navigate(NavigateOp::JumpRight, len);
    assert_eq!(vp.manual_slice(len), 90..100);
}

#[test]
fn tail_window_follows_growing_dataset() {
    let vp = ViewportWindow::at_tail();
    let w = vp.window_size();

    assert_eq!(vp.manual_slice(10), 0..10);
    assert_eq!(vp.manual_slice(w + 50), 50..w + 50);
    assert_eq!(vp.manual_slice(w + 51), 51..w + 51);
}

#[test]
fn restore_keeps_oversized_start_until_sliced() {
    // A restored start beyond the (still re-feeding) dataset is preserved
    // verbatim and only clamped when a slice is taken.
    let mut vp = ViewportWindow::new(10);
    vp.restore(500, 20);

    assert_eq!(vp.start_index(), 500);
    assert_eq!(vp.window_size(), 20);
    assert_eq!(vp.manual_slice(30), 10..30);
    assert_eq!(vp.start_index(), 500, "slicing must not rewrite the stored start");
}
