//! Tests for the entrance animation sequence of a snake grid surface.

use std::time::Duration;

use snake_grid::prelude::*;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn demo_view() -> (SnakeGridView, EventLoop) {
    init_tracing();
    let event_loop = EventLoop::with_clock(ManualClock::new());
    let mut view = SnakeGridView::new(SurfaceConfig::default(), event_loop.clone())
        .expect("Failed to create view");
    view.set_container_size(Size::new(300.0, 500.0))
        .expect("Failed to size view");
    (view, event_loop)
}

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

#[test]
fn test_entrances_are_staggered() {
    let (mut view, event_loop) = demo_view();
    view.layout_pass().unwrap();

    event_loop.run_until(ms(250)).unwrap();
    let first = view.cell(0).unwrap();
    let second = view.cell(1).unwrap();

    // First card is halfway through an ease-in-out entrance.
    assert!(first.animating);
    assert_eq!(first.opacity, 0.5);
    assert_eq!(first.presented_frame.top(), 49.5);

    // Second card has not started: transparent, untransformed, not animating.
    assert_eq!(second.opacity, 0.0);
    assert!(second.transform.is_identity());
    assert!(!second.animating);

    event_loop.run_until(ms(750)).unwrap();
    let first = view.cell(0).unwrap();
    let second = view.cell(1).unwrap();
    assert!(!first.animating);
    assert_eq!(first.opacity, 1.0);
    assert_eq!(first.background, Color::RED);
    assert!(second.animating);
    assert_eq!(second.opacity, 0.5);
}

#[test]
fn test_cards_reveal_in_index_order() {
    let (mut view, event_loop) = demo_view();
    view.layout_pass().unwrap();

    for step in 0..15u64 {
        // Just before each card's entrance ends, exactly the earlier cards are done.
        event_loop.run_until(ms(step * 500 + 499)).unwrap();
        for index in 0..15 {
            let cell = view.cell(index as usize).unwrap();
            if index < step {
                assert_eq!(cell.opacity, 1.0, "card {index} at step {step}");
            } else if index == step {
                assert!(cell.animating, "card {index} at step {step}");
            } else {
                assert_eq!(cell.opacity, 0.0, "card {index} at step {step}");
            }
        }
    }

    event_loop.run_until_idle().unwrap();
    assert_eq!(event_loop.now(), ms(7500));
    assert!(!view.sequencer().is_running());
    assert_eq!(view.sequencer().completed_count(), 15);
}

#[test]
fn test_scrolling_reveals_new_cards_after_the_queue() {
    let (mut view, event_loop) = demo_view();
    view.layout_pass().unwrap();

    view.set_scroll_offset(view.max_scroll_offset());
    let pass = view.layout_pass().unwrap();
    assert_eq!(pass.newly_visible, vec![15, 16, 17, 18, 19]);
    assert_eq!(pass.hidden, (0..6).collect::<Vec<_>>());
    assert_eq!(pass.entrances_queued, 5);

    event_loop.run_until_idle().unwrap();
    assert_eq!(event_loop.now(), ms(20 * 500));
    assert_eq!(view.visited().len(), 20);
}

#[test]
fn test_scroll_out_and_back_does_not_replay() {
    let (mut view, event_loop) = demo_view();
    view.layout_pass().unwrap();
    event_loop.run_until_idle().unwrap();
    let finished_at = event_loop.now();

    view.set_scroll_offset(view.max_scroll_offset());
    view.layout_pass().unwrap();
    event_loop.run_until_idle().unwrap();

    view.set_scroll_offset(0.0);
    let pass = view.layout_pass().unwrap();
    assert_eq!(pass.newly_visible, (0..6).collect::<Vec<_>>());
    assert_eq!(pass.entrances_queued, 0);

    let first = view.cell(0).unwrap();
    assert_eq!(first.opacity, 1.0);
    assert_eq!(first.background, Color::RED);
    assert!(!first.animating);

    assert!(event_loop.is_idle());
    assert_eq!(view.sequencer().enqueued_count(), 20);
    assert!(event_loop.now() >= finished_at);
}

#[test]
fn test_revisit_before_entrance_runs_keeps_final_state() {
    let (mut view, event_loop) = demo_view();
    view.layout_pass().unwrap();

    // Cards 0..6 leave and return before any entrance has started.
    view.set_scroll_offset(view.max_scroll_offset());
    view.layout_pass().unwrap();
    view.set_scroll_offset(0.0);
    let pass = view.layout_pass().unwrap();
    assert_eq!(pass.entrances_queued, 0);

    // Card 5's queued slot runs from 2.5s to 3.0s but leaves it alone.
    event_loop.run_until(ms(2750)).unwrap();
    let fifth = view.cell(5).unwrap();
    assert!(!fifth.animating);
    assert_eq!(fifth.opacity, 1.0);
    assert_eq!(fifth.presented_frame, fifth.frame);

    // Card 6 was never revisited and still gets its entrance afterwards.
    event_loop.run_until(ms(3250)).unwrap();
    let sixth = view.cell(6).unwrap();
    assert!(sixth.animating);
    assert_eq!(sixth.opacity, 0.5);

    event_loop.run_until_idle().unwrap();
    assert_eq!(view.sequencer().completed_count(), 20);
}

#[test]
fn test_sequencer_restarts_after_going_idle() {
    let (mut view, event_loop) = demo_view();
    view.layout_pass().unwrap();
    event_loop.run_until_idle().unwrap();
    assert_eq!(view.sequencer().drain_cycles(), 1);

    view.set_scroll_offset(view.max_scroll_offset());
    view.layout_pass().unwrap();
    assert!(view.sequencer().is_running());

    event_loop.run_until_idle().unwrap();
    assert_eq!(view.sequencer().drain_cycles(), 2);
    assert_eq!(view.sequencer().phase(), SequencerPhase::Idle);
}

#[test]
fn test_custom_easing_from_config() {
    init_tracing();
    let config = SurfaceConfig::from_toml_str(
        r#"
        [entrance]
        duration_secs = 1.0
        easing = "linear"
        "#,
    )
    .unwrap();
    let event_loop = EventLoop::with_clock(ManualClock::new());
    let mut view = SnakeGridView::new(config, event_loop.clone()).unwrap();
    view.set_container_size(Size::new(300.0, 500.0)).unwrap();
    view.item_will_display(0).unwrap();

    event_loop.run_until(ms(250)).unwrap();
    assert_eq!(view.cell(0).unwrap().opacity, 0.25);
}
