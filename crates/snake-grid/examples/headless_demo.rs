//! Headless run of the demo grid.
//!
//! Lays out 20 cards in a 300x500 container, plays the entrance sequence,
//! scrolls to the bottom and back, and prints what each card looks like along
//! the way.
//!
//! Run with:
//!
//! ```text
//! RUST_LOG=snake_grid=debug cargo run -p snake-grid --example headless_demo [config.toml]
//! ```

use std::time::Duration;

use snake_grid::prelude::*;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("snake_grid=info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => SurfaceConfig::from_path(path)?,
        None => SurfaceConfig::default(),
    };
    let step = config.entrance.duration().max(Duration::from_millis(1)) / 2;

    let event_loop = EventLoop::with_clock(ManualClock::new());
    let mut view = SnakeGridView::new(config, event_loop.clone())?;
    view.set_container_size(Size::new(300.0, 500.0))?;

    let pass = view.layout_pass()?;
    println!(
        "{} cards visible, {} entrances queued",
        pass.visible, pass.entrances_queued
    );

    while view.sequencer().is_running() {
        event_loop.run_for(step)?;
        print_frame(&view, &event_loop);
    }

    view.set_scroll_offset(view.max_scroll_offset());
    let pass = view.layout_pass()?;
    println!(
        "scrolled to {:.0}: {:?} appeared, {:?} hidden",
        view.scroll_offset(),
        pass.newly_visible,
        pass.hidden
    );
    event_loop.run_until_idle()?;

    view.set_scroll_offset(0.0);
    let pass = view.layout_pass()?;
    println!(
        "scrolled back: {} cards reappeared, {} entrances replayed",
        pass.newly_visible.len(),
        pass.entrances_queued
    );
    print_frame(&view, &event_loop);
    Ok(())
}

fn print_frame(view: &SnakeGridView, event_loop: &EventLoop) {
    let line: Vec<String> = view
        .displayed_cells()
        .iter()
        .map(|cell| {
            let marker = if cell.animating { "*" } else { "" };
            format!("{}{}:{:.2}", cell.title, marker, cell.opacity)
        })
        .collect();
    println!("t={:>6.2}s  {}", event_loop.now().as_secs_f64(), line.join(" "));
}
