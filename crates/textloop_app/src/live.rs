//! Real-time driver
//!
//! Runs a widget against the wall clock on a tokio timer. The widget stays
//! synchronous; this loop only feeds it elapsed time at a fixed frame period
//! and reports every newly displayed item.

use anyhow::{bail, Result};
use std::io::Write;
use std::time::Duration;
use textloop_animation::MotionEngine;
use textloop_widgets::{Measurer, Phase, RenderNode, TextLoop};
use tokio::time::{self, Instant, MissedTickBehavior};

/// Drive `widget` for `duration_ms`, writing each displayed item as a line.
///
/// Returns the number of ticks applied.
pub async fn run_live<M, W>(
    widget: &mut TextLoop<M>,
    measurer: &dyn Measurer,
    duration_ms: u64,
    frame_ms: u64,
    out: &mut W,
) -> Result<u64>
where
    M: MotionEngine<RenderNode>,
    W: Write,
{
    if frame_ms == 0 {
        bail!("frame period must be > 0");
    }
    if widget.phase() == Phase::Created {
        widget.mount(measurer)?;
    }

    let start_ticks = widget.tick_count();
    let mut shown = widget.current_text();
    writeln!(out, "{shown}")?;

    let mut frames = time::interval(Duration::from_millis(frame_ms));
    frames.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick of a tokio interval completes immediately.
    frames.tick().await;

    let started = Instant::now();
    let mut last = started;
    while last.duration_since(started) < Duration::from_millis(duration_ms) {
        let now = frames.tick().await;
        let dt = now.duration_since(last).as_millis() as u64;
        last = now;

        if widget.advance(dt) > 0 {
            tracing::trace!(index = widget.current_index(), "live tick");
        }
        widget.measure(measurer);

        let text = widget.current_text();
        if text != shown {
            writeln!(out, "{text}")?;
            shown = text;
        }
    }

    widget.unmount();
    Ok(widget.tick_count() - start_ticks)
}
