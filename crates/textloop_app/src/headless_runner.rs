//! Scenario runner that drives a widget through headless steps.

use crate::headless_assert::{
    evaluate_assert_index, evaluate_assert_size, evaluate_assert_text, AssertionResult,
    WidgetSnapshot,
};
use crate::headless_report::HeadlessReport;
use crate::headless_runtime::{HeadlessRunConfig, HeadlessRuntime};
use crate::headless_scenario::{HeadlessScenario, ScenarioStep};
use anyhow::Result;
use textloop_animation::MotionEngine;
use textloop_widgets::{Measurer, Phase, RenderNode, TextLoop};

/// Final outcome of a scenario run.
#[derive(Debug, Clone)]
pub enum RunOutcome {
    Passed { report: HeadlessReport },
    Failed { report: HeadlessReport },
}

impl RunOutcome {
    pub fn report(&self) -> &HeadlessReport {
        match self {
            RunOutcome::Passed { report } => report,
            RunOutcome::Failed { report } => report,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, RunOutcome::Failed { .. })
    }
}

#[derive(Debug, Default)]
struct Clock {
    frames: u64,
    ms: u64,
}

/// Execute scenario JSON against a widget.
pub fn run_scenario_json<M>(
    widget: &mut TextLoop<M>,
    measurer: &dyn Measurer,
    input: &str,
    runtime_cfg: HeadlessRunConfig,
) -> Result<RunOutcome>
where
    M: MotionEngine<RenderNode>,
{
    let scenario = HeadlessScenario::from_json(input)?;
    run_scenario(widget, measurer, &scenario, runtime_cfg)
}

/// Execute a loaded scenario against a widget, mounting it first if needed.
///
/// Every frame advances the widget by the frame period and then runs its
/// post-render measurement. Assertions read the widget between frames.
pub fn run_scenario<M>(
    widget: &mut TextLoop<M>,
    measurer: &dyn Measurer,
    scenario: &HeadlessScenario,
    runtime_cfg: HeadlessRunConfig,
) -> Result<RunOutcome>
where
    M: MotionEngine<RenderNode>,
{
    if widget.phase() == Phase::Created {
        widget.mount(measurer)?;
    }
    let start_ticks = widget.tick_count();
    let mut clock = Clock::default();

    for (step_index, step) in scenario.steps.iter().enumerate() {
        tracing::debug!(step_index, step = step.name(), "scenario step");

        let result = match step {
            ScenarioStep::Wait { ms } => {
                let mut remaining_ms = *ms;
                run_frames(
                    widget,
                    measurer,
                    runtime_cfg,
                    wait_frames(*ms, runtime_cfg.frame_ms),
                    &mut clock,
                    || {
                        let step_ms = remaining_ms.min(runtime_cfg.frame_ms);
                        remaining_ms = remaining_ms.saturating_sub(step_ms);
                        step_ms
                    },
                )?;
                AssertionResult::Passed
            }
            ScenarioStep::Frames { count } => {
                run_frames(widget, measurer, runtime_cfg, *count, &mut clock, || {
                    runtime_cfg.frame_ms
                })?;
                AssertionResult::Passed
            }
            ScenarioStep::Unmount => {
                widget.unmount();
                AssertionResult::Passed
            }
            ScenarioStep::AssertText { value } => {
                evaluate_assert_text(value, &WidgetSnapshot::capture(widget))
            }
            ScenarioStep::AssertIndex { index } => {
                evaluate_assert_index(*index, &WidgetSnapshot::capture(widget))
            }
            ScenarioStep::AssertSize { width, height } => {
                evaluate_assert_size(*width, *height, &WidgetSnapshot::capture(widget))
            }
        };

        if let AssertionResult::Failed { code, message } = result {
            tracing::debug!(step_index, code = %code, "scenario assertion failed");
            let report = HeadlessReport::failed(
                step.name(),
                step_index,
                message,
                clock.frames,
                clock.ms,
                widget.tick_count() - start_ticks,
            );
            return Ok(RunOutcome::Failed { report });
        }
    }

    Ok(RunOutcome::Passed {
        report: HeadlessReport::passed(clock.frames, clock.ms, widget.tick_count() - start_ticks),
    })
}

fn run_frames<M, A>(
    widget: &mut TextLoop<M>,
    measurer: &dyn Measurer,
    runtime_cfg: HeadlessRunConfig,
    frames: u32,
    clock: &mut Clock,
    mut advance_ms: A,
) -> Result<()>
where
    M: MotionEngine<RenderNode>,
    A: FnMut() -> u64,
{
    if frames == 0 {
        return Ok(());
    }

    let mut cfg = runtime_cfg;
    cfg.max_frames = frames;
    HeadlessRuntime::run(cfg, |_| {
        let dt = advance_ms();
        widget.advance(dt);
        widget.measure(measurer);
        clock.frames = clock.frames.saturating_add(1);
        clock.ms = clock.ms.saturating_add(dt);
    })
}

fn wait_frames(wait_ms: u64, frame_ms: u64) -> u32 {
    if wait_ms == 0 {
        return 0;
    }
    let frame = frame_ms.max(1);
    let frames = wait_ms.saturating_add(frame.saturating_sub(1)) / frame;
    frames.min(u32::MAX as u64) as u32
}
