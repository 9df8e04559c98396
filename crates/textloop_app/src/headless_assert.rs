//! Assertion helpers for headless scenario steps.

use serde::Serialize;
use textloop_animation::MotionEngine;
use textloop_core::Size;
use textloop_widgets::{RenderNode, TextLoop};

/// Widget-observable state used for headless assertions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WidgetSnapshot {
    pub text: String,
    pub index: usize,
    pub generation: u32,
    pub width: f32,
    pub height: f32,
    pub ticks: u64,
    pub phase: &'static str,
}

impl WidgetSnapshot {
    pub fn capture<M: MotionEngine<RenderNode>>(widget: &TextLoop<M>) -> Self {
        let Size { width, height } = widget.size();
        Self {
            text: widget.current_text(),
            index: widget.current_index(),
            generation: widget.generation(),
            width,
            height,
            ticks: widget.tick_count(),
            phase: widget.phase().as_str(),
        }
    }
}

/// Assertion result with structured failure details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssertionResult {
    Passed,
    Failed { code: String, message: String },
}

pub fn evaluate_assert_text(expected: &str, snapshot: &WidgetSnapshot) -> AssertionResult {
    if snapshot.text == expected {
        AssertionResult::Passed
    } else {
        AssertionResult::Failed {
            code: "text_mismatch".to_string(),
            message: format!("expected text '{expected}', got '{}'", snapshot.text),
        }
    }
}

pub fn evaluate_assert_index(expected: usize, snapshot: &WidgetSnapshot) -> AssertionResult {
    if snapshot.index == expected {
        AssertionResult::Passed
    } else {
        AssertionResult::Failed {
            code: "index_mismatch".to_string(),
            message: format!("expected index {expected}, got {}", snapshot.index),
        }
    }
}

/// Sizes compare within a hundredth of a pixel
pub fn evaluate_assert_size(width: f32, height: f32, snapshot: &WidgetSnapshot) -> AssertionResult {
    let close = |a: f32, b: f32| (a - b).abs() < 0.01;
    if close(snapshot.width, width) && close(snapshot.height, height) {
        AssertionResult::Passed
    } else {
        AssertionResult::Failed {
            code: "size_mismatch".to_string(),
            message: format!(
                "expected size {width}x{height}, got {}x{}",
                snapshot.width, snapshot.height
            ),
        }
    }
}
