//! Scenario definition for headless widget runs.
//!
//! ```json
//! { "steps": [
//!     { "type": "wait", "ms": 250 },
//!     { "type": "assert_text", "value": "Gamma" },
//!     { "type": "unmount" }
//! ] }
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Sequence of headless steps.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HeadlessScenario {
    pub steps: Vec<ScenarioStep>,
}

impl HeadlessScenario {
    /// Load a scenario from JSON text.
    pub fn from_json(input: &str) -> Result<Self> {
        serde_json::from_str(input).context("invalid scenario JSON")
    }

    /// Load a scenario from file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        Self::from_json(&raw)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioStep {
    /// Advance logical time, one frame at a time
    Wait { ms: u64 },
    /// Advance a number of full frames
    Frames { count: u32 },
    /// Detach the widget
    Unmount,
    AssertText { value: String },
    AssertIndex { index: usize },
    AssertSize { width: f32, height: f32 },
}

impl ScenarioStep {
    /// Name used in reports
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioStep::Wait { .. } => "wait",
            ScenarioStep::Frames { .. } => "frames",
            ScenarioStep::Unmount => "unmount",
            ScenarioStep::AssertText { .. } => "assert_text",
            ScenarioStep::AssertIndex { .. } => "assert_index",
            ScenarioStep::AssertSize { .. } => "assert_size",
        }
    }
}
