//! textloop application layer
//!
//! Drives [`TextLoop`](textloop_widgets::TextLoop) widgets outside of any UI
//! toolkit:
//!
//! - **Headless runtime**: a deterministic frame loop on logical time
//! - **Scenarios**: JSON step lists with assertions and a JSON report
//! - **Live mode**: a tokio-timed loop against the wall clock
//! - **CLI**: the argument model of the `textloop` binary

pub mod cli;
pub mod headless_assert;
pub mod headless_report;
pub mod headless_runner;
pub mod headless_runtime;
pub mod headless_scenario;
pub mod live;

pub use headless_report::{HeadlessReport, ReportStatus};
pub use headless_runner::{run_scenario, run_scenario_json, RunOutcome};
pub use headless_runtime::{HeadlessContext, HeadlessRunConfig, HeadlessRuntime};
pub use headless_scenario::{HeadlessScenario, ScenarioStep};
pub use live::run_live;
