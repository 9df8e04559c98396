//! Command-line surface of the `textloop` binary

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use textloop_widgets::{Measurer, RenderNode, TextLoop, TextLoopConfig};

use crate::headless_runtime::{HeadlessRunConfig, HeadlessRuntime};

/// Loop through text items with spring transitions
#[derive(Parser, Debug)]
#[command(name = "textloop")]
#[command(about = "Loop through text items with spring transitions")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run in real time, printing each item as it appears
    Live {
        #[command(flatten)]
        widget: WidgetArgs,
        /// How long to run
        #[arg(long, default_value = "10000")]
        duration_ms: u64,
        /// Frame period
        #[arg(long, default_value = "16")]
        frame_ms: u64,
    },
    /// Print the render tree at a point in logical time
    Render {
        #[command(flatten)]
        widget: WidgetArgs,
        /// Logical time to render at
        #[arg(long, default_value = "0")]
        at_ms: u64,
        /// Frame period used to reach `at_ms`
        #[arg(long, default_value = "16")]
        frame_ms: u64,
        /// Print JSON instead of markup
        #[arg(long)]
        json: bool,
    },
    /// Run a JSON scenario headlessly
    Scenario {
        #[command(flatten)]
        widget: WidgetArgs,
        /// Scenario file
        #[arg(short, long)]
        file: PathBuf,
        /// Write the JSON report here (relative path)
        #[arg(long)]
        report: Option<PathBuf>,
        #[arg(long, default_value = "16")]
        frame_ms: u64,
    },
}

/// Options shared by every command that builds a widget
#[derive(Args, Debug, Clone)]
pub struct WidgetArgs {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Override the interval between items
    #[arg(long)]
    pub interval_ms: Option<u64>,
    /// Override the box resize duration
    #[arg(long)]
    pub adjusting_ms: Option<u32>,
    /// Items to loop through
    #[arg(required = true)]
    pub items: Vec<String>,
}

impl WidgetArgs {
    /// Load the configuration file, then apply flag overrides
    pub fn load_config(&self) -> Result<TextLoopConfig> {
        let mut config = match &self.config {
            Some(path) => TextLoopConfig::from_path(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => TextLoopConfig::default(),
        };
        if let Some(ms) = self.interval_ms {
            config = config.interval_ms(ms);
        }
        if let Some(ms) = self.adjusting_ms {
            config = config.adjusting_ms(ms);
        }
        config.validate()?;
        Ok(config)
    }

    pub fn build(&self) -> Result<TextLoop> {
        let config = self.load_config()?;
        Ok(TextLoop::new(self.items.iter().cloned(), config)?)
    }
}

/// Mount `widget` and run frames until `at_ms`, then render it
pub fn render_at(
    widget: &mut TextLoop,
    measurer: &dyn Measurer,
    at_ms: u64,
    frame_ms: u64,
) -> Result<RenderNode> {
    if frame_ms == 0 {
        bail!("frame period must be > 0");
    }
    widget.mount(measurer)?;

    let frames = at_ms / frame_ms;
    if frames > 0 {
        let cfg = HeadlessRunConfig {
            frame_ms,
            max_frames: u32::try_from(frames).context("too many frames")?,
        };
        HeadlessRuntime::run(cfg, |_| {
            widget.advance(frame_ms);
            widget.measure(measurer);
        })?;
    }
    let rest = at_ms % frame_ms;
    if rest > 0 {
        widget.advance(rest);
        widget.measure(measurer);
    }
    Ok(widget.render())
}
