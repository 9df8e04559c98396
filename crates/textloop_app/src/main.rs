//! `textloop` - run a text loop in the terminal or headlessly

use anyhow::Result;
use clap::Parser;
use textloop_app::cli::{render_at, Cli, Command};
use textloop_app::{run_live, run_scenario, HeadlessRunConfig, HeadlessScenario};
use textloop_widgets::MonospaceMeasurer;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let measurer = MonospaceMeasurer::default();

    match cli.command {
        Command::Live {
            widget,
            duration_ms,
            frame_ms,
        } => {
            let mut text_loop = widget.build()?;
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .build()?;

            tracing::info!(items = widget.items.len(), duration_ms, "starting live loop");
            let ticks = runtime.block_on(run_live(
                &mut text_loop,
                &measurer,
                duration_ms,
                frame_ms,
                &mut std::io::stdout(),
            ))?;
            tracing::info!(ticks, "live loop finished");
        }
        Command::Render {
            widget,
            at_ms,
            frame_ms,
            json,
        } => {
            let mut text_loop = widget.build()?;
            let tree = render_at(&mut text_loop, &measurer, at_ms, frame_ms)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&tree)?);
            } else {
                println!("{}", tree.to_markup());
            }
        }
        Command::Scenario {
            widget,
            file,
            report,
            frame_ms,
        } => {
            let mut text_loop = widget.build()?;
            let scenario = HeadlessScenario::from_path(&file)?;
            let cfg = HeadlessRunConfig {
                frame_ms,
                ..HeadlessRunConfig::default()
            };

            let outcome = run_scenario(&mut text_loop, &measurer, &scenario, cfg)?;
            outcome.report().write_to_writer(&mut std::io::stdout())?;
            if let Some(path) = report {
                outcome.report().write_to_path(&path)?;
                tracing::info!(path = %path.display(), "report written");
            }
            if outcome.is_failed() {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
