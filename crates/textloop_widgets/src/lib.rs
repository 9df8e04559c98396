//! textloop widget library
//!
//! The [`TextLoop`] widget and the pieces it renders with: an inline
//! styling helper, a target-agnostic render tree, and the measurement
//! contract hosts implement to report realized sizes.

pub mod config;
pub mod host;
pub mod measure;
pub mod render;
pub mod state;
pub mod style;
pub mod text_loop;
pub mod widget;

pub use config::{SpringSettings, TextLoopConfig};
pub use host::WidgetHost;
pub use measure::{Measurer, MonospaceMeasurer};
pub use render::{RenderNode, Tag};
pub use state::{TextLoopState, GENERATION_WRAP};
pub use style::BoxStyle;
pub use text_loop::{LifecycleEvent, Phase, TextLoop};
pub use widget::{Widget, WidgetId};
