//! Base widget trait and types

use slotmap::new_key_type;
use textloop_core::Result;

use crate::measure::Measurer;
use crate::render::RenderNode;

new_key_type! {
    pub struct WidgetId;
}

/// Base trait for all widgets
///
/// A host drives every widget the same way: `mount` once, then per frame
/// `update`, `render` and `measure`, and finally `unmount`.
pub trait Widget {
    /// Attach the widget and start its timers
    fn mount(&mut self, measurer: &dyn Measurer) -> Result<()>;

    /// Detach the widget; no state changes happen afterwards
    fn unmount(&mut self);

    /// Advance logical time. Returns true when the next render would differ.
    fn update(&mut self, dt_ms: u64) -> bool;

    /// Render the widget (called when state changes)
    fn render(&self) -> RenderNode;

    /// Post-render hook reading realized sizes
    fn measure(&mut self, measurer: &dyn Measurer);

    /// True while the widget is still waiting for a usable measurement
    fn needs_measure(&self) -> bool {
        false
    }
}
