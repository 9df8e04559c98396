//! Widget host
//!
//! Owns a set of mounted widgets and drives them frame by frame: advance
//! logical time, re-render the widgets whose output changed, then run each
//! widget's post-render measurement. Instances share nothing; each keeps
//! its own timer and motion state.

use slotmap::SlotMap;
use textloop_core::Result;

use crate::measure::Measurer;
use crate::render::RenderNode;
use crate::widget::{Widget, WidgetId};

struct Hosted {
    widget: Box<dyn Widget>,
    last_render: RenderNode,
    dirty: bool,
}

/// Drives widgets against a single measurer
pub struct WidgetHost<Ms> {
    widgets: SlotMap<WidgetId, Hosted>,
    measurer: Ms,
}

impl<Ms: Measurer> WidgetHost<Ms> {
    pub fn new(measurer: Ms) -> Self {
        Self {
            widgets: SlotMap::with_key(),
            measurer,
        }
    }

    /// Mount a widget and take its first render
    pub fn mount(&mut self, mut widget: Box<dyn Widget>) -> Result<WidgetId> {
        widget.mount(&self.measurer)?;
        let last_render = widget.render();

        let id = self.widgets.insert(Hosted {
            widget,
            last_render,
            dirty: true,
        });
        tracing::debug!(?id, "widget mounted");
        Ok(id)
    }

    /// Unmount and drop a widget
    pub fn unmount(&mut self, id: WidgetId) -> bool {
        match self.widgets.remove(id) {
            Some(mut hosted) => {
                hosted.widget.unmount();
                tracing::debug!(?id, "widget unmounted");
                true
            }
            None => false,
        }
    }

    /// Advance every widget by `dt_ms` and re-render the ones that changed.
    ///
    /// Widgets still waiting for their first usable measurement are measured
    /// every frame until a reading arrives.
    pub fn frame(&mut self, dt_ms: u64) {
        for hosted in self.widgets.values_mut() {
            let changed = hosted.widget.update(dt_ms);
            if changed {
                hosted.last_render = hosted.widget.render();
                hosted.dirty = true;
            } else if !hosted.widget.needs_measure() {
                continue;
            }

            hosted.widget.measure(&self.measurer);
            if !changed {
                let render = hosted.widget.render();
                if render != hosted.last_render {
                    hosted.last_render = render;
                    hosted.dirty = true;
                }
            }
        }
    }

    /// Latest render of a widget
    pub fn render(&self, id: WidgetId) -> Option<&RenderNode> {
        self.widgets.get(id).map(|h| &h.last_render)
    }

    /// Take the ids whose render changed since the last call
    pub fn take_dirty(&mut self) -> Vec<WidgetId> {
        self.widgets
            .iter_mut()
            .filter(|(_, h)| h.dirty)
            .map(|(id, h)| {
                h.dirty = false;
                id
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }
}
