//! Box measurement
//!
//! Widgets read the realized size of what they rendered through a
//! `Measurer`. A measurer returns `None` when it cannot produce a reading
//! (for example, the node is not attached to a live surface yet); callers
//! keep whatever size they had before.

use textloop_core::Size;

use crate::render::RenderNode;

/// Reads the bounding box of a rendered node
pub trait Measurer {
    fn measure(&self, node: &RenderNode) -> Option<Size>;
}

impl<F> Measurer for F
where
    F: Fn(&RenderNode) -> Option<Size>,
{
    fn measure(&self, node: &RenderNode) -> Option<Size> {
        self(node)
    }
}

/// Measures text as a grid of fixed-size cells
///
/// Nodes that carry an explicit width and height in their style report
/// those; everything else is measured from its text content, one cell per
/// character and one row per line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonospaceMeasurer {
    pub char_width: f32,
    pub line_height: f32,
}

impl MonospaceMeasurer {
    pub fn new(char_width: f32, line_height: f32) -> Self {
        Self {
            char_width,
            line_height,
        }
    }
}

impl Default for MonospaceMeasurer {
    fn default() -> Self {
        Self::new(8.0, 16.0)
    }
}

impl Measurer for MonospaceMeasurer {
    fn measure(&self, node: &RenderNode) -> Option<Size> {
        if let (Some(width), Some(height)) = (node.style.width, node.style.height) {
            return Some(Size::new(width, height));
        }

        let text = node.text_content();
        let (columns, rows) = text.lines().fold((0usize, 0usize), |(cols, rows), line| {
            (cols.max(line.chars().count()), rows + 1)
        });

        Some(Size::new(
            columns as f32 * self.char_width,
            rows.max(1) as f32 * self.line_height,
        ))
    }
}
