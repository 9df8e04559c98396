//! TextLoop widget
//!
//! Cycles through a list of items on a repeating timer. Each advance
//! springs the outgoing item up and out by its own height while the
//! incoming item rises into place from one box height below, and the
//! bounding box eases to the new item's width.
//!
//! Until the first item has been measured the widget renders it bare,
//! with no positioning and no animation, so that the host can read its
//! natural size.
//!
//! # Example
//!
//! ```rust
//! use textloop_widgets::{MonospaceMeasurer, TextLoop, TextLoopConfig};
//!
//! let measurer = MonospaceMeasurer::new(10.0, 20.0);
//! let config = TextLoopConfig::new().interval_ms(100);
//! let mut text_loop = TextLoop::new(["Alpha", "Beta", "Gamma"], config).unwrap();
//!
//! text_loop.mount(&measurer).unwrap();
//! assert_eq!(text_loop.size().width, 50.0);
//!
//! text_loop.advance(250);
//! assert_eq!(text_loop.current_text(), "Gamma");
//! ```

use std::num::NonZeroUsize;

use textloop_animation::{
    spring, Easing, InterpolatedStyle, MotionEngine, MotionStyle, PlainStyle, SpringConfig,
    TransitionMotion, TransitionStyle, Tween,
};
use textloop_core::{IntervalTimer, Result, Size, StateMachine, TextLoopError};
use tracing::{debug, trace, warn};

use crate::config::TextLoopConfig;
use crate::measure::Measurer;
use crate::render::RenderNode;
use crate::state::TextLoopState;
use crate::style::{BoxStyle, Display, Position, VerticalAlign, WhiteSpace};
use crate::widget::Widget;

const OPACITY: &str = "opacity";
const TRANSLATE: &str = "translate";

/// Lifecycle phase of a [`TextLoop`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Constructed, not mounted
    Created,
    /// Mounted, waiting for the first usable measurement
    Measuring,
    /// Mounted and animating
    Running,
    /// Detached; no further state changes
    Unmounted,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Created => "created",
            Phase::Measuring => "measuring",
            Phase::Running => "running",
            Phase::Unmounted => "unmounted",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
    Mount,
    Measured,
    Unmount,
}

fn lifecycle() -> StateMachine<Phase, LifecycleEvent> {
    StateMachine::builder(Phase::Created)
        .on(Phase::Created, LifecycleEvent::Mount, Phase::Measuring)
        .on(Phase::Measuring, LifecycleEvent::Measured, Phase::Running)
        .on(Phase::Measuring, LifecycleEvent::Unmount, Phase::Unmounted)
        .on(Phase::Running, LifecycleEvent::Unmount, Phase::Unmounted)
        .build()
}

/// How a freshly keyed entry starts out
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Enter {
    /// Already at its resting values (first steady render)
    AtRest,
    /// Transparent, one box height below
    FromBelow,
}

/// A widget that loops through its items with spring transitions
pub struct TextLoop<M = TransitionMotion<RenderNode>> {
    items: Vec<RenderNode>,
    config: TextLoopConfig,
    state: TextLoopState,
    lifecycle: StateMachine<Phase, LifecycleEvent>,
    timer: IntervalTimer,
    motion: M,
    /// Box width as a CSS transition would show it
    width: Tween,
    ticks: u64,
}

impl TextLoop {
    /// Create a text loop backed by the spring transition engine
    pub fn new<I, T>(items: I, config: TextLoopConfig) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<RenderNode>,
    {
        Self::with_motion(items, config, TransitionMotion::new())
    }
}

impl<M: MotionEngine<RenderNode>> TextLoop<M> {
    /// Create a text loop driven by a custom motion engine
    pub fn with_motion<I, T>(items: I, config: TextLoopConfig, motion: M) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<RenderNode>,
    {
        let items: Vec<RenderNode> = items.into_iter().map(Into::into).collect();
        if items.is_empty() {
            return Err(TextLoopError::EmptyItems);
        }
        config.validate()?;

        let initial = config.initial();
        let mut text_loop = Self {
            timer: IntervalTimer::new(config.interval_ms)?,
            width: Tween::new(initial.width, config.adjusting_ms, Easing::Linear),
            state: TextLoopState::new(initial),
            lifecycle: lifecycle(),
            items,
            config,
            motion,
            ticks: 0,
        };

        if text_loop.state.is_measured() {
            text_loop.sync_motion(Enter::AtRest);
        }
        Ok(text_loop)
    }

    pub fn config(&self) -> &TextLoopConfig {
        &self.config
    }

    pub fn items(&self) -> &[RenderNode] {
        &self.items
    }

    pub fn state(&self) -> TextLoopState {
        self.state
    }

    pub fn phase(&self) -> Phase {
        self.lifecycle.current_state()
    }

    pub fn is_mounted(&self) -> bool {
        self.lifecycle.is_in(Phase::Measuring) || self.lifecycle.is_in(Phase::Running)
    }

    pub fn current_index(&self) -> usize {
        self.state.index
    }

    pub fn generation(&self) -> u32 {
        self.state.generation
    }

    pub fn current_item(&self) -> &RenderNode {
        &self.items[self.state.index]
    }

    /// Text of the displayed item
    pub fn current_text(&self) -> String {
        self.current_item().text_content()
    }

    /// Last measured size
    pub fn size(&self) -> Size {
        self.state.size
    }

    /// Ticks applied since creation
    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    /// Box width at this instant of the resize transition
    pub fn displayed_width(&self) -> f32 {
        self.width.value()
    }

    pub fn motion(&self) -> &M {
        &self.motion
    }

    /// True while an entry is springing or the box is resizing
    pub fn is_animating(&self) -> bool {
        self.motion.is_animating() || !self.width.is_finished()
    }

    /// Attach the widget: take the first measurement and start the timer
    pub fn mount(&mut self, measurer: &dyn Measurer) -> Result<()> {
        let phase = self.phase();
        if self.lifecycle.send(LifecycleEvent::Mount).is_none() {
            return Err(TextLoopError::AlreadyMounted(phase.as_str()));
        }

        // A single item never advances.
        if self.items.len() > 1 {
            self.timer.start();
        }
        debug!(
            items = self.items.len(),
            interval_ms = self.config.interval_ms,
            "text loop mounted"
        );

        if self.state.is_measured() {
            self.lifecycle.send(LifecycleEvent::Measured);
        }
        self.measure(measurer);
        Ok(())
    }

    /// Detach the widget. Pending ticks are dropped.
    pub fn unmount(&mut self) {
        if self.lifecycle.send(LifecycleEvent::Unmount).is_some() {
            self.timer.stop();
            debug!(ticks = self.ticks, "text loop unmounted");
        }
    }

    /// Advance logical time and return the number of ticks applied
    ///
    /// Time is split at tick boundaries so that each tick sees the motion
    /// stepped up to its own instant.
    pub fn advance(&mut self, dt_ms: u64) -> u64 {
        if !self.is_mounted() {
            return 0;
        }

        let mut left = dt_ms;
        let mut fired = 0;
        while left > 0 {
            let step = self.timer.remaining_ms().map_or(left, |r| r.min(left));
            self.motion.step(step as f32 / 1000.0);
            self.width.step(step as f32);
            left -= step;

            if self.timer.advance(step) > 0 {
                self.on_tick();
                fired += 1;
            }
        }
        fired
    }

    /// Replace the items, keeping the index in range
    pub fn set_items<I, T>(&mut self, items: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<RenderNode>,
    {
        let items: Vec<RenderNode> = items.into_iter().map(Into::into).collect();
        let count = NonZeroUsize::new(items.len()).ok_or(TextLoopError::EmptyItems)?;

        self.items = items;
        self.state = self.state.clamped(count);

        if self.is_mounted() {
            if count.get() > 1 && !self.timer.is_armed() {
                self.timer.start();
            } else if count.get() == 1 {
                self.timer.stop();
            }
        }
        let animated = matches!(self.phase(), Phase::Created | Phase::Running);
        if animated && self.state.is_measured() {
            self.sync_motion(Enter::FromBelow);
        }
        debug!(items = count.get(), index = self.state.index, "text loop items replaced");
        Ok(())
    }

    fn on_tick(&mut self) {
        let Some(count) = NonZeroUsize::new(self.items.len()) else {
            return;
        };
        self.state = self.state.tick(count);
        self.ticks += 1;
        debug!(
            index = self.state.index,
            generation = self.state.generation,
            "text loop tick"
        );

        if self.phase() == Phase::Running {
            self.sync_motion(Enter::FromBelow);
        }
    }

    fn resting_style(&self) -> MotionStyle {
        let config = self.config.spring.to_config();
        MotionStyle::new()
            .with(OPACITY, spring(1.0, config))
            .with(TRANSLATE, spring(0.0, config))
    }

    /// Hand the current item to the motion engine under the current key
    fn sync_motion(&mut self, enter: Enter) {
        let height = self.state.size.height;
        let current = TransitionStyle::new(
            self.state.key(),
            self.current_item().clone(),
            self.resting_style(),
        );

        let leave = SpringConfig::default();
        let will_leave = |_: &TransitionStyle<RenderNode>| {
            Some(
                MotionStyle::new()
                    .with(OPACITY, spring(0.0, leave))
                    .with(TRANSLATE, spring(-height, leave)),
            )
        };

        match enter {
            Enter::AtRest => {
                self.motion
                    .set_styles(vec![current], &|s| s.style.at_rest(), &will_leave)
            }
            Enter::FromBelow => self.motion.set_styles(
                vec![current],
                &|_| PlainStyle::new().with(OPACITY, 0.0).with(TRANSLATE, height),
                &will_leave,
            ),
        }
    }

    /// Render the widget for the current instant
    pub fn render(&self) -> RenderNode {
        if !self.state.is_measured() {
            return self.render_bootstrap();
        }

        let Size { width, height } = self.state.size;
        let outer = self.config.style.merge(
            &BoxStyle::new()
                .display(Display::InlineBlock)
                .position(Position::Relative)
                .vertical_align(VerticalAlign::Top)
                .height(height),
        );
        let sizing = BoxStyle::new()
            .width(width)
            .height(height)
            .transition("width", self.config.adjusting_ms, Easing::Linear);

        let boxes = self.motion.interpolated().into_iter().map(text_box);

        RenderNode::div()
            .style(outer)
            .child(RenderNode::div().style(sizing).children(boxes))
    }

    fn render_bootstrap(&self) -> RenderNode {
        RenderNode::span().child(self.items[0].clone())
    }

    /// Read the realized size after a render
    ///
    /// Before the first usable reading this measures the bootstrap render
    /// and, once it succeeds, starts animating. Afterwards it measures the
    /// displayed item's box. A missing reading keeps the previous size.
    pub fn measure(&mut self, measurer: &dyn Measurer) {
        match self.phase() {
            Phase::Measuring => {
                let Some(size) = measurer.measure(&self.render_bootstrap()) else {
                    trace!("bootstrap measurement unavailable");
                    return;
                };
                if !self.accept(size) || size.is_unmeasured() {
                    return;
                }

                self.state = self.state.measured(size);
                self.width.snap_to(size.width);
                self.lifecycle.send(LifecycleEvent::Measured);
                debug!(width = size.width, height = size.height, "text loop measured");
                self.sync_motion(Enter::AtRest);
            }
            Phase::Running => {
                let tree = self.render();
                let reading = tree
                    .find_by_key(&self.state.key())
                    .and_then(|node| measurer.measure(node));
                let Some(size) = reading else {
                    return;
                };
                // A zero width would drop the widget back to its bootstrap render.
                if !self.accept(size) || size.is_unmeasured() || size == self.state.size {
                    return;
                }

                self.state = self.state.measured(size);
                self.width.set_target(size.width);
                debug!(width = size.width, height = size.height, "text loop resized");
            }
            Phase::Created | Phase::Unmounted => {}
        }
    }

    fn accept(&self, size: Size) -> bool {
        if size.is_valid() {
            return true;
        }
        warn!(width = size.width, height = size.height, "rejected measurement");
        false
    }
}

fn text_box(entry: InterpolatedStyle<RenderNode>) -> RenderNode {
    let style = BoxStyle::new()
        .white_space(WhiteSpace::Nowrap)
        .display(Display::InlineBlock)
        .position(Position::Absolute)
        .left(0.0)
        .top(0.0)
        .opacity(entry.style.get(OPACITY).unwrap_or(1.0))
        .translate_y(entry.style.get(TRANSLATE).unwrap_or(0.0));

    RenderNode::div().key(entry.key).style(style).child(entry.data)
}

impl<M: MotionEngine<RenderNode>> Widget for TextLoop<M> {
    fn mount(&mut self, measurer: &dyn Measurer) -> Result<()> {
        TextLoop::<M>::mount(self, measurer)
    }

    fn unmount(&mut self) {
        TextLoop::<M>::unmount(self)
    }

    fn update(&mut self, dt_ms: u64) -> bool {
        let was_animating = self.is_animating();
        let fired = self.advance(dt_ms);
        fired > 0 || was_animating || self.is_animating()
    }

    fn render(&self) -> RenderNode {
        TextLoop::<M>::render(self)
    }

    fn measure(&mut self, measurer: &dyn Measurer) {
        TextLoop::<M>::measure(self, measurer)
    }

    fn needs_measure(&self) -> bool {
        self.phase() == Phase::Measuring
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::MonospaceMeasurer;

    fn measurer() -> MonospaceMeasurer {
        MonospaceMeasurer::new(10.0, 20.0)
    }

    fn abc(interval_ms: u64) -> TextLoop {
        TextLoop::new(["Alpha", "Beta", "Gamma"], TextLoopConfig::new().interval_ms(interval_ms))
            .unwrap()
    }

    #[test]
    fn test_empty_items_rejected() {
        let err = TextLoop::new(Vec::<&str>::new(), TextLoopConfig::default()).err();
        assert_eq!(err, Some(TextLoopError::EmptyItems));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = TextLoop::new(["a"], TextLoopConfig::new().interval_ms(0)).err();
        assert_eq!(err, Some(TextLoopError::InvalidInterval(0)));
    }

    #[test]
    fn test_created_state() {
        let text_loop = abc(100);
        assert_eq!(text_loop.phase(), Phase::Created);
        assert_eq!(text_loop.current_index(), 0);
        assert_eq!(text_loop.generation(), 0);
        assert_eq!(text_loop.size(), Size::ZERO);
        assert!(!text_loop.is_mounted());
    }

    #[test]
    fn test_mount_twice_rejected() {
        let mut text_loop = abc(100);
        text_loop.mount(&measurer()).unwrap();
        assert_eq!(
            text_loop.mount(&measurer()),
            Err(TextLoopError::AlreadyMounted("running"))
        );

        text_loop.unmount();
        assert_eq!(
            text_loop.mount(&measurer()),
            Err(TextLoopError::AlreadyMounted("unmounted"))
        );
    }

    #[test]
    fn test_bootstrap_render_is_bare_first_item() {
        let text_loop = abc(100);
        let tree = text_loop.render();

        assert_eq!(tree, RenderNode::span().child("Alpha"));
        assert_eq!(tree.to_markup(), "<span>Alpha</span>");
    }

    #[test]
    fn test_steady_render_structure() {
        let mut text_loop = abc(100);
        text_loop.mount(&measurer()).unwrap();
        let tree = text_loop.render();

        assert_eq!(
            tree.style.to_css(),
            "display: inline-block; position: relative; vertical-align: top; height: 20px"
        );
        let sizing = &tree.children[0];
        assert_eq!(
            sizing.style.to_css(),
            "width: 50px; height: 20px; transition: width 150ms linear"
        );
        let text = &sizing.children[0];
        assert_eq!(text.key.as_deref(), Some("step0"));
        assert_eq!(
            text.style.to_css(),
            "display: inline-block; position: absolute; white-space: nowrap; left: 0px; \
             top: 0px; opacity: 1; transform: translateY(0px)"
        );
        assert_eq!(text.text_content(), "Alpha");
    }

    #[test]
    fn test_caller_style_cannot_override_layout() {
        let style = BoxStyle::new()
            .color("#222")
            .display(Display::Block)
            .height(99.0);
        let config = TextLoopConfig::new().style(style);
        let mut text_loop = TextLoop::new(["Alpha", "Beta"], config).unwrap();
        text_loop.mount(&measurer()).unwrap();

        let outer = text_loop.render().style;
        assert_eq!(outer.display, Some(Display::InlineBlock));
        assert_eq!(outer.height, Some(20.0));
        assert_eq!(outer.color.as_deref(), Some("#222"));
    }

    #[test]
    fn test_free_form_declarations_cannot_override_layout() {
        let style = BoxStyle::new()
            .set("vertical-align", "middle")
            .set("display", "block")
            .set("height", "99px")
            .set("cursor", "pointer");
        let config = TextLoopConfig::new().style(style);
        let mut text_loop = TextLoop::new(["Alpha", "Beta"], config).unwrap();
        text_loop.mount(&measurer()).unwrap();

        let css = text_loop.render().style.to_css();
        assert_eq!(
            css,
            "display: inline-block; position: relative; vertical-align: top; \
             height: 20px; cursor: pointer"
        );
    }

    #[test]
    fn test_missing_measurement_keeps_bootstrapping() {
        let detached = |_: &RenderNode| -> Option<Size> { None };
        let mut text_loop = abc(100);
        text_loop.mount(&detached).unwrap();

        assert_eq!(text_loop.phase(), Phase::Measuring);
        assert_eq!(text_loop.render().to_markup(), "<span>Alpha</span>");

        text_loop.measure(&measurer());
        assert_eq!(text_loop.phase(), Phase::Running);
        assert_eq!(text_loop.size(), Size::new(50.0, 20.0));
    }

    #[test]
    fn test_invalid_measurement_ignored() {
        let broken = |_: &RenderNode| Some(Size::new(f32::NAN, 10.0));
        let mut text_loop = abc(100);
        text_loop.mount(&measurer()).unwrap();

        text_loop.measure(&broken);
        assert_eq!(text_loop.size(), Size::new(50.0, 20.0));
    }

    #[test]
    fn test_known_initial_size_skips_bootstrap() {
        let detached = |_: &RenderNode| -> Option<Size> { None };
        let config = TextLoopConfig::new().initial_size(80.0, 24.0);
        let mut text_loop = TextLoop::new(["Alpha", "Beta"], config).unwrap();

        assert_eq!(text_loop.render().children[0].children.len(), 1);

        text_loop.mount(&detached).unwrap();
        assert_eq!(text_loop.phase(), Phase::Running);
        assert_eq!(text_loop.size(), Size::new(80.0, 24.0));
    }

    #[test]
    fn test_width_eases_to_new_measurement() {
        let mut text_loop = abc(1000);
        text_loop.mount(&measurer()).unwrap();
        assert_eq!(text_loop.displayed_width(), 50.0);

        text_loop.advance(1000);
        text_loop.measure(&measurer());
        assert_eq!(text_loop.size().width, 40.0);
        assert_eq!(text_loop.displayed_width(), 50.0);

        text_loop.advance(75);
        assert!((text_loop.displayed_width() - 45.0).abs() < 1e-3);

        text_loop.advance(75);
        assert_eq!(text_loop.displayed_width(), 40.0);
    }

    #[test]
    fn test_set_items_clamps_index() {
        let mut text_loop = abc(100);
        text_loop.mount(&measurer()).unwrap();
        text_loop.advance(200);
        assert_eq!(text_loop.current_index(), 2);

        text_loop.set_items(["One", "Two"]).unwrap();
        assert_eq!(text_loop.current_index(), 0);
        assert_eq!(text_loop.current_text(), "One");

        assert_eq!(text_loop.set_items(Vec::<&str>::new()), Err(TextLoopError::EmptyItems));
        assert_eq!(text_loop.items().len(), 2);
    }

    #[test]
    fn test_set_items_to_single_stops_timer() {
        let mut text_loop = abc(100);
        text_loop.mount(&measurer()).unwrap();

        text_loop.set_items(["Only"]).unwrap();
        assert_eq!(text_loop.advance(1000), 0);

        text_loop.set_items(["One", "Two"]).unwrap();
        assert_eq!(text_loop.advance(100), 1);
    }

    #[test]
    fn test_update_reports_changes() {
        let mut text_loop = abc(100);
        Widget::mount(&mut text_loop, &measurer()).unwrap();

        assert!(!Widget::update(&mut text_loop, 50));
        assert!(Widget::update(&mut text_loop, 50));
        for _ in 0..100 {
            Widget::update(&mut text_loop, 1);
        }
        assert!(text_loop.is_animating());
    }
}
