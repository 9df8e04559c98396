//! Integration tests for the TextLoop widget
//!
//! These tests drive the widget the way a host does (advance, render,
//! measure) and check:
//! - the tick reducer cycles index and generation
//! - bootstrap rendering until the first measurement
//! - enter and leave offsets follow the measured height
//! - unmount stops all state changes
//! - instances do not share state

use std::cell::RefCell;

use textloop_animation::{
    InterpolatedStyle, MotionEngine, MotionStyle, PlainStyle, StyleValue, TransitionMotion,
    TransitionStyle, WillEnter, WillLeave,
};
use textloop_core::Size;
use textloop_widgets::{
    MonospaceMeasurer, Phase, RenderNode, TextLoop, TextLoopConfig, WidgetHost, WidgetId,
    GENERATION_WRAP,
};

/// Spring engine that records every enter and leave it is asked for
#[derive(Default)]
struct RecordingMotion {
    inner: TransitionMotion<RenderNode>,
    entered: Vec<(String, PlainStyle)>,
    left: Vec<(String, MotionStyle)>,
}

impl MotionEngine<RenderNode> for RecordingMotion {
    fn set_styles(
        &mut self,
        styles: Vec<TransitionStyle<RenderNode>>,
        will_enter: WillEnter<'_, RenderNode>,
        will_leave: WillLeave<'_, RenderNode>,
    ) {
        let entered = RefCell::new(Vec::new());
        let left = RefCell::new(Vec::new());

        self.inner.set_styles(
            styles,
            &|s| {
                let start = will_enter(s);
                entered.borrow_mut().push((s.key.clone(), start.clone()));
                start
            },
            &|s| {
                let leave = will_leave(s);
                if let Some(style) = &leave {
                    left.borrow_mut().push((s.key.clone(), style.clone()));
                }
                leave
            },
        );

        self.entered.extend(entered.into_inner());
        self.left.extend(left.into_inner());
    }

    fn step(&mut self, dt: f32) {
        self.inner.step(dt)
    }

    fn interpolated(&self) -> Vec<InterpolatedStyle<RenderNode>> {
        self.inner.interpolated()
    }

    fn is_animating(&self) -> bool {
        self.inner.is_animating()
    }
}

fn fixed(width: f32, height: f32) -> impl Fn(&RenderNode) -> Option<Size> {
    move |_: &RenderNode| Some(Size::new(width, height))
}

fn detached(_: &RenderNode) -> Option<Size> {
    None
}

fn config(interval_ms: u64) -> TextLoopConfig {
    TextLoopConfig::new().interval_ms(interval_ms)
}

/// Keys and text of every text box in a steady render
fn boxes(tree: &RenderNode) -> Vec<(String, String)> {
    tree.children[0]
        .children
        .iter()
        .map(|b| (b.key.clone().unwrap_or_default(), b.text_content()))
        .collect()
}

/// Text of the newest box a host rendered for `id`
fn shown(host: &WidgetHost<MonospaceMeasurer>, id: WidgetId) -> Option<String> {
    let tree = host.render(id)?;
    boxes(tree).pop().map(|(_, text)| text)
}

#[test]
fn test_n_ticks_return_to_start() {
    for n in 1..=5usize {
        let items: Vec<String> = (0..n).map(|i| format!("item{i}")).collect();
        let mut text_loop = TextLoop::new(items, config(100)).unwrap();
        text_loop.mount(&MonospaceMeasurer::default()).unwrap();

        text_loop.advance(100 * n as u64);
        assert_eq!(text_loop.current_index(), 0, "n = {n}");
    }
}

#[test]
fn test_generation_wraps() {
    let mut text_loop = TextLoop::new(["a", "b", "c"], config(10)).unwrap();
    text_loop.mount(&MonospaceMeasurer::default()).unwrap();

    let ticks = text_loop.advance(10 * GENERATION_WRAP as u64);
    assert_eq!(ticks, 1000);
    assert_eq!(text_loop.generation(), 0);
    assert_eq!(text_loop.current_index(), 1000 % 3);
    assert_eq!(text_loop.state().key(), "step0");
}

#[test]
fn test_single_item_never_transitions() {
    let mut text_loop = TextLoop::new(["Solo"], config(100)).unwrap();
    text_loop.mount(&MonospaceMeasurer::default()).unwrap();
    let first = text_loop.render();

    assert_eq!(text_loop.advance(10_000), 0);
    assert_eq!(text_loop.current_text(), "Solo");
    assert_eq!(text_loop.generation(), 0);
    assert!(!text_loop.is_animating());
    assert_eq!(text_loop.render(), first);
    assert_eq!(boxes(&first), vec![("step0".to_string(), "Solo".to_string())]);
}

#[test]
fn test_bootstrap_then_measured_size_sticks() {
    let mut text_loop = TextLoop::new(["Alpha", "Beta"], config(100)).unwrap();
    text_loop.mount(&detached).unwrap();

    assert_eq!(text_loop.phase(), Phase::Measuring);
    assert_eq!(text_loop.render().to_markup(), "<span>Alpha</span>");

    text_loop.measure(&fixed(120.0, 30.0));
    assert_eq!(text_loop.phase(), Phase::Running);

    for _ in 0..5 {
        text_loop.advance(70);
        text_loop.measure(&detached);
        let tree = text_loop.render();
        assert_eq!(tree.style.height, Some(30.0));
        assert_eq!(tree.children[0].style.width, Some(120.0));
        assert_eq!(tree.children[0].style.height, Some(30.0));
    }

    text_loop.measure(&fixed(60.0, 15.0));
    let tree = text_loop.render();
    assert_eq!(tree.style.height, Some(15.0));
    assert_eq!(tree.children[0].style.width, Some(60.0));
}

#[test]
fn test_first_steady_render_is_at_rest() {
    let mut text_loop = TextLoop::new(["Alpha", "Beta"], config(100)).unwrap();
    text_loop.mount(&MonospaceMeasurer::new(10.0, 20.0)).unwrap();

    assert!(!text_loop.is_animating());
    assert!(text_loop
        .render()
        .to_markup()
        .contains("opacity: 1; transform: translateY(0px)"));
}

#[test]
fn test_enter_and_leave_offsets_follow_height() {
    let mut text_loop =
        TextLoop::with_motion(["Alpha", "Beta", "Gamma"], config(100), RecordingMotion::default())
            .unwrap();
    text_loop.mount(&fixed(50.0, 24.0)).unwrap();

    text_loop.advance(100);
    let motion = text_loop.motion();
    let (key, start) = motion.entered.last().unwrap();
    assert_eq!(key, "step1");
    assert_eq!(start.get("opacity"), Some(0.0));
    assert_eq!(start.get("translate"), Some(24.0));

    let (key, leave) = &motion.left[0];
    assert_eq!(key, "step0");
    assert_eq!(leave.get("opacity").map(StyleValue::target), Some(0.0));
    assert_eq!(leave.get("translate").map(StyleValue::target), Some(-24.0));

    text_loop.measure(&fixed(70.0, 40.0));
    text_loop.advance(100);
    let motion = text_loop.motion();
    assert_eq!(motion.entered.last().unwrap().1.get("translate"), Some(40.0));
    assert_eq!(motion.left.len(), 2);
    assert_eq!(motion.left[1].0, "step1");
    assert_eq!(motion.left[1].1.get("translate").map(StyleValue::target), Some(-40.0));
}

#[test]
fn test_entering_box_starts_one_height_below() {
    let mut text_loop = TextLoop::new(["Alpha", "Beta"], config(100)).unwrap();
    text_loop.mount(&MonospaceMeasurer::new(10.0, 20.0)).unwrap();
    text_loop.advance(100);

    let tree = text_loop.render();
    let entering = tree.find_by_key("step1").unwrap();
    assert_eq!(entering.style.opacity, Some(0.0));
    assert_eq!(entering.style.translate_y, Some(20.0));

    let leaving = tree.find_by_key("step0").unwrap();
    assert_eq!(leaving.style.opacity, Some(1.0));
    assert_eq!(leaving.style.translate_y, Some(0.0));
    assert_eq!(
        boxes(&tree),
        vec![
            ("step0".to_string(), "Alpha".to_string()),
            ("step1".to_string(), "Beta".to_string()),
        ]
    );

    text_loop.advance(16);
    let tree = text_loop.render();
    assert!(tree.find_by_key("step0").unwrap().style.translate_y.unwrap() < 0.0);
    assert!(tree.find_by_key("step1").unwrap().style.translate_y.unwrap() < 20.0);
}

#[test]
fn test_alpha_beta_gamma_sequence() {
    let mut text_loop =
        TextLoop::with_motion(["Alpha", "Beta", "Gamma"], config(100), RecordingMotion::default())
            .unwrap();
    let measurer = MonospaceMeasurer::default();
    text_loop.mount(&measurer).unwrap();

    let mut seen = vec![text_loop.current_text()];
    for _ in 0..25 {
        text_loop.advance(10);
        text_loop.measure(&measurer);
        let text = text_loop.current_text();
        if seen.last() != Some(&text) {
            seen.push(text);
        }
    }

    assert_eq!(seen, vec!["Alpha", "Beta", "Gamma"]);
    assert_eq!(text_loop.tick_count(), 2);

    // One seed plus one enter and one leave per tick
    let motion = text_loop.motion();
    let entered: Vec<&str> = motion.entered.iter().map(|(k, _)| k.as_str()).collect();
    let left: Vec<&str> = motion.left.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(entered, vec!["step0", "step1", "step2"]);
    assert_eq!(left, vec!["step0", "step1"]);

    let tree = text_loop.render();
    let last = boxes(&tree).pop().unwrap();
    assert_eq!(last, ("step2".to_string(), "Gamma".to_string()));
}

#[test]
fn test_unmount_before_pending_tick() {
    let mut text_loop = TextLoop::new(["Alpha", "Beta"], config(100)).unwrap();
    let measurer = MonospaceMeasurer::new(10.0, 20.0);
    text_loop.mount(&measurer).unwrap();

    text_loop.advance(90);
    text_loop.unmount();
    let state = text_loop.state();

    assert_eq!(text_loop.advance(1000), 0);
    text_loop.measure(&fixed(300.0, 300.0));

    assert_eq!(text_loop.phase(), Phase::Unmounted);
    assert_eq!(text_loop.state(), state);
    assert_eq!(text_loop.tick_count(), 0);
    assert_eq!(text_loop.current_text(), "Alpha");
}

#[test]
fn test_instances_are_independent() {
    let mut host = WidgetHost::new(MonospaceMeasurer::default());
    let fast = host
        .mount(Box::new(TextLoop::new(["a1", "a2", "a3"], config(50)).unwrap()))
        .unwrap();
    let slow = host
        .mount(Box::new(TextLoop::new(["b1", "b2"], config(200)).unwrap()))
        .unwrap();

    for _ in 0..10 {
        host.frame(10);
    }

    assert_eq!(shown(&host, fast), Some("a3".to_string()));
    assert_eq!(shown(&host, slow), Some("b1".to_string()));

    host.unmount(fast);
    for _ in 0..10 {
        host.frame(10);
    }
    assert_eq!(shown(&host, slow), Some("b2".to_string()));
}
