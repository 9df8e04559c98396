//! Inline box styling
//!
//! `BoxStyle` is the styling helper behind every node the widgets render.
//! All properties are optional: merging two styles keeps the properties of
//! the first that the second leaves unset, so defaults and caller overrides
//! compose without either needing to know the other.
//!
//! # Example
//!
//! ```rust
//! use textloop_widgets::style::{BoxStyle, Display, Position};
//!
//! let caller = BoxStyle::new().color("#222").display(Display::Block);
//! let layout = BoxStyle::new().display(Display::InlineBlock).position(Position::Relative);
//!
//! let merged = caller.merge(&layout);
//! assert_eq!(
//!     merged.to_css(),
//!     "display: inline-block; position: relative; color: #222"
//! );
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use textloop_animation::Easing;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Display {
    Inline,
    InlineBlock,
    Block,
}

impl Display {
    pub fn css(&self) -> &'static str {
        match self {
            Display::Inline => "inline",
            Display::InlineBlock => "inline-block",
            Display::Block => "block",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    Static,
    Relative,
    Absolute,
}

impl Position {
    pub fn css(&self) -> &'static str {
        match self {
            Position::Static => "static",
            Position::Relative => "relative",
            Position::Absolute => "absolute",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VerticalAlign {
    Baseline,
    Top,
    Middle,
    Bottom,
}

impl VerticalAlign {
    pub fn css(&self) -> &'static str {
        match self {
            VerticalAlign::Baseline => "baseline",
            VerticalAlign::Top => "top",
            VerticalAlign::Middle => "middle",
            VerticalAlign::Bottom => "bottom",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WhiteSpace {
    Normal,
    Nowrap,
}

impl WhiteSpace {
    pub fn css(&self) -> &'static str {
        match self {
            WhiteSpace::Normal => "normal",
            WhiteSpace::Nowrap => "nowrap",
        }
    }
}

/// Visual properties for a rendered box
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<Display>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical_align: Option<VerticalAlign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub white_space: Option<WhiteSpace>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
    /// 0.0 = transparent, 1.0 = opaque
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f32>,
    /// Vertical translation in pixels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translate_y: Option<f32>,
    /// CSS transition shorthand
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
    /// Any other declarations, emitted verbatim after the typed ones.
    /// Config files may give these as strings, numbers or booleans.
    #[serde(
        flatten,
        skip_serializing_if = "IndexMap::is_empty",
        deserialize_with = "scalar_declarations"
    )]
    pub extra: IndexMap<String, String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

fn scalar_declarations<'de, D>(deserializer: D) -> Result<IndexMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = IndexMap::<String, Scalar>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|(property, value)| {
            let value = match value {
                Scalar::Text(s) => s,
                Scalar::Int(n) => n.to_string(),
                Scalar::Float(n) => n.to_string(),
                Scalar::Bool(b) => b.to_string(),
            };
            (property, value)
        })
        .collect())
}

/// CSS name of a declaration key (`font_size` and `font-size` are the same)
fn css_name(property: &str) -> String {
    property.replace('_', "-").to_ascii_lowercase()
}

impl BoxStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn display(mut self, display: Display) -> Self {
        self.display = Some(display);
        self
    }

    pub fn position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn vertical_align(mut self, align: VerticalAlign) -> Self {
        self.vertical_align = Some(align);
        self
    }

    pub fn white_space(mut self, white_space: WhiteSpace) -> Self {
        self.white_space = Some(white_space);
        self
    }

    pub fn left(mut self, px: f32) -> Self {
        self.left = Some(px);
        self
    }

    pub fn top(mut self, px: f32) -> Self {
        self.top = Some(px);
        self
    }

    pub fn width(mut self, px: f32) -> Self {
        self.width = Some(px);
        self
    }

    pub fn height(mut self, px: f32) -> Self {
        self.height = Some(px);
        self
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = Some(opacity);
        self
    }

    pub fn translate_y(mut self, px: f32) -> Self {
        self.translate_y = Some(px);
        self
    }

    /// Time-based transition of one property, e.g. `width 150ms linear`
    pub fn transition(mut self, property: &str, duration_ms: u32, easing: Easing) -> Self {
        self.transition = Some(format!("{property} {duration_ms}ms {}", easing.css()));
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn background(mut self, background: impl Into<String>) -> Self {
        self.background = Some(background.into());
        self
    }

    pub fn font_size(mut self, px: f32) -> Self {
        self.font_size = Some(px);
        self
    }

    /// Set an arbitrary declaration
    pub fn set(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(property.into(), value.into());
        self
    }

    /// Merge another style on top of this one; properties set in `other` win.
    ///
    /// A typed property set in `other` also drops any free-form declaration
    /// of the same CSS property from `self`, so it cannot be shadowed later
    /// in the emitted CSS.
    pub fn merge(&self, other: &BoxStyle) -> BoxStyle {
        let owned = other.typed_css_names();
        let mut extra: IndexMap<String, String> = self
            .extra
            .iter()
            .filter(|(property, _)| !owned.contains(&css_name(property).as_str()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        extra.extend(other.extra.iter().map(|(k, v)| (k.clone(), v.clone())));

        BoxStyle {
            display: other.display.or(self.display),
            position: other.position.or(self.position),
            vertical_align: other.vertical_align.or(self.vertical_align),
            white_space: other.white_space.or(self.white_space),
            left: other.left.or(self.left),
            top: other.top.or(self.top),
            width: other.width.or(self.width),
            height: other.height.or(self.height),
            opacity: other.opacity.or(self.opacity),
            translate_y: other.translate_y.or(self.translate_y),
            transition: other.transition.clone().or_else(|| self.transition.clone()),
            color: other.color.clone().or_else(|| self.color.clone()),
            background: other.background.clone().or_else(|| self.background.clone()),
            font_size: other.font_size.or(self.font_size),
            extra,
        }
    }

    /// CSS names of the typed properties this style sets
    fn typed_css_names(&self) -> Vec<&'static str> {
        [
            ("display", self.display.is_some()),
            ("position", self.position.is_some()),
            ("vertical-align", self.vertical_align.is_some()),
            ("white-space", self.white_space.is_some()),
            ("left", self.left.is_some()),
            ("top", self.top.is_some()),
            ("width", self.width.is_some()),
            ("height", self.height.is_some()),
            ("opacity", self.opacity.is_some()),
            ("transform", self.translate_y.is_some()),
            ("transition", self.transition.is_some()),
            ("color", self.color.is_some()),
            ("background", self.background.is_some()),
            ("font-size", self.font_size.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, set)| set.then_some(name))
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        *self == BoxStyle::default()
    }

    /// Render as inline CSS declarations
    pub fn to_css(&self) -> String {
        let mut decls: Vec<String> = Vec::new();

        if let Some(v) = self.display {
            decls.push(format!("display: {}", v.css()));
        }
        if let Some(v) = self.position {
            decls.push(format!("position: {}", v.css()));
        }
        if let Some(v) = self.vertical_align {
            decls.push(format!("vertical-align: {}", v.css()));
        }
        if let Some(v) = self.white_space {
            decls.push(format!("white-space: {}", v.css()));
        }
        if let Some(v) = self.left {
            decls.push(format!("left: {v}px"));
        }
        if let Some(v) = self.top {
            decls.push(format!("top: {v}px"));
        }
        if let Some(v) = self.width {
            decls.push(format!("width: {v}px"));
        }
        if let Some(v) = self.height {
            decls.push(format!("height: {v}px"));
        }
        if let Some(v) = self.opacity {
            decls.push(format!("opacity: {v}"));
        }
        if let Some(v) = self.translate_y {
            decls.push(format!("transform: translateY({v}px)"));
        }
        if let Some(v) = &self.transition {
            decls.push(format!("transition: {v}"));
        }
        if let Some(v) = &self.color {
            decls.push(format!("color: {v}"));
        }
        if let Some(v) = &self.background {
            decls.push(format!("background: {v}"));
        }
        if let Some(v) = self.font_size {
            decls.push(format!("font-size: {v}px"));
        }
        for (property, value) in &self.extra {
            decls.push(format!("{}: {value}", css_name(property)));
        }

        decls.join("; ")
    }
}
