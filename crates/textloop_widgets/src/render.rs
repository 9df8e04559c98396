//! Render tree
//!
//! Widgets describe their output as a tree of `RenderNode`s with inline
//! styles. The tree is target-agnostic: it serialises to JSON for tooling
//! and to HTML-like markup for inspection or a DOM host.

use serde::Serialize;

use crate::style::BoxStyle;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tag {
    Div,
    Span,
    /// Bare text, no element of its own
    Text,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RenderNode {
    pub tag: Tag,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "BoxStyle::is_empty")]
    pub style: BoxStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RenderNode>,
}

impl RenderNode {
    fn element(tag: Tag) -> Self {
        Self {
            tag,
            key: None,
            style: BoxStyle::default(),
            text: None,
            children: Vec::new(),
        }
    }

    pub fn div() -> Self {
        Self::element(Tag::Div)
    }

    pub fn span() -> Self {
        Self::element(Tag::Span)
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self {
            text: Some(content.into()),
            ..Self::element(Tag::Text)
        }
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn style(mut self, style: BoxStyle) -> Self {
        self.style = style;
        self
    }

    pub fn child(mut self, child: impl Into<RenderNode>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children<I, C>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<RenderNode>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    /// All text in this subtree, in document order
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        if let Some(text) = &self.text {
            out.push_str(text);
        }
        for child in &self.children {
            child.collect_text(out);
        }
    }

    /// Depth-first search for a keyed node
    pub fn find_by_key(&self, key: &str) -> Option<&RenderNode> {
        if self.key.as_deref() == Some(key) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_by_key(key))
    }

    /// HTML-like markup with inline styles
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        self.write_markup(&mut out);
        out
    }

    fn write_markup(&self, out: &mut String) {
        let name = match self.tag {
            Tag::Div => "div",
            Tag::Span => "span",
            Tag::Text => {
                if let Some(text) = &self.text {
                    out.push_str(&escape(text));
                }
                return;
            }
        };

        out.push('<');
        out.push_str(name);
        if let Some(key) = &self.key {
            out.push_str(&format!(" data-key=\"{}\"", escape(key)));
        }
        if !self.style.is_empty() {
            out.push_str(&format!(" style=\"{}\"", escape(&self.style.to_css())));
        }
        out.push('>');

        if let Some(text) = &self.text {
            out.push_str(&escape(text));
        }
        for child in &self.children {
            child.write_markup(out);
        }

        out.push_str("</");
        out.push_str(name);
        out.push('>');
    }
}

impl From<&str> for RenderNode {
    fn from(text: &str) -> Self {
        RenderNode::text(text)
    }
}

impl From<String> for RenderNode {
    fn from(text: String) -> Self {
        RenderNode::text(text)
    }
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
