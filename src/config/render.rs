//! Render output options

use serde::Deserialize;

/// Line-break form written into rendered output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineBreak {
    /// Keep line endings as authored
    #[default]
    Newline,
    /// Emit `<br>` for an HTML preview surface
    Html,
}

impl LineBreak {
    pub fn as_str(self) -> &'static str {
        match self {
            LineBreak::Newline => "\n",
            LineBreak::Html => "<br>",
        }
    }
}

/// Options applied after a template is evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct RenderOptions {
    #[serde(default)]
    pub line_break: LineBreak,
}

impl RenderOptions {
    pub fn html() -> Self {
        Self {
            line_break: LineBreak::Html,
        }
    }
}
