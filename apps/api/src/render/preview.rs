//! Preview renderer: one themed node per input line for the on-screen surface.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::render::classify::{classify, strip_bullet_marker, LineRole};
use crate::render::split_lines;

// ────────────────────────────────────────────────────────────────────────────
// Themes
// ────────────────────────────────────────────────────────────────────────────

/// Preview colour scheme chosen in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Modern,
    Classic,
    Professional,
    Minimal,
    Creative,
}

impl Theme {
    pub const ALL: [Theme; 5] = [
        Theme::Modern,
        Theme::Classic,
        Theme::Professional,
        Theme::Minimal,
        Theme::Creative,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Modern => "modern",
            Theme::Classic => "classic",
            Theme::Professional => "professional",
            Theme::Minimal => "minimal",
            Theme::Creative => "creative",
        }
    }

    /// Style classes for this theme.
    pub fn palette(&self) -> &'static ThemePalette {
        match self {
            Theme::Modern => &MODERN,
            Theme::Classic => &CLASSIC,
            Theme::Professional => &PROFESSIONAL,
            Theme::Minimal => &MINIMAL,
            Theme::Creative => &CREATIVE,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Theme::ALL
            .into_iter()
            .find(|theme| theme.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown theme '{s}'"))
    }
}

/// Per-theme presentation: surface colours, heading treatments, bullet glyph.
#[derive(Debug, Clone, Serialize)]
pub struct ThemePalette {
    pub surface_class: &'static str,
    pub header_class: &'static str,
    pub subheader_class: &'static str,
    pub bullet_class: &'static str,
    pub bullet_glyph: &'static str,
}

static MODERN: ThemePalette = ThemePalette {
    surface_class: "bg-white dark:bg-gray-900 text-gray-800 dark:text-gray-100",
    header_class: "font-bold text-lg text-blue-600 dark:text-blue-400 mt-6 mb-3 pb-1 border-b border-blue-300 dark:border-blue-700",
    subheader_class: "font-semibold text-md text-gray-700 dark:text-gray-300 mt-4 mb-2",
    bullet_class: "ml-5 mb-2 text-blue-500",
    bullet_glyph: "•",
};

static CLASSIC: ThemePalette = ThemePalette {
    surface_class: "bg-slate-50 dark:bg-slate-900 text-slate-800 dark:text-slate-100",
    header_class: "font-bold text-lg text-slate-800 dark:text-slate-200 mt-6 mb-3 pb-1 border-b-2 border-slate-300 dark:border-slate-700",
    subheader_class: "font-semibold text-md text-slate-700 dark:text-slate-300 mt-4 mb-2",
    bullet_class: "ml-5 mb-2 text-slate-500",
    bullet_glyph: "•",
};

static PROFESSIONAL: ThemePalette = ThemePalette {
    surface_class: "bg-blue-50 dark:bg-blue-950 text-blue-900 dark:text-blue-100",
    header_class: "font-bold text-lg text-blue-800 dark:text-blue-300 mt-6 mb-3 pb-1 border-b border-blue-400 dark:border-blue-600",
    subheader_class: "font-semibold text-md text-blue-700 dark:text-blue-300 mt-4 mb-2",
    bullet_class: "ml-5 mb-2 text-blue-600",
    bullet_glyph: "•",
};

static MINIMAL: ThemePalette = ThemePalette {
    surface_class: "bg-gray-50 dark:bg-gray-950 text-gray-800 dark:text-gray-100",
    header_class: "font-bold text-lg text-gray-900 dark:text-gray-100 mt-6 mb-3",
    subheader_class: "font-semibold text-md text-gray-800 dark:text-gray-200 mt-4 mb-2",
    bullet_class: "ml-5 mb-2 text-gray-500",
    bullet_glyph: "–",
};

static CREATIVE: ThemePalette = ThemePalette {
    surface_class: "bg-purple-50 dark:bg-purple-950 text-purple-900 dark:text-purple-100",
    header_class: "font-bold text-lg text-purple-700 dark:text-purple-300 mt-6 mb-3 pb-1 border-b border-purple-300 dark:border-purple-700",
    subheader_class: "font-semibold text-md text-purple-600 dark:text-purple-400 mt-4 mb-2",
    bullet_class: "ml-5 mb-2 text-purple-500",
    bullet_glyph: "★",
};

const PARAGRAPH_CLASS: &str = "mb-2";
const SPACER_CLASS: &str = "h-2";

// ────────────────────────────────────────────────────────────────────────────
// Nodes
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Header,
    SubHeader,
    Bullet,
    Paragraph,
    Spacer,
}

/// One styled unit of the preview. Index in the output equals the source line number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderNode {
    pub kind: NodeKind,
    pub text: String,
    pub style_class: String,
    /// Glyph drawn before bullet text; `None` for every other kind.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<String>,
}

/// Renders every line independently. Output length always equals `lines.len()`.
pub fn render_preview<S: AsRef<str>>(lines: &[S], theme: Theme) -> Vec<RenderNode> {
    let palette = theme.palette();
    lines
        .iter()
        .map(|line| render_line(line.as_ref(), palette))
        .collect()
}

/// Convenience over [`render_preview`] for a raw text block.
pub fn render_preview_nodes(text: &str, theme: Theme) -> Vec<RenderNode> {
    render_preview(&split_lines(text), theme)
}

fn render_line(line: &str, palette: &ThemePalette) -> RenderNode {
    let (kind, text, style_class, marker) = match classify(line) {
        LineRole::SectionHeader => (NodeKind::Header, line.trim(), palette.header_class, None),
        LineRole::SubHeader => (
            NodeKind::SubHeader,
            line.trim(),
            palette.subheader_class,
            None,
        ),
        LineRole::Bullet => (
            NodeKind::Bullet,
            strip_bullet_marker(line),
            palette.bullet_class,
            Some(palette.bullet_glyph),
        ),
        LineRole::Paragraph => (NodeKind::Paragraph, line.trim(), PARAGRAPH_CLASS, None),
        LineRole::Blank => (NodeKind::Spacer, "", SPACER_CLASS, None),
    };

    RenderNode {
        kind,
        text: text.to_string(),
        style_class: style_class.to_string(),
        marker: marker.map(str::to_string),
    }
}
