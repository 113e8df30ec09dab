//! Paginated document renderer (PDF).
//!
//! Two stages:
//! 1. [`compose`] lays sections out into per-page display lists, tracking the
//!    vertical cursor and breaking pages between units.
//! 2. A [`PdfBackend`] encodes those display lists into a PDF file.
//!
//! [`render_pdf`] wraps both and guarantees a document: if the structured path
//! fails anywhere, the raw text is re-laid out by [`compose::compose_plain`] and
//! encoded with the default [`LopdfBackend`].

pub mod backend;
pub mod compose;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::layout::font_metrics::FontFace;
use crate::layout::page::{default_page_geometry, PageGeometry};
use crate::render::segment::{segment, Section};
use crate::render::{first_content_line, split_lines, RenderError};

pub use backend::{LopdfBackend, PdfBackend};

// ────────────────────────────────────────────────────────────────────────────
// Display list
// ────────────────────────────────────────────────────────────────────────────

/// 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const PRIMARY: Rgb = Rgb(41, 98, 255);
pub const SECONDARY: Rgb = Rgb(100, 100, 100);
pub const TEXT: Rgb = Rgb(50, 50, 50);
pub const LIGHT: Rgb = Rgb(150, 150, 150);
pub const WATERMARK_GRAY: Rgb = Rgb(200, 200, 200);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub face: FontFace,
    pub size_pt: f32,
    pub color: Rgb,
}

/// One drawing instruction. Coordinates are millimetres from the top-left corner;
/// `y` of a text op is its baseline.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        x: f32,
        y: f32,
        text: String,
        style: TextStyle,
    },
    /// Horizontal rule.
    Rule {
        x1: f32,
        x2: f32,
        y: f32,
        width_mm: f32,
        color: Rgb,
    },
    /// Filled circle used as the bullet glyph.
    Dot {
        cx: f32,
        cy: f32,
        radius_mm: f32,
        color: Rgb,
    },
    /// Large translucent label centred on the page and rotated 45°.
    Watermark {
        text: String,
        size_pt: f32,
        color: Rgb,
        opacity: f32,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageContent {
    pub ops: Vec<DrawOp>,
}

#[cfg(test)]
impl PageContent {
    /// Concatenated text of every text op, in drawing order.
    pub fn text_runs(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Fully laid-out document, ready for a backend.
#[derive(Debug, Clone)]
pub struct LaidOutDocument {
    pub title: String,
    pub geometry: PageGeometry,
    pub pages: Vec<PageContent>,
}

// ────────────────────────────────────────────────────────────────────────────
// Options and entry points
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct PdfOptions {
    pub watermark: bool,
    /// Document title written to the PDF metadata.
    pub title: String,
    pub geometry: PageGeometry,
}

impl Default for PdfOptions {
    fn default() -> Self {
        Self {
            watermark: false,
            title: "Resume".to_string(),
            geometry: default_page_geometry(),
        }
    }
}

impl PdfOptions {
    /// Options for `text`: the metadata title is `<first line> Resume`.
    pub fn for_text(text: &str, watermark: bool, geometry: PageGeometry) -> Self {
        let title = match first_content_line(text) {
            Some(name) => format!("{name} Resume"),
            None => "Resume".to_string(),
        };
        Self {
            watermark,
            title,
            geometry,
        }
    }
}

/// Structured rendering of segmented sections with the default backend.
pub fn render_paginated(sections: &[Section], options: &PdfOptions) -> Result<Vec<u8>, RenderError> {
    render_paginated_with(sections, options, &LopdfBackend)
}

/// Structured rendering of segmented sections through `backend`.
pub fn render_paginated_with(
    sections: &[Section],
    options: &PdfOptions,
    backend: &dyn PdfBackend,
) -> Result<Vec<u8>, RenderError> {
    let pages = compose::compose_sections(sections, &options.geometry, options.watermark)?;
    debug!(
        sections = sections.len(),
        pages = pages.len(),
        "Composed structured PDF layout"
    );
    backend.encode(&LaidOutDocument {
        title: options.title.clone(),
        geometry: options.geometry,
        pages,
    })
}

/// Minimal rendering: the raw text wrapped in one style, paginated on overflow.
///
/// Always uses the default A4 geometry so that it cannot fail on bad options.
pub fn render_plain(text: &str, options: &PdfOptions) -> Result<Vec<u8>, RenderError> {
    let geometry = default_page_geometry();
    let pages = compose::compose_plain(text, &geometry, options.watermark);
    LopdfBackend.encode(&LaidOutDocument {
        title: options.title.clone(),
        geometry,
        pages,
    })
}

/// Text → PDF with the structured layout, falling back to [`render_plain`].
pub fn render_pdf(text: &str, options: &PdfOptions) -> Result<Vec<u8>, RenderError> {
    let sections = segment(&split_lines(text));
    or_plain(render_paginated(&sections, options), text, options)
}

fn or_plain(
    structured: Result<Vec<u8>, RenderError>,
    text: &str,
    options: &PdfOptions,
) -> Result<Vec<u8>, RenderError> {
    structured.or_else(|e| {
        warn!(error = %e, "Structured PDF rendering failed, falling back to plain layout");
        render_plain(text, options)
    })
}

#[cfg(test)]
pub(crate) mod test_support {
    use lopdf::Document;

    /// Decoded content stream of every page, in page order.
    pub fn page_contents(bytes: &[u8]) -> Vec<String> {
        let doc = Document::load_mem(bytes).expect("output should parse as PDF");
        doc.get_pages()
            .values()
            .map(|id| {
                let content = doc.get_page_content(*id).expect("page content");
                String::from_utf8_lossy(&content).into_owned()
            })
            .collect()
    }
}
