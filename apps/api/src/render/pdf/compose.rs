//! Layout of sections into page display lists.
//!
//! Every drawable unit goes through [`PageComposer::reserve`], which consults the
//! shared [`LayoutCursor`] before anything is placed. Units are single wrapped
//! lines (or a title with its rule), so no unit ever straddles a page break.

use crate::layout::font_metrics::{get_metrics, FontFace};
use crate::layout::page::{LayoutCursor, PageGeometry};
use crate::render::classify::{has_bullet_marker, strip_bullet_marker};
use crate::render::pdf::{
    DrawOp, PageContent, Rgb, TextStyle, LIGHT, PRIMARY, SECONDARY, TEXT, WATERMARK_GRAY,
};
use crate::render::segment::Section;
use crate::render::{split_lines, RenderError, ATTRIBUTION, WATERMARK_TEXT};

// ────────────────────────────────────────────────────────────────────────────
// Vertical rhythm (mm)
// ────────────────────────────────────────────────────────────────────────────

const NAME_ADVANCE: f32 = 10.0;
const CONTACT_ADVANCE: f32 = 6.0;
const CONTACT_GAP: f32 = 5.0;
const DIVIDER_GAP: f32 = 10.0;
const TITLE_ADVANCE: f32 = 7.0;
const RULE_ADVANCE: f32 = 7.0;
const LINE_ADVANCE: f32 = 5.0;
const LABEL_ADVANCE: f32 = 6.0;
const PARAGRAPH_GAP: f32 = 1.0;
const BLANK_ADVANCE: f32 = 6.0;
const SECTION_GAP: f32 = 8.0;
const FOOTER_FROM_BOTTOM: f32 = 10.0;

const BULLET_INDENT: f32 = 5.0;
const BULLET_DOT_OFFSET_X: f32 = 1.5;
const BULLET_DOT_RAISE: f32 = 1.2;
const BULLET_DOT_RADIUS: f32 = 0.6;

/// A colon before this character index marks a `Label: value` line.
const LABEL_MAX_CHARS: usize = 30;

const WATERMARK_SIZE_PT: f32 = 60.0;
const WATERMARK_OPACITY: f32 = 0.3;

const NAME_STYLE: TextStyle = TextStyle {
    face: FontFace::HelveticaBold,
    size_pt: 24.0,
    color: PRIMARY,
};
const CONTACT_STYLE: TextStyle = TextStyle {
    face: FontFace::Helvetica,
    size_pt: 10.0,
    color: TEXT,
};
const TITLE_STYLE: TextStyle = TextStyle {
    face: FontFace::HelveticaBold,
    size_pt: 14.0,
    color: PRIMARY,
};
const BODY_STYLE: TextStyle = TextStyle {
    face: FontFace::Helvetica,
    size_pt: 10.0,
    color: TEXT,
};
const LABEL_STYLE: TextStyle = TextStyle {
    face: FontFace::HelveticaBold,
    size_pt: 10.0,
    color: TEXT,
};
const FOOTER_STYLE: TextStyle = TextStyle {
    face: FontFace::Helvetica,
    size_pt: 8.0,
    color: LIGHT,
};

// ────────────────────────────────────────────────────────────────────────────
// PageComposer
// ────────────────────────────────────────────────────────────────────────────

/// Display lists under construction plus the cursor that decides page breaks.
struct PageComposer {
    cursor: LayoutCursor,
    done: Vec<PageContent>,
    current: PageContent,
}

impl PageComposer {
    fn new(geometry: PageGeometry) -> Self {
        Self {
            cursor: LayoutCursor::new(geometry),
            done: Vec::new(),
            current: PageContent::default(),
        }
    }

    fn geometry(&self) -> PageGeometry {
        *self.cursor.geometry()
    }

    /// Makes room for a unit of `height`, breaking the page first if needed.
    /// Returns the baseline to draw the unit at.
    fn reserve(&mut self, height: f32) -> f32 {
        if self.cursor.ensure_room(height) {
            self.done.push(std::mem::take(&mut self.current));
        }
        self.cursor.y()
    }

    fn advance(&mut self, dy: f32) {
        self.cursor.advance(dy);
    }

    fn push(&mut self, op: DrawOp) {
        self.current.ops.push(op);
    }

    fn text(&mut self, x: f32, y: f32, text: &str, style: TextStyle) {
        self.push(DrawOp::Text {
            x,
            y,
            text: text.to_string(),
            style,
        });
    }

    fn text_centered(&mut self, y: f32, text: &str, style: TextStyle) {
        let width = get_metrics(style.face).width_mm(text, style.size_pt);
        let x = self.geometry().center_x() - width / 2.0;
        self.text(x, y, text, style);
    }

    fn rule(&mut self, y: f32, width_mm: f32, color: Rgb) {
        let g = self.geometry();
        self.push(DrawOp::Rule {
            x1: g.margin_left_mm,
            x2: g.width_mm - g.margin_right_mm,
            y,
            width_mm,
            color,
        });
    }

    fn finish(mut self) -> Vec<PageContent> {
        self.done.push(self.current);
        self.done
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Structured layout
// ────────────────────────────────────────────────────────────────────────────

/// Lays out segmented sections, then stamps watermark and footer on every page.
pub fn compose_sections(
    sections: &[Section],
    geometry: &PageGeometry,
    watermark: bool,
) -> Result<Vec<PageContent>, RenderError> {
    geometry.validate()?;

    let mut composer = PageComposer::new(*geometry);
    for section in sections {
        if section.is_identity_section {
            layout_identity(&mut composer, section);
        } else {
            layout_body(&mut composer, section);
        }
    }

    let mut pages = composer.finish();
    stamp_pages(&mut pages, geometry, watermark, true);
    Ok(pages)
}

fn layout_identity(c: &mut PageComposer, section: &Section) {
    let lines = identity_lines(section);
    let Some((name, contacts)) = lines.split_first() else {
        return;
    };
    let g = c.geometry();

    let y = c.reserve(NAME_ADVANCE);
    c.text_centered(y, name, NAME_STYLE);
    c.advance(NAME_ADVANCE);

    if !contacts.is_empty() {
        let joined = contacts.join(" | ");
        let metrics = get_metrics(CONTACT_STYLE.face);
        for line in metrics.wrap(&joined, CONTACT_STYLE.size_pt, g.content_width()) {
            let y = c.reserve(CONTACT_ADVANCE);
            c.text_centered(y, &line, CONTACT_STYLE);
            c.advance(CONTACT_ADVANCE);
        }
        c.advance(CONTACT_GAP);
    }

    let y = c.reserve(DIVIDER_GAP);
    c.rule(y, 0.5, PRIMARY);
    c.advance(DIVIDER_GAP);
}

/// Name first, then contact details, with `Label:` prefixes removed.
///
/// A real title (an all-caps name line) is the name; a `PERSONAL ...` title is
/// only a label. For an untitled block the first content line is the name.
fn identity_lines(section: &Section) -> Vec<String> {
    let title = section.title.trim();
    let title_is_name = !title.is_empty() && !title.contains("PERSONAL");

    title_is_name
        .then_some(title)
        .into_iter()
        .chain(section.content_lines.iter().map(String::as_str))
        .filter(|line| !line.trim().is_empty())
        .map(|line| strip_label(line).to_string())
        .filter(|line| !line.is_empty())
        .collect()
}

/// `Email: jane@x.com` → `jane@x.com`. Only a colon followed by whitespace counts,
/// so URLs survive intact.
fn strip_label(line: &str) -> &str {
    match line.find(": ") {
        Some(idx) if line[..idx].chars().count() < LABEL_MAX_CHARS => line[idx + 1..].trim(),
        _ => line.trim(),
    }
}

fn layout_body(c: &mut PageComposer, section: &Section) {
    let g = c.geometry();

    if !section.title.is_empty() {
        let y = c.reserve(TITLE_ADVANCE + RULE_ADVANCE);
        c.text(g.margin_left_mm, y, &section.title, TITLE_STYLE);
        c.advance(TITLE_ADVANCE);
        let y = c.cursor.y();
        c.rule(y, 0.3, SECONDARY);
        c.advance(RULE_ADVANCE);
    }

    for line in &section.content_lines {
        if line.trim().is_empty() {
            c.advance(BLANK_ADVANCE);
            continue;
        }
        if has_bullet_marker(line) {
            layout_bullet(c, strip_bullet_marker(line));
        } else if let Some((label, value)) = split_label(line) {
            layout_label_value(c, label, value);
        } else {
            layout_plain_line(c, line);
        }
    }

    c.advance(SECTION_GAP);
}

fn layout_bullet(c: &mut PageComposer, text: &str) {
    let g = c.geometry();
    let metrics = get_metrics(BODY_STYLE.face);
    let text_x = g.margin_left_mm + BULLET_INDENT;
    let lines = metrics.wrap(text, BODY_STYLE.size_pt, g.content_width() - BULLET_INDENT);

    for (i, line) in lines.iter().enumerate() {
        let y = c.reserve(LINE_ADVANCE);
        if i == 0 {
            c.push(DrawOp::Dot {
                cx: g.margin_left_mm + BULLET_DOT_OFFSET_X,
                cy: y - BULLET_DOT_RAISE,
                radius_mm: BULLET_DOT_RADIUS,
                color: PRIMARY,
            });
        }
        c.text(text_x, y, line, BODY_STYLE);
        c.advance(LINE_ADVANCE);
    }
}

/// Splits `Label: value` lines: a colon within the first 30 characters that is
/// not part of a `://` URL scheme.
fn split_label(line: &str) -> Option<(&str, &str)> {
    let idx = line.find(':')?;
    if line[..idx].chars().count() >= LABEL_MAX_CHARS || line[idx..].starts_with("://") {
        return None;
    }
    Some((line[..idx].trim_end(), line[idx + 1..].trim()))
}

fn layout_label_value(c: &mut PageComposer, label: &str, value: &str) {
    let g = c.geometry();
    let label_text = format!("{label}:");
    let label_width = get_metrics(LABEL_STYLE.face).width_mm(&format!("{label}: "), LABEL_STYLE.size_pt);
    let metrics = get_metrics(BODY_STYLE.face);

    let y = c.reserve(LABEL_ADVANCE);
    c.text(g.margin_left_mm, y, &label_text, LABEL_STYLE);

    if value.is_empty() {
        c.advance(LABEL_ADVANCE);
        return;
    }

    let inline = metrics.wrap(value, BODY_STYLE.size_pt, g.content_width() - label_width);
    if inline.len() == 1 {
        c.text(g.margin_left_mm + label_width, y, &inline[0], BODY_STYLE);
        c.advance(LABEL_ADVANCE);
        return;
    }

    c.advance(LABEL_ADVANCE);
    let indent = g.margin_left_mm + BULLET_INDENT;
    for line in metrics.wrap(value, BODY_STYLE.size_pt, g.content_width() - BULLET_INDENT) {
        let y = c.reserve(LINE_ADVANCE);
        c.text(indent, y, &line, BODY_STYLE);
        c.advance(LINE_ADVANCE);
    }
}

fn layout_plain_line(c: &mut PageComposer, line: &str) {
    let g = c.geometry();
    let metrics = get_metrics(BODY_STYLE.face);
    for wrapped in metrics.wrap(line, BODY_STYLE.size_pt, g.content_width()) {
        let y = c.reserve(LINE_ADVANCE);
        c.text(g.margin_left_mm, y, &wrapped, BODY_STYLE);
        c.advance(LINE_ADVANCE);
    }
    c.advance(PARAGRAPH_GAP);
}

// ────────────────────────────────────────────────────────────────────────────
// Plain fallback layout
// ────────────────────────────────────────────────────────────────────────────

/// Single-style layout of the raw text: no sections, no line roles, just
/// wrapping and a page break whenever the next line would overflow.
pub fn compose_plain(text: &str, geometry: &PageGeometry, watermark: bool) -> Vec<PageContent> {
    let mut composer = PageComposer::new(*geometry);
    let metrics = get_metrics(BODY_STYLE.face);

    for line in split_lines(text) {
        let wrapped = metrics.wrap(line, BODY_STYLE.size_pt, geometry.content_width());
        if wrapped.is_empty() {
            composer.advance(LINE_ADVANCE);
            continue;
        }
        for piece in wrapped {
            let y = composer.reserve(LINE_ADVANCE);
            composer.text(geometry.margin_left_mm, y, &piece, BODY_STYLE);
            composer.advance(LINE_ADVANCE);
        }
    }

    let mut pages = composer.finish();
    stamp_pages(&mut pages, geometry, watermark, false);
    pages
}

// ────────────────────────────────────────────────────────────────────────────
// Per-page stamps
// ────────────────────────────────────────────────────────────────────────────

/// Runs once the page count is final: watermark, then `Page i of N` footer.
fn stamp_pages(pages: &mut [PageContent], geometry: &PageGeometry, watermark: bool, footer: bool) {
    let total = pages.len();
    let metrics = get_metrics(FOOTER_STYLE.face);

    for (i, page) in pages.iter_mut().enumerate() {
        if watermark {
            page.ops.push(DrawOp::Watermark {
                text: WATERMARK_TEXT.to_string(),
                size_pt: WATERMARK_SIZE_PT,
                color: WATERMARK_GRAY,
                opacity: WATERMARK_OPACITY,
            });
        }
        if footer {
            let text = format!("Page {} of {} | {}", i + 1, total, ATTRIBUTION);
            let width = metrics.width_mm(&text, FOOTER_STYLE.size_pt);
            page.ops.push(DrawOp::Text {
                x: geometry.center_x() - width / 2.0,
                y: geometry.height_mm - FOOTER_FROM_BOTTOM,
                text,
                style: FOOTER_STYLE,
            });
        }
    }
}
