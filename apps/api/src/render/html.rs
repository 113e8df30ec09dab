//! Static export renderer: standalone HTML documents for download and print.
//!
//! Unlike the preview, consecutive bullets are grouped into one `<ul>`. That is the
//! only inter-line state in the pipeline and it lives in [`ListState`].

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::render::classify::{classify, strip_bullet_marker, LineRole};
use crate::render::{split_lines, ATTRIBUTION, WATERMARK_TEXT};

/// Which document flavour to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportMode {
    /// Downloadable file.
    Html,
    /// Opens the print dialog on load, then closes its window.
    Print,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentOptions {
    pub watermark: bool,
    pub mode: ExportMode,
}

// ────────────────────────────────────────────────────────────────────────────
// List-run state machine
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListState {
    OutsideList,
    InsideList,
}

/// Markup emitted for one transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Emit {
    OpenList,
    CloseList,
    Item,
    Block,
    Spacer,
}

impl ListState {
    /// Transition table. Blank lines inside a list emit nothing and keep it open.
    fn step(self, role: LineRole) -> (ListState, &'static [Emit]) {
        use Emit::*;
        use ListState::*;

        match (self, role) {
            (OutsideList, LineRole::Bullet) => (InsideList, &[OpenList, Item]),
            (InsideList, LineRole::Bullet) => (InsideList, &[Item]),
            (InsideList, LineRole::Blank) => (InsideList, &[]),
            (OutsideList, LineRole::Blank) => (OutsideList, &[Spacer]),
            (InsideList, _) => (OutsideList, &[CloseList, Block]),
            (OutsideList, _) => (OutsideList, &[Block]),
        }
    }

    /// Markup needed at end of input.
    fn finish(self) -> &'static [Emit] {
        match self {
            ListState::InsideList => &[Emit::CloseList],
            ListState::OutsideList => &[],
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Rendering
// ────────────────────────────────────────────────────────────────────────────

/// Renders the body markup for `lines`.
pub fn render_body<S: AsRef<str>>(lines: &[S]) -> String {
    let mut body = String::new();
    let mut state = ListState::OutsideList;

    for line in lines {
        let line = line.as_ref();
        let role = classify(line);
        let (next, emits) = state.step(role);
        for emit in emits {
            write_emit(&mut body, *emit, role, line);
        }
        state = next;
    }

    for emit in state.finish() {
        write_emit(&mut body, *emit, LineRole::Blank, "");
    }
    body
}

fn write_emit(out: &mut String, emit: Emit, role: LineRole, line: &str) {
    match emit {
        Emit::OpenList => out.push_str("<ul class=\"resume-list\">"),
        Emit::CloseList => out.push_str("</ul>"),
        Emit::Item => {
            let _ = write!(out, "<li>{}</li>", escape_html(strip_bullet_marker(line)));
        }
        Emit::Spacer => out.push_str("<div class=\"spacer\"></div>"),
        Emit::Block => {
            let text = escape_html(line.trim());
            let _ = match role {
                LineRole::SectionHeader => write!(out, "<h2 class=\"section-header\">{text}</h2>"),
                LineRole::SubHeader => write!(out, "<h3 class=\"sub-header\">{text}</h3>"),
                _ => write!(out, "<p>{text}</p>"),
            };
        }
    }
}

/// Renders a complete, self-contained styled document.
pub fn render_document<S: AsRef<str>>(lines: &[S], options: &DocumentOptions) -> String {
    let title_source = lines
        .iter()
        .map(|l| l.as_ref().trim())
        .find(|l| !l.is_empty());
    let slug = title_source.map(title_slug).unwrap_or_default();
    let title = if slug.is_empty() {
        "Resume".to_string()
    } else {
        format!("Resume - {slug}")
    };

    let body = render_body(lines);
    let watermark = if options.watermark {
        format!("<div class=\"watermark\">{WATERMARK_TEXT}</div>\n")
    } else {
        String::new()
    };
    let (extra_print_css, script) = match options.mode {
        ExportMode::Html => ("", ""),
        ExportMode::Print => (PRINT_PAGE_CSS, PRINT_SCRIPT),
    };

    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n<style>\n{BASE_CSS}@media print {{\n{PRINT_MEDIA_CSS}{extra_print_css}}}\n</style>\n\
         </head>\n<body>\n{watermark}<main class=\"resume-content\">{body}</main>\n\
         <footer class=\"attribution\">{ATTRIBUTION}</footer>\n{script}</body>\n</html>\n",
        title = escape_html(&title),
    )
}

/// [`render_document`] over a raw text block.
pub fn render_document_text(text: &str, options: &DocumentOptions) -> String {
    render_document(&split_lines(text), options)
}

/// Document title slug: lowercased, whitespace runs replaced with `_`.
pub fn title_slug(line: &str) -> String {
    line.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const BASE_CSS: &str = "\
body { font-family: 'Segoe UI', Arial, sans-serif; line-height: 1.6; max-width: 800px; margin: 0 auto; padding: 30px; color: #333; position: relative; }
.section-header { color: #2563eb; border-bottom: 2px solid #2563eb; padding-bottom: 5px; margin-top: 25px; margin-bottom: 15px; font-size: 18px; text-transform: uppercase; letter-spacing: 1px; }
.sub-header { color: #4b5563; margin-top: 15px; margin-bottom: 5px; font-size: 16px; font-weight: 600; }
p { margin-bottom: 10px; text-align: justify; }
.resume-list { margin-top: 10px; margin-bottom: 15px; padding-left: 20px; }
.resume-list li { margin-bottom: 8px; position: relative; }
.spacer { height: 10px; }
.attribution { margin-top: 30px; text-align: center; font-size: 12px; color: #9ca3af; }
.watermark { position: fixed; top: 50%; left: 50%; transform: translate(-50%, -50%) rotate(-45deg); font-size: 60px; color: rgba(200, 200, 200, 0.3); font-weight: bold; z-index: 1000; pointer-events: none; white-space: nowrap; }
";

const PRINT_MEDIA_CSS: &str = "\
body { padding: 0; color: #000; }
.section-header { color: #000; border-bottom-color: #000; }
.watermark { color: rgba(200, 200, 200, 0.5); font-size: 80px; }
";

const PRINT_PAGE_CSS: &str = "@page { margin: 0.5cm; }\n";

const PRINT_SCRIPT: &str = "<script>\n\
window.onload = function () {\n  window.print();\n  setTimeout(function () { window.close(); }, 500);\n};\n\
</script>\n";

#[cfg(test)]
mod tests {
    use super::*;

    fn html(text: &str, watermark: bool) -> String {
        render_document_text(
            text,
            &DocumentOptions {
                watermark,
                mode: ExportMode::Html,
            },
        )
    }

    #[test]
    fn test_consecutive_bullets_share_one_list() {
        let body = render_body(&["- one", "- two", "• three"]);
        assert_eq!(body.matches("<ul").count(), 1);
        assert_eq!(body.matches("</ul>").count(), 1);
        assert_eq!(body.matches("<li>").count(), 3);
        assert_eq!(
            body,
            "<ul class=\"resume-list\"><li>one</li><li>two</li><li>three</li></ul>"
        );
    }

    #[test]
    fn test_blank_inside_list_is_ignored() {
        let body = render_body(&["- one", "", "- two"]);
        assert_eq!(body.matches("<ul").count(), 1);
        assert!(!body.contains("spacer"));
    }

    #[test]
    fn test_blank_outside_list_is_spacer() {
        let body = render_body(&["Para", "", "Para 2"]);
        assert_eq!(
            body,
            "<p>Para</p><div class=\"spacer\"></div><p>Para 2</p>"
        );
    }

    #[test]
    fn test_headers_and_paragraphs_close_list() {
        let body = render_body(&["- a", "SKILLS", "- b", "Duration:", "- c", "text"]);
        assert_eq!(body.matches("<ul").count(), 3);
        assert_eq!(body.matches("</ul>").count(), 3);
        assert!(body.contains("</ul><h2 class=\"section-header\">SKILLS</h2>"));
        assert!(body.contains("</ul><h3 class=\"sub-header\">Duration:</h3>"));
        assert!(body.ends_with("</ul><p>text</p>"));
    }

    #[test]
    fn test_list_closed_at_end_of_input() {
        let body = render_body(&["Intro", "- a", "- b", ""]);
        assert!(body.ends_with("</ul>"));
        assert_eq!(body.matches("<ul").count(), body.matches("</ul>").count());
    }

    #[test]
    fn test_text_is_escaped() {
        let body = render_body(&["R&D <lead>"]);
        assert_eq!(body, "<p>R&amp;D &lt;lead&gt;</p>");
    }

    #[test]
    fn test_title_from_first_non_blank_line() {
        let doc = html("\n  Jane Q. Public\nEXPERIENCE", false);
        assert!(doc.contains("<title>Resume - jane_q._public</title>"));
    }

    #[test]
    fn test_empty_input_produces_valid_document() {
        let doc = html("", false);
        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains("<title>Resume</title>"));
        assert!(doc.contains("<main class=\"resume-content\"><div class=\"spacer\"></div></main>"));
    }

    #[test]
    fn test_watermark_once_when_enabled() {
        let doc = html("Jane\n- a", true);
        assert_eq!(doc.matches(WATERMARK_TEXT).count(), 1);
        assert!(doc.contains("pointer-events: none"));
        assert!(doc.contains("rotate(-45deg)"));

        let doc = html("Jane\n- a", false);
        assert_eq!(doc.matches(WATERMARK_TEXT).count(), 0);
    }

    #[test]
    fn test_print_mode_adds_dialog_script() {
        let options = DocumentOptions {
            watermark: true,
            mode: ExportMode::Print,
        };
        let doc = render_document_text("Jane\n- a\n- b", &options);
        assert!(doc.contains("window.print()"));
        assert!(doc.contains("window.close()"));
        assert!(doc.contains("@page { margin: 0.5cm; }"));
        assert_eq!(doc.matches(WATERMARK_TEXT).count(), 1);
        assert_eq!(doc.matches("<ul").count(), 1);

        let plain = html("Jane", false);
        assert!(!plain.contains("window.print()"));
    }

    #[test]
    fn test_document_has_attribution_footer() {
        assert!(html("Jane", false).contains(ATTRIBUTION));
    }

    #[test]
    fn test_title_slug_collapses_whitespace() {
        assert_eq!(title_slug("  Jane  Doe "), "jane_doe");
    }
}
