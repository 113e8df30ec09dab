//! Export Orchestrator: maps user-facing export actions onto the renderers.
//!
//! Every action takes the finished resume text plus the caller's watermark flag
//! and returns an [`ExportArtifact`]: bytes, a content type and a download name.

pub mod handlers;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::layout::page::PageGeometry;
use crate::render::html::{render_document_text, DocumentOptions, ExportMode};
use crate::render::pdf::{render_pdf, PdfOptions};
use crate::render::{first_content_line, RenderError};

/// Stem used when the text yields no usable name.
const FALLBACK_STEM: &str = "resume";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Text,
    Html,
    Pdf,
    Print,
}

impl ExportFormat {
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Text => "text/plain; charset=utf-8",
            ExportFormat::Html | ExportFormat::Print => "text/html; charset=utf-8",
            ExportFormat::Pdf => "application/pdf",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Text => "txt",
            ExportFormat::Html | ExportFormat::Print => "html",
            ExportFormat::Pdf => "pdf",
        }
    }

    /// Print output is opened in place; everything else is a download.
    pub fn disposition(&self) -> &'static str {
        match self {
            ExportFormat::Print => "inline",
            _ => "attachment",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub format: ExportFormat,
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl ExportArtifact {
    fn new(format: ExportFormat, text: &str, bytes: Vec<u8>) -> Self {
        let artifact = Self {
            format,
            filename: export_filename(text, format),
            bytes,
        };
        info!(
            format = ?artifact.format,
            filename = %artifact.filename,
            bytes = artifact.bytes.len(),
            "Export artifact ready"
        );
        artifact
    }

    pub fn content_type(&self) -> &'static str {
        self.format.content_type()
    }

    /// `Content-Disposition` header value.
    pub fn content_disposition(&self) -> String {
        format!(
            "{}; filename=\"{}\"",
            self.format.disposition(),
            self.filename
        )
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Actions
// ────────────────────────────────────────────────────────────────────────────

/// The text itself, byte for byte.
pub fn export_plain_text(text: &str) -> ExportArtifact {
    ExportArtifact::new(ExportFormat::Text, text, text.as_bytes().to_vec())
}

/// Self-contained styled HTML document.
pub fn export_html(text: &str, watermark: bool) -> ExportArtifact {
    let options = DocumentOptions {
        watermark,
        mode: ExportMode::Html,
    };
    let html = render_document_text(text, &options);
    ExportArtifact::new(ExportFormat::Html, text, html.into_bytes())
}

/// Paginated PDF. Structured layout failures fall back to the plain layout inside
/// the renderer, so an error here means not even the fallback could be encoded.
pub fn export_pdf(
    text: &str,
    watermark: bool,
    geometry: PageGeometry,
) -> Result<ExportArtifact, RenderError> {
    let options = PdfOptions::for_text(text, watermark, geometry);
    let bytes = render_pdf(text, &options)?;
    Ok(ExportArtifact::new(ExportFormat::Pdf, text, bytes))
}

/// Document that opens the print dialog as soon as it loads, then closes itself.
pub fn print_document(text: &str, watermark: bool) -> ExportArtifact {
    let options = DocumentOptions {
        watermark,
        mode: ExportMode::Print,
    };
    let html = render_document_text(text, &options);
    ExportArtifact::new(ExportFormat::Print, text, html.into_bytes())
}

// ────────────────────────────────────────────────────────────────────────────
// File naming
// ────────────────────────────────────────────────────────────────────────────

/// Filesystem-safe name from the first non-blank line: lowercase ASCII
/// alphanumerics, every other run of characters collapsed to one `_`, no
/// leading or trailing `_`. Empty when nothing survives.
pub fn safe_filename(text: &str) -> String {
    let Some(line) = first_content_line(text) else {
        return String::new();
    };

    let mut out = String::with_capacity(line.len());
    for c in line.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() {
            out.push(c);
        } else if !out.is_empty() && !out.ends_with('_') {
            out.push('_');
        }
    }
    while out.ends_with('_') {
        out.pop();
    }
    out
}

/// `<safe>_resume.<ext>`, or `resume.<ext>` when the text has no usable name.
pub fn export_filename(text: &str, format: ExportFormat) -> String {
    let safe = safe_filename(text);
    if safe.is_empty() {
        format!("{FALLBACK_STEM}.{}", format.extension())
    } else {
        format!("{safe}_{FALLBACK_STEM}.{}", format.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::page::default_page_geometry;
    use crate::render::pdf::test_support::page_contents;
    use crate::render::WATERMARK_TEXT;

    const RESUME: &str = "Jane Q. Public\njane@example.com\n\nEXPERIENCE\n- Led a team\n- Shipped v2\n- Hired four";

    #[test]
    fn test_safe_filename() {
        assert_eq!(safe_filename(RESUME), "jane_q_public");
        assert_eq!(safe_filename("\n\n  José   Álvarez-Ruiz!! \n"), "jos_lvarez_ruiz");
        assert_eq!(safe_filename("__Dr. A__"), "dr_a");
        assert_eq!(safe_filename("!!!"), "");
        assert_eq!(safe_filename(""), "");
    }

    #[test]
    fn test_export_filename_fallback() {
        assert_eq!(export_filename(RESUME, ExportFormat::Pdf), "jane_q_public_resume.pdf");
        assert_eq!(export_filename("   \n", ExportFormat::Html), "resume.html");
        assert_eq!(export_filename("***", ExportFormat::Text), "resume.txt");
    }

    #[test]
    fn test_plain_text_is_passthrough() {
        let artifact = export_plain_text(RESUME);
        assert_eq!(artifact.bytes, RESUME.as_bytes());
        assert_eq!(artifact.content_type(), "text/plain; charset=utf-8");
        assert_eq!(
            artifact.content_disposition(),
            "attachment; filename=\"jane_q_public_resume.txt\""
        );
    }

    #[test]
    fn test_html_export_groups_bullets_and_watermarks_once() {
        let artifact = export_html(RESUME, true);
        let html = String::from_utf8(artifact.bytes).unwrap();
        assert_eq!(html.matches("<ul").count(), 1);
        assert_eq!(html.matches("<li>").count(), 3);
        assert_eq!(html.matches(WATERMARK_TEXT).count(), 1);
        assert!(!html.contains("window.print()"));
    }

    #[test]
    fn test_print_document_is_inline_and_self_printing() {
        let artifact = print_document(RESUME, false);
        assert!(artifact.content_disposition().starts_with("inline;"));
        let html = String::from_utf8(artifact.bytes).unwrap();
        assert!(html.contains("window.print()"));
        assert_eq!(html.matches(WATERMARK_TEXT).count(), 0);
    }

    #[test]
    fn test_pdf_export() {
        let artifact = export_pdf(RESUME, true, default_page_geometry()).unwrap();
        assert_eq!(artifact.content_type(), "application/pdf");
        assert_eq!(artifact.filename, "jane_q_public_resume.pdf");
        let pages = page_contents(&artifact.bytes);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].matches(WATERMARK_TEXT).count(), 1);
    }

    #[test]
    fn test_every_format_accepts_empty_text() {
        assert!(export_plain_text("").bytes.is_empty());
        assert!(!export_html("", false).bytes.is_empty());
        assert!(!print_document("", false).bytes.is_empty());
        let pdf = export_pdf("", false, default_page_geometry()).unwrap();
        assert_eq!(pdf.filename, "resume.pdf");
        assert!(pdf.bytes.starts_with(b"%PDF-"));
    }
}
