//! PDF encoding of laid-out pages.
//!
//! The composer thinks in millimetres from the top-left corner; PDF user space
//! is points from the bottom-left. The flip happens here and nowhere else.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream, StringFormat};

use crate::layout::font_metrics::{get_metrics, FontFace, MM_PER_PT};
use crate::layout::page::PageGeometry;
use crate::render::pdf::{DrawOp, LaidOutDocument, PageContent, Rgb, TextStyle};
use crate::render::RenderError;

const PRODUCER: &str = "AI Resume Builder";
const WATERMARK_GS: &str = "GS1";

/// Bezier handle length for approximating a quarter circle.
const KAPPA: f32 = 0.552_284_8;

/// Turns a laid-out document into file bytes.
pub trait PdfBackend: Send + Sync {
    fn encode(&self, doc: &LaidOutDocument) -> Result<Vec<u8>, RenderError>;
}

/// Writes PDF 1.5 with lopdf, using the base-14 Helvetica faces.
#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfBackend;

impl PdfBackend for LopdfBackend {
    fn encode(&self, laid_out: &LaidOutDocument) -> Result<Vec<u8>, RenderError> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let resources = resources(&mut doc, watermark_opacity(&laid_out.pages));
        let resources_id = doc.add_object(resources);

        let mut kids: Vec<Object> = Vec::with_capacity(laid_out.pages.len());
        for page in &laid_out.pages {
            let content = Content {
                operations: page_operations(page, &laid_out.geometry),
            };
            let bytes = content.encode().map_err(encode_err)?;
            let content_id = doc.add_object(Stream::new(Dictionary::new(), bytes));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let page_count = kids.len() as i64;
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                real(laid_out.geometry.width_pt()),
                real(laid_out.geometry.height_pt()),
            ],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        let info_id = doc.add_object(info(&laid_out.title));
        doc.trailer.set("Root", catalog_id);
        doc.trailer.set("Info", info_id);

        let mut out = Vec::new();
        doc.save_to(&mut out).map_err(encode_err)?;
        Ok(out)
    }
}

fn encode_err(e: impl std::fmt::Display) -> RenderError {
    RenderError::Encode(e.to_string())
}

fn real(v: f32) -> Object {
    Object::Real(v.into())
}

// ────────────────────────────────────────────────────────────────────────────
// Document-level dictionaries
// ────────────────────────────────────────────────────────────────────────────

fn font_dict(face: FontFace) -> Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => face.base_font(),
        "Encoding" => "WinAnsiEncoding",
    }
}

fn resources(doc: &mut Document, opacity: f32) -> Dictionary {
    let regular = doc.add_object(font_dict(FontFace::Helvetica));
    let bold = doc.add_object(font_dict(FontFace::HelveticaBold));
    let gs = doc.add_object(dictionary! {
        "Type" => "ExtGState",
        "ca" => real(opacity),
        "CA" => real(opacity),
    });

    dictionary! {
        "Font" => dictionary! {
            FontFace::Helvetica.resource_name() => regular,
            FontFace::HelveticaBold.resource_name() => bold,
        },
        "ExtGState" => dictionary! {
            WATERMARK_GS => gs,
        },
    }
}

/// All watermark ops share one graphics state.
fn watermark_opacity(pages: &[PageContent]) -> f32 {
    pages
        .iter()
        .flat_map(|p| &p.ops)
        .find_map(|op| match op {
            DrawOp::Watermark { opacity, .. } => Some(opacity.clamp(0.0, 1.0)),
            _ => None,
        })
        .unwrap_or(1.0)
}

fn info(title: &str) -> Dictionary {
    let created = chrono::Utc::now().format("D:%Y%m%d%H%M%SZ").to_string();
    dictionary! {
        "Title" => Object::String(encode_win_ansi(title), StringFormat::Literal),
        "Subject" => Object::string_literal("Resume"),
        "Author" => Object::string_literal(PRODUCER),
        "Creator" => Object::string_literal(PRODUCER),
        "Producer" => Object::string_literal(PRODUCER),
        "CreationDate" => Object::string_literal(created),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Content streams
// ────────────────────────────────────────────────────────────────────────────

fn page_operations(page: &PageContent, geometry: &PageGeometry) -> Vec<Operation> {
    let height_mm = geometry.height_mm;
    let mut ops = Vec::new();
    for op in &page.ops {
        match op {
            DrawOp::Text { x, y, text, style } => {
                text_ops(&mut ops, *x / MM_PER_PT, (height_mm - y) / MM_PER_PT, text, style)
            }
            DrawOp::Rule {
                x1,
                x2,
                y,
                width_mm,
                color,
            } => {
                let y_pt = (height_mm - y) / MM_PER_PT;
                ops.push(Operation::new("q", vec![]));
                ops.push(Operation::new("RG", rgb_operands(*color)));
                ops.push(Operation::new("w", vec![real(width_mm / MM_PER_PT)]));
                ops.push(Operation::new("m", vec![real(x1 / MM_PER_PT), real(y_pt)]));
                ops.push(Operation::new("l", vec![real(x2 / MM_PER_PT), real(y_pt)]));
                ops.push(Operation::new("S", vec![]));
                ops.push(Operation::new("Q", vec![]));
            }
            DrawOp::Dot {
                cx,
                cy,
                radius_mm,
                color,
            } => dot_ops(
                &mut ops,
                cx / MM_PER_PT,
                (height_mm - cy) / MM_PER_PT,
                radius_mm / MM_PER_PT,
                *color,
            ),
            DrawOp::Watermark {
                text,
                size_pt,
                color,
                ..
            } => watermark_ops(&mut ops, text, *size_pt, *color, geometry),
        }
    }
    ops
}

fn rgb_operands(color: Rgb) -> Vec<Object> {
    [color.0, color.1, color.2]
        .iter()
        .map(|c| real(f32::from(*c) / 255.0))
        .collect()
}

fn text_ops(ops: &mut Vec<Operation>, x_pt: f32, y_pt: f32, text: &str, style: &TextStyle) {
    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new(
        "Tf",
        vec![
            Object::Name(style.face.resource_name().as_bytes().to_vec()),
            real(style.size_pt),
        ],
    ));
    ops.push(Operation::new("rg", rgb_operands(style.color)));
    ops.push(Operation::new("Td", vec![real(x_pt), real(y_pt)]));
    ops.push(Operation::new(
        "Tj",
        vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
    ));
    ops.push(Operation::new("ET", vec![]));
}

/// Filled circle from four cubic segments.
fn dot_ops(ops: &mut Vec<Operation>, cx: f32, cy: f32, r: f32, color: Rgb) {
    let k = r * KAPPA;
    let curve = |pts: [f32; 6]| Operation::new("c", pts.iter().map(|v| real(*v)).collect());

    ops.push(Operation::new("q", vec![]));
    ops.push(Operation::new("rg", rgb_operands(color)));
    ops.push(Operation::new("m", vec![real(cx + r), real(cy)]));
    ops.push(curve([cx + r, cy + k, cx + k, cy + r, cx, cy + r]));
    ops.push(curve([cx - k, cy + r, cx - r, cy + k, cx - r, cy]));
    ops.push(curve([cx - r, cy - k, cx - k, cy - r, cx, cy - r]));
    ops.push(curve([cx + k, cy - r, cx + r, cy - k, cx + r, cy]));
    ops.push(Operation::new("f", vec![]));
    ops.push(Operation::new("Q", vec![]));
}

/// Bold text rotated 45° with its midpoint on the page centre.
fn watermark_ops(
    ops: &mut Vec<Operation>,
    text: &str,
    size_pt: f32,
    color: Rgb,
    geometry: &PageGeometry,
) {
    let face = FontFace::HelveticaBold;
    let half = get_metrics(face).measure_str(text) * size_pt / 2.0;
    let rise = size_pt / 3.0;
    let (sin, cos) = std::f32::consts::FRAC_PI_4.sin_cos();
    // Back off from the centre by half the run along the baseline and a third of
    // the size across it.
    let tx = geometry.width_pt() / 2.0 - half * cos + rise * sin;
    let ty = geometry.height_pt() / 2.0 - half * sin - rise * cos;

    ops.push(Operation::new("q", vec![]));
    ops.push(Operation::new(
        "gs",
        vec![Object::Name(WATERMARK_GS.as_bytes().to_vec())],
    ));
    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new(
        "Tf",
        vec![Object::Name(face.resource_name().as_bytes().to_vec()), real(size_pt)],
    ));
    ops.push(Operation::new("rg", rgb_operands(color)));
    ops.push(Operation::new(
        "Tm",
        vec![real(cos), real(sin), real(-sin), real(cos), real(tx), real(ty)],
    ));
    ops.push(Operation::new(
        "Tj",
        vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
    ));
    ops.push(Operation::new("ET", vec![]));
    ops.push(Operation::new("Q", vec![]));
}

/// Maps text to WinAnsi bytes. Latin-1 passes through, the common typographic
/// punctuation maps to its cp1252 slot, anything else becomes `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{20}'..='\u{7E}' | '\u{A0}'..='\u{FF}' => c as u8,
            '€' => 0x80,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '™' => 0x99,
            '\t' => b' ',
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::page::default_page_geometry;
    use crate::render::pdf::test_support::page_contents;
    use crate::render::pdf::{TextStyle, LIGHT, PRIMARY};

    fn number(obj: &Object) -> f32 {
        match obj {
            Object::Integer(i) => *i as f32,
            Object::Real(r) => (*r).into(),
            other => panic!("not a number: {other:?}"),
        }
    }

    fn sample(pages: usize) -> LaidOutDocument {
        let style = TextStyle {
            face: FontFace::Helvetica,
            size_pt: 10.0,
            color: LIGHT,
        };
        LaidOutDocument {
            title: "Jane Doe Resume".to_string(),
            geometry: default_page_geometry(),
            pages: (0..pages)
                .map(|i| PageContent {
                    ops: vec![
                        DrawOp::Text {
                            x: 20.0,
                            y: 20.0,
                            text: format!("page body {i}"),
                            style,
                        },
                        DrawOp::Dot {
                            cx: 21.5,
                            cy: 30.0,
                            radius_mm: 0.6,
                            color: PRIMARY,
                        },
                        DrawOp::Rule {
                            x1: 20.0,
                            x2: 190.0,
                            y: 40.0,
                            width_mm: 0.3,
                            color: PRIMARY,
                        },
                    ],
                })
                .collect(),
        }
    }

    #[test]
    fn test_encode_writes_one_pdf_page_per_page_content() {
        let bytes = LopdfBackend.encode(&sample(3)).unwrap();
        let pages = page_contents(&bytes);
        assert_eq!(pages.len(), 3);
        for (i, content) in pages.iter().enumerate() {
            assert!(content.contains(&format!("(page body {i})")));
            assert!(content.contains("/F1"));
        }
    }

    #[test]
    fn test_media_box_is_page_size_in_points() {
        let bytes = LopdfBackend.encode(&sample(1)).unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        let page_id = *doc.get_pages().values().next().unwrap();
        let page = doc.get_dictionary(page_id).unwrap();
        let parent = page.get(b"Parent").unwrap().as_reference().unwrap();
        let media_box = doc
            .get_dictionary(parent)
            .unwrap()
            .get(b"MediaBox")
            .unwrap()
            .as_array()
            .unwrap();
        assert!((number(&media_box[2]) - 595.28).abs() < 0.05);
        assert!((number(&media_box[3]) - 841.89).abs() < 0.05);
    }

    #[test]
    fn test_info_dictionary_carries_title() {
        let bytes = LopdfBackend.encode(&sample(1)).unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        let info_id = doc.trailer.get(b"Info").unwrap().as_reference().unwrap();
        let info = doc.get_dictionary(info_id).unwrap();
        match info.get(b"Title").unwrap() {
            Object::String(bytes, _) => assert_eq!(bytes.as_slice(), b"Jane Doe Resume"),
            other => panic!("unexpected title {other:?}"),
        }
        match info.get(b"Creator").unwrap() {
            Object::String(bytes, _) => assert_eq!(bytes.as_slice(), PRODUCER.as_bytes()),
            other => panic!("unexpected creator {other:?}"),
        }
    }

    #[test]
    fn test_watermark_uses_translucent_graphics_state() {
        let mut doc = sample(2);
        for page in &mut doc.pages {
            page.ops.push(DrawOp::Watermark {
                text: "DRAFT".to_string(),
                size_pt: 60.0,
                color: Rgb(200, 200, 200),
                opacity: 0.3,
            });
        }
        let bytes = LopdfBackend.encode(&doc).unwrap();
        for content in page_contents(&bytes) {
            assert_eq!(content.matches("(DRAFT)").count(), 1);
            assert!(content.contains("/GS1 gs"));
            assert!(content.contains(" Tm"));
        }
    }

    #[test]
    fn test_encode_win_ansi() {
        assert_eq!(encode_win_ansi("Abc 1"), b"Abc 1".to_vec());
        assert_eq!(encode_win_ansi("café"), vec![b'c', b'a', b'f', 0xE9]);
        assert_eq!(encode_win_ansi("• – — …"), vec![0x95, b' ', 0x96, b' ', 0x97, b' ', 0x85]);
        assert_eq!(encode_win_ansi("“hi”"), vec![0x93, b'h', b'i', 0x94]);
        assert_eq!(encode_win_ansi("日本"), b"??".to_vec());
    }
}
