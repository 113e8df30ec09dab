//! Section segmenter: groups classified lines into titled sections for the PDF surface.

use serde::{Deserialize, Serialize};

use crate::render::classify::{classify, LineRole};

/// A first section with at most this many content lines is treated as the identity block.
const IDENTITY_MAX_CONTENT_LINES: usize = 6;

/// A titled run of resume content.
///
/// `content_lines` are trimmed; an empty string marks an intentional paragraph
/// break inside the section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub content_lines: Vec<String>,
    pub is_identity_section: bool,
}

impl Section {
    fn titled(title: String) -> Self {
        Self {
            title,
            content_lines: Vec::new(),
            is_identity_section: false,
        }
    }
}

/// Groups lines into sections, top to bottom.
///
/// - A `SectionHeader` line closes the open section and opens a new one titled
///   with the trimmed line (one trailing `:` removed).
/// - Other non-blank lines are appended trimmed; content before the first header
///   opens an implicit untitled section.
/// - A blank line appends `""` only once the open section has content.
///
/// The first section is then flagged as the identity block (name + contact) when its
/// title is all caps, mentions `PERSONAL`, or it has few content lines. This is a
/// heuristic: a short all-caps first section such as `AWARDS` is flagged too.
pub fn segment<S: AsRef<str>>(lines: &[S]) -> Vec<Section> {
    let mut sections: Vec<Section> = Vec::new();
    let mut current: Option<Section> = None;

    for line in lines {
        let line = line.as_ref();
        match classify(line) {
            LineRole::SectionHeader => {
                if let Some(done) = current.take() {
                    sections.push(done);
                }
                current = Some(Section::titled(header_title(line)));
            }
            LineRole::Blank => {
                if let Some(section) = current.as_mut() {
                    if !section.content_lines.is_empty() {
                        section.content_lines.push(String::new());
                    }
                }
            }
            LineRole::SubHeader | LineRole::Bullet | LineRole::Paragraph => {
                current
                    .get_or_insert_with(|| Section::titled(String::new()))
                    .content_lines
                    .push(line.trim().to_string());
            }
        }
    }

    if let Some(done) = current {
        sections.push(done);
    }

    if let Some(first) = sections.first_mut() {
        first.is_identity_section = looks_like_identity(first);
    }

    sections
}

/// Trimmed header text with a single trailing colon removed.
fn header_title(line: &str) -> String {
    let trimmed = line.trim();
    trimmed
        .strip_suffix(':')
        .unwrap_or(trimmed)
        .trim_end()
        .to_string()
}

fn looks_like_identity(section: &Section) -> bool {
    section.title.to_uppercase() == section.title
        || section.title.contains("PERSONAL")
        || section.content_lines.len() <= IDENTITY_MAX_CONTENT_LINES
}
