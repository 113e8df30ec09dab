//! Line classifier: the single place that decides what a line of resume text is.
//!
//! Rules, first match wins:
//! 1. `Blank`         empty or whitespace-only
//! 2. `SectionHeader` no lowercase letters and at least one alphabetic character
//! 3. `SubHeader`     trimmed text ends with `:` and is shorter than 50 chars
//! 4. `Bullet`        trimmed text starts with `-` or `•`
//! 5. `Paragraph`     everything else
//!
//! Rule 2 runs before rules 3 and 4, so `SKILLS:` and `- AWS` are both section
//! headers. Downstream renderers rely on this precedence.

use serde::{Deserialize, Serialize};

/// Subheaders must be shorter than this many characters (after trimming).
const SUBHEADER_MAX_CHARS: usize = 50;

const BULLET_MARKERS: [char; 2] = ['-', '•'];

/// Semantic role of one line of generated resume text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineRole {
    SectionHeader,
    SubHeader,
    Bullet,
    Paragraph,
    Blank,
}

/// Classifies a single line. Total: every input maps to exactly one role.
pub fn classify(line: &str) -> LineRole {
    let trimmed = line.trim();

    if trimmed.is_empty() {
        return LineRole::Blank;
    }

    if is_all_caps(trimmed) {
        return LineRole::SectionHeader;
    }

    if trimmed.ends_with(':') && trimmed.chars().count() < SUBHEADER_MAX_CHARS {
        return LineRole::SubHeader;
    }

    if trimmed.starts_with(BULLET_MARKERS) {
        return LineRole::Bullet;
    }

    LineRole::Paragraph
}

/// True when the line starts with `-` or `•`, whatever its role.
pub fn has_bullet_marker(line: &str) -> bool {
    line.trim_start().starts_with(BULLET_MARKERS)
}

/// Removes the leading bullet marker and the whitespace around it.
///
/// Lines without a marker are returned trimmed.
pub fn strip_bullet_marker(line: &str) -> &str {
    let trimmed = line.trim();
    trimmed
        .strip_prefix(BULLET_MARKERS)
        .map(str::trim_start)
        .unwrap_or(trimmed)
}

/// Uppercasing leaves the text unchanged and it contains at least one letter.
///
/// Letters from uncased scripts count, so a CJK line is a header.
fn is_all_caps(text: &str) -> bool {
    text.to_uppercase() == text && text.chars().any(char::is_alphabetic)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_examples() {
        assert_eq!(classify("WORK EXPERIENCE"), LineRole::SectionHeader);
        assert_eq!(classify("Duration:"), LineRole::SubHeader);
        assert_eq!(classify("- Led a team"), LineRole::Bullet);
        assert_eq!(classify("Built scalable systems."), LineRole::Paragraph);
        assert_eq!(classify(""), LineRole::Blank);
    }

    #[test]
    fn test_whitespace_only_is_blank() {
        assert_eq!(classify("   \t  "), LineRole::Blank);
        assert_eq!(classify("\r"), LineRole::Blank);
    }

    #[test]
    fn test_all_caps_with_colon_is_section_header() {
        assert_eq!(classify("SKILLS:"), LineRole::SectionHeader);
    }

    #[test]
    fn test_uppercase_bullet_is_section_header() {
        // Rule 2 precedes rule 4.
        assert_eq!(classify("- AWS"), LineRole::SectionHeader);
        assert_eq!(classify("• SQL"), LineRole::SectionHeader);
    }

    #[test]
    fn test_header_needs_a_letter() {
        assert_eq!(classify("2019 - 2021"), LineRole::Paragraph);
        assert_eq!(classify("- 40%"), LineRole::Bullet);
        assert_eq!(classify("---"), LineRole::Bullet);
    }

    #[test]
    fn test_header_with_digits_and_punctuation() {
        assert_eq!(classify("  AWS CERTIFIED (2022)  "), LineRole::SectionHeader);
        assert_eq!(classify("ÉDUCATION"), LineRole::SectionHeader);
    }

    #[test]
    fn test_long_colon_line_is_paragraph() {
        let line = "Responsibilities included owning the whole deployment pipeline:";
        assert!(line.len() >= 50);
        assert_eq!(classify(line), LineRole::Paragraph);
    }

    #[test]
    fn test_subheader_ignores_surrounding_whitespace() {
        assert_eq!(classify("    Responsibilities:   "), LineRole::SubHeader);
    }

    #[test]
    fn test_bullet_glyph_variants() {
        assert_eq!(classify("• Shipped v2"), LineRole::Bullet);
        assert_eq!(classify("   -Shipped v2"), LineRole::Bullet);
    }

    #[test]
    fn test_titlecase_letter_is_not_header() {
        // `ǅ` has no lowercase property but uppercases to `Ǆ`.
        assert_eq!(classify("ǅ"), LineRole::Paragraph);
        assert_eq!(classify("Ǆ"), LineRole::SectionHeader);
    }

    #[test]
    fn test_uncased_script_counts_as_header() {
        assert_eq!(classify("工作经验"), LineRole::SectionHeader);
        assert_eq!(classify("- 工作"), LineRole::SectionHeader);
    }

    #[test]
    fn test_classify_is_total_over_assorted_inputs() {
        let inputs = [
            "", " ", "a", "A", ":", "-", "•", "★ star", "a:", "A:", "1.", "\u{00a0}",
            "mixed Case LINE", "email@example.com | 555-1234",
        ];
        for input in inputs {
            // Every call returns one of the five roles; matching proves exhaustiveness.
            match classify(input) {
                LineRole::SectionHeader
                | LineRole::SubHeader
                | LineRole::Bullet
                | LineRole::Paragraph
                | LineRole::Blank => {}
            }
        }
    }

    #[test]
    fn test_strip_bullet_marker() {
        assert_eq!(strip_bullet_marker("  - Led a team "), "Led a team");
        assert_eq!(strip_bullet_marker("•Shipped"), "Shipped");
        assert_eq!(strip_bullet_marker("No marker"), "No marker");
        assert_eq!(strip_bullet_marker("-"), "");
    }
}
