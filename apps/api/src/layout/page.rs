//! Page geometry and the vertical layout cursor used by the paginated renderer.
//!
//! All lengths are millimetres measured from the top-left corner of the page,
//! the same frame the layout code thinks in. Conversion to PDF user space
//! (points, origin bottom-left) happens only in the backend.

use serde::{Deserialize, Serialize};

use crate::layout::font_metrics::MM_PER_PT;
use crate::render::RenderError;

/// Physical page size and printable margins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub width_mm: f32,
    pub height_mm: f32,
    pub margin_top_mm: f32,
    pub margin_bottom_mm: f32,
    pub margin_left_mm: f32,
    pub margin_right_mm: f32,
}

/// A4 portrait with 20 mm margins on every side.
pub fn default_page_geometry() -> PageGeometry {
    PageGeometry {
        width_mm: 210.0,
        height_mm: 297.0,
        margin_top_mm: 20.0,
        margin_bottom_mm: 20.0,
        margin_left_mm: 20.0,
        margin_right_mm: 20.0,
    }
}

impl PageGeometry {
    pub fn content_width(&self) -> f32 {
        self.width_mm - self.margin_left_mm - self.margin_right_mm
    }

    /// Lowest baseline a content unit may reach.
    pub fn content_bottom(&self) -> f32 {
        self.height_mm - self.margin_bottom_mm
    }

    pub fn center_x(&self) -> f32 {
        self.width_mm / 2.0
    }

    pub fn width_pt(&self) -> f32 {
        self.width_mm / MM_PER_PT
    }

    pub fn height_pt(&self) -> f32 {
        self.height_mm / MM_PER_PT
    }

    /// Rejects geometries that leave no printable area.
    pub fn validate(&self) -> Result<(), RenderError> {
        let values = [
            self.width_mm,
            self.height_mm,
            self.margin_top_mm,
            self.margin_bottom_mm,
            self.margin_left_mm,
            self.margin_right_mm,
        ];
        if values.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(RenderError::Layout(format!(
                "page geometry has a negative or non-finite dimension: {self:?}"
            )));
        }
        if self.content_width() <= 0.0 {
            return Err(RenderError::Layout(format!(
                "horizontal margins leave no content width ({} mm)",
                self.content_width()
            )));
        }
        if self.content_bottom() <= self.margin_top_mm {
            return Err(RenderError::Layout(
                "vertical margins leave no content height".to_string(),
            ));
        }
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Layout cursor
// ────────────────────────────────────────────────────────────────────────────

/// Running vertical position across a sequence of pages.
///
/// Every drawable unit asks [`LayoutCursor::ensure_room`] before it is placed, so
/// page breaks only ever happen between units.
#[derive(Debug, Clone)]
pub struct LayoutCursor {
    geometry: PageGeometry,
    y: f32,
    at_page_top: bool,
}

impl LayoutCursor {
    pub fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            y: geometry.margin_top_mm,
            at_page_top: true,
        }
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    /// True when a unit of `height` placed at the cursor would cross the bottom margin.
    pub fn would_overflow(&self, height: f32) -> bool {
        self.y + height > self.geometry.content_bottom()
    }

    /// Starts a new page if a unit of `height` does not fit on the current one.
    ///
    /// A unit taller than a whole page is still placed at the top of a fresh page
    /// rather than breaking forever. Returns true when a break happened.
    pub fn ensure_room(&mut self, height: f32) -> bool {
        if self.would_overflow(height) && !self.at_page_top {
            self.y = self.geometry.margin_top_mm;
            self.at_page_top = true;
            true
        } else {
            false
        }
    }

    pub fn advance(&mut self, dy: f32) {
        self.y += dy;
        self.at_page_top = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_geometry_is_a4() {
        let g = default_page_geometry();
        assert_eq!(g.width_mm, 210.0);
        assert_eq!(g.height_mm, 297.0);
        assert!((g.content_width() - 170.0).abs() < 1e-4);
        assert!((g.width_pt() - 595.28).abs() < 0.01);
        assert!(g.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_oversized_margins() {
        let mut g = default_page_geometry();
        g.margin_left_mm = 150.0;
        g.margin_right_mm = 80.0;
        assert!(matches!(g.validate(), Err(RenderError::Layout(_))));
    }

    #[test]
    fn test_validate_rejects_non_finite() {
        let mut g = default_page_geometry();
        g.height_mm = f32::NAN;
        assert!(g.validate().is_err());
    }

    #[test]
    fn test_cursor_breaks_before_overflowing_unit() {
        let g = default_page_geometry();
        let mut cursor = LayoutCursor::new(g);
        // Fill until the next 5 mm unit no longer fits.
        while !cursor.would_overflow(5.0) {
            assert!(!cursor.ensure_room(5.0));
            cursor.advance(5.0);
        }
        assert!(cursor.ensure_room(5.0), "expected a page break");
        assert_eq!(cursor.y(), g.margin_top_mm);
    }

    #[test]
    fn test_cursor_never_breaks_on_fresh_page() {
        let mut cursor = LayoutCursor::new(default_page_geometry());
        assert!(!cursor.ensure_room(10_000.0));
    }
}
