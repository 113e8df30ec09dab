// Layout primitives for the paginated PDF surface:
// glyph metrics + word wrap, page geometry, and the vertical cursor.

pub mod font_metrics;
pub mod page;

pub use page::{default_page_geometry, PageGeometry};
