//! Page geometry and monospace metrics for exported letters.
//!
//! Letters are set in the embedded monospace face, whose glyphs all share one
//! advance, so the number of characters per line is exact rather than estimated.

use serde::{Deserialize, Serialize};

use crate::layout::font::MONO_ADVANCE_EM;

pub const POINTS_PER_INCH: f32 = 72.0;
pub const MM_PER_INCH: f32 = 25.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Portrait,
    Landscape,
}

/// Layout parameters for an exported letter.
///
/// Example: US letter portrait, 1" margins, 11pt →
/// 6.5" × 72 = 468pt of text width ÷ 6.62pt per glyph = 70 columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageConfig {
    /// Sheet size as printed in portrait, in inches.
    pub paper_width_in: f32,
    pub paper_height_in: f32,
    pub orientation: Orientation,
    /// Same margin on all four sides.
    pub margin_in: f32,
    pub font_size_pt: f32,
    /// Baseline-to-baseline distance as a multiple of the font size.
    pub line_height: f32,
}

/// US letter, portrait, 1" margins, 11pt.
pub fn default_page_config() -> PageConfig {
    PageConfig {
        paper_width_in: 8.5,
        paper_height_in: 11.0,
        orientation: Orientation::Portrait,
        margin_in: 1.0,
        font_size_pt: 11.0,
        line_height: 1.4,
    }
}

impl PageConfig {
    /// Page (width, height) in inches after applying orientation.
    pub fn page_size_in(&self) -> (f32, f32) {
        match self.orientation {
            Orientation::Portrait => (self.paper_width_in, self.paper_height_in),
            Orientation::Landscape => (self.paper_height_in, self.paper_width_in),
        }
    }

    pub fn page_size_mm(&self) -> (f32, f32) {
        let (w, h) = self.page_size_in();
        (w * MM_PER_INCH, h * MM_PER_INCH)
    }

    pub fn margin_mm(&self) -> f32 {
        self.margin_in * MM_PER_INCH
    }

    pub fn font_size_mm(&self) -> f32 {
        self.font_size_pt / POINTS_PER_INCH * MM_PER_INCH
    }

    pub fn line_height_mm(&self) -> f32 {
        self.font_size_mm() * self.line_height
    }

    /// Glyphs that fit between the left and right margins. Never below 1.
    pub fn chars_per_line(&self) -> usize {
        let (width_in, _) = self.page_size_in();
        let text_width_pt = (width_in - 2.0 * self.margin_in) * POINTS_PER_INCH;
        let glyph_pt = self.font_size_pt * MONO_ADVANCE_EM;
        ((text_width_pt / glyph_pt).floor() as usize).max(1)
    }

    /// Text lines that fit between the top and bottom margins. Never below 1.
    pub fn lines_per_page(&self) -> usize {
        let (_, height_in) = self.page_size_in();
        let text_height_pt = (height_in - 2.0 * self.margin_in) * POINTS_PER_INCH;
        let line_pt = self.font_size_pt * self.line_height;
        ((text_height_pt / line_pt).floor() as usize).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_us_letter_portrait_with_one_inch_margins() {
        let config = default_page_config();
        assert_eq!(config.page_size_in(), (8.5, 11.0));
        assert_eq!(config.orientation, Orientation::Portrait);
        assert_eq!(config.margin_in, 1.0);
        assert!((config.margin_mm() - 25.4).abs() < 1e-4);
    }

    #[test]
    fn test_default_columns_and_rows() {
        let config = default_page_config();
        // 468pt / 6.62pt = 70.67
        assert_eq!(config.chars_per_line(), 70);
        // 648pt / 15.4pt = 42.08
        assert_eq!(config.lines_per_page(), 42);
    }

    #[test]
    fn test_landscape_swaps_dimensions() {
        let config = PageConfig {
            orientation: Orientation::Landscape,
            ..default_page_config()
        };
        assert_eq!(config.page_size_in(), (11.0, 8.5));
        assert!(config.chars_per_line() > default_page_config().chars_per_line());
        assert!(config.lines_per_page() < default_page_config().lines_per_page());
    }

    #[test]
    fn test_absurd_margins_still_leave_one_slot() {
        let config = PageConfig {
            margin_in: 5.0,
            ..default_page_config()
        };
        assert_eq!(config.chars_per_line(), 1);
        assert_eq!(config.lines_per_page(), 1);
    }
}
