//! PDF writer for paginated letter text.
//!
//! CPU-bound: callers on the async runtime must run this inside
//! `tokio::task::spawn_blocking`.

use anyhow::{anyhow, bail, Result};
use printpdf::{Mm, PdfDocument};

use crate::layout::font::{unsupported_chars, LETTER_FONT_TTF};
use crate::layout::page_config::PageConfig;

const LAYER_NAME: &str = "Letter";

/// Writes one PDF page per entry in `pages`, each line set in the embedded
/// monospace face at the configured size, starting one line-height below the
/// top margin.
///
/// Fails without producing a document if any visible character has no glyph.
pub fn render_pdf(title: &str, pages: &[Vec<String>], config: &PageConfig) -> Result<Vec<u8>> {
    let missing = unsupported_chars(pages.iter().flatten().map(String::as_str))?;
    if !missing.is_empty() {
        let listed: String = missing.iter().take(10).collect();
        bail!("letter contains characters the PDF font cannot draw: {listed}");
    }

    let (width_mm, height_mm) = config.page_size_mm();
    let margin_mm = config.margin_mm();
    let line_height_mm = config.line_height_mm();
    let first_baseline_mm = height_mm - margin_mm - config.font_size_mm();

    let (doc, first_page, first_layer) =
        PdfDocument::new(title, Mm(width_mm), Mm(height_mm), LAYER_NAME);
    let font = doc
        .add_external_font(LETTER_FONT_TTF)
        .map_err(|e| anyhow!("failed to embed letter font: {e:?}"))?;

    for (page_index, lines) in pages.iter().enumerate() {
        let (page, layer) = if page_index == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(Mm(width_mm), Mm(height_mm), LAYER_NAME)
        };
        let layer = doc.get_page(page).get_layer(layer);

        for (row, line) in lines.iter().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let baseline_mm = first_baseline_mm - row as f32 * line_height_mm;
            layer.use_text(
                line.as_str(),
                config.font_size_pt,
                Mm(margin_mm),
                Mm(baseline_mm),
                &font,
            );
        }
    }

    doc.save_to_bytes()
        .map_err(|e| anyhow!("failed to serialize PDF: {e:?}"))
}
