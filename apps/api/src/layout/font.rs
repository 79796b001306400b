//! The embedded letter face: DejaVu Sans Mono.
//!
//! Every glyph advances 1233/2048 em, so `page_config` can compute columns
//! exactly. Characters without a glyph in the face are reported up front so
//! a PDF is never produced with text silently missing.

use anyhow::{anyhow, Result};
use owned_ttf_parser::Face;

pub const LETTER_FONT_TTF: &[u8] = include_bytes!("../../assets/fonts/DejaVuSansMono.ttf");

/// Horizontal advance of every glyph in the letter face, in em.
pub const MONO_ADVANCE_EM: f32 = 1233.0 / 2048.0;

fn letter_face() -> Result<Face<'static>> {
    Face::parse(LETTER_FONT_TTF, 0).map_err(|e| anyhow!("failed to parse letter font: {e}"))
}

/// Visible characters of `lines` that the letter face cannot draw, in order of
/// first appearance. Control characters are ignored.
pub fn unsupported_chars<'a>(lines: impl IntoIterator<Item = &'a str>) -> Result<Vec<char>> {
    let face = letter_face()?;
    let mut missing = Vec::new();
    for c in lines.into_iter().flat_map(str::chars) {
        if c.is_control() || missing.contains(&c) {
            continue;
        }
        if face.glyph_index(c).is_none() {
            missing.push(c);
        }
    }
    Ok(missing)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_is_monospaced_at_declared_advance() {
        let face = letter_face().unwrap();
        let units_per_em = f32::from(face.units_per_em());
        for c in (' '..='~').chain("ŁŻółćΚαλέЯя€".chars()) {
            let glyph = face.glyph_index(c).unwrap();
            let advance = f32::from(face.glyph_hor_advance(glyph).unwrap());
            assert_eq!(advance / units_per_em, MONO_ADVANCE_EM, "advance of {c:?}");
        }
    }

    #[test]
    fn test_latin_greek_cyrillic_are_supported() {
        let missing =
            unsupported_chars(["Regards, Łukasz Żółć", "Καλημέρα", "До свидания"]).unwrap();
        assert!(missing.is_empty(), "unexpected gaps: {missing:?}");
    }

    #[test]
    fn test_cjk_is_reported_once_per_char() {
        let missing = unsupported_chars(["敬具 山田", "敬具"]).unwrap();
        assert_eq!(missing, vec!['敬', '具', '山', '田']);
    }

    #[test]
    fn test_control_characters_are_ignored() {
        assert!(unsupported_chars(["a\u{7}b"]).unwrap().is_empty());
    }
}
