//! Blocky extruded text
//!
//! Each lit pixel of a 5x7 bitmap glyph becomes a small box. Good enough
//! for a headline like "COMING SOON" without pulling in a font rasterizer.

use piefall_math::Vec3;

use super::MeshData;

/// Glyph width in pixels
pub const GLYPH_WIDTH: usize = 5;
/// Glyph height in pixels
pub const GLYPH_HEIGHT: usize = 7;

/// Bitmap rows for a character, top row first, bit 4 is the leftmost pixel
///
/// Lowercase letters use their uppercase glyph. Returns `None` for
/// characters the font does not cover.
pub fn glyph_rows(c: char) -> Option<[u8; GLYPH_HEIGHT]> {
    let rows = match c.to_ascii_uppercase() {
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => [0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'F' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111],
        'H' => [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'I' => [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'J' => [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100],
        'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'Q' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'W' => [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010],
        'X' => [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' => [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100],
        'Z' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
        '!' => [0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00000, 0b00100],
        '.' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00100],
        ' ' => [0; GLYPH_HEIGHT],
        _ => return None,
    };
    Some(rows)
}

/// Build an extruded text mesh centered on the origin
///
/// `pixel` is the edge length of one glyph pixel and `depth` the extrusion
/// along Z. Characters without a glyph are left blank.
pub fn text_mesh(text: &str, pixel: f32, depth: f32) -> MeshData {
    let mut mesh = MeshData::new();
    let half_depth = depth * 0.5;

    for (column, c) in text.chars().enumerate() {
        let Some(rows) = glyph_rows(c) else {
            log::warn!("No glyph for {:?}, leaving it blank", c);
            continue;
        };
        // One blank pixel column between glyphs
        let origin_x = (column * (GLYPH_WIDTH + 1)) as f32 * pixel;

        for (row, bits) in rows.iter().enumerate() {
            let y = (GLYPH_HEIGHT - 1 - row) as f32 * pixel;
            for px in 0..GLYPH_WIDTH {
                if bits & (1 << (GLYPH_WIDTH - 1 - px)) == 0 {
                    continue;
                }
                let x = origin_x + px as f32 * pixel;
                mesh.push_box(
                    Vec3::new(x, y, -half_depth),
                    Vec3::new(x + pixel, y + pixel, half_depth),
                );
            }
        }
    }

    mesh.center();
    mesh
}
