//! The embedded window icon.
//!
//! OTG mode shows no device video, so the window content is a static icon
//! on a solid background.  The artwork is a small monochrome bitmap drawn
//! procedurally into the presentation buffer, scaled by an integer factor
//! and centered, which keeps the binary free of image-decoding
//! dependencies.

/// Background fill, 0RGB.
pub const BACKGROUND: u32 = 0x0022_2222;

/// Foreground (icon) color, 0RGB.
pub const FOREGROUND: u32 = 0x00e6_e6e6;

const ICON_WIDTH: usize = 16;
const ICON_HEIGHT: usize = 16;

// A 16x16 keyboard-and-mouse glyph, one u16 row per scanline, MSB left.
const ICON_ROWS: [u16; ICON_HEIGHT] = [
    0b0000000000000000,
    0b0111111111000110,
    0b0100000001001111,
    0b0101010101001111,
    0b0100000001001111,
    0b0101010101001001,
    0b0100000001001001,
    0b0101111101001001,
    0b0100000001001001,
    0b0111111111001111,
    0b0000000000000110,
    0b0000000000000000,
    0b0000011111100000,
    0b0000010000100000,
    0b0000011111100000,
    0b0000000000000000,
];

/// Paints the icon into a `width * height` 0RGB buffer.
///
/// The icon is scaled by the largest integer factor that fits (minimum 1)
/// and centered.  Pixels outside the glyph get [`BACKGROUND`].
pub fn draw(buffer: &mut [u32], width: u32, height: u32) {
    let width = width as usize;
    let height = height as usize;
    debug_assert!(buffer.len() >= width * height);

    buffer[..width * height].fill(BACKGROUND);
    if width == 0 || height == 0 {
        return;
    }

    let scale = (width / ICON_WIDTH).min(height / ICON_HEIGHT).max(1);
    let draw_w = ICON_WIDTH * scale;
    let draw_h = ICON_HEIGHT * scale;
    let off_x = width.saturating_sub(draw_w) / 2;
    let off_y = height.saturating_sub(draw_h) / 2;

    for (row_idx, row) in ICON_ROWS.iter().enumerate() {
        for col_idx in 0..ICON_WIDTH {
            if row & (0x8000 >> col_idx) == 0 {
                continue;
            }
            for sy in 0..scale {
                let y = off_y + row_idx * scale + sy;
                if y >= height {
                    continue;
                }
                for sx in 0..scale {
                    let x = off_x + col_idx * scale + sx;
                    if x < width {
                        buffer[y * width + x] = FOREGROUND;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_fills_background_everywhere_outside_the_glyph() {
        let mut buffer = vec![0u32; 16 * 16];

        draw(&mut buffer, 16, 16);

        // Top-left corner row is empty in the bitmap.
        assert_eq!(buffer[0], BACKGROUND);
        // At 1x scale the glyph's first frame pixel is at (1, 1).
        assert_eq!(buffer[16 + 1], FOREGROUND);
    }

    #[test]
    fn test_draw_scales_and_centers_in_a_larger_buffer() {
        let mut buffer = vec![0u32; 256 * 256];

        draw(&mut buffer, 256, 256);

        assert!(buffer.contains(&FOREGROUND));
        // Centered 16x scale leaves the extreme corners untouched.
        assert_eq!(buffer[0], BACKGROUND);
        assert_eq!(buffer[256 * 256 - 1], BACKGROUND);
    }

    #[test]
    fn test_draw_handles_buffers_smaller_than_the_glyph() {
        let mut buffer = vec![0u32; 8 * 8];

        // Must not panic even though the glyph cannot fully fit.
        draw(&mut buffer, 8, 8);
    }
}
