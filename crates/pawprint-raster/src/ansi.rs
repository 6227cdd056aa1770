//! Terminal preview
//!
//! Renders an image as truecolor half blocks: each character cell shows
//! two vertically stacked pixels, the upper one as foreground of `▀` and
//! the lower one as background.

use crate::compositor::blend_over;
use pawprint_core::ImageFrame;

/// Render `frame` scaled to `columns` characters wide.
///
/// Transparent pixels are flattened onto `background`.
pub fn to_ansi(frame: &ImageFrame, columns: u32, background: [u8; 3]) -> String {
    if frame.width == 0 || frame.height == 0 || columns == 0 {
        return String::new();
    }

    let columns = columns.min(frame.width);
    // square pixels: two source rows per character row
    let pixel_rows = ((frame.height as u64 * columns as u64) / frame.width as u64).max(1) as u32;
    let char_rows = pixel_rows.div_ceil(2);

    let sample = |x: u32, y: u32| -> [u8; 3] {
        let sx = (x as u64 * frame.width as u64 / columns as u64) as u32;
        let sy = (y as u64 * frame.height as u64 / pixel_rows as u64) as u32;
        let px = frame.get_pixel(sx, sy).unwrap_or([0, 0, 0, 0]);
        let [r, g, b, _] = blend_over(px, [background[0], background[1], background[2], 255]);
        [r, g, b]
    };

    let mut output = String::new();
    for row in 0..char_rows {
        let mut last: Option<([u8; 3], [u8; 3])> = None;
        for x in 0..columns {
            let top = sample(x, row * 2);
            let bottom = if row * 2 + 1 < pixel_rows {
                sample(x, row * 2 + 1)
            } else {
                background
            };

            if last != Some((top, bottom)) {
                output.push_str(&format!(
                    "\x1b[38;2;{};{};{}m\x1b[48;2;{};{};{}m",
                    top[0], top[1], top[2], bottom[0], bottom[1], bottom[2]
                ));
                last = Some((top, bottom));
            }
            output.push('▀');
        }
        output.push_str("\x1b[0m\n");
    }

    output
}
