//! RGBA pixel buffer
//!
//! The common currency between the sprite sheet, the layer compositor and
//! the exporter.

/// RGBA8 image, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFrame {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Raw pixel data, 4 bytes per pixel
    pub data: Vec<u8>,
}

impl ImageFrame {
    /// Fully transparent frame
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }
    }

    /// Wrap existing RGBA data. Returns `None` if the length does not match.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        let expected = (width as usize).checked_mul(height as usize).and_then(|p| p.checked_mul(4));
        if expected != Some(data.len()) {
            return None;
        }
        Some(Self {
            width,
            height,
            data,
        })
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Get pixel at position
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y * self.width + x) * 4) as usize;
        Some([
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ])
    }

    /// Set pixel at position; out-of-bounds writes are ignored
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = ((y * self.width + x) * 4) as usize;
        self.data[idx..idx + 4].copy_from_slice(&rgba);
    }

    /// Copy out a sub-rectangle. Parts outside the frame come back
    /// transparent.
    pub fn crop(&self, x: u32, y: u32, width: u32, height: u32) -> ImageFrame {
        let mut out = ImageFrame::new(width, height);
        for dy in 0..height {
            for dx in 0..width {
                if let Some(pixel) = self.get_pixel(x + dx, y + dy) {
                    out.set_pixel(dx, dy, pixel);
                }
            }
        }
        out
    }

    /// Whether every pixel has zero alpha
    pub fn is_transparent(&self) -> bool {
        self.data.chunks_exact(4).all(|p| p[3] == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_frame() {
        let mut frame = ImageFrame::new(100, 100);
        assert!(frame.is_transparent());

        frame.set_pixel(50, 50, [255, 0, 0, 255]);
        assert_eq!(frame.get_pixel(50, 50), Some([255, 0, 0, 255]));
        assert_eq!(frame.get_pixel(100, 0), None);
        assert!(!frame.is_transparent());
    }

    #[test]
    fn test_from_raw_checks_length() {
        assert!(ImageFrame::from_raw(2, 2, vec![0; 16]).is_some());
        assert!(ImageFrame::from_raw(2, 2, vec![0; 15]).is_none());
    }

    #[test]
    fn test_crop() {
        let mut frame = ImageFrame::new(4, 4);
        frame.set_pixel(2, 3, [1, 2, 3, 255]);

        let cropped = frame.crop(2, 2, 4, 4);
        assert_eq!(cropped.dimensions(), (4, 4));
        assert_eq!(cropped.get_pixel(0, 1), Some([1, 2, 3, 255]));
        // Beyond the source stays transparent
        assert_eq!(cropped.get_pixel(3, 3), Some([0, 0, 0, 0]));
    }
}
