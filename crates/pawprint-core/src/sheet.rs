//! Sprite sheet geometry
//!
//! Frames are laid out row-major on a fixed grid. A frame is addressed by
//! its linear index; everything else (source rectangle, on-screen
//! background offsets) is derived from the grid.

use serde::{Deserialize, Serialize};

/// Grid layout of a sprite sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetGeometry {
    /// Width of one frame (pixels)
    pub frame_width: u32,
    /// Height of one frame (pixels)
    pub frame_height: u32,
    /// Frames per row
    pub cols: u32,
    /// Number of rows
    pub rows: u32,
}

impl Default for SheetGeometry {
    fn default() -> Self {
        Self {
            frame_width: 256,
            frame_height: 256,
            cols: 10,
            rows: 4,
        }
    }
}

/// A rectangle within the sheet (pixels)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// How a layer element shows a frame when the whole sheet is used as its
/// background image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerPlacement {
    /// No frame selected: background cleared
    Hidden,
    /// Sheet scaled to `background_size`, shifted by `position`
    Visible {
        index: u32,
        background_size: (u32, u32),
        position: (i32, i32),
    },
}

impl LayerPlacement {
    pub fn is_hidden(&self) -> bool {
        matches!(self, Self::Hidden)
    }
}

impl SheetGeometry {
    /// Create a geometry
    pub fn new(frame_width: u32, frame_height: u32, cols: u32, rows: u32) -> Self {
        Self {
            frame_width,
            frame_height,
            cols,
            rows,
        }
    }

    /// Total number of frames on the sheet
    pub fn total(&self) -> u32 {
        self.cols * self.rows
    }

    /// Full sheet size in pixels
    pub fn sheet_size(&self) -> (u32, u32) {
        (self.cols * self.frame_width, self.rows * self.frame_height)
    }

    /// Column and row of a linear frame index
    pub fn col_row(&self, index: u32) -> (u32, u32) {
        (index % self.cols, index / self.cols)
    }

    /// Inverse of [`col_row`](Self::col_row)
    pub fn index_of(&self, col: u32, row: u32) -> Option<u32> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        Some(row * self.cols + col)
    }

    /// Whether the index addresses a frame on this sheet
    pub fn contains(&self, index: u32) -> bool {
        index < self.total()
    }

    /// Source rectangle of a frame, or `None` past the end of the sheet
    pub fn source_rect(&self, index: u32) -> Option<SpriteRect> {
        if !self.contains(index) {
            return None;
        }
        let (col, row) = self.col_row(index);
        Some(SpriteRect {
            x: col * self.frame_width,
            y: row * self.frame_height,
            width: self.frame_width,
            height: self.frame_height,
        })
    }

    /// Background size and offset that make one frame exactly fill an
    /// element `display_width` pixels wide.
    ///
    /// Scaling is uniform and driven by width alone; frames are assumed
    /// square-ish. An absent index hides the layer rather than drawing
    /// frame 0.
    pub fn placement(&self, index: Option<u32>, display_width: u32) -> LayerPlacement {
        let Some(index) = index else {
            return LayerPlacement::Hidden;
        };

        let scale = display_width as f64 / self.frame_width as f64;
        let (sheet_w, sheet_h) = self.sheet_size();
        let (col, row) = self.col_row(index);

        let bg_w = (sheet_w as f64 * scale).round() as u32;
        let bg_h = (sheet_h as f64 * scale).round() as u32;
        let pos_x = -((col as f64 * self.frame_width as f64 * scale).round() as i32);
        let pos_y = -((row as f64 * self.frame_height as f64 * scale).round() as i32);

        LayerPlacement::Visible {
            index,
            background_size: (bg_w, bg_h),
            position: (pos_x, pos_y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_col_row() {
        let sheet = SheetGeometry::default();
        assert_eq!(sheet.col_row(0), (0, 0));
        assert_eq!(sheet.col_row(9), (9, 0));
        assert_eq!(sheet.col_row(10), (0, 1));
        assert_eq!(sheet.col_row(34), (4, 3));
        assert_eq!(sheet.col_row(39), (9, 3));
    }

    #[test]
    fn test_col_row_is_bijection() {
        let sheet = SheetGeometry::default();
        let mut seen = HashSet::new();

        for i in 0..sheet.total() {
            let (col, row) = sheet.col_row(i);
            assert_eq!((col, row), (i % sheet.cols, i / sheet.cols));
            assert!(col < sheet.cols && row < sheet.rows);
            assert!(seen.insert((col, row)), "duplicate cell for {}", i);
            assert_eq!(sheet.index_of(col, row), Some(i));
        }

        assert_eq!(seen.len(), 40);
    }

    #[test]
    fn test_source_rect() {
        let sheet = SheetGeometry::default();
        let rect = sheet.source_rect(23).unwrap();
        assert_eq!(rect, SpriteRect { x: 768, y: 512, width: 256, height: 256 });
        assert!(sheet.source_rect(40).is_none());
    }

    #[test]
    fn test_placement_scales_to_display() {
        let sheet = SheetGeometry::default();

        match sheet.placement(Some(12), 128) {
            LayerPlacement::Visible {
                index,
                background_size,
                position,
            } => {
                assert_eq!(index, 12);
                // scale 0.5: sheet 2560x1024 -> 1280x512
                assert_eq!(background_size, (1280, 512));
                assert_eq!(position, (-256, -128));
            }
            LayerPlacement::Hidden => panic!("Expected visible layer"),
        }
    }

    #[test]
    fn test_placement_rounds_offsets() {
        let sheet = SheetGeometry::default();
        // scale 100/256 = 0.390625; col 3 -> 300 exactly, row 1 -> 100
        match sheet.placement(Some(13), 100) {
            LayerPlacement::Visible {
                background_size,
                position,
                ..
            } => {
                assert_eq!(background_size, (1000, 400));
                assert_eq!(position, (-300, -100));
            }
            LayerPlacement::Hidden => panic!("Expected visible layer"),
        }
    }

    #[test]
    fn test_absent_index_hides_layer() {
        let sheet = SheetGeometry::default();
        assert!(sheet.placement(None, 256).is_hidden());
        assert!(!sheet.placement(Some(0), 256).is_hidden());
    }
}
