//! Sprite sheet management
//!
//! Loads the sheet image and hands out individual frames by index.

use pawprint_core::{ImageFrame, SheetGeometry, SpriteRect};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Sheet errors
#[derive(Debug, Error)]
pub enum SheetError {
    #[error("Failed to load sheet {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Sheet is {actual_w}x{actual_h}, grid needs at least {needed_w}x{needed_h}")]
    TooSmall {
        needed_w: u32,
        needed_h: u32,
        actual_w: u32,
        actual_h: u32,
    },

    #[error("Loading sheet {path} timed out after {after:?}")]
    TimedOut { path: PathBuf, after: Duration },

    #[error("Sheet loader task failed: {0}")]
    Task(String),
}

/// A sprite sheet image together with its grid
#[derive(Debug, Clone)]
pub struct SpriteSheet {
    geometry: SheetGeometry,
    image: ImageFrame,
}

impl SpriteSheet {
    /// Wrap an already decoded image. The image must cover the whole grid.
    pub fn from_frame(image: ImageFrame, geometry: SheetGeometry) -> Result<Self, SheetError> {
        let (needed_w, needed_h) = geometry.sheet_size();
        if image.width < needed_w || image.height < needed_h {
            return Err(SheetError::TooSmall {
                needed_w,
                needed_h,
                actual_w: image.width,
                actual_h: image.height,
            });
        }
        Ok(Self { geometry, image })
    }

    /// Load a sheet from an image file
    pub fn load(path: impl AsRef<Path>, geometry: SheetGeometry) -> Result<Self, SheetError> {
        let path = path.as_ref();
        let img = image::open(path)
            .map_err(|source| SheetError::Load {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgba8();

        let (width, height) = img.dimensions();
        debug!(path = %path.display(), width, height, "Decoded sprite sheet");

        let frame = ImageFrame::from_raw(width, height, img.into_raw())
            .ok_or_else(|| SheetError::Task("decoder returned a short buffer".to_string()))?;
        Self::from_frame(frame, geometry)
    }

    /// Load a sheet without blocking the runtime, giving up after `timeout`.
    ///
    /// Every outcome is explicit: a loaded sheet, a load/decode error, or
    /// [`SheetError::TimedOut`].
    pub async fn load_bounded(
        path: impl Into<PathBuf>,
        geometry: SheetGeometry,
        timeout: Duration,
    ) -> Result<Self, SheetError> {
        let path = path.into();
        let task_path = path.clone();
        let task = tokio::task::spawn_blocking(move || Self::load(&task_path, geometry));

        match tokio::time::timeout(timeout, task).await {
            Ok(Ok(result)) => {
                if result.is_ok() {
                    info!(path = %path.display(), "Loaded sprite sheet");
                }
                result
            }
            Ok(Err(join_err)) => Err(SheetError::Task(join_err.to_string())),
            Err(_) => Err(SheetError::TimedOut {
                path,
                after: timeout,
            }),
        }
    }

    /// Synthetic sheet: every frame a solid, distinct color
    pub fn test_pattern(geometry: SheetGeometry) -> Self {
        let (width, height) = geometry.sheet_size();
        let mut image = ImageFrame::new(width, height);

        for index in 0..geometry.total() {
            let color = Self::pattern_color(index);
            if let Some(rect) = geometry.source_rect(index) {
                for y in rect.y..rect.y + rect.height {
                    for x in rect.x..rect.x + rect.width {
                        image.set_pixel(x, y, color);
                    }
                }
            }
        }

        Self { geometry, image }
    }

    /// Color used by [`test_pattern`](Self::test_pattern) for a frame
    pub fn pattern_color(index: u32) -> [u8; 4] {
        [
            (index * 6 % 256) as u8,
            (255 - index * 6 % 256) as u8,
            (index * 37 % 256) as u8,
            255,
        ]
    }

    pub fn geometry(&self) -> SheetGeometry {
        self.geometry
    }

    /// The whole sheet image
    pub fn image(&self) -> &ImageFrame {
        &self.image
    }

    /// Full image dimensions
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Region of a frame, or `None` past the end of the grid
    pub fn region(&self, index: u32) -> Option<SpriteRect> {
        self.geometry.source_rect(index)
    }

    /// Pixels of one frame
    pub fn frame(&self, index: u32) -> Option<ImageFrame> {
        let rect = self.region(index)?;
        Some(self.image.crop(rect.x, rect.y, rect.width, rect.height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_geometry() -> SheetGeometry {
        SheetGeometry::new(4, 4, 10, 4)
    }

    #[test]
    fn test_frame_extraction() {
        let sheet = SpriteSheet::test_pattern(small_geometry());
        assert_eq!(sheet.dimensions(), (40, 16));

        let frame = sheet.frame(13).unwrap();
        assert_eq!(frame.dimensions(), (4, 4));
        assert_eq!(frame.get_pixel(0, 0), Some(SpriteSheet::pattern_color(13)));
        assert_eq!(frame.get_pixel(3, 3), Some(SpriteSheet::pattern_color(13)));

        assert!(sheet.frame(40).is_none());
    }

    #[test]
    fn test_too_small_image_rejected() {
        let image = ImageFrame::new(39, 16);
        let err = SpriteSheet::from_frame(image, small_geometry()).unwrap_err();
        assert!(matches!(err, SheetError::TooSmall { needed_w: 40, .. }));
    }

    #[test]
    fn test_load_garbage_file() {
        let file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        std::fs::write(file.path(), b"definitely not a png").unwrap();

        let err = SpriteSheet::load(file.path(), small_geometry()).unwrap_err();
        assert!(matches!(err, SheetError::Load { .. }));
    }

    #[tokio::test]
    async fn test_load_bounded_missing_file() {
        let err = SpriteSheet::load_bounded(
            "/nonexistent/pawprint-sheet.png",
            small_geometry(),
            Duration::from_secs(5),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, SheetError::Load { .. }));
    }
}
