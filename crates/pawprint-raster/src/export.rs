//! Avatar export
//!
//! Flattens the selected frames into one frame-sized image and encodes it
//! as PNG. Layers are drawn shirt, skin, hair, hat, expression; absent slots
//! are skipped.

use crate::atlas::{SheetError, SpriteSheet};
use crate::compositor::{LayerCompositor, RenderLayer};
use image::{ImageFormat, RgbaImage};
use pawprint_core::{Category, ImageFrame, SheetGeometry, SpriteSelection};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

/// Export errors
#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Sheet(#[from] SheetError),

    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Image buffer does not match {width}x{height}")]
    Buffer { width: u32, height: u32 },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A flattened avatar
#[derive(Debug, Clone)]
pub struct ExportedAvatar {
    /// Composited pixels, exactly one frame in size
    pub frame: ImageFrame,
    /// Categories that were drawn, bottom to top
    pub layers: Vec<Category>,
}

impl ExportedAvatar {
    /// Encode as PNG
    pub fn to_png(&self) -> Result<Vec<u8>, ExportError> {
        let (width, height) = self.frame.dimensions();
        let img = RgbaImage::from_raw(width, height, self.frame.data.clone())
            .ok_or(ExportError::Buffer { width, height })?;

        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }

    /// Encode and write to `path`
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ExportError> {
        let path = path.as_ref();
        let bytes = self.to_png()?;
        std::fs::write(path, bytes).map_err(|source| ExportError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Stack the selected frames and flatten them onto a transparent surface
/// the size of one frame
pub fn compose_avatar(sheet: &SpriteSheet, selection: &SpriteSelection) -> ExportedAvatar {
    let geometry = sheet.geometry();
    let mut compositor = LayerCompositor::new(geometry.frame_width, geometry.frame_height);
    let mut layers = Vec::new();

    for (z, (category, index)) in selection.layers().enumerate() {
        let Some(frame) = sheet.frame(index) else {
            warn!(%category, index, "Frame is not on the sheet, skipping layer");
            continue;
        };
        compositor.add_layer(RenderLayer::from_frame(category.to_string(), frame).with_z_order(z as i32));
        layers.push(category);
    }

    ExportedAvatar {
        frame: compositor.composite(),
        layers,
    }
}

/// Loads the sheet with a deadline and writes the flattened avatar
#[derive(Debug, Clone)]
pub struct AvatarExporter {
    sheet_path: PathBuf,
    geometry: SheetGeometry,
    timeout: Duration,
}

impl AvatarExporter {
    pub fn new(sheet_path: impl Into<PathBuf>, geometry: SheetGeometry) -> Self {
        Self {
            sheet_path: sheet_path.into(),
            geometry,
            timeout: Duration::from_secs(5),
        }
    }

    /// Bound on loading the sheet
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn sheet_path(&self) -> &Path {
        &self.sheet_path
    }

    /// Load the sheet, flatten the selection and write a PNG to `output`
    pub async fn export(
        &self,
        selection: &SpriteSelection,
        output: impl AsRef<Path>,
    ) -> Result<ExportedAvatar, ExportError> {
        let output = output.as_ref();
        let sheet = SpriteSheet::load_bounded(&self.sheet_path, self.geometry, self.timeout).await?;

        let avatar = compose_avatar(&sheet, selection);
        let bytes = avatar.to_png()?;
        tokio::fs::write(output, &bytes)
            .await
            .map_err(|source| ExportError::Write {
                path: output.to_path_buf(),
                source,
            })?;

        info!(
            path = %output.display(),
            layers = avatar.layers.len(),
            bytes = bytes.len(),
            "Exported avatar"
        );
        Ok(avatar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry() -> SheetGeometry {
        SheetGeometry::new(8, 8, 10, 4)
    }

    /// Every frame paints only its own row band so each layer stays visible
    /// where nothing above it draws.
    fn banded_sheet() -> SpriteSheet {
        let geometry = geometry();
        let (w, h) = geometry.sheet_size();
        let mut image = ImageFrame::new(w, h);

        for (band, category) in Category::DRAW_ORDER.into_iter().enumerate() {
            for index in category.range().iter() {
                let rect = geometry.source_rect(index).unwrap();
                for x in rect.x..rect.x + rect.width {
                    // every layer covers row 0; layer N also owns row N + 1
                    image.set_pixel(x, rect.y, SpriteSheet::pattern_color(index));
                    image.set_pixel(x, rect.y + band as u32 + 1, SpriteSheet::pattern_color(index));
                }
            }
        }

        SpriteSheet::from_frame(image, geometry).unwrap()
    }

    #[test]
    fn test_output_is_one_frame() {
        let sheet = SpriteSheet::test_pattern(geometry());
        let avatar = compose_avatar(&sheet, &SpriteSelection::default());
        assert_eq!(avatar.frame.dimensions(), (8, 8));
    }

    #[test]
    fn test_draw_order() {
        let sheet = banded_sheet();
        let mut selection = SpriteSelection::default();
        selection.set(Category::Hair, 12).unwrap();

        let avatar = compose_avatar(&sheet, &selection);
        assert_eq!(
            avatar.layers,
            vec![
                Category::Shirt,
                Category::Skin,
                Category::Hair,
                Category::Hat,
                Category::Expression
            ]
        );

        // Row 0 is covered by all layers: expression is on top
        assert_eq!(avatar.frame.get_pixel(0, 0), Some(SpriteSheet::pattern_color(30)));
        // Each layer's private row shows that layer
        assert_eq!(avatar.frame.get_pixel(0, 1), Some(SpriteSheet::pattern_color(35)));
        assert_eq!(avatar.frame.get_pixel(0, 2), Some(SpriteSheet::pattern_color(0)));
        assert_eq!(avatar.frame.get_pixel(0, 3), Some(SpriteSheet::pattern_color(12)));
        assert_eq!(avatar.frame.get_pixel(0, 4), Some(SpriteSheet::pattern_color(20)));
        assert_eq!(avatar.frame.get_pixel(0, 5), Some(SpriteSheet::pattern_color(30)));
        // Nothing drew below
        assert_eq!(avatar.frame.get_pixel(0, 7), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_absent_slots_are_skipped() {
        let sheet = banded_sheet();
        let mut selection = SpriteSelection::default();
        selection.clear(Category::Expression);
        selection.clear(Category::Skin);

        let avatar = compose_avatar(&sheet, &selection);
        assert_eq!(avatar.layers, vec![Category::Shirt, Category::Hair, Category::Hat]);
        assert_eq!(avatar.frame.get_pixel(0, 0), Some(SpriteSheet::pattern_color(20)));
        assert_eq!(avatar.frame.get_pixel(0, 2), Some([0, 0, 0, 0]));
        assert_eq!(avatar.frame.get_pixel(0, 5), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_empty_selection_is_transparent() {
        let sheet = SpriteSheet::test_pattern(geometry());
        let mut selection = SpriteSelection::default();
        for category in Category::ALL {
            selection.clear(category);
        }

        let avatar = compose_avatar(&sheet, &selection);
        assert!(avatar.layers.is_empty());
        assert!(avatar.frame.is_transparent());
        assert_eq!(avatar.frame.dimensions(), (8, 8));
    }

    #[test]
    fn test_png_round_trip_dimensions() {
        let sheet = SpriteSheet::test_pattern(geometry());
        let avatar = compose_avatar(&sheet, &SpriteSelection::default());

        let png = avatar.to_png().unwrap();
        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (8, 8));
    }

    #[tokio::test]
    async fn test_export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let sheet_path = dir.path().join("sheet.png");
        let out_path = dir.path().join("avatar.png");

        // Persist a synthetic sheet so the exporter has something to load
        let sheet = SpriteSheet::test_pattern(geometry());
        ExportedAvatar {
            frame: sheet.image().clone(),
            layers: Vec::new(),
        }
        .save(&sheet_path)
        .unwrap();

        let exporter = AvatarExporter::new(&sheet_path, geometry()).with_timeout(Duration::from_secs(5));
        let avatar = exporter
            .export(&SpriteSelection::default(), &out_path)
            .await
            .unwrap();

        assert_eq!(avatar.layers.len(), 5);
        let decoded = image::open(&out_path).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (8, 8));
    }

    #[tokio::test]
    async fn test_export_missing_sheet_fails_explicitly() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = AvatarExporter::new(dir.path().join("missing.png"), geometry());

        let err = exporter
            .export(&SpriteSelection::default(), dir.path().join("avatar.png"))
            .await
            .unwrap_err();

        assert!(matches!(err, ExportError::Sheet(SheetError::Load { .. })));
        assert!(!dir.path().join("avatar.png").exists());
    }
}
