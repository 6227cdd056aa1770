//! Runtime configuration
//!
//! Defaults match the bundled sprite sheet. A JSON file may override any
//! subset of fields; front ends layer their own flags on top.

use crate::sheet::SheetGeometry;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid sheet geometry: {0}")]
    Geometry(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PawprintConfig {
    /// Sprite sheet image
    pub sheet_path: PathBuf,
    /// Grid layout of the sheet
    pub geometry: SheetGeometry,
    /// Width of the preview element (pixels)
    pub display_width: u32,
    /// Upper bound on loading the sheet for export
    pub export_timeout_ms: u64,
    /// Quiet period before a text edit is written
    pub debounce_ms: u64,
    /// Upper bound on acquiring a position
    pub locate_timeout_ms: u64,
    /// Where records are stored; platform data dir when unset
    pub data_dir: Option<PathBuf>,
}

impl Default for PawprintConfig {
    fn default() -> Self {
        Self {
            sheet_path: PathBuf::from("images/avatar-components-spritesheet.png"),
            geometry: SheetGeometry::default(),
            display_width: 256,
            export_timeout_ms: 5_000,
            debounce_ms: 420,
            locate_timeout_ms: 8_000,
            data_dir: None,
        }
    }
}

impl PawprintConfig {
    /// Load from a JSON file; missing fields keep their defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Reject geometries that cannot address any frame, or whose sheet
    /// size does not fit in memory arithmetic
    pub fn validate(&self) -> Result<(), ConfigError> {
        let g = &self.geometry;
        let describe = || {
            format!(
                "{}x{} frames on a {}x{} grid",
                g.frame_width, g.frame_height, g.cols, g.rows
            )
        };

        if g.frame_width == 0 || g.frame_height == 0 || g.cols == 0 || g.rows == 0 {
            return Err(ConfigError::Geometry(describe()));
        }

        let fits = g.cols.checked_mul(g.rows).is_some()
            && g.cols
                .checked_mul(g.frame_width)
                .zip(g.rows.checked_mul(g.frame_height))
                .and_then(|(w, h)| (w as usize).checked_mul(h as usize))
                .and_then(|pixels| pixels.checked_mul(4))
                .is_some();
        if !fits {
            return Err(ConfigError::Geometry(format!("{} is too large", describe())));
        }
        Ok(())
    }

    /// Data directory, falling back to the platform default
    pub fn resolved_data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("pawprint")
        })
    }

    pub fn export_timeout(&self) -> Duration {
        Duration::from_millis(self.export_timeout_ms)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn locate_timeout(&self) -> Duration {
        Duration::from_millis(self.locate_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = PawprintConfig::default();
        assert_eq!(config.geometry.total(), 40);
        assert_eq!(config.debounce(), Duration::from_millis(420));
        assert_eq!(config.locate_timeout(), Duration::from_secs(8));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "debounce_ms": 100, "data_dir": "/tmp/pp" }}"#).unwrap();
        file.flush().unwrap();

        let config = PawprintConfig::load(file.path()).unwrap();
        assert_eq!(config.debounce_ms, 100);
        assert_eq!(config.resolved_data_dir(), PathBuf::from("/tmp/pp"));
        assert_eq!(config.geometry, SheetGeometry::default());
    }

    #[test]
    fn test_zero_geometry_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "geometry": {{ "frame_width": 0, "frame_height": 64, "cols": 4, "rows": 4 }} }}"#
        )
        .unwrap();
        file.flush().unwrap();

        assert!(matches!(
            PawprintConfig::load(file.path()),
            Err(ConfigError::Geometry(_))
        ));
    }

    #[test]
    fn test_oversized_geometry_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "geometry": {{ "frame_width": 70000, "frame_height": 70000, "cols": 70000, "rows": 70000 }} }}"#
        )
        .unwrap();
        file.flush().unwrap();

        assert!(matches!(
            PawprintConfig::load(file.path()),
            Err(ConfigError::Geometry(_))
        ));

        // grid product fits, sheet width does not
        let config = PawprintConfig {
            geometry: SheetGeometry::new(u32::MAX / 2, 1, 4, 1),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Geometry(_))));
    }

    #[test]
    fn test_malformed_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ nope").unwrap();
        file.flush().unwrap();

        assert!(matches!(
            PawprintConfig::load(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }
}
