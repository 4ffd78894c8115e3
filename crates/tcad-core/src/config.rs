//! Pipeline configuration
//!
//! Settings are plain serde structs so they can be loaded from RON files.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Tessellation resolution
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TessellationConfig {
    /// Segments around a cylinder
    pub cylinder_segments: u32,
    /// Latitude bands of a sphere (pole to pole)
    pub sphere_lat_segments: u32,
    /// Longitude segments of a sphere
    pub sphere_lon_segments: u32,
}

impl Default for TessellationConfig {
    fn default() -> Self {
        Self::export()
    }
}

impl TessellationConfig {
    /// Resolution used for file export
    pub fn export() -> Self {
        Self {
            cylinder_segments: CYLINDER_SEGMENTS,
            sphere_lat_segments: SPHERE_LAT_SEGMENTS,
            sphere_lon_segments: SPHERE_LON_SEGMENTS,
        }
    }

    /// Coarser resolution for quick previews
    pub fn preview() -> Self {
        Self {
            cylinder_segments: PREVIEW_CYLINDER_SEGMENTS,
            sphere_lat_segments: PREVIEW_SPHERE_LAT_SEGMENTS,
            sphere_lon_segments: PREVIEW_SPHERE_LON_SEGMENTS,
        }
    }

    /// Check segment bounds.
    ///
    /// Longitude counts must be multiples of 4 and the latitude count even,
    /// so the mesh reaches the analytic extents on every axis.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let counts = [
            ("cylinder_segments", self.cylinder_segments, 4),
            ("sphere_lat_segments", self.sphere_lat_segments, 2),
            ("sphere_lon_segments", self.sphere_lon_segments, 4),
        ];
        for (name, value, multiple) in counts {
            if value == 0 || value > MAX_SEGMENTS {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be between 1 and {MAX_SEGMENTS}, got {value}"
                )));
            }
            if value % multiple != 0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a multiple of {multiple}, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Mesh quality level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Quality {
    #[default]
    Export,
    Preview,
}

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CadConfig {
    /// Resolution for exported meshes
    pub export: TessellationConfig,
    /// Resolution for preview meshes
    pub preview: TessellationConfig,
    /// Maximum primitives a model may hold
    pub max_primitives: usize,
    /// Solid name written to STL output
    pub solid_name: String,
}

impl Default for CadConfig {
    fn default() -> Self {
        Self {
            export: TessellationConfig::export(),
            preview: TessellationConfig::preview(),
            max_primitives: DEFAULT_MAX_PRIMITIVES,
            solid_name: DEFAULT_SOLID_NAME.to_string(),
        }
    }
}

impl CadConfig {
    /// Tessellation settings for a quality level
    pub fn tessellation(&self, quality: Quality) -> &TessellationConfig {
        match quality {
            Quality::Export => &self.export,
            Quality::Preview => &self.preview,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.export.validate()?;
        self.preview.validate()?;
        if self.export.sphere_lat_segments < EXPORT_MIN_SPHERE_SEGMENTS
            || self.export.sphere_lon_segments < EXPORT_MIN_SPHERE_SEGMENTS
        {
            return Err(ConfigError::Invalid(format!(
                "export sphere resolution must be at least {EXPORT_MIN_SPHERE_SEGMENTS} x {EXPORT_MIN_SPHERE_SEGMENTS}"
            )));
        }
        if self.max_primitives == 0 || self.max_primitives > MAX_PRIMITIVES {
            return Err(ConfigError::Invalid(format!(
                "max_primitives must be between 1 and {MAX_PRIMITIVES}, got {}",
                self.max_primitives
            )));
        }
        Ok(())
    }

    /// Parse and validate a RON document
    pub fn from_ron_str(content: &str) -> Result<Self, ConfigError> {
        let config: CadConfig =
            ron::from_str(content).map_err(|e| ConfigError::Deserialize(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a RON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_ron_str(&content)
    }
}

/// Configuration errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Deserialization error: {0}")]
    Deserialize(String),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
