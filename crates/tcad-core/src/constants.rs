//! Global constants for tcad-core

/// Export-quality cylinder segment count
pub const CYLINDER_SEGMENTS: u32 = 36;

/// Preview-quality cylinder segment count
pub const PREVIEW_CYLINDER_SEGMENTS: u32 = 12;

/// Export-quality sphere latitude bands
pub const SPHERE_LAT_SEGMENTS: u32 = 16;

/// Export-quality sphere longitude segments
pub const SPHERE_LON_SEGMENTS: u32 = 32;

/// Preview-quality sphere latitude bands
pub const PREVIEW_SPHERE_LAT_SEGMENTS: u32 = 8;

/// Preview-quality sphere longitude segments
pub const PREVIEW_SPHERE_LON_SEGMENTS: u32 = 12;

/// Minimum sphere bands (both directions) for export quality
pub const EXPORT_MIN_SPHERE_SEGMENTS: u32 = 8;

/// Hard upper bound on any segment count
pub const MAX_SEGMENTS: u32 = 512;

/// Default cap on primitives held by one model
pub const DEFAULT_MAX_PRIMITIVES: usize = 256;

/// Hard upper bound on the configurable primitive cap
pub const MAX_PRIMITIVES: usize = 1024;

/// Smallest accepted dimension; half of it still prints at 6 decimals
pub const MIN_DIMENSION_MM: f64 = 1e-3;

/// Largest accepted dimension (1 km)
pub const MAX_DIMENSION_MM: f64 = 1e6;

/// Relative cross-product length below which a facet normal is zero
pub const NORMAL_EPSILON: f64 = 1e-12;

/// Default solid name written to STL headers
pub const DEFAULT_SOLID_NAME: &str = "model";

/// Model file format version
pub const MODEL_VERSION: u32 = 1;
