//! Text CAD core
//!
//! Turns strictly-grammared English prompts into primitive solids and
//! watertight triangle meshes:
//! - Units: value + unit token to millimeters
//! - Grammar: fixed sentence templates with keyword-committed errors
//! - Command: prompt to `create` / `add` / `clear`
//! - Model: ordered primitive store (the IR)
//! - Geometry: per-primitive tessellation
//! - Export: ASCII and binary STL
//! - Session: the pipeline driver and its persistence

pub mod command;
pub mod config;
pub mod constants;
pub mod error;
pub mod export;
pub mod geometry;
pub mod grammar;
pub mod model;
pub mod primitive;
pub mod session;
pub mod units;

pub use command::*;
pub use config::*;
pub use constants::*;
pub use error::*;
pub use export::*;
pub use geometry::*;
pub use grammar::*;
pub use model::*;
pub use primitive::*;
pub use session::*;
pub use units::*;
