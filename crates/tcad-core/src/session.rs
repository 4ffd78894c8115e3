//! Pipeline driver
//!
//! A [`Session`] owns the model, the id counter and the configuration.
//! Prompts go in through [`Session::submit`]; meshes and export bytes are
//! derived from the current model on every call.

use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::command::{IdGenerator, parse_command};
use crate::config::{CadConfig, Quality};
use crate::error::Result;
use crate::export::{ExportError, ExportFormat, export_mesh};
use crate::geometry::Mesh;
use crate::model::Model;

/// On-disk form of a session
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SessionData {
    model: Model,
    ids: IdGenerator,
}

/// Model, id counter and configuration for one user
#[derive(Debug, Clone, Default)]
pub struct Session {
    model: Model,
    ids: IdGenerator,
    config: CadConfig,
}

impl Session {
    /// Create an empty session with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty session with a validated configuration
    pub fn with_config(config: CadConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            model: Model::with_limit(config.max_primitives),
            ids: IdGenerator::new(),
            config,
        })
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn config(&self) -> &CadConfig {
        &self.config
    }

    pub fn ids(&self) -> &IdGenerator {
        &self.ids
    }

    /// Parse a prompt and apply it.
    ///
    /// On any error the model and the id counter are left exactly as they
    /// were.
    pub fn submit(&mut self, prompt: &str) -> Result<()> {
        let mut ids = self.ids;
        let command = match parse_command(prompt, &mut ids) {
            Ok(command) => command,
            Err(e) => {
                tracing::warn!(prompt, error = %e, "Rejected prompt");
                return Err(e.into());
            }
        };
        let name = command.name();
        if let Err(e) = self.model.apply(command) {
            tracing::warn!(prompt, error = %e, "Rejected command");
            return Err(e.into());
        }
        self.ids = ids;
        tracing::info!(
            command = name,
            primitives = self.model.len(),
            "Applied command"
        );
        Ok(())
    }

    /// Mesh of the current model at the given quality
    pub fn mesh(&self, quality: Quality) -> Mesh {
        self.model.mesh(self.config.tessellation(quality))
    }

    /// Export the current model at export quality
    pub fn export(&self, format: ExportFormat) -> Result<Vec<u8>> {
        if self.model.is_empty() {
            return Err(ExportError::EmptyModel.into());
        }
        let mesh = self.mesh(Quality::Export);
        Ok(export_mesh(&mesh, format, &self.config.solid_name)?)
    }

    /// Empty the model and restart id numbering
    pub fn reset(&mut self) {
        self.model = Model::with_limit(self.config.max_primitives);
        self.ids.reset();
    }

    /// Serialize model and id counter to RON bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let data = SessionData {
            model: self.model.clone(),
            ids: self.ids,
        };
        let content = ron::ser::to_string_pretty(&data, ron::ser::PrettyConfig::default())
            .map_err(|e| SessionError::Serialize(e.to_string()))?;
        Ok(content.into_bytes())
    }

    /// Save model and id counter to a RON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = self.to_bytes()?;
        std::fs::write(path.as_ref(), content).map_err(|e| SessionError::Io(e.to_string()))?;
        Ok(())
    }

    /// Restore a session from RON bytes, keeping this session's configuration
    pub fn load_from_bytes(data: &[u8], config: CadConfig) -> Result<Self> {
        config.validate()?;
        let content =
            std::str::from_utf8(data).map_err(|e| SessionError::Deserialize(e.to_string()))?;
        let data: SessionData =
            ron::from_str(content).map_err(|e| SessionError::Deserialize(e.to_string()))?;

        let mut model = data.model;
        model
            .validate()
            .map_err(|e| SessionError::Deserialize(e.to_string()))?;
        if model.len() > config.max_primitives {
            return Err(SessionError::TooManyPrimitives {
                found: model.len(),
                limit: config.max_primitives,
            }
            .into());
        }
        model.set_max_primitives(config.max_primitives);

        // Never hand out an id that is already in use
        let next_free = model
            .highest_id_number()
            .checked_add(1)
            .ok_or_else(|| SessionError::Deserialize("primitive ids exhausted".to_string()))?;
        let ids = if data.ids.peek() < next_free {
            IdGenerator::starting_at(next_free)
        } else {
            data.ids
        };

        Ok(Self { model, ids, config })
    }

    /// Restore a session from a RON file
    pub fn load(path: impl AsRef<Path>, config: CadConfig) -> Result<Self> {
        let data = std::fs::read(path.as_ref()).map_err(|e| SessionError::Io(e.to_string()))?;
        Self::load_from_bytes(&data, config)
    }
}

/// Snapshot returned by [`SharedSession::submit`]
#[derive(Debug, Clone)]
pub struct Response {
    pub model: Model,
    pub mesh: Mesh,
}

/// Session shared between threads.
///
/// "apply command → recompute mesh → respond" runs under a single lock.
#[derive(Debug, Clone, Default)]
pub struct SharedSession {
    inner: Arc<Mutex<Session>>,
}

impl SharedSession {
    pub fn new(session: Session) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    /// Apply a prompt and return the resulting model and preview mesh
    pub fn submit(&self, prompt: &str) -> Result<Response> {
        let mut session = self.inner.lock();
        session.submit(prompt)?;
        Ok(Response {
            model: session.model().clone(),
            mesh: session.mesh(Quality::Preview),
        })
    }

    pub fn export(&self, format: ExportFormat) -> Result<Vec<u8>> {
        self.inner.lock().export(format)
    }

    /// Copy of the current model
    pub fn snapshot(&self) -> Model {
        self.inner.lock().model().clone()
    }
}

/// Session persistence errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum SessionError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    Serialize(String),
    #[error("Deserialization error: {0}")]
    Deserialize(String),
    #[error("Saved model holds {found} primitives, limit is {limit}")]
    TooManyPrimitives { found: usize, limit: usize },
}
