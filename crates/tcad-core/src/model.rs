//! The model: an ordered store of primitives
//!
//! The model is only mutated through [`Model::apply`] (and
//! [`Model::push_operation`] for the boolean vocabulary). Every mutation is
//! all-or-nothing.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::command::Command;
use crate::config::TessellationConfig;
use crate::constants::{DEFAULT_MAX_PRIMITIVES, MODEL_VERSION};
use crate::geometry::{Mesh, tessellate_model};
use crate::primitive::Primitive;

/// Boolean operation between two primitives, referenced by id.
///
/// Recorded for forward compatibility; never evaluated into geometry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    Union { target: String, tool: String },
    Difference { target: String, tool: String },
}

impl Operation {
    fn operands(&self) -> [&str; 2] {
        match self {
            Operation::Union { target, tool } | Operation::Difference { target, tool } => {
                [target.as_str(), tool.as_str()]
            }
        }
    }
}

fn default_max_primitives() -> usize {
    DEFAULT_MAX_PRIMITIVES
}

/// Ordered primitive store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    version: u32,
    primitives: Vec<Primitive>,
    #[serde(default)]
    operations: Vec<Operation>,
    #[serde(skip, default = "default_max_primitives")]
    max_primitives: usize,
}

impl Default for Model {
    fn default() -> Self {
        Self::with_limit(DEFAULT_MAX_PRIMITIVES)
    }
}

impl Model {
    /// Create an empty model
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty model holding at most `max_primitives` entries
    pub fn with_limit(max_primitives: usize) -> Self {
        Self {
            version: MODEL_VERSION,
            primitives: Vec::new(),
            operations: Vec::new(),
            max_primitives,
        }
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn max_primitives(&self) -> usize {
        self.max_primitives
    }

    pub fn set_max_primitives(&mut self, max_primitives: usize) {
        self.max_primitives = max_primitives;
    }

    /// Get a primitive by id
    pub fn get(&self, id: &str) -> Option<&Primitive> {
        self.primitives.iter().find(|p| p.id() == id)
    }

    /// Apply a command.
    ///
    /// `Create` replaces everything (operations included), `Add` appends,
    /// `Clear` empties. A rejected `Add` leaves the model unchanged.
    pub fn apply(&mut self, command: Command) -> Result<(), ModelError> {
        match command {
            Command::Clear => {
                self.primitives.clear();
                self.operations.clear();
            }
            Command::Create(primitive) => {
                self.primitives = vec![primitive];
                self.operations.clear();
            }
            Command::Add(primitive) => {
                if self.primitives.len() >= self.max_primitives {
                    return Err(ModelError::TooManyPrimitives(self.max_primitives));
                }
                self.primitives.push(primitive);
            }
        }
        Ok(())
    }

    /// Record a boolean operation; both operands must exist
    pub fn push_operation(&mut self, operation: Operation) -> Result<(), ModelError> {
        if let Some(missing) = operation
            .operands()
            .into_iter()
            .find(|id| self.get(id).is_none())
        {
            return Err(ModelError::PrimitiveNotFound(missing.to_string()));
        }
        self.operations.push(operation);
        Ok(())
    }

    /// Check a model that did not come through [`Model::apply`]: known
    /// version, unique ids, and operations that name existing primitives
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.version != MODEL_VERSION {
            return Err(ModelError::UnsupportedVersion(self.version));
        }
        let mut ids = HashSet::with_capacity(self.primitives.len());
        for primitive in &self.primitives {
            if !ids.insert(primitive.id()) {
                return Err(ModelError::DuplicateId(primitive.id().to_string()));
            }
        }
        for operation in &self.operations {
            if let Some(missing) = operation.operands().into_iter().find(|id| !ids.contains(id)) {
                return Err(ModelError::PrimitiveNotFound(missing.to_string()));
            }
        }
        Ok(())
    }

    /// Derive the mesh for the current contents
    pub fn mesh(&self, config: &TessellationConfig) -> Mesh {
        tessellate_model(self, config)
    }

    /// IR as pretty JSON for external collaborators
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Largest numeric id suffix in use
    pub(crate) fn highest_id_number(&self) -> u64 {
        self.primitives
            .iter()
            .filter_map(|p| p.id().rsplit_once('-'))
            .filter_map(|(_, n)| n.parse::<u64>().ok())
            .max()
            .unwrap_or(0)
    }
}

/// Model mutation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("Model is full: at most {0} primitives")]
    TooManyPrimitives(usize),
    #[error("Primitive not found: {0}")]
    PrimitiveNotFound(String),
    #[error("Duplicate primitive id: {0}")]
    DuplicateId(String),
    #[error("Unsupported model version {0} (expected {expected})", expected = MODEL_VERSION)]
    UnsupportedVersion(u32),
}
