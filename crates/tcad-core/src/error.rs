//! Crate-level error for callers driving the whole pipeline

use crate::config::ConfigError;
use crate::export::ExportError;
use crate::grammar::PromptError;
use crate::model::ModelError;
use crate::session::SessionError;

/// Any failure along prompt → model → mesh → bytes
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Prompt(#[from] PromptError),
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Result alias for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;
