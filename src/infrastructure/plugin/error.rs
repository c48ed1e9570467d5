//! Plugin Errors

use std::path::PathBuf;

use thiserror::Error;

use crate::config::DirectiveError;
use crate::domain::RedirectError;

#[derive(Debug, Error)]
pub enum PluginError {
    #[error("module already registered: {0}")]
    DuplicateModule(String),

    #[error("directive already registered: {0}")]
    DuplicateDirective(String),

    #[error("unknown handler: {0}")]
    UnknownHandler(String),

    #[error("line {line}: unknown directive '{name}'")]
    UnknownDirective { line: usize, name: String },

    #[error("handler config must be a JSON object")]
    NotAnObject,

    #[error("handler config is missing the string field 'handler'")]
    MissingHandlerName,

    #[error("handler file and handler target are mutually exclusive")]
    ConflictingSources,

    #[error("expected exactly one handler, found {0}")]
    HandlerCount(usize),

    #[error("invalid JSON handler config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid directive config: {0}")]
    Directive(#[from] DirectiveError),

    #[error("invalid handler config: {0}")]
    Invalid(#[from] RedirectError),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
