use thiserror::Error;

use crate::model::validate::ModelKind;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Circular type hierarchy: type '{name}' would create a cycle with parent '{parent}'")]
    CircularHierarchy { name: String, parent: String },

    #[error("Inconsistent model types: actions are {actions} but fluents are {fluents}")]
    InconsistentModelKind { actions: ModelKind, fluents: ModelKind },

    #[error("Model validation error: {0}")]
    ModelValidation(String),

    #[error("Object '{object}' of fluent '{fluent}' is not bound to any action parameter")]
    UnboundObject { fluent: String, object: String },

    #[error("Reference '{reference}' of fluent '{fluent}' does not match any action parameter")]
    UnboundParameter { fluent: String, reference: String },

    #[error("Unsupported operation: {0}")]
    Unsupported(&'static str),

    #[error("PDDL language error: {0}")]
    Language(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
