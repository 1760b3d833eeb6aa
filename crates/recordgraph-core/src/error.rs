//! Module: error
//! Responsibility: the cache's public error taxonomy. There
//! is no local recovery anywhere in this crate — every fallible path
//! returns one of these variants and lets the caller decide.
//! Does not own: schema-declaration errors raised while building a
//! `SchemaRegistry` (`recordgraph_schema::error::SchemaBuildError`).
//! Boundary: `Error` is returned by `Cache::patch`, `Cache::patch_batch`,
//! and every `Query` evaluation; nothing below the pipeline panics.

use thiserror::Error as ThisError;

use crate::identity::Identity;

///
/// SchemaValidationError
///
/// Why a single operation failed schema validation, raised by the
/// `SchemaValidation` processor. Carries enough detail to build a
/// precise `Error::SchemaValidation` message without the caller needing
/// to re-walk the operation.
///

#[derive(Debug, ThisError, PartialEq, Eq)]
pub enum SchemaValidationError {
    #[error("model '{0}' is not declared in the schema")]
    UnknownModel(String),

    #[error("model '{model}' has no attribute '{attribute}'")]
    UnknownAttribute { model: String, attribute: String },

    #[error("model '{model}' has no key '{key}'")]
    UnknownKey { model: String, key: String },

    #[error("model '{model}' has no relationship '{relationship}'")]
    UnknownRelationship { model: String, relationship: String },

    #[error(
        "relationship '{model}.{relationship}' expects a related model of '{expected}', got '{actual}'"
    )]
    WrongRelatedModel {
        model: String,
        relationship: String,
        expected: String,
        actual: String,
    },

    #[error(
        "relationship '{model}.{relationship}' is hasOne and cannot accept a list of targets"
    )]
    CardinalityMismatch { model: String, relationship: String },
}

///
/// Error
///
/// The cache's top-level, public error type. Every variant names one of
/// the four ways a cache operation can fail; there is no
/// catch-all "internal error" variant because every failure mode in this
/// crate is already named here.
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("schema validation failed: {0}")]
    SchemaValidation(SchemaValidationError),

    #[error("record not found: {0:?}")]
    RecordNotFound(Identity),

    #[error("invalid query expression: {0}")]
    QueryExpressionParse(String),

    /// The op set is closed: every `Operation`/`Query` tag
    /// has a match arm in `patch::operators`, `patch::inverse`, and
    /// `query::evaluator`, so this variant is never actually constructed
    /// by this crate. Kept for parity with the rest of this taxonomy,
    /// and as the seam a host embedding a custom op/query tag would raise
    /// through.
    #[error("no operator registered for '{0}'")]
    OperatorNotFound(String),
}

impl From<SchemaValidationError> for Error {
    fn from(err: SchemaValidationError) -> Self {
        Self::SchemaValidation(err)
    }
}
