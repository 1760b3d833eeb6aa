//! Module: error
//! Responsibility: errors raised while assembling a `SchemaRegistry`.
//! Does not own: runtime schema-validation errors raised against records
//! (those are `recordgraph_core::error::SchemaValidationError`).
//! Boundary: these errors can only occur at `SchemaRegistryBuilder::build`
//! time, never while the core is running a patch or a query.

use thiserror::Error as ThisError;

///
/// SchemaBuildError
/// Internal taxonomy for malformed schema declarations.
///

#[derive(Debug, ThisError)]
pub enum SchemaBuildError {
    #[error("model '{0}' is declared more than once")]
    DuplicateModel(String),

    #[error("relationship '{model}.{relationship}' targets undeclared model '{target}'")]
    UnknownTargetModel {
        model: String,
        relationship: String,
        target: String,
    },

    #[error(
        "relationship '{model}.{relationship}' declares inverse '{inverse}' which is not \
         declared on model '{target}'"
    )]
    UnknownInverse {
        model: String,
        relationship: String,
        target: String,
        inverse: String,
    },
}
