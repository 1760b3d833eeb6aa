//! Module: patch
//! Responsibility: the "apply" half of the pipeline — turning one
//! `Operation` into a mutation of a `RecordAccessor` and, separately,
//! computing the `Operation` that would undo it.
//! Does not own: validation or relation maintenance — those are
//! `processor` concerns that run before and after this module does its
//! work.
//! Boundary: `operators::apply` assumes the operation has already passed
//! `SchemaValidation`; it never itself returns an `Error`.

pub mod inverse;
pub mod operators;

pub use inverse::compute_inverse;
pub use operators::apply;
