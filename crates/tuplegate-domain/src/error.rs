//! Domain error types for tuple validation.

use thiserror::Error;

use crate::model::Tuple;

/// Boxed error type used for opaque backend failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failure reported by a [`TypeDefinitionReader`](crate::reader::TypeDefinitionReader).
#[derive(Debug, Error)]
pub enum ModelReadError {
    /// No such type (or model, or store) under the requested scope.
    #[error("type definition not found")]
    NotFound,

    /// The request deadline passed before the read completed.
    #[error("deadline exceeded")]
    DeadlineExceeded,

    /// The request was cancelled before the read completed.
    #[error("request cancelled")]
    Cancelled,

    /// Any other backend failure.
    #[error("backend error: {0}")]
    Backend(#[source] BoxError),
}

impl ModelReadError {
    /// Wraps an arbitrary backend error.
    pub fn backend(err: impl Into<BoxError>) -> Self {
        ModelReadError::Backend(err.into())
    }
}

/// Coarse classification of a [`ValidationError`], for dispatch and metric labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorKind {
    InvalidUser,
    InvalidRelation,
    InvalidObjectFormat,
    TypeNotFound,
    RelationNotFound,
    Backend,
}

impl ValidationErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationErrorKind::InvalidUser => "invalid_user",
            ValidationErrorKind::InvalidRelation => "invalid_relation",
            ValidationErrorKind::InvalidObjectFormat => "invalid_object_format",
            ValidationErrorKind::TypeNotFound => "type_not_found",
            ValidationErrorKind::RelationNotFound => "relation_not_found",
            ValidationErrorKind::Backend => "backend",
        }
    }
}

/// Errors returned by tuple validation.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The user field is not a well-formed user identifier.
    #[error("invalid user '{user}' in tuple '{tuple}': {reason}", user = .tuple.user)]
    InvalidUser { tuple: Tuple, reason: &'static str },

    /// The relation field is not a well-formed relation name.
    #[error("invalid relation '{relation}' in tuple '{tuple}'", relation = .tuple.relation)]
    InvalidRelation { tuple: Tuple },

    /// The object field is not in `type:id` form.
    #[error("invalid object format '{object}' in tuple '{tuple}'", object = .tuple.object)]
    InvalidObjectFormat { tuple: Tuple },

    /// The object type is not defined in the authorization model.
    #[error("type not found: {type_name}")]
    TypeNotFound { type_name: String },

    /// The relation is not defined on the object type.
    #[error("relation '{relation}' not found on type '{type_name}' for tuple '{tuple}'")]
    RelationNotFound {
        relation: String,
        type_name: String,
        tuple: Tuple,
    },

    /// The model reader failed for a reason other than not-found.
    #[error(transparent)]
    Backend(ModelReadError),
}

impl ValidationError {
    pub fn kind(&self) -> ValidationErrorKind {
        match self {
            ValidationError::InvalidUser { .. } => ValidationErrorKind::InvalidUser,
            ValidationError::InvalidRelation { .. } => ValidationErrorKind::InvalidRelation,
            ValidationError::InvalidObjectFormat { .. } => ValidationErrorKind::InvalidObjectFormat,
            ValidationError::TypeNotFound { .. } => ValidationErrorKind::TypeNotFound,
            ValidationError::RelationNotFound { .. } => ValidationErrorKind::RelationNotFound,
            ValidationError::Backend(_) => ValidationErrorKind::Backend,
        }
    }

    /// Returns true when the caller supplied an invalid tuple.
    ///
    /// Backend failures are the only server-side errors.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, ValidationError::Backend(_))
    }
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;
