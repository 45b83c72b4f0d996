//! Storage error types.

use std::time::Duration;

use thiserror::Error;
use tuplegate_domain::ModelReadError;

/// Storage-specific errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Store not found.
    #[error("store not found: {store_id}")]
    StoreNotFound { store_id: String },

    /// Store already exists.
    #[error("store already exists: {store_id}")]
    StoreAlreadyExists { store_id: String },

    /// Model not found.
    #[error("model not found: {model_id}")]
    ModelNotFound { model_id: String },

    /// Model already exists in the store.
    #[error("model already exists: {model_id}")]
    ModelAlreadyExists { model_id: String },

    /// Type not defined in the model.
    #[error("type not found: {type_name}")]
    TypeNotFound { type_name: String },

    /// Store holds the maximum number of models.
    #[error("store {store_id} already holds the maximum of {limit} models")]
    ModelLimitExceeded { store_id: String, limit: usize },

    /// Query exceeded its configured timeout.
    #[error("query timeout: {operation} exceeded {timeout:?}")]
    QueryTimeout {
        operation: String,
        timeout: Duration,
    },

    /// Invalid input error.
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    /// Serialization error.
    #[error("serialization error: {message}")]
    SerializationError { message: String },

    /// Internal error.
    #[error("internal storage error: {message}")]
    InternalError { message: String },
}

impl StorageError {
    /// Returns true for errors meaning "nothing stored under that key".
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StorageError::StoreNotFound { .. }
                | StorageError::ModelNotFound { .. }
                | StorageError::TypeNotFound { .. }
        )
    }
}

/// Store, model and type misses all mean the type is not defined under
/// the requested scope; every other failure is an opaque backend error.
impl From<StorageError> for ModelReadError {
    fn from(err: StorageError) -> Self {
        if err.is_not_found() {
            ModelReadError::NotFound
        } else {
            ModelReadError::backend(err)
        }
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_errors_map_to_not_found() {
        let errors = [
            StorageError::StoreNotFound {
                store_id: "s".to_string(),
            },
            StorageError::ModelNotFound {
                model_id: "m".to_string(),
            },
            StorageError::TypeNotFound {
                type_name: "t".to_string(),
            },
        ];
        for err in errors {
            assert!(matches!(ModelReadError::from(err), ModelReadError::NotFound));
        }
    }

    #[test]
    fn test_other_errors_map_to_backend() {
        let err = StorageError::QueryTimeout {
            operation: "read_type_definition".to_string(),
            timeout: Duration::from_secs(5),
        };
        match ModelReadError::from(err) {
            ModelReadError::Backend(source) => {
                let storage = source.downcast_ref::<StorageError>().unwrap();
                assert!(matches!(storage, StorageError::QueryTimeout { .. }));
            }
            other => panic!("expected Backend, got {:?}", other),
        }
    }
}
