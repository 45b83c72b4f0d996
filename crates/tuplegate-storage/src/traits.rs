//! ModelStore trait definition.

use async_trait::async_trait;
use tuplegate_domain::model::{AuthorizationModel, TypeDefinition};

use crate::error::{StorageError, StorageResult};

/// Maximum allowed store ID length.
pub const MAX_STORE_ID_LENGTH: usize = 255;

/// Maximum allowed store name length.
pub const MAX_STORE_NAME_LENGTH: usize = 256;

/// Store metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Store {
    pub id: String,
    pub name: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// An authorization model as held by a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAuthorizationModel {
    pub store_id: String,
    pub model: AuthorizationModel,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl StoredAuthorizationModel {
    pub fn id(&self) -> &str {
        &self.model.id
    }
}

/// Validates a store ID before it is used as a key.
pub fn validate_store_id(id: &str) -> StorageResult<()> {
    if id.is_empty() {
        return Err(StorageError::InvalidInput {
            message: "store id cannot be empty".to_string(),
        });
    }
    if id.len() > MAX_STORE_ID_LENGTH {
        return Err(StorageError::InvalidInput {
            message: format!(
                "store id exceeds maximum length of {} characters",
                MAX_STORE_ID_LENGTH
            ),
        });
    }
    Ok(())
}

/// Validates a store name.
pub fn validate_store_name(name: &str) -> StorageResult<()> {
    if name.is_empty() {
        return Err(StorageError::InvalidInput {
            message: "store name cannot be empty".to_string(),
        });
    }
    if name.len() > MAX_STORE_NAME_LENGTH {
        return Err(StorageError::InvalidInput {
            message: format!(
                "store name exceeds maximum length of {} characters",
                MAX_STORE_NAME_LENGTH
            ),
        });
    }
    Ok(())
}

/// Abstract storage interface for authorization models.
///
/// Implementations must be thread-safe (Send + Sync) and support
/// async operations.
#[async_trait]
pub trait ModelStore: Send + Sync + 'static {
    // Store operations

    /// Creates a new store.
    async fn create_store(&self, id: &str, name: &str) -> StorageResult<Store>;

    /// Gets a store by ID.
    async fn get_store(&self, id: &str) -> StorageResult<Store>;

    /// Deletes a store together with its models.
    async fn delete_store(&self, id: &str) -> StorageResult<()>;

    /// Lists all stores.
    async fn list_stores(&self) -> StorageResult<Vec<Store>>;

    // Authorization model operations

    /// Writes an authorization model. The model must carry its ID.
    async fn write_authorization_model(
        &self,
        store_id: &str,
        model: AuthorizationModel,
    ) -> StorageResult<StoredAuthorizationModel>;

    /// Gets an authorization model by ID.
    async fn get_authorization_model(
        &self,
        store_id: &str,
        model_id: &str,
    ) -> StorageResult<StoredAuthorizationModel>;

    /// Gets the most recently written authorization model.
    async fn get_latest_authorization_model(
        &self,
        store_id: &str,
    ) -> StorageResult<StoredAuthorizationModel>;

    /// Parses an OpenFGA JSON model and writes it under `model_id`.
    async fn write_authorization_model_json(
        &self,
        store_id: &str,
        model_id: &str,
        json: &str,
    ) -> StorageResult<StoredAuthorizationModel> {
        let mut model =
            AuthorizationModel::from_json(json).map_err(|e| StorageError::SerializationError {
                message: format!("failed to parse model JSON: {}", e),
            })?;
        model.id = model_id.to_string();
        self.write_authorization_model(store_id, model).await
    }

    /// Gets one type definition from a model.
    async fn get_type_definition(
        &self,
        store_id: &str,
        model_id: &str,
        type_name: &str,
    ) -> StorageResult<TypeDefinition> {
        let stored = self.get_authorization_model(store_id, model_id).await?;
        stored
            .model
            .type_definitions
            .into_iter()
            .find(|td| td.type_name == type_name)
            .ok_or_else(|| StorageError::TypeNotFound {
                type_name: type_name.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_store_id() {
        assert!(validate_store_id("01HSTORE").is_ok());
        assert!(matches!(
            validate_store_id(""),
            Err(StorageError::InvalidInput { .. })
        ));
        assert!(validate_store_id(&"s".repeat(MAX_STORE_ID_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_validate_store_name() {
        assert!(validate_store_name("Document Store").is_ok());
        assert!(validate_store_name("").is_err());
        assert!(validate_store_name(&"n".repeat(MAX_STORE_NAME_LENGTH + 1)).is_err());
    }
}
