//! In-memory model storage.
//!
//! Uses `DashMap` for concurrent access without a global lock. Models are
//! kept per store in insertion order, newest last.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::instrument;
use tuplegate_domain::model::{AuthorizationModel, TypeDefinition};

use crate::config::StorageConfig;
use crate::error::{StorageError, StorageResult};
use crate::traits::{
    validate_store_id, validate_store_name, ModelStore, Store, StoredAuthorizationModel,
};

/// In-memory implementation of [`ModelStore`].
#[derive(Debug, Default)]
pub struct MemoryModelStore {
    config: StorageConfig,
    stores: DashMap<String, Store>,
    /// Authorization models keyed by store_id, newest at the end.
    authorization_models: DashMap<String, Vec<StoredAuthorizationModel>>,
}

impl MemoryModelStore {
    /// Creates a new in-memory store with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new in-memory store with the given configuration.
    pub fn with_config(config: StorageConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Creates a new in-memory store wrapped in Arc.
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    fn ensure_store(&self, store_id: &str) -> StorageResult<()> {
        validate_store_id(store_id)?;
        if !self.stores.contains_key(store_id) {
            return Err(StorageError::StoreNotFound {
                store_id: store_id.to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ModelStore for MemoryModelStore {
    async fn create_store(&self, id: &str, name: &str) -> StorageResult<Store> {
        validate_store_id(id)?;
        validate_store_name(name)?;

        let now = chrono::Utc::now();
        let store = Store {
            id: id.to_string(),
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        };

        // Entry API keeps check-and-insert atomic
        match self.stores.entry(id.to_string()) {
            Entry::Occupied(_) => {
                return Err(StorageError::StoreAlreadyExists {
                    store_id: id.to_string(),
                });
            }
            Entry::Vacant(entry) => {
                entry.insert(store.clone());
            }
        }

        // Replace rather than reuse any list left behind by a racing delete.
        self.authorization_models.insert(id.to_string(), Vec::new());

        Ok(store)
    }

    async fn get_store(&self, id: &str) -> StorageResult<Store> {
        self.stores
            .get(id)
            .map(|s| s.value().clone())
            .ok_or_else(|| StorageError::StoreNotFound {
                store_id: id.to_string(),
            })
    }

    async fn delete_store(&self, id: &str) -> StorageResult<()> {
        if self.stores.remove(id).is_none() {
            return Err(StorageError::StoreNotFound {
                store_id: id.to_string(),
            });
        }
        self.authorization_models.remove(id);
        Ok(())
    }

    async fn list_stores(&self) -> StorageResult<Vec<Store>> {
        let mut stores: Vec<Store> = self.stores.iter().map(|s| s.value().clone()).collect();
        stores.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(stores)
    }

    #[instrument(skip(self, model), fields(model_id = %model.id))]
    async fn write_authorization_model(
        &self,
        store_id: &str,
        model: AuthorizationModel,
    ) -> StorageResult<StoredAuthorizationModel> {
        self.ensure_store(store_id)?;

        if model.id.is_empty() {
            return Err(StorageError::InvalidInput {
                message: "authorization model id cannot be empty".to_string(),
            });
        }
        if model.type_definitions.is_empty() {
            return Err(StorageError::InvalidInput {
                message: "authorization model must have at least one type definition"
                    .to_string(),
            });
        }

        let mut models = self
            .authorization_models
            .get_mut(store_id)
            .ok_or_else(|| StorageError::StoreNotFound {
                store_id: store_id.to_string(),
            })?;

        if models.iter().any(|m| m.model.id == model.id) {
            return Err(StorageError::ModelAlreadyExists { model_id: model.id });
        }
        if models.len() >= self.config.max_models_per_store {
            return Err(StorageError::ModelLimitExceeded {
                store_id: store_id.to_string(),
                limit: self.config.max_models_per_store,
            });
        }

        let stored = StoredAuthorizationModel {
            store_id: store_id.to_string(),
            model,
            created_at: chrono::Utc::now(),
        };
        models.push(stored.clone());

        Ok(stored)
    }

    async fn get_authorization_model(
        &self,
        store_id: &str,
        model_id: &str,
    ) -> StorageResult<StoredAuthorizationModel> {
        self.ensure_store(store_id)?;

        self.authorization_models
            .get(store_id)
            .and_then(|models| models.iter().find(|m| m.model.id == model_id).cloned())
            .ok_or_else(|| StorageError::ModelNotFound {
                model_id: model_id.to_string(),
            })
    }

    async fn get_latest_authorization_model(
        &self,
        store_id: &str,
    ) -> StorageResult<StoredAuthorizationModel> {
        self.ensure_store(store_id)?;

        self.authorization_models
            .get(store_id)
            .and_then(|models| models.last().cloned())
            .ok_or_else(|| StorageError::ModelNotFound {
                model_id: "latest".to_string(),
            })
    }

    async fn get_type_definition(
        &self,
        store_id: &str,
        model_id: &str,
        type_name: &str,
    ) -> StorageResult<TypeDefinition> {
        self.ensure_store(store_id)?;

        let models = self.authorization_models.get(store_id).ok_or_else(|| {
            StorageError::StoreNotFound {
                store_id: store_id.to_string(),
            }
        })?;
        let stored = models
            .iter()
            .find(|m| m.model.id == model_id)
            .ok_or_else(|| StorageError::ModelNotFound {
                model_id: model_id.to_string(),
            })?;

        // Clone only the requested definition while the read guard is held.
        stored
            .model
            .type_definition(type_name)
            .cloned()
            .ok_or_else(|| StorageError::TypeNotFound {
                type_name: type_name.to_string(),
            })
    }
}
