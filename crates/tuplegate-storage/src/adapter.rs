//! Adapter that bridges the storage layer to the domain layer.
//!
//! The domain layer defines [`TypeDefinitionReader`]; this module provides
//! an implementation over any [`ModelStore`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::instrument;
use tuplegate_domain::model::TypeDefinition;
use tuplegate_domain::{ModelReadError, RequestContext, TypeDefinitionReader};

use crate::config::StorageConfig;
use crate::metrics::execute_with_timeout_and_metrics;
use crate::traits::ModelStore;

/// Implements [`TypeDefinitionReader`] using a [`ModelStore`].
///
/// Each read is bounded by both the request context and the configured
/// read timeout. A context deadline surfaces as
/// [`ModelReadError::DeadlineExceeded`]; the storage timeout surfaces as a
/// backend error wrapping `StorageError::QueryTimeout`.
pub struct ModelStoreReader<S: ModelStore> {
    storage: Arc<S>,
    read_timeout: Duration,
}

impl<S: ModelStore> ModelStoreReader<S> {
    /// Creates a new adapter wrapping the given storage.
    pub fn new(storage: Arc<S>, config: &StorageConfig) -> Self {
        Self {
            storage,
            read_timeout: config.read_timeout(),
        }
    }

    pub fn storage(&self) -> &Arc<S> {
        &self.storage
    }
}

#[async_trait]
impl<S: ModelStore> TypeDefinitionReader for ModelStoreReader<S> {
    #[instrument(skip(self, ctx), fields(timeout_ms = self.read_timeout.as_millis() as u64))]
    async fn read_type_definition(
        &self,
        ctx: &RequestContext,
        store_id: &str,
        model_id: &str,
        object_type: &str,
    ) -> Result<TypeDefinition, ModelReadError> {
        ctx.run(async {
            execute_with_timeout_and_metrics(
                "read_type_definition",
                self.read_timeout,
                self.storage
                    .get_type_definition(store_id, model_id, object_type),
            )
            .await
            .map_err(ModelReadError::from)
        })
        .await
    }
}
