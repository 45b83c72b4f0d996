//! Read access to authorization models.

use std::sync::Arc;

use async_trait::async_trait;

use crate::context::RequestContext;
use crate::error::ModelReadError;
use crate::model::TypeDefinition;

/// Reads type definitions from a stored authorization model.
///
/// Implementations must honour `ctx`: a read issued under a cancelled or
/// expired context fails with [`ModelReadError::Cancelled`] or
/// [`ModelReadError::DeadlineExceeded`].
#[async_trait]
pub trait TypeDefinitionReader: Send + Sync {
    /// Reads the definition of `object_type` in model `model_id` of store `store_id`.
    ///
    /// Returns [`ModelReadError::NotFound`] when the model has no such type.
    async fn read_type_definition(
        &self,
        ctx: &RequestContext,
        store_id: &str,
        model_id: &str,
        object_type: &str,
    ) -> Result<TypeDefinition, ModelReadError>;
}

#[async_trait]
impl<R: TypeDefinitionReader + ?Sized> TypeDefinitionReader for Arc<R> {
    async fn read_type_definition(
        &self,
        ctx: &RequestContext,
        store_id: &str,
        model_id: &str,
        object_type: &str,
    ) -> Result<TypeDefinition, ModelReadError> {
        (**self)
            .read_type_definition(ctx, store_id, model_id, object_type)
            .await
    }
}
