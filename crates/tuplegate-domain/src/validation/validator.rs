//! Handle bundling a model reader with a call counter.

use std::sync::Arc;

use crate::context::RequestContext;
use crate::counter::DbCallCounter;
use crate::error::ValidationResult;
use crate::model::{Tuple, Userset};
use crate::reader::TypeDefinitionReader;

/// Validates tuples against a shared reader, reporting reads to a shared counter.
///
/// Holds nothing but the two handles, so clones are cheap and a single
/// instance can serve concurrent requests.
pub struct TupleValidator<R, C>
where
    R: TypeDefinitionReader + ?Sized,
    C: DbCallCounter + ?Sized,
{
    reader: Arc<R>,
    counter: Arc<C>,
}

impl<R, C> TupleValidator<R, C>
where
    R: TypeDefinitionReader + ?Sized,
    C: DbCallCounter + ?Sized,
{
    pub fn new(reader: Arc<R>, counter: Arc<C>) -> Self {
        Self { reader, counter }
    }

    pub fn reader(&self) -> &Arc<R> {
        &self.reader
    }

    pub fn counter(&self) -> &Arc<C> {
        &self.counter
    }

    /// See [`validate_tuple`](super::validate_tuple).
    pub async fn validate_tuple(
        &self,
        ctx: &RequestContext,
        store_id: &str,
        model_id: &str,
        tuple: &Tuple,
    ) -> ValidationResult<Userset> {
        super::validate_tuple(
            ctx,
            &*self.reader,
            store_id,
            model_id,
            tuple,
            &self.counter,
        )
        .await
    }

    /// See [`validate_objects_relations`](super::validate_objects_relations).
    pub async fn validate_objects_relations(
        &self,
        ctx: &RequestContext,
        store_id: &str,
        model_id: &str,
        tuple: &Tuple,
    ) -> ValidationResult<Userset> {
        super::validate_objects_relations(
            ctx,
            &*self.reader,
            store_id,
            model_id,
            tuple,
            &self.counter,
        )
        .await
    }
}

impl<R, C> Clone for TupleValidator<R, C>
where
    R: TypeDefinitionReader + ?Sized,
    C: DbCallCounter + ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            reader: Arc::clone(&self.reader),
            counter: Arc::clone(&self.counter),
        }
    }
}
