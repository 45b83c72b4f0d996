//! Tuple validation against a stored authorization model.
//!
//! Validation runs a fixed sequence of gates; the first failing gate ends it:
//!
//! 1. user syntax ([`validate_tuple`] only)
//! 2. relation syntax
//! 3. object syntax
//! 4. non-empty object type and id
//! 5. type definition read (one counted backend read)
//! 6. relation lookup on the type definition
//!
//! All syntax gates run before the backend is touched, so malformed tuples
//! never cost a model read.

mod validator;

#[cfg(test)]
mod tests;

pub use validator::TupleValidator;

use tracing::{debug, instrument};

use crate::context::RequestContext;
use crate::counter::DbCallCounter;
use crate::error::{ModelReadError, ValidationError, ValidationResult};
use crate::model::{Tuple, Userset};
use crate::reader::TypeDefinitionReader;
use crate::tuple;

/// Validates every field of `tuple` and resolves its relation.
///
/// Returns the userset defining `tuple.relation` on the object's type.
/// A malformed user fails with [`ValidationError::InvalidUser`] before any
/// other check runs and without touching `counter` or `reader`.
#[instrument(
    skip_all,
    fields(store_id = %store_id, model_id = %model_id, object = %tuple.object, relation = %tuple.relation)
)]
pub async fn validate_tuple<R>(
    ctx: &RequestContext,
    reader: &R,
    store_id: &str,
    model_id: &str,
    tuple: &Tuple,
    counter: &dyn DbCallCounter,
) -> ValidationResult<Userset>
where
    R: TypeDefinitionReader + ?Sized,
{
    tuple::validate_user(tuple)?;
    validate_objects_relations(ctx, reader, store_id, model_id, tuple, counter).await
}

/// Validates the relation and object of `tuple` and resolves the relation.
///
/// The user field is not inspected. Exactly one read is recorded on
/// `counter` when the syntax checks pass, whatever the read's outcome.
/// Reader failures other than not-found are returned unchanged as
/// [`ValidationError::Backend`].
#[instrument(
    skip_all,
    fields(store_id = %store_id, model_id = %model_id, object = %tuple.object, relation = %tuple.relation)
)]
pub async fn validate_objects_relations<R>(
    ctx: &RequestContext,
    reader: &R,
    store_id: &str,
    model_id: &str,
    tuple: &Tuple,
    counter: &dyn DbCallCounter,
) -> ValidationResult<Userset>
where
    R: TypeDefinitionReader + ?Sized,
{
    if !tuple::is_valid_relation(&tuple.relation) {
        return Err(ValidationError::InvalidRelation {
            tuple: tuple.clone(),
        });
    }
    if !tuple::is_valid_object(&tuple.object) {
        return Err(ValidationError::InvalidObjectFormat {
            tuple: tuple.clone(),
        });
    }

    // The object grammar admits empty halves such as ":".
    let (object_type, object_id) = tuple::split_object(&tuple.object);
    if object_type.is_empty() || object_id.is_empty() {
        return Err(ValidationError::InvalidObjectFormat {
            tuple: tuple.clone(),
        });
    }

    counter.add_read_call();
    let mut type_def = match reader
        .read_type_definition(ctx, store_id, model_id, object_type)
        .await
    {
        Ok(type_def) => type_def,
        Err(ModelReadError::NotFound) => {
            return Err(ValidationError::TypeNotFound {
                type_name: object_type.to_string(),
            })
        }
        Err(err) => return Err(ValidationError::Backend(err)),
    };

    match type_def.relations.remove(&tuple.relation) {
        Some(userset) => {
            debug!(type_name = %type_def.type_name, "relation resolved");
            Ok(userset)
        }
        None => Err(ValidationError::RelationNotFound {
            relation: tuple.relation.clone(),
            type_name: type_def.type_name,
            tuple: tuple.clone(),
        }),
    }
}
