//! Tuple string-format grammar.
//!
//! Syntax checks for the three tuple fields, following the OpenFGA rules:
//!
//! - relation: `^[^:#@\s]{1,50}$`
//! - object: `type:id`
//! - user: `type:id`, `type:*` or `type:id#relation`
//!
//! None of these consult an authorization model.

use crate::error::{ValidationError, ValidationResult};
use crate::model::Tuple;

/// Maximum allowed relation name length, matching OpenFGA.
pub const MAX_RELATION_LENGTH: usize = 50;

/// Maximum allowed object type length.
pub const MAX_OBJECT_TYPE_LENGTH: usize = 254;

/// Maximum allowed object ID length, matching OpenFGA.
pub const MAX_OBJECT_ID_LENGTH: usize = 256;

/// Maximum allowed user length, matching OpenFGA.
pub const MAX_USER_LENGTH: usize = 512;

/// The wildcard object id, matching every object of a type.
pub const WILDCARD: &str = "*";

/// Returns true if `relation` is a well-formed relation name.
///
/// ```
/// use tuplegate_domain::tuple::is_valid_relation;
///
/// assert!(is_valid_relation("viewer"));
/// assert!(is_valid_relation("can_view"));
/// assert!(!is_valid_relation(""));
/// assert!(!is_valid_relation("view#er"));
/// ```
pub fn is_valid_relation(relation: &str) -> bool {
    !relation.is_empty()
        && relation.chars().count() <= MAX_RELATION_LENGTH
        && !relation
            .chars()
            .any(|c| c == ':' || c == '#' || c == '@' || c.is_whitespace())
}

/// Returns true if `object` has the `type:id` shape.
///
/// Only the separator and the character set are checked; a type or id
/// that is empty is accepted here. Use [`split_object`] to get at the
/// halves.
pub fn is_valid_object(object: &str) -> bool {
    let Some((object_type, object_id)) = object.split_once(':') else {
        return false;
    };

    object_type.chars().count() <= MAX_OBJECT_TYPE_LENGTH
        && object_id.chars().count() <= MAX_OBJECT_ID_LENGTH
        && !object_type
            .chars()
            .any(|c| c == '#' || c == '@' || c.is_whitespace())
        && !object_id
            .chars()
            .any(|c| c == '#' || c == ':' || c.is_whitespace())
}

/// Splits an object into `(type, id)` at the first `:`.
///
/// Without a separator the whole input is returned as the type and the
/// id is empty.
pub fn split_object(object: &str) -> (&str, &str) {
    object.split_once(':').unwrap_or((object, ""))
}

/// Splits `object#relation` at the last `#`.
///
/// Without a `#` the relation is empty.
pub fn split_object_relation(object_relation: &str) -> (&str, &str) {
    object_relation
        .rsplit_once('#')
        .unwrap_or((object_relation, ""))
}

/// Checks a user identifier, returning the reason it is malformed.
///
/// Valid formats:
/// - `type:id` (e.g., "user:alice")
/// - `type:id#relation` (e.g., "group:admins#member")
/// - `type:*` (wildcard)
pub fn check_user(user: &str) -> Result<(), &'static str> {
    if user.is_empty() {
        return Err("user cannot be empty");
    }
    if user.chars().count() > MAX_USER_LENGTH {
        return Err("user exceeds maximum length of 512 characters");
    }
    if user.chars().any(char::is_whitespace) {
        return Err("user cannot contain whitespace");
    }

    let (object, relation) = if user.contains('#') {
        let (object, relation) = split_object_relation(user);
        if !is_valid_relation(relation) {
            return Err("userset relation is invalid");
        }
        (object, Some(relation))
    } else {
        (user, None)
    };

    if !is_valid_object(object) {
        return Err("user must be in 'type:id' format");
    }

    let (user_type, user_id) = split_object(object);
    if user_type.is_empty() {
        return Err("user type cannot be empty");
    }
    if user_id.is_empty() {
        return Err("user id cannot be empty");
    }
    if user_id == WILDCARD && relation.is_some() {
        return Err("wildcard user cannot carry a relation");
    }

    Ok(())
}

/// Returns true if `user` is a well-formed user identifier.
pub fn is_valid_user(user: &str) -> bool {
    check_user(user).is_ok()
}

/// Validates the user field of `tuple`.
pub fn validate_user(tuple: &Tuple) -> ValidationResult<()> {
    check_user(&tuple.user).map_err(|reason| ValidationError::InvalidUser {
        tuple: tuple.clone(),
        reason,
    })
}
