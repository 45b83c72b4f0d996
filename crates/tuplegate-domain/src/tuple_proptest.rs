//! Property-based tests for the tuple grammar.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::tuple::{is_valid_object, is_valid_relation, is_valid_user, split_object};

    /// Strategy to generate valid object identifiers in type:id format
    fn valid_object_strategy() -> impl Strategy<Value = String> {
        ("[a-z]{1,10}", "[a-z0-9_.-]{1,20}").prop_map(|(t, id)| format!("{t}:{id}"))
    }

    /// Strategy to generate valid userset references in type:id#relation format
    fn userset_reference_strategy() -> impl Strategy<Value = String> {
        ("[a-z]{1,10}", "[a-z0-9]{1,10}", "[a-z_]{1,10}")
            .prop_map(|(t, id, rel)| format!("{t}:{id}#{rel}"))
    }

    proptest! {
        #[test]
        fn test_type_id_objects_are_valid(object in valid_object_strategy()) {
            prop_assert!(is_valid_object(&object), "rejected object: {}", object);
        }

        #[test]
        fn test_split_object_roundtrip(object in valid_object_strategy()) {
            let (object_type, object_id) = split_object(&object);
            prop_assert!(!object_type.is_empty());
            prop_assert!(!object_id.is_empty());
            prop_assert_eq!(format!("{object_type}:{object_id}"), object);
        }

        #[test]
        fn test_type_id_users_are_valid(user in valid_object_strategy()) {
            prop_assert!(is_valid_user(&user), "rejected user: {}", user);
        }

        #[test]
        fn test_userset_references_are_valid_users(user in userset_reference_strategy()) {
            prop_assert!(is_valid_user(&user), "rejected userset: {}", user);
        }

        #[test]
        fn test_strings_without_colon_are_not_objects(s in "[a-z0-9#_]{0,30}") {
            prop_assert!(!is_valid_object(&s));
            prop_assert!(!is_valid_user(&s));
        }

        #[test]
        fn test_relations_with_reserved_chars_are_invalid(
            prefix in "[a-z]{0,10}",
            reserved in "[:#@ \t]",
            suffix in "[a-z]{0,10}"
        ) {
            let relation = format!("{prefix}{reserved}{suffix}");
            prop_assert!(!is_valid_relation(&relation));
        }

        #[test]
        fn test_plain_relations_are_valid(relation in "[a-z_][a-z0-9_-]{0,49}") {
            prop_assert!(is_valid_relation(&relation));
        }
    }
}
