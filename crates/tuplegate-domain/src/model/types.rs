//! Core type definitions for the authorization model.
//!
//! The serde representation follows the OpenFGA JSON format so stored
//! models can be loaded without a separate conversion layer.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A tuple representing a relationship (user, relation, object).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tuple {
    /// The user (subject) of the relationship.
    pub user: String,
    /// The relation between user and object.
    pub relation: String,
    /// The object of the relationship.
    pub object: String,
}

impl Tuple {
    /// Creates a new Tuple.
    pub fn new(
        user: impl Into<String>,
        relation: impl Into<String>,
        object: impl Into<String>,
    ) -> Self {
        Self {
            user: user.into(),
            relation: relation.into(),
            object: object.into(),
        }
    }
}

/// Formats the tuple as `object#relation@user`.
impl fmt::Display for Tuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}@{}", self.object, self.relation, self.user)
    }
}

/// An authorization model defining types and their relations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationModel {
    /// Model identifier. Empty until the model has been stored.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Schema version (e.g., "1.1").
    pub schema_version: String,
    /// Type definitions in the model.
    #[serde(default)]
    pub type_definitions: Vec<TypeDefinition>,
}

impl AuthorizationModel {
    /// Creates an empty model with the given schema version.
    pub fn new(schema_version: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            schema_version: schema_version.into(),
            type_definitions: Vec::new(),
        }
    }

    /// Creates a model with the given type definitions.
    pub fn with_types(
        schema_version: impl Into<String>,
        type_definitions: Vec<TypeDefinition>,
    ) -> Self {
        Self {
            id: String::new(),
            schema_version: schema_version.into(),
            type_definitions,
        }
    }

    /// Parses a model from its OpenFGA JSON representation.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Finds the definition for `type_name`.
    pub fn type_definition(&self, type_name: &str) -> Option<&TypeDefinition> {
        self.type_definitions
            .iter()
            .find(|td| td.type_name == type_name)
    }
}

/// A type definition within the authorization model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDefinition {
    /// The type name (e.g., "document", "folder").
    #[serde(rename = "type")]
    pub type_name: String,
    /// Relations defined on this type, keyed by relation name.
    #[serde(default)]
    pub relations: HashMap<String, Userset>,
}

impl TypeDefinition {
    /// Creates a type definition with no relations.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            relations: HashMap::new(),
        }
    }

    /// Adds a relation, replacing any existing definition with the same name.
    pub fn with_relation(mut self, name: impl Into<String>, rewrite: Userset) -> Self {
        self.relations.insert(name.into(), rewrite);
        self
    }

    /// Returns the userset for `relation`, if defined.
    pub fn relation(&self, relation: &str) -> Option<&Userset> {
        self.relations.get(relation)
    }
}

/// Marker payload for direct assignment (`{"this": {}}`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectUserset {}

/// Reference to a relation, optionally on another object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectRelation {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub object: String,
    pub relation: String,
}

impl ObjectRelation {
    pub fn new(relation: impl Into<String>) -> Self {
        Self {
            object: String::new(),
            relation: relation.into(),
        }
    }
}

/// Relation reached through another relation on the same object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TupleToUserset {
    /// Relation that links to the parent object.
    pub tupleset: ObjectRelation,
    /// Relation evaluated on the parent object.
    pub computed_userset: ObjectRelation,
}

/// Children of a union or intersection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usersets {
    #[serde(default)]
    pub child: Vec<Userset>,
}

/// Exclusion: `base but not subtract`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Difference {
    pub base: Userset,
    pub subtract: Userset,
}

/// A userset defines how a relation is computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Userset {
    /// Direct assignment (this).
    This(DirectUserset),
    /// Computed userset from another relation.
    ComputedUserset(ObjectRelation),
    /// Tuple to userset (relation from parent).
    TupleToUserset(TupleToUserset),
    /// Union of multiple usersets.
    Union(Usersets),
    /// Intersection of multiple usersets.
    Intersection(Usersets),
    /// Exclusion (base but not subtract).
    Difference(Box<Difference>),
}

impl Userset {
    pub fn this() -> Self {
        Userset::This(DirectUserset::default())
    }

    pub fn computed(relation: impl Into<String>) -> Self {
        Userset::ComputedUserset(ObjectRelation::new(relation))
    }

    pub fn tuple_to_userset(
        tupleset: impl Into<String>,
        computed_userset: impl Into<String>,
    ) -> Self {
        Userset::TupleToUserset(TupleToUserset {
            tupleset: ObjectRelation::new(tupleset),
            computed_userset: ObjectRelation::new(computed_userset),
        })
    }

    pub fn union(children: Vec<Userset>) -> Self {
        Userset::Union(Usersets { child: children })
    }

    pub fn intersection(children: Vec<Userset>) -> Self {
        Userset::Intersection(Usersets { child: children })
    }

    pub fn difference(base: Userset, subtract: Userset) -> Self {
        Userset::Difference(Box::new(Difference { base, subtract }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tuple_creation() {
        let tuple = Tuple::new("user:alice", "viewer", "document:readme");
        assert_eq!(tuple.user, "user:alice");
        assert_eq!(tuple.relation, "viewer");
        assert_eq!(tuple.object, "document:readme");
    }

    #[test]
    fn test_tuple_display_uses_tuple_key_format() {
        let tuple = Tuple::new("user:alice", "viewer", "document:readme");
        assert_eq!(tuple.to_string(), "document:readme#viewer@user:alice");
    }

    #[test]
    fn test_type_definition_relation_lookup() {
        let td = TypeDefinition::new("document").with_relation("viewer", Userset::this());
        assert_eq!(td.relation("viewer"), Some(&Userset::this()));
        assert!(td.relation("editor").is_none());
    }

    #[test]
    fn test_model_from_openfga_json() {
        let json = r#"{
            "schema_version": "1.1",
            "type_definitions": [
                { "type": "user" },
                {
                    "type": "document",
                    "relations": {
                        "parent": { "this": {} },
                        "owner": { "this": {} },
                        "editor": {
                            "union": {
                                "child": [
                                    { "this": {} },
                                    { "computedUserset": { "relation": "owner" } }
                                ]
                            }
                        },
                        "viewer": {
                            "tupleToUserset": {
                                "tupleset": { "relation": "parent" },
                                "computedUserset": { "relation": "viewer" }
                            }
                        },
                        "auditor": {
                            "difference": {
                                "base": { "this": {} },
                                "subtract": { "computedUserset": { "relation": "owner" } }
                            }
                        }
                    }
                }
            ]
        }"#;

        let model = AuthorizationModel::from_json(json).unwrap();
        assert_eq!(model.schema_version, "1.1");
        assert!(model.id.is_empty());

        let user = model.type_definition("user").unwrap();
        assert!(user.relations.is_empty());

        let doc = model.type_definition("document").unwrap();
        assert_eq!(doc.relation("owner"), Some(&Userset::this()));
        assert_eq!(
            doc.relation("editor"),
            Some(&Userset::union(vec![
                Userset::this(),
                Userset::computed("owner")
            ]))
        );
        assert_eq!(
            doc.relation("viewer"),
            Some(&Userset::tuple_to_userset("parent", "viewer"))
        );
        assert_eq!(
            doc.relation("auditor"),
            Some(&Userset::difference(
                Userset::this(),
                Userset::computed("owner")
            ))
        );
    }

    #[test]
    fn test_userset_serializes_to_openfga_shape() {
        let value = serde_json::to_value(Userset::computed("owner")).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "computedUserset": { "relation": "owner" } })
        );

        let value = serde_json::to_value(Userset::this()).unwrap();
        assert_eq!(value, serde_json::json!({ "this": {} }));
    }

    #[test]
    fn test_model_from_invalid_json_fails() {
        assert!(AuthorizationModel::from_json("{").is_err());
        assert!(AuthorizationModel::from_json(r#"{"type_definitions": []}"#).is_err());
    }
}
