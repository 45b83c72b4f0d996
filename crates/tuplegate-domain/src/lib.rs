//! tuplegate-domain: Tuple validation against authorization models
//!
//! This crate contains the validation gate that runs before a relationship
//! tuple is written or queried:
//! - Tuple field grammar (user, relation, object)
//! - Authorization model types
//! - Type definition reader seam and request context
//! - Backend call accounting
//! - The validation gate itself
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │              tuplegate-domain                │
//! ├─────────────────────────────────────────────┤
//! │  model/      - Tuple, types, usersets       │
//! │  tuple       - Field grammar                │
//! │  reader      - TypeDefinitionReader trait   │
//! │  context     - Deadline & cancellation      │
//! │  counter     - DbCallCounter sinks          │
//! │  validation/ - Tuple validation gate        │
//! └─────────────────────────────────────────────┘
//! ```

pub mod context;
pub mod counter;
pub mod error;
pub mod model;
pub mod reader;
pub mod tuple;
pub mod validation;

#[cfg(test)]
mod tuple_proptest;

// Re-export commonly used types at the crate root
pub use context::RequestContext;
pub use counter::{AtomicDbCallCounter, DbCallCounter, MetricsDbCallCounter, NoopDbCallCounter};
pub use error::{ModelReadError, ValidationError, ValidationErrorKind, ValidationResult};
pub use reader::TypeDefinitionReader;
pub use validation::{validate_objects_relations, validate_tuple, TupleValidator};
