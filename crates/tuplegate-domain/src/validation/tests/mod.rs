//! Tests for tuple validation.
//!
//! Organized by gate:
//! - Syntax gates (user, relation, object)
//! - Type and relation resolution
//! - Backend failures and request context
//! - Validator handle
