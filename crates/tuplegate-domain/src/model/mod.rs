//! Authorization model types.
//!
//! This module contains:
//! - The relationship tuple
//! - Authorization model, type definition and userset structures

mod types;

pub use types::*;
