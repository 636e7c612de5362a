//! Core types for CapStore.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod facets;
pub mod id;
pub mod price;

pub use email::{Email, EmailError};
pub use facets::{Category, Color, FacetParseError, Size};
pub use id::ProductId;
pub use price::Price;
