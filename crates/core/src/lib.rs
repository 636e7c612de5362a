//! CapStore Core - Shared domain types.
//!
//! This crate provides the domain model used across all CapStore components:
//! - `storefront` - Customer-facing shop and admin dashboard
//! - `cli` - Command-line tools for seeding and store inspection
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no async. Persistence and network access live in the storefront
//! crate; this keeps the domain model usable anywhere, including tests.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, prices, emails, and product facets
//! - [`product`] - Catalog product records and creation input
//! - [`cart`] - Cart entries (product snapshot + quantity)
//! - [`profile`] - Customer profile record
//! - [`filter`] - The facet filter and category grouping algorithm

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod filter;
pub mod product;
pub mod profile;
pub mod types;

pub use cart::CartEntry;
pub use filter::{CategoryGroup, FacetFilter, group_by_category};
pub use product::{NewProduct, Product, ProductError};
pub use profile::Profile;
pub use types::*;
