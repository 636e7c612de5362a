//! CapStore Storefront - server-rendered cap shop.
//!
//! # Architecture
//!
//! - Axum web framework with Askama server-side templates
//! - Local JSON-file stores for the catalog, cart, and customer profile
//!   (one file per store, whole blob rewritten on every mutation)
//! - A hosted table API (PostgREST-style) for customer accounts
//! - `tower-sessions` in-memory sessions for login state
//!
//! The storefront assumes a single active process: store writes are
//! last-write-wins whole-file overwrites with no cross-process locking.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod accounts;
pub mod config;
pub mod error;
pub mod filters;
pub mod routes;
pub mod services;
pub mod session;
pub mod state;
pub mod store;
pub mod upload;
