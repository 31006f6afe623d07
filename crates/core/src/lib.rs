//! Bluepenguin Core - Shared types library.
//!
//! This crate provides the catalog types used across the Bluepenguin admin
//! components:
//! - `admin` - API client, session management, resource services and stores
//! - `cli` - Command-line front end for the admin console
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients. Backend payloads are mapped into these types by the admin crate.
//!
//! # Modules
//!
//! - [`types`] - Code newtypes, catalog entities, products, prices, statuses
//!   and the occasion calendar

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
