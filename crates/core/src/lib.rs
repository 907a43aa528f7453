//! Boutique Core - Shared types library.
//!
//! This crate provides the domain types shared by the storefront and anything
//! else that talks to the store API:
//! - type-safe IDs for users and products
//! - a validated email address
//! - a decimal price with display formatting
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no HTTP clients.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices and emails

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
