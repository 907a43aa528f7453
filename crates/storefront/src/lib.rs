//! Boutique Storefront library.
//!
//! This crate provides the storefront functionality as a library,
//! allowing it to be tested and reused by the binary.
//!
//! # Modules
//!
//! - [`api`] - Store API trait and its HTTP client
//! - [`catalog`] - Filtering, pagination, ratings and favorites (no I/O)
//! - [`services`] - Operations combining API calls with catalog logic
//! - [`routes`] - Axum handlers and askama templates
//! - [`middleware`] - Sessions, security headers, request IDs, rate limiting

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
