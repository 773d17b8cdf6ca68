//! Storefront Gateway Library
//!
//! Issues authenticated HTTP calls to the backend catalog API on behalf of
//! the web layer, with an in-memory TTL cache for read-heavy GETs and typed
//! storefront/admin call surfaces on top.

pub mod api;
pub mod cache;
pub mod config;
pub mod gateway;
pub mod session;
