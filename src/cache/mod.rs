//! In-memory cache for backend GET responses
//!
//! This module provides a process-wide expiring key-value store used to
//! short-circuit read-heavy GET calls to the backend. Entries live for a
//! configurable TTL; nothing is persisted, so a process restart starts cold.

mod store;

pub use store::ResponseCache;
