//! carenote-kb
//!
//! Knowledge-base loading: fetch the manifest, sources and search index over
//! HTTP with retry, keep a durable per-document cache as the offline
//! fallback, and search the loaded sections in memory.

pub mod cache;
pub mod error;
pub mod fetch;
pub mod loader;
pub mod search;
