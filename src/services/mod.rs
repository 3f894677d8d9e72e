//! Infrastructure services
//!
//! This module provides the core infrastructure for the data layer:
//!
//! - **client**: typed Supabase client with the per-entity API operations
//! - **config**: project URL and anon-key configuration
//! - **errors**: common error taxonomy
//! - **storage**: browser localStorage access behind a trait seam
//!
//! Everything is WASM-first: async traits carry no `Send`/`Sync` bounds and
//! the HTTP client is configured for browser compatibility.

pub mod client;
pub mod config;
pub mod errors;
pub mod storage;
