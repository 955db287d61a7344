//! # Taskling Architecture
//!
//! Taskling is a **UI-agnostic task-tracking library**. This is not a CLI
//! application that happens to have some library code—it's a library that
//! happens to have a CLI client.
//!
//! ## The Three-Layer Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (main.rs, args.rs, print.rs)                     │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over the services                            │
//! │  - Composes the UI-level flows (hide, reveal)               │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Service Layer (services/lists.rs, services/items.rs)       │
//! │  - Validation and business rules, one unit of work per call │
//! │  - Operates on Rust types, returns Rust types               │
//! │  - No I/O assumptions whatsoever                            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract TodoContext trait: stage mutations, commit once │
//! │  - FileContext (production), MemoryContext (testing)        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward (API, services, storage), code:
//! - Takes regular Rust function arguments
//! - Returns regular Rust types (`Result<T>`)
//! - **Never** writes to stdout/stderr
//! - **Never** calls `std::process::exit`
//! - **Never** assumes a terminal environment
//!
//! This means the same core could serve a REST API, a browser app, or any
//! other UI.
//!
//! ## Relational Rules Live in the Store
//!
//! The storage layer owns the rules that a relational database would
//! enforce: foreign keys (an item's list must exist), cascade deletes (a
//! removed list takes its items with it), and optimistic concurrency (a
//! stale update loses). Services validate arguments and stage work; the
//! commit decides.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade—entry point for all operations
//! - [`services`]: Business rules for lists and items
//! - [`store`]: Persistence context and its backends
//! - [`model`]: Core data types (`TodoList`, `TodoItem`, `ItemStatus`)
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod config;
pub mod error;
pub mod model;
pub mod services;
pub mod store;
