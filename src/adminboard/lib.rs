//! # Adminboard Architecture
//!
//! Adminboard is the core of a small admin back office: products with their
//! variants, events, blog posts, donations and users. It is a **UI-agnostic
//! library** that happens to ship a CLI client; the same core could sit behind
//! a web UI.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Applies configured page sizes and submit delay           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Drives form controllers and list views                   │
//! │  - Returns CmdResult values, never prints                   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Forms / Views / Storage                                    │
//! │  - forms/: validation and the submit state machine          │
//! │  - view/: pure search, filter and pagination                │
//! │  - store/: EntityStore over a SnapshotBackend               │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Data flows one way per interaction: a form submit performs exactly one
//! store mutation, and list views are re-derived from the store afterwards.
//!
//! ## No Global State
//!
//! Stores are plain values. The application root opens a [`store::Stores`]
//! (one [`store::EntityStore`] per entity type over a shared backend) and hands
//! it to [`api::AdminApi`]; everything below receives it by reference.
//!
//! ## Testing Strategy
//!
//! 1. **Commands, forms, views, stores**: unit tests against `MemBackend`.
//! 2. **API**: dispatch tests.
//! 3. **Binary**: integration tests in `tests/` driving the CLI against a
//!    temporary data directory.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: One module per operation
//! - [`forms`]: Form inputs, validation rules, `FormController`
//! - [`view`]: List filters and pagination
//! - [`store`]: Snapshot backends and entity stores
//! - [`model`]: Entity payloads and the `Record` wrapper
//! - [`config`]: Configuration management
//! - [`sample`]: Built-in sample users and donations
//! - [`error`]: Error types
//! - `cli`: Argument parsing and terminal rendering for the binary (not part of the lib API)

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod forms;
pub mod model;
pub mod sample;
pub mod store;
pub mod view;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
