//! # ZK Architecture
//!
//! ZK manages a zettelkasten: a tree of HTML notes under a directory marked
//! by an empty `.zk-root` file. Notes link to each other with hrefs relative
//! to that directory, so moving a note means rewriting every link to it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, prints messages, picks exit codes      │
//! │  - Installs the tracing subscriber                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - mv, serve, init                                          │
//! │  - Returns `CmdResult` / structured reports, never prints   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core                                                       │
//! │  - root: find the `.zk-root` above a directory              │
//! │  - links: link forms and old → new href tables              │
//! │  - rewrite: walk documents, rewrite anchors, write dirty    │
//! │  - server: static file server over the root                 │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Moving a note
//!
//! `zk mv notes/a.html archive/a.html` finds the root, checks both paths,
//! builds a [`links::RewriteTable`] (`notes/a.html` → `archive/a.html`,
//! `notes/a` → `archive/a`), rewrites every document that uses one of those
//! hrefs and finally renames the file. Documents without a matching link are
//! never written.
//!
//! ## Module Overview
//!
//! - [`commands`]: one module per operation
//! - [`root`]: project root discovery and path normalization
//! - [`links`]: link forms, canonical forms, rewrite tables
//! - [`rewrite`]: the document walk
//! - [`server`]: static file serving
//! - [`config`]: optional `.zk-config.json`
//! - [`error`]: error types
//! - `cli`: argument parsing and printing for the binary (not part of the lib API)

pub mod commands;
pub mod config;
pub mod error;
pub mod links;
pub mod rewrite;
pub mod root;
pub mod server;
