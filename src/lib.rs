//! Chat UI client
//!
//! A client for a small REST chat server: it keeps a per-tab session id and a
//! durable light/dark preference, renders the message transcript, and keeps a
//! history panel of past sessions in sync with the server.
//!
//! # Architecture
//!
//! - **Controller**: one explicit UI state mutated by named actions
//! - **View model**: transcript and history panel standing in for the page
//! - **Backend**: async trait over the five REST calls, with a `reqwest` client
//! - **Front end**: line-oriented terminal loop painting the view model
//!
//! # Modules
//!
//! - [`api`]: REST client and wire types
//! - [`controller`]: user actions and render functions
//! - [`session`]: session identifiers
//! - [`theme`]: light/dark preference
//! - [`transcript`]: message blocks
//! - [`history`]: history panel rows
//! - [`markdown`]: bot reply rendering
//! - [`storage`]: tab-scoped and durable key/value stores
//! - [`repl`]: terminal front end

// Allow pedantic clippy warnings that don't add value for this codebase
#![allow(clippy::missing_fields_in_debug)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::cargo_common_metadata)]
#![allow(clippy::multiple_crate_versions)]
#![allow(clippy::unused_async)]

pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod history;
pub mod markdown;
pub mod repl;
pub mod session;
pub mod storage;
pub mod theme;
pub mod transcript;

pub use error::{Error, Result};
