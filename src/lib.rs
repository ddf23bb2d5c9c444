//! habitual: track time spent on habits from the terminal.
//!
//! - [`libs`]: domain types, the timer engine, configuration and output
//! - [`db`]: the local SQLite store
//! - [`api`]: the remote PostgREST store and the suggestion client
//! - [`commands`]: the command line interface

pub mod api;
pub mod commands;
pub mod db;
pub mod libs;
