//! `appdeck-core` library crate.
//!
//! Domain types and the script execution engine for stored "apps". Nothing
//! in this crate touches the database; records are reached through the
//! [`store::ScriptStore`] trait so the engine can be driven by any backend.

pub mod config;
pub mod error;
pub mod script;
pub mod scripting;
pub mod store;
pub mod types;
