// src/persistence/sqlite/mod.rs

pub mod backend;
mod sql;

pub use backend::{LocalStorage, SqliteBackend};
