// src/persistence/rest/mod.rs

pub mod client;

pub use client::RestBackend;
