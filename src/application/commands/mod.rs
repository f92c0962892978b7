// src/application/commands/mod.rs
//
// Command Handlers
//
// ARCHITECTURE:
// - Commands are thin adapters between callers (CLI, UI) and services
// - Commands accept DTOs, return DTOs
// - Commands convert errors into serialized ErrorResponses
// - Commands NEVER contain business logic

pub mod database_commands;
pub mod inbox_commands;
pub mod product_commands;
pub mod record_commands;

pub use database_commands::*;
pub use inbox_commands::*;
pub use product_commands::*;
pub use record_commands::*;
