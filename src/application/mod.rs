// src/application/mod.rs
//
// Application Layer
//
// ARCHITECTURE:
// - Sits above services; the boundary a UI or the CLI calls
// - Translates between DTOs and domain entities
// - Opens screens only for a signed-in administrator

pub mod commands;
pub mod dto;
pub mod error_handling;
pub mod state;

pub use commands::*;
pub use dto::*;
pub use error_handling::{ErrorResponse, ErrorType, ToErrorResponse};
pub use state::AdminState;
