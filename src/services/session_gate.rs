// src/services/session_gate.rs
//
// Every screen requires a signed-in administrator.

use crate::error::{AppError, AppResult};
use crate::persistence::{PersistenceLayer, User};

/// The current user, or `Unauthenticated` when nobody is signed in.
pub async fn require_session(backend: &dyn PersistenceLayer) -> AppResult<User> {
    match backend.get_session().await? {
        Some(user) => {
            log::debug!("Session active for {}", user.email.as_deref().unwrap_or(&user.id));
            Ok(user)
        }
        None => {
            log::warn!("No active session; refusing to open the admin");
            Err(AppError::Unauthenticated)
        }
    }
}
