// src/application/commands/database_commands.rs

use crate::application::dto::*;
use crate::config::AdminConfig;
use crate::db::{
    create_connection_pool, get_connection, get_database_stats, initialize_database,
    verify_database_integrity,
};
use crate::error::AppResult;

/// Create or migrate the local database and report what it holds
pub async fn init_database(config: &AdminConfig) -> Result<DatabaseStatsDto, String> {
    let config = config.clone();

    let result: AppResult<DatabaseStatsDto> = tokio::task::spawn_blocking(move || {
        let path = config.database_path()?;
        let pool = create_connection_pool(&path)?;
        let conn = get_connection(&pool)?;

        initialize_database(&conn)?;
        verify_database_integrity(&conn)?;
        let stats = get_database_stats(&conn)?;

        Ok(DatabaseStatsDto::new(path.display().to_string(), stats))
    })
    .await
    .map_err(crate::error::AppError::from)
    .and_then(|inner| inner);

    crate::handle_command!(result)
}
