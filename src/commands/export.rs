//! Export command - Writes the client workbook to disk.

use std::sync::Arc;

use crate::cli::args::ExportArgs;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::Database;
use crate::services::{ServiceContainer, Services};

/// Execute the export command
pub async fn execute(args: ExportArgs, config: Config) -> AppResult<()> {
    let db = Arc::new(Database::connect(&config).await?);
    let services = Services::from_connection(db.get_connection());

    let export = services.clients().export_clients().await?;

    let path = args.output.join(&export.file_name);
    tokio::fs::write(&path, &export.content)
        .await
        .map_err(|e| AppError::internal(format!("Failed to write {}: {}", path.display(), e)))?;

    tracing::info!(path = %path.display(), bytes = export.content.len(), "Workbook written");
    println!("{}", path.display());

    Ok(())
}
