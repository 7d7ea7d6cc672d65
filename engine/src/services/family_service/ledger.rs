// Handlers for importing and exporting contribution ledgers
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::helpers::from_ledger_error;
use crate::data::csv_ledger::ContributionCsv;
use crate::data::project_store::ProjectStore;
use crate::error::{EngineError, Result};

/// Records every row of the CSV as a donation. Rows are checked before any is
/// applied, so a bad file leaves the project untouched.
pub async fn handle_import_contributions(
    project_id: &str,
    file_path: &Path,
    project_store: Arc<RwLock<ProjectStore>>,
) -> Result<usize> {
    let records = ContributionCsv::load_contributions_from_csv(file_path).map_err(|e| {
        tracing::error!(project_id = %project_id, path = %file_path.display(), error = %e, "Failed to read contribution ledger");
        from_ledger_error(e)
    })?;

    let mut store = project_store.write().await;
    let current = store
        .get(project_id)
        .ok_or_else(|| EngineError::ProjectNotFound(project_id.to_string()))?
        .current_amount;
    records
        .iter()
        .try_fold(current, |total, r| total.checked_add(r.amount))
        .ok_or_else(|| EngineError::ValidationError("Imported contributions overflow project total".to_string()))?;
    for record in &records {
        store.record_update(project_id, &record.author, record.to_update(), record.timestamp())?;
    }
    drop(store);

    tracing::info!(project_id = %project_id, path = %file_path.display(), count = records.len(), "Contributions imported (handler).");
    Ok(records.len())
}

pub async fn handle_export_ledger(
    project_id: &str,
    file_path: &Path,
    project_store: Arc<RwLock<ProjectStore>>,
) -> Result<usize> {
    let store = project_store.read().await;
    let project = store
        .get(project_id)
        .ok_or_else(|| EngineError::ProjectNotFound(project_id.to_string()))?;
    drop(store);

    let written = ContributionCsv::export_ledger_to_csv(file_path, &project).map_err(from_ledger_error)?;
    tracing::info!(project_id = %project_id, path = %file_path.display(), count = written, "Ledger exported (handler).");
    Ok(written)
}
