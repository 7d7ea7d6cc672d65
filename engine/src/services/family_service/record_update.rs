// Handlers for updates, acknowledgements and invitations
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::data::project_store::ProjectStore;
use crate::error::Result;
use shared::models::{NewUpdate, ProjectUpdate};

pub async fn handle_record_update(
    project_id: &str,
    author: &str,
    input: NewUpdate,
    now: DateTime<Utc>,
    project_store: Arc<RwLock<ProjectStore>>,
) -> Result<ProjectUpdate> {
    tracing::debug!(project_id = %project_id, kind = ?input.kind, amount = ?input.amount, "Handling update in dedicated handler");

    let mut store = project_store.write().await;
    let update = match store.record_update(project_id, author, input, now) {
        Ok(u) => u,
        Err(e) => {
            tracing::warn!(project_id = %project_id, author = %author, error = %e, "Update rejected (handler).");
            return Err(e);
        }
    };
    let current_amount = store.get(project_id).map(|p| p.current_amount);
    drop(store);

    tracing::info!(
        project_id = %project_id,
        update_id = %update.id,
        kind = ?update.kind,
        amount = ?update.amount,
        current_amount = ?current_amount,
        "Update recorded (handler)."
    );
    Ok(update)
}

pub async fn handle_acknowledge(
    project_id: &str,
    viewer: &str,
    project_store: Arc<RwLock<ProjectStore>>,
) -> Result<bool> {
    let mut store = project_store.write().await;
    let added = store.acknowledge(project_id, viewer)?;
    if added {
        tracing::info!(project_id = %project_id, viewer = %viewer, "Project acknowledged (handler).");
    } else {
        tracing::debug!(project_id = %project_id, viewer = %viewer, "Project already acknowledged by viewer.");
    }
    Ok(added)
}

pub async fn handle_invite(
    project_id: &str,
    member: &str,
    project_store: Arc<RwLock<ProjectStore>>,
) -> Result<bool> {
    let mut store = project_store.write().await;
    let added = store.invite_participant(project_id, member)?;
    if added {
        tracing::info!(project_id = %project_id, member = %member, "Participant invited (handler).");
    }
    Ok(added)
}
