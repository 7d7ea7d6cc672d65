// Handler for posting a comment on a project
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::data::project_store::ProjectStore;
use crate::error::Result;
use shared::models::Comment;

pub async fn handle_post_comment(
    project_id: &str,
    author: &str,
    content: &str,
    now: DateTime<Utc>,
    project_store: Arc<RwLock<ProjectStore>>,
) -> Result<Comment> {
    tracing::debug!(project_id = %project_id, author = %author, "Handling comment in dedicated handler");

    let mut store = project_store.write().await;
    let comment = store.add_comment(project_id, author, content, now)?;
    drop(store);

    tracing::info!(project_id = %project_id, comment_id = %comment.id, author = %comment.author, "Comment posted (handler).");
    Ok(comment)
}
