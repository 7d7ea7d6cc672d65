// Handler for creating a project
use chrono::NaiveDate;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::data::project_store::ProjectStore;
use crate::error::{EngineError, Result};
use shared::models::{FundingProject, NewProject};

pub async fn handle_create_project(
    mut input: NewProject,
    creator: &str,
    default_emoji: &str,
    emoji_options: &[String],
    today: NaiveDate,
    project_store: Arc<RwLock<ProjectStore>>,
) -> Result<FundingProject> {
    if input.emoji.as_deref().map_or(true, |e| e.trim().is_empty()) {
        input.emoji = Some(default_emoji.to_string());
    }
    // An empty list allows any emoji.
    if let Some(emoji) = input.emoji.as_deref().map(str::trim) {
        if !emoji_options.is_empty() && !emoji_options.iter().any(|o| o == emoji) {
            tracing::warn!(creator = %creator, emoji = %emoji, "Project emoji not among configured options.");
            return Err(EngineError::ValidationError(format!(
                "Emoji '{}' is not one of the configured options",
                emoji
            )));
        }
    }

    let mut store = project_store.write().await;
    match store.create_project(input, creator, today) {
        Ok(project) => {
            tracing::info!(
                project_id = %project.id,
                title = %project.title,
                target_amount = project.target_amount,
                deadline = %project.deadline,
                "Project created (handler)."
            );
            Ok(project)
        }
        Err(e) => {
            tracing::warn!(creator = %creator, error = %e, "Project creation rejected (handler).");
            Err(e)
        }
    }
}
