// Handlers producing display-ready views of projects
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::helpers::days_left_text;
use crate::data::project_store::ProjectStore;
use crate::error::{EngineError, Result};
use shared::models::{FundingProject, ProjectStatus};
use shared::utils::{
    format_currency, format_currency_short, format_date, format_progress, format_relative_time,
};

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub author: String,
    pub content: String,
    pub when: String,
}

/// Everything a project card shows, already formatted.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectOverview {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: ProjectStatus,
    pub status_label: String,
    pub progress_percent: f64,
    pub progress_text: String,
    pub collected_text: String,
    pub target_text: String,
    pub target_short_text: String,
    pub days_remaining: i64,
    pub days_left_text: String,
    pub deadline_text: String,
    pub created_by: String,
    pub participants: Vec<String>,
    pub viewed_by: Vec<String>,
    pub comments: Vec<CommentView>,
    pub update_count: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub active_count: usize,
    pub total_collected: i64,
    pub total_collected_text: String,
    pub projects: Vec<ProjectOverview>,
}

pub fn to_overview(project: &FundingProject, now: DateTime<Utc>) -> Result<ProjectOverview> {
    let progress = project.progress_percent()?;
    let days = project.days_remaining(now.naive_utc());
    Ok(ProjectOverview {
        id: project.id.clone(),
        title: project.title.clone(),
        description: project.description.clone(),
        status: project.status,
        status_label: project.status.label().to_string(),
        progress_percent: progress,
        progress_text: format_progress(progress),
        collected_text: format_currency(project.current_amount)?,
        target_text: format_currency(project.target_amount)?,
        target_short_text: format_currency_short(project.target_amount)?,
        days_remaining: days,
        days_left_text: days_left_text(days),
        deadline_text: format_date(project.deadline),
        created_by: project.created_by.clone(),
        participants: project.participants.clone(),
        viewed_by: project.viewed_by.clone(),
        comments: project
            .comments
            .iter()
            .map(|c| CommentView {
                author: c.author.clone(),
                content: c.content.clone(),
                when: format_relative_time(c.timestamp, now),
            })
            .collect(),
        update_count: project.updates.len(),
    })
}

pub async fn handle_project_overview(
    project_id: &str,
    now: DateTime<Utc>,
    project_store: Arc<RwLock<ProjectStore>>,
) -> Result<ProjectOverview> {
    let store = project_store.read().await;
    let project = store
        .get(project_id)
        .ok_or_else(|| EngineError::ProjectNotFound(project_id.to_string()))?;
    drop(store);

    to_overview(&project, now)
}

pub async fn handle_dashboard(now: DateTime<Utc>, project_store: Arc<RwLock<ProjectStore>>) -> Result<Dashboard> {
    let store = project_store.read().await;
    let projects = store.list();
    let active_count = store.active_count();
    let total_collected = store.total_collected()?;
    drop(store);

    tracing::debug!(count = projects.len(), active_count, total_collected, "Building dashboard (handler).");

    let overviews = projects
        .iter()
        .map(|p| to_overview(p, now))
        .collect::<Result<Vec<_>>>()?;

    Ok(Dashboard {
        active_count,
        total_collected,
        total_collected_text: format_currency(total_collected)?,
        projects: overviews,
    })
}
