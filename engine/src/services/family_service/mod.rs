// FamilyService owns the shared store handle and the settings, logs each
// request, and dispatches to the handler modules below.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::EngineSettings;
use crate::data::project_store::ProjectStore;
use crate::data::sample::sample_projects;
use crate::error::Result;
use shared::models::{
    Comment, FundingProject, NewProject, NewUpdate, ProjectEdit, ProjectStatus, ProjectUpdate,
};

pub mod create_project;
pub mod helpers;
pub mod ledger;
pub mod overview;
pub mod payment_link;
pub mod post_comment;
pub mod record_update;

use overview::{Dashboard, ProjectOverview};
use payment_link::PaymentLink;

pub struct FamilyService {
    project_store: Arc<RwLock<ProjectStore>>,
    settings: Arc<EngineSettings>,
}

impl FamilyService {
    pub fn new(project_store: Arc<RwLock<ProjectStore>>, settings: EngineSettings) -> Self {
        FamilyService {
            project_store,
            settings: Arc::new(settings),
        }
    }

    /// Builds a service over a fresh store, seeded with the demo projects
    /// when `seed_sample_data` is set.
    pub async fn with_settings(settings: EngineSettings, now: DateTime<Utc>) -> Result<Self> {
        let mut store = ProjectStore::new();
        if settings.seed_sample_data {
            for project in sample_projects(now) {
                store.insert_project(project)?;
            }
            tracing::info!(count = store.len(), "Seeded sample projects.");
        }
        Ok(Self::new(Arc::new(RwLock::new(store)), settings))
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn project_store(&self) -> Arc<RwLock<ProjectStore>> {
        self.project_store.clone()
    }

    pub async fn create_project(&self, input: NewProject, today: NaiveDate) -> Result<FundingProject> {
        tracing::info!(title = %input.title, target_amount = input.target_amount, "Received create project request.");
        create_project::handle_create_project(
            input,
            &self.settings.current_member,
            &self.settings.default_emoji,
            &self.settings.emoji_options,
            today,
            self.project_store.clone(),
        )
        .await
    }

    pub async fn get_project(&self, project_id: &str) -> Option<FundingProject> {
        self.project_store.read().await.get(project_id)
    }

    pub async fn list_projects(&self) -> Vec<FundingProject> {
        self.project_store.read().await.list()
    }

    /// Posts a comment as the configured current member.
    pub async fn post_comment(&self, project_id: &str, content: &str, now: DateTime<Utc>) -> Result<Comment> {
        tracing::info!(project_id = %project_id, "Received comment request.");
        post_comment::handle_post_comment(
            project_id,
            &self.settings.current_member,
            content,
            now,
            self.project_store.clone(),
        )
        .await
    }

    pub async fn record_update(
        &self,
        project_id: &str,
        author: &str,
        update: NewUpdate,
        now: DateTime<Utc>,
    ) -> Result<ProjectUpdate> {
        tracing::info!(project_id = %project_id, author = %author, kind = ?update.kind, "Received update request.");
        record_update::handle_record_update(project_id, author, update, now, self.project_store.clone()).await
    }

    pub async fn acknowledge(&self, project_id: &str, viewer: &str) -> Result<bool> {
        record_update::handle_acknowledge(project_id, viewer, self.project_store.clone()).await
    }

    pub async fn invite(&self, project_id: &str, member: &str) -> Result<bool> {
        tracing::info!(project_id = %project_id, member = %member, "Received invite request.");
        record_update::handle_invite(project_id, member, self.project_store.clone()).await
    }

    pub async fn edit_project(&self, project_id: &str, edit: ProjectEdit) -> Result<FundingProject> {
        tracing::info!(project_id = %project_id, "Received edit request.");
        self.project_store.write().await.edit_project(project_id, edit)
    }

    pub async fn set_status(&self, project_id: &str, status: ProjectStatus) -> Result<()> {
        tracing::info!(project_id = %project_id, status = %status, "Status set manually.");
        self.project_store.write().await.set_status(project_id, status)
    }

    pub async fn reconcile_statuses(&self, now: NaiveDateTime) -> Vec<String> {
        let changed = self.project_store.write().await.reconcile_statuses(now);
        if !changed.is_empty() {
            tracing::info!(changed = ?changed, "Project statuses reconciled.");
        }
        changed
    }

    pub async fn project_overview(&self, project_id: &str, now: DateTime<Utc>) -> Result<ProjectOverview> {
        overview::handle_project_overview(project_id, now, self.project_store.clone()).await
    }

    pub async fn dashboard(&self, now: DateTime<Utc>) -> Result<Dashboard> {
        overview::handle_dashboard(now, self.project_store.clone()).await
    }

    pub async fn generate_payment_link(&self, project_id: &str) -> Result<PaymentLink> {
        tracing::info!(project_id = %project_id, "Received payment link request.");
        payment_link::handle_generate_payment_link(
            project_id,
            &self.settings.payment_providers,
            &self.settings.share_message,
            self.project_store.clone(),
        )
        .await
    }

    pub async fn import_contributions(&self, project_id: &str, file_path: impl AsRef<Path>) -> Result<usize> {
        let file_path = file_path.as_ref();
        tracing::info!(project_id = %project_id, path = %file_path.display(), "Received contribution import request.");
        ledger::handle_import_contributions(project_id, file_path, self.project_store.clone()).await
    }

    pub async fn export_ledger(&self, project_id: &str, file_path: impl AsRef<Path>) -> Result<usize> {
        let file_path = file_path.as_ref();
        tracing::info!(project_id = %project_id, path = %file_path.display(), "Received ledger export request.");
        ledger::handle_export_ledger(project_id, file_path, self.project_store.clone()).await
    }
}
