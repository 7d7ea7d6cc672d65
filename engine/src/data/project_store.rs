// In-memory store of family funding projects
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use shared::models::{
    Comment, FundingProject, NewProject, NewUpdate, ProjectEdit, ProjectStatus, ProjectUpdate,
    UpdateKind,
};
use std::collections::HashMap;
use uuid::Uuid;

use crate::error::{EngineError, Result};

/// Holds every project, newest first. Reads hand out clones; the only way to
/// change a project is through the methods below.
pub struct ProjectStore {
    projects: HashMap<String, FundingProject>,
    order: Vec<String>,
}

fn require_text(value: &str, field: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::ValidationError(format!("{} must not be empty", field)));
    }
    Ok(trimmed.to_string())
}

fn validate_amounts(project: &FundingProject) -> Result<()> {
    if project.target_amount <= 0 {
        return Err(EngineError::ValidationError(format!(
            "Target amount must be greater than 0, got {}",
            project.target_amount
        )));
    }
    if project.current_amount < 0 {
        return Err(EngineError::ValidationError(format!(
            "Current amount must not be negative, got {}",
            project.current_amount
        )));
    }
    Ok(())
}

// Donations carry a positive amount; every other kind carries none and needs text.
fn validate_update(kind: UpdateKind, amount: Option<i64>, content: &str) -> Result<()> {
    match (kind, amount) {
        (UpdateKind::Donation, Some(amount)) if amount > 0 => Ok(()),
        (UpdateKind::Donation, Some(amount)) => Err(EngineError::ValidationError(format!(
            "Donation amount must be greater than 0, got {}",
            amount
        ))),
        (UpdateKind::Donation, None) => {
            Err(EngineError::ValidationError("Donation requires an amount".to_string()))
        }
        (kind, Some(_)) => Err(EngineError::ValidationError(format!(
            "Only donations carry an amount, got one on a {:?} update",
            kind
        ))),
        (_, None) => require_text(content, "Update content").map(|_| ()),
    }
}

impl ProjectStore {
    pub fn new() -> Self {
        ProjectStore {
            projects: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Creates an active project with the creator as its only participant.
    /// The caller chooses the emoji; an empty one is rejected.
    pub fn create_project(&mut self, input: NewProject, creator: &str, today: NaiveDate) -> Result<FundingProject> {
        let title = require_text(&input.title, "Title")?;
        let description = require_text(&input.description, "Description")?;
        let creator = require_text(creator, "Creator")?;
        let emoji = require_text(input.emoji.as_deref().unwrap_or(""), "Emoji")?;

        let project = FundingProject {
            id: Uuid::new_v4().to_string(),
            title: format!("{} {}", emoji, title),
            description,
            emoji,
            target_amount: input.target_amount,
            current_amount: 0,
            deadline: input.deadline,
            status: ProjectStatus::Active,
            participants: vec![creator.clone()],
            created_by: creator,
            created_at: today,
            comments: Vec::new(),
            viewed_by: Vec::new(),
            updates: Vec::new(),
        };
        validate_amounts(&project)?;

        self.order.insert(0, project.id.clone());
        self.projects.insert(project.id.clone(), project.clone());
        Ok(project)
    }

    /// Adds an already-built project after any existing ones. Used for seeding.
    pub fn insert_project(&mut self, project: FundingProject) -> Result<()> {
        validate_amounts(&project)?;
        for update in &project.updates {
            validate_update(update.kind, update.amount, &update.content)?;
        }
        if self.projects.contains_key(&project.id) {
            return Err(EngineError::ValidationError(format!(
                "Project '{}' already exists",
                project.id
            )));
        }
        self.order.push(project.id.clone());
        self.projects.insert(project.id.clone(), project);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<FundingProject> {
        self.projects.get(id).cloned()
    }

    pub fn list(&self) -> Vec<FundingProject> {
        self.order
            .iter()
            .filter_map(|id| self.projects.get(id))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    fn project_mut(&mut self, id: &str) -> Result<&mut FundingProject> {
        self.projects
            .get_mut(id)
            .ok_or_else(|| EngineError::ProjectNotFound(id.to_string()))
    }

    pub fn add_comment(&mut self, id: &str, author: &str, content: &str, now: DateTime<Utc>) -> Result<Comment> {
        let content = require_text(content, "Comment")?;
        let author = require_text(author, "Author")?;
        let project = self.project_mut(id)?;
        let comment = Comment {
            id: Uuid::new_v4().to_string(),
            author,
            content,
            timestamp: now,
            avatar: None,
        };
        project.comments.push(comment.clone());
        Ok(comment)
    }

    /// Appends an update. Donations are credited to the project's current amount.
    pub fn record_update(&mut self, id: &str, author: &str, input: NewUpdate, now: DateTime<Utc>) -> Result<ProjectUpdate> {
        let author = require_text(author, "Author")?;
        validate_update(input.kind, input.amount, &input.content)?;

        let project = self.project_mut(id)?;
        if let Some(amount) = input.amount {
            project.current_amount = project.current_amount.checked_add(amount).ok_or_else(|| {
                EngineError::ValidationError(format!("Donation of {} overflows project total", amount))
            })?;
        }

        let update = ProjectUpdate {
            id: Uuid::new_v4().to_string(),
            kind: input.kind,
            author,
            content: input.content.trim().to_string(),
            amount: input.amount,
            image: input.image,
            timestamp: now,
        };
        project.updates.push(update.clone());
        Ok(update)
    }

    /// Marks the project as seen by `viewer`. Returns false if it already was.
    pub fn acknowledge(&mut self, id: &str, viewer: &str) -> Result<bool> {
        let viewer = require_text(viewer, "Viewer")?;
        let project = self.project_mut(id)?;
        if project.has_viewed(&viewer) {
            return Ok(false);
        }
        project.viewed_by.push(viewer);
        Ok(true)
    }

    pub fn invite_participant(&mut self, id: &str, member: &str) -> Result<bool> {
        let member = require_text(member, "Member")?;
        let project = self.project_mut(id)?;
        if project.is_participant(&member) {
            return Ok(false);
        }
        project.participants.push(member);
        Ok(true)
    }

    /// Applies an edit to a copy and swaps it in only if the copy is valid.
    pub fn edit_project(&mut self, id: &str, edit: ProjectEdit) -> Result<FundingProject> {
        let mut edited = self
            .projects
            .get(id)
            .cloned()
            .ok_or_else(|| EngineError::ProjectNotFound(id.to_string()))?;

        if let Some(title) = edit.title {
            edited.title = format!("{} {}", edited.emoji, require_text(&title, "Title")?);
        }
        if let Some(description) = edit.description {
            edited.description = require_text(&description, "Description")?;
        }
        if let Some(target) = edit.target_amount {
            edited.target_amount = target;
        }
        if let Some(deadline) = edit.deadline {
            edited.deadline = deadline;
        }
        validate_amounts(&edited)?;

        self.projects.insert(id.to_string(), edited.clone());
        Ok(edited)
    }

    pub fn set_status(&mut self, id: &str, status: ProjectStatus) -> Result<()> {
        self.project_mut(id)?.status = status;
        Ok(())
    }

    /// Moves active projects to the status their amounts and deadline imply.
    /// Projects already completed or expired are left alone. Returns the ids changed.
    pub fn reconcile_statuses(&mut self, now: NaiveDateTime) -> Vec<String> {
        let mut changed = Vec::new();
        for id in &self.order {
            if let Some(project) = self.projects.get_mut(id) {
                if project.status != ProjectStatus::Active {
                    continue;
                }
                let derived = project.derived_status(now);
                if derived != project.status {
                    project.status = derived;
                    changed.push(id.clone());
                }
            }
        }
        changed
    }

    pub fn active_count(&self) -> usize {
        self.projects
            .values()
            .filter(|p| p.status == ProjectStatus::Active)
            .count()
    }

    /// Sum of current amounts over every project. Each project total fits in
    /// an `i64` but their sum may not.
    pub fn total_collected(&self) -> Result<i64> {
        self.projects
            .values()
            .try_fold(0i64, |total, p| total.checked_add(p.current_amount))
            .ok_or_else(|| EngineError::ValidationError("Total collected overflows".to_string()))
    }
}

impl Default for ProjectStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 10).unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 10, 9, 0, 0).unwrap()
    }

    fn new_project(title: &str, target: i64) -> NewProject {
        NewProject {
            title: title.to_string(),
            description: "みんなで応援しよう".to_string(),
            target_amount: target,
            deadline: NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
            emoji: Some("🎒".to_string()),
        }
    }

    fn store_with_project() -> (ProjectStore, String) {
        let mut store = ProjectStore::new();
        let project = store.create_project(new_project("小学校入学資金", 150_000), "お母さん", today()).unwrap();
        (store, project.id)
    }

    #[test]
    fn test_create_project_defaults() {
        let (store, id) = store_with_project();
        let p = store.get(&id).unwrap();
        assert_eq!(p.title, "🎒 小学校入学資金");
        assert_eq!(p.current_amount, 0);
        assert_eq!(p.status, ProjectStatus::Active);
        assert_eq!(p.participants, vec!["お母さん".to_string()]);
        assert_eq!(p.created_by, "お母さん");
        assert_eq!(p.created_at, today());
        assert!(p.comments.is_empty() && p.updates.is_empty() && p.viewed_by.is_empty());
    }

    #[test]
    fn test_create_project_requires_emoji() {
        let mut store = ProjectStore::new();
        let mut input = new_project("貯金", 1000);
        input.emoji = None;
        assert!(matches!(
            store.create_project(input.clone(), "お父さん", today()),
            Err(EngineError::ValidationError(_))
        ));
        input.emoji = Some(" 💰 ".to_string());
        let p = store.create_project(input, "お父さん", today()).unwrap();
        assert_eq!(p.emoji, "💰");
        assert_eq!(p.title, "💰 貯金");
    }

    #[test]
    fn test_create_project_validation() {
        let mut store = ProjectStore::new();
        assert!(store.create_project(new_project("  ", 1000), "お母さん", today()).is_err());
        assert!(store.create_project(new_project("塾", 0), "お母さん", today()).is_err());
        assert!(store.create_project(new_project("塾", -10), "お母さん", today()).is_err());
        let mut no_description = new_project("塾", 1000);
        no_description.description = String::new();
        assert!(store.create_project(no_description, "お母さん", today()).is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn test_list_is_newest_first() {
        let mut store = ProjectStore::new();
        let first = store.create_project(new_project("一つ目", 1000), "お母さん", today()).unwrap();
        let second = store.create_project(new_project("二つ目", 1000), "お母さん", today()).unwrap();
        let ids: Vec<String> = store.list().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_insert_project_keeps_order_and_rejects_duplicates() {
        let (mut store, id) = store_with_project();
        let mut copy = store.get(&id).unwrap();
        assert!(store.insert_project(copy.clone()).is_err());
        copy.id = "seeded".to_string();
        store.insert_project(copy).unwrap();
        let ids: Vec<String> = store.list().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![id, "seeded".to_string()]);
    }

    #[test]
    fn test_add_comment_appends_in_order() {
        let (mut store, id) = store_with_project();
        store.add_comment(&id, "おじいちゃん", "孫の入学が楽しみです！", now()).unwrap();
        store.add_comment(&id, "お母さん", "  水色がいいって言ってます  ", now()).unwrap();
        let comments = store.get(&id).unwrap().comments;
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].author, "おじいちゃん");
        assert_eq!(comments[1].content, "水色がいいって言ってます");
    }

    #[test]
    fn test_add_comment_rejects_blank_and_unknown_project() {
        let (mut store, id) = store_with_project();
        assert!(matches!(
            store.add_comment(&id, "お母さん", "   ", now()),
            Err(EngineError::ValidationError(_))
        ));
        assert!(matches!(
            store.add_comment("nope", "お母さん", "hello", now()),
            Err(EngineError::ProjectNotFound(_))
        ));
    }

    #[test]
    fn test_donation_credits_current_amount() {
        let (mut store, id) = store_with_project();
        store.record_update(&id, "おじいちゃん", NewUpdate::donation(50_000, "入学お祝い金です"), now()).unwrap();
        store.record_update(&id, "お母さん", NewUpdate::photo("ランドセルを見に行きました", "📸"), now()).unwrap();
        let p = store.get(&id).unwrap();
        assert_eq!(p.current_amount, 50_000);
        assert_eq!(p.updates.len(), 2);
        assert_eq!(p.updates[1].image.as_deref(), Some("📸"));
    }

    #[test]
    fn test_update_amount_rules() {
        let (mut store, id) = store_with_project();
        assert!(store.record_update(&id, "a", NewUpdate::donation(0, ""), now()).is_err());
        let mut no_amount = NewUpdate::donation(1, "");
        no_amount.amount = None;
        assert!(store.record_update(&id, "a", no_amount, now()).is_err());
        let mut milestone_with_amount = NewUpdate::milestone("合格！");
        milestone_with_amount.amount = Some(100);
        assert!(store.record_update(&id, "a", milestone_with_amount, now()).is_err());
        assert!(store.record_update(&id, "a", NewUpdate::message(" "), now()).is_err());
        assert!(store.get(&id).unwrap().updates.is_empty());
    }

    #[test]
    fn test_overfunding_is_allowed() {
        let (mut store, id) = store_with_project();
        store.record_update(&id, "おばあちゃん", NewUpdate::donation(200_000, "多めに"), now()).unwrap();
        let p = store.get(&id).unwrap();
        assert_eq!(p.current_amount, 200_000);
        assert_eq!(p.progress_percent().unwrap(), 100.0);
    }

    #[test]
    fn test_acknowledge_is_idempotent() {
        let (mut store, id) = store_with_project();
        assert!(store.acknowledge(&id, "おじいちゃん").unwrap());
        assert!(!store.acknowledge(&id, "おじいちゃん").unwrap());
        assert!(store.acknowledge(&id, "お父さん").unwrap());
        assert_eq!(store.get(&id).unwrap().viewed_by, vec!["おじいちゃん".to_string(), "お父さん".to_string()]);
    }

    #[test]
    fn test_invite_participant_preserves_order() {
        let (mut store, id) = store_with_project();
        assert!(store.invite_participant(&id, "おじいちゃん").unwrap());
        assert!(!store.invite_participant(&id, "お母さん").unwrap());
        assert!(store.invite_participant(&id, "叔父さん").unwrap());
        assert_eq!(
            store.get(&id).unwrap().participants,
            vec!["お母さん".to_string(), "おじいちゃん".to_string(), "叔父さん".to_string()]
        );
    }

    #[test]
    fn test_edit_project_is_all_or_nothing() {
        let (mut store, id) = store_with_project();
        let bad = ProjectEdit {
            title: Some("新しい名前".to_string()),
            target_amount: Some(0),
            ..ProjectEdit::default()
        };
        assert!(store.edit_project(&id, bad).is_err());
        assert_eq!(store.get(&id).unwrap().title, "🎒 小学校入学資金");

        let good = ProjectEdit {
            title: Some("入学準備".to_string()),
            target_amount: Some(200_000),
            ..ProjectEdit::default()
        };
        let edited = store.edit_project(&id, good).unwrap();
        assert_eq!(edited.title, "🎒 入学準備");
        assert_eq!(store.get(&id).unwrap().target_amount, 200_000);
    }

    #[test]
    fn test_set_status_and_reconcile() {
        let mut store = ProjectStore::new();
        let funded = store.create_project(new_project("達成", 1000), "お母さん", today()).unwrap();
        let late = store.create_project(new_project("期限", 1000), "お母さん", today()).unwrap();
        let manual = store.create_project(new_project("手動", 1000), "お母さん", today()).unwrap();
        store.record_update(&funded.id, "お父さん", NewUpdate::donation(1000, ""), now()).unwrap();
        store.set_status(&manual.id, ProjectStatus::Completed).unwrap();

        let after_deadline = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap().and_hms_opt(8, 0, 0).unwrap();
        let mut changed = store.reconcile_statuses(after_deadline);
        changed.sort();
        let mut expected = vec![funded.id.clone(), late.id.clone()];
        expected.sort();
        assert_eq!(changed, expected);
        assert_eq!(store.get(&funded.id).unwrap().status, ProjectStatus::Completed);
        assert_eq!(store.get(&late.id).unwrap().status, ProjectStatus::Expired);
        assert_eq!(store.get(&manual.id).unwrap().status, ProjectStatus::Completed);
        assert!(store.set_status("missing", ProjectStatus::Active).is_err());
    }

    #[test]
    fn test_dashboard_statistics() {
        let mut store = ProjectStore::new();
        let a = store.create_project(new_project("A", 10_000), "お母さん", today()).unwrap();
        let b = store.create_project(new_project("B", 10_000), "お母さん", today()).unwrap();
        store.record_update(&a.id, "x", NewUpdate::donation(3_000, ""), now()).unwrap();
        store.record_update(&b.id, "y", NewUpdate::donation(4_500, ""), now()).unwrap();
        store.set_status(&b.id, ProjectStatus::Completed).unwrap();
        assert_eq!(store.active_count(), 1);
        assert_eq!(store.total_collected().unwrap(), 7_500);
    }

    #[test]
    fn test_total_collected_overflow_is_an_error() {
        let mut store = ProjectStore::new();
        let half = i64::MAX / 2 + 1;
        for title in ["A", "B"] {
            let p = store.create_project(new_project(title, 10_000), "お母さん", today()).unwrap();
            store.record_update(&p.id, "x", NewUpdate::donation(half, ""), now()).unwrap();
        }
        assert!(matches!(store.total_collected(), Err(EngineError::ValidationError(_))));
    }

    #[test]
    fn test_insert_project_checks_updates() {
        let (store, id) = store_with_project();
        let mut project = store.get(&id).unwrap();
        project.id = "imported".to_string();
        project.updates.push(ProjectUpdate {
            id: "u1".to_string(),
            kind: UpdateKind::Donation,
            author: "おじいちゃん".to_string(),
            content: "お祝い".to_string(),
            amount: None,
            image: None,
            timestamp: now(),
        });

        let mut fresh = ProjectStore::new();
        assert!(matches!(fresh.insert_project(project.clone()), Err(EngineError::ValidationError(_))));
        assert!(fresh.is_empty());

        project.updates[0].kind = UpdateKind::Milestone;
        project.updates[0].amount = Some(500);
        assert!(fresh.insert_project(project.clone()).is_err());

        project.updates[0].amount = None;
        fresh.insert_project(project).unwrap();
        assert_eq!(fresh.len(), 1);
    }
}
