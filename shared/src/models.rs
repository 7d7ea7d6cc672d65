use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::progress::progress_percent;
use crate::utils::{japanese_format, FormatError};

/// A family savings goal that members contribute to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FundingProject {
    pub id: String,
    pub title: String,
    pub description: String,
    pub emoji: String,
    pub target_amount: i64,
    pub current_amount: i64,
    pub deadline: NaiveDate,
    pub status: ProjectStatus,
    pub participants: Vec<String>,
    pub created_by: String,
    pub created_at: NaiveDate,
    pub comments: Vec<Comment>,
    pub viewed_by: Vec<String>,
    pub updates: Vec<ProjectUpdate>,
}

impl FundingProject {
    /// Progress towards the target, clamped at 100.
    pub fn progress_percent(&self) -> Result<f64, FormatError> {
        progress_percent(self.current_amount, self.target_amount)
    }

    pub fn days_remaining(&self, now: NaiveDateTime) -> i64 {
        japanese_format::days_remaining(self.deadline, now)
    }

    pub fn is_overfunded(&self) -> bool {
        self.current_amount > self.target_amount
    }

    /// The status the amounts and deadline imply. The stored `status` is a
    /// manual setting and is never overwritten by this.
    pub fn derived_status(&self, now: NaiveDateTime) -> ProjectStatus {
        if self.current_amount >= self.target_amount {
            ProjectStatus::Completed
        } else if self.days_remaining(now) < 0 {
            ProjectStatus::Expired
        } else {
            ProjectStatus::Active
        }
    }

    /// Sum of all donation updates recorded on this project, or `None` if it
    /// does not fit in an `i64`.
    pub fn donated_total(&self) -> Option<i64> {
        self.updates
            .iter()
            .filter(|u| u.kind == UpdateKind::Donation)
            .filter_map(|u| u.amount)
            .try_fold(0i64, |total, amount| total.checked_add(amount))
    }

    pub fn has_viewed(&self, member: &str) -> bool {
        self.viewed_by.iter().any(|v| v == member)
    }

    pub fn is_participant(&self, member: &str) -> bool {
        self.participants.iter().any(|p| p == member)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Active,
    Completed,
    Expired,
}

impl ProjectStatus {
    /// Badge text shown next to a project.
    pub fn label(&self) -> &'static str {
        match self {
            ProjectStatus::Active => "応援中",
            ProjectStatus::Completed => "達成",
            ProjectStatus::Expired => "期限切れ",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ProjectStatus::Active => "active",
            ProjectStatus::Completed => "completed",
            ProjectStatus::Expired => "expired",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub author: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum UpdateKind {
    Donation,
    Milestone,
    Photo,
    Message,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectUpdate {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: UpdateKind,
    pub author: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Input for creating a project, as submitted from the creation form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub title: String,
    pub description: String,
    pub target_amount: i64,
    pub deadline: NaiveDate,
    #[serde(default)]
    pub emoji: Option<String>,
}

/// Fields to change on an existing project. `None` leaves a field as is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectEdit {
    pub title: Option<String>,
    pub description: Option<String>,
    pub target_amount: Option<i64>,
    pub deadline: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUpdate {
    #[serde(rename = "type")]
    pub kind: UpdateKind,
    pub content: String,
    #[serde(default)]
    pub amount: Option<i64>,
    #[serde(default)]
    pub image: Option<String>,
}

impl NewUpdate {
    pub fn donation(amount: i64, content: impl Into<String>) -> Self {
        Self {
            kind: UpdateKind::Donation,
            content: content.into(),
            amount: Some(amount),
            image: None,
        }
    }

    pub fn milestone(content: impl Into<String>) -> Self {
        Self {
            kind: UpdateKind::Milestone,
            content: content.into(),
            amount: None,
            image: None,
        }
    }

    pub fn photo(content: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            kind: UpdateKind::Photo,
            content: content.into(),
            amount: None,
            image: Some(image.into()),
        }
    }

    pub fn message(content: impl Into<String>) -> Self {
        Self {
            kind: UpdateKind::Message,
            content: content.into(),
            amount: None,
            image: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn project(current: i64, target: i64, deadline: NaiveDate) -> FundingProject {
        FundingProject {
            id: "p1".to_string(),
            title: "🎒 小学校入学資金".to_string(),
            description: "入学準備".to_string(),
            emoji: "🎒".to_string(),
            target_amount: target,
            current_amount: current,
            deadline,
            status: ProjectStatus::Active,
            participants: vec!["お母さん".to_string()],
            created_by: "お母さん".to_string(),
            created_at: NaiveDate::from_ymd_opt(2024, 12, 1).unwrap(),
            comments: vec![],
            viewed_by: vec!["おじいちゃん".to_string()],
            updates: vec![],
        }
    }

    fn noon(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(12, 0, 0).unwrap()
    }

    #[test]
    fn test_derived_status() {
        let deadline = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();
        assert_eq!(project(87_000, 150_000, deadline).derived_status(noon(2025, 1, 10)), ProjectStatus::Active);
        assert_eq!(project(150_000, 150_000, deadline).derived_status(noon(2025, 1, 10)), ProjectStatus::Completed);
        assert_eq!(project(87_000, 150_000, deadline).derived_status(noon(2025, 4, 2)), ProjectStatus::Expired);
        // Funded beats expired.
        assert_eq!(project(200_000, 150_000, deadline).derived_status(noon(2025, 4, 2)), ProjectStatus::Completed);
    }

    #[test]
    fn test_derived_status_does_not_touch_stored_status() {
        let p = project(150_000, 150_000, NaiveDate::from_ymd_opt(2025, 3, 31).unwrap());
        let _ = p.derived_status(noon(2025, 1, 10));
        assert_eq!(p.status, ProjectStatus::Active);
    }

    #[test]
    fn test_progress_and_overfunding() {
        let p = project(300_000, 150_000, NaiveDate::from_ymd_opt(2025, 3, 31).unwrap());
        assert!(p.is_overfunded());
        assert_eq!(p.progress_percent().unwrap(), 100.0);
    }

    #[test]
    fn test_donated_total_ignores_other_updates() {
        let mut p = project(0, 150_000, NaiveDate::from_ymd_opt(2025, 3, 31).unwrap());
        let ts = Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap();
        p.updates.push(ProjectUpdate {
            id: "u1".to_string(),
            kind: UpdateKind::Donation,
            author: "おじいちゃん".to_string(),
            content: "入学お祝い金です".to_string(),
            amount: Some(50_000),
            image: None,
            timestamp: ts,
        });
        p.updates.push(ProjectUpdate {
            id: "u2".to_string(),
            kind: UpdateKind::Photo,
            author: "お母さん".to_string(),
            content: "ランドセルを見に行きました".to_string(),
            amount: None,
            image: Some("📸".to_string()),
            timestamp: ts,
        });
        assert_eq!(p.donated_total(), Some(50_000));
    }

    #[test]
    fn test_donated_total_overflow() {
        let mut p = project(0, 150_000, NaiveDate::from_ymd_opt(2025, 3, 31).unwrap());
        let ts = Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap();
        for id in ["u1", "u2"] {
            p.updates.push(ProjectUpdate {
                id: id.to_string(),
                kind: UpdateKind::Donation,
                author: "おじいちゃん".to_string(),
                content: String::new(),
                amount: Some(i64::MAX / 2 + 1),
                image: None,
                timestamp: ts,
            });
        }
        assert_eq!(p.donated_total(), None);
    }

    #[test]
    fn test_membership_helpers() {
        let p = project(0, 1, NaiveDate::from_ymd_opt(2025, 3, 31).unwrap());
        assert!(p.is_participant("お母さん"));
        assert!(!p.is_participant("お父さん"));
        assert!(p.has_viewed("おじいちゃん"));
    }

    #[test]
    fn test_serializes_camel_case_with_type_tag() {
        let update = ProjectUpdate {
            id: "u1".to_string(),
            kind: UpdateKind::Milestone,
            author: "お父さん".to_string(),
            content: "模試の結果が良かったです！".to_string(),
            amount: None,
            image: None,
            timestamp: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json["type"], "milestone");
        assert!(json.get("amount").is_none());

        let p = project(87_000, 150_000, NaiveDate::from_ymd_opt(2025, 3, 31).unwrap());
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["targetAmount"], 150_000);
        assert_eq!(json["status"], "active");
        assert_eq!(json["deadline"], "2025-03-31");
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(ProjectStatus::Active.label(), "応援中");
        assert_eq!(ProjectStatus::Completed.label(), "達成");
        assert_eq!(ProjectStatus::Expired.label(), "期限切れ");
        assert_eq!(ProjectStatus::Expired.to_string(), "expired");
    }
}
