// Demo projects shown to a family that has not created any of their own yet
use chrono::{DateTime, Duration, NaiveDate, Utc};
use shared::models::{Comment, FundingProject, ProjectStatus, ProjectUpdate, UpdateKind};

fn members(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

fn comment(id: &str, author: &str, content: &str, at: DateTime<Utc>) -> Comment {
    Comment {
        id: id.to_string(),
        author: author.to_string(),
        content: content.to_string(),
        timestamp: at,
        avatar: None,
    }
}

/// Comment and update timestamps are placed relative to `now`.
pub fn sample_projects(now: DateTime<Utc>) -> Vec<FundingProject> {
    vec![
        FundingProject {
            id: "1".to_string(),
            title: "🎒 小学校入学資金".to_string(),
            description: "もうすぐ小学校！みんなでお祝いの準備をしましょう".to_string(),
            emoji: "🎒".to_string(),
            target_amount: 150_000,
            current_amount: 87_000,
            deadline: NaiveDate::from_ymd_opt(2025, 3, 31).unwrap_or_default(),
            status: ProjectStatus::Active,
            participants: members(&["おじいちゃん", "おばあちゃん", "叔父さん", "お父さん", "お母さん"]),
            created_by: "お母さん".to_string(),
            created_at: NaiveDate::from_ymd_opt(2024, 12, 1).unwrap_or_default(),
            viewed_by: members(&["おじいちゃん", "おばあちゃん", "お父さん"]),
            comments: vec![
                comment("1", "おじいちゃん", "孫の入学が楽しみです！ランドセルは赤がいいかな？", now - Duration::hours(1)),
                comment("2", "お母さん", "本人は水色がいいって言ってます😊", now - Duration::minutes(30)),
            ],
            updates: vec![
                ProjectUpdate {
                    id: "1".to_string(),
                    kind: UpdateKind::Donation,
                    author: "おじいちゃん".to_string(),
                    content: "入学お祝い金です".to_string(),
                    amount: Some(50_000),
                    image: None,
                    timestamp: now - Duration::days(2),
                },
                ProjectUpdate {
                    id: "2".to_string(),
                    kind: UpdateKind::Photo,
                    author: "お母さん".to_string(),
                    content: "ランドセルを見に行きました".to_string(),
                    amount: None,
                    image: Some("📸".to_string()),
                    timestamp: now - Duration::days(1),
                },
            ],
        },
        FundingProject {
            id: "2".to_string(),
            title: "📚 塾費用（1年間）".to_string(),
            description: "中学受験に向けて、みんなで応援しよう".to_string(),
            emoji: "📚".to_string(),
            target_amount: 800_000,
            current_amount: 320_000,
            deadline: NaiveDate::from_ymd_opt(2025, 2, 28).unwrap_or_default(),
            status: ProjectStatus::Active,
            participants: members(&["おじいちゃん", "おばあちゃん", "お父さん", "お母さん"]),
            created_by: "お父さん".to_string(),
            created_at: NaiveDate::from_ymd_opt(2024, 11, 15).unwrap_or_default(),
            viewed_by: members(&["おばあちゃん", "お父さん", "お母さん"]),
            comments: vec![comment("1", "おばあちゃん", "勉強頑張ってね〜！", now - Duration::hours(3))],
            updates: vec![ProjectUpdate {
                id: "1".to_string(),
                kind: UpdateKind::Milestone,
                author: "お父さん".to_string(),
                content: "模試の結果が良かったです！".to_string(),
                amount: None,
                image: None,
                timestamp: now - Duration::weeks(1),
            }],
        },
    ]
}
