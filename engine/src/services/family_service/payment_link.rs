// Handler for the mock payment link. Builds links only; nothing is sent anywhere.
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::PaymentProvider;
use crate::data::project_store::ProjectStore;
use crate::error::{EngineError, Result};

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProviderLink {
    pub name: String,
    pub icon: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentLink {
    pub project_id: String,
    pub project_title: String,
    pub links: Vec<ProviderLink>,
    /// Text a member pastes into the family chat.
    pub message: String,
}

fn compose_message(project_title: &str, links: &[ProviderLink], share_message: &str) -> String {
    let mut message = format!("💝 送金リンクが生成されました！\n\n{}への支援\n\n", project_title);
    for link in links {
        message.push_str(&format!("{} {}: {}\n", link.icon, link.name, link.url));
    }
    message.push('\n');
    message.push_str(share_message);
    message
}

pub async fn handle_generate_payment_link(
    project_id: &str,
    providers: &[PaymentProvider],
    share_message: &str,
    project_store: Arc<RwLock<ProjectStore>>,
) -> Result<PaymentLink> {
    let store = project_store.read().await;
    let project = store
        .get(project_id)
        .ok_or_else(|| EngineError::ProjectNotFound(project_id.to_string()))?;
    drop(store);

    let links: Vec<ProviderLink> = providers
        .iter()
        .map(|p| ProviderLink {
            name: p.name.clone(),
            icon: p.icon.clone(),
            url: p.link_for(&project.id),
        })
        .collect();
    if links.is_empty() {
        tracing::warn!(project_id = %project_id, "No payment providers configured; link has no targets.");
    }

    let message = compose_message(&project.title, &links, share_message);
    tracing::info!(project_id = %project_id, providers = links.len(), "Payment link generated (handler).");

    Ok(PaymentLink {
        project_id: project.id,
        project_title: project.title,
        links,
        message,
    })
}
