// Engine settings, loaded from the embedded default JSON or an override file
use serde::Deserialize;
use std::path::Path;

use crate::error::{EngineError, Result};

/// Environment variable naming an override config file.
pub const CONFIG_ENV_VAR: &str = "FAMILY_FUND_CONFIG";

const DEFAULT_CONFIG: &str = include_str!("../../assets/config/default.json");

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineSettings {
    /// Member acting through this engine; author of comments and creator of new projects.
    pub current_member: String,
    pub default_emoji: String,
    pub emoji_options: Vec<String>,
    pub seed_sample_data: bool,
    /// Fallback filter when RUST_LOG is not set.
    pub log_level: String,
    pub payment_providers: Vec<PaymentProvider>,
    pub share_message: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentProvider {
    pub name: String,
    #[serde(default)]
    pub icon: String,
    pub base_url: String,
}

impl PaymentProvider {
    pub fn link_for(&self, project_id: &str) -> String {
        format!("{}{}", self.base_url, project_id)
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            current_member: "お母さん".to_string(),
            default_emoji: "💰".to_string(),
            emoji_options: ["💰", "🎒", "📚", "🏫", "👨‍👩‍👧‍👦", "🎁", "⚽", "🎵", "🍎", "🌸"]
                .iter()
                .map(|e| e.to_string())
                .collect(),
            seed_sample_data: true,
            log_level: "info".to_string(),
            payment_providers: vec![
                PaymentProvider {
                    name: "PayPay".to_string(),
                    icon: "📱".to_string(),
                    base_url: "https://paypay.ne.jp/send/".to_string(),
                },
                PaymentProvider {
                    name: "LINE Pay".to_string(),
                    icon: "💬".to_string(),
                    base_url: "https://line.me/pay/".to_string(),
                },
            ],
            share_message: "家族にシェアして温かい支援を送りましょう！".to_string(),
        }
    }
}

impl EngineSettings {
    /// Settings from the config file bundled with the binary.
    pub fn load_default() -> Result<Self> {
        Self::from_json(DEFAULT_CONFIG)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let settings: EngineSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            EngineError::ConfigError(format!("Failed to read config file '{}': {}", path.display(), e))
        })?;
        Self::from_json(&content)
    }

    /// Reads the file named by `FAMILY_FUND_CONFIG`, or the bundled defaults when unset.
    pub fn from_env() -> Result<Self> {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) if !path.trim().is_empty() => Self::load(path.trim()),
            _ => Self::load_default(),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.current_member.trim().is_empty() {
            return Err(EngineError::ConfigError("currentMember must not be empty".to_string()));
        }
        if let Some(p) = self.payment_providers.iter().find(|p| p.base_url.trim().is_empty()) {
            return Err(EngineError::ConfigError(format!(
                "Payment provider '{}' has an empty baseUrl",
                p.name
            )));
        }
        Ok(())
    }
}
