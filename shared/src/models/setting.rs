//! System setting model

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Organization-scoped key/value setting grouped by category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemSetting {
    pub id: String,
    pub organization_id: String,
    pub category: String,
    pub key: String,
    pub value: Value,
    /// Visible to non-admin sessions
    pub is_public: bool,
}

/// Upsert payload for a setting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingUpsert {
    pub value: Value,
    #[serde(default)]
    pub is_public: bool,
}
