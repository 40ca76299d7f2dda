//! System Setting Repository

use std::sync::Arc;

use uuid::Uuid;

use shared::OrgContext;
use shared::error::AppResult;
use shared::models::{SettingUpsert, SystemSetting};

use super::{decode, decode_rows, to_row};
use crate::baas::{DataStore, OnConflict, Query};

const ENTITY: &str = "system_settings";

#[derive(Clone)]
pub struct SettingRepository {
    store: Arc<dyn DataStore>,
}

impl SettingRepository {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }

    /// List settings, optionally within one category
    pub async fn list(
        &self,
        org: &OrgContext,
        category: Option<&str>,
    ) -> AppResult<Vec<SystemSetting>> {
        let mut query = Query::new()
            .eq("organization_id", org.organization_id.as_str())
            .order_asc("key");
        if let Some(category) = category {
            query = query.eq("category", category);
        }
        let rows = self.store.query(ENTITY, query).await?;
        decode_rows(ENTITY, rows)
    }

    /// Create or replace one setting, keyed on (organization, category, key)
    pub async fn upsert(
        &self,
        org: &OrgContext,
        category: &str,
        key: &str,
        data: SettingUpsert,
    ) -> AppResult<SystemSetting> {
        let setting = SystemSetting {
            id: Uuid::new_v4().to_string(),
            organization_id: org.organization_id.clone(),
            category: category.to_string(),
            key: key.to_string(),
            value: data.value,
            is_public: data.is_public,
        };
        let row = self
            .store
            .upsert(
                ENTITY,
                &["organization_id", "category", "key"],
                to_row(&setting)?,
                OnConflict::Merge,
            )
            .await?;
        decode(ENTITY, row)
    }
}
