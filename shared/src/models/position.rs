//! Position model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Position entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    pub id: String,
    pub organization_id: String,
    pub title: String,
    pub code: String,
    pub department_id: Option<String>,
    pub level: i32,
    pub is_active: bool,
}

/// Create position payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PositionCreate {
    #[validate(length(min = 1, max = 200, message = "must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, max = 32, message = "must not be empty"))]
    pub code: String,
    pub department_id: Option<String>,
    #[serde(default)]
    pub level: i32,
}

/// Update position payload
///
/// `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct PositionUpdate {
    #[validate(length(min = 1, max = 200))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 32))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}
