//! Employee model

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Employee role
///
/// One closed set for the whole application; admin surfaces accept
/// `Admin` and `SuperAdmin` only.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeRole {
    Employee,
    Manager,
    Admin,
    SuperAdmin,
}

impl EmployeeRole {
    /// Administrator-level role (admin surfaces)
    pub fn is_admin(self) -> bool {
        matches!(self, EmployeeRole::Admin | EmployeeRole::SuperAdmin)
    }

    /// Manager-level role (aggregate dashboards, other employees' data)
    pub fn is_manager(self) -> bool {
        matches!(
            self,
            EmployeeRole::Manager | EmployeeRole::Admin | EmployeeRole::SuperAdmin
        )
    }
}

impl Default for EmployeeRole {
    fn default() -> Self {
        Self::Employee
    }
}

/// Per-employee working-schedule override
///
/// Takes precedence over the organization work policy when present.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkSchedule {
    pub hours_per_day: f64,
    pub days_per_week: u8,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub break_minutes: u32,
    /// Flexible schedules are never classified late
    pub flexible: bool,
}

/// Employee entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    /// Row id; equals the auth-identity id provisioned at creation
    pub id: String,
    pub organization_id: String,
    pub code: String,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub department_id: Option<String>,
    pub position_id: Option<String>,
    #[serde(default)]
    pub role: EmployeeRole,
    pub is_active: bool,
    pub hire_date: NaiveDate,
    pub schedule_override: Option<WorkSchedule>,
}

/// Create employee payload (admin provisioning action)
///
/// Validated synchronously before any network call.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EmployeeCreate {
    #[validate(email(message = "must be a valid email address"), length(max = 254))]
    pub email: String,
    #[validate(length(min = 8, max = 128, message = "must be 8-128 characters"))]
    pub password: String,
    #[validate(length(min = 1, max = 200, message = "must not be empty"))]
    pub full_name: String,
    #[validate(length(min = 1, max = 32, message = "must not be empty"))]
    pub code: String,
    pub phone: Option<String>,
    pub department_id: Option<String>,
    pub position_id: Option<String>,
    #[serde(default)]
    pub role: EmployeeRole,
    pub hire_date: Option<NaiveDate>,
    pub schedule_override: Option<WorkSchedule>,
}

/// Update employee payload (admin edit form)
///
/// `None` fields are left unchanged (and left out of the patch row).
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct EmployeeUpdate {
    #[validate(email(message = "must be a valid email address"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 200))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[validate(length(min = 1, max = 32))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<EmployeeRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hire_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule_override: Option<WorkSchedule>,
}
