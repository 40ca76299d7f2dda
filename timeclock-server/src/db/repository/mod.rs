//! Repository Module
//!
//! Typed CRUD operations per entity over the [`DataStore`] trait. Every
//! method is organization-scoped through the caller's [`OrgContext`].

pub mod attendance;
pub mod department;
pub mod employee;
pub mod position;
pub mod setting;
pub mod work_policy;

// Re-exports
pub use attendance::AttendanceRepository;
pub use department::DepartmentRepository;
pub use employee::EmployeeRepository;
pub use position::PositionRepository;
pub use setting::SettingRepository;
pub use work_policy::WorkPolicyRepository;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::error::{AppError, AppResult};

/// Decode one row into its typed shape; a mismatch is a loud
/// remote-data error, never a silent default.
pub(crate) fn decode<T: DeserializeOwned>(entity: &str, row: Value) -> AppResult<T> {
    serde_json::from_value(row).map_err(|e| {
        AppError::remote(format!("unexpected {entity} row shape"))
            .with_detail("decode", e.to_string())
    })
}

/// Decode a row collection
pub(crate) fn decode_rows<T: DeserializeOwned>(entity: &str, rows: Vec<Value>) -> AppResult<Vec<T>> {
    rows.into_iter().map(|row| decode(entity, row)).collect()
}

/// Serialize a typed value into a row
pub(crate) fn to_row<T: Serialize>(value: &T) -> AppResult<Value> {
    serde_json::to_value(value)
        .map_err(|e| AppError::internal(format!("row serialization failed: {e}")))
}
