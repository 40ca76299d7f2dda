//! Domain models
//!
//! Typed row shapes for every entity read from or written to the
//! data-access collaborator. Rows are decoded into these structs at the
//! boundary; business logic never touches untyped values.

pub mod attendance;
pub mod department;
pub mod employee;
pub mod position;
pub mod setting;
pub mod work_policy;

// Re-exports
pub use attendance::{
    Attendance, AttendanceStatus, AttendanceUpdate, BreakInterval, BreakType, GeoLocation,
};
pub use department::{Department, DepartmentCreate, DepartmentUpdate};
pub use employee::{Employee, EmployeeCreate, EmployeeRole, EmployeeUpdate, WorkSchedule};
pub use position::{Position, PositionCreate, PositionUpdate};
pub use setting::{SettingUpsert, SystemSetting};
pub use work_policy::{WorkPolicy, WorkPolicyUpdate};
