//! Data layer
//!
//! Typed repositories over the generic data-access collaborator. Every
//! call takes an explicit [`shared::OrgContext`]; rows are decoded into
//! `shared::models` structs at this boundary.

pub mod repository;

pub use repository::{
    AttendanceRepository, DepartmentRepository, EmployeeRepository, PositionRepository,
    SettingRepository, WorkPolicyRepository,
};
