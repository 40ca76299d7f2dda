//! Tenant context
//!
//! Every query against the data-access collaborator is scoped to one
//! organization. The context is built from the verified session and passed
//! explicitly through every repository call — never held as ambient global
//! state and never hardcoded.

use serde::{Deserialize, Serialize};

/// Organization (tenant) scope plus the acting employee
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgContext {
    /// The tenant every query is filtered by
    pub organization_id: String,
    /// The employee performing the request
    pub employee_id: String,
}

impl OrgContext {
    pub fn new(organization_id: impl Into<String>, employee_id: impl Into<String>) -> Self {
        Self {
            organization_id: organization_id.into(),
            employee_id: employee_id.into(),
        }
    }
}
