//! In-process collaborators for the test suite
//!
//! Behavioral stand-ins for the hosted service: same trait contracts,
//! same conflict semantics, no network.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Map, Value};

use crate::auth::jwt::{self, Claims};
use shared::models::EmployeeRole;

use super::auth::{AuthGateway, Identity, Session};
use super::filter::{Filter, Query, SortDir};
use super::{DataStore, OnConflict, StoreError, StoreResult};

/// In-memory rows store
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<HashMap<String, Vec<Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a row directly (test setup)
    pub fn seed(&self, entity: &str, row: Value) {
        let mut tables = self.tables.lock().expect("store lock");
        tables
            .entry(entity.to_string())
            .or_default()
            .push(ensure_id(row));
    }
}

fn ensure_id(mut row: Value) -> Value {
    let needs_id = row
        .get("id")
        .map(|id| id.is_null() || id.as_str().is_some_and(str::is_empty))
        .unwrap_or(true);
    if needs_id
        && let Some(obj) = row.as_object_mut()
    {
        obj.insert("id".into(), Value::String(uuid::Uuid::new_v4().to_string()));
    }
    row
}

fn cmp_values(a: &Value, b: &Value) -> Option<std::cmp::Ordering> {
    match (a, b) {
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .zip(y.as_f64())
            .and_then(|(x, y)| x.partial_cmp(&y)),
        _ => None,
    }
}

fn matches(row: &Value, filter: &Filter) -> bool {
    match filter {
        Filter::Eq(col, expected) => row.get(col) == Some(expected),
        Filter::Gte(col, bound) => row
            .get(col)
            .and_then(|v| cmp_values(v, bound))
            .is_some_and(std::cmp::Ordering::is_ge),
        Filter::Lte(col, bound) => row
            .get(col)
            .and_then(|v| cmp_values(v, bound))
            .is_some_and(std::cmp::Ordering::is_le),
        Filter::In(col, set) => row.get(col).is_some_and(|v| set.contains(v)),
    }
}

fn merge_into(target: &mut Value, patch: &Map<String, Value>) {
    if let Some(obj) = target.as_object_mut() {
        for (key, value) in patch {
            obj.insert(key.clone(), value.clone());
        }
    }
}

#[async_trait]
impl DataStore for MemoryStore {
    async fn query(&self, entity: &str, query: Query) -> StoreResult<Vec<Value>> {
        let tables = self.tables.lock().expect("store lock");
        let mut rows: Vec<Value> = tables
            .get(entity)
            .map(|rows| {
                rows.iter()
                    .filter(|row| query.filters.iter().all(|f| matches(row, f)))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        if let Some((col, dir)) = &query.order {
            rows.sort_by(|a, b| {
                let ord = match (a.get(col), b.get(col)) {
                    (Some(x), Some(y)) => cmp_values(x, y).unwrap_or(std::cmp::Ordering::Equal),
                    _ => std::cmp::Ordering::Equal,
                };
                match dir {
                    SortDir::Asc => ord,
                    SortDir::Desc => ord.reverse(),
                }
            });
        }
        if let Some(limit) = query.limit {
            rows.truncate(limit);
        }
        Ok(rows)
    }

    async fn insert(&self, entity: &str, row: Value) -> StoreResult<Value> {
        let row = ensure_id(row);
        let mut tables = self.tables.lock().expect("store lock");
        tables.entry(entity.to_string()).or_default().push(row.clone());
        Ok(row)
    }

    async fn upsert(
        &self,
        entity: &str,
        conflict_keys: &[&str],
        row: Value,
        on_conflict: OnConflict,
    ) -> StoreResult<Value> {
        let mut tables = self.tables.lock().expect("store lock");
        let rows = tables.entry(entity.to_string()).or_default();

        let existing = rows.iter_mut().find(|candidate| {
            conflict_keys
                .iter()
                .all(|key| candidate.get(*key) == row.get(*key))
        });

        match existing {
            Some(found) => match on_conflict {
                OnConflict::Ignore => Ok(found.clone()),
                OnConflict::Merge => {
                    if let Some(patch) = row.as_object() {
                        let mut patch = patch.clone();
                        patch.remove("id");
                        merge_into(found, &patch);
                    }
                    Ok(found.clone())
                }
            },
            None => {
                let row = ensure_id(row);
                rows.push(row.clone());
                Ok(row)
            }
        }
    }

    async fn update(&self, entity: &str, id: &str, patch: Value) -> StoreResult<Value> {
        let mut tables = self.tables.lock().expect("store lock");
        let rows = tables
            .get_mut(entity)
            .ok_or_else(|| StoreError::NotFound(format!("{entity} {id}")))?;
        let row = rows
            .iter_mut()
            .find(|row| row.get("id").and_then(Value::as_str) == Some(id))
            .ok_or_else(|| StoreError::NotFound(format!("{entity} {id}")))?;
        if let Some(patch) = patch.as_object() {
            merge_into(row, patch);
        }
        Ok(row.clone())
    }

    async fn delete(&self, entity: &str, id: &str) -> StoreResult<Vec<Value>> {
        let mut tables = self.tables.lock().expect("store lock");
        let Some(rows) = tables.get_mut(entity) else {
            return Ok(vec![]);
        };
        let (removed, kept): (Vec<Value>, Vec<Value>) = rows
            .drain(..)
            .partition(|row| row.get("id").and_then(Value::as_str) == Some(id));
        *rows = kept;
        Ok(removed)
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

/// In-memory auth gateway
///
/// Issues real signed tokens so the verification middleware exercises
/// the production path.
pub struct MemoryAuthGateway {
    jwt_secret: String,
    accounts: Mutex<HashMap<String, (String, Identity)>>,
}

impl MemoryAuthGateway {
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            accounts: Mutex::new(HashMap::new()),
        }
    }

    /// Register an identity directly (test setup)
    pub fn register(&self, email: &str, password: &str, identity: Identity) {
        let mut accounts = self.accounts.lock().expect("accounts lock");
        accounts.insert(email.to_string(), (password.to_string(), identity));
    }

    fn issue_token(&self, identity: &Identity) -> StoreResult<String> {
        let role: EmployeeRole = identity
            .metadata
            .get("role")
            .cloned()
            .and_then(|v| serde_json::from_value(v).ok())
            .unwrap_or_default();
        let org = identity
            .metadata
            .get("organization_id")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let now = Utc::now();
        let claims = Claims {
            sub: identity.id.clone(),
            email: identity.email.clone(),
            org,
            role,
            iat: now.timestamp(),
            exp: now.timestamp() + 3600,
        };
        jwt::sign(&self.jwt_secret, &claims)
            .map_err(|e| StoreError::Remote(format!("token signing failed: {e}")))
    }
}

#[async_trait]
impl AuthGateway for MemoryAuthGateway {
    async fn sign_in(&self, email: &str, password: &str) -> StoreResult<Session> {
        let identity = {
            let accounts = self.accounts.lock().expect("accounts lock");
            match accounts.get(email) {
                Some((stored, identity)) if stored == password => identity.clone(),
                _ => return Err(StoreError::Rejected("invalid login credentials".into())),
            }
        };
        let access_token = self.issue_token(&identity)?;
        Ok(Session {
            access_token,
            token_type: "bearer".into(),
            expires_in: 3600,
            identity,
        })
    }

    async fn current_identity(&self, access_token: &str) -> StoreResult<Identity> {
        let accounts = self.accounts.lock().expect("accounts lock");
        let verifier = jwt::JwtVerifier::new(&self.jwt_secret);
        let claims = verifier
            .verify(access_token)
            .map_err(|e| StoreError::Rejected(e.to_string()))?;
        accounts
            .values()
            .map(|(_, identity)| identity)
            .find(|identity| identity.id == claims.sub)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("identity {}", claims.sub)))
    }

    async fn sign_out(&self, _access_token: &str) -> StoreResult<()> {
        Ok(())
    }

    async fn create_identity(
        &self,
        email: &str,
        password: &str,
        metadata: Value,
    ) -> StoreResult<Identity> {
        let mut accounts = self.accounts.lock().expect("accounts lock");
        if accounts.contains_key(email) {
            return Err(StoreError::Conflict(format!("identity {email}")));
        }
        let identity = Identity {
            id: uuid::Uuid::new_v4().to_string(),
            email: email.to_string(),
            metadata,
        };
        accounts.insert(email.to_string(), (password.to_string(), identity.clone()));
        Ok(identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn upsert_ignore_keeps_the_first_row() {
        let store = MemoryStore::new();
        let keys = ["employee_id", "date"];

        let first = store
            .upsert(
                "attendances",
                &keys,
                json!({"employee_id": "e1", "date": "2026-03-02", "check_in": "t1"}),
                OnConflict::Ignore,
            )
            .await
            .unwrap();

        // A concurrent second check-in must observe the existing row, not
        // insert a duplicate.
        let second = store
            .upsert(
                "attendances",
                &keys,
                json!({"employee_id": "e1", "date": "2026-03-02", "check_in": "t2"}),
                OnConflict::Ignore,
            )
            .await
            .unwrap();

        assert_eq!(first["id"], second["id"]);
        assert_eq!(second["check_in"], "t1");

        let rows = store
            .query("attendances", Query::new().eq("employee_id", "e1"))
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[tokio::test]
    async fn range_filters_compare_iso_dates() {
        let store = MemoryStore::new();
        for date in ["2026-03-01", "2026-03-05", "2026-03-09"] {
            store.seed("attendances", json!({"date": date}));
        }
        let rows = store
            .query(
                "attendances",
                Query::new()
                    .gte("date", "2026-03-02")
                    .lte("date", "2026-03-08"),
            )
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["date"], "2026-03-05");
    }

    #[tokio::test]
    async fn update_rejects_unknown_ids() {
        let store = MemoryStore::new();
        store.seed("departments", json!({"id": "d1", "name": "Ops"}));
        let err = store
            .update("departments", "missing", json!({"name": "x"}))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }
}
