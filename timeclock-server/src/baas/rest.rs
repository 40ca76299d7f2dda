//! HTTP clients for the hosted backend service
//!
//! The rows API follows PostgREST conventions
//! (`GET /rest/v1/{entity}?col=eq.value&order=col.asc`), the auth API the
//! matching token/user/admin endpoints. The anonymous key authenticates
//! the application; the service key, when configured, authorizes
//! privileged identity provisioning.

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Response, StatusCode};
use serde_json::{Value, json};

use super::auth::{AuthGateway, Identity, Session};
use super::filter::{Filter, Query, SortDir};
use super::{DataStore, OnConflict, StoreError, StoreResult};

const APIKEY_HEADER: &str = "apikey";

/// Rows API client
#[derive(Clone)]
pub struct RestStore {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
}

impl RestStore {
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
        }
    }

    fn rows_url(&self, entity: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, entity)
    }

    fn query_pairs(query: &Query) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(query.filters.len() + 2);
        for filter in &query.filters {
            match filter {
                Filter::Eq(col, v) => pairs.push((col.clone(), format!("eq.{}", literal(v)))),
                Filter::Gte(col, v) => pairs.push((col.clone(), format!("gte.{}", literal(v)))),
                Filter::Lte(col, v) => pairs.push((col.clone(), format!("lte.{}", literal(v)))),
                Filter::In(col, vs) => {
                    let joined: Vec<String> = vs.iter().map(literal).collect();
                    pairs.push((col.clone(), format!("in.({})", joined.join(","))));
                }
            }
        }
        if let Some((col, dir)) = &query.order {
            let dir = match dir {
                SortDir::Asc => "asc",
                SortDir::Desc => "desc",
            };
            pairs.push(("order".into(), format!("{col}.{dir}")));
        }
        if let Some(limit) = query.limit {
            pairs.push(("limit".into(), limit.to_string()));
        }
        pairs
    }

    async fn rows_from(resp: Response) -> StoreResult<Vec<Value>> {
        let resp = check_status(resp).await?;
        resp.json::<Vec<Value>>()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }
}

/// Render a JSON value as a filter literal
fn literal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn transport_err(err: reqwest::Error) -> StoreError {
    if err.is_connect() || err.is_timeout() {
        StoreError::Unavailable(err.to_string())
    } else {
        StoreError::Remote(err.to_string())
    }
}

async fn check_status(resp: Response) -> StoreResult<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    if status == StatusCode::CONFLICT {
        Err(StoreError::Conflict(body))
    } else if status.is_client_error() {
        Err(StoreError::Rejected(format!("{status}: {body}")))
    } else {
        Err(StoreError::Remote(format!("{status}: {body}")))
    }
}

#[async_trait]
impl DataStore for RestStore {
    async fn query(&self, entity: &str, query: Query) -> StoreResult<Vec<Value>> {
        let resp = self
            .http
            .get(self.rows_url(entity))
            .header(APIKEY_HEADER, &self.anon_key)
            .header(AUTHORIZATION, format!("Bearer {}", self.anon_key))
            .query(&Self::query_pairs(&query))
            .send()
            .await
            .map_err(transport_err)?;
        Self::rows_from(resp).await
    }

    async fn insert(&self, entity: &str, row: Value) -> StoreResult<Value> {
        let resp = self
            .http
            .post(self.rows_url(entity))
            .header(APIKEY_HEADER, &self.anon_key)
            .header(AUTHORIZATION, format!("Bearer {}", self.anon_key))
            .header(CONTENT_TYPE, "application/json")
            .header("Prefer", "return=representation")
            .json(&row)
            .send()
            .await
            .map_err(transport_err)?;
        Self::rows_from(resp)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::Remote(format!("insert into {entity} returned no row")))
    }

    async fn upsert(
        &self,
        entity: &str,
        conflict_keys: &[&str],
        row: Value,
        on_conflict: OnConflict,
    ) -> StoreResult<Value> {
        let resolution = match on_conflict {
            OnConflict::Ignore => "resolution=ignore-duplicates,return=representation",
            OnConflict::Merge => "resolution=merge-duplicates,return=representation",
        };
        let resp = self
            .http
            .post(self.rows_url(entity))
            .header(APIKEY_HEADER, &self.anon_key)
            .header(AUTHORIZATION, format!("Bearer {}", self.anon_key))
            .header(CONTENT_TYPE, "application/json")
            .header("Prefer", resolution)
            .query(&[("on_conflict", conflict_keys.join(","))])
            .json(&row)
            .send()
            .await
            .map_err(transport_err)?;

        if let Some(stored) = Self::rows_from(resp).await?.into_iter().next() {
            return Ok(stored);
        }

        // Ignored duplicate: the representation is empty, so re-read the
        // row that won.
        let mut query = Query::new().limit(1);
        for key in conflict_keys {
            let value = row.get(*key).cloned().unwrap_or(Value::Null);
            query = query.eq(*key, value);
        }
        self.query(entity, query)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::Remote(format!("upsert into {entity} returned no row")))
    }

    async fn update(&self, entity: &str, id: &str, patch: Value) -> StoreResult<Value> {
        let resp = self
            .http
            .patch(self.rows_url(entity))
            .header(APIKEY_HEADER, &self.anon_key)
            .header(AUTHORIZATION, format!("Bearer {}", self.anon_key))
            .header(CONTENT_TYPE, "application/json")
            .header("Prefer", "return=representation")
            .query(&[("id", format!("eq.{id}"))])
            .json(&patch)
            .send()
            .await
            .map_err(transport_err)?;
        Self::rows_from(resp)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::NotFound(format!("{entity} {id}")))
    }

    async fn delete(&self, entity: &str, id: &str) -> StoreResult<Vec<Value>> {
        let resp = self
            .http
            .delete(self.rows_url(entity))
            .header(APIKEY_HEADER, &self.anon_key)
            .header(AUTHORIZATION, format!("Bearer {}", self.anon_key))
            .header("Prefer", "return=representation")
            .query(&[("id", format!("eq.{id}"))])
            .send()
            .await
            .map_err(transport_err)?;
        Self::rows_from(resp).await
    }

    async fn ping(&self) -> StoreResult<()> {
        let resp = self
            .http
            .get(format!("{}/rest/v1/", self.base_url))
            .header(APIKEY_HEADER, &self.anon_key)
            .send()
            .await
            .map_err(transport_err)?;
        check_status(resp).await.map(|_| ())
    }
}

/// Auth API client
#[derive(Clone)]
pub struct RestAuthGateway {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
    service_key: Option<String>,
}

impl RestAuthGateway {
    pub fn new(
        base_url: impl Into<String>,
        anon_key: impl Into<String>,
        service_key: Option<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
            service_key,
        }
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }
}

#[derive(serde::Deserialize)]
struct TokenResponse {
    access_token: String,
    token_type: String,
    expires_in: i64,
    user: RemoteUser,
}

#[derive(serde::Deserialize)]
struct RemoteUser {
    id: String,
    email: String,
    #[serde(default)]
    app_metadata: Value,
}

impl From<RemoteUser> for Identity {
    fn from(user: RemoteUser) -> Self {
        Identity {
            id: user.id,
            email: user.email,
            metadata: user.app_metadata,
        }
    }
}

#[async_trait]
impl AuthGateway for RestAuthGateway {
    async fn sign_in(&self, email: &str, password: &str) -> StoreResult<Session> {
        let resp = self
            .http
            .post(self.auth_url("token"))
            .header(APIKEY_HEADER, &self.anon_key)
            .query(&[("grant_type", "password")])
            .json(&json!({"email": email, "password": password}))
            .send()
            .await
            .map_err(transport_err)?;
        let resp = check_status(resp).await?;
        let token: TokenResponse = resp
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;
        Ok(Session {
            access_token: token.access_token,
            token_type: token.token_type,
            expires_in: token.expires_in,
            identity: token.user.into(),
        })
    }

    async fn current_identity(&self, access_token: &str) -> StoreResult<Identity> {
        let resp = self
            .http
            .get(self.auth_url("user"))
            .header(APIKEY_HEADER, &self.anon_key)
            .header(AUTHORIZATION, format!("Bearer {access_token}"))
            .send()
            .await
            .map_err(transport_err)?;
        let resp = check_status(resp).await?;
        let user: RemoteUser = resp
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;
        Ok(user.into())
    }

    async fn sign_out(&self, access_token: &str) -> StoreResult<()> {
        let resp = self
            .http
            .post(self.auth_url("logout"))
            .header(APIKEY_HEADER, &self.anon_key)
            .header(AUTHORIZATION, format!("Bearer {access_token}"))
            .send()
            .await
            .map_err(transport_err)?;
        check_status(resp).await.map(|_| ())
    }

    async fn create_identity(
        &self,
        email: &str,
        password: &str,
        metadata: Value,
    ) -> StoreResult<Identity> {
        let service_key = self.service_key.as_ref().ok_or_else(|| {
            StoreError::Rejected("identity provisioning requires a service key".into())
        })?;
        let resp = self
            .http
            .post(self.auth_url("admin/users"))
            .header(APIKEY_HEADER, &self.anon_key)
            .header(AUTHORIZATION, format!("Bearer {service_key}"))
            .json(&json!({
                "email": email,
                "password": password,
                "email_confirm": true,
                "app_metadata": metadata,
            }))
            .send()
            .await
            .map_err(transport_err)?;
        let resp = check_status(resp).await?;
        let user: RemoteUser = resp
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;
        Ok(user.into())
    }
}
