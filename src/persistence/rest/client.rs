// src/persistence/rest/client.rs
//
// Hosted backend client
//
// ARCHITECTURE:
// - PostgREST tables under /rest/v1/{table}
// - Object storage under /storage/v1/object/{bucket}/{path}
// - Session lookup under /auth/v1/user
//
// RULES:
// - This is INFRASTRUCTURE: it maps calls to HTTP and nothing else
// - No timeouts or retries beyond the HTTP client's defaults

use async_trait::async_trait;
use reqwest::{header, Client, Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;

use crate::domain::{Record, Table};
use crate::error::{AppError, AppResult};
use crate::persistence::{FileUpload, Filter, PersistenceLayer, Query, User};

pub struct RestBackend {
    client: Client,
    base_url: String,
    api_key: String,
    access_token: Option<String>,
}

/// `/auth/v1/user` response body
#[derive(Debug, Deserialize)]
struct AuthUser {
    id: String,
    email: Option<String>,
}

impl RestBackend {
    pub fn new(base_url: &str, api_key: &str, access_token: Option<String>) -> AppResult<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            "apikey",
            header::HeaderValue::from_str(api_key)
                .map_err(|e| AppError::Validation(format!("Invalid API key: {}", e)))?,
        );

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(AppError::Http)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            access_token,
        })
    }

    fn table_url(&self, table: Table) -> String {
        format!("{}/rest/v1/{}", self.base_url, table.as_str())
    }

    fn object_url(&self, bucket: &str, path: &str) -> String {
        format!("{}/storage/v1/object/{}/{}", self.base_url, bucket, path)
    }

    pub fn public_url(&self, bucket: &str, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url, bucket, path
        )
    }

    /// Signed-in requests use the session token, anonymous ones the API key.
    fn bearer(&self) -> String {
        format!(
            "Bearer {}",
            self.access_token.as_deref().unwrap_or(&self.api_key)
        )
    }
}

/// PostgREST operator form of an equality filter value.
pub(crate) fn filter_operand(value: &Value) -> String {
    match value {
        Value::Null => "is.null".to_string(),
        Value::String(s) => format!("eq.{}", s),
        other => format!("eq.{}", other),
    }
}

pub(crate) fn filter_params(filter: &Filter) -> Vec<(String, String)> {
    filter
        .conditions
        .iter()
        .map(|c| (c.column.clone(), filter_operand(&c.value)))
        .collect()
}

pub(crate) fn select_params(query: &Query) -> Vec<(String, String)> {
    let mut params = vec![(
        "select".to_string(),
        query
            .columns
            .as_ref()
            .map(|columns| columns.join(","))
            .unwrap_or_else(|| "*".to_string()),
    )];

    params.extend(filter_params(&query.filter));

    if !query.order.is_empty() {
        let order = query
            .order
            .iter()
            .map(|o| format!("{}.{}", o.column, if o.ascending { "asc" } else { "desc" }))
            .collect::<Vec<_>>()
            .join(",");
        params.push(("order".to_string(), order));
    }

    if let Some(limit) = query.limit {
        params.push(("limit".to_string(), limit.to_string()));
    }

    params
}

/// Turn a non-2xx response into an error, keeping the backend's message.
async fn check(response: Response) -> AppResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or(body);

    if status == StatusCode::CONFLICT {
        return Err(AppError::Conflict(message));
    }
    Err(AppError::Rejected {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl PersistenceLayer for RestBackend {
    async fn select(&self, table: Table, query: Query) -> AppResult<Vec<Record>> {
        query.validate()?;

        let response = self
            .client
            .get(self.table_url(table))
            .header(header::AUTHORIZATION, self.bearer())
            .query(&select_params(&query))
            .send()
            .await?;

        Ok(check(response).await?.json::<Vec<Record>>().await?)
    }

    async fn insert(&self, table: Table, records: Vec<Record>) -> AppResult<Vec<Record>> {
        let response = self
            .client
            .post(self.table_url(table))
            .header(header::AUTHORIZATION, self.bearer())
            .header("Prefer", "return=representation")
            .json(&records)
            .send()
            .await?;

        Ok(check(response).await?.json::<Vec<Record>>().await?)
    }

    async fn update(&self, table: Table, patch: Record, filter: Filter) -> AppResult<()> {
        filter.require_targeted()?;

        let response = self
            .client
            .patch(self.table_url(table))
            .header(header::AUTHORIZATION, self.bearer())
            .query(&filter_params(&filter))
            .json(&patch)
            .send()
            .await?;

        check(response).await?;
        Ok(())
    }

    async fn delete(&self, table: Table, filter: Filter) -> AppResult<()> {
        filter.require_targeted()?;

        let response = self
            .client
            .delete(self.table_url(table))
            .header(header::AUTHORIZATION, self.bearer())
            .query(&filter_params(&filter))
            .send()
            .await?;

        check(response).await?;
        Ok(())
    }

    async fn upload_file(&self, upload: FileUpload) -> AppResult<String> {
        upload.validate_path()?;

        let response = self
            .client
            .post(self.object_url(&upload.bucket, &upload.path))
            .header(header::AUTHORIZATION, self.bearer())
            .header(header::CONTENT_TYPE, upload.content_type.as_str())
            .header("x-upsert", "false")
            .body(upload.bytes)
            .send()
            .await?;

        check(response).await?;
        Ok(self.public_url(&upload.bucket, &upload.path))
    }

    async fn get_session(&self) -> AppResult<Option<User>> {
        let Some(token) = self.access_token.as_deref() else {
            return Ok(None);
        };

        let response = self
            .client
            .get(format!("{}/auth/v1/user", self.base_url))
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .send()
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            log::warn!("Access token was rejected; treating as signed out");
            return Ok(None);
        }

        let user = check(response).await?.json::<AuthUser>().await?;
        Ok(Some(User {
            id: user.id,
            email: user.email,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::Order;
    use serde_json::json;

    fn pairs(params: &[(String, String)]) -> Vec<(&str, &str)> {
        params
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }

    #[test]
    fn test_filter_operands() {
        assert_eq!(filter_operand(&json!("de")), "eq.de");
        assert_eq!(filter_operand(&json!(7)), "eq.7");
        assert_eq!(filter_operand(&json!(false)), "eq.false");
        assert_eq!(filter_operand(&Value::Null), "is.null");
    }

    #[test]
    fn test_select_params_for_sequence_scan() {
        let query = Query::all().columns(["display_id"]);
        assert_eq!(pairs(&select_params(&query)), vec![("select", "display_id")]);
    }

    #[test]
    fn test_select_params_full() {
        let query = Query::all()
            .filter(Filter::eq("is_read", false))
            .order_by(Order::desc("created_at"))
            .order_by(Order::asc("name"))
            .limit(20);

        assert_eq!(
            pairs(&select_params(&query)),
            vec![
                ("select", "*"),
                ("is_read", "eq.false"),
                ("order", "created_at.desc,name.asc"),
                ("limit", "20"),
            ]
        );
    }

    #[test]
    fn test_urls() {
        let backend = RestBackend::new("https://db.example.com/", "anon", None).unwrap();
        assert_eq!(
            backend.table_url(Table::StoryRings),
            "https://db.example.com/rest/v1/story_rings"
        );
        assert_eq!(
            backend.public_url("product-images", "products/a.png"),
            "https://db.example.com/storage/v1/object/public/product-images/products/a.png"
        );
        assert_eq!(backend.bearer(), "Bearer anon");
    }

    #[test]
    fn test_invalid_api_key_rejected() {
        assert!(RestBackend::new("https://db.example.com", "bad\nkey", None).is_err());
    }

    #[tokio::test]
    async fn test_no_token_means_no_session() {
        let backend = RestBackend::new("https://db.example.com", "anon", None).unwrap();
        assert_eq!(backend.get_session().await.unwrap(), None);
    }
}
