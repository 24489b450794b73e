// --- File: crates/docsautomator_node/src/client.rs ---
use docsautomator_common::{create_client, BoxFuture, DocumentService};
use docsautomator_config::{DocsAutomatorConfig, DEFAULT_BASE_URL};
use reqwest::{Client, Method, RequestBuilder};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::DocsAutomatorError;

/// Authenticated client for the DocsAutomator REST API.
///
/// Every request carries `Authorization: Bearer <api key>`. Responses are
/// returned as raw JSON; non-2xx statuses become [`DocsAutomatorError::ApiError`].
#[derive(Clone)]
pub struct DocsAutomatorClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl std::fmt::Debug for DocsAutomatorClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocsAutomatorClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl DocsAutomatorClient {
    /// Client against the hosted API, sharing the static HTTP client.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: docsautomator_common::HTTP_CLIENT.clone(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
        }
    }

    /// Builds a client from the `[docsautomator]` config section.
    pub fn from_config(config: &DocsAutomatorConfig) -> Result<Self, DocsAutomatorError> {
        let api_key = config.api_key().ok_or_else(|| {
            DocsAutomatorError::ConfigError("DocsAutomator API key is not set".to_string())
        })?;
        let http = create_client(config.timeout_secs)?;

        Ok(Self::new(api_key)
            .with_base_url(&config.base_url)
            .with_http_client(http))
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_http_client(mut self, http: Client) -> Self {
        self.http = http;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, self.url(path))
            .bearer_auth(&self.api_key)
    }

    /// Sends the request and returns the body as JSON.
    ///
    /// An empty body maps to `null`; a non-JSON body is returned as a string.
    async fn send(&self, builder: RequestBuilder) -> Result<Value, DocsAutomatorError> {
        let response = builder.send().await?;
        let status = response.status();
        let url = response.url().path().to_string();
        let body_text = response.text().await?;

        debug!(%status, path = %url, "DocsAutomator API response");

        if !status.is_success() {
            warn!(%status, path = %url, body = %body_text, "DocsAutomator API request failed");
            return Err(DocsAutomatorError::ApiError {
                status_code: status.as_u16(),
                message: api_error_message(&body_text),
            });
        }

        if body_text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body_text).unwrap_or(Value::String(body_text)))
    }

    /// `GET /automations`
    pub async fn fetch_automations(&self) -> Result<Value, DocsAutomatorError> {
        self.send(self.request(Method::GET, "automations")).await
    }

    /// `GET /listPlaceholdersV2?automationId=<id>`
    pub async fn fetch_placeholders(&self, automation_id: &str) -> Result<Value, DocsAutomatorError> {
        self.send(
            self.request(Method::GET, "listPlaceholdersV2")
                .query(&[("automationId", automation_id)]),
        )
        .await
    }

    /// `POST /createDocument?docId=<id>` with the payload as JSON body.
    pub async fn post_document(
        &self,
        automation_id: &str,
        payload: &Map<String, Value>,
    ) -> Result<Value, DocsAutomatorError> {
        self.send(
            self.request(Method::POST, "createDocument")
                .query(&[("docId", automation_id)])
                .json(payload),
        )
        .await
    }

    /// Lifecycle call against `path`, with an optional `automationId` query
    /// parameter and an optional JSON body.
    pub async fn call(
        &self,
        method: Method,
        path: &str,
        automation_id: Option<&str>,
        body: Option<&Value>,
    ) -> Result<Value, DocsAutomatorError> {
        let mut builder = self.request(method, path);
        if let Some(id) = automation_id {
            builder = builder.query(&[("automationId", id)]);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }
        self.send(builder).await
    }

    /// Verifies the API key with `GET /automations`.
    pub async fn test_credentials(&self) -> Result<(), DocsAutomatorError> {
        self.fetch_automations().await.map(|_| ())
    }
}

/// Pulls a readable message out of an error body: `message`, then `error`,
/// falling back to the raw text.
fn api_error_message(body_text: &str) -> String {
    let parsed: Option<Value> = serde_json::from_str(body_text).ok();
    parsed
        .as_ref()
        .and_then(|v| {
            ["message", "error"]
                .iter()
                .find_map(|key| v.get(*key).and_then(Value::as_str))
        })
        .map(str::to_string)
        .unwrap_or_else(|| {
            if body_text.trim().is_empty() {
                "empty response body".to_string()
            } else {
                body_text.to_string()
            }
        })
}

impl DocumentService for DocsAutomatorClient {
    type Error = DocsAutomatorError;

    fn list_automations(&self) -> BoxFuture<'_, Value, Self::Error> {
        Box::pin(self.fetch_automations())
    }

    fn list_placeholders(&self, automation_id: &str) -> BoxFuture<'_, Value, Self::Error> {
        let automation_id = automation_id.to_string();
        Box::pin(async move { self.fetch_placeholders(&automation_id).await })
    }

    fn create_document(
        &self,
        automation_id: &str,
        payload: &Map<String, Value>,
    ) -> BoxFuture<'_, Value, Self::Error> {
        let automation_id = automation_id.to_string();
        let payload = payload.clone();
        Box::pin(async move { self.post_document(&automation_id, &payload).await })
    }

    fn get_automation(&self, automation_id: &str) -> BoxFuture<'_, Value, Self::Error> {
        let automation_id = automation_id.to_string();
        Box::pin(async move {
            self.call(Method::GET, "automation", Some(&automation_id), None)
                .await
        })
    }

    fn create_automation(&self, body: &Value) -> BoxFuture<'_, Value, Self::Error> {
        let body = body.clone();
        Box::pin(async move {
            self.call(Method::POST, "createAutomation", None, Some(&body))
                .await
        })
    }

    fn update_automation(
        &self,
        automation_id: &str,
        body: &Value,
    ) -> BoxFuture<'_, Value, Self::Error> {
        let automation_id = automation_id.to_string();
        let body = body.clone();
        Box::pin(async move {
            self.call(
                Method::PUT,
                "updateAutomation",
                Some(&automation_id),
                Some(&body),
            )
            .await
        })
    }

    fn delete_automation(&self, automation_id: &str) -> BoxFuture<'_, Value, Self::Error> {
        let automation_id = automation_id.to_string();
        Box::pin(async move {
            self.call(Method::DELETE, "deleteAutomation", Some(&automation_id), None)
                .await
        })
    }

    fn duplicate_automation(&self, automation_id: &str) -> BoxFuture<'_, Value, Self::Error> {
        let automation_id = automation_id.to_string();
        Box::pin(async move {
            self.call(
                Method::POST,
                "duplicateAutomation",
                Some(&automation_id),
                None,
            )
            .await
        })
    }

    fn duplicate_template(&self, body: &Value) -> BoxFuture<'_, Value, Self::Error> {
        let body = body.clone();
        Box::pin(async move {
            self.call(
                Method::POST,
                "duplicateGoogleDocTemplate",
                None,
                Some(&body),
            )
            .await
        })
    }
}
