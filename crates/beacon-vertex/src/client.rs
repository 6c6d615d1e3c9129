// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use std::time::Duration;

use anyhow::{bail, Context};
use reqwest::Method;
use serde_json::Value;
use tracing::debug;

use crate::auth::access_token;

/// Interval between long-running-operation polls.
const POLL_INTERVAL: Duration = Duration::from_secs(3);
/// Upper bound on polls before an operation is declared stuck.
const MAX_POLLS: usize = 200;

/// Authenticated HTTP client bound to one project/location pair.
///
/// Shared by the RAG and engine adapters; owns URL construction, bearer
/// auth, status checking, and long-running-operation polling.
pub struct VertexClient {
    http: reqwest::Client,
    token: String,
    project: String,
    location: String,
}

impl VertexClient {
    /// Resolve credentials and build the client.  No request is sent yet.
    pub async fn connect(
        project: impl Into<String>,
        location: impl Into<String>,
    ) -> anyhow::Result<Self> {
        let token = access_token().await?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .user_agent("beacon/1.2")
            .build()
            .context("building HTTP client")?;
        Ok(Self {
            http,
            token,
            project: project.into(),
            location: location.into(),
        })
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    /// `projects/{project}/locations/{location}`
    pub fn parent(&self) -> String {
        format!("projects/{}/locations/{}", self.project, self.location)
    }

    /// Regional API root, e.g. `https://us-central1-aiplatform.googleapis.com/v1beta1`.
    pub fn base_url(&self) -> String {
        format!("https://{}-aiplatform.googleapis.com/v1beta1", self.location)
    }

    /// Media-upload root used by `ragFiles:upload`.
    pub(crate) fn upload_base_url(&self) -> String {
        format!(
            "https://{}-aiplatform.googleapis.com/upload/v1beta1",
            self.location
        )
    }

    pub(crate) fn request(&self, method: Method, url: &str) -> reqwest::RequestBuilder {
        self.http.request(method, url).bearer_auth(&self.token)
    }

    pub(crate) async fn get_json(&self, url: &str) -> anyhow::Result<Value> {
        debug!(%url, "GET");
        let resp = self.request(Method::GET, url).send().await?;
        check(resp).await
    }

    pub(crate) async fn post_json(&self, url: &str, body: &Value) -> anyhow::Result<Value> {
        debug!(%url, "POST");
        let resp = self.request(Method::POST, url).json(body).send().await?;
        check(resp).await
    }

    pub(crate) async fn patch_json(&self, url: &str, body: &Value) -> anyhow::Result<Value> {
        debug!(%url, "PATCH");
        let resp = self.request(Method::PATCH, url).json(body).send().await?;
        check(resp).await
    }

    pub(crate) async fn delete_json(&self, url: &str) -> anyhow::Result<Value> {
        debug!(%url, "DELETE");
        let resp = self.request(Method::DELETE, url).send().await?;
        check(resp).await
    }

    /// Poll a long-running operation until it completes, returning its
    /// `response` payload.
    pub(crate) async fn wait_operation(&self, mut op: Value) -> anyhow::Result<Value> {
        let name = op
            .get("name")
            .and_then(|n| n.as_str())
            .context("operation response is missing 'name'")?
            .to_string();
        let url = format!("{}/{}", self.base_url(), name);

        for _ in 0..MAX_POLLS {
            match operation_outcome(&op) {
                OperationOutcome::Done(response) => return Ok(response),
                OperationOutcome::Failed(message) => bail!("operation {name} failed: {message}"),
                OperationOutcome::Pending => {
                    debug!(operation = %name, "operation pending");
                    tokio::time::sleep(POLL_INTERVAL).await;
                    op = self.get_json(&url).await?;
                }
            }
        }
        bail!("operation {name} did not complete within the polling budget");
    }
}

pub(crate) enum OperationOutcome {
    Pending,
    Done(Value),
    Failed(String),
}

/// Classify a `google.longrunning.Operation` body.
pub(crate) fn operation_outcome(op: &Value) -> OperationOutcome {
    if !op.get("done").and_then(|d| d.as_bool()).unwrap_or(false) {
        return OperationOutcome::Pending;
    }
    if let Some(error) = op.get("error") {
        let message = error
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("unknown error")
            .to_string();
        return OperationOutcome::Failed(message);
    }
    OperationOutcome::Done(op.get("response").cloned().unwrap_or(Value::Null))
}

async fn check(resp: reqwest::Response) -> anyhow::Result<Value> {
    let status = resp.status();
    if !status.is_success() {
        let text = resp.text().await.unwrap_or_default();
        bail!("Vertex AI error {status}: {text}");
    }
    resp.json().await.context("decoding Vertex AI response")
}

// ─── Unit tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn pending_operation_is_classified_pending() {
        let op = json!({ "name": "projects/p/operations/1" });
        assert!(matches!(operation_outcome(&op), OperationOutcome::Pending));
    }

    #[test]
    fn done_operation_yields_response() {
        let op = json!({ "name": "op", "done": true, "response": { "name": "res" } });
        match operation_outcome(&op) {
            OperationOutcome::Done(resp) => assert_eq!(resp["name"], "res"),
            _ => panic!("expected Done"),
        }
    }

    #[test]
    fn failed_operation_carries_error_message() {
        let op = json!({ "name": "op", "done": true, "error": { "message": "quota" } });
        match operation_outcome(&op) {
            OperationOutcome::Failed(msg) => assert_eq!(msg, "quota"),
            _ => panic!("expected Failed"),
        }
    }
}
