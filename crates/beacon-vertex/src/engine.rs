// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Agent (reasoning) engine control-plane adapter.

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use beacon_agent::AgentConfig;

use crate::client::VertexClient;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReasoningEngine {
    /// Full resource name, `projects/.../reasoningEngines/...`.
    pub name: String,
    pub display_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub create_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub update_time: Option<DateTime<Utc>>,
}

/// Build the control-plane payload for create/update from an assembled
/// [`AgentConfig`].  The agent declaration is embedded unmodified.
pub fn engine_payload(
    agent: &AgentConfig,
    display_name: &str,
    description: &str,
    staging_bucket: &str,
) -> Value {
    json!({
        "displayName": display_name,
        "description": description,
        "spec": {
            "agent": agent.declaration(),
            "deploymentSpec": { "stagingBucket": staging_bucket }
        }
    })
}

/// Client for the hosted agent-deployment control plane.
pub struct EngineClient {
    client: VertexClient,
}

impl EngineClient {
    pub fn new(client: VertexClient) -> Self {
        Self { client }
    }

    /// All engines deployed in the project/location.
    pub async fn list(&self) -> anyhow::Result<Vec<ReasoningEngine>> {
        let mut engines = Vec::new();
        let mut page_token: Option<String> = None;
        loop {
            let mut url = format!(
                "{}/{}/reasoningEngines",
                self.client.base_url(),
                self.client.parent()
            );
            if let Some(token) = &page_token {
                url = format!("{url}?pageToken={token}");
            }
            let body = self.client.get_json(&url).await?;
            if let Some(arr) = body.get("reasoningEngines").and_then(|v| v.as_array()) {
                for item in arr {
                    engines.push(
                        serde_json::from_value(item.clone()).context("decoding engine entry")?,
                    );
                }
            }
            page_token = body
                .get("nextPageToken")
                .and_then(|t| t.as_str())
                .filter(|t| !t.is_empty())
                .map(str::to_string);
            if page_token.is_none() {
                return Ok(engines);
            }
        }
    }

    /// Deploy a new engine.  Waits for the long-running operation.
    pub async fn create(&self, payload: &Value) -> anyhow::Result<ReasoningEngine> {
        let url = format!(
            "{}/{}/reasoningEngines",
            self.client.base_url(),
            self.client.parent()
        );
        debug!("creating reasoning engine");
        let op = self.client.post_json(&url, payload).await?;
        let response = self.client.wait_operation(op).await?;
        serde_json::from_value(response).context("decoding created engine")
    }

    /// Update an existing engine in place.  Waits for completion.
    pub async fn update(&self, name: &str, payload: &Value) -> anyhow::Result<ReasoningEngine> {
        let url = format!(
            "{}/{}?updateMask=displayName,description,spec",
            self.client.base_url(),
            name
        );
        debug!(engine = %name, "updating reasoning engine");
        let op = self.client.patch_json(&url, payload).await?;
        let response = self.client.wait_operation(op).await?;
        serde_json::from_value(response).context("decoding updated engine")
    }

    /// Delete an engine.  `force` also removes child resources.
    pub async fn delete(&self, name: &str, force: bool) -> anyhow::Result<()> {
        let url = format!("{}/{}?force={}", self.client.base_url(), name, force);
        debug!(engine = %name, "deleting reasoning engine");
        let op = self.client.delete_json(&url).await?;
        self.client.wait_operation(op).await?;
        Ok(())
    }

    /// Send one query to a deployed engine and return its text output.
    pub async fn query(&self, name: &str, message: &str) -> anyhow::Result<String> {
        let url = format!("{}/{}:query", self.client.base_url(), name);
        let body = json!({ "input": { "message": message } });
        let response = self.client.post_json(&url, &body).await?;
        Ok(extract_output_text(&response))
    }
}

/// Pull the text answer out of a `:query` response, falling back to the raw
/// JSON when the shape is unexpected.
fn extract_output_text(response: &Value) -> String {
    if let Some(text) = response.get("output").and_then(|o| o.as_str()) {
        return text.to_string();
    }
    if let Some(parts) = response
        .pointer("/output/content/parts")
        .and_then(|p| p.as_array())
    {
        let text: String = parts
            .iter()
            .filter_map(|p| p.get("text").and_then(|t| t.as_str()))
            .collect();
        if !text.is_empty() {
            return text;
        }
    }
    response.to_string()
}

// ─── Unit tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use beacon_agent::root_agent;
    use beacon_config::Settings;

    fn agent(rag_corpus: Option<&str>) -> AgentConfig {
        let settings = Settings::from_lookup(|key| match key {
            "RAG_CORPUS" => rag_corpus.map(str::to_string),
            _ => None,
        });
        root_agent(&settings)
    }

    #[test]
    fn payload_embeds_agent_declaration_and_staging_bucket() {
        let payload = engine_payload(
            &agent(Some("projects/p/locations/l/ragCorpora/3")),
            "Crisis Response Agent",
            "Agent providing crisis information using curated retrieval and web search.",
            "gs://my-staging",
        );
        assert_eq!(payload["displayName"], "Crisis Response Agent");
        assert_eq!(payload["spec"]["deploymentSpec"]["stagingBucket"], "gs://my-staging");
        assert_eq!(payload["spec"]["agent"]["name"], "crisis_response_agent");
        assert_eq!(payload["spec"]["agent"]["tools"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn engine_decodes_timestamps() {
        let engine: ReasoningEngine = serde_json::from_value(json!({
            "name": "projects/p/locations/l/reasoningEngines/1",
            "displayName": "Crisis Response Agent",
            "createTime": "2025-05-01T12:00:00Z",
            "updateTime": "2025-05-02T08:30:00Z"
        }))
        .unwrap();
        assert!(engine.create_time.is_some());
        assert!(engine.description.is_none());
    }

    #[test]
    fn query_output_extracted_from_string_and_parts() {
        assert_eq!(
            extract_output_text(&json!({ "output": "stay calm" })),
            "stay calm"
        );
        assert_eq!(
            extract_output_text(&json!({
                "output": { "content": { "parts": [ { "text": "drop, " }, { "text": "cover" } ] } }
            })),
            "drop, cover"
        );
    }
}
