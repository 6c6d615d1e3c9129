// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! RAG corpus control-plane adapter.
//!
//! # Endpoint pattern
//! `{base}/projects/{p}/locations/{l}/ragCorpora` for corpora,
//! `{base}/{corpus}/ragFiles` for files, and the media-upload root for
//! `ragFiles:upload` (multipart).

use std::path::Path;

use anyhow::Context;
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use crate::client::VertexClient;

/// Embedding model attached to newly created corpora.
const EMBEDDING_MODEL: &str = "publishers/google/models/text-embedding-004";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RagCorpus {
    /// Full resource name, `projects/.../ragCorpora/...`.
    pub name: String,
    pub display_name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RagFile {
    pub name: String,
    pub display_name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Client for the hosted retrieval-corpus service.
pub struct RagClient {
    client: VertexClient,
}

impl RagClient {
    pub fn new(client: VertexClient) -> Self {
        Self { client }
    }

    /// All corpora in the project/location, across pages.
    pub async fn list_corpora(&self) -> anyhow::Result<Vec<RagCorpus>> {
        let url = format!("{}/{}/ragCorpora", self.client.base_url(), self.client.parent());
        self.list_paged(&url, "ragCorpora").await
    }

    /// Create a corpus with the standard embedding model config.  Corpus
    /// creation is a long-running operation; this waits for completion.
    pub async fn create_corpus(
        &self,
        display_name: &str,
        description: &str,
    ) -> anyhow::Result<RagCorpus> {
        let url = format!("{}/{}/ragCorpora", self.client.base_url(), self.client.parent());
        let body = json!({
            "displayName": display_name,
            "description": description,
            "ragEmbeddingModelConfig": {
                "vertexPredictionEndpoint": { "publisherModel": EMBEDDING_MODEL }
            }
        });
        let op = self.client.post_json(&url, &body).await?;
        let response = self.client.wait_operation(op).await?;
        serde_json::from_value(response).context("decoding created corpus")
    }

    /// Files currently in `corpus_name`, across pages.
    pub async fn list_files(&self, corpus_name: &str) -> anyhow::Result<Vec<RagFile>> {
        let url = format!("{}/{}/ragFiles", self.client.base_url(), corpus_name);
        self.list_paged(&url, "ragFiles").await
    }

    /// Upload one local file into the corpus under `display_name`.
    pub async fn upload_file(
        &self,
        corpus_name: &str,
        path: &Path,
        display_name: &str,
        description: &str,
    ) -> anyhow::Result<RagFile> {
        let url = format!(
            "{}/{}/ragFiles:upload",
            self.client.upload_base_url(),
            corpus_name
        );
        let metadata = json!({
            "ragFile": { "displayName": display_name, "description": description }
        });
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("reading {}", path.display()))?;

        debug!(%display_name, size = bytes.len(), "uploading corpus file");
        let form = Form::new()
            .part(
                "metadata",
                Part::text(metadata.to_string())
                    .mime_str("application/json")
                    .context("building metadata part")?,
            )
            .part(
                "file",
                Part::bytes(bytes)
                    .file_name(display_name.to_string())
                    .mime_str("application/octet-stream")
                    .context("building file part")?,
            );

        let resp = self
            .client
            .request(Method::POST, &url)
            .multipart(form)
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            anyhow::bail!("upload of '{display_name}' failed with {status}: {text}");
        }
        let body: Value = resp.json().await.context("decoding upload response")?;
        serde_json::from_value(body["ragFile"].clone())
            .context("decoding uploaded file handle")
    }

    async fn list_paged<T: for<'de> Deserialize<'de>>(
        &self,
        url: &str,
        field: &str,
    ) -> anyhow::Result<Vec<T>> {
        let mut items = Vec::new();
        let mut page_token: Option<String> = None;
        loop {
            let page_url = match &page_token {
                Some(token) => format!("{url}?pageToken={token}"),
                None => url.to_string(),
            };
            let body = self.client.get_json(&page_url).await?;
            if let Some(arr) = body.get(field).and_then(|v| v.as_array()) {
                for item in arr {
                    items.push(
                        serde_json::from_value(item.clone())
                            .with_context(|| format!("decoding {field} entry"))?,
                    );
                }
            }
            page_token = body
                .get("nextPageToken")
                .and_then(|t| t.as_str())
                .filter(|t| !t.is_empty())
                .map(str::to_string);
            if page_token.is_none() {
                return Ok(items);
            }
        }
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corpus_decodes_from_camel_case_wire_form() {
        let corpus: RagCorpus = serde_json::from_value(json!({
            "name": "projects/p/locations/l/ragCorpora/9",
            "displayName": "Crisis_Response_Corpus",
            "description": "Corpus for Crisis Response Information Agent"
        }))
        .unwrap();
        assert_eq!(corpus.display_name, "Crisis_Response_Corpus");
    }

    #[test]
    fn file_decodes_without_description() {
        let file: RagFile = serde_json::from_value(json!({
            "name": "projects/p/locations/l/ragCorpora/9/ragFiles/1",
            "displayName": "earthquake_info_sheet.pdf"
        }))
        .unwrap();
        assert!(file.description.is_none());
    }
}
