// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: Apache-2.0
//! Process-start settings.
//!
//! All environment reads happen exactly once, here.  The resulting
//! [`Settings`] value is passed by reference into the assembler, corpus
//! preparation, and deployment paths — no ad-hoc `std::env::var` calls in
//! deep call paths.

use serde::Serialize;

use crate::EnvFile;

/// Model identifier used when `MODEL_NAME` is not set.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
const DEFAULT_CORPUS_DISPLAY_NAME: &str = "Crisis_Response_Corpus";
const DEFAULT_CORPUS_DESCRIPTION: &str = "Corpus for Crisis Response Information Agent";

/// Immutable snapshot of the recognised environment configuration.
#[derive(Debug, Clone, Serialize)]
pub struct Settings {
    /// Reasoning-engine model identifier (`MODEL_NAME`).
    pub model_name: String,
    /// Resource id of the curated retrieval corpus (`RAG_CORPUS`).
    /// Absent is not an error — the agent degrades to search-only.
    pub rag_corpus: Option<String>,
    /// Target GCP project (`GOOGLE_CLOUD_PROJECT`).
    pub project_id: Option<String>,
    /// Target GCP region (`GOOGLE_CLOUD_LOCATION`).
    pub location: Option<String>,
    /// Staging bucket name, without the `gs://` prefix (`STAGING_BUCKET_NAME`).
    pub staging_bucket: Option<String>,
    /// Display name used for idempotent corpus resolution.
    pub corpus_display_name: String,
    pub corpus_description: String,
    /// Resource id of the deployed agent engine, persisted after create/update.
    pub agent_engine_id: Option<String>,
    pub agent_display_name: Option<String>,
}

impl Settings {
    /// Build settings from the process environment layered over `env_file`.
    /// A variable exported in the process wins over the file.
    pub fn load(env_file: &EnvFile) -> Self {
        Self::from_lookup(|key| {
            std::env::var(key)
                .ok()
                .filter(|v| !v.is_empty())
                .or_else(|| env_file.get(key).map(str::to_string))
        })
    }

    /// Build settings from an arbitrary lookup function.  Used by `load` and
    /// by tests that must not touch the real process environment.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            model_name: get("MODEL_NAME").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            rag_corpus: get("RAG_CORPUS"),
            project_id: get("GOOGLE_CLOUD_PROJECT"),
            location: get("GOOGLE_CLOUD_LOCATION"),
            staging_bucket: get("STAGING_BUCKET_NAME"),
            corpus_display_name: get("RAG_CORPUS_DISPLAY_NAME")
                .unwrap_or_else(|| DEFAULT_CORPUS_DISPLAY_NAME.to_string()),
            corpus_description: get("RAG_CORPUS_DESCRIPTION")
                .unwrap_or_else(|| DEFAULT_CORPUS_DESCRIPTION.to_string()),
            agent_engine_id: get("AGENT_ENGINE_ID"),
            agent_display_name: get("AGENT_DISPLAY_NAME"),
        }
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
