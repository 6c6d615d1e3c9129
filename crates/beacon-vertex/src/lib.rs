// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Thin adapters over the Vertex AI v1beta1 REST surface.
//!
//! Retrieval ranking, embedding, and the agent runtime itself are hosted
//! services — these clients only create, list, and delete the resources that
//! configure them.
mod auth;
mod client;
mod engine;
mod rag;

pub use auth::access_token;
pub use client::VertexClient;
pub use engine::{engine_payload, EngineClient, ReasoningEngine};
pub use rag::{RagClient, RagCorpus, RagFile};
