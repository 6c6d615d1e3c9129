// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use serde_json::{json, Value};

/// Name of the curated-retrieval capability offered to the root agent.
pub const RETRIEVAL_CAPABILITY_NAME: &str = "retrieve_crisis_information";

/// A named, describable action the hosted reasoning engine may invoke.
///
/// Capabilities are pure configuration values: they carry a name, a free-text
/// description steering the runtime's tool selection, and a wire-format
/// declaration.  Invocation itself happens entirely inside the hosted
/// runtime.
pub trait Capability: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    /// Declaration in the form the control-plane adapter submits to the
    /// hosted runtime.
    fn declaration(&self) -> Value;
}

/// Curated-retrieval capability bound to an externally hosted RAG corpus.
pub struct RetrievalCapability {
    corpus: String,
}

impl RetrievalCapability {
    pub fn new(corpus: impl Into<String>) -> Self {
        Self {
            corpus: corpus.into(),
        }
    }

    pub fn corpus(&self) -> &str {
        &self.corpus
    }
}

impl Capability for RetrievalCapability {
    fn name(&self) -> &str {
        RETRIEVAL_CAPABILITY_NAME
    }

    fn description(&self) -> &str {
        "Use this tool to retrieve information from the curated crisis knowledge base \
         (official documents, guidelines, etc.). Use for general procedures, safety tips, \
         and established information."
    }

    fn declaration(&self) -> Value {
        json!({
            "kind": "retrieval",
            "name": self.name(),
            "description": self.description(),
            "ragResources": [
                { "ragCorpus": self.corpus }
            ]
        })
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retrieval_declaration_carries_corpus_binding() {
        let cap = RetrievalCapability::new("projects/p/locations/l/ragCorpora/42");
        let decl = cap.declaration();
        assert_eq!(decl["name"], RETRIEVAL_CAPABILITY_NAME);
        assert_eq!(
            decl["ragResources"][0]["ragCorpus"],
            "projects/p/locations/l/ragCorpora/42"
        );
    }
}
