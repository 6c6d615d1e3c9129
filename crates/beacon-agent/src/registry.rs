// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Centralised capability-registry builder.
//!
//! `build_capabilities` is the single canonical place where capabilities are
//! wired up — a pure function of process-start [`Settings`].  Adding a new
//! capability to beacon means adding it here once.

use std::sync::Arc;

use tracing::{info, warn};

use beacon_config::Settings;

use crate::capability::{Capability, RetrievalCapability};
use crate::delegate::DelegateCapability;

/// Build the ordered capability list for one agent instance.
///
/// When `RAG_CORPUS` is configured the curated-retrieval capability comes
/// first, followed by the search delegate.  When it is absent the retrieval
/// capability is omitted and the agent runs search-only — a recognised
/// degraded mode, not an error.
pub fn build_capabilities(settings: &Settings) -> Vec<Arc<dyn Capability>> {
    let retrieval: Option<Arc<dyn Capability>> = match &settings.rag_corpus {
        Some(corpus) => {
            info!(corpus = %corpus, "initialising retrieval capability");
            Some(Arc::new(RetrievalCapability::new(corpus.clone())))
        }
        None => {
            warn!(
                "RAG_CORPUS not set — the curated knowledge base will be unavailable. \
                 The agent will rely solely on the search delegate and its internal knowledge."
            );
            None
        }
    };

    let delegate: Arc<dyn Capability> =
        Arc::new(DelegateCapability::search(settings.model_name.clone()));

    let capabilities: Vec<Arc<dyn Capability>> =
        retrieval.into_iter().chain(std::iter::once(delegate)).collect();

    // Operator visibility only — no behavioural effect.
    let names: Vec<&str> = capabilities.iter().map(|c| c.name()).collect();
    info!(?names, "capabilities resolved");

    capabilities
}

// ─── Unit tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::RETRIEVAL_CAPABILITY_NAME;
    use crate::delegate::SEARCH_DELEGATE_NAME;

    fn settings(rag_corpus: Option<&str>) -> Settings {
        Settings::from_lookup(|key| match key {
            "RAG_CORPUS" => rag_corpus.map(str::to_string),
            _ => None,
        })
    }

    #[test]
    fn corpus_unset_yields_search_delegate_only() {
        let caps = build_capabilities(&settings(None));
        assert_eq!(caps.len(), 1);
        assert_eq!(caps[0].name(), SEARCH_DELEGATE_NAME);
    }

    #[test]
    fn corpus_set_yields_retrieval_first_then_delegate() {
        let caps = build_capabilities(&settings(Some("projects/p/locations/l/ragCorpora/7")));
        assert_eq!(caps.len(), 2);
        assert_eq!(caps[0].name(), RETRIEVAL_CAPABILITY_NAME);
        assert_eq!(caps[1].name(), SEARCH_DELEGATE_NAME);
    }

    #[test]
    fn capability_names_are_unique() {
        for corpus in [None, Some("projects/p/locations/l/ragCorpora/7")] {
            let caps = build_capabilities(&settings(corpus));
            let mut names: Vec<&str> = caps.iter().map(|c| c.name()).collect();
            names.sort_unstable();
            names.dedup();
            assert_eq!(names.len(), caps.len());
        }
    }
}
