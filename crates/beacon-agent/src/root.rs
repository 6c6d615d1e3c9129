// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Root agent assembler.

use std::sync::Arc;

use serde_json::{json, Value};
use tracing::info;

use beacon_config::Settings;

use crate::capability::Capability;
use crate::prompts;
use crate::registry::build_capabilities;

/// Name registered with the hosted runtime for the root agent.
pub const ROOT_AGENT_NAME: &str = "crisis_response_agent";

/// The full behaviour contract for one agent instance: model, instruction
/// policy, and ordered capability list.  Constructed once; read-only.
pub struct AgentConfig {
    pub name: String,
    pub model: String,
    pub description: String,
    pub instruction: String,
    pub capabilities: Vec<Arc<dyn Capability>>,
}

impl AgentConfig {
    pub fn capability_names(&self) -> Vec<&str> {
        self.capabilities.iter().map(|c| c.name()).collect()
    }

    /// Wire-format configuration: exactly what the control-plane adapter
    /// submits to the hosted runtime.
    pub fn declaration(&self) -> Value {
        json!({
            "name": self.name,
            "model": self.model,
            "description": self.description,
            "instruction": self.instruction,
            "tools": self.capabilities.iter().map(|c| c.declaration()).collect::<Vec<_>>(),
        })
    }
}

/// Combine the fixed instruction policy with the capability list into one
/// [`AgentConfig`].  The instruction text and capability list reach the
/// hosted runtime unmodified.
pub fn root_agent(settings: &Settings) -> AgentConfig {
    info!(model = %settings.model_name, "assembling crisis response agent");
    let capabilities = build_capabilities(settings);
    AgentConfig {
        name: ROOT_AGENT_NAME.to_string(),
        model: settings.model_name.clone(),
        description: "Provides information and assistance during crisis situations.".to_string(),
        instruction: prompts::ROOT_INSTRUCTION.to_string(),
        capabilities,
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delegate::SEARCH_DELEGATE_NAME;

    fn settings(rag_corpus: Option<&str>) -> Settings {
        Settings::from_lookup(|key| match key {
            "RAG_CORPUS" => rag_corpus.map(str::to_string),
            "MODEL_NAME" => Some("gemini-2.0-flash".to_string()),
            _ => None,
        })
    }

    #[test]
    fn search_only_configuration_has_single_delegate() {
        let agent = root_agent(&settings(None));
        assert_eq!(agent.capabilities.len(), 1);
        assert_eq!(agent.capabilities[0].name(), SEARCH_DELEGATE_NAME);
    }

    #[test]
    fn instruction_policy_is_passed_through_unmodified() {
        let agent = root_agent(&settings(None));
        assert_eq!(agent.instruction, prompts::ROOT_INSTRUCTION);
        assert_eq!(agent.declaration()["instruction"], prompts::ROOT_INSTRUCTION);
    }

    #[test]
    fn declaration_lists_all_capabilities_in_order() {
        let agent = root_agent(&settings(Some("projects/p/locations/l/ragCorpora/7")));
        let decl = agent.declaration();
        let tools = decl["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 2);
        assert_eq!(tools[0]["name"], "retrieve_crisis_information");
        assert_eq!(tools[1]["name"], SEARCH_DELEGATE_NAME);
        assert_eq!(decl["name"], ROOT_AGENT_NAME);
    }
}
