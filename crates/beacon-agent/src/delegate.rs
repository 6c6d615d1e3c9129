// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! The search delegate — a fully configured sub-agent exposed to the root
//! agent as one opaque capability.
//!
//! The delegate owns the web-search primitive so that the root agent never
//! sees the raw tool; it invokes the delegate by name and receives only the
//! synthesized answer.

use serde::Serialize;
use serde_json::{json, Value};

use crate::capability::Capability;
use crate::prompts;

/// Name under which the search delegate is offered to the root agent.
pub const SEARCH_DELEGATE_NAME: &str = "GoogleSearch";

/// Identifier of the search primitive the hosted runtime binds inside the
/// delegate.
const SEARCH_PRIMITIVE: &str = "google_search";

/// A named sub-agent with its own instruction text and exactly one
/// underlying primitive.  Stateless — a configuration value consumed by the
/// hosted runtime.
#[derive(Debug, Clone, Serialize)]
pub struct DelegateAgent {
    pub name: String,
    pub model: String,
    pub instruction: String,
    /// The single primitive tool the delegate may use.
    pub tool: String,
}

impl DelegateAgent {
    /// The crisis search specialist, built on the hosted web-search primitive.
    pub fn search(model: impl Into<String>) -> Self {
        Self {
            name: SEARCH_DELEGATE_NAME.to_string(),
            model: model.into(),
            instruction: prompts::SEARCH_DELEGATE_INSTRUCTION.to_string(),
            tool: SEARCH_PRIMITIVE.to_string(),
        }
    }
}

/// Wraps a [`DelegateAgent`] so the root agent can treat it as a capability.
pub struct DelegateCapability {
    agent: DelegateAgent,
    description: String,
}

impl DelegateCapability {
    pub fn new(agent: DelegateAgent, description: impl Into<String>) -> Self {
        Self {
            agent,
            description: description.into(),
        }
    }

    /// The search delegate with its standard tool description.
    pub fn search(model: impl Into<String>) -> Self {
        Self::new(
            DelegateAgent::search(model),
            "Search the live web for crisis information: breaking news, official \
             advisories, local real-time conditions. Use for time-sensitive, \
             hyper-local, or explicitly 'latest' queries.",
        )
    }

    pub fn agent(&self) -> &DelegateAgent {
        &self.agent
    }
}

impl Capability for DelegateCapability {
    fn name(&self) -> &str {
        &self.agent.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn declaration(&self) -> Value {
        json!({
            "kind": "agent",
            "name": self.agent.name,
            "description": self.description,
            "agent": {
                "model": self.agent.model,
                "instruction": self.agent.instruction,
                "tools": [self.agent.tool],
            }
        })
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_delegate_has_configured_name_and_single_primitive() {
        let cap = DelegateCapability::search("gemini-2.0-flash");
        assert_eq!(cap.name(), SEARCH_DELEGATE_NAME);
        let decl = cap.declaration();
        assert_eq!(decl["agent"]["tools"].as_array().unwrap().len(), 1);
        assert_eq!(decl["agent"]["tools"][0], SEARCH_PRIMITIVE);
    }

    #[test]
    fn delegate_instruction_reaches_declaration_unmodified() {
        let cap = DelegateCapability::search("gemini-2.0-flash");
        assert_eq!(
            cap.declaration()["agent"]["instruction"],
            prompts::SEARCH_DELEGATE_INSTRUCTION
        );
    }
}
