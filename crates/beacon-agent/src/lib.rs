// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Agent assembly: capability descriptors, the search delegate, and the
//! root configuration handed to the hosted runtime.
//!
//! Nothing in this crate executes at request time.  Everything here is
//! constructed once at process start and is immutable afterwards; the hosted
//! runtime owns all subsequent control flow.
mod capability;
mod delegate;
pub mod prompts;
mod registry;
mod root;

pub use capability::{Capability, RetrievalCapability, RETRIEVAL_CAPABILITY_NAME};
pub use delegate::{DelegateAgent, DelegateCapability, SEARCH_DELEGATE_NAME};
pub use registry::build_capabilities;
pub use root::{root_agent, AgentConfig, ROOT_AGENT_NAME};
