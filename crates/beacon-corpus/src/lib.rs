// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Corpus preparation: resolve-or-create the retrieval corpus, download the
//! manifest documents, upload them idempotently, and persist the corpus
//! resource id into the environment file.
mod manifest;
mod prepare;

pub use manifest::{default_documents, Document, Manifest};
pub use prepare::{prepare, resolve_or_create_corpus, PrepareOutcome};
