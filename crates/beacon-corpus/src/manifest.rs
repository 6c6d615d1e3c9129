// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: Apache-2.0
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// One document destined for the retrieval corpus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Source URL.  Documents without one are skipped with a warning —
    /// local-file ingestion is deliberately not supported.
    #[serde(default)]
    pub url: Option<String>,
    /// Display name in the corpus; also the idempotence key for uploads.
    pub filename: String,
    #[serde(default)]
    pub description: String,
}

/// TOML document manifest:
///
/// ```toml
/// [[documents]]
/// url = "https://example.org/guide.pdf"
/// filename = "guide.pdf"
/// description = "Preparedness guide"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub documents: Vec<Document>,
}

impl Manifest {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing {}", path.display()))
    }
}

/// The built-in document set used when no manifest file is given.
pub fn default_documents() -> Vec<Document> {
    vec![
        Document {
            url: Some(
                "https://www.ready.gov/sites/default/files/2024-03/ready.gov_earthquake_hazard-info-sheet.pdf"
                    .to_string(),
            ),
            filename: "earthquake_info_sheet.pdf".to_string(),
            description: "FEMA Earthquake Information Sheet".to_string(),
        },
        Document {
            url: Some(
                "https://www.who.int/docs/default-source/coronaviruse/coping-with-stress.pdf?sfvrsn=9845bc3a_2"
                    .to_string(),
            ),
            filename: "who_coping_with_stress.pdf".to_string(),
            description: "WHO Guide on Coping with Stress During Outbreaks".to_string(),
        },
    ]
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
