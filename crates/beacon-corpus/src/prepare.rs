// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use tracing::{info, warn};

use beacon_config::{EnvFile, Settings};
use beacon_vertex::{RagClient, RagCorpus, RagFile};

use crate::manifest::Document;

/// Result summary of one preparation run.
#[derive(Debug)]
pub struct PrepareOutcome {
    pub corpus: RagCorpus,
    /// Documents uploaded this run (idempotent skips not counted).
    pub uploaded: usize,
    /// Documents skipped: missing URL, failed download, or already present.
    pub skipped: usize,
}

/// Locate an existing corpus by display name, or create one.
pub async fn resolve_or_create_corpus(
    rag: &RagClient,
    display_name: &str,
    description: &str,
) -> anyhow::Result<RagCorpus> {
    let existing = rag.list_corpora().await?;
    if let Some(corpus) = find_by_display_name(&existing, display_name) {
        info!(corpus = %corpus.name, "found existing corpus '{display_name}'");
        return Ok(corpus.clone());
    }
    let corpus = rag.create_corpus(display_name, description).await?;
    info!(corpus = %corpus.name, "created new corpus '{display_name}'");
    Ok(corpus)
}

/// Populate the corpus from `documents` and persist its resource id.
///
/// Per-document failures (missing URL, failed download) are logged and
/// skipped; nothing is retried.  The corpus id is written to the env file
/// before any download so a partial run still leaves the agent usable.
pub async fn prepare(
    rag: &RagClient,
    settings: &Settings,
    env_file: &mut EnvFile,
    documents: &[Document],
) -> anyhow::Result<PrepareOutcome> {
    let corpus = resolve_or_create_corpus(
        rag,
        &settings.corpus_display_name,
        &settings.corpus_description,
    )
    .await?;

    if env_file.set("RAG_CORPUS", &corpus.name) {
        env_file.save()?;
        info!(path = %env_file.path().display(), "updated RAG_CORPUS to {}", corpus.name);
    } else {
        info!("RAG_CORPUS is already set correctly");
    }

    let existing: HashMap<String, RagFile> = rag
        .list_files(&corpus.name)
        .await?
        .into_iter()
        .map(|f| (f.display_name.clone(), f))
        .collect();

    let tmp = tempfile::tempdir().context("creating temporary download directory")?;
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(60))
        .user_agent("beacon/1.2")
        .build()
        .context("building download client")?;

    let mut uploaded = 0;
    let mut skipped = 0;
    for doc in documents {
        if existing.contains_key(&doc.filename) {
            info!("file '{}' already exists in corpus, skipping upload", doc.filename);
            skipped += 1;
            continue;
        }
        let Some(url) = &doc.url else {
            warn!("no source URL for '{}', skipping", doc.filename);
            skipped += 1;
            continue;
        };
        let path = tmp.path().join(&doc.filename);
        if let Err(e) = download(&http, url, &path).await {
            warn!("download of '{}' failed, skipping: {e:#}", doc.filename);
            skipped += 1;
            continue;
        }
        match rag
            .upload_file(&corpus.name, &path, &doc.filename, &doc.description)
            .await
        {
            Ok(file) => {
                info!(file = %file.name, "uploaded '{}'", doc.filename);
                uploaded += 1;
            }
            Err(e) => {
                warn!("upload of '{}' failed, skipping: {e:#}", doc.filename);
                skipped += 1;
            }
        }
    }

    let files = rag.list_files(&corpus.name).await?;
    info!("corpus {} now holds {} file(s)", corpus.name, files.len());
    for file in &files {
        info!("- {} ({})", file.display_name, file.name);
    }

    Ok(PrepareOutcome {
        corpus,
        uploaded,
        skipped,
    })
}

fn find_by_display_name<'a>(corpora: &'a [RagCorpus], display_name: &str) -> Option<&'a RagCorpus> {
    corpora.iter().find(|c| c.display_name == display_name)
}

async fn download(http: &reqwest::Client, url: &str, path: &Path) -> anyhow::Result<()> {
    info!(%url, "downloading");
    let resp = http.get(url).send().await?.error_for_status()?;
    let bytes = resp.bytes().await?;
    tokio::fs::write(path, &bytes)
        .await
        .with_context(|| format!("writing {}", path.display()))?;
    info!(size = bytes.len(), "downloaded to {}", path.display());
    Ok(())
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
