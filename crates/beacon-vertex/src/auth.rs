// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: Apache-2.0
use anyhow::{bail, Context};
use tracing::debug;

/// Resolve a bearer token for the Google Cloud APIs.
///
/// `GOOGLE_ACCESS_TOKEN` wins when set; otherwise the Cloud SDK is asked for
/// the active account's token.
pub async fn access_token() -> anyhow::Result<String> {
    if let Ok(token) = std::env::var("GOOGLE_ACCESS_TOKEN") {
        let token = token.trim().to_string();
        if !token.is_empty() {
            return Ok(token);
        }
    }

    debug!("GOOGLE_ACCESS_TOKEN not set, asking gcloud for a token");
    let output = tokio::process::Command::new("gcloud")
        .args(["auth", "print-access-token"])
        .output()
        .await
        .context("running `gcloud auth print-access-token` (is the Cloud SDK installed?)")?;

    if !output.status.success() {
        bail!(
            "gcloud auth print-access-token failed: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    let token = String::from_utf8(output.stdout)
        .context("gcloud returned a non-UTF-8 token")?
        .trim()
        .to_string();
    if token.is_empty() {
        bail!("gcloud returned an empty access token — run `gcloud auth login` first");
    }
    Ok(token)
}
