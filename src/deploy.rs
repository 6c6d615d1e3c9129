// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: Apache-2.0
//! Deployment command: maps the action flags onto control-plane calls and
//! keeps the environment file in sync with the deployed identity.

use anyhow::Context;
use tracing::info;

use beacon_agent::root_agent;
use beacon_config::{EnvFile, Settings};
use beacon_vertex::{engine_payload, EngineClient, VertexClient};

use crate::cli::{DeployAction, DeployArgs};

/// The fully validated operation to perform.  Built before any client is
/// constructed so that validation failures never reach the network.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Plan {
    List,
    Create,
    Update(String),
    Delete(String),
}

/// Resolve the action against the engine id (flag wins over environment).
/// Update and delete require a resolvable id.
fn plan(
    action: DeployAction,
    flag_id: Option<String>,
    env_id: Option<String>,
) -> anyhow::Result<Plan> {
    let id = flag_id.or(env_id);
    Ok(match action {
        DeployAction::List => Plan::List,
        DeployAction::Create => Plan::Create,
        DeployAction::Update => Plan::Update(id.context(
            "--agent_engine_id flag or AGENT_ENGINE_ID in the environment is required for update",
        )?),
        DeployAction::Delete => Plan::Delete(id.context(
            "--agent_engine_id flag or AGENT_ENGINE_ID in the environment is required for delete",
        )?),
    })
}

/// Flag value wins; environment variable is the fallback; neither is fatal.
fn resolve(
    flag: Option<String>,
    env: Option<&str>,
    flag_name: &str,
    var: &str,
) -> anyhow::Result<String> {
    flag.or_else(|| env.map(str::to_string))
        .with_context(|| format!("{var} must be set via {flag_name} or environment variable"))
}

pub async fn run(
    args: DeployArgs,
    settings: &Settings,
    env_file: &mut EnvFile,
) -> anyhow::Result<()> {
    let Some(action) = args.action()? else {
        println!("No action specified. Use --create, --update, --delete, or --list.");
        return Ok(());
    };

    let project = resolve(
        args.project_id.clone(),
        settings.project_id.as_deref(),
        "--project_id",
        "GOOGLE_CLOUD_PROJECT",
    )?;
    let location = resolve(
        args.location.clone(),
        settings.location.as_deref(),
        "--location",
        "GOOGLE_CLOUD_LOCATION",
    )?;
    let bucket = resolve(
        args.staging_bucket_name.clone(),
        settings.staging_bucket.as_deref(),
        "--staging_bucket_name",
        "STAGING_BUCKET_NAME",
    )?;
    let staging_bucket = format!("gs://{bucket}");

    let plan = plan(
        action,
        args.agent_engine_id.clone(),
        settings.agent_engine_id.clone(),
    )?;

    info!(%project, %location, %staging_bucket, "deployment coordinates resolved");
    let client = EngineClient::new(VertexClient::connect(project, location).await?);

    match plan {
        Plan::List => {
            let engines = client.list().await?;
            if engines.is_empty() {
                println!("No agent engines found.");
                return Ok(());
            }
            for engine in &engines {
                println!("-----------------------------------------");
                println!("Resource Name: {}", engine.name);
                println!("Display Name: \"{}\"", engine.display_name);
                if let Some(t) = engine.create_time {
                    println!("Create Time: {t}");
                }
                if let Some(t) = engine.update_time {
                    println!("Update Time: {t}");
                }
                if let Some(d) = &engine.description {
                    println!("Description: {d}");
                }
            }
            println!("-----------------------------------------");
        }
        Plan::Create => {
            let agent = root_agent(settings);
            info!(capabilities = ?agent.capability_names(), "deploying new agent engine");
            let payload = engine_payload(&agent, &args.display_name, &args.description, &staging_bucket);
            let engine = client.create(&payload).await?;
            info!("deployed agent engine successfully");
            println!("Resource name: {}", engine.name);
            persist_identity(env_file, &engine.name, &args.display_name)?;
        }
        Plan::Update(name) => {
            let agent = root_agent(settings);
            info!(engine = %name, "updating agent engine");
            let payload = engine_payload(&agent, &args.display_name, &args.description, &staging_bucket);
            let engine = client.update(&name, &payload).await?;
            println!("Resource name: {}", engine.name);
            // Persist unless the env points at a different deployment.
            let env_id = settings.agent_engine_id.as_deref();
            if env_id.is_none() || env_id == Some(name.as_str()) {
                persist_identity(env_file, &engine.name, &args.display_name)?;
            }
        }
        Plan::Delete(name) => {
            client.delete(&name, true).await?;
            info!(engine = %name, "deleted agent engine");
            if settings.agent_engine_id.as_deref() == Some(name.as_str()) {
                let mut changed = env_file.unset("AGENT_ENGINE_ID");
                changed |= env_file.unset("AGENT_DISPLAY_NAME");
                if changed {
                    env_file.save()?;
                    info!(path = %env_file.path().display(), "cleared deployed identity");
                }
            }
        }
    }
    Ok(())
}

fn persist_identity(env_file: &mut EnvFile, name: &str, display_name: &str) -> anyhow::Result<()> {
    let mut changed = env_file.set("AGENT_ENGINE_ID", name);
    changed |= env_file.set("AGENT_DISPLAY_NAME", display_name);
    if changed {
        env_file.save()?;
        info!(path = %env_file.path().display(), "persisted deployed identity");
    }
    Ok(())
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
