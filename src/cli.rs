// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use std::path::PathBuf;

use anyhow::bail;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "beacon",
    about = "Assemble, deploy, and manage the crisis response information agent",
    version,
    long_about = None,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Environment file read at startup and updated after corpus creation
    /// and deployment create/update/delete
    #[arg(long, default_value = ".env", value_name = "PATH")]
    pub env_file: PathBuf,

    /// Increase verbosity (-v = debug, -vv = trace)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage the deployed agent engine (create / update / delete / list)
    Deploy(DeployArgs),
    /// Populate the retrieval corpus and persist its resource id
    PrepareCorpus {
        /// TOML document manifest; defaults to the built-in document set
        #[arg(long, value_name = "PATH")]
        manifest: Option<PathBuf>,
    },
    /// Print the assembled agent configuration and exit
    ShowConfig,
    /// Send a single query to the deployed agent engine
    Verify {
        /// Message to send
        #[arg(long, default_value = "What should I do during an earthquake?")]
        message: String,
    },
}

#[derive(Args, Debug, Default)]
pub struct DeployArgs {
    /// List all deployed agent engines
    #[arg(long)]
    pub list: bool,
    /// Create a new agent engine
    #[arg(long)]
    pub create: bool,
    /// Delete an existing agent engine
    #[arg(long)]
    pub delete: bool,
    /// Update an existing agent engine
    #[arg(long)]
    pub update: bool,

    /// GCP project ID (falls back to GOOGLE_CLOUD_PROJECT)
    #[arg(long = "project_id", value_name = "ID")]
    pub project_id: Option<String>,
    /// GCP location (falls back to GOOGLE_CLOUD_LOCATION)
    #[arg(long, value_name = "LOCATION")]
    pub location: Option<String>,
    /// Staging bucket name without the gs:// prefix (falls back to STAGING_BUCKET_NAME)
    #[arg(long = "staging_bucket_name", value_name = "NAME")]
    pub staging_bucket_name: Option<String>,
    /// Engine resource id; required for update/delete when AGENT_ENGINE_ID is unset
    #[arg(long = "agent_engine_id", value_name = "ID")]
    pub agent_engine_id: Option<String>,
    /// Display name for the agent
    #[arg(long = "display_name", default_value = "Crisis Response Agent")]
    pub display_name: String,
    /// Description for the agent
    #[arg(
        long,
        default_value = "Agent providing crisis information using curated retrieval and web search."
    )]
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployAction {
    List,
    Create,
    Delete,
    Update,
}

impl DeployArgs {
    /// Resolve the requested action.
    ///
    /// Exactly one action flag may be set.  More than one is a validation
    /// error (raised before any network call); none at all is `Ok(None)` —
    /// an informational no-op, not a failure.
    pub fn action(&self) -> anyhow::Result<Option<DeployAction>> {
        let mut actions = Vec::new();
        if self.list {
            actions.push(DeployAction::List);
        }
        if self.create {
            actions.push(DeployAction::Create);
        }
        if self.delete {
            actions.push(DeployAction::Delete);
        }
        if self.update {
            actions.push(DeployAction::Update);
        }
        if actions.len() > 1 {
            bail!("--create, --update, --delete, and --list are mutually exclusive");
        }
        Ok(actions.pop())
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_action_flags_is_a_noop() {
        let args = DeployArgs::default();
        assert_eq!(args.action().unwrap(), None);
    }

    #[test]
    fn single_action_flag_resolves() {
        let args = DeployArgs {
            create: true,
            ..DeployArgs::default()
        };
        assert_eq!(args.action().unwrap(), Some(DeployAction::Create));
    }

    #[test]
    fn two_action_flags_fail_validation() {
        let args = DeployArgs {
            create: true,
            delete: true,
            ..DeployArgs::default()
        };
        assert!(args.action().is_err());
    }

    #[test]
    fn cli_parses_deploy_flags_with_underscores() {
        let cli = Cli::parse_from([
            "beacon",
            "deploy",
            "--create",
            "--project_id",
            "my-project",
            "--staging_bucket_name",
            "my-bucket",
        ]);
        match cli.command {
            Commands::Deploy(args) => {
                assert!(args.create);
                assert_eq!(args.project_id.as_deref(), Some("my-project"));
                assert_eq!(args.staging_bucket_name.as_deref(), Some("my-bucket"));
            }
            other => panic!("expected deploy, got {other:?}"),
        }
    }
}
