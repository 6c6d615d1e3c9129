mod cli;
mod deploy;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use beacon_agent::root_agent;
use beacon_config::{EnvFile, Settings};
use beacon_corpus::{default_documents, prepare, Manifest};
use beacon_vertex::{EngineClient, RagClient, VertexClient};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let mut env_file = EnvFile::load(&cli.env_file)?;
    let settings = Settings::load(&env_file);

    match cli.command {
        Commands::ShowConfig => {
            let agent = root_agent(&settings);
            println!("{}", serde_yaml::to_string(&agent.declaration())?);
            Ok(())
        }
        Commands::PrepareCorpus { manifest } => {
            let documents = match manifest {
                Some(path) => Manifest::load(&path)?.documents,
                None => default_documents(),
            };
            let project = settings
                .project_id
                .clone()
                .context("GOOGLE_CLOUD_PROJECT environment variable not set. Please set it in your .env file.")?;
            let location = settings
                .location
                .clone()
                .context("GOOGLE_CLOUD_LOCATION environment variable not set. Please set it in your .env file.")?;
            let rag = RagClient::new(VertexClient::connect(project, location).await?);
            let outcome = prepare(&rag, &settings, &mut env_file, &documents).await?;
            println!(
                "Finished processing documents. Successful uploads: {} (skipped: {})",
                outcome.uploaded, outcome.skipped
            );
            Ok(())
        }
        Commands::Deploy(args) => deploy::run(args, &settings, &mut env_file).await,
        Commands::Verify { message } => {
            let engine_id = settings.agent_engine_id.clone().context(
                "AGENT_ENGINE_ID not set — deploy the agent first or set it in the environment",
            )?;
            let project = settings
                .project_id
                .clone()
                .context("GOOGLE_CLOUD_PROJECT environment variable not set")?;
            let location = settings
                .location
                .clone()
                .context("GOOGLE_CLOUD_LOCATION environment variable not set")?;
            let client = EngineClient::new(VertexClient::connect(project, location).await?);
            tracing::info!(engine = %engine_id, "querying deployed agent");
            let answer = client.query(&engine_id, &message).await?;
            println!("{answer}");
            Ok(())
        }
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
