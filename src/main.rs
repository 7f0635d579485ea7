use anyhow::Result;
use clap::Parser;
use gmail_provider::cli::{self, Cli, Commands, DataCommand, FilterCommand, LabelCommand};
use gmail_provider::config::ProviderConfig;
use gmail_provider::data_sources::{DataSource, LabelDataSource, LabelsDataSource};
use gmail_provider::models::{LabelLookupConfig, LabelsConfig};
use gmail_provider::provider::Provider;
use gmail_provider::resources::{self, FilterResource, LabelResource, Resource, UpdatableResource};
use gmail_provider::schema;
use std::process;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Install default crypto provider for rustls
    // On non-Windows platforms, use aws-lc-rs; on Windows, use ring
    #[cfg(not(windows))]
    rustls::crypto::aws_lc_rs::default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("Failed to install default crypto provider"))?;

    #[cfg(windows)]
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("Failed to install default crypto provider"))?;

    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("gmail_provider=debug,info"))
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("gmail_provider=info,warn"))
    };

    // stdout carries the JSON results, logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Schema => {
            println!("{}", cli::render(&schema::provider_schema())?);
        }

        Commands::InitConfig { output, force } => {
            if output.exists() && !force {
                anyhow::bail!(
                    "{} already exists, use --force to overwrite",
                    output.display()
                );
            }
            ProviderConfig::create_example(&output).await?;
            eprintln!("Wrote example configuration to {}", output.display());
        }

        Commands::Label { action } => {
            let provider = configure(&cli.config).await?;
            let label_schema = schema::label_resource_schema();

            match action {
                LabelCommand::Create { file } => {
                    let config = cli::read_config(&file, &label_schema).await?;
                    let state = LabelResource.create(&provider, &config).await?;
                    println!("{}", cli::render(&state)?);
                }
                LabelCommand::Read { id, user_id } => {
                    let state = LabelResource
                        .read(&provider, user_id.as_deref(), &id)
                        .await?;
                    println!("{}", cli::render(&state)?);
                }
                LabelCommand::Update { id, file } => {
                    let config = cli::read_config(&file, &label_schema).await?;
                    LabelResource.update(&provider, &id, &config).await?;
                }
                LabelCommand::Apply { id, prior, file } => {
                    let prior = cli::read_config(&prior, &label_schema).await?;
                    let proposed = cli::read_config(&file, &label_schema).await?;
                    let id =
                        resources::apply(&LabelResource, &provider, &id, &prior, &proposed).await?;
                    println!("{}", cli::render(&serde_json::json!({ "id": id }))?);
                }
                LabelCommand::Delete { id, user_id } => {
                    LabelResource
                        .delete(&provider, user_id.as_deref(), &id)
                        .await?;
                }
            }
        }

        Commands::Filter { action } => {
            let provider = configure(&cli.config).await?;
            let filter_schema = schema::filter_resource_schema();

            match action {
                FilterCommand::Create { file } => {
                    let config = cli::read_config(&file, &filter_schema).await?;
                    let state = FilterResource.create(&provider, &config).await?;
                    println!("{}", cli::render(&state)?);
                }
                FilterCommand::Read { id, user_id } => {
                    let state = FilterResource
                        .read(&provider, user_id.as_deref(), &id)
                        .await?;
                    println!("{}", cli::render(&state)?);
                }
                FilterCommand::Replace { id, prior, file } => {
                    let prior = cli::read_config(&prior, &filter_schema).await?;
                    let proposed = cli::read_config(&file, &filter_schema).await?;
                    let state =
                        resources::replace(&FilterResource, &provider, &id, &prior, &proposed)
                            .await?;
                    println!("{}", cli::render(&state)?);
                }
                FilterCommand::Delete { id, user_id } => {
                    FilterResource
                        .delete(&provider, user_id.as_deref(), &id)
                        .await?;
                }
            }
        }

        Commands::Data { source } => {
            let provider = configure(&cli.config).await?;

            match source {
                DataCommand::Label { name, user_id } => {
                    let state = LabelDataSource
                        .read(&provider, &LabelLookupConfig { user_id, name })
                        .await?;
                    println!("{}", cli::render(&state)?);
                }
                DataCommand::Labels { user_id } => {
                    let state = LabelsDataSource
                        .read(&provider, &LabelsConfig { user_id })
                        .await?;
                    println!("{}", cli::render(&state)?);
                }
            }
        }
    }

    Ok(())
}

async fn configure(path: &std::path::Path) -> Result<Provider> {
    let config = ProviderConfig::load(path).await?;
    Ok(Provider::configure(&config).await?)
}
