mod config;

use anyhow::Context;
use clap::{Parser, Subcommand};
use stackhook::{CfnResponse, Event, Reconciler};
use stackhook_aws::{AwsContext, QueuePolicyAccessor, default_registry};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tokio::io::AsyncReadExt;

use crate::config::Settings;

#[derive(Parser)]
#[command(name = "stackhook")]
#[command(about = "Reconcile CloudFormation custom resource events", long_about = None)]
struct Cli {
    /// AWS region the handlers operate in
    #[arg(long, env = "AWS_REGION", global = true, default_value = "")]
    region: String,

    /// Account id used to build resource ARNs
    #[arg(long, env = "AWS_ACCOUNT_ID", global = true, default_value = "")]
    account_id: String,

    /// ARN partition (aws, aws-cn, aws-us-gov)
    #[arg(long, env = "AWS_PARTITION", global = true, default_value = "aws")]
    partition: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Handle one custom resource event and print the CloudFormation response
    Handle {
        /// Event JSON file, or `-` for stdin
        #[arg(short, long, default_value = "-")]
        event: PathBuf,
    },
    /// Print the access policy attached to an SQS queue
    QueuePolicy {
        /// Queue URL
        #[arg(long)]
        queue_url: String,
    },
    /// List the resource types this build can handle
    Types,
    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // stdout carries the response document
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_ansi(false)
        .init();

    if matches!(cli.command, Commands::Version) {
        println!("stackhook {}", env!("CARGO_PKG_VERSION"));
        return Ok(ExitCode::SUCCESS);
    }

    let settings = Settings::new(&cli.region, &cli.account_id, &cli.partition)?;
    let aws = AwsContext::load(settings.location.clone()).await;

    match cli.command {
        Commands::Handle { event } => {
            let event = read_event(&event).await?;
            let reconciler = Reconciler::new(default_registry(&aws));

            let outcome = reconciler.handle(&event).await;
            let response = CfnResponse::from_outcome(&event, &outcome);
            println!("{}", serde_json::to_string(&response)?);

            if response.is_success() {
                Ok(ExitCode::SUCCESS)
            } else {
                tracing::error!(
                    logical_resource_id = %response.logical_resource_id,
                    "request failed: {}",
                    response.reason.as_deref().unwrap_or_default()
                );
                Ok(ExitCode::FAILURE)
            }
        }
        Commands::QueuePolicy { queue_url } => {
            let accessor = QueuePolicyAccessor::new(Arc::new(aws.sqs_client()));
            let policy = accessor
                .get_policy(&queue_url)
                .await
                .with_context(|| format!("failed to read policy of {}", queue_url))?;
            println!("{}", serde_json::to_string_pretty(&policy)?);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Types => {
            for resource_type in default_registry(&aws).resource_types() {
                println!("{}", resource_type);
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Version => Ok(ExitCode::SUCCESS),
    }
}

async fn read_event(path: &Path) -> anyhow::Result<Event> {
    let raw = if path == Path::new("-") {
        let mut buf = String::new();
        tokio::io::stdin()
            .read_to_string(&mut buf)
            .await
            .context("failed to read event from stdin")?;
        buf
    } else {
        tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read event file {}", path.display()))?
    };

    parse_event(&raw)
}

fn parse_event(raw: &str) -> anyhow::Result<Event> {
    serde_json::from_str(raw).context("event is not a valid custom resource request")
}
