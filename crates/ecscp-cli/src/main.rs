use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use ecscp_cli::{commands, config};
use ecscp_ecs::EcsGateway;
use ecscp_provisioner::Reconciler;
use eyre::Result;

#[derive(Parser)]
#[command(name = "ecscp")]
#[command(about = "Declarative lifecycle management for ECS capacity providers", long_about = None)]
struct Cli {
    /// Config file (default: <config dir>/ecscp/config.json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the AWS region from the config file
    #[arg(long, global = true)]
    region: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Converge a capacity provider to the desired-state document
    Apply {
        /// Desired-state JSON document
        file: PathBuf,

        /// Give up after this many seconds
        #[arg(long)]
        deadline: Option<u64>,
    },
    /// Show what apply would do
    Plan {
        /// Desired-state JSON document
        file: PathBuf,
    },
    /// Describe a capacity provider
    Show {
        /// Capacity provider name
        name: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = config::load_config(cli.config.as_deref())?;
    let region = cli.region.as_deref().or(cfg.region.as_deref());

    let sdk_config = ecscp_ecs::build_sdk_config(region, &cfg.credentials).await;
    let reconciler = Reconciler::new(EcsGateway::from_conf(&sdk_config), cfg.reconciler);

    let output = match cli.command {
        Commands::Apply { file, deadline } => {
            let spec = commands::load_spec(&file)?;
            commands::apply(&reconciler, &spec, deadline.map(Duration::from_secs)).await?
        }
        Commands::Plan { file } => {
            let spec = commands::load_spec(&file)?;
            commands::plan(&reconciler, &spec).await?
        }
        Commands::Show { name } => commands::show(&reconciler, &name).await?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
