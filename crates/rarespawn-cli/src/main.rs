mod alert;
mod check;
mod labels;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "rarespawn-cli")]
#[command(about = "Format rare-spawn alerts and manage custom labels")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Format one alert and print the reply. Reads stdin when no text is given.
    Format {
        /// Sender identity used for the custom label lookup.
        #[arg(long, env = "RARESPAWN_IDENTITY", default_value = "cli")]
        identity: String,
        /// Skip the translation service and keep place names as-is.
        #[arg(long)]
        no_translate: bool,
        text: Vec<String>,
    },
    /// Inspect or edit the label file.
    Labels {
        #[command(subcommand)]
        command: LabelsCommands,
    },
    /// Load every configuration file and print a summary.
    CheckConfig,
}

#[derive(Debug, Subcommand)]
enum LabelsCommands {
    Get { identity: String },
    Set { identity: String, label: String },
    List,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("rarespawn-cli ready; run with --help to list commands");
        return Ok(());
    };

    let config = rarespawn_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match command {
        Commands::Format {
            identity,
            no_translate,
            text,
        } => alert::run_format(&config, &identity, &text, no_translate).await?,
        Commands::Labels { command } => {
            let store = rarespawn_pipeline::LabelStore::open(&config.labels_path).await?;
            let mut out = std::io::stdout().lock();
            match command {
                LabelsCommands::Get { identity } => {
                    labels::print_label(&store, &identity, &mut out).await?;
                }
                LabelsCommands::Set { identity, label } => {
                    labels::set_label(&store, &identity, &label, &mut out).await?;
                }
                LabelsCommands::List => labels::print_all(&store, &mut out).await?,
            }
        }
        Commands::CheckConfig => check::run_check_config(&config).await?,
    }

    Ok(())
}
