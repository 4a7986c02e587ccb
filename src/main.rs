use std::io::Read;

use applyconfig::{
    api::events::v1beta1::Event, client::EventClient, extract_event, extract_event_status,
    telemetry, EventApplyConfiguration,
};
use clap::{Parser, Subcommand};
use kube::Client;
use tracing::*;

/// Build, extract and apply declarative Event configurations
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract the configuration a field manager owns from a stored Event (YAML or JSON)
    Extract {
        /// Input file, `-` for stdin
        #[arg(short, long, default_value = "-")]
        file: String,
        #[arg(short = 'm', long)]
        field_manager: String,
        /// Extract the status subresource
        #[arg(long)]
        status: bool,
    },
    /// Read an Event from the cluster and extract what a field manager owns
    Fetch {
        #[arg(short, long, default_value = "default")]
        namespace: String,
        name: String,
        #[arg(short = 'm', long)]
        field_manager: String,
        #[arg(long)]
        status: bool,
    },
    /// Server-side apply an Event configuration (YAML or JSON)
    Apply {
        #[arg(short, long, default_value = "-")]
        file: String,
        #[arg(short = 'm', long)]
        field_manager: String,
        /// Take ownership of conflicting fields
        #[arg(long)]
        force: bool,
    },
}

fn read_input(file: &str) -> anyhow::Result<String> {
    if file == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        Ok(std::fs::read_to_string(file)?)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    telemetry::init(args.json_logs);

    match args.command {
        Command::Extract {
            file,
            field_manager,
            status,
        } => {
            // YAML is a superset of JSON, so one parser reads both
            let ev: Event = serde_yaml::from_str(&read_input(&file)?)?;
            let config = if status {
                extract_event_status(&ev, &field_manager)?
            } else {
                extract_event(&ev, &field_manager)?
            };
            print!("{}", serde_yaml::to_string(&config)?);
        }
        Command::Fetch {
            namespace,
            name,
            field_manager,
            status,
        } => {
            let client = Client::try_default().await?;
            let events = EventClient::namespaced(client, &namespace);
            let config = if status {
                events.extract_status(&name, &field_manager).await?
            } else {
                events.extract(&name, &field_manager).await?
            };
            print!("{}", serde_yaml::to_string(&config)?);
        }
        Command::Apply {
            file,
            field_manager,
            force,
        } => {
            let config: EventApplyConfiguration = serde_yaml::from_str(&read_input(&file)?)?;
            let namespace = config
                .object_meta
                .as_ref()
                .and_then(|m| m.namespace.clone())
                .unwrap_or_else(|| "default".to_string());
            let client = Client::try_default().await?;
            let events = EventClient::namespaced(client, &namespace);
            let applied = events.apply(&config, &field_manager, force).await?;
            info!(
                "Applied event {:?}, resourceVersion {:?}",
                applied.metadata.name, applied.metadata.resource_version
            );
        }
    }
    Ok(())
}
