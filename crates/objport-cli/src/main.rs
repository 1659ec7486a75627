//! objport CLI - developer tooling for the object reference gateway

use anyhow::Context;
use clap::Parser;
use objport_core::{Gateway, GatewayConfig};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "objport")]
#[command(about = "objport - object references over JSON wire protocols")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Validate a gateway configuration (serializer conflicts fail here)
    Check {
        /// Configuration file path (JSON); defaults apply if omitted
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Round-trip a JSON payload through the reference-aware codec
    Roundtrip {
        /// Payload file path
        #[arg(short, long)]
        file: PathBuf,
    },
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<GatewayConfig> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
        }
        None => Ok(GatewayConfig::default()),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt::init();

    match cli.command {
        Some(Commands::Check { config }) => {
            let config = load_config(config.as_ref())?;
            let gateway = Gateway::new(config, Vec::new())?;
            println!(
                "Configuration OK ({} denied capabilities)",
                gateway.config().dispatch.denied_capabilities.len()
            );
        }
        Some(Commands::Roundtrip { file }) => {
            let body = std::fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let gateway = Gateway::new(GatewayConfig::default(), Vec::new())?;

            // A fresh gateway has an empty registry, so any reference in
            // the payload is by definition unknown - exactly what this
            // check is for.
            match gateway.decode_request(&body) {
                Ok(decoded) => {
                    let encoded = gateway.encode_response(&decoded)?;
                    println!("{encoded}");
                }
                Err(err) => {
                    eprintln!("Payload rejected: {err}");
                    std::process::exit(1);
                }
            }
        }
        None => {
            println!("objport v0.1.0 - Use --help for commands");
        }
    }

    Ok(())
}
