//! DogeConnect CLI
//!
//! Command-line interface for creating and checking DogeConnect payment URIs
//! and signed payment envelopes.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod ui;

#[derive(Parser)]
#[command(name = "dogeconnect")]
#[command(about = "DogeConnect CLI - Create and verify Dogecoin payment requests", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a gateway signing key
    Keygen {
        /// Print the key as JSON
        #[arg(long)]
        json: bool,
    },

    /// Encode and decode dogecoin: URIs
    Uri {
        #[command(subcommand)]
        action: UriAction,
    },

    /// Parse a decimal DOGE amount into Koinu
    Amount {
        /// Decimal amount (e.g. 12.25), or a Koinu count with --from-koinu
        #[arg(allow_hyphen_values = true)]
        value: String,

        /// Treat the value as a raw Koinu count and format it as DOGE
        #[arg(long)]
        from_koinu: bool,
    },

    /// Sign a payment request (gateway side)
    Sign {
        /// Payment request JSON file ("-" for stdin)
        #[arg(short, long, default_value = "-")]
        payment: String,

        /// Write the envelope to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Hex-encoded secret key
        #[arg(long, env = "DOGECONNECT_SECRET_KEY", hide_env_values = true)]
        key: Option<String>,
    },

    /// Verify a payment envelope (wallet side)
    Verify {
        /// Envelope JSON file ("-" for stdin)
        #[arg(short, long, default_value = "-")]
        envelope: String,

        /// Trusted public key hash (URL-safe base64, from the QR code)
        #[arg(long, conflicts_with = "uri", required_unless_present = "uri")]
        hash: Option<String>,

        /// Scanned dogecoin: URI carrying the trusted hash
        #[arg(long)]
        uri: Option<String>,

        /// Print the verified payment as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum UriAction {
    /// Build a DogeConnect URI for a QR code
    Encode {
        /// Fallback pay-to address
        #[arg(short, long)]
        address: String,

        /// Total amount in DOGE
        #[arg(short = 'm', long)]
        amount: String,

        /// Gateway Connect URL
        #[arg(short, long)]
        connect_url: String,

        /// Hex-encoded gateway public key (derived from --key if omitted)
        #[arg(long)]
        pubkey: Option<String>,

        /// Hex-encoded secret key
        #[arg(long, env = "DOGECONNECT_SECRET_KEY", hide_env_values = true)]
        key: Option<String>,
    },

    /// Decode a dogecoin: URI
    Decode {
        /// URI to decode
        uri: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; RUST_LOG takes precedence over --verbose
    let default_filter = if cli.verbose {
        "dogeconnect_cli=debug,dogeconnect_lib=debug"
    } else {
        "dogeconnect_cli=info,dogeconnect_lib=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    // Dispatch commands
    match cli.command {
        Commands::Keygen { json } => {
            commands::keygen::run(json)?;
        }
        Commands::Uri { action } => match action {
            UriAction::Encode {
                address,
                amount,
                connect_url,
                pubkey,
                key,
            } => {
                commands::uri::encode(
                    &address,
                    &amount,
                    &connect_url,
                    pubkey.as_deref(),
                    commands::secret_key(key),
                )?;
            }
            UriAction::Decode { uri } => {
                commands::uri::decode(&uri, cli.verbose)?;
            }
        },
        Commands::Amount { value, from_koinu } => {
            commands::amount::run(&value, from_koinu)?;
        }
        Commands::Sign {
            payment,
            output,
            key,
        } => {
            commands::sign::run(&payment, output.as_deref(), commands::secret_key(key))?;
        }
        Commands::Verify {
            envelope,
            hash,
            uri,
            json,
        } => {
            let trust = match (hash, uri) {
                (Some(hash), _) => commands::verify::TrustAnchor::Hash(hash),
                (None, Some(uri)) => commands::verify::TrustAnchor::Uri(uri),
                (None, None) => anyhow::bail!("either --hash or --uri is required"),
            };
            commands::verify::run(&envelope, &trust, json)?;
        }
    }

    Ok(())
}
