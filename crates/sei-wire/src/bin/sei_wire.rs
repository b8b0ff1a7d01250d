//! # sei-wire
//!
//! Encode, decode and build Sei chain messages from the command line.
//!
//! ```bash
//! sei-wire types
//! echo '{"positionDirection":"SHORT","price":"100.5"}' | sei-wire encode OrderCancellation
//! sei-wire decode OrderCancellation 080112053130302e35
//! sei-wire decode OrderCancellation CAESBTEwMC41 --format base64 --emit-defaults
//! sei-wire record-txs sei1... 42 <64-hex-root> deadbeef
//! ```

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use sei_wire::cli::{self, Format};

/// Sei chain message codec
#[derive(Parser, Debug)]
#[command(name = "sei-wire")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the registered message types
    Types,

    /// Encode a portable JSON message into wire bytes
    Encode {
        /// Message type, full or short name
        message_type: String,

        /// JSON input file (stdin when omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value_t = Format::Hex)]
        format: Format,

        /// Prefix the output with its varint length
        #[arg(long)]
        delimited: bool,
    },

    /// Decode wire bytes into portable JSON
    Decode {
        /// Message type, full or short name
        message_type: String,

        /// Encoded bytes
        data: String,

        #[arg(short, long, value_enum, default_value_t = Format::Hex)]
        format: Format,

        /// Print every field, including those at their default
        #[arg(long)]
        emit_defaults: bool,

        /// Input is a sequence of length-prefixed messages
        #[arg(long)]
        delimited: bool,
    },

    /// Validate and build a nitro MsgRecordTransactionData
    RecordTxs {
        sender: String,
        slot: String,
        /// 64-character hex state root
        root: String,
        /// Hex-encoded transactions
        txs: Vec<String>,
    },
}

fn main() {
    let args = Cli::parse();

    init_logging(match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    });

    let result = match args.command {
        Commands::Types => cli::types(),
        Commands::Encode {
            message_type,
            input,
            format,
            delimited,
        } => read_input(input.as_deref())
            .and_then(|json| cli::encode(&message_type, &json, format, delimited))
            .map(|line| vec![line]),
        Commands::Decode {
            message_type,
            data,
            format,
            emit_defaults,
            delimited,
        } => cli::decode(&message_type, &data, format, emit_defaults, delimited),
        Commands::RecordTxs {
            sender,
            slot,
            root,
            txs,
        } => cli::record_txs(&sender, &slot, &root, &txs),
    };

    match result {
        Ok(lines) => {
            for line in lines {
                println!("{line}");
            }
        }
        Err(e) => {
            error!("{:#}", e);
            std::process::exit(1);
        }
    }
}

/// Reads the JSON input file, or stdin when none is given.
fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
        }
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            Ok(text)
        }
    }
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(io::stderr))
        .with(filter)
        .try_init()
        .ok();
}
