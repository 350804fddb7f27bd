use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use uplink_core::{create_datalines, registry, Dataline, DecodeError};

#[derive(Parser, Debug)]
#[command(name = "uplink")]
#[command(version)]
#[command(
    about = "Decode LoRaWAN vendor payloads into canonical datalines.",
    long_about = None,
    after_help = "Examples:\n  uplink decode dlmbx 02012f000304d200010bb1 1\n  uplink decode paxcounter 0003 1 --time 2022-03-02T12:21:30+00:00 --pretty\n  uplink formats"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode one hex payload with a named format and print datalines JSON.
    #[command(
        after_help = "Examples:\n  uplink decode dlmbx 02012f000304d200010bb1 1\n  uplink decode elsys 0100e202290400270506060308070d62 5 --pretty"
    )]
    Decode {
        /// Format key (see `uplink formats`)
        format: String,

        /// Payload as an even-length hex string
        hex: String,

        /// LoRaWAN FPort
        port: u16,

        /// RFC3339 timestamp to stamp records that carry none
        #[arg(long)]
        time: Option<String>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// List registered format keys.
    Formats,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Decode {
            format,
            hex,
            port,
            time,
            pretty,
        } => cmd_decode(&format, &hex, port, time.as_deref(), pretty),
        Commands::Formats => cmd_formats(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(err.to_string(), None)
    }
}

impl From<DecodeError> for CliError {
    fn from(err: DecodeError) -> Self {
        let hint = match &err {
            DecodeError::UnsupportedFormat { .. } => {
                Some("run `uplink formats` to list known formats".to_string())
            }
            DecodeError::MalformedHex { .. } => {
                Some("payload must be an even-length hex string".to_string())
            }
            DecodeError::InvalidTimestamp => {
                Some("use an RFC3339 timestamp, e.g. 2022-03-02T12:21:30+00:00".to_string())
            }
            _ => None,
        };
        CliError::new(err.to_string(), hint)
    }
}

fn cmd_decode(
    format: &str,
    hex: &str,
    port: u16,
    time: Option<&str>,
    pretty: bool,
) -> Result<(), CliError> {
    let datalines = create_datalines(format, hex, port, time)?;
    let json = serialize_datalines(&datalines, pretty)?;
    println!("{}", json);
    Ok(())
}

fn cmd_formats() -> Result<(), CliError> {
    for key in registry::format_keys() {
        println!("{}", key);
    }
    Ok(())
}

fn serialize_datalines(datalines: &[Dataline], pretty: bool) -> Result<String, CliError> {
    if pretty {
        serde_json::to_string_pretty(datalines)
            .context("JSON serialization failed")
            .map_err(Into::into)
    } else {
        serde_json::to_string(datalines)
            .context("JSON serialization failed")
            .map_err(Into::into)
    }
}
