/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Command-line surface for the ironiso codec.
//!
//! Subcommands: `parse`, `build`, `validate`, `generate`. Wire input is a
//! hex/ASCII string on the command line or stdin; field maps come from JSON
//! files mapping field numbers to values. Exit codes: 0 success, 1 parse
//! failure, 2 validation failure, 3 build failure, 4 I/O failure.
//!
//! The codec operates on already-framed payloads. Deployments that wrap
//! messages in a 2-byte length prefix plus a 5-byte TPDU header must strip
//! that framing before handing bytes to `parse`.

mod output;

use clap::{Parser, Subcommand, ValueEnum};
use ironiso::dictionary::SchemaRegistry;
use ironiso::prelude::*;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "ironiso",
    version,
    about = "ISO 8583 message toolkit: parse, build, validate, generate"
)]
struct Cli {
    /// Output shape.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse a wire message given as an argument or on stdin.
    Parse {
        /// The message characters; read from stdin when omitted.
        message: Option<String>,

        /// Card network; detected from the PAN when omitted.
        #[arg(long)]
        network: Option<CardNetwork>,

        /// Protocol version (1987, 1993, 2003).
        #[arg(long, default_value = "1987")]
        version: IsoVersion,
    },

    /// Build a wire message from a JSON field map file.
    Build {
        /// JSON file mapping field numbers to values.
        fields_file: PathBuf,

        /// Message type indicator, four decimal digits.
        #[arg(long)]
        mti: String,

        /// Card network overlay to build under.
        #[arg(long)]
        network: Option<CardNetwork>,

        /// Protocol version (1987, 1993, 2003).
        #[arg(long, default_value = "1987")]
        version: IsoVersion,
    },

    /// Validate a wire message or a JSON field map file.
    Validate {
        /// The message characters; read from stdin when neither this nor
        /// --fields-file is given.
        message: Option<String>,

        /// Validate a JSON field map instead of a wire message.
        #[arg(long, conflicts_with = "message")]
        fields_file: Option<PathBuf>,

        /// Message type indicator, required with --fields-file.
        #[arg(long, requires = "fields_file")]
        mti: Option<String>,

        /// Card network; detected from the PAN when omitted.
        #[arg(long)]
        network: Option<CardNetwork>,

        /// Protocol version (1987, 1993, 2003).
        #[arg(long, default_value = "1987")]
        version: IsoVersion,
    },

    /// Generate a template message.
    Generate {
        /// Template kind.
        #[arg(value_enum)]
        kind: TemplateKind,

        /// PAN for the generated message.
        #[arg(long, default_value = "4111111111111111")]
        pan: String,

        /// Transaction amount in minor units.
        #[arg(long, default_value = "1000")]
        amount: String,

        /// Terminal identifier.
        #[arg(long, default_value = "TERM0001")]
        terminal: String,

        /// Card network for network-management templates.
        #[arg(long)]
        network: Option<CardNetwork>,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Human-readable field table.
    Table,
    /// Pretty JSON.
    Json,
    /// The raw wire string.
    Raw,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum TemplateKind {
    /// 0100 authorization request.
    Auth,
    /// 0200 financial request.
    Financial,
    /// 0400 reversal of a generated authorization.
    Reversal,
    /// 0800 network management (echo test).
    Network,
}

/// CLI failure carrying its documented exit code.
enum CliError {
    Parse(String),
    Validation(String),
    Build(String),
    Io(String),
}

impl CliError {
    fn exit_code(&self) -> u8 {
        match self {
            Self::Parse(_) => 1,
            Self::Validation(_) => 2,
            Self::Build(_) => 3,
            Self::Io(_) => 4,
        }
    }

    fn message(&self) -> &str {
        match self {
            Self::Parse(m) | Self::Validation(m) | Self::Build(m) | Self::Io(m) => m,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(rendered) => {
            print!("{}", rendered);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {}", err.message());
            ExitCode::from(err.exit_code())
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(cli: &Cli) -> std::result::Result<String, CliError> {
    match &cli.command {
        Command::Parse {
            message,
            network,
            version,
        } => {
            let wire = read_message(message.as_deref())?;
            let decoder = Decoder::new(*version);
            let msg = decoder
                .decode(wire.trim(), *network)
                .map_err(|e| CliError::Parse(e.to_string()))?;
            Ok(render(cli.format, &msg))
        }

        Command::Build {
            fields_file,
            mti,
            network,
            version,
        } => {
            let mti = Mti::new(mti)
                .ok_or_else(|| CliError::Build(format!("invalid MTI {:?}", mti)))?;
            let fields = load_fields(fields_file, *version, *network)?;
            let mut draft = IsoMessage::new(mti, fields).with_version(*version);
            draft.network = *network;

            let encoder = Encoder::new(*version);
            let wire = encoder
                .encode(&draft)
                .map_err(|e| CliError::Build(e.to_string()))?;
            draft.raw = wire;
            let derived = ironiso::codec::bitmap::encode(draft.data_fields().map(|(n, _)| n));
            draft.bitmap = Some(derived);
            Ok(render(cli.format, &draft))
        }

        Command::Validate {
            message,
            fields_file,
            mti,
            network,
            version,
        } => {
            let msg = if let Some(path) = fields_file {
                let mti = mti
                    .as_deref()
                    .and_then(Mti::new)
                    .ok_or_else(|| CliError::Parse("--fields-file needs a valid --mti".into()))?;
                let fields = load_fields(path, *version, *network)?;
                let mut draft = IsoMessage::new(mti, fields).with_version(*version);
                draft.network = *network;
                draft
            } else {
                let wire = read_message(message.as_deref())?;
                Decoder::new(*version)
                    .decode(wire.trim(), *network)
                    .map_err(|e| CliError::Parse(e.to_string()))?
            };

            let diagnostics = Validator::new().validate(&msg);
            debug!(count = diagnostics.len(), "validation finished");
            if diagnostics.is_empty() {
                Ok(output::render_diagnostics(&diagnostics))
            } else {
                Err(CliError::Validation(output::render_diagnostics(
                    &diagnostics,
                )))
            }
        }

        Command::Generate {
            kind,
            pan,
            amount,
            terminal,
            network,
        } => {
            let msg = generate(*kind, pan, amount, terminal, *network)?;
            Ok(render(cli.format, &msg))
        }
    }
}

fn render(format: OutputFormat, msg: &IsoMessage) -> String {
    match format {
        OutputFormat::Table => output::render_table(msg),
        OutputFormat::Json => format!("{}\n", output::render_json(msg)),
        OutputFormat::Raw => format!("{}\n", msg.raw),
    }
}

/// Reads the message from the argument, or stdin when absent.
fn read_message(arg: Option<&str>) -> std::result::Result<String, CliError> {
    match arg {
        Some(message) => Ok(message.to_string()),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| CliError::Io(e.to_string()))?;
            Ok(buffer)
        }
    }
}

/// Loads a JSON field map, typing each value against the effective schema.
fn load_fields(
    path: &PathBuf,
    version: IsoVersion,
    network: Option<CardNetwork>,
) -> std::result::Result<BTreeMap<u16, FieldValue>, CliError> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| CliError::Io(format!("{}: {}", path.display(), e)))?;
    let raw: BTreeMap<u16, String> = serde_json::from_str(&contents)
        .map_err(|e| CliError::Io(format!("{}: {}", path.display(), e)))?;

    let registry = SchemaRegistry::global();
    let fields = raw
        .into_iter()
        .map(|(number, value)| {
            let is_binary = registry
                .definition_of(number, version, network)
                .is_some_and(|def| def.kind.is_binary());
            let value = if is_binary {
                FieldValue::binary_hex(value)
            } else {
                FieldValue::text(value)
            };
            (number, value)
        })
        .collect();
    Ok(fields)
}

/// Builds one of the stock template messages.
fn generate(
    kind: TemplateKind,
    pan: &str,
    amount: &str,
    terminal: &str,
    network: Option<CardNetwork>,
) -> std::result::Result<IsoMessage, CliError> {
    let encoder = Encoder::new(IsoVersion::V1987);
    let now = chrono::Utc::now();

    let stamp_common = |fields: &mut BTreeMap<u16, FieldValue>| {
        fields.insert(2, FieldValue::text(pan));
        fields.insert(3, FieldValue::text("000000"));
        fields.insert(4, FieldValue::text(format!("{:0>12}", amount)));
        fields.insert(11, FieldValue::text(now.format("%H%M%S").to_string()));
        fields.insert(12, FieldValue::text(now.format("%H%M%S").to_string()));
        fields.insert(13, FieldValue::text(now.format("%m%d").to_string()));
        fields.insert(41, FieldValue::text(format!("{:<8}", terminal)));
    };

    let build_request = |mti: &str| -> std::result::Result<IsoMessage, CliError> {
        let mut fields = BTreeMap::new();
        stamp_common(&mut fields);
        encoder
            .create_message(
                Mti::new(mti).unwrap_or_default(),
                fields,
            )
            .map_err(|e| CliError::Build(e.to_string()))
    };

    match kind {
        TemplateKind::Auth => build_request("0100"),
        TemplateKind::Financial => build_request("0200"),
        TemplateKind::Reversal => {
            let original = build_request("0100")?;
            encoder
                .create_reversal(&original, BTreeMap::new())
                .map_err(|e| CliError::Build(e.to_string()))
        }
        TemplateKind::Network => encoder
            .create_network_management("301", network)
            .map_err(|e| CliError::Build(e.to_string())),
    }
}
