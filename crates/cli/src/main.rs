use anyhow::{anyhow, bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use rfcuuid::namespace::resolve_alias;
use rfcuuid_record::{IdentifierBehaviour, RecordEvent};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable supplying the namespace for `v3`/`v5` when `--namespace` is absent.
const NAMESPACE_ENV: &str = "RFCUUID_NAMESPACE";

#[derive(Parser)]
#[command(name = "rfcuuid")]
#[command(about = "Generate, validate and convert RFC 4122 UUIDs")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Name-based UUID (MD5)
    V3 {
        /// Name to hash
        name: String,
        /// Namespace UUID or alias (dns, url, oid, x500, nil)
        #[arg(long)]
        namespace: Option<String>,
    },
    /// Random UUID
    V4 {
        /// How many UUIDs to print
        #[arg(long, default_value_t = 1)]
        count: usize,
    },
    /// Name-based UUID (SHA-1)
    V5 {
        /// Name to hash
        name: String,
        /// Namespace UUID or alias (dns, url, oid, x500, nil)
        #[arg(long)]
        namespace: Option<String>,
    },
    /// Check whether a value is a UUID (exit status 1 if not)
    Validate {
        value: String,
        /// Require canonical form: lowercase, hyphenated, no braces
        #[arg(long)]
        strict: bool,
    },
    /// Print the 16 bytes of a UUID as 32 hex digits
    ToBinary { uuid: String },
    /// Format 32 hex digits as a canonical UUID
    FromBinary { hex: String },
    /// Run an identifier behaviour over an in-memory record and print it as JSON
    Assign {
        /// Behaviour configuration (YAML)
        #[arg(long)]
        config: PathBuf,
        /// Record attribute, as key=value (repeatable)
        #[arg(long = "set", value_parser = parse_key_val)]
        set: Vec<(String, String)>,
        /// Lifecycle event to fire
        #[arg(long, value_enum, default_value_t = EventArg::BeforeInsert)]
        event: EventArg,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum EventArg {
    BeforeInsert,
    BeforeUpdate,
}

impl From<EventArg> for RecordEvent {
    fn from(value: EventArg) -> Self {
        match value {
            EventArg::BeforeInsert => RecordEvent::BeforeInsert,
            EventArg::BeforeUpdate => RecordEvent::BeforeUpdate,
        }
    }
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", s))?;
    if key.trim().is_empty() {
        return Err(format!("empty key in '{}'", s));
    }
    Ok((key.trim().to_string(), value.to_string()))
}

/// Picks the namespace from the flag, then the environment value, and resolves aliases.
fn resolve_namespace(flag: Option<String>, env_value: Option<String>) -> anyhow::Result<String> {
    let namespace = flag
        .or(env_value)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| anyhow!("no namespace: pass --namespace or set {}", NAMESPACE_ENV))?;

    Ok(resolve_alias(&namespace).to_string())
}

/// Default filter used when `RUST_LOG` is unset or empty.
const DEFAULT_LOG_DIRECTIVE: &str = "rfcuuid=info";

/// Builds the log filter. A non-empty `RUST_LOG` value replaces the default entirely.
fn log_filter(rust_log: Option<String>) -> EnvFilter {
    match rust_log.filter(|v| !v.trim().is_empty()) {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::new(DEFAULT_LOG_DIRECTIVE),
    }
}

/// Executes `command`, writing results to `out`.
///
/// Returns `false` when `validate` rejects its value, so the caller can set the exit status.
fn run(
    command: Commands,
    env_namespace: Option<String>,
    out: &mut impl Write,
) -> anyhow::Result<bool> {
    match command {
        Commands::V3 { name, namespace } => {
            let namespace = resolve_namespace(namespace, env_namespace)?;
            writeln!(out, "{}", rfcuuid::v3(&namespace, &name)?)?;
        }
        Commands::V4 { count } => {
            for _ in 0..count {
                writeln!(out, "{}", rfcuuid::v4()?)?;
            }
        }
        Commands::V5 { name, namespace } => {
            let namespace = resolve_namespace(namespace, env_namespace)?;
            writeln!(out, "{}", rfcuuid::v5(&namespace, &name)?)?;
        }
        Commands::Validate { value, strict } => {
            let valid = if strict {
                rfcuuid::is_canonical(&value)
            } else {
                rfcuuid::is_valid(&value)
            };
            writeln!(out, "{}", if valid { "valid" } else { "invalid" })?;
            return Ok(valid);
        }
        Commands::ToBinary { uuid } => {
            let bytes = rfcuuid::to_binary(&uuid)?;
            writeln!(out, "{}", hex::encode(bytes))?;
        }
        Commands::FromBinary { hex: digits } => {
            let bytes = hex::decode(digits.trim()).context("input is not hexadecimal")?;
            writeln!(out, "{}", rfcuuid::from_binary(&bytes)?)?;
        }
        Commands::Assign { config, set, event } => {
            let behaviour = IdentifierBehaviour::from_yaml_file(&config)
                .with_context(|| format!("loading {}", config.display()))?;
            let mut record: BTreeMap<String, String> = set.into_iter().collect();

            if behaviour.handle(event.into(), &mut record)?.is_none() {
                tracing::info!("behaviour is not configured for this event");
            }
            writeln!(out, "{}", serde_json::to_string_pretty(&record)?)?;
        }
    }

    Ok(true)
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        bail!("no command given, use 'rfcuuid --help' for commands");
    };

    let stdout = std::io::stdout();
    if !run(command, std::env::var(NAMESPACE_ENV).ok(), &mut stdout.lock())? {
        std::process::exit(1);
    }

    Ok(())
}
