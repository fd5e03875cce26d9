use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use nova_config::{ConfigDiagnostics, NovaConfig};
use nova_properties::{
    append_entry, format_entry, parse, string_literal_to_properties_value, InvalidLiteralFormat,
    PropertyEntry,
};
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "nova",
    version,
    about = "Nova NLS tools (Java string literals to .properties values)"
)]
struct Cli {
    /// Config file to use instead of discovering one in the workspace
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Workspace root used for config discovery
    #[arg(long, global = true, default_value = ".")]
    workspace: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert a Java string literal or text block into a `.properties` value
    Decode(DecodeArgs),
    /// Format (or append) a `key=value` entry for a Java string literal
    Entry(EntryArgs),
    /// Print the entries of a `.properties` file
    Parse(ParseArgs),
}

#[derive(Args)]
struct LiteralSource {
    /// Literal source text, delimiters included (reads stdin when omitted)
    literal: Option<String>,
    /// Read the literal from a file
    #[arg(long, conflicts_with = "literal")]
    file: Option<PathBuf>,
}

#[derive(Args)]
struct DecodeArgs {
    #[command(flatten)]
    source: LiteralSource,
    /// Emit JSON suitable for CI
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct EntryArgs {
    /// Property key
    #[arg(long)]
    key: String,
    #[command(flatten)]
    source: LiteralSource,
    /// Append the entry to this `.properties` file (created if missing)
    #[arg(long)]
    append: Option<PathBuf>,
    /// Emit JSON suitable for CI
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct ParseArgs {
    /// `.properties` file to read
    file: PathBuf,
    /// Emit JSON suitable for CI
    #[arg(long)]
    json: bool,
}

fn main() {
    let cli = Cli::parse();
    let exit_code = match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{:#}", err);
            2
        }
    };

    std::process::exit(exit_code);
}

fn run(cli: Cli) -> Result<i32> {
    let (config, diagnostics) = load_config(&cli)?;
    nova_config::init_tracing(&config.logging);
    report_config_diagnostics(&diagnostics);

    match cli.command {
        Command::Decode(args) => {
            let literal = read_literal(&args.source)?;
            let value = match string_literal_to_properties_value(&literal) {
                Ok(value) => value,
                Err(err) => return report_invalid_literal(&err, args.json),
            };
            if args.json {
                print_json(&serde_json::json!({ "value": value }))?;
            } else {
                print!("{value}");
            }
            Ok(0)
        }
        Command::Entry(args) => {
            let literal = read_literal(&args.source)?;
            let value = match string_literal_to_properties_value(&literal) {
                Ok(value) => value,
                Err(err) => return report_invalid_literal(&err, args.json),
            };
            let options = config.properties.write_options();
            let entry = format_entry(&args.key, &value, &options);

            if let Some(path) = &args.append {
                let existing = read_existing(path)?;
                let updated = append_entry(&existing, &args.key, &value, &options);
                std::fs::write(path, updated)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                tracing::info!(
                    target = "nova.cli",
                    key = %args.key,
                    path = %path.display(),
                    "appended property entry"
                );
            }

            if args.json {
                print_json(&EntryOutput {
                    key: &args.key,
                    value: &value,
                    entry: &entry,
                    file: args.append.as_deref(),
                })?;
            } else if let Some(path) = &args.append {
                println!("appended {} to {}", args.key, path.display());
            } else {
                print!("{entry}");
            }
            Ok(0)
        }
        Command::Parse(args) => {
            let text = std::fs::read_to_string(&args.file)
                .with_context(|| format!("failed to read {}", args.file.display()))?;
            let parsed = parse(&text);
            if args.json {
                let entries: Vec<_> = parsed.entries.iter().map(EntryJson::from).collect();
                print_json(&entries)?;
            } else {
                for entry in &parsed.entries {
                    println!("{} = {}", entry.key, entry.value.escape_debug());
                }
            }
            Ok(0)
        }
    }
}

fn load_config(cli: &Cli) -> Result<(NovaConfig, ConfigDiagnostics)> {
    match &cli.config {
        Some(path) => Ok(NovaConfig::load_from_path_with_diagnostics(path)?),
        None => {
            let (config, _path, diagnostics) =
                nova_config::load_for_workspace_with_diagnostics(&cli.workspace)?;
            Ok((config, diagnostics))
        }
    }
}

fn report_config_diagnostics(diagnostics: &ConfigDiagnostics) {
    for key in &diagnostics.unknown_keys {
        tracing::warn!(target = "nova.cli", key = %key, "unknown config key");
    }
    for warning in &diagnostics.warnings {
        tracing::warn!(target = "nova.cli", ?warning, "config warning");
    }
}

fn read_literal(source: &LiteralSource) -> Result<String> {
    let text = match (&source.literal, &source.file) {
        (Some(literal), _) => return Ok(literal.clone()),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        (None, None) => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read literal from stdin")?;
            buf
        }
    };
    Ok(strip_final_line_terminator(text))
}

/// Files and here-docs end with a newline that isn't part of the literal.
fn strip_final_line_terminator(mut text: String) -> String {
    if text.ends_with('\n') {
        text.pop();
    }
    if text.ends_with('\r') {
        text.pop();
    }
    text
}

fn read_existing(path: &Path) -> Result<String> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
        Err(err) => Err(err).with_context(|| format!("failed to read {}", path.display())),
    }
}

fn report_invalid_literal(err: &InvalidLiteralFormat, json: bool) -> Result<i32> {
    if json {
        print_json(&serde_json::json!({
            "error": err.to_string(),
            "span": { "start": err.span.start, "end": err.span.end },
        }))?;
    } else {
        eprintln!("error:{}..{}: {}", err.span.start, err.span.end, err);
    }
    Ok(1)
}

#[derive(Serialize)]
struct EntryOutput<'a> {
    key: &'a str,
    value: &'a str,
    entry: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    file: Option<&'a Path>,
}

#[derive(Serialize)]
struct EntryJson<'a> {
    key: &'a str,
    value: &'a str,
    key_range: [u32; 2],
    value_range: [u32; 2],
}

impl<'a> From<&'a PropertyEntry> for EntryJson<'a> {
    fn from(entry: &'a PropertyEntry) -> Self {
        EntryJson {
            key: &entry.key,
            value: &entry.value,
            key_range: [entry.key_range.start().into(), entry.key_range.end().into()],
            value_range: [
                entry.value_range.start().into(),
                entry.value_range.end().into(),
            ],
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value)?;
    println!("{out}");
    Ok(())
}
