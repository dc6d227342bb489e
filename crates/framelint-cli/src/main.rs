use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use framelint_core::PacketError;
use glob::glob;

/// Default cap on the bytes read from an input source. Harness policy, not a
/// decoder requirement.
const DEFAULT_READ_CAP: u64 = 8192;

const STDIN_LABEL: &str = "<stdin>";

const EXIT_OK: u8 = 0;
const EXIT_INVALID_CONTENT: u8 = 1;
const EXIT_TOO_SHORT: u8 = 2;
const EXIT_ALLOCATION_FAILED: u8 = 3;
const EXIT_USAGE: u8 = 4;

#[derive(Parser, Debug)]
#[command(name = "framelint")]
#[command(version)]
#[command(long_version = concat!(
    env!("CARGO_PKG_VERSION"),
    " (", env!("FRAMELINT_BUILD_COMMIT"), " ", env!("FRAMELINT_BUILD_DATE"), ")"
))]
#[command(
    about = "Validator for length-prefixed printable-ASCII packets.",
    long_about = None,
    after_help = "Examples:\n  framelint packet check capture.bin -o report.json\n  framelint packet check --stdin --stdout < capture.bin\n  framelint packet lint capture.bin --stdout --strict"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Operations on single length-prefixed packets.
    Packet {
        #[command(subcommand)]
        command: PacketCommands,
    },
}

#[derive(Subcommand, Debug)]
enum PacketCommands {
    /// Check one packet and generate a versioned JSON report.
    #[command(alias = "lint")]
    #[command(
        after_help = "Examples:\n  framelint packet check capture.bin -o report.json\n  framelint packet check --stdin --stdout < capture.bin\n  framelint packet lint capture.bin --stdout --strict"
    )]
    Check {
        /// Path to a packet file (glob patterns must match exactly one file)
        #[arg(required_unless_present = "stdin")]
        input: Option<PathBuf>,

        /// Read the packet from standard input
        #[arg(long, conflicts_with = "input")]
        stdin: bool,

        /// Output report path (JSON)
        #[arg(short = 'o', long, required_unless_present = "stdout")]
        report: Option<PathBuf>,

        /// Write JSON report to stdout
        #[arg(long, conflicts_with = "report")]
        stdout: bool,

        /// Maximum number of input bytes handed to the decoder
        #[arg(long, default_value_t = DEFAULT_READ_CAP)]
        max_bytes: u64,

        /// Pretty-print JSON output
        #[arg(long, conflicts_with = "compact")]
        pretty: bool,

        /// Compact JSON output (default)
        #[arg(long)]
        compact: bool,

        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,

        /// Fail when the declared length exceeds the available bytes
        #[arg(long)]
        strict: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Packet { command } => match command {
            PacketCommands::Check {
                input,
                stdin,
                report,
                stdout,
                max_bytes,
                pretty,
                compact,
                quiet,
                strict,
            } => cmd_packet_check(
                input, stdin, report, stdout, max_bytes, pretty, compact, quiet, strict,
            ),
        },
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(EXIT_USAGE)
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

fn cmd_packet_check(
    input: Option<PathBuf>,
    stdin: bool,
    report: Option<PathBuf>,
    stdout: bool,
    max_bytes: u64,
    pretty: bool,
    compact: bool,
    quiet: bool,
    strict: bool,
) -> Result<u8, CliError> {
    let (label, data) = if stdin {
        (STDIN_LABEL.to_string(), read_stdin_capped(max_bytes)?)
    } else {
        let input = input.ok_or_else(|| {
            CliError::new(
                "missing input path",
                Some("pass a file path or use --stdin".to_string()),
            )
        })?;
        let resolved = resolve_input_path(&input)?;
        validate_input_file(&resolved)?;
        let data = read_file_capped(&resolved, max_bytes)?;
        (resolved.display().to_string(), data)
    };

    let report = if stdout {
        None
    } else {
        Some(report.ok_or_else(|| {
            CliError::new(
                "missing output path",
                Some("use -o/--report or --stdout".to_string()),
            )
        })?)
    };

    let result = framelint_core::decode_packet(&data);
    let rep = framelint_core::report_for(&label, data.len() as u64, &result);
    let json = serialize_report(&rep, pretty, compact)?;

    if let Some(report) = report {
        if let Some(parent) = report.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create output directory: {}", parent.display())
                })?;
            }
        }
        fs::write(&report, json)
            .with_context(|| format!("Failed to write report: {}", report.display()))?;
        if !quiet {
            eprintln!("OK: report written -> {}", report.display());
        }
    } else {
        print!("{}", json);
    }

    let code = match &result {
        Ok(summary) => {
            if strict && summary.truncated {
                eprintln!(
                    "error: truncated packet: declared {} bytes, only {} available",
                    summary.declared_len, summary.effective_len
                );
                EXIT_TOO_SHORT
            } else {
                EXIT_OK
            }
        }
        Err(err) => {
            eprintln!("error: {}", err);
            match err {
                PacketError::InvalidContent { .. } => EXIT_INVALID_CONTENT,
                PacketError::TooShort { .. } => EXIT_TOO_SHORT,
                PacketError::AllocationFailed { .. } => EXIT_ALLOCATION_FAILED,
            }
        }
    };
    Ok(code)
}

fn serialize_report(
    rep: &framelint_core::DecodeReport,
    pretty: bool,
    compact: bool,
) -> Result<String, CliError> {
    if pretty && compact {
        return Err(CliError::new(
            "cannot use --pretty and --compact together",
            Some("choose one output format".to_string()),
        ));
    }
    if pretty {
        serde_json::to_string_pretty(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    } else {
        serde_json::to_string(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    }
}

fn read_stdin_capped(cap: u64) -> Result<Vec<u8>, CliError> {
    let mut data = Vec::new();
    std::io::stdin()
        .lock()
        .take(cap)
        .read_to_end(&mut data)
        .context("Failed to read standard input")?;
    Ok(data)
}

fn read_file_capped(path: &Path, cap: u64) -> Result<Vec<u8>, CliError> {
    let file = fs::File::open(path)
        .with_context(|| format!("Failed to read input file: {}", path.display()))?;
    let mut data = Vec::new();
    file.take(cap)
        .read_to_end(&mut data)
        .with_context(|| format!("Failed to read input file: {}", path.display()))?;
    Ok(data)
}

fn validate_input_file(input: &Path) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("pass a packet file or use --stdin".to_string()),
        ));
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("pass a packet file or use --stdin".to_string()),
        ));
    }
    Ok(())
}

fn resolve_input_path(input: &Path) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.to_path_buf());
    }

    let mut matches = Vec::new();
    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    if matches.is_empty() {
        return Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern".to_string()),
        ));
    }
    if matches.len() > 1 {
        let listed = matches
            .iter()
            .take(3)
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let suffix = if matches.len() > 3 { ", ..." } else { "" };
        return Err(CliError::new(
            format!(
                "multiple files match pattern '{}' ({} matches); matches: {}{}",
                pattern,
                matches.len(),
                listed,
                suffix
            ),
            Some("pass a single packet file, or run once per file".to_string()),
        ));
    }

    Ok(matches.remove(0))
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
