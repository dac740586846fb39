use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use glob::glob;
use tracing_subscriber::EnvFilter;

use pcapview_core::{
    AddressCount, AnalysisError, CaptureResult, DecodeOptions, HexCase, HexDump,
    decode_capture_file, format_bytes, timestamp_to_rfc3339,
};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("PCAPVIEW_BUILD_COMMIT"),
    " ",
    env!("PCAPVIEW_BUILD_DATE"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "pcapview")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Offline decoder for libpcap capture files (Ethernet / IPv4 / TCP / UDP).",
    long_about = None,
    after_help = "Examples:\n  pcapview pcap decode capture.pcap -o records.json\n  pcapview pcap summary capture.pcap --top 5\n  pcapview pcap hexdump capture.pcap --frame 0"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG wins
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Operations on libpcap inputs.
    Pcap {
        #[command(subcommand)]
        command: PcapCommands,
    },
}

#[derive(Subcommand, Debug)]
enum PcapCommands {
    /// Decode every frame and write records plus summary as JSON.
    Decode {
        /// Path to a .pcap file (a glob matching one file is accepted)
        input: PathBuf,

        /// Output path (JSON)
        #[arg(short = 'o', long, required_unless_present = "stdout")]
        report: Option<PathBuf>,

        /// Write JSON to stdout
        #[arg(long, conflicts_with = "report")]
        stdout: bool,

        /// Pretty-print JSON output
        #[arg(long, conflicts_with = "compact")]
        pretty: bool,

        /// Compact JSON output (default)
        #[arg(long)]
        compact: bool,

        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,

        #[command(flatten)]
        decode: DecodeArgs,
    },
    /// Print totals, protocol distribution and top talkers.
    Summary {
        /// Path to a .pcap file
        input: PathBuf,

        /// Number of top sources / destinations to list
        #[arg(long, default_value_t = pcapview_core::DEFAULT_TOP_N)]
        top: usize,
    },
    /// Print an offset / hex / ASCII dump of the file or of one frame.
    Hexdump {
        /// Path to a .pcap file
        input: PathBuf,

        /// Dump only this decoded frame (0-based)
        #[arg(long)]
        frame: Option<usize>,

        /// First row to print
        #[arg(long, default_value_t = 0)]
        start_row: usize,

        /// Number of rows to print (default: all remaining)
        #[arg(long)]
        rows: Option<usize>,
    },
}

#[derive(clap::Args, Debug)]
struct DecodeArgs {
    /// Number of top sources / destinations in the summary
    #[arg(long, default_value_t = pcapview_core::DEFAULT_TOP_N)]
    top: usize,

    /// Omit the hex rendering of the whole input
    #[arg(long)]
    no_full_hex: bool,

    /// Render hex in uppercase
    #[arg(long)]
    upper_hex: bool,
}

impl DecodeArgs {
    fn options(&self) -> DecodeOptions {
        DecodeOptions {
            include_full_hex: !self.no_full_hex,
            top_n: self.top,
            hex_case: if self.upper_hex {
                HexCase::Upper
            } else {
                HexCase::Lower
            },
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Pcap { command } => match command {
            PcapCommands::Decode {
                input,
                report,
                stdout,
                pretty,
                compact,
                quiet,
                decode,
            } => cmd_pcap_decode(DecodeRequest {
                input,
                report,
                stdout,
                pretty,
                compact,
                quiet,
                options: decode.options(),
            }),
            PcapCommands::Summary { input, top } => cmd_pcap_summary(input, top),
            PcapCommands::Hexdump {
                input,
                frame,
                start_row,
                rows,
            } => cmd_pcap_hexdump(input, frame, start_row, rows),
        },
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

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with_writer(std::io::stderr)
        .init();
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
        CliError::new(format!("{err:#}"), None)
    }
}

struct DecodeRequest {
    input: PathBuf,
    report: Option<PathBuf>,
    stdout: bool,
    pretty: bool,
    compact: bool,
    quiet: bool,
    options: DecodeOptions,
}

fn cmd_pcap_decode(request: DecodeRequest) -> Result<(), CliError> {
    let resolved_input = resolve_input_path(&request.input)?;
    validate_input_file(&resolved_input)?;

    let report = match (request.stdout, request.report) {
        (true, _) => None,
        (false, Some(report)) => Some(report),
        (false, None) => {
            return Err(CliError::new(
                "missing output path",
                Some("use -o/--report or --stdout".to_string()),
            ));
        }
    };
    if let Some(report_path) = report.as_ref() {
        ensure_distinct_output(&resolved_input, report_path)?;
    }

    let result = decode_input(&resolved_input, &request.options)?;
    let json = serialize_result(&result, request.pretty, request.compact)?;

    let Some(report) = report else {
        print!("{}", json);
        return Ok(());
    };

    if let Some(parent) = report.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }
    fs::write(&report, json)
        .with_context(|| format!("Failed to write report: {}", report.display()))?;

    if !request.quiet {
        eprintln!(
            "OK: {} records written -> {}",
            result.records.len(),
            report.display()
        );
    }
    Ok(())
}

fn cmd_pcap_summary(input: PathBuf, top: usize) -> Result<(), CliError> {
    let resolved_input = resolve_input_path(&input)?;
    validate_input_file(&resolved_input)?;

    let options = DecodeOptions {
        include_full_hex: false,
        top_n: top,
        ..DecodeOptions::default()
    };
    let result = decode_input(&resolved_input, &options)?;
    print!("{}", render_summary(&result));
    Ok(())
}

fn cmd_pcap_hexdump(
    input: PathBuf,
    frame: Option<usize>,
    start_row: usize,
    rows: Option<usize>,
) -> Result<(), CliError> {
    let resolved_input = resolve_input_path(&input)?;
    validate_input_file(&resolved_input)?;

    let dump = match frame {
        None => {
            let data = fs::read(&resolved_input).with_context(|| {
                format!("Failed to read input file: {}", resolved_input.display())
            })?;
            print_rows(&HexDump::new(&data), start_row, rows);
            return Ok(());
        }
        Some(index) => {
            let options = DecodeOptions {
                include_full_hex: false,
                ..DecodeOptions::default()
            };
            let result = decode_input(&resolved_input, &options)?;
            let record = result.records.get(index).ok_or_else(|| {
                CliError::new(
                    format!(
                        "frame {} out of range ({} decoded frames)",
                        index,
                        result.records.len()
                    ),
                    Some("frame indices start at 0".to_string()),
                )
            })?;
            HexDump::from_hex_str(&record.raw_hex).context("hex rendering failed")?
        }
    };

    print_rows(&dump, start_row, rows);
    Ok(())
}

fn print_rows(dump: &HexDump<'_>, start_row: usize, rows: Option<usize>) {
    let end = match rows {
        Some(count) => start_row.saturating_add(count),
        None => dump.row_count(),
    };
    print!("{}", dump.render_rows(start_row..end));
}

fn decode_input(input: &Path, options: &DecodeOptions) -> Result<CaptureResult, CliError> {
    tracing::debug!(
        input = %input.display(),
        top_n = options.top_n,
        full_hex = options.include_full_hex,
        hex_case = ?options.hex_case,
        "decoding capture"
    );
    decode_capture_file(input, options).map_err(|err| match err {
        AnalysisError::Capture(err) => CliError::new(
            err.to_string(),
            Some("expected a libpcap capture (not pcapng)".to_string()),
        ),
        AnalysisError::Io(err) => CliError::new(
            format!("Failed to read input file: {}: {}", input.display(), err),
            None,
        ),
    })
}

fn render_summary(result: &CaptureResult) -> String {
    let summary = &result.summary;
    let mut out = String::new();
    out.push_str(&format!("Packets: {}\n", summary.total_packets));
    out.push_str(&format!("Bytes: {}\n", format_bytes(summary.total_bytes)));

    let first = result.records.first().and_then(|r| timestamp_to_rfc3339(r.timestamp));
    let last = result.records.last().and_then(|r| timestamp_to_rfc3339(r.timestamp));
    if let (Some(first), Some(last)) = (first, last) {
        out.push_str(&format!("Time: {} .. {}\n", first, last));
    }

    out.push_str("Protocols:\n");
    for (label, count) in &summary.protocols {
        out.push_str(&format!("  {:<16} {}\n", label, count));
    }
    push_ranking(&mut out, "Top sources:", &summary.top_sources);
    push_ranking(&mut out, "Top destinations:", &summary.top_destinations);
    out
}

fn push_ranking(out: &mut String, title: &str, entries: &[AddressCount]) {
    out.push_str(title);
    out.push('\n');
    for entry in entries {
        out.push_str(&format!("  {:<24} {}\n", entry.address, entry.count));
    }
}

fn serialize_result(
    result: &CaptureResult,
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
        serde_json::to_string_pretty(result)
            .context("JSON serialization failed")
            .map_err(Into::into)
    } else {
        serde_json::to_string(result)
            .context("JSON serialization failed")
            .map_err(Into::into)
    }
}

fn ensure_distinct_output(input: &Path, report_path: &Path) -> Result<(), CliError> {
    let input_abs = fs::canonicalize(input)
        .with_context(|| format!("Failed to resolve input path: {}", input.display()))?;
    let report_dir = match report_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::canonicalize(parent),
        _ => fs::canonicalize("."),
    };
    // A missing output directory cannot contain the input.
    let Ok(report_dir) = report_dir else {
        return Ok(());
    };
    let file_name = report_path
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("Invalid report path: {}", report_path.display()))?;
    if report_dir.join(file_name) == input_abs {
        return Err(CliError::new(
            format!(
                "report path must differ from input: {}",
                report_path.display()
            ),
            Some("choose a different output path".to_string()),
        ));
    }
    Ok(())
}

fn validate_input_file(input: &Path) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("use a .pcap file".to_string()),
        ));
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("use a .pcap file".to_string()),
        ));
    }
    let ext = input
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    if ext != "pcap" {
        return Err(CliError::new(
            format!("unsupported input format '{}'", input.display()),
            Some("expected a .pcap file".to_string()),
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

    match matches.len() {
        0 => Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern; expected a .pcap file".to_string()),
        )),
        1 => Ok(matches.remove(0)),
        count => {
            let mut message = format!(
                "multiple files match pattern '{}' ({} matches); matches: {}",
                pattern,
                count,
                matches
                    .iter()
                    .take(3)
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            if count > 3 {
                message.push_str(", ...");
            }
            Err(CliError::new(
                message,
                Some("pass a single capture file, or run once per file".to_string()),
            ))
        }
    }
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
