mod error;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use chrono::Utc;
use clap::{Parser, Subcommand};
use diffy::PatchFormatter;
use error::CliError;
use fs_err as fs;
use sha2::{Digest, Sha256};
use sourcefix_check::{check_contract, scan_risks};
use sourcefix_edit::AutofixEngine;
use sourcefix_endpoints::advise;
use sourcefix_patterns::PatternSet;
use sourcefix_render::{render_endpoints_text, render_fix_text, render_report_text};
use sourcefix_types::buffer::SourceBuffer;
use sourcefix_types::report::{FixReport, RunInfo, SourceReport, ToolInfo};
use std::io::Write;
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "sourcefix",
    version,
    about = "Contract checker and endpoint repair tool for comic-source plugin scripts."
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate a plugin source against the contract and conventions.
    Check(CheckArgs),
    /// List endpoint candidates with advisory suggestions (read-only).
    Endpoints(EndpointsArgs),
    /// Apply the autofix rewrites; nothing is persisted without an explicit
    /// decision (--output, --yes, or the confirmation prompt).
    Fix(FixArgs),
}

#[derive(Debug, Parser)]
struct CheckArgs {
    /// Plugin source file to validate.
    file: Utf8PathBuf,

    /// Output format (text, json).
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Parser)]
struct EndpointsArgs {
    /// Plugin source file to scan.
    file: Utf8PathBuf,

    /// Output format (text, json).
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Parser)]
struct FixArgs {
    /// Plugin source file to fix.
    file: Utf8PathBuf,

    /// Write the fixed buffer here instead of overwriting the input.
    #[arg(long)]
    output: Option<Utf8PathBuf>,

    /// Overwrite the input file without the confirmation prompt.
    #[arg(long, default_value_t = false)]
    yes: bool,

    /// Output format (text, json). JSON output never prompts; pass --yes or
    /// --output to persist.
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    match real_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn real_main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Check(args) => cmd_check(args),
        Command::Endpoints(args) => cmd_endpoints(args),
        Command::Fix(args) => cmd_fix(args),
    }
}

fn cmd_check(args: CheckArgs) -> Result<(), CliError> {
    let buffer = read_buffer(&args.file)?;
    let patterns = PatternSet::new();
    let started = Utc::now();

    let mut findings = check_contract(&patterns, &buffer);
    findings.extend(scan_risks(&patterns, &buffer));
    debug!(count = findings.len(), "collected findings");

    let mut report = SourceReport::from_findings(tool_info(), buffer.path.as_str(), findings);
    report.run = RunInfo {
        started_at: Some(started),
        ended_at: Some(Utc::now()),
    };

    match args.format {
        OutputFormat::Text => print!("{}", render_report_text(&report)),
        OutputFormat::Json => print_json(&report)?,
    }

    if report.valid {
        Ok(())
    } else {
        Err(CliError::Invalid {
            file: report.file.clone(),
            errors: report.verdict.counts.errors,
        })
    }
}

fn cmd_endpoints(args: EndpointsArgs) -> Result<(), CliError> {
    let buffer = read_buffer(&args.file)?;
    let patterns = PatternSet::new();

    let advice = advise(&patterns, &buffer);
    debug!(count = advice.len(), "extracted endpoint candidates");

    match args.format {
        OutputFormat::Text => print!("{}", render_endpoints_text(buffer.path.as_str(), &advice)),
        OutputFormat::Json => print_json(&serde_json::json!({
            "file": buffer.path.as_str(),
            "endpoints": advice,
        }))?,
    }

    Ok(())
}

fn cmd_fix(args: FixArgs) -> Result<(), CliError> {
    let buffer = read_buffer(&args.file)?;
    let patterns = PatternSet::new();
    let engine = AutofixEngine::new(&patterns);
    let started = Utc::now();

    let outcome = engine.autofix(&buffer);

    let mut report = FixReport::new(
        tool_info(),
        buffer.path.as_str(),
        outcome.changed,
        outcome.records.clone(),
    );
    report.run = RunInfo {
        started_at: Some(started),
        ended_at: Some(Utc::now()),
    };
    report.sha256_before = Some(sha256_hex(buffer.contents.as_bytes()));
    report.sha256_after = Some(sha256_hex(outcome.buffer.contents.as_bytes()));

    match args.format {
        OutputFormat::Text => {
            print!("{}", render_fix_text(&report));
            if outcome.changed {
                print!(
                    "\n{}",
                    render_patch(&buffer.contents, &outcome.buffer.contents, args.file.as_str())
                );
            }
        }
        OutputFormat::Json => print_json(&report)?,
    }

    if !outcome.changed {
        return Ok(());
    }

    // Persistence only follows an explicit caller decision.
    if let Some(output) = &args.output {
        fs::write(output, &outcome.buffer.contents).with_context(|| format!("write {}", output))?;
        info!("wrote fixed source to {}", output);
    } else if args.yes {
        fs::write(&args.file, &outcome.buffer.contents)
            .with_context(|| format!("write {}", args.file))?;
        info!("updated {} in place", args.file);
    } else if matches!(args.format, OutputFormat::Text) && confirm_overwrite(&args.file)? {
        fs::write(&args.file, &outcome.buffer.contents)
            .with_context(|| format!("write {}", args.file))?;
        info!("updated {} in place", args.file);
    } else {
        info!("changes not saved");
    }

    Ok(())
}

fn read_buffer(path: &Utf8Path) -> Result<SourceBuffer, CliError> {
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path))?;
    Ok(SourceBuffer::new(path.to_owned(), contents))
}

fn confirm_overwrite(path: &Utf8Path) -> Result<bool, CliError> {
    print!("Overwrite {}? (y/N): ", path);
    std::io::stdout().flush().context("flush stdout")?;

    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .context("read confirmation")?;
    Ok(line.trim().eq_ignore_ascii_case("y"))
}

fn render_patch(before: &str, after: &str, path: &str) -> String {
    let mut out = String::new();
    let formatter = PatchFormatter::new();

    out.push_str(&format!("diff --git a/{0} b/{0}\n", path));
    out.push_str(&format!("--- a/{0}\n+++ b/{0}\n", path));

    let patch = diffy::create_patch(before, after);
    out.push_str(&formatter.fmt_patch(&patch).to_string());
    if !out.ends_with('\n') {
        out.push('\n');
    }

    out
}

fn print_json<T: serde::Serialize>(v: &T) -> Result<(), CliError> {
    let s = serde_json::to_string_pretty(v).context("serialize json")?;
    println!("{s}");
    Ok(())
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

fn tool_info() -> ToolInfo {
    ToolInfo {
        name: "sourcefix".to_string(),
        version: Some(env!("CARGO_PKG_VERSION").to_string()),
    }
}
