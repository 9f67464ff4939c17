mod config;
mod explain;

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use config::ConfigMerger;
use memberorder_core::adapters::{FsDocumentSource, FsWritePort};
use memberorder_core::CancellationFlag;
use memberorder_core::pipeline::{ToolError, run_check, run_fix, write_check_artifacts};
use memberorder_core::settings::{CheckSettings, FixSettings};
use memberorder_render::{render_check_md, render_check_text, render_fix_md};
use memberorder_types::report::ToolInfo;
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "memberorder",
    version,
    about = "Checks and fixes the declaration order of class members."
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Report the first out-of-order member of every container.
    Check(CheckArgs),
    /// Reorder and respace violating containers (default: dry-run).
    Fix(FixArgs),
    /// Print the canonical member order and spacing rules.
    Explain,
}

#[derive(Debug, Parser)]
struct CheckArgs {
    /// Directory scanned for `*.members.json` documents (default: current directory).
    #[arg(long, default_value = ".")]
    root: Utf8PathBuf,

    /// Output format.
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Write check.json and check.md to this directory.
    #[arg(long)]
    out_dir: Option<Utf8PathBuf>,

    /// Additional base type to ignore, as `Namespace.Type`. Repeatable.
    #[arg(long = "ignore-base", value_name = "NS.TYPE")]
    ignore_base: Vec<String>,
}

#[derive(Debug, Parser)]
struct FixArgs {
    /// Directory scanned for `*.members.json` documents (default: current directory).
    #[arg(long, default_value = ".")]
    root: Utf8PathBuf,

    /// Write fixed sources to disk. If omitted, prints the patch only.
    #[arg(long, default_value_t = false)]
    apply: bool,

    /// Do not write `.memberorder.bak` backups.
    #[arg(long, default_value_t = false)]
    no_backups: bool,

    /// Write fix.json, fix.md and patch.diff to this directory.
    #[arg(long)]
    out_dir: Option<Utf8PathBuf>,

    /// Additional base type to ignore, as `Namespace.Type`. Repeatable.
    #[arg(long = "ignore-base", value_name = "NS.TYPE")]
    ignore_base: Vec<String>,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Md,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.cmd {
        Command::Check(args) => cmd_check(args),
        Command::Fix(args) => cmd_fix(args),
        Command::Explain => {
            print!("{}", explain::render_explanation());
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::from(0),
        Err(e) => {
            if let ToolError::Internal(err) = &e {
                error!("{:?}", err);
            } else {
                debug!("{}", e);
            }
            ExitCode::from(e.exit_code())
        }
    }
}

fn tool_info() -> ToolInfo {
    ToolInfo {
        name: "memberorder".to_string(),
        version: Some(env!("CARGO_PKG_VERSION").to_string()),
    }
}

fn cmd_check(args: CheckArgs) -> Result<(), ToolError> {
    let file_config = config::load_or_default(&args.root).context("load memberorder.toml")?;
    let merged = ConfigMerger::new(file_config).merge(&args.ignore_base, false);
    debug!(ignored = ?merged.policy.ignored_base_types, "merged config");

    let settings = CheckSettings {
        policy: merged.policy,
    };
    let source = FsDocumentSource::new(args.root);
    let outcome = run_check(&settings, &source, &CancellationFlag::new(), tool_info())?;
    if let Some(out_dir) = &args.out_dir {
        write_check_artifacts(&outcome, out_dir, &FsWritePort)?;
    }

    match args.format {
        OutputFormat::Text => print!("{}", render_check_text(&outcome.report)),
        OutputFormat::Md => print!("{}", render_check_md(&outcome.report)),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&outcome.report).context("serialize check report")?
        ),
    }

    if outcome.policy_block {
        return Err(ToolError::PolicyBlock(format!(
            "{} member(s) out of order",
            outcome.report.summary.findings
        )));
    }
    Ok(())
}

fn cmd_fix(args: FixArgs) -> Result<(), ToolError> {
    let file_config = config::load_or_default(&args.root).context("load memberorder.toml")?;
    let merged = ConfigMerger::new(file_config).merge(&args.ignore_base, args.no_backups);

    let settings = FixSettings {
        repo_root: args.root.clone(),
        out_dir: args.out_dir,
        policy: merged.policy,
        dry_run: !args.apply,
        backup_enabled: merged.backup_enabled,
        backup_suffix: merged.backup_suffix,
    };
    let source = FsDocumentSource::new(args.root);
    let outcome = run_fix(
        &settings,
        &source,
        &FsWritePort,
        &CancellationFlag::new(),
        tool_info(),
    )?;

    if settings.dry_run {
        print!("{}", outcome.patch);
    }
    eprint!("{}", render_fix_md(&outcome.report));
    Ok(())
}
