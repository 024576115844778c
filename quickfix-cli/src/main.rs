mod config;
mod explain;

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use config::ConfigMerger;
use quickfix_core::adapters::{FsPassSource, FsWritePort};
use quickfix_core::pipeline::{
    ToolError, run_apply, run_resolve, write_apply_artifacts, write_resolve_artifacts,
};
use quickfix_core::settings::{ApplySettings, ResolveSettings};
use quickfix_domain::BatchMode;
use quickfix_fixer_catalog::{FIXER_CATALOG, list_fix_keys, lookup_fixer};
use quickfix_types::ToolInfo;
use quickfix_types::apply::ApplyStatus;
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "quickfix",
    version,
    about = "Resolves analyzer diagnostics into candidate quick-fixes."
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Resolve every diagnostic in a directory of pass files.
    Resolve(ResolveArgs),
    /// Apply one resolved fix (default: dry-run).
    Apply(ApplyArgs),
    /// Explain what a fix does and its safety class.
    Explain(ExplainArgs),
    /// List all built-in fixes with their safety classifications.
    ListFixes(ListFixesArgs),
}

#[derive(Debug, Parser)]
struct ResolveArgs {
    /// Project root holding quickfix.toml (default: current directory).
    #[arg(long, default_value = ".")]
    root: Utf8PathBuf,

    /// Directory of *.pass.json files (default: <root>/passes).
    #[arg(long)]
    input: Option<Utf8PathBuf>,

    /// Output directory for report.json and report.md (default: <root>/artifacts/quickfix).
    #[arg(long)]
    out_dir: Option<Utf8PathBuf>,

    /// Allowlist patterns for fix keys.
    #[arg(long)]
    allow: Vec<String>,

    /// Denylist patterns for fix keys.
    #[arg(long)]
    deny: Vec<String>,

    /// Resolve each pass's diagnostics in parallel.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Attach a unified diff preview to every fix.
    #[arg(long, default_value_t = false)]
    preview: bool,
}

#[derive(Debug, Parser)]
struct ApplyArgs {
    /// Project root; pass source names are relative to it.
    #[arg(long, default_value = ".")]
    root: Utf8PathBuf,

    /// Pass file the fix was resolved from.
    #[arg(long)]
    input: Utf8PathBuf,

    /// Fix id from report.json.
    #[arg(long)]
    fix: String,

    /// Output directory for apply artifacts (default: <root>/artifacts/quickfix).
    #[arg(long)]
    out_dir: Option<Utf8PathBuf>,

    /// Write the patched source. If omitted, runs a dry-run and only emits artifacts.
    #[arg(long, default_value_t = false)]
    write: bool,

    /// Allow guarded fixes to be written.
    #[arg(long, default_value_t = false)]
    allow_guarded: bool,

    /// Source sha256 recorded in report.json; apply is blocked if it changed.
    #[arg(long)]
    expect_sha256: Option<String>,
}

#[derive(Debug, Parser)]
struct ExplainArgs {
    /// Fix key or fix id (e.g. "add-lateinit", "modifier.add_lateinit").
    fix_key: String,
}

#[derive(Debug, Parser)]
struct ListFixesArgs {
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.cmd {
        Command::Resolve(args) => cmd_resolve(args),
        Command::Apply(args) => cmd_apply(args),
        Command::Explain(args) => cmd_explain(args).map_err(ToolError::from),
        Command::ListFixes(args) => cmd_list_fixes(args).map_err(ToolError::from),
    };
    match result {
        Ok(()) => ExitCode::from(0),
        Err(ToolError::PolicyBlock) => ExitCode::from(2),
        Err(e) => {
            error!("{:?}", e);
            eprintln!("error: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}

fn tool_info() -> ToolInfo {
    ToolInfo::quickfix(env!("CARGO_PKG_VERSION"))
}

fn cmd_resolve(args: ResolveArgs) -> Result<(), ToolError> {
    let root = args.root;
    let file_config = config::load_or_default(&root).context("load quickfix.toml config")?;
    let merged = ConfigMerger::new(file_config).merge_resolve_args(
        &args.allow,
        &args.deny,
        args.parallel,
        args.preview,
    );
    debug!("merged config: {:?}", merged);

    let settings = ResolveSettings {
        input_dir: args.input.unwrap_or_else(|| root.join("passes")),
        out_dir: args
            .out_dir
            .unwrap_or_else(|| root.join("artifacts").join("quickfix")),
        allow: merged.allow,
        deny: merged.deny,
        batch_mode: if merged.parallel {
            BatchMode::Parallel
        } else {
            BatchMode::Sequential
        },
        preview: merged.preview,
    };

    let source = FsPassSource::new(settings.input_dir.clone());
    let outcome = run_resolve(&settings, &source, tool_info())?;
    write_resolve_artifacts(&outcome, &settings.out_dir, &FsWritePort)?;

    let s = &outcome.report.summary;
    println!(
        "{} pass(es), {} diagnostic(s), {} fix(es) offered, {} filtered",
        s.passes, s.diagnostics, s.fixes_offered, s.fixes_filtered
    );
    info!("wrote report to {}", settings.out_dir);
    Ok(())
}

fn cmd_apply(args: ApplyArgs) -> Result<(), ToolError> {
    let root = args.root;
    let file_config = config::load_or_default(&root).context("load quickfix.toml config")?;
    let merged = ConfigMerger::new(file_config).merge_apply_args(args.allow_guarded);
    debug!("merged config: allow_guarded={}", merged.allow_guarded);

    let settings = ApplySettings {
        pass_path: args.input,
        fix: args.fix,
        out_dir: args
            .out_dir
            .unwrap_or_else(|| root.join("artifacts").join("quickfix")),
        source_root: root,
        dry_run: !args.write,
        allow_guarded: merged.allow_guarded,
        expected_sha256: args.expect_sha256,
    };

    let outcome = run_apply(&settings, &FsWritePort, tool_info())?;
    write_apply_artifacts(&outcome, &settings.out_dir, &FsWritePort)?;

    let receipt = &outcome.receipt;
    match receipt.status {
        ApplyStatus::DryRun => println!("dry-run: {} ({})", receipt.fix.title, receipt.fix.fix_id),
        ApplyStatus::Applied => println!("applied: {} ({})", receipt.fix.title, receipt.fix.fix_id),
        ApplyStatus::Blocked => println!(
            "blocked: {}",
            receipt.message.as_deref().unwrap_or("precondition failed")
        ),
    }
    if outcome.policy_block {
        return Err(ToolError::PolicyBlock);
    }
    Ok(())
}

fn cmd_explain(args: ExplainArgs) -> anyhow::Result<()> {
    let Some(fix) = lookup_fixer(&args.fix_key) else {
        anyhow::bail!(
            "Unknown fix key: '{}'\n\nAvailable fixes: {}",
            args.fix_key,
            list_fix_keys().join(", ")
        );
    };
    print!("{}", explain::render_explanation(fix));
    Ok(())
}

fn cmd_list_fixes(args: ListFixesArgs) -> anyhow::Result<()> {
    match args.format {
        OutputFormat::Text => print!("{}", explain::render_fix_table(FIXER_CATALOG)),
        OutputFormat::Json => {
            let fixes: Vec<_> = FIXER_CATALOG
                .iter()
                .map(|f| {
                    serde_json::json!({
                        "key": f.key,
                        "fix_id": f.fix_id,
                        "title": f.title,
                        "safety": f.safety,
                        "triggers": f.triggers,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&fixes)?);
        }
    }
    Ok(())
}
