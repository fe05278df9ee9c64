//! CLI entry point for fsdguard.
//!
//! This module is thin: it handles argument parsing, I/O, logging setup, and exit codes.
//! All business logic lives in the `fsdguard-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use fsdguard_app::{
    ExplainOutput, ValidateInput, load_config, parse_report_json, render_annotations,
    render_markdown, run_check_resolved, run_explain, run_validate, runtime_error_report,
    serialize_report, to_renderable, verdict_exit_code,
};
use fsdguard_settings::Overrides;
use fsdguard_types::{FsdguardReport, RepoPath};
use std::process::Command;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser, Debug)]
#[command(
    name = "fsdguard",
    version,
    about = "Feature-Sliced Design layer import guard for JS/TS projects"
)]
struct Cli {
    /// Repository root (directory containing the source root).
    #[arg(long, default_value = ".")]
    repo_root: Utf8PathBuf,

    /// Path to fsdguard config TOML, relative to the repo root.
    #[arg(long, default_value = "fsdguard.toml")]
    config: Utf8PathBuf,

    /// Override profile (strict|warn|compat).
    #[arg(long)]
    profile: Option<String>,

    /// Override scope (repo|diff).
    #[arg(long)]
    scope: Option<String>,

    /// Override maximum findings to emit.
    #[arg(long)]
    max_findings: Option<u32>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check every import in the repo and write artifacts.
    Check {
        /// In diff scope: git base revision (e.g. origin/main).
        #[arg(long)]
        base: Option<String>,
        /// In diff scope: git head revision (e.g. HEAD).
        #[arg(long)]
        head: Option<String>,

        /// Where to write the JSON report.
        #[arg(long, default_value = "artifacts/fsdguard/report.json")]
        report_out: Utf8PathBuf,

        /// Write a Markdown report alongside the JSON.
        #[arg(long)]
        write_markdown: bool,

        /// Where to write the Markdown report (if enabled).
        #[arg(long, default_value = "artifacts/fsdguard/comment.md")]
        markdown_out: Utf8PathBuf,
    },

    /// Judge a single import edge (exit 2 on violation).
    Validate {
        /// The importing file, absolute or relative to the repo root.
        #[arg(long)]
        file: String,

        /// The import specifier as written in the source.
        specifier: String,
    },

    /// Render markdown from an existing JSON report.
    Md {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/fsdguard/report.json")]
        report: Utf8PathBuf,

        /// Where to write the Markdown output (if not specified, prints to stdout).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// Render GitHub Actions annotations from an existing JSON report.
    Annotations {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/fsdguard/report.json")]
        report: Utf8PathBuf,

        /// Maximum number of annotations to emit.
        #[arg(long, default_value = "10")]
        max: usize,
    },

    /// Explain a check_id or code with remediation guidance.
    Explain {
        /// The check_id (e.g., "fsd.layer_imports") or code (e.g., "invalid_layer_import").
        identifier: String,
    },
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.cmd {
        Commands::Check {
            ref base,
            ref head,
            ref report_out,
            write_markdown,
            ref markdown_out,
        } => cmd_check(
            &cli,
            base.clone(),
            head.clone(),
            report_out.clone(),
            write_markdown,
            markdown_out.clone(),
        ),
        Commands::Validate {
            ref file,
            ref specifier,
        } => cmd_validate(&cli, file, specifier),
        Commands::Md { report, output } => cmd_md(report, output),
        Commands::Annotations { report, max } => cmd_annotations(report, max),
        Commands::Explain { identifier } => cmd_explain(&identifier),
    }
}

/// Logs go to stderr so stdout stays machine-readable; `RUST_LOG` overrides the level.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn canonical_root(cli: &Cli) -> Utf8PathBuf {
    cli.repo_root
        .canonicalize_utf8()
        .unwrap_or_else(|_| cli.repo_root.clone())
}

/// Config is optional: a missing file means defaults.
fn read_config(repo_root: &Utf8Path, config: &Utf8Path) -> String {
    let cfg_path = repo_root.join(config);
    match std::fs::read_to_string(&cfg_path) {
        Ok(text) => text,
        Err(_) => {
            tracing::debug!(path = %cfg_path, "no config file; using defaults");
            String::new()
        }
    }
}

fn cmd_check(
    cli: &Cli,
    base: Option<String>,
    head: Option<String>,
    report_out: Utf8PathBuf,
    write_markdown: bool,
    markdown_out: Utf8PathBuf,
) -> anyhow::Result<()> {
    let repo_root = canonical_root(cli);

    let result = (|| -> anyhow::Result<i32> {
        if !repo_root.exists() {
            anyhow::bail!("repo root does not exist: {}", repo_root);
        }
        let cfg_text = read_config(&repo_root, &cli.config);

        let overrides = Overrides {
            profile: cli.profile.clone(),
            scope: cli.scope.clone(),
            max_findings: cli.max_findings,
        };

        let resolved = load_config(&cfg_text, overrides).context("load config")?;

        // For diff scope, we need to get changed files via git.
        let changed_files = if resolved.effective.scope == fsdguard_domain::policy::Scope::Diff {
            let base = base.context("diff scope requires --base")?;
            let head = head.context("diff scope requires --head")?;
            Some(
                git_changed_files(&repo_root, &base, &head)
                    .context("git diff --name-only failed")?,
            )
        } else {
            None
        };

        let output = run_check_resolved(&repo_root, resolved, changed_files)?;
        if output.files_in_layer_tree == 0 {
            eprintln!(
                "fsdguard: no source files found under '{}'; nothing to check",
                output.resolved_config.effective.resolver.source_root
            );
        }

        write_report_file(&report_out, &output.report).context("write report json")?;

        if write_markdown {
            let md = render_markdown(&to_renderable(&output.report));
            write_text_file(&markdown_out, &md).context("write markdown")?;
        }

        Ok(verdict_exit_code(output.report.verdict))
    })();

    match result {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Err(err) => {
            let report = runtime_error_report(&format!("{err:#}"));
            let _ = write_report_file(&report_out, &report);
            eprintln!("fsdguard error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn cmd_validate(cli: &Cli, file: &str, specifier: &str) -> anyhow::Result<()> {
    let repo_root = canonical_root(cli);
    let cfg_text = read_config(&repo_root, &cli.config);

    let result = run_validate(ValidateInput {
        repo_root: &repo_root,
        config_text: &cfg_text,
        file,
        specifier,
    });

    match result {
        Ok(output) => {
            println!("{}", output.message());
            let code = output.exit_code();
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Err(err) => {
            eprintln!("fsdguard error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn git_changed_files(repo_root: &Utf8Path, base: &str, head: &str) -> anyhow::Result<Vec<RepoPath>> {
    let output = Command::new("git")
        .current_dir(repo_root)
        .args(["diff", "--name-only", &format!("{base}..{head}")])
        .output()
        .context("spawn git")?;

    if !output.status.success() {
        anyhow::bail!("git diff returned non-zero exit status");
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let paths = stdout
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(RepoPath::new)
        .collect::<Vec<_>>();
    tracing::debug!(changed = paths.len(), base, head, "collected changed files");

    Ok(paths)
}

fn write_report_file(path: &Utf8Path, report: &FsdguardReport) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    let data = serialize_report(report).context("serialize report")?;
    std::fs::write(path, data).with_context(|| format!("write report: {}", path))?;
    Ok(())
}

fn write_text_file(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    std::fs::write(path, text).with_context(|| format!("write text: {}", path))?;
    Ok(())
}

fn cmd_md(report_path: Utf8PathBuf, output: Option<Utf8PathBuf>) -> anyhow::Result<()> {
    let report_text = std::fs::read_to_string(&report_path)
        .with_context(|| format!("read report: {}", report_path))?;
    let report = parse_report_json(&report_text)?;
    let md = render_markdown(&to_renderable(&report));

    if let Some(out_path) = output {
        write_text_file(&out_path, &md).context("write markdown output")?;
    } else {
        print!("{}", md);
    }

    Ok(())
}

fn cmd_annotations(report_path: Utf8PathBuf, max: usize) -> anyhow::Result<()> {
    let report_text = std::fs::read_to_string(&report_path)
        .with_context(|| format!("read report: {}", report_path))?;
    let report = parse_report_json(&report_text)?;
    let annotations = render_annotations(&to_renderable(&report), max);

    for annotation in annotations {
        println!("{}", annotation);
    }

    Ok(())
}

fn cmd_explain(identifier: &str) -> anyhow::Result<()> {
    match run_explain(identifier) {
        ExplainOutput::Found(exp) => {
            print!("{}", fsdguard_app::format_explanation(&exp));
            Ok(())
        }
        ExplainOutput::NotFound {
            identifier,
            available_check_ids,
            available_codes,
        } => {
            eprint!(
                "{}",
                fsdguard_app::format_not_found(&identifier, available_check_ids, available_codes)
            );
            std::process::exit(1);
        }
    }
}
