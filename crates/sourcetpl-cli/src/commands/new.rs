//! Implementation of the `source-tpl new` command.
//!
//! Responsibility: translate CLI arguments and config defaults into a
//! `ProjectRequest`, call the core scaffold service, and display results.
//! No business logic lives here.

use std::iter;
use std::path::{Path, PathBuf};
use std::process::Command;

use serde::Serialize;
use tracing::{debug, info, instrument};

use sourcetpl_adapters::{BuiltinCatalog, LocalFilesystem, OverlayCatalog};
use sourcetpl_core::{
    application::{ScaffoldReport, ScaffoldService, TemplateCatalog},
    domain::{FileRegistry, Language as CoreLanguage, ProjectKind as CoreKind, ProjectRequest},
};

use crate::{
    cli::{NewArgs, global::GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Last resort when no author can be found.
const FALLBACK_AUTHOR: &str = "unknown";

/// Execute the `source-tpl new` command.
///
/// Dispatch sequence:
/// 1. Merge CLI flags with config defaults into a `ProjectRequest`
/// 2. Pick the template catalog (builtin, or overrides from config)
/// 3. Early-exit with the plan if `--dry-run`
/// 4. Scaffold via `ScaffoldService`
/// 5. Print the report
#[instrument(skip_all, fields(name = %args.name))]
pub fn execute(
    args: NewArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    // 1. Build request (validation happens in the core builder)
    let request = build_request(&args, &config)?;
    debug!(
        language = %request.language(),
        kind = %request.kind(),
        packaged = request.is_packaged(),
        git = request.with_git(),
        author = request.author(),
        "Request resolved"
    );

    // 2. Create adapters
    let service = ScaffoldService::new(catalog(&config)?, Box::new(LocalFilesystem::new()))
        .with_overwrite(args.force);
    let output_dir = args.output.clone().unwrap_or_else(|| PathBuf::from("."));

    // 3. Dry run: describe but do not write.
    if args.dry_run {
        let registry = service
            .plan(&request)
            .with_cli_context(|| "planning templates")?;
        return show_plan(&registry, &output_dir, &output);
    }

    // 4. Scaffold
    if !output.is_json() {
        output.header(&format!("Creating {request}..."))?;
    }
    info!(output_dir = %output_dir.display(), "Scaffold started");

    let report = service
        .scaffold(&request, &output_dir)
        .with_cli_context(|| "scaffolding")?;

    // 5. Report
    if output.is_json() {
        output.json(&report)?;
        return Ok(());
    }
    show_report(&request, &report, &global, &output)
}

// ── Request construction ──────────────────────────────────────────────────────

/// Merge flags over config defaults.
///
/// Config `git`/`package` defaults only apply to directory projects, where
/// they are valid; an explicit flag is always passed through so the core can
/// reject it for single files.
pub fn build_request(args: &NewArgs, config: &AppConfig) -> CliResult<ProjectRequest> {
    let defaults = &config.defaults;

    let kind: CoreKind = args
        .kind
        .or(defaults.kind)
        .map(Into::into)
        .unwrap_or(CoreKind::Application);
    let language: CoreLanguage = args
        .language
        .or(defaults.language)
        .map(Into::into)
        .unwrap_or(CoreLanguage::C);

    let project_defaults = !kind.is_single_file();
    let packaged = args.package || (project_defaults && defaults.package);
    let git = args.git || (project_defaults && defaults.git);

    // git and $USER are only consulted when the earlier sources are blank
    let author = resolve_author(
        [args.author.clone(), defaults.author.clone()]
            .into_iter()
            .chain(iter::once_with(git_user_name))
            .chain(iter::once_with(|| std::env::var("USER").ok())),
    );

    let mut builder = ProjectRequest::builder(args.name.clone())
        .kind(kind)
        .language(language)
        .packaged(packaged)
        .git(git)
        .author(author)
        .sources(args.sources.as_deref().map(split_list).unwrap_or_default())
        .headers(args.headers.as_deref().map(split_list).unwrap_or_default());

    if let Some(compiler) = args.compiler.clone().or_else(|| defaults.compiler.clone()) {
        builder = builder.compiler(compiler);
    }
    if let Some(content) = &args.content {
        builder = builder.content(content.clone());
    }

    builder
        .build()
        .map_err(|e| CliError::Core(e.into()))
}

/// First non-blank candidate, trimmed, or `unknown`. Stops at the first hit.
fn resolve_author<I>(candidates: I) -> String
where
    I: IntoIterator<Item = Option<String>>,
{
    candidates
        .into_iter()
        .flatten()
        .map(|name| name.trim().to_string())
        .find(|name| !name.is_empty())
        .unwrap_or_else(|| FALLBACK_AUTHOR.to_string())
}

/// `git config user.name`, if git is installed and the key is set.
fn git_user_name() -> Option<String> {
    let out = Command::new("git")
        .args(["config", "user.name"])
        .output()
        .inspect_err(|e| debug!(error = %e, "git not available for author lookup"))
        .ok()?;
    if !out.status.success() {
        return None;
    }
    String::from_utf8(out.stdout).ok()
}

/// Split a user list on `;`, `,`, `|` or whitespace, dropping empty items.
pub fn split_list(list: &str) -> Vec<String> {
    list.split(|c: char| matches!(c, ';' | ',' | '|') || c.is_whitespace())
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn catalog(config: &AppConfig) -> CliResult<Box<dyn TemplateCatalog>> {
    match config.template_dir() {
        Some(dir) => {
            let overlay = OverlayCatalog::load(dir)?;
            debug!(
                directory = %dir.display(),
                overrides = overlay.override_count(),
                "Using template overrides"
            );
            Ok(Box::new(overlay))
        }
        None => Ok(Box::new(BuiltinCatalog::new())),
    }
}

// ── UI helpers ────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct PlannedFile {
    path: PathBuf,
    executable: bool,
    bytes: usize,
}

fn planned_files(registry: &FileRegistry, output_dir: &Path) -> Vec<PlannedFile> {
    let root = output_dir.join(registry.root());
    registry
        .files()
        .map(|file| PlannedFile {
            path: root.join(file.relative_path()),
            executable: file.is_executable(),
            bytes: file.contents().len(),
        })
        .collect()
}

fn show_plan(registry: &FileRegistry, output_dir: &Path, out: &OutputManager) -> CliResult<()> {
    let files = planned_files(registry, output_dir);

    if out.is_json() {
        out.json(&files)?;
        return Ok(());
    }

    out.info(&format!(
        "Dry run: would create {} file(s) in {}",
        files.len(),
        output_dir.join(registry.root()).display()
    ))?;
    for file in &files {
        let marker = if file.executable { " (executable)" } else { "" };
        out.print(&format!("  {}{marker}", file.path.display()))?;
    }
    Ok(())
}

fn show_report(
    request: &ProjectRequest,
    report: &ScaffoldReport,
    global: &GlobalArgs,
    out: &OutputManager,
) -> CliResult<()> {
    out.success(&format!(
        "Created {} file(s) for '{}'",
        report.files.len(),
        request.name()
    ))?;

    if global.verbose > 0 {
        for file in &report.files {
            out.print(&format!("  {}", file.display()))?;
        }
    }

    if let Some(root) = request.root_dir() {
        out.print("")?;
        out.print("Next steps:")?;
        out.print(&format!("  cd {}", root.display()))?;
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
