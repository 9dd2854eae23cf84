//! Implementation of the `source-tpl list` command.
//!
//! Kinds are described by planning a sample request against the builtin
//! catalog, so the listed files are exactly what `new` would write.

use serde::Serialize;

use sourcetpl_adapters::{
    BuiltinCatalog, MemoryFilesystem,
    catalog::{OVERRIDE_EXTENSION, PACKAGED_SUFFIX},
};
use sourcetpl_core::{
    application::ScaffoldService,
    domain::{FileRole, Language, ProjectKind, ProjectRequest},
};

use crate::{
    cli::{ListArgs, ListFormat},
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Name used for the sample request of each kind.
const SAMPLE_NAME: &str = "example";

#[derive(Debug, Serialize)]
struct KindEntry {
    kind: ProjectKind,
    description: &'static str,
    root: Option<String>,
    files: Vec<String>,
}

#[derive(Debug, Serialize)]
struct RoleEntry {
    role: FileRole,
    language: Language,
    override_file: String,
    /// Set when the builtin catalog has a packaging variant.
    packaged_override_file: Option<String>,
}

pub fn execute(args: ListArgs, output: OutputManager) -> CliResult<()> {
    if args.roles {
        let roles = role_entries();
        return match args.format {
            ListFormat::Json => Ok(output.json(&roles)?),
            ListFormat::Plain => {
                for r in &roles {
                    println!("{}", r.role);
                }
                Ok(())
            }
            ListFormat::Table => {
                output.header("Template roles:")?;
                for r in &roles {
                    output.print(&format!("  {:<20} {}", r.role.to_string(), r.override_file))?;
                    if let Some(packaged) = &r.packaged_override_file {
                        output.print(&format!("  {:<20} {packaged}", ""))?;
                    }
                }
                Ok(())
            }
        };
    }

    let kinds = kind_entries()?;
    match args.format {
        // Bypasses the quiet check so JSON stays parseable in pipes.
        ListFormat::Json => output.json(&kinds)?,

        ListFormat::Plain => {
            for k in &kinds {
                println!("{}", k.kind);
            }
        }

        ListFormat::Table => {
            output.header("Project kinds:")?;
            for k in &kinds {
                output.print(&format!("  {:<12} {}", k.kind.to_string(), k.description))?;
                for file in &k.files {
                    output.print(&format!("      {file}"))?;
                }
            }
        }
    }

    Ok(())
}

fn kind_entries() -> CliResult<Vec<KindEntry>> {
    let service = ScaffoldService::new(
        Box::new(BuiltinCatalog::new()),
        Box::new(MemoryFilesystem::new()),
    );

    ProjectKind::ALL
        .iter()
        .map(|&kind| {
            let request = ProjectRequest::builder(SAMPLE_NAME)
                .kind(kind)
                .build()
                .map_err(|e| CliError::Core(e.into()))?;
            let registry = service
                .plan(&request)
                .with_cli_context(|| "planning sample request")?;

            Ok(KindEntry {
                kind,
                description: kind.description(),
                root: request.root_dir().map(|r| r.display().to_string()),
                files: registry
                    .files()
                    .map(|f| f.relative_path().display().to_string())
                    .collect(),
            })
        })
        .collect()
}

fn role_entries() -> Vec<RoleEntry> {
    let catalog = BuiltinCatalog::new();
    Language::ALL
        .iter()
        .flat_map(|&language| {
            let catalog = &catalog;
            FileRole::ALL.iter().map(move |&role| RoleEntry {
                role,
                language,
                override_file: format!("{language}/{role}.{OVERRIDE_EXTENSION}"),
                packaged_override_file: catalog
                    .lookup_exact(language, role, true)
                    .map(|_| format!("{language}/{role}{PACKAGED_SUFFIX}.{OVERRIDE_EXTENSION}")),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_is_listed() {
        let kinds = kind_entries().unwrap();
        assert_eq!(kinds.len(), ProjectKind::ALL.len());
    }

    #[test]
    fn single_files_have_no_root() {
        let kinds = kind_entries().unwrap();
        let source = kinds
            .iter()
            .find(|k| k.kind == ProjectKind::Source)
            .unwrap();
        assert_eq!(source.root, None);
        assert_eq!(source.files, vec!["example.c"]);
    }

    #[test]
    fn application_lists_main_source() {
        let kinds = kind_entries().unwrap();
        let app = kinds
            .iter()
            .find(|k| k.kind == ProjectKind::Application)
            .unwrap();
        assert_eq!(app.root.as_deref(), Some("example-app"));
        assert!(app.files.iter().any(|f| f == "src/main.c"));
    }

    #[test]
    fn roles_name_their_override_file() {
        let roles = role_entries();
        assert_eq!(roles.len(), FileRole::ALL.len());
        let makefile = roles
            .iter()
            .find(|r| r.role == FileRole::AppMakefile)
            .unwrap();
        assert_eq!(makefile.override_file, "c/app-makefile.tpl");
        assert_eq!(
            makefile.packaged_override_file.as_deref(),
            Some("c/app-makefile.packaged.tpl")
        );

        let readme = roles.iter().find(|r| r.role == FileRole::Readme).unwrap();
        assert_eq!(readme.packaged_override_file, None);
    }
}
