//! Scaffold Service - main application orchestrator.
//!
//! This service coordinates the entire scaffolding workflow:
//! 1. Select templates for the request into a registry
//! 2. Refuse to clobber an existing target (unless overwriting)
//! 3. Flush the registry to the filesystem
//!
//! The flush is not transactional. A failure partway leaves whatever was
//! already written on disk and reports the path that failed.

use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError, TemplateSelector,
        ports::{Filesystem, TemplateCatalog},
    },
    domain::{FileRegistry, ProjectRequest},
    error::SourceTplResult,
};

/// What a flush wrote, in write order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScaffoldReport {
    pub root: PathBuf,
    pub directories: Vec<PathBuf>,
    pub files: Vec<PathBuf>,
    pub executables: usize,
}

/// Main scaffolding service.
pub struct ScaffoldService {
    catalog: Box<dyn TemplateCatalog>,
    filesystem: Box<dyn Filesystem>,
    overwrite: bool,
}

impl ScaffoldService {
    /// Create a new scaffold service with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use sourcetpl_adapters::{BuiltinCatalog, LocalFilesystem};
    ///
    /// let service = ScaffoldService::new(
    ///     Box::new(BuiltinCatalog::new()),
    ///     Box::new(LocalFilesystem::new()),
    /// );
    /// ```
    pub fn new(catalog: Box<dyn TemplateCatalog>, filesystem: Box<dyn Filesystem>) -> Self {
        Self {
            catalog,
            filesystem,
            overwrite: false,
        }
    }

    /// Write into an existing target instead of refusing.
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Select templates without writing anything.
    pub fn plan(&self, request: &ProjectRequest) -> SourceTplResult<FileRegistry> {
        let registry = TemplateSelector::new(self.catalog.as_ref()).select(request)?;
        Ok(registry)
    }

    /// Scaffold a request into `output_dir`.
    #[instrument(
        skip_all,
        fields(
            request = %request,
            output_dir = %output_dir.as_ref().display()
        )
    )]
    pub fn scaffold(
        &self,
        request: &ProjectRequest,
        output_dir: impl AsRef<Path>,
    ) -> SourceTplResult<ScaffoldReport> {
        let output_dir = output_dir.as_ref();
        info!("Scaffolding {} {} project", request.language(), request.kind());

        let registry = self.plan(request)?;
        info!(files = registry.len(), "Templates selected");

        if !self.overwrite {
            if let Some(existing) = targets(&registry, output_dir)
                .into_iter()
                .find(|path| self.filesystem.exists(path))
            {
                return Err(ApplicationError::ProjectExists { path: existing }.into());
            }
        }

        let report = self.flush(&registry, output_dir).inspect_err(|e| {
            warn!(error = %e, "Flush stopped; files already written are left in place");
        })?;

        info!(
            files = report.files.len(),
            executables = report.executables,
            "Scaffold completed successfully"
        );
        Ok(report)
    }

    /// Write every registry entry below `output_dir`.
    ///
    /// Creates the root and recorded directories, then for each file: creates
    /// its directory if absent, writes head+body+tail, and sets the execute
    /// bit when flagged.
    pub fn flush(
        &self,
        registry: &FileRegistry,
        output_dir: &Path,
    ) -> SourceTplResult<ScaffoldReport> {
        let root = if registry.root().as_os_str().is_empty() {
            output_dir.to_path_buf()
        } else {
            output_dir.join(registry.root())
        };
        let mut report = ScaffoldReport {
            root: root.clone(),
            ..ScaffoldReport::default()
        };

        self.filesystem.create_dir_all(&root)?;

        for dir in registry.directories() {
            let path = root.join(dir);
            self.filesystem.create_dir_all(&path)?;
            report.directories.push(path);
        }

        for file in registry.files() {
            let path = root.join(file.relative_path());

            if let Some(parent) = path.parent() {
                if !self.filesystem.exists(parent) {
                    self.filesystem.create_dir_all(parent)?;
                }
            }

            self.filesystem.write_file(&path, &file.contents())?;

            if file.is_executable() {
                self.filesystem.set_permissions(&path, true)?;
                report.executables += 1;
            }

            debug!(
                path = %path.display(),
                executable = file.is_executable(),
                "Wrote file"
            );
            report.files.push(path);
        }

        Ok(report)
    }
}

/// Paths whose existence blocks a non-overwriting scaffold.
///
/// The root directory for projects, each file for single-file requests.
fn targets(registry: &FileRegistry, output_dir: &Path) -> Vec<PathBuf> {
    if registry.root().as_os_str().is_empty() {
        registry
            .files()
            .map(|f| output_dir.join(f.relative_path()))
            .collect()
    } else {
        vec![output_dir.join(registry.root())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockFilesystem;
    use crate::domain::{FileRole, Language, ProjectKind};
    use crate::error::SourceTplError;

    struct FixedCatalog;

    impl TemplateCatalog for FixedCatalog {
        fn lookup(&self, _: Language, role: FileRole, _: bool) -> Option<&str> {
            Some(match role {
                FileRole::Comment => "/* {{PROJECT_NAME}} */\n",
                FileRole::HeaderGuardOpen => "#ifndef _{{FILENAME_UPPER}}_H\n",
                FileRole::HeaderGuardClose => "#endif\n",
                _ => "x\n",
            })
        }
    }

    fn service(fs: MockFilesystem) -> ScaffoldService {
        ScaffoldService::new(Box::new(FixedCatalog), Box::new(fs))
    }

    #[test]
    fn refuses_existing_project_root() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists()
            .withf(|path| path == Path::new("/out/foo-app"))
            .returning(|_| true);
        fs.expect_create_dir_all().never();
        fs.expect_write_file().never();

        let request = ProjectRequest::builder("foo").build().unwrap();
        let err = service(fs).scaffold(&request, "/out").unwrap_err();

        assert!(matches!(
            err,
            SourceTplError::Application(ApplicationError::ProjectExists { .. })
        ));
    }

    #[test]
    fn refuses_existing_single_file() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists()
            .withf(|path| path == Path::new("/out/bar.h"))
            .returning(|_| true);

        let request = ProjectRequest::builder("bar")
            .kind(ProjectKind::Header)
            .build()
            .unwrap();
        assert!(service(fs).scaffold(&request, "/out").is_err());
    }

    #[test]
    fn overwrite_skips_existence_check() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| true);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file()
            .withf(|path, _| path == Path::new("/out/bar.c"))
            .times(1)
            .returning(|_, _| Ok(()));
        fs.expect_set_permissions().never();

        let request = ProjectRequest::builder("bar")
            .kind(ProjectKind::Source)
            .build()
            .unwrap();
        let report = service(fs)
            .with_overwrite(true)
            .scaffold(&request, "/out")
            .unwrap();

        assert_eq!(report.files, vec![PathBuf::from("/out/bar.c")]);
        assert!(report.directories.is_empty());
    }

    #[test]
    fn write_failure_stops_flush_without_rollback() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        // first file succeeds, second fails, nothing after is attempted
        let mut calls = 0;
        fs.expect_write_file().times(2).returning(move |path, _| {
            calls += 1;
            if calls == 2 {
                Err(ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "permission denied".into(),
                }
                .into())
            } else {
                Ok(())
            }
        });

        let request = ProjectRequest::builder("foo").build().unwrap();
        let err = service(fs).scaffold(&request, "/out").unwrap_err();

        match err {
            SourceTplError::Application(ApplicationError::FilesystemError { path, .. }) => {
                assert_eq!(path, PathBuf::from("/out/foo-app/include/foo.h"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn executable_files_get_permissions() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file().returning(|_, _| Ok(()));
        fs.expect_set_permissions()
            .withf(|path, executable| {
                *executable && path.starts_with("/out/package-foo-app/package")
            })
            .times(7)
            .returning(|_, _| Ok(()));

        let request = ProjectRequest::builder("foo")
            .packaged(true)
            .build()
            .unwrap();
        let report = service(fs).scaffold(&request, "/out").unwrap();

        // 4 debian scripts, build/clean-package, initd
        assert_eq!(report.executables, 7);
    }
}
