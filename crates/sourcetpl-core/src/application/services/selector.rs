//! Template Selector - decides which files a request needs.
//!
//! The selector is a pure mapping from `(kind, language, packaged, role)` to a
//! template string and a destination directory. It fills a [`FileRegistry`];
//! it never touches the filesystem.
//!
//! | kind          | files                                                       |
//! |---------------|-------------------------------------------------------------|
//! | `source`      | `<name>.c`                                                  |
//! | `header`      | `<name>.h`                                                  |
//! | `application` | `src/{main.c,Makefile}`, `include/<p>{,_def,_prt,_struct}.h` |
//! | `library`     | `src/{utils.c,error.c,<p>.sym,Makefile}`, `include/{utils.h,error.h,<p>.h}` |
//!
//! Packaged requests add the `package/` tree, `--git` adds `.gitignore` and
//! `README.md`.

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::application::ports::TemplateCatalog;
use crate::domain::{
    DomainError, FileRegistry, FileRole, ProjectKind, ProjectRequest, RenderContext,
    entities::render_context::HEADER_FILES, qualified_name,
};

const APPLICATION_DIRS: &[&str] = &["src", "include", "bin", "po", "doc"];
const LIBRARY_DIRS: &[&str] = &["src", "include", "bin", "po"];
const PACKAGE_DIRS: &[&str] = &["package/debian", "package/mount", "package/misc"];
const DEBIAN_SCRIPTS: &[&str] = &["preinst", "prerm", "postinst", "postrm"];

/// Maps requests to registry contents using a template catalog.
#[derive(Clone, Copy)]
pub struct TemplateSelector<'a> {
    catalog: &'a dyn TemplateCatalog,
}

impl<'a> TemplateSelector<'a> {
    pub fn new(catalog: &'a dyn TemplateCatalog) -> Self {
        Self { catalog }
    }

    /// Build the registry for a request.
    ///
    /// # Errors
    ///
    /// `DomainError::NoMatchingTemplate` when the catalog lacks a role the
    /// request needs; path errors from the registry.
    #[instrument(skip_all, fields(request = %request))]
    pub fn select(&self, request: &ProjectRequest) -> Result<FileRegistry, DomainError> {
        let mut selection = Selection {
            catalog: self.catalog,
            request,
            ctx: RenderContext::for_request(request),
            base: request
                .is_packaged()
                .then(|| request.project_dir())
                .flatten()
                .unwrap_or_default(),
            registry: FileRegistry::new(request.root_dir().unwrap_or_default()),
        };

        match request.kind() {
            ProjectKind::Source => selection.single_source()?,
            ProjectKind::Header => selection.single_header()?,
            ProjectKind::Application => selection.application()?,
            ProjectKind::Library => selection.library()?,
        }

        if request.is_packaged() {
            selection.package()?;
        }
        if request.with_git() {
            selection.git()?;
        }

        selection.registry.validate()?;
        debug!(
            files = selection.registry.len(),
            directories = selection.registry.directories().len(),
            "Registry populated"
        );
        Ok(selection.registry)
    }
}

/// State of one `select` call.
struct Selection<'a, 'r> {
    catalog: &'a dyn TemplateCatalog,
    request: &'r ProjectRequest,
    ctx: RenderContext,
    /// Project directory inside the registry root (non-empty when packaged).
    base: PathBuf,
    registry: FileRegistry,
}

impl<'a> Selection<'a, '_> {
    fn template(&self, role: FileRole) -> Result<&'a str, DomainError> {
        let language = self.request.language();
        let catalog: &'a dyn TemplateCatalog = self.catalog;
        catalog
            .lookup(language, role, self.request.is_packaged())
            .ok_or_else(|| DomainError::NoMatchingTemplate {
                language: language.to_string(),
                role: role.to_string(),
            })
    }

    /// Single files carry their own comment block naming the file.
    fn comment(&self) -> Result<&'a str, DomainError> {
        if self.request.kind().is_single_file() {
            self.template(FileRole::SingleComment)
        } else {
            self.template(FileRole::Comment)
        }
    }

    fn dir(&self, sub: &str) -> PathBuf {
        self.base.join(sub)
    }

    /// Application header/source base name: `foo` for project `Foo`.
    fn file_prefix(&self) -> String {
        self.request.project_name().to_lowercase()
    }

    fn tree(&mut self, dirs: &[&str]) -> Result<(), DomainError> {
        for dir in dirs {
            let path = self.dir(dir);
            self.registry.add_directory(path)?;
        }
        Ok(())
    }

    // ── C files ──────────────────────────────────────────────────────────────

    /// Register a source file: comment head, optional body.
    ///
    /// C files are keyed by their qualified name so `net.c` and `net.h`
    /// can coexist.
    fn source(&mut self, name: &str, dir: &Path, body: Option<&str>) -> Result<(), DomainError> {
        let comment = self.comment()?;
        let extension = self.request.language().source_extension();

        let key = qualified_name(name, Some(extension));
        let file = self.registry.add(key, dir, None, None, None, false)?;
        file.set_extension(extension);
        let ctx = self.ctx.for_file(&file.file_name());
        file.set_head(Some(ctx.render(comment)))
            .set_body(body.map(|b| ctx.render(b)));
        Ok(())
    }

    /// Register a header: comment and guard as head, guard close as tail.
    fn header(
        &mut self,
        name: &str,
        dir: &Path,
        body: Option<&str>,
        public: bool,
    ) -> Result<(), DomainError> {
        let comment = self.comment()?;
        let open = self.template(FileRole::HeaderGuardOpen)?;
        let close = self.template(FileRole::HeaderGuardClose)?;
        let extension = self.request.language().header_extension();

        let key = qualified_name(name, Some(extension));
        let file = self.registry.add(key, dir, None, None, None, false)?;
        file.set_extension(extension).set_public_header(public);
        let ctx = self.ctx.for_file(&file.file_name());
        file.set_head(Some(format!("{}{}", ctx.render(comment), ctx.render(open))))
            .set_body(body.map(|b| ctx.render(b)))
            .set_tail(Some(ctx.render(close)));
        Ok(())
    }

    /// Register a non-C file whose whole content is one rendered template.
    fn plain(
        &mut self,
        name: &str,
        dir: &Path,
        role: FileRole,
        executable: bool,
    ) -> Result<(), DomainError> {
        let body = self.ctx.for_file(name).render(self.template(role)?);
        self.registry
            .add(name, dir, None, Some(body), None, executable)?;
        Ok(())
    }

    fn makefile(&mut self, role: FileRole) -> Result<(), DomainError> {
        let src = self.dir("src");
        self.plain("Makefile", &src, role, false)
    }

    fn extras(&mut self, public_headers: bool) -> Result<(), DomainError> {
        let request = self.request;
        let content = request.content();
        let (src, include) = (self.dir("src"), self.dir("include"));

        for name in request.sources() {
            self.source(name, &src, content)?;
        }
        for name in request.headers() {
            self.header(name, &include, content, public_headers)?;
        }
        Ok(())
    }

    // ── Kinds ────────────────────────────────────────────────────────────────

    fn single_source(&mut self) -> Result<(), DomainError> {
        let request = self.request;
        self.source(request.name(), Path::new(""), request.content())
    }

    fn single_header(&mut self) -> Result<(), DomainError> {
        let request = self.request;
        self.header(request.name(), Path::new(""), request.content(), false)
    }

    fn application(&mut self) -> Result<(), DomainError> {
        self.tree(APPLICATION_DIRS)?;
        self.makefile(FileRole::AppMakefile)?;

        let prefix = self.file_prefix();
        let (src, include) = (self.dir("src"), self.dir("include"));

        let main_header = self.template(FileRole::MainHeader)?;
        self.header(&prefix, &include, Some(main_header), false)?;

        let main = self.template(FileRole::MainSource)?;
        self.source("main", &src, Some(main))?;

        self.header(&format!("{prefix}_prt"), &include, None, false)?;
        let def = self.template(FileRole::DefHeader)?;
        self.header(&format!("{prefix}_def"), &include, Some(def), false)?;
        self.header(&format!("{prefix}_struct"), &include, None, false)?;

        self.extras(false)
    }

    fn library(&mut self) -> Result<(), DomainError> {
        self.tree(LIBRARY_DIRS)?;
        self.makefile(FileRole::LibMakefile)?;

        let prefix = self.file_prefix();
        let (src, include) = (self.dir("src"), self.dir("include"));

        let utils = self.template(FileRole::UtilsSource)?;
        self.source("utils", &src, Some(utils))?;
        let error = self.template(FileRole::ErrorSource)?;
        self.source("error", &src, Some(error))?;

        let utils_h = self.template(FileRole::UtilsHeader)?;
        self.header("utils", &include, Some(utils_h), true)?;
        let error_h = self.template(FileRole::ErrorHeader)?;
        self.header("error", &include, Some(error_h), true)?;

        self.plain(&format!("{prefix}.sym"), &src, FileRole::LibSymbols, false)?;

        self.extras(true)?;

        // merged header goes last so every public header is known
        let includes = self.registry.public_header_includes();
        let lib_header = self.template(FileRole::LibHeader)?;
        let body = RenderContext::new()
            .with_variable(HEADER_FILES, includes)
            .render(lib_header);
        self.header(&prefix, &include, Some(&body), false)
    }

    // ── Supplements ──────────────────────────────────────────────────────────

    fn package(&mut self) -> Result<(), DomainError> {
        for dir in PACKAGE_DIRS {
            self.registry.add_directory(*dir)?;
        }

        let debian = Path::new("package/debian");
        for script in DEBIAN_SCRIPTS {
            self.plain(script, debian, FileRole::DebianScript, true)?;
        }

        let mount = Path::new("package/mount");
        self.plain("build-package", mount, FileRole::BuildPackage, true)?;
        self.plain("clean-package", mount, FileRole::CleanPackage, true)?;

        let misc = Path::new("package/misc");
        let stem = self.request.name().replace('-', "_");
        self.plain(&format!("{stem}_cron"), misc, FileRole::Cron, false)?;
        self.plain(&format!("{stem}_initd"), misc, FileRole::InitScript, true)?;

        self.plain("package.conf", Path::new("package"), FileRole::PackageConf, false)
    }

    /// Git files sit at the registry root: the project directory, or the
    /// `package-*` directory when packaged.
    fn git(&mut self) -> Result<(), DomainError> {
        let root = Path::new("");
        self.plain(".gitignore", root, FileRole::GitIgnore, false)?;
        self.plain("README.md", root, FileRole::Readme, false)
    }
}
