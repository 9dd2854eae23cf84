//! Integration tests for sourcetpl-core against the builtin catalog and the
//! in-memory filesystem.

use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use sourcetpl_adapters::{BuiltinCatalog, MemoryFilesystem};
use sourcetpl_core::{
    application::ApplicationError,
    prelude::*,
};

fn fixed_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 15)
        .unwrap()
        .and_hms_opt(9, 5, 3)
        .unwrap()
}

fn service(fs: &MemoryFilesystem) -> ScaffoldService {
    ScaffoldService::new(Box::new(BuiltinCatalog::new()), Box::new(fs.clone()))
}

fn read(fs: &MemoryFilesystem, path: &str) -> String {
    fs.read_file(path)
        .unwrap_or_else(|| panic!("{path} was not written"))
}

#[test]
fn application_scaffold_writes_documented_files() {
    let fs = MemoryFilesystem::new();
    let request = ProjectRequest::builder("foo")
        .author("Jane Doe")
        .timestamp(fixed_time())
        .build()
        .unwrap();

    service(&fs).scaffold(&request, "/out").unwrap();

    for dir in ["src", "include", "bin", "po", "doc"] {
        assert!(fs.exists(&Path::new("/out/foo-app").join(dir)), "missing {dir}");
    }
    for file in [
        "/out/foo-app/src/main.c",
        "/out/foo-app/src/Makefile",
        "/out/foo-app/include/foo.h",
        "/out/foo-app/include/foo_def.h",
        "/out/foo-app/include/foo_prt.h",
        "/out/foo-app/include/foo_struct.h",
    ] {
        assert!(!read(&fs, file).is_empty(), "{file} is empty");
    }

    let main = read(&fs, "/out/foo-app/src/main.c");
    assert!(main.contains(" * Author: Jane Doe\n"));
    assert!(main.contains(" * Created at: Thu Oct 15 09:05:03 2026\n"));
    assert!(main.contains("Copyright (c) 2026"));
    assert!(main.contains("#include \"foo.h\""));

    let def = read(&fs, "/out/foo-app/include/foo_def.h");
    assert!(def.contains("#ifndef _FOO_DEF_H\n#define _FOO_DEF_H     1\n"));
    assert!(def.contains("#define MAJOR_VERSION   0"));
    assert!(def.ends_with("\n#endif\n\n"));

    let makefile = read(&fs, "/out/foo-app/src/Makefile");
    assert!(makefile.contains("CC = gcc\n"));
    assert!(makefile.contains("TARGET = $(OUTPUTDIR)/foo\n"));
}

#[test]
fn library_header_includes_public_headers_in_order() {
    let fs = MemoryFilesystem::new();
    let request = ProjectRequest::builder("net-utils")
        .kind(ProjectKind::Library)
        .headers(["socket", "buffer"])
        .sources(["socket"])
        .timestamp(fixed_time())
        .build()
        .unwrap();

    service(&fs).scaffold(&request, "/out").unwrap();

    let root = "/out/libnet-utils";
    assert!(!fs.exists(Path::new("/out/libnet-utils/doc")));

    let merged = read(&fs, &format!("{root}/include/libnet_utils.h"));
    let includes: Vec<&str> = merged
        .lines()
        .filter(|l| l.starts_with("#include"))
        .collect();
    assert_eq!(
        includes,
        vec![
            "#include \"utils.h\"",
            "#include \"error.h\"",
            "#include \"socket.h\"",
            "#include \"buffer.h\"",
        ]
    );
    assert!(merged.contains("#ifdef LIBNET_UTILS_COMPILE"));

    let error_h = read(&fs, &format!("{root}/include/error.h"));
    assert!(error_h.contains("enum net_utils_error_code {"));
    assert!(error_h.contains("NET_UTILS_NO_ERROR,"));

    let symbols = read(&fs, &format!("{root}/src/libnet_utils.sym"));
    assert!(symbols.starts_with("LIBNET_UTILS_0.1 {"));

    assert!(fs.exists(Path::new("/out/libnet-utils/src/socket.c")));
}

#[test]
fn single_source_has_no_tree() {
    let fs = MemoryFilesystem::new();
    let request = ProjectRequest::builder("bar")
        .kind(ProjectKind::Source)
        .content("int bar(void);^")
        .build()
        .unwrap();

    let report = service(&fs).scaffold(&request, "/out").unwrap();

    assert_eq!(fs.list_files(), vec![PathBuf::from("/out/bar.c")]);
    assert!(report.directories.is_empty());
    let text = read(&fs, "/out/bar.c");
    assert!(text.contains(" * Project: bar.c\n"));
    assert!(text.ends_with("int bar(void);\n"));
}

#[test]
fn output_is_deterministic_for_fixed_timestamp() {
    let render = || {
        let fs = MemoryFilesystem::new();
        let request = ProjectRequest::builder("foo")
            .kind(ProjectKind::Library)
            .packaged(true)
            .git(true)
            .timestamp(fixed_time())
            .build()
            .unwrap();
        service(&fs).scaffold(&request, "/out").unwrap();
        fs.list_files()
            .into_iter()
            .map(|p| {
                let content = fs.read_file(&p).unwrap();
                (p, content)
            })
            .collect::<Vec<_>>()
    };

    assert_eq!(render(), render());
}

#[test]
fn packaged_scripts_are_executable() {
    let fs = MemoryFilesystem::new();
    let request = ProjectRequest::builder("foo")
        .packaged(true)
        .build()
        .unwrap();

    let report = service(&fs).scaffold(&request, "/out").unwrap();
    let root = Path::new("/out/package-foo-app");

    for script in [
        "package/debian/preinst",
        "package/debian/prerm",
        "package/debian/postinst",
        "package/debian/postrm",
        "package/mount/build-package",
        "package/mount/clean-package",
        "package/misc/foo_initd",
    ] {
        assert!(fs.is_executable(root.join(script)), "{script} not executable");
    }
    for plain in ["package/misc/foo_cron", "package/package.conf", "foo-app/src/Makefile"] {
        assert!(!fs.is_executable(root.join(plain)), "{plain} is executable");
    }
    assert_eq!(report.executables, 7);

    let def = read(&fs, "/out/package-foo-app/foo-app/include/foo_def.h");
    assert!(def.contains("#include \"../../package_version.h\""));
}

#[test]
fn git_files_are_written_at_project_base() {
    let fs = MemoryFilesystem::new();
    let request = ProjectRequest::builder("foo").git(true).build().unwrap();

    service(&fs).scaffold(&request, "/out").unwrap();

    assert!(read(&fs, "/out/foo-app/.gitignore").contains("*.o\n"));
    assert_eq!(
        read(&fs, "/out/foo-app/README.md"),
        "# foo\nA brief description of the project.\n\n"
    );
}

#[test]
fn packaged_git_files_are_written_at_package_root() {
    let fs = MemoryFilesystem::new();
    let request = ProjectRequest::builder("foo")
        .packaged(true)
        .git(true)
        .build()
        .unwrap();

    service(&fs).scaffold(&request, "/out").unwrap();

    assert!(read(&fs, "/out/package-foo-app/.gitignore").contains("*.o\n"));
    assert!(read(&fs, "/out/package-foo-app/README.md").starts_with("# foo\n"));
    assert!(fs.read_file("/out/package-foo-app/foo-app/.gitignore").is_none());
}

#[test]
fn second_scaffold_is_refused_without_overwrite() {
    let fs = MemoryFilesystem::new();
    let request = ProjectRequest::builder("foo").build().unwrap();

    service(&fs).scaffold(&request, "/out").unwrap();
    let err = service(&fs).scaffold(&request, "/out").unwrap_err();
    assert!(matches!(
        err,
        SourceTplError::Application(ApplicationError::ProjectExists { .. })
    ));

    service(&fs)
        .with_overwrite(true)
        .scaffold(&request, "/out")
        .unwrap();
}

#[test]
fn plan_does_not_touch_the_filesystem() {
    let fs = MemoryFilesystem::new();
    let request = ProjectRequest::builder("foo").build().unwrap();

    let registry = service(&fs).plan(&request).unwrap();

    assert_eq!(registry.len(), 6);
    assert!(fs.list_files().is_empty());
    assert!(fs.list_dirs().is_empty());
}
