//! Integration tests for the `source-tpl` binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A command isolated from the user's config and `RUST_LOG`.
fn source_tpl(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("source-tpl").unwrap();
    cmd.env("XDG_CONFIG_HOME", home)
        .env("HOME", home)
        .env_remove("RUST_LOG")
        .env_remove("SOURCE_TPL_LOG")
        .env_remove("SOURCE_TPL__DEFAULTS__AUTHOR")
        .env_remove("SOURCE_TPL__TEMPLATES__DIRECTORY");
    cmd
}

#[test]
fn test_help_flag() {
    let temp = TempDir::new().unwrap();
    source_tpl(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("new"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn test_version_flag() {
    let temp = TempDir::new().unwrap();
    source_tpl(temp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_new_command_help() {
    let temp = TempDir::new().unwrap();
    source_tpl(temp.path())
        .args(["new", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--type"))
        .stdout(predicate::str::contains("--package"))
        .stdout(predicate::str::contains("--sources"));
}

#[test]
fn test_new_application() {
    let temp = TempDir::new().unwrap();
    source_tpl(temp.path())
        .args(["new", "foo", "-a", "Jane Doe", "-o"])
        .arg(temp.path())
        .assert()
        .success();

    let root = temp.path().join("foo-app");
    for file in [
        "src/main.c",
        "src/Makefile",
        "include/foo.h",
        "include/foo_def.h",
        "include/foo_prt.h",
        "include/foo_struct.h",
    ] {
        let path = root.join(file);
        assert!(path.is_file(), "missing {}", path.display());
        assert!(fs::metadata(&path).unwrap().len() > 0, "empty {file}");
    }
    for dir in ["bin", "po", "doc"] {
        assert!(root.join(dir).is_dir(), "missing dir {dir}");
    }

    let main = fs::read_to_string(root.join("src/main.c")).unwrap();
    assert!(main.contains("Author: Jane Doe"));
    assert!(main.contains("#include \"foo.h\""));
}

#[test]
fn test_new_library_merges_public_headers() {
    let temp = TempDir::new().unwrap();
    source_tpl(temp.path())
        .args(["new", "net-utils", "-t", "lib", "-a", "Jane", "-o"])
        .arg(temp.path())
        .assert()
        .success();

    let header = temp
        .path()
        .join("libnet-utils/include/libnet_utils.h");
    assert!(header.is_file(), "missing {}", header.display());
    let text = fs::read_to_string(header).unwrap();
    assert!(text.contains("#include"));
}

#[test]
fn test_new_single_source() {
    let temp = TempDir::new().unwrap();
    source_tpl(temp.path())
        .args(["new", "parser", "-t", "source", "-c", "int parse(void);^", "-o"])
        .arg(temp.path())
        .assert()
        .success();

    let entries: Vec<_> = fs::read_dir(temp.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(entries, vec!["parser.c"]);

    let text = fs::read_to_string(temp.path().join("parser.c")).unwrap();
    assert!(text.contains("int parse(void);\n"));
}

#[test]
fn test_new_single_header_has_guard() {
    let temp = TempDir::new().unwrap();
    source_tpl(temp.path())
        .args(["new", "my-types", "-t", "header", "-o"])
        .arg(temp.path())
        .assert()
        .success();

    let text = fs::read_to_string(temp.path().join("my-types.h")).unwrap();
    assert!(text.contains("#ifndef _MY_TYPES_H"));
    assert!(text.trim_end().ends_with("#endif"));
}

#[test]
fn test_new_extra_sources_and_headers() {
    let temp = TempDir::new().unwrap();
    source_tpl(temp.path())
        .args(["new", "foo", "--sources", "parser;lexer", "--headers", "config", "-o"])
        .arg(temp.path())
        .assert()
        .success();

    let root = temp.path().join("foo-app");
    assert!(root.join("src/parser.c").is_file());
    assert!(root.join("src/lexer.c").is_file());
    assert!(root.join("include/config.h").is_file());
}

#[test]
fn test_new_git_files() {
    let temp = TempDir::new().unwrap();
    source_tpl(temp.path())
        .args(["new", "foo", "--git", "-o"])
        .arg(temp.path())
        .assert()
        .success();

    assert!(temp.path().join("foo-app/.gitignore").is_file());
    assert!(temp.path().join("foo-app/README.md").is_file());
}

#[cfg(unix)]
#[test]
fn test_new_packaged_scripts_are_executable() {
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().unwrap();
    source_tpl(temp.path())
        .args(["new", "foo", "-p", "-o"])
        .arg(temp.path())
        .assert()
        .success();

    let root = temp.path().join("package-foo-app");
    assert!(root.join("foo-app/src/main.c").is_file());

    let mode = |p: &str| fs::metadata(root.join(p)).unwrap().permissions().mode();
    assert_ne!(mode("package/debian/postinst") & 0o111, 0);
    assert_ne!(mode("package/mount/build-package") & 0o111, 0);
    assert_eq!(mode("package/package.conf") & 0o111, 0);
    assert_eq!(mode("foo-app/src/main.c") & 0o111, 0);
}

#[test]
fn test_new_dry_run_writes_nothing() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("out");
    fs::create_dir(&out).unwrap();

    source_tpl(temp.path())
        .args(["new", "foo", "--dry-run", "-o"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("main.c"));

    assert_eq!(fs::read_dir(&out).unwrap().count(), 0);
}

#[test]
fn test_log_filter_from_environment() {
    let temp = TempDir::new().unwrap();
    source_tpl(temp.path())
        .env("SOURCE_TPL_LOG", "sourcetpl_core=debug")
        .args(["new", "foo", "--dry-run", "-o"])
        .arg(temp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Registry populated"));
}

#[test]
fn test_default_verbosity_is_silent_on_success() {
    let temp = TempDir::new().unwrap();
    source_tpl(temp.path())
        .args(["new", "foo", "--dry-run", "-o"])
        .arg(temp.path())
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_new_json_report() {
    let temp = TempDir::new().unwrap();
    let assert = source_tpl(temp.path())
        .args(["--output-format", "json", "new", "foo", "-t", "src", "-o"])
        .arg(temp.path())
        .assert()
        .success();

    let report: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(report["files"].as_array().unwrap().len(), 1);
    assert_eq!(report["executables"], 0);
}

#[test]
fn test_force_writes_into_existing_project() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("foo-app")).unwrap();

    source_tpl(temp.path())
        .args(["new", "foo", "--force", "-o"])
        .arg(temp.path())
        .assert()
        .success();

    assert!(temp.path().join("foo-app/src/main.c").is_file());
}

#[test]
fn test_list_json() {
    let temp = TempDir::new().unwrap();
    let assert = source_tpl(temp.path())
        .args(["list", "--format", "json"])
        .assert()
        .success();

    let kinds: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    let names: Vec<_> = kinds
        .as_array()
        .unwrap()
        .iter()
        .map(|k| k["kind"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, ["source", "header", "application", "library"]);
}

#[test]
fn test_list_roles_plain() {
    let temp = TempDir::new().unwrap();
    source_tpl(temp.path())
        .args(["list", "--roles", "--format", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("app-makefile"))
        .stdout(predicate::str::contains("debian-script"));
}

#[test]
fn test_completions_bash() {
    let temp = TempDir::new().unwrap();
    source_tpl(temp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("source-tpl"));
}

#[test]
fn test_config_roundtrip() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("cfg.toml");
    let out = temp.path().join("out");
    fs::create_dir(&out).unwrap();

    source_tpl(temp.path())
        .arg("--config")
        .arg(&config)
        .arg("init")
        .assert()
        .success();
    assert!(config.is_file());

    source_tpl(temp.path())
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "defaults.author", "Config Author"])
        .assert()
        .success();

    source_tpl(temp.path())
        .arg("--config")
        .arg(&config)
        .args(["config", "get", "defaults.author"])
        .assert()
        .success()
        .stdout(predicate::str::contains("defaults.author = Config Author"));

    source_tpl(temp.path())
        .arg("--config")
        .arg(&config)
        .args(["new", "foo", "-t", "src", "-o"])
        .arg(&out)
        .assert()
        .success();
    let text = fs::read_to_string(out.join("foo.c")).unwrap();
    assert!(text.contains("Author: Config Author"));
}

#[test]
fn test_template_overrides_from_config() {
    let temp = TempDir::new().unwrap();
    let templates = temp.path().join("templates");
    fs::create_dir_all(templates.join("c")).unwrap();
    fs::write(
        templates.join("c/single-comment.tpl"),
        "/* {{FILENAME}} by {{FULL_AUTHOR_NAME}} */\n",
    )
    .unwrap();

    let config = temp.path().join("cfg.toml");
    fs::write(
        &config,
        format!("[templates]\ndirectory = {:?}\n", templates.display().to_string()),
    )
    .unwrap();

    source_tpl(temp.path())
        .arg("--config")
        .arg(&config)
        .args(["new", "util", "-t", "src", "-a", "Jane", "-o"])
        .arg(temp.path())
        .assert()
        .success();

    let text = fs::read_to_string(temp.path().join("util.c")).unwrap();
    assert!(text.starts_with("/* util.c by Jane */\n"));
}
