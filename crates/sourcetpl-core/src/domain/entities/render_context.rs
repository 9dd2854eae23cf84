//! Placeholder substitution.
//!
//! Templates are plain strings containing `{{KEY}}` tokens. Substitution is
//! non-strict: a token whose key is not in the context is copied through
//! untouched, so shell and Makefile syntax (`$(CC)`, `${modules[@]}`) never
//! needs escaping.
//!
//! ## Variables
//!
//! | Variable | Example | Source |
//! |----------|---------|--------|
//! | `PROJECT_NAME` | `libfoo_bar` | Request, `-` → `_` |
//! | `PROJECT_NAME_UPPER` | `LIBFOO_BAR` | Computed |
//! | `PROJECT_BIN_NAME` | `libfoo-bar` | Request, `_` → `-` |
//! | `FULL_AUTHOR_NAME` | `Jane Doe` | Request |
//! | `DATE` | `Thu Oct 15 10:04:05 2026` | Request timestamp |
//! | `YEAR` | `2026` | Request timestamp |
//! | `COMPILER` | `gcc` | Request |
//! | `LIB_PREFIX` | `foo_bar` | Libraries only |
//! | `LIB_PREFIX_UPPER` | `FOO_BAR` | Libraries only |
//! | `FILENAME` | `foo_def.h` | Per file, see [`RenderContext::for_file`] |
//! | `FILENAME_UPPER` | `FOO_DEF` | Per file |
//! | `HEADER_FILES` | `#include "utils.h"` ... | Merged library header |

use std::collections::HashMap;

use super::pending_file::guard_name;
use super::request::ProjectRequest;
use crate::domain::value_objects::ProjectKind;

/// C-locale rendering of `%c`.
pub const DATE_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

pub const PROJECT_NAME: &str = "PROJECT_NAME";
pub const PROJECT_NAME_UPPER: &str = "PROJECT_NAME_UPPER";
pub const PROJECT_BIN_NAME: &str = "PROJECT_BIN_NAME";
pub const FULL_AUTHOR_NAME: &str = "FULL_AUTHOR_NAME";
pub const DATE: &str = "DATE";
pub const YEAR: &str = "YEAR";
pub const COMPILER: &str = "COMPILER";
pub const HEADER_FILES: &str = "HEADER_FILES";
pub const FILENAME: &str = "FILENAME";
pub const FILENAME_UPPER: &str = "FILENAME_UPPER";
pub const LIB_PREFIX: &str = "LIB_PREFIX";
pub const LIB_PREFIX_UPPER: &str = "LIB_PREFIX_UPPER";

/// Variables available to a template.
///
/// Immutable after creation; `with_variable` and `for_file` return new
/// instances.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderContext {
    variables: HashMap<String, String>,
}

impl RenderContext {
    /// An empty context. Rendering with it returns the template unchanged.
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive the project-wide variables from a request.
    pub fn for_request(request: &ProjectRequest) -> Self {
        let project_name = request.project_name();
        let timestamp = request.timestamp();

        let mut ctx = Self::new()
            .with_variable(PROJECT_NAME_UPPER, project_name.to_uppercase())
            .with_variable(PROJECT_NAME, project_name)
            .with_variable(PROJECT_BIN_NAME, request.bin_name())
            .with_variable(FULL_AUTHOR_NAME, request.author())
            .with_variable(DATE, timestamp.format(DATE_FORMAT).to_string())
            .with_variable(YEAR, timestamp.format("%Y").to_string())
            .with_variable(COMPILER, request.compiler());

        if request.kind() == ProjectKind::Library {
            let prefix = request.lib_prefix();
            ctx = ctx
                .with_variable(LIB_PREFIX_UPPER, prefix.to_uppercase())
                .with_variable(LIB_PREFIX, prefix);
        }

        ctx
    }

    /// Add a variable, consuming self and returning the new context.
    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    /// A copy of this context with `FILENAME`/`FILENAME_UPPER` set.
    pub fn for_file(&self, file_name: &str) -> Self {
        self.clone()
            .with_variable(FILENAME, file_name)
            .with_variable(FILENAME_UPPER, guard_name(file_name))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    /// Substitute every known `{{KEY}}` in a single left-to-right pass.
    ///
    /// Substituted values are never re-scanned. Unknown keys, malformed keys
    /// and an unterminated `{{` are copied literally.
    pub fn render(&self, template: &str) -> String {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];

            let Some(end) = after.find("}}") else {
                out.push_str(&rest[start..]);
                return out;
            };

            let key = &after[..end];
            match self.variables.get(key).filter(|_| is_key(key)) {
                Some(value) => {
                    out.push_str(value);
                    rest = &after[end + 2..];
                }
                None if is_key(key) => {
                    out.push_str(&rest[start..start + 2 + end + 2]);
                    rest = &after[end + 2..];
                }
                None => {
                    // not a placeholder; resume right after the braces
                    out.push_str("{{");
                    rest = after;
                }
            }
        }

        out.push_str(rest);
        out
    }
}

fn is_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ctx() -> RenderContext {
        RenderContext::new()
            .with_variable("NAME", "foo")
            .with_variable("WRAPPED", "{{NAME}}")
    }

    #[test]
    fn replaces_known_keys() {
        assert_eq!(ctx().render("a {{NAME}} b {{NAME}}"), "a foo b foo");
    }

    #[test]
    fn unknown_keys_pass_through() {
        assert_eq!(ctx().render("{{NAME}}-{{OTHER}}"), "foo-{{OTHER}}");
    }

    #[test]
    fn values_are_not_rescanned() {
        assert_eq!(ctx().render("{{WRAPPED}}"), "{{NAME}}");
    }

    #[test]
    fn shell_and_make_syntax_is_untouched() {
        let tpl = "CC = $(CC)\nfor m in ${mods[@]}; do {{NAME}}; done\n{ x }";
        assert_eq!(
            ctx().render(tpl),
            "CC = $(CC)\nfor m in ${mods[@]}; do foo; done\n{ x }"
        );
    }

    #[test]
    fn malformed_and_unterminated_braces() {
        assert_eq!(ctx().render("{{ {{NAME}}"), "{{ foo");
        assert_eq!(ctx().render("tail {{NAME"), "tail {{NAME");
        assert_eq!(ctx().render("{{}}"), "{{}}");
    }

    #[test]
    fn request_variables() {
        let request = ProjectRequest::builder("my-lib")
            .kind(ProjectKind::Library)
            .author("Jane Doe")
            .timestamp(
                NaiveDate::from_ymd_opt(2026, 10, 15)
                    .unwrap()
                    .and_hms_opt(9, 5, 3)
                    .unwrap(),
            )
            .build()
            .unwrap();
        let ctx = RenderContext::for_request(&request);

        assert_eq!(ctx.get(PROJECT_NAME), Some("libmy_lib"));
        assert_eq!(ctx.get(PROJECT_NAME_UPPER), Some("LIBMY_LIB"));
        assert_eq!(ctx.get(PROJECT_BIN_NAME), Some("libmy-lib"));
        assert_eq!(ctx.get(FULL_AUTHOR_NAME), Some("Jane Doe"));
        assert_eq!(ctx.get(DATE), Some("Thu Oct 15 09:05:03 2026"));
        assert_eq!(ctx.get(YEAR), Some("2026"));
        assert_eq!(ctx.get(COMPILER), Some("gcc"));
        assert_eq!(ctx.get(LIB_PREFIX), Some("my_lib"));
        assert_eq!(ctx.get(LIB_PREFIX_UPPER), Some("MY_LIB"));
    }

    #[test]
    fn lib_prefix_only_for_libraries() {
        let request = ProjectRequest::builder("foo").build().unwrap();
        let ctx = RenderContext::for_request(&request);
        assert_eq!(ctx.get(LIB_PREFIX), None);
        assert_eq!(ctx.render("{{LIB_PREFIX}}"), "{{LIB_PREFIX}}");
    }

    #[test]
    fn file_variables() {
        let ctx = RenderContext::new().for_file("foo_def.h");
        assert_eq!(ctx.get(FILENAME), Some("foo_def.h"));
        assert_eq!(ctx.get(FILENAME_UPPER), Some("FOO_DEF"));
    }
}
