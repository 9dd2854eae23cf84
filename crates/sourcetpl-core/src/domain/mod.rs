// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for source-tpl.
//!
//! This module contains pure logic: what the user asked for
//! ([`ProjectRequest`]), how placeholders are substituted ([`RenderContext`])
//! and which files are pending ([`FileRegistry`]). All I/O and template
//! lookup happens through ports defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No I/O**: No filesystem, network, or external calls
//! - **No logging**: `tracing` stays in the application and CLI layers
//! - **Immutable values**: value objects are `Copy`, entities are `Clone + PartialEq`
//!
pub mod entities;
pub mod error;
pub mod value_objects;

pub use entities::{
    common::RelativePath,
    pending_file::{PendingFile, guard_name, qualified_name},
    registry::FileRegistry,
    render_context::RenderContext,
    request::{ProjectRequest, ProjectRequestBuilder, validate_name},
};

pub use error::{DomainError, ErrorCategory};

pub use value_objects::{FileRole, Language, ProjectKind};

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    // ========================================================================
    // Value Object Tests
    // ========================================================================

    #[test]
    fn language_parses_correctly() {
        assert_eq!(Language::from_str("c").unwrap(), Language::C);
        assert_eq!(Language::from_str("C").unwrap(), Language::C);
        assert_eq!(
            Language::from_str("java"),
            Err(DomainError::UnsupportedLanguage("java".into()))
        );
    }

    #[test]
    fn project_kind_parses_aliases() {
        assert_eq!(ProjectKind::from_str("app").unwrap(), ProjectKind::Application);
        assert_eq!(ProjectKind::from_str("LIB").unwrap(), ProjectKind::Library);
        assert_eq!(ProjectKind::from_str("header").unwrap(), ProjectKind::Header);
        assert_eq!(ProjectKind::from_str("source").unwrap(), ProjectKind::Source);
        assert!(ProjectKind::from_str("plugin").is_err());
    }

    #[test]
    fn project_kind_single_file() {
        assert!(ProjectKind::Source.is_single_file());
        assert!(ProjectKind::Header.is_single_file());
        assert!(!ProjectKind::Application.is_single_file());
        assert!(!ProjectKind::Library.is_single_file());
    }

    #[test]
    fn c_supports_every_kind() {
        for kind in ProjectKind::ALL {
            assert!(Language::C.supports(*kind));
        }
    }

    #[test]
    fn file_role_round_trips_through_str() {
        for role in FileRole::ALL {
            assert_eq!(FileRole::from_str(role.as_str()).unwrap(), *role);
        }
        assert!(FileRole::from_str("nope").is_err());
    }

    #[test]
    fn value_objects_serialize_kebab_case() {
        assert_eq!(
            serde_json::to_string(&ProjectKind::Application).unwrap(),
            "\"application\""
        );
        assert_eq!(
            serde_json::to_string(&FileRole::HeaderGuardOpen).unwrap(),
            "\"header-guard-open\""
        );
    }

    // ========================================================================
    // Error Tests
    // ========================================================================

    #[test]
    fn domain_error_categories() {
        assert_eq!(
            DomainError::UnsupportedKind("x".into()).category(),
            ErrorCategory::Validation
        );
        assert_eq!(
            DomainError::NoMatchingTemplate {
                language: "c".into(),
                role: "cron".into()
            }
            .category(),
            ErrorCategory::NotFound
        );
        assert!(!DomainError::EmptyFileName.suggestions().is_empty());
    }

    // ========================================================================
    // Registry + Render Context Tests
    // ========================================================================

    #[test]
    fn registry_entries_render_per_file() {
        let ctx = RenderContext::new().with_variable("PROJECT_NAME", "foo");
        let mut registry = FileRegistry::new("foo-app");

        let name = "foo_def";
        let file = registry
            .add(name, "include", None, None, None, false)
            .unwrap();
        file.set_extension(".h");
        let file_ctx = ctx.for_file(&file.file_name());
        file.set_head(Some(file_ctx.render("#ifndef _{{FILENAME_UPPER}}_H\n")))
            .set_body(Some(file_ctx.render("/* {{PROJECT_NAME}} */\n")));

        let file = registry.get(name).unwrap();
        assert_eq!(file.contents(), "#ifndef _FOO_DEF_H\n/* foo */\n");
    }
}
