//! Compiled-in templates.

use std::collections::HashMap;

use sourcetpl_core::{
    application::ports::TemplateCatalog,
    domain::{FileRole, Language},
};

use super::{Entry, c, git, package};

type Key = (Language, FileRole, bool);

/// The templates that ship with source-tpl.
#[derive(Debug, Clone)]
pub struct BuiltinCatalog {
    templates: HashMap<Key, &'static str>,
}

impl BuiltinCatalog {
    pub fn new() -> Self {
        let mut templates = HashMap::new();

        for language in Language::ALL {
            let tables: &[&[Entry]] = match language {
                Language::C => &[c::TEMPLATES, package::TEMPLATES, git::TEMPLATES],
            };
            for (role, packaged, text) in tables.iter().flat_map(|t| t.iter()) {
                templates.insert((*language, *role, *packaged), *text);
            }
        }

        Self { templates }
    }

    /// The entry stored for exactly this key, without packaged fallback.
    pub fn lookup_exact(
        &self,
        language: Language,
        role: FileRole,
        packaged: bool,
    ) -> Option<&'static str> {
        self.templates.get(&(language, role, packaged)).copied()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl Default for BuiltinCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateCatalog for BuiltinCatalog {
    fn lookup(&self, language: Language, role: FileRole, packaged: bool) -> Option<&str> {
        if packaged {
            if let Some(text) = self.lookup_exact(language, role, true) {
                return Some(text);
            }
        }
        self.lookup_exact(language, role, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_role_has_a_c_template() {
        let catalog = BuiltinCatalog::new();
        for role in FileRole::ALL {
            assert!(
                catalog.lookup(Language::C, *role, false).is_some(),
                "missing template for {role}"
            );
        }
    }

    #[test]
    fn packaged_lookup_prefers_packaged_variant() {
        let catalog = BuiltinCatalog::new();

        let plain = catalog.lookup(Language::C, FileRole::AppMakefile, false).unwrap();
        let packaged = catalog.lookup(Language::C, FileRole::AppMakefile, true).unwrap();
        assert_ne!(plain, packaged);
        assert!(packaged.contains("package_version"));
        assert!(!plain.contains("package_version"));
    }

    #[test]
    fn packaged_lookup_falls_back_to_plain() {
        let catalog = BuiltinCatalog::new();
        assert_eq!(catalog.lookup_exact(Language::C, FileRole::MainSource, true), None);
        assert_eq!(
            catalog.lookup(Language::C, FileRole::MainSource, true),
            catalog.lookup(Language::C, FileRole::MainSource, false)
        );
    }

    #[test]
    fn makefiles_keep_make_escapes() {
        let catalog = BuiltinCatalog::new();

        let lib = catalog.lookup(Language::C, FileRole::LibMakefile, false).unwrap();
        assert!(lib.contains("awk '{print $$4}'"));
        assert!(lib.contains("--version-script,$(PREFIX).sym"));

        let packaged = catalog.lookup(Language::C, FileRole::LibMakefile, true).unwrap();
        assert!(packaged.contains("awk '{print $$3}'"));
        assert!(packaged.contains("source-tpl new $(PACKAGE_VERSION_NAME) -t header"));
    }

    #[test]
    fn single_comment_names_the_file() {
        let catalog = BuiltinCatalog::new();
        let single = catalog.lookup(Language::C, FileRole::SingleComment, false).unwrap();
        let project = catalog.lookup(Language::C, FileRole::Comment, false).unwrap();
        assert!(single.contains(" * Project: {{FILENAME}}\n"));
        assert!(project.contains(" * Project: {{PROJECT_BIN_NAME}}\n"));
    }

    #[test]
    fn header_guard_matches_filename_placeholder() {
        let catalog = BuiltinCatalog::new();
        assert_eq!(
            catalog.lookup(Language::C, FileRole::HeaderGuardOpen, false),
            Some("#ifndef _{{FILENAME_UPPER}}_H\n#define _{{FILENAME_UPPER}}_H     1\n")
        );
    }
}
