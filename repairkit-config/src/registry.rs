use repairkit_types::CategoryId;
use std::collections::BTreeSet;

/// Resolves category names written in configuration to host category ids.
///
/// The host owns the material table; the loader only needs to know whether a name exists.
pub trait CategoryRegistry {
    fn resolve(&self, name: &str) -> Option<CategoryId>;
}

/// Accepts any well-formed name (ASCII letters, digits, `_`, `-`, spaces).
///
/// Useful for tooling that has no access to the host's material table.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenCategoryRegistry;

impl CategoryRegistry for OpenCategoryRegistry {
    fn resolve(&self, name: &str) -> Option<CategoryId> {
        let trimmed = name.trim();
        let well_formed = !trimmed.is_empty()
            && trimmed
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | ' '));
        well_formed.then(|| CategoryId::new(trimmed))
    }
}

/// Registry backed by an explicit list of known categories.
#[derive(Debug, Clone, Default)]
pub struct StaticCategoryRegistry {
    known: BTreeSet<CategoryId>,
}

impl StaticCategoryRegistry {
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            known: names.into_iter().map(CategoryId::new).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.known.len()
    }

    pub fn is_empty(&self) -> bool {
        self.known.is_empty()
    }
}

impl CategoryRegistry for StaticCategoryRegistry {
    fn resolve(&self, name: &str) -> Option<CategoryId> {
        let id = CategoryId::new(name);
        self.known.contains(&id).then_some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_registry_normalizes_and_rejects_garbage() {
        let registry = OpenCategoryRegistry;
        assert_eq!(
            registry.resolve("diamond_sword"),
            Some(CategoryId::new("DIAMOND_SWORD"))
        );
        assert!(registry.resolve("   ").is_none());
        assert!(registry.resolve("sword!").is_none());
    }

    #[test]
    fn static_registry_matches_case_insensitively() {
        let registry = StaticCategoryRegistry::from_names(["DIAMOND_SWORD", "bow"]);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.resolve("Diamond_Sword"), Some(CategoryId::new("DIAMOND_SWORD")));
        assert_eq!(registry.resolve("BOW"), Some(CategoryId::new("BOW")));
        assert!(registry.resolve("TRIDENT").is_none());
    }
}
