//! Technology registry
//!
//! Technologies are loaded and validated once, then looked up by name.
//! The registry is never mutated after construction, so a shared reference
//! can be read from any number of threads.

use crate::builtin;
use crate::config::TechnologyFile;
use crate::error::{Result, TechError};
use crate::technology::Technology;
use indexmap::IndexMap;
use std::path::Path;

/// Technologies keyed by name, in definition order
#[derive(Debug, Clone, Default)]
pub struct TechnologyRegistry {
    technologies: IndexMap<String, Technology>,
}

impl TechnologyRegistry {
    /// Registry holding the built-in technologies
    pub fn builtin() -> Self {
        let mut technologies = IndexMap::new();
        let sg13 = builtin::sg13();
        technologies.insert(sg13.name.clone(), sg13);
        TechnologyRegistry { technologies }
    }

    /// Build a registry from already-resolved technologies
    pub fn from_technologies(technologies: impl IntoIterator<Item = Technology>) -> Result<Self> {
        let mut registry = TechnologyRegistry::default();
        for technology in technologies {
            technology.validate()?;
            if registry.technologies.contains_key(&technology.name) {
                return Err(TechError::DuplicateTechnology(technology.name));
            }
            registry
                .technologies
                .insert(technology.name.clone(), technology);
        }
        Ok(registry)
    }

    /// Parse a technology file
    pub fn from_toml(s: &str) -> Result<Self> {
        let file: TechnologyFile = toml::from_str(s).map_err(|e| TechError::Parse(e.to_string()))?;
        let technologies = file
            .technology
            .iter()
            .map(|config| config.resolve())
            .collect::<Result<Vec<_>>>()?;
        Self::from_technologies(technologies)
    }

    /// Read and parse a technology file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| TechError::Io(format!("{}: {}", path.display(), e)))?;
        let registry = Self::from_toml(&contents)?;
        log::info!(
            "Loaded {} technolog{} from {}",
            registry.len(),
            if registry.len() == 1 { "y" } else { "ies" },
            path.display()
        );
        Ok(registry)
    }

    /// Look up a technology by name
    pub fn get(&self, name: &str) -> Result<&Technology> {
        self.technologies
            .get(name)
            .ok_or_else(|| TechError::UnknownTechnology(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.technologies.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Technology> {
        self.technologies.values()
    }

    pub fn len(&self) -> usize {
        self.technologies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.technologies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup() {
        let registry = TechnologyRegistry::builtin();
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["sg13"]);
        assert!(registry.get("sg13").is_ok());
    }

    #[test]
    fn test_unknown_technology() {
        let registry = TechnologyRegistry::builtin();
        assert_eq!(
            registry.get("gf180").unwrap_err(),
            TechError::UnknownTechnology("gf180".to_string())
        );
    }

    #[test]
    fn test_duplicate_technology() {
        let result =
            TechnologyRegistry::from_technologies(vec![builtin::sg13(), builtin::sg13()]);
        assert_eq!(
            result.unwrap_err(),
            TechError::DuplicateTechnology("sg13".to_string())
        );
    }

    #[test]
    fn test_parse_error_is_reported() {
        let result = TechnologyRegistry::from_toml("[[technology]]\nname = 3");
        assert!(matches!(result, Err(TechError::Parse(_))));
    }

    #[test]
    fn test_registry_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TechnologyRegistry>();
        assert_send_sync::<Technology>();
    }
}
