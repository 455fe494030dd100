// =============================================================================
// CONFIG — Configuration du moteur (fichier TOML)
// =============================================================================
//
// La configuration est optionnelle : `Mapper::new()` applique les valeurs
// par défaut. Un fichier permet de déclarer des liaisons sans toucher au
// code, en désignant les shapes par leur nom :
//
// ```toml
// [diagnostics]
// validate_shapes = true
//
// [[bindings]]
// source = "User"
// target = "Profile"
// bind = { Id = "UserId" }
// ignore = ["Password"]
// ```
//
// Les liaisons déclarées par code (`Mapper::configure`) priment sur celles
// du fichier.
//
// =============================================================================

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::core::error::ConfigError;

/// Configuration complète du moteur.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MapperConfig {
    pub diagnostics: DiagnosticsConfig,
    pub bindings: Vec<BindingSpec>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DiagnosticsConfig {
    /// Valide chaque shape à sa première résolution et journalise les problèmes
    pub validate_shapes: bool,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        DiagnosticsConfig {
            validate_shapes: true,
        }
    }
}

/// Liaisons déclarées pour une paire, désignée par les noms de shapes.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BindingSpec {
    pub source: String,
    pub target: String,
    /// membre source → membre cible
    #[serde(default)]
    pub bind: BTreeMap<String, String>,
    #[serde(default)]
    pub ignore: Vec<String>,
}

impl MapperConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Self::parse(content, "<inline>")
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&content, &path.display().to_string())
    }

    fn parse(content: &str, origin: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: origin.to_string(),
            message: e.to_string(),
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = MapperConfig::default();
        assert!(config.diagnostics.validate_shapes);
        assert!(config.bindings.is_empty());
    }

    #[test]
    fn test_empty_document_gives_defaults() {
        assert_eq!(MapperConfig::from_toml_str("").unwrap(), MapperConfig::default());
    }

    #[test]
    fn test_parse_bindings() {
        let config = MapperConfig::from_toml_str(
            r#"
            [diagnostics]
            validate_shapes = false

            [[bindings]]
            source = "User"
            target = "Profile"
            bind = { Id = "UserId" }
            ignore = ["Password"]
            "#,
        )
        .unwrap();

        assert!(!config.diagnostics.validate_shapes);
        assert_eq!(config.bindings.len(), 1);
        let spec = &config.bindings[0];
        assert_eq!(spec.source, "User");
        assert_eq!(spec.bind.get("Id").map(String::as_str), Some("UserId"));
        assert_eq!(spec.ignore, vec!["Password".to_string()]);
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let err = MapperConfig::from_toml_str("bindings = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[[bindings]]\nsource = \"A\"\ntarget = \"B\"\nignore = [\"X\"]").unwrap();
        let config = MapperConfig::load(file.path()).unwrap();
        assert_eq!(config.bindings[0].target, "B");
        assert!(config.bindings[0].bind.is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let err = MapperConfig::load(Path::new("/nonexistent/quickmap.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
