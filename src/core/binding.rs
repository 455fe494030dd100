// =============================================================================
// BINDING — Les liaisons déclarées par l'utilisateur
// =============================================================================
//
// Une BindingConfig complète les overrides portés par les membres :
//   - "lier" un membre source à un membre cible de nom différent
//   - "ignorer" un membre source pour une paire donnée
//
// Trois origines, de la plus faible à la plus forte :
//   1. le fichier de configuration (shapes désignées par leur nom)
//   2. le code (`Mapper::configure::<S, T>()`)
//   3. les ignores globaux d'une source (`Mapper::configure_source::<S>()`),
//      qui s'ajoutent à ceux de chaque paire
//
// Les overrides des membres restent prioritaires sur tout ce qui est ici.
//
// EXEMPLE :
//
//   mapper.configure::<User, Record>()
//       .bind("Id", "UserId")
//       .ignore("Password");
//
// À déclarer AVANT la première conversion de la paire : un mapper déjà
// compilé n'est pas reconstruit.
//
// =============================================================================

use std::collections::{HashMap, HashSet};

use dashmap::DashMap;

use super::pair::TypePair;
use super::shape::{Shape, ShapeId};
use crate::config::BindingSpec;

/// Liaisons effectives pour une paire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingConfig {
    /// membre source → membre cible
    binds: HashMap<String, String>,
    ignores: HashSet<String>,
}

impl BindingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, source: &str, target: &str) -> &mut Self {
        self.binds.insert(source.to_string(), target.to_string());
        self
    }

    pub fn ignore(&mut self, source: &str) -> &mut Self {
        self.ignores.insert(source.to_string());
        self
    }

    pub fn is_ignored(&self, source: &str) -> bool {
        self.ignores.contains(source)
    }

    pub fn bound_name(&self, source: &str) -> Option<&str> {
        self.binds.get(source).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.binds.is_empty() && self.ignores.is_empty()
    }

    /// Superpose `other` : ses liaisons remplacent les nôtres, les ignores s'additionnent
    pub fn merge(&mut self, other: &BindingConfig) {
        self.binds
            .extend(other.binds.iter().map(|(s, t)| (s.clone(), t.clone())));
        self.ignores.extend(other.ignores.iter().cloned());
    }
}

impl From<&BindingSpec> for BindingConfig {
    fn from(spec: &BindingSpec) -> Self {
        BindingConfig {
            binds: spec.bind.clone().into_iter().collect(),
            ignores: spec.ignore.iter().cloned().collect(),
        }
    }
}

/// Toutes les liaisons connues du moteur.
#[derive(Debug, Default)]
pub struct BindingRegistry {
    pairs: DashMap<TypePair, BindingConfig>,
    sources: DashMap<ShapeId, HashSet<String>>,
    declared: Vec<BindingSpec>,
}

impl BindingRegistry {
    pub fn new(declared: Vec<BindingSpec>) -> Self {
        BindingRegistry {
            pairs: DashMap::new(),
            sources: DashMap::new(),
            declared,
        }
    }

    pub fn for_pair(&self, pair: TypePair) -> BindingBuilder<'_> {
        BindingBuilder {
            registry: self,
            pair,
        }
    }

    pub fn for_source(&self, source: ShapeId) -> SourceBindingBuilder<'_> {
        SourceBindingBuilder {
            registry: self,
            source,
        }
    }

    /// Calcule la configuration applicable à `source → target`.
    pub fn effective(&self, source: &Shape, target: &Shape) -> BindingConfig {
        let mut config = BindingConfig::default();

        for spec in self
            .declared
            .iter()
            .filter(|s| s.source == source.name() && s.target == target.name())
        {
            config.merge(&BindingConfig::from(spec));
        }

        if let Some(code) = self.pairs.get(&TypePair::new(source.id(), target.id())) {
            config.merge(&code);
        }

        if let Some(ignores) = self.sources.get(&source.id()) {
            config.ignores.extend(ignores.iter().cloned());
        }

        config
    }
}

/// Déclaration des liaisons d'une paire.
pub struct BindingBuilder<'a> {
    registry: &'a BindingRegistry,
    pair: TypePair,
}

impl BindingBuilder<'_> {
    pub fn bind(&mut self, source: &str, target: &str) -> &mut Self {
        self.registry
            .pairs
            .entry(self.pair)
            .or_default()
            .bind(source, target);
        self
    }

    pub fn ignore(&mut self, source: &str) -> &mut Self {
        self.registry.pairs.entry(self.pair).or_default().ignore(source);
        self
    }
}

/// Ignores valables pour toutes les cibles d'une source.
pub struct SourceBindingBuilder<'a> {
    registry: &'a BindingRegistry,
    source: ShapeId,
}

impl SourceBindingBuilder<'_> {
    pub fn ignore(&mut self, member: &str) -> &mut Self {
        self.registry
            .sources
            .entry(self.source)
            .or_default()
            .insert(member.to_string());
        self
    }
}

// =============================================================================
// TESTS
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixtures::{Profile, Record, User};
    use crate::core::typeside::Mappable;

    fn spec(source: &str, target: &str, bind: &[(&str, &str)], ignore: &[&str]) -> BindingSpec {
        BindingSpec {
            source: source.into(),
            target: target.into(),
            bind: bind.iter().map(|(s, t)| (s.to_string(), t.to_string())).collect(),
            ignore: ignore.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_builder_records_pair_config() {
        let registry = BindingRegistry::default();
        registry
            .for_pair(TypePair::of::<User, Record>())
            .bind("Id", "UserId")
            .ignore("Score");

        let config = registry.effective(&User::shape(), &Record::shape());
        assert_eq!(config.bound_name("Id"), Some("UserId"));
        assert!(config.is_ignored("Score"));

        // Une autre paire n'est pas concernée
        assert!(registry.effective(&User::shape(), &Profile::shape()).is_empty());
    }

    #[test]
    fn test_code_overrides_file() {
        let registry = BindingRegistry::new(vec![spec("User", "Record", &[("Id", "Key"), ("Name", "Note")], &["Tags"])]);
        registry
            .for_pair(TypePair::of::<User, Record>())
            .bind("Id", "UserId");

        let config = registry.effective(&User::shape(), &Record::shape());
        assert_eq!(config.bound_name("Id"), Some("UserId"));
        assert_eq!(config.bound_name("Name"), Some("Note"));
        assert!(config.is_ignored("Tags"));
    }

    #[test]
    fn test_file_specs_match_by_shape_name() {
        let registry = BindingRegistry::new(vec![spec("User", "Nope", &[("Id", "Key")], &[])]);
        assert!(registry.effective(&User::shape(), &Record::shape()).is_empty());
    }

    #[test]
    fn test_source_ignores_apply_to_every_target() {
        let registry = BindingRegistry::default();
        registry.for_source(User::shape().id()).ignore("Name");

        assert!(registry.effective(&User::shape(), &Record::shape()).is_ignored("Name"));
        assert!(registry.effective(&User::shape(), &Profile::shape()).is_ignored("Name"));
    }

    #[test]
    fn test_merge_unions_ignores() {
        let mut a = BindingConfig::new();
        a.bind("X", "Y").ignore("A");
        let mut b = BindingConfig::new();
        b.bind("X", "Z").ignore("B");
        a.merge(&b);
        assert_eq!(a.bound_name("X"), Some("Z"));
        assert!(a.is_ignored("A") && a.is_ignored("B"));
    }
}
