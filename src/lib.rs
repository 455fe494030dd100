// =============================================================================
// QUICKMAP — Moteur de mapping objet → objet en Rust
// =============================================================================
//
// Quickmap convertit des instances d'un type vers un autre en appariant
// leurs membres par nom, overrides et configuration. Le travail coûteux
// (introspection, priorités, conteneurs) est fait UNE fois par paire de
// types ; ensuite, chaque conversion n'exécute qu'une routine compilée.
//
// Architecture :
//   core/      → Le moteur pur (shapes, plans, synthèse, cache)
//   config     → Configuration TOML (liaisons, diagnostics)
//   logging    → Initialisation du journal (tracing)
//
// Concepts fondamentaux :
//   Shape          = la description d'un type (membres, accesseurs, overrides)
//   TypePair       = une demande de conversion orientée (source → cible)
//   Plan           = comment convertir une paire (record, séquence...)
//   CompiledMapper = la routine synthétisée, réutilisable, partagée
//
// =============================================================================

pub mod core;
pub mod config;
pub mod logging;

pub use crate::config::MapperConfig;
pub use crate::core::engine::Mapper;
pub use crate::core::error::{ConfigError, MapError};
pub use crate::core::shape::{Override, Shape};
pub use crate::core::typeside::Mappable;
