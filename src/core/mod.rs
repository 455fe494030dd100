// =============================================================================
// CORE — Module principal du moteur de mapping
// =============================================================================
//
// Ce module regroupe toute la logique pure du mapping :
// pas de fichier, pas de réseau, uniquement des shapes, des plans et
// des routines compilées.
//
// Architecture (des feuilles vers la racine) :
//   typeside  → les scalaires et conteneurs connus (i32, String, Vec...)
//   shape     → la description d'un type (= le "moule")
//   pair      → l'identité d'une conversion (source → cible)
//   binding   → les liaisons déclarées par l'utilisateur
//   registry  → les shapes construites une seule fois
//   validate  → la vérification des shapes
//   resolve   → le plan d'une paire (membres, priorités)
//   container → séquences, tableaux, dictionnaires
//   synth     → la compilation d'un plan en routine
//   cache     → un mapper par paire, au plus une synthèse
//   engine    → le point d'entrée `Mapper`
//   error     → les erreurs du moteur
//
// =============================================================================

pub mod typeside;
pub mod shape;
pub mod pair;
pub mod binding;
pub mod registry;
pub mod validate;
pub mod resolve;
pub mod container;
pub mod synth;
pub mod cache;
pub mod engine;
pub mod error;

#[cfg(test)]
pub(crate) mod fixtures;
