// =============================================================================
// PAIR — L'identité d'une demande de conversion (source → cible)
// =============================================================================
//
// Une TypePair est la SEULE clé du cache. Elle est orientée :
//   User → Record  ≠  Record → User
// et nominale : deux types de même structure donnent deux paires distinctes,
// car la routine compilée est spécialisée sur la table exacte des membres.
//
// =============================================================================

use std::fmt;

use super::shape::{ShapeId, ShapeRef};
use super::typeside::Mappable;

/// Clé canonique `(source, cible)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypePair {
    pub source: ShapeId,
    pub target: ShapeId,
}

impl TypePair {
    pub fn new(source: ShapeId, target: ShapeId) -> Self {
        TypePair { source, target }
    }

    pub fn of<S: Mappable, T: Mappable>() -> Self {
        TypePair::new(ShapeId::of::<S>(), ShapeId::of::<T>())
    }
}

impl fmt::Display for TypePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.source, self.target)
    }
}

/// Une paire accompagnée de quoi résoudre ses deux shapes.
///
/// Les plans désignent leurs conversions imbriquées par des `PairRef`,
/// ce qui rend les dépendances d'une paire explicites.
#[derive(Debug, Clone, Copy)]
pub struct PairRef {
    pub source: ShapeRef,
    pub target: ShapeRef,
}

impl PairRef {
    pub fn new(source: ShapeRef, target: ShapeRef) -> Self {
        PairRef { source, target }
    }

    pub fn of<S: Mappable, T: Mappable>() -> Self {
        PairRef::new(ShapeRef::of::<S>(), ShapeRef::of::<T>())
    }

    pub fn pair(&self) -> TypePair {
        TypePair::new(self.source.id(), self.target.id())
    }
}

impl fmt::Display for PairRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pair())
    }
}
