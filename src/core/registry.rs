// =============================================================================
// REGISTRY — Les shapes construites une seule fois
// =============================================================================
//
// Décrire une shape coûte (allocation des accesseurs, des overrides...).
// Le registre garde chaque shape derrière un `Arc`, indexée par son
// identité nominale ; toutes les résolutions partagent la même table.
//
// À la première construction, la shape peut être validée : les problèmes
// sont journalisés, jamais bloquants.
//
// =============================================================================

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::warn;

use super::shape::{Shape, ShapeId, ShapeRef};
use super::validate::validate_shape;

#[derive(Debug)]
pub struct ShapeRegistry {
    shapes: DashMap<ShapeId, Arc<Shape>>,
    validate: bool,
}

impl ShapeRegistry {
    pub fn new(validate: bool) -> Self {
        ShapeRegistry {
            shapes: DashMap::new(),
            validate,
        }
    }

    /// Retourne la shape référencée, en la construisant au premier accès.
    pub fn resolve(&self, shape: ShapeRef) -> Arc<Shape> {
        if let Some(existing) = self.shapes.get(&shape.id()) {
            return Arc::clone(existing.value());
        }

        // Construite hors verrou : la description peut référencer d'autres shapes
        let built = Arc::new(shape.build());

        match self.shapes.entry(shape.id()) {
            Entry::Occupied(entry) => Arc::clone(entry.get()),
            Entry::Vacant(entry) => {
                if self.validate {
                    if let Err(issues) = validate_shape(&built) {
                        for issue in issues {
                            warn!(shape = %built.name(), "{}", issue);
                        }
                    }
                }
                Arc::clone(entry.insert(built).value())
            }
        }
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

impl Default for ShapeRegistry {
    fn default() -> Self {
        Self::new(true)
    }
}

// =============================================================================
// TESTS
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixtures::User;

    #[test]
    fn test_shape_built_once_and_shared() {
        let registry = ShapeRegistry::default();
        let first = registry.resolve(ShapeRef::of::<User>());
        let second = registry.resolve(ShapeRef::of::<User>());
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_distinct_types_distinct_entries() {
        let registry = ShapeRegistry::new(false);
        registry.resolve(ShapeRef::of::<User>());
        registry.resolve(ShapeRef::of::<Vec<User>>());
        assert_eq!(registry.len(), 2);
    }
}
