// =============================================================================
// CACHE — Un mapper compilé par paire, au plus une synthèse
// =============================================================================
//
// Chaque paire possède un EMPLACEMENT (`OnceCell`) partagé :
//
//   TypePair ──► Arc<OnceCell<MapperCacheItem>>
//                      │
//                      ├── vide      : jamais compilé, ou synthèse échouée
//                      └── rempli    : (id, mapper) publié, définitif
//
// - Deux threads qui demandent la même paire inconnue : l'un synthétise,
//   l'autre attend sur l'emplacement puis adopte le même mapper.
// - Le verrou de la table n'est tenu que le temps de récupérer l'emplacement :
//   une synthèse longue ne bloque aucune autre paire.
// - Une synthèse qui échoue laisse l'emplacement VIDE : l'appel suivant
//   retente, rien n'est empoisonné.
//
// Les ids sont attribués après une synthèse réussie, dans l'ordre de
// publication ; ils ne changent plus ensuite.
//
// =============================================================================

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use once_cell::sync::OnceCell;
use tracing::debug;

use super::error::MapError;
use super::pair::TypePair;
use super::synth::CompiledMapper;

/// Entrée publiée du cache.
#[derive(Debug, Clone)]
pub struct MapperCacheItem {
    pub id: u64,
    pub mapper: Arc<CompiledMapper>,
}

type Slot = Arc<OnceCell<MapperCacheItem>>;

#[derive(Debug, Default)]
pub struct MapperCache {
    slots: DashMap<TypePair, Slot>,
    next_id: AtomicU64,
}

impl MapperCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mapper publié pour `pair`, sans jamais déclencher de synthèse.
    pub fn get(&self, pair: &TypePair) -> Option<MapperCacheItem> {
        self.slots.get(pair).and_then(|slot| slot.get().cloned())
    }

    /// Retourne le mapper de `pair`, en le synthétisant via `factory` au besoin.
    pub fn get_or_create<F>(&self, pair: TypePair, factory: F) -> Result<MapperCacheItem, MapError>
    where
        F: FnOnce() -> Result<CompiledMapper, MapError>,
    {
        if let Some(item) = self.get(&pair) {
            return Ok(item);
        }

        // Le verrou de shard est relâché avant l'initialisation
        let slot: Slot = Arc::clone(self.slots.entry(pair).or_default().value());

        let item = slot.get_or_try_init(|| {
            let mapper = factory()?;
            let id = self.next_id.fetch_add(1, Ordering::Relaxed);
            debug!(pair = %pair, id, "mapper publié");
            Ok::<_, MapError>(MapperCacheItem {
                id,
                mapper: Arc::new(mapper),
            })
        })?;

        Ok(item.clone())
    }

    /// Tous les mappers publiés, par ordre de création.
    pub fn snapshot(&self) -> Vec<MapperCacheItem> {
        let mut items: Vec<MapperCacheItem> = self
            .slots
            .iter()
            .filter_map(|slot| slot.value().get().cloned())
            .collect();
        items.sort_by_key(|item| item.id);
        items
    }

    /// Nombre de mappers publiés (les emplacements vides ne comptent pas)
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.value().get().is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
