// =============================================================================
// ENGINE — Le point d'entrée : `Mapper`
// =============================================================================
//
// Le Mapper assemble les pièces du moteur :
//
//   map::<User, Record>(&user)
//      │
//      ├─ cache.get(User → Record) ── trouvé ──► invocation
//      │
//      └─ absent :
//           1. vérifier que le graphe des paires imbriquées est sans cycle
//           2. résoudre le plan            (resolve / container)
//           3. compiler les dépendances    (récursivement, via le cache)
//           4. synthétiser la routine      (synth)
//           5. publier dans le cache       (id de création)
//
// Le Mapper est un composant explicite : on le construit une fois et on le
// partage (`Arc<Mapper>`) entre tous les appelants ; il n'y a pas d'état global.
//
// RÉCURSION : une paire qui dépend d'elle-même (Node → NodeDto contient
// Vec<Node> → Vec<NodeDto>, qui contient Node → NodeDto...) est refusée
// avec RecursiveDependency, au lieu de boucler ou de se bloquer sur son
// propre emplacement de cache.
//
// Deux niveaux : le parcours en profondeur des plans, lancé à la racine,
// rapporte le cycle avant toute synthèse. La pile thread-local des paires
// en cours n'est qu'un filet derrière ce parcours : elle refuse de rentrer
// dans une paire déjà en synthèse sur ce thread.
//
// =============================================================================

use std::cell::RefCell;
use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, warn};

use super::binding::{BindingBuilder, BindingRegistry, SourceBindingBuilder};
use super::cache::{MapperCache, MapperCacheItem};
use super::error::MapError;
use super::pair::{PairRef, TypePair};
use super::registry::ShapeRegistry;
use super::resolve::{Plan, Resolver};
use super::shape::{AnyBox, ShapeId};
use super::synth::{self, CompiledMapper};
use super::typeside::Mappable;
use crate::config::MapperConfig;

thread_local! {
    /// Paires en cours de synthèse sur ce thread, de la racine à la plus imbriquée
    static IN_PROGRESS: RefCell<Vec<TypePair>> = RefCell::new(Vec::new());
}

/// Marque une paire "en cours" tant que la garde est vivante.
struct InProgress(TypePair);

impl InProgress {
    fn enter(pair: TypePair) -> Result<Self, MapError> {
        IN_PROGRESS.with(|stack| {
            let mut stack = stack.borrow_mut();
            if let Some(pos) = stack.iter().position(|p| *p == pair) {
                return Err(MapError::RecursiveDependency {
                    chain: describe_cycle(&stack[pos..], pair),
                });
            }
            stack.push(pair);
            Ok(InProgress(pair))
        })
    }

    fn is_idle() -> bool {
        IN_PROGRESS.with(|stack| stack.borrow().is_empty())
    }
}

impl Drop for InProgress {
    fn drop(&mut self) {
        IN_PROGRESS.with(|stack| {
            let mut stack = stack.borrow_mut();
            if stack.last() == Some(&self.0) {
                stack.pop();
            }
        });
    }
}

fn describe_cycle(path: &[TypePair], back_to: TypePair) -> String {
    path.iter()
        .chain(std::iter::once(&back_to))
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(" ⇒ ")
}

/// Le moteur de mapping.
#[derive(Debug)]
pub struct Mapper {
    shapes: ShapeRegistry,
    bindings: BindingRegistry,
    cache: MapperCache,
}

impl Mapper {
    pub fn new() -> Self {
        Self::with_config(MapperConfig::default())
    }

    pub fn with_config(config: MapperConfig) -> Self {
        Mapper {
            shapes: ShapeRegistry::new(config.diagnostics.validate_shapes),
            bindings: BindingRegistry::new(config.bindings),
            cache: MapperCache::new(),
        }
    }

    /// Déclare des liaisons pour `S → T`. À faire avant la première conversion.
    pub fn configure<S: Mappable, T: Mappable>(&self) -> BindingBuilder<'_> {
        let pair = TypePair::of::<S, T>();
        if self.cache.get(&pair).is_some() {
            warn!(pair = %pair, "liaisons déclarées après la première utilisation : le mapper compilé reste inchangé");
        }
        self.bindings.for_pair(pair)
    }

    /// Déclare des ignores valables pour toutes les cibles de `S`.
    pub fn configure_source<S: Mappable>(&self) -> SourceBindingBuilder<'_> {
        let source = ShapeId::of::<S>();
        if self.cache.snapshot().iter().any(|item| item.mapper.pair().source == source) {
            warn!(source = %source, "ignores déclarés après la première utilisation de cette source");
        }
        self.bindings.for_source(source)
    }

    /// Convertit `source` en une nouvelle instance de `T`.
    ///
    /// Sans constructeur sans paramètre, échoue avec `ConstructionFailure` ;
    /// la paire reste compilée en cache et `map_into` fonctionne toujours.
    pub fn map<S: Mappable, T: Mappable>(&self, source: &S) -> Result<T, MapError> {
        let mapper = self.compiled::<S, T>()?;
        if !mapper.constructs() {
            return Err(MapError::ConstructionFailure {
                shape: ShapeId::of::<T>().to_string(),
            });
        }
        let out = mapper.invoke(source, None)?;
        unbox(out)
    }

    /// Convertit `source` DANS `target` : les membres cibles non couverts gardent leur valeur.
    pub fn map_into<S: Mappable, T: Mappable>(&self, source: &S, target: T) -> Result<T, MapError> {
        let mapper = self.compiled::<S, T>()?;
        let out = mapper.invoke(source, Some(Box::new(target) as AnyBox))?;
        unbox(out)
    }

    /// Le mapper compilé de `S → T` (synthétisé au premier appel).
    pub fn compiled<S: Mappable, T: Mappable>(&self) -> Result<Arc<CompiledMapper>, MapError> {
        self.compile(PairRef::of::<S, T>())
    }

    /// Tous les mappers compilés, par ordre de création.
    pub fn snapshot(&self) -> Vec<MapperCacheItem> {
        self.cache.snapshot()
    }

    /// Le plan de `pair`, sans rien compiler.
    pub fn plan(&self, pair: PairRef) -> Result<Plan, MapError> {
        let plan = Resolver::new(&self.shapes, &self.bindings).plan(pair)?;
        debug!(pair = %pair, plan = plan.label(), "plan résolu");
        Ok(plan)
    }

    pub fn compile(&self, pair: PairRef) -> Result<Arc<CompiledMapper>, MapError> {
        let key = pair.pair();
        if let Some(item) = self.cache.get(&key) {
            return Ok(item.mapper);
        }

        if InProgress::is_idle() {
            self.check_acyclic(pair)?;
        }

        // La garde précède toujours l'initialisation de l'emplacement
        let _guard = InProgress::enter(key)?;
        let item = self.cache.get_or_create(key, || {
            let plan = self.plan(pair)?;
            let mapper = synth::synthesize(key, plan, &mut |dep| self.compile(dep))?;
            debug!(pair = %key, kind = mapper.kind(), members = mapper.members().len(), "routine synthétisée");
            Ok(mapper)
        })?;

        Ok(item.mapper)
    }

    /// Parcourt en profondeur le graphe des paires non encore publiées.
    fn check_acyclic(&self, root: PairRef) -> Result<(), MapError> {
        let mut path = Vec::new();
        let mut done = HashSet::new();
        self.visit(root, &mut path, &mut done)
    }

    fn visit(&self, pair: PairRef, path: &mut Vec<TypePair>, done: &mut HashSet<TypePair>) -> Result<(), MapError> {
        let key = pair.pair();
        if done.contains(&key) || self.cache.get(&key).is_some() {
            return Ok(());
        }
        if let Some(pos) = path.iter().position(|p| *p == key) {
            return Err(MapError::RecursiveDependency {
                chain: describe_cycle(&path[pos..], key),
            });
        }

        path.push(key);
        for dep in self.plan(pair)?.dependencies() {
            self.visit(dep, path, done)?;
        }
        path.pop();
        done.insert(key);
        Ok(())
    }
}

impl Default for Mapper {
    fn default() -> Self {
        Self::new()
    }
}

fn unbox<T: Mappable>(out: AnyBox) -> Result<T, MapError> {
    out.downcast::<T>()
        .map(|value| *value)
        .map_err(|_| MapError::mismatch::<T>("résultat de la conversion"))
}
