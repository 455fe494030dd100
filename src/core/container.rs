// =============================================================================
// CONTAINER — Conversion des séquences, tableaux et dictionnaires
// =============================================================================
//
// Quand la cible est un conteneur homogène, la stratégie dépend de sa nature :
//
//   cible séquence (Vec, VecDeque)  ← source séquence ou tableau
//   cible tableau (Box<[T]>)        ← source séquence ou tableau
//   cible dictionnaire              ← source dictionnaire UNIQUEMENT
//
// Toute autre combinaison (dictionnaire → séquence, scalaire → dictionnaire...)
// est refusée dès la résolution.
//
// Chaque élément, clé ou valeur est converti par un mapper compilé du
// moteur : les conversions imbriquées profitent du même cache.
//
// EXEMPLE :
//
//   {"a": 1, "b": 2} : HashMap<String, i32>
//        │   clé   String → Label      (conversion indépendante)
//        │   valeur i32   → Amount     (conversion indépendante)
//        ▼
//   {Label(a): Amount(1), Label(b): Amount(2)} : HashMap<Label, Amount>
//
// Deux clés converties égales : la dernière insertion l'emporte.
//
// =============================================================================

use std::any::Any;
use std::sync::Arc;

use tracing::trace;

use super::error::MapError;
use super::pair::PairRef;
use super::resolve::Plan;
use super::shape::{AnyBox, CollectFn, CollectPairsFn, ElementsFn, EntriesFn, Shape, ShapeKind};
use super::synth::{CompiledMapper, Routine};

/// Conversion élément par élément.
#[derive(Clone)]
pub struct SequencePlan {
    pub element: PairRef,
    pub(crate) elements: ElementsFn,
    pub(crate) collect: CollectFn,
}

/// Conversion clé par clé et valeur par valeur.
#[derive(Clone)]
pub struct KeyedPlan {
    pub key: PairRef,
    pub value: PairRef,
    pub(crate) entries: EntriesFn,
    pub(crate) collect: CollectPairsFn,
}

/// Choisit la stratégie pour une cible conteneur.
pub fn plan_container(source: &Shape, target: &Shape) -> Result<Plan, MapError> {
    match (source.kind(), target.kind()) {
        (ShapeKind::Sequence(from) | ShapeKind::Array(from), ShapeKind::Sequence(to)) => {
            Ok(Plan::Sequence(SequencePlan {
                element: PairRef::new(from.element, to.element),
                elements: from.elements.clone(),
                collect: to.collect.clone(),
            }))
        }
        (ShapeKind::Sequence(from) | ShapeKind::Array(from), ShapeKind::Array(to)) => {
            Ok(Plan::Array(SequencePlan {
                element: PairRef::new(from.element, to.element),
                elements: from.elements.clone(),
                collect: to.collect.clone(),
            }))
        }
        (ShapeKind::Keyed(from), ShapeKind::Keyed(to)) => Ok(Plan::Keyed(KeyedPlan {
            key: PairRef::new(from.key, to.key),
            value: PairRef::new(from.value, to.value),
            entries: from.entries.clone(),
            collect: to.collect.clone(),
        })),
        (from, to) => {
            let reason = match to {
                ShapeKind::Keyed(_) => format!("un {} n'est pas un dictionnaire énumérable", from.label()),
                _ => format!("un {} n'est pas une séquence énumérable", from.label()),
            };
            Err(MapError::unsupported(source.name(), target.name(), reason))
        }
    }
}

/// Routine séquence / tableau : l'ordre de la source est conservé.
///
/// Les éléments sont énumérés une seule fois ; leur nombre fixe la taille
/// de la collection produite.
pub(crate) fn sequence_routine(plan: &SequencePlan, element: Arc<CompiledMapper>) -> Routine {
    let elements = plan.elements.clone();
    let collect = plan.collect.clone();
    let pair = plan.element;

    Box::new(move |source: &dyn Any, _existing: Option<AnyBox>| {
        let items = elements(source).ok_or_else(|| MapError::TypeMismatch {
            expected: pair.source.id().type_name(),
            context: "énumération de la source".into(),
        })?;

        let count = items.len();
        let mut converted = Vec::with_capacity(count);
        for item in items {
            converted.push(element.invoke(item, None)?);
        }
        trace!(element = %pair, count, "collection convertie");
        collect(converted)
    })
}

/// Routine dictionnaire : clés et valeurs converties indépendamment.
pub(crate) fn keyed_routine(plan: &KeyedPlan, key: Arc<CompiledMapper>, value: Arc<CompiledMapper>) -> Routine {
    let entries = plan.entries.clone();
    let collect = plan.collect.clone();

    Box::new(move |source: &dyn Any, _existing: Option<AnyBox>| {
        let pairs = entries(source).ok_or_else(|| MapError::TypeMismatch {
            expected: key.pair().source.type_name(),
            context: "énumération du dictionnaire source".into(),
        })?;

        let mut converted = Vec::with_capacity(pairs.len());
        for (k, v) in pairs {
            converted.push((key.invoke(k, None)?, value.invoke(v, None)?));
        }
        collect(converted)
    })
}
