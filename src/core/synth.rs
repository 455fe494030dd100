// =============================================================================
// SYNTH — Compilation d'un plan en routine exécutable
// =============================================================================
//
// La synthèse transforme un Plan (une description) en une CLOSURE qui ne
// fait plus que lire, convertir et écrire :
//
//   Plan::Record [Id → Key, Name → Name]
//        │  compilé une fois
//        ▼
//   |source, cible?| {
//       cible = cible ou constructeur()
//       cible.Key  = mapper(u64 → u64)(source.Id)
//       cible.Name = mapper(String → String)(source.Name)
//   }
//
// Les mappers des conversions imbriquées sont obtenus PENDANT la synthèse :
// l'invocation n'interroge plus jamais le résolveur ni les shapes.
//
// Une conversion imbriquée produit toujours une NOUVELLE valeur ; si sa
// cible ne sait pas se construire, la synthèse échoue tout de suite.
//
// =============================================================================

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use super::container;
use super::error::MapError;
use super::pair::{PairRef, TypePair};
use super::resolve::{Plan, RecordPlan};
use super::shape::AnyBox;

/// La routine effacée : `(source, cible existante?) -> cible`.
pub type Routine = Box<dyn Fn(&dyn Any, Option<AnyBox>) -> Result<AnyBox, MapError> + Send + Sync>;

/// Procédure de conversion compilée pour une paire, immuable.
pub struct CompiledMapper {
    pair: TypePair,
    kind: &'static str,
    members: Vec<(String, String)>,
    constructs: bool,
    routine: Routine,
}

impl CompiledMapper {
    pub(crate) fn new(pair: TypePair, kind: &'static str, constructs: bool, routine: Routine) -> Self {
        CompiledMapper {
            pair,
            kind,
            members: Vec::new(),
            constructs,
            routine,
        }
    }

    pub fn pair(&self) -> TypePair {
        self.pair
    }

    /// Nature du plan compilé ("record", "séquence"...)
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// Correspondances (source, cible) dans l'ordre d'écriture, pour un record
    pub fn members(&self) -> &[(String, String)] {
        &self.members
    }

    /// La routine sait-elle produire une cible sans instance existante ?
    pub fn constructs(&self) -> bool {
        self.constructs
    }

    /// Exécute la conversion.
    pub fn invoke(&self, source: &dyn Any, existing: Option<AnyBox>) -> Result<AnyBox, MapError> {
        if !self.pair.source.matches(source) {
            return Err(MapError::TypeMismatch {
                expected: self.pair.source.type_name(),
                context: format!("source de {}", self.pair),
            });
        }
        (self.routine)(source, existing)
    }
}

impl fmt::Debug for CompiledMapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledMapper")
            .field("pair", &self.pair)
            .field("kind", &self.kind)
            .field("members", &self.members)
            .field("constructs", &self.constructs)
            .finish()
    }
}

impl fmt::Display for CompiledMapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mapper {} ({})", self.pair, self.kind)?;
        if !self.members.is_empty() {
            let members: Vec<String> = self.members.iter().map(|(s, t)| format!("{} → {}", s, t)).collect();
            write!(f, " : {}", members.join(", "))?;
        }
        Ok(())
    }
}

/// Compile `plan` pour `pair`.
///
/// `nested` fournit le mapper compilé d'une paire imbriquée (en pratique :
/// le moteur, cache compris).
pub fn synthesize(
    pair: TypePair,
    plan: Plan,
    nested: &mut dyn FnMut(PairRef) -> Result<Arc<CompiledMapper>, MapError>,
) -> Result<CompiledMapper, MapError> {
    let kind = plan.label();
    let mut dependency = |dep: PairRef| -> Result<Arc<CompiledMapper>, MapError> {
        let mapper = nested(dep)?;
        if !mapper.constructs() {
            return Err(MapError::ConstructionFailure {
                shape: dep.target.id().to_string(),
            });
        }
        Ok(mapper)
    };

    let mapper = match plan {
        Plan::Clone(convert) | Plan::Convert(convert) => CompiledMapper::new(
            pair,
            kind,
            true,
            Box::new(move |source: &dyn Any, _existing: Option<AnyBox>| convert(source)),
        ),
        Plan::Record(record) => {
            let members = record
                .members
                .iter()
                .map(|m| (m.source_name.clone(), m.target_name.clone()))
                .collect();
            let constructs = record.construct.is_some();
            let routine = record_routine(pair, record, &mut dependency)?;
            CompiledMapper {
                members,
                ..CompiledMapper::new(pair, kind, constructs, routine)
            }
        }
        Plan::Sequence(seq) | Plan::Array(seq) => {
            let element = dependency(seq.element)?;
            CompiledMapper::new(pair, kind, true, container::sequence_routine(&seq, element))
        }
        Plan::Keyed(keyed) => {
            let key = dependency(keyed.key)?;
            let value = dependency(keyed.value)?;
            CompiledMapper::new(pair, kind, true, container::keyed_routine(&keyed, key, value))
        }
    };

    Ok(mapper)
}

fn record_routine(
    pair: TypePair,
    record: RecordPlan,
    dependency: &mut dyn FnMut(PairRef) -> Result<Arc<CompiledMapper>, MapError>,
) -> Result<Routine, MapError> {
    let mut steps = Vec::with_capacity(record.members.len());
    for member in record.members {
        let mapper = dependency(member.value)?;
        steps.push((member, mapper));
    }
    let construct = record.construct;

    Ok(Box::new(move |source: &dyn Any, existing: Option<AnyBox>| {
        let mut target = match (existing, construct) {
            (Some(target), _) => target,
            (None, Some(construct)) => construct(),
            (None, None) => {
                return Err(MapError::ConstructionFailure {
                    shape: pair.target.to_string(),
                })
            }
        };

        for (member, mapper) in &steps {
            let value = (member.read)(source).ok_or_else(|| MapError::MissingMember {
                shape: pair.source.to_string(),
                member: member.source_name.clone(),
            })?;
            let converted = mapper.invoke(value, None)?;
            (member.write)(target.as_mut(), converted)?;
        }
        Ok(target)
    }))
}
