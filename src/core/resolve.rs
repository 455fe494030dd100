// =============================================================================
// RESOLVE — Du couple de shapes au plan de conversion
// =============================================================================
//
// Le résolveur décide COMMENT convertir une paire, sans rien exécuter :
//
//   même scalaire              → Clone     (copie de la valeur)
//   conversion déclarée        → Convert   (`accepts::<S>()`, élargissements)
//   cible conteneur            → Sequence / Array / Keyed (voir container)
//   record → record            → Record    (liste ordonnée de MappingMember)
//   tout le reste              → UnsupportedConversion
//
// Pour un record, chaque membre source passe par la chaîne de priorités :
//
//   1. ignore porté par le membre (sans portée, ou limité à la cible)
//   2. ignore déclaré par configuration
//   3. nom candidat :
//        a. bind du membre limité à la cible
//        b. bind du membre sans portée
//        c. bind de configuration
//        d. membre cible qui réclame ce nom source
//        e. le nom du membre lui-même
//   4. correspondance EXACTE (casse comprise) avec un membre cible inscriptible
//
// Un membre sans correspondance est abandonné silencieusement.
//
// Les conversions imbriquées (valeur d'un membre, élément, clé...) sont
// désignées par des `PairRef` : elles forment les dépendances du plan.
//
// =============================================================================

use std::fmt;

use tracing::trace;

use super::binding::{BindingConfig, BindingRegistry};
use super::container::{self, KeyedPlan, SequencePlan};
use super::error::MapError;
use super::pair::PairRef;
use super::registry::ShapeRegistry;
use super::shape::{ConstructFn, ConvertFn, Getter, MemberDescriptor, Override, Setter, Shape, ShapeId, ShapeKind};

/// Une correspondance résolue : membre source lisible → membre cible inscriptible.
#[derive(Clone)]
pub struct MappingMember {
    pub source_name: String,
    pub target_name: String,
    /// Conversion de la valeur du membre
    pub value: PairRef,
    pub(crate) read: Getter,
    pub(crate) write: Setter,
}

impl fmt::Debug for MappingMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {} ({})", self.source_name, self.target_name, self.value)
    }
}

#[derive(Debug, Clone)]
pub struct RecordPlan {
    pub members: Vec<MappingMember>,
    pub construct: Option<ConstructFn>,
}

/// Stratégie retenue pour une paire.
#[derive(Clone)]
pub enum Plan {
    Clone(ConvertFn),
    Convert(ConvertFn),
    Record(RecordPlan),
    Sequence(SequencePlan),
    Array(SequencePlan),
    Keyed(KeyedPlan),
}

impl Plan {
    /// Les paires imbriquées dont ce plan a besoin
    pub fn dependencies(&self) -> Vec<PairRef> {
        match self {
            Plan::Clone(_) | Plan::Convert(_) => Vec::new(),
            Plan::Record(record) => record.members.iter().map(|m| m.value).collect(),
            Plan::Sequence(seq) | Plan::Array(seq) => vec![seq.element],
            Plan::Keyed(keyed) => vec![keyed.key, keyed.value],
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Plan::Clone(_) => "copie",
            Plan::Convert(_) => "conversion",
            Plan::Record(_) => "record",
            Plan::Sequence(_) => "séquence",
            Plan::Array(_) => "tableau",
            Plan::Keyed(_) => "dictionnaire",
        }
    }
}

impl fmt::Debug for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Plan::Record(record) => f.debug_list().entries(&record.members).finish(),
            other => write!(f, "{}", other.label()),
        }
    }
}

/// Calcule les plans à partir des shapes et des liaisons connues.
pub struct Resolver<'a> {
    shapes: &'a ShapeRegistry,
    bindings: &'a BindingRegistry,
}

impl<'a> Resolver<'a> {
    pub fn new(shapes: &'a ShapeRegistry, bindings: &'a BindingRegistry) -> Self {
        Resolver { shapes, bindings }
    }

    pub fn plan(&self, pair: PairRef) -> Result<Plan, MapError> {
        let source = self.shapes.resolve(pair.source);
        let target = self.shapes.resolve(pair.target);

        if source.id() == target.id() {
            if let ShapeKind::Scalar { duplicate } = target.kind() {
                return Ok(Plan::Clone(duplicate.clone()));
            }
        }

        if let Some(convert) = target.conversion_from(source.id()) {
            return Ok(Plan::Convert(convert.clone()));
        }

        if target.kind().is_container() {
            return container::plan_container(&source, &target);
        }

        match (source.kind(), target.kind()) {
            (ShapeKind::Record(_), ShapeKind::Record(record)) => {
                let config = self.bindings.effective(&source, &target);
                Ok(Plan::Record(RecordPlan {
                    members: resolve_members(&source, &target, &config),
                    construct: record.construct,
                }))
            }
            (from, to) => Err(MapError::unsupported(
                source.name(),
                target.name(),
                format!("aucune conversion d'un {} vers un {}", from.label(), to.label()),
            )),
        }
    }
}

/// Produit la liste ordonnée des correspondances de `source` vers `target`.
///
/// L'ordre suit l'énumération des membres source.
pub fn resolve_members(source: &Shape, target: &Shape, config: &BindingConfig) -> Vec<MappingMember> {
    let (sid, tid) = (source.id(), target.id());

    let candidates: Vec<&MemberDescriptor> = target
        .members()
        .iter()
        .filter(|m| m.is_writable() && admits_source(m, sid))
        .collect();

    let mut resolved = Vec::new();

    for member in source.members().iter().filter(|m| m.is_readable()) {
        if member.is_ignored_for(tid) || config.is_ignored(&member.name) {
            trace!(source = %source.name(), member = %member.name, "membre ignoré");
            continue;
        }

        let name = member
            .binding_for(tid)
            .or_else(|| config.bound_name(&member.name))
            .or_else(|| {
                candidates
                    .iter()
                    .find(|t| t.binding_for(sid) == Some(member.name.as_str()))
                    .map(|t| t.name.as_str())
            })
            .unwrap_or(member.name.as_str());

        let Some(slot) = candidates.iter().find(|t| t.name == name) else {
            trace!(source = %source.name(), member = %member.name, candidate = name, "aucun membre cible correspondant");
            continue;
        };

        let (Some(read), Some(write)) = (member.getter(), slot.setter()) else {
            continue;
        };

        resolved.push(MappingMember {
            source_name: member.name.clone(),
            target_name: slot.name.clone(),
            value: PairRef::new(member.value, slot.value),
            read: read.clone(),
            write: write.clone(),
        });
    }

    resolved
}

/// Un membre cible est candidat s'il n'ignore pas `source` et si ses binds,
/// quand ils sont tous limités à d'autres shapes, n'excluent pas `source`.
fn admits_source(member: &MemberDescriptor, source: ShapeId) -> bool {
    if member.is_ignored_for(source) {
        return false;
    }
    let mut scopes = member
        .overrides
        .iter()
        .filter_map(|o| match o {
            Override::Bind { scope, .. } => Some(scope),
            Override::Ignore { .. } => None,
        })
        .peekable();
    scopes.peek().is_none() || scopes.any(|scope| scope.admits(source))
}

// =============================================================================
// TESTS
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixtures::{Profile, Record, User};
    use crate::core::pair::TypePair;
    use crate::core::typeside::Mappable;
    use std::collections::HashMap;

    fn names(members: &[MappingMember]) -> Vec<(&str, &str)> {
        members
            .iter()
            .map(|m| (m.source_name.as_str(), m.target_name.as_str()))
            .collect()
    }

    #[test]
    fn test_scoped_bind_and_scoped_ignore() {
        let members = resolve_members(&User::shape(), &Record::shape(), &BindingConfig::new());
        // Id → Key (bind limité à Record), Email ignoré pour Record,
        // Password ignoré partout, Tags et Score sans correspondance
        assert_eq!(names(&members), vec![("Id", "Key"), ("Name", "Name")]);
    }

    #[test]
    fn test_scoped_bind_beats_config() {
        let mut config = BindingConfig::new();
        config.bind("Id", "UserId");
        let members = resolve_members(&User::shape(), &Record::shape(), &config);
        assert_eq!(members[0].target_name, "Key");
    }

    #[test]
    fn test_target_side_bind_claims_source_name() {
        let members = resolve_members(&User::shape(), &Profile::shape(), &BindingConfig::new());
        assert_eq!(
            names(&members),
            vec![("Id", "UserId"), ("Name", "Name"), ("Email", "Email"), ("Tags", "Tags"), ("Score", "Score")]
        );
    }

    #[test]
    fn test_config_ignore_and_bind() {
        let mut config = BindingConfig::new();
        config.ignore("Name").bind("Email", "Name");
        let members = resolve_members(&User::shape(), &Profile::shape(), &config);
        assert!(names(&members).contains(&("Email", "Name")));
        assert!(!members.iter().any(|m| m.source_name == "Name"));
    }

    #[test]
    fn test_resolution_is_reproducible() {
        let first = names(&resolve_members(&User::shape(), &Profile::shape(), &BindingConfig::new()))
            .into_iter()
            .map(|(a, b)| (a.to_string(), b.to_string()))
            .collect::<Vec<_>>();
        for _ in 0..5 {
            let again = resolve_members(&User::shape(), &Profile::shape(), &BindingConfig::new());
            let again: Vec<_> = names(&again)
                .into_iter()
                .map(|(a, b)| (a.to_string(), b.to_string()))
                .collect();
            assert_eq!(again, first);
        }
    }

    #[test]
    fn test_plan_kinds() {
        let shapes = ShapeRegistry::default();
        let bindings = BindingRegistry::default();
        let resolver = Resolver::new(&shapes, &bindings);

        let plan = |pair: PairRef| resolver.plan(pair).map(|p| p.label());
        assert_eq!(plan(PairRef::of::<u32, u32>()), Ok("copie"));
        assert_eq!(plan(PairRef::of::<i32, i64>()), Ok("conversion"));
        assert_eq!(plan(PairRef::of::<User, Profile>()), Ok("record"));
        assert_eq!(plan(PairRef::of::<Vec<u8>, Vec<u16>>()), Ok("séquence"));
        assert_eq!(plan(PairRef::of::<Vec<u8>, Box<[u8]>>()), Ok("tableau"));
        assert_eq!(plan(PairRef::of::<HashMap<String, u8>, HashMap<String, u8>>()), Ok("dictionnaire"));
    }

    #[test]
    fn test_plan_dependencies() {
        let shapes = ShapeRegistry::default();
        let bindings = BindingRegistry::default();
        let plan = Resolver::new(&shapes, &bindings)
            .plan(PairRef::of::<User, Record>())
            .unwrap();
        let deps: Vec<TypePair> = plan.dependencies().iter().map(|d| d.pair()).collect();
        assert_eq!(deps, vec![TypePair::of::<u64, u64>(), TypePair::of::<String, String>()]);
    }

    #[test]
    fn test_scalar_to_record_unsupported() {
        let shapes = ShapeRegistry::default();
        let bindings = BindingRegistry::default();
        let result = Resolver::new(&shapes, &bindings).plan(PairRef::of::<u64, User>());
        assert!(matches!(result, Err(MapError::UnsupportedConversion { .. })));
    }

    #[test]
    fn test_lossy_scalar_unsupported() {
        let shapes = ShapeRegistry::default();
        let bindings = BindingRegistry::default();
        let result = Resolver::new(&shapes, &bindings).plan(PairRef::of::<i64, i32>());
        assert!(matches!(result, Err(MapError::UnsupportedConversion { .. })));
    }
}
