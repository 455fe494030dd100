// =============================================================================
// SHAPE — La description structurelle d'un type (le "moule")
// =============================================================================
//
// Une SHAPE décrit ce que le moteur a besoin de savoir d'un type pour le
// convertir :
//   - son IDENTITÉ nominale (TypeId), jamais une compatibilité structurelle
//   - sa NATURE : scalaire, record, séquence, tableau, dictionnaire
//   - pour un record, la TABLE DES MEMBRES : nom, type, accesseurs, overrides
//
// ANALOGIE : un record est un nœud, ses membres sont des arêtes vers
// d'autres shapes. La table est construite UNE fois par type, puis
// partagée par toutes les résolutions.
//
// EXEMPLE :
//
//   record User {
//     Id : u64            ── bind "Key" quand la cible est Record
//     Name : String
//     Password : String   ── ignore
//   }
//
// Les accesseurs sont des closures effacées (`&dyn Any`) : c'est ce qui
// permet de compiler une routine générique pour une paire connue au
// runtime seulement.
//
// =============================================================================

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::sync::Arc;

use super::error::MapError;
use super::typeside::Mappable;

/// Une valeur effacée, possédée, transférable entre threads.
pub type AnyBox = Box<dyn Any + Send>;

/// Conversion directe d'une valeur source vers une nouvelle valeur cible.
pub type ConvertFn = Arc<dyn Fn(&dyn Any) -> Result<AnyBox, MapError> + Send + Sync>;
/// Lecture d'un membre : emprunte le champ sur l'instance source.
pub type Getter = Arc<dyn for<'a> Fn(&'a dyn Any) -> Option<&'a dyn Any> + Send + Sync>;
/// Écriture d'un membre : consomme la valeur convertie.
pub type Setter = Arc<dyn Fn(&mut (dyn Any + Send), AnyBox) -> Result<(), MapError> + Send + Sync>;
/// Constructeur sans paramètre.
pub type ConstructFn = fn() -> AnyBox;
/// Énumère les éléments d'une collection, dans l'ordre d'itération.
pub type ElementsFn = Arc<dyn for<'a> Fn(&'a dyn Any) -> Option<Vec<&'a dyn Any>> + Send + Sync>;
/// Énumère les paires (clé, valeur) d'un dictionnaire.
pub type EntriesFn =
    Arc<dyn for<'a> Fn(&'a dyn Any) -> Option<Vec<(&'a dyn Any, &'a dyn Any)>> + Send + Sync>;
/// Reconstruit une collection à partir d'éléments déjà convertis.
pub type CollectFn = Arc<dyn Fn(Vec<AnyBox>) -> Result<AnyBox, MapError> + Send + Sync>;
/// Reconstruit un dictionnaire à partir de paires déjà converties.
pub type CollectPairsFn = Arc<dyn Fn(Vec<(AnyBox, AnyBox)>) -> Result<AnyBox, MapError> + Send + Sync>;

pub(crate) fn getter<G>(g: G) -> Getter
where
    G: for<'a> Fn(&'a dyn Any) -> Option<&'a dyn Any> + Send + Sync + 'static,
{
    Arc::new(g)
}

pub(crate) fn elements<E>(e: E) -> ElementsFn
where
    E: for<'a> Fn(&'a dyn Any) -> Option<Vec<&'a dyn Any>> + Send + Sync + 'static,
{
    Arc::new(e)
}

pub(crate) fn entries<E>(e: E) -> EntriesFn
where
    E: for<'a> Fn(&'a dyn Any) -> Option<Vec<(&'a dyn Any, &'a dyn Any)>> + Send + Sync + 'static,
{
    Arc::new(e)
}

/// Identité nominale d'une shape.
///
/// Égalité et hash portent uniquement sur le `TypeId` : deux types de même
/// structure restent deux shapes distinctes.
#[derive(Clone, Copy)]
pub struct ShapeId {
    type_id: TypeId,
    type_name: &'static str,
}

impl ShapeId {
    pub fn of<T: Any>() -> Self {
        ShapeId {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Nom complet du type (chemins de modules inclus)
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// La valeur effacée est-elle de ce type ?
    pub fn matches(&self, value: &dyn Any) -> bool {
        (*value).type_id() == self.type_id
    }

    /// Nom sans chemins de modules : `Vec<User>` plutôt que `alloc::vec::Vec<app::User>`
    pub fn short_name(&self) -> String {
        short_type_name(self.type_name)
    }
}

impl PartialEq for ShapeId {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for ShapeId {}

impl Hash for ShapeId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Debug for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ShapeId({})", self.type_name)
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

fn short_type_name(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut segment_start = 0;
    let mut chars = full.chars().peekable();
    while let Some(c) = chars.next() {
        if c == ':' && chars.peek() == Some(&':') {
            chars.next();
            out.truncate(segment_start);
            continue;
        }
        out.push(c);
        if !(c.is_alphanumeric() || c == '_') {
            segment_start = out.len();
        }
    }
    out
}

/// Référence paresseuse vers une shape.
///
/// Le constructeur n'est appelé qu'à la première résolution, ce qui permet
/// de décrire des graphes de types récursifs (un membre `Vec<Node>` dans `Node`).
#[derive(Clone, Copy)]
pub struct ShapeRef {
    id: ShapeId,
    build: fn() -> Shape,
}

impl ShapeRef {
    pub fn of<T: Mappable>() -> Self {
        ShapeRef {
            id: ShapeId::of::<T>(),
            build: T::shape,
        }
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub(crate) fn build(&self) -> Shape {
        (self.build)()
    }
}

impl fmt::Debug for ShapeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ShapeRef({})", self.id.type_name)
    }
}

/// Portée d'un override : toutes les shapes, ou une shape précise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    Unscoped,
    ScopedTo(ShapeId),
}

impl Scope {
    /// L'override s'applique-t-il quand l'autre côté de la paire est `shape` ?
    pub fn admits(&self, shape: ShapeId) -> bool {
        match self {
            Scope::Unscoped => true,
            Scope::ScopedTo(scoped) => *scoped == shape,
        }
    }
}

/// Annotation déclarative attachée à un membre.
///
/// Sur un membre SOURCE, `Bind` nomme le membre cible à alimenter.
/// Sur un membre CIBLE, `Bind` nomme le membre source qu'il doit recevoir.
/// `Ignore` exclut le membre (pour toutes les shapes ou une seule).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Override {
    Bind { name: String, scope: Scope },
    Ignore { scope: Scope },
}

impl Override {
    pub fn bind(name: impl Into<String>) -> Self {
        Override::Bind {
            name: name.into(),
            scope: Scope::Unscoped,
        }
    }

    pub fn ignore() -> Self {
        Override::Ignore {
            scope: Scope::Unscoped,
        }
    }

    /// Restreint l'override aux paires dont l'autre côté est `T`
    pub fn scoped<T: Mappable>(self) -> Self {
        let scope = Scope::ScopedTo(ShapeId::of::<T>());
        match self {
            Override::Bind { name, .. } => Override::Bind { name, scope },
            Override::Ignore { .. } => Override::Ignore { scope },
        }
    }

    pub fn scope(&self) -> Scope {
        match self {
            Override::Bind { scope, .. } | Override::Ignore { scope } => *scope,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Hidden,
}

/// Métadonnées d'un membre nommé et typé.
#[derive(Clone)]
pub struct MemberDescriptor {
    pub name: String,
    /// Shape de la valeur portée par le membre
    pub value: ShapeRef,
    pub visibility: Visibility,
    pub overrides: Vec<Override>,
    getter: Option<Getter>,
    setter: Option<Setter>,
}

impl MemberDescriptor {
    pub fn is_readable(&self) -> bool {
        self.visibility == Visibility::Public && self.getter.is_some()
    }

    pub fn is_writable(&self) -> bool {
        self.visibility == Visibility::Public && self.setter.is_some()
    }

    pub fn getter(&self) -> Option<&Getter> {
        self.getter.as_ref()
    }

    pub fn setter(&self) -> Option<&Setter> {
        self.setter.as_ref()
    }

    /// Nom lié pour l'autre côté `other` : d'abord un `Bind` limité à
    /// `other`, sinon un `Bind` sans portée.
    pub fn binding_for(&self, other: ShapeId) -> Option<&str> {
        let scoped = self.overrides.iter().find_map(|o| match o {
            Override::Bind { name, scope: Scope::ScopedTo(s) } if *s == other => Some(name.as_str()),
            _ => None,
        });
        scoped.or_else(|| {
            self.overrides.iter().find_map(|o| match o {
                Override::Bind { name, scope: Scope::Unscoped } => Some(name.as_str()),
                _ => None,
            })
        })
    }

    pub fn is_ignored_for(&self, other: ShapeId) -> bool {
        self.overrides
            .iter()
            .any(|o| matches!(o, Override::Ignore { scope } if scope.admits(other)))
    }
}

impl fmt::Debug for MemberDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberDescriptor")
            .field("name", &self.name)
            .field("value", &self.value.id())
            .field("readable", &self.is_readable())
            .field("writable", &self.is_writable())
            .field("overrides", &self.overrides)
            .finish()
    }
}

/// Un record : table ordonnée des membres + constructeur éventuel.
#[derive(Clone, Debug)]
pub struct RecordShape {
    pub members: Vec<MemberDescriptor>,
    pub construct: Option<ConstructFn>,
}

/// Une collection homogène (séquence ou tableau).
#[derive(Clone)]
pub struct ElementShape {
    pub element: ShapeRef,
    pub elements: ElementsFn,
    pub collect: CollectFn,
}

/// Un dictionnaire clé → valeur.
#[derive(Clone)]
pub struct KeyedShape {
    pub key: ShapeRef,
    pub value: ShapeRef,
    pub entries: EntriesFn,
    pub collect: CollectPairsFn,
}

/// La nature d'une shape.
#[derive(Clone)]
pub enum ShapeKind {
    /// Copiée telle quelle (clone)
    Scalar { duplicate: ConvertFn },
    Record(RecordShape),
    /// Séquence ordonnée, extensible (`Vec`, `VecDeque`)
    Sequence(ElementShape),
    /// Tableau de taille fixée à la construction (`Box<[T]>`)
    Array(ElementShape),
    Keyed(KeyedShape),
}

impl ShapeKind {
    pub fn label(&self) -> &'static str {
        match self {
            ShapeKind::Scalar { .. } => "scalaire",
            ShapeKind::Record(_) => "record",
            ShapeKind::Sequence(_) => "séquence",
            ShapeKind::Array(_) => "tableau",
            ShapeKind::Keyed(_) => "dictionnaire",
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(
            self,
            ShapeKind::Sequence(_) | ShapeKind::Array(_) | ShapeKind::Keyed(_)
        )
    }
}

/// Conversion déclarée par une shape cible depuis une autre shape.
#[derive(Clone)]
pub struct Conversion {
    pub from: ShapeId,
    pub convert: ConvertFn,
}

impl Conversion {
    /// Conversion `S → T` via `From`
    pub fn from_into<S, T>() -> Self
    where
        S: Any + Clone,
        T: From<S> + Send + 'static,
    {
        Conversion {
            from: ShapeId::of::<S>(),
            convert: Arc::new(|value: &dyn Any| {
                value
                    .downcast_ref::<S>()
                    .map(|s| Box::new(T::from(s.clone())) as AnyBox)
                    .ok_or_else(|| MapError::mismatch::<S>("conversion déclarée"))
            }),
        }
    }
}

/// La shape complète d'un type.
#[derive(Clone)]
pub struct Shape {
    id: ShapeId,
    name: String,
    kind: ShapeKind,
    conversions: Vec<Conversion>,
}

impl Shape {
    /// Shape scalaire : la valeur est clonée quand source et cible coïncident
    pub fn scalar<T: Any + Clone + Send>() -> Self {
        let id = ShapeId::of::<T>();
        Shape {
            id,
            name: id.short_name(),
            kind: ShapeKind::Scalar {
                duplicate: Arc::new(|value: &dyn Any| {
                    value
                        .downcast_ref::<T>()
                        .map(|v| Box::new(v.clone()) as AnyBox)
                        .ok_or_else(|| MapError::mismatch::<T>("copie scalaire"))
                }),
            },
            conversions: Vec::new(),
        }
    }

    /// Commence la description d'un record
    pub fn record<T: Mappable>(name: &str) -> RecordBuilder<T> {
        RecordBuilder {
            name: name.to_string(),
            members: Vec::new(),
            construct: None,
            conversions: Vec::new(),
            _marker: PhantomData,
        }
    }

    pub fn sequence<C: Any, T: Mappable>(elements: ElementsFn, collect: CollectFn) -> Self {
        Shape::container::<C>(ShapeKind::Sequence(ElementShape {
            element: ShapeRef::of::<T>(),
            elements,
            collect,
        }))
    }

    pub fn array<C: Any, T: Mappable>(elements: ElementsFn, collect: CollectFn) -> Self {
        Shape::container::<C>(ShapeKind::Array(ElementShape {
            element: ShapeRef::of::<T>(),
            elements,
            collect,
        }))
    }

    pub fn keyed<C: Any, K: Mappable, V: Mappable>(entries: EntriesFn, collect: CollectPairsFn) -> Self {
        Shape::container::<C>(ShapeKind::Keyed(KeyedShape {
            key: ShapeRef::of::<K>(),
            value: ShapeRef::of::<V>(),
            entries,
            collect,
        }))
    }

    fn container<C: Any>(kind: ShapeKind) -> Self {
        let id = ShapeId::of::<C>();
        Shape {
            id,
            name: id.short_name(),
            kind,
            conversions: Vec::new(),
        }
    }

    pub fn with_conversion(mut self, conversion: Conversion) -> Self {
        self.conversions.push(conversion);
        self
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    pub fn as_record(&self) -> Option<&RecordShape> {
        match &self.kind {
            ShapeKind::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Membres du record (vide pour les autres natures)
    pub fn members(&self) -> &[MemberDescriptor] {
        match &self.kind {
            ShapeKind::Record(record) => &record.members,
            _ => &[],
        }
    }

    pub fn conversion_from(&self, source: ShapeId) -> Option<&ConvertFn> {
        self.conversions
            .iter()
            .find(|c| c.from == source)
            .map(|c| &c.convert)
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shape")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("kind", &self.kind.label())
            .field("members", &self.members())
            .finish()
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ShapeKind::Record(record) => {
                writeln!(f, "record {} {{", self.name)?;
                for member in &record.members {
                    let access = match (member.is_readable(), member.is_writable()) {
                        (true, true) => "",
                        (true, false) => " (lecture seule)",
                        (false, true) => " (écriture seule)",
                        (false, false) => " (inaccessible)",
                    };
                    writeln!(f, "  {} : {}{}", member.name, member.value.id(), access)?;
                }
                write!(f, "}}")
            }
            ShapeKind::Sequence(e) => write!(f, "séquence {} de {}", self.name, e.element.id()),
            ShapeKind::Array(e) => write!(f, "tableau {} de {}", self.name, e.element.id()),
            ShapeKind::Keyed(k) => write!(f, "dictionnaire {} : {} -> {}", self.name, k.key.id(), k.value.id()),
            ShapeKind::Scalar { .. } => write!(f, "scalaire {}", self.name),
        }
    }
}

fn construct_default<T: Default + Send + 'static>() -> AnyBox {
    Box::new(T::default())
}

fn erase_getter<T: Any, F: Any>(get: fn(&T) -> &F) -> Getter {
    getter(move |owner| owner.downcast_ref::<T>().map(|t| get(t) as &dyn Any))
}

fn erase_setter<T: Any, F: Any>(member: &str, set: fn(&mut T, F)) -> Setter {
    let member = member.to_string();
    Arc::new(move |owner: &mut (dyn Any + Send), value: AnyBox| {
        let owner = owner
            .downcast_mut::<T>()
            .ok_or_else(|| MapError::mismatch::<T>(format!("écriture de '{}'", member)))?;
        let value = value
            .downcast::<F>()
            .map_err(|_| MapError::mismatch::<F>(format!("valeur de '{}'", member)))?;
        set(owner, *value);
        Ok(())
    })
}

/// Construit la shape d'un record, membre par membre.
///
/// L'ordre de déclaration des membres est l'ordre d'énumération : c'est
/// lui qui fixe l'ordre des écritures dans la routine compilée.
///
/// ```
/// use quickmap::core::shape::{Override, Shape};
/// use quickmap::core::typeside::Mappable;
///
/// #[derive(Default)]
/// struct User { id: u64, name: String }
///
/// impl Mappable for User {
///     fn shape() -> Shape {
///         Shape::record::<User>("User")
///             .constructible()
///             .member("Id", |u| &u.id, |u, v| u.id = v)
///             .with(Override::bind("Key"))
///             .member("Name", |u| &u.name, |u, v| u.name = v)
///             .build()
///     }
/// }
/// ```
pub struct RecordBuilder<T> {
    name: String,
    members: Vec<MemberDescriptor>,
    construct: Option<ConstructFn>,
    conversions: Vec<Conversion>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Mappable> RecordBuilder<T> {
    /// Déclare le constructeur sans paramètre (`Default`)
    pub fn constructible(mut self) -> Self
    where
        T: Default,
    {
        self.construct = Some(construct_default::<T>);
        self
    }

    /// Membre lisible et inscriptible
    pub fn member<F: Mappable>(self, name: &str, get: fn(&T) -> &F, set: fn(&mut T, F)) -> Self {
        let getter = erase_getter(get);
        let setter = erase_setter(name, set);
        self.push::<F>(name, Some(getter), Some(setter))
    }

    pub fn readonly<F: Mappable>(self, name: &str, get: fn(&T) -> &F) -> Self {
        let getter = erase_getter(get);
        self.push::<F>(name, Some(getter), None)
    }

    pub fn writeonly<F: Mappable>(self, name: &str, set: fn(&mut T, F)) -> Self {
        let setter = erase_setter(name, set);
        self.push::<F>(name, None, Some(setter))
    }

    /// Rend le dernier membre déclaré inaccessible au moteur
    pub fn hidden(mut self) -> Self {
        if let Some(member) = self.members.last_mut() {
            member.visibility = Visibility::Hidden;
        }
        self
    }

    /// Attache un override au dernier membre déclaré
    pub fn with(mut self, annotation: Override) -> Self {
        if let Some(member) = self.members.last_mut() {
            member.overrides.push(annotation);
        }
        self
    }

    /// Le record se construit directement depuis `S` (via `From`)
    pub fn accepts<S>(mut self) -> Self
    where
        S: Any + Clone,
        T: From<S>,
    {
        self.conversions.push(Conversion::from_into::<S, T>());
        self
    }

    pub fn build(self) -> Shape {
        Shape {
            id: ShapeId::of::<T>(),
            name: self.name,
            kind: ShapeKind::Record(RecordShape {
                members: self.members,
                construct: self.construct,
            }),
            conversions: self.conversions,
        }
    }

    fn push<F: Mappable>(mut self, name: &str, getter: Option<Getter>, setter: Option<Setter>) -> Self {
        self.members.push(MemberDescriptor {
            name: name.to_string(),
            value: ShapeRef::of::<F>(),
            visibility: Visibility::Public,
            overrides: Vec::new(),
            getter,
            setter,
        });
        self
    }
}

// =============================================================================
// TESTS
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixtures::{Record, User};

    #[test]
    fn test_shape_id_is_nominal() {
        #[derive(Clone)]
        struct A(#[allow(dead_code)] u8);
        #[derive(Clone)]
        struct B(#[allow(dead_code)] u8);
        assert_ne!(ShapeId::of::<A>(), ShapeId::of::<B>());
        assert_eq!(ShapeId::of::<A>(), ShapeId::of::<A>());
    }

    #[test]
    fn test_short_name() {
        assert_eq!(ShapeId::of::<Vec<String>>().short_name(), "Vec<String>");
        assert_eq!(
            ShapeId::of::<std::collections::HashMap<String, u64>>().short_name(),
            "HashMap<String, u64>"
        );
    }

    #[test]
    fn test_record_members_in_declaration_order() {
        let shape = User::shape();
        let names: Vec<_> = shape.members().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Id", "Name", "Email", "Password", "Tags", "Score"]);
        assert!(shape.as_record().is_some_and(|r| r.construct.is_some()));
    }

    #[test]
    fn test_getter_and_setter_roundtrip_through_any() {
        let shape = User::shape();
        let name = &shape.members()[1];
        let mut user = User {
            name: "Alice".into(),
            ..User::default()
        };

        let read = name.getter().and_then(|g| g(&user as &dyn Any));
        assert_eq!(read.and_then(|v| v.downcast_ref::<String>()), Some(&"Alice".to_string()));

        let write = name.setter().map(|s| s(&mut user, Box::new("Bob".to_string())));
        assert_eq!(write, Some(Ok(())));
        assert_eq!(user.name, "Bob");
    }

    #[test]
    fn test_setter_rejects_wrong_value_type() {
        let shape = User::shape();
        let name = &shape.members()[1];
        let mut user = User::default();
        let result = name.setter().map(|s| s(&mut user, Box::new(42u64)));
        assert!(matches!(result, Some(Err(MapError::TypeMismatch { .. }))));
    }

    #[test]
    fn test_binding_prefers_scoped_override() {
        let shape = User::shape();
        let id = &shape.members()[0];
        assert_eq!(id.binding_for(ShapeId::of::<Record>()), Some("Key"));
        assert_eq!(id.binding_for(ShapeId::of::<User>()), None);
    }

    #[test]
    fn test_scope_admits() {
        assert!(Scope::Unscoped.admits(ShapeId::of::<u8>()));
        let scoped = Scope::ScopedTo(ShapeId::of::<Record>());
        assert!(scoped.admits(ShapeId::of::<Record>()));
        assert!(!scoped.admits(ShapeId::of::<User>()));
    }

    #[test]
    fn test_readonly_and_hidden_members() {
        #[derive(Default)]
        struct Probe {
            a: u8,
            b: u8,
        }
        impl Mappable for Probe {
            fn shape() -> Shape {
                Shape::record::<Probe>("Probe")
                    .readonly("A", |p| &p.a)
                    .member("B", |p| &p.b, |p, v| p.b = v)
                    .hidden()
                    .build()
            }
        }
        let shape = Probe::shape();
        assert!(shape.members()[0].is_readable());
        assert!(!shape.members()[0].is_writable());
        assert!(!shape.members()[1].is_readable());
        assert!(!shape.members()[1].is_writable());
    }

    #[test]
    fn test_display_record() {
        let display = format!("{}", User::shape());
        assert!(display.contains("record User"));
        assert!(display.contains("Name : String"));
    }
}
