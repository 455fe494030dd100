// =============================================================================
// TYPESIDE — Les types de base et les conteneurs connus du moteur
// =============================================================================
//
// Le typeside fixe les "briques élémentaires" au-dessus desquelles les
// records sont décrits :
//   - les SCALAIRES (entiers, flottants, bool, char, String) sont clonés
//     tels quels quand source et cible coïncident, et acceptent les
//     élargissements sans perte (i32 → i64, f32 → f64, char → String...)
//   - les CONTENEURS (Vec, VecDeque, Box<[T]>, HashMap, BTreeMap) exposent
//     leurs éléments de façon effacée, pour que la conversion élément par
//     élément réutilise tout le moteur
//
// Un type utilisateur entre dans le système en implémentant `Mappable`,
// c'est-à-dire en décrivant sa shape une seule fois.
//
// =============================================================================

use std::any::Any;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::hash::Hash;
use std::sync::Arc;

use super::error::MapError;
use super::shape::{self, AnyBox, CollectFn, CollectPairsFn, Conversion, Shape};

/// Un type dont la shape est connue du moteur.
pub trait Mappable: Any + Send + Sized {
    fn shape() -> Shape;
}

macro_rules! scalar_shapes {
    ($($ty:ty => [$($from:ty),*];)*) => {
        $(
            impl Mappable for $ty {
                fn shape() -> Shape {
                    Shape::scalar::<$ty>()
                        $(.with_conversion(Conversion::from_into::<$from, $ty>()))*
                }
            }
        )*
    };
}

scalar_shapes! {
    bool => [];
    char => [u8];
    i8 => [];
    i16 => [i8, u8];
    i32 => [i8, i16, u8, u16];
    i64 => [i8, i16, i32, u8, u16, u32];
    i128 => [i8, i16, i32, i64, u8, u16, u32, u64];
    isize => [i8, i16, u8];
    u8 => [];
    u16 => [u8];
    u32 => [u8, u16, char];
    u64 => [u8, u16, u32];
    u128 => [u8, u16, u32, u64];
    usize => [u8, u16];
    f32 => [i8, i16, u8, u16];
    f64 => [f32, i8, i16, i32, u8, u16, u32];
    String => [char];
}

/// Reconstruit une collection `C` à partir d'éléments effacés de type `T`.
fn collector<C, T>(build: fn(Vec<T>) -> C) -> CollectFn
where
    C: Any + Send,
    T: Any,
{
    Arc::new(move |items: Vec<AnyBox>| {
        let mut out = Vec::with_capacity(items.len());
        for item in items {
            let item = item
                .downcast::<T>()
                .map_err(|_| MapError::mismatch::<T>("élément de collection"))?;
            out.push(*item);
        }
        Ok(Box::new(build(out)) as AnyBox)
    })
}

/// Reconstruit un dictionnaire `C` ; les clés en double écrasent les précédentes.
fn pair_collector<C, K, V>(build: fn(Vec<(K, V)>) -> C) -> CollectPairsFn
where
    C: Any + Send,
    K: Any,
    V: Any,
{
    Arc::new(move |pairs: Vec<(AnyBox, AnyBox)>| {
        let mut out = Vec::with_capacity(pairs.len());
        for (key, value) in pairs {
            let key = key
                .downcast::<K>()
                .map_err(|_| MapError::mismatch::<K>("clé de dictionnaire"))?;
            let value = value
                .downcast::<V>()
                .map_err(|_| MapError::mismatch::<V>("valeur de dictionnaire"))?;
            out.push((*key, *value));
        }
        Ok(Box::new(build(out)) as AnyBox)
    })
}

impl<T: Mappable> Mappable for Vec<T> {
    fn shape() -> Shape {
        Shape::sequence::<Vec<T>, T>(
            shape::elements(|v| {
                v.downcast_ref::<Vec<T>>()
                    .map(|xs| xs.iter().map(|x| x as &dyn Any).collect())
            }),
            collector::<Vec<T>, T>(|items| items),
        )
    }
}

impl<T: Mappable> Mappable for VecDeque<T> {
    fn shape() -> Shape {
        Shape::sequence::<VecDeque<T>, T>(
            shape::elements(|v| {
                v.downcast_ref::<VecDeque<T>>()
                    .map(|xs| xs.iter().map(|x| x as &dyn Any).collect())
            }),
            collector::<VecDeque<T>, T>(VecDeque::from),
        )
    }
}

impl<T: Mappable> Mappable for Box<[T]> {
    fn shape() -> Shape {
        Shape::array::<Box<[T]>, T>(
            shape::elements(|v| {
                v.downcast_ref::<Box<[T]>>()
                    .map(|xs| xs.iter().map(|x| x as &dyn Any).collect())
            }),
            collector::<Box<[T]>, T>(Vec::into_boxed_slice),
        )
    }
}

impl<K, V> Mappable for HashMap<K, V>
where
    K: Mappable + Eq + Hash,
    V: Mappable,
{
    fn shape() -> Shape {
        Shape::keyed::<HashMap<K, V>, K, V>(
            shape::entries(|m| {
                m.downcast_ref::<HashMap<K, V>>()
                    .map(|m| m.iter().map(|(k, v)| (k as &dyn Any, v as &dyn Any)).collect())
            }),
            pair_collector::<HashMap<K, V>, K, V>(|pairs| pairs.into_iter().collect()),
        )
    }
}

impl<K, V> Mappable for BTreeMap<K, V>
where
    K: Mappable + Ord,
    V: Mappable,
{
    fn shape() -> Shape {
        Shape::keyed::<BTreeMap<K, V>, K, V>(
            shape::entries(|m| {
                m.downcast_ref::<BTreeMap<K, V>>()
                    .map(|m| m.iter().map(|(k, v)| (k as &dyn Any, v as &dyn Any)).collect())
            }),
            pair_collector::<BTreeMap<K, V>, K, V>(|pairs| pairs.into_iter().collect()),
        )
    }
}
