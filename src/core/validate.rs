// =============================================================================
// VALIDATE — Vérification des descriptions de shapes
// =============================================================================
//
// Une shape est écrite à la main par l'utilisateur : rien n'empêche de
// déclarer deux fois le même membre, ou un `Bind` vers un nom vide.
// Ce module repère ces incohérences :
//   - un nom de membre en double (le second serait inatteignable)
//   - un membre ni lisible ni inscriptible (il ne participe jamais)
//   - un override `Bind` dont le nom est vide
//
// Ces problèmes sont des AVERTISSEMENTS : le moteur reste permissif et
// continue à mapper ce qui peut l'être.
//
// =============================================================================

use std::collections::HashSet;

use thiserror::Error;

use super::shape::{Override, Shape};

/// Problème détecté dans une shape
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ShapeIssue {
    #[error("{shape} : le membre '{member}' est déclaré plusieurs fois")]
    DuplicateMember { shape: String, member: String },

    #[error("{shape} : le membre '{member}' n'est ni lisible ni inscriptible")]
    Inaccessible { shape: String, member: String },

    #[error("{shape} : le membre '{member}' porte un bind vers un nom vide")]
    EmptyBinding { shape: String, member: String },
}

/// Vérifie qu'une shape est bien formée.
///
/// Seuls les records ont une table de membres ; les autres natures sont
/// toujours valides.
pub fn validate_shape(shape: &Shape) -> Result<(), Vec<ShapeIssue>> {
    let mut issues = Vec::new();
    let mut seen = HashSet::new();
    let name = shape.name();

    for member in shape.members() {
        if !seen.insert(member.name.as_str()) {
            issues.push(ShapeIssue::DuplicateMember {
                shape: name.to_string(),
                member: member.name.clone(),
            });
        }

        if !member.is_readable() && !member.is_writable() {
            issues.push(ShapeIssue::Inaccessible {
                shape: name.to_string(),
                member: member.name.clone(),
            });
        }

        let empty_bind = member
            .overrides
            .iter()
            .any(|o| matches!(o, Override::Bind { name, .. } if name.trim().is_empty()));
        if empty_bind {
            issues.push(ShapeIssue::EmptyBinding {
                shape: name.to_string(),
                member: member.name.clone(),
            });
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}

// =============================================================================
// TESTS
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixtures::User;
    use crate::core::typeside::Mappable;

    #[derive(Default)]
    struct Broken {
        a: u8,
        b: u8,
    }

    impl Mappable for Broken {
        fn shape() -> Shape {
            Shape::record::<Broken>("Broken")
                .member("A", |s| &s.a, |s, v| s.a = v)
                .member("A", |s| &s.b, |s, v| s.b = v)
                .with(Override::bind(""))
                .member("C", |s| &s.b, |s, v| s.b = v)
                .hidden()
                .build()
        }
    }

    #[test]
    fn test_valid_shape() {
        assert!(validate_shape(&User::shape()).is_ok());
        assert!(validate_shape(&Vec::<u8>::shape()).is_ok());
    }

    #[test]
    fn test_detects_all_issues() {
        let issues = validate_shape(&Broken::shape()).unwrap_err();
        assert_eq!(issues.len(), 3);
        assert!(issues.contains(&ShapeIssue::DuplicateMember {
            shape: "Broken".into(),
            member: "A".into(),
        }));
        assert!(issues.iter().any(|i| matches!(i, ShapeIssue::EmptyBinding { .. })));
        assert!(issues
            .iter()
            .any(|i| matches!(i, ShapeIssue::Inaccessible { member, .. } if member == "C")));
    }
}
