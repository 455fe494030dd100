// =============================================================================
// ERROR — Les erreurs du moteur de mapping
// =============================================================================
//
// Trois familles d'erreurs peuvent interrompre la PREMIÈRE résolution d'une
// paire de types :
//   - UnsupportedConversion : aucune stratégie ne sait convertir A → B
//   - ConstructionFailure   : la cible n'a pas de constructeur sans paramètre
//   - RecursiveDependency   : la paire dépend (transitivement) d'elle-même
//
// Aucune de ces erreurs n'est mise en cache : une configuration corrigée
// peut réussir au prochain appel.
//
// =============================================================================

use thiserror::Error;

/// Erreur du moteur de mapping.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MapError {
    /// Aucune stratégie ne couvre cette paire (ex: scalaire → dictionnaire)
    #[error("Conversion non supportée de {from} vers {to} : {reason}")]
    UnsupportedConversion {
        from: String,
        to: String,
        reason: String,
    },

    /// La forme cible n'est pas constructible et aucune cible existante n'a été fournie
    #[error("Impossible de construire {shape} : aucun constructeur sans paramètre déclaré")]
    ConstructionFailure { shape: String },

    /// Le graphe des paires imbriquées revient sur une paire en cours de synthèse
    #[error("Dépendance récursive détectée : {chain}")]
    RecursiveDependency { chain: String },

    /// Une valeur effacée n'a pas le type attendu par la routine
    #[error("Type inattendu : {expected} attendu ({context})")]
    TypeMismatch {
        expected: &'static str,
        context: String,
    },

    /// Un accesseur n'a pas pu lire le membre sur l'instance fournie
    #[error("Membre '{member}' illisible sur {shape}")]
    MissingMember { shape: String, member: String },
}

impl MapError {
    pub(crate) fn unsupported(
        from: impl Into<String>,
        to: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        MapError::UnsupportedConversion {
            from: from.into(),
            to: to.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn mismatch<T>(context: impl Into<String>) -> Self {
        MapError::TypeMismatch {
            expected: std::any::type_name::<T>(),
            context: context.into(),
        }
    }
}

/// Erreur de chargement de la configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Lecture de {path} impossible : {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration invalide ({path}) : {message}")]
    Parse { path: String, message: String },
}
