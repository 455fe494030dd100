// =============================================================================
// LOGGING — Initialisation du journal (tracing)
// =============================================================================
//
// Le moteur émet ses événements via `tracing` ; c'est à l'application de
// décider où ils vont. `init_tracing` installe un abonné fmt filtré par la
// variable d'environnement QUICKMAP_LOG :
//
//   QUICKMAP_LOG=quickmap=debug          → chaque plan et chaque synthèse
//   QUICKMAP_LOG=quickmap::core=trace    → aussi les membres abandonnés
//
// =============================================================================

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Variable d'environnement lue pour le filtre
pub const LOG_ENV: &str = "QUICKMAP_LOG";

/// Initialise le journal. Sans `QUICKMAP_LOG` valide, retombe sur `quickmap=info`.
///
/// Idempotente : les appels suivants ne font rien. Si un autre abonné global
/// est déjà installé, il est conservé.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("quickmap=info"));

        let _ = tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_thread_ids(true))
            .with(filter)
            .try_init();
    });
}
