// =============================================================================
// QUICKMAP — Point d'entrée : démonstration du moteur de mapping
// =============================================================================
//
// Ce main.rs montre un exemple complet :
//   1. Décrire les shapes (User, Record, Profile)
//   2. Mapper un record, avec overrides et configuration
//   3. Mapper dans une instance existante
//   4. Convertir des conteneurs (séquence, dictionnaire)
//   5. Observer les erreurs (paire non supportée, récursion)
//   6. Inspecter le cache
//
// Lancer avec QUICKMAP_LOG=quickmap=debug pour suivre plans et synthèses.
//
// =============================================================================

use std::collections::HashMap;

use quickmap::core::error::MapError;
use quickmap::core::shape::{Override, Shape};
use quickmap::core::typeside::Mappable;
use quickmap::core::validate;
use quickmap::logging::init_tracing;
use quickmap::{Mapper, MapperConfig};

#[derive(Debug, Clone, Default)]
struct User {
    id: u64,
    name: String,
    email: String,
    password: String,
    score: i32,
}

impl Mappable for User {
    fn shape() -> Shape {
        Shape::record::<User>("User")
            .constructible()
            .member("Id", |u| &u.id, |u, v| u.id = v)
            .with(Override::bind("Key").scoped::<Record>())
            .member("Name", |u| &u.name, |u, v| u.name = v)
            .member("Email", |u| &u.email, |u, v| u.email = v)
            .with(Override::ignore().scoped::<Record>())
            .member("Password", |u| &u.password, |u, v| u.password = v)
            .with(Override::ignore())
            .member("Score", |u| &u.score, |u, v| u.score = v)
            .build()
    }
}

#[derive(Debug, Clone, Default)]
struct Record {
    key: u64,
    user_id: u64,
    name: String,
    email: String,
    note: String,
}

impl Mappable for Record {
    fn shape() -> Shape {
        Shape::record::<Record>("Record")
            .constructible()
            .member("Key", |r| &r.key, |r, v| r.key = v)
            .member("UserId", |r| &r.user_id, |r, v| r.user_id = v)
            .member("Name", |r| &r.name, |r, v| r.name = v)
            .member("Email", |r| &r.email, |r, v| r.email = v)
            .member("Note", |r| &r.note, |r, v| r.note = v)
            .build()
    }
}

#[derive(Debug, Clone, Default)]
struct Profile {
    user_id: u64,
    display: String,
    email: String,
    score: i64,
}

impl Mappable for Profile {
    fn shape() -> Shape {
        Shape::record::<Profile>("Profile")
            .constructible()
            .member("UserId", |p| &p.user_id, |p, v| p.user_id = v)
            .with(Override::bind("Id"))
            .member("Display", |p| &p.display, |p, v| p.display = v)
            .member("Email", |p| &p.email, |p, v| p.email = v)
            .member("Score", |p| &p.score, |p, v| p.score = v)
            .build()
    }
}

#[derive(Debug, Clone, Default)]
struct Node {
    value: u32,
    children: Vec<Node>,
}

impl Mappable for Node {
    fn shape() -> Shape {
        Shape::record::<Node>("Node")
            .constructible()
            .member("Value", |n| &n.value, |n, v| n.value = v)
            .member("Children", |n| &n.children, |n, v| n.children = v)
            .build()
    }
}

const CONFIG: &str = r#"
[diagnostics]
validate_shapes = true

[[bindings]]
source = "User"
target = "Profile"
bind = { Name = "Display" }
"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    println!("╔══════════════════════════════════════════════════╗");
    println!("║      QUICKMAP — Mapping objet → objet            ║");
    println!("║      Plans résolus une fois, routines en cache   ║");
    println!("╚══════════════════════════════════════════════════╝\n");

    // ═══════════════════════════════════════════════════════════
    // ÉTAPE 1 : Les shapes
    // ═══════════════════════════════════════════════════════════
    println!("═══ ÉTAPE 1 : Shapes ═══\n");

    for shape in [User::shape(), Record::shape(), Profile::shape()] {
        println!("{}", shape);
        match validate::validate_shape(&shape) {
            Ok(()) => println!("✓ {} valide\n", shape.name()),
            Err(issues) => {
                for issue in issues {
                    println!("✗ {}", issue);
                }
            }
        }
    }

    let mapper = Mapper::with_config(MapperConfig::from_toml_str(CONFIG)?);
    mapper.configure::<User, Record>().bind("Id", "UserId");

    // ═══════════════════════════════════════════════════════════
    // ÉTAPE 2 : Mapper des records
    // ═══════════════════════════════════════════════════════════
    println!("═══ ÉTAPE 2 : User → Record, User → Profile ═══\n");

    let alice = User {
        id: 42,
        name: "Alice".into(),
        email: "alice@example.org".into(),
        password: "secret".into(),
        score: 7,
    };

    let record: Record = mapper.map(&alice)?;
    println!("{:?}", record);
    println!("  Id → Key : l'override limité à Record l'emporte sur la configuration (UserId = {})", record.user_id);
    println!("  Email ignoré pour Record, Password ignoré partout\n");

    let profile: Profile = mapper.map(&alice)?;
    println!("{:?}", profile);
    println!("  Name → Display via le fichier, Id reçu par UserId, Score élargi en i64\n");

    // ═══════════════════════════════════════════════════════════
    // ÉTAPE 3 : Mapper dans une instance existante
    // ═══════════════════════════════════════════════════════════
    println!("═══ ÉTAPE 3 : Mapping en place ═══\n");

    let existing = Record {
        note: "à conserver".into(),
        ..Record::default()
    };
    let updated = mapper.map_into(&alice, existing)?;
    println!("{:?}\n", updated);

    // ═══════════════════════════════════════════════════════════
    // ÉTAPE 4 : Conteneurs
    // ═══════════════════════════════════════════════════════════
    println!("═══ ÉTAPE 4 : Conteneurs ═══\n");

    let widened: Vec<i64> = mapper.map(&vec![1i32, 2, 3])?;
    println!("[1, 2, 3] : Vec<i32> → {:?} : Vec<i64>", widened);

    let users = vec![alice.clone(), User { id: 7, name: "Bob".into(), ..User::default() }];
    let profiles: Box<[Profile]> = mapper.map(&users)?;
    println!("Vec<User> → Box<[Profile]> : {} éléments", profiles.len());

    let scores = HashMap::from([("alice".to_string(), 7i32), ("bob".to_string(), 3i32)]);
    let wide: HashMap<String, f64> = mapper.map(&scores)?;
    println!("HashMap<String, i32> → HashMap<String, f64> : {} entrées\n", wide.len());

    // ═══════════════════════════════════════════════════════════
    // ÉTAPE 5 : Erreurs
    // ═══════════════════════════════════════════════════════════
    println!("═══ ÉTAPE 5 : Erreurs ═══\n");

    match mapper.map::<u32, HashMap<String, u32>>(&5) {
        Err(e @ MapError::UnsupportedConversion { .. }) => println!("✗ {}", e),
        other => println!("? {:?}", other),
    }
    match mapper.map::<Node, Node>(&Node { value: 1, children: Vec::new() }) {
        Err(e @ MapError::RecursiveDependency { .. }) => println!("✗ {}\n", e),
        other => println!("? {:?}\n", other),
    }

    // ═══════════════════════════════════════════════════════════
    // ÉTAPE 6 : Le cache
    // ═══════════════════════════════════════════════════════════
    println!("═══ ÉTAPE 6 : Mappers compilés ═══\n");

    for item in mapper.snapshot() {
        println!("  #{:<2} {}", item.id, item.mapper);
    }

    println!("\n═══════════════════════════════════════════════════");
    println!("Mapping terminé !");
    println!("  {} mappers compilés, chacun synthétisé une seule fois", mapper.snapshot().len());
    println!("═══════════════════════════════════════════════════");

    Ok(())
}
