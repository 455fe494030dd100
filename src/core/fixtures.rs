// =============================================================================
// FIXTURES — Shapes partagées par les tests
// =============================================================================

use super::shape::{Override, Shape};
use super::typeside::Mappable;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub password: String,
    pub tags: Vec<String>,
    pub score: i32,
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
            .member("Tags", |u| &u.tags, |u, v| u.tags = v)
            .member("Score", |u| &u.score, |u, v| u.score = v)
            .build()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    pub key: u64,
    pub user_id: u64,
    pub name: String,
    pub email: String,
    pub note: String,
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

/// Reçoit `Id` par un bind côté cible, élargit `Score` en i64
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Profile {
    pub user_id: u64,
    pub name: String,
    pub email: String,
    pub password: String,
    pub tags: Vec<String>,
    pub score: i64,
}

impl Mappable for Profile {
    fn shape() -> Shape {
        Shape::record::<Profile>("Profile")
            .constructible()
            .member("UserId", |p| &p.user_id, |p, v| p.user_id = v)
            .with(Override::bind("Id"))
            .member("Name", |p| &p.name, |p, v| p.name = v)
            .member("Email", |p| &p.email, |p, v| p.email = v)
            .member("Password", |p| &p.password, |p, v| p.password = v)
            .member("Tags", |p| &p.tags, |p, v| p.tags = v)
            .member("Score", |p| &p.score, |p, v| p.score = v)
            .build()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Team {
    pub name: String,
    pub members: Vec<User>,
}

impl Mappable for Team {
    fn shape() -> Shape {
        Shape::record::<Team>("Team")
            .constructible()
            .member("Name", |t| &t.name, |t, v| t.name = v)
            .member("Members", |t| &t.members, |t, v| t.members = v)
            .build()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamDto {
    pub name: String,
    pub members: Vec<Profile>,
}

impl Mappable for TeamDto {
    fn shape() -> Shape {
        Shape::record::<TeamDto>("TeamDto")
            .constructible()
            .member("Name", |t| &t.name, |t, v| t.name = v)
            .member("Members", |t| &t.members, |t, v| t.members = v)
            .build()
    }
}

/// Clé normalisée en minuscules : deux sources peuvent donner la même clé
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Label(pub String);

impl From<String> for Label {
    fn from(s: String) -> Self {
        Label(s.to_lowercase())
    }
}

impl Mappable for Label {
    fn shape() -> Shape {
        Shape::record::<Label>("Label").accepts::<String>().build()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Amount(pub i64);

impl From<i32> for Amount {
    fn from(v: i32) -> Self {
        Amount(i64::from(v))
    }
}

impl Mappable for Amount {
    fn shape() -> Shape {
        Shape::record::<Amount>("Amount").accepts::<i32>().build()
    }
}

/// Pas de constructeur : seul `map_into` peut l'alimenter
#[derive(Debug, Clone, PartialEq)]
pub struct Locked {
    pub name: String,
    pub stamp: u32,
}

impl Mappable for Locked {
    fn shape() -> Shape {
        Shape::record::<Locked>("Locked")
            .member("Name", |l| &l.name, |l, v| l.name = v)
            .member("Stamp", |l| &l.stamp, |l, v| l.stamp = v)
            .build()
    }
}

/// Graphe récursif : un nœud contient des nœuds
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Node {
    pub value: u32,
    pub children: Vec<Node>,
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

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeDto {
    pub value: u64,
    pub children: Vec<NodeDto>,
}

impl Mappable for NodeDto {
    fn shape() -> Shape {
        Shape::record::<NodeDto>("NodeDto")
            .constructible()
            .member("Value", |n| &n.value, |n, v| n.value = v)
            .member("Children", |n| &n.children, |n, v| n.children = v)
            .build()
    }
}

/// Récursion croisée : un auteur a des livres, un livre a des auteurs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Author {
    pub name: String,
    pub books: Vec<Book>,
}

impl Mappable for Author {
    fn shape() -> Shape {
        Shape::record::<Author>("Author")
            .constructible()
            .member("Name", |a| &a.name, |a, v| a.name = v)
            .member("Books", |a| &a.books, |a, v| a.books = v)
            .build()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Book {
    pub title: String,
    pub authors: Vec<Author>,
}

impl Mappable for Book {
    fn shape() -> Shape {
        Shape::record::<Book>("Book")
            .constructible()
            .member("Title", |b| &b.title, |b, v| b.title = v)
            .member("Authors", |b| &b.authors, |b, v| b.authors = v)
            .build()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthorDto {
    pub name: String,
    pub books: Vec<BookDto>,
}

impl Mappable for AuthorDto {
    fn shape() -> Shape {
        Shape::record::<AuthorDto>("AuthorDto")
            .constructible()
            .member("Name", |a| &a.name, |a, v| a.name = v)
            .member("Books", |a| &a.books, |a, v| a.books = v)
            .build()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookDto {
    pub title: String,
    pub authors: Vec<AuthorDto>,
}

impl Mappable for BookDto {
    fn shape() -> Shape {
        Shape::record::<BookDto>("BookDto")
            .constructible()
            .member("Title", |b| &b.title, |b, v| b.title = v)
            .member("Authors", |b| &b.authors, |b, v| b.authors = v)
            .build()
    }
}
