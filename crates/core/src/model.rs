//! Catalog records.
//!
//! Records link to each other by id only. Navigating from one record to its
//! relatives is a repository call, never a field access.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Program {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub summary: Option<String>,
    pub poster: Option<String>,
    pub category_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Season {
    pub id: i64,
    pub program_id: i64,
    pub number: i64,
    pub year: Option<i64>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Episode {
    pub id: i64,
    pub season_id: i64,
    pub number: i64,
    pub title: String,
    pub synopsis: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Actor {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comment {
    pub id: i64,
    pub episode_id: i64,
    pub author_id: i64,
    pub comment: String,
    pub created_ts: i64,
}

/// A comment joined with its author's username, as listed under an episode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentWithAuthor {
    pub comment: Comment,
    pub author: String,
}
