use serde::{Deserialize, Serialize};

/// A release as described by the Discogs API, or as rebuilt from existing tags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Release {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub styles: Vec<String>,
    #[serde(default)]
    pub tracklist: Vec<TrackNode>,
}

/// `type_` of a tracklist entry. Only `track` entries are tag targets; headings and
/// index groups are carried as `Other`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TrackKind {
    #[default]
    Track,
    Other(String),
}

impl From<String> for TrackKind {
    fn from(s: String) -> Self {
        if s == "track" {
            TrackKind::Track
        } else {
            TrackKind::Other(s)
        }
    }
}

impl From<TrackKind> for String {
    fn from(k: TrackKind) -> Self {
        match k {
            TrackKind::Track => "track".into(),
            TrackKind::Other(s) => s,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackNode {
    #[serde(rename = "type_", default)]
    pub kind: TrackKind,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub artists: Option<Vec<ArtistRef>>,
    #[serde(rename = "extraartists", default)]
    pub extra_artists: Option<Vec<CreditedArtistRef>>,
    #[serde(default)]
    pub sub_tracks: Option<Vec<TrackNode>>,
}

impl TrackNode {
    pub fn is_track(&self) -> bool {
        self.kind == TrackKind::Track
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArtistRef {
    #[serde(default)]
    pub name: Option<String>,
    /// Artist name variation (`anv`) as credited on this release.
    #[serde(rename = "anv", default)]
    pub alias: Option<String>,
}

impl ArtistRef {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: Some(name.into()), alias: None }
    }

    pub fn aliased(alias: impl Into<String>) -> Self {
        Self { name: None, alias: Some(alias.into()) }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreditedArtistRef {
    #[serde(flatten)]
    pub artist: ArtistRef,
    #[serde(default)]
    pub role: String,
}

pub const COMPOSER_ROLE: &str = "Written-By";

impl CreditedArtistRef {
    pub fn new(artist: ArtistRef, role: impl Into<String>) -> Self {
        Self { artist, role: role.into() }
    }

    pub fn is_composer(&self) -> bool {
        self.role.eq_ignore_ascii_case(COMPOSER_ROLE)
    }
}
