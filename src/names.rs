use crate::models::ArtistRef;
use once_cell::sync::Lazy;
use regex::Regex;

/// Discogs disambiguates homonymous artists with a numeric suffix, e.g. "Artist (2)".
static DISAMBIGUATION_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+\(\d+\)$").unwrap());

/// Display name for an artist: alias, then canonical name, minus any disambiguation suffix.
pub fn resolve_name(artist: &ArtistRef) -> Option<String> {
    let chosen = [artist.alias.as_deref(), artist.name.as_deref()]
        .into_iter()
        .flatten()
        .find(|s| !s.is_empty())?;
    let stripped = DISAMBIGUATION_SUFFIX.replace(chosen, "");
    Some(stripped.into_owned())
}

/// Resolve every artist, dropping those without a usable name.
pub fn resolve_names<'a, I>(artists: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a ArtistRef>,
{
    artists.into_iter().filter_map(resolve_name).collect()
}
