use crate::models::{Release, TrackNode};
use crate::names::{resolve_name, resolve_names};
use crate::options::SkipMask;
use crate::tags::{Field, TagStore};

const JOIN: &str = ", ";

/// Write release and track metadata into `sink`.
///
/// `index` is the track's 1-based place in the flattened tracklist; it stands in
/// for the track number when the position is empty. Fields without a value are
/// left alone, never set to an empty string.
pub fn merge<S: TagStore + ?Sized>(release: &Release, track: &TrackNode, index: usize, sink: &mut S, skip: &SkipMask) {
    if !skip.title {
        set(sink, Field::Title, title(track, skip.subtrack));
    }
    if !skip.artist {
        set(sink, Field::Artist, join(track_artists(release, track)));
    }
    if !skip.albumartist {
        set(sink, Field::AlbumArtist, join(resolve_names(&release.artists)));
    }
    if !skip.genre {
        let genres = release.genres.iter().chain(&release.styles).cloned().collect();
        set(sink, Field::Genre, join(genres));
    }
    if !skip.album {
        set(sink, Field::Album, release.title.clone());
    }
    if !skip.composer {
        set(sink, Field::Composer, join(composers(track)));
    }
    if !skip.position {
        let (disc, number) = split_position(&track.position);
        set(sink, Field::TrackNumber, Some(number.unwrap_or_else(|| index.to_string())));
        set(sink, Field::DiscNumber, disc);
    }
    if !skip.date {
        if let Some(year) = release.year.filter(|y| *y != 0) {
            sink.set_value(Field::Date, year.to_string());
        }
    }
}

fn set<S: TagStore + ?Sized>(sink: &mut S, field: Field, value: Option<String>) {
    if let Some(v) = value.filter(|v| !v.is_empty()) {
        sink.set_value(field, v);
    }
}

fn join(names: Vec<String>) -> Option<String> {
    if names.is_empty() {
        None
    } else {
        Some(names.join(JOIN))
    }
}

/// With sub-tracks skipped, a track that still carries sub-tracks lists them in
/// its title: "Suite: Part I / Part II".
fn title(track: &TrackNode, skip_subtracks: bool) -> Option<String> {
    let subs: Vec<&str> = match (&track.sub_tracks, skip_subtracks) {
        (Some(subs), true) => subs.iter().filter(|s| s.is_track()).map(|s| s.title.as_str()).collect(),
        _ => Vec::new(),
    };
    if subs.is_empty() {
        Some(track.title.clone())
    } else {
        Some(format!("{}: {}", track.title, subs.join(" / ")))
    }
}

/// Track artists (or the release artists when the track names none), then every
/// credited artist that is not a composer.
fn track_artists(release: &Release, track: &TrackNode) -> Vec<String> {
    let mut names = track.artists.as_deref().map(resolve_names).unwrap_or_default();
    if names.is_empty() {
        names = resolve_names(&release.artists);
    }
    if let Some(extra) = &track.extra_artists {
        names.extend(extra.iter().filter(|c| !c.is_composer()).filter_map(|c| resolve_name(&c.artist)));
    }
    names
}

fn composers(track: &TrackNode) -> Vec<String> {
    track
        .extra_artists
        .iter()
        .flatten()
        .filter(|c| c.is_composer())
        .filter_map(|c| resolve_name(&c.artist))
        .collect()
}

/// Split "1-02" into (disc "1", track "02"); "02" into (None, "02"). A missing
/// track component yields `None` so the caller can fall back to the index.
pub fn split_position(position: &str) -> (Option<String>, Option<String>) {
    let parts: Vec<&str> = position.trim().split('-').map(str::trim).collect();
    let number = parts.last().filter(|p| !p.is_empty()).map(|p| p.to_string());
    if number.is_none() {
        return (None, None);
    }
    let disc = match parts.as_slice() {
        [disc, _] if !disc.is_empty() => Some(disc.to_string()),
        _ => None,
    };
    (disc, number)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_position_variants() {
        assert_eq!(split_position("1-02"), (Some("1".into()), Some("02".into())));
        assert_eq!(split_position("02"), (None, Some("02".into())));
        assert_eq!(split_position(""), (None, None));
        assert_eq!(split_position("1-"), (None, None));
        assert_eq!(split_position("-3"), (None, Some("3".into())));
        assert_eq!(split_position("A1"), (None, Some("A1".into())));
    }
}
