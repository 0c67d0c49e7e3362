use crate::models::{ArtistRef, CreditedArtistRef, Release, TrackNode, COMPOSER_ROLE};
use crate::tags::{Field, TagStore};
use tracing::debug;

/// Rebuild a release from the tags of an ordered file set.
///
/// Track entries come from each file; release-level fields come from the last file,
/// since every file of an album is expected to carry the same album tags. The
/// tracklist is sorted by track number, keeping file order between equal numbers.
pub fn read_metadata<S: TagStore>(sources: &[S]) -> Release {
    let mut release = Release::default();
    let mut tracks = Vec::with_capacity(sources.len());

    for (n, tags) in sources.iter().enumerate() {
        let position = position(tags).unwrap_or_else(|| {
            debug!("file {} has no usable track number; using its index", n + 1);
            (n + 1).to_string()
        });
        let artists = tags.values(Field::Artist).unwrap_or_default().into_iter().map(ArtistRef::aliased).collect();
        let composers = tags
            .values(Field::Composer)
            .unwrap_or_default()
            .into_iter()
            .map(|c| CreditedArtistRef::new(ArtistRef::aliased(c), COMPOSER_ROLE))
            .collect();

        tracks.push(TrackNode {
            position,
            title: tags.first(Field::Title).unwrap_or_default(),
            artists: Some(artists),
            extra_artists: Some(composers),
            ..TrackNode::default()
        });

        release.title = tags.first(Field::Album);
        release.artists = tags.values(Field::AlbumArtist).unwrap_or_default().into_iter().map(ArtistRef::aliased).collect();
        release.year = tags.first(Field::Date).as_deref().and_then(parse_year);
        release.genres = tags.values(Field::Genre).unwrap_or_default();
    }

    tracks.sort_by_key(|t| sort_key(&t.position));
    release.tracklist = tracks;
    release
}

/// "disc-track" when a disc number is present, else "track"; both without leading
/// zeros or "/total" suffixes.
fn position(tags: &impl TagStore) -> Option<String> {
    let track = parse_number(&tags.first(Field::TrackNumber)?)?;
    match tags.values(Field::DiscNumber) {
        Some(discs) => {
            let disc = parse_number(discs.first()?)?;
            Some(format!("{disc}-{track}"))
        }
        None => Some(track.to_string()),
    }
}

/// "0002" -> 2, "2/10" -> 2.
pub(crate) fn parse_number(s: &str) -> Option<u32> {
    s.split('/').next()?.trim().parse().ok()
}

fn parse_year(date: &str) -> Option<i32> {
    date.split('-').next()?.trim().parse().ok()
}

fn sort_key(position: &str) -> u32 {
    position.rsplit('-').next().and_then(|p| p.parse().ok()).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_is_leading_date_segment() {
        assert_eq!(parse_year("2024-05-01"), Some(2024));
        assert_eq!(parse_year("2024"), Some(2024));
        assert_eq!(parse_year("unknown"), None);
    }

    #[test]
    fn numbers_drop_padding_and_totals() {
        assert_eq!(parse_number("0002"), Some(2));
        assert_eq!(parse_number("2/10"), Some(2));
        assert_eq!(parse_number(""), None);
    }
}
