use crate::error::{Error, Result};

/// Fields (and the sub-track expansion) to leave untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SkipMask {
    pub artist: bool,
    pub composer: bool,
    pub title: bool,
    pub position: bool,
    pub date: bool,
    pub subtrack: bool,
    pub album: bool,
    pub genre: bool,
    pub albumartist: bool,
}

impl SkipMask {
    /// Parse skip names. Entries may themselves be comma separated, so both
    /// `["artist", "date"]` and `["artist,date"]` work.
    pub fn parse<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut mask = SkipMask::default();
        for entry in names {
            for name in entry.as_ref().split(',').map(str::trim).filter(|s| !s.is_empty()) {
                match name.to_ascii_lowercase().as_str() {
                    "artist" => mask.artist = true,
                    "composer" => mask.composer = true,
                    "title" => mask.title = true,
                    "position" => mask.position = true,
                    "date" => mask.date = true,
                    "subtrack" | "subtracks" => mask.subtrack = true,
                    "album" => mask.album = true,
                    "genre" => mask.genre = true,
                    "albumartist" => mask.albumartist = true,
                    _ => return Err(Error::InvalidSkip(name.to_string())),
                }
            }
        }
        Ok(mask)
    }

    /// Union of two masks.
    pub fn merged(self, other: SkipMask) -> SkipMask {
        SkipMask {
            artist: self.artist || other.artist,
            composer: self.composer || other.composer,
            title: self.title || other.title,
            position: self.position || other.position,
            date: self.date || other.date,
            subtrack: self.subtrack || other.subtrack,
            album: self.album || other.album,
            genre: self.genre || other.genre,
            albumartist: self.albumartist || other.albumartist,
        }
    }
}

/// Per-invocation settings shared by all workflows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    pub skip: SkipMask,
    /// Compute everything, persist nothing.
    pub dry: bool,
    /// Log count mismatches and per-file failures instead of aborting.
    pub ignore: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_lists_and_aliases() {
        let mask = SkipMask::parse(["artist,Date", "subtracks"]).unwrap();
        assert!(mask.artist && mask.date && mask.subtrack);
        assert!(!mask.title);
    }

    #[test]
    fn parse_rejects_unknown_names() {
        let err = SkipMask::parse(["artists"]).unwrap_err();
        assert!(matches!(err, Error::InvalidSkip(ref n) if n == "artists"));
    }

    #[test]
    fn empty_input_skips_nothing() {
        assert_eq!(SkipMask::parse(Vec::<String>::new()).unwrap(), SkipMask::default());
        assert_eq!(SkipMask::parse([""]).unwrap(), SkipMask::default());
    }
}
