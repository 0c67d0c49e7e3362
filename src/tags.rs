use crate::error::Result;
use lofty::config::WriteOptions;
use lofty::file::TaggedFileExt;
use lofty::probe::read_from_path;
use lofty::tag::{ItemKey, Tag, TagExt};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// The tag fields this tool reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Title,
    Artist,
    AlbumArtist,
    Album,
    Genre,
    Composer,
    TrackNumber,
    DiscNumber,
    Date,
}

impl Field {
    pub const ALL: [Field; 9] = [
        Field::Title,
        Field::Artist,
        Field::AlbumArtist,
        Field::Album,
        Field::Genre,
        Field::Composer,
        Field::TrackNumber,
        Field::DiscNumber,
        Field::Date,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Artist => "artist",
            Field::AlbumArtist => "albumartist",
            Field::Album => "album",
            Field::Genre => "genre",
            Field::Composer => "composer",
            Field::TrackNumber => "tracknumber",
            Field::DiscNumber => "discnumber",
            Field::Date => "date",
        }
    }

    fn item_key(&self) -> ItemKey {
        match self {
            Field::Title => ItemKey::TrackTitle,
            Field::Artist => ItemKey::TrackArtist,
            Field::AlbumArtist => ItemKey::AlbumArtist,
            Field::Album => ItemKey::AlbumTitle,
            Field::Genre => ItemKey::Genre,
            Field::Composer => ItemKey::Composer,
            Field::TrackNumber => ItemKey::TrackNumber,
            Field::DiscNumber => ItemKey::DiscNumber,
            Field::Date => ItemKey::RecordingDate,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Minimal key/value view of one audio file's tags.
///
/// `values` returns `None` when the field is absent and `Some(vec![])` when it is
/// present without values; template rendering treats the two differently.
pub trait TagStore {
    fn values(&self, field: Field) -> Option<Vec<String>>;

    fn set_value(&mut self, field: Field, value: String);

    /// Write pending changes back to wherever the tags came from.
    fn persist(&mut self) -> Result<()>;

    fn first(&self, field: Field) -> Option<String> {
        self.values(field).and_then(|v| v.into_iter().next())
    }
}

/// In-memory tag set. Used for dry runs, for tests, and as the merge target when no
/// file backs the tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    fields: BTreeMap<Field, Vec<String>>,
}

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert of a multi-value field.
    pub fn with<I, S>(mut self, field: Field, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields.insert(field, values.into_iter().map(Into::into).collect());
        self
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.fields.get(&field).and_then(|v| v.first()).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.fields.contains_key(&field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &[String])> {
        self.fields.iter().map(|(k, v)| (*k, v.as_slice()))
    }
}

impl TagStore for TagSet {
    fn values(&self, field: Field) -> Option<Vec<String>> {
        self.fields.get(&field).cloned()
    }

    fn set_value(&mut self, field: Field, value: String) {
        self.fields.insert(field, vec![value]);
    }

    fn persist(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Tags of an audio file on disk, read and written through lofty.
pub struct LoftyTags {
    path: PathBuf,
    tag: Tag,
}

impl LoftyTags {
    /// Read the primary tag of `path`, or start an empty one of the file's native
    /// tag type when it has none.
    pub fn open(path: &Path) -> Result<Self> {
        let tagged_file = read_from_path(path)?;
        let tag = tagged_file
            .primary_tag()
            .cloned()
            .or_else(|| tagged_file.first_tag().cloned())
            .unwrap_or_else(|| Tag::new(tagged_file.primary_tag_type()));
        Ok(Self { path: path.to_path_buf(), tag })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TagStore for LoftyTags {
    fn values(&self, field: Field) -> Option<Vec<String>> {
        let values: Vec<String> = self.tag.get_strings(&field.item_key()).map(str::to_string).collect();
        if values.is_empty() {
            None
        } else {
            Some(values)
        }
    }

    fn set_value(&mut self, field: Field, value: String) {
        if !self.tag.insert_text(field.item_key(), value) {
            debug!("{:?} tags cannot hold {}; skipped for {}", self.tag.tag_type(), field, self.path.display());
        }
    }

    fn persist(&mut self) -> Result<()> {
        self.tag.save_to_path(&self.path, WriteOptions::default())?;
        Ok(())
    }
}
