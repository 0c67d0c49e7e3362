use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tempfile::tempdir;

use discogs_tag::error::Error;
use discogs_tag::tags::{Field, LoftyTags, TagStore};
use lofty::config::ParseOptions;
use lofty::file::AudioFile;
use lofty::flac::FlacFile;

/// A FLAC stream with only a STREAMINFO block: 44.1 kHz, stereo, 16 bit, no tags.
fn write_minimal_flac(path: &Path) {
    let mut bytes = b"fLaC".to_vec();
    // last metadata block, STREAMINFO, 34 bytes
    bytes.extend_from_slice(&[0x80, 0x00, 0x00, 0x22]);
    bytes.extend_from_slice(&[0x10, 0x00, 0x10, 0x00]);
    bytes.extend_from_slice(&[0x00; 6]);
    bytes.extend_from_slice(&[0x0A, 0xC4, 0x42, 0xF0, 0x00, 0x00, 0x00, 0x00]);
    bytes.extend_from_slice(&[0x00; 16]);
    fs::write(path, bytes).unwrap();
}

fn flac_fixture() -> (tempfile::TempDir, PathBuf) {
    let td = tempdir().unwrap();
    let path = td.path().join("track.flac");
    write_minimal_flac(&path);
    (td, path)
}

fn sample_value(field: Field) -> &'static str {
    match field {
        Field::Title => "Song 1",
        Field::Artist => "Various, S. Player",
        Field::AlbumArtist => "Various",
        Field::Album => "Big Compilation",
        Field::Genre => "Electronic, Pop",
        Field::Composer => "Writer",
        Field::TrackNumber => "2",
        Field::DiscNumber => "1",
        Field::Date => "2001",
    }
}

#[test]
fn untagged_file_has_no_values() {
    let (_td, path) = flac_fixture();
    let tags = LoftyTags::open(&path).expect("open flac");
    assert_eq!(tags.path(), path.as_path());
    for field in Field::ALL {
        assert_eq!(tags.values(field), None, "{field} should be absent");
    }
}

#[test]
fn every_field_survives_save_and_reopen() {
    let (_td, path) = flac_fixture();
    let mut tags = LoftyTags::open(&path).unwrap();
    for field in Field::ALL {
        tags.set_value(field, sample_value(field).to_string());
    }
    tags.persist().expect("save tags");

    let reopened = LoftyTags::open(&path).unwrap();
    for field in Field::ALL {
        assert_eq!(reopened.first(field).as_deref(), Some(sample_value(field)), "{field}");
    }
}

#[test]
fn fields_use_conventional_vorbis_keys() {
    let (_td, path) = flac_fixture();
    let mut tags = LoftyTags::open(&path).unwrap();
    for field in Field::ALL {
        tags.set_value(field, sample_value(field).to_string());
    }
    tags.persist().unwrap();

    let mut file = File::open(&path).unwrap();
    let flac = FlacFile::read_from(&mut file, ParseOptions::new()).unwrap();
    let comments = flac.vorbis_comments().expect("vorbis comments written");
    for (key, field) in [
        ("TITLE", Field::Title),
        ("ARTIST", Field::Artist),
        ("ALBUMARTIST", Field::AlbumArtist),
        ("ALBUM", Field::Album),
        ("GENRE", Field::Genre),
        ("COMPOSER", Field::Composer),
        ("TRACKNUMBER", Field::TrackNumber),
        ("DISCNUMBER", Field::DiscNumber),
        ("DATE", Field::Date),
    ] {
        assert_eq!(comments.get(key), Some(sample_value(field)), "{key}");
    }
}

#[test]
fn setting_a_field_replaces_its_value() {
    let (_td, path) = flac_fixture();
    let mut tags = LoftyTags::open(&path).unwrap();
    tags.set_value(Field::Title, "Old".into());
    tags.set_value(Field::Title, "New".into());
    tags.persist().unwrap();

    let reopened = LoftyTags::open(&path).unwrap();
    assert_eq!(reopened.values(Field::Title), Some(vec!["New".to_string()]));
}

#[test]
fn unreadable_file_is_a_tag_error() {
    let td = tempdir().unwrap();
    let path = td.path().join("broken.flac");
    fs::write(&path, b"not audio at all").unwrap();
    assert!(matches!(LoftyTags::open(&path), Err(Error::Lofty(_))));
}
