use std::collections::HashMap;
use std::env;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tempfile::tempdir;

use discogs_tag::options::Options;
use discogs_tag::tags::{Field, TagSet};
use discogs_tag::workflow::rename_files;

// Runs alone in this binary because it changes the working directory.
#[test]
fn relative_root_renders_next_to_source() {
    let td = tempdir().unwrap();
    let base = td.path().canonicalize().unwrap();
    let root = base.join("from");
    fs::create_dir_all(&root).unwrap();
    File::create(root.join("a.flac")).unwrap();
    File::create(root.join("01 Intro.flac")).unwrap();
    File::create(root.join("cover.jpg")).unwrap();
    env::set_current_dir(&root).unwrap();

    let a = PathBuf::from("./a.flac");
    let in_place = PathBuf::from("./01 Intro.flac");
    let mut tags = HashMap::new();
    tags.insert(a.clone(), TagSet::new().with(Field::Album, ["Album"]).with(Field::TrackNumber, ["2"]).with(Field::Title, ["Body"]));
    tags.insert(in_place.clone(), TagSet::new().with(Field::TrackNumber, ["1"]).with(Field::Title, ["Intro"]));
    let open = |p: &Path| Ok(tags[p].clone());

    let moved = rename_files(Path::new("."), &[a.clone()], "%b/%n %t", &Options::default(), open).unwrap();
    assert_eq!(moved, vec![base.join("Album").join("02 Body.flac")]);
    assert!(moved[0].exists());
    assert!(root.join("cover.jpg").exists(), "the source directory is not a destination");

    // a file already named after its tags stays where it is
    let kept = rename_files(Path::new("."), &[in_place.clone()], "%n %t", &Options::default(), open).unwrap();
    assert_eq!(kept, vec![root.join("01 Intro.flac")]);
    assert!(root.join("01 Intro.flac").exists());
}
