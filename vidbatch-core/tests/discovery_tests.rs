// vidbatch-core/tests/discovery_tests.rs

use vidbatch_core::discovery::{discover, filter_ignored};
use vidbatch_core::error::CoreError;
use std::fs::{self, File};
use std::path::PathBuf;
use tempfile::tempdir;

fn exts(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_discover_recurses_and_matches_listed_extensions() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let input_dir = dir.path();

    File::create(input_dir.join("video1.mp4"))?;
    File::create(input_dir.join("video2.MP4"))?;
    File::create(input_dir.join("video3.Mp4"))?; // Not listed, case matters
    File::create(input_dir.join("document.txt"))?;
    fs::create_dir_all(input_dir.join("season").join("disc1"))?;
    File::create(input_dir.join("season").join("disc1").join("nested.mp4"))?;

    let files = discover(input_dir, &exts(&[".mp4", ".MP4"]))?;
    let names: Vec<PathBuf> = files
        .iter()
        .map(|f| f.strip_prefix(input_dir).map(PathBuf::from))
        .collect::<Result<_, _>>()?;

    assert_eq!(names.len(), 3);
    assert!(names.contains(&PathBuf::from("video1.mp4")));
    assert!(names.contains(&PathBuf::from("video2.MP4")));
    assert!(names.contains(&PathBuf::from("season/disc1/nested.mp4")));
    Ok(())
}

#[test]
fn test_discover_skips_sidecar_files() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    File::create(dir.path().join("._movie.mp4"))?;
    File::create(dir.path().join("movie.mp4"))?;

    let files = discover(dir.path(), &exts(&[".mp4"]))?;

    assert_eq!(files, vec![dir.path().join("movie.mp4")]);
    Ok(())
}

#[test]
fn test_discover_empty_directory() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::create_dir(dir.path().join("empty_sub"))?;

    assert!(discover(dir.path(), &exts(&[".mp4"]))?.is_empty());
    Ok(())
}

#[test]
fn test_discover_missing_directory_is_an_error() {
    let result = discover(&PathBuf::from("/definitely/not/a/real/dir"), &exts(&[".mp4"]));
    assert!(matches!(result, Err(CoreError::PathError(_)) | Err(CoreError::Walkdir(_))));
}

#[test]
fn test_discover_order_is_stable() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    for name in ["c.mp4", "a.mp4", "b.mp4"] {
        File::create(dir.path().join(name))?;
    }

    let first = discover(dir.path(), &exts(&[".mp4"]))?;
    let second = discover(dir.path(), &exts(&[".mp4"]))?;

    assert_eq!(first, second);
    assert_eq!(first[0], dir.path().join("a.mp4"));
    Ok(())
}

#[test]
fn test_filter_ignored_after_discovery() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::create_dir(dir.path().join("Extras"))?;
    File::create(dir.path().join("Extras").join("trailer.mp4"))?;
    File::create(dir.path().join("feature.mp4"))?;

    let files = discover(dir.path(), &exts(&[".mp4"]))?;
    let kept = filter_ignored(files, &exts(&["/Extras/", "[unclosed"]));

    assert_eq!(kept, vec![dir.path().join("feature.mp4")]);
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_discover_keeps_symlinked_files_under_link_path() -> Result<(), Box<dyn std::error::Error>> {
    use std::os::unix::fs::symlink;

    let dir = tempdir()?;
    let elsewhere = tempdir()?;
    let input_dir = dir.path();
    File::create(input_dir.join("plain.mp4"))?;
    File::create(elsewhere.path().join("real.mp4"))?;
    symlink(elsewhere.path().join("real.mp4"), input_dir.join("link.mp4"))?;
    symlink(elsewhere.path().join("missing.mp4"), input_dir.join("dangling.mp4"))?;
    symlink(elsewhere.path(), input_dir.join("linked_dir.mp4"))?;

    let files = discover(input_dir, &exts(&[".mp4"]))?;

    assert_eq!(files, vec![input_dir.join("link.mp4"), input_dir.join("plain.mp4")]);
    Ok(())
}
