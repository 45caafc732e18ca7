use super::{ARTWORK_EXTENSIONS, FRONT_ARTWORK, SECONDARY_ARTWORK};
use crate::{domain::FileType, domain::Track, expand_tilde, strip_win_prefix};
use anyhow::{Context, Result};
use lofty::{file::TaggedFileExt, tag::Accessor};
use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};
use unicode_normalization::UnicodeNormalization;
use walkdir::WalkDir;

#[derive(Default)]
pub struct Library {
    tracks: Vec<Track>,
}

/// Front and secondary artwork found beside a directory's tracks.
type DirArtwork = (Option<String>, Option<String>);

impl Library {
    /// Scan `root` when one is configured. Without a root the library is
    /// empty and the player falls back to the last saved track list.
    pub fn init(root: Option<&Path>) -> Result<Self> {
        let Some(root) = root else {
            return Ok(Self::default());
        };

        let expanded = expand_tilde(root)?;
        let canon = expanded
            .canonicalize()
            .with_context(|| format!("Library root does not exist: {}", root.display()))?;

        let tracks = Self::scan(&canon);
        log::info!("Found {} tracks under {}", tracks.len(), canon.display());

        Ok(Library { tracks })
    }

    /// Build the track sequence, ordered by path.
    pub fn scan(root: &Path) -> Vec<Track> {
        let mut artwork_cache: HashMap<PathBuf, DirArtwork> = HashMap::new();

        Self::collect_valid_files(root)
            .into_iter()
            .map(|path| {
                let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
                let (front, secondary) = artwork_cache
                    .entry(dir)
                    .or_insert_with_key(|dir| find_artwork(dir))
                    .clone();

                Track::new(path_to_url(&path), track_name(&path))
                    .with_artwork(front)
                    .with_secondary_artwork(secondary)
            })
            .collect()
    }

    /// Playable files under `dir`.
    ///
    /// Folders containing a `.nomedia` file are skipped entirely.
    fn collect_valid_files(dir: &Path) -> Vec<PathBuf> {
        WalkDir::new(dir)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| {
                !e.path().join(".nomedia").exists()
                    && !e.path().to_string_lossy().contains("$RECYCLE.BIN")
            })
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| FileType::from_path(entry.path()).is_playable())
            .map(|entry| entry.into_path())
            .collect()
    }

    pub fn into_tracks(self) -> Vec<Track> {
        self.tracks
    }
}

fn path_to_url(path: &Path) -> String {
    strip_win_prefix(&path.to_string_lossy())
}

/// Tag title when present, otherwise the file name without extension.
fn track_name(path: &Path) -> String {
    let title = lofty::read_from_path(path).ok().and_then(|file| {
        file.primary_tag()
            .and_then(|tag| tag.title().map(|t| t.trim().to_string()))
            .filter(|t| !t.is_empty())
    });

    let name = title.unwrap_or_else(|| {
        path.file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    });

    name.nfc().collect()
}

fn find_artwork(dir: &Path) -> DirArtwork {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return (None, None);
    };

    let mut images: Vec<(String, PathBuf)> = entries
        .filter_map(Result::ok)
        .map(|e| e.path())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| ARTWORK_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        })
        .filter_map(|p| {
            let stem = p.file_stem()?.to_string_lossy().to_lowercase();
            Some((stem, p))
        })
        .collect();
    images.sort();

    let pick = |stems: &[&str]| {
        stems.iter().find_map(|stem| {
            images
                .iter()
                .find(|(s, _)| s == stem)
                .map(|(_, p)| path_to_url(p))
        })
    };

    (pick(&FRONT_ARTWORK), pick(&SECONDARY_ARTWORK))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"").unwrap();
    }

    #[test]
    fn scan_collects_playable_files_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("b/02 second.flac"));
        touch(&root.join("b/01 first.mp3"));
        touch(&root.join("a/only.ogg"));
        touch(&root.join("a/notes.txt"));

        let names: Vec<_> = Library::scan(root).into_iter().map(|t| t.name).collect();

        assert_eq!(names, vec!["only", "01 first", "02 second"]);
    }

    #[test]
    fn nomedia_folders_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("keep/a.mp3"));
        touch(&root.join("skip/b.mp3"));
        touch(&root.join("skip/.nomedia"));

        let tracks = Library::scan(root);

        assert_eq!(tracks.len(), 1);
        assert!(tracks[0].url.ends_with("a.mp3"));
    }

    #[test]
    fn artwork_is_taken_from_the_track_folder() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("album/track.mp3"));
        touch(&root.join("album/Cover.JPG"));
        touch(&root.join("album/vinyl.png"));
        touch(&root.join("bare/track.mp3"));

        let tracks = Library::scan(root);
        let album = &tracks[0];
        let bare = &tracks[1];

        assert!(album.artwork.as_deref().unwrap().ends_with("Cover.JPG"));
        assert!(album.artwork_secondary.as_deref().unwrap().ends_with("vinyl.png"));
        assert_eq!(bare.artwork, None);
        assert_eq!(bare.artwork_secondary, None);
    }

    #[test]
    fn missing_root_is_an_error() {
        assert!(Library::init(Some(Path::new("/no/such/music/root"))).is_err());
    }

    #[test]
    fn no_root_means_no_tracks() {
        let library = Library::init(None).unwrap();
        assert!(library.into_tracks().is_empty());
    }
}
