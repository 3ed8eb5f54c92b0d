//! Folder listing with an extension filter and a selection cursor.

use std::path::{Path, PathBuf};

use crate::error::{AppError, Result};

/// Check if a path has one of `extensions` (compared case-insensitively).
pub fn is_image_file(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| extensions.iter().any(|allowed| allowed.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

/// The images of one folder, sorted by path, and the selected one.
#[derive(Debug, Clone)]
pub struct ImageLibrary {
    extensions: Vec<String>,
    folder: Option<PathBuf>,
    entries: Vec<PathBuf>,
    current: Option<usize>,
}

impl ImageLibrary {
    pub fn new(extensions: Vec<String>) -> Self {
        Self {
            extensions,
            folder: None,
            entries: Vec::new(),
            current: None,
        }
    }

    /// List the images in `folder`, replacing the previous listing.
    ///
    /// Subdirectories are not searched. Returns the number of images found;
    /// an empty folder is not an error. Nothing is selected afterwards.
    pub fn open_folder(&mut self, folder: &Path) -> Result<usize> {
        let mut paths: Vec<PathBuf> = std::fs::read_dir(folder)
            .map_err(|e| AppError::io(folder, e))?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && is_image_file(path, &self.extensions))
            .collect();

        paths.sort();

        log::info!("Found {} images in {:?}", paths.len(), folder);
        self.folder = Some(folder.to_path_buf());
        self.entries = paths;
        self.current = None;
        Ok(self.entries.len())
    }

    pub fn folder(&self) -> Option<&Path> {
        self.folder.as_deref()
    }

    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current(&self) -> Option<&Path> {
        self.current.map(|i| self.entries[i].as_path())
    }

    /// File name of the entry at `index`.
    pub fn name(&self, index: usize) -> Option<String> {
        self.entries
            .get(index)
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
    }

    /// Select the entry at `index`. Out-of-range indices leave the cursor alone.
    pub fn select(&mut self, index: usize) -> Option<&Path> {
        if index >= self.entries.len() {
            log::debug!("Ignoring selection {} of {} images", index, self.entries.len());
            return None;
        }
        self.current = Some(index);
        Some(self.entries[index].as_path())
    }

    /// Move to the next image. Stays on the last one; selects the first if
    /// nothing is selected yet.
    #[expect(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<&Path> {
        let index = match self.current {
            Some(i) => (i + 1).min(self.entries.len().saturating_sub(1)),
            None => 0,
        };
        self.select(index)
    }

    /// Move to the previous image. Stays on the first one.
    pub fn previous(&mut self) -> Option<&Path> {
        let index = self.current.map(|i| i.saturating_sub(1)).unwrap_or(0);
        self.select(index)
    }

    pub fn first(&mut self) -> Option<&Path> {
        self.select(0)
    }

    pub fn last(&mut self) -> Option<&Path> {
        let index = self.entries.len().checked_sub(1)?;
        self.select(index)
    }
}

impl Default for ImageLibrary {
    fn default() -> Self {
        Self::new(crate::config::default_extensions())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Fresh scratch folder under the system temp dir.
    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("annoview-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn touch(dir: &Path, name: &str) {
        std::fs::write(dir.join(name), b"").unwrap();
    }

    #[test]
    fn test_is_image_file_ignores_case() {
        let exts = crate::config::default_extensions();
        assert!(is_image_file(Path::new("a/b.PNG"), &exts));
        assert!(is_image_file(Path::new("photo.Jpeg"), &exts));
        assert!(!is_image_file(Path::new("notes.txt"), &exts));
        assert!(!is_image_file(Path::new("png"), &exts));
    }

    #[test]
    fn test_open_folder_filters_and_sorts() {
        let dir = scratch("filter");
        touch(&dir, "c.jpg");
        touch(&dir, "a.PNG");
        touch(&dir, "b.txt");
        touch(&dir, "d.jpeg");
        std::fs::create_dir(dir.join("sub.png")).unwrap();

        let mut library = ImageLibrary::default();
        assert_eq!(library.open_folder(&dir).unwrap(), 3);
        let names: Vec<_> = (0..library.len()).filter_map(|i| library.name(i)).collect();
        assert_eq!(names, vec!["a.PNG", "c.jpg", "d.jpeg"]);
        assert_eq!(library.folder(), Some(dir.as_path()));
        assert!(library.current().is_none());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_empty_folder_is_not_an_error() {
        let dir = scratch("empty");
        let mut library = ImageLibrary::default();
        assert_eq!(library.open_folder(&dir).unwrap(), 0);
        assert!(library.is_empty());
        assert!(library.next().is_none());
        assert!(library.last().is_none());
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_folder_is_io_error() {
        let mut library = ImageLibrary::default();
        let err = library
            .open_folder(Path::new("/definitely/not/a/folder"))
            .unwrap_err();
        assert!(matches!(err, AppError::Io { .. }));
    }

    #[test]
    fn test_cursor_clamps_at_both_ends() {
        let dir = scratch("cursor");
        for name in ["1.png", "2.png", "3.png"] {
            touch(&dir, name);
        }
        let mut library = ImageLibrary::default();
        library.open_folder(&dir).unwrap();

        assert_eq!(library.next(), Some(dir.join("1.png").as_path()));
        assert_eq!(library.previous(), Some(dir.join("1.png").as_path()));
        library.next();
        library.next();
        assert_eq!(library.current_index(), Some(2));
        assert_eq!(library.next(), Some(dir.join("3.png").as_path()));
        assert_eq!(library.first(), Some(dir.join("1.png").as_path()));
        assert_eq!(library.last(), Some(dir.join("3.png").as_path()));

        assert!(library.select(7).is_none());
        assert_eq!(library.current_index(), Some(2));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_custom_extensions() {
        let dir = scratch("custom");
        touch(&dir, "a.png");
        touch(&dir, "b.bmp");
        let mut library = ImageLibrary::new(vec!["bmp".to_string()]);
        library.open_folder(&dir).unwrap();
        assert_eq!(library.entries(), &[dir.join("b.bmp")]);
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
