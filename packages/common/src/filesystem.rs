use std::collections::HashMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File system abstraction for generation I/O and testing
pub trait FileSystem {
    /// Check if a file exists
    fn exists(&self, path: &Path) -> bool;

    /// Read a file to a string
    fn read_to_string(&self, path: &Path) -> Result<String, std::io::Error>;

    /// Write string contents to a file, creating parent directories as needed
    fn write(&mut self, path: &Path, contents: &str) -> Result<(), std::io::Error>;

    /// Find the first file with the given name anywhere under `root`
    fn find_file(&self, root: &Path, file_name: &str) -> Option<PathBuf>;
}

/// Real file system implementation
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_to_string(&self, path: &Path) -> Result<String, std::io::Error> {
        std::fs::read_to_string(path)
    }

    fn write(&mut self, path: &Path, contents: &str) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)
    }

    fn find_file(&self, root: &Path, file_name: &str) -> Option<PathBuf> {
        WalkDir::new(root)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .find(|entry| entry.file_type().is_file() && entry.file_name() == file_name)
            .map(|entry| entry.into_path())
    }
}

/// Mock file system for testing
pub struct MockFileSystem {
    pub files: HashMap<PathBuf, String>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self {
            files: HashMap::new(),
        }
    }

    pub fn add_file(&mut self, path: PathBuf, contents: impl Into<String>) {
        self.files.insert(path, contents.into());
    }
}

impl Default for MockFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for MockFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    fn read_to_string(&self, path: &Path) -> Result<String, std::io::Error> {
        self.files.get(path).cloned().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, format!("{}", path.display()))
        })
    }

    fn write(&mut self, path: &Path, contents: &str) -> Result<(), std::io::Error> {
        self.files.insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }

    fn find_file(&self, root: &Path, file_name: &str) -> Option<PathBuf> {
        self.files
            .keys()
            .find(|path| {
                path.starts_with(root)
                    && path.file_name().map(|name| name == file_name).unwrap_or(false)
            })
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_read_back() {
        let mut fs = MockFileSystem::new();
        fs.add_file(PathBuf::from("/tmp/a/PersonInterface.iface"), "interface PersonInterface {}");

        assert!(fs.exists(Path::new("/tmp/a/PersonInterface.iface")));
        assert_eq!(
            fs.read_to_string(Path::new("/tmp/a/PersonInterface.iface")).unwrap(),
            "interface PersonInterface {}"
        );
    }

    #[test]
    fn test_real_find_file_walks_nested_directories() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(nested.join("PersonInterface.iface"), "interface PersonInterface {}")
            .unwrap();

        let fs = RealFileSystem;
        let found = fs
            .find_file(dir.path(), "PersonInterface.iface")
            .expect("Missing interface file");
        assert!(found.ends_with("a/b/PersonInterface.iface"));

        assert!(fs.find_file(dir.path(), "Other.iface").is_none());
    }

    #[test]
    fn test_real_write_creates_parent_directories() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let target = dir.path().join("entities").join("Person.rs");

        let mut fs = RealFileSystem;
        fs.write(&target, "pub struct Person;").expect("Failed to write");

        assert_eq!(
            std::fs::read_to_string(&target).unwrap(),
            "pub struct Person;"
        );
    }

    #[test]
    fn test_mock_find_file() {
        let mut fs = MockFileSystem::new();
        fs.add_file(PathBuf::from("/root/nested/deep/PersonInterface.iface"), "");

        let found = fs.find_file(Path::new("/root"), "PersonInterface.iface");
        assert_eq!(found, Some(PathBuf::from("/root/nested/deep/PersonInterface.iface")));

        assert!(fs.find_file(Path::new("/root"), "Missing.iface").is_none());
    }
}
