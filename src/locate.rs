//! Upward search for the project's config file.

use std::path::{Component, Path, PathBuf};

/// Where the config file was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLocation {
    path: PathBuf,
    directory: PathBuf,
}

impl ConfigLocation {
    /// Absolute path of the config file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory that directly contains [`path`](Self::path).
    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

/// Searches `start` and each of its ancestors for a regular file named
/// `file_name`, returning the nearest one.
///
/// A start path that is empty, the filesystem root, or not an existing
/// directory is a miss, not an error. The root itself is never probed.
pub fn locate(start: impl AsRef<Path>, file_name: &str) -> Option<ConfigLocation> {
    let mut dir = normalize(start.as_ref())?;

    loop {
        if dir.parent().is_none() || !dir.is_dir() {
            tracing::debug!(dir = %dir.display(), "search stopped");
            return None;
        }

        let candidate = dir.join(file_name);
        tracing::debug!(candidate = %candidate.display(), "probing");
        if candidate.is_file() {
            return Some(ConfigLocation {
                path: candidate,
                directory: dir,
            });
        }

        let parent = dir.parent()?.to_path_buf();
        if parent == dir {
            return None;
        }
        dir = parent;
    }
}

/// Makes `path` absolute and resolves `.` and `..` lexically.
///
/// Symlinks are not followed, so `..` always means the textual parent.
fn normalize(path: &Path) -> Option<PathBuf> {
    if path.as_os_str().is_empty() {
        return None;
    }

    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir().ok()?.join(path)
    };

    let mut out = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const TARGET: &str = "wp-config.php";

    fn tree(dirs: &[&str], files: &[&str]) -> TempDir {
        let root = TempDir::new().unwrap();
        for dir in dirs {
            fs::create_dir_all(root.path().join(dir)).unwrap();
        }
        for file in files {
            fs::write(root.path().join(file), "<?php\n").unwrap();
        }
        root
    }

    #[test]
    fn test_finds_config_in_ancestor() {
        let root = tree(&["proj/wp-content/themes/x"], &["proj/wp-config.php"]);
        let start = root.path().join("proj/wp-content/themes/x/");

        let found = locate(&start, TARGET).unwrap();
        assert_eq!(found.path(), root.path().join("proj/wp-config.php"));
        assert_eq!(found.directory(), root.path().join("proj"));
        assert_eq!(found.path().parent(), Some(found.directory()));
    }

    #[test]
    fn test_prefers_nearest() {
        let root = tree(
            &["outer/inner/deep"],
            &["outer/wp-config.php", "outer/inner/wp-config.php"],
        );

        let found = locate(root.path().join("outer/inner/deep"), TARGET).unwrap();
        assert_eq!(found.directory(), root.path().join("outer/inner"));
    }

    #[test]
    fn test_start_directory_itself_counts() {
        let root = tree(&["proj"], &["proj/wp-config.php"]);
        let found = locate(root.path().join("proj"), TARGET).unwrap();
        assert_eq!(found.directory(), root.path().join("proj"));
    }

    #[test]
    fn test_not_found() {
        let root = tree(&["proj/a/b"], &[]);
        assert_eq!(locate(root.path().join("proj/a/b"), "no-such-config-file.php"), None);
    }

    #[test]
    fn test_directory_with_target_name_is_skipped() {
        let name = "wpdm-dir-not-file.php";
        let nested = format!("proj/{name}");
        let root = tree(&[nested.as_str(), "proj/sub"], &[]);
        assert_eq!(locate(root.path().join("proj/sub"), name), None);
    }

    #[test]
    fn test_missing_start_is_a_miss() {
        let root = tree(&[], &["wp-config.php"]);
        assert_eq!(locate(root.path().join("gone/away"), TARGET), None);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(locate("", TARGET), None);
        assert_eq!(locate("/", TARGET), None);
    }

    #[test]
    fn test_dot_segments_are_resolved() {
        let root = tree(&["proj/a", "proj/b"], &["proj/wp-config.php"]);
        let start = root.path().join("proj/a/./../b/");

        let found = locate(&start, TARGET).unwrap();
        assert_eq!(found.directory(), root.path().join("proj"));
    }

    #[test]
    fn test_repeated_calls_agree() {
        let root = tree(&["proj/x"], &["proj/wp-config.php"]);
        let start = root.path().join("proj/x");
        assert_eq!(locate(&start, TARGET), locate(&start, TARGET));
    }

    #[test]
    fn test_normalize() {
        assert_eq!(
            normalize(Path::new("/a/./b/../c//d")),
            Some(PathBuf::from("/a/c/d"))
        );
        assert_eq!(normalize(Path::new("/..")), Some(PathBuf::from("/")));
        assert_eq!(normalize(Path::new("")), None);
    }

    #[test]
    fn test_relative_start_resolves_against_working_directory() {
        let root = TempDir::new_in(".").unwrap();
        fs::create_dir_all(root.path().join("proj/wp-content/uploads")).unwrap();
        fs::write(root.path().join("proj/wp-config.php"), "<?php\n").unwrap();
        assert!(root.path().is_relative());

        let found = locate(root.path().join("proj/wp-content/uploads"), TARGET).unwrap();

        let expected = std::env::current_dir()
            .unwrap()
            .join(root.path().file_name().unwrap())
            .join("proj");
        assert_eq!(found.directory(), expected);
        assert!(found.path().is_absolute());
    }

    #[test]
    fn test_normalize_relative() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(normalize(Path::new("a/../b/.")), Some(cwd.join("b")));
        assert_eq!(normalize(Path::new(".")), Some(cwd));
    }
}
