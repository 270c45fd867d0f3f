//! The backing store: both collections in memory, mirrored to one JSON file.
//!
//! The file is read once at startup and rewritten in full after every
//! mutation. There is no incremental write and no atomic replace.

use crate::error::CrowdfundResult;
use crate::model::{Dataset, Project, User};
use chrono::Utc;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Default file name, relative to the working directory.
pub const DEFAULT_DB_FILE: &str = "crowdfunding_db.json";

pub struct Store {
    path: PathBuf,
    data: Dataset,
}

/// What happened while opening the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    /// No file yet; started empty
    Fresh,
    /// File was unparsable and moved aside to the given path
    Recovered(PathBuf),
    /// File was unparsable and could not be moved; the next save replaces it
    Unmovable,
}

impl Store {
    /// Empty store bound to `path`, nothing read or written.
    pub fn empty(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            data: Dataset::default(),
        }
    }

    /// Open the store at `path`. A missing or blank file is an empty store.
    /// A file that is not a valid document is renamed to
    /// `<name>.corrupt-<timestamp>` so it is not overwritten by the next save.
    /// If the rename fails the store still opens empty.
    pub fn load(path: &Path) -> CrowdfundResult<(Self, LoadOutcome)> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok((Self::empty(path), LoadOutcome::Fresh));
            }
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok((Self::empty(path), LoadOutcome::Fresh));
        }

        match serde_json::from_str::<Dataset>(&content) {
            Ok(data) => Ok((
                Self {
                    path: path.to_path_buf(),
                    data,
                },
                LoadOutcome::Loaded,
            )),
            Err(err) => {
                eprintln!(
                    "Warning: {} is not a valid data file ({})",
                    path.display(),
                    err
                );
                let outcome = set_aside(path, &corrupt_path(path));
                Ok((Self::empty(path), outcome))
            }
        }
    }

    /// Write the full dataset back to the file.
    pub fn save(&self) -> CrowdfundResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.path, encode(&self.data)?)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn users(&self) -> &[User] {
        &self.data.users
    }

    pub fn projects(&self) -> &[Project] {
        &self.data.projects
    }

    pub(crate) fn users_mut(&mut self) -> &mut Vec<User> {
        &mut self.data.users
    }

    pub(crate) fn projects_mut(&mut self) -> &mut Vec<Project> {
        &mut self.data.projects
    }
}

/// JSON with 4-space indentation, the layout of existing data files.
fn encode(data: &Dataset) -> CrowdfundResult<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    data.serialize(&mut ser)?;
    buf.push(b'\n');
    Ok(buf)
}

fn set_aside(path: &Path, aside: &Path) -> LoadOutcome {
    match std::fs::rename(path, aside) {
        Ok(()) => {
            eprintln!("Warning: moved it to {}", aside.display());
            LoadOutcome::Recovered(aside.to_path_buf())
        }
        Err(e) => {
            eprintln!(
                "Warning: could not move it to {} ({}); starting empty",
                aside.display(),
                e
            );
            LoadOutcome::Unmovable
        }
    }
}

fn corrupt_path(path: &Path) -> PathBuf {
    let stamp = Utc::now().format("%Y%m%dT%H%M%SZ");
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| DEFAULT_DB_FILE.to_string());
    path.with_file_name(format!("{}.corrupt-{}", name, stamp))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn sample_user() -> User {
        User {
            first_name: "Mona".to_string(),
            last_name: "Adel".to_string(),
            email: "mona@example.com".to_string(),
            password: "pw".to_string(),
            phone: "01012345678".to_string(),
        }
    }

    fn sample_project() -> Project {
        Project {
            title: "Clinic".to_string(),
            details: "Rural clinic".to_string(),
            target: "250000".to_string(),
            start_date: "2024-01-01".parse().unwrap(),
            end_date: "2024-06-30".parse().unwrap(),
            owner: "mona@example.com".to_string(),
        }
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("db.json");
        let (store, outcome) = Store::load(&path).unwrap();
        assert_eq!(outcome, LoadOutcome::Fresh);
        assert!(store.users().is_empty());
        assert!(store.projects().is_empty());
        // Loading alone never creates the file
        assert!(!path.exists());
    }

    #[test]
    fn test_blank_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("db.json");
        fs::write(&path, "  \n").unwrap();
        let (store, outcome) = Store::load(&path).unwrap();
        assert_eq!(outcome, LoadOutcome::Fresh);
        assert!(store.projects().is_empty());
    }

    #[test]
    fn test_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("db.json");

        let mut store = Store::empty(&path);
        store.users_mut().push(sample_user());
        store.projects_mut().push(sample_project());
        store.save().unwrap();

        let (reloaded, outcome) = Store::load(&path).unwrap();
        assert_eq!(outcome, LoadOutcome::Loaded);
        assert_eq!(reloaded.users(), store.users());
        assert_eq!(reloaded.projects(), store.projects());
    }

    #[test]
    fn test_saved_layout() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("db.json");
        let mut store = Store::empty(&path);
        store.projects_mut().push(sample_project());
        store.save().unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("{\n    \"users\": []"));
        assert!(content.contains("\"start_date\": \"2024-01-01\""));
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("data").join("db.json");
        Store::empty(&path).save().unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_corrupt_file_moved_aside() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("db.json");
        fs::write(&path, "{ not json").unwrap();

        let (store, outcome) = Store::load(&path).unwrap();
        assert!(store.users().is_empty());
        let aside = match outcome {
            LoadOutcome::Recovered(aside) => aside,
            other => panic!("expected recovery, got {:?}", other),
        };
        assert!(!path.exists());
        assert_eq!(fs::read_to_string(&aside).unwrap(), "{ not json");
        assert!(aside
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("db.json.corrupt-"));
    }

    #[test]
    fn test_unmovable_corrupt_file_still_opens() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("db.json");
        fs::write(&path, "[1, 2").unwrap();

        // A non-empty directory in the way makes the rename fail
        let blocked = dir.path().join("db.json.aside");
        fs::create_dir(&blocked).unwrap();
        fs::write(blocked.join("keep"), "x").unwrap();

        assert_eq!(set_aside(&path, &blocked), LoadOutcome::Unmovable);
        assert_eq!(fs::read_to_string(&path).unwrap(), "[1, 2");
    }
}
