//! Project layout generator.
//!
//! A [`Layout`] maps top-level folder names (`"."` for the root itself) to a
//! list of entries. An entry is either a file name or a map of nested folder
//! names to their own entries, which is also the JSON shape accepted by
//! [`load_layout`]:
//!
//! ```json
//! { ".": ["README.md"], "src": ["main.rs", { "config": ["mod.rs"] }] }
//! ```
//!
//! Generation only ever adds: existing files are left untouched.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Entry {
    File(String),
    Folder(BTreeMap<String, Vec<Entry>>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Layout(pub BTreeMap<String, Vec<Entry>>);

#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error("failed to {action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        source: io::Error,
    },

    #[error("invalid layout: {0}")]
    Layout(#[from] serde_json::Error),
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScaffoldReport {
    pub directories: usize,
    pub files_created: usize,
    pub files_skipped: usize,
}

pub fn file(name: &str) -> Entry {
    Entry::File(name.to_string())
}

pub fn folder(name: &str, entries: Vec<Entry>) -> Entry {
    Entry::Folder(BTreeMap::from([(name.to_string(), entries)]))
}

/// Layout of this service's own project tree.
pub fn default_layout() -> Layout {
    Layout(BTreeMap::from([
        (
            ".".to_string(),
            vec![
                file(".env"),
                file(".env.example"),
                file(".gitignore"),
                file("Cargo.toml"),
                file("README.md"),
            ],
        ),
        (
            "src".to_string(),
            vec![
                file("main.rs"),
                file("lib.rs"),
                file("app.rs"),
                file("error.rs"),
                file("response.rs"),
                file("telemetry.rs"),
                folder("bin", vec![file("scaffold.rs")]),
                folder(
                    "config",
                    vec![file("mod.rs"), file("settings.rs"), file("database.rs")],
                ),
                folder("handlers", vec![file("mod.rs"), file("health.rs")]),
                folder(
                    "middleware",
                    vec![
                        file("mod.rs"),
                        file("cors.rs"),
                        file("exception.rs"),
                        file("trace.rs"),
                    ],
                ),
                folder("migration", vec![file("mod.rs")]),
                folder("models", vec![file("mod.rs"), file("base.rs")]),
                folder("routes", vec![file("mod.rs"), file("v1.rs")]),
                folder("services", vec![file("mod.rs")]),
            ],
        ),
        (
            "tests".to_string(),
            vec![folder("common", vec![file("mod.rs")])],
        ),
    ]))
}

pub fn parse_layout(raw: &str) -> Result<Layout, ScaffoldError> {
    Ok(serde_json::from_str(raw)?)
}

pub fn load_layout(path: &Path) -> Result<Layout, ScaffoldError> {
    let raw = fs::read_to_string(path).map_err(|source| ScaffoldError::Io {
        action: "read layout",
        path: path.to_path_buf(),
        source,
    })?;
    parse_layout(&raw)
}

/// Create every folder and empty file described by `layout` under `root`.
/// Paths that already exist are skipped; nothing is removed or rolled back
/// if a later step fails.
pub fn create_structure(root: &Path, layout: &Layout) -> Result<ScaffoldReport, ScaffoldError> {
    let mut report = ScaffoldReport::default();

    for (name, entries) in &layout.0 {
        let folder_path = if name.is_empty() || name == "." {
            root.to_path_buf()
        } else {
            root.join(name)
        };
        ensure_dir(&folder_path, &mut report)?;
        create_entries(&folder_path, entries, &mut report)?;
    }

    Ok(report)
}

fn create_entries(
    base: &Path,
    entries: &[Entry],
    report: &mut ScaffoldReport,
) -> Result<(), ScaffoldError> {
    for entry in entries {
        match entry {
            Entry::File(name) => create_empty_file(&base.join(name), report)?,
            Entry::Folder(folders) => {
                for (name, children) in folders {
                    let path = base.join(name);
                    ensure_dir(&path, report)?;
                    create_entries(&path, children, report)?;
                }
            }
        }
    }
    Ok(())
}

fn ensure_dir(path: &Path, report: &mut ScaffoldReport) -> Result<(), ScaffoldError> {
    fs::create_dir_all(path).map_err(|source| ScaffoldError::Io {
        action: "create directory",
        path: path.to_path_buf(),
        source,
    })?;
    report.directories += 1;
    Ok(())
}

fn create_empty_file(path: &Path, report: &mut ScaffoldReport) -> Result<(), ScaffoldError> {
    if path.exists() {
        tracing::debug!("Skipping existing {}", path.display());
        report.files_skipped += 1;
        return Ok(());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| ScaffoldError::Io {
            action: "create directory",
            path: parent.to_path_buf(),
            source,
        })?;
    }

    // create_new never truncates, even if the file appeared after the check
    match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(_) => {
            tracing::debug!("Created {}", path.display());
            report.files_created += 1;
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            report.files_skipped += 1;
            Ok(())
        }
        Err(source) => Err(ScaffoldError::Io {
            action: "create file",
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_json_layout() {
        let layout = parse_layout(
            r#"{".": ["README.md"], "src": ["main.py", {"core": ["db.py", {"common": []}]}]}"#,
        )
        .unwrap();

        assert_eq!(layout.0["."], vec![file("README.md")]);
        assert_eq!(
            layout.0["src"],
            vec![
                file("main.py"),
                folder("core", vec![file("db.py"), folder("common", vec![])]),
            ]
        );
    }

    #[test]
    fn rejects_non_list_contents() {
        let err = parse_layout(r#"{"src": 42}"#).unwrap_err();
        assert!(matches!(err, ScaffoldError::Layout(_)));
    }

    #[test]
    fn creates_files_and_folders() {
        let dir = tempfile::tempdir().unwrap();
        let layout = parse_layout(
            r#"{".": [".env"], "src": ["lib.rs", {"models": ["mod.rs"]}, {"empty": []}]}"#,
        )
        .unwrap();

        let report = create_structure(dir.path(), &layout).unwrap();

        assert!(dir.path().join(".env").is_file());
        assert!(dir.path().join("src/lib.rs").is_file());
        assert!(dir.path().join("src/models/mod.rs").is_file());
        assert!(dir.path().join("src/empty").is_dir());
        assert_eq!(report.files_created, 3);
        assert_eq!(report.files_skipped, 0);
    }

    #[test]
    fn second_run_keeps_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let layout = default_layout();

        let first = create_structure(dir.path(), &layout).unwrap();
        let readme = dir.path().join("README.md");
        fs::write(&readme, "# hello").unwrap();

        let second = create_structure(dir.path(), &layout).unwrap();

        assert_eq!(fs::read_to_string(&readme).unwrap(), "# hello");
        assert_eq!(second.files_created, 0);
        assert_eq!(second.files_skipped, first.files_created);
    }

    #[test]
    fn default_layout_round_trips_through_json() {
        let json = serde_json::to_string(&default_layout()).unwrap();
        assert_eq!(parse_layout(&json).unwrap(), default_layout());
    }
}
