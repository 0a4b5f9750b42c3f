use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use catalog::{Registry, Role};
use regex::Regex;

use crate::compose::compose;
use crate::error::{Error, Result};
use crate::manifest::Manifest;
use crate::options::GenerationOptions;
use crate::types::ClientSelection;

pub const ENV_FILE_NAME: &str = ".env";
pub const MANIFEST_FILE_NAME: &str = "docker-compose.yml";

/// Name of the port binding the sync tracker talks to.
pub const API_PORT_NAME: &str = "api";

// Anchored at column 0: manifest lines never start with a bare `KEY=`, so
// command arguments such as `- OPT=` pass through untouched.
static BLANK_ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*=\s*$").expect("blank assignment pattern is valid")
});

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationResult {
    pub env_file_path: PathBuf,
    pub manifest_path: PathBuf,
    pub execution_port: u16,
    pub consensus_port: u16,
}

/// Drops blank `KEY=` assignments and repeated blank lines.
///
/// Applying it to its own output changes nothing.
pub fn cleanup(text: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();
    for line in text.lines() {
        if BLANK_ASSIGNMENT.is_match(line) {
            continue;
        }
        let line = line.trim_end();
        if line.is_empty() && lines.last().is_none_or(|prev| prev.is_empty()) {
            continue;
        }
        lines.push(line);
    }
    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }

    if lines.is_empty() {
        return String::new();
    }
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Composes, cleans and writes both documents into `options.path`.
///
/// Nothing touches the filesystem until every check has passed. If a write
/// fails, files written so far are removed again.
pub fn generate(
    registry: &Registry,
    selection: &ClientSelection,
    options: &GenerationOptions,
) -> Result<GenerationResult> {
    let composed = compose(registry, selection, options)?;
    let env_text = cleanup(&composed.env_text());
    let manifest_text = cleanup(&composed.manifest_text()?);

    let manifest = Manifest::parse(&manifest_text)
        .map_err(|e| Error::ManifestInspection(e.to_string()))?;
    let execution_port = api_port(&manifest, Role::Execution)?;
    let consensus_port = api_port(&manifest, Role::Consensus)?;

    let dir = options.path.as_path();
    let created_dirs = missing_dirs(dir);
    fs::create_dir_all(dir).map_err(|source| Error::PathCreation {
        path: dir.to_path_buf(),
        source,
    })?;

    let env_file_path = dir.join(ENV_FILE_NAME);
    let manifest_path = dir.join(MANIFEST_FILE_NAME);

    let mut written = Vec::new();
    let outcome = write_file(&env_file_path, &env_text, &mut written)
        .and_then(|()| write_file(&manifest_path, &manifest_text, &mut written));
    if let Err(err) = outcome {
        rollback(&written, &created_dirs);
        return Err(err);
    }

    Ok(GenerationResult {
        env_file_path,
        manifest_path,
        execution_port,
        consensus_port,
    })
}

fn api_port(manifest: &Manifest, role: Role) -> Result<u16> {
    manifest
        .published_port(role.as_str(), API_PORT_NAME)
        .ok_or_else(|| {
            Error::ManifestInspection(format!(
                "service '{role}' publishes no '{API_PORT_NAME}' port"
            ))
        })
}

/// `dir` and those of its ancestors that do not exist yet, deepest first.
fn missing_dirs(dir: &Path) -> Vec<PathBuf> {
    dir.ancestors()
        .take_while(|p| !p.as_os_str().is_empty() && !p.exists())
        .map(Path::to_path_buf)
        .collect()
}

/// Removes files this run created or truncated, then the directories it created.
fn rollback(written: &[PathBuf], created_dirs: &[PathBuf]) {
    for path in written {
        let _ = fs::remove_file(path);
    }
    for dir in created_dirs {
        let _ = fs::remove_dir(dir);
    }
}

fn write_file(path: &Path, contents: &str, written: &mut Vec<PathBuf>) -> Result<()> {
    let write_error = |source| Error::Write {
        path: path.to_path_buf(),
        source,
    };
    let mut file = File::create(path).map_err(write_error)?;
    // Created or truncated from here on.
    written.push(path.to_path_buf());
    file.write_all(contents.as_bytes()).map_err(write_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn blank_assignments_are_dropped() {
        let text = "# --- Network ---\nNETWORK=mainnet\nFEE_RECIPIENT=\nGRAFFITI=  \nA=b=\n";
        assert_eq!(cleanup(text), "# --- Network ---\nNETWORK=mainnet\nA=b=\n");
    }

    #[test]
    fn command_arguments_shaped_like_assignments_are_kept() {
        let text = "    command:\n    - --keep\n    - GETH_OPT=\n";
        assert_eq!(cleanup(text), text);
    }

    #[test]
    fn failed_open_is_not_recorded() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join(ENV_FILE_NAME);
        fs::create_dir(&target).unwrap();

        let mut written = Vec::new();
        let err = write_file(&target, "A=1\n", &mut written).unwrap_err();
        assert!(matches!(err, Error::Write { .. }));
        assert!(written.is_empty());
    }

    #[test]
    fn rollback_removes_every_created_directory() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("a").join("b").join("c");

        let created = missing_dirs(&dir);
        assert_eq!(
            created,
            vec![dir.clone(), root.path().join("a").join("b"), root.path().join("a")]
        );

        fs::create_dir_all(&dir).unwrap();
        let file = dir.join(ENV_FILE_NAME);
        fs::write(&file, "A=1\n").unwrap();

        rollback(&[file], &created);
        assert!(!root.path().join("a").exists());
        assert!(root.path().exists());
    }

    #[test]
    fn blank_runs_collapse_and_edges_trim() {
        let text = "\n\nA=1\n\n\n\nB=2\n   \n\n";
        assert_eq!(cleanup(text), "A=1\n\nB=2\n");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(cleanup(""), "");
        assert_eq!(cleanup("X=\n\n"), "");
    }

    #[test]
    fn cleanup_is_idempotent() {
        let text = "A=\n\n\nB=1\n\n  - C=\nD: 2\n\n";
        let once = cleanup(text);
        assert_eq!(cleanup(&once), once);
    }
}
