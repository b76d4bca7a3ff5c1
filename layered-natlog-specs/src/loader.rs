//! Fixture file loading.

use crate::{parse_fixture, MonoFixture, SpecError};
use std::fs;
use std::path::{Path, PathBuf};

fn load_error(path: &Path, message: impl ToString) -> SpecError {
    SpecError::Load {
        path: path.display().to_string(),
        message: message.to_string(),
    }
}

/// Read and parse one `.mono` file. Parse errors carry the file path.
pub fn load_fixture(path: &Path) -> Result<MonoFixture, SpecError> {
    let content = fs::read_to_string(path).map_err(|e| load_error(path, e))?;
    parse_fixture(&content).map_err(|e| match e {
        SpecError::Parse { line, message } => load_error(path, format!("line {}: {}", line, message)),
        other => other,
    })
}

/// Every `*.mono` file under `dir`, keyed by its path relative to `dir`
/// and sorted by that key. A missing directory holds no fixtures.
pub fn load_all_fixtures(dir: &Path) -> Result<Vec<(String, MonoFixture)>, SpecError> {
    let mut fixtures = Vec::new();
    let mut pending: Vec<PathBuf> = vec![dir.to_path_buf()];

    while let Some(current) = pending.pop() {
        if !current.is_dir() {
            continue;
        }
        let entries = fs::read_dir(&current).map_err(|e| load_error(&current, e))?;
        for entry in entries {
            let path = entry.map_err(|e| load_error(&current, e))?.path();
            if path.is_dir() {
                pending.push(path);
            } else if path.extension().is_some_and(|ext| ext == "mono") {
                let name = path.strip_prefix(dir).unwrap_or(&path).display().to_string();
                fixtures.push((name, load_fixture(&path)?));
            }
        }
    }

    fixtures.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(fixtures)
}
