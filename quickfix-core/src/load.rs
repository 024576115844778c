//! Pass file ingestion.
//!
//! Loading is tolerant: a pass that cannot be read or parsed is kept with its
//! error so the report can list it, and the remaining passes still resolve.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use glob::glob;
use quickfix_types::pass::PassFile;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct LoadedPass {
    pub path: Utf8PathBuf,
    pub pass: Result<PassFile, PassLoadError>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PassLoadError {
    #[error("io error: {message}")]
    Io { message: String },

    #[error("json parse error: {message}")]
    Json { message: String },
}

/// Reads one pass file, capturing failures in [`LoadedPass::pass`].
pub fn load_pass_file(path: &Utf8Path) -> LoadedPass {
    let pass = match fs::read_to_string(path) {
        Ok(s) => serde_json::from_str::<PassFile>(&s).map_err(|e| PassLoadError::Json {
            message: e.to_string(),
        }),
        Err(e) => Err(PassLoadError::Io {
            message: e.to_string(),
        }),
    };
    LoadedPass {
        path: path.to_path_buf(),
        pass,
    }
}

/// Loads every `*.pass.json` directly under `dir`, sorted by path.
pub fn load_passes(dir: &Utf8Path) -> anyhow::Result<Vec<LoadedPass>> {
    let pattern = dir.join("*.pass.json");
    let pattern_str = pattern.as_str();

    debug!(pattern = %pattern_str, "scanning for pass files");

    let mut out = Vec::new();
    for entry in glob(pattern_str).context("glob *.pass.json")? {
        let path = entry
            .map_err(|e| anyhow::anyhow!("glob error: {e}"))?
            .to_string_lossy()
            .to_string();
        out.push(load_pass_file(Utf8Path::new(&path)));
    }

    // Deterministic order matters.
    out.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickfix_syntax::make;
    use tempfile::TempDir;

    fn utf8_dir(temp: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8")
    }

    #[test]
    fn loads_sorted_and_keeps_failures() {
        let temp = TempDir::new().expect("temp dir");
        let dir = utf8_dir(&temp);
        let pass = PassFile::new("src/B.kt", make::file(vec![make::name_ref("b")]));
        std::fs::write(dir.join("b.pass.json"), serde_json::to_string(&pass).unwrap())
            .expect("write");
        std::fs::write(dir.join("a.pass.json"), "{ not json").expect("write");
        std::fs::write(dir.join("notes.json"), "{}").expect("write");

        let loaded = load_passes(&dir).expect("load");
        let names: Vec<_> = loaded.iter().map(|p| p.path.file_name().unwrap()).collect();
        assert_eq!(names, vec!["a.pass.json", "b.pass.json"]);
        assert!(matches!(loaded[0].pass, Err(PassLoadError::Json { .. })));
        assert_eq!(loaded[1].pass.as_ref().unwrap().source_name, "src/B.kt");
    }

    #[test]
    fn missing_file_is_io_error() {
        let loaded = load_pass_file(Utf8Path::new("/definitely/not/here.pass.json"));
        assert!(matches!(loaded.pass, Err(PassLoadError::Io { .. })));
    }

    #[test]
    fn empty_dir_has_no_passes() {
        let temp = TempDir::new().expect("temp dir");
        assert!(load_passes(&utf8_dir(&temp)).expect("load").is_empty());
    }
}
