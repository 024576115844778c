//! Default filesystem-backed port implementations.

use crate::load::{LoadedPass, load_passes};
use crate::ports::{PassSource, WritePort};
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use std::io::ErrorKind;

/// Loads `*.pass.json` files from one directory.
#[derive(Debug, Clone)]
pub struct FsPassSource {
    pub input_dir: Utf8PathBuf,
}

impl FsPassSource {
    pub fn new(input_dir: Utf8PathBuf) -> Self {
        Self { input_dir }
    }
}

impl PassSource for FsPassSource {
    fn load_passes(&self) -> anyhow::Result<Vec<LoadedPass>> {
        load_passes(&self.input_dir)
            .with_context(|| format!("load passes from {}", self.input_dir))
    }
}

/// In-memory pass source for embedding and testing; sorted by path like
/// [`FsPassSource`].
#[derive(Debug, Clone)]
pub struct InMemoryPassSource {
    passes: Vec<LoadedPass>,
}

impl InMemoryPassSource {
    pub fn new(mut passes: Vec<LoadedPass>) -> Self {
        passes.sort_by(|a, b| a.path.cmp(&b.path));
        Self { passes }
    }
}

impl PassSource for InMemoryPassSource {
    fn load_passes(&self) -> anyhow::Result<Vec<LoadedPass>> {
        Ok(self.passes.clone())
    }
}

/// Filesystem read/write operations.
#[derive(Debug, Clone, Default)]
pub struct FsWritePort;

impl WritePort for FsWritePort {
    fn read_file(&self, path: &Utf8Path) -> anyhow::Result<Option<String>> {
        match fs::read_to_string(path) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("read {}", path)),
        }
    }

    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("create parent dir for {}", path))?;
        }
        fs::write(path, contents).with_context(|| format!("write {}", path))
    }

    fn create_dir_all(&self, path: &Utf8Path) -> anyhow::Result<()> {
        fs::create_dir_all(path).with_context(|| format!("create_dir_all {}", path))
    }
}
