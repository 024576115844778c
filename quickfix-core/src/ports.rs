//! Port traits abstracting all I/O away from the pipeline.

use crate::load::LoadedPass;
use camino::Utf8Path;

/// Source of analysis passes.
pub trait PassSource {
    fn load_passes(&self) -> anyhow::Result<Vec<LoadedPass>>;
}

/// File-system read and write operations.
pub trait WritePort {
    fn read_file(&self, path: &Utf8Path) -> anyhow::Result<Option<String>>;
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()>;
    fn create_dir_all(&self, path: &Utf8Path) -> anyhow::Result<()>;
}
