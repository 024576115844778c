//! Clap-free settings for resolve and apply pipelines.

use camino::Utf8PathBuf;
use quickfix_domain::BatchMode;

/// Settings for the resolve pipeline.
#[derive(Debug, Clone)]
pub struct ResolveSettings {
    pub input_dir: Utf8PathBuf,
    pub out_dir: Utf8PathBuf,

    // Policy
    pub allow: Vec<String>,
    pub deny: Vec<String>,

    pub batch_mode: BatchMode,
    /// Attach a unified diff to every reported fix.
    pub preview: bool,
}

impl Default for ResolveSettings {
    fn default() -> Self {
        Self {
            input_dir: Utf8PathBuf::from("passes"),
            out_dir: Utf8PathBuf::from("artifacts/quickfix"),
            allow: Vec::new(),
            deny: Vec::new(),
            batch_mode: BatchMode::default(),
            preview: false,
        }
    }
}

/// Settings for the apply pipeline.
#[derive(Debug, Clone)]
pub struct ApplySettings {
    pub pass_path: Utf8PathBuf,
    /// Resolved fix id, as listed in `report.json`.
    pub fix: String,
    /// Root the pass's `source_name` is relative to.
    pub source_root: Utf8PathBuf,
    pub out_dir: Utf8PathBuf,

    // Apply behaviour
    pub dry_run: bool,
    pub allow_guarded: bool,

    /// Source fingerprint recorded when the fix was offered.
    pub expected_sha256: Option<String>,
}

impl Default for ApplySettings {
    fn default() -> Self {
        Self {
            pass_path: Utf8PathBuf::new(),
            fix: String::new(),
            source_root: Utf8PathBuf::from("."),
            out_dir: Utf8PathBuf::from("artifacts/quickfix"),
            dry_run: true,
            allow_guarded: false,
            expected_sha256: None,
        }
    }
}
