//! Archive disassembly through an external `apktool` process.

use crate::domain::ports::ArchiveDecoder;
use anyhow::{Context, Result, bail};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::info;

/// API level used when the caller has no better information.
pub const DEFAULT_API_LEVEL: u32 = 15;

pub struct ApktoolDecoder {
    program: PathBuf,
}

impl ApktoolDecoder {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Arguments for `apktool d`: force overwrite, skip resources, smali only.
    pub fn arguments(archive: &Path, out_dir: &Path, api_level: u32) -> Vec<OsString> {
        vec![
            "d".into(),
            "-f".into(),
            "-r".into(),
            "--api-level".into(),
            api_level.to_string().into(),
            "-o".into(),
            out_dir.into(),
            archive.into(),
        ]
    }
}

impl Default for ApktoolDecoder {
    fn default() -> Self {
        Self::new("apktool")
    }
}

impl ArchiveDecoder for ApktoolDecoder {
    fn decode(&self, archive: &Path, out_dir: &Path, api_level: u32) -> Result<()> {
        if !archive.is_file() {
            bail!("Archive not found: {}", archive.display());
        }

        info!(archive = %archive.display(), out = %out_dir.display(), api_level, "Decoding archive");
        let output = Command::new(&self.program)
            .args(Self::arguments(archive, out_dir, api_level))
            .output()
            .with_context(|| format!("Failed to run {}", self.program.display()))?;

        if !output.status.success() {
            bail!(
                "{} exited with {}: {}",
                self.program.display(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(())
    }
}
