//! Startup inputs: the viewport-size list, the target list, and the output
//! directory
//!
//! Size and target loading is deliberately forgiving: a missing or malformed
//! file is logged and yields an empty list (an empty size list means zero
//! artifacts per job and jobs trivially succeed). Only output-directory
//! creation is fatal.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::{Error, Result, Viewport};

/// Load the viewport list from a JSON file of `{"width", "height"}` records.
pub fn load_viewports(path: &Path) -> Vec<Viewport> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) => {
            warn!("could not read {}: {err}", path.display());
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<Viewport>>(&raw) {
        Ok(sizes) => {
            for (i, size) in sizes.iter().enumerate() {
                info!("size #{i}: {}x{}", size.width, size.height);
            }
            sizes
        }
        Err(err) => {
            warn!("could not parse {}: {err}", path.display());
            Vec::new()
        }
    }
}

/// Read one target per line from a plain-text file. Blank lines are skipped.
pub fn load_targets(path: &Path) -> Vec<String> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) => {
            warn!(
                "there was a problem with {}, please check it: {err}",
                path.display()
            );
            return Vec::new();
        }
    };

    let mut targets = Vec::new();
    for line in raw.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        debug!("target: {line}");
        targets.push(line.to_string());
    }
    targets
}

/// Create the output directory under `base`, idempotently.
pub fn ensure_output_dir(base: &Path) -> Result<PathBuf> {
    let out = base.join("out");
    fs::create_dir_all(&out).map_err(|err| {
        Error::Setup(format!(
            "could not create output directory {}: {err}",
            out.display()
        ))
    })?;
    Ok(out)
}
