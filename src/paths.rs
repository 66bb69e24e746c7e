use anyhow::{Context, Result};
use std::path::PathBuf;

const ROOT_ENV: &str = "OPENMSX_LAUNCHER_ROOT";

pub fn self_path() -> Result<PathBuf> {
    Ok(std::env::current_exe().context("current_exe")?)
}

/// Install root: the directory the launcher binary lives in, overridable via
/// an environment variable so the update finalizer can be pointed at a
/// scratch directory.
pub fn root_dir() -> Result<PathBuf> {
    if let Ok(dev_root) = std::env::var(ROOT_ENV) {
        return Ok(PathBuf::from(dev_root));
    }
    let exe = self_path()?;
    Ok(exe.parent().context("exe has no parent")?.to_path_buf())
}
