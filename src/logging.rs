use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

const LOG_FILE_NAME: &str = "launcher.log";

pub fn log_path(root: &Path) -> PathBuf {
    root.join(LOG_FILE_NAME)
}

pub fn init(root: &Path) -> Result<PathBuf> {
    let log_path = log_path(root);
    let _file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("open {}", log_path.display()))?;
    Ok(log_path)
}

pub fn log_line(path: Option<&Path>, line: &str) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    use std::io::Write;
    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open {}", path.display()))?;
    writeln!(file, "{line}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_creates_log_file() {
        let tmp = tempfile::tempdir().unwrap();
        let log_path = init(tmp.path()).unwrap();
        assert!(log_path.exists());
        assert_eq!(log_path, tmp.path().join(LOG_FILE_NAME));
    }

    #[test]
    fn log_line_appends() {
        let tmp = tempfile::tempdir().unwrap();
        let log_path = init(tmp.path()).unwrap();
        log_line(Some(&log_path), "first").unwrap();
        log_line(Some(&log_path), "second").unwrap();
        let contents = fs::read_to_string(&log_path).unwrap();
        assert_eq!(contents, "first\nsecond\n");
    }

    #[test]
    fn log_line_without_path_is_noop() {
        log_line(None, "dropped").unwrap();
    }
}
