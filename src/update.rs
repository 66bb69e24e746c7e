//! Finalizes a self-update staged by the running application.
//!
//! The application downloads new jars into `lib/` under a `.jar_update` name
//! while the current jars stay usable, so a failed download never corrupts
//! the active install. On the next start the launcher completes the swap:
//! delete every current jar, then strip the `_update` suffix from the staged
//! ones. A crash between those two steps leaves only staged files behind,
//! which the next pass promotes the same way, so this must stay idempotent
//! and tolerant of current jars already being gone.

use std::{
    fs,
    path::{Path, PathBuf},
};

/// Resource ceiling on how many lib files one pass will classify.
pub const MAX_LIB_FILES: usize = 100;

const LIB_DIR: &str = "lib";
const JAR_EXT: &str = ".jar";
const STAGED_JAR_EXT: &str = ".jar_update";
const STAGED_SUFFIX: &str = "_update";
pub const OLD_LAUNCHER_NAME: &str = "openMSX Launcher.exe.old";

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct UpdateSummary {
    pub removed: usize,
    pub promoted: usize,
    pub old_launcher_removed: bool,
}

/// Best effort by contract: every per-file failure is swallowed. A partially
/// applied swap is a transient state the next launch heals.
pub fn finalize_staged(root: &Path) -> UpdateSummary {
    let mut summary = UpdateSummary::default();
    let (current, staged) = scan_lib(&root.join(LIB_DIR));

    if !staged.is_empty() {
        // every release replaces the whole jar set, so the delete is blanket
        for jar in &current {
            if fs::remove_file(jar).is_ok() {
                summary.removed += 1;
            }
        }
        for staged_jar in &staged {
            if let Some(dest) = promoted_name(staged_jar) {
                if fs::rename(staged_jar, dest).is_ok() {
                    summary.promoted += 1;
                }
            }
        }
    }

    let old_launcher = root.join(OLD_LAUNCHER_NAME);
    summary.old_launcher_removed = fs::remove_file(old_launcher).is_ok();

    summary
}

fn scan_lib(lib: &Path) -> (Vec<PathBuf>, Vec<PathBuf>) {
    let mut current = Vec::new();
    let mut staged = Vec::new();
    let Ok(entries) = fs::read_dir(lib) else {
        return (current, staged);
    };
    for entry in entries.flatten() {
        if current.len() + staged.len() >= MAX_LIB_FILES {
            break;
        }
        let path = entry.path();
        if path.is_dir() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        // the staged extension is the longer match, check it first
        if name.ends_with(STAGED_JAR_EXT) {
            staged.push(path);
        } else if name.ends_with(JAR_EXT) {
            current.push(path);
        }
    }
    (current, staged)
}

fn promoted_name(staged: &Path) -> Option<PathBuf> {
    let name = staged.file_name()?.to_str()?;
    let trimmed = name.strip_suffix(STAGED_SUFFIX)?;
    Some(staged.with_file_name(trimmed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn promoted_name_strips_update_suffix() {
        let staged = Path::new("/tmp/lib/a.jar_update");
        assert_eq!(
            promoted_name(staged),
            Some(PathBuf::from("/tmp/lib/a.jar"))
        );
    }

    #[test]
    fn promoted_name_rejects_unmarked_files() {
        assert_eq!(promoted_name(Path::new("/tmp/lib/a.jar")), None);
    }

    #[test]
    fn scan_classifies_staged_before_current() {
        let tmp = tempfile::tempdir().unwrap();
        let lib = tmp.path().join("lib");
        fs::create_dir_all(&lib).unwrap();
        fs::write(lib.join("a.jar"), "jar").unwrap();
        fs::write(lib.join("a.jar_update"), "staged").unwrap();
        fs::write(lib.join("notes.txt"), "ignored").unwrap();

        let (current, staged) = scan_lib(&lib);
        assert_eq!(current, vec![lib.join("a.jar")]);
        assert_eq!(staged, vec![lib.join("a.jar_update")]);
    }

    #[test]
    fn scan_skips_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let lib = tmp.path().join("lib");
        fs::create_dir_all(lib.join("nested.jar")).unwrap();
        fs::write(lib.join("a.jar"), "jar").unwrap();

        let (current, staged) = scan_lib(&lib);
        assert_eq!(current, vec![lib.join("a.jar")]);
        assert!(staged.is_empty());
    }

    #[test]
    fn missing_lib_dir_is_harmless() {
        let tmp = tempfile::tempdir().unwrap();
        let summary = finalize_staged(tmp.path());
        assert_eq!(summary, UpdateSummary::default());
    }
}
