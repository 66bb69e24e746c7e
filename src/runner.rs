use anyhow::{Context, Result};
use std::{
    path::Path,
    process::{Command, ExitStatus, Stdio},
};

use crate::config;

// Fixed argument set; nothing user-supplied is forwarded to the JVM.
const JAVA_ARGS: [&str; 3] = ["-client", "-cp", r"lib\*"];

/// Spawns the JVM and blocks until it exits. The launcher's lifetime is bound
/// to the application's, so there is no timeout. An `Err` means process
/// creation itself was rejected; the application's own exit status is not the
/// launcher's concern.
pub fn launch_and_wait(root: &Path, java: &Path) -> Result<ExitStatus> {
    launch_with_executor(root, java, |cmd| cmd.status().context("spawn java"))
}

pub fn launch_with_executor(
    root: &Path,
    java: &Path,
    mut exec: impl FnMut(&mut Command) -> Result<ExitStatus>,
) -> Result<ExitStatus> {
    let mut cmd = Command::new(java);
    cmd.args(JAVA_ARGS)
        .arg(config::MAIN_CLASS)
        .current_dir(root)
        .stdin(Stdio::null());
    #[cfg(windows)]
    {
        use std::os::windows::process::CommandExt;
        const CREATE_NO_WINDOW: u32 = 0x08000000;
        cmd.creation_flags(CREATE_NO_WINDOW);
    }
    exec(&mut cmd)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn exit_ok() -> ExitStatus {
        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            ExitStatus::from_raw(0)
        }
        #[cfg(windows)]
        {
            use std::os::windows::process::ExitStatusExt;
            ExitStatus::from_raw(0)
        }
    }

    #[test]
    fn command_carries_the_fixed_jvm_arguments() {
        let mut seen: Option<(String, Vec<String>, Option<PathBuf>)> = None;
        let root = PathBuf::from("install-root");
        let java = PathBuf::from("java-home").join("bin").join("java.exe");

        launch_with_executor(&root, &java, |cmd| {
            seen = Some((
                cmd.get_program().to_string_lossy().to_string(),
                cmd.get_args()
                    .map(|a| a.to_string_lossy().to_string())
                    .collect(),
                cmd.get_current_dir().map(|d| d.to_path_buf()),
            ));
            Ok(exit_ok())
        })
        .unwrap();

        let (program, args, dir) = seen.unwrap();
        assert_eq!(program, java.to_string_lossy());
        assert_eq!(
            args,
            vec![
                "-client".to_string(),
                "-cp".to_string(),
                r"lib\*".to_string(),
                config::MAIN_CLASS.to_string(),
            ]
        );
        assert_eq!(dir, Some(root));
    }

    #[test]
    fn spawn_rejection_surfaces_as_err() {
        let result = launch_with_executor(
            Path::new("install-root"),
            Path::new("missing-java.exe"),
            |_| anyhow::bail!("program not found"),
        );
        assert!(result.is_err());
    }
}
