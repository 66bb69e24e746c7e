#![cfg_attr(windows, windows_subsystem = "windows")]

mod config;
mod jre;
mod logging;
mod notify;
mod paths;
mod runner;
mod single_instance;
mod update;

use anyhow::Result;
use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
    process::ExitStatus,
};

fn main() {
    let instance = single_instance::acquire();

    let Ok(root) = paths::root_dir() else {
        return;
    };
    let override_path = std::env::args_os().nth(1);

    // every path exits 0; failures reach the user through the modal dialog
    run_with_deps(
        &root,
        instance,
        override_path.as_deref(),
        jre::locate,
        runner::launch_and_wait,
        notify::report_error,
    );
}

fn run_with_deps(
    root: &Path,
    instance: single_instance::Instance,
    override_path: Option<&OsStr>,
    locate: impl Fn(Option<&OsStr>) -> Option<PathBuf>,
    mut launch: impl FnMut(&Path, &Path) -> Result<ExitStatus>,
    report: impl Fn(&str),
) {
    // held until the application exits; the OS reclaims the mutex from there
    let _instance = match instance {
        single_instance::Instance::AlreadyRunning => return,
        single_instance::Instance::Fresh(guard) => guard,
    };

    let log = logging::init(root).ok();
    let log = log.as_deref();

    let summary = update::finalize_staged(root);
    if summary.removed > 0 || summary.promoted > 0 {
        let _ = logging::log_line(
            log,
            &format!(
                "update finalized: removed {} jar(s), promoted {}",
                summary.removed, summary.promoted
            ),
        );
    }
    if summary.old_launcher_removed {
        let _ = logging::log_line(log, "removed stale launcher backup");
    }

    let Some(java) = locate(override_path) else {
        let _ = logging::log_line(log, "no compatible Java runtime found");
        report(notify::JAVA_NOT_INSTALLED_MSG);
        return;
    };

    let _ = logging::log_line(log, &format!("launching {}", java.display()));
    match launch(root, &java) {
        Ok(status) => {
            let _ = logging::log_line(log, &format!("java exited with code {:?}", status.code()));
        }
        Err(err) => {
            let _ = logging::log_line(log, &format!("failed to start java: {err:#}"));
            report(&notify::cannot_start_message());
        }
    }
}
