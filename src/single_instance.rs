//! Cross-process single-instance detection via a well-known named mutex.
//!
//! The mutex is created once at startup and never explicitly released; its
//! lifetime is the whole process and the OS reclaims it on exit. Existence of
//! the name, not ownership, is what signals "another instance is running".

pub enum Instance {
    Fresh(InstanceGuard),
    AlreadyRunning,
}

/// A null handle from `CreateMutexW` counts as `Fresh`: with no mutex there
/// is nothing trustworthy to detect a running instance with, and starting
/// the application wins over refusing to.
#[cfg(windows)]
pub fn acquire() -> Instance {
    use std::ffi::OsStr;
    use std::iter::once;
    use std::os::windows::ffi::OsStrExt;
    use windows_sys::Win32::Foundation::{CloseHandle, GetLastError, ERROR_ALREADY_EXISTS};
    use windows_sys::Win32::System::Threading::CreateMutexW;

    let wide: Vec<u16> = OsStr::new(crate::config::MUTEX_NAME)
        .encode_wide()
        .chain(once(0))
        .collect();
    let handle = unsafe { CreateMutexW(std::ptr::null_mut(), 0, wide.as_ptr()) };
    if handle == 0 {
        // mutex creation failed; launching beats refusing to start
        return Instance::Fresh(InstanceGuard { handle });
    }
    let last_error = unsafe { GetLastError() };
    if last_error == ERROR_ALREADY_EXISTS {
        unsafe { CloseHandle(handle) };
        focus_running_instance();
        return Instance::AlreadyRunning;
    }
    Instance::Fresh(InstanceGuard { handle })
}

#[cfg(not(windows))]
pub fn acquire() -> Instance {
    Instance::Fresh(InstanceGuard {})
}

/// Brings the running instance's window to the foreground, restoring it if
/// minimized. The first window whose title matches exactly wins; finding none
/// is a benign no-op.
#[cfg(windows)]
fn focus_running_instance() {
    use std::ffi::OsStr;
    use std::os::windows::ffi::OsStrExt;
    use windows_sys::Win32::Foundation::{BOOL, HWND, LPARAM};
    use windows_sys::Win32::UI::WindowsAndMessaging::{
        EnumWindows, GetWindowTextW, IsIconic, SetForegroundWindow, ShowWindow, SW_RESTORE,
        SW_SHOW,
    };

    struct Search {
        title: Vec<u16>,
    }

    unsafe extern "system" fn on_window(hwnd: HWND, lparam: LPARAM) -> BOOL {
        let search = &*(lparam as *const Search);
        let mut buf = [0u16; 128];
        let len = GetWindowTextW(hwnd, buf.as_mut_ptr(), buf.len() as i32) as usize;
        if buf[..len] == search.title[..] {
            SetForegroundWindow(hwnd);
            if IsIconic(hwnd) != 0 {
                ShowWindow(hwnd, SW_RESTORE);
            } else {
                ShowWindow(hwnd, SW_SHOW);
            }
            return 0;
        }
        1
    }

    let search = Search {
        title: OsStr::new(crate::config::WINDOW_TITLE).encode_wide().collect(),
    };
    unsafe { EnumWindows(Some(on_window), &search as *const Search as LPARAM) };
}

#[cfg(windows)]
pub struct InstanceGuard {
    handle: isize,
}

#[cfg(windows)]
impl Drop for InstanceGuard {
    fn drop(&mut self) {
        if self.handle != 0 {
            unsafe { windows_sys::Win32::Foundation::CloseHandle(self.handle) };
        }
    }
}

#[cfg(not(windows))]
pub struct InstanceGuard {}

/// Guard that holds no OS handle, for exercising the orchestration without
/// taking the real mutex.
#[cfg(all(test, windows))]
pub fn detached_guard() -> InstanceGuard {
    InstanceGuard { handle: 0 }
}

#[cfg(all(test, not(windows)))]
pub fn detached_guard() -> InstanceGuard {
    InstanceGuard {}
}
